//! Request and response shapes for the Instagram operations
//!
//! Each publish variant is an explicit struct with optional fields and
//! documented defaults; these double as the deserialized tool inputs so
//! validation stays next to the shape it guards.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::{InstagramError, Result};

/// A tagged user with normalized photo coordinates.
///
/// Both axes are in `[0,1]` and default to `0.5` (image center) when
/// omitted.
#[derive(Debug, Clone, Deserialize)]
pub struct UserTag {
    pub username: String,
    #[serde(default)]
    pub x: Option<f64>,
    #[serde(default)]
    pub y: Option<f64>,
}

impl UserTag {
    /// Wire form used in container-creation calls: `{username, x, y}`.
    pub fn to_wire(&self) -> Value {
        json!({
            "username": self.username,
            "x": self.x.unwrap_or(0.5).clamp(0.0, 1.0),
            "y": self.y.unwrap_or(0.5).clamp(0.0, 1.0),
        })
    }
}

/// Serialize user tags for the `user_tags` container parameter.
///
/// Returns `None` for an absent or empty list so the parameter is omitted
/// entirely, matching what the platform expects.
pub fn serialize_user_tags(tags: Option<&[UserTag]>) -> Result<Option<String>> {
    let tags = match tags {
        Some(tags) if !tags.is_empty() => tags,
        _ => return Ok(None),
    };

    let wire: Vec<Value> = tags.iter().map(UserTag::to_wire).collect();
    let serialized = serde_json::to_string(&wire).map_err(ig_core::Error::Json)?;
    Ok(Some(serialized))
}

/// Single feed photo
#[derive(Debug, Clone, Deserialize)]
pub struct PhotoPost {
    pub image_url: String,
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default)]
    pub user_tags: Option<Vec<UserTag>>,
    #[serde(default)]
    pub location_id: Option<String>,
}

/// Story image; the platform accepts no caption, tags, or location here
#[derive(Debug, Clone, Deserialize)]
pub struct StoryPost {
    pub image_url: String,
}

/// Carousel of 2 to 10 images
#[derive(Debug, Clone, Deserialize)]
pub struct CarouselPost {
    pub image_urls: Vec<String>,
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default)]
    pub location_id: Option<String>,
}

fn default_share_to_feed() -> bool {
    true
}

/// Reel video
///
/// `share_to_feed` defaults to `true`; this is the canonical default, the
/// tool schema documents it without re-defaulting.
#[derive(Debug, Clone, Deserialize)]
pub struct ReelPost {
    pub video_url: String,
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default)]
    pub cover_url: Option<String>,
    #[serde(default)]
    pub location_id: Option<String>,
    #[serde(default = "default_share_to_feed")]
    pub share_to_feed: bool,
}

/// Insights aggregation period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightsPeriod {
    #[default]
    Day,
    Lifetime,
}

impl InsightsPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Lifetime => "lifetime",
        }
    }
}

/// Insights value shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightsMetricType {
    #[default]
    TotalValue,
    TimeSeries,
}

impl InsightsMetricType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TotalValue => "total_value",
            Self::TimeSeries => "time_series",
        }
    }
}

fn default_account_metric() -> String {
    "views,follower_count,follows_and_unfollows".to_string()
}

/// Account-level insights query
#[derive(Debug, Clone, Deserialize)]
pub struct AccountInsightsQuery {
    /// Comma-joined metric list; must be non-empty after trimming
    #[serde(default = "default_account_metric")]
    pub metric: String,
    #[serde(default)]
    pub period: InsightsPeriod,
    #[serde(default)]
    pub metric_type: InsightsMetricType,
    #[serde(default)]
    pub timeframe: Option<String>,
    #[serde(default)]
    pub breakdown: Option<String>,
    #[serde(default)]
    pub since: Option<String>,
    #[serde(default)]
    pub until: Option<String>,
}

impl Default for AccountInsightsQuery {
    fn default() -> Self {
        Self {
            metric: default_account_metric(),
            period: InsightsPeriod::default(),
            metric_type: InsightsMetricType::default(),
            timeframe: None,
            breakdown: None,
            since: None,
            until: None,
        }
    }
}

/// A media object from the account's recent-media listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaItem {
    pub id: String,
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default)]
    pub media_type: Option<String>,
    #[serde(default)]
    pub media_url: Option<String>,
    #[serde(default)]
    pub permalink: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub like_count: Option<i64>,
    #[serde(default)]
    pub comments_count: Option<i64>,
}

/// Terminal outcome of the container readiness poll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerReadiness {
    /// `status_code == "FINISHED"`
    Ready,
    /// `status_code == "ERROR"` or a transport failure during polling
    Failed,
    /// Attempt budget exhausted without a terminal status
    TimedOut,
}

/// Reject non-HTTP(S) or unparseable URLs before any network call.
pub fn ensure_http_url(field: &str, value: &str) -> Result<()> {
    let parsed = url::Url::parse(value)
        .map_err(|e| InstagramError::InvalidParameter(format!("{field} is not a valid URL: {e}")))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(InstagramError::InvalidParameter(format!(
            "{field} must be an HTTP or HTTPS URL"
        )));
    }

    Ok(())
}
