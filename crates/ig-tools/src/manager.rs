//! Instagram operations over the Graph API
//!
//! Publishing follows the platform's container flow: create a media
//! container, wait for asynchronous processing where the content type
//! requires it, then publish the container id. Every operation is an
//! independently awaited unit of work; nothing is shared across calls
//! beyond the read-only client configuration.

use std::time::Duration;

use serde_json::{json, Value};
use tracing::{debug, info, warn};

use ig_core::{GraphClient, GraphConfig, GraphRequest};

use crate::error::{InstagramError, Result};
use crate::types::{
    ensure_http_url, serialize_user_tags, AccountInsightsQuery, CarouselPost, ContainerReadiness,
    MediaItem, PhotoPost, ReelPost, StoryPost,
};

/// Maximum status checks for an asynchronous container
const MAX_STATUS_CHECKS: u32 = 15;

/// Delay between status checks
const STATUS_CHECK_INTERVAL: Duration = Duration::from_secs(2);

/// Field projection for comment listings
const COMMENT_FIELDS: &str = "id,timestamp,text,username,like_count,replies,user";

/// Field projection for the recent-media listing
const MEDIA_FIELDS: &str =
    "id,caption,media_type,media_url,permalink,timestamp,like_count,comments_count";

/// Field projection for the permalink fallback scan
const PERMALINK_LOOKUP_FIELDS: &str = "id,permalink,caption,timestamp,media_type";

/// Metrics valid for a single media object
const MEDIA_INSIGHT_METRICS: &str = "impressions,reach,engagement,saved";

/// Instagram operations manager
///
/// Thin orchestration over the Graph transport; holds no state beyond the
/// client handle.
#[derive(Clone)]
pub struct InstagramManager {
    graph: GraphClient,
    poll_interval: Duration,
}

impl InstagramManager {
    /// Create a manager over an existing Graph client
    pub fn new(graph: GraphClient) -> Self {
        Self {
            graph,
            poll_interval: STATUS_CHECK_INTERVAL,
        }
    }

    /// Create a manager from the process configuration
    pub fn from_config() -> Result<Self> {
        let config = GraphConfig::load()?;
        Ok(Self::new(GraphClient::new(config)?))
    }

    /// Override the readiness-poll interval (tests use a short one)
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    fn account_id(&self) -> &str {
        self.graph.account_id()
    }

    fn media_endpoint(&self) -> String {
        format!("{}/media", self.account_id())
    }

    /// Issue a container-creation call and extract the container id
    async fn create_container(&self, request: GraphRequest) -> Result<String> {
        let response = self.graph.request(request).await?;
        match response["id"].as_str() {
            Some(id) => Ok(id.to_string()),
            None => Err(InstagramError::ContainerCreation(format!(
                "container response carried no id: {response}"
            ))),
        }
    }

    /// Finalize a container, making its content live
    pub async fn publish_media(&self, creation_id: &str) -> Result<Value> {
        let response = self
            .graph
            .request(
                GraphRequest::post(format!("{}/media_publish", self.account_id()))
                    .param("creation_id", creation_id),
            )
            .await?;

        info!(creation_id, "published media container");
        Ok(response)
    }

    fn published(creation_id: &str, response: Value) -> Value {
        json!({
            "channel": "instagram",
            "status": "published",
            "creation_id": creation_id,
            "result": response,
        })
    }

    /// Publish a single photo to the feed
    ///
    /// One container creation, then an immediate publish; photos need no
    /// readiness wait.
    pub async fn post_photo(&self, post: PhotoPost) -> Result<Value> {
        ensure_http_url("image_url", &post.image_url)?;

        let mut request = GraphRequest::post(self.media_endpoint())
            .param("image_url", post.image_url)
            .param("media_type", "IMAGE")
            .opt_param("caption", post.caption)
            .opt_param("location_id", post.location_id)
            // Feed photos name the token explicitly; container creation can
            // require a different token than the ambient client default.
            .access_token(self.graph.config().access_token.clone());

        if let Some(tags) = serialize_user_tags(post.user_tags.as_deref())? {
            request = request.param("user_tags", tags);
        }

        let creation_id = self.create_container(request).await?;
        let response = self.publish_media(&creation_id).await?;
        Ok(Self::published(&creation_id, response))
    }

    /// Publish a story image
    pub async fn post_story(&self, post: StoryPost) -> Result<Value> {
        ensure_http_url("image_url", &post.image_url)?;

        let request = GraphRequest::post(self.media_endpoint())
            .param("image_url", post.image_url)
            .param("media_type", "STORIES");

        let creation_id = self.create_container(request).await?;
        let response = self.publish_media(&creation_id).await?;
        Ok(Self::published(&creation_id, response))
    }

    /// Publish a carousel of 2 to 10 images
    ///
    /// Items whose creation response carries no id are skipped; the whole
    /// operation fails only when fewer than 2 item containers remain.
    pub async fn post_carousel(&self, post: CarouselPost) -> Result<Value> {
        let count = post.image_urls.len();
        if !(2..=10).contains(&count) {
            return Err(InstagramError::InvalidParameter(format!(
                "carousel requires 2 to 10 image urls, got {count}"
            )));
        }
        for url in &post.image_urls {
            ensure_http_url("image_urls", url)?;
        }

        let mut children = Vec::with_capacity(count);
        for url in &post.image_urls {
            let response = self
                .graph
                .request(
                    GraphRequest::post(self.media_endpoint())
                        .param("image_url", url.clone())
                        .param("is_carousel_item", "true"),
                )
                .await?;

            match response["id"].as_str() {
                Some(id) => children.push(id.to_string()),
                None => warn!(url = %url, "carousel item container carried no id, skipping"),
            }
        }

        if children.len() < 2 {
            return Err(InstagramError::InsufficientCarouselItems {
                collected: children.len(),
            });
        }

        let outer = GraphRequest::post(self.media_endpoint())
            .param("media_type", "CAROUSEL")
            // The platform expects a comma-joined id list, not a JSON array.
            .param("children", children.join(","))
            .opt_param("caption", post.caption)
            .opt_param("location_id", post.location_id);

        let creation_id = self.create_container(outer).await?;
        let response = self.publish_media(&creation_id).await?;
        Ok(Self::published(&creation_id, response))
    }

    /// Publish a reel
    ///
    /// Video containers process asynchronously, so a bounded readiness poll
    /// runs between creation and publish. Publish is attempted regardless
    /// of the poll outcome; the original adapter behaved this way and
    /// callers watch the logs for reels that never went live.
    pub async fn post_reel(&self, post: ReelPost) -> Result<Value> {
        ensure_http_url("video_url", &post.video_url)?;
        if let Some(cover_url) = &post.cover_url {
            ensure_http_url("cover_url", cover_url)?;
        }

        let request = GraphRequest::post(self.media_endpoint())
            .param("media_type", "REELS")
            .param("video_url", post.video_url)
            .opt_param("caption", post.caption)
            .opt_param("cover_url", post.cover_url)
            .opt_param("location_id", post.location_id)
            .param("share_to_feed", post.share_to_feed.to_string());

        let creation_id = self.create_container(request).await?;

        match self.wait_for_media_ready(&creation_id).await {
            ContainerReadiness::Ready => {
                debug!(container = %creation_id, "container finished processing")
            }
            ContainerReadiness::Failed => {
                warn!(container = %creation_id, "container processing failed, attempting publish anyway")
            }
            ContainerReadiness::TimedOut => {
                warn!(
                    container = %creation_id,
                    "container not ready after {} checks, attempting publish anyway",
                    MAX_STATUS_CHECKS
                )
            }
        }

        let response = self.publish_media(&creation_id).await?;
        Ok(Self::published(&creation_id, response))
    }

    /// Poll a container's processing status until terminal or out of budget
    ///
    /// At most `MAX_STATUS_CHECKS` checks with a fixed sleep between them.
    /// The poll only reports; the caller decides what a non-Ready outcome
    /// means.
    async fn wait_for_media_ready(&self, container_id: &str) -> ContainerReadiness {
        for attempt in 1..=MAX_STATUS_CHECKS {
            let response = self
                .graph
                .request(GraphRequest::get(container_id).param("fields", "status_code"))
                .await;

            let status = match response {
                Ok(value) => value["status_code"].as_str().unwrap_or_default().to_string(),
                Err(e) => {
                    // A transport failure ends the wait; there is no retry
                    // inside the poll.
                    warn!(container = %container_id, "status check failed: {}", e);
                    return ContainerReadiness::Failed;
                }
            };

            debug!(container = %container_id, attempt, status = %status, "container status");

            match status.as_str() {
                "FINISHED" => return ContainerReadiness::Ready,
                "ERROR" => {
                    let err = InstagramError::MediaProcessing(format!(
                        "container {container_id} reported ERROR during processing"
                    ));
                    warn!("{}", err);
                    return ContainerReadiness::Failed;
                }
                _ => {}
            }

            if attempt < MAX_STATUS_CHECKS {
                tokio::time::sleep(self.poll_interval).await;
            }
        }

        ContainerReadiness::TimedOut
    }

    /// Record a scheduling request without executing it
    ///
    /// Scheduling lives in an external worker; this only shapes the intent
    /// record the worker consumes.
    pub fn schedule_post(&self, scheduled_at_iso: &str, payload: Value) -> Value {
        json!({
            "channel": "instagram",
            "status": "scheduled",
            "note": "Use the dashboard scheduler worker for Instagram scheduling.",
            "scheduled_at_iso": scheduled_at_iso,
            "payload": payload,
        })
    }

    /// List comments on a media object
    pub async fn get_comments(&self, media_id: &str, limit: u32) -> Result<Value> {
        let limit = limit.clamp(1, 50);
        let response = self
            .graph
            .request(
                GraphRequest::get(format!("{media_id}/comments"))
                    .param("fields", COMMENT_FIELDS)
                    .param("limit", limit.to_string()),
            )
            .await?;
        Ok(response)
    }

    /// Reply to a comment
    pub async fn reply_comment(&self, comment_id: &str, message: &str) -> Result<Value> {
        if message.trim().is_empty() {
            return Err(InstagramError::InvalidParameter(
                "message must not be empty".to_string(),
            ));
        }

        let response = self
            .graph
            .request(GraphRequest::post(format!("{comment_id}/replies")).param("message", message))
            .await?;
        Ok(response)
    }

    /// Delete a comment
    pub async fn delete_comment(&self, comment_id: &str) -> Result<Value> {
        let response = self
            .graph
            .request(GraphRequest::delete(comment_id))
            .await?;
        Ok(response)
    }

    /// List the account's recent media objects
    pub async fn get_recent_media(&self, limit: u32) -> Result<Vec<MediaItem>> {
        let limit = limit.clamp(1, 50);
        let response = self
            .graph
            .request(
                GraphRequest::get(self.media_endpoint())
                    .param("fields", MEDIA_FIELDS)
                    .param("limit", limit.to_string()),
            )
            .await?;

        let items: Vec<MediaItem> = serde_json::from_value(response["data"].clone())
            .map_err(ig_core::Error::Json)?;
        Ok(items)
    }

    /// Fetch insights for a single media object
    ///
    /// Uses a fixed metric set valid across media types.
    pub async fn get_media_insights(&self, media_id: &str) -> Result<Value> {
        let response = self
            .graph
            .request(
                GraphRequest::get(format!("{media_id}/insights"))
                    .param("metric", MEDIA_INSIGHT_METRICS),
            )
            .await?;
        Ok(response)
    }

    /// Fetch account-level insights
    ///
    /// The sole swallow-and-report boundary: transport failures become a
    /// structured error record instead of propagating. Parameter validation
    /// still fails before any network call.
    pub async fn get_account_insights(&self, query: AccountInsightsQuery) -> Result<Value> {
        if query.metric.trim().is_empty() {
            return Err(InstagramError::InvalidParameter(
                "metric parameter must be a non-empty string".to_string(),
            ));
        }

        let request = GraphRequest::get(format!("{}/insights", self.account_id()))
            .param("metric", query.metric)
            .param("period", query.period.as_str())
            .param("metric_type", query.metric_type.as_str())
            .opt_param("timeframe", query.timeframe)
            .opt_param("breakdown", query.breakdown)
            .opt_param("since", query.since)
            .opt_param("until", query.until);

        match self.graph.request(request).await {
            Ok(result) => Ok(json!({
                "channel": "instagram",
                "status": "ok",
                "result": result,
            })),
            Err(e) => Ok(json!({
                "channel": "instagram",
                "status": "error",
                "error": e.to_string(),
            })),
        }
    }

    /// Resolve a public post URL into a Graph media id
    ///
    /// Two-strategy best effort: an oEmbed lookup first, then a linear scan
    /// of the account's recent media with trailing slashes ignored. No
    /// match is a valid outcome with a null media id, not an error.
    pub async fn resolve_permalink(&self, permalink_url: &str) -> Result<Value> {
        ensure_http_url("permalink_url", permalink_url)?;

        let oembed = self
            .graph
            .request(
                GraphRequest::get("instagram_oembed")
                    .param("url", permalink_url)
                    .param("omitscript", "true"),
            )
            .await;

        let (media_id, result) = match oembed {
            Ok(result) => (result["media_id"].clone(), result),
            Err(e) => {
                debug!("oEmbed lookup failed ({}), scanning recent media", e);

                let result = self
                    .graph
                    .request(
                        GraphRequest::get(self.media_endpoint())
                            .param("fields", PERMALINK_LOOKUP_FIELDS)
                            .param("limit", "25"),
                    )
                    .await?;

                let target = permalink_url.strip_suffix('/').unwrap_or(permalink_url);
                let media_id = result["data"]
                    .as_array()
                    .into_iter()
                    .flatten()
                    .find(|item| {
                        item["permalink"]
                            .as_str()
                            .map(|p| p.strip_suffix('/').unwrap_or(p) == target)
                            .unwrap_or(false)
                    })
                    .map(|item| item["id"].clone())
                    .unwrap_or(Value::Null);

                (media_id, result)
            }
        };

        Ok(json!({
            "channel": "instagram",
            "status": "resolved",
            "permalink_url": permalink_url,
            "media_id": media_id,
            "result": result,
        }))
    }

    /// Update the caption of an existing media object
    pub async fn update_caption(&self, media_id: &str, caption: &str) -> Result<Value> {
        if caption.trim().is_empty() {
            return Err(InstagramError::InvalidParameter(
                "caption must not be empty".to_string(),
            ));
        }

        let response = self
            .graph
            .request(GraphRequest::post(media_id).param("caption", caption))
            .await?;

        Ok(json!({
            "channel": "instagram",
            "status": "updated",
            "media_id": media_id,
            "result": response,
        }))
    }

    /// Delete a media object
    pub async fn delete_media(&self, media_id: &str) -> Result<Value> {
        let response = self.graph.request(GraphRequest::delete(media_id)).await?;

        Ok(json!({
            "channel": "instagram",
            "status": "deleted",
            "media_id": media_id,
            "result": response,
        }))
    }
}
