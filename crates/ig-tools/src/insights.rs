//! Insights tools

use std::sync::Arc;

use async_trait::async_trait;
use ig_core::{Tool, ToolResult};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::manager::InstagramManager;
use crate::parse_input;
use crate::types::AccountInsightsQuery;

#[derive(Debug, Deserialize)]
struct MediaInsightsInput {
    media_id: String,
}

/// Fetch insights for a single media object
pub struct GetMediaInsightsTool {
    manager: Arc<InstagramManager>,
}

impl GetMediaInsightsTool {
    pub fn new(manager: Arc<InstagramManager>) -> Self {
        Self { manager }
    }
}

#[async_trait]
impl Tool for GetMediaInsightsTool {
    fn name(&self) -> &str {
        "get_media_insights"
    }

    fn description(&self) -> &str {
        "Get insights for a specific Instagram media object."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "media_id": {
                    "type": "string",
                    "description": "Graph id of the media object"
                }
            },
            "required": ["media_id"]
        })
    }

    async fn execute(&self, input: Value) -> ig_core::Result<ToolResult> {
        let args: MediaInsightsInput = parse_input(input)?;
        match self.manager.get_media_insights(&args.media_id).await {
            Ok(result) => Ok(ToolResult::json(&result)),
            Err(e) => Ok(ToolResult::error(format!(
                "Failed to fetch media insights: {}",
                e
            ))),
        }
    }
}

/// Fetch account-level insights
pub struct GetAccountInsightsTool {
    manager: Arc<InstagramManager>,
}

impl GetAccountInsightsTool {
    pub fn new(manager: Arc<InstagramManager>) -> Self {
        Self { manager }
    }
}

#[async_trait]
impl Tool for GetAccountInsightsTool {
    fn name(&self) -> &str {
        "get_account_insights"
    }

    fn description(&self) -> &str {
        "Get account-level insights (demographics, followers, views)."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "metric": {
                    "type": "string",
                    "description": "Comma-joined metric list (default: views,follower_count,follows_and_unfollows)"
                },
                "period": {
                    "type": "string",
                    "description": "Aggregation period (default: day)",
                    "enum": ["day", "lifetime"]
                },
                "metric_type": {
                    "type": "string",
                    "description": "Value shape (default: total_value)",
                    "enum": ["total_value", "time_series"]
                },
                "timeframe": {
                    "type": "string",
                    "description": "Demographics timeframe, e.g. this_week"
                },
                "breakdown": {
                    "type": "string",
                    "description": "Result breakdown dimension, e.g. city"
                },
                "since": {
                    "type": "string",
                    "description": "Range start (unix timestamp or ISO date)"
                },
                "until": {
                    "type": "string",
                    "description": "Range end (unix timestamp or ISO date)"
                }
            },
            "required": []
        })
    }

    async fn execute(&self, input: Value) -> ig_core::Result<ToolResult> {
        let query: AccountInsightsQuery = parse_input(input)?;
        match self.manager.get_account_insights(query).await {
            Ok(result) => {
                // The error record is a contract, not a failure of the tool
                let is_error = result["status"] == "error";
                let output = serde_json::to_string_pretty(&result)
                    .unwrap_or_else(|_| result.to_string());
                Ok(if is_error {
                    ToolResult::error(output)
                } else {
                    ToolResult::success(output)
                })
            }
            Err(e) => Ok(ToolResult::error(format!(
                "Failed to fetch account insights: {}",
                e
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_insights_input_parsing() {
        let parsed: MediaInsightsInput = serde_json::from_value(json!({"media_id": "m1"})).unwrap();
        assert_eq!(parsed.media_id, "m1");
    }

    #[test]
    fn test_account_insights_rejects_bad_enum() {
        let result: Result<AccountInsightsQuery, _> =
            serde_json::from_value(json!({"period": "weekly"}));
        assert!(result.is_err());
    }
}
