//! Media listing and management tools

use std::sync::Arc;

use async_trait::async_trait;
use ig_core::{Tool, ToolResult};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::manager::InstagramManager;
use crate::parse_input;

fn default_limit() -> u32 {
    25
}

#[derive(Debug, Deserialize)]
struct GetRecentMediaInput {
    /// 1 to 50, default 25
    #[serde(default = "default_limit")]
    limit: u32,
}

/// List the account's recent media objects
pub struct GetRecentMediaTool {
    manager: Arc<InstagramManager>,
}

impl GetRecentMediaTool {
    pub fn new(manager: Arc<InstagramManager>) -> Self {
        Self { manager }
    }
}

#[async_trait]
impl Tool for GetRecentMediaTool {
    fn name(&self) -> &str {
        "get_recent_media"
    }

    fn description(&self) -> &str {
        "Get recent media objects from the Instagram account."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "limit": {
                    "type": "integer",
                    "description": "Maximum number of media objects to return (default: 25)",
                    "minimum": 1,
                    "maximum": 50
                }
            },
            "required": []
        })
    }

    async fn execute(&self, input: Value) -> ig_core::Result<ToolResult> {
        let args: GetRecentMediaInput = parse_input(input)?;
        match self.manager.get_recent_media(args.limit).await {
            Ok(items) => Ok(ToolResult::json(&json!(items))),
            Err(e) => Ok(ToolResult::error(format!("Failed to list media: {}", e))),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ResolvePermalinkInput {
    permalink_url: String,
}

/// Resolve a public post URL into a Graph media id
pub struct ResolvePermalinkTool {
    manager: Arc<InstagramManager>,
}

impl ResolvePermalinkTool {
    pub fn new(manager: Arc<InstagramManager>) -> Self {
        Self { manager }
    }
}

#[async_trait]
impl Tool for ResolvePermalinkTool {
    fn name(&self) -> &str {
        "resolve_permalink"
    }

    fn description(&self) -> &str {
        "Resolve an Instagram permalink URL into a Graph media id. Returns a null media_id when no match is found."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "permalink_url": {
                    "type": "string",
                    "description": "Public URL of the published post"
                }
            },
            "required": ["permalink_url"]
        })
    }

    async fn execute(&self, input: Value) -> ig_core::Result<ToolResult> {
        let args: ResolvePermalinkInput = parse_input(input)?;
        match self.manager.resolve_permalink(&args.permalink_url).await {
            Ok(result) => Ok(ToolResult::json(&result)),
            Err(e) => Ok(ToolResult::error(format!(
                "Failed to resolve permalink: {}",
                e
            ))),
        }
    }
}

#[derive(Debug, Deserialize)]
struct UpdateCaptionInput {
    media_id: String,
    caption: String,
}

/// Update the caption of an existing media object
pub struct UpdateCaptionTool {
    manager: Arc<InstagramManager>,
}

impl UpdateCaptionTool {
    pub fn new(manager: Arc<InstagramManager>) -> Self {
        Self { manager }
    }
}

#[async_trait]
impl Tool for UpdateCaptionTool {
    fn name(&self) -> &str {
        "update_caption"
    }

    fn description(&self) -> &str {
        "Update the caption of an existing Instagram media object."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "media_id": {
                    "type": "string",
                    "description": "Graph id of the media object"
                },
                "caption": {
                    "type": "string",
                    "description": "New caption text"
                }
            },
            "required": ["media_id", "caption"]
        })
    }

    async fn execute(&self, input: Value) -> ig_core::Result<ToolResult> {
        let args: UpdateCaptionInput = parse_input(input)?;
        match self
            .manager
            .update_caption(&args.media_id, &args.caption)
            .await
        {
            Ok(result) => Ok(ToolResult::json(&result)),
            Err(e) => Ok(ToolResult::error(format!(
                "Failed to update caption: {}",
                e
            ))),
        }
    }
}

#[derive(Debug, Deserialize)]
struct DeleteMediaInput {
    media_id: String,
}

/// Delete a media object
pub struct DeleteMediaTool {
    manager: Arc<InstagramManager>,
}

impl DeleteMediaTool {
    pub fn new(manager: Arc<InstagramManager>) -> Self {
        Self { manager }
    }
}

#[async_trait]
impl Tool for DeleteMediaTool {
    fn name(&self) -> &str {
        "delete_media"
    }

    fn description(&self) -> &str {
        "Delete an Instagram media object by id."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "media_id": {
                    "type": "string",
                    "description": "Graph id of the media object to delete"
                }
            },
            "required": ["media_id"]
        })
    }

    async fn execute(&self, input: Value) -> ig_core::Result<ToolResult> {
        let args: DeleteMediaInput = parse_input(input)?;
        match self.manager.delete_media(&args.media_id).await {
            Ok(result) => Ok(ToolResult::json(&result)),
            Err(e) => Ok(ToolResult::error(format!("Failed to delete media: {}", e))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recent_media_input_defaults() {
        let parsed: GetRecentMediaInput = serde_json::from_value(json!({})).unwrap();
        assert_eq!(parsed.limit, 25);
    }

    #[test]
    fn test_update_caption_input_requires_both_fields() {
        let result: Result<UpdateCaptionInput, _> =
            serde_json::from_value(json!({"media_id": "m1"}));
        assert!(result.is_err());
    }
}
