//! Comment moderation tools

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
struct GetCommentsInput {
    media_id: String,
    /// 1 to 50, default 25
    #[serde(default = "default_limit")]
    limit: u32,
}

/// List comments on a media object
pub struct GetCommentsTool {
    manager: Arc<InstagramManager>,
}

impl GetCommentsTool {
    pub fn new(manager: Arc<InstagramManager>) -> Self {
        Self { manager }
    }
}

#[async_trait]
impl Tool for GetCommentsTool {
    fn name(&self) -> &str {
        "get_comments"
    }

    fn description(&self) -> &str {
        "List comments on an Instagram media object."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "media_id": {
                    "type": "string",
                    "description": "Graph id of the media object"
                },
                "limit": {
                    "type": "integer",
                    "description": "Maximum number of comments to return (default: 25)",
                    "minimum": 1,
                    "maximum": 50
                }
            },
            "required": ["media_id"]
        })
    }

    async fn execute(&self, input: Value) -> ig_core::Result<ToolResult> {
        let args: GetCommentsInput = parse_input(input)?;
        match self.manager.get_comments(&args.media_id, args.limit).await {
            Ok(result) => Ok(ToolResult::json(&result)),
            Err(e) => Ok(ToolResult::error(format!("Failed to list comments: {}", e))),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ReplyCommentInput {
    comment_id: String,
    message: String,
}

/// Reply to a comment
pub struct ReplyCommentTool {
    manager: Arc<InstagramManager>,
}

impl ReplyCommentTool {
    pub fn new(manager: Arc<InstagramManager>) -> Self {
        Self { manager }
    }
}

#[async_trait]
impl Tool for ReplyCommentTool {
    fn name(&self) -> &str {
        "reply_comment"
    }

    fn description(&self) -> &str {
        "Reply to a comment on an Instagram media object."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "comment_id": {
                    "type": "string",
                    "description": "Graph id of the comment to reply to"
                },
                "message": {
                    "type": "string",
                    "description": "Reply text"
                }
            },
            "required": ["comment_id", "message"]
        })
    }

    async fn execute(&self, input: Value) -> ig_core::Result<ToolResult> {
        let args: ReplyCommentInput = parse_input(input)?;
        match self
            .manager
            .reply_comment(&args.comment_id, &args.message)
            .await
        {
            Ok(result) => Ok(ToolResult::json(&result)),
            Err(e) => Ok(ToolResult::error(format!("Failed to reply: {}", e))),
        }
    }
}

#[derive(Debug, Deserialize)]
struct DeleteCommentInput {
    comment_id: String,
}

/// Delete a comment
pub struct DeleteCommentTool {
    manager: Arc<InstagramManager>,
}

impl DeleteCommentTool {
    pub fn new(manager: Arc<InstagramManager>) -> Self {
        Self { manager }
    }
}

#[async_trait]
impl Tool for DeleteCommentTool {
    fn name(&self) -> &str {
        "delete_comment"
    }

    fn description(&self) -> &str {
        "Delete a comment from an Instagram media object."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "comment_id": {
                    "type": "string",
                    "description": "Graph id of the comment to delete"
                }
            },
            "required": ["comment_id"]
        })
    }

    async fn execute(&self, input: Value) -> ig_core::Result<ToolResult> {
        let args: DeleteCommentInput = parse_input(input)?;
        match self.manager.delete_comment(&args.comment_id).await {
            Ok(result) => Ok(ToolResult::json(&result)),
            Err(e) => Ok(ToolResult::error(format!(
                "Failed to delete comment: {}",
                e
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_comments_input_defaults() {
        let parsed: GetCommentsInput = serde_json::from_value(json!({"media_id": "m1"})).unwrap();
        assert_eq!(parsed.media_id, "m1");
        assert_eq!(parsed.limit, 25);

        let parsed: GetCommentsInput =
            serde_json::from_value(json!({"media_id": "m1", "limit": 10})).unwrap();
        assert_eq!(parsed.limit, 10);
    }

    #[test]
    fn test_reply_input_requires_message() {
        let result: Result<ReplyCommentInput, _> =
            serde_json::from_value(json!({"comment_id": "c1"}));
        assert!(result.is_err());
    }
}
