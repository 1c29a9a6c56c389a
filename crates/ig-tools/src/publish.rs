//! Publishing tools: photo, story, carousel, reel, and the schedule stub

use std::sync::Arc;

use async_trait::async_trait;
use ig_core::{Tool, ToolResult};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::manager::InstagramManager;
use crate::parse_input;
use crate::types::{CarouselPost, PhotoPost, ReelPost, StoryPost};

/// Publish a photo to the Instagram feed
pub struct PostPhotoTool {
    manager: Arc<InstagramManager>,
}

impl PostPhotoTool {
    pub fn new(manager: Arc<InstagramManager>) -> Self {
        Self { manager }
    }
}

#[async_trait]
impl Tool for PostPhotoTool {
    fn name(&self) -> &str {
        "post_photo"
    }

    fn description(&self) -> &str {
        "Publish a photo to the Instagram feed."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "image_url": {
                    "type": "string",
                    "description": "Public URL of the image to publish"
                },
                "caption": {
                    "type": "string",
                    "description": "Caption text"
                },
                "user_tags": {
                    "type": "array",
                    "description": "Users to tag with x/y coordinates (0.0 to 1.0, default 0.5)",
                    "items": {
                        "type": "object",
                        "properties": {
                            "username": {"type": "string"},
                            "x": {"type": "number", "minimum": 0, "maximum": 1},
                            "y": {"type": "number", "minimum": 0, "maximum": 1}
                        },
                        "required": ["username"]
                    }
                },
                "location_id": {
                    "type": "string",
                    "description": "Facebook Page ID of the location"
                }
            },
            "required": ["image_url"]
        })
    }

    async fn execute(&self, input: Value) -> ig_core::Result<ToolResult> {
        let post: PhotoPost = parse_input(input)?;
        match self.manager.post_photo(post).await {
            Ok(result) => Ok(ToolResult::json(&result)),
            Err(e) => Ok(ToolResult::error(format!("Failed to publish photo: {}", e))),
        }
    }
}

/// Publish an image as a story
pub struct PostStoryTool {
    manager: Arc<InstagramManager>,
}

impl PostStoryTool {
    pub fn new(manager: Arc<InstagramManager>) -> Self {
        Self { manager }
    }
}

#[async_trait]
impl Tool for PostStoryTool {
    fn name(&self) -> &str {
        "post_story"
    }

    fn description(&self) -> &str {
        "Publish an image as an Instagram story."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "image_url": {
                    "type": "string",
                    "description": "Public URL of the story image"
                }
            },
            "required": ["image_url"]
        })
    }

    async fn execute(&self, input: Value) -> ig_core::Result<ToolResult> {
        let post: StoryPost = parse_input(input)?;
        match self.manager.post_story(post).await {
            Ok(result) => Ok(ToolResult::json(&result)),
            Err(e) => Ok(ToolResult::error(format!("Failed to publish story: {}", e))),
        }
    }
}

/// Publish a carousel of 2 to 10 images
pub struct PostCarouselTool {
    manager: Arc<InstagramManager>,
}

impl PostCarouselTool {
    pub fn new(manager: Arc<InstagramManager>) -> Self {
        Self { manager }
    }
}

#[async_trait]
impl Tool for PostCarouselTool {
    fn name(&self) -> &str {
        "post_carousel"
    }

    fn description(&self) -> &str {
        "Publish a carousel of 2 to 10 images to the Instagram feed."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "image_urls": {
                    "type": "array",
                    "description": "Public URLs of the carousel images, in display order",
                    "items": {"type": "string"},
                    "minItems": 2,
                    "maxItems": 10
                },
                "caption": {
                    "type": "string",
                    "description": "Caption text"
                },
                "location_id": {
                    "type": "string",
                    "description": "Facebook Page ID of the location"
                }
            },
            "required": ["image_urls"]
        })
    }

    async fn execute(&self, input: Value) -> ig_core::Result<ToolResult> {
        let post: CarouselPost = parse_input(input)?;
        match self.manager.post_carousel(post).await {
            Ok(result) => Ok(ToolResult::json(&result)),
            Err(e) => Ok(ToolResult::error(format!(
                "Failed to publish carousel: {}",
                e
            ))),
        }
    }
}

/// Publish a reel
pub struct PostReelTool {
    manager: Arc<InstagramManager>,
}

impl PostReelTool {
    pub fn new(manager: Arc<InstagramManager>) -> Self {
        Self { manager }
    }
}

#[async_trait]
impl Tool for PostReelTool {
    fn name(&self) -> &str {
        "post_reel"
    }

    fn description(&self) -> &str {
        "Publish a video as an Instagram reel. Waits for server-side processing before publishing."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "video_url": {
                    "type": "string",
                    "description": "Public URL of the video to publish"
                },
                "caption": {
                    "type": "string",
                    "description": "Caption text"
                },
                "cover_url": {
                    "type": "string",
                    "description": "Public URL of a cover image"
                },
                "location_id": {
                    "type": "string",
                    "description": "Facebook Page ID of the location"
                },
                "share_to_feed": {
                    "type": "boolean",
                    "description": "Also show the reel in the feed (default: true)"
                }
            },
            "required": ["video_url"]
        })
    }

    async fn execute(&self, input: Value) -> ig_core::Result<ToolResult> {
        let post: ReelPost = parse_input(input)?;
        match self.manager.post_reel(post).await {
            Ok(result) => Ok(ToolResult::json(&result)),
            Err(e) => Ok(ToolResult::error(format!("Failed to publish reel: {}", e))),
        }
    }
}

/// Schedule input: a photo payload plus the target time
#[derive(Debug, Deserialize)]
struct ScheduleInput {
    image_url: String,
    #[serde(default)]
    caption: Option<String>,
    scheduled_at_iso: String,
}

/// Hand a post off to the external scheduler worker
pub struct SchedulePostTool {
    manager: Arc<InstagramManager>,
}

impl SchedulePostTool {
    pub fn new(manager: Arc<InstagramManager>) -> Self {
        Self { manager }
    }
}

#[async_trait]
impl Tool for SchedulePostTool {
    fn name(&self) -> &str {
        "schedule_post"
    }

    fn description(&self) -> &str {
        "Record an Instagram post for the external scheduler worker. Does not publish anything itself."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "image_url": {
                    "type": "string",
                    "description": "Public URL of the image to publish"
                },
                "caption": {
                    "type": "string",
                    "description": "Caption text"
                },
                "scheduled_at_iso": {
                    "type": "string",
                    "description": "Target publish time as an ISO 8601 timestamp"
                }
            },
            "required": ["image_url", "scheduled_at_iso"]
        })
    }

    async fn execute(&self, input: Value) -> ig_core::Result<ToolResult> {
        let schedule: ScheduleInput = parse_input(input)?;
        let record = self.manager.schedule_post(
            &schedule.scheduled_at_iso,
            json!({
                "image_url": schedule.image_url,
                "caption": schedule.caption,
            }),
        );
        Ok(ToolResult::json(&record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schedule_input_parsing() {
        let input = json!({
            "image_url": "https://img.test/a.jpg",
            "scheduled_at_iso": "2026-09-01T10:00:00Z"
        });

        let parsed: ScheduleInput = serde_json::from_value(input).unwrap();
        assert_eq!(parsed.image_url, "https://img.test/a.jpg");
        assert!(parsed.caption.is_none());
    }

    #[test]
    fn test_photo_schema_requires_image_url() {
        let config = ig_core::GraphConfig::new("t", "1", None).unwrap();
        let manager = Arc::new(InstagramManager::new(
            ig_core::GraphClient::new(config).unwrap(),
        ));
        let tool = PostPhotoTool::new(manager);

        let schema = tool.input_schema();
        assert_eq!(schema["required"], json!(["image_url"]));
        assert_eq!(schema["properties"]["user_tags"]["items"]["properties"]["x"]["maximum"], 1);
    }
}
