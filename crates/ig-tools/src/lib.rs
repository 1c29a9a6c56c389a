//! ig-tools: Instagram Graph API operations as agent tools
//!
//! A thin adapter exposing photo/story/carousel/reel publishing, comment
//! moderation, media listing, and insights as schema-validated tool calls.
//! Each operation maps onto one Graph API request or a short fixed sequence
//! of them; the only wait is a bounded readiness poll for video content.

use std::sync::Arc;

use ig_core::ToolManager;

pub mod comments;
pub mod error;
pub mod insights;
pub mod manager;
pub mod media;
pub mod publish;
pub mod types;

pub use error::{InstagramError, Result};
pub use manager::InstagramManager;
pub use types::{
    AccountInsightsQuery, CarouselPost, ContainerReadiness, InsightsMetricType, InsightsPeriod,
    MediaItem, PhotoPost, ReelPost, StoryPost, UserTag,
};

/// Deserialize tool input, mapping failures to a tool-execution error
pub(crate) fn parse_input<T: serde::de::DeserializeOwned>(
    input: serde_json::Value,
) -> ig_core::Result<T> {
    serde_json::from_value(input)
        .map_err(|e| ig_core::Error::ToolExecution(format!("Invalid input parameters: {}", e)))
}

/// Register every Instagram tool with the tool manager
pub fn register_instagram_tools(tools: &mut ToolManager, manager: Arc<InstagramManager>) {
    tools.register(Arc::new(publish::PostPhotoTool::new(manager.clone())));
    tools.register(Arc::new(publish::PostStoryTool::new(manager.clone())));
    tools.register(Arc::new(publish::PostCarouselTool::new(manager.clone())));
    tools.register(Arc::new(publish::PostReelTool::new(manager.clone())));
    tools.register(Arc::new(publish::SchedulePostTool::new(manager.clone())));
    tools.register(Arc::new(comments::GetCommentsTool::new(manager.clone())));
    tools.register(Arc::new(comments::ReplyCommentTool::new(manager.clone())));
    tools.register(Arc::new(comments::DeleteCommentTool::new(manager.clone())));
    tools.register(Arc::new(media::GetRecentMediaTool::new(manager.clone())));
    tools.register(Arc::new(media::ResolvePermalinkTool::new(manager.clone())));
    tools.register(Arc::new(media::UpdateCaptionTool::new(manager.clone())));
    tools.register(Arc::new(media::DeleteMediaTool::new(manager.clone())));
    tools.register(Arc::new(insights::GetMediaInsightsTool::new(
        manager.clone(),
    )));
    tools.register(Arc::new(insights::GetAccountInsightsTool::new(manager)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use ig_core::{GraphClient, GraphConfig};

    #[test]
    fn test_register_instagram_tools() {
        let config = GraphConfig::new("token", "17890000", None).unwrap();
        let manager = Arc::new(InstagramManager::new(GraphClient::new(config).unwrap()));

        let mut tools = ToolManager::new();
        register_instagram_tools(&mut tools, manager);

        for name in [
            "post_photo",
            "post_story",
            "post_carousel",
            "post_reel",
            "schedule_post",
            "get_comments",
            "reply_comment",
            "delete_comment",
            "get_recent_media",
            "resolve_permalink",
            "update_caption",
            "delete_media",
            "get_media_insights",
            "get_account_insights",
        ] {
            assert!(tools.contains(name), "missing tool: {name}");
        }
        assert_eq!(tools.definitions().len(), 14);
    }

    #[tokio::test]
    async fn test_post_photo_tool_end_to_end() {
        use serde_json::json;
        use wiremock::matchers::{body_string_contains, method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v22.0/17890000/media"))
            .and(body_string_contains("media_type=IMAGE"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "111"})))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/v22.0/17890000/media_publish"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "post-1"})))
            .expect(1)
            .mount(&server)
            .await;

        let config = GraphConfig::new("token", "17890000", None).unwrap();
        let graph = GraphClient::new(config).unwrap().with_base_url(server.uri());
        let manager = Arc::new(InstagramManager::new(graph));

        let mut tools = ToolManager::new();
        register_instagram_tools(&mut tools, manager);

        let result = tools
            .execute("post_photo", json!({"image_url": "https://img.test/a.jpg"}))
            .await
            .unwrap();

        assert!(!result.is_error);
        assert!(result.output.contains("\"status\": \"published\""));
    }

    #[tokio::test]
    async fn test_tool_rejects_malformed_input() {
        let config = GraphConfig::new("token", "17890000", None).unwrap();
        let manager = Arc::new(InstagramManager::new(GraphClient::new(config).unwrap()));

        let mut tools = ToolManager::new();
        register_instagram_tools(&mut tools, manager);

        let err = tools
            .execute("post_photo", serde_json::json!({"caption": "no url"}))
            .await
            .unwrap_err();

        assert!(matches!(err, ig_core::Error::ToolExecution(_)));
    }
}
