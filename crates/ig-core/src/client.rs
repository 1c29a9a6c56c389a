//! Instagram Graph API transport
//!
//! Performs authenticated HTTP requests against the Graph endpoint and
//! returns parsed JSON. Error handling stays here; retry policy does not
//! exist at this layer.

use reqwest::Client;
use serde_json::Value;
use tracing::{debug, error};

use crate::config::GraphConfig;
use crate::error::{Error, Result};

/// Graph API base URL
const GRAPH_API_BASE_URL: &str = "https://graph.facebook.com";

/// HTTP methods accepted by the Graph endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphMethod {
    Get,
    Post,
    Delete,
}

/// A single Graph API request
///
/// `access_token` overrides the client's configured token for this call
/// only; some container-creation calls require a different token than the
/// ambient default.
#[derive(Debug, Clone)]
pub struct GraphRequest {
    pub method: GraphMethod,
    pub endpoint: String,
    pub params: Vec<(String, String)>,
    pub access_token: Option<String>,
}

impl GraphRequest {
    fn new(method: GraphMethod, endpoint: impl Into<String>) -> Self {
        Self {
            method,
            endpoint: endpoint.into(),
            params: Vec::new(),
            access_token: None,
        }
    }

    /// Build a GET request
    pub fn get(endpoint: impl Into<String>) -> Self {
        Self::new(GraphMethod::Get, endpoint)
    }

    /// Build a POST request
    pub fn post(endpoint: impl Into<String>) -> Self {
        Self::new(GraphMethod::Post, endpoint)
    }

    /// Build a DELETE request
    pub fn delete(endpoint: impl Into<String>) -> Self {
        Self::new(GraphMethod::Delete, endpoint)
    }

    /// Append a single parameter
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// Append an optional parameter; `None` adds nothing
    pub fn opt_param(self, key: impl Into<String>, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(v) => self.param(key, v),
            None => self,
        }
    }

    /// Use a per-call access token instead of the configured default
    pub fn access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }
}

/// Instagram Graph API client
#[derive(Clone)]
pub struct GraphClient {
    client: Client,
    config: GraphConfig,
    base_url: String,
}

impl GraphClient {
    /// Create a new Graph API client
    pub fn new(config: GraphConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(Error::Http)?;

        Ok(Self {
            client,
            config,
            base_url: GRAPH_API_BASE_URL.to_string(),
        })
    }

    /// Override the base URL (used by tests against a mock server)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Get the configuration
    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    /// Get the configured account id
    pub fn account_id(&self) -> &str {
        &self.config.account_id
    }

    /// Execute a request and return the response JSON
    ///
    /// Non-2xx responses become `Error::Graph` carrying status and body.
    pub async fn request(&self, request: GraphRequest) -> Result<Value> {
        let url = format!(
            "{}/{}/{}",
            self.base_url, self.config.api_version, request.endpoint
        );

        let token = request
            .access_token
            .as_deref()
            .unwrap_or(&self.config.access_token);

        debug!(method = ?request.method, endpoint = %request.endpoint, "Graph API request");

        let builder = match request.method {
            GraphMethod::Get => self.client.get(&url).query(&request.params),
            GraphMethod::Post => self.client.post(&url).form(&request.params),
            GraphMethod::Delete => self.client.delete(&url).query(&request.params),
        };

        let response = builder
            .query(&[("access_token", token)])
            .send()
            .await
            .map_err(Error::Http)?;

        let status = response.status();
        let body = response.text().await.map_err(Error::Http)?;

        if !status.is_success() {
            error!("Graph API error: {} - {}", status, body);
            return Err(Error::Graph { status, body });
        }

        let value: Value = serde_json::from_str(&body)?;
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(base_url: &str) -> GraphClient {
        let config = GraphConfig::new("default-token", "17890000", None).unwrap();
        GraphClient::new(config)
            .unwrap()
            .with_base_url(base_url.to_string())
    }

    #[test]
    fn test_request_builders() {
        let req = GraphRequest::post("17890000/media")
            .param("media_type", "IMAGE")
            .opt_param("caption", Some("hello"))
            .opt_param("location_id", None::<String>)
            .access_token("other");

        assert_eq!(req.method, GraphMethod::Post);
        assert_eq!(
            req.params,
            vec![
                ("media_type".to_string(), "IMAGE".to_string()),
                ("caption".to_string(), "hello".to_string()),
            ]
        );
        assert_eq!(req.access_token.as_deref(), Some("other"));
    }

    #[tokio::test]
    async fn test_get_returns_json() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v22.0/17890000/media"))
            .and(query_param("limit", "5"))
            .and(query_param("access_token", "default-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let value = client
            .request(GraphRequest::get("17890000/media").param("limit", "5"))
            .await
            .unwrap();

        assert!(value["data"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_per_call_token_override() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v22.0/17890000/media"))
            .and(query_param("access_token", "override-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "111"})))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let value = client
            .request(GraphRequest::post("17890000/media").access_token("override-token"))
            .await
            .unwrap();

        assert_eq!(value["id"], "111");
    }

    #[tokio::test]
    async fn test_non_2xx_is_graph_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v22.0/bad"))
            .respond_with(
                ResponseTemplate::new(400).set_body_json(json!({"error": {"message": "nope"}})),
            )
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client.request(GraphRequest::get("bad")).await.unwrap_err();

        match err {
            Error::Graph { status, body } => {
                assert_eq!(status.as_u16(), 400);
                assert!(body.contains("nope"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
