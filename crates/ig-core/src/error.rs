//! Error types for ig-core

use thiserror::Error;

/// Main error type for ig-core
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Graph API error: status {status}, body: {body}")]
    Graph {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Tool execution error: {0}")]
    ToolExecution(String),
}

/// Result type alias for ig-core
pub type Result<T> = std::result::Result<T, Error>;
