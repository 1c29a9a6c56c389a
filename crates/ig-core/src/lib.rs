//! ig-core: shared plumbing for the Instagram Graph tool crates
//!
//! Provides the authenticated Graph API transport, configuration loading,
//! the common error type, and the tool framework (trait, registry, schema
//! definitions) consumed by agent runtimes.

pub mod client;
pub mod config;
pub mod error;
pub mod tool;

pub use client::{GraphClient, GraphMethod, GraphRequest};
pub use config::GraphConfig;
pub use error::{Error, Result};
pub use tool::{Tool, ToolDefinition, ToolManager, ToolResult};
