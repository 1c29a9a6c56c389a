//! Tool trait definition
//!
//! Defines the core trait for implementing tools that can be executed by
//! an agent runtime via tool_use.

use async_trait::async_trait;
use serde_json::Value as JsonValue;

use crate::Result;

/// Tool execution result
#[derive(Debug, Clone)]
pub struct ToolResult {
    /// Output string from tool execution
    pub output: String,
    /// Whether the execution resulted in an error
    pub is_error: bool,
}

impl ToolResult {
    /// Create a successful tool result
    pub fn success(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            is_error: false,
        }
    }

    /// Create an error tool result
    pub fn error(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            is_error: true,
        }
    }

    /// Create a successful result from a JSON payload
    pub fn json(value: &JsonValue) -> Self {
        match serde_json::to_string_pretty(value) {
            Ok(output) => Self::success(output),
            Err(e) => Self::error(format!("Failed to serialize result: {}", e)),
        }
    }
}

/// Tool trait for agent tool_use
///
/// Implement this trait to create tools that can be executed when the
/// agent requests them.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Get the tool name (used in tool definitions)
    fn name(&self) -> &str;

    /// Get the tool description (shown to the agent when selecting tools)
    fn description(&self) -> &str;

    /// Get the JSON schema for the tool's input parameters
    fn input_schema(&self) -> JsonValue;

    /// Execute the tool with the given input
    async fn execute(&self, input: JsonValue) -> Result<ToolResult>;
}
