//! Tool framework
//!
//! The trait, definition, and registry used to expose operations to an
//! agent runtime as schema-described tool calls.

pub mod definition;
pub mod manager;
pub mod traits;

pub use definition::ToolDefinition;
pub use manager::ToolManager;
pub use traits::{Tool, ToolResult};
