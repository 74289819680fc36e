//! Tools exposed to the language model
//!
//! Definitions follow the function-calling schema the conversational
//! pipeline forwards to the model; calls come back as a tool name plus a
//! JSON argument string.

mod order;

use serde::{Deserialize, Serialize};

pub use order::{ORDER_SUBMITTED, OrderTools, SUBMIT_ORDER};

/// A tool the model may call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Always `"function"`
    #[serde(rename = "type")]
    pub tool_type: String,
    pub function: FunctionDefinition,
}

/// Function signature of a tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDefinition {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// JSON schema of the arguments object
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<serde_json::Value>,
}
