//! LLM client layer: the chat message model, tool descriptors and the
//! provider traits every backend implements.

use serde::{Deserialize, Serialize};

pub mod backends;
pub mod builder;
pub mod chat;
pub(crate) mod common;
pub mod error;
pub mod tool;

pub use tool::{ToolCallError, ToolInputT, ToolRuntime, ToolT};

/// A provider that can drive a tool-calling chat conversation.
pub trait LLMProvider: chat::ChatProvider + Send + Sync + 'static {}

/// A tool invocation requested by the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCall {
    /// The ID of the tool call.
    pub id: String,
    /// The type of the tool call (usually "function").
    #[serde(rename = "type")]
    pub call_type: String,
    /// The function to call.
    pub function: FunctionCall,
}

/// Name and raw JSON arguments of a called function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionCall {
    /// The name of the function to call.
    pub name: String,
    /// The arguments to pass to the function, as a JSON string.
    pub arguments: String,
}
