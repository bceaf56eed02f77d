use std::sync::Arc;

use island_llm::chat::{ChatMessage, Tool};
use island_llm::{FunctionCall, ToolCall, ToolT};
use log::{debug, warn};
use serde_json::Value;

use crate::agent::AgentBuildError;

/// Ordered set of tools an agent may call. Order is the registration order and
/// is the order descriptors are offered to the model.
#[derive(Debug, Clone, Default)]
pub struct ToolRegistry {
    tools: Vec<Arc<dyn ToolT>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a tool. Names must be unique across the registry.
    pub fn register(&mut self, tool: Arc<dyn ToolT>) -> Result<(), AgentBuildError> {
        if self.get(tool.name()).is_some() {
            return Err(AgentBuildError::DuplicateTool(tool.name().to_string()));
        }
        self.tools.push(tool);
        Ok(())
    }

    pub fn extend<I>(&mut self, tools: I) -> Result<(), AgentBuildError>
    where
        I: IntoIterator<Item = Arc<dyn ToolT>>,
    {
        tools.into_iter().try_for_each(|tool| self.register(tool))
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn ToolT>> {
        self.tools.iter().find(|t| t.name() == name).cloned()
    }

    pub fn names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Function-tool descriptors in registration order.
    pub fn descriptors(&self) -> Vec<Tool> {
        self.tools.iter().map(|t| Tool::from(t.as_ref())).collect()
    }

    /// Run one tool call and wrap the outcome as a tool message answering it.
    ///
    /// Failures never abort the run: an unknown tool, unparsable arguments or a
    /// tool error all come back to the model as `Error: ...` text.
    pub fn invoke(&self, call: &ToolCall) -> ChatMessage {
        let name = &call.function.name;
        debug!("invoking tool {name} with {}", call.function.arguments);

        let outcome = match self.get(name) {
            None => Err(format!("tool '{name}' not found")),
            Some(tool) => parse_arguments(&call.function.arguments)
                .and_then(|args| tool.run(args).map_err(|e| e.to_string())),
        };

        let text = match outcome {
            Ok(value) => render(value),
            Err(e) => {
                warn!("tool {name} failed: {e}");
                format!("Error: {e}")
            }
        };

        tool_result(call, text)
    }
}

/// Tool message answering `call` with `text`.
pub fn tool_result(call: &ToolCall, text: String) -> ChatMessage {
    ChatMessage::tool()
        .content(text.clone())
        .tool_result(vec![ToolCall {
            id: call.id.clone(),
            call_type: call.call_type.clone(),
            function: FunctionCall {
                name: call.function.name.clone(),
                arguments: text,
            },
        }])
        .build()
}

fn parse_arguments(raw: &str) -> Result<Value, String> {
    if raw.trim().is_empty() {
        return Ok(Value::Object(Default::default()));
    }
    serde_json::from_str(raw).map_err(|e| format!("failed to parse arguments: {e}"))
}

fn render(value: Value) -> String {
    match value {
        Value::String(text) => text,
        other => other.to_string(),
    }
}
