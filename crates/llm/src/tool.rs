use serde_json::Value;
use std::fmt::Debug;

use crate::chat::{FunctionTool, Tool};

#[derive(Debug, thiserror::Error)]
pub enum ToolCallError {
    #[error("Runtime Error {0}")]
    RuntimeError(#[from] Box<dyn std::error::Error + Sync + Send>),

    #[error("Serde Error {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub trait ToolT: Send + Sync + Debug {
    /// The name of the tool.
    fn name(&self) -> &str;
    /// A description explaining the tool’s purpose, shown verbatim to the model.
    fn description(&self) -> &str;
    /// Return a description of the expected arguments.
    fn args_schema(&self) -> Value;
    /// Run the tool with the given arguments (in JSON) and return the result (in JSON).
    fn run(&self, args: Value) -> Result<Value, ToolCallError>;
}

/// The callable half of a tool; `#[tool]` routes `ToolT::run` here.
pub trait ToolRuntime: Send + Sync {
    fn execute(&self, args: Value) -> Result<Value, ToolCallError>;
}

pub trait ToolInputT {
    fn io_schema() -> &'static str;
}

impl From<&dyn ToolT> for Tool {
    fn from(tool: &dyn ToolT) -> Self {
        Tool {
            tool_type: "function".to_string(),
            function: FunctionTool {
                name: tool.name().to_string(),
                description: tool.description().to_string(),
                parameters: tool.args_schema(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug)]
    struct EchoTool;

    impl ToolT for EchoTool {
        fn name(&self) -> &str {
            "echo"
        }

        fn description(&self) -> &str {
            "Echo the input back"
        }

        fn args_schema(&self) -> Value {
            json!({
                "type": "object",
                "properties": {"text": {"type": "string"}},
                "required": ["text"]
            })
        }

        fn run(&self, args: Value) -> Result<Value, ToolCallError> {
            let text = args
                .get("text")
                .and_then(Value::as_str)
                .ok_or_else(|| ToolCallError::RuntimeError("missing text".into()))?;
            Ok(json!(text))
        }
    }

    #[test]
    fn test_tool_descriptor_from_tool() {
        let tool = EchoTool;
        let descriptor = Tool::from(&tool as &dyn ToolT);

        assert_eq!(descriptor.tool_type, "function");
        assert_eq!(descriptor.function.name, "echo");
        assert_eq!(descriptor.function.description, "Echo the input back");
        assert_eq!(descriptor.function.parameters["required"][0], "text");
    }

    #[test]
    fn test_tool_run_error_display() {
        let err = EchoTool.run(json!({})).unwrap_err();
        assert_eq!(err.to_string(), "Runtime Error missing text");
    }

    #[test]
    fn test_tool_call_error_from_serde() {
        let json_error = serde_json::from_str::<Value>("invalid json").unwrap_err();
        let error: ToolCallError = json_error.into();
        assert!(matches!(error, ToolCallError::SerdeError(_)));
    }
}
