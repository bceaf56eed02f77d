use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use island_llm::{
    chat::{ChatMessage, ChatProvider, ChatResponse, Tool},
    error::LLMError,
    FunctionCall, LLMProvider, ToolCall,
};

/// One scripted model reply.
#[derive(Debug, Clone, Default)]
pub struct MockResponse {
    pub text: Option<String>,
    pub tool_calls: Vec<ToolCall>,
}

impl MockResponse {
    pub fn text(text: &str) -> Self {
        Self {
            text: Some(text.to_string()),
            tool_calls: vec![],
        }
    }

    /// A reply that asks for the given `(tool name, JSON arguments)` calls.
    pub fn calls(calls: &[(&str, &str)]) -> Self {
        Self {
            text: None,
            tool_calls: calls
                .iter()
                .enumerate()
                .map(|(i, (name, arguments))| ToolCall {
                    id: format!("call_{i}"),
                    call_type: "function".to_string(),
                    function: FunctionCall {
                        name: name.to_string(),
                        arguments: arguments.to_string(),
                    },
                })
                .collect(),
        }
    }
}

/// Replays queued replies in order and records every request it receives.
/// Once the script runs out every call fails with a provider error.
#[derive(Debug, Default)]
pub struct ScriptedLLM {
    script: Mutex<VecDeque<MockResponse>>,
    requests: Mutex<Vec<Vec<ChatMessage>>>,
    offered_tools: Mutex<Vec<Vec<String>>>,
}

impl ScriptedLLM {
    pub fn new(script: Vec<MockResponse>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            ..Default::default()
        }
    }

    /// Message lists sent to the model, one entry per call.
    pub fn requests(&self) -> Vec<Vec<ChatMessage>> {
        self.requests.lock().unwrap().clone()
    }

    /// Tool names offered on each call, in the order they were offered.
    pub fn offered_tools(&self) -> Vec<Vec<String>> {
        self.offered_tools.lock().unwrap().clone()
    }

    pub fn remaining(&self) -> usize {
        self.script.lock().unwrap().len()
    }
}

#[async_trait]
impl ChatProvider for ScriptedLLM {
    async fn chat_with_tools(
        &self,
        messages: &[ChatMessage],
        tools: Option<&[Tool]>,
    ) -> Result<Box<dyn ChatResponse>, LLMError> {
        self.requests.lock().unwrap().push(messages.to_vec());
        self.offered_tools.lock().unwrap().push(
            tools
                .unwrap_or_default()
                .iter()
                .map(|t| t.function.name.clone())
                .collect(),
        );

        let next = self.script.lock().unwrap().pop_front();
        match next {
            Some(response) => Ok(Box::new(MockChatResponse(response))),
            None => Err(LLMError::ProviderError("script exhausted".to_string())),
        }
    }
}

impl LLMProvider for ScriptedLLM {}

#[derive(Debug)]
struct MockChatResponse(MockResponse);

impl ChatResponse for MockChatResponse {
    fn text(&self) -> Option<String> {
        self.0.text.clone()
    }

    fn tool_calls(&self) -> Option<Vec<ToolCall>> {
        if self.0.tool_calls.is_empty() {
            None
        } else {
            Some(self.0.tool_calls.clone())
        }
    }
}

impl std::fmt::Display for MockChatResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.text.as_deref().unwrap_or(""))
    }
}
