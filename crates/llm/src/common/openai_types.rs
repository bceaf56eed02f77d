use crate::chat::{ChatMessage, ChatRole, MessageType, Tool};
use crate::{FunctionCall, ToolCall};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OpenAIStyleMessage {
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<OpenAIStyleToolCall>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
}

impl OpenAIStyleMessage {
    fn text(role: &str, content: &str) -> Self {
        Self {
            role: role.to_string(),
            content: Some(content.to_string()),
            tool_calls: None,
            tool_call_id: None,
        }
    }

    /// Tool results fan out into one wire message per call, each tagged with
    /// the id of the call it answers.
    pub fn from_chat_message(message: &ChatMessage) -> Vec<Self> {
        let role = match message.role {
            ChatRole::System => "system",
            ChatRole::User => "user",
            ChatRole::Assistant => "assistant",
            ChatRole::Tool => "tool",
        };
        match &message.message_type {
            MessageType::Text => vec![Self::text(role, &message.content)],
            MessageType::ToolUse(calls) => vec![Self {
                role: role.to_string(),
                content: if message.content.is_empty() {
                    None
                } else {
                    Some(message.content.clone())
                },
                tool_calls: Some(calls.iter().map(OpenAIStyleToolCall::from).collect()),
                tool_call_id: None,
            }],
            MessageType::ToolResult(calls) => calls
                .iter()
                .map(|call| Self {
                    role: "tool".to_string(),
                    content: Some(call.function.arguments.clone()),
                    tool_calls: None,
                    tool_call_id: Some(call.id.clone()),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OpenAIStyleToolCall {
    pub id: String,
    #[serde(rename = "type")]
    pub tool_type: String,
    pub function: OpenAIStyleToolCallFunction,
}

impl From<&ToolCall> for OpenAIStyleToolCall {
    fn from(call: &ToolCall) -> Self {
        Self {
            id: call.id.clone(),
            tool_type: call.call_type.clone(),
            function: OpenAIStyleToolCallFunction {
                name: call.function.name.clone(),
                arguments: call.function.arguments.clone(),
            },
        }
    }
}

impl From<OpenAIStyleToolCall> for ToolCall {
    fn from(call: OpenAIStyleToolCall) -> Self {
        Self {
            id: call.id,
            call_type: call.tool_type,
            function: FunctionCall {
                name: call.function.name,
                arguments: call.function.arguments,
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OpenAIStyleToolCallFunction {
    pub name: String,
    pub arguments: String,
}

#[derive(Debug, Serialize)]
pub struct OpenAIStyleChatCompletionRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<OpenAIStyleMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<&'a [Tool]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    pub stream: bool,
}

impl<'a> OpenAIStyleChatCompletionRequest<'a> {
    pub fn new(model: &'a str, messages: &[ChatMessage]) -> Self {
        Self {
            model,
            messages: messages
                .iter()
                .flat_map(OpenAIStyleMessage::from_chat_message)
                .collect(),
            tools: None,
            max_tokens: None,
            temperature: None,
            stream: false,
        }
    }

    pub fn set_tools(mut self, tools: Option<&'a [Tool]>) -> Self {
        self.tools = tools.filter(|t| !t.is_empty());
        self
    }

    pub fn set_max_tokens(mut self, max_tokens: Option<u32>) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn set_temperature(mut self, temperature: Option<f32>) -> Self {
        self.temperature = temperature;
        self
    }
}

#[derive(Debug, Deserialize)]
pub struct OpenAIStyleChatChoice {
    pub message: OpenAIStyleResponseMessage,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct OpenAIStyleResponseMessage {
    pub content: Option<String>,
    #[serde(default)]
    pub tool_calls: Option<Vec<OpenAIStyleToolCall>>,
}

#[derive(Debug, Deserialize)]
pub struct OpenAIStyleChatCompletionResponse {
    pub model: String,
    pub choices: Vec<OpenAIStyleChatChoice>,
}

#[derive(Debug, Deserialize)]
pub struct OpenAIStyleErrorBody {
    pub error: OpenAIStyleErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct OpenAIStyleErrorDetail {
    pub message: String,
}
