//! OpenAI chat-completions backend.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use strum::{Display, EnumString};

use crate::{
    builder::LLMBuilder,
    chat::{ChatMessage, ChatProvider, ChatResponse, Tool},
    common::openai_types::{
        OpenAIStyleChatCompletionRequest, OpenAIStyleChatCompletionResponse, OpenAIStyleErrorBody,
    },
    error::LLMError,
    LLMProvider, ToolCall,
};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1/";
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Chat models known to support tool calling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display)]
pub enum OpenAIModel {
    #[strum(serialize = "gpt-4o")]
    GPT4O,
    #[strum(serialize = "gpt-4o-mini")]
    GPT4OMini,
    #[strum(serialize = "gpt-4-turbo")]
    GPT4Turbo,
    #[strum(serialize = "gpt-3.5-turbo")]
    GPT35Turbo,
}

/// Client for OpenAI-compatible chat completion endpoints.
pub struct OpenAI {
    pub api_key: String,
    pub base_url: reqwest::Url,
    pub model: String,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
    pub timeout_seconds: Option<u64>,
    client: reqwest::Client,
}

impl fmt::Debug for OpenAI {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAI")
            .field("base_url", &self.base_url.as_str())
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .finish_non_exhaustive()
    }
}

#[derive(Debug)]
pub struct OpenAIChatResponse {
    text: Option<String>,
    tool_calls: Option<Vec<ToolCall>>,
}

impl ChatResponse for OpenAIChatResponse {
    fn text(&self) -> Option<String> {
        self.text.clone()
    }

    fn tool_calls(&self) -> Option<Vec<ToolCall>> {
        self.tool_calls.clone()
    }
}

impl fmt::Display for OpenAIChatResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.text, &self.tool_calls) {
            (Some(text), _) => write!(f, "{text}"),
            (None, Some(calls)) => {
                for call in calls {
                    write!(f, "{}({})", call.function.name, call.function.arguments)?;
                }
                Ok(())
            }
            (None, None) => Ok(()),
        }
    }
}

impl OpenAI {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        api_key: impl Into<String>,
        base_url: Option<String>,
        model: Option<String>,
        max_tokens: Option<u32>,
        temperature: Option<f32>,
        timeout_seconds: Option<u64>,
    ) -> Result<Self, LLMError> {
        let mut builder = reqwest::Client::builder();
        if let Some(sec) = timeout_seconds {
            builder = builder.timeout(Duration::from_secs(sec));
        }
        let base_url = base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_owned());
        // A trailing slash keeps `join` from dropping the last path segment.
        let base_url = if base_url.ends_with('/') {
            base_url
        } else {
            format!("{base_url}/")
        };
        Ok(Self {
            api_key: api_key.into(),
            base_url: reqwest::Url::parse(&base_url)
                .map_err(|e| LLMError::InvalidRequest(format!("invalid base url: {e}")))?,
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            max_tokens,
            temperature,
            timeout_seconds,
            client: builder.build()?,
        })
    }

    fn parse_response(&self, raw: &str) -> Result<OpenAIChatResponse, LLMError> {
        let parsed: OpenAIStyleChatCompletionResponse =
            serde_json::from_str(raw).map_err(|e| LLMError::ResponseFormatError {
                message: format!("Failed to decode OpenAI response: {e}"),
                raw_response: raw.to_string(),
            })?;
        let choice =
            parsed
                .choices
                .into_iter()
                .next()
                .ok_or_else(|| LLMError::ResponseFormatError {
                    message: "No choices in response".to_string(),
                    raw_response: raw.to_string(),
                })?;
        debug!(
            "{} finished with {:?}",
            parsed.model,
            choice.finish_reason.as_deref().unwrap_or("unknown")
        );
        Ok(OpenAIChatResponse {
            text: choice.message.content,
            tool_calls: choice
                .message
                .tool_calls
                .filter(|calls| !calls.is_empty())
                .map(|calls| calls.into_iter().map(ToolCall::from).collect()),
        })
    }
}

#[async_trait]
impl ChatProvider for OpenAI {
    async fn chat_with_tools(
        &self,
        messages: &[ChatMessage],
        tools: Option<&[Tool]>,
    ) -> Result<Box<dyn ChatResponse>, LLMError> {
        if self.api_key.is_empty() {
            return Err(LLMError::AuthError("Missing OpenAI API key".to_string()));
        }

        let body = OpenAIStyleChatCompletionRequest::new(&self.model, messages)
            .set_tools(tools)
            .set_max_tokens(self.max_tokens)
            .set_temperature(self.temperature);

        let url = self
            .base_url
            .join("chat/completions")
            .map_err(|e| LLMError::HttpError(e.to_string()))?;

        let response = self
            .client
            .post(url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let raw = response.text().await?;

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(LLMError::AuthError(raw));
        }
        if !status.is_success() {
            let message = serde_json::from_str::<OpenAIStyleErrorBody>(&raw)
                .map(|body| body.error.message)
                .unwrap_or_else(|_| format!("OpenAI API returned error status: {status}"));
            return Err(LLMError::ResponseFormatError {
                message,
                raw_response: raw,
            });
        }

        Ok(Box::new(self.parse_response(&raw)?))
    }
}

impl LLMProvider for OpenAI {}

impl LLMBuilder<OpenAI> {
    /// Builds the OpenAI client; an API key is mandatory.
    pub fn build(self) -> Result<std::sync::Arc<OpenAI>, LLMError> {
        let key = self
            .api_key
            .ok_or_else(|| LLMError::InvalidRequest("No API key provided for OpenAI".to_string()))?;

        let openai = OpenAI::new(
            key,
            self.base_url,
            self.model,
            self.max_tokens,
            self.temperature,
            self.timeout_seconds,
        )?;

        Ok(std::sync::Arc::new(openai))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> OpenAI {
        OpenAI::new("test-key", None, None, None, None, None).unwrap()
    }

    #[test]
    fn test_openai_default_values() {
        let client = client();
        assert_eq!(client.model, "gpt-3.5-turbo");
        assert_eq!(client.base_url.as_str(), "https://api.openai.com/v1/");
        assert!(client.temperature.is_none());
    }

    #[test]
    fn test_model_names() {
        use std::str::FromStr;
        assert_eq!(OpenAIModel::GPT4OMini.to_string(), "gpt-4o-mini");
        assert_eq!(OpenAIModel::from_str("gpt-4o").unwrap(), OpenAIModel::GPT4O);
        assert!(OpenAIModel::from_str("davinci").is_err());
    }

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let client =
            OpenAI::new("k", Some("http://localhost:9000/v1".into()), None, None, None, None)
                .unwrap();
        assert_eq!(
            client.base_url.join("chat/completions").unwrap().as_str(),
            "http://localhost:9000/v1/chat/completions"
        );
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        let result = OpenAI::new("k", Some("not a url".into()), None, None, None, None);
        assert!(matches!(result, Err(LLMError::InvalidRequest(_))));
    }

    #[test]
    fn test_parse_text_response() {
        let raw = r#"{"model":"gpt-4o-mini","choices":[{"message":{"role":"assistant","content":"gm"},"finish_reason":"stop"}]}"#;
        let response = client().parse_response(raw).unwrap();
        assert_eq!(response.text().as_deref(), Some("gm"));
        assert!(response.tool_calls().is_none());
        assert_eq!(response.to_string(), "gm");
    }

    #[test]
    fn test_parse_tool_call_response() {
        let raw = r#"{"model":"gpt-4o-mini","choices":[{"message":{"role":"assistant","content":null,"tool_calls":[{"id":"call_1","type":"function","function":{"name":"get_wallet_details","arguments":"{}"}}]},"finish_reason":"tool_calls"}]}"#;
        let response = client().parse_response(raw).unwrap();
        assert!(response.text().is_none());
        let calls = response.tool_calls().unwrap();
        assert_eq!(calls[0].function.name, "get_wallet_details");
        assert_eq!(response.to_string(), "get_wallet_details({})");
    }

    #[test]
    fn test_parse_empty_choices_is_format_error() {
        let raw = r#"{"model":"gpt-4o-mini","choices":[]}"#;
        let err = client().parse_response(raw).unwrap_err();
        assert!(err.to_string().contains("No choices in response"));
    }

    #[tokio::test]
    async fn test_empty_api_key_is_auth_error() {
        let client = OpenAI::new("", None, None, None, None, None).unwrap();
        let messages = vec![ChatMessage::user().content("gm").build()];
        let err = client.chat_with_tools(&messages, None).await.unwrap_err();
        assert!(matches!(err, LLMError::AuthError(_)));
    }
}
