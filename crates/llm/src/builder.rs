//! Builder module for configuring and instantiating LLM providers.
//!
//! Each backend implements `build` on its own `LLMBuilder<Backend>`, so the
//! builder stays a plain bag of optional settings.

use std::marker::PhantomData;

use crate::LLMProvider;

/// Builder for configuring and instantiating LLM providers.
///
/// Provides a fluent interface for setting model selection, API keys and
/// generation parameters.
pub struct LLMBuilder<L: LLMProvider> {
    /// Selected backend provider
    pub(crate) backend: PhantomData<L>,
    /// API key for authentication with the provider
    pub(crate) api_key: Option<String>,
    /// Base URL for API requests (primarily for proxies and self-hosted gateways)
    pub(crate) base_url: Option<String>,
    /// Model identifier/name to use
    pub(crate) model: Option<String>,
    /// Maximum tokens to generate in responses
    pub(crate) max_tokens: Option<u32>,
    /// Sampling temperature; callers are expected to validate the range
    pub(crate) temperature: Option<f32>,
    /// Request timeout duration in seconds
    pub(crate) timeout_seconds: Option<u64>,
}

impl<L: LLMProvider> Default for LLMBuilder<L> {
    fn default() -> Self {
        Self {
            backend: PhantomData,
            api_key: None,
            base_url: None,
            model: None,
            max_tokens: None,
            temperature: None,
            timeout_seconds: None,
        }
    }
}

impl<L: LLMProvider> LLMBuilder<L> {
    /// Creates a new empty builder instance with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API key for authentication.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Sets the base URL for API requests.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Sets the model identifier to use.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Sets the maximum number of tokens to generate.
    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Sets the temperature for controlling response randomness.
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Sets the request timeout in seconds.
    pub fn timeout_seconds(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = Some(timeout_seconds);
        self
    }
}

#[cfg(all(test, feature = "openai"))]
mod tests {
    use super::*;
    use crate::backends::openai::OpenAI;
    use crate::error::LLMError;

    #[test]
    fn test_openai_creation() {
        let client = LLMBuilder::<OpenAI>::new()
            .api_key("test-key")
            .model("gpt-4o-mini")
            .max_tokens(100)
            .temperature(0.7)
            .build()
            .expect("Failed to build OpenAI client");

        assert_eq!(client.api_key, "test-key");
        assert_eq!(client.model, "gpt-4o-mini");
        assert_eq!(client.max_tokens, Some(100));
        assert_eq!(client.temperature, Some(0.7));
    }

    #[test]
    fn test_openai_with_custom_base_url() {
        let client = LLMBuilder::<OpenAI>::new()
            .api_key("test-key")
            .base_url("https://custom.openai.com/v1/")
            .build()
            .expect("Failed to build OpenAI client with custom URL");

        assert_eq!(client.base_url.as_str(), "https://custom.openai.com/v1/");
    }

    #[test]
    fn test_openai_builder_validation() {
        let result = LLMBuilder::<OpenAI>::new().model("gpt-4o-mini").build();

        match result {
            Err(LLMError::InvalidRequest(msg)) => {
                assert!(msg.contains("No API key provided"));
            }
            _ => panic!("Expected InvalidRequest error"),
        }
    }
}
