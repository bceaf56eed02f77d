use thiserror::Error;

/// Failures talking to a chat completion backend.
#[derive(Debug, Error)]
pub enum LLMError {
    /// Transport failure or timeout.
    #[error("HTTP Error: {0}")]
    HttpError(String),

    /// Missing or rejected API key.
    #[error("Auth Error: {0}")]
    AuthError(String),

    #[error("Invalid Request: {0}")]
    InvalidRequest(String),

    /// Error reported by the backend itself.
    #[error("Provider Error: {0}")]
    ProviderError(String),

    /// Body arrived but did not have the expected shape.
    #[error("Response Format Error: {message}. Raw response: {raw_response}")]
    ResponseFormatError {
        message: String,
        raw_response: String,
    },

    #[error("JSON Parse Error: {0}")]
    JsonError(String),
}

impl From<reqwest::Error> for LLMError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return LLMError::HttpError(format!("request timed out: {err}"));
        }
        LLMError::HttpError(err.to_string())
    }
}

impl From<serde_json::Error> for LLMError {
    fn from(err: serde_json::Error) -> Self {
        LLMError::JsonError(format!(
            "{err} at line {} column {}",
            err.line(),
            err.column()
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_display_keeps_backend_message() {
        let error = LLMError::AuthError("Invalid API key".to_string());
        assert_eq!(error.to_string(), "Auth Error: Invalid API key");

        let error = LLMError::ProviderError("script exhausted".to_string());
        assert_eq!(error.to_string(), "Provider Error: script exhausted");
    }

    #[test]
    fn test_format_error_carries_raw_body() {
        let error = LLMError::ResponseFormatError {
            message: "No choices in response".to_string(),
            raw_response: "{}".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Response Format Error: No choices in response. Raw response: {}"
        );
    }

    #[test]
    fn test_from_serde_json_has_position() {
        let json_err = serde_json::from_str::<serde_json::Value>("{ nope").unwrap_err();
        match LLMError::from(json_err) {
            LLMError::JsonError(msg) => assert!(msg.contains("line 1")),
            other => panic!("expected JsonError, got {other:?}"),
        }
    }

    #[test]
    fn test_no_source() {
        let error = LLMError::InvalidRequest("No API key provided".to_string());
        assert!(error.source().is_none());
    }
}
