use thiserror::Error;

#[derive(Debug, Error)]
pub enum WalletError {
    #[error("Wallet backend request failed: {0}")]
    Transport(String),

    #[error("Wallet backend returned status {status}: {message}")]
    Backend { status: u16, message: String },

    #[error("Malformed wallet backend response: {0}")]
    Response(String),

    #[error("Invalid tool input: {0}")]
    InvalidInput(String),

    #[error("CDP API credentials are missing: {0}")]
    MissingCredentials(&'static str),

    #[error("ISLAND_CONTRACT_ADDRESS is not configured")]
    MissingContract,

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<ureq::Error> for WalletError {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::StatusCode(status) => WalletError::Backend {
                status,
                message: "request rejected".to_string(),
            },
            other => WalletError::Transport(other.to_string()),
        }
    }
}
