use island_core::{AgentBuildError, AgentError};
use island_llm::error::LLMError;
use island_wallet::WalletError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChatbotError {
    #[error("Language model error: {0}")]
    Llm(#[from] LLMError),

    #[error("Wallet error: {0}")]
    Wallet(#[from] WalletError),

    #[error("Agent build error: {0}")]
    Build(#[from] AgentBuildError),

    #[error("Agent error: {0}")]
    Agent(#[from] AgentError),

    /// The stream produced no agent or tools update before it had to report
    /// one.
    #[error("The agent stream produced no message content")]
    NoContent,

    #[error("The {node} update carried no messages")]
    EmptyUpdate { node: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
