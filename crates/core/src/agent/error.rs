use island_llm::error::LLMError;
use thiserror::Error;

use crate::memory::MemoryError;

#[derive(Debug, Error)]
pub enum AgentBuildError {
    #[error("An LLM provider is required to build the agent")]
    MissingLlm,

    #[error("Tool {0} is registered more than once")]
    DuplicateTool(String),
}

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("LLM error: {0}")]
    Llm(#[from] LLMError),

    #[error("Memory error: {0}")]
    Memory(#[from] MemoryError),

    #[error("Recursion limit of {limit} reached without hitting a stop condition")]
    RecursionLimit { limit: usize },

    #[error("Tool task failed: {0}")]
    ToolTask(String),
}
