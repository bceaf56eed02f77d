//! Test doubles shared by the workspace's integration tests.

pub mod llm;
pub mod wallet;

pub use llm::{MockResponse, ScriptedLLM};
pub use wallet::{MemoryWalletBackend, RecordedAction, CREATED_WALLET};
