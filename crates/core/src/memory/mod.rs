//! Conversation memory keyed by thread id.
//!
//! A checkpoint is a full snapshot of a thread's message history. Every step of
//! an agent run writes one, so the latest checkpoint is always the state the
//! next run resumes from.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use island_llm::chat::ChatMessage;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

mod saver;
pub use saver::MemorySaver;

#[derive(Debug, thiserror::Error)]
pub enum MemoryError {
    #[error("Checkpoint store unavailable: {0}")]
    Unavailable(String),
}

/// Snapshot of a thread's history after one agent step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    pub id: Uuid,
    pub thread_id: String,
    pub created_at: DateTime<Utc>,
    pub messages: Vec<ChatMessage>,
}

impl Checkpoint {
    pub fn new(thread_id: impl Into<String>, messages: Vec<ChatMessage>) -> Self {
        Self {
            id: Uuid::new_v4(),
            thread_id: thread_id.into(),
            created_at: Utc::now(),
            messages,
        }
    }
}

#[async_trait]
pub trait Checkpointer: Send + Sync {
    /// Latest checkpoint for the thread, if any run has written one.
    async fn get(&self, thread_id: &str) -> Result<Option<Checkpoint>, MemoryError>;

    /// Store a new snapshot of the thread's history.
    async fn put(
        &self,
        thread_id: &str,
        messages: Vec<ChatMessage>,
    ) -> Result<Checkpoint, MemoryError>;

    /// Drop every checkpoint of the thread.
    async fn clear(&self, thread_id: &str) -> Result<(), MemoryError>;

    /// Message history of the latest checkpoint, empty for unknown threads.
    async fn messages(&self, thread_id: &str) -> Result<Vec<ChatMessage>, MemoryError> {
        Ok(self
            .get(thread_id)
            .await?
            .map(|checkpoint| checkpoint.messages)
            .unwrap_or_default())
    }
}
