use std::collections::HashMap;

use async_trait::async_trait;
use island_llm::chat::ChatMessage;
use log::debug;
use tokio::sync::RwLock;

use super::{Checkpoint, Checkpointer, MemoryError};

/// In-process checkpointer. Keeps every checkpoint of every thread for the
/// lifetime of the process; nothing is evicted.
#[derive(Debug, Default)]
pub struct MemorySaver {
    threads: RwLock<HashMap<String, Vec<Checkpoint>>>,
}

impl MemorySaver {
    pub fn new() -> Self {
        Self::default()
    }

    /// All checkpoints of a thread, oldest first.
    pub async fn history(&self, thread_id: &str) -> Vec<Checkpoint> {
        self.threads
            .read()
            .await
            .get(thread_id)
            .cloned()
            .unwrap_or_default()
    }

    pub async fn thread_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.threads.read().await.keys().cloned().collect();
        ids.sort();
        ids
    }
}

#[async_trait]
impl Checkpointer for MemorySaver {
    async fn get(&self, thread_id: &str) -> Result<Option<Checkpoint>, MemoryError> {
        Ok(self
            .threads
            .read()
            .await
            .get(thread_id)
            .and_then(|checkpoints| checkpoints.last().cloned()))
    }

    async fn put(
        &self,
        thread_id: &str,
        messages: Vec<ChatMessage>,
    ) -> Result<Checkpoint, MemoryError> {
        let checkpoint = Checkpoint::new(thread_id, messages);
        debug!(
            "checkpoint {} for thread {thread_id:?} ({} messages)",
            checkpoint.id,
            checkpoint.messages.len()
        );
        self.threads
            .write()
            .await
            .entry(thread_id.to_string())
            .or_default()
            .push(checkpoint.clone());
        Ok(checkpoint)
    }

    async fn clear(&self, thread_id: &str) -> Result<(), MemoryError> {
        self.threads.write().await.remove(thread_id);
        Ok(())
    }
}
