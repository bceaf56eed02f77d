use serde::{Deserialize, Serialize};

/// Identifies the conversation thread a run reads from and writes to.
///
/// Serialises as `{"configurable": {"thread_id": "..."}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    pub configurable: Configurable,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configurable {
    pub thread_id: String,
}

impl SessionConfig {
    pub fn new(thread_id: impl Into<String>) -> Self {
        Self {
            configurable: Configurable {
                thread_id: thread_id.into(),
            },
        }
    }

    pub fn thread_id(&self) -> &str {
        &self.configurable.thread_id
    }
}
