//! ReAct agent core: a tool registry, a conversation checkpointer and an agent
//! handle that streams one update per graph step.

pub mod agent;
pub mod memory;
pub mod protocol;
pub mod session;
pub mod tool;

pub use agent::{AgentBuildError, AgentError, ReActAgent, ReActAgentBuilder};
pub use memory::{Checkpoint, Checkpointer, MemoryError, MemorySaver};
pub use protocol::{AgentEventStream, NodeUpdate, StreamEvent};
pub use session::SessionConfig;
pub use tool::ToolRegistry;
