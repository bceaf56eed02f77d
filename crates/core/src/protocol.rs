use std::collections::BTreeMap;
use std::pin::Pin;

use futures::Stream;
use island_llm::chat::ChatMessage;
use serde::{Deserialize, Serialize};

use crate::agent::AgentError;

pub const AGENT_NODE: &str = "agent";
pub const TOOLS_NODE: &str = "tools";

/// Messages a graph node produced during one step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeUpdate {
    pub messages: Vec<ChatMessage>,
}

impl NodeUpdate {
    pub fn new(messages: Vec<ChatMessage>) -> Self {
        Self { messages }
    }
}

/// One update emitted while an agent run is streaming, keyed by the node
/// that produced it. On the wire: `{"agent": {"messages": [...]}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<String, NodeUpdate>",
    into = "BTreeMap<String, NodeUpdate>"
)]
pub enum StreamEvent {
    /// The model node answered or requested tool calls.
    Agent(NodeUpdate),
    /// The tool node ran the requested calls.
    Tools(NodeUpdate),
    /// An update from any other node.
    Other { node: String, update: NodeUpdate },
}

impl StreamEvent {
    pub fn agent(messages: Vec<ChatMessage>) -> Self {
        Self::Agent(NodeUpdate::new(messages))
    }

    pub fn tools(messages: Vec<ChatMessage>) -> Self {
        Self::Tools(NodeUpdate::new(messages))
    }

    pub fn node(&self) -> &str {
        match self {
            Self::Agent(_) => AGENT_NODE,
            Self::Tools(_) => TOOLS_NODE,
            Self::Other { node, .. } => node,
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        match self {
            Self::Agent(update) | Self::Tools(update) | Self::Other { update, .. } => {
                &update.messages
            }
        }
    }
}

impl TryFrom<BTreeMap<String, NodeUpdate>> for StreamEvent {
    type Error = String;

    fn try_from(map: BTreeMap<String, NodeUpdate>) -> Result<Self, Self::Error> {
        if map.len() != 1 {
            return Err(format!(
                "stream event must carry exactly one node update, got {}",
                map.len()
            ));
        }
        let Some((node, update)) = map.into_iter().next() else {
            return Err("empty stream event".to_string());
        };
        Ok(match node.as_str() {
            AGENT_NODE => Self::Agent(update),
            TOOLS_NODE => Self::Tools(update),
            _ => Self::Other { node, update },
        })
    }
}

impl From<StreamEvent> for BTreeMap<String, NodeUpdate> {
    fn from(event: StreamEvent) -> Self {
        let (node, update) = match event {
            StreamEvent::Agent(update) => (AGENT_NODE.to_string(), update),
            StreamEvent::Tools(update) => (TOOLS_NODE.to_string(), update),
            StreamEvent::Other { node, update } => (node, update),
        };
        BTreeMap::from([(node, update)])
    }
}

/// Lazy, single-pass sequence of updates from one agent run.
pub type AgentEventStream = Pin<Box<dyn Stream<Item = Result<StreamEvent, AgentError>> + Send>>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_agent_event_wire_shape() {
        let event = StreamEvent::agent(vec![ChatMessage::assistant().content("A").build()]);
        let value = serde_json::to_value(&event).unwrap();

        assert_eq!(value["agent"]["messages"][0]["content"], "A");
        assert_eq!(event.node(), "agent");
        assert_eq!(event.messages().len(), 1);
    }

    #[test]
    fn test_event_from_json_by_node_name() {
        let raw = json!({
            "tools": {"messages": [{"role": "Tool", "message_type": "Text", "content": "B"}]}
        });
        let event: StreamEvent = serde_json::from_value(raw).unwrap();
        assert!(matches!(event, StreamEvent::Tools(_)));
        assert_eq!(event.messages()[0].content, "B");
    }

    #[test]
    fn test_unknown_node_becomes_other() {
        let raw = json!({"summarize": {"messages": []}});
        let event: StreamEvent = serde_json::from_value(raw).unwrap();
        assert_eq!(event.node(), "summarize");
        assert!(event.messages().is_empty());
    }

    #[test]
    fn test_multi_node_event_is_rejected() {
        let raw = json!({"agent": {"messages": []}, "tools": {"messages": []}});
        assert!(serde_json::from_value::<StreamEvent>(raw).is_err());
    }
}
