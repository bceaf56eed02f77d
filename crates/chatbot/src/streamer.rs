//! Drives one agent run and pulls the text out of each streamed update.

use futures::{Stream, StreamExt};
use island_core::{AgentError, ReActAgent, SessionConfig, StreamEvent};
use island_llm::chat::ChatMessage;
use log::{debug, info};

use crate::error::ChatbotError;

/// What a run said: the content of the last update and every non-empty
/// content joined with a leading newline each.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreamedReply {
    pub last: String,
    pub transcript: String,
}

/// Send `message` on the session's thread and collect the streamed reply.
pub async fn stream_response(
    agent: &ReActAgent,
    session: &SessionConfig,
    message: &str,
) -> Result<StreamedReply, ChatbotError> {
    let input = vec![ChatMessage::user().content(message).build()];
    accumulate(agent.stream(input, session)).await
}

/// Only the last fragment, as the chat front end expects.
pub async fn get_chat_response(
    agent: &ReActAgent,
    session: &SessionConfig,
    message: &str,
) -> Result<String, ChatbotError> {
    Ok(stream_response(agent, session, message).await?.last)
}

/// Fold a stream of updates into a [`StreamedReply`].
///
/// Agent and tools updates replace the current fragment with their first
/// message's content. Updates from any other node leave it unchanged, so the
/// previous fragment is logged and appended again. Every update, whatever its
/// node, is logged and appended once.
pub async fn accumulate<S>(mut events: S) -> Result<StreamedReply, ChatbotError>
where
    S: Stream<Item = Result<StreamEvent, AgentError>> + Unpin,
{
    let mut current: Option<String> = None;
    let mut transcript = String::new();

    while let Some(event) = events.next().await {
        let event = event?;
        match &event {
            StreamEvent::Agent(update) | StreamEvent::Tools(update) => {
                let first = update
                    .messages
                    .first()
                    .ok_or_else(|| ChatbotError::EmptyUpdate {
                        node: event.node().to_string(),
                    })?;
                current = Some(first.content.clone());
            }
            StreamEvent::Other { node, .. } => debug!("no content taken from {node} update"),
        }

        let fragment = current.as_deref().ok_or(ChatbotError::NoContent)?;
        info!("{fragment}");
        if !fragment.is_empty() {
            transcript.push('\n');
            transcript.push_str(fragment);
        }
    }

    Ok(StreamedReply {
        last: current.ok_or(ChatbotError::NoContent)?,
        transcript,
    })
}
