use island_core::{ReActAgent, SessionConfig};

use crate::config::ChatbotConfig;
use crate::error::ChatbotError;
use crate::initializer::{initialize_agent, Collaborators, LiveCollaborators};
use crate::persona::Persona;
use crate::streamer::{stream_response, StreamedReply};

/// The running chatbot: built once at start and borrowed by every message.
#[derive(Debug)]
pub struct ChatApp {
    agent: ReActAgent,
    session: SessionConfig,
    persona: Persona,
}

impl ChatApp {
    pub fn start(config: &ChatbotConfig, persona: Persona) -> Result<Self, ChatbotError> {
        Self::start_with(config, persona, &LiveCollaborators)
    }

    pub fn start_with(
        config: &ChatbotConfig,
        persona: Persona,
        collaborators: &dyn Collaborators,
    ) -> Result<Self, ChatbotError> {
        let (agent, session) = initialize_agent(config, persona, collaborators)?;
        Ok(Self {
            agent,
            session,
            persona,
        })
    }

    /// Last streamed fragment of the reply.
    pub async fn send_message(&self, message: &str) -> Result<String, ChatbotError> {
        Ok(self.send_message_with_transcript(message).await?.last)
    }

    pub async fn send_message_with_transcript(
        &self,
        message: &str,
    ) -> Result<StreamedReply, ChatbotError> {
        stream_response(&self.agent, &self.session, message).await
    }

    pub fn agent(&self) -> &ReActAgent {
        &self.agent
    }

    pub fn session(&self) -> &SessionConfig {
        &self.session
    }

    pub fn persona(&self) -> Persona {
        self.persona
    }
}
