use std::sync::Arc;

use island_core::{MemorySaver, ReActAgent, SessionConfig};
use island_llm::backends::openai::{OpenAI, OpenAIModel};
use island_llm::builder::LLMBuilder;
use island_llm::LLMProvider;
use island_wallet::{island_tools, AgentkitWrapper, CdpToolkit, WalletConfig};
use log::info;

use crate::config::ChatbotConfig;
use crate::error::ChatbotError;
use crate::persona::Persona;

pub const MODEL: OpenAIModel = OpenAIModel::GPT4OMini;

/// Every run shares this one conversation thread.
pub const THREAD_ID: &str = "CDP Agentkit Chatbot Example!";

/// Builds the two external handles the agent is assembled from.
pub trait Collaborators: Send + Sync {
    fn language_model(
        &self,
        config: &ChatbotConfig,
        model: &str,
        temperature: f32,
    ) -> Result<Arc<dyn LLMProvider>, ChatbotError>;

    fn wallet(&self, config: &WalletConfig) -> Result<Arc<AgentkitWrapper>, ChatbotError>;
}

/// OpenAI for the model, the HTTP AgentKit bridge for the wallet.
#[derive(Debug, Default, Clone, Copy)]
pub struct LiveCollaborators;

impl Collaborators for LiveCollaborators {
    fn language_model(
        &self,
        config: &ChatbotConfig,
        model: &str,
        temperature: f32,
    ) -> Result<Arc<dyn LLMProvider>, ChatbotError> {
        let mut builder = LLMBuilder::<OpenAI>::new()
            .model(model)
            .temperature(temperature);
        if let Some(key) = &config.openai_api_key {
            builder = builder.api_key(key);
        }
        if let Some(url) = &config.openai_base_url {
            builder = builder.base_url(url);
        }
        Ok(builder.build()?)
    }

    fn wallet(&self, config: &WalletConfig) -> Result<Arc<AgentkitWrapper>, ChatbotError> {
        Ok(Arc::new(AgentkitWrapper::new(config.clone())?))
    }
}

/// Assemble a ready agent and its session.
///
/// Nothing is cached: every call builds a new model client, wallet wrapper,
/// tool set and memory store. Collaborator failures are returned as-is.
pub fn initialize_agent(
    config: &ChatbotConfig,
    persona: Persona,
    collaborators: &dyn Collaborators,
) -> Result<(ReActAgent, SessionConfig), ChatbotError> {
    let temperature = persona.temperature().resolve(config.temperature.as_deref());
    let model = MODEL.to_string();
    info!("initialising {} on {model} at temperature {temperature}", persona.display_name());
    let llm = collaborators.language_model(config, &model, temperature)?;

    let wrapper = collaborators.wallet(&config.wallet)?;

    let custom = island_tools(&wrapper);
    let mut tools = CdpToolkit::from_cdp_agentkit_wrapper(Arc::clone(&wrapper)).get_tools();
    tools.extend(custom);

    let memory = Arc::new(MemorySaver::new());

    let agent = ReActAgent::builder()
        .with_llm(llm)
        .with_tools(tools)
        .with_checkpointer(memory)
        .with_system_prompt(persona.system_prompt())
        .build()?;

    Ok((agent, SessionConfig::new(THREAD_ID)))
}
