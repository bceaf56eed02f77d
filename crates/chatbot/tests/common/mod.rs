#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use island_chatbot::{ChatbotConfig, ChatbotError, Collaborators};
use island_llm::LLMProvider;
use island_test_utils::{MemoryWalletBackend, MockResponse, ScriptedLLM};
use island_wallet::{AgentkitWrapper, WalletConfig};

/// Collaborators that stay in-process and remember every construction.
#[derive(Default)]
pub struct CountingCollaborators {
    script: Vec<MockResponse>,
    pub backend: Arc<MemoryWalletBackend>,
    pub llms: Mutex<Vec<Arc<ScriptedLLM>>>,
    pub models: Mutex<Vec<(String, f32)>>,
    pub wallets: Mutex<Vec<Arc<AgentkitWrapper>>>,
}

impl CountingCollaborators {
    pub fn new(script: Vec<MockResponse>) -> Self {
        Self {
            script,
            backend: Arc::new(MemoryWalletBackend::new().with_output("get_balance", "0.5 eth")),
            ..Default::default()
        }
    }

    pub fn llm_builds(&self) -> usize {
        self.llms.lock().unwrap().len()
    }

    pub fn wallet_builds(&self) -> usize {
        self.wallets.lock().unwrap().len()
    }

    pub fn last_llm(&self) -> Arc<ScriptedLLM> {
        self.llms.lock().unwrap().last().cloned().unwrap()
    }

    pub fn last_temperature(&self) -> f32 {
        self.models.lock().unwrap().last().unwrap().1
    }
}

impl Collaborators for CountingCollaborators {
    fn language_model(
        &self,
        _config: &ChatbotConfig,
        model: &str,
        temperature: f32,
    ) -> Result<Arc<dyn LLMProvider>, ChatbotError> {
        let llm = Arc::new(ScriptedLLM::new(self.script.clone()));
        self.llms.lock().unwrap().push(llm.clone());
        self.models
            .lock()
            .unwrap()
            .push((model.to_string(), temperature));
        Ok(llm)
    }

    fn wallet(&self, config: &WalletConfig) -> Result<Arc<AgentkitWrapper>, ChatbotError> {
        let wrapper = Arc::new(AgentkitWrapper::with_backend(
            config.clone(),
            self.backend.clone(),
        ));
        self.wallets.lock().unwrap().push(wrapper.clone());
        Ok(wrapper)
    }
}

pub fn config_with(temperature: Option<&str>, wallet_data: Option<&str>) -> ChatbotConfig {
    ChatbotConfig {
        temperature: temperature.map(str::to_string),
        wallet: WalletConfig {
            wallet_data: wallet_data.map(str::to_string),
            island_contract: Some("0x5555555555555555555555555555555555555555".to_string()),
            ..Default::default()
        },
        ..Default::default()
    }
}
