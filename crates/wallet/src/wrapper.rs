use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use log::{debug, info};
use serde_json::Value;

use crate::backend::{HttpWalletBackend, WalletBackend};
use crate::config::WalletConfig;
use crate::error::WalletError;

/// Owns the wallet session: the backend, the network and the current wallet
/// blob. Shared by every tool in the toolkit.
pub struct AgentkitWrapper {
    config: WalletConfig,
    backend: Arc<dyn WalletBackend>,
    wallet_data: Mutex<Option<String>>,
}

impl fmt::Debug for AgentkitWrapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AgentkitWrapper")
            .field("config", &self.config)
            .field("backend", &self.backend)
            .finish_non_exhaustive()
    }
}

impl AgentkitWrapper {
    /// Wrapper over the HTTP bridge. A persisted wallet in `config.wallet_data`
    /// is resumed; otherwise the backend creates one on first use.
    pub fn new(config: WalletConfig) -> Result<Self, WalletError> {
        let backend = HttpWalletBackend::new(&config)?;
        Ok(Self::with_backend(config, Arc::new(backend)))
    }

    pub fn with_backend(config: WalletConfig, backend: Arc<dyn WalletBackend>) -> Self {
        if config.wallet_data.is_some() {
            info!("resuming persisted wallet on {}", config.network_id());
        } else {
            info!("no persisted wallet, a new one will be created on {}", config.network_id());
        }
        let wallet_data = Mutex::new(config.wallet_data.clone());
        Self {
            config,
            backend,
            wallet_data,
        }
    }

    pub fn network_id(&self) -> &str {
        self.config.network_id()
    }

    pub fn island_contract(&self) -> Option<&str> {
        self.config.island_contract.as_deref()
    }

    /// Current wallet blob, if the wallet exists yet.
    pub fn wallet_data(&self) -> Option<String> {
        self.wallet_data
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Run a wallet action. If the backend hands back an updated wallet it
    /// replaces the current one, so later actions use the same wallet.
    pub fn run_action(&self, action: &str, args: Value) -> Result<String, WalletError> {
        let mut wallet = self
            .wallet_data
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        debug!("wallet action {action} on {}", self.network_id());

        let outcome = self.backend.invoke(action, &args, wallet.as_deref())?;
        if let Some(updated) = outcome.wallet_data {
            *wallet = Some(updated);
        }
        Ok(outcome.output)
    }

    pub fn export_wallet(&self) -> Result<String, WalletError> {
        let wallet = self.wallet_data();
        self.backend.export_wallet(wallet.as_deref())
    }
}
