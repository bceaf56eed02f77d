use std::collections::HashMap;
use std::sync::Mutex;

use island_wallet::{ActionOutcome, WalletBackend, WalletError};
use serde_json::Value;

/// Wallet backend that never leaves the process. Every action succeeds with a
/// canned output (`"<action> ok"` unless one was set) and is recorded.
#[derive(Debug, Default)]
pub struct MemoryWalletBackend {
    outputs: HashMap<String, String>,
    failures: HashMap<String, String>,
    calls: Mutex<Vec<RecordedAction>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedAction {
    pub action: String,
    pub args: Value,
    pub wallet_data: Option<String>,
}

pub const CREATED_WALLET: &str = r#"{"wallet_id":"memory-wallet","seed":"00"}"#;

impl MemoryWalletBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_output(mut self, action: &str, output: &str) -> Self {
        self.outputs.insert(action.to_string(), output.to_string());
        self
    }

    pub fn with_failure(mut self, action: &str, message: &str) -> Self {
        self.failures.insert(action.to_string(), message.to_string());
        self
    }

    pub fn calls(&self) -> Vec<RecordedAction> {
        self.calls.lock().unwrap().clone()
    }
}

impl WalletBackend for MemoryWalletBackend {
    fn invoke(
        &self,
        action: &str,
        args: &Value,
        wallet_data: Option<&str>,
    ) -> Result<ActionOutcome, WalletError> {
        self.calls.lock().unwrap().push(RecordedAction {
            action: action.to_string(),
            args: args.clone(),
            wallet_data: wallet_data.map(str::to_string),
        });

        if let Some(message) = self.failures.get(action) {
            return Err(WalletError::Backend {
                status: 500,
                message: message.clone(),
            });
        }

        Ok(ActionOutcome {
            output: self
                .outputs
                .get(action)
                .cloned()
                .unwrap_or_else(|| format!("{action} ok")),
            wallet_data: wallet_data
                .is_none()
                .then(|| CREATED_WALLET.to_string()),
        })
    }

    fn export_wallet(&self, wallet_data: Option<&str>) -> Result<String, WalletError> {
        Ok(wallet_data.unwrap_or(CREATED_WALLET).to_string())
    }
}
