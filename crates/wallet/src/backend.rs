use std::fmt;
use std::time::Duration;

use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::WalletConfig;
use crate::error::WalletError;

const REQUEST_TIMEOUT_SECS: u64 = 120;

/// Result of one wallet action.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionOutcome {
    /// Human-readable result handed back to the model.
    pub output: String,
    /// Wallet blob after the action, when the backend created or changed it.
    pub wallet_data: Option<String>,
}

/// The wallet service behind the toolkit. Implementations are blocking; the
/// agent runs tools on a blocking thread.
pub trait WalletBackend: Send + Sync + fmt::Debug {
    /// Run a named wallet action with JSON arguments against the wallet
    /// described by `wallet_data`, or a fresh one when it is `None`.
    fn invoke(
        &self,
        action: &str,
        args: &Value,
        wallet_data: Option<&str>,
    ) -> Result<ActionOutcome, WalletError>;

    /// Serialised wallet that can be passed back as `wallet_data` later.
    fn export_wallet(&self, wallet_data: Option<&str>) -> Result<String, WalletError>;
}

#[derive(Serialize)]
struct BridgeRequest<'a> {
    network_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    wallet_data: Option<&'a str>,
    args: &'a Value,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct BridgeReply {
    output: Option<String>,
    wallet_data: Option<String>,
    error: Option<String>,
}

/// Talks to an AgentKit bridge over HTTP: `POST {bridge}/actions/{action}` and
/// `POST {bridge}/wallet/export`. Credentials travel as headers.
pub struct HttpWalletBackend {
    base_url: String,
    network_id: String,
    api_key_name: String,
    api_key_private_key: String,
    agent: ureq::Agent,
}

impl fmt::Debug for HttpWalletBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpWalletBackend")
            .field("base_url", &self.base_url)
            .field("network_id", &self.network_id)
            .finish()
    }
}

impl HttpWalletBackend {
    pub fn new(config: &WalletConfig) -> Result<Self, WalletError> {
        let api_key_name = config
            .api_key_name
            .clone()
            .ok_or(WalletError::MissingCredentials("CDP_API_KEY_NAME"))?;
        let api_key_private_key = config
            .api_key_private_key
            .clone()
            .ok_or(WalletError::MissingCredentials("CDP_API_KEY_PRIVATE_KEY"))?;

        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(REQUEST_TIMEOUT_SECS)))
            .http_status_as_error(false)
            .build()
            .into();

        Ok(Self {
            base_url: config.bridge_url().trim_end_matches('/').to_string(),
            network_id: config.network_id().to_string(),
            api_key_name,
            api_key_private_key,
            agent,
        })
    }

    fn post(&self, path: &str, body: &BridgeRequest<'_>) -> Result<BridgeReply, WalletError> {
        let url = format!("{}/{path}", self.base_url);
        debug!("wallet bridge POST {url}");

        let mut response = self
            .agent
            .post(&url)
            .header("X-CDP-Api-Key-Name", &self.api_key_name)
            .header("X-CDP-Api-Key-Private-Key", &self.api_key_private_key)
            .send_json(body)?;

        let status = response.status();
        let raw = response.body_mut().read_to_string()?;
        let reply: BridgeReply = serde_json::from_str(&raw)
            .map_err(|e| WalletError::Response(format!("{e}: {raw}")))?;

        if !status.is_success() || reply.error.is_some() {
            return Err(WalletError::Backend {
                status: status.as_u16(),
                message: reply.error.unwrap_or(raw),
            });
        }
        Ok(reply)
    }
}

impl WalletBackend for HttpWalletBackend {
    fn invoke(
        &self,
        action: &str,
        args: &Value,
        wallet_data: Option<&str>,
    ) -> Result<ActionOutcome, WalletError> {
        let reply = self.post(
            &format!("actions/{action}"),
            &BridgeRequest {
                network_id: &self.network_id,
                wallet_data,
                args,
            },
        )?;
        Ok(ActionOutcome {
            output: reply.output.unwrap_or_default(),
            wallet_data: reply.wallet_data,
        })
    }

    fn export_wallet(&self, wallet_data: Option<&str>) -> Result<String, WalletError> {
        let reply = self.post(
            "wallet/export",
            &BridgeRequest {
                network_id: &self.network_id,
                wallet_data,
                args: &Value::Null,
            },
        )?;
        reply
            .wallet_data
            .ok_or_else(|| WalletError::Response("export returned no wallet_data".to_string()))
    }
}
