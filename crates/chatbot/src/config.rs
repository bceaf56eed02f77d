use std::fmt;
use std::path::PathBuf;

use island_wallet::WalletConfig;
use log::{log, Level};

use crate::temperature::TEMPERATURE_ENV;

/// Everything the chatbot reads from the environment, read once at start.
#[derive(Clone, Default)]
pub struct ChatbotConfig {
    pub openai_api_key: Option<String>,
    /// Alternate OpenAI-compatible endpoint.
    pub openai_base_url: Option<String>,
    /// Raw `OPENAI_TEMPERATURE`; validated against the persona's range.
    pub temperature: Option<String>,
    pub wallet: WalletConfig,
}

/// Load `.env` into the process environment. A missing file is `Ok(None)`.
///
/// Runs before the logger exists, so the outcome is handed back for
/// [`report_dotenv`].
pub fn load_dotenv() -> Result<Option<PathBuf>, dotenvy::Error> {
    match dotenvy::dotenv() {
        Ok(path) => Ok(Some(path)),
        Err(e) if e.not_found() => Ok(None),
        Err(e) => Err(e),
    }
}

pub fn report_dotenv(outcome: &Result<Option<PathBuf>, dotenvy::Error>) {
    let (level, message) = describe_dotenv(outcome);
    log!(level, "{message}");
}

fn describe_dotenv(outcome: &Result<Option<PathBuf>, dotenvy::Error>) -> (Level, String) {
    match outcome {
        Ok(Some(path)) => (
            Level::Debug,
            format!("loaded environment from {}", path.display()),
        ),
        Ok(None) => (Level::Debug, "no .env file".to_string()),
        Err(e) => (Level::Warn, format!("ignoring unreadable .env file: {e}")),
    }
}

impl ChatbotConfig {
    /// Read the process environment. Call [`load_dotenv`] first for `.env`
    /// values to be seen.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Empty values count as unset, except the
    /// temperature, which is passed on for validation as-is.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.is_empty());
        Self {
            openai_api_key: get("OPENAI_API_KEY"),
            openai_base_url: get("OPENAI_BASE_URL"),
            temperature: lookup(TEMPERATURE_ENV),
            wallet: WalletConfig {
                api_key_name: get("CDP_API_KEY_NAME"),
                api_key_private_key: get("CDP_API_KEY_PRIVATE_KEY"),
                network_id: get("NETWORK_ID"),
                wallet_data: get("WALLET_INFO"),
                bridge_url: get("CDP_BRIDGE_URL"),
                island_contract: get("ISLAND_CONTRACT_ADDRESS"),
            },
        }
    }
}

impl fmt::Debug for ChatbotConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatbotConfig")
            .field(
                "openai_api_key",
                &self.openai_api_key.as_ref().map(|_| "<redacted>"),
            )
            .field("openai_base_url", &self.openai_base_url)
            .field("temperature", &self.temperature)
            .field("wallet", &self.wallet)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> ChatbotConfig {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ChatbotConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn test_missing_dotenv_is_quiet() {
        let missing = dotenvy::Error::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "no such file",
        ));
        assert!(missing.not_found());

        let (level, message) = describe_dotenv(&Ok(None));
        assert_eq!(level, Level::Debug);
        assert_eq!(message, "no .env file");

        let (level, message) = describe_dotenv(&Ok(Some(PathBuf::from("/app/.env"))));
        assert_eq!(level, Level::Debug);
        assert!(message.ends_with("/app/.env"));
    }

    #[test]
    fn test_unreadable_dotenv_warns() {
        let bad = dotenvy::Error::LineParse("KEY VALUE".to_string(), 3);
        let (level, message) = describe_dotenv(&Err(bad));
        assert_eq!(level, Level::Warn);
        assert!(message.starts_with("ignoring unreadable .env file"));
    }

    #[test]
    fn test_reads_every_variable() {
        let config = config(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("OPENAI_TEMPERATURE", "0.3"),
            ("CDP_API_KEY_NAME", "name"),
            ("CDP_API_KEY_PRIVATE_KEY", "key"),
            ("NETWORK_ID", "base-mainnet"),
            ("WALLET_INFO", r#"{"wallet_id":"w"}"#),
            ("ISLAND_CONTRACT_ADDRESS", "0x4444444444444444444444444444444444444444"),
        ]);

        assert_eq!(config.openai_api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.temperature.as_deref(), Some("0.3"));
        assert_eq!(config.wallet.network_id(), "base-mainnet");
        assert_eq!(config.wallet.wallet_data.as_deref(), Some(r#"{"wallet_id":"w"}"#));
        assert!(config.wallet.island_contract.is_some());
    }

    #[test]
    fn test_empty_values_are_unset_but_temperature_is_kept() {
        let config = config(&[("WALLET_INFO", ""), ("OPENAI_TEMPERATURE", "")]);
        assert!(config.wallet.wallet_data.is_none());
        assert_eq!(config.temperature.as_deref(), Some(""));
    }

    #[test]
    fn test_debug_hides_api_key() {
        let config = config(&[("OPENAI_API_KEY", "sk-very-secret")]);
        assert!(!format!("{config:?}").contains("sk-very-secret"));
    }
}
