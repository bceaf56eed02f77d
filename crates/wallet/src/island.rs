//! ISLAND ERC-20 tools: send ISLAND and read an address's ISLAND balance.

use std::sync::{Arc, LazyLock};

use island_derive::{tool, ToolInput};
use island_llm::tool::{ToolCallError, ToolRuntime, ToolT};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::WalletError;
use crate::wrapper::AgentkitWrapper;

pub const TRANSFER_ISLAND_PROMPT: &str = "This tool transfers ISLAND tokens from the wallet to \
another onchain address. It takes the amount of ISLAND to send, in whole tokens, and the \
destination address as inputs. Use it whenever the user asks to send, tip or pay someone in \
ISLAND. The destination must be a 0x-prefixed address; ask the user for one if they gave a name.";

pub const ISLAND_BALANCE_PROMPT: &str = "This tool returns the ISLAND token balance of an onchain \
address. It takes the address to check as input. Use it when the user asks how much ISLAND a \
wallet holds; pass the wallet's own default address to check your own balance.";

static ADDRESS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^0x[0-9a-fA-F]{40}$").expect("address pattern is valid")
});

#[derive(Debug, Serialize, Deserialize, ToolInput)]
pub struct TransferIslandInput {
    #[input(description = "Amount of ISLAND to send, in whole tokens")]
    pub amount: f64,
    #[input(description = "Destination address, 0x followed by 40 hex characters")]
    pub destination: String,
}

#[derive(Debug, Serialize, Deserialize, ToolInput)]
pub struct IslandBalanceInput {
    #[input(description = "Address whose ISLAND balance to read")]
    pub address: String,
}

fn validate_address(address: &str) -> Result<(), WalletError> {
    if ADDRESS.is_match(address) {
        Ok(())
    } else {
        Err(WalletError::InvalidInput(format!(
            "{address:?} is not a valid address"
        )))
    }
}

/// Send ISLAND through the wallet's ERC-20 transfer.
pub fn transfer_island(
    wrapper: &AgentkitWrapper,
    input: TransferIslandInput,
) -> Result<String, WalletError> {
    let contract = wrapper.island_contract().ok_or(WalletError::MissingContract)?;
    validate_address(&input.destination)?;
    if !input.amount.is_finite() || input.amount <= 0.0 {
        return Err(WalletError::InvalidInput(format!(
            "amount must be a positive number, got {}",
            input.amount
        )));
    }

    let output = wrapper.run_action(
        "transfer",
        json!({
            "amount": input.amount,
            "asset_id": contract,
            "destination": input.destination,
        }),
    )?;
    Ok(format!(
        "Transferred {} ISLAND to {}.\n{output}",
        input.amount, input.destination
    ))
}

/// Read `balanceOf(address)` on the ISLAND contract.
pub fn island_balance(
    wrapper: &AgentkitWrapper,
    input: IslandBalanceInput,
) -> Result<String, WalletError> {
    let contract = wrapper.island_contract().ok_or(WalletError::MissingContract)?;
    validate_address(&input.address)?;

    let balance = wrapper.run_action(
        "read_contract",
        json!({
            "contract_address": contract,
            "method": "balanceOf",
            "args": {"account": input.address},
        }),
    )?;
    Ok(format!("ISLAND balance of {}: {balance}", input.address))
}

fn tool_error(err: WalletError) -> ToolCallError {
    ToolCallError::RuntimeError(Box::new(err))
}

#[tool(
    name = "transfer_island",
    description = TRANSFER_ISLAND_PROMPT,
    input = TransferIslandInput,
)]
pub struct TransferIslandTool {
    wrapper: Arc<AgentkitWrapper>,
}

impl TransferIslandTool {
    pub fn new(wrapper: Arc<AgentkitWrapper>) -> Self {
        Self { wrapper }
    }
}

impl ToolRuntime for TransferIslandTool {
    fn execute(&self, args: Value) -> Result<Value, ToolCallError> {
        let input: TransferIslandInput = serde_json::from_value(args)?;
        transfer_island(&self.wrapper, input)
            .map(Value::String)
            .map_err(tool_error)
    }
}

#[tool(
    name = "island_balance",
    description = ISLAND_BALANCE_PROMPT,
    input = IslandBalanceInput,
)]
pub struct IslandBalanceTool {
    wrapper: Arc<AgentkitWrapper>,
}

impl IslandBalanceTool {
    pub fn new(wrapper: Arc<AgentkitWrapper>) -> Self {
        Self { wrapper }
    }
}

impl ToolRuntime for IslandBalanceTool {
    fn execute(&self, args: Value) -> Result<Value, ToolCallError> {
        let input: IslandBalanceInput = serde_json::from_value(args)?;
        island_balance(&self.wrapper, input)
            .map(Value::String)
            .map_err(tool_error)
    }
}

/// The two custom tools, transfer first.
pub fn island_tools(wrapper: &Arc<AgentkitWrapper>) -> Vec<Arc<dyn ToolT>> {
    vec![
        Arc::new(TransferIslandTool::new(Arc::clone(wrapper))) as Arc<dyn ToolT>,
        Arc::new(IslandBalanceTool::new(Arc::clone(wrapper))),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{ActionOutcome, WalletBackend};
    use crate::config::WalletConfig;
    use std::sync::Mutex;

    const CONTRACT: &str = "0x1111111111111111111111111111111111111111";
    const FRIEND: &str = "0xAbCdEf0123456789abcdef0123456789ABCDEF01";

    #[derive(Debug, Default)]
    struct Recorder {
        calls: Mutex<Vec<(String, Value)>>,
    }

    impl WalletBackend for Recorder {
        fn invoke(
            &self,
            action: &str,
            args: &Value,
            _wallet_data: Option<&str>,
        ) -> Result<ActionOutcome, WalletError> {
            self.calls
                .lock()
                .unwrap()
                .push((action.to_string(), args.clone()));
            Ok(ActionOutcome {
                output: "42".to_string(),
                wallet_data: None,
            })
        }

        fn export_wallet(&self, _wallet_data: Option<&str>) -> Result<String, WalletError> {
            Ok("{}".to_string())
        }
    }

    fn wrapper(contract: Option<&str>) -> (Arc<AgentkitWrapper>, Arc<Recorder>) {
        let backend = Arc::new(Recorder::default());
        let config = WalletConfig {
            island_contract: contract.map(str::to_string),
            ..Default::default()
        };
        (
            Arc::new(AgentkitWrapper::with_backend(config, backend.clone())),
            backend,
        )
    }

    #[test]
    fn test_tool_metadata() {
        let (wrapper, _) = wrapper(Some(CONTRACT));
        let tools = island_tools(&wrapper);
        assert_eq!(tools[0].name(), "transfer_island");
        assert_eq!(tools[0].description(), TRANSFER_ISLAND_PROMPT);
        assert_eq!(tools[1].name(), "island_balance");

        let schema = tools[0].args_schema();
        assert_eq!(schema["properties"]["amount"]["type"], "number");
        assert_eq!(schema["required"], json!(["amount", "destination"]));
        assert_eq!(format!("{:?}", tools[1]), "island_balance");
    }

    #[test]
    fn test_transfer_island_calls_erc20_transfer() {
        let (wrapper, backend) = wrapper(Some(CONTRACT));
        let out = TransferIslandTool::new(wrapper)
            .run(json!({"amount": 12.5, "destination": FRIEND}))
            .unwrap();

        assert!(out.as_str().unwrap().starts_with("Transferred 12.5 ISLAND"));
        let calls = backend.calls.lock().unwrap();
        assert_eq!(calls[0].0, "transfer");
        assert_eq!(calls[0].1["asset_id"], CONTRACT);
        assert_eq!(calls[0].1["destination"], FRIEND);
    }

    #[test]
    fn test_island_balance_reads_contract() {
        let (wrapper, backend) = wrapper(Some(CONTRACT));
        let out = IslandBalanceTool::new(wrapper)
            .run(json!({"address": FRIEND}))
            .unwrap();

        assert_eq!(out, json!(format!("ISLAND balance of {FRIEND}: 42")));
        let calls = backend.calls.lock().unwrap();
        assert_eq!(calls[0].0, "read_contract");
        assert_eq!(calls[0].1["method"], "balanceOf");
    }

    #[test]
    fn test_missing_contract_is_a_tool_error() {
        let (wrapper, backend) = wrapper(None);
        let err = IslandBalanceTool::new(wrapper)
            .run(json!({"address": FRIEND}))
            .unwrap_err();
        assert!(err.to_string().contains("ISLAND_CONTRACT_ADDRESS"));
        assert!(backend.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_rejects_bad_destination_and_amount() {
        let (wrapper, backend) = wrapper(Some(CONTRACT));
        let tool = TransferIslandTool::new(wrapper);

        assert!(tool
            .run(json!({"amount": 1.0, "destination": "vitalik.eth"}))
            .is_err());
        assert!(tool
            .run(json!({"amount": 1.0, "destination": "0x1234"}))
            .is_err());
        assert!(tool
            .run(json!({"amount": -3.0, "destination": FRIEND}))
            .is_err());
        assert!(matches!(
            tool.run(json!({"destination": FRIEND})),
            Err(ToolCallError::SerdeError(_))
        ));
        assert!(backend.calls.lock().unwrap().is_empty());
    }
}
