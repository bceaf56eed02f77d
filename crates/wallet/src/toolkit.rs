//! The vendor tool set exposed by the AgentKit wrapper.

use std::fmt;
use std::sync::Arc;

use island_derive::ToolInput;
use island_llm::tool::{ToolCallError, ToolInputT, ToolT};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::WalletError;
use crate::wrapper::AgentkitWrapper;

/// Implementation behind a [`CdpTool`]: receives the wrapper, the tool's
/// action name and the model's arguments.
pub type ToolFn = fn(&AgentkitWrapper, &str, Value) -> Result<String, WalletError>;

/// A wallet tool: a name and prompt for the model, an input schema and the
/// function that runs it against the shared wrapper.
pub struct CdpTool {
    name: String,
    description: String,
    args_schema: Value,
    wrapper: Arc<AgentkitWrapper>,
    func: ToolFn,
}

impl CdpTool {
    pub fn new<I: ToolInputT>(
        name: &str,
        description: &str,
        wrapper: Arc<AgentkitWrapper>,
        func: ToolFn,
    ) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            args_schema: serde_json::from_str(I::io_schema())
                .unwrap_or_else(|_| serde_json::json!({"type": "object", "properties": {}})),
            wrapper,
            func,
        }
    }
}

impl fmt::Debug for CdpTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CdpTool").field("name", &self.name).finish()
    }
}

impl ToolT for CdpTool {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn args_schema(&self) -> Value {
        self.args_schema.clone()
    }

    fn run(&self, args: Value) -> Result<Value, ToolCallError> {
        (self.func)(&self.wrapper, &self.name, args)
            .map(Value::String)
            .map_err(|e| ToolCallError::RuntimeError(Box::new(e)))
    }
}

/// Check the arguments against the action's input type, then forward them to
/// the backend under the tool's name.
fn forward<I>(wrapper: &AgentkitWrapper, action: &str, args: Value) -> Result<String, WalletError>
where
    I: DeserializeOwned + Serialize,
{
    let args = if args.is_null() {
        Value::Object(Default::default())
    } else {
        args
    };
    let input: I = serde_json::from_value(args)
        .map_err(|e| WalletError::InvalidInput(format!("{action}: {e}")))?;
    wrapper.run_action(action, serde_json::to_value(input)?)
}

#[derive(Debug, Serialize, Deserialize, ToolInput)]
pub struct GetWalletDetailsInput {}

#[derive(Debug, Serialize, Deserialize, ToolInput)]
pub struct GetBalanceInput {
    #[input(description = "The asset ID to get the balance for, e.g. `eth`, `usdc`, or a contract address")]
    pub asset_id: String,
}

#[derive(Debug, Serialize, Deserialize, ToolInput)]
pub struct RequestFaucetFundsInput {
    #[input(
        description = "The optional asset ID to request from the faucet, `eth` when omitted",
        choice = ["eth", "usdc"]
    )]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToolInput)]
pub struct TransferInput {
    #[input(description = "The amount of the asset to transfer")]
    pub amount: f64,
    #[input(description = "The asset ID to transfer, e.g. `eth`, `usdc`, or a contract address")]
    pub asset_id: String,
    #[input(description = "The destination onchain address, ENS name or Basename")]
    pub destination: String,
    #[input(description = "Whether to send a gasless transfer, only supported for USDC")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gasless: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize, ToolInput)]
pub struct TradeInput {
    #[input(description = "The amount of the from asset to trade")]
    pub amount: f64,
    #[input(description = "The from asset ID to trade")]
    pub from_asset_id: String,
    #[input(description = "The to asset ID to receive from the trade")]
    pub to_asset_id: String,
}

#[derive(Debug, Serialize, Deserialize, ToolInput)]
pub struct DeployTokenInput {
    #[input(description = "The name of the token")]
    pub name: String,
    #[input(description = "The token symbol")]
    pub symbol: String,
    #[input(description = "The total supply of tokens to mint")]
    pub total_supply: f64,
}

#[derive(Debug, Serialize, Deserialize, ToolInput)]
pub struct MintNftInput {
    #[input(description = "The contract address of the NFT collection to mint from")]
    pub contract_address: String,
    #[input(description = "The address that will receive the minted NFT")]
    pub destination: String,
}

#[derive(Debug, Serialize, Deserialize, ToolInput)]
pub struct DeployNftInput {
    #[input(description = "The name of the NFT collection")]
    pub name: String,
    #[input(description = "The symbol of the NFT collection")]
    pub symbol: String,
    #[input(description = "The base URI for the token metadata")]
    pub base_uri: String,
}

#[derive(Debug, Serialize, Deserialize, ToolInput)]
pub struct RegisterBasenameInput {
    #[input(description = "The Basename to register, e.g. `example.base.eth`")]
    pub basename: String,
    #[input(description = "The amount of ETH to pay for the registration, 0.002 when omitted")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
}

const GET_WALLET_DETAILS_PROMPT: &str =
    "This tool will get details about the MPC Wallet: its wallet ID, network and default address.";

const GET_BALANCE_PROMPT: &str = "This tool will get the balance of all the addresses in the \
wallet for a given asset. It takes the asset ID as input.";

const REQUEST_FAUCET_FUNDS_PROMPT: &str = "This tool will request test tokens from the faucet \
for the default address in the wallet. It takes the asset ID as input; if none is given the \
faucet sends ETH. Faucets are only available on test networks.";

const TRANSFER_PROMPT: &str = "This tool will transfer an asset from the wallet to another \
onchain address. It takes the amount, the destination and the asset ID to transfer as inputs. \
Always use gasless transfers for USDC on Base mainnet when available.";

const TRADE_PROMPT: &str = "This tool will trade a specified amount of a from asset to a to \
asset for the wallet. It takes the amount of the from asset to trade, the from asset ID and the \
to asset ID as inputs. Trades are only supported on mainnets.";

const DEPLOY_TOKEN_PROMPT: &str = "This tool will deploy an ERC20 token smart contract. It takes \
the token name, symbol and total supply as inputs. The token is deployed from the wallet's \
default address and the whole supply is minted to it.";

const MINT_NFT_PROMPT: &str = "This tool will mint an NFT from an existing ERC721 collection. It \
takes the contract address of the collection and the destination address as inputs.";

const DEPLOY_NFT_PROMPT: &str = "This tool will deploy an ERC721 NFT collection. It takes the \
collection name, symbol and base URI for token metadata as inputs.";

const REGISTER_BASENAME_PROMPT: &str = "This tool will register a Basename for the wallet's \
default address. Basenames end in `.base.eth` on mainnet and `.basetest.eth` on testnet. It \
takes the Basename and optionally the ETH amount to pay as inputs.";

/// Vendor tools bound to one wallet wrapper.
#[derive(Debug, Clone)]
pub struct CdpToolkit {
    wrapper: Arc<AgentkitWrapper>,
}

impl CdpToolkit {
    pub fn from_cdp_agentkit_wrapper(wrapper: Arc<AgentkitWrapper>) -> Self {
        Self { wrapper }
    }

    pub fn wrapper(&self) -> &Arc<AgentkitWrapper> {
        &self.wrapper
    }

    /// Every vendor tool, in the toolkit's fixed order.
    pub fn get_tools(&self) -> Vec<Arc<dyn ToolT>> {
        let w = || Arc::clone(&self.wrapper);
        vec![
            CdpTool::new::<GetWalletDetailsInput>(
                "get_wallet_details",
                GET_WALLET_DETAILS_PROMPT,
                w(),
                forward::<GetWalletDetailsInput>,
            ),
            CdpTool::new::<GetBalanceInput>(
                "get_balance",
                GET_BALANCE_PROMPT,
                w(),
                forward::<GetBalanceInput>,
            ),
            CdpTool::new::<RequestFaucetFundsInput>(
                "request_faucet_funds",
                REQUEST_FAUCET_FUNDS_PROMPT,
                w(),
                forward::<RequestFaucetFundsInput>,
            ),
            CdpTool::new::<TransferInput>(
                "transfer",
                TRANSFER_PROMPT,
                w(),
                forward::<TransferInput>,
            ),
            CdpTool::new::<TradeInput>(
                "trade",
                TRADE_PROMPT,
                w(),
                forward::<TradeInput>,
            ),
            CdpTool::new::<DeployTokenInput>(
                "deploy_token",
                DEPLOY_TOKEN_PROMPT,
                w(),
                forward::<DeployTokenInput>,
            ),
            CdpTool::new::<MintNftInput>(
                "mint_nft",
                MINT_NFT_PROMPT,
                w(),
                forward::<MintNftInput>,
            ),
            CdpTool::new::<DeployNftInput>(
                "deploy_nft",
                DEPLOY_NFT_PROMPT,
                w(),
                forward::<DeployNftInput>,
            ),
            CdpTool::new::<RegisterBasenameInput>(
                "register_basename",
                REGISTER_BASENAME_PROMPT,
                w(),
                forward::<RegisterBasenameInput>,
            ),
        ]
        .into_iter()
        .map(|tool| Arc::new(tool) as Arc<dyn ToolT>)
        .collect()
    }
}
