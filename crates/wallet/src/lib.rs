//! Wallet toolkit: the AgentKit wrapper around a wallet backend, the vendor
//! tool set it exposes and the two ISLAND token tools.

pub mod backend;
pub mod config;
pub mod error;
pub mod island;
pub mod toolkit;
pub mod wrapper;

pub use backend::{ActionOutcome, HttpWalletBackend, WalletBackend};
pub use config::WalletConfig;
pub use error::WalletError;
pub use island::{
    island_tools, IslandBalanceInput, IslandBalanceTool, TransferIslandInput, TransferIslandTool,
};
pub use toolkit::{CdpTool, CdpToolkit};
pub use wrapper::AgentkitWrapper;
