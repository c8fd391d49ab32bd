//! Token Bridge Client Library
//!
//! This crate prepares and interprets token-bridge operations between a root
//! chain and a child chain: it resolves which deployed contracts back a
//! (root, child) pair, validates every bridge request before any calldata
//! exists, builds exact contract calldata for deposits and withdrawals,
//! interprets cross-chain message status from the relayer network, and
//! batches gas-estimation simulations.
//!
//! The crate never signs transactions and holds no key material; it only
//! prepares and interprets. There are no internal retries and no background
//! tasks: every operation is a single-shot asynchronous call, and a failed
//! external call surfaces immediately as a typed [`error::BridgeError`].

pub mod calldata;
pub mod config;
pub mod constants;
pub mod error;
pub mod evm_client;
pub mod gas;
pub mod gmp;
pub mod types;
pub mod validator;

// Re-export commonly used types
pub use calldata::{bridge_tx_calldata, withdraw_root_token, BridgeMethodSet};
pub use config::{
    BridgeConfiguration, BridgeContracts, BridgeInstance, Environment, ProviderEndpoints,
};
pub use error::{BridgeError, BridgeResult, ProviderSide};
pub use evm_client::{EvmClient, TransactionRequest};
pub use gas::{submit_tenderly_simulations, TenderlyClient, TenderlySimulation};
pub use gmp::{GmpApiClient, GmpError, GmpStatus, GmpStatusResponse};
pub use types::{BridgeBundledTxRequest, BridgeFeeAction, BridgeFeeRequest, FungibleToken};
