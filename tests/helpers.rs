//! Shared test constants and configuration builders
//!
//! Used by the integration tests via `#[path = "helpers.rs"]` includes.

use std::sync::Arc;

use bridge_client::{
    BridgeConfiguration, BridgeInstance, Environment, EvmClient, ProviderSide,
};

#[allow(dead_code)]
pub const DUMMY_SENDER: &str = "0x1111111111111111111111111111111111111111";
#[allow(dead_code)]
pub const DUMMY_RECIPIENT: &str = "0x2222222222222222222222222222222222222222";
#[allow(dead_code)]
pub const DUMMY_TOKEN: &str = "0x3333333333333333333333333333333333333333";
#[allow(dead_code)]
pub const DUMMY_TX_HASH: &str =
    "0x9a4caa9e9e69b9b5e7bba85b5dbcedfdbaa2bb6dbeef00f4f4e8c8a9b2e1c0d3";
/// Wrapped ETH on the sandbox child chain; the one withdrawal asset that
/// arrives at the root chain as native currency.
#[allow(dead_code)]
pub const TESTNET_CHILD_WETH: &str = "0xe9e96d1aad82562b7588f03f49ad34186f996478";
/// An endpoint no test should ever reach.
#[allow(dead_code)]
pub const UNUSED_RPC_URL: &str = "http://127.0.0.1:1";

#[allow(dead_code)]
pub fn build_provider(rpc_url: &str, side: ProviderSide) -> Arc<EvmClient> {
    Arc::new(EvmClient::new(rpc_url, side).expect("Failed to create provider"))
}

/// Builds a sandbox configuration over the given provider endpoints.
#[allow(dead_code)]
pub fn build_test_config(root_rpc_url: &str, child_rpc_url: &str) -> BridgeConfiguration {
    BridgeConfiguration::new(
        BridgeInstance::testnet(),
        build_provider(root_rpc_url, ProviderSide::Root),
        build_provider(child_rpc_url, ProviderSide::Child),
        Environment::Sandbox,
        None,
    )
    .expect("Failed to create configuration")
}
