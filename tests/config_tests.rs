//! Unit tests for bridge configuration resolution
//!
//! These tests verify supported-instance membership, contract registration
//! and the override escape hatch without requiring external services.

use bridge_client::{
    BridgeConfiguration, BridgeContracts, BridgeError, BridgeInstance, Environment, ProviderSide,
};

#[path = "helpers.rs"]
mod helpers;
use helpers::{build_provider, UNUSED_RPC_URL};

fn providers() -> (
    std::sync::Arc<bridge_client::EvmClient>,
    std::sync::Arc<bridge_client::EvmClient>,
) {
    (
        build_provider(UNUSED_RPC_URL, ProviderSide::Root),
        build_provider(UNUSED_RPC_URL, ProviderSide::Child),
    )
}

/// 1. Test: Supported Instance Resolution
/// Verifies that the sandbox and production instances resolve their
/// registered contract sets.
/// Why: Construction is the only place contract addresses are resolved.
#[test]
fn test_supported_instances_resolve() {
    let (root, child) = providers();
    let config = BridgeConfiguration::new(
        BridgeInstance::testnet(),
        root,
        child,
        Environment::Sandbox,
        None,
    )
    .expect("Failed to resolve sandbox instance");
    assert_eq!(config.instance(), &BridgeInstance::testnet());
    assert_eq!(config.environment(), Environment::Sandbox);

    let (root, child) = providers();
    BridgeConfiguration::new(
        BridgeInstance::mainnet(),
        root,
        child,
        Environment::Production,
        None,
    )
    .expect("Failed to resolve production instance");
}

/// 2. Test: Unsupported Pair Fails
/// Verifies that a (root, child) pair outside the environment's table fails
/// with an unsupported-configuration error naming the pair and environment.
/// Why: An unsupported pair must never silently adopt contracts.
#[test]
fn test_unsupported_pair_fails() {
    let (root, child) = providers();
    let result = BridgeConfiguration::new(
        BridgeInstance::new("eip155:5", "eip155:13473"),
        root,
        child,
        Environment::Sandbox,
        None,
    );
    match result {
        Err(BridgeError::UnsupportedConfiguration(message)) => {
            assert!(message.contains("eip155:5"), "message should name the pair: {}", message);
            assert!(message.contains("sandbox"), "message should name the environment: {}", message);
        }
        other => panic!("Expected UnsupportedConfiguration, got {:?}", other.map(|_| ())),
    }
}

/// 3. Test: Cross-Environment Pair Fails
/// Verifies that the production instance is rejected in the sandbox
/// environment.
/// Why: Contract tables are strictly per environment.
#[test]
fn test_cross_environment_pair_fails() {
    let (root, child) = providers();
    let result = BridgeConfiguration::new(
        BridgeInstance::mainnet(),
        root,
        child,
        Environment::Sandbox,
        None,
    );
    assert!(matches!(result, Err(BridgeError::UnsupportedConfiguration(_))));
}

/// 4. Test: Freshly Constructed Instance Resolves
/// Verifies that a caller-built instance equal in value to an exported one
/// resolves identically.
/// Why: Instance identity is structural, not reference-based.
#[test]
fn test_fresh_instance_value_equality() {
    let (root, child) = providers();
    let fresh = BridgeInstance::new("eip155:11155111", "eip155:13473");
    let config =
        BridgeConfiguration::new(fresh, root, child, Environment::Sandbox, None)
            .expect("Failed to resolve caller-built instance");
    assert_eq!(config.instance().key(), BridgeInstance::testnet().key());
}

/// 5. Test: Overrides Skip The Supported Table
/// Verifies that caller-supplied contracts are adopted verbatim for a pair
/// the table does not know.
/// Why: The override is the explicit escape hatch for non-standard
/// deployments; the caller takes responsibility for correctness.
#[test]
fn test_overrides_bypass_supported_table() {
    let overrides = BridgeContracts {
        root_erc20_bridge_flow_rate: "0x4444444444444444444444444444444444444444"
            .parse()
            .unwrap(),
        root_bridge_adaptor: "0x5555555555555555555555555555555555555555".parse().unwrap(),
        child_erc20_bridge: "0x6666666666666666666666666666666666666666".parse().unwrap(),
        child_bridge_adaptor: "0x7777777777777777777777777777777777777777".parse().unwrap(),
    };
    let (root, child) = providers();
    let config = BridgeConfiguration::new(
        BridgeInstance::new("eip155:11155111", "eip155:15003"),
        root,
        child,
        Environment::Sandbox,
        Some(overrides),
    )
    .expect("Failed to adopt contract overrides");
    assert_eq!(config.contracts(), &overrides);
}
