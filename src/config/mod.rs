//! Bridge configuration and instance resolution
//!
//! A [`BridgeConfiguration`] pins down everything a bridge session needs:
//! the (root, child) chain pair, the deployed contract set backing that
//! pair in the active environment, and read providers for both sides. It is
//! built once at client start-up, performs no network calls during
//! construction, and is never mutated afterwards, so it is safe to share
//! across concurrent requests.

use alloy_primitives::{address, Address};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use crate::constants::{ETHEREUM_MAINNET, ETHEREUM_SEPOLIA, ZKEVM_MAINNET, ZKEVM_TESTNET};
use crate::error::{BridgeError, BridgeResult};
use crate::evm_client::EvmClient;

// ============================================================================
// ENVIRONMENT
// ============================================================================

/// Base environment the client operates in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    /// Testnet deployments
    Sandbox,
    /// Mainnet deployments
    Production,
}

impl std::str::FromStr for Environment {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_lowercase().as_str() {
            "sandbox" => Ok(Environment::Sandbox),
            "production" => Ok(Environment::Production),
            _ => Err(anyhow::anyhow!(
                "Invalid environment: {}. Must be 'sandbox' or 'production'",
                s
            )),
        }
    }
}

impl Environment {
    /// Default relayer status API base URL for this environment.
    pub fn relayer_api_url(&self) -> &'static str {
        match self {
            Environment::Sandbox => crate::constants::RELAYER_API_TESTNET,
            Environment::Production => crate::constants::RELAYER_API_MAINNET,
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Sandbox => write!(f, "sandbox"),
            Environment::Production => write!(f, "production"),
        }
    }
}

// ============================================================================
// BRIDGE INSTANCE AND CONTRACTS
// ============================================================================

/// A root/child chain pair identifying one bridge deployment.
///
/// Identity is structural: two instances with equal chain-id fields are the
/// same instance, regardless of how they were constructed. Table lookups go
/// through [`BridgeInstance::key`] so a caller-built value resolves exactly
/// like the exported constants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeInstance {
    /// Root chain identifier, `eip155:<n>` form
    pub root_chain_id: String,
    /// Child chain identifier, `eip155:<n>` form
    pub child_chain_id: String,
}

impl BridgeInstance {
    pub fn new(root_chain_id: impl Into<String>, child_chain_id: impl Into<String>) -> Self {
        Self {
            root_chain_id: root_chain_id.into(),
            child_chain_id: child_chain_id.into(),
        }
    }

    /// The production instance: Ethereum mainnet to zkEVM mainnet.
    pub fn mainnet() -> Self {
        Self::new(ETHEREUM_MAINNET, ZKEVM_MAINNET)
    }

    /// The sandbox instance: Sepolia to zkEVM testnet.
    pub fn testnet() -> Self {
        Self::new(ETHEREUM_SEPOLIA, ZKEVM_TESTNET)
    }

    /// Derived lookup key, `"<root>:<child>"`.
    pub fn key(&self) -> String {
        format!("{}:{}", self.root_chain_id, self.child_chain_id)
    }
}

/// The deployed contract set backing one bridge instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeContracts {
    /// Flow-rate bridge on the root chain
    pub root_erc20_bridge_flow_rate: Address,
    /// Message adaptor paired with the root bridge
    pub root_bridge_adaptor: Address,
    /// Bridge on the child chain
    pub child_erc20_bridge: Address,
    /// Message adaptor paired with the child bridge
    pub child_bridge_adaptor: Address,
}

const MAINNET_CONTRACTS: BridgeContracts = BridgeContracts {
    root_erc20_bridge_flow_rate: address!("ba5e35e26ae59c7aea6f029b68c6460de2d13eb6"),
    root_bridge_adaptor: address!("4f49b53928a71e553bb1b0f66a5bcb54fd4e8932"),
    child_erc20_bridge: address!("bafa44efe7901e04e39dad13167d089c559c1138"),
    child_bridge_adaptor: address!("6328ac88ba8d466a0f551fc7c42c61d1ac7f92ab"),
};

const TESTNET_CONTRACTS: BridgeContracts = BridgeContracts {
    root_erc20_bridge_flow_rate: address!("0d3c59c779fd552c27b23f723e80246c840100f5"),
    root_bridge_adaptor: address!("6b62b3338bd66c55be6c87b7c1e36cbd08b32d5a"),
    child_erc20_bridge: address!("3fa0d8db66df5f0d0f4acd5ad52b358abb4346bd"),
    child_bridge_adaptor: address!("ac18f37c5d2a4e6b8c0d1e2f3a4b5c6d7e8f9a0b"),
};

/// Bridge instances supported without contract overrides in `environment`.
pub fn supported_instances(environment: Environment) -> Vec<BridgeInstance> {
    match environment {
        Environment::Production => vec![BridgeInstance::mainnet()],
        Environment::Sandbox => vec![BridgeInstance::testnet()],
    }
}

/// Contract set registered for `instance` in `environment`, if any.
pub fn registered_contracts(
    environment: Environment,
    instance: &BridgeInstance,
) -> Option<BridgeContracts> {
    let key = instance.key();
    match environment {
        Environment::Production if key == BridgeInstance::mainnet().key() => {
            Some(MAINNET_CONTRACTS)
        }
        Environment::Sandbox if key == BridgeInstance::testnet().key() => Some(TESTNET_CONTRACTS),
        _ => None,
    }
}

// ============================================================================
// BRIDGE CONFIGURATION
// ============================================================================

/// Resolved bridge configuration, immutable once constructed.
#[derive(Debug, Clone)]
pub struct BridgeConfiguration {
    instance: BridgeInstance,
    contracts: BridgeContracts,
    environment: Environment,
    root_provider: Arc<EvmClient>,
    child_provider: Arc<EvmClient>,
}

impl BridgeConfiguration {
    /// Resolves a configuration for `instance` in `environment`.
    ///
    /// With `contract_overrides` the supported-instance table is skipped
    /// entirely and the caller takes responsibility for the contract set;
    /// this is the escape hatch for non-standard deployments. Without
    /// overrides, membership in the environment's supported-instance table
    /// is checked by value, and the registered contract set is adopted.
    ///
    /// No network calls are made here; use
    /// [`crate::validator::validate_chain_configuration`] to confirm the
    /// providers actually serve the configured chains.
    pub fn new(
        instance: BridgeInstance,
        root_provider: Arc<EvmClient>,
        child_provider: Arc<EvmClient>,
        environment: Environment,
        contract_overrides: Option<BridgeContracts>,
    ) -> BridgeResult<Self> {
        let contracts = match contract_overrides {
            Some(overrides) => {
                info!(
                    "using caller-supplied contract overrides for {}",
                    instance.key()
                );
                overrides
            }
            None => {
                let supported = supported_instances(environment)
                    .iter()
                    .any(|candidate| candidate.key() == instance.key());
                if !supported {
                    return Err(BridgeError::UnsupportedConfiguration(format!(
                        "bridge instance {} / {} is not supported in the {} environment",
                        instance.root_chain_id, instance.child_chain_id, environment
                    )));
                }
                registered_contracts(environment, &instance).ok_or_else(|| {
                    BridgeError::UnsupportedConfiguration(format!(
                        "no contracts registered for bridge instance {} / {} in the {} environment",
                        instance.root_chain_id, instance.child_chain_id, environment
                    ))
                })?
            }
        };

        Ok(Self {
            instance,
            contracts,
            environment,
            root_provider,
            child_provider,
        })
    }

    pub fn instance(&self) -> &BridgeInstance {
        &self.instance
    }

    pub fn contracts(&self) -> &BridgeContracts {
        &self.contracts
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    pub fn root_provider(&self) -> &Arc<EvmClient> {
        &self.root_provider
    }

    pub fn child_provider(&self) -> &Arc<EvmClient> {
        &self.child_provider
    }

    pub fn root_chain_id(&self) -> &str {
        &self.instance.root_chain_id
    }

    pub fn child_chain_id(&self) -> &str {
        &self.instance.child_chain_id
    }

    pub fn is_root_chain(&self, chain_id: &str) -> bool {
        chain_id == self.instance.root_chain_id
    }

    pub fn is_child_chain(&self, chain_id: &str) -> bool {
        chain_id == self.instance.child_chain_id
    }

    /// Provider serving `chain_id`, if it belongs to this instance.
    pub fn provider_for(&self, chain_id: &str) -> Option<&Arc<EvmClient>> {
        if self.is_root_chain(chain_id) {
            Some(&self.root_provider)
        } else if self.is_child_chain(chain_id) {
            Some(&self.child_provider)
        } else {
            None
        }
    }
}

/// Extracts the numeric part of an `eip155:<n>` chain identifier.
pub fn eip155_numeric(chain_id: &str) -> BridgeResult<u64> {
    chain_id
        .strip_prefix("eip155:")
        .and_then(|digits| digits.parse::<u64>().ok())
        .ok_or_else(|| {
            BridgeError::UnsupportedConfiguration(format!(
                "chain id '{}' is not in eip155:<n> form",
                chain_id
            ))
        })
}

// ============================================================================
// ENDPOINT CONFIGURATION FILE
// ============================================================================

/// Provider and API endpoints, loadable from `bridge-client.toml`.
///
/// The file is optional plumbing for deployments that do not wire endpoints
/// programmatically. Environment defaults cover the relayer API; RPC
/// endpoints have no defaults and must always be supplied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderEndpoints {
    /// Root chain JSON-RPC endpoint
    pub root_rpc_url: String,
    /// Child chain JSON-RPC endpoint
    pub child_rpc_url: String,
    /// Relayer status API base URL
    #[serde(default)]
    pub relayer_api_url: Option<String>,
    /// Simulation gateway override; unset means per-chain-id selection
    #[serde(default)]
    pub simulation_endpoint: Option<String>,
}

impl ProviderEndpoints {
    /// Loads endpoints from the TOML file.
    ///
    /// The path defaults to `config/bridge-client.toml` and can be
    /// overridden with `BRIDGE_CLIENT_CONFIG_PATH` (used by tests).
    pub fn load() -> anyhow::Result<Self> {
        let config_path = std::env::var("BRIDGE_CLIENT_CONFIG_PATH")
            .unwrap_or_else(|_| "config/bridge-client.toml".to_string());

        if std::path::Path::new(&config_path).exists() {
            let content = std::fs::read_to_string(&config_path)?;
            Self::from_toml_str(&content)
        } else {
            Err(anyhow::anyhow!(
                "Configuration file '{}' not found. Please copy the template:\n\
                cp config/bridge-client.template.toml config/bridge-client.toml\n\
                Then edit config/bridge-client.toml with your endpoint URLs.",
                config_path
            ))
        }
    }

    /// Parses endpoints from TOML content and validates the URLs.
    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        let endpoints: ProviderEndpoints = toml::from_str(content)?;
        endpoints.validate()?;
        Ok(endpoints)
    }

    /// Validates that every configured endpoint is an HTTP(S) URL.
    pub fn validate(&self) -> anyhow::Result<()> {
        let urls = [
            Some(&self.root_rpc_url),
            Some(&self.child_rpc_url),
            self.relayer_api_url.as_ref(),
            self.simulation_endpoint.as_ref(),
        ];
        for url in urls.into_iter().flatten() {
            if !url.starts_with("http") {
                return Err(anyhow::anyhow!("Invalid endpoint URL: {}", url));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instance_key_is_structural() {
        let built = BridgeInstance::new(ETHEREUM_MAINNET, ZKEVM_MAINNET);
        assert_eq!(built.key(), BridgeInstance::mainnet().key());
        assert_eq!(built, BridgeInstance::mainnet());
    }

    #[test]
    fn relayer_api_defaults_follow_the_environment() {
        assert!(Environment::Sandbox.relayer_api_url().contains("testnet"));
        assert!(!Environment::Production.relayer_api_url().contains("testnet"));
        assert!("production".parse::<Environment>().unwrap() == Environment::Production);
        assert!("nope".parse::<Environment>().is_err());
    }

    #[test]
    fn eip155_parsing() {
        assert_eq!(eip155_numeric("eip155:1").unwrap(), 1);
        assert_eq!(eip155_numeric("eip155:13473").unwrap(), 13473);
        assert!(eip155_numeric("13473").is_err());
        assert!(eip155_numeric("eip155:").is_err());
    }

    #[test]
    fn contracts_are_registered_per_environment() {
        assert!(registered_contracts(Environment::Production, &BridgeInstance::mainnet()).is_some());
        assert!(registered_contracts(Environment::Sandbox, &BridgeInstance::mainnet()).is_none());
        assert!(registered_contracts(Environment::Sandbox, &BridgeInstance::testnet()).is_some());
    }

    #[test]
    fn endpoint_file_parses_and_validates() {
        let endpoints = ProviderEndpoints::from_toml_str(
            r#"
            root_rpc_url = "https://eth.example.com"
            child_rpc_url = "https://zkevm.example.com"
            relayer_api_url = "https://relayer.example.com/gmp"
            "#,
        )
        .expect("Failed to parse endpoint file");
        assert_eq!(endpoints.root_rpc_url, "https://eth.example.com");
        assert!(endpoints.simulation_endpoint.is_none());

        let invalid = ProviderEndpoints::from_toml_str(
            r#"
            root_rpc_url = "ftp://eth.example.com"
            child_rpc_url = "https://zkevm.example.com"
            "#,
        );
        assert!(invalid.is_err());
    }
}
