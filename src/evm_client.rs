//! Minimal EVM JSON-RPC read client
//!
//! The bridge core only ever reads from chains: network identity, account
//! bytecode, gas estimates and `eth_call` results. This client wraps those
//! four methods over reqwest; native RPC failures are re-raised as
//! [`BridgeError::ProviderError`] with the remote message preserved.

use alloy_primitives::{Address, U256};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::error::{BridgeError, BridgeResult, ProviderSide};

const RPC_TIMEOUT: Duration = Duration::from_secs(30);

// ============================================================================
// JSON-RPC TYPES
// ============================================================================

#[derive(Debug, Serialize)]
struct JsonRpcRequest {
    jsonrpc: String,
    method: String,
    params: serde_json::Value,
    id: u64,
}

#[derive(Debug, Deserialize)]
struct JsonRpcResponse<T> {
    result: Option<T>,
    error: Option<JsonRpcError>,
}

#[derive(Debug, Deserialize)]
struct JsonRpcError {
    message: String,
}

/// A read-only call or gas-estimation request.
///
/// Only the fields this crate needs; absent fields are omitted from the
/// wire payload entirely.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TransactionRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<U256>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
}

// ============================================================================
// CLIENT
// ============================================================================

/// Read provider for one side of the bridge.
#[derive(Debug, Clone)]
pub struct EvmClient {
    rpc_url: String,
    client: reqwest::Client,
    side: ProviderSide,
}

impl EvmClient {
    /// Creates a client for the given RPC endpoint.
    ///
    /// # Arguments
    ///
    /// * `rpc_url` - JSON-RPC endpoint URL
    /// * `side` - Which side of the bridge this provider serves, used for
    ///   error attribution
    pub fn new(rpc_url: &str, side: ProviderSide) -> BridgeResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(RPC_TIMEOUT)
            .no_proxy() // Avoid macOS system-configuration issues in tests
            .build()
            .map_err(|e| BridgeError::provider(side, format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            rpc_url: rpc_url.to_string(),
            client,
            side,
        })
    }

    /// The RPC endpoint this client talks to.
    pub fn rpc_url(&self) -> &str {
        &self.rpc_url
    }

    async fn rpc<T: DeserializeOwned>(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> BridgeResult<T> {
        let request = JsonRpcRequest {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
            id: 1,
        };

        debug!("{} provider call: {}", self.side, method);

        let response: JsonRpcResponse<T> = self
            .client
            .post(&self.rpc_url)
            .json(&request)
            .send()
            .await
            .map_err(|e| BridgeError::provider(self.side, format!("{} failed: {}", method, e)))?
            .json()
            .await
            .map_err(|e| {
                BridgeError::provider(self.side, format!("{} returned malformed JSON: {}", method, e))
            })?;

        if let Some(error) = response.error {
            return Err(BridgeError::provider(
                self.side,
                format!("{} failed: {}", method, error.message),
            ));
        }

        response
            .result
            .ok_or_else(|| BridgeError::provider(self.side, format!("{} returned no result", method)))
    }

    /// Queries the provider's network identity (`eth_chainId`).
    pub async fn chain_id(&self) -> BridgeResult<u64> {
        let quantity: String = self.rpc("eth_chainId", serde_json::json!([])).await?;
        parse_quantity(&quantity)
            .ok_or_else(|| {
                BridgeError::provider(
                    self.side,
                    format!("eth_chainId returned unparseable quantity '{}'", quantity),
                )
            })
    }

    /// Reads the bytecode at an address (`eth_getCode`, latest block).
    ///
    /// Returns the raw hex payload; `"0x"` means no code is deployed.
    pub async fn get_code(&self, address: &Address) -> BridgeResult<String> {
        self.rpc("eth_getCode", serde_json::json!([address, "latest"]))
            .await
    }

    /// Estimates gas for a transaction (`eth_estimateGas`).
    pub async fn estimate_gas(&self, tx: &TransactionRequest) -> BridgeResult<U256> {
        let quantity: String = self.rpc("eth_estimateGas", serde_json::json!([tx])).await?;
        parse_u256(&quantity).ok_or_else(|| {
            BridgeError::provider(
                self.side,
                format!("eth_estimateGas returned unparseable quantity '{}'", quantity),
            )
        })
    }

    /// Executes a read-only call (`eth_call`, latest block).
    ///
    /// Returns the raw hex-encoded return data.
    pub async fn call(&self, tx: &TransactionRequest) -> BridgeResult<String> {
        self.rpc("eth_call", serde_json::json!([tx, "latest"])).await
    }
}

// ============================================================================
// QUANTITY PARSING
// ============================================================================

/// Parses a JSON-RPC hex quantity (`"0x1"`) into a u64.
pub(crate) fn parse_quantity(quantity: &str) -> Option<u64> {
    let digits = quantity.strip_prefix("0x").unwrap_or(quantity);
    u64::from_str_radix(digits, 16).ok()
}

fn parse_u256(quantity: &str) -> Option<U256> {
    let digits = quantity.strip_prefix("0x").unwrap_or(quantity);
    U256::from_str_radix(digits, 16).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantities_parse_with_and_without_prefix() {
        assert_eq!(parse_quantity("0x1"), Some(1));
        assert_eq!(parse_quantity("0xaa36a7"), Some(11155111));
        assert_eq!(parse_quantity("5208"), Some(0x5208));
        assert_eq!(parse_quantity("0xzz"), None);
        assert_eq!(parse_u256("0x5208"), Some(U256::from(21000u64)));
    }
}
