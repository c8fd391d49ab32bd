//! Batched gas-estimation client
//!
//! Submits a list of simulated transactions to the simulation gateway as
//! exactly one `tenderly_estimateGasBundle` call and returns a positionally
//! aligned list of gas estimates. The batch is all-or-nothing: a top-level
//! error, a length mismatch, a per-simulation revert or a missing gas value
//! each fail the whole call; partial results are never returned.

use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::constants::tenderly_gateway;
use crate::error::{BridgeError, BridgeResult};

const SIMULATION_TIMEOUT: Duration = Duration::from_secs(30);

/// One transaction to simulate.
#[derive(Debug, Clone, Serialize)]
pub struct TenderlySimulation {
    pub from: Address,
    pub to: Address,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<U256>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gas: Option<u64>,
}

#[derive(Debug, Serialize)]
struct BundleRequest {
    jsonrpc: String,
    id: u64,
    method: String,
    params: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct BundleResponse {
    result: Option<Vec<SimulationResult>>,
    error: Option<RemoteError>,
}

#[derive(Debug, Deserialize)]
struct RemoteError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct SimulationResult {
    #[serde(rename = "gasUsed", default)]
    gas_used: Option<serde_json::Value>,
    #[serde(default)]
    error: Option<serde_json::Value>,
}

/// Client for the gas-simulation gateway.
#[derive(Debug, Clone)]
pub struct TenderlyClient {
    endpoint: String,
    client: reqwest::Client,
}

impl TenderlyClient {
    /// Creates a client for the gateway serving `chain_id`.
    ///
    /// Recognized mainnet and testnet ids select their dedicated gateways;
    /// any other id falls back to the devnet gateway rather than failing.
    /// The fallback is deliberate policy so internal deployments estimate
    /// gas without a table change.
    pub fn for_chain(chain_id: &str) -> BridgeResult<Self> {
        Self::with_endpoint(tenderly_gateway(chain_id))
    }

    /// Creates a client for an explicit gateway endpoint.
    pub fn with_endpoint(endpoint: &str) -> BridgeResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(SIMULATION_TIMEOUT)
            .no_proxy() // Avoid macOS system-configuration issues in tests
            .build()
            .map_err(|e| {
                BridgeError::GasEstimateFailed(format!("failed to create HTTP client: {}", e))
            })?;
        Ok(Self {
            endpoint: endpoint.to_string(),
            client,
        })
    }

    /// Estimates gas for every simulation in one batched call.
    ///
    /// Exactly one network round-trip regardless of batch size; the result
    /// list is positionally aligned with the input list.
    pub async fn estimate_gas_bundle(
        &self,
        simulations: &[TenderlySimulation],
        state_objects: Option<serde_json::Value>,
    ) -> BridgeResult<Vec<u64>> {
        let params = match state_objects {
            Some(state) => serde_json::json!([simulations, "latest", state]),
            None => serde_json::json!([simulations, "latest"]),
        };
        let request = BundleRequest {
            jsonrpc: "2.0".to_string(),
            id: 0,
            method: "tenderly_estimateGasBundle".to_string(),
            params,
        };

        debug!(
            "submitting {} simulations to {}",
            simulations.len(),
            self.endpoint
        );
        let response: BundleResponse = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| BridgeError::GasEstimateFailed(format!("simulation call failed: {}", e)))?
            .json()
            .await
            .map_err(|e| {
                BridgeError::GasEstimateFailed(format!(
                    "simulation call returned malformed JSON: {}",
                    e
                ))
            })?;

        if let Some(error) = response.error {
            return Err(BridgeError::GasEstimateFailed(error.message));
        }
        let results = response.result.ok_or_else(|| {
            BridgeError::GasEstimateFailed(
                "estimating gas did not return simulation results".to_string(),
            )
        })?;

        if results.len() != simulations.len() {
            return Err(BridgeError::GasEstimateFailed(format!(
                "mismatched responses: submitted {} simulations but received {} results",
                simulations.len(),
                results.len()
            )));
        }

        let mut estimates = Vec::with_capacity(results.len());
        for (index, result) in results.iter().enumerate() {
            if let Some(error) = &result.error {
                return Err(BridgeError::GasEstimateFailed(format!(
                    "simulation {} reverted: {}",
                    index,
                    revert_reason(error)
                )));
            }
            let gas_used = result
                .gas_used
                .as_ref()
                .and_then(parse_gas_value)
                .ok_or_else(|| {
                    BridgeError::GasEstimateFailed(format!(
                        "estimating gas did not return simulation results (simulation {})",
                        index
                    ))
                })?;
            estimates.push(gas_used);
        }
        Ok(estimates)
    }
}

/// Estimates gas for `simulations` on the gateway serving `chain_id`.
///
/// One batched call per invocation; see [`TenderlyClient::estimate_gas_bundle`].
pub async fn submit_tenderly_simulations(
    chain_id: &str,
    simulations: &[TenderlySimulation],
    state_objects: Option<serde_json::Value>,
) -> BridgeResult<Vec<u64>> {
    TenderlyClient::for_chain(chain_id)?
        .estimate_gas_bundle(simulations, state_objects)
        .await
}

/// The gateway has emitted gas quantities both as hex strings and as JSON
/// numbers; accept either.
fn parse_gas_value(value: &serde_json::Value) -> Option<u64> {
    match value {
        serde_json::Value::Number(number) => number.as_u64(),
        serde_json::Value::String(quantity) => crate::evm_client::parse_quantity(quantity),
        _ => None,
    }
}

fn revert_reason(error: &serde_json::Value) -> String {
    error
        .get("message")
        .and_then(|m| m.as_str())
        .map(str::to_string)
        .unwrap_or_else(|| error.to_string())
}
