//! Unit tests for batched gas estimation
//!
//! These tests verify the all-or-nothing contract of the simulation batch
//! against a mocked gateway: positional alignment, length mismatches,
//! per-simulation reverts and the top-level error envelope.

use alloy_primitives::U256;
use serde_json::json;
use wiremock::matchers::{body_partial_json, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

use bridge_client::{BridgeError, TenderlyClient, TenderlySimulation};

#[path = "helpers.rs"]
mod helpers;
use helpers::{DUMMY_RECIPIENT, DUMMY_SENDER};

fn simulations(count: usize) -> Vec<TenderlySimulation> {
    (0..count)
        .map(|index| TenderlySimulation {
            from: DUMMY_SENDER.parse().unwrap(),
            to: DUMMY_RECIPIENT.parse().unwrap(),
            data: None,
            value: Some(U256::from(index as u64 + 1)),
            gas: None,
        })
        .collect()
}

/// Test that N simulations produce N aligned gas values in one call.
/// Why: The batch must be a single round-trip and the results must stay
/// positionally aligned with the input.
#[tokio::test]
async fn test_bundle_returns_aligned_estimates() {
    let _ = tracing_subscriber::fmt::try_init();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(
            json!({"method": "tenderly_estimateGasBundle"}),
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": [
                {"gasUsed": "0x5208"},
                {"gasUsed": 30000},
                {"gasUsed": "0xc350"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = TenderlyClient::with_endpoint(&server.uri()).expect("Failed to create client");
    let estimates = client
        .estimate_gas_bundle(&simulations(3), None)
        .await
        .expect("Failed to estimate the bundle");
    assert_eq!(estimates, vec![21000, 30000, 50000]);
}

/// Test that a result count differing from the input count fails the batch.
#[tokio::test]
async fn test_bundle_rejects_mismatched_response_count() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": [
                {"gasUsed": "0x5208"},
                {"gasUsed": "0x5208"}
            ]
        })))
        .mount(&server)
        .await;

    let client = TenderlyClient::with_endpoint(&server.uri()).expect("Failed to create client");
    match client.estimate_gas_bundle(&simulations(3), None).await {
        Err(BridgeError::GasEstimateFailed(message)) => {
            assert!(message.contains("mismatched responses"), "{}", message);
        }
        other => panic!("Expected GasEstimateFailed, got {:?}", other),
    }
}

/// Test that one reverting simulation fails the whole batch with its reason.
/// Why: No partial or best-effort results may ever be returned.
#[tokio::test]
async fn test_bundle_rejects_individual_revert() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": [
                {"gasUsed": "0x5208"},
                {"error": {"message": "execution reverted: insufficient balance"}}
            ]
        })))
        .mount(&server)
        .await;

    let client = TenderlyClient::with_endpoint(&server.uri()).expect("Failed to create client");
    match client.estimate_gas_bundle(&simulations(2), None).await {
        Err(BridgeError::GasEstimateFailed(message)) => {
            assert!(message.contains("insufficient balance"), "{}", message);
        }
        other => panic!("Expected GasEstimateFailed, got {:?}", other),
    }
}

/// Test that a result without a gas value fails the batch.
#[tokio::test]
async fn test_bundle_rejects_missing_gas_value() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": [{}]
        })))
        .mount(&server)
        .await;

    let client = TenderlyClient::with_endpoint(&server.uri()).expect("Failed to create client");
    match client.estimate_gas_bundle(&simulations(1), None).await {
        Err(BridgeError::GasEstimateFailed(message)) => {
            assert!(
                message.contains("did not return simulation results"),
                "{}",
                message
            );
        }
        other => panic!("Expected GasEstimateFailed, got {:?}", other),
    }
}

/// Test that a top-level error envelope short-circuits with its message.
#[tokio::test]
async fn test_bundle_propagates_remote_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "error": {"message": "project limit exceeded"}
        })))
        .mount(&server)
        .await;

    let client = TenderlyClient::with_endpoint(&server.uri()).expect("Failed to create client");
    match client.estimate_gas_bundle(&simulations(1), None).await {
        Err(BridgeError::GasEstimateFailed(message)) => {
            assert_eq!(message, "project limit exceeded");
        }
        other => panic!("Expected GasEstimateFailed, got {:?}", other),
    }
}

/// Test that state overrides ride along as the third positional parameter.
#[tokio::test]
async fn test_bundle_threads_state_objects() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "params": [[], "latest", {"0x1111111111111111111111111111111111111111": {"balance": "0x1"}}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": []})))
        .expect(1)
        .mount(&server)
        .await;

    let client = TenderlyClient::with_endpoint(&server.uri()).expect("Failed to create client");
    let state = json!({"0x1111111111111111111111111111111111111111": {"balance": "0x1"}});
    client
        .estimate_gas_bundle(&[], Some(state))
        .await
        .expect("Failed to estimate with state objects");
}
