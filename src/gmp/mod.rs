//! Cross-chain message status tracking
//!
//! Maps relayer API response documents onto a finite message lifecycle and
//! extracts the diagnostic sub-records callers surface to users: gas-paid
//! status, per-phase timings and structured errors. The relayer may
//! introduce statuses this client does not yet name; those pass through
//! unchanged rather than failing.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

use crate::error::{BridgeError, BridgeResult, ProviderSide};

const RELAYER_TIMEOUT: Duration = Duration::from_secs(30);

// ============================================================================
// MESSAGE LIFECYCLE
// ============================================================================

/// Lifecycle of a cross-chain message as reported by the relayer network.
///
/// The main path runs source gateway call through destination execution;
/// the remaining variants are terminal side-states. `CannotFetchStatus` is
/// client-local: it is produced only when no matching relayer record was
/// found, never by the relayer itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GmpStatus {
    SrcGatewayCalled,
    SrcGatewayConfirmed,
    Approving,
    DestGatewayApproved,
    DestExecuting,
    DestExecuted,
    DestExecuteError,
    Forecalled,
    ForecalledWithoutGasPaid,
    NotExecuted,
    NotExecutedWithoutGasPaid,
    InsufficientFee,
    UnknownError,
    CannotFetchStatus,
    /// A relayer status this client does not yet name, passed through raw
    Other(String),
}

impl std::fmt::Display for GmpStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            GmpStatus::SrcGatewayCalled => "SRC_GATEWAY_CALLED",
            GmpStatus::SrcGatewayConfirmed => "SRC_GATEWAY_CONFIRMED",
            GmpStatus::Approving => "APPROVING",
            GmpStatus::DestGatewayApproved => "DEST_GATEWAY_APPROVED",
            GmpStatus::DestExecuting => "DEST_EXECUTING",
            GmpStatus::DestExecuted => "DEST_EXECUTED",
            GmpStatus::DestExecuteError => "DEST_EXECUTE_ERROR",
            GmpStatus::Forecalled => "FORECALLED",
            GmpStatus::ForecalledWithoutGasPaid => "FORECALLED_WITHOUT_GAS_PAID",
            GmpStatus::NotExecuted => "NOT_EXECUTED",
            GmpStatus::NotExecutedWithoutGasPaid => "NOT_EXECUTED_WITHOUT_GAS_PAID",
            GmpStatus::InsufficientFee => "INSUFFICIENT_FEE",
            GmpStatus::UnknownError => "UNKNOWN_ERROR",
            GmpStatus::CannotFetchStatus => "CANNOT_FETCH_STATUS",
            GmpStatus::Other(raw) => raw.as_str(),
        };
        write!(f, "{}", label)
    }
}

// ============================================================================
// WIRE RECORDS
// ============================================================================

/// One message record as returned by the relayer search API.
///
/// Every field is optional: the relayer omits sub-records that have not
/// happened yet, and this client never trusts upstream completeness.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GmpRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub error: Option<serde_json::Value>,
    #[serde(default)]
    pub is_insufficient_fee: Option<bool>,
    #[serde(default)]
    pub time_spent: Option<HashMap<String, u64>>,
    #[serde(default)]
    pub gas_status: Option<String>,
    #[serde(default)]
    pub gas_paid: Option<serde_json::Value>,
    #[serde(default)]
    pub call: Option<serde_json::Value>,
    #[serde(default)]
    pub executed: Option<serde_json::Value>,
    #[serde(default)]
    pub express_executed: Option<serde_json::Value>,
    #[serde(default)]
    pub approved: Option<serde_json::Value>,
    #[serde(default)]
    pub callback: Option<serde_json::Value>,
}

#[derive(Debug, Default, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    data: Vec<GmpRecord>,
}

/// Structured error extracted from a relayer record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GmpError {
    pub message: String,
    pub tx_hash: Option<String>,
    pub chain: Option<String>,
}

/// Gas-payment sub-record.
#[derive(Debug, Clone, Serialize)]
pub struct GasPaidInfo {
    pub status: String,
    pub details: Option<serde_json::Value>,
}

/// Per-phase timing map with a derived total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GmpTimeSpent {
    /// Total seconds; back-filled from the phases when absent upstream
    pub total: u64,
    /// Named phase durations in seconds
    pub phases: HashMap<String, u64>,
}

/// Interpreted cross-chain message status.
#[derive(Debug, Clone)]
pub struct GmpStatusResponse {
    pub status: GmpStatus,
    pub error: Option<GmpError>,
    pub time_spent: Option<GmpTimeSpent>,
    pub gas_paid_info: Option<GasPaidInfo>,
    /// Originating call record, opaque to this client
    pub call_tx: Option<serde_json::Value>,
    pub executed: Option<serde_json::Value>,
    pub express_executed: Option<serde_json::Value>,
    pub approved: Option<serde_json::Value>,
    pub callback: Option<serde_json::Value>,
}

impl GmpStatusResponse {
    fn not_found() -> Self {
        Self {
            status: GmpStatus::CannotFetchStatus,
            error: None,
            time_spent: None,
            gas_paid_info: None,
            call_tx: None,
            executed: None,
            express_executed: None,
            approved: None,
            callback: None,
        }
    }
}

// ============================================================================
// STATUS AND ERROR PARSING
// ============================================================================

/// Maps a relayer record onto the message lifecycle.
///
/// The mapping table is exact; an unrecognized status string passes through
/// as [`GmpStatus::Other`] so new relayer statuses degrade gracefully.
pub fn parse_gmp_status(record: &GmpRecord) -> GmpStatus {
    let status = record.status.as_deref().unwrap_or_default();
    match status {
        "error" if record.error.is_some() => GmpStatus::DestExecuteError,
        "executed" => GmpStatus::DestExecuted,
        "approved" => GmpStatus::DestGatewayApproved,
        "called" => GmpStatus::SrcGatewayCalled,
        "executing" => GmpStatus::DestExecuting,
        other => GmpStatus::Other(other.to_string()),
    }
}

/// Extracts a structured error from a relayer record.
///
/// Two mutually exclusive shapes are recognized: an execution-error
/// envelope nested under `error`, and an insufficient-fee signal derived
/// from the original call envelope. Anything else yields no error object.
pub fn parse_gmp_error(record: &GmpRecord) -> Option<GmpError> {
    if let Some(error) = &record.error {
        let message = lookup_str(error, &["message"])
            .or_else(|| lookup_str(error, &["error", "message"]))
            .unwrap_or_else(|| "unknown execution error".to_string());
        let tx_hash = lookup_str(error, &["txHash"])
            .or_else(|| lookup_str(error, &["transactionHash"]))
            .or_else(|| lookup_str(error, &["error", "transactionHash"]));
        let chain = lookup_str(error, &["chain"]);
        return Some(GmpError {
            message,
            tx_hash,
            chain,
        });
    }

    if record.is_insufficient_fee.unwrap_or(false) {
        let call = record.call.as_ref();
        return Some(GmpError {
            message: "insufficient fee paid for cross-chain execution".to_string(),
            tx_hash: call.and_then(|c| lookup_str(c, &["transactionHash"])),
            chain: call.and_then(|c| lookup_str(c, &["chain"])),
        });
    }

    None
}

fn lookup_str(value: &serde_json::Value, path: &[&str]) -> Option<String> {
    let mut current = value;
    for segment in path {
        current = current.get(segment)?;
    }
    current.as_str().map(str::to_string)
}

fn parse_time_spent(record: &GmpRecord) -> Option<GmpTimeSpent> {
    let raw = record.time_spent.as_ref()?;
    let phases: HashMap<String, u64> = raw
        .iter()
        .filter(|(name, _)| name.as_str() != "total")
        .map(|(name, seconds)| (name.clone(), *seconds))
        .collect();
    // Never trust upstream completeness: derive the total when it is absent
    let total = match raw.get("total") {
        Some(total) => *total,
        None => phases.values().sum(),
    };
    Some(GmpTimeSpent { total, phases })
}

fn parse_gas_paid_info(record: &GmpRecord) -> Option<GasPaidInfo> {
    if record.gas_status.is_none() && record.gas_paid.is_none() {
        return None;
    }
    Some(GasPaidInfo {
        status: record.gas_status.clone().unwrap_or_else(|| "unknown".to_string()),
        details: record.gas_paid.clone(),
    })
}

fn assemble_response(record: &GmpRecord) -> GmpStatusResponse {
    GmpStatusResponse {
        status: parse_gmp_status(record),
        error: parse_gmp_error(record),
        time_spent: parse_time_spent(record),
        gas_paid_info: parse_gas_paid_info(record),
        call_tx: record.call.clone(),
        executed: record.executed.clone(),
        express_executed: record.express_executed.clone(),
        approved: record.approved.clone(),
        callback: record.callback.clone(),
    }
}

// ============================================================================
// RELAYER API CLIENT
// ============================================================================

/// Client for the relayer status search API.
#[derive(Debug, Clone)]
pub struct GmpApiClient {
    base_url: Url,
    client: reqwest::Client,
}

impl GmpApiClient {
    /// Creates a client for the given relayer API base URL.
    pub fn new(base_url: &str) -> BridgeResult<Self> {
        let base_url = Url::parse(base_url).map_err(|e| {
            BridgeError::provider(
                ProviderSide::Relayer,
                format!("invalid relayer API url '{}': {}", base_url, e),
            )
        })?;
        let client = reqwest::Client::builder()
            .timeout(RELAYER_TIMEOUT)
            .no_proxy() // Avoid macOS system-configuration issues in tests
            .build()
            .map_err(|e| {
                BridgeError::provider(
                    ProviderSide::Relayer,
                    format!("failed to create HTTP client: {}", e),
                )
            })?;
        Ok(Self { base_url, client })
    }

    /// Queries the relayer for the status of one cross-chain message.
    ///
    /// Candidate records are matched by exact id equality with `tx_hash`,
    /// or by the call transaction hash containing `tx_hash` as a substring
    /// (several logs can share a root transaction, and the relayer ids them
    /// ambiguously). No matching record yields a response with status
    /// [`GmpStatus::CannotFetchStatus`] rather than an error; transport
    /// failures are errors.
    pub async fn query_transaction_status(
        &self,
        tx_hash: &str,
        tx_log_index: Option<u64>,
    ) -> BridgeResult<GmpStatusResponse> {
        let mut request = self
            .client
            .get(self.base_url.clone())
            .query(&[("method", "searchGMP"), ("txHash", tx_hash)]);
        if let Some(log_index) = tx_log_index {
            request = request.query(&[("txLogIndex", log_index.to_string())]);
        }

        debug!("querying relayer status for {}", tx_hash);
        let response: SearchResponse = request
            .send()
            .await
            .map_err(|e| {
                BridgeError::provider(ProviderSide::Relayer, format!("status query failed: {}", e))
            })?
            .json()
            .await
            .map_err(|e| {
                BridgeError::provider(
                    ProviderSide::Relayer,
                    format!("status query returned malformed JSON: {}", e),
                )
            })?;

        let needle = tx_hash.to_lowercase();
        let matched = response.data.iter().find(|record| {
            let id_matches = record
                .id
                .as_deref()
                .is_some_and(|id| id.to_lowercase() == needle);
            let call_matches = record
                .call
                .as_ref()
                .and_then(|call| lookup_str(call, &["transactionHash"]))
                .is_some_and(|hash| hash.to_lowercase().contains(&needle));
            id_matches || call_matches
        });

        match matched {
            Some(record) => {
                let assembled = assemble_response(record);
                info!("relayer status for {}: {}", tx_hash, assembled.status);
                Ok(assembled)
            }
            None => {
                info!("no relayer record matched {}", tx_hash);
                Ok(GmpStatusResponse::not_found())
            }
        }
    }
}
