//! Error taxonomy for bridge operations
//!
//! Every fallible operation in this crate returns [`BridgeError`]. External
//! failures (provider RPC, relayer HTTP, simulation API) are wrapped into one
//! of these variants with the original message preserved, so callers can
//! branch on the variant while humans read the message. Validation errors are
//! fail-fast: a failed validation guarantees no calldata is produced
//! downstream.

use thiserror::Error;

/// Which external provider a [`BridgeError::ProviderError`] originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderSide {
    /// The root-chain read provider
    Root,
    /// The child-chain read provider
    Child,
    /// The relayer status API
    Relayer,
}

impl std::fmt::Display for ProviderSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderSide::Root => write!(f, "root"),
            ProviderSide::Child => write!(f, "child"),
            ProviderSide::Relayer => write!(f, "relayer"),
        }
    }
}

/// Typed bridge error.
///
/// One variant per error kind; the payload is human-readable context.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// The (root, child) pair is not supported for the active environment,
    /// or a provider reports a different network than the one configured.
    #[error("unsupported configuration: {0}")]
    UnsupportedConfiguration(String),

    /// A sender, recipient or token string is not a well-formed address.
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// The bridge amount is zero.
    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    /// The destination address cannot receive the unwrapped native asset.
    #[error("invalid recipient: {0}")]
    InvalidRecipient(String),

    /// The source chain id is not part of the configured bridge instance.
    #[error("invalid source chain id: {0}")]
    InvalidSourceChainId(String),

    /// The destination chain id is not part of the configured bridge instance.
    #[error("invalid destination chain id: {0}")]
    InvalidDestinationChainId(String),

    /// Source and destination chain ids are equal.
    #[error("source and destination chain ids match: {0}")]
    ChainIdsMatch(String),

    /// The (source, destination, action) triple is neither a valid deposit
    /// nor a valid withdrawal direction.
    #[error("invalid source or destination chain: {0}")]
    InvalidSourceOrDestinationChain(String),

    /// An external provider call failed; the remote message is preserved.
    #[error("{side} provider error: {context}")]
    ProviderError { side: ProviderSide, context: String },

    /// ABI decoding or another internal invariant failed.
    #[error("internal error: {0}")]
    InternalError(String),

    /// The batched gas estimation failed, at batch or per-simulation level.
    #[error("gas estimate failed: {0}")]
    GasEstimateFailed(String),
}

impl BridgeError {
    /// Wraps a provider-side failure, preserving the native error message.
    pub fn provider(side: ProviderSide, context: impl std::fmt::Display) -> Self {
        BridgeError::ProviderError {
            side,
            context: context.to_string(),
        }
    }
}

/// Result alias used throughout the crate.
pub type BridgeResult<T> = Result<T, BridgeError>;
