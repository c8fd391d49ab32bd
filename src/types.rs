//! Shared request and token types
//!
//! Request parameters arrive as raw strings from the caller and are parsed
//! once at the boundary; everything downstream works on typed values.

use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};

use crate::constants::NATIVE_SENTINEL;
use crate::error::{BridgeError, BridgeResult};

/// A fungible token reference: either an ERC20 contract address or the
/// `NATIVE` sentinel denoting the chain's native gas asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FungibleToken {
    /// The chain's native gas asset
    Native,
    /// An ERC20 contract
    Erc20(Address),
}

impl FungibleToken {
    /// Parses a raw token string.
    ///
    /// The sentinel comparison is case-insensitive and happens here, once;
    /// anything that is not the sentinel must be a well-formed address.
    pub fn parse(raw: &str) -> BridgeResult<Self> {
        let trimmed = raw.trim();
        if trimmed.to_uppercase() == NATIVE_SENTINEL {
            return Ok(FungibleToken::Native);
        }
        trimmed
            .parse::<Address>()
            .map(FungibleToken::Erc20)
            .map_err(|_| {
                BridgeError::InvalidAddress(format!(
                    "token '{}' is neither {} nor a well-formed address",
                    raw, NATIVE_SENTINEL
                ))
            })
    }
}

impl std::fmt::Display for FungibleToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FungibleToken::Native => write!(f, "{}", NATIVE_SENTINEL),
            FungibleToken::Erc20(address) => write!(f, "{}", address),
        }
    }
}

/// Bridge action requested by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BridgeFeeAction {
    /// Move assets root -> child
    Deposit,
    /// Move assets child -> root
    Withdraw,
    /// Finalise a withdrawal held back by the flow-rate queue (root only)
    FinaliseWithdrawal,
}

impl std::fmt::Display for BridgeFeeAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BridgeFeeAction::Deposit => write!(f, "DEPOSIT"),
            BridgeFeeAction::Withdraw => write!(f, "WITHDRAW"),
            BridgeFeeAction::FinaliseWithdrawal => write!(f, "FINALISE_WITHDRAWAL"),
        }
    }
}

/// Fee query parameters.
///
/// `destination_chain_id` is optional because a `FinaliseWithdrawal` query
/// has no cross-chain leg; deposit and withdraw queries must declare it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BridgeFeeRequest {
    /// Requested action
    pub action: BridgeFeeAction,
    /// Chain the transaction would be submitted on
    pub source_chain_id: String,
    /// Chain the assets would arrive on
    pub destination_chain_id: Option<String>,
}

/// Parameters for a full bridge transaction request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BridgeBundledTxRequest {
    /// Requested action
    pub action: BridgeFeeAction,
    /// Chain the transaction is submitted on
    pub source_chain_id: String,
    /// Chain the assets arrive on
    pub destination_chain_id: String,
    /// Address funding the bridge transaction
    pub sender: String,
    /// Address receiving the bridged assets
    pub recipient: String,
    /// Token being bridged: an ERC20 address or the `NATIVE` sentinel
    pub token: String,
    /// Amount being bridged; must be greater than zero
    pub amount: U256,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::ROOT_IMX_MAINNET;

    #[test]
    fn sentinel_is_case_insensitive() {
        assert_eq!(FungibleToken::parse("NATIVE").unwrap(), FungibleToken::Native);
        assert_eq!(FungibleToken::parse("native").unwrap(), FungibleToken::Native);
        assert_eq!(FungibleToken::parse(" Native ").unwrap(), FungibleToken::Native);
    }

    #[test]
    fn erc20_tokens_must_be_addresses() {
        let token = FungibleToken::parse("0xf57e7e7c23978c3caec3c3548e3d615c346e79ff").unwrap();
        assert_eq!(token, FungibleToken::Erc20(ROOT_IMX_MAINNET));
        assert!(matches!(
            FungibleToken::parse("not-a-token"),
            Err(BridgeError::InvalidAddress(_))
        ));
    }
}
