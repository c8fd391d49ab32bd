//! Contract calldata construction
//!
//! Deterministic selection of a bridge contract function variant plus
//! ABI encoding of its parameters. Function dispatch is a closed
//! enum-to-call mapping over {deposit, withdraw} x {native, ERC20} x
//! {self, to}; no free-form method names exist, so a typo can never reach
//! the encoder.

use alloy_primitives::{Address, U256};
use alloy_sol_types::{sol, SolCall};
use tracing::debug;

use crate::constants::{is_wrapped_imx, root_imx_address};
use crate::error::{BridgeError, BridgeResult};
use crate::evm_client::{EvmClient, TransactionRequest};
use crate::types::FungibleToken;

sol! {
    /// Deposit surface of the root-chain flow-rate bridge.
    interface IRootERC20BridgeFlowRate {
        function depositETH(uint256 amount) external payable;
        function depositToETH(address receiver, uint256 amount) external payable;
        function deposit(address rootToken, uint256 amount) external payable;
        function depositTo(address rootToken, address receiver, uint256 amount) external payable;
    }

    /// Withdrawal surface of the child-chain bridge.
    interface IChildERC20Bridge {
        function withdrawIMX(uint256 amount) external payable;
        function withdrawIMXTo(address receiver, uint256 amount) external payable;
        function withdraw(address childToken, uint256 amount) external payable;
        function withdrawTo(address childToken, address receiver, uint256 amount) external payable;
    }

    /// Child-side bridged token; `rootToken` is its paired root-chain address.
    interface IChildERC20 {
        function rootToken() external view returns (address);
    }
}

/// Which contract function family a transaction targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BridgeMethodSet {
    /// Root bridge deposit functions
    Deposit,
    /// Child bridge withdrawal functions
    Withdraw,
}

/// Builds calldata for a bridge transaction.
///
/// The "self" variant (amount only) is selected when `sender == recipient`;
/// otherwise the "to" variant threads the recipient explicitly. ERC20
/// variants additionally thread the token contract address.
pub fn bridge_tx_calldata(
    sender: Address,
    recipient: Address,
    amount: U256,
    token: &FungibleToken,
    method_set: BridgeMethodSet,
) -> Vec<u8> {
    let to_self = sender == recipient;
    debug!(
        "building {:?} calldata for token {} ({} variant)",
        method_set,
        token,
        if to_self { "self" } else { "to" }
    );

    use self::IChildERC20Bridge as Child;
    use self::IRootERC20BridgeFlowRate as Root;
    match (method_set, token) {
        (BridgeMethodSet::Deposit, FungibleToken::Native) => {
            if to_self {
                Root::depositETHCall { amount }.abi_encode()
            } else {
                Root::depositToETHCall { receiver: recipient, amount }.abi_encode()
            }
        }
        (BridgeMethodSet::Deposit, FungibleToken::Erc20(token)) => {
            if to_self {
                Root::depositCall { rootToken: *token, amount }.abi_encode()
            } else {
                Root::depositToCall { rootToken: *token, receiver: recipient, amount }.abi_encode()
            }
        }
        (BridgeMethodSet::Withdraw, FungibleToken::Native) => {
            if to_self {
                Child::withdrawIMXCall { amount }.abi_encode()
            } else {
                Child::withdrawIMXToCall { receiver: recipient, amount }.abi_encode()
            }
        }
        (BridgeMethodSet::Withdraw, FungibleToken::Erc20(token)) => {
            if to_self {
                Child::withdrawCall { childToken: *token, amount }.abi_encode()
            } else {
                Child::withdrawToCall { childToken: *token, receiver: recipient, amount }
                    .abi_encode()
            }
        }
    }
}

/// Resolves the root-chain token a child-side withdrawal pays out in.
///
/// The `NATIVE` sentinel and any recognized wrapped-IMX deployment resolve
/// statically to the canonical root IMX address for the destination's
/// network tier, with no provider call. Every other child token requires an
/// on-chain read of its `rootToken()` accessor, because only the child-side
/// contract authoritatively knows its paired root-chain address.
pub async fn withdraw_root_token(
    child_token: &str,
    destination_chain_id: &str,
    child_provider: &EvmClient,
) -> BridgeResult<Address> {
    let token = FungibleToken::parse(child_token)?;
    let token_address = match token {
        FungibleToken::Native => return Ok(root_imx_address(destination_chain_id)),
        FungibleToken::Erc20(address) if is_wrapped_imx(&address) => {
            return Ok(root_imx_address(destination_chain_id))
        }
        FungibleToken::Erc20(address) => address,
    };

    let call = TransactionRequest {
        to: Some(token_address),
        data: Some(format!(
            "0x{}",
            hex::encode(IChildERC20::rootTokenCall {}.abi_encode())
        )),
        ..Default::default()
    };
    let return_data = child_provider.call(&call).await?;
    decode_root_token(&return_data).map_err(|context| {
        BridgeError::InternalError(format!(
            "rootToken() on {} returned undecodable data: {}",
            token_address, context
        ))
    })
}

fn decode_root_token(return_data: &str) -> Result<Address, String> {
    let bytes = hex::decode(return_data.strip_prefix("0x").unwrap_or(return_data))
        .map_err(|e| e.to_string())?;
    IChildERC20::rootTokenCall::abi_decode_returns(&bytes, true)
        .map(|decoded| decoded._0)
        .map_err(|e| e.to_string())
}
