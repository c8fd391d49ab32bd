//! Bridge request validation
//!
//! Fail-fast checks that run before any calldata or signature exists. Each
//! validator either accepts or returns a typed [`BridgeError`]; none of them
//! mutate state, and a rejected request is guaranteed to produce nothing
//! downstream. Money-affecting parameters (amount, token, addresses) are
//! never substituted with defaults.

use alloy_primitives::{Address, U256};
use tracing::{debug, warn};

use crate::config::{eip155_numeric, BridgeConfiguration};
use crate::error::{BridgeError, BridgeResult};
use crate::evm_client::TransactionRequest;
use crate::types::{BridgeBundledTxRequest, BridgeFeeAction, BridgeFeeRequest, FungibleToken};

/// Confirms both providers actually serve the configured chains.
///
/// Queries both network identities concurrently and compares each against
/// the numeric part of the configured `eip155:` id. A mismatch means the
/// caller wired a provider for the wrong network, or is running a stale
/// contract table.
pub async fn validate_chain_configuration(config: &BridgeConfiguration) -> BridgeResult<()> {
    let (root_actual, child_actual) = tokio::try_join!(
        config.root_provider().chain_id(),
        config.child_provider().chain_id()
    )?;

    let root_expected = eip155_numeric(config.root_chain_id())?;
    if root_actual != root_expected {
        return Err(BridgeError::UnsupportedConfiguration(format!(
            "root provider reports chain id {} but the configured root chain is {} (expected {}); \
            check the provider wiring and that this bridge-client version matches the deployment",
            root_actual,
            config.root_chain_id(),
            root_expected
        )));
    }

    let child_expected = eip155_numeric(config.child_chain_id())?;
    if child_actual != child_expected {
        return Err(BridgeError::UnsupportedConfiguration(format!(
            "child provider reports chain id {} but the configured child chain is {} (expected {}); \
            check the provider wiring and that this bridge-client version matches the deployment",
            child_actual,
            config.child_chain_id(),
            child_expected
        )));
    }

    debug!(
        "chain configuration validated: root={} child={}",
        root_actual, child_actual
    );
    Ok(())
}

/// Whether delivering `token` to `destination_chain_id` pays out in the
/// destination's native currency (auto-unwrap on arrival).
///
/// Only two assets do: child-wrapped ETH arriving at the root chain, and
/// root IMX arriving at the child chain. Plain ERC20 delivery never
/// unwraps.
fn delivers_native(
    token: &FungibleToken,
    destination_chain_id: &str,
    config: &BridgeConfiguration,
) -> bool {
    let token_address = match token {
        // The native sentinel always arrives wrapped as an ERC20 on the
        // other side, never as native currency.
        FungibleToken::Native => return false,
        FungibleToken::Erc20(address) => *address,
    };
    if config.is_root_chain(destination_chain_id) {
        token_address == crate::constants::child_weth_address(config.child_chain_id())
    } else if config.is_child_chain(destination_chain_id) {
        token_address == crate::constants::root_imx_address(config.root_chain_id())
    } else {
        false
    }
}

/// Verifies the destination address can receive unwrapped native currency.
///
/// Relevant only when the delivered asset auto-unwraps on arrival; for any
/// other token this returns immediately without touching a provider. For an
/// unwrapping delivery: an address with no bytecode is an EOA and always
/// accepts. A contract must accept either a bare `receive()` call or, when
/// that reverts, a plain value transfer (a payable fallback); if both gas
/// estimates fail the transfer would strand the native currency
/// irreversibly, so the request is rejected.
pub async fn check_receiver(
    token: &str,
    destination_chain_id: &str,
    recipient: Address,
    config: &BridgeConfiguration,
) -> BridgeResult<()> {
    let token = FungibleToken::parse(token)?;
    if !delivers_native(&token, destination_chain_id, config) {
        return Ok(());
    }

    let provider = config.provider_for(destination_chain_id).ok_or_else(|| {
        BridgeError::InvalidDestinationChainId(format!(
            "chain id {} is not part of the configured bridge instance",
            destination_chain_id
        ))
    })?;

    let code = provider.get_code(&recipient).await?;
    if code.trim_start_matches("0x").is_empty() {
        // Externally-owned account, always able to receive
        return Ok(());
    }

    let receive_probe = TransactionRequest {
        to: Some(recipient),
        data: Some("0x".to_string()),
        ..Default::default()
    };
    if provider.estimate_gas(&receive_probe).await.is_ok() {
        return Ok(());
    }

    // A payable fallback instead of a receive() still accepts value
    let transfer_probe = TransactionRequest {
        to: Some(recipient),
        value: Some(U256::from(1u64)),
        ..Default::default()
    };
    if provider.estimate_gas(&transfer_probe).await.is_ok() {
        return Ok(());
    }

    warn!(
        "recipient contract {} on {} rejected both receive() and value-transfer probes",
        recipient, destination_chain_id
    );
    Err(BridgeError::InvalidRecipient(format!(
        "contract {} on chain {} cannot accept the unwrapped native asset; \
        sending to it would strand the funds",
        recipient, destination_chain_id
    )))
}

/// Validates a (source, destination) chain-id pair against the instance.
pub fn validate_chain_ids(
    source_chain_id: &str,
    destination_chain_id: &str,
    config: &BridgeConfiguration,
) -> BridgeResult<()> {
    let member =
        |chain_id: &str| config.is_root_chain(chain_id) || config.is_child_chain(chain_id);

    if !member(source_chain_id) {
        return Err(BridgeError::InvalidSourceChainId(format!(
            "{} is not part of bridge instance {}",
            source_chain_id,
            config.instance().key()
        )));
    }
    if !member(destination_chain_id) {
        return Err(BridgeError::InvalidDestinationChainId(format!(
            "{} is not part of bridge instance {}",
            destination_chain_id,
            config.instance().key()
        )));
    }
    if source_chain_id == destination_chain_id {
        return Err(BridgeError::ChainIdsMatch(format!(
            "source and destination are both {}",
            source_chain_id
        )));
    }
    Ok(())
}

/// Validates the raw arguments of a bridge transaction request.
///
/// Chain ids must belong to the instance and differ; sender and recipient
/// must be well-formed addresses; the amount must be positive; the token
/// must be the `NATIVE` sentinel or a well-formed address.
pub fn validate_bridge_req_args(
    req: &BridgeBundledTxRequest,
    config: &BridgeConfiguration,
) -> BridgeResult<()> {
    validate_chain_ids(&req.source_chain_id, &req.destination_chain_id, config)?;

    req.sender.parse::<Address>().map_err(|_| {
        BridgeError::InvalidAddress(format!("sender '{}' is not a well-formed address", req.sender))
    })?;
    req.recipient.parse::<Address>().map_err(|_| {
        BridgeError::InvalidAddress(format!(
            "recipient '{}' is not a well-formed address",
            req.recipient
        ))
    })?;

    if req.amount.is_zero() {
        return Err(BridgeError::InvalidAmount(
            "bridge amount must be greater than zero".to_string(),
        ));
    }

    FungibleToken::parse(&req.token)?;
    Ok(())
}

/// Validates a fee query against the configured instance.
///
/// A `FinaliseWithdrawal` query must originate on the root chain and has no
/// cross-chain leg. A deposit or withdraw query must declare a destination,
/// and its (source, destination, action) triple must describe either the
/// deposit direction (root to child) or the withdraw direction (child to
/// root).
pub fn validate_get_fee(req: &BridgeFeeRequest, config: &BridgeConfiguration) -> BridgeResult<()> {
    if req.action == BridgeFeeAction::FinaliseWithdrawal {
        if !config.is_root_chain(&req.source_chain_id) {
            return Err(BridgeError::InvalidSourceChainId(format!(
                "a withdrawal can only be finalised on the root chain {}, not {}",
                config.root_chain_id(),
                req.source_chain_id
            )));
        }
        return Ok(());
    }

    let destination_chain_id = req.destination_chain_id.as_deref().ok_or_else(|| {
        BridgeError::InvalidDestinationChainId(format!(
            "a {} fee query must declare a destination chain id",
            req.action
        ))
    })?;
    validate_chain_ids(&req.source_chain_id, destination_chain_id, config)?;

    let deposit_direction = config.is_root_chain(&req.source_chain_id)
        && config.is_child_chain(destination_chain_id);
    let withdraw_direction = config.is_child_chain(&req.source_chain_id)
        && config.is_root_chain(destination_chain_id);

    match req.action {
        BridgeFeeAction::Deposit if deposit_direction => Ok(()),
        BridgeFeeAction::Withdraw if withdraw_direction => Ok(()),
        _ => Err(BridgeError::InvalidSourceOrDestinationChain(format!(
            "{} from {} to {} is neither a valid deposit nor a valid withdrawal for instance {}",
            req.action,
            req.source_chain_id,
            destination_chain_id,
            config.instance().key()
        ))),
    }
}
