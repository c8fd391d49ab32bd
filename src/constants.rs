//! Chain, token and endpoint constants
//!
//! Static tables for the supported network tiers (mainnet / testnet /
//! devnet): chain identifiers, canonical token addresses, and the external
//! API endpoints used by the gas-estimation batcher and the relayer status
//! client. Addresses are stored lowercase; display/encoding checksums them.

use alloy_primitives::{address, Address};

// ============================================================================
// CHAIN IDENTIFIERS
// ============================================================================

/// Ethereum mainnet (root chain, production)
pub const ETHEREUM_MAINNET: &str = "eip155:1";
/// Ethereum Sepolia (root chain, sandbox)
pub const ETHEREUM_SEPOLIA: &str = "eip155:11155111";
/// zkEVM mainnet (child chain, production)
pub const ZKEVM_MAINNET: &str = "eip155:13371";
/// zkEVM testnet (child chain, sandbox)
pub const ZKEVM_TESTNET: &str = "eip155:13473";
/// zkEVM devnet (child chain, internal deployments only)
pub const ZKEVM_DEVNET: &str = "eip155:15003";

/// Sentinel standing in for a chain's native gas asset where an ERC20
/// address would otherwise go. Compared case-insensitively.
pub const NATIVE_SENTINEL: &str = "NATIVE";

// ============================================================================
// CANONICAL TOKEN ADDRESSES
// ============================================================================

// IMX ERC20 on Ethereum mainnet
pub const ROOT_IMX_MAINNET: Address = address!("f57e7e7c23978c3caec3c3548e3d615c346e79ff");
// IMX ERC20 on Sepolia
pub const ROOT_IMX_TESTNET: Address = address!("e2629e08f4125d14e446660028bd98ee60ee69f2");
// IMX ERC20 on the devnet root deployment
pub const ROOT_IMX_DEVNET: Address = address!("0f3d2b1a8c5e49d7a6b0c2d4e6f8091a2b3c4d5e");

// Wrapped IMX on zkEVM mainnet
pub const CHILD_WIMX_MAINNET: Address = address!("3a0c2ba54d6cbd3121f01b96dfd20e99d1696c9d");
// Wrapped IMX on zkEVM testnet
pub const CHILD_WIMX_TESTNET: Address = address!("1cca9f38e1c2c38f2b8a73f03a03c26c3c3c9a6e");
// Wrapped IMX on zkEVM devnet
pub const CHILD_WIMX_DEVNET: Address = address!("5b2f4e6d8a0c1e3f5a7b9d0c2e4f6a8b0c1d2e3f");

// Wrapped ETH on zkEVM mainnet
pub const CHILD_WETH_MAINNET: Address = address!("52a6c53869ce09a731cd772f245b97a4401d3348");
// Wrapped ETH on zkEVM testnet
pub const CHILD_WETH_TESTNET: Address = address!("e9e96d1aad82562b7588f03f49ad34186f996478");
// Wrapped ETH on zkEVM devnet
pub const CHILD_WETH_DEVNET: Address = address!("7c13372f4b6e5a8d9c0b1a2d3e4f5c6b7a8d9e0f");

/// Resolves the canonical root-chain IMX address for a destination chain.
///
/// Keyed by network tier; any chain id outside the recognized mainnet and
/// testnet root chains resolves to the devnet deployment.
pub fn root_imx_address(destination_chain_id: &str) -> Address {
    match destination_chain_id {
        ETHEREUM_MAINNET => ROOT_IMX_MAINNET,
        ETHEREUM_SEPOLIA => ROOT_IMX_TESTNET,
        _ => ROOT_IMX_DEVNET,
    }
}

/// Whether `token` is a recognized wrapped-IMX deployment on any tier.
pub fn is_wrapped_imx(token: &Address) -> bool {
    *token == CHILD_WIMX_MAINNET || *token == CHILD_WIMX_TESTNET || *token == CHILD_WIMX_DEVNET
}

/// Resolves the wrapped-ETH address for a child chain, devnet fallback.
pub fn child_weth_address(child_chain_id: &str) -> Address {
    match child_chain_id {
        ZKEVM_MAINNET => CHILD_WETH_MAINNET,
        ZKEVM_TESTNET => CHILD_WETH_TESTNET,
        _ => CHILD_WETH_DEVNET,
    }
}

// ============================================================================
// EXTERNAL API ENDPOINTS
// ============================================================================

/// Relayer status API, production
pub const RELAYER_API_MAINNET: &str = "https://api.axelarscan.io/gmp";
/// Relayer status API, sandbox
pub const RELAYER_API_TESTNET: &str = "https://testnet.api.axelarscan.io/gmp";

pub const TENDERLY_GATEWAY_ETHEREUM: &str = "https://mainnet.gateway.tenderly.co";
pub const TENDERLY_GATEWAY_SEPOLIA: &str = "https://sepolia.gateway.tenderly.co";
pub const TENDERLY_GATEWAY_ZKEVM: &str = "https://immutable.gateway.tenderly.co";
pub const TENDERLY_GATEWAY_ZKEVM_TESTNET: &str = "https://immutable-testnet.gateway.tenderly.co";
pub const TENDERLY_GATEWAY_ZKEVM_DEVNET: &str = "https://immutable-devnet.gateway.tenderly.co";

/// Selects the simulation gateway for a chain id.
///
/// Unrecognized ids fall back to the devnet gateway rather than failing, so
/// internal deployments can estimate gas without a table change.
pub fn tenderly_gateway(chain_id: &str) -> &'static str {
    match chain_id {
        ETHEREUM_MAINNET => TENDERLY_GATEWAY_ETHEREUM,
        ETHEREUM_SEPOLIA => TENDERLY_GATEWAY_SEPOLIA,
        ZKEVM_MAINNET => TENDERLY_GATEWAY_ZKEVM,
        ZKEVM_TESTNET => TENDERLY_GATEWAY_ZKEVM_TESTNET,
        _ => TENDERLY_GATEWAY_ZKEVM_DEVNET,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_imx_is_keyed_by_tier_with_devnet_fallback() {
        assert_eq!(root_imx_address(ETHEREUM_MAINNET), ROOT_IMX_MAINNET);
        assert_eq!(root_imx_address(ETHEREUM_SEPOLIA), ROOT_IMX_TESTNET);
        assert_eq!(root_imx_address("eip155:999999"), ROOT_IMX_DEVNET);
    }

    #[test]
    fn tenderly_gateway_falls_back_to_devnet() {
        assert_eq!(tenderly_gateway(ETHEREUM_MAINNET), TENDERLY_GATEWAY_ETHEREUM);
        assert_eq!(tenderly_gateway("eip155:31337"), TENDERLY_GATEWAY_ZKEVM_DEVNET);
    }
}
