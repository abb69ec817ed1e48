//! Core type definitions shared across the Hawser workspace.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Marketplace order identifier.
///
/// Opaque to Hawser: the marketplace chooses the format. EVM escrow
/// contracts key escrows by `bytes32`, so adapters widen non-hex order
/// ids deterministically (see `hawser-settlement`).
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(String);

impl OrderId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OrderId({})", self.0)
    }
}

impl From<&str> for OrderId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Reference to a submitted chain transaction (hash or provider id).
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TxRef(String);

impl TxRef {
    pub fn new(tx: impl Into<String>) -> Self {
        Self(tx.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TxRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for TxRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TxRef({})", self.0)
    }
}

/// A release recipient: address plus amount in base units (decimal string).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payee {
    pub address: String,
    pub amount: String,
}

/// Chain family discriminator.
///
/// Closed two-way dispatch: a network id in the TON family (recognized
/// by the `ton-` prefix, e.g. `ton-mainnet`, `ton-testnet`) selects TON
/// adapters; everything else is treated as EVM-compatible. Bound once
/// at factory time so call sites never branch on family again.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChainFamily {
    Evm,
    Ton,
}

impl ChainFamily {
    pub fn from_network(network: &str) -> Self {
        if network.starts_with("ton-") {
            ChainFamily::Ton
        } else {
            ChainFamily::Evm
        }
    }
}

/// Default chain network when none is configured.
pub const DEFAULT_NETWORK: &str = "base";

/// EIP-155 chain id for a known EVM network.
pub fn chain_id(network: &str) -> Option<u64> {
    match network {
        "ethereum" => Some(1),
        "base" => Some(8453),
        "optimism" => Some(10),
        "arbitrum" => Some(42161),
        "sepolia" => Some(11_155_111),
        _ => None,
    }
}

/// Default public RPC endpoint for a known EVM network.
///
/// Rate-limited community endpoints; operators should configure their own.
pub fn default_rpc(network: &str) -> Option<&'static str> {
    match network {
        "ethereum" => Some("https://eth.llamarpc.com"),
        "base" => Some("https://mainnet.base.org"),
        "optimism" => Some("https://mainnet.optimism.io"),
        "arbitrum" => Some("https://arb1.arbitrum.io/rpc"),
        "sepolia" => Some("https://rpc.sepolia.org"),
        _ => None,
    }
}

/// Native currency symbol for a network.
pub fn native_symbol(network: &str) -> &'static str {
    match ChainFamily::from_network(network) {
        ChainFamily::Ton => "TON",
        ChainFamily::Evm => "ETH",
    }
}

/// Render a base-unit amount as a decimal string.
///
/// `format_units(1_500_000_000_000_000_000, 18)` is `"1.5"`; trailing
/// fractional zeros are trimmed.
pub fn format_units(value: u128, decimals: u32) -> String {
    let scale = 10u128.pow(decimals);
    let whole = value / scale;
    let frac = value % scale;

    if frac == 0 {
        return whole.to_string();
    }

    let frac_str = format!("{:0>width$}", frac, width = decimals as usize);
    format!("{}.{}", whole, frac_str.trim_end_matches('0'))
}
