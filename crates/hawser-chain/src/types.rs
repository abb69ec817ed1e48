//! Anchoring data model.

use chrono::{DateTime, Utc};
use hawser_canonical::PayloadHash;
use hawser_core::TxRef;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Idempotency key for the anchoring pipeline.
///
/// Derived deterministically from stable fields of the source event, so
/// re-submitting the same logical event always yields the same id. Two
/// `anchor_hash` calls with equal anchor ids are the same logical
/// operation.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnchorId([u8; 32]);

impl AnchorId {
    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Adopt a derived hash as an anchor id.
    pub fn from_hash(hash: PayloadHash) -> Self {
        Self(*hash.as_bytes())
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }
}

impl fmt::Display for AnchorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for AnchorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AnchorId({})", &self.to_hex()[..18])
    }
}

impl FromStr for AnchorId {
    type Err = hawser_canonical::hash::HashParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(*s.parse::<PayloadHash>()?.as_bytes()))
    }
}

impl Serialize for AnchorId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for AnchorId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(D::Error::custom)
    }
}

/// Input to [`crate::ChainAdapter::anchor_hash`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AnchorInput {
    pub anchor_id: AnchorId,
    pub payload_hash: PayloadHash,
    /// Optional metadata. Never written on-chain and never trusted
    /// during verification.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<BTreeMap<String, String>>,
}

/// Outcome of a successful anchor submission.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AnchorResult {
    pub tx: TxRef,
    pub block: Option<u64>,
    pub network: String,
}

/// Outcome of anchor verification against chain state.
///
/// A missing or foreign transaction is a negative result (`ok: false`),
/// not an error; transport failures while querying the chain propagate
/// as errors instead.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VerifyResult {
    pub ok: bool,
    pub anchor_id: Option<AnchorId>,
    pub block: Option<u64>,
    pub timestamp: Option<i64>,
}

impl VerifyResult {
    pub fn negative() -> Self {
        Self {
            ok: false,
            anchor_id: None,
            block: None,
            timestamp: None,
        }
    }
}

/// Native balance of the signing account.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    pub balance: String,
    pub symbol: String,
}

/// Record held by the idempotency index: one per anchor id, immutable
/// once created.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AnchorReceipt {
    pub anchor_id: AnchorId,
    pub payload_hash: PayloadHash,
    pub tx: TxRef,
    pub block: Option<u64>,
    pub network: String,
    pub created_at: DateTime<Utc>,
}

impl AnchorReceipt {
    pub fn to_result(&self) -> AnchorResult {
        AnchorResult {
            tx: self.tx.clone(),
            block: self.block,
            network: self.network.clone(),
        }
    }
}
