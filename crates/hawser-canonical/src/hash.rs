//! SHA-256 payload hashing over canonical serializations.

use crate::canonical::canonicalize;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// SHA-256 digest of a canonical payload, rendered as `0x` + lowercase hex.
///
/// Safe to recompute at any time for verification; never mutated.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PayloadHash([u8; 32]);

impl PayloadHash {
    pub fn new(digest: [u8; 32]) -> Self {
        Self(digest)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// `0x`-prefixed lowercase hex form.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }
}

/// Failure to parse a hash from its hex form.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HashParseError {
    #[error("payload hash must be a 0x-prefixed 32-byte hex string")]
    Malformed,
}

impl FromStr for PayloadHash {
    type Err = HashParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let body = s.strip_prefix("0x").ok_or(HashParseError::Malformed)?;
        let bytes = hex::decode(body).map_err(|_| HashParseError::Malformed)?;
        let digest: [u8; 32] = bytes.try_into().map_err(|_| HashParseError::Malformed)?;
        Ok(Self(digest))
    }
}

impl fmt::Display for PayloadHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for PayloadHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PayloadHash({})", &self.to_hex()[..18])
    }
}

impl Serialize for PayloadHash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for PayloadHash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(D::Error::custom)
    }
}

fn digest(bytes: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hasher.finalize().into()
}

/// Hash a structured value: canonicalize first, then SHA-256.
pub fn hash_canonical(value: &Value) -> PayloadHash {
    PayloadHash(digest(canonicalize(value).as_bytes()))
}

/// Hash a pre-serialized string verbatim (no canonicalization pass).
pub fn hash_raw(input: &str) -> PayloadHash {
    PayloadHash(digest(input.as_bytes()))
}

/// Hash an identifier string (session ids and similar).
pub fn hash_string(input: &str) -> PayloadHash {
    hash_raw(input)
}

/// Hash a value under an explicit domain discriminator.
///
/// The `domain` field is injected into the hashed structure so two
/// subsystems hashing otherwise-identical fields ("audit" vs "reward")
/// can never produce colliding digests. Non-object values are wrapped
/// under a `value` key so the discriminator always applies.
pub fn hash_with_domain(domain: &str, value: &Value) -> PayloadHash {
    let wrapped = match value {
        Value::Object(map) => {
            let mut m = map.clone();
            m.insert("domain".to_string(), Value::String(domain.to_string()));
            Value::Object(m)
        }
        other => serde_json::json!({ "domain": domain, "value": other }),
    };
    hash_canonical(&wrapped)
}
