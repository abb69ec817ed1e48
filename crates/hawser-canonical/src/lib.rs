//! # Hawser Canonicalization
//!
//! Deterministic serialization and hashing for everything Hawser puts
//! on-chain or signs:
//! - Canonical JSON: mapping keys sorted lexicographically, recursively
//! - SHA-256 payload hashes as `0x`-prefixed lowercase hex
//! - Domain-separated hashing so subsystems can never collide
//! - Redaction of sensitive fields before hashing or archival
//!
//! ## Determinism Contract
//!
//! Two deep-equal values always canonicalize to the same string, no
//! matter how they were constructed. `serde_json`'s `preserve_order`
//! feature is enabled so insertion order is observable and the key sort
//! is performed explicitly here rather than inherited from map storage.

pub mod canonical;
pub mod hash;
pub mod redact;

pub use canonical::canonicalize;
pub use hash::{hash_canonical, hash_raw, hash_string, hash_with_domain, PayloadHash};
pub use redact::{redact_string, redact_value, DEFAULT_REDACT_FIELDS, REDACTED};
