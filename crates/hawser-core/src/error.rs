//! Error taxonomy shared across the workspace.
//!
//! Policy: configuration and state errors surface immediately with a
//! specific, non-leaking message; transport errors propagate to the
//! caller (Hawser performs no automatic retries — callers retry using
//! the same idempotent keys). Error text never carries secrets, tokens,
//! or raw provider URLs.

use thiserror::Error;

/// A required configuration field is absent or unusable.
///
/// Raised before any network attempt: a misconfigured adapter fails
/// fast rather than making a doomed call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("configuration error: {0} is required")]
    Missing(&'static str),

    #[error("configuration error: {field} is invalid: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Failure reported by an external chain or transport client.
#[derive(Error, Debug, Clone)]
pub enum ClientError {
    /// Network / RPC failure reaching the backend.
    #[error("transport error: {0}")]
    Transport(String),

    /// The backend processed the request and rejected it (e.g. a
    /// contract revert). `reason` carries the backend's reason string.
    #[error("rejected by chain: {reason}")]
    Rejected { reason: String },

    /// The referenced entity does not exist on the backend.
    #[error("not found: {0}")]
    NotFound(String),
}
