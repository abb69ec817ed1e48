//! Audit pipeline error types.

use hawser_chain::AnchorError;
use hawser_storage::StorageError;
use thiserror::Error;

/// Pipeline failures propagate to the caller, which retries the whole
/// record with the same event identity — safe because anchoring is
/// idempotent per anchor id.
#[derive(Error, Debug)]
pub enum AuditError {
    #[error("anchoring failed: {0}")]
    Anchor(#[from] AnchorError),

    #[error("archival failed: {0}")]
    Storage(#[from] StorageError),

    #[error("payload serialization failed: {0}")]
    Serialize(String),
}
