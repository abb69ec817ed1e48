//! Anchoring error types.

use hawser_core::{ClientError, ConfigError};
use thiserror::Error;

/// Errors raised by chain adapters.
#[derive(Error, Debug)]
pub enum AnchorError {
    /// Missing signing credential or client binding. Raised before any
    /// network attempt.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The chain client failed or rejected the submission.
    #[error("chain client error: {0}")]
    Client(#[from] ClientError),
}
