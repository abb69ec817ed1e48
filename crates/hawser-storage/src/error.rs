//! Storage error types.
//!
//! Provider response bodies are scrubbed with
//! [`hawser_canonical::redact_string`] before they are embedded in an
//! error, so tokens and internal URLs never cross the system boundary.

use hawser_core::ConfigError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Provider accepted the connection but refused the upload.
    #[error("{provider} upload failed ({status}): {detail}")]
    Upload {
        provider: &'static str,
        status: u16,
        detail: String,
    },

    /// Provider refused a content read.
    #[error("{provider} fetch failed ({status}) for {cid}")]
    Fetch {
        provider: &'static str,
        status: u16,
        cid: String,
    },

    /// Network failure reaching the provider.
    #[error("transport error: {0}")]
    Transport(String),

    /// Provider response did not match its documented shape.
    #[error("invalid {provider} response: {reason}")]
    InvalidResponse {
        provider: &'static str,
        reason: String,
    },

    #[error("invalid content type: {0}")]
    InvalidContentType(String),

    #[error("keyfile error: {0}")]
    Keyfile(String),

    /// Archive encryption or decryption failed.
    #[error("archive cipher failure")]
    Crypto,
}

impl StorageError {
    /// Wrap a reqwest failure with its text scrubbed of URLs/tokens.
    pub(crate) fn transport(err: reqwest::Error) -> Self {
        StorageError::Transport(hawser_canonical::redact_string(&err.to_string()))
    }
}
