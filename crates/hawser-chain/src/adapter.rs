//! The chain adapter contract.

use crate::error::AnchorError;
use crate::types::{AnchorInput, AnchorResult, Balance, VerifyResult};
use async_trait::async_trait;
use hawser_canonical::PayloadHash;
use hawser_core::TxRef;

/// Per-chain anchoring contract.
///
/// Implementations are stateless translators over an external chain
/// client. `anchor_hash` is idempotent with respect to the anchor id:
/// submitting the same id twice never creates two on-chain records.
#[async_trait]
pub trait ChainAdapter: Send + Sync {
    /// Configured network identifier.
    fn network_id(&self) -> &str;

    /// Record a payload hash on-chain.
    ///
    /// Fails fast with a configuration error when no signing credential
    /// is configured — no network call is attempted.
    async fn anchor_hash(&self, input: AnchorInput) -> Result<AnchorResult, AnchorError>;

    /// Check whether `payload_hash` is actually recorded at `tx`.
    ///
    /// Only queried chain state is trusted. A missing or foreign
    /// transaction yields `ok: false`.
    async fn verify_anchor(
        &self,
        payload_hash: &PayloadHash,
        tx: &TxRef,
    ) -> Result<VerifyResult, AnchorError>;

    /// Native balance of the signing account. Without a signing
    /// credential this is a well-defined zero balance, not an error.
    async fn get_balance(&self) -> Result<Balance, AnchorError>;
}
