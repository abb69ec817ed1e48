//! Anchor idempotency index.
//!
//! The index is what makes `anchor_hash` safe to retry: the adapter
//! consults it before submitting and records the receipt afterwards
//! with first-writer-wins semantics, so concurrent submitters of the
//! same anchor id converge on one receipt. A remote implementation
//! backed by a uniqueness constraint satisfies the same contract.

use crate::types::{AnchorId, AnchorReceipt};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;

/// Lookup and record anchors by idempotency key.
#[async_trait]
pub trait AnchorIndex: Send + Sync {
    /// Receipt previously recorded for this anchor id, if any.
    async fn get(&self, anchor_id: &AnchorId) -> Option<AnchorReceipt>;

    /// Record a receipt unless one already exists. Returns the winning
    /// record, which callers must adopt as the canonical outcome.
    async fn record(&self, receipt: AnchorReceipt) -> AnchorReceipt;
}

/// In-memory index. Suitable for a single process; state does not
/// survive restarts, which is safe because re-anchoring an already
/// anchored id is idempotent end-to-end.
#[derive(Default)]
pub struct InMemoryAnchorIndex {
    receipts: RwLock<HashMap<AnchorId, AnchorReceipt>>,
}

impl InMemoryAnchorIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.receipts.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.receipts.read().is_empty()
    }
}

#[async_trait]
impl AnchorIndex for InMemoryAnchorIndex {
    async fn get(&self, anchor_id: &AnchorId) -> Option<AnchorReceipt> {
        self.receipts.read().get(anchor_id).cloned()
    }

    async fn record(&self, receipt: AnchorReceipt) -> AnchorReceipt {
        let mut receipts = self.receipts.write();
        receipts
            .entry(receipt.anchor_id)
            .or_insert(receipt)
            .clone()
    }
}
