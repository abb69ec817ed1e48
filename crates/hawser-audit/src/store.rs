//! Anchor persistence.

use crate::event::AuditAnchor;
use async_trait::async_trait;
use hawser_chain::AnchorId;
use parking_lot::RwLock;
use std::collections::HashMap;

/// Persistence for [`AuditAnchor`] records.
///
/// A given anchor id maps to at most one record; `put` is
/// first-writer-wins so concurrent anchoring of the same id converges.
#[async_trait]
pub trait AnchorStore: Send + Sync {
    async fn get(&self, anchor_id: &AnchorId) -> Option<AuditAnchor>;

    /// Store unless a record exists; returns the winning record.
    async fn put(&self, anchor: AuditAnchor) -> AuditAnchor;
}

/// In-memory store for single-process deployments and tests.
#[derive(Default)]
pub struct InMemoryAnchorStore {
    anchors: RwLock<HashMap<AnchorId, AuditAnchor>>,
}

impl InMemoryAnchorStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.anchors.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.anchors.read().is_empty()
    }
}

#[async_trait]
impl AnchorStore for InMemoryAnchorStore {
    async fn get(&self, anchor_id: &AnchorId) -> Option<AuditAnchor> {
        self.anchors.read().get(anchor_id).cloned()
    }

    async fn put(&self, anchor: AuditAnchor) -> AuditAnchor {
        let mut anchors = self.anchors.write();
        anchors.entry(anchor.anchor_id).or_insert(anchor).clone()
    }
}
