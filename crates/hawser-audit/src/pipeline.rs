//! The audit anchoring pipeline.

use crate::error::AuditError;
use crate::event::{ArchivePointer, AuditAnchor, AuditEvent, AuditEventKind, ChainRef};
use crate::seq::SeqRegistry;
use crate::store::AnchorStore;
use chrono::Utc;
use hawser_canonical::{hash_canonical, hash_string, hash_with_domain, redact_value};
use hawser_chain::{AnchorId, AnchorInput, ChainAdapter};
use hawser_core::AuditConfig;
use hawser_storage::{PutRequest, StorageAdapter};
use serde_json::{json, Value};
use std::sync::Arc;
use uuid::Uuid;

/// Domain discriminator for audit anchor ids.
const AUDIT_DOMAIN: &str = "audit";

/// An incoming domain event.
#[derive(Clone, Debug)]
pub struct AuditEventInput {
    pub kind: AuditEventKind,
    /// Raw session identifier; hashed before it is stored anywhere.
    pub session_id: Option<String>,
    /// Explicit sequence number for replays; assigned from the
    /// per-session registry when absent.
    pub seq: Option<u64>,
    pub payload: Value,
}

impl AuditEventInput {
    pub fn new(kind: AuditEventKind, session_id: Option<&str>, payload: Value) -> Self {
        Self {
            kind,
            session_id: session_id.map(str::to_string),
            seq: None,
            payload,
        }
    }
}

/// Outcome of [`AuditPipeline::record`].
#[derive(Clone, Debug)]
pub enum AuditOutcome {
    /// A new anchor was created for this event.
    Anchored {
        event: AuditEvent,
        anchor: AuditAnchor,
    },
    /// The anchor id was already recorded; no submission happened.
    AlreadyAnchored { anchor: AuditAnchor },
}

impl AuditOutcome {
    pub fn anchor(&self) -> &AuditAnchor {
        match self {
            AuditOutcome::Anchored { anchor, .. } => anchor,
            AuditOutcome::AlreadyAnchored { anchor } => anchor,
        }
    }
}

/// Drives an event from raw payload to persisted [`AuditAnchor`].
pub struct AuditPipeline {
    config: AuditConfig,
    chain: Arc<dyn ChainAdapter>,
    storage: Option<Arc<dyn StorageAdapter>>,
    store: Arc<dyn AnchorStore>,
    seq: SeqRegistry,
}

impl AuditPipeline {
    pub fn new(
        config: AuditConfig,
        chain: Arc<dyn ChainAdapter>,
        storage: Option<Arc<dyn StorageAdapter>>,
        store: Arc<dyn AnchorStore>,
    ) -> Self {
        Self {
            config,
            chain,
            storage,
            store,
            seq: SeqRegistry::new(),
        }
    }

    /// Derive the idempotent anchor id for an event identity.
    pub fn derive_anchor_id(session_id_hash: &str, kind: AuditEventKind, seq: u64) -> AnchorId {
        AnchorId::from_hash(hash_with_domain(
            AUDIT_DOMAIN,
            &json!({
                "sessionIdHash": session_id_hash,
                "kind": kind.as_str(),
                "seq": seq,
            }),
        ))
    }

    /// Process one event: redact, hash, archive when oversized, anchor,
    /// persist. Safe to retry with the same identity.
    pub async fn record(&self, input: AuditEventInput) -> Result<AuditOutcome, AuditError> {
        let session_id_hash =
            hash_string(input.session_id.as_deref().unwrap_or("unknown")).to_hex();
        let seq = input
            .seq
            .unwrap_or_else(|| self.seq.next(&session_id_hash));

        let redacted = redact_value(&input.payload, &self.config.redact_fields);
        let payload_hash = hash_canonical(&redacted);
        let anchor_id = Self::derive_anchor_id(&session_id_hash, input.kind, seq);

        if let Some(existing) = self.store.get(&anchor_id).await {
            tracing::debug!(%anchor_id, "event already anchored, skipping");
            return Ok(AuditOutcome::AlreadyAnchored { anchor: existing });
        }

        let serialized = serde_json::to_vec(&redacted)
            .map_err(|err| AuditError::Serialize(err.to_string()))?;

        let mut archive_pointer = None;
        let mut inline_payload = Some(redacted);
        if serialized.len() > self.config.inline_threshold_bytes {
            match &self.storage {
                Some(storage) => {
                    let put = storage
                        .put(PutRequest {
                            bytes: serialized,
                            content_type: "application/json".to_string(),
                            name: Some(format!("audit-{}-{}.json", input.kind.as_str(), seq)),
                        })
                        .await?;
                    tracing::debug!(cid = %put.cid, "archived oversized audit payload");
                    archive_pointer = Some(ArchivePointer {
                        cid: put.cid,
                        uri: put.uri,
                    });
                    inline_payload = None;
                }
                None => {
                    tracing::debug!(
                        size = serialized.len(),
                        "payload exceeds inline threshold but archival is disabled"
                    );
                }
            }
        }

        let result = self
            .chain
            .anchor_hash(AnchorInput {
                anchor_id,
                payload_hash,
                meta: None,
            })
            .await?;

        let chain_ref = ChainRef {
            network: result.network,
            tx: result.tx,
            block: result.block,
        };

        let anchor = self
            .store
            .put(AuditAnchor {
                anchor_id,
                payload_hash,
                pointer: archive_pointer.clone(),
                chain: chain_ref.clone(),
                created_at: Utc::now(),
            })
            .await;

        let event = AuditEvent {
            id: Uuid::new_v4(),
            kind: input.kind,
            timestamp: anchor.created_at,
            session_id_hash,
            seq,
            anchor_id,
            payload_hash,
            payload: inline_payload,
            archive_pointer,
            chain_ref: Some(chain_ref),
        };

        tracing::info!(%anchor_id, kind = input.kind.as_str(), seq, "audit event anchored");
        Ok(AuditOutcome::Anchored { event, anchor })
    }
}
