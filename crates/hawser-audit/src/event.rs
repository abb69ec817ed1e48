//! Audit event model.

use chrono::{DateTime, Utc};
use hawser_canonical::PayloadHash;
use hawser_chain::AnchorId;
use hawser_core::TxRef;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Kinds of audit-worthy events.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditEventKind {
    LlmInput,
    LlmOutput,
    ToolCall,
    ToolResult,
    SessionEnd,
    Settlement,
}

impl AuditEventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditEventKind::LlmInput => "llm_input",
            AuditEventKind::LlmOutput => "llm_output",
            AuditEventKind::ToolCall => "tool_call",
            AuditEventKind::ToolResult => "tool_result",
            AuditEventKind::SessionEnd => "session_end",
            AuditEventKind::Settlement => "settlement",
        }
    }
}

/// Pointer to archived payload content.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchivePointer {
    pub cid: String,
    pub uri: String,
}

/// On-chain reference for an anchored event.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChainRef {
    pub network: String,
    pub tx: TxRef,
    pub block: Option<u64>,
}

/// An audit event after redaction and hashing.
///
/// `session_id_hash` is always a hash — the raw session identifier
/// never leaves the caller. `payload` holds the redacted document when
/// it fits inline; oversized payloads are archived and only the pointer
/// is retained.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AuditEvent {
    pub id: Uuid,
    pub kind: AuditEventKind,
    pub timestamp: DateTime<Utc>,
    pub session_id_hash: String,
    pub seq: u64,
    pub anchor_id: AnchorId,
    pub payload_hash: PayloadHash,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archive_pointer: Option<ArchivePointer>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chain_ref: Option<ChainRef>,
}

/// The persisted outcome of anchoring: immutable once created, at most
/// one per anchor id.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AuditAnchor {
    pub anchor_id: AnchorId,
    pub payload_hash: PayloadHash,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pointer: Option<ArchivePointer>,
    pub chain: ChainRef,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_wire_form() {
        assert_eq!(
            serde_json::to_string(&AuditEventKind::LlmInput).unwrap(),
            "\"llm_input\""
        );
        assert_eq!(AuditEventKind::ToolCall.as_str(), "tool_call");
    }
}
