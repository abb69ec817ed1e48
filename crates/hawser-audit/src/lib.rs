//! # Hawser Audit Pipeline
//!
//! Turns domain events (LLM/tool activity, settlement events) into
//! tamper-evident on-chain anchors:
//!
//! ```text
//! event → redact → canonical hash → anchor id → (archive?) → anchor → AuditAnchor
//! ```
//!
//! The anchor id derives from stable identifying fields (session-id
//! hash, kind, sequence number) under the `audit` domain, so retries of
//! the same logical event converge on one anchor. Re-processing an
//! already-anchored event is a no-op success. The pipeline has no retry
//! loop of its own: storage and chain failures propagate, and the
//! caller retries with the same identity.

pub mod error;
pub mod event;
pub mod pipeline;
pub mod seq;
pub mod store;

pub use error::AuditError;
pub use event::{ArchivePointer, AuditAnchor, AuditEvent, AuditEventKind, ChainRef};
pub use pipeline::{AuditEventInput, AuditOutcome, AuditPipeline};
pub use seq::SeqRegistry;
pub use store::{AnchorStore, InMemoryAnchorStore};
