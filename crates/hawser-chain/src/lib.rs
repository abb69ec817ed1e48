//! # Hawser Chain Adapters
//!
//! Anchors payload hashes on-chain for tamper evidence and verifies
//! them later against chain state:
//! - One [`ChainAdapter`] contract for every backend
//! - EVM and TON implementations over external client traits
//! - An [`AnchorIndex`] making `anchor_hash` idempotent per anchor id
//!
//! ## Anchor Protocol
//!
//! An anchor is a zero-value self-transfer whose payload is the UTF-8
//! memo `HAWSER:<anchor_id>:<payload_hash>`. Verification re-reads the
//! transaction from the chain and trusts only the decoded memo — never
//! caller-supplied metadata.

pub mod adapter;
pub mod error;
pub mod evm;
pub mod factory;
pub mod index;
pub mod memo;
pub mod ton;
pub mod types;

pub use adapter::ChainAdapter;
pub use error::AnchorError;
pub use evm::EvmAnchorAdapter;
pub use factory::create_chain_adapter;
pub use index::{AnchorIndex, InMemoryAnchorIndex};
pub use ton::TonAnchorAdapter;
pub use types::{AnchorId, AnchorInput, AnchorReceipt, AnchorResult, Balance, VerifyResult};
