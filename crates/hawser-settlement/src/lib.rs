//! # Hawser Settlement
//!
//! Escrow dispatch and revocation delivery for marketplace orders:
//! - One [`EscrowAdapter`] contract over EVM and TON settlement
//!   contracts, selected once from chain configuration
//! - Stateless adapters: the chain is the only source of escrow state
//!   (`UNLOCKED → LOCKED → {RELEASED | REFUNDED}`), and state errors
//!   are translations of contract reverts
//! - Best-effort, single-attempt revocation webhooks with structured
//!   outcomes instead of thrown errors

pub mod abi;
pub mod adapter;
pub mod error;
pub mod evm;
pub mod factory;
pub mod revocation;
pub mod ton;

pub use adapter::{order_key, EscrowAdapter, EscrowStatus};
pub use error::EscrowError;
pub use evm::EvmEscrowAdapter;
pub use factory::create_escrow_adapter;
pub use revocation::{
    HttpWebhookTransport, RevocationExecutor, RevocationOutcome, RevocationRequest,
    WebhookDelivery, WebhookTransport,
};
pub use ton::TonEscrowAdapter;
