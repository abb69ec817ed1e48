//! Escrow error types.

use hawser_core::{ClientError, ConfigError, OrderId};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EscrowError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// `lock` on an order whose escrow is already in `LOCKED` state.
    #[error("escrow for {0} is already locked")]
    AlreadyLocked(OrderId),

    /// `release`/`refund` on an order whose escrow is not in `LOCKED`
    /// state — never locked, or already released/refunded. Terminal
    /// states reject further transitions; a double release must fail,
    /// not silently succeed.
    #[error("escrow for {0} is not locked")]
    NotLocked(OrderId),

    /// The payer cannot cover the lock amount.
    #[error("insufficient funds to lock escrow for {0}")]
    InsufficientFunds(OrderId),

    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("invalid payees: {0}")]
    InvalidPayees(String),

    /// The chain client failed or rejected the call for a reason that
    /// is not an escrow state transition.
    #[error("chain client error: {0}")]
    Chain(#[from] ClientError),
}

impl EscrowError {
    /// Translate a client failure into an escrow state error where the
    /// contract revert reason names one.
    ///
    /// The settlement contract's revert strings (`ALREADY_LOCKED`,
    /// `NOT_LOCKED`, `INSUFFICIENT_FUNDS`) are part of its interface;
    /// matching is case-insensitive and tolerant of spacing. A failed
    /// call corresponds to zero state change on-chain.
    pub fn from_client(order_id: &OrderId, err: ClientError) -> Self {
        if let ClientError::Rejected { reason } = &err {
            let normalized = reason.to_ascii_lowercase().replace('_', " ");
            if normalized.contains("already locked") {
                return EscrowError::AlreadyLocked(order_id.clone());
            }
            if normalized.contains("not locked") {
                return EscrowError::NotLocked(order_id.clone());
            }
            if normalized.contains("insufficient") {
                return EscrowError::InsufficientFunds(order_id.clone());
            }
        }
        EscrowError::Chain(err)
    }
}
