//! The escrow adapter contract.

use crate::error::EscrowError;
use async_trait::async_trait;
use hawser_canonical::hash_string;
use hawser_core::{OrderId, Payee, TxRef};
use serde::{Deserialize, Serialize};

/// Escrow state as reported by the settlement contract.
///
/// Adapters never cache this: the chain is the single source of truth,
/// and the `LOCKED → terminal` transition is enforced atomically by the
/// contract, not by client-side serialization.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EscrowStatus {
    Unlocked,
    Locked,
    Released,
    Refunded,
}

impl EscrowStatus {
    pub fn from_contract_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(EscrowStatus::Unlocked),
            1 => Some(EscrowStatus::Locked),
            2 => Some(EscrowStatus::Released),
            3 => Some(EscrowStatus::Refunded),
            _ => None,
        }
    }
}

/// 32-byte contract key for an order id.
///
/// Order ids that are already `0x`-prefixed 32-byte hex are used
/// verbatim; anything else is hashed, so retries and concurrent callers
/// always agree on the key.
pub fn order_key(order_id: &OrderId) -> [u8; 32] {
    let s = order_id.as_str();
    if let Some(body) = s.strip_prefix("0x") {
        if body.len() == 64 {
            if let Ok(bytes) = hex::decode(body) {
                if let Ok(key) = <[u8; 32]>::try_from(bytes) {
                    return key;
                }
            }
        }
    }
    *hash_string(s).as_bytes()
}

/// Escrow operations shared by every chain family.
///
/// Amounts are decimal strings in base units. All failure paths leave
/// escrowed funds untouched: a failed call corresponds to zero state
/// change on the backing chain.
#[async_trait]
pub trait EscrowAdapter: Send + Sync {
    /// Move `amount` from `payer` into escrow for `order_id`.
    ///
    /// `payee` is required by TON settlement contracts, whose lock
    /// message names the eventual recipient; EVM contracts ignore it.
    async fn lock(
        &self,
        order_id: &OrderId,
        payer: &str,
        amount: &str,
        payee: Option<&str>,
    ) -> Result<TxRef, EscrowError>;

    /// Distribute the escrowed funds to `payees`.
    ///
    /// Payee amounts must sum to the locked amount — enforced by the
    /// contract, not validated here.
    async fn release(&self, order_id: &OrderId, payees: &[Payee]) -> Result<TxRef, EscrowError>;

    /// Return the full escrowed amount to `payer`.
    async fn refund(&self, order_id: &OrderId, payer: &str) -> Result<TxRef, EscrowError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_order_ids_pass_through() {
        let raw = [0xabu8; 32];
        let order = OrderId::new(format!("0x{}", hex::encode(raw)));
        assert_eq!(order_key(&order), raw);
    }

    #[test]
    fn test_plain_order_ids_are_hashed() {
        let a = order_key(&OrderId::new("ord-1"));
        let b = order_key(&OrderId::new("ord-1"));
        let c = order_key(&OrderId::new("ord-2"));

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(EscrowStatus::from_contract_code(1), Some(EscrowStatus::Locked));
        assert_eq!(EscrowStatus::from_contract_code(9), None);
    }
}
