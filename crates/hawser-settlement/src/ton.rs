//! TON escrow adapter.
//!
//! Drives the TON settlement contract through [`TonClient`] transfers
//! carrying typed payloads. The contract ignores empty message bodies,
//! so every call includes one; `lock` names the payee up front because
//! the contract's lock message requires it.

use crate::adapter::{order_key, EscrowAdapter};
use crate::error::EscrowError;
use crate::evm::parse_amount;
use async_trait::async_trait;
use hawser_core::{
    ChainConfig, ConfigError, OrderId, Payee, SettlementConfig, SettlementMode, TonClient,
    TonPayload, TxRef,
};
use std::sync::Arc;

/// Extra nanotons sent with `lock` so the contract keeps a fee balance
/// (it forwards with mode 1). ~0.05 TON.
const GAS_TOPUP: u128 = 50_000_000;

/// Nanotons sent with `release`/`refund` to trigger contract execution.
const GAS_TRIGGER: u128 = 50_000_000;

pub struct TonEscrowAdapter {
    mode: SettlementMode,
    mnemonic_configured: bool,
    contract_address: String,
    client: Arc<dyn TonClient>,
}

impl TonEscrowAdapter {
    /// Bind the adapter. The contract address is required up front; the
    /// mnemonic is checked per call so read paths stay usable.
    pub fn new(
        chain: &ChainConfig,
        settlement: &SettlementConfig,
        client: Arc<dyn TonClient>,
    ) -> Result<Self, EscrowError> {
        let contract_address = chain
            .escrow_contract_address
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::Missing("chain.escrow_contract_address"))?
            .to_string();

        Ok(Self {
            mode: settlement.mode,
            mnemonic_configured: chain
                .ton_mnemonic
                .as_deref()
                .is_some_and(|m| !m.trim().is_empty()),
            contract_address,
            client,
        })
    }

    fn ensure_contract_ready(&self) -> Result<(), EscrowError> {
        if self.mode != SettlementMode::Contract {
            return Err(ConfigError::Invalid {
                field: "settlement.mode",
                reason: "not set to contract".to_string(),
            }
            .into());
        }
        if !self.mnemonic_configured {
            return Err(ConfigError::Missing("chain.ton_mnemonic").into());
        }
        Ok(())
    }

    async fn transfer(
        &self,
        order_id: &OrderId,
        amount: u128,
        payload: TonPayload,
    ) -> Result<TxRef, EscrowError> {
        self.client
            .transfer(&self.contract_address, amount, payload)
            .await
            .map_err(|err| EscrowError::from_client(order_id, err))
    }
}

#[async_trait]
impl EscrowAdapter for TonEscrowAdapter {
    async fn lock(
        &self,
        order_id: &OrderId,
        _payer: &str,
        amount: &str,
        payee: Option<&str>,
    ) -> Result<TxRef, EscrowError> {
        self.ensure_contract_ready()?;

        let payee = payee
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .ok_or_else(|| {
                EscrowError::InvalidPayees("payee is required for TON settlement lock".to_string())
            })?;
        let lock_amount = parse_amount(amount)?;

        let tx = self
            .transfer(
                order_id,
                lock_amount + GAS_TOPUP,
                TonPayload::SettlementLock {
                    order_hash: order_key(order_id),
                    amount: lock_amount,
                    payee: payee.to_string(),
                    query_id: 0,
                },
            )
            .await?;

        tracing::info!(%order_id, %tx, "escrow locked");
        Ok(tx)
    }

    async fn release(&self, order_id: &OrderId, payees: &[Payee]) -> Result<TxRef, EscrowError> {
        self.ensure_contract_ready()?;

        if payees.len() != 1 {
            return Err(EscrowError::InvalidPayees(
                "TON settlement contract currently supports exactly 1 payee".to_string(),
            ));
        }
        let actual_amount = parse_amount(&payees[0].amount)?;

        let tx = self
            .transfer(
                order_id,
                GAS_TRIGGER,
                TonPayload::SettlementRelease {
                    order_hash: order_key(order_id),
                    actual_amount,
                    // The contract does not verify this signature yet;
                    // zeros keep the message layout stable.
                    signature: [0u8; 64],
                    query_id: 0,
                },
            )
            .await?;

        tracing::info!(%order_id, %tx, "escrow released");
        Ok(tx)
    }

    async fn refund(&self, order_id: &OrderId, _payer: &str) -> Result<TxRef, EscrowError> {
        self.ensure_contract_ready()?;

        let tx = self
            .transfer(
                order_id,
                GAS_TRIGGER,
                TonPayload::SettlementRefund {
                    order_hash: order_key(order_id),
                    query_id: 0,
                },
            )
            .await?;

        tracing::info!(%order_id, %tx, "escrow refunded");
        Ok(tx)
    }
}
