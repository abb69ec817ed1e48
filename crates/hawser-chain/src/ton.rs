//! TON anchor adapter.
//!
//! Same memo protocol as the EVM adapter, carried as a comment payload
//! on a zero-value transfer to the adapter's own wallet.

use crate::adapter::ChainAdapter;
use crate::error::AnchorError;
use crate::index::AnchorIndex;
use crate::memo::{format_memo, parse_memo};
use crate::types::{AnchorInput, AnchorReceipt, AnchorResult, Balance, VerifyResult};
use async_trait::async_trait;
use chrono::Utc;
use hawser_canonical::PayloadHash;
use hawser_core::types::{format_units, native_symbol};
use hawser_core::{ChainConfig, ConfigError, TonClient, TonPayload, TxRef};
use std::sync::Arc;

pub struct TonAnchorAdapter {
    network: String,
    wallet_configured: bool,
    client: Arc<dyn TonClient>,
    index: Arc<dyn AnchorIndex>,
}

impl TonAnchorAdapter {
    pub fn new(
        config: &ChainConfig,
        client: Arc<dyn TonClient>,
        index: Arc<dyn AnchorIndex>,
    ) -> Self {
        Self {
            network: config.network.clone(),
            wallet_configured: config
                .ton_mnemonic
                .as_deref()
                .is_some_and(|m| !m.trim().is_empty()),
            client,
            index,
        }
    }

    fn ensure_wallet(&self) -> Result<(), AnchorError> {
        if self.wallet_configured {
            Ok(())
        } else {
            Err(ConfigError::Missing("chain.ton_mnemonic").into())
        }
    }
}

#[async_trait]
impl ChainAdapter for TonAnchorAdapter {
    fn network_id(&self) -> &str {
        &self.network
    }

    async fn anchor_hash(&self, input: AnchorInput) -> Result<AnchorResult, AnchorError> {
        if let Some(existing) = self.index.get(&input.anchor_id).await {
            tracing::debug!(anchor_id = %input.anchor_id, tx = %existing.tx, "anchor already recorded");
            return Ok(existing.to_result());
        }

        self.ensure_wallet()?;

        let memo = format_memo(&input.anchor_id, &input.payload_hash);
        let wallet = self.client.wallet_address().await?;
        let tx = self
            .client
            .transfer(&wallet, 0, TonPayload::Memo { text: memo })
            .await?;

        let block = match self.client.transaction_info(&tx).await {
            Ok(info) => info.and_then(|i| i.block),
            Err(err) => {
                tracing::debug!(%tx, error = %err, "anchor lookup failed");
                None
            }
        };

        let receipt = self
            .index
            .record(AnchorReceipt {
                anchor_id: input.anchor_id,
                payload_hash: input.payload_hash,
                tx,
                block,
                network: self.network.clone(),
                created_at: Utc::now(),
            })
            .await;

        tracing::info!(anchor_id = %receipt.anchor_id, tx = %receipt.tx, network = %receipt.network, "anchored payload hash");
        Ok(receipt.to_result())
    }

    async fn verify_anchor(
        &self,
        payload_hash: &PayloadHash,
        tx: &TxRef,
    ) -> Result<VerifyResult, AnchorError> {
        let info = match self.client.transaction_info(tx).await? {
            Some(info) => info,
            None => return Ok(VerifyResult::negative()),
        };

        let memo = match info.memo {
            Some(memo) => memo,
            None => return Ok(VerifyResult::negative()),
        };

        match parse_memo(&memo) {
            Some((anchor_id, recorded_hash)) => Ok(VerifyResult {
                ok: recorded_hash == *payload_hash,
                anchor_id: Some(anchor_id),
                block: info.block,
                timestamp: info.timestamp,
            }),
            None => Ok(VerifyResult::negative()),
        }
    }

    async fn get_balance(&self) -> Result<Balance, AnchorError> {
        let symbol = native_symbol(&self.network).to_string();
        if !self.wallet_configured {
            return Ok(Balance {
                balance: "0".to_string(),
                symbol,
            });
        }

        let nanotons = self.client.wallet_balance().await?;
        Ok(Balance {
            balance: format_units(nanotons, 9),
            symbol,
        })
    }
}
