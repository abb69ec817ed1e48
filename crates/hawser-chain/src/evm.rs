//! EVM anchor adapter.
//!
//! Anchors are zero-value self-transfers whose calldata is the anchor
//! memo. The adapter holds no chain state of its own: idempotency comes
//! from the [`AnchorIndex`], everything else from the chain.

use crate::adapter::ChainAdapter;
use crate::error::AnchorError;
use crate::index::AnchorIndex;
use crate::memo::{format_memo, parse_memo};
use crate::types::{AnchorInput, AnchorReceipt, AnchorResult, Balance, VerifyResult};
use async_trait::async_trait;
use chrono::Utc;
use hawser_canonical::PayloadHash;
use hawser_core::types::{format_units, native_symbol};
use hawser_core::{ChainConfig, ConfigError, EvmClient, TxRef};
use hawser_core::clients::EvmTransactionRequest;
use std::sync::Arc;

pub struct EvmAnchorAdapter {
    network: String,
    signing_configured: bool,
    client: Arc<dyn EvmClient>,
    index: Arc<dyn AnchorIndex>,
}

impl EvmAnchorAdapter {
    pub fn new(
        config: &ChainConfig,
        client: Arc<dyn EvmClient>,
        index: Arc<dyn AnchorIndex>,
    ) -> Self {
        Self {
            network: config.network.clone(),
            signing_configured: config.private_key.is_some(),
            client,
            index,
        }
    }

    fn ensure_signing(&self) -> Result<(), AnchorError> {
        if self.signing_configured {
            Ok(())
        } else {
            Err(ConfigError::Missing("chain.private_key").into())
        }
    }
}

#[async_trait]
impl ChainAdapter for EvmAnchorAdapter {
    fn network_id(&self) -> &str {
        &self.network
    }

    async fn anchor_hash(&self, input: AnchorInput) -> Result<AnchorResult, AnchorError> {
        if let Some(existing) = self.index.get(&input.anchor_id).await {
            tracing::debug!(anchor_id = %input.anchor_id, tx = %existing.tx, "anchor already recorded");
            return Ok(existing.to_result());
        }

        self.ensure_signing()?;

        let memo = format_memo(&input.anchor_id, &input.payload_hash);
        let to = self.client.signer_address().await?;

        let tx = self
            .client
            .send_transaction(EvmTransactionRequest {
                to,
                value: 0,
                data: memo.into_bytes(),
            })
            .await?;

        // Receipt lookup is enrichment: an unmined transaction still
        // anchors once included, so a missing block is not an error.
        let block = match self.client.transaction_info(&tx).await {
            Ok(info) => info.and_then(|i| i.block),
            Err(err) => {
                tracing::debug!(%tx, error = %err, "anchor receipt lookup failed");
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

        let memo = match std::str::from_utf8(&info.input) {
            Ok(memo) => memo,
            Err(_) => return Ok(VerifyResult::negative()),
        };

        match parse_memo(memo) {
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
        if !self.signing_configured {
            return Ok(Balance {
                balance: "0".to_string(),
                symbol,
            });
        }

        let wei = self.client.signer_balance().await?;
        Ok(Balance {
            balance: format_units(wei, 18),
            symbol,
        })
    }
}
