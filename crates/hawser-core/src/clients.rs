//! Contracts for the external chain clients Hawser dispatches to.
//!
//! Concrete RPC clients (key handling, transaction signing, wire
//! encoding) live outside this workspace. The adapters only depend on
//! these traits, which keeps every chain operation mockable and keeps
//! signing primitives out of the core.

use crate::error::{ClientError, ConfigError};
use crate::types::TxRef;
use async_trait::async_trait;
use std::sync::Arc;

/// Transaction request submitted through an EVM client.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvmTransactionRequest {
    /// Recipient address (`0x`-prefixed hex).
    pub to: String,
    /// Value in wei.
    pub value: u128,
    /// Calldata.
    pub data: Vec<u8>,
}

/// Confirmed-transaction details read back from an EVM chain.
#[derive(Clone, Debug, Default)]
pub struct EvmTransactionInfo {
    /// Raw transaction input (calldata) as recorded on-chain.
    pub input: Vec<u8>,
    /// Block number, if the transaction is mined.
    pub block: Option<u64>,
    /// Block timestamp (unix seconds), if known.
    pub timestamp: Option<i64>,
}

/// Minimal EVM client contract.
///
/// The client owns the signing key and the RPC transport; the caller
/// provides fully-encoded calldata. Read methods only consult chain
/// state, never local caches.
#[async_trait]
pub trait EvmClient: Send + Sync {
    /// Address of the signing account.
    async fn signer_address(&self) -> Result<String, ClientError>;

    /// Sign and submit a transaction, returning its hash.
    async fn send_transaction(&self, tx: EvmTransactionRequest) -> Result<TxRef, ClientError>;

    /// Execute a read-only contract call.
    async fn call(&self, to: &str, data: Vec<u8>) -> Result<Vec<u8>, ClientError>;

    /// Look up a transaction by hash. `Ok(None)` when unknown.
    async fn transaction_info(&self, tx: &TxRef) -> Result<Option<EvmTransactionInfo>, ClientError>;

    /// Native balance of the signing account, in wei.
    async fn signer_balance(&self) -> Result<u128, ClientError>;
}

/// TON settlement message op codes, matching the settlement contract.
pub const TON_OP_LOCK: u32 = 1;
pub const TON_OP_RELEASE: u32 = 2;
pub const TON_OP_REFUND: u32 = 3;

/// Typed message body for a TON transfer.
///
/// The settlement contract ignores empty message bodies, so every
/// transfer carries a payload. BOC cell encoding is the concrete
/// client's responsibility; Hawser only fixes the semantics: op code,
/// field order, and widths.
#[derive(Clone, Debug, PartialEq)]
pub enum TonPayload {
    /// `lock_settlement`: op(32) query_id(64) order_hash(256)
    /// amount(coins) payee(address).
    SettlementLock {
        order_hash: [u8; 32],
        amount: u128,
        payee: String,
        query_id: u64,
    },

    /// `release_settlement`: op(32) query_id(64) order_hash(256)
    /// actual_amount(coins) signature(512).
    SettlementRelease {
        order_hash: [u8; 32],
        actual_amount: u128,
        signature: [u8; 64],
        query_id: u64,
    },

    /// `refund_settlement`: op(32) query_id(64) order_hash(256).
    SettlementRefund {
        order_hash: [u8; 32],
        query_id: u64,
    },

    /// Free-text comment payload (used for anchor memos).
    Memo { text: String },
}

impl TonPayload {
    /// Settlement op code; `None` for memo payloads.
    pub fn op_code(&self) -> Option<u32> {
        match self {
            TonPayload::SettlementLock { .. } => Some(TON_OP_LOCK),
            TonPayload::SettlementRelease { .. } => Some(TON_OP_RELEASE),
            TonPayload::SettlementRefund { .. } => Some(TON_OP_REFUND),
            TonPayload::Memo { .. } => None,
        }
    }
}

/// Confirmed-transaction details read back from a TON chain.
#[derive(Clone, Debug, Default)]
pub struct TonTransactionInfo {
    /// Decoded comment payload, if the message body was a memo.
    pub memo: Option<String>,
    /// Masterchain block seqno, if known.
    pub block: Option<u64>,
    /// Transaction unix time, if known.
    pub timestamp: Option<i64>,
}

/// Minimal TON client contract.
#[async_trait]
pub trait TonClient: Send + Sync {
    /// Transfer `amount` nanotons to `to` with the given message body.
    async fn transfer(
        &self,
        to: &str,
        amount: u128,
        payload: TonPayload,
    ) -> Result<TxRef, ClientError>;

    /// Address of the configured wallet.
    async fn wallet_address(&self) -> Result<String, ClientError>;

    /// Look up a transaction. `Ok(None)` when unknown.
    async fn transaction_info(&self, tx: &TxRef) -> Result<Option<TonTransactionInfo>, ClientError>;

    /// Wallet balance in nanotons.
    async fn wallet_balance(&self) -> Result<u128, ClientError>;
}

/// Client handles the factories bind adapters against.
///
/// Registering a client performs no I/O; connection management belongs
/// to the client implementation.
#[derive(Clone, Default)]
pub struct ClientRegistry {
    evm: Option<Arc<dyn EvmClient>>,
    ton: Option<Arc<dyn TonClient>>,
}

impl ClientRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_evm(mut self, client: Arc<dyn EvmClient>) -> Self {
        self.evm = Some(client);
        self
    }

    pub fn with_ton(mut self, client: Arc<dyn TonClient>) -> Self {
        self.ton = Some(client);
        self
    }

    pub fn evm(&self) -> Result<Arc<dyn EvmClient>, ConfigError> {
        self.evm
            .clone()
            .ok_or(ConfigError::Missing("an EVM chain client"))
    }

    pub fn ton(&self) -> Result<Arc<dyn TonClient>, ConfigError> {
        self.ton
            .clone()
            .ok_or(ConfigError::Missing("a TON chain client"))
    }
}
