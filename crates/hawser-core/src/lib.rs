//! # Hawser Core
//!
//! Shared building blocks for the Hawser settlement and anchoring layer:
//! - Order/transaction identifiers and the chain-family discriminator
//! - The configuration surface consumed by every factory
//! - The error taxonomy (configuration, state, transport)
//! - Contracts for the external chain clients the adapters dispatch to
//!
//! Hawser itself never speaks RPC: concrete EVM and TON clients live
//! outside the workspace and implement the traits in [`clients`]. The
//! adapters in `hawser-chain` and `hawser-settlement` are stateless
//! translators over those contracts.

pub mod clients;
pub mod config;
pub mod error;
pub mod types;

pub use clients::{ClientRegistry, EvmClient, TonClient, TonPayload};
pub use config::{
    AuditConfig, ChainConfig, HawserConfig, RevocationConfig, RevocationMode, SettlementConfig,
    SettlementMode, StorageConfig,
};
pub use error::{ClientError, ConfigError};
pub use types::{ChainFamily, OrderId, Payee, TxRef};
