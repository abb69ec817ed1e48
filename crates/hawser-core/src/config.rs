//! Configuration surface consumed by the Hawser factories.
//!
//! Everything deserializes with serde and carries usable defaults, so a
//! partial document configures only the sections it names. Credential
//! fields are all optional: their presence gates signing operations and
//! adapter construction, never deserialization.

use crate::types::{ChainFamily, DEFAULT_NETWORK};
use serde::{Deserialize, Serialize};

/// Chain connection and signing configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainConfig {
    /// Network identifier. `ton-*` selects the TON family; everything
    /// else is EVM-compatible.
    pub network: String,

    /// RPC endpoint override for the concrete client.
    pub rpc_url: Option<String>,

    /// Signing key for EVM networks. Presence gates every
    /// state-mutating call.
    pub private_key: Option<String>,

    /// Escrow/settlement contract address on the configured network.
    pub escrow_contract_address: Option<String>,

    /// Wallet mnemonic for TON networks.
    pub ton_mnemonic: Option<String>,

    /// TON workchain id (0 = basechain).
    pub ton_workchain: Option<i32>,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            network: DEFAULT_NETWORK.to_string(),
            rpc_url: None,
            private_key: None,
            escrow_contract_address: None,
            ton_mnemonic: None,
            ton_workchain: None,
        }
    }
}

impl ChainConfig {
    /// Chain family the configured network belongs to.
    pub fn family(&self) -> ChainFamily {
        ChainFamily::from_network(&self.network)
    }
}

/// How order settlement is executed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SettlementMode {
    /// Book-entry settlement in the marketplace ledger; no chain calls.
    #[default]
    Ledger,
    /// On-chain escrow contract settlement.
    Contract,
}

/// Settlement configuration.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SettlementConfig {
    pub mode: SettlementMode,

    /// ERC-20 token used for escrowed amounts on EVM networks.
    pub token_address: Option<String>,
}

/// Decentralized storage configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Provider discriminator: `ipfs`, `arweave`, or `filecoin`.
    /// Unrecognized values disable archival rather than erroring.
    pub provider: String,

    /// Read gateway override.
    pub gateway: Option<String>,

    /// Pinning JWT (IPFS via Pinata).
    pub pinata_jwt: Option<String>,

    /// Path to the Arweave JWK keyfile.
    pub arweave_keyfile: Option<String>,

    /// Arweave upload-service endpoint override.
    pub arweave_endpoint: Option<String>,

    /// Access token (Filecoin upload service).
    pub filecoin_token: Option<String>,

    /// Filecoin upload endpoint override.
    pub filecoin_endpoint: Option<String>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            provider: "ipfs".to_string(),
            gateway: None,
            pinata_jwt: None,
            arweave_keyfile: None,
            arweave_endpoint: None,
            filecoin_token: None,
            filecoin_endpoint: None,
        }
    }
}

/// Revocation delivery mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RevocationMode {
    /// Revocations are recorded but not delivered anywhere.
    #[default]
    None,
    /// Deliver each revocation to the configured webhook endpoint.
    Webhook,
}

/// Revocation webhook configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct RevocationConfig {
    pub mode: RevocationMode,

    /// Webhook endpoint; required when `mode` is `webhook`.
    pub endpoint: Option<String>,

    /// Delivery timeout in milliseconds.
    pub timeout_ms: u64,

    /// HMAC-SHA256 signing secret for the delivery signature header.
    pub signing_secret: Option<String>,

    /// Static API key forwarded with each delivery.
    pub api_key: Option<String>,
}

impl Default for RevocationConfig {
    fn default() -> Self {
        Self {
            mode: RevocationMode::None,
            endpoint: None,
            timeout_ms: 8_000,
            signing_secret: None,
            api_key: None,
        }
    }
}

/// Audit pipeline configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    /// Extra payload fields to redact before hashing and archival, on
    /// top of the built-in sensitive set.
    pub redact_fields: Vec<String>,

    /// Payloads whose serialized form exceeds this size are archived to
    /// decentralized storage; only the pointer is kept inline.
    pub inline_threshold_bytes: usize,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            redact_fields: Vec::new(),
            inline_threshold_bytes: 4 * 1024,
        }
    }
}

/// Top-level Hawser configuration.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HawserConfig {
    pub chain: ChainConfig,
    pub settlement: SettlementConfig,
    pub storage: StorageConfig,
    pub revocation: RevocationConfig,
    pub audit: AuditConfig,
}
