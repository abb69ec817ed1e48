//! The decentralized storage contract.

use crate::error::StorageError;
use async_trait::async_trait;

/// Upload request. `bytes` may be plaintext or ciphertext — encryption
/// is the caller's responsibility when confidentiality is required.
#[derive(Clone, Debug)]
pub struct PutRequest {
    pub bytes: Vec<u8>,
    pub content_type: String,
    pub name: Option<String>,
}

/// Upload outcome.
///
/// `cid` is stable and re-derivable from content for content-addressed
/// providers (IPFS); for others it is the provider's canonical
/// identifier (e.g. an Arweave transaction id).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PutResult {
    pub cid: String,
    pub uri: String,
    pub size: u64,
}

/// Content read back from a provider.
#[derive(Clone, Debug)]
pub struct GetResult {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

/// Decentralized storage adapter contract.
///
/// Adapters never cache content beyond the scope of a call.
#[async_trait]
pub trait StorageAdapter: Send + Sync {
    fn provider_id(&self) -> &'static str;

    /// Upload content, returning its identifier and retrieval URI.
    async fn put(&self, input: PutRequest) -> Result<PutResult, StorageError>;

    /// Retrieve content by identifier.
    async fn get(&self, cid: &str) -> Result<GetResult, StorageError>;

    /// Whether the content is still pinned / available. Providers
    /// without a pinning API report `false`.
    async fn is_pinned(&self, _cid: &str) -> Result<bool, StorageError> {
        Ok(false)
    }
}
