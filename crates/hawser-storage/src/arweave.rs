//! Arweave adapter.
//!
//! Uploads go through an upload service (ArDrive Turbo-style) that
//! signs and funds the transaction with the wallet registered for the
//! configured keyfile; building and RSA-signing raw Arweave
//! transactions is a signing primitive and stays outside this layer.
//! The keyfile gates adapter construction and yields the owner address
//! sent with each upload. Reads go straight to the gateway.

use crate::adapter::{GetResult, PutRequest, PutResult, StorageAdapter};
use crate::error::StorageError;
use async_trait::async_trait;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use hawser_canonical::redact_string;
use serde::Deserialize;
use sha2::{Digest, Sha256};
use std::path::Path;

const DEFAULT_GATEWAY: &str = "https://arweave.net";
const DEFAULT_UPLOAD_ENDPOINT: &str = "https://upload.ardrive.io/v1/tx";

pub struct ArweaveStorageAdapter {
    owner_address: String,
    gateway: String,
    endpoint: String,
    client: reqwest::Client,
}

#[derive(Deserialize)]
struct Keyfile {
    /// RSA modulus, base64url. The wallet address derives from it.
    n: String,
}

#[derive(Deserialize)]
struct UploadResponse {
    id: String,
}

impl ArweaveStorageAdapter {
    /// Load the JWK keyfile and bind the adapter.
    ///
    /// Fails when the keyfile is unreadable or not a JWK — the factory
    /// treats that as "archival disabled".
    pub fn from_keyfile(
        path: &Path,
        gateway: Option<String>,
        endpoint: Option<String>,
    ) -> Result<Self, StorageError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|err| StorageError::Keyfile(err.to_string()))?;
        let keyfile: Keyfile = serde_json::from_str(&raw)
            .map_err(|_| StorageError::Keyfile("not a JWK keyfile".to_string()))?;

        Ok(Self {
            owner_address: owner_address(&keyfile.n)?,
            gateway: gateway.unwrap_or_else(|| DEFAULT_GATEWAY.to_string()),
            endpoint: endpoint.unwrap_or_else(|| DEFAULT_UPLOAD_ENDPOINT.to_string()),
            client: reqwest::Client::new(),
        })
    }

    /// Wallet address derived from the keyfile.
    pub fn owner(&self) -> &str {
        &self.owner_address
    }

    fn content_uri(&self, id: &str) -> String {
        format!("{}/{}", self.gateway, id)
    }
}

/// Arweave wallet address: base64url(sha256(modulus bytes)).
fn owner_address(modulus_b64: &str) -> Result<String, StorageError> {
    let modulus = URL_SAFE_NO_PAD
        .decode(modulus_b64.trim_end_matches('='))
        .map_err(|_| StorageError::Keyfile("modulus is not base64url".to_string()))?;
    let digest = Sha256::digest(&modulus);
    Ok(URL_SAFE_NO_PAD.encode(digest))
}

#[async_trait]
impl StorageAdapter for ArweaveStorageAdapter {
    fn provider_id(&self) -> &'static str {
        "arweave"
    }

    async fn put(&self, input: PutRequest) -> Result<PutResult, StorageError> {
        let size = input.bytes.len() as u64;

        let mut request = self
            .client
            .post(&self.endpoint)
            .header(reqwest::header::CONTENT_TYPE, &input.content_type)
            .header("x-arweave-owner", &self.owner_address)
            .body(input.bytes);
        if let Some(name) = &input.name {
            request = request.header("x-arweave-name", name);
        }

        let response = request.send().await.map_err(StorageError::transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StorageError::Upload {
                provider: "arweave",
                status: status.as_u16(),
                detail: redact_string(&body),
            });
        }

        let uploaded: UploadResponse = response.json().await.map_err(|err| {
            StorageError::InvalidResponse {
                provider: "arweave",
                reason: redact_string(&err.to_string()),
            }
        })?;

        tracing::debug!(id = %uploaded.id, size, "uploaded content to arweave");
        Ok(PutResult {
            uri: self.content_uri(&uploaded.id),
            cid: uploaded.id,
            size,
        })
    }

    async fn get(&self, cid: &str) -> Result<GetResult, StorageError> {
        let response = self
            .client
            .get(self.content_uri(cid))
            .send()
            .await
            .map_err(StorageError::transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(StorageError::Fetch {
                provider: "arweave",
                status: status.as_u16(),
                cid: cid.to_string(),
            });
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = response
            .bytes()
            .await
            .map_err(StorageError::transport)?
            .to_vec();

        Ok(GetResult { bytes, content_type })
    }

    /// Availability check: Arweave data is permanent once accepted, so
    /// "pinned" means the gateway can serve it.
    async fn is_pinned(&self, cid: &str) -> Result<bool, StorageError> {
        let response = self
            .client
            .head(self.content_uri(cid))
            .send()
            .await
            .map_err(StorageError::transport)?;
        Ok(response.status().is_success())
    }
}
