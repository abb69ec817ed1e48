//! Filecoin adapter via a web3.storage-style upload endpoint.

use crate::adapter::{GetResult, PutRequest, PutResult, StorageAdapter};
use crate::error::StorageError;
use async_trait::async_trait;
use hawser_canonical::redact_string;
use serde::Deserialize;

const DEFAULT_ENDPOINT: &str = "https://api.web3.storage/upload";
const DEFAULT_GATEWAY: &str = "https://w3s.link";

pub struct FilecoinStorageAdapter {
    token: String,
    gateway: String,
    endpoint: String,
    client: reqwest::Client,
}

#[derive(Deserialize)]
struct UploadResponse {
    cid: Option<String>,
}

impl FilecoinStorageAdapter {
    pub fn new(token: String, gateway: Option<String>, endpoint: Option<String>) -> Self {
        Self {
            token,
            gateway: gateway.unwrap_or_else(|| DEFAULT_GATEWAY.to_string()),
            endpoint: endpoint.unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            client: reqwest::Client::new(),
        }
    }

    fn content_uri(&self, cid: &str) -> String {
        format!("{}/ipfs/{}", self.gateway, cid)
    }
}

#[async_trait]
impl StorageAdapter for FilecoinStorageAdapter {
    fn provider_id(&self) -> &'static str {
        "filecoin"
    }

    async fn put(&self, input: PutRequest) -> Result<PutResult, StorageError> {
        let size = input.bytes.len() as u64;

        let mut request = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.token)
            .header(reqwest::header::CONTENT_TYPE, &input.content_type)
            .body(input.bytes);
        if let Some(name) = &input.name {
            request = request.header("x-archive-name", name);
        }

        let response = request.send().await.map_err(StorageError::transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StorageError::Upload {
                provider: "filecoin",
                status: status.as_u16(),
                detail: redact_string(&body),
            });
        }

        let uploaded: UploadResponse = response.json().await.map_err(|err| {
            StorageError::InvalidResponse {
                provider: "filecoin",
                reason: redact_string(&err.to_string()),
            }
        })?;

        let cid = uploaded.cid.ok_or(StorageError::InvalidResponse {
            provider: "filecoin",
            reason: "upload response missing cid".to_string(),
        })?;

        tracing::debug!(%cid, size, "uploaded content to filecoin");
        Ok(PutResult {
            uri: self.content_uri(&cid),
            cid,
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
                provider: "filecoin",
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
}
