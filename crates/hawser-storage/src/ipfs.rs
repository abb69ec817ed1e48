//! IPFS adapter via the Pinata pinning API, with public-gateway reads.

use crate::adapter::{GetResult, PutRequest, PutResult, StorageAdapter};
use crate::error::StorageError;
use async_trait::async_trait;
use hawser_canonical::redact_string;
use serde::Deserialize;

const PIN_URL: &str = "https://api.pinata.cloud/pinning/pinFileToIPFS";
const PIN_LIST_URL: &str = "https://api.pinata.cloud/data/pinList";
const DEFAULT_GATEWAY: &str = "https://w3s.link";

pub struct IpfsStorageAdapter {
    pinata_jwt: String,
    gateway: String,
    client: reqwest::Client,
}

#[derive(Deserialize)]
struct PinResponse {
    #[serde(rename = "IpfsHash")]
    ipfs_hash: String,
    #[serde(rename = "PinSize")]
    pin_size: u64,
}

#[derive(Deserialize)]
struct PinListResponse {
    count: u64,
}

impl IpfsStorageAdapter {
    pub fn new(pinata_jwt: String, gateway: Option<String>) -> Self {
        Self {
            pinata_jwt,
            gateway: gateway.unwrap_or_else(|| DEFAULT_GATEWAY.to_string()),
            client: reqwest::Client::new(),
        }
    }

    fn content_uri(&self, cid: &str) -> String {
        format!("{}/ipfs/{}", self.gateway, cid)
    }
}

#[async_trait]
impl StorageAdapter for IpfsStorageAdapter {
    fn provider_id(&self) -> &'static str {
        "ipfs"
    }

    async fn put(&self, input: PutRequest) -> Result<PutResult, StorageError> {
        let part = reqwest::multipart::Part::bytes(input.bytes)
            .file_name(input.name.unwrap_or_else(|| "archive.bin".to_string()))
            .mime_str(&input.content_type)
            .map_err(|_| StorageError::InvalidContentType(input.content_type.clone()))?;
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(PIN_URL)
            .bearer_auth(&self.pinata_jwt)
            .multipart(form)
            .send()
            .await
            .map_err(StorageError::transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StorageError::Upload {
                provider: "ipfs",
                status: status.as_u16(),
                detail: redact_string(&body),
            });
        }

        let pinned: PinResponse = response.json().await.map_err(|err| {
            StorageError::InvalidResponse {
                provider: "ipfs",
                reason: redact_string(&err.to_string()),
            }
        })?;

        tracing::debug!(cid = %pinned.ipfs_hash, size = pinned.pin_size, "pinned content to ipfs");
        Ok(PutResult {
            uri: self.content_uri(&pinned.ipfs_hash),
            cid: pinned.ipfs_hash,
            size: pinned.pin_size,
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
                provider: "ipfs",
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

    async fn is_pinned(&self, cid: &str) -> Result<bool, StorageError> {
        let response = self
            .client
            .get(PIN_LIST_URL)
            .query(&[("hashContains", cid), ("status", "pinned")])
            .bearer_auth(&self.pinata_jwt)
            .send()
            .await
            .map_err(StorageError::transport)?;

        if !response.status().is_success() {
            return Ok(false);
        }

        let list: PinListResponse = response.json().await.map_err(|err| {
            StorageError::InvalidResponse {
                provider: "ipfs",
                reason: redact_string(&err.to_string()),
            }
        })?;
        Ok(list.count > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gateway_default_and_override() {
        let default = IpfsStorageAdapter::new("jwt".to_string(), None);
        assert_eq!(default.content_uri("bafy1"), "https://w3s.link/ipfs/bafy1");

        let custom = IpfsStorageAdapter::new(
            "jwt".to_string(),
            Some("https://gw.example.test".to_string()),
        );
        assert_eq!(
            custom.content_uri("bafy1"),
            "https://gw.example.test/ipfs/bafy1"
        );
    }

    #[test]
    fn test_pin_response_shape() {
        let parsed: PinResponse =
            serde_json::from_str(r#"{"IpfsHash": "bafyabc", "PinSize": 321}"#).unwrap();
        assert_eq!(parsed.ipfs_hash, "bafyabc");
        assert_eq!(parsed.pin_size, 321);
    }
}
