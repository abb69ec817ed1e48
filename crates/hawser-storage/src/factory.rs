//! Storage adapter factory.

use crate::adapter::StorageAdapter;
use crate::arweave::ArweaveStorageAdapter;
use crate::filecoin::FilecoinStorageAdapter;
use crate::ipfs::IpfsStorageAdapter;
use hawser_core::StorageConfig;
use std::path::Path;

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Select a storage adapter from configuration.
///
/// `None` means "archival disabled", never an error: the selected
/// provider's required credential is absent, the keyfile is unusable,
/// or the provider string is unrecognized. Callers skip archival in
/// that case rather than failing the surrounding operation.
pub fn create_storage_adapter(config: &StorageConfig) -> Option<Box<dyn StorageAdapter>> {
    match config.provider.trim() {
        "ipfs" => {
            let jwt = present(&config.pinata_jwt)?;
            Some(Box::new(IpfsStorageAdapter::new(
                jwt.to_string(),
                config.gateway.clone(),
            )))
        }
        "arweave" => {
            let keyfile = present(&config.arweave_keyfile)?;
            match ArweaveStorageAdapter::from_keyfile(
                Path::new(keyfile),
                config.gateway.clone(),
                config.arweave_endpoint.clone(),
            ) {
                Ok(adapter) => Some(Box::new(adapter)),
                Err(err) => {
                    tracing::warn!(error = %err, "arweave keyfile unusable, archival disabled");
                    None
                }
            }
        }
        "filecoin" => {
            let token = present(&config.filecoin_token)?;
            Some(Box::new(FilecoinStorageAdapter::new(
                token.to_string(),
                config.gateway.clone(),
                config.filecoin_endpoint.clone(),
            )))
        }
        other => {
            tracing::debug!(provider = other, "unrecognized storage provider, archival disabled");
            None
        }
    }
}
