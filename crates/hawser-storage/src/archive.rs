//! Archive pipeline: optionally encrypt, then upload.
//!
//! Encryption is AES-256-GCM with a caller-owned 32-byte key. The
//! uploaded blob packs `nonce(12) ‖ ciphertext ‖ tag(16)` so a single
//! identifier round-trips the whole payload.

use crate::adapter::{PutRequest, PutResult, StorageAdapter};
use crate::error::StorageError;
use ring::aead::{Aad, LessSafeKey, Nonce, UnboundKey, AES_256_GCM, NONCE_LEN};
use ring::rand::{SecureRandom, SystemRandom};

/// GCM authentication tag length in bytes.
pub const TAG_LEN: usize = 16;

/// Encrypt a payload for archival.
pub fn encrypt_payload(plaintext: &[u8], key: &[u8; 32]) -> Result<Vec<u8>, StorageError> {
    let unbound = UnboundKey::new(&AES_256_GCM, key).map_err(|_| StorageError::Crypto)?;
    let sealing = LessSafeKey::new(unbound);

    let mut nonce_bytes = [0u8; NONCE_LEN];
    SystemRandom::new()
        .fill(&mut nonce_bytes)
        .map_err(|_| StorageError::Crypto)?;
    let nonce = Nonce::assume_unique_for_key(nonce_bytes);

    let mut packed = Vec::with_capacity(NONCE_LEN + plaintext.len() + TAG_LEN);
    packed.extend_from_slice(&nonce_bytes);
    let mut in_out = plaintext.to_vec();
    sealing
        .seal_in_place_append_tag(nonce, Aad::empty(), &mut in_out)
        .map_err(|_| StorageError::Crypto)?;
    packed.extend_from_slice(&in_out);

    Ok(packed)
}

/// Decrypt a packed archive payload.
pub fn decrypt_payload(packed: &[u8], key: &[u8; 32]) -> Result<Vec<u8>, StorageError> {
    if packed.len() < NONCE_LEN + TAG_LEN {
        return Err(StorageError::Crypto);
    }

    let unbound = UnboundKey::new(&AES_256_GCM, key).map_err(|_| StorageError::Crypto)?;
    let opening = LessSafeKey::new(unbound);

    let nonce_bytes: [u8; NONCE_LEN] = packed[..NONCE_LEN]
        .try_into()
        .map_err(|_| StorageError::Crypto)?;
    let nonce = Nonce::assume_unique_for_key(nonce_bytes);

    let mut in_out = packed[NONCE_LEN..].to_vec();
    let plaintext = opening
        .open_in_place(nonce, Aad::empty(), &mut in_out)
        .map_err(|_| StorageError::Crypto)?;

    Ok(plaintext.to_vec())
}

/// Archival options.
#[derive(Clone, Debug, Default)]
pub struct ArchiveOptions {
    pub encrypt: bool,
    pub encryption_key: Option<[u8; 32]>,
    pub name: Option<String>,
}

/// Archival outcome: the upload result plus whether the stored bytes
/// were encrypted.
#[derive(Clone, Debug)]
pub struct ArchiveOutcome {
    pub result: PutResult,
    pub encrypted: bool,
}

/// Optionally encrypt, then upload through the given adapter.
pub async fn archive_content(
    content: &[u8],
    content_type: &str,
    adapter: &dyn StorageAdapter,
    options: &ArchiveOptions,
) -> Result<ArchiveOutcome, StorageError> {
    let (bytes, encrypted) = match (&options.encryption_key, options.encrypt) {
        (Some(key), true) => (encrypt_payload(content, key)?, true),
        _ => (content.to_vec(), false),
    };

    let result = adapter
        .put(PutRequest {
            bytes,
            content_type: content_type.to_string(),
            name: options.name.clone(),
        })
        .await?;

    Ok(ArchiveOutcome { result, encrypted })
}
