//! # Hawser Storage Adapters
//!
//! Decentralized storage behind one contract, selected from
//! configuration:
//! - IPFS via the Pinata pinning API
//! - Arweave via a configured upload service (JWK keyfile)
//! - Filecoin via a web3.storage-style upload endpoint
//!
//! The factory returns `None` — "archival disabled" — when the selected
//! provider's credential is absent or the provider string is
//! unrecognized; callers never receive a non-functional adapter.
//!
//! Confidentiality is the caller's concern: adapters are agnostic to
//! plaintext vs ciphertext. The [`archive`] module offers the standard
//! encrypt-then-upload path.

pub mod adapter;
pub mod archive;
pub mod arweave;
pub mod error;
pub mod factory;
pub mod filecoin;
pub mod ipfs;

pub use adapter::{GetResult, PutRequest, PutResult, StorageAdapter};
pub use archive::{archive_content, decrypt_payload, encrypt_payload, ArchiveOptions, ArchiveOutcome};
pub use arweave::ArweaveStorageAdapter;
pub use error::StorageError;
pub use factory::create_storage_adapter;
pub use filecoin::FilecoinStorageAdapter;
pub use ipfs::IpfsStorageAdapter;
