//! `coffre-vault` — Vault codec for COFFRE.
//!
//! Owns the decrypted vault model, turns it into the opaque envelope string
//! the server stores (and back), exposes the credential generator with
//! engine errors, and defines the storage seam. All cryptography is
//! delegated to `coffre-crypto-core`.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::arithmetic_side_effects))]

pub mod codec;
pub mod config;
pub mod error;
pub mod generator;
pub mod model;
pub mod storage;

pub use codec::{create_empty_vault, decrypt_vault, encrypt_vault, VaultCodec};
pub use coffre_crypto_core::kdf::{Argon2idParams, KdfPreset};
pub use coffre_crypto_core::password::{
    Capitalization, PassphrasePolicy, PassphraseSeparator, PasswordPolicy,
};
pub use config::EngineConfig;
pub use error::VaultError;
pub use generator::{generate_passphrase, generate_password};
pub use model::{EntryUpdate, NewEntry, Vault, VaultEntry};
pub use storage::{open_or_create, persist, FileStore, MemoryStore, VaultDocument, VaultStore};
