//! `coffre-crypto-core` — Pure cryptographic primitives for COFFRE.
//!
//! This crate is the audit target: zero network, zero async, zero I/O.
//! It owns the secure random source, the Argon2id + AES-256-GCM vault
//! envelope, and the credential generator. Serialization of vault contents
//! lives one level up in `coffre-vault`.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::arithmetic_side_effects))]

pub mod error;
pub mod memory;
pub mod random;

pub mod kdf;
pub mod symmetric;

pub mod envelope;

pub mod password;

pub use envelope::{open, seal, Envelope, FORMAT_VERSION, MAGIC};
pub use error::CryptoError;
pub use kdf::{derive, Argon2idParams, KdfPreset};
pub use memory::SecretBuffer;
pub use password::{
    estimate_passphrase_entropy, estimate_password_entropy, generate_passphrase,
    generate_passphrase_with, generate_password, generate_password_with, Capitalization,
    PassphrasePolicy, PassphraseSeparator, PasswordPolicy, DEFAULT_PASSWORD_LENGTH,
    DEFAULT_WORD_COUNT,
};
pub use symmetric::{decrypt, encrypt, SealedData};
