//! Vault error types for `coffre-vault`.

use coffre_crypto_core::CryptoError;
use thiserror::Error;

/// Errors produced by vault operations.
///
/// The four engine failures a caller must distinguish (`InvalidPolicy`,
/// `MalformedEnvelope`, `AuthenticationFailed`, `RandomSourceUnavailable`)
/// are top-level variants rather than a wrapped [`CryptoError`].
#[derive(Debug, Error)]
pub enum VaultError {
    /// Generator policy out of bounds or with an empty charset.
    #[error("invalid generator policy: {0}")]
    InvalidPolicy(String),

    /// The stored envelope is not a recognizable COFFRE envelope.
    #[error("malformed envelope: {0}")]
    MalformedEnvelope(String),

    /// Wrong master password or tampered envelope. Deliberately carries no detail.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// The platform CSPRNG failed. Fatal, never retried.
    #[error("secure random source unavailable: {0}")]
    RandomSourceUnavailable(String),

    /// The envelope authenticated but its contents are not a valid vault.
    #[error("corrupt vault payload: {0}")]
    CorruptPayload(String),

    /// Argon2id rejected its parameters or failed to allocate.
    #[error("key derivation failed: {0}")]
    KeyDerivation(String),

    /// Encryption or serialization of the vault failed.
    #[error("encryption error: {0}")]
    Encryption(String),

    /// An entry failed validation (e.g. empty name).
    #[error("invalid entry: {0}")]
    InvalidEntry(String),

    /// Entry not found by ID.
    #[error("entry not found: {0}")]
    EntryNotFound(String),

    /// The backing store rejected a load or save.
    #[error("storage error: {0}")]
    Storage(String),

    /// I/O error from the filesystem.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<CryptoError> for VaultError {
    fn from(err: CryptoError) -> Self {
        match err {
            CryptoError::InvalidPolicy(msg) => Self::InvalidPolicy(msg),
            CryptoError::MalformedEnvelope(msg) => Self::MalformedEnvelope(msg),
            CryptoError::AuthenticationFailed => Self::AuthenticationFailed,
            CryptoError::RandomSourceUnavailable(msg) => Self::RandomSourceUnavailable(msg),
            CryptoError::KeyDerivation(msg) => Self::KeyDerivation(msg),
            CryptoError::Encryption(msg) | CryptoError::InvalidKeyMaterial(msg) => {
                Self::Encryption(msg)
            }
        }
    }
}
