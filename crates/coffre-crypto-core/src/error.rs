//! Cryptographic error types for `coffre-crypto-core`.

use thiserror::Error;

/// Errors produced by cryptographic operations.
///
/// Messages never carry passwords, keys, or plaintext.
#[derive(Debug, Error)]
pub enum CryptoError {
    /// Generator policy out of bounds or self-contradictory (empty charset).
    #[error("invalid generator policy: {0}")]
    InvalidPolicy(String),

    /// Envelope string failed structural, version, or field-width checks.
    #[error("malformed envelope: {0}")]
    MalformedEnvelope(String),

    /// Authentication tag verification failed.
    ///
    /// Wrong password, corrupted ciphertext, and tampering all land here on
    /// purpose: callers must not be able to tell them apart.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// The platform CSPRNG could not supply bytes. Fatal, never retried.
    #[error("secure random source unavailable: {0}")]
    RandomSourceUnavailable(String),

    /// Key derivation failed (Argon2id parameter validation, memory allocation).
    #[error("key derivation failed: {0}")]
    KeyDerivation(String),

    /// Symmetric encryption failure (AES-256-GCM).
    #[error("encryption error: {0}")]
    Encryption(String),

    /// Invalid key material (wrong length).
    #[error("invalid key material: {0}")]
    InvalidKeyMaterial(String),
}
