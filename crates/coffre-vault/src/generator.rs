//! Credential generation on the engine surface.
//!
//! Thin wrappers over `coffre_crypto_core::password` that report failures
//! as [`VaultError`] and can start from the configured defaults.

use coffre_crypto_core::password::{self, PassphrasePolicy, PasswordPolicy};

use crate::config::EngineConfig;
use crate::error::VaultError;

/// Generate a password under `policy`.
///
/// # Errors
///
/// Returns [`VaultError::InvalidPolicy`] for an out-of-range length or an
/// empty charset, and [`VaultError::RandomSourceUnavailable`] if the CSPRNG
/// fails.
pub fn generate_password(policy: &PasswordPolicy) -> Result<String, VaultError> {
    Ok(password::generate_password(policy)?)
}

/// Generate a passphrase under `policy`.
///
/// # Errors
///
/// Returns [`VaultError::InvalidPolicy`] for an out-of-range word count and
/// [`VaultError::RandomSourceUnavailable`] if the CSPRNG fails.
pub fn generate_passphrase(policy: &PassphrasePolicy) -> Result<String, VaultError> {
    Ok(password::generate_passphrase(policy)?)
}

impl EngineConfig {
    /// Generate a password with the configured default policy.
    ///
    /// # Errors
    ///
    /// See [`generate_password`].
    pub fn generate_default_password(&self) -> Result<String, VaultError> {
        generate_password(&self.password_defaults)
    }

    /// Generate a passphrase with the configured default policy.
    ///
    /// # Errors
    ///
    /// See [`generate_passphrase`].
    pub fn generate_default_passphrase(&self) -> Result<String, VaultError> {
        generate_passphrase(&self.passphrase_defaults)
    }
}
