//! Vault codec: turns a decrypted [`Vault`] into an envelope string and back.
//!
//! Serialization is `serde_json` in declaration order with absent optional
//! fields omitted, so the same vault always yields the same plaintext.
//! The plaintext buffer is zeroized as soon as it has been sealed or parsed.
//!
//! The master password enters as a [`SecretString`] and is exposed only for
//! the duration of the key derivation inside `coffre-crypto-core`.

use coffre_crypto_core::envelope::{self, Envelope, FORMAT_VERSION};
use coffre_crypto_core::kdf::{Argon2idParams, KdfPreset};
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use secrecy::{ExposeSecret, SecretString};
use zeroize::Zeroize;

use crate::config::EngineConfig;
use crate::error::VaultError;
use crate::model::Vault;

/// Seals and opens vaults with a fixed set of Argon2id costs.
///
/// Costs only apply to sealing; opening always uses the costs recorded in
/// the envelope. Holds no secrets, so it can be shared freely across threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VaultCodec {
    params: Argon2idParams,
}

impl Default for VaultCodec {
    fn default() -> Self {
        Self::from_preset(KdfPreset::default())
    }
}

impl VaultCodec {
    /// Codec with explicit Argon2id costs.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::KeyDerivation`] if the costs fall outside the
    /// window every envelope reader accepts.
    pub fn new(params: Argon2idParams) -> Result<Self, VaultError> {
        params.validate()?;
        Ok(Self { params })
    }

    /// Codec for one of the fixed presets.
    #[must_use]
    pub const fn from_preset(preset: KdfPreset) -> Self {
        Self {
            params: preset.params(),
        }
    }

    /// Codec for the preset named in `config`.
    #[must_use]
    pub const fn from_config(config: &EngineConfig) -> Self {
        Self::from_preset(config.kdf_preset)
    }

    /// The costs new envelopes are sealed with.
    #[must_use]
    pub const fn params(&self) -> &Argon2idParams {
        &self.params
    }

    /// Encrypt `vault` under `password` with `OsRng`.
    ///
    /// # Errors
    ///
    /// See [`VaultCodec::encrypt_with`].
    pub fn encrypt(&self, vault: &Vault, password: &SecretString) -> Result<String, VaultError> {
        self.encrypt_with(vault, password, &mut OsRng)
    }

    /// Encrypt `vault` under `password`, drawing salt and nonce from `rng`.
    ///
    /// Every call produces a different envelope, even for identical input.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::RandomSourceUnavailable`] if the salt or nonce
    /// cannot be drawn, [`VaultError::KeyDerivation`] if Argon2id fails, and
    /// [`VaultError::Encryption`] if serialization or the cipher fails.
    pub fn encrypt_with<R: RngCore + CryptoRng>(
        &self,
        vault: &Vault,
        password: &SecretString,
        rng: &mut R,
    ) -> Result<String, VaultError> {
        let mut plaintext = serde_json::to_vec(vault)
            .map_err(|e| VaultError::Encryption(format!("failed to serialize vault: {e}")))?;

        let sealed = envelope::seal(
            &plaintext,
            password.expose_secret().as_bytes(),
            &self.params,
            rng,
        );
        plaintext.zeroize();
        let envelope = sealed?;

        tracing::debug!(
            entries = vault.len(),
            envelope_len = envelope.len(),
            "vault sealed"
        );
        Ok(envelope)
    }

    /// Authenticate and decrypt `envelope` with `password`.
    ///
    /// # Errors
    ///
    /// - [`VaultError::MalformedEnvelope`] if the envelope does not parse;
    ///   no decryption is attempted.
    /// - [`VaultError::AuthenticationFailed`] for a wrong password or any
    ///   tampering with the envelope.
    /// - [`VaultError::CorruptPayload`] if the payload authenticates but is
    ///   not a valid vault.
    pub fn decrypt(&self, envelope: &str, password: &SecretString) -> Result<Vault, VaultError> {
        let plaintext = match envelope::open(envelope, password.expose_secret().as_bytes()) {
            Ok(plaintext) => plaintext,
            Err(e) => {
                let err = VaultError::from(e);
                if matches!(err, VaultError::AuthenticationFailed) {
                    tracing::warn!("vault authentication failed");
                }
                return Err(err);
            }
        };

        let vault: Vault = serde_json::from_slice(plaintext.expose()).map_err(|e| {
            tracing::warn!("decrypted vault payload is not valid JSON");
            // Position only: serde's message can quote payload content.
            VaultError::CorruptPayload(format!(
                "payload is not a vault (line {}, column {})",
                e.line(),
                e.column()
            ))
        })?;

        vault.validate().map_err(|e| {
            tracing::warn!("decrypted vault failed validation");
            VaultError::CorruptPayload(e.to_string())
        })?;

        tracing::debug!(
            entries = vault.len(),
            envelope_len = envelope.len(),
            "vault opened"
        );
        Ok(vault)
    }

    /// Whether `envelope` should be re-encrypted with this codec: its format
    /// version is older than current, or any of its KDF costs is lower.
    ///
    /// Only reads the public header; no password needed.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::MalformedEnvelope`] if the envelope does not parse.
    pub fn needs_upgrade(&self, envelope: &str) -> Result<bool, VaultError> {
        let parsed = Envelope::parse(envelope)?;
        Ok(parsed.version() < FORMAT_VERSION || parsed.kdf_params().is_weaker_than(&self.params))
    }

    /// Re-encrypt `envelope` under `new_password`, with this codec's costs.
    ///
    /// # Errors
    ///
    /// Any error from [`VaultCodec::decrypt`] with `old_password`, then any
    /// error from [`VaultCodec::encrypt`].
    pub fn change_master_password(
        &self,
        envelope: &str,
        old_password: &SecretString,
        new_password: &SecretString,
    ) -> Result<String, VaultError> {
        let vault = self.decrypt(envelope, old_password)?;
        let reencrypted = self.encrypt(&vault, new_password)?;
        tracing::info!(entries = vault.len(), "master password changed");
        Ok(reencrypted)
    }
}

// ---------------------------------------------------------------------------
// Engine surface
// ---------------------------------------------------------------------------

/// A new, empty vault (`{"entries":[]}`). Touches no randomness.
#[must_use]
pub const fn create_empty_vault() -> Vault {
    Vault::new()
}

/// Encrypt `vault` with the default (interactive) codec.
///
/// # Errors
///
/// See [`VaultCodec::encrypt_with`].
pub fn encrypt_vault(vault: &Vault, password: &SecretString) -> Result<String, VaultError> {
    VaultCodec::default().encrypt(vault, password)
}

/// Decrypt an envelope produced by any codec version this build understands.
///
/// # Errors
///
/// See [`VaultCodec::decrypt`].
pub fn decrypt_vault(envelope: &str, password: &SecretString) -> Result<Vault, VaultError> {
    VaultCodec::default().decrypt(envelope, password)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
