//! Argon2id key derivation with versioned cost presets.
//!
//! This module provides:
//! - [`derive`] — derive a 256-bit key from a password + salt using Argon2id
//! - [`Argon2idParams`] — serializable parameter set (embedded in every envelope)
//! - [`KdfPreset`] — Interactive / Moderate / Sensitive preset selector
//!
//! # Cost Window
//!
//! Parameters read back from an envelope are untrusted input. [`Argon2idParams::validate`]
//! caps them so a hostile envelope cannot make the client allocate
//! unbounded memory or spin for minutes before the tag check.

use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use crate::error::CryptoError;
use crate::memory::SecretBuffer;

/// Output length of the KDF in bytes (256 bits, the AES-256-GCM key width).
pub const OUTPUT_LEN: usize = 32;

/// Minimum salt length in bytes. We enforce 16 (stricter than argon2's 8).
pub const MIN_SALT_LEN: usize = 16;

/// 64 MB in KiB.
const MEMORY_64MB: u32 = 65_536;

/// 256 MB in KiB.
const MEMORY_256MB: u32 = 262_144;

/// 512 MB in KiB.
const MEMORY_512MB: u32 = 524_288;

/// Upper bound on memory cost accepted from an envelope (2 GiB in KiB).
pub const MAX_M_COST: u32 = 2_097_152;

/// Upper bound on iterations accepted from an envelope.
pub const MAX_T_COST: u32 = 16;

/// Upper bound on lanes accepted from an envelope.
pub const MAX_P_COST: u32 = 16;

/// Argon2 requires at least 8 KiB of memory per lane.
const MIN_M_COST_PER_LANE: u32 = 8;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Argon2id parameter set, embedded in the envelope header.
///
/// Fields use the `argon2` crate convention:
/// - `m_cost`: memory in KiB (NOT bytes, NOT MB)
/// - `t_cost`: number of iterations
/// - `p_cost`: degree of parallelism
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Argon2idParams {
    /// Memory cost in kibibytes (1 KiB = 1024 bytes).
    pub m_cost: u32,
    /// Number of iterations (time cost).
    pub t_cost: u32,
    /// Degree of parallelism (number of lanes).
    pub p_cost: u32,
}

impl Argon2idParams {
    /// Check the parameters against the accepted cost window.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::KeyDerivation` naming the first offending field.
    pub fn validate(&self) -> Result<(), CryptoError> {
        if !(1..=MAX_P_COST).contains(&self.p_cost) {
            return Err(CryptoError::KeyDerivation(format!(
                "p_cost must be between 1 and {MAX_P_COST}, got {}",
                self.p_cost
            )));
        }
        if !(1..=MAX_T_COST).contains(&self.t_cost) {
            return Err(CryptoError::KeyDerivation(format!(
                "t_cost must be between 1 and {MAX_T_COST}, got {}",
                self.t_cost
            )));
        }
        let min_m_cost = self.p_cost.saturating_mul(MIN_M_COST_PER_LANE);
        if !(min_m_cost..=MAX_M_COST).contains(&self.m_cost) {
            return Err(CryptoError::KeyDerivation(format!(
                "m_cost must be between {min_m_cost} and {MAX_M_COST} KiB, got {}",
                self.m_cost
            )));
        }
        Ok(())
    }

    /// Returns `true` if any cost component is lower than `other`'s.
    #[must_use]
    pub const fn is_weaker_than(&self, other: &Self) -> bool {
        self.m_cost < other.m_cost || self.t_cost < other.t_cost || self.p_cost < other.p_cost
    }
}

impl Default for Argon2idParams {
    fn default() -> Self {
        KdfPreset::default().params()
    }
}

/// KDF preset selector.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum KdfPreset {
    /// Everyday unlock on modest hardware (64 MB, 3 passes).
    #[default]
    Interactive,
    /// Desktop-class hardware (256 MB, 3 passes).
    Moderate,
    /// Highest cost, for users who accept a multi-second unlock (512 MB, 4 passes).
    Sensitive,
}

impl KdfPreset {
    /// Return the fixed parameters for this preset.
    #[must_use]
    pub const fn params(self) -> Argon2idParams {
        match self {
            Self::Interactive => Argon2idParams {
                m_cost: MEMORY_64MB,
                t_cost: 3,
                p_cost: 4,
            },
            Self::Moderate => Argon2idParams {
                m_cost: MEMORY_256MB,
                t_cost: 3,
                p_cost: 4,
            },
            Self::Sensitive => Argon2idParams {
                m_cost: MEMORY_512MB,
                t_cost: 4,
                p_cost: 4,
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Core KDF
// ---------------------------------------------------------------------------

/// Derive a 256-bit key from a password and salt using Argon2id.
///
/// Returns a [`SecretBuffer`] containing 32 bytes. The intermediate buffer
/// is zeroized after copying into the `SecretBuffer`.
///
/// Any password length is accepted, including empty. Strength rules belong
/// to the caller.
///
/// # Errors
///
/// Returns `CryptoError::KeyDerivation` if:
/// - The salt is shorter than 16 bytes
/// - The parameters fall outside the accepted cost window
/// - The derivation itself fails (e.g., memory allocation)
pub fn derive(
    password: &[u8],
    salt: &[u8],
    params: &Argon2idParams,
) -> Result<SecretBuffer, CryptoError> {
    if salt.len() < MIN_SALT_LEN {
        return Err(CryptoError::KeyDerivation(format!(
            "salt too short: {} bytes (minimum {MIN_SALT_LEN})",
            salt.len()
        )));
    }
    params.validate()?;

    let argon2_params = argon2::Params::new(
        params.m_cost,
        params.t_cost,
        params.p_cost,
        Some(OUTPUT_LEN),
    )
    .map_err(|e| CryptoError::KeyDerivation(format!("invalid argon2 params: {e}")))?;

    let argon2 = argon2::Argon2::new(
        argon2::Algorithm::Argon2id,
        argon2::Version::V0x13,
        argon2_params,
    );

    let mut output = [0u8; OUTPUT_LEN];
    let derived = argon2.hash_password_into(password, salt, &mut output);
    if let Err(e) = derived {
        output.zeroize();
        return Err(CryptoError::KeyDerivation(format!(
            "argon2id derivation failed: {e}"
        )));
    }

    let result = SecretBuffer::new(&output);
    output.zeroize();
    Ok(result)
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
