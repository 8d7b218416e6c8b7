//! Secure random source.
//!
//! Every helper is generic over `R: RngCore + CryptoRng`, so only generators
//! that declare themselves cryptographically secure can be plugged in.
//! Production callers pass [`rand::rngs::OsRng`].
//!
//! All draws go through `try_fill_bytes`: if the platform generator fails,
//! the call returns [`CryptoError::RandomSourceUnavailable`]. There is no
//! fallback source.

use rand::{CryptoRng, RngCore};
use zeroize::Zeroize;

use crate::error::CryptoError;

/// Fill `buf` with uniformly distributed bytes.
///
/// # Errors
///
/// Returns `CryptoError::RandomSourceUnavailable` if the generator fails.
pub fn fill_bytes<R: RngCore + CryptoRng>(rng: &mut R, buf: &mut [u8]) -> Result<(), CryptoError> {
    rng.try_fill_bytes(buf)
        .map_err(|e| CryptoError::RandomSourceUnavailable(e.to_string()))
}

/// Draw a fixed-size array of random bytes (salts, nonces).
///
/// # Errors
///
/// Returns `CryptoError::RandomSourceUnavailable` if the generator fails.
pub fn random_array<R: RngCore + CryptoRng, const N: usize>(
    rng: &mut R,
) -> Result<[u8; N], CryptoError> {
    let mut out = [0u8; N];
    fill_bytes(rng, &mut out)?;
    Ok(out)
}

/// Draw a uniformly distributed index in `0..bound`.
///
/// Rejection sampling over `u32` draws: values below `2^32 mod bound` are
/// discarded so the remaining range is an exact multiple of `bound`.
///
/// # Errors
///
/// Returns `CryptoError::InvalidPolicy` if `bound` is zero or does not fit
/// in a `u32`, and `CryptoError::RandomSourceUnavailable` if the generator
/// fails.
pub fn random_index<R: RngCore + CryptoRng>(rng: &mut R, bound: usize) -> Result<usize, CryptoError> {
    let bound32 = u32::try_from(bound)
        .ok()
        .filter(|b| *b > 0)
        .ok_or_else(|| {
            CryptoError::InvalidPolicy(format!("random index bound out of range: {bound}"))
        })?;

    // 2^32 mod bound, computed without leaving u32.
    let threshold = bound32
        .wrapping_neg()
        .checked_rem(bound32)
        .ok_or_else(|| CryptoError::InvalidPolicy("random index bound is zero".into()))?;

    loop {
        let mut bytes = random_array::<R, 4>(rng)?;
        let candidate = u32::from_le_bytes(bytes);
        bytes.zeroize();
        if candidate >= threshold {
            let index = candidate
                .checked_rem(bound32)
                .ok_or_else(|| CryptoError::InvalidPolicy("random index bound is zero".into()))?;
            // u32 always fits in usize on supported targets.
            return usize::try_from(index)
                .map_err(|_| CryptoError::InvalidPolicy("index does not fit usize".into()));
        }
    }
}

/// Draw one fair bit.
///
/// # Errors
///
/// Returns `CryptoError::RandomSourceUnavailable` if the generator fails.
pub fn random_bool<R: RngCore + CryptoRng>(rng: &mut R) -> Result<bool, CryptoError> {
    let [byte] = random_array::<R, 1>(rng)?;
    Ok(byte & 1 == 1)
}
