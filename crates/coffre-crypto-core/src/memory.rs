//! Secret memory wrapper for key material and decrypted payloads.
//!
//! [`SecretBuffer`] zeroes its bytes on drop (via `secrecy`) and masks
//! itself in `Debug`/`Display` so it can never end up in a log line.

use std::fmt;

use rand::{CryptoRng, RngCore};
use secrecy::{ExposeSecret, SecretSlice};
use zeroize::Zeroize;

use crate::error::CryptoError;
use crate::random;

/// Variable-length buffer for sensitive data.
///
/// Wraps [`SecretSlice<u8>`] from the `secrecy` crate and adds masked
/// `Debug` output (`SecretBuffer(***)`).
pub struct SecretBuffer {
    inner: SecretSlice<u8>,
}

impl SecretBuffer {
    /// Copy `data` into a new secret allocation.
    ///
    /// The caller should zeroize the source data after calling this.
    #[must_use]
    pub fn new(data: &[u8]) -> Self {
        Self {
            inner: data.to_vec().into(),
        }
    }

    /// Take ownership of `data` without copying it.
    #[must_use]
    pub fn from_vec(data: Vec<u8>) -> Self {
        Self { inner: data.into() }
    }

    /// Create a `SecretBuffer` filled with bytes from the secure random source.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::RandomSourceUnavailable` if the CSPRNG fails.
    pub fn random<R: RngCore + CryptoRng>(rng: &mut R, len: usize) -> Result<Self, CryptoError> {
        let mut bytes = vec![0u8; len];
        if let Err(e) = random::fill_bytes(rng, &mut bytes) {
            bytes.zeroize();
            return Err(e);
        }
        Ok(Self::from_vec(bytes))
    }

    /// Expose the underlying bytes. Keep exposure within a single expression
    /// where possible.
    #[must_use]
    pub fn expose(&self) -> &[u8] {
        self.inner.expose_secret()
    }

    /// Returns the number of bytes in the buffer.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.expose_secret().len()
    }

    /// Returns `true` if the buffer is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for SecretBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretBuffer(***)")
    }
}

impl fmt::Display for SecretBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretBuffer(***)")
    }
}
