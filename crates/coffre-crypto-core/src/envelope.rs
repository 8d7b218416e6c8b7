//! Vault envelope: the self-describing opaque string stored by the server.
//!
//! This module provides:
//! - [`seal`] — derive a key from the password, encrypt, and encode an envelope
//! - [`open`] — parse an envelope, re-derive the key, and authenticate + decrypt
//! - [`Envelope`] — parsed envelope (version, KDF parameters, salt, sealed payload)
//!
//! # Layout
//!
//! ```text
//! Magic (4 B) | Version (1 B) | KDF Alg (1 B) | m_cost (u32 LE) | t_cost (u32 LE) |
//! p_cost (u32 LE) | Salt Len (1 B) | Salt (16 B) | Nonce (12 B) | Ciphertext | Tag (16 B)
//! ```
//!
//! The bytes are encoded as unpadded URL-safe base64. Everything up to and
//! including the salt is the header; it is passed as AEAD associated data,
//! so the version and KDF parameters are authenticated along with the
//! ciphertext.
//!
//! # Security Properties
//!
//! - Fresh random salt and nonce on every [`seal`]
//! - KDF costs travel with the envelope, so later versions can raise them
//!   without breaking older envelopes
//! - Structural problems are [`CryptoError::MalformedEnvelope`] and are
//!   reported before any key derivation; every tag failure is
//!   [`CryptoError::AuthenticationFailed`]

use data_encoding::BASE64URL_NOPAD;
use rand::{CryptoRng, RngCore};

use crate::error::CryptoError;
use crate::kdf::{self, Argon2idParams};
use crate::memory::SecretBuffer;
use crate::random;
use crate::symmetric::{self, SealedData, NONCE_LEN, TAG_LEN};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Magic bytes identifying a COFFRE envelope.
pub const MAGIC: &[u8; 4] = b"CFRE";

/// Current envelope format version.
pub const FORMAT_VERSION: u8 = 1;

/// KDF algorithm identifier for Argon2id v0x13.
pub const KDF_ARGON2ID: u8 = 1;

/// Salt length in bytes for format version 1.
pub const SALT_LEN: usize = 16;

/// Length of the authenticated header (magic through salt).
pub const HEADER_LEN: usize = MAGIC_LEN + 1 + 1 + PARAMS_LEN + 1 + SALT_LEN;

/// Offset of the first ciphertext byte in the decoded envelope.
pub const CIPHERTEXT_OFFSET: usize = HEADER_LEN + NONCE_LEN;

/// Smallest decoded envelope: header + nonce + empty ciphertext + tag.
pub const MIN_ENVELOPE_LEN: usize = CIPHERTEXT_OFFSET + TAG_LEN;

const MAGIC_LEN: usize = 4;

/// Three little-endian `u32` cost fields.
const PARAMS_LEN: usize = 12;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A parsed envelope. Holds no key material.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Envelope {
    version: u8,
    params: Argon2idParams,
    salt: [u8; SALT_LEN],
    sealed: SealedData,
}

impl Envelope {
    /// Parse an envelope string.
    ///
    /// No best-effort recovery: any deviation from the version-1 layout is
    /// rejected.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::MalformedEnvelope` for invalid encoding, magic,
    /// version, KDF algorithm, salt width, out-of-window KDF costs, or a
    /// truncated payload.
    pub fn parse(envelope: &str) -> Result<Self, CryptoError> {
        let bytes = BASE64URL_NOPAD
            .decode(envelope.as_bytes())
            .map_err(|e| CryptoError::MalformedEnvelope(format!("invalid encoding: {e}")))?;

        if bytes.len() < MIN_ENVELOPE_LEN {
            return Err(CryptoError::MalformedEnvelope(format!(
                "envelope too short: {} bytes (minimum {MIN_ENVELOPE_LEN})",
                bytes.len()
            )));
        }

        let mut reader = Reader::new(&bytes);

        if reader.take(MAGIC_LEN)? != MAGIC.as_slice() {
            return Err(CryptoError::MalformedEnvelope("invalid magic bytes".into()));
        }

        let version = reader.u8()?;
        if version != FORMAT_VERSION {
            return Err(CryptoError::MalformedEnvelope(format!(
                "unsupported envelope version {version} (supported: {FORMAT_VERSION})"
            )));
        }

        let algorithm = reader.u8()?;
        if algorithm != KDF_ARGON2ID {
            return Err(CryptoError::MalformedEnvelope(format!(
                "unknown KDF algorithm identifier {algorithm}"
            )));
        }

        let params = Argon2idParams {
            m_cost: reader.u32_le()?,
            t_cost: reader.u32_le()?,
            p_cost: reader.u32_le()?,
        };
        params
            .validate()
            .map_err(|e| CryptoError::MalformedEnvelope(format!("unsupported KDF costs: {e}")))?;

        let salt_len = usize::from(reader.u8()?);
        if salt_len != SALT_LEN {
            return Err(CryptoError::MalformedEnvelope(format!(
                "invalid salt length: {salt_len} bytes (expected {SALT_LEN})"
            )));
        }
        let mut salt = [0u8; SALT_LEN];
        salt.copy_from_slice(reader.take(SALT_LEN)?);

        let sealed = SealedData::from_bytes(reader.rest())?;

        Ok(Self {
            version,
            params,
            salt,
            sealed,
        })
    }

    /// Encode the envelope into its opaque string form.
    #[must_use]
    pub fn encode(&self) -> String {
        let mut out = self.header_bytes();
        out.extend_from_slice(&self.sealed.to_bytes());
        BASE64URL_NOPAD.encode(&out)
    }

    /// The authenticated header bytes (magic through salt).
    #[must_use]
    pub fn header_bytes(&self) -> Vec<u8> {
        build_header(self.version, &self.params, &self.salt)
    }

    /// Envelope format version.
    #[must_use]
    pub const fn version(&self) -> u8 {
        self.version
    }

    /// KDF parameters the envelope was sealed with.
    #[must_use]
    pub const fn kdf_params(&self) -> &Argon2idParams {
        &self.params
    }

    /// Length of the encrypted payload, excluding nonce and tag.
    #[must_use]
    pub fn ciphertext_len(&self) -> usize {
        self.sealed.ciphertext.len()
    }
}

// ---------------------------------------------------------------------------
// Seal / open
// ---------------------------------------------------------------------------

/// Encrypt `plaintext` under a key derived from `password` and produce an
/// envelope string.
///
/// A new salt and a new nonce are drawn from `rng` on every call, even for
/// the same password.
///
/// # Errors
///
/// Returns `CryptoError::KeyDerivation` if `params` are outside the accepted
/// window or derivation fails, `CryptoError::RandomSourceUnavailable` if the
/// salt or nonce cannot be drawn, and `CryptoError::Encryption` if the
/// cipher fails.
pub fn seal<R: RngCore + CryptoRng>(
    plaintext: &[u8],
    password: &[u8],
    params: &Argon2idParams,
    rng: &mut R,
) -> Result<String, CryptoError> {
    params.validate()?;

    let salt: [u8; SALT_LEN] = random::random_array(rng)?;
    let key = kdf::derive(password, &salt, params)?;

    let header = build_header(FORMAT_VERSION, params, &salt);
    let sealed = symmetric::encrypt(plaintext, key.expose(), &header, rng)?;

    let envelope = Envelope {
        version: FORMAT_VERSION,
        params: *params,
        salt,
        sealed,
    };
    Ok(envelope.encode())
}

/// Parse `envelope`, re-derive the key from `password`, and decrypt.
///
/// # Errors
///
/// Returns `CryptoError::MalformedEnvelope` if the envelope does not parse
/// (no decryption is attempted), `CryptoError::AuthenticationFailed` if the
/// tag does not verify, and `CryptoError::KeyDerivation` if derivation fails.
pub fn open(envelope: &str, password: &[u8]) -> Result<SecretBuffer, CryptoError> {
    let parsed = Envelope::parse(envelope)?;
    let key = kdf::derive(password, &parsed.salt, &parsed.params)?;
    symmetric::decrypt(&parsed.sealed, key.expose(), &parsed.header_bytes())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn build_header(version: u8, params: &Argon2idParams, salt: &[u8; SALT_LEN]) -> Vec<u8> {
    let mut header = Vec::with_capacity(HEADER_LEN);
    header.extend_from_slice(MAGIC);
    header.push(version);
    header.push(KDF_ARGON2ID);
    header.extend_from_slice(&params.m_cost.to_le_bytes());
    header.extend_from_slice(&params.t_cost.to_le_bytes());
    header.extend_from_slice(&params.p_cost.to_le_bytes());
    // SALT_LEN is 16, always fits.
    #[allow(clippy::cast_possible_truncation)]
    header.push(SALT_LEN as u8);
    header.extend_from_slice(salt);
    header
}

/// Bounds-checked cursor over the decoded envelope bytes.
struct Reader<'a> {
    data: &'a [u8],
    cursor: usize,
}

impl<'a> Reader<'a> {
    const fn new(data: &'a [u8]) -> Self {
        Self { data, cursor: 0 }
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8], CryptoError> {
        let end = self
            .cursor
            .checked_add(len)
            .filter(|end| *end <= self.data.len())
            .ok_or_else(|| {
                CryptoError::MalformedEnvelope(format!(
                    "envelope truncated at offset {}",
                    self.cursor
                ))
            })?;
        let slice = &self.data[self.cursor..end];
        self.cursor = end;
        Ok(slice)
    }

    fn u8(&mut self) -> Result<u8, CryptoError> {
        Ok(self.take(1)?[0])
    }

    fn u32_le(&mut self) -> Result<u32, CryptoError> {
        let mut buf = [0u8; 4];
        buf.copy_from_slice(self.take(4)?);
        Ok(u32::from_le_bytes(buf))
    }

    fn rest(&self) -> &'a [u8] {
        &self.data[self.cursor..]
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
