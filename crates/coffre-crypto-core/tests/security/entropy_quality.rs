//! Entropy quality tests for CSPRNG outputs.
//!
//! Shannon entropy for truly random bytes approaches 8.0 bits/byte as the
//! sample grows. Expected values for uniform random data:
//!
//! | Sample size | Expected entropy | Our threshold |
//! |-------------|-----------------|---------------|
//! | 32 bytes    | ~4.88           | 4.0           |
//! | 1 KB        | ~7.81           | 7.5           |
//! | 64 KB       | ~7.997          | 7.99          |
//!
//! Thresholds are loose enough to avoid false positives and tight enough to
//! catch degenerate output (all zeros, repeated patterns).

use coffre_crypto_core::envelope::{seal, SALT_LEN};
use coffre_crypto_core::kdf::Argon2idParams;
use coffre_crypto_core::memory::SecretBuffer;
use coffre_crypto_core::random::random_array;
use data_encoding::BASE64URL_NOPAD;
use rand::rngs::OsRng;

/// Shannon entropy of a byte slice (bits per byte).
#[allow(clippy::cast_precision_loss)]
fn shannon_entropy(data: &[u8]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let mut freq = [0u64; 256];
    for &b in data {
        freq[b as usize] = freq[b as usize].saturating_add(1);
    }
    let len = data.len() as f64;
    freq.iter()
        .filter(|&&f| f > 0)
        .map(|&f| {
            let p = f as f64 / len;
            -p * p.log2()
        })
        .sum()
}

#[test]
fn secret_buffer_random_1kb_entropy() {
    let buf = SecretBuffer::random(&mut OsRng, 1024).expect("CSPRNG should succeed");
    let entropy = shannon_entropy(buf.expose());
    assert!(
        entropy > 7.5,
        "SecretBuffer::random(1024) entropy too low: {entropy:.4} (expected > 7.5)"
    );
}

#[test]
fn secret_buffer_random_64kb_entropy() {
    let buf = SecretBuffer::random(&mut OsRng, 65536).expect("CSPRNG should succeed");
    let entropy = shannon_entropy(buf.expose());
    assert!(
        entropy > 7.99,
        "SecretBuffer::random(65536) entropy too low: {entropy:.4} (expected > 7.99)"
    );
}

#[test]
fn random_array_32_entropy() {
    let key: [u8; 32] = random_array(&mut OsRng).expect("CSPRNG should succeed");
    let entropy = shannon_entropy(&key);
    assert!(
        entropy > 4.0,
        "random_array::<32> entropy too low: {entropy:.4} (expected > 4.0)"
    );
}

/// Salts from 64 envelopes concatenated (1 KB) look uniformly random.
#[test]
fn envelope_salts_are_high_entropy() {
    let params = Argon2idParams {
        m_cost: 32,
        t_cost: 1,
        p_cost: 1,
    };
    let mut salts = Vec::with_capacity(64 * SALT_LEN);
    for _ in 0..64 {
        let envelope = seal(b"", b"pw", &params, &mut OsRng).expect("seal should succeed");
        let bytes = BASE64URL_NOPAD.decode(envelope.as_bytes()).expect("valid base64");
        // Salt sits right after magic, version, algorithm, costs, and salt length.
        salts.extend_from_slice(&bytes[19..19 + SALT_LEN]);
    }
    let entropy = shannon_entropy(&salts);
    assert!(entropy > 7.5, "salt entropy too low: {entropy:.4}");
}
