//! NIST SP 800-38D — AES-256-GCM Known-Answer Test vectors.
//!
//! The wrapper draws its nonce from the injected source, so feeding it
//! [`ZeroRng`] reproduces the all-zero-IV vectors from GCMEncryptExtIV256.rsp
//! exactly.

use coffre_crypto_core::symmetric::{decrypt, encrypt, SealedData, KEY_LEN, NONCE_LEN, TAG_LEN};

use super::ZeroRng;

/// NIST SP 800-38D Test Case 13 — empty plaintext, empty AAD.
///
/// Key:     0000...0000 (32 bytes)
/// IV:      0000...0000 (12 bytes)
/// Tag:     530f8afbc74536b9a963b4f1c4cb738b
#[test]
fn nist_test_case_13_empty_plaintext() {
    let key = [0u8; KEY_LEN];
    let sealed = encrypt(&[], &key, &[], &mut ZeroRng).expect("encrypt should succeed");

    let expected_tag: [u8; TAG_LEN] = [
        0x53, 0x0f, 0x8a, 0xfb, 0xc7, 0x45, 0x36, 0xb9, 0xa9, 0x63, 0xb4, 0xf1, 0xc4, 0xcb, 0x73,
        0x8b,
    ];

    assert_eq!(sealed.nonce, [0u8; NONCE_LEN]);
    assert!(sealed.ciphertext.is_empty());
    assert_eq!(sealed.tag, expected_tag, "NIST Test Case 13 tag mismatch");

    let decrypted = decrypt(&sealed, &key, &[]).expect("decrypt should succeed");
    assert!(decrypted.is_empty());
}

/// NIST SP 800-38D Test Case 14 — 16 zero bytes of plaintext, empty AAD.
///
/// Key:     0000...0000 (32 bytes)
/// IV:      0000...0000 (12 bytes)
/// PT:      0000...0000 (16 bytes)
/// CT:      cea7403d4d606b6e074ec5d3baf39d18
/// Tag:     d0d1c8a799996bf0265b98b5d48ab919
#[test]
fn nist_test_case_14_zero_block() {
    let key = [0u8; KEY_LEN];
    let plaintext = [0u8; 16];
    let sealed = encrypt(&plaintext, &key, &[], &mut ZeroRng).expect("encrypt should succeed");

    let expected_ct: [u8; 16] = [
        0xce, 0xa7, 0x40, 0x3d, 0x4d, 0x60, 0x6b, 0x6e, 0x07, 0x4e, 0xc5, 0xd3, 0xba, 0xf3, 0x9d,
        0x18,
    ];
    let expected_tag: [u8; TAG_LEN] = [
        0xd0, 0xd1, 0xc8, 0xa7, 0x99, 0x99, 0x6b, 0xf0, 0x26, 0x5b, 0x98, 0xb5, 0xd4, 0x8a, 0xb9,
        0x19,
    ];

    assert_eq!(
        sealed.ciphertext.as_slice(),
        &expected_ct,
        "NIST Test Case 14 ciphertext mismatch"
    );
    assert_eq!(sealed.tag, expected_tag, "NIST Test Case 14 tag mismatch");

    let decrypted = decrypt(&sealed, &key, &[]).expect("decrypt should succeed");
    assert_eq!(decrypted.expose(), &plaintext);
}

/// The published vector, rebuilt from raw bytes, decrypts through the wrapper.
#[test]
fn nist_test_case_14_wire_bytes_decrypt() {
    let mut wire = vec![0u8; NONCE_LEN];
    wire.extend_from_slice(&[
        0xce, 0xa7, 0x40, 0x3d, 0x4d, 0x60, 0x6b, 0x6e, 0x07, 0x4e, 0xc5, 0xd3, 0xba, 0xf3, 0x9d,
        0x18,
    ]);
    wire.extend_from_slice(&[
        0xd0, 0xd1, 0xc8, 0xa7, 0x99, 0x99, 0x6b, 0xf0, 0x26, 0x5b, 0x98, 0xb5, 0xd4, 0x8a, 0xb9,
        0x19,
    ]);

    let sealed = SealedData::from_bytes(&wire).expect("from_bytes should succeed");
    let decrypted = decrypt(&sealed, &[0u8; KEY_LEN], &[]).expect("decrypt should succeed");
    assert_eq!(decrypted.expose(), &[0u8; 16]);
}
