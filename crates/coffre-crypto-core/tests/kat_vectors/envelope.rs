//! Deterministic envelope rebuilt byte-for-byte from raw primitives.
//!
//! With an all-zero random source the salt and nonce are fixed, so the
//! whole envelope is a pure function of password, params, and plaintext.

use coffre_crypto_core::envelope::{self, Envelope, HEADER_LEN, SALT_LEN};
use coffre_crypto_core::kdf::Argon2idParams;
use coffre_crypto_core::symmetric::NONCE_LEN;
use data_encoding::BASE64URL_NOPAD;
use ring::aead;

use super::ZeroRng;

const PARAMS: Argon2idParams = Argon2idParams {
    m_cost: 32,
    t_cost: 1,
    p_cost: 1,
};

fn expected_header() -> Vec<u8> {
    let mut header = Vec::with_capacity(HEADER_LEN);
    header.extend_from_slice(b"CFRE");
    header.push(1); // version
    header.push(1); // Argon2id
    header.extend_from_slice(&32u32.to_le_bytes());
    header.extend_from_slice(&1u32.to_le_bytes());
    header.extend_from_slice(&1u32.to_le_bytes());
    header.push(16); // salt length
    header.extend_from_slice(&[0u8; SALT_LEN]);
    header
}

#[test]
fn envelope_matches_manual_construction() {
    let password = b"correct horse battery staple";
    let plaintext = br#"{"entries":[]}"#;

    let envelope = envelope::seal(plaintext, password, &PARAMS, &mut ZeroRng)
        .expect("seal should succeed");

    // Key: Argon2id over the all-zero salt.
    let argon2 = argon2::Argon2::new(
        argon2::Algorithm::Argon2id,
        argon2::Version::V0x13,
        argon2::Params::new(32, 1, 1, Some(32)).expect("params should be valid"),
    );
    let mut key = [0u8; 32];
    argon2
        .hash_password_into(password, &[0u8; SALT_LEN], &mut key)
        .expect("raw argon2 should succeed");

    // Payload: AES-256-GCM, zero nonce, header as associated data.
    let header = expected_header();
    let cipher = aead::LessSafeKey::new(
        aead::UnboundKey::new(&aead::AES_256_GCM, &key).expect("key should be valid"),
    );
    let mut in_out = plaintext.to_vec();
    let tag = cipher
        .seal_in_place_separate_tag(
            aead::Nonce::assume_unique_for_key([0u8; NONCE_LEN]),
            aead::Aad::from(header.as_slice()),
            &mut in_out,
        )
        .expect("seal should succeed");

    let mut expected = header;
    expected.extend_from_slice(&[0u8; NONCE_LEN]);
    expected.extend_from_slice(&in_out);
    expected.extend_from_slice(tag.as_ref());

    assert_eq!(envelope, BASE64URL_NOPAD.encode(&expected));

    let opened = envelope::open(&envelope, password).expect("open should succeed");
    assert_eq!(opened.expose(), plaintext);
}

#[test]
fn parsed_header_matches_layout() {
    let envelope = envelope::seal(b"", b"pw", &PARAMS, &mut ZeroRng).expect("seal should succeed");
    let parsed = Envelope::parse(&envelope).expect("parse should succeed");
    assert_eq!(parsed.header_bytes(), expected_header());
    assert_eq!(parsed.kdf_params(), &PARAMS);
    assert_eq!(parsed.ciphertext_len(), 0);
}
