//! Argon2id wrapper checks against the raw `argon2` crate.
//!
//! RFC 9106 Section 5.4 uses a secret and associated data, which `derive`
//! never sets, so the wrapper is pinned to the raw crate with the exact
//! parameter pattern the envelope uses instead.

use coffre_crypto_core::kdf::{derive, Argon2idParams, OUTPUT_LEN};

fn raw_argon2id(password: &[u8], salt: &[u8], params: &Argon2idParams) -> [u8; OUTPUT_LEN] {
    let argon2_params = argon2::Params::new(
        params.m_cost,
        params.t_cost,
        params.p_cost,
        Some(OUTPUT_LEN),
    )
    .expect("params should be valid");
    let argon2 = argon2::Argon2::new(
        argon2::Algorithm::Argon2id,
        argon2::Version::V0x13,
        argon2_params,
    );
    let mut output = [0u8; OUTPUT_LEN];
    argon2
        .hash_password_into(password, salt, &mut output)
        .expect("raw argon2 should succeed");
    output
}

#[test]
fn derive_matches_raw_argon2() {
    let params = Argon2idParams {
        m_cost: 64,
        t_cost: 2,
        p_cost: 1,
    };
    let password = b"match_test";
    let salt = b"salt_for_matching";

    let ours = derive(password, salt, &params).expect("derive should succeed");
    assert_eq!(
        ours.expose(),
        &raw_argon2id(password, salt, &params),
        "derive() wrapper must match raw argon2 crate output"
    );
}

#[test]
fn derive_matches_raw_argon2_with_lanes() {
    let params = Argon2idParams {
        m_cost: 32,
        t_cost: 3,
        p_cost: 4,
    };
    let password = [0x01u8; 32];
    let salt = [0x02u8; 16];

    let ours = derive(&password, &salt, &params).expect("derive should succeed");
    assert_eq!(ours.expose(), &raw_argon2id(&password, &salt, &params));
}

#[test]
fn derive_handles_non_ascii_passwords() {
    let params = Argon2idParams {
        m_cost: 32,
        t_cost: 1,
        p_cost: 1,
    };
    let password = "mot de passe très secret ✓".as_bytes();
    let salt = [0x5Au8; 16];

    let ours = derive(password, &salt, &params).expect("derive should succeed");
    assert_eq!(ours.expose(), &raw_argon2id(password, &salt, &params));
}
