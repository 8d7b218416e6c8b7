//! Secret material never appears in `Debug`/`Display` output or error text.

use coffre_crypto_core::envelope::{open, seal};
use coffre_crypto_core::kdf::{derive, Argon2idParams};
use rand::rngs::OsRng;

const PARAMS: Argon2idParams = Argon2idParams {
    m_cost: 32,
    t_cost: 1,
    p_cost: 1,
};

#[test]
fn derived_key_debug_is_masked() {
    let key = derive(b"hunter2", b"0123456789abcdef", &PARAMS).expect("derive should succeed");
    assert_eq!(format!("{key:?}"), "SecretBuffer(***)");
}

#[test]
fn opened_payload_debug_is_masked() {
    let envelope = seal(b"top secret note", b"pw", &PARAMS, &mut OsRng).expect("seal");
    let opened = open(&envelope, b"pw").expect("open");
    let rendered = format!("{opened:?} {opened}");
    assert!(!rendered.contains("top secret note"));
}

#[test]
fn authentication_error_does_not_echo_password() {
    let envelope = seal(b"payload", b"right", &PARAMS, &mut OsRng).expect("seal");
    let err = open(&envelope, b"wrong-password-1234").expect_err("must fail");
    let rendered = format!("{err} {err:?}");
    assert!(!rendered.contains("wrong-password-1234"));
    assert!(!rendered.contains("payload"));
}
