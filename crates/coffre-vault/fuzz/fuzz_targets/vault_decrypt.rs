//! Fuzz target for `decrypt_vault`.
//!
//! Arbitrary text must come back as an error, never a panic. Header costs
//! outside the accepted window are rejected before any key derivation, so
//! iterations stay cheap.
//!
//! ```sh
//! cd crates/coffre-vault
//! cargo +nightly fuzz run vault_decrypt -- -max_len=2048
//! ```

#![no_main]

use coffre_vault::decrypt_vault;
use libfuzzer_sys::fuzz_target;
use secrecy::SecretString;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = decrypt_vault(s, &SecretString::from("fuzz".to_string()));
    }
});
