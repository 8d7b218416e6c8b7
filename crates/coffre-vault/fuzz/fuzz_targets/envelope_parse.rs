//! Fuzz target for the envelope header parser.
//!
//! Feeds arbitrary strings to `Envelope::parse`. Must never panic.
//!
//! # Usage
//!
//! ```sh
//! cargo +nightly install cargo-fuzz
//!
//! cd crates/coffre-vault
//! cargo +nightly fuzz run envelope_parse -- -max_len=4096
//! ```

#![no_main]

use coffre_crypto_core::envelope::Envelope;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(envelope) = Envelope::parse(s) {
            let _ = envelope.kdf_params();
        }
    }
});
