//! Fuzz target for the decrypted payload parser.
//!
//! Feeds arbitrary bytes through the same JSON shape and structural checks
//! the codec applies after a successful open.
//!
//! ```sh
//! cd crates/coffre-vault
//! cargo +nightly fuzz run vault_payload -- -max_len=8192
//! ```

#![no_main]

use coffre_vault::Vault;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(vault) = serde_json::from_slice::<Vault>(data) {
        let _ = vault.validate();
        let _ = vault.search("a");
    }
});
