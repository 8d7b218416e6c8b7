//! Engine configuration, stored as plain JSON next to the application data.
//!
//! Holds only non-sensitive defaults: which KDF preset new envelopes use and
//! the generator policies pre-filled in the UI. Readable before unlock.

use std::fs;
use std::path::Path;

use coffre_crypto_core::kdf::KdfPreset;
use coffre_crypto_core::password::{PassphrasePolicy, PasswordPolicy};
use serde::{Deserialize, Serialize};

const CONFIG_FILE: &str = "coffre.json";
const CONFIG_TMP_FILE: &str = ".coffre.json.tmp";

/// Engine defaults.
///
/// Persisted to `{data_dir}/coffre.json`. Every field falls back to its
/// [`Default`] when missing from the file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EngineConfig {
    /// Argon2id cost preset for newly sealed envelopes.
    #[serde(default)]
    pub kdf_preset: KdfPreset,

    /// Policy the password generator starts from.
    #[serde(default)]
    pub password_defaults: PasswordPolicy,

    /// Policy the passphrase generator starts from.
    #[serde(default)]
    pub passphrase_defaults: PassphrasePolicy,
}

impl EngineConfig {
    /// Load the configuration from `{data_dir}/coffre.json`.
    ///
    /// Returns [`Default::default()`] when the file is missing or contains
    /// invalid JSON.
    #[must_use]
    pub fn load(data_dir: &Path) -> Self {
        let path = data_dir.join(CONFIG_FILE);
        let Ok(contents) = fs::read_to_string(&path) else {
            return Self::default();
        };
        serde_json::from_str(&contents).unwrap_or_else(|e| {
            tracing::warn!(path = %path.display(), "ignoring unreadable engine config: {e}");
            Self::default()
        })
    }

    /// Persist the configuration to `{data_dir}/coffre.json`.
    ///
    /// Writes to a temporary file, then renames it over the target.
    ///
    /// # Errors
    ///
    /// Returns an `io::Error` if the directory does not exist or the
    /// file system rejects the write/rename.
    pub fn save(&self, data_dir: &Path) -> std::io::Result<()> {
        let path = data_dir.join(CONFIG_FILE);
        let tmp = data_dir.join(CONFIG_TMP_FILE);

        let json = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

        fs::write(&tmp, &json)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&tmp, fs::Permissions::from_mode(0o600))?;
        }

        fs::rename(&tmp, &path)?;

        Ok(())
    }
}
