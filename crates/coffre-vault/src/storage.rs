//! Storage seam: where envelopes live between sessions.
//!
//! The remote service stores the envelope as an opaque string in a JSON
//! document (`{"encrypted_vault": "..."}`, `null` before the first save).
//! A [`VaultStore`] only ever sees envelope strings. Passwords and keys
//! never cross this boundary.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use crate::codec::{create_empty_vault, VaultCodec};
use crate::error::VaultError;
use crate::model::Vault;

/// Body of the remote `GET vault` / `PUT vault` calls.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultDocument {
    /// The envelope, or `None` for an account that has never saved.
    #[serde(default)]
    pub encrypted_vault: Option<String>,
}

/// Somewhere an envelope string can be loaded from and saved to.
///
/// Saves replace the previous envelope wholesale (last writer wins).
pub trait VaultStore {
    /// The stored envelope, or `None` if nothing has been saved yet.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::Storage`] or [`VaultError::Io`] if the backing
    /// store cannot be read.
    fn load(&self) -> Result<Option<String>, VaultError>;

    /// Replace the stored envelope.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::Storage`] or [`VaultError::Io`] if the backing
    /// store rejects the write.
    fn save(&self, envelope: &str) -> Result<(), VaultError>;
}

// ── In-memory store ────────────────────────────────────────────────

/// Process-local store, for tests and sessions that never touch disk.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slot: Mutex<Option<String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `envelope`.
    #[must_use]
    pub fn with_envelope(envelope: impl Into<String>) -> Self {
        Self {
            slot: Mutex::new(Some(envelope.into())),
        }
    }
}

impl VaultStore for MemoryStore {
    fn load(&self) -> Result<Option<String>, VaultError> {
        let slot = self
            .slot
            .lock()
            .map_err(|_| VaultError::Storage("memory store lock poisoned".into()))?;
        Ok(slot.clone())
    }

    fn save(&self, envelope: &str) -> Result<(), VaultError> {
        let mut slot = self
            .slot
            .lock()
            .map_err(|_| VaultError::Storage("memory store lock poisoned".into()))?;
        *slot = Some(envelope.to_string());
        Ok(())
    }
}

// ── File store ─────────────────────────────────────────────────────

/// A [`VaultDocument`] kept as JSON in a single file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Store backed by the file at `path`. The file need not exist yet;
    /// its parent directory must.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map_or_else(|| "vault".into(), |n| n.to_string_lossy().into_owned());
        self.path.with_file_name(format!(".{name}.tmp"))
    }
}

impl VaultStore for FileStore {
    fn load(&self) -> Result<Option<String>, VaultError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let document: VaultDocument = serde_json::from_str(&contents).map_err(|e| {
            VaultError::Storage(format!(
                "{} is not a vault document: {e}",
                self.path.display()
            ))
        })?;
        Ok(document.encrypted_vault)
    }

    /// Writes to a temporary sibling file, then renames it over the target,
    /// so a crash never leaves a half-written document behind.
    fn save(&self, envelope: &str) -> Result<(), VaultError> {
        let document = VaultDocument {
            encrypted_vault: Some(envelope.to_string()),
        };
        let json = serde_json::to_string(&document)
            .map_err(|e| VaultError::Storage(format!("failed to serialize document: {e}")))?;

        let tmp = self.tmp_path();
        fs::write(&tmp, json)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&tmp, fs::Permissions::from_mode(0o600))?;
        }

        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

// ── Session helpers ────────────────────────────────────────────────

/// Unlock the vault held by `store`, creating and saving an empty one on
/// first use.
///
/// # Errors
///
/// Any error from the store, or from [`VaultCodec::decrypt`] /
/// [`VaultCodec::encrypt`].
pub fn open_or_create<S: VaultStore + ?Sized>(
    store: &S,
    codec: &VaultCodec,
    password: &SecretString,
) -> Result<Vault, VaultError> {
    if let Some(envelope) = store.load()? {
        return codec.decrypt(&envelope, password);
    }

    let vault = create_empty_vault();
    let envelope = codec.encrypt(&vault, password)?;
    store.save(&envelope)?;
    tracing::info!("created empty vault");
    Ok(vault)
}

/// Encrypt `vault` and replace whatever `store` held.
///
/// # Errors
///
/// Any error from [`VaultCodec::encrypt`] or the store.
pub fn persist<S: VaultStore + ?Sized>(
    store: &S,
    codec: &VaultCodec,
    vault: &Vault,
    password: &SecretString,
) -> Result<(), VaultError> {
    let envelope = codec.encrypt(vault, password)?;
    store.save(&envelope)?;
    tracing::info!(entries = vault.len(), "vault persisted");
    Ok(())
}
