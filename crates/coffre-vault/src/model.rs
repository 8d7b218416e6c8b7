//! Vault data model: entries and the in-memory editing operations the
//! vault browser performs between unlock and the next save.
//!
//! The whole [`Vault`] is what gets serialized and sealed into one envelope.
//! Nothing here touches keys or storage.

use std::collections::HashSet;
use std::fmt;

use coffre_crypto_core::random;
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::VaultError;

// ---------------------------------------------------------------------------
// Entry
// ---------------------------------------------------------------------------

/// A single credential record.
///
/// `name` is the only required field. Absent optional fields are omitted
/// from the serialized form entirely, never written as `null`. All fields
/// are zeroized when the entry is dropped.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct VaultEntry {
    /// Client-generated UUID v4, stable across edits.
    pub id: String,
    /// Display label.
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl fmt::Debug for VaultEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VaultEntry")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("url", &self.url)
            .field("notes", &self.notes.as_ref().map(|_| "***"))
            .finish()
    }
}

/// Fields for a new entry. The id is assigned by [`Vault::add_entry`].
#[derive(Clone, Default)]
pub struct NewEntry {
    pub name: String,
    pub username: Option<String>,
    pub password: Option<String>,
    pub url: Option<String>,
    pub notes: Option<String>,
}

impl NewEntry {
    /// Start a new entry with just a name.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

impl fmt::Debug for NewEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewEntry")
            .field("name", &self.name)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("url", &self.url)
            .field("notes", &self.notes.as_ref().map(|_| "***"))
            .finish_non_exhaustive()
    }
}

/// Partial update for an existing entry.
///
/// Outer `None` leaves a field untouched; `Some(None)` clears an optional
/// field; `Some(Some(v))` sets it.
#[derive(Clone, Default)]
pub struct EntryUpdate {
    pub name: Option<String>,
    pub username: Option<Option<String>>,
    pub password: Option<Option<String>>,
    pub url: Option<Option<String>>,
    pub notes: Option<Option<String>>,
}

fn check_name(name: &str) -> Result<(), VaultError> {
    if name.trim().is_empty() {
        return Err(VaultError::InvalidEntry("name must not be empty".into()));
    }
    Ok(())
}

/// Generate a random RFC 4122 version-4 UUID string from `rng`.
///
/// # Errors
///
/// Returns [`VaultError::RandomSourceUnavailable`] if the generator fails.
pub fn generate_entry_id<R: RngCore + CryptoRng>(rng: &mut R) -> Result<String, VaultError> {
    let mut bytes: [u8; 16] = random::random_array(rng)?;

    bytes[6] = (bytes[6] & 0x0F) | 0x40; // version 4
    bytes[8] = (bytes[8] & 0x3F) | 0x80; // variant 1

    let hex: String = bytes.iter().map(|b| format!("{b:02x}")).collect();
    let id = format!(
        "{}-{}-{}-{}-{}",
        &hex[0..8],
        &hex[8..12],
        &hex[12..16],
        &hex[16..20],
        &hex[20..32]
    );
    bytes.zeroize();
    Ok(id)
}

// ---------------------------------------------------------------------------
// Vault
// ---------------------------------------------------------------------------

/// The full decrypted vault: an ordered list of entries with unique ids.
///
/// Insertion order is preserved through encryption and decryption.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vault {
    entries: Vec<VaultEntry>,
}

impl Vault {
    /// An empty vault, the state right after account creation.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Build a vault from existing entries, checking ids and names.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::InvalidEntry`] if [`Vault::validate`] fails.
    pub fn from_entries(entries: Vec<VaultEntry>) -> Result<Self, VaultError> {
        let vault = Self { entries };
        vault.validate()?;
        Ok(vault)
    }

    /// All entries in vault order.
    #[must_use]
    pub fn entries(&self) -> &[VaultEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up an entry by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&VaultEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Append a new entry with a fresh id from `OsRng`.
    ///
    /// # Errors
    ///
    /// See [`Vault::add_entry_with`].
    pub fn add_entry(&mut self, entry: NewEntry) -> Result<String, VaultError> {
        self.add_entry_with(entry, &mut OsRng)
    }

    /// Append a new entry with a fresh id drawn from `rng`.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::InvalidEntry`] if the name is blank and
    /// [`VaultError::RandomSourceUnavailable`] if no id can be drawn.
    pub fn add_entry_with<R: RngCore + CryptoRng>(
        &mut self,
        entry: NewEntry,
        rng: &mut R,
    ) -> Result<String, VaultError> {
        check_name(&entry.name)?;

        let mut id = generate_entry_id(rng)?;
        // Ids are unique within a vault.
        while self.get(&id).is_some() {
            id = generate_entry_id(rng)?;
        }

        let NewEntry {
            name,
            username,
            password,
            url,
            notes,
        } = entry;
        self.entries.push(VaultEntry {
            id: id.clone(),
            name,
            username,
            password,
            url,
            notes,
        });
        Ok(id)
    }

    /// Apply a partial update to the entry with `id`.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::EntryNotFound`] for an unknown id and
    /// [`VaultError::InvalidEntry`] if the new name is blank. On error the
    /// entry is left unchanged.
    pub fn update_entry(&mut self, id: &str, update: EntryUpdate) -> Result<(), VaultError> {
        if let Some(name) = &update.name {
            check_name(name)?;
        }
        let entry = self
            .entries
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| VaultError::EntryNotFound(id.to_string()))?;

        let EntryUpdate {
            name,
            username,
            password,
            url,
            notes,
        } = update;

        if let Some(name) = name {
            entry.name.zeroize();
            entry.name = name;
        }
        replace_field(&mut entry.username, username);
        replace_field(&mut entry.password, password);
        replace_field(&mut entry.url, url);
        replace_field(&mut entry.notes, notes);
        Ok(())
    }

    /// Remove and return the entry with `id`, keeping the order of the rest.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::EntryNotFound`] for an unknown id.
    pub fn remove_entry(&mut self, id: &str) -> Result<VaultEntry, VaultError> {
        let index = self
            .entries
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| VaultError::EntryNotFound(id.to_string()))?;
        Ok(self.entries.remove(index))
    }

    /// Case-insensitive substring search over name, username, and url.
    ///
    /// Results keep vault order. An empty (or all-whitespace) query matches
    /// every entry. Passwords and notes are never searched.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<&VaultEntry> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return self.entries.iter().collect();
        }
        let hit = |field: Option<&str>| {
            field.is_some_and(|value| value.to_lowercase().contains(&needle))
        };
        self.entries
            .iter()
            .filter(|e| {
                hit(Some(e.name.as_str())) || hit(e.username.as_deref()) || hit(e.url.as_deref())
            })
            .collect()
    }

    /// Check structural invariants: every id non-empty and unique, every
    /// name non-blank.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::InvalidEntry`] naming the first violation.
    pub fn validate(&self) -> Result<(), VaultError> {
        let mut seen: HashSet<&str> = HashSet::with_capacity(self.entries.len());
        for (index, entry) in self.entries.iter().enumerate() {
            if entry.id.is_empty() {
                return Err(VaultError::InvalidEntry(format!(
                    "entry at position {index} has an empty id"
                )));
            }
            if !seen.insert(entry.id.as_str()) {
                return Err(VaultError::InvalidEntry(format!(
                    "duplicate entry id {}",
                    entry.id
                )));
            }
            if entry.name.trim().is_empty() {
                return Err(VaultError::InvalidEntry(format!(
                    "entry {} has an empty name",
                    entry.id
                )));
            }
        }
        Ok(())
    }
}

fn replace_field(field: &mut Option<String>, update: Option<Option<String>>) {
    if let Some(value) = update {
        field.zeroize();
        *field = value;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
