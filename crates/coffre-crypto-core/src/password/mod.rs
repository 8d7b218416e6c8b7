//! Cryptographic password and passphrase generation.
//!
//! Provides two generation modes:
//! - [`generate_password`] — character-based with configurable charsets
//! - [`generate_passphrase`] — word-based using the embedded wordlist
//!
//! Both validate their policy once, before drawing any randomness, and take
//! every random decision (index selection, capitalization, injection
//! positions) from the secure random source. The plain variants use
//! `OsRng`; the `_with` variants accept any `RngCore + CryptoRng`.

pub mod wordlist;

use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use crate::error::CryptoError;
use crate::random;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Minimum allowed password length.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Maximum allowed password length.
pub const MAX_PASSWORD_LENGTH: usize = 64;

/// Default password length.
pub const DEFAULT_PASSWORD_LENGTH: usize = 20;

/// Minimum allowed passphrase word count.
pub const MIN_WORD_COUNT: usize = 3;

/// Maximum allowed passphrase word count.
pub const MAX_WORD_COUNT: usize = 8;

/// Default passphrase word count.
pub const DEFAULT_WORD_COUNT: usize = 5;

/// Largest number appended by `include_number` (range is `0..=9998`).
pub const MAX_PASSPHRASE_NUMBER: usize = 9998;

/// Size of the appended number range.
const PASSPHRASE_NUMBER_RANGE: usize = 9999;

/// Uppercase category.
pub const UPPERCASE: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Lowercase category.
pub const LOWERCASE: &[u8] = b"abcdefghijklmnopqrstuvwxyz";

/// Digit category.
pub const DIGITS: &[u8] = b"0123456789";

/// Symbol category.
pub const SYMBOLS: &[u8] = b"!@#$%^&*()-_=+[]{}|;:',.<>?/~";

/// Visually confusable characters removed by `exclude_ambiguous`.
pub const AMBIGUOUS: &[u8] = b"il1Lo0O";

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Policy for character-set password generation.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PasswordPolicy {
    /// Exact output length, [`MIN_PASSWORD_LENGTH`]..=[`MAX_PASSWORD_LENGTH`].
    pub length: usize,
    /// Include uppercase letters (A-Z).
    pub uppercase: bool,
    /// Include lowercase letters (a-z).
    pub lowercase: bool,
    /// Include digits (0-9).
    pub digits: bool,
    /// Include symbols (!@#$%^&*...).
    pub symbols: bool,
    /// Drop [`AMBIGUOUS`] characters from every category.
    pub exclude_ambiguous: bool,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            length: DEFAULT_PASSWORD_LENGTH,
            uppercase: true,
            lowercase: true,
            digits: true,
            symbols: true,
            exclude_ambiguous: false,
        }
    }
}

impl PasswordPolicy {
    /// Check the length bound.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::InvalidPolicy` if the length is out of range.
    pub fn validate(&self) -> Result<(), CryptoError> {
        if !(MIN_PASSWORD_LENGTH..=MAX_PASSWORD_LENGTH).contains(&self.length) {
            return Err(CryptoError::InvalidPolicy(format!(
                "length must be between {MIN_PASSWORD_LENGTH} and {MAX_PASSWORD_LENGTH}, got {}",
                self.length
            )));
        }
        Ok(())
    }

    /// Enabled categories, ambiguous characters already removed. A category
    /// may come back empty.
    fn categories(&self) -> Vec<Vec<u8>> {
        [
            (self.uppercase, UPPERCASE),
            (self.lowercase, LOWERCASE),
            (self.digits, DIGITS),
            (self.symbols, SYMBOLS),
        ]
        .into_iter()
        .filter(|(enabled, _)| *enabled)
        .map(|(_, set)| {
            set.iter()
                .copied()
                .filter(|c| !(self.exclude_ambiguous && AMBIGUOUS.contains(c)))
                .collect()
        })
        .collect()
    }
}

/// Separator between words in a passphrase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PassphraseSeparator {
    /// Hyphen: `word-word-word`
    #[default]
    Hyphen,
    /// Space: `word word word`
    Space,
    /// Dot: `word.word.word`
    Dot,
    /// Underscore: `word_word_word`
    Underscore,
    /// Comma: `word,word,word`
    Comma,
    /// No separator: `wordwordword`
    None,
}

impl PassphraseSeparator {
    /// Returns the string representation of this separator.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hyphen => "-",
            Self::Space => " ",
            Self::Dot => ".",
            Self::Underscore => "_",
            Self::Comma => ",",
            Self::None => "",
        }
    }
}

/// Which words of a passphrase get an uppercase first letter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Capitalization {
    /// Leave every word lowercase.
    #[default]
    None,
    /// Capitalize only the first word.
    First,
    /// Capitalize every word.
    All,
    /// Capitalize each word independently with probability 1/2.
    Random,
}

/// Policy for word-list passphrase generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PassphrasePolicy {
    /// Number of distinct words, [`MIN_WORD_COUNT`]..=[`MAX_WORD_COUNT`].
    pub word_count: usize,
    /// Separator placed between words and before the number.
    pub separator: PassphraseSeparator,
    /// Capitalization mode.
    pub capitalization: Capitalization,
    /// Append the separator and a number in `0..=9998`.
    pub include_number: bool,
}

impl Default for PassphrasePolicy {
    fn default() -> Self {
        Self {
            word_count: DEFAULT_WORD_COUNT,
            separator: PassphraseSeparator::Hyphen,
            capitalization: Capitalization::None,
            include_number: false,
        }
    }
}

impl PassphrasePolicy {
    /// Check the word-count bound.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::InvalidPolicy` if the word count is out of range.
    pub fn validate(&self) -> Result<(), CryptoError> {
        if !(MIN_WORD_COUNT..=MAX_WORD_COUNT).contains(&self.word_count) {
            return Err(CryptoError::InvalidPolicy(format!(
                "word count must be between {MIN_WORD_COUNT} and {MAX_WORD_COUNT}, got {}",
                self.word_count
            )));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Generate a random password with `OsRng`. See [`generate_password_with`].
///
/// # Errors
///
/// Same as [`generate_password_with`].
pub fn generate_password(policy: &PasswordPolicy) -> Result<String, CryptoError> {
    generate_password_with(policy, &mut OsRng)
}

/// Generate a random password of exactly `policy.length` characters.
///
/// Characters are drawn uniformly from the union of the enabled categories.
/// Afterwards every enabled, non-empty category that the draw missed gets
/// one occurrence injected: a uniformly chosen position whose own category
/// appears at least twice is overwritten with a uniformly chosen member of
/// the missing category. Coverage is therefore guaranteed at the cost of a
/// small, documented entropy loss, and no category ever loses its only
/// representative.
///
/// # Errors
///
/// Returns [`CryptoError::InvalidPolicy`] if the length is out of range or
/// the resulting charset is empty, and
/// [`CryptoError::RandomSourceUnavailable`] if the generator fails.
pub fn generate_password_with<R: RngCore + CryptoRng>(
    policy: &PasswordPolicy,
    rng: &mut R,
) -> Result<String, CryptoError> {
    policy.validate()?;

    let categories = policy.categories();
    let pool: Vec<(u8, usize)> = categories
        .iter()
        .enumerate()
        .flat_map(|(owner, set)| set.iter().map(move |&c| (c, owner)))
        .collect();

    if pool.is_empty() {
        return Err(CryptoError::InvalidPolicy(
            "at least one character category must be enabled and non-empty".to_string(),
        ));
    }

    let mut bytes: Vec<u8> = Vec::with_capacity(policy.length);
    let mut owners: Vec<usize> = Vec::with_capacity(policy.length);
    let mut counts = vec![0usize; categories.len()];

    for _ in 0..policy.length {
        let (c, owner) = pool[random::random_index(rng, pool.len())?];
        bytes.push(c);
        owners.push(owner);
        counts[owner] = counts[owner].saturating_add(1);
    }

    for (missing, set) in categories.iter().enumerate() {
        if set.is_empty() || counts[missing] > 0 {
            continue;
        }

        let candidates: Vec<usize> = owners
            .iter()
            .enumerate()
            .filter(|(_, owner)| counts[**owner] >= 2)
            .map(|(pos, _)| pos)
            .collect();
        // Length >= 8 exceeds the category count, so some category repeats.
        if candidates.is_empty() {
            bytes.zeroize();
            return Err(CryptoError::InvalidPolicy(
                "length too short to cover every enabled category".to_string(),
            ));
        }

        let pos = candidates[random::random_index(rng, candidates.len())?];
        let replaced = owners[pos];
        counts[replaced] = counts[replaced].saturating_sub(1);
        counts[missing] = counts[missing].saturating_add(1);
        bytes[pos] = set[random::random_index(rng, set.len())?];
        owners[pos] = missing;
    }

    let password: String = bytes.iter().map(|&b| char::from(b)).collect();
    bytes.zeroize();
    Ok(password)
}

/// Generate a passphrase with `OsRng`. See [`generate_passphrase_with`].
///
/// # Errors
///
/// Same as [`generate_passphrase_with`].
pub fn generate_passphrase(policy: &PassphrasePolicy) -> Result<String, CryptoError> {
    generate_passphrase_with(policy, &mut OsRng)
}

/// Generate a passphrase of `policy.word_count` distinct words.
///
/// Words are sampled uniformly without replacement (a repeated draw is
/// discarded and redrawn), capitalized per the policy, and joined with the
/// separator. With `include_number`, the separator and a uniform number in
/// `0..=9998` are appended.
///
/// # Errors
///
/// Returns [`CryptoError::InvalidPolicy`] if the word count is out of range
/// and [`CryptoError::RandomSourceUnavailable`] if the generator fails.
pub fn generate_passphrase_with<R: RngCore + CryptoRng>(
    policy: &PassphrasePolicy,
    rng: &mut R,
) -> Result<String, CryptoError> {
    policy.validate()?;

    let list = wordlist::words();
    let mut chosen: Vec<usize> = Vec::with_capacity(policy.word_count);
    while chosen.len() < policy.word_count {
        let index = random::random_index(rng, list.len())?;
        if !chosen.contains(&index) {
            chosen.push(index);
        }
    }

    let mut words: Vec<String> = Vec::with_capacity(chosen.len());
    for (position, &index) in chosen.iter().enumerate() {
        let word = list[index];
        let capitalize = match policy.capitalization {
            Capitalization::None => false,
            Capitalization::First => position == 0,
            Capitalization::All => true,
            Capitalization::Random => random::random_bool(rng)?,
        };
        words.push(if capitalize {
            capitalize_word(word)
        } else {
            word.to_string()
        });
    }

    let separator = policy.separator.as_str();
    let mut result = words.join(separator);
    words.zeroize();

    if policy.include_number {
        let number = random::random_index(rng, PASSPHRASE_NUMBER_RANGE)?;
        result.push_str(separator);
        result.push_str(&number.to_string());
    }

    Ok(result)
}

/// Estimated entropy in bits of a password drawn under `policy`, before the
/// coverage injection.
///
/// # Errors
///
/// Returns [`CryptoError::InvalidPolicy`] under the same conditions as
/// [`generate_password`].
#[allow(clippy::cast_precision_loss)]
pub fn estimate_password_entropy(policy: &PasswordPolicy) -> Result<f64, CryptoError> {
    policy.validate()?;
    let pool_size: usize = policy.categories().iter().map(Vec::len).sum();
    if pool_size == 0 {
        return Err(CryptoError::InvalidPolicy(
            "at least one character category must be enabled and non-empty".to_string(),
        ));
    }
    Ok(policy.length as f64 * (pool_size as f64).log2())
}

/// Estimated entropy in bits of a passphrase drawn under `policy`.
///
/// # Errors
///
/// Returns [`CryptoError::InvalidPolicy`] if the word count is out of range.
#[allow(clippy::cast_precision_loss)]
pub fn estimate_passphrase_entropy(policy: &PassphrasePolicy) -> Result<f64, CryptoError> {
    policy.validate()?;
    let list_len = wordlist::words().len();
    let mut bits: f64 = (0..policy.word_count)
        .map(|k| (list_len.saturating_sub(k) as f64).log2())
        .sum();
    if policy.capitalization == Capitalization::Random {
        bits += policy.word_count as f64;
    }
    if policy.include_number {
        bits += (PASSPHRASE_NUMBER_RANGE as f64).log2();
    }
    Ok(bits)
}

fn capitalize_word(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |c| {
        format!("{}{}", c.to_ascii_uppercase(), chars.as_str())
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
