//! Passphrase wordlist loading.
//!
//! The list (414 short, lowercase, unambiguous English words) is embedded at
//! compile time via `include_str!` and parsed once on first access using
//! `OnceLock`.

use std::sync::OnceLock;

/// Number of words in the embedded wordlist.
pub const WORDLIST_SIZE: usize = 414;

const WORDS_RAW: &str = include_str!("wordlists/coffre_words.txt");

static WORDS_LOCK: OnceLock<Box<[&'static str]>> = OnceLock::new();

/// Returns the parsed passphrase wordlist.
///
/// # Panics
///
/// Panics if the embedded wordlist does not contain exactly [`WORDLIST_SIZE`] words.
#[must_use]
pub fn words() -> &'static [&'static str] {
    WORDS_LOCK.get_or_init(|| {
        let words: Vec<&'static str> = WORDS_RAW.lines().filter(|l| !l.is_empty()).collect();
        assert!(
            words.len() == WORDLIST_SIZE,
            "wordlist must contain exactly {WORDLIST_SIZE} words, got {}",
            words.len()
        );
        words.into_boxed_slice()
    })
}

/// Returns `true` if `word` (case-insensitive) is in the list.
#[must_use]
pub fn contains(word: &str) -> bool {
    let lower = word.to_ascii_lowercase();
    words().binary_search(&lower.as_str()).is_ok()
}
