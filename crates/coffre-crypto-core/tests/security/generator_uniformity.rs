//! Chi-squared uniformity checks for index selection and generated output.
//!
//! Critical values are taken at p = 0.0001 so a correct implementation
//! fails roughly once in ten thousand runs, while a modulo-biased or
//! off-by-one selector fails every time at these sample sizes.

use std::collections::HashMap;

use coffre_crypto_core::password::{generate_password, wordlist, PasswordPolicy};
use coffre_crypto_core::random::random_index;
use rand::rngs::OsRng;

#[allow(clippy::cast_precision_loss)]
fn chi_squared(counts: &[u64], total: u64) -> f64 {
    let expected = total as f64 / counts.len() as f64;
    counts
        .iter()
        .map(|&c| {
            let d = c as f64 - expected;
            d * d / expected
        })
        .sum()
}

/// 10 buckets, 9 degrees of freedom. Critical value at p = 0.0001: 33.72.
#[test]
fn random_index_is_uniform_over_ten() {
    let draws = 100_000u64;
    let mut counts = [0u64; 10];
    for _ in 0..draws {
        counts[random_index(&mut OsRng, 10).expect("CSPRNG should succeed")] += 1;
    }
    let chi = chi_squared(&counts, draws);
    assert!(chi < 33.72, "chi-squared {chi:.2} over 10 buckets");
}

/// 7 buckets (not a power of two), 6 degrees of freedom. Critical value: 27.86.
#[test]
fn random_index_is_uniform_over_seven() {
    let draws = 70_000u64;
    let mut counts = [0u64; 7];
    for _ in 0..draws {
        counts[random_index(&mut OsRng, 7).expect("CSPRNG should succeed")] += 1;
    }
    let chi = chi_squared(&counts, draws);
    assert!(chi < 27.86, "chi-squared {chi:.2} over 7 buckets");
}

/// Digits-only passwords carry no coverage injection, so every digit must
/// appear with equal frequency. 9 degrees of freedom, critical value 33.72.
#[test]
fn digit_passwords_are_uniform() {
    let policy = PasswordPolicy {
        length: 64,
        uppercase: false,
        lowercase: false,
        digits: true,
        symbols: false,
        exclude_ambiguous: false,
    };
    let mut counts = [0u64; 10];
    let mut total = 0u64;
    for _ in 0..1_000 {
        for b in generate_password(&policy).expect("generation should succeed").bytes() {
            counts[usize::from(b - b'0')] += 1;
            total += 1;
        }
    }
    let chi = chi_squared(&counts, total);
    assert!(chi < 33.72, "chi-squared {chi:.2} over digits");
}

/// Every word in the list is reachable.
#[test]
fn passphrase_draws_reach_whole_list() {
    use coffre_crypto_core::password::{generate_passphrase, PassphrasePolicy};

    let policy = PassphrasePolicy {
        word_count: 8,
        ..PassphrasePolicy::default()
    };
    let mut seen: HashMap<String, u64> = HashMap::new();
    // 414 words, 8 per draw: 2,000 draws put ~39 hits on each word.
    for _ in 0..2_000 {
        for word in generate_passphrase(&policy)
            .expect("generation should succeed")
            .split('-')
        {
            *seen.entry(word.to_string()).or_default() += 1;
        }
    }
    assert_eq!(seen.len(), wordlist::WORDLIST_SIZE);
}
