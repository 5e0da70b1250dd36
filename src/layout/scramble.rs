// SPDX-License-Identifier: GPL-3.0-only

//! Randomized key relabeling for the scrambled layout variants.
//!
//! Each scramble pass draws a fresh Fisher–Yates permutation of a fixed
//! alphabet and assigns the permuted symbols to the eligible key elements in
//! grid traversal order, replacing both the displayed glyph and the semantic
//! value. Scrambles are pure relabelings: the number and position of key
//! elements never change.
//!
//! A pass is re-invoked on every render of its layout; the chosen
//! permutation is never persisted.

use crate::layout::types::KeyElement;
use rand::seq::SliceRandom;
use rand::Rng;

/// Alphabet for the numeric scramble.
pub const DIGITS: [char; 10] = ['0', '1', '2', '3', '4', '5', '6', '7', '8', '9'];

/// Alphabet for the Latin scramble.
pub const LATIN_LETTERS: [char; 26] = [
    'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r',
    's', 't', 'u', 'v', 'w', 'x', 'y', 'z',
];

/// Alphabet for the Thai scramble: the 44 Thai consonants.
pub const THAI_CONSONANTS: [char; 44] = [
    'ก', 'ข', 'ฃ', 'ค', 'ฅ', 'ฆ', 'ง', 'จ', 'ฉ', 'ช', 'ซ', 'ฌ', 'ญ', 'ฎ', 'ฏ', 'ฐ', 'ฑ',
    'ฒ', 'ณ', 'ด', 'ต', 'ถ', 'ท', 'ธ', 'น', 'บ', 'ป', 'ผ', 'ฝ', 'พ', 'ฟ', 'ภ', 'ม', 'ย',
    'ร', 'ล', 'ว', 'ศ', 'ษ', 'ส', 'ห', 'ฬ', 'อ', 'ฮ',
];

/// Key identifiers excluded from the numeric scramble.
pub const DIGIT_SCRAMBLE_EXCLUDED: &[&str] = &[
    "backspace", "enter", "plus", "minus", "times", "divide", "equals", "dot",
];

/// Key identifiers excluded from the Latin scramble.
pub const LATIN_SCRAMBLE_EXCLUDED: &[&str] = &[
    "shift", "caps", "tab", "space", "enter", "backspace", "1", "2", "3", "4", "5", "6", "7",
    "8", "9", "0",
];

/// Key identifiers excluded from the Thai scramble.
pub const THAI_SCRAMBLE_EXCLUDED: &[&str] =
    &["shift", "caps", "tab", "space", "enter", "backspace"];

/// Relabels the digit keys with a fresh permutation of `0`-`9`.
pub fn scramble_digits<R: Rng>(rng: &mut R, rows: &mut [Vec<KeyElement>]) {
    apply_scramble(rng, &DIGITS, DIGIT_SCRAMBLE_EXCLUDED, rows);
}

/// Relabels the letter keys with a fresh permutation of `a`-`z`.
pub fn scramble_latin<R: Rng>(rng: &mut R, rows: &mut [Vec<KeyElement>]) {
    apply_scramble(rng, &LATIN_LETTERS, LATIN_SCRAMBLE_EXCLUDED, rows);
}

/// Relabels the consonant keys with a fresh permutation of the Thai
/// consonant set.
///
/// The Thai layout exposes fewer consonant keys than the alphabet has
/// letters; the unused tail of the permutation is discarded.
pub fn scramble_thai<R: Rng>(rng: &mut R, rows: &mut [Vec<KeyElement>]) {
    apply_scramble(rng, &THAI_CONSONANTS, THAI_SCRAMBLE_EXCLUDED, rows);
}

/// Whether a key element takes part in a scramble pass.
///
/// Eligible keys are literal keys whose current value belongs to the
/// scramble alphabet and whose identifier is not on the denylist.
pub fn is_eligible(key: &KeyElement, alphabet: &[char], excluded: &[&str]) -> bool {
    match key.literal() {
        Some(c) => alphabet.contains(&c) && !excluded.contains(&key.identifier.as_str()),
        None => false,
    }
}

/// Shuffles the alphabet and assigns it to eligible keys in traversal order.
fn apply_scramble<R: Rng>(
    rng: &mut R,
    alphabet: &[char],
    excluded: &[&str],
    rows: &mut [Vec<KeyElement>],
) {
    let mut symbols: Vec<char> = alphabet.to_vec();
    symbols.shuffle(rng);
    let mut next = symbols.into_iter();

    for row in rows.iter_mut() {
        for key in row.iter_mut() {
            if !is_eligible(key, alphabet, excluded) {
                continue;
            }
            let Some(symbol) = next.next() else {
                // More eligible keys than alphabet symbols; leave the rest.
                return;
            };
            key.relabel(symbol);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
