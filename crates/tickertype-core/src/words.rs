#![forbid(unsafe_code)]

//! Word-source resolution and shuffling.
//!
//! A word list is resolved from the first non-empty source in priority
//! order: explicit options, the target's declarative `words` attribute,
//! then a built-in placeholder list. The resolved list is never empty.
//!
//! # Invariants
//!
//! 1. `resolve` only returns non-empty lists of non-empty strings.
//! 2. A malformed attribute never fails resolution — it is skipped with a
//!    warning and the next source is tried.
//! 3. `shuffle` is a uniform permutation (Fisher–Yates) and preserves the
//!    multiset of words.

use crate::attrs::Attrs;
use crate::rng::XorShift64;

/// Fallback words used when no source yields any entry.
pub const DEFAULT_WORDS: [&str; 3] = ["Web Developer", "Designer", "Creator"];

/// Resolve the word list for an engine.
///
/// Priority per the construction contract: explicit words, then the
/// target's attribute, then [`DEFAULT_WORDS`]. Empty strings are dropped
/// from every source before the non-empty check.
#[must_use]
pub fn resolve(explicit: &[String], attrs: &Attrs) -> Vec<String> {
    let from_options: Vec<String> = explicit
        .iter()
        .filter(|w| !w.is_empty())
        .cloned()
        .collect();
    if !from_options.is_empty() {
        return from_options;
    }

    match attrs.words() {
        Ok(Some(from_attr)) if !from_attr.is_empty() => return from_attr,
        Ok(_) => {}
        Err(_err) => {
            crate::warn!("ignoring malformed word attribute: {_err}");
        }
    }

    DEFAULT_WORDS.iter().map(|w| (*w).to_string()).collect()
}

/// Shuffle a word list in place with a Fisher–Yates pass.
pub fn shuffle(words: &mut [String], rng: &mut XorShift64) {
    if words.len() < 2 {
        return;
    }
    for i in (1..words.len()).rev() {
        let j = rng.next_index(i + 1);
        words.swap(i, j);
    }
}
