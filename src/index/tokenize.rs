//! Text tokenization for forward-prefix indexing.
//!
//! Terms are normalized (lowercased, split on non-alphanumeric boundaries)
//! and then indexed under every prefix of at least [`MIN_PREFIX_LEN`]
//! characters, which is what makes search-as-you-type prefix matches work.

use ahash::AHasher;
use std::hash::{Hash, Hasher};

/// Minimum prefix length for indexing and querying. Query words shorter than
/// this never reach the index.
pub(crate) const MIN_PREFIX_LEN: usize = 3;

/// Splits text into normalized words.
///
/// A word is a maximal run of alphanumeric characters, lowercased. Everything
/// else (whitespace, punctuation, markup leftovers) is a boundary.
pub(crate) fn split_words(text: &str) -> Vec<String> {
    let mut words = vec![];
    let mut current = String::new();

    for c in text.chars() {
        if c.is_alphanumeric() {
            current.extend(c.to_lowercase());
        } else if !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        words.push(current);
    }

    words
}

/// Yields every forward prefix of `word` with at least `min_len` characters,
/// shortest first, ending with the full word. Prefixes are cut on character
/// boundaries so multi-byte words are safe.
pub(crate) fn forward_prefixes(word: &str, min_len: usize) -> impl Iterator<Item = &str> {
    word.char_indices()
        .map(|(i, c)| i + c.len_utf8())
        .enumerate()
        .filter(move |(chars, _)| chars + 1 >= min_len)
        .map(move |(_, end)| &word[..end])
}

/// Normalized query words long enough to be looked up in the index.
pub(crate) fn query_terms(text: &str, min_len: usize) -> Vec<String> {
    split_words(text)
        .into_iter()
        .filter(|w| w.chars().count() >= min_len)
        .collect()
}

/// Hashes a term for postings-map lookup. Terms are already normalized by the
/// time they get here, so the hash is effectively case-insensitive.
pub(crate) fn hash_term(term: &str) -> u64 {
    let mut hasher = AHasher::default();
    term.hash(&mut hasher);
    hasher.finish()
}
