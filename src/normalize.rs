//! Pure character-level normalization: case folding and accent stripping.
//!
//! Neither function here is invoked by the Builder or Scanner automatically;
//! callers fold their own dictionary/haystack strings before handing them to
//! [`crate::Trie`] when they want accent-insensitive behavior.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Case-fold a single code point.
///
/// Uses `char::to_lowercase()`, which is a 1:1 mapping for the overwhelming
/// majority of cased BMP characters. The rare code points whose lowercase
/// mapping expands to more than one `char` (e.g. `'İ'`) are left unfolded so
/// that folding a pattern and folding a haystack always agree on code-point
/// count — expanding either side independently would desynchronize
/// `from_char`/`to_char` against the original text.
pub fn fold_char(c: char) -> char {
    let mut lower = c.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(l), None) => l,
        _ => c,
    }
}

/// Case-fold an entire string, code point by code point.
pub(crate) fn fold_str(s: &str) -> String {
    s.chars().map(fold_char).collect()
}

/// Strip accents from a string: NFD-decompose, drop combining marks,
/// recompose to NFC.
///
/// This is an external helper for callers who want accent-insensitive
/// matching; apply it to both dictionary patterns and haystacks before
/// building/searching.
pub fn normalize_string(s: &str) -> String {
    s.nfd().filter(|c| !is_combining_mark(*c)).nfc().collect()
}
