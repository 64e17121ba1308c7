//! The public facade: a compiled [`Trie`] plus its matching flags, and the
//! one-shot convenience entry points for callers who don't want to hold on
//! to a compiled trie.
//!
//! The keyword a pattern was registered under lives directly on the
//! automaton's pattern table rather than in a side lookup, since the
//! dictionary already carries that label for every pattern.

use std::collections::HashMap;

use log::trace;

use crate::automaton::Automaton;
use crate::builder;
use crate::error::Result;
use crate::scanner;
use crate::Match;

/// A compiled dictionary: an immutable automaton plus the matching flags
/// it was built with. Not `Clone`; share a `&Trie`/`Arc<Trie>` across
/// threads instead of duplicating the automaton.
///
/// `search`/`search_many` never mutate the automaton, so a `Trie` can be
/// shared across threads for concurrent reads without synchronization.
pub struct Trie {
    automaton: Automaton<u32>,
    case_sensitive: bool,
    check_bounds: bool,
}

impl Trie {
    /// Compile `dictionary` into a `Trie`.
    ///
    /// [`Trie::build`] defaults `case_sensitive` to `true` and
    /// `check_bounds` to `false`; this constructor takes both explicitly so
    /// callers can opt into either.
    pub fn new<I, P, K>(dictionary: I, case_sensitive: bool, check_bounds: bool) -> Result<Trie>
    where
        I: IntoIterator<Item = (P, K)>,
        P: Into<String>,
        K: Into<String>,
    {
        let pairs: Vec<(String, String)> = dictionary
            .into_iter()
            .map(|(p, k)| (p.into(), k.into()))
            .collect();
        let automaton: Automaton<u32> = builder::build(&pairs, case_sensitive)?;
        trace!(
            "trie ready: {} patterns, case_sensitive={}, check_bounds={}",
            automaton.pattern_count(),
            case_sensitive,
            check_bounds
        );
        Ok(Trie {
            automaton,
            case_sensitive,
            check_bounds,
        })
    }

    /// Build a `Trie` with the default flags (`case_sensitive = true`,
    /// `check_bounds = false`).
    pub fn build<I, P, K>(dictionary: I) -> Result<Trie>
    where
        I: IntoIterator<Item = (P, K)>,
        P: Into<String>,
        K: Into<String>,
    {
        Trie::new(dictionary, true, false)
    }

    pub fn case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    pub fn check_bounds(&self) -> bool {
        self.check_bounds
    }

    pub fn pattern_count(&self) -> usize {
        self.automaton.pattern_count()
    }

    /// Heap bytes retained by the compiled automaton, for capacity
    /// diagnostics.
    pub fn heap_bytes(&self) -> usize {
        self.automaton.heap_bytes()
    }

    /// Scan a single haystack, returning matches in left-to-right,
    /// non-decreasing `to_char` order.
    pub fn search(&self, haystack: &str) -> Vec<Match> {
        scanner::scan(
            &self.automaton,
            haystack,
            self.case_sensitive,
            self.check_bounds,
        )
    }

    /// Scan each haystack independently, preserving input order. Index `i`
    /// of the result is exactly `self.search(&haystacks[i])`.
    ///
    /// With the `parallel` feature enabled, haystacks are distributed
    /// across a `rayon` thread pool; each worker owns disjoint input
    /// indices and writes into its own result slot, so no additional
    /// synchronization is needed.
    pub fn search_many<S: AsRef<str>>(&self, haystacks: &[S]) -> Vec<Vec<Match>> {
        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            haystacks
                .par_iter()
                .map(|h| self.search(h.as_ref()))
                .collect()
        }
        #[cfg(not(feature = "parallel"))]
        {
            haystacks.iter().map(|h| self.search(h.as_ref())).collect()
        }
    }
}

/// Build an ephemeral `Trie` (with `check_bounds = false`) from `dictionary`
/// and run [`Trie::search`] once.
///
/// One-shot searches don't carry a separate label, so `kw` is populated as
/// `kw = value` for each pattern.
pub fn search_in_text<I, P>(dictionary: I, haystack: &str, case_sensitive: bool) -> Result<Vec<Match>>
where
    I: IntoIterator<Item = P>,
    P: Into<String>,
{
    let patterns: Vec<String> = dictionary.into_iter().map(Into::into).collect();
    let self_mapped = patterns.iter().cloned().map(|p| (p.clone(), p));
    let trie = Trie::new(self_mapped, case_sensitive, false)?;
    Ok(trie.search(haystack))
}

/// Build an ephemeral `Trie` (with `check_bounds = false`) from `dictionary`
/// and run [`Trie::search_many`] once.
pub fn search_in_texts<I, P, S>(
    dictionary: I,
    haystacks: &[S],
    case_sensitive: bool,
) -> Result<Vec<Vec<Match>>>
where
    I: IntoIterator<Item = P>,
    P: Into<String>,
    S: AsRef<str>,
{
    let patterns: Vec<String> = dictionary.into_iter().map(Into::into).collect();
    let self_mapped = patterns.iter().cloned().map(|p| (p.clone(), p));
    let trie = Trie::new(self_mapped, case_sensitive, false)?;
    Ok(trie.search_many(haystacks))
}

/// Deduplicate a list of words and map each one to itself.
///
/// A convenience for building the identity-mapped dictionary this crate's
/// `Trie`/one-shot entry points expect when callers only have a word list
/// and don't need distinct keyword labels.
pub fn to_dictionary<I, W>(words: I) -> HashMap<String, String>
where
    I: IntoIterator<Item = W>,
    W: Into<String>,
{
    let unique: std::collections::HashSet<String> = words.into_iter().map(Into::into).collect();
    unique.into_iter().map(|w| (w.clone(), w)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_flags_match_spec_boundary() {
        let trie = Trie::build(vec![("ab", "ab")]).unwrap();
        assert!(trie.case_sensitive());
        assert!(!trie.check_bounds());
    }

    #[test]
    fn search_many_aligns_with_input_order() {
        let trie = Trie::build(vec![
            ("ab", "ab"),
            ("abc", "abc"),
            ("cd", "cd"),
            ("bcd", "bcd"),
            ("dq", "dq"),
        ])
        .unwrap();
        let texts = [
            "abq cdr qpbcd 12abcd",
            "xy, tre, 1245, mllmkh, aqqsd",
            "432 bcda plodq",
        ];
        let results = trie.search_many(&texts);
        assert_eq!(results.len(), texts.len());
        for (i, text) in texts.iter().enumerate() {
            assert_eq!(results[i], trie.search(text));
        }
        assert_eq!(results[0].len(), 8);
        assert_eq!(results[1].len(), 0);
        assert_eq!(results[2].len(), 3);
    }

    #[test]
    fn to_dictionary_self_maps_and_dedupes() {
        let dict = to_dictionary(vec!["a", "b", "a"]);
        assert_eq!(dict.len(), 2);
        assert_eq!(dict.get("a").map(String::as_str), Some("a"));
        assert_eq!(dict.get("b").map(String::as_str), Some("b"));
    }

    #[test]
    fn one_shot_search_populates_kw_as_value() {
        let matches = search_in_text(vec!["ab", "abc", "cd"], "abc", true).unwrap();
        for m in &matches {
            assert_eq!(m.kw, m.value);
        }
    }

    #[test]
    fn one_shot_invalid_dictionary_is_rejected() {
        assert!(search_in_text(Vec::<String>::new(), "text", true).is_err());
        assert!(search_in_text(vec!["a", "ab", "a"], "text", true).is_err());
        assert!(search_in_text(vec!["a", "ab", ""], "text", true).is_err());
    }
}
