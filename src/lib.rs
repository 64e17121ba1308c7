//! Multi-pattern Unicode substring search over an Aho-Corasick automaton.
//!
//! Given a dictionary mapping each pattern to a keyword label, a [`Trie`]
//! locates every occurrence of any pattern in a haystack in one linear
//! pass, reporting each match's code-point span, the exact matched text,
//! and the keyword it was registered under.
//!
//! ```
//! use kwsearch::Trie;
//!
//! let trie = Trie::build(vec![("ab", "ab"), ("cd", "cd"), ("bcd", "bcd")]).unwrap();
//! let matches = trie.search("abcd");
//! assert_eq!(matches.len(), 3);
//! ```
//!
//! See [`search_in_text`]/[`search_in_texts`] for one-shot use without
//! holding on to a compiled `Trie`.

mod automaton;
mod builder;
mod error;
mod handle;
mod normalize;
mod scanner;
mod state_id;

pub use error::{Error, Result};
pub use handle::{search_in_text, search_in_texts, to_dictionary, Trie};
pub use normalize::{fold_char, normalize_string};

/// One occurrence of a pattern in a haystack.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Match {
    /// Start index, in code-point units, inclusive.
    pub from_char: usize,
    /// End index, in code-point units, exclusive.
    pub to_char: usize,
    /// The exact substring of the haystack between `from_char` and
    /// `to_char`, preserving the haystack's original case.
    pub value: String,
    /// The keyword associated with the matched pattern in the dictionary.
    pub kw: String,
}

impl Match {
    /// Number of code points spanned by this match.
    pub fn len(&self) -> usize {
        self.to_char - self.from_char
    }

    pub fn is_empty(&self) -> bool {
        self.from_char == self.to_char
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batch_alignment_holds() {
        let trie = Trie::build(vec![("ab", "ab"), ("abc", "abc"), ("cd", "cd")]).unwrap();
        let texts = ["abq cdr", "xy, tre", "abcd"];
        let batched = trie.search_many(&texts);
        assert_eq!(batched.len(), texts.len());
        for (i, text) in texts.iter().enumerate() {
            assert_eq!(batched[i], trie.search(text));
        }
    }

    #[test]
    fn word_boundary_scenario_from_spec_section_8() {
        let dict = vec![
            ("ab", "ab"),
            ("abc", "ab"),
            ("épq", "epq"),
            ("épqr", "epq"),
        ];
        let trie = Trie::new(dict, true, true).unwrap();

        let no_matches = trie.search("abco zab épqrst! -épqo");
        assert_eq!(no_matches.len(), 0);

        let matches = trie.search("abc :ab épqr! -épq");
        assert_eq!(matches.len(), 4);
        let pairs: Vec<(&str, &str)> = matches
            .iter()
            .map(|m| (m.kw.as_str(), m.value.as_str()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("ab", "abc"),
                ("ab", "ab"),
                ("epq", "epqr"),
                ("epq", "epq"),
            ]
        );
    }
}
