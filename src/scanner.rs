//! Executes the automaton against a haystack: one linear pass producing
//! overlapping matches in left-to-right, non-decreasing `to_char` order,
//! with optional case folding and word-boundary filtering.
//!
//! At each code point the walk follows a goto transition if one exists,
//! otherwise falls back along failure links until one does (or the root is
//! reached). At every node landed on, the full dictionary-link chain is
//! walked so all patterns ending at that position are emitted, longest
//! first, then its suffixes.

use crate::automaton::Automaton;
use crate::normalize::fold_char;
use crate::state_id::StateID;
use crate::Match;

pub(crate) fn scan<S: StateID>(
    automaton: &Automaton<S>,
    haystack: &str,
    case_sensitive: bool,
    check_bounds: bool,
) -> Vec<Match> {
    let original: Vec<char> = haystack.chars().collect();
    let folded: Vec<char> = if case_sensitive {
        original.clone()
    } else {
        original.iter().copied().map(fold_char).collect()
    };

    let mut matches = Vec::new();
    let mut node = automaton.start_state();

    for (i, &c) in folded.iter().enumerate() {
        while !automaton.is_root(node) && automaton.goto(node, c).is_none() {
            node = automaton.fail(node);
        }
        node = automaton.goto(node, c).unwrap_or_else(|| automaton.start_state());

        let to_char = i + 1;
        emit_outputs(automaton, node, to_char, &original, &mut matches);
    }

    if check_bounds {
        matches.retain(|m| has_word_boundaries(&folded, m.from_char, m.to_char));
    }

    matches
}

/// Walk the dictionary-link chain starting at `node`, emitting one
/// [`Match`] per output in the order the chain is traversed: `node`'s own
/// output first (the longest match ending here), then progressively
/// shorter suffix matches.
fn emit_outputs<S: StateID>(
    automaton: &Automaton<S>,
    node: S,
    to_char: usize,
    original: &[char],
    out: &mut Vec<Match>,
) {
    let emit_one = |pattern_id: usize, out: &mut Vec<Match>| {
        let info = automaton.pattern(pattern_id);
        let from_char = to_char - info.char_len;
        let value: String = original[from_char..to_char].iter().collect();
        out.push(Match {
            from_char,
            to_char,
            value,
            kw: info.keyword.clone(),
        });
    };

    for &pattern_id in automaton.output(node) {
        emit_one(pattern_id, out);
    }

    // `dict_link` always names a node with non-empty output, so every step
    // past the first is guaranteed to contribute at least one match.
    let mut link = automaton.dict_link(node);
    while let Some(id) = link {
        for &pattern_id in automaton.output(id) {
            emit_one(pattern_id, out);
        }
        link = automaton.dict_link(id);
    }
}

/// A "word character": any Unicode letter, digit, or underscore, tested on
/// the folded haystack.
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn has_word_boundaries(folded: &[char], from_char: usize, to_char: usize) -> bool {
    let before_ok = match from_char.checked_sub(1) {
        Some(i) => !is_word_char(folded[i]),
        None => true,
    };
    let after_ok = match folded.get(to_char) {
        Some(&c) => !is_word_char(c),
        None => true,
    };
    before_ok && after_ok
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::build;

    fn automaton(pairs: &[(&str, &str)], case_sensitive: bool) -> Automaton<u32> {
        let dict: Vec<(String, String)> = pairs
            .iter()
            .map(|(p, k)| (p.to_string(), k.to_string()))
            .collect();
        build(&dict, case_sensitive).unwrap()
    }

    #[test]
    fn empty_haystack_yields_no_matches() {
        let a = automaton(&[("ab", "ab")], true);
        assert!(scan(&a, "", true, false).is_empty());
    }

    #[test]
    fn full_haystack_match() {
        let a = automaton(&[("abc", "abc")], true);
        let matches = scan(&a, "abc", true, false);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].from_char, 0);
        assert_eq!(matches[0].to_char, 3);
        assert_eq!(matches[0].value, "abc");
    }

    #[test]
    fn scenario_from_spec_section_8() {
        let a = automaton(
            &[
                ("ab", "ab"),
                ("abc", "abc"),
                ("cd", "cd"),
                ("bcd", "bcd"),
                ("dq", "dq"),
            ],
            true,
        );
        let mut matches = scan(&a, "abq cdr qpbcd 12abcd", true, false);
        assert_eq!(matches.len(), 8);
        matches.sort_by(|x, y| (x.from_char, &x.value).cmp(&(y.from_char, &y.value)));
        let values: Vec<&str> = matches.iter().map(|m| m.value.as_str()).collect();
        assert_eq!(
            values,
            vec!["ab", "cd", "bcd", "cd", "ab", "abc", "bcd", "cd"]
        );
    }

    #[test]
    fn case_insensitive_scenario() {
        let a = automaton(&[("abc", "abc"), ("cde", "cde"), ("erx", "erx")], false);
        let matches = scan(&a, "ABCDE eRX cDe", false, false);
        assert_eq!(matches.len(), 4);
    }

    #[test]
    fn slice_agreement_holds() {
        let a = automaton(
            &[("ab", "ab"), ("abc", "abc"), ("cd", "cd"), ("bcd", "bcd")],
            true,
        );
        let haystack = "abq cdr qpbcd 12abcd";
        let chars: Vec<char> = haystack.chars().collect();
        for m in scan(&a, haystack, true, false) {
            let slice: String = chars[m.from_char..m.to_char].iter().collect();
            assert_eq!(slice, m.value);
        }
    }
}
