//! Validates a dictionary and compiles it into an [`Automaton`].
//!
//! Trie insertion proceeds code point by code point, followed by a
//! breadth-first pass that fills in failure links and, for nodes that sit
//! on the failure chain of an accepting node, a dictionary link. Matches
//! aren't flattened onto each node at build time; the dictionary link is
//! walked live at scan time so overlapping matches come out longest
//! pattern first, then its suffixes.

use std::collections::{HashSet, VecDeque};

use log::{debug, trace};

use crate::automaton::{fail_node_id, Automaton, Node, PatternInfo};
use crate::error::{Error, Result};
use crate::normalize::{fold_char, fold_str};
use crate::state_id::{usize_to_state_id, StateID};

/// Build an [`Automaton`] from a dictionary of pattern -> keyword pairs.
///
/// `case_sensitive = false` folds every pattern key (Unicode simple
/// lowercase, code-point for code-point) before inserting it into the trie;
/// the Scanner is responsible for folding the haystack the same way.
pub(crate) fn build<S: StateID>(
    dictionary: &[(String, String)],
    case_sensitive: bool,
) -> Result<Automaton<S>> {
    validate(dictionary, case_sensitive)?;

    let start_id = usize_to_state_id(1)
        .ok_or_else(|| Error::invalid("dictionary too large for the chosen state id width"))?;

    let mut states = vec![
        Node::new(fail_node_id()), // index 0: reserved fail state, never entered
        Node::new(start_id),       // index 1: the root/start state, its own failure
    ];
    let mut patterns = Vec::with_capacity(dictionary.len());

    for (pattern, keyword) in dictionary {
        let chars: Vec<char> = if case_sensitive {
            pattern.chars().collect()
        } else {
            pattern.chars().map(fold_char).collect()
        };
        insert(&mut states, start_id, &chars, patterns.len());
        patterns.push(PatternInfo {
            keyword: keyword.clone(),
            char_len: chars.len(),
        });
    }

    fill_failure_and_dict_links(&mut states, start_id);

    debug!(
        "built automaton: {} patterns, {} nodes",
        patterns.len(),
        states.len()
    );

    Ok(Automaton::new(start_id, states, patterns))
}

/// Checks §4.1's four validation rules before any structural work begins.
fn validate(dictionary: &[(String, String)], case_sensitive: bool) -> Result<()> {
    if dictionary.is_empty() {
        return Err(Error::invalid("dictionary is empty"));
    }
    if dictionary.iter().any(|(pattern, _)| pattern.is_empty()) {
        return Err(Error::invalid("dictionary contains an empty pattern"));
    }

    let mut seen = HashSet::with_capacity(dictionary.len());
    for (pattern, _) in dictionary {
        let key: String = if case_sensitive {
            pattern.clone()
        } else {
            fold_str(pattern)
        };
        if !seen.insert(key) {
            return Err(Error::invalid(if case_sensitive {
                format!("duplicate pattern key: {pattern:?}")
            } else {
                format!("case-insensitive collision on folded pattern: {pattern:?}")
            }));
        }
    }
    Ok(())
}

/// Walk the goto trie from root, creating child nodes for missing
/// transitions, and record `pattern_id`'s output at the terminal node.
fn insert<S: StateID>(
    states: &mut Vec<Node<S>>,
    start_id: S,
    pattern: &[char],
    pattern_id: usize,
) {
    let mut current = start_id;
    for &c in pattern {
        current = match states[current.to_usize()].goto(c) {
            Some(next) => next,
            None => {
                let id = usize_to_state_id(states.len())
                    .expect("state id representation exhausted");
                states.push(Node::new(start_id));
                states[current.to_usize()].set_goto(c, id);
                id
            }
        };
    }
    states[current.to_usize()].add_output(pattern_id);
}

/// Breadth-first construction of failure links and dictionary links.
fn fill_failure_and_dict_links<S: StateID>(states: &mut [Node<S>], start_id: S) {
    let mut queue = VecDeque::new();

    // Every direct child of root fails to root itself.
    let root_children: Vec<(char, S)> = states[start_id.to_usize()].transitions().collect();
    for (_, child) in &root_children {
        states[child.to_usize()].set_fail(start_id);
        queue.push_back(*child);
    }

    while let Some(u) = queue.pop_front() {
        let children: Vec<(char, S)> = states[u.to_usize()].transitions().collect();
        for (c, v) in children {
            queue.push_back(v);

            let mut f = states[u.to_usize()].fail();
            while f != start_id && states[f.to_usize()].goto(c).is_none() {
                f = states[f.to_usize()].fail();
            }
            let fail_target = match states[f.to_usize()].goto(c) {
                Some(target) if target != v => target,
                _ => start_id,
            };
            states[v.to_usize()].set_fail(fail_target);

            let dict_link = if states[fail_target.to_usize()].has_output() {
                Some(fail_target)
            } else {
                states[fail_target.to_usize()].dict_link()
            };
            states[v.to_usize()].set_dict_link(dict_link);
        }
    }
    trace!("failure and dictionary links computed for {} states", states.len());
}
