//! The compiled, immutable automaton: an arena of nodes linked by integer
//! ids (goto children, a failure link, and a dictionary link).
//!
//! Nodes are addressed by integer id rather than by reference, so the
//! failure/dictionary links (which necessarily point "backwards" and would
//! otherwise form reference cycles) are just more integers. Transitions are
//! keyed on `char`, not bytes, so the automaton walks code points directly.

use std::mem::size_of;

use crate::state_id::{fail_id, StateID};

/// Metadata about one dictionary entry, indexed by `PatternId`.
#[derive(Debug, Clone)]
pub(crate) struct PatternInfo {
    pub(crate) keyword: String,
    pub(crate) char_len: usize,
}

pub(crate) type PatternId = usize;

#[derive(Clone)]
pub(crate) struct Node<S> {
    trans: Transitions<S>,
    fail: S,
    /// Nearest proper-suffix ancestor (by failure chain) with non-empty
    /// output, or `None` if no such ancestor exists.
    dict_link: Option<S>,
    /// Patterns whose final character lands exactly on this node.
    output: Vec<PatternId>,
}

impl<S: StateID> Node<S> {
    pub(crate) fn new(fail: S) -> Self {
        Node {
            trans: Transitions(Vec::new()),
            fail,
            dict_link: None,
            output: Vec::new(),
        }
    }

    fn heap_bytes(&self) -> usize {
        self.trans.heap_bytes() + self.output.len() * size_of::<PatternId>()
    }

    pub(crate) fn goto(&self, c: char) -> Option<S>
    where
        S: StateID,
    {
        self.trans.get(c)
    }

    pub(crate) fn set_goto(&mut self, c: char, next: S)
    where
        S: StateID,
    {
        self.trans.set(c, next);
    }

    pub(crate) fn transitions(&self) -> impl Iterator<Item = (char, S)> + '_
    where
        S: StateID,
    {
        self.trans.0.iter().copied()
    }

    pub(crate) fn fail(&self) -> S
    where
        S: StateID,
    {
        self.fail
    }

    pub(crate) fn set_fail(&mut self, fail: S) {
        self.fail = fail;
    }

    pub(crate) fn dict_link(&self) -> Option<S>
    where
        S: StateID,
    {
        self.dict_link
    }

    pub(crate) fn set_dict_link(&mut self, link: Option<S>) {
        self.dict_link = link;
    }

    pub(crate) fn add_output(&mut self, pattern: PatternId) {
        self.output.push(pattern);
    }

    pub(crate) fn output(&self) -> &[PatternId] {
        &self.output
    }

    pub(crate) fn has_output(&self) -> bool {
        !self.output.is_empty()
    }
}

/// A node's outgoing transitions, represented as a sorted `Vec` searched by
/// binary search rather than a full alphabet-sized table, since most nodes
/// only have a handful of children.
#[derive(Clone)]
struct Transitions<S>(Vec<(char, S)>);

impl<S: StateID> Transitions<S> {
    fn heap_bytes(&self) -> usize {
        self.0.len() * size_of::<(char, S)>()
    }

    fn get(&self, c: char) -> Option<S> {
        self.0
            .binary_search_by_key(&c, |&(ch, _)| ch)
            .ok()
            .map(|i| self.0[i].1)
    }

    fn set(&mut self, c: char, next: S) {
        match self.0.binary_search_by_key(&c, |&(ch, _)| ch) {
            Ok(i) => self.0[i].1 = next,
            Err(i) => self.0.insert(i, (c, next)),
        }
    }
}

/// The compiled, immutable multi-pattern automaton.
///
/// Construction lives in [`crate::builder`]; this type only exposes the
/// read-only queries the Scanner needs. Safe to share across threads: no
/// node is ever mutated after [`crate::builder::build`] returns.
pub(crate) struct Automaton<S: StateID = u32> {
    start_id: S,
    states: Vec<Node<S>>,
    patterns: Vec<PatternInfo>,
}

impl<S: StateID> Automaton<S> {
    pub(crate) fn new(start_id: S, states: Vec<Node<S>>, patterns: Vec<PatternInfo>) -> Self {
        Automaton {
            start_id,
            states,
            patterns,
        }
    }

    #[inline]
    pub(crate) fn start_state(&self) -> S {
        self.start_id
    }

    #[inline]
    pub(crate) fn is_root(&self, id: S) -> bool {
        id == self.start_id
    }

    /// The goto transition out of `id` on `c`, or `None`.
    #[inline]
    pub(crate) fn goto(&self, id: S, c: char) -> Option<S> {
        self.states[id.to_usize()].goto(c)
    }

    #[inline]
    pub(crate) fn fail(&self, id: S) -> S {
        self.states[id.to_usize()].fail()
    }

    #[inline]
    pub(crate) fn dict_link(&self, id: S) -> Option<S> {
        self.states[id.to_usize()].dict_link()
    }

    #[inline]
    pub(crate) fn output(&self, id: S) -> &[PatternId] {
        self.states[id.to_usize()].output()
    }

    pub(crate) fn pattern(&self, id: PatternId) -> &PatternInfo {
        &self.patterns[id]
    }

    pub(crate) fn pattern_count(&self) -> usize {
        self.patterns.len()
    }

    pub(crate) fn node_count(&self) -> usize {
        self.states.len()
    }

    pub(crate) fn heap_bytes(&self) -> usize {
        self.states.iter().map(Node::heap_bytes).sum()
    }
}

/// The reserved, never-a-real-node id used while constructing the trie.
pub(crate) fn fail_node_id<S: StateID>() -> S {
    fail_id()
}
