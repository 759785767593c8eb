// Copyright 2015 Joe Neeman.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! M3: the recognizer. A subset-construction DFA over the *reverse* of
//! M2, run backward across the input, that decides whether the whole
//! input matches.
//!
//! [`RecognizerDfa`] discovers this DFA lazily (the standard hybrid/lazy
//! construction: a state is built the first time a match run reaches it,
//! never before) but, unlike re-deriving a power-state on every character
//! of every call, every discovered state and every transition out of it is
//! cached for the lifetime of the compiled pattern. Two pieces are cached
//! separately because they depend on different things:
//!
//! - [`RecognizerDfa::transitions`]: a closed state's outgoing character
//!   transitions, partitioned into a disjoint alphabet by
//!   [`crate::rangeset::disjoint_partition`] over the `Char` states whose
//!   successors reach it. This is purely a function of pattern structure,
//!   so it is computed once per closed state and reused across every
//!   input the pattern is ever matched against.
//! - [`RecognizerDfa::close`]: boundary closure, which *is* context
//!   dependent (it asks "is the input at a word boundary here?"), but the
//!   only part of the context any `BoundaryKind` can see is fully captured
//!   by [`BoundaryContext`] — six booleans, one per kind. Closure is
//!   therefore cached per `(raw state, context)` pair, of which there are
//!   at most 64 contexts, rather than per input position.

use std::cell::RefCell;
use std::collections::{BTreeSet, HashMap};
use std::fmt;

use crate::ast::BoundaryKind;
use crate::nfa::boundary_holds;
use crate::rangeset::{disjoint_partition, IntRangeSet};
use crate::tagged_nfa::{M2Out, M2StateId, TaggedNfa2};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct M3StateId(u32);

/// Every `BoundaryKind`'s truth value at one input position. This is
/// exactly the information `boundary_holds` can ever look at, so two
/// positions with the same `BoundaryContext` close identically — which is
/// what makes memoizing closure on `(state, context)` instead of
/// `(state, position)` sound.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
struct BoundaryContext {
    start_text: bool,
    end_text: bool,
    start_line: bool,
    end_line: bool,
    word_boundary: bool,
    not_word_boundary: bool,
}

impl BoundaryContext {
    fn at(input: &[char], pos: usize, unix_lines: bool) -> BoundaryContext {
        BoundaryContext {
            start_text: boundary_holds(BoundaryKind::StartText, input, pos, unix_lines),
            end_text: boundary_holds(BoundaryKind::EndText, input, pos, unix_lines),
            start_line: boundary_holds(BoundaryKind::StartLine, input, pos, unix_lines),
            end_line: boundary_holds(BoundaryKind::EndLine, input, pos, unix_lines),
            word_boundary: boundary_holds(BoundaryKind::WordBoundary, input, pos, unix_lines),
            not_word_boundary: boundary_holds(BoundaryKind::NotWordBoundary, input, pos, unix_lines),
        }
    }

    fn holds(&self, kind: BoundaryKind) -> bool {
        match kind {
            BoundaryKind::StartText => self.start_text,
            BoundaryKind::EndText => self.end_text,
            BoundaryKind::StartLine => self.start_line,
            BoundaryKind::EndLine => self.end_line,
            BoundaryKind::WordBoundary => self.word_boundary,
            BoundaryKind::NotWordBoundary => self.not_word_boundary,
        }
    }
}

/// M3: the reverse-determinized recognizer DFA over M2, built lazily and
/// cached for the life of the `CompiledPattern` that owns it.
pub struct RecognizerDfa {
    m2: TaggedNfa2,
    unix_lines: bool,
    /// Every distinct set of M2 states ever produced, whether a raw
    /// (pre-closure) subset-construction target or a boundary-closed
    /// state; `M3StateId` is just an index into this pool.
    interned: RefCell<Vec<BTreeSet<M2StateId>>>,
    index: RefCell<HashMap<BTreeSet<M2StateId>, M3StateId>>,
    /// `(raw, context) -> closed`, populated by `close`.
    closures: RefCell<HashMap<(M3StateId, BoundaryContext), M3StateId>>,
    /// `closed -> partitioned (alphabet cell, raw successor)` transitions,
    /// populated by `transitions`.
    char_edges: RefCell<HashMap<M3StateId, Vec<(IntRangeSet, M3StateId)>>>,
}

impl RecognizerDfa {
    pub fn new(m2: TaggedNfa2, unix_lines: bool) -> RecognizerDfa {
        RecognizerDfa {
            m2,
            unix_lines,
            interned: RefCell::new(Vec::new()),
            index: RefCell::new(HashMap::new()),
            closures: RefCell::new(HashMap::new()),
            char_edges: RefCell::new(HashMap::new()),
        }
    }

    pub fn m2(&self) -> &TaggedNfa2 {
        &self.m2
    }

    pub fn unix_lines(&self) -> bool {
        self.unix_lines
    }

    pub fn contains(&self, id: M3StateId, m2_id: M2StateId) -> bool {
        self.interned.borrow()[id.0 as usize].contains(&m2_id)
    }

    fn intern(&self, set: BTreeSet<M2StateId>) -> M3StateId {
        if let Some(&id) = self.index.borrow().get(&set) {
            return id;
        }
        let mut interned = self.interned.borrow_mut();
        let id = M3StateId(interned.len() as u32);
        interned.push(set.clone());
        self.index.borrow_mut().insert(set, id);
        id
    }

    fn members(&self, id: M3StateId) -> BTreeSet<M2StateId> {
        self.interned.borrow()[id.0 as usize].clone()
    }

    /// The state reached by closing `raw` under boundary states whose
    /// predicate `ctx` satisfies. Cached on `(raw, ctx)`: every subsequent
    /// position sharing that pair reuses this result instead of re-walking
    /// the fixpoint.
    fn close(&self, raw: M3StateId, ctx: BoundaryContext) -> M3StateId {
        if let Some(&cached) = self.closures.borrow().get(&(raw, ctx)) {
            return cached;
        }
        let mut set = self.members(raw);
        loop {
            let mut added = false;
            for (idx, state) in self.m2.states().iter().enumerate() {
                let id = M2StateId(idx as u32);
                if set.contains(&id) {
                    continue;
                }
                if let M2Out::Boundary(kind, succs) = state {
                    if ctx.holds(*kind) && succs.iter().any(|(w, _)| set.contains(w)) {
                        set.insert(id);
                        added = true;
                    }
                }
            }
            if !added {
                break;
            }
        }
        let closed = self.intern(set);
        self.closures.borrow_mut().insert((raw, ctx), closed);
        closed
    }

    /// The partitioned outgoing character transitions of closed state
    /// `from`: every M2 `Char` state whose successors reach `from`,
    /// partitioned into a disjoint alphabet by `disjoint_partition` so
    /// each cell maps to exactly one raw successor state. Computed once
    /// per `from`, then cached.
    fn transitions(&self, from: M3StateId) -> Vec<(IntRangeSet, M3StateId)> {
        if let Some(cached) = self.char_edges.borrow().get(&from) {
            return cached.clone();
        }
        let set = self.members(from);
        let labeled: Vec<(M2StateId, IntRangeSet)> = self
            .m2
            .states()
            .iter()
            .enumerate()
            .filter_map(|(idx, state)| match state {
                M2Out::Char(pred, succs) if succs.iter().any(|(w, _)| set.contains(w)) => {
                    Some((M2StateId(idx as u32), pred.clone()))
                }
                _ => None,
            })
            .collect();

        let mut out = Vec::new();
        for (labels, cell) in disjoint_partition(&labeled) {
            let raw: BTreeSet<M2StateId> = labels.into_iter().collect();
            out.push((cell, self.intern(raw)));
        }
        self.char_edges.borrow_mut().insert(from, out.clone());
        out
    }

    /// Runs the recognizer backward over `input`, returning the closed M3
    /// state reached at every position `0..=input.len()`.
    pub fn run(&self, input: &[char]) -> Trace {
        let n = input.len();
        let mut ids = Vec::with_capacity(n + 1);

        let mut seed = BTreeSet::new();
        seed.insert(self.m2.terminal);
        let seed = self.intern(seed);
        let ctx = BoundaryContext::at(input, n, self.unix_lines);
        let mut cur = self.close(seed, ctx);
        ids.push(cur);

        for i in (0..n).rev() {
            let c = input[i];
            let raw = self
                .transitions(cur)
                .iter()
                .find(|(cell, _)| cell.contains(c as u32))
                .map(|&(_, id)| id)
                .unwrap_or_else(|| self.intern(BTreeSet::new()));
            let ctx = BoundaryContext::at(input, i, self.unix_lines);
            cur = self.close(raw, ctx);
            ids.push(cur);
        }
        ids.reverse();

        Trace { ids }
    }
}

impl fmt::Debug for RecognizerDfa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RecognizerDfa {{ m2: {:?}, unix_lines: {}, cached_states: {} }}",
            self.m2,
            self.unix_lines,
            self.interned.borrow().len()
        )
    }
}

/// `ids[i]` is the M3 state reached from matching forward, starting at
/// input offset `i`, consuming `input[i..]` and reaching M2's terminal.
/// `ids.len() == input.len() + 1`.
#[derive(Debug)]
pub struct Trace {
    ids: Vec<M3StateId>,
}

impl Trace {
    /// Does the whole of the input this trace was built from match?
    pub fn accepts(&self, dfa: &RecognizerDfa) -> bool {
        dfa.m2.initial.iter().any(|(id, _)| dfa.contains(self.ids[0], *id))
    }

    /// Does the M3 state at `pos` contain M2 state `id`? The one query M4
    /// needs to follow this trace forward.
    pub fn contains(&self, dfa: &RecognizerDfa, pos: usize, id: M2StateId) -> bool {
        dfa.contains(self.ids[pos], id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::RegexAst;
    use crate::nfa::TaggedNfa;
    use crate::rangeset::{IntRange, IntRangeSet};

    fn lit(c: char) -> RegexAst {
        RegexAst::CharClass(IntRangeSet::of([IntRange::single(c as u32)]))
    }

    #[test]
    fn accepts_exact_literal() {
        let ast = RegexAst::concat(lit('a'), lit('b'));
        let m1 = TaggedNfa::from_ast(&ast, 0);
        let m2 = TaggedNfa2::build(&m1);
        let dfa = RecognizerDfa::new(m2, false);

        let input: Vec<char> = "ab".chars().collect();
        assert!(dfa.run(&input).accepts(&dfa));

        let input: Vec<char> = "abc".chars().collect();
        assert!(!dfa.run(&input).accepts(&dfa));
    }

    #[test]
    fn end_text_boundary_requires_end_of_input() {
        let ast = RegexAst::concat(lit('a'), RegexAst::Boundary(crate::ast::BoundaryKind::EndText));
        let m1 = TaggedNfa::from_ast(&ast, 0);
        let m2 = TaggedNfa2::build(&m1);
        let dfa = RecognizerDfa::new(m2, false);

        let input: Vec<char> = "a".chars().collect();
        assert!(dfa.run(&input).accepts(&dfa));
    }

    #[test]
    fn repeated_runs_reuse_cached_states() {
        // Running the same pattern against several inputs should not grow
        // the state pool without bound: the same small set of M3 states
        // should be revisited, not rediscovered, once warmed up.
        let ast = RegexAst::Star(Box::new(lit('a')), false);
        let m1 = TaggedNfa::from_ast(&ast, 0);
        let m2 = TaggedNfa2::build(&m1);
        let dfa = RecognizerDfa::new(m2, false);

        for _ in 0..3 {
            let input: Vec<char> = "aaaa".chars().collect();
            assert!(dfa.run(&input).accepts(&dfa));
        }
        assert!(dfa.interned.borrow().len() < 10);
    }
}
