// Copyright 2015 Joe Neeman.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! M2: the epsilon-collapsed NFA.
//!
//! Built from M1 by keeping only the *preserved* states (the terminal,
//! and every state with an outgoing `Char` or `Boundary` transition) and
//! replacing every run of epsilon edges (`Fork`/`GroupStart`/`GroupEnd`)
//! between two preserved states with the single marker path a
//! priority-respecting walk would take between them.
//!
//! The marker path is found with the relaxation in §4.4.1: `reach[u][v]`
//! records the *first* marker on the best (highest priority) path from
//! `u` to `v`; since every M1 state has at most one outgoing epsilon edge
//! (or two, tagged `Plus`/`Minus`, for a `Fork`), that single marker
//! determines which concrete successor to step to next, so the whole path
//! can be reconstructed by repeated lookups without a separate
//! predecessor table.

use std::collections::HashMap;
use std::fmt;

use itertools::Itertools;

use crate::ast::BoundaryKind;
use crate::marker::{compare_markers, prefers, PathMarker};
use crate::nfa::{M1Transition, StateId, TaggedNfa};
use crate::rangeset::IntRangeSet;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct M2StateId(pub u32);

#[derive(Clone, Debug)]
pub enum M2Out {
    Terminal,
    Char(IntRangeSet, Vec<(M2StateId, Vec<PathMarker>)>),
    Boundary(BoundaryKind, Vec<(M2StateId, Vec<PathMarker>)>),
}

pub struct TaggedNfa2 {
    states: Vec<M2Out>,
    /// Preserved M2 states reachable from M1's initial state, each tagged
    /// with the marker path crossed to get there.
    pub initial: Vec<(M2StateId, Vec<PathMarker>)>,
    pub terminal: M2StateId,
}

impl TaggedNfa2 {
    pub fn states(&self) -> &[M2Out] {
        &self.states
    }

    pub fn out(&self, id: M2StateId) -> &M2Out {
        &self.states[id.0 as usize]
    }

    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    pub fn build(m1: &TaggedNfa) -> TaggedNfa2 {
        let n = m1.transitions().len();
        let preserved: Vec<bool> = (0..n)
            .map(|i| {
                matches!(
                    m1.transition(StateId(i as u32)),
                    M1Transition::Terminal | M1Transition::Char(..) | M1Transition::Boundary(..)
                )
            })
            .collect();

        let reach = floyd_warshall(m1, n);

        let index_of: HashMap<StateId, M2StateId> = (0..n)
            .filter(|&i| preserved[i])
            .enumerate()
            .map(|(new_idx, old_idx)| (StateId(old_idx as u32), M2StateId(new_idx as u32)))
            .collect();

        // Priority order among the preserved states reachable from `from`
        // cannot be read off `reach` (an all-pairs table has no notion of
        // "which of several targets is preferred"); instead walk the
        // epsilon subgraph directly, visiting a `Fork`'s `Plus` branch
        // before its `Minus` branch, so the first preserved state reached
        // is the highest-priority one. `reach` still supplies the marker
        // path to each target once we know we want it.
        let closure = |from: StateId| -> Vec<(M2StateId, Vec<PathMarker>)> {
            let mut visited = vec![false; n];
            let mut order = Vec::new();
            priority_dfs(m1, &preserved, from, &mut visited, &mut order);
            order
                .into_iter()
                .map(|v| (index_of[&v], shortest_marker_path(m1, &reach, from, v)))
                .collect()
        };

        let mut states = Vec::with_capacity(index_of.len());
        let ordered: Vec<(StateId, M2StateId)> = index_of
            .iter()
            .map(|(&a, &b)| (a, b))
            .sorted_by_key(|&(_, m2)| m2.0)
            .collect();
        for (old_id, _) in &ordered {
            let out = match m1.transition(*old_id) {
                M1Transition::Terminal => M2Out::Terminal,
                M1Transition::Char(set, to) => M2Out::Char(set.clone(), closure(*to)),
                M1Transition::Boundary(kind, to) => M2Out::Boundary(*kind, closure(*to)),
                _ => unreachable!("non-preserved state made it into the preserved index"),
            };
            states.push(out);
        }

        TaggedNfa2 {
            states,
            initial: closure(m1.initial()),
            terminal: index_of[&m1.terminal()],
        }
    }
}

impl fmt::Debug for TaggedNfa2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let initial = self.initial.iter().map(|(id, m)| format!("{:?}/{:?}", id, m)).join(", ");
        writeln!(f, "TaggedNfa2 {{ terminal: {:?}, initial: [{}] }}", self.terminal, initial)?;
        for (i, out) in self.states.iter().enumerate() {
            writeln!(f, "  {:?} -> {:?}", M2StateId(i as u32), out)?;
        }
        Ok(())
    }
}

/// Priority-order DFS over the epsilon subgraph: preserved states (which
/// have no outgoing epsilon edge) terminate the walk; `Fork` is visited
/// `Plus` branch first. Dedups on first visit, since the first visit is
/// by construction the highest-priority one.
fn priority_dfs(m1: &TaggedNfa, preserved: &[bool], state: StateId, visited: &mut [bool], order: &mut Vec<StateId>) {
    if visited[state.0 as usize] {
        return;
    }
    visited[state.0 as usize] = true;
    if preserved[state.0 as usize] {
        order.push(state);
        return;
    }
    match m1.transition(state) {
        M1Transition::Fork(plus, minus) => {
            priority_dfs(m1, preserved, *plus, visited, order);
            priority_dfs(m1, preserved, *minus, visited, order);
        }
        M1Transition::GroupStart(_, next) | M1Transition::GroupEnd(_, next) => {
            priority_dfs(m1, preserved, *next, visited, order);
        }
        _ => unreachable!("non-preserved state must have an epsilon transition"),
    }
}

type Reach = HashMap<(StateId, StateId), PathMarker>;

fn relax(reach: &mut Reach, i: StateId, j: StateId, marker: PathMarker) {
    if i == j {
        return;
    }
    let existing = reach.get(&(i, j)).copied();
    if prefers(marker, existing) {
        reach.insert((i, j), marker);
    }
}

fn floyd_warshall(m1: &TaggedNfa, n: usize) -> Reach {
    let mut reach = Reach::new();
    for i in 0..n {
        let u = StateId(i as u32);
        match m1.transition(u) {
            M1Transition::Fork(plus, minus) => {
                relax(&mut reach, u, *plus, PathMarker::Plus);
                relax(&mut reach, u, *minus, PathMarker::Minus);
            }
            M1Transition::GroupStart(idx, to) => relax(&mut reach, u, *to, PathMarker::GroupStart(*idx)),
            M1Transition::GroupEnd(idx, to) => relax(&mut reach, u, *to, PathMarker::GroupEnd(*idx)),
            _ => {}
        }
    }

    let states: Vec<StateId> = (0..n).map(|i| StateId(i as u32)).collect();
    for &k in &states {
        for &i in &states {
            let Some(&m_ik) = reach.get(&(i, k)) else { continue };
            for &j in &states {
                if reach.contains_key(&(k, j)) || k == j {
                    relax(&mut reach, i, j, m_ik);
                }
            }
        }
    }
    reach
}

fn shortest_marker_path(m1: &TaggedNfa, reach: &Reach, mut u: StateId, v: StateId) -> Vec<PathMarker> {
    let mut path = Vec::new();
    while u != v {
        let m = *reach
            .get(&(u, v))
            .expect("shortest_marker_path: target unreachable from source");
        let next = match m1.transition(u) {
            M1Transition::Fork(plus, minus) => {
                if compare_markers(m, PathMarker::Plus) == std::cmp::Ordering::Equal {
                    *plus
                } else {
                    *minus
                }
            }
            M1Transition::GroupStart(_, next) | M1Transition::GroupEnd(_, next) => *next,
            _ => unreachable!("epsilon-reachable state must have an epsilon-producing transition"),
        };
        path.push(m);
        u = next;
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::RegexAst;
    use crate::rangeset::IntRange;

    fn lit(c: char) -> RegexAst {
        RegexAst::CharClass(IntRangeSet::of([IntRange::single(c as u32)]))
    }

    #[test]
    fn simple_literal_has_one_char_edge_per_state() {
        let ast = RegexAst::concat(lit('a'), lit('b'));
        let m1 = TaggedNfa::from_ast(&ast, 0);
        let m2 = TaggedNfa2::build(&m1);
        // 'a' state, 'b' state, terminal: exactly three preserved states.
        assert_eq!(m2.state_count(), 3);
        assert!(matches!(m2.out(m2.terminal), M2Out::Terminal));
    }

    #[test]
    fn group_markers_survive_collapse() {
        let ast = RegexAst::Group {
            body: Box::new(lit('a')),
            index: Some(0),
        };
        let m1 = TaggedNfa::from_ast(&ast, 1);
        let m2 = TaggedNfa2::build(&m1);
        // initial -> the 'a' char-state, crossing GroupStart(0).
        assert_eq!(m2.initial.len(), 1);
        assert_eq!(m2.initial[0].1, vec![PathMarker::GroupStart(0)]);
    }
}
