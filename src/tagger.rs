// Copyright 2015 Joe Neeman.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! M4: the forward tagging walk. Given an M3 trace (§4.4.2) confirming a
//! match exists, this walks M2 forward once, using the trace at each
//! position to prune to only the states that still lead to acceptance,
//! and the `Plus`/`Minus` priority order within M2's edge lists to break
//! ties, recording a capture-group offset every time a `GroupStart`/
//! `GroupEnd` marker is crossed.
//!
//! Every "does this M2 state survive at this position" query below goes
//! through [`Trace::contains`], which is a lookup into the same cached M3
//! power-states [`crate::recognizer::RecognizerDfa`] discovered while
//! proving the match exists — [`TaggerDfa`] is a table keyed by those
//! states, not a second traversal that re-derives anything.

use crate::marker::PathMarker;
use crate::recognizer::{RecognizerDfa, Trace};
use crate::tagged_nfa::M2Out;

/// `offsets[2*k]`/`offsets[2*k+1]` are the start/end of capture group `k`,
/// or `None` if that group did not participate in the match.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CaptureOffsets {
    pub offsets: Vec<Option<usize>>,
}

/// M4: the forward tagging table, keyed by the M3 power-states `recognizer`
/// discovered and cached.
#[derive(Debug)]
pub struct TaggerDfa<'a> {
    recognizer: &'a RecognizerDfa,
}

impl<'a> TaggerDfa<'a> {
    pub fn new(recognizer: &'a RecognizerDfa) -> TaggerDfa<'a> {
        TaggerDfa { recognizer }
    }

    /// Walks `input` forward against M2, guided by `trace` (which must have
    /// been computed for this exact `input` by `recognizer.run` and must
    /// indicate a match). Returns `None` only if `trace` did not in fact
    /// describe a match, which is a caller bug.
    pub fn run(&self, trace: &Trace, input: &[char], group_count: u32) -> Option<CaptureOffsets> {
        let m2 = self.recognizer.m2();
        let mut offsets = vec![None; 2 * group_count as usize];
        let apply = |offsets: &mut Vec<Option<usize>>, markers: &[PathMarker], pos: usize| {
            for m in markers {
                match m {
                    PathMarker::GroupStart(k) => offsets[2 * *k as usize] = Some(pos),
                    PathMarker::GroupEnd(k) => offsets[2 * *k as usize + 1] = Some(pos),
                    _ => {}
                }
            }
        };

        let n = input.len();
        let (start_id, start_markers) = m2
            .initial
            .iter()
            .find(|(id, _)| trace.contains(self.recognizer, 0, *id))
            .map(|(id, m)| (*id, m.clone()))?;
        apply(&mut offsets, &start_markers, 0);
        let mut current_id = start_id;

        for i in 0..n {
            // Boundary closure: follow zero-width assertions at the current
            // offset until we land on a `Char` (or `Terminal`, which would
            // be premature here since there is still input left).
            loop {
                match m2.out(current_id) {
                    M2Out::Boundary(kind, succs) => {
                        debug_assert!(crate::nfa::boundary_holds(*kind, input, i, self.recognizer.unix_lines()));
                        let next = succs.iter().find(|(id, _)| trace.contains(self.recognizer, i, *id))?;
                        apply(&mut offsets, &next.1, i);
                        current_id = next.0;
                    }
                    _ => break,
                }
            }
            match m2.out(current_id) {
                M2Out::Char(_, succs) => {
                    let next = succs.iter().find(|(id, _)| trace.contains(self.recognizer, i + 1, *id))?;
                    apply(&mut offsets, &next.1, i + 1);
                    current_id = next.0;
                }
                _ => return None,
            }
        }

        loop {
            match m2.out(current_id) {
                M2Out::Boundary(kind, succs) => {
                    debug_assert!(crate::nfa::boundary_holds(*kind, input, n, self.recognizer.unix_lines()));
                    let next = succs.iter().find(|(id, _)| trace.contains(self.recognizer, n, *id))?;
                    apply(&mut offsets, &next.1, n);
                    current_id = next.0;
                }
                M2Out::Terminal => break,
                M2Out::Char(..) => return None,
            }
        }

        Some(CaptureOffsets { offsets })
    }
}
