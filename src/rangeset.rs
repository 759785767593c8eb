// Copyright 2015 Joe Neeman.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Sorted, non-overlapping, non-adjacent integer ranges over code points,
//! and the set algebra (union, intersection, difference, complement, and
//! alphabet partitioning) built on top of them.
//!
//! Every public operation here is implemented with one sweep-line
//! algorithm (`aggregate`), parameterized by a predicate over "how many of
//! the input sets are open at this point". This is the mandatory
//! construction: union, intersection, symmetric difference, difference and
//! complement are all one-line predicates over `aggregate`.

use std::cmp::Ordering;
use std::collections::BTreeMap;

/// The largest valid Unicode scalar value plus surrogates: this crate's
/// code points range over `0..=0x10FFFF`, including the surrogate block,
/// since `CharClass` sets are built before any UTF-8/surrogate filtering.
pub const CODE_POINT_MAX: u32 = 0x10FFFF;

/// An inclusive, non-empty range of code points.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IntRange {
    pub lo: u32,
    pub hi: u32,
}

impl IntRange {
    pub fn new(lo: u32, hi: u32) -> IntRange {
        assert!(lo <= hi, "empty range: {}..{}", lo, hi);
        IntRange { lo, hi }
    }

    pub fn single(cp: u32) -> IntRange {
        IntRange { lo: cp, hi: cp }
    }

    pub fn contains(&self, cp: u32) -> bool {
        self.lo <= cp && cp <= self.hi
    }
}

/// A set of code points, stored as a sorted list of disjoint, non-adjacent
/// `IntRange`s. This is the normal form every constructor here produces;
/// `IntRangeSet::invariant_holds` checks it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IntRangeSet {
    ranges: Vec<IntRange>,
}

impl IntRangeSet {
    pub fn empty() -> IntRangeSet {
        IntRangeSet { ranges: Vec::new() }
    }

    pub fn full() -> IntRangeSet {
        IntRangeSet {
            ranges: vec![IntRange::new(0, CODE_POINT_MAX)],
        }
    }

    pub fn single(cp: u32) -> IntRangeSet {
        IntRangeSet {
            ranges: vec![IntRange::single(cp)],
        }
    }

    /// Builds a set from arbitrary (possibly overlapping, unsorted) ranges
    /// by normalizing them through `aggregate`.
    pub fn of(ranges: impl IntoIterator<Item = IntRange>) -> IntRangeSet {
        let set = IntRangeSet {
            ranges: ranges.into_iter().collect(),
        };
        aggregate(&[&set], |open| open > 0)
    }

    pub fn ranges(&self) -> &[IntRange] {
        &self.ranges
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    pub fn contains(&self, cp: u32) -> bool {
        self.ranges
            .binary_search_by(|r| {
                if cp < r.lo {
                    Ordering::Greater
                } else if cp > r.hi {
                    Ordering::Less
                } else {
                    Ordering::Equal
                }
            })
            .is_ok()
    }

    pub fn union(&self, other: &IntRangeSet) -> IntRangeSet {
        aggregate(&[self, other], |open| open > 0)
    }

    pub fn intersection(&self, other: &IntRangeSet) -> IntRangeSet {
        aggregate(&[self, other], |open| open == 2)
    }

    pub fn difference(&self, other: &IntRangeSet) -> IntRangeSet {
        aggregate2(self, other, |a, b| a && !b)
    }

    pub fn symmetric_difference(&self, other: &IntRangeSet) -> IntRangeSet {
        aggregate2(self, other, |a, b| a != b)
    }

    /// Complement relative to the full code-point universe (`0..=CODE_POINT_MAX`).
    pub fn complement(&self) -> IntRangeSet {
        aggregate(&[self], |open| open == 0)
    }

    /// Every invariant `IntRangeSet` is supposed to maintain: sorted,
    /// non-overlapping, non-adjacent, no empty ranges. Used by tests.
    pub fn invariant_holds(&self) -> bool {
        self.ranges.windows(2).all(|w| w[0].hi + 1 < w[1].lo) && self.ranges.iter().all(|r| r.lo <= r.hi)
    }
}

/// Builds the set of every code point for which `predicate` holds, via one
/// linear sweep over `0..=CODE_POINT_MAX` recording contiguous runs. This is
/// the one place a Unicode property table (`unicode/`) pays the cost of
/// visiting every code point; callers memoize the result behind
/// `lazy_static` rather than calling this per pattern compile.
pub fn matching(predicate: impl Fn(char) -> bool) -> IntRangeSet {
    let mut ranges = Vec::new();
    let mut run_start: Option<u32> = None;
    for cp in 0..=CODE_POINT_MAX {
        let Some(c) = char::from_u32(cp) else {
            if let Some(start) = run_start.take() {
                ranges.push(IntRange::new(start, cp - 1));
            }
            continue;
        };
        let hit = predicate(c);
        match (run_start, hit) {
            (None, true) => run_start = Some(cp),
            (Some(start), false) => {
                ranges.push(IntRange::new(start, cp - 1));
                run_start = None;
            }
            _ => {}
        }
    }
    if let Some(start) = run_start {
        ranges.push(IntRange::new(start, CODE_POINT_MAX));
    }
    IntRangeSet { ranges }
}

/// Event-driven sweep over N input sets. `predicate(open_count)` decides,
/// at every point of the swept line, whether that point belongs to the
/// output set. All of union/intersection/symmetric-difference/complement
/// reduce to a choice of `predicate`.
///
/// Implemented over half-open `[lo, hi+1)` coordinates: a range contributes
/// `+1` at `lo` and `-1` at `hi+1`. This sidesteps the raw
/// inclusive-endpoint tie-breaking the lower/upper-tagged formulation
/// needs (ties at a shared coordinate just sum), while computing exactly
/// the same output.
fn aggregate(sets: &[&IntRangeSet], predicate: impl Fn(usize) -> bool) -> IntRangeSet {
    let mut deltas: BTreeMap<i64, i32> = BTreeMap::new();
    for set in sets {
        for r in &set.ranges {
            *deltas.entry(r.lo as i64).or_insert(0) += 1;
            *deltas.entry(r.hi as i64 + 1).or_insert(0) -= 1;
        }
    }

    let mut out = Vec::new();
    let mut open = 0usize;
    let mut run_start: Option<i64> = None;
    for (&point, &delta) in &deltas {
        let was_in = predicate(open);
        open = (open as i32 + delta) as usize;
        let now_in = predicate(open);
        match (was_in, now_in) {
            (false, true) => run_start = Some(point),
            (true, false) => {
                if let Some(start) = run_start.take() {
                    out.push(IntRange::new(start as u32, (point - 1) as u32));
                }
            }
            _ => {}
        }
    }
    debug_assert!(run_start.is_none(), "aggregate: unterminated run (predicate true past CODE_POINT_MAX?)");
    IntRangeSet { ranges: out }
}

/// Two-input convenience over `aggregate` for binary predicates, since
/// `difference`/`symmetric_difference` need to know which *specific* input
/// is open, not merely the open count.
fn aggregate2(a: &IntRangeSet, b: &IntRangeSet, predicate: impl Fn(bool, bool) -> bool) -> IntRangeSet {
    let mut deltas: BTreeMap<i64, (i32, i32)> = BTreeMap::new();
    for r in &a.ranges {
        deltas.entry(r.lo as i64).or_insert((0, 0)).0 += 1;
        deltas.entry(r.hi as i64 + 1).or_insert((0, 0)).0 -= 1;
    }
    for r in &b.ranges {
        deltas.entry(r.lo as i64).or_insert((0, 0)).1 += 1;
        deltas.entry(r.hi as i64 + 1).or_insert((0, 0)).1 -= 1;
    }

    let mut out = Vec::new();
    let (mut a_open, mut b_open) = (0i32, 0i32);
    let mut run_start: Option<i64> = None;
    for (&point, &(da, db)) in &deltas {
        let was_in = predicate(a_open > 0, b_open > 0);
        a_open += da;
        b_open += db;
        let now_in = predicate(a_open > 0, b_open > 0);
        match (was_in, now_in) {
            (false, true) => run_start = Some(point),
            (true, false) => {
                if let Some(start) = run_start.take() {
                    out.push(IntRange::new(start as u32, (point - 1) as u32));
                }
            }
            _ => {}
        }
    }
    IntRangeSet { ranges: out }
}

/// Splits a family of (possibly overlapping) labeled sets into the coarsest
/// partition of the universe such that every cell is a subset of exactly
/// the same label-set for every label. Used to turn several overlapping
/// `\p{...}` classes into a disjoint alphabet for DFA construction.
///
/// `losslessness`: the union of every returned cell equals the union of
/// every input set, and every input set is exactly the union of the cells
/// whose label-set contains it.
pub fn disjoint_partition<K: Clone + Ord>(
    labeled: &[(K, IntRangeSet)],
) -> BTreeMap<Vec<K>, IntRangeSet> {
    let mut deltas: BTreeMap<i64, Vec<(usize, i32)>> = BTreeMap::new();
    for (idx, (_, set)) in labeled.iter().enumerate() {
        for r in &set.ranges {
            deltas.entry(r.lo as i64).or_default().push((idx, 1));
            deltas.entry(r.hi as i64 + 1).or_default().push((idx, -1));
        }
    }

    let mut open = vec![false; labeled.len()];
    let mut open_count = vec![0i32; labeled.len()];
    let mut run_start: Option<i64> = None;
    let mut run_keys: Vec<usize> = Vec::new();
    let mut out: BTreeMap<Vec<K>, IntRangeSet> = BTreeMap::new();

    let mut flush = |out: &mut BTreeMap<Vec<K>, IntRangeSet>, keys: &[usize], lo: i64, hi: i64| {
        if keys.is_empty() {
            return;
        }
        let label: Vec<K> = keys.iter().map(|&i| labeled[i].0.clone()).collect();
        let entry = out.entry(label).or_insert_with(IntRangeSet::empty);
        entry.ranges.push(IntRange::new(lo as u32, hi as u32));
    };

    for (&point, changes) in &deltas {
        if let Some(start) = run_start {
            if point > start {
                flush(&mut out, &run_keys, start, point - 1);
            }
        }
        for &(idx, delta) in changes {
            open_count[idx] += delta;
            open[idx] = open_count[idx] > 0;
        }
        run_keys = (0..labeled.len()).filter(|&i| open[i]).collect();
        run_start = Some(point);
    }

    // merge through `of` in case two consecutive flushes produced adjacent
    // ranges for the same label-set.
    out.into_iter()
        .map(|(k, v)| (k, IntRangeSet::of(v.ranges)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(rs: &[(u32, u32)]) -> IntRangeSet {
        IntRangeSet::of(rs.iter().map(|&(a, b)| IntRange::new(a, b)))
    }

    #[test]
    fn union_merges_adjacent() {
        let a = set(&[(0, 5)]);
        let b = set(&[(6, 10)]);
        assert_eq!(a.union(&b), set(&[(0, 10)]));
    }

    #[test]
    fn intersection_basic() {
        let a = set(&[(0, 10)]);
        let b = set(&[(5, 15)]);
        assert_eq!(a.intersection(&b), set(&[(5, 10)]));
    }

    #[test]
    fn difference_basic() {
        let a = set(&[(0, 10)]);
        let b = set(&[(5, 7)]);
        assert_eq!(a.difference(&b), set(&[(0, 4), (8, 10)]));
    }

    #[test]
    fn complement_involution() {
        let a = set(&[(5, 10), (20, 30)]);
        assert_eq!(a.complement().complement(), a);
    }

    #[test]
    fn singleton_range_survives_adjacent_open() {
        let a = set(&[(5, 5)]);
        let b = set(&[(6, 10)]);
        let u = a.union(&b);
        assert!(u.contains(5));
        assert!(u.contains(6));
        assert_eq!(u, set(&[(5, 10)]));
    }

    #[test]
    fn disjoint_partition_is_lossless() {
        let a = set(&[(0, 10)]);
        let b = set(&[(5, 15)]);
        let parts = disjoint_partition(&[("a", a.clone()), ("b", b.clone())]);
        let mut recovered_a = IntRangeSet::empty();
        let mut recovered_b = IntRangeSet::empty();
        for (labels, cell) in &parts {
            if labels.contains(&"a") {
                recovered_a = recovered_a.union(cell);
            }
            if labels.contains(&"b") {
                recovered_b = recovered_b.union(cell);
            }
        }
        assert_eq!(recovered_a, a);
        assert_eq!(recovered_b, b);
    }
}
