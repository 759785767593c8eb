// Copyright 2015 Joe Neeman.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Property tests for the range-set algebra in `rangeset`. Every law here
//! is checked against `contains` on a bounded sample of code points rather
//! than by comparing `IntRangeSet` values directly, so a law failing
//! points at the actual semantic break rather than a representational one.

use quickcheck::{Arbitrary, Gen};
use quickcheck_macros::quickcheck;
use regex_tdfa::rangeset::{IntRange, IntRangeSet};

const UNIVERSE: u32 = 256;

#[derive(Clone, Debug)]
struct SmallSet(Vec<(u32, u32)>);

impl Arbitrary for SmallSet {
    fn arbitrary(g: &mut Gen) -> SmallSet {
        let len = usize::arbitrary(g) % 6;
        let mut pairs = Vec::with_capacity(len);
        for _ in 0..len {
            let a = u32::arbitrary(g) % UNIVERSE;
            let b = u32::arbitrary(g) % UNIVERSE;
            pairs.push((a.min(b), a.max(b)));
        }
        SmallSet(pairs)
    }
}

impl SmallSet {
    fn build(&self) -> IntRangeSet {
        IntRangeSet::of(self.0.iter().map(|&(a, b)| IntRange::new(a, b)))
    }
}

fn all_cps() -> impl Iterator<Item = u32> {
    0..UNIVERSE
}

#[quickcheck]
fn built_sets_hold_their_invariant(a: SmallSet) -> bool {
    a.build().invariant_holds()
}

#[quickcheck]
fn union_matches_pointwise_or(a: SmallSet, b: SmallSet) -> bool {
    let (sa, sb) = (a.build(), b.build());
    let u = sa.union(&sb);
    all_cps().all(|cp| u.contains(cp) == (sa.contains(cp) || sb.contains(cp)))
}

#[quickcheck]
fn intersection_matches_pointwise_and(a: SmallSet, b: SmallSet) -> bool {
    let (sa, sb) = (a.build(), b.build());
    let i = sa.intersection(&sb);
    all_cps().all(|cp| i.contains(cp) == (sa.contains(cp) && sb.contains(cp)))
}

#[quickcheck]
fn difference_matches_pointwise_and_not(a: SmallSet, b: SmallSet) -> bool {
    let (sa, sb) = (a.build(), b.build());
    let d = sa.difference(&sb);
    all_cps().all(|cp| d.contains(cp) == (sa.contains(cp) && !sb.contains(cp)))
}

#[quickcheck]
fn symmetric_difference_matches_pointwise_xor(a: SmallSet, b: SmallSet) -> bool {
    let (sa, sb) = (a.build(), b.build());
    let x = sa.symmetric_difference(&sb);
    all_cps().all(|cp| x.contains(cp) == (sa.contains(cp) != sb.contains(cp)))
}

#[quickcheck]
fn complement_is_pointwise_negation(a: SmallSet) -> bool {
    let sa = a.build();
    let c = sa.complement();
    (0..=regex_tdfa::rangeset::CODE_POINT_MAX)
        .step_by(997)
        .all(|cp| c.contains(cp) != sa.contains(cp))
}

#[quickcheck]
fn complement_is_involutive(a: SmallSet) -> bool {
    let sa = a.build();
    sa.complement().complement() == sa
}

#[quickcheck]
fn union_is_commutative(a: SmallSet, b: SmallSet) -> bool {
    let (sa, sb) = (a.build(), b.build());
    sa.union(&sb) == sb.union(&sa)
}

#[quickcheck]
fn intersection_distributes_over_union(a: SmallSet, b: SmallSet, c: SmallSet) -> bool {
    let (sa, sb, sc) = (a.build(), b.build(), c.build());
    let lhs = sa.intersection(&sb.union(&sc));
    let rhs = sa.intersection(&sb).union(&sa.intersection(&sc));
    all_cps().all(|cp| lhs.contains(cp) == rhs.contains(cp))
}

#[quickcheck]
fn disjoint_partition_covers_every_input_point(a: SmallSet, b: SmallSet) -> bool {
    let (sa, sb) = (a.build(), b.build());
    let parts = regex_tdfa::rangeset::disjoint_partition(&[("a", sa.clone()), ("b", sb.clone())]);
    all_cps().all(|cp| {
        let expected_a = sa.contains(cp);
        let expected_b = sb.contains(cp);
        let mut found_a = false;
        let mut found_b = false;
        for (labels, cell) in &parts {
            if cell.contains(cp) {
                found_a = labels.contains(&"a");
                found_b = labels.contains(&"b");
            }
        }
        found_a == expected_a && found_b == expected_b
    })
}

#[quickcheck]
fn partition_cells_are_pairwise_disjoint(a: SmallSet, b: SmallSet) -> bool {
    let (sa, sb) = (a.build(), b.build());
    let parts = regex_tdfa::rangeset::disjoint_partition(&[("a", sa), ("b", sb)]);
    let cells: Vec<&IntRangeSet> = parts.values().collect();
    for i in 0..cells.len() {
        for j in (i + 1)..cells.len() {
            if !cells[i].intersection(cells[j]).is_empty() {
                return false;
            }
        }
    }
    true
}
