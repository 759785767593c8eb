// Copyright 2015 Joe Neeman.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Case-insensitive matching, applied after `regex-syntax` has already
//! produced an `Hir` and [`super::from_hir`] has walked it into a
//! [`RegexAst`].
//!
//! `regex-syntax`'s own `.case_insensitive(...)` toggle is tied to the same
//! `.unicode(...)` flag that drives `\d`/`\w`/`\s` desugaring, so this core
//! never sets it: `CASE_INSENSITIVE` (`Flags::CASE_INSENSITIVE`) is instead
//! implemented here, as a post-parse widening of every `CharClass` node by
//! its case-equivalence orbit, scoped by `Flags::UNICODE_CASE` independent
//! of `Flags::UNICODE_CHARACTER_CLASS`.

use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::ast::RegexAst;
use crate::rangeset::{matching, IntRange, IntRangeSet};

lazy_static! {
    /// `cp -> every code point that shares cp's simple uppercase mapping`,
    /// for every code point with at least one case sibling. Built once via
    /// a full code-point scan; multi-code-point expansions (e.g. German
    /// sharp s) are skipped, since a single input code point can only ever
    /// match a single code point in this core's char classes.
    static ref CASE_ORBITS: HashMap<u32, Vec<u32>> = build_case_orbits();

    /// The small set of code points `fold_case_set` ever needs to inspect
    /// one-by-one, so folding a class never pays for a scan of a large or
    /// unbounded input range.
    static ref UNICODE_CASE_DOMAIN: IntRangeSet =
        IntRangeSet::of(CASE_ORBITS.keys().map(|&cp| IntRange::single(cp)));
    static ref ASCII_CASE_DOMAIN: IntRangeSet = matching(|c| c.is_ascii_alphabetic());
}

fn build_case_orbits() -> HashMap<u32, Vec<u32>> {
    let mut by_canonical: HashMap<u32, Vec<u32>> = HashMap::new();
    for cp in 0..=crate::rangeset::CODE_POINT_MAX {
        let Some(c) = char::from_u32(cp) else { continue };
        let mut upper = c.to_uppercase();
        let (Some(canon), None) = (upper.next(), upper.next()) else {
            continue;
        };
        by_canonical.entry(canon as u32).or_default().push(cp);
    }

    let mut orbits = HashMap::new();
    for members in by_canonical.into_values() {
        if members.len() < 2 {
            continue;
        }
        for &cp in &members {
            orbits.insert(cp, members.clone());
        }
    }
    orbits
}

fn ascii_case_siblings(cp: u32) -> Option<[u32; 2]> {
    let c = char::from_u32(cp)?;
    if !c.is_ascii_alphabetic() {
        return None;
    }
    let other = if c.is_ascii_uppercase() {
        c.to_ascii_lowercase()
    } else {
        c.to_ascii_uppercase()
    };
    Some([cp, other as u32])
}

/// Widens `set` to include every case-equivalent code point of every member
/// it already contains. Only ever walks `set`'s intersection with the
/// (small, precomputed) set of code points that have a case sibling at
/// all, never `set` itself, which may span a huge or unbounded range.
fn fold_case_set(set: &IntRangeSet, unicode: bool) -> IntRangeSet {
    let domain: &IntRangeSet = if unicode { &UNICODE_CASE_DOMAIN } else { &ASCII_CASE_DOMAIN };
    let relevant = set.intersection(domain);
    if relevant.is_empty() {
        return set.clone();
    }

    let mut extra = Vec::new();
    for r in relevant.ranges() {
        for cp in r.lo..=r.hi {
            if unicode {
                if let Some(siblings) = CASE_ORBITS.get(&cp) {
                    extra.extend(siblings.iter().map(|&s| IntRange::single(s)));
                }
            } else if let Some(siblings) = ascii_case_siblings(cp) {
                extra.extend(siblings.iter().map(|&s| IntRange::single(s)));
            }
        }
    }
    set.union(&IntRangeSet::of(extra))
}

/// Walks `ast`, widening every `CharClass` by case equivalence. `unicode`
/// selects full Unicode case folding (`Flags::UNICODE_CASE`) over the
/// ASCII-only `[a-zA-Z]` pairing.
pub(super) fn fold_case(ast: RegexAst, unicode: bool) -> RegexAst {
    match ast {
        RegexAst::Epsilon => RegexAst::Epsilon,
        RegexAst::CharClass(set) => RegexAst::CharClass(fold_case_set(&set, unicode)),
        RegexAst::Boundary(kind) => RegexAst::Boundary(kind),
        RegexAst::Concat(a, b) => RegexAst::Concat(Box::new(fold_case(*a, unicode)), Box::new(fold_case(*b, unicode))),
        RegexAst::Alternation(a, b) => {
            RegexAst::Alternation(Box::new(fold_case(*a, unicode)), Box::new(fold_case(*b, unicode)))
        }
        RegexAst::Optional(body, lazy) => RegexAst::Optional(Box::new(fold_case(*body, unicode)), lazy),
        RegexAst::Star(body, lazy) => RegexAst::Star(Box::new(fold_case(*body, unicode)), lazy),
        RegexAst::Plus(body, lazy) => RegexAst::Plus(Box::new(fold_case(*body, unicode)), lazy),
        RegexAst::Repetition { body, at_least, at_most, lazy } => RegexAst::Repetition {
            body: Box::new(fold_case(*body, unicode)),
            at_least,
            at_most,
            lazy,
        },
        RegexAst::Group { body, index } => RegexAst::Group {
            body: Box::new(fold_case(*body, unicode)),
            index,
        },
    }
}
