// Copyright 2015 Joe Neeman.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! End-to-end scenarios, plus differential checks against the `regex`
//! crate (used here only as a behavioral oracle, not as the implementation).

use regex_tdfa::{CompiledPattern, Flags};

fn compile(pattern: &str) -> CompiledPattern {
    let _ = env_logger::builder().is_test(true).try_init();
    CompiledPattern::compile(pattern, Flags::empty()).expect("pattern should compile")
}

#[test]
fn alternation_and_group_priority() {
    let p = compile("((a)*|b)(ab|b)");

    let m = p.matches("aaab").unwrap();
    assert_eq!((m.start(), m.end()), (0, 4));
    assert_eq!(m.group(1), Some((0, 3)));

    let m = p.matches("bab").unwrap();
    assert_eq!((m.start(), m.end()), (0, 3));

    assert!(p.matches("abab").is_none());
}

#[test]
fn catastrophic_backtracking_pattern_is_fast_and_correct() {
    let p = compile("(x+x+)+y");
    assert!(p.matches("xxxy").is_some());
    assert_eq!(p.matches("xxxy").unwrap().group(1), Some((0, 3)));

    let hostile: String = "x".repeat(45);
    // Must return promptly; a naive backtracker would not.
    assert!(p.matches(&hostile).is_none());
}

#[test]
fn dot_excludes_newline_by_default() {
    let p = compile("a.c");
    assert!(p.matches("abc").is_some());
    assert!(p.matches("a\nc").is_none());
}

#[test]
fn dotall_flag_includes_newline() {
    let p = CompiledPattern::compile("a.c", Flags::DOTALL).unwrap();
    assert!(p.matches("a\nc").is_some());
}

#[test]
fn star_on_empty_input() {
    let p = compile("a*");
    assert!(p.matches("").is_some());
    assert_eq!(p.matches("").unwrap(), p.matches("").unwrap());
}

#[test]
fn lazy_star_looking_at_stops_immediately() {
    let p = compile("a*?");
    let m = p.looking_at("aaa").unwrap();
    assert_eq!((m.start(), m.end()), (0, 0));
}

#[test]
fn phone_number_capture_groups() {
    let p = compile(r"(?:\+?(\d{1,3}))?[-. (]*(\d{3})[-. )]*(\d{3})[-. ]*(\d{4})");
    let m = p.find("call +1 (555) 123-4567 now").unwrap();
    assert_eq!(m.group(1), Some((6, 7)));
    assert_eq!(m.group(2), Some((10, 13)));
    assert_eq!(m.group(3), Some((15, 18)));
    assert_eq!(m.group(4), Some((19, 23)));
}

#[test]
fn find_within_longer_text() {
    let p = compile(r"\d+");
    let m = p.find("abc123def456").unwrap();
    assert_eq!((m.start(), m.end()), (3, 6));
}

#[test]
fn word_boundary_anchors() {
    let p = compile(r"\bcat\b");
    assert!(p.find("a cat sat").is_some());
    assert!(p.find("concatenate").is_none());
}

#[test]
fn unsupported_lookahead_is_rejected() {
    let err = CompiledPattern::compile("a(?=b)", Flags::empty()).unwrap_err();
    assert!(matches!(err, regex_tdfa::CompileError::Unsupported { .. }));
}

#[test]
fn unsupported_possessive_quantifier_is_rejected() {
    let err = CompiledPattern::compile("a*+", Flags::empty()).unwrap_err();
    assert!(matches!(err, regex_tdfa::CompileError::Unsupported { .. }));
}

#[test]
fn case_insensitive_flag() {
    let p = CompiledPattern::compile("abc", Flags::CASE_INSENSITIVE).unwrap();
    assert!(p.matches("ABC").is_some());
}

mod oracle {
    use super::*;

    /// Cross-checks a handful of patterns against the `regex` crate, which
    /// implements the same greedy/lazy Perl-family semantics this core
    /// targets (modulo lookaround/backreferences, which are out of scope
    /// here and not exercised below).
    fn check_same(pattern: &str, inputs: &[&str]) {
        let ours = compile(pattern);
        let theirs = regex::Regex::new(pattern).unwrap();
        for input in inputs {
            let ours_found = ours.find(input);
            let theirs_found = theirs.find(input);
            match (ours_found, theirs_found) {
                (Some(a), Some(b)) => assert_eq!((a.start(), a.end()), (b.start(), b.end()), "pattern {:?} input {:?}", pattern, input),
                (None, None) => {}
                other => panic!("pattern {:?} input {:?}: {:?}", pattern, input, other),
            }
        }
    }

    #[test]
    fn oracle_agreement_basic_patterns() {
        check_same(r"a+b*", &["aaabbb", "b", "aaa", ""]);
        check_same(r"[a-z]+\d+", &["hello123world", "no digits here", "x9"]);
        check_same(r"(foo|bar)+", &["foofoobar", "baz", "bar"]);
    }
}
