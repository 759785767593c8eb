// Copyright 2015 Joe Neeman.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Translates a `regex_syntax::hir::Hir` into a [`RegexAst`].

use regex_syntax::hir::{self, Hir, HirKind, Look};

use crate::ast::{BoundaryKind, RegexAst};
use crate::error::{CompileError, UnsupportedFeature};
use crate::rangeset::{IntRange, IntRangeSet};

pub(super) struct Translator {
    next_group: u32,
}

impl Translator {
    pub(super) fn new() -> Translator {
        Translator { next_group: 0 }
    }

    pub(super) fn group_count(&self) -> u32 {
        self.next_group
    }

    pub(super) fn translate(&mut self, hir: &Hir, pattern: &str) -> Result<RegexAst, CompileError> {
        self.walk(hir, pattern)
    }

    fn walk(&mut self, hir: &Hir, pattern: &str) -> Result<RegexAst, CompileError> {
        match hir.kind() {
            HirKind::Empty => Ok(RegexAst::Epsilon),
            HirKind::Literal(lit) => {
                let mut out = RegexAst::Epsilon;
                for c in String::from_utf8_lossy(&lit.0).chars() {
                    out = RegexAst::concat(out, RegexAst::CharClass(IntRangeSet::single(c as u32)));
                }
                Ok(out)
            }
            HirKind::Class(class) => Ok(RegexAst::CharClass(class_to_set(class))),
            HirKind::Look(look) => look_to_ast(*look, pattern),
            HirKind::Repetition(rep) => self.walk_repetition(rep, pattern),
            HirKind::Capture(cap) => {
                let idx = self.next_group;
                self.next_group += 1;
                let body = self.walk(&cap.sub, pattern)?;
                Ok(RegexAst::Group {
                    body: Box::new(body),
                    index: Some(idx),
                })
            }
            HirKind::Concat(parts) => {
                let mut out = RegexAst::Epsilon;
                for p in parts {
                    out = RegexAst::concat(out, self.walk(p, pattern)?);
                }
                Ok(out)
            }
            HirKind::Alternation(parts) => {
                let mut iter = parts.iter();
                let first = iter
                    .next()
                    .map(|p| self.walk(p, pattern))
                    .transpose()?
                    .unwrap_or(RegexAst::Epsilon);
                let mut out = first;
                for p in iter {
                    let next = self.walk(p, pattern)?;
                    out = RegexAst::Alternation(Box::new(out), Box::new(next));
                }
                Ok(out)
            }
        }
    }

    fn walk_repetition(&mut self, rep: &hir::Repetition, pattern: &str) -> Result<RegexAst, CompileError> {
        let body = Box::new(self.walk(&rep.sub, pattern)?);
        let lazy = !rep.greedy;
        Ok(match (rep.min, rep.max) {
            (0, Some(1)) => RegexAst::Optional(body, lazy),
            (0, None) => RegexAst::Star(body, lazy),
            (1, None) => RegexAst::Plus(body, lazy),
            (min, max) => RegexAst::Repetition {
                body,
                at_least: min,
                at_most: max,
                lazy,
            },
        })
    }
}

pub(super) fn literal_ast(pattern: &str) -> RegexAst {
    let mut out = RegexAst::Epsilon;
    for c in pattern.chars() {
        out = RegexAst::concat(out, RegexAst::CharClass(IntRangeSet::single(c as u32)));
    }
    out
}

fn look_to_ast(look: Look, pattern: &str) -> Result<RegexAst, CompileError> {
    let kind = match look {
        Look::Start => BoundaryKind::StartText,
        Look::End => BoundaryKind::EndText,
        Look::StartLF | Look::StartCRLF => BoundaryKind::StartLine,
        Look::EndLF | Look::EndCRLF => BoundaryKind::EndLine,
        Look::WordAscii | Look::WordUnicode => BoundaryKind::WordBoundary,
        Look::WordAsciiNegate | Look::WordUnicodeNegate => BoundaryKind::NotWordBoundary,
        _ => return Err(CompileError::unsupported(pattern, 0, UnsupportedFeature::ExoticBoundary)),
    };
    Ok(RegexAst::Boundary(kind))
}

fn class_to_set(class: &hir::Class) -> IntRangeSet {
    match class {
        hir::Class::Unicode(u) => IntRangeSet::of(
            u.iter()
                .map(|r| IntRange::new(r.start() as u32, r.end() as u32)),
        ),
        hir::Class::Bytes(b) => IntRangeSet::of(b.iter().map(|r| IntRange::new(r.start() as u32, r.end() as u32))),
    }
}
