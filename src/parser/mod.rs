// Copyright 2015 Joe Neeman.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Pattern parsing.
//!
//! Grammar and Unicode-table resolution are delegated entirely to
//! `regex-syntax`: this module never tokenizes a pattern itself. It only
//! (a) pre-scans for syntax this core deliberately does not support, so
//! those cases get our own `UnsupportedFeature` error instead of
//! `regex-syntax`'s generic parse failure, and (b) walks the resulting
//! `Hir` into our much smaller [`crate::ast::RegexAst`].

mod case_fold;
mod from_hir;

use regex_syntax::ParserBuilder;

use crate::ast::RegexAst;
use crate::error::{CompileError, UnsupportedFeature};
use crate::flags::Flags;

/// The result of parsing: the AST plus how many capture groups it uses
/// (one more than the largest group index the AST actually references).
pub struct Parsed {
    pub ast: RegexAst,
    pub group_count: u32,
}

pub fn parse(pattern: &str, flags: Flags) -> Result<Parsed, CompileError> {
    if flags.contains(Flags::LITERAL) {
        return Ok(Parsed {
            ast: from_hir::literal_ast(pattern),
            group_count: 0,
        });
    }

    reject_unsupported_syntax(pattern)?;

    let hir = ParserBuilder::new()
        // Case folding is this core's own business (see `case_fold`), kept
        // independent of `UNICODE_CHARACTER_CLASS`'s `\d`/`\w`/`\s` scope.
        .case_insensitive(false)
        .unicode(flags.contains(Flags::UNICODE_CHARACTER_CLASS))
        .multi_line(flags.multiline())
        .dot_matches_new_line(flags.dot_all())
        .crlf(!flags.contains(Flags::UNIX_LINES) && flags.multiline())
        .ignore_whitespace(flags.contains(Flags::COMMENTS))
        .build()
        .parse(pattern)
        .map_err(|e| CompileError::from_regex_syntax(pattern, e))?;

    let mut translator = from_hir::Translator::new();
    let mut ast = translator.translate(&hir, pattern)?;
    if flags.case_insensitive() {
        ast = case_fold::fold_case(ast, flags.contains(Flags::UNICODE_CASE));
    }
    Ok(Parsed {
        ast,
        group_count: translator.group_count(),
    })
}

/// Scans the raw pattern text for syntax `regex-syntax` itself would
/// happily parse but that this core's M1 construction cannot express:
/// possessive quantifiers (`*+`, `++`, `?+`, `{m,n}+`) and lookaround
/// (`(?=`, `(?!`, `(?<=`, `(?<!`). Backreferences (`\1`, `\k<name>`)
/// are already rejected by `regex-syntax` itself (it has no backreference
/// support), so they surface as ordinary syntax errors.
fn reject_unsupported_syntax(pattern: &str) -> Result<(), CompileError> {
    let bytes = pattern.as_bytes();
    let mut i = 0;
    let mut in_class = false;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => {
                i += 2;
                continue;
            }
            b'[' if !in_class => in_class = true,
            b']' if in_class => in_class = false,
            b'(' if !in_class && pattern[i..].starts_with("(?") => {
                let rest = &pattern[i + 2..];
                if rest.starts_with('=') || rest.starts_with('!') {
                    return Err(CompileError::unsupported(pattern, i, UnsupportedFeature::Lookaround));
                }
                if rest.starts_with("<=") || rest.starts_with("<!") {
                    return Err(CompileError::unsupported(pattern, i, UnsupportedFeature::Lookaround));
                }
            }
            b'*' | b'+' | b'?' | b'}' if !in_class => {
                if bytes.get(i + 1) == Some(&b'+') {
                    return Err(CompileError::unsupported(
                        pattern,
                        i,
                        UnsupportedFeature::PossessiveQuantifier,
                    ));
                }
            }
            _ => {}
        }
        i += 1;
    }
    Ok(())
}
