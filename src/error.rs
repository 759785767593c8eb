// Copyright 2015 Joe Neeman.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Failure modes of [`crate::compile`].
//!
//! Matching itself never fails (§7 of the design notes): a match attempt
//! returns `None` or a populated [`crate::pattern::MatchResult`]. Only
//! compilation can fail, and it fails in exactly two ways.

use std::fmt;

/// Why a pattern that is syntactically well-formed was still rejected.
///
/// These are the constructs §1 calls out as explicitly out of scope:
/// possessive quantifiers, lookaround, and backreferences, plus an
/// unsupported corner of character-class literal escapes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnsupportedFeature {
    Lookaround,
    PossessiveQuantifier,
    Backreference,
    /// `\Q\E` with nothing between the delimiters, inside a character class.
    EmptyLiteralClass,
    /// A zero-width assertion form (e.g. `\b{start}`) this core does not
    /// model as one of the six supported `BoundaryKind`s.
    ExoticBoundary,
}

impl fmt::Display for UnsupportedFeature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            UnsupportedFeature::Lookaround => "lookaround",
            UnsupportedFeature::PossessiveQuantifier => "possessive quantifier",
            UnsupportedFeature::Backreference => "backreference",
            UnsupportedFeature::EmptyLiteralClass => "empty \\Q\\E in character class",
            UnsupportedFeature::ExoticBoundary => "unsupported zero-width assertion",
        };
        f.write_str(s)
    }
}

/// A pattern failed to compile.
#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    /// The pattern is malformed. Carries the message, the full pattern text,
    /// and the byte offset at which the parser gave up.
    #[error("syntax error at position {offset} in `{pattern}`: {message}")]
    Syntax {
        message: String,
        pattern: String,
        offset: usize,
        #[source]
        source: Option<regex_syntax::Error>,
    },
    /// The pattern is syntactically valid but uses a construct this core
    /// deliberately does not implement.
    #[error("unsupported pattern syntax ({feature}) at position {offset} in `{pattern}`")]
    Unsupported {
        feature: UnsupportedFeature,
        pattern: String,
        offset: usize,
    },
}

impl CompileError {
    pub(crate) fn syntax(pattern: &str, offset: usize, message: impl Into<String>) -> Self {
        CompileError::Syntax {
            message: message.into(),
            pattern: pattern.to_owned(),
            offset,
            source: None,
        }
    }

    pub(crate) fn from_regex_syntax(pattern: &str, err: regex_syntax::Error) -> Self {
        // `regex-syntax` always knows the span it choked on; surface it as-is
        // rather than re-deriving an offset ourselves.
        let offset = match &err {
            regex_syntax::Error::Parse(e) => e.span().start.offset,
            regex_syntax::Error::Translate(e) => e.span().start.offset,
            _ => 0,
        };
        CompileError::Syntax {
            message: err.to_string(),
            pattern: pattern.to_owned(),
            offset,
            source: Some(err),
        }
    }

    pub(crate) fn unsupported(
        pattern: &str,
        offset: usize,
        feature: UnsupportedFeature,
    ) -> Self {
        CompileError::Unsupported {
            feature,
            pattern: pattern.to_owned(),
            offset,
        }
    }
}
