// Copyright 2015 Joe Neeman.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Host-predicate Unicode classes: the `java*`-style named predicates
//! (`IsAlphabetic`, `IsWhiteSpace`, block names, script names) that are
//! outside what `regex-syntax`'s own `\p{...}` resolution covers.
//!
//! `regex-syntax` already resolves general categories, scripts, blocks
//! and POSIX classes reachable through `\p{...}`/`\P{...}` syntax as part
//! of `Hir::Class` (see [`crate::parser::from_hir::class_to_set`]); this
//! module exists only for the handful of boolean host predicates that
//! patterns can name directly, built once and memoized with
//! [`lazy_static`] since walking all of `0..=0x10FFFF` is not something a
//! compiled pattern should redo per call.

pub mod names;

use lazy_static::lazy_static;
use unicode_properties::{GeneralCategory, UnicodeGeneralCategory};

pub(crate) use crate::rangeset::matching as scan;
use crate::rangeset::IntRangeSet;

lazy_static! {
    static ref ALPHABETIC: IntRangeSet = scan(|c| c.is_alphabetic());
    static ref WHITE_SPACE: IntRangeSet = scan(|c| c.is_whitespace());
    static ref UPPERCASE: IntRangeSet = scan(|c| c.is_uppercase());
    static ref LOWERCASE: IntRangeSet = scan(|c| c.is_lowercase());
    static ref TITLECASE: IntRangeSet = scan(|c| c.general_category() == GeneralCategory::TitlecaseLetter);
    static ref LETTER: IntRangeSet = scan(|c| matches!(
        c.general_category(),
        GeneralCategory::UppercaseLetter
            | GeneralCategory::LowercaseLetter
            | GeneralCategory::TitlecaseLetter
            | GeneralCategory::ModifierLetter
            | GeneralCategory::OtherLetter
    ));
    static ref DIGIT: IntRangeSet = scan(|c| c.is_ascii_digit() || c.general_category() == GeneralCategory::DecimalNumber);
    static ref LETTER_OR_DIGIT: IntRangeSet = LETTER.union(&DIGIT);
    static ref ISO_CONTROL: IntRangeSet = scan(|c| c.is_control());
    static ref SPACE_CHAR: IntRangeSet = scan(|c| matches!(
        c.general_category(),
        GeneralCategory::SpaceSeparator | GeneralCategory::LineSeparator | GeneralCategory::ParagraphSeparator
    ));
    static ref IDEOGRAPHIC: IntRangeSet = scan(|c| unicode_script::UnicodeScript::script(&c) == unicode_script::Script::Han);
    static ref IDENTIFIER_START: IntRangeSet = scan(|c| c.is_alphabetic() || c == '_' || c == '$');
    static ref IDENTIFIER_PART: IntRangeSet = scan(|c| c.is_alphanumeric() || c == '_' || c == '$' || c.general_category() == GeneralCategory::NonspacingMark);
    static ref IDENTIFIER_IGNORABLE: IntRangeSet = scan(|c| c.is_control() && !c.is_whitespace());
}

/// Resolves a `java*`-family host predicate name (without the `Is`/`java`
/// prefix the pattern syntax itself strips) to its code-point set.
/// Returns `None` for a name this core does not recognize.
pub fn lookup_predicate(name: &str) -> Option<IntRangeSet> {
    let set = match name {
        "Alphabetic" => &*ALPHABETIC,
        "WhiteSpace" | "Whitespace" => &*WHITE_SPACE,
        "UpperCase" => &*UPPERCASE,
        "LowerCase" => &*LOWERCASE,
        "TitleCase" => &*TITLECASE,
        "Letter" => &*LETTER,
        "Digit" => &*DIGIT,
        "LetterOrDigit" => &*LETTER_OR_DIGIT,
        "ISOControl" => &*ISO_CONTROL,
        "SpaceChar" => &*SPACE_CHAR,
        "Ideographic" => &*IDEOGRAPHIC,
        "JavaIdentifierStart" | "UnicodeIdentifierStart" => &*IDENTIFIER_START,
        "JavaIdentifierPart" | "UnicodeIdentifierPart" => &*IDENTIFIER_PART,
        "IdentifierIgnorable" => &*IDENTIFIER_IGNORABLE,
        _ => return names::lookup_block_or_script(name),
    };
    Some(set.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alphabetic_contains_ascii_letters() {
        assert!(lookup_predicate("Alphabetic").unwrap().contains('a' as u32));
        assert!(!lookup_predicate("Alphabetic").unwrap().contains('5' as u32));
    }

    #[test]
    fn unknown_predicate_is_none() {
        assert!(lookup_predicate("NotARealPredicate").is_none());
    }
}
