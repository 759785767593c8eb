// Copyright 2015 Joe Neeman.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Block-name (`InGreek`) and script-name (`IsGreek` by script) resolution,
//! layered on the `unicode-blocks` and `unicode-script` crates.

use std::collections::HashMap;

use lazy_static::lazy_static;
use unicode_script::Script;

use super::scan;
use crate::rangeset::IntRangeSet;

lazy_static! {
    static ref BLOCKS: HashMap<&'static str, IntRangeSet> = {
        let mut m = HashMap::new();
        for block in unicode_blocks::UNICODE_BLOCKS {
            let set = IntRangeSet::of([crate::rangeset::IntRange::new(
                *block.range().start(),
                *block.range().end(),
            )]);
            m.insert(block.name(), set);
        }
        m
    };
    static ref SCRIPTS: HashMap<&'static str, IntRangeSet> = {
        let names: &[(&str, Script)] = &[
            ("Latin", Script::Latin),
            ("Greek", Script::Greek),
            ("Cyrillic", Script::Cyrillic),
            ("Han", Script::Han),
            ("Hiragana", Script::Hiragana),
            ("Katakana", Script::Katakana),
            ("Hangul", Script::Hangul),
            ("Arabic", Script::Arabic),
            ("Hebrew", Script::Hebrew),
            ("Devanagari", Script::Devanagari),
            ("Thai", Script::Thai),
            ("Armenian", Script::Armenian),
            ("Georgian", Script::Georgian),
            ("Common", Script::Common),
        ];
        let mut m = HashMap::new();
        for &(name, script) in names {
            m.insert(name, scan(|c| unicode_script::UnicodeScript::script(&c) == script));
        }
        m
    };
}

/// Resolves `InXxx` (block) or `IsXxx`/bare script names against the
/// tables above. Block names take priority on a collision, matching how
/// `java.util.regex.Pattern` itself disambiguates `\p{block}` vs
/// `\p{script}` via the `In`/`Is` prefix, which the parser strips before
/// calling here.
pub(super) fn lookup_block_or_script(name: &str) -> Option<IntRangeSet> {
    if let Some(rest) = name.strip_prefix("In") {
        return BLOCKS.get(rest).cloned();
    }
    if let Some(rest) = name.strip_prefix("Is") {
        return SCRIPTS.get(rest).cloned().or_else(|| BLOCKS.get(rest).cloned());
    }
    SCRIPTS.get(name).cloned().or_else(|| BLOCKS.get(name).cloned())
}
