// Copyright 2015 Joe Neeman.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The public façade: [`CompiledPattern`] and its four entry points,
//! built atop the M1-M4 pipeline in [`crate::nfa`], [`crate::tagged_nfa`],
//! [`crate::recognizer`] and [`crate::tagger`].

use log::debug;

use crate::error::CompileError;
use crate::flags::Flags;
use crate::nfa::TaggedNfa;
use crate::parser;
use crate::recognizer::RecognizerDfa;
use crate::tagged_nfa::TaggedNfa2;
use crate::tagger::TaggerDfa;

/// A compiled, immutable pattern. Cheap to share across threads: matching
/// discovers and caches M3/M4 states lazily behind interior mutability in
/// [`RecognizerDfa`], but never mutates anything visible from outside.
pub struct CompiledPattern {
    source: String,
    flags: Flags,
    group_count: u32,
    m1: TaggedNfa,
    recognizer: RecognizerDfa,
    /// `.*?`-prefixed variant used only by `find`, plus the internal group
    /// index it uses to recover the real match start.
    search: Option<(TaggedNfa, u32)>,
    unix_lines: bool,
}

/// The outcome of a successful match: the overall span plus every capture
/// group's span. Group 0 is always the overall match; group `k` (`k >= 1`)
/// is the user's `k - 1`-th capture group.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchResult {
    offsets: Vec<Option<usize>>,
}

impl MatchResult {
    /// `(start, end)` of group `k`, or `None` if that group did not
    /// participate in this match.
    pub fn group(&self, k: usize) -> Option<(usize, usize)> {
        let (s, e) = (self.offsets.get(2 * k)?, self.offsets.get(2 * k + 1)?);
        Some(((*s)?, (*e)?))
    }

    pub fn start(&self) -> usize {
        self.group(0).expect("group 0 always participates").0
    }

    pub fn end(&self) -> usize {
        self.group(0).expect("group 0 always participates").1
    }

    pub fn group_count(&self) -> usize {
        self.offsets.len() / 2 - 1
    }
}

impl CompiledPattern {
    pub fn compile(pattern: &str, flags: Flags) -> Result<CompiledPattern, CompileError> {
        debug!("compiling pattern `{}` with flags {:?}", pattern, flags);
        let parsed = parser::parse(pattern, flags)?;
        debug!("parsed `{}` into an AST with {} capture group(s)", pattern, parsed.group_count);

        let m1 = TaggedNfa::from_ast(&parsed.ast, parsed.group_count);
        let m2 = TaggedNfa2::build(&m1);
        debug!("compiled M1 ({} states) / M2 ({} states) for `{}`", m1.transitions().len(), m2.state_count(), pattern);

        let unix_lines = flags.contains(Flags::UNIX_LINES);
        let recognizer = RecognizerDfa::new(m2, unix_lines);

        let search = {
            let (search_nfa, marker_group) = TaggedNfa::from_ast_with_search_prefix(&parsed.ast, parsed.group_count);
            Some((search_nfa, marker_group))
        };

        Ok(CompiledPattern {
            source: pattern.to_owned(),
            flags,
            group_count: parsed.group_count,
            m1,
            recognizer,
            search,
            unix_lines,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn flags(&self) -> Flags {
        self.flags
    }

    /// Number of user capture groups (not counting the synthesized group 0
    /// "whole match" slot).
    pub fn group_count(&self) -> u32 {
        self.group_count
    }

    /// Does the whole of `input` match? No capture groups are extracted:
    /// this runs only M3, never M4.
    pub fn check(&self, input: &str) -> bool {
        let chars: Vec<char> = input.chars().collect();
        let trace = self.recognizer.run(&chars);
        trace.accepts(&self.recognizer)
    }

    /// Does the whole of `input` match? If so, extract every capture.
    pub fn matches(&self, input: &str) -> Option<MatchResult> {
        let chars: Vec<char> = input.chars().collect();
        self.matches_chars(&chars, 0, chars.len())
    }

    /// Matches a prefix of `input`, starting at position 0; `input` may
    /// continue past the end of the match.
    pub fn looking_at(&self, input: &str) -> Option<MatchResult> {
        let chars: Vec<char> = input.chars().collect();
        let (end, _) = self.m1.locate(&chars, 0, None, self.unix_lines)?;
        self.matches_chars(&chars, 0, end)
    }

    /// Finds the leftmost match anywhere in `input`.
    pub fn find(&self, input: &str) -> Option<MatchResult> {
        let chars: Vec<char> = input.chars().collect();
        let (search_nfa, marker_group) = self.search.as_ref().expect("search pipeline always built");
        let (end, start) = search_nfa.locate(&chars, 0, Some(*marker_group), self.unix_lines)?;
        let start = start.unwrap_or(0);
        self.matches_chars(&chars, start, end)
    }

    /// Runs the core M3+M4 pipeline treating `chars[start..end]` as the
    /// whole input to a `matches`-style call, then offsets the resulting
    /// capture boundaries back into `chars`' coordinate space.
    fn matches_chars(&self, chars: &[char], start: usize, end: usize) -> Option<MatchResult> {
        let slice = &chars[start..end];
        let trace = self.recognizer.run(slice);
        if !trace.accepts(&self.recognizer) {
            return None;
        }
        let caps = TaggerDfa::new(&self.recognizer).run(&trace, slice, self.group_count)?;

        let mut offsets = vec![None; 2 * (self.group_count as usize + 1)];
        offsets[0] = Some(start);
        offsets[1] = Some(end);
        for (k, pair) in caps.offsets.chunks(2).enumerate() {
            offsets[2 * (k + 1)] = pair[0].map(|p| p + start);
            offsets[2 * (k + 1) + 1] = pair[1].map(|p| p + start);
        }
        Some(MatchResult { offsets })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_matches() {
        let p = CompiledPattern::compile("abc", Flags::empty()).unwrap();
        assert!(p.matches("abc").is_some());
        assert!(p.matches("abcd").is_none());
        assert!(p.check("abc"));
    }

    #[test]
    fn capture_group_offsets() {
        let p = CompiledPattern::compile("(a)(b)", Flags::empty()).unwrap();
        let m = p.matches("ab").unwrap();
        assert_eq!(m.group(0), Some((0, 2)));
        assert_eq!(m.group(1), Some((0, 1)));
        assert_eq!(m.group(2), Some((1, 2)));
    }

    #[test]
    fn looking_at_stops_early() {
        let p = CompiledPattern::compile("a*?", Flags::empty()).unwrap();
        let m = p.looking_at("aaa").unwrap();
        assert_eq!((m.start(), m.end()), (0, 0));
    }

    #[test]
    fn find_locates_leftmost_match() {
        let p = CompiledPattern::compile("b+", Flags::empty()).unwrap();
        let m = p.find("aaabbbaaa").unwrap();
        assert_eq!((m.start(), m.end()), (3, 6));
    }
}
