// Copyright 2015 Joe Neeman.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Pattern-compilation flags.

use bitflags::bitflags;

bitflags! {
    /// Compile-time switches, passed alongside the pattern text.
    ///
    /// These map onto `regex_syntax::Parser` / `regex_syntax::hir::translate`
    /// settings one-for-one; see [`crate::parser`] for the translation.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Flags: u32 {
        /// `(?i)`: match letters without regard to case.
        const CASE_INSENSITIVE        = 1 << 0;
        /// Case folding (with `CASE_INSENSITIVE`) consults full Unicode
        /// case-folding tables rather than ASCII only.
        const UNICODE_CASE            = 1 << 1;
        /// `\d \w \s` and friends use Unicode categories, not ASCII ranges.
        const UNICODE_CHARACTER_CLASS = 1 << 2;
        /// `(?m)`: `^` and `$` match at line boundaries, not just at the
        /// start and end of the whole input.
        const MULTILINE               = 1 << 3;
        /// `(?s)`: `.` also matches line terminators.
        const DOTALL                  = 1 << 4;
        /// Restricts the line-terminator set consulted by `StartLine` and
        /// `EndLine` boundaries to `\n` only. Unset, all of `\n`, `\r`,
        /// U+2028 and U+2029 count as line terminators.
        const UNIX_LINES              = 1 << 5;
        /// `(?x)`: whitespace and `#`-comments in the pattern are ignored.
        const COMMENTS                = 1 << 6;
        /// Treat the whole pattern as a literal string; every other flag and
        /// all meta-characters are ignored.
        const LITERAL                 = 1 << 7;
    }
}

impl Flags {
    pub fn case_insensitive(self) -> bool {
        self.contains(Flags::CASE_INSENSITIVE)
    }

    pub fn multiline(self) -> bool {
        self.contains(Flags::MULTILINE)
    }

    pub fn dot_all(self) -> bool {
        self.contains(Flags::DOTALL)
    }
}
