// Copyright 2015 Joe Neeman.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A regex engine built around a tagged-DFA capture-extraction pipeline
//! instead of a backtracking VM.
//!
//! A pattern compiles to four layers:
//!
//! - **M1** ([`nfa`]): a Thompson-style NFA whose epsilon edges are tagged
//!   with path markers recording priority choices (`Plus`/`Minus`) and
//!   capture-group boundaries (`GroupStart`/`GroupEnd`).
//! - **M2** ([`tagged_nfa`]): M1 with every run of epsilon edges between
//!   two "preserved" states (ones with a real, consuming transition)
//!   collapsed into a single edge carrying the priority-preferred marker
//!   path between them.
//! - **M3** ([`recognizer`]): a subset-construction recognizer over the
//!   reverse of M2, run backward across the input, deciding whether the
//!   whole input matches.
//! - **M4** ([`tagger`]): a forward walk over M2, guided by M3's trace,
//!   that recovers the actual capture-group offsets.
//!
//! None of this is exposed directly; [`pattern::CompiledPattern`] is the
//! entry point.
//!
//! ```
//! use regex_tdfa::{CompiledPattern, Flags};
//!
//! let p = CompiledPattern::compile(r"(\d{3})-(\d{4})", Flags::empty()).unwrap();
//! let m = p.matches("555-1234").unwrap();
//! assert_eq!(m.group(1), Some((0, 3)));
//! assert_eq!(m.group(2), Some((4, 8)));
//! ```

pub mod ast;
pub mod error;
pub mod flags;
pub mod marker;
pub mod nfa;
mod parser;
pub mod pattern;
pub mod rangeset;
pub mod recognizer;
pub mod tagged_nfa;
pub mod tagger;
pub mod unicode;

pub use crate::error::{CompileError, UnsupportedFeature};
pub use crate::flags::Flags;
pub use crate::pattern::{CompiledPattern, MatchResult};
