#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `rules` classifies project-relative paths against `.gitignore`-style rule
//! sets. It decides whether a path is included, ignored, or worth descending
//! into because a descendant could still be included. The crate performs no
//! I/O beyond optionally reading a rule file; walking directories and acting
//! on the decisions is left to the caller.
//!
//! The supported grammar is a deliberate subset of git's: `#` comments and
//! blank lines are skipped, `!` marks a force-include rule, a leading `/` is
//! accepted and stripped, and the glob tokens `**`, `*` and `?` are
//! recognised. There is no `.gitignore` discovery and no inheritance across
//! nested directories.
//!
//! # Design
//!
//! The pipeline is parse, bucket, compile, query:
//!
//! - [`IgnoreRule::parse`] turns one line into a rule.
//! - [`RuleSet`] splits rules into exclusion and force-include buckets, each
//!   sorted by pattern text.
//! - [`compile_pattern`] turns one glob into an exact and a partial regex
//!   fragment, and [`CompiledBucket`] joins a bucket's fragments into two
//!   anchored alternations.
//! - [`PathMatcher`] owns both buckets and answers
//!   [`includes`](PathMatcher::includes), [`ignores`](PathMatcher::ignores)
//!   and [`may_include`](PathMatcher::may_include).
//! - [`PlacementRules`] combines two matchers into the copy/link/skip
//!   decision used when cloning a project into a twin.
//!
//! # Invariants
//!
//! - A path is included when a force-include rule covers it or no exclusion
//!   rule does. An empty rule set includes every path.
//! - The exact matcher must cover the whole path (a trailing `/` directory
//!   marker is tolerated). The partial matcher accepts any separator-aligned
//!   prefix of a path the exact matcher accepts.
//! - Anchored (`/x`) and unanchored (`x`) rules behave identically.
//! - Query paths use `/` or `\` as separators; one leading `/` is ignored.
//! - Compilation is deterministic: the same rule lines always produce the
//!   same regular expressions.
//!
//! # Errors
//!
//! [`PathMatcher`] constructors report [`MatcherError`] when a rule expands to
//! an invalid regular expression (the error names the rule) or when a rule
//! file cannot be read.
//!
//! # Examples
//!
//! ```
//! use rules::PathMatcher;
//!
//! let matcher = PathMatcher::from_lines([
//!     "# Unity",
//!     "/Library/",
//!     "build/**",
//!     "*.log",
//!     "!keep.log",
//! ])
//! .expect("rules compile");
//!
//! assert!(matcher.ignores("Library/"));
//! assert!(matcher.ignores("build/x/y.txt"));
//! assert!(matcher.ignores("debug.log"));
//! assert!(matcher.includes("keep.log"));
//! assert!(matcher.includes("Assets/Main.unity"));
//! assert!(matcher.may_include("Assets/"));
//! ```

mod compile;
pub mod debug_rules;
mod error;
mod matcher;
mod parse;
mod path;
mod placement;
mod rule;

pub use compile::{CompiledBucket, PatternFragments, compile_pattern};
pub use error::MatcherError;
pub use matcher::PathMatcher;
pub use parse::RuleSet;
pub use path::{is_directory_marker, normalize_path, relative_rule_path, with_directory_marker};
pub use placement::{Placement, PlacementRules};
pub use rule::IgnoreRule;
