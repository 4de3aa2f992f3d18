#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `cli` implements the command-line front-end of `twinmatch`. It loads
//! gitignore-style rules from files and inline arguments, compiles them with
//! the [`rules`] crate, and prints one decision per candidate path.
//!
//! # Design
//!
//! [`run`] is the entry point. It accepts an iterator of arguments together
//! with handles for standard output and error, so tests drive it with
//! in-memory buffers. [`run_with_input`] additionally takes the reader used
//! when no path operands are given. A [`clap`](https://docs.rs/clap/) command
//! definition parses the options; help and version output are rendered from
//! static text.
//!
//! Two modes are supported:
//!
//! - Filter mode prints `include`, `ignore` or `descend` for each path, where
//!   `descend` marks an ignored directory that may still contain included
//!   entries.
//! - Placement mode, selected by `--real-copy`, prints `real-copy`,
//!   `descend`, `symlink` or `skip` using [`rules::PlacementRules`].
//!
//! # Invariants
//!
//! - `run` never panics; failures surface as non-zero exit codes.
//! - Output lines have the form `<decision>\t<path>` and appear in operand
//!   order.
//! - Rule files are loaded before inline `--rule` arguments.
//!
//! # Errors
//!
//! Diagnostics are written to standard error as `twinmatch error: <message>`.
//! Usage errors and invalid rules exit with `1`, missing or unreadable rule
//! files with `3`, and I/O failures on paths or the report with `11`.
//!
//! # Examples
//!
//! ```
//! use cli::run;
//!
//! let mut stdout = Vec::new();
//! let mut stderr = Vec::new();
//! let exit_code = run(
//!     ["twinmatch", "-r", "*.log", "-r", "!keep.log", "debug.log", "keep.log"],
//!     &mut stdout,
//!     &mut stderr,
//! );
//!
//! assert_eq!(exit_code, 0);
//! assert_eq!(stdout, b"ignore\tdebug.log\ninclude\tkeep.log\n");
//! assert!(stderr.is_empty());
//! ```
//!
//! # See also
//!
//! - [`rules::PathMatcher`] for the underlying queries.
//! - `src/bin/twinmatch.rs` for the binary that wires [`run`] into `main`.

mod classify;
mod error;
pub mod logging;

use std::ffi::OsString;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Arg, ArgAction, Command, builder::OsStringValueParser};
use rules::debug_rules::RuleTracer;
use rules::{PathMatcher, PlacementRules, RuleSet, is_directory_marker, relative_rule_path};
use tracing::{info, warn};

use crate::classify::Classifier;
pub use crate::error::CliError;

/// Maximum exit code representable by a Unix process.
const MAX_EXIT_CODE: i32 = u8::MAX as i32;

/// Program name used in diagnostics and the version banner.
const PROGRAM_NAME: &str = "twinmatch";

/// Deterministic help text describing the CLI surface.
const HELP_TEXT: &str = concat!(
    "twinmatch ",
    env!("CARGO_PKG_VERSION"),
    "\n",
    "\n",
    "Usage: twinmatch [-h] [-V] [-v]... [-f FILE]... [-r RULE]... [--real-copy PATH]... [--root DIR] [PATH...]\n",
    "\n",
    "Classifies each PATH against gitignore-style rules. Paths are read from\n",
    "standard input, one per line, when no PATH operand is given. A path\n",
    "ending in '/' names a directory.\n",
    "\n",
    "  -h, --help              Show this help message and exit.\n",
    "  -V, --version           Output version information and exit.\n",
    "  -v, --verbose           Increase log verbosity (repeatable).\n",
    "  -f, --rules-file=FILE   Read rules from FILE (for example .gitignore).\n",
    "  -r, --rule=RULE         Add RULE after the rules read from files.\n",
    "      --real-copy=PATH    Select PATH for a real copy; enables placement output.\n",
    "      --root=DIR          Resolve PATH operands relative to DIR.\n",
    "\n",
    "Filter output is 'include', 'ignore' or 'descend'. Placement output is\n",
    "'real-copy', 'descend', 'symlink' or 'skip'. Each decision is followed by\n",
    "a tab and the path. Set TWINMATCH_LOG to override the log filter.\n",
);

/// Parsed command produced by [`parse_args`].
#[derive(Debug, Default)]
struct ParsedArgs {
    show_help: bool,
    show_version: bool,
    verbosity: u8,
    rules_files: Vec<PathBuf>,
    rules: Vec<String>,
    real_copy: Vec<String>,
    root: Option<PathBuf>,
    paths: Vec<String>,
}

/// Builds the `clap` command used for parsing.
fn clap_command() -> Command {
    Command::new(PROGRAM_NAME)
        .disable_help_flag(true)
        .disable_version_flag(true)
        .arg_required_else_help(false)
        .arg(
            Arg::new("help")
                .long("help")
                .short('h')
                .help("Show this help message and exit.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("version")
                .long("version")
                .short('V')
                .help("Output version information and exit.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Increase log verbosity (repeatable).")
                .action(ArgAction::Count),
        )
        .arg(
            Arg::new("rules-file")
                .long("rules-file")
                .short('f')
                .value_name("FILE")
                .help("Read rules from FILE.")
                .value_parser(OsStringValueParser::new())
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("rule")
                .long("rule")
                .short('r')
                .value_name("RULE")
                .help("Add RULE after the rules read from files.")
                .allow_hyphen_values(true)
                .value_parser(OsStringValueParser::new())
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("real-copy")
                .long("real-copy")
                .value_name("PATH")
                .help("Select PATH for a real copy.")
                .value_parser(OsStringValueParser::new())
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("root")
                .long("root")
                .value_name("DIR")
                .help("Resolve PATH operands relative to DIR.")
                .num_args(1)
                .action(ArgAction::Set)
                .value_parser(OsStringValueParser::new()),
        )
        .arg(
            Arg::new("paths")
                .action(ArgAction::Append)
                .value_parser(OsStringValueParser::new()),
        )
}

/// Parses command-line arguments into a [`ParsedArgs`] structure.
fn parse_args<I, S>(arguments: I) -> Result<ParsedArgs, clap::Error>
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
{
    let mut args: Vec<OsString> = arguments.into_iter().map(Into::into).collect();

    if args.is_empty() {
        args.push(OsString::from(PROGRAM_NAME));
    }

    let mut matches = clap_command().try_get_matches_from(args)?;

    let show_help = matches.get_flag("help");
    let show_version = matches.get_flag("version");
    let verbosity = matches.get_count("verbose");
    let rules_files = matches
        .remove_many::<OsString>("rules-file")
        .map(|values| values.map(PathBuf::from).collect())
        .unwrap_or_default();
    let rules = take_strings(&mut matches, "rule");
    let real_copy = take_strings(&mut matches, "real-copy");
    let root = matches.remove_one::<OsString>("root").map(PathBuf::from);
    let paths = take_strings(&mut matches, "paths");

    Ok(ParsedArgs {
        show_help,
        show_version,
        verbosity,
        rules_files,
        rules,
        real_copy,
        root,
        paths,
    })
}

fn take_strings(matches: &mut clap::ArgMatches, id: &str) -> Vec<String> {
    matches
        .remove_many::<OsString>(id)
        .map(|values| values.map(os_string_to_text).collect())
        .unwrap_or_default()
}

fn os_string_to_text(value: OsString) -> String {
    match value.into_string() {
        Ok(text) => text,
        Err(value) => value.to_string_lossy().into_owned(),
    }
}

/// Renders the help text describing the supported options.
fn render_help() -> String {
    HELP_TEXT.to_string()
}

/// Renders the version banner.
fn render_version() -> String {
    format!("{PROGRAM_NAME} {}\n", env!("CARGO_PKG_VERSION"))
}

/// Runs the CLI using the provided argument iterator and output handles.
///
/// Candidate paths are read from the process's standard input when no path
/// operand is given. The function returns the process exit code that should
/// be used by the caller; `0` on success.
pub fn run<I, S, Out, Err>(arguments: I, stdout: &mut Out, stderr: &mut Err) -> i32
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
    Out: Write,
    Err: Write,
{
    let stdin = io::stdin();
    let mut input = stdin.lock();
    run_with_input(arguments, &mut input, stdout, stderr)
}

/// Runs the CLI, reading candidate paths from `input` when no path operand is
/// given.
pub fn run_with_input<I, S, In, Out, Err>(
    arguments: I,
    input: &mut In,
    stdout: &mut Out,
    stderr: &mut Err,
) -> i32
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
    In: BufRead,
    Out: Write,
    Err: Write,
{
    let result = parse_args(arguments)
        .map_err(CliError::from)
        .and_then(|parsed| execute(parsed, input, stdout));

    match result {
        Ok(()) => 0,
        Err(error) => {
            let _ = writeln!(stderr, "{PROGRAM_NAME} error: {error}");
            error.exit_code()
        }
    }
}

fn execute<In, Out>(parsed: ParsedArgs, input: &mut In, stdout: &mut Out) -> Result<(), CliError>
where
    In: BufRead,
    Out: Write,
{
    let ParsedArgs {
        show_help,
        show_version,
        verbosity,
        rules_files,
        rules,
        real_copy,
        root,
        paths,
    } = parsed;

    if show_help {
        stdout.write_all(render_help().as_bytes())?;
        return Ok(());
    }

    if show_version {
        stdout.write_all(render_version().as_bytes())?;
        return Ok(());
    }

    logging::init_tracing(verbosity);

    let rule_set = load_rules(&rules_files, &rules)?;
    let mut tracer = RuleTracer::new();
    tracer.record_rules(rule_set.len());

    let matcher = PathMatcher::from_rule_set(&rule_set)?;
    let classifier = if real_copy.is_empty() {
        Classifier::Filter(matcher)
    } else {
        info!(selected = real_copy.len(), "placement mode");
        Classifier::Placement(PlacementRules::new(
            PathMatcher::allow_list(&real_copy)?,
            matcher,
        ))
    };

    let candidates = if paths.is_empty() {
        read_candidates(input)?
    } else {
        paths
    };

    for candidate in &candidates {
        let Some((query, is_dir)) = resolve_candidate(candidate, root.as_deref()) else {
            warn!(path = %candidate, "path is outside the root directory; skipped");
            continue;
        };
        let verdict = classifier.classify_recorded(&query, is_dir, &mut tracer);
        writeln!(stdout, "{verdict}\t{candidate}")?;
    }
    stdout.flush()?;

    tracer.summary();
    Ok(())
}

/// Merges rule files, in order, followed by inline rules.
fn load_rules(files: &[PathBuf], inline: &[String]) -> Result<RuleSet, CliError> {
    let mut rule_set = RuleSet::default();
    for file in files {
        rule_set.extend([RuleSet::read_file(file)?]);
    }
    rule_set.extend([RuleSet::parse(inline)]);
    Ok(rule_set)
}

/// Reads newline-separated candidate paths, dropping blank lines.
fn read_candidates<In: BufRead>(input: &mut In) -> io::Result<Vec<String>> {
    let mut candidates = Vec::new();
    for line in input.lines() {
        let line = line?;
        let line = line.trim_end_matches('\r');
        if !line.trim().is_empty() {
            candidates.push(line.to_owned());
        }
    }
    Ok(candidates)
}

/// Returns the query form of `candidate` and whether it names a directory.
///
/// Without a root the candidate is used as given and only a trailing
/// separator marks a directory. With a root the candidate is resolved
/// against it, the filesystem decides whether it is a directory, and `None`
/// is returned when it falls outside the root.
fn resolve_candidate(candidate: &str, root: Option<&Path>) -> Option<(String, bool)> {
    let marked = is_directory_marker(candidate);
    let Some(root) = root else {
        return Some((candidate.to_owned(), marked));
    };

    let entry = root.join(candidate);
    let is_dir = marked || fs::metadata(&entry).is_ok_and(|metadata| metadata.is_dir());
    relative_rule_path(root, &entry, is_dir).map(|query| (query, is_dir))
}

/// Converts a numeric exit code into an [`ExitCode`].
#[must_use]
pub fn exit_code_from(status: i32) -> ExitCode {
    let clamped = status.clamp(0, MAX_EXIT_CODE);
    ExitCode::from(u8::try_from(clamped).unwrap_or(u8::MAX))
}

#[cfg(test)]
mod tests;
