use std::io;

use rules::MatcherError;

/// Failure of a `twinmatch` invocation.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Command-line arguments were rejected.
    #[error("{}", usage_summary(.0))]
    Usage(#[from] clap::Error),
    /// A rule source could not be loaded or compiled.
    #[error(transparent)]
    Rules(#[from] MatcherError),
    /// Reading candidate paths or writing the report failed.
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
}

impl CliError {
    /// Exit status reported for this error, following rsync's numbering:
    /// `1` for syntax or usage errors, `3` for unreadable rule files and
    /// `11` for I/O failures on paths or the report.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Usage(_) | Self::Rules(MatcherError::Compile { .. }) => 1,
            Self::Rules(MatcherError::NotFound { .. } | MatcherError::Read { .. }) => 3,
            Self::Io(_) => 11,
        }
    }
}

/// First line of a clap diagnostic without its `error: ` prefix.
fn usage_summary(error: &clap::Error) -> String {
    let rendered = error.to_string();
    let line = rendered.lines().next().unwrap_or_default();
    line.strip_prefix("error: ").unwrap_or(line).to_owned()
}
