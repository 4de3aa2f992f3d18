use std::io;
use std::path::PathBuf;

/// Error produced while building a [`PathMatcher`](crate::PathMatcher).
#[derive(Debug, thiserror::Error)]
pub enum MatcherError {
    /// A rule expanded to a regular expression that failed to compile.
    #[error("failed to compile ignore pattern '{pattern}': {source}")]
    Compile {
        /// Rule text (markers stripped) that produced the invalid expression.
        pattern: String,
        /// Underlying regex error.
        #[source]
        source: regex::Error,
    },
    /// The rule file does not exist.
    #[error("rule file not found: {}", path.display())]
    NotFound {
        /// Path that was requested.
        path: PathBuf,
    },
    /// The rule file exists but could not be read.
    #[error("failed to read rule file {}: {source}", path.display())]
    Read {
        /// Path that was requested.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}

impl MatcherError {
    pub(crate) fn compile(pattern: impl Into<String>, source: regex::Error) -> Self {
        Self::Compile {
            pattern: pattern.into(),
            source,
        }
    }

    pub(crate) fn from_io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        if source.kind() == io::ErrorKind::NotFound {
            Self::NotFound { path }
        } else {
            Self::Read { path, source }
        }
    }

    /// Returns the offending pattern for compilation failures.
    #[must_use]
    pub fn pattern(&self) -> Option<&str> {
        match self {
            Self::Compile { pattern, .. } => Some(pattern),
            Self::NotFound { .. } | Self::Read { .. } => None,
        }
    }

    /// Returns `true` when the rule file was missing.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::MatcherError;
    use std::error::Error as _;
    use std::io;

    #[test]
    fn compile_error_preserves_pattern_and_source() {
        let regex_err = regex::Regex::new("(").unwrap_err();
        let error = MatcherError::compile("(", regex_err.clone());

        assert_eq!(error.pattern(), Some("("));
        assert!(error.to_string().contains("failed to compile"));
        assert_eq!(error.source().unwrap().to_string(), regex_err.to_string());
    }

    #[test]
    fn missing_file_maps_to_not_found() {
        let error = MatcherError::from_io(
            "missing/.gitignore",
            io::Error::new(io::ErrorKind::NotFound, "gone"),
        );
        assert!(error.is_not_found());
        assert!(error.pattern().is_none());
        assert!(error.to_string().contains("missing/.gitignore"));
        assert!(error.source().is_none());
    }

    #[test]
    fn other_io_errors_keep_source() {
        let error = MatcherError::from_io(
            "locked",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(!error.is_not_found());
        assert!(error.source().is_some());
    }
}
