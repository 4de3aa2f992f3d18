/// Single ignore rule parsed from one line of a rule source.
///
/// The negation marker (`!`) and the root anchor (`/`) are consumed during
/// parsing and recorded as flags; [`pattern`](Self::pattern) holds the
/// remaining glob text.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IgnoreRule {
    pub(crate) negated: bool,
    pub(crate) anchored: bool,
    pub(crate) pattern: String,
}

impl IgnoreRule {
    /// Creates an exclusion rule for `pattern`.
    #[must_use]
    pub fn exclude(pattern: impl Into<String>) -> Self {
        Self {
            negated: false,
            anchored: false,
            pattern: pattern.into(),
        }
    }

    /// Creates a force-include rule for `pattern`, equivalent to `!pattern`.
    #[must_use]
    pub fn include(pattern: impl Into<String>) -> Self {
        Self {
            negated: true,
            anchored: false,
            pattern: pattern.into(),
        }
    }

    /// Parses one raw rule line.
    ///
    /// Returns `None` for blank lines and `#` comments. Surrounding whitespace
    /// is trimmed before the markers are inspected.
    ///
    /// # Examples
    /// ```
    /// use rules::IgnoreRule;
    ///
    /// let rule = IgnoreRule::parse("!/Assets/Keep.asset").unwrap();
    /// assert!(rule.is_negated());
    /// assert!(rule.is_anchored());
    /// assert_eq!(rule.pattern(), "Assets/Keep.asset");
    ///
    /// assert!(IgnoreRule::parse("# comment").is_none());
    /// assert!(IgnoreRule::parse("   ").is_none());
    /// ```
    #[must_use]
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return None;
        }

        let (negated, rest) = match line.strip_prefix('!') {
            Some(rest) => (true, rest),
            None => (false, line),
        };
        let (anchored, pattern) = match rest.strip_prefix('/') {
            Some(pattern) => (true, pattern),
            None => (false, rest),
        };

        Some(Self {
            negated,
            anchored,
            pattern: pattern.to_owned(),
        })
    }

    /// Returns whether the rule force-includes matching paths.
    #[must_use]
    pub const fn is_negated(&self) -> bool {
        self.negated
    }

    /// Returns whether the source line carried a leading `/`.
    ///
    /// The flag is informational: anchored and unanchored rules compile to
    /// the same matcher.
    #[must_use]
    pub const fn is_anchored(&self) -> bool {
        self.anchored
    }

    /// Returns the glob text with markers stripped.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}
