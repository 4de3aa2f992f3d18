use std::path::Path;
use std::sync::Arc;

use crate::{
    MatcherError, RuleSet,
    compile::CompiledBucket,
    debug_rules::{trace_matcher_built, trace_path_decision},
    path::normalize_path,
};

/// Pattern used by [`PathMatcher::allow_list`] to exclude everything else.
const CATCH_ALL: &str = "**";

/// Compiled, immutable matcher built from a set of ignore rules.
///
/// A `PathMatcher` holds two [`CompiledBucket`]s: one for exclusion rules and
/// one for force-include (`!`) rules. Queries are pure functions of the
/// matcher and the candidate path, so a matcher can be shared between threads
/// and queried concurrently.
///
/// `PathMatcher` is cheaply cloneable (the compiled state is behind an
/// [`Arc`]).
///
/// # Examples
///
/// ```
/// use rules::PathMatcher;
///
/// let matcher = PathMatcher::from_lines(["*.log", "!keep.log", "Temp/"]).unwrap();
///
/// assert!(matcher.ignores("debug.log"));
/// assert!(matcher.includes("keep.log"));
/// assert!(matcher.ignores("/Temp/"));
/// assert!(matcher.includes("Assets/Main.unity"));
/// ```
#[derive(Clone, Debug, Default)]
pub struct PathMatcher {
    inner: Arc<MatcherInner>,
}

#[derive(Debug, Default)]
struct MatcherInner {
    exclude: CompiledBucket,
    include: CompiledBucket,
    rule_count: usize,
}

impl PathMatcher {
    /// Parses and compiles raw rule lines.
    ///
    /// # Errors
    ///
    /// Returns [`MatcherError::Compile`] if a rule expands to an invalid
    /// regular expression.
    pub fn from_lines<I, S>(lines: I) -> Result<Self, MatcherError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::from_rule_set(&RuleSet::parse(lines))
    }

    /// Parses and compiles the text of a rule file.
    ///
    /// # Errors
    ///
    /// Returns [`MatcherError::Compile`] if a rule expands to an invalid
    /// regular expression.
    pub fn from_text(text: &str) -> Result<Self, MatcherError> {
        Self::from_rule_set(&RuleSet::from_text(text))
    }

    /// Reads, parses and compiles a rule file such as `.gitignore`.
    ///
    /// # Errors
    ///
    /// Returns [`MatcherError::NotFound`] when the file does not exist,
    /// [`MatcherError::Read`] for other I/O failures, and
    /// [`MatcherError::Compile`] for invalid rules.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, MatcherError> {
        Self::from_rule_set(&RuleSet::read_file(path)?)
    }

    /// Compiles an already parsed [`RuleSet`].
    ///
    /// # Errors
    ///
    /// Returns [`MatcherError::Compile`] if a rule expands to an invalid
    /// regular expression.
    pub fn from_rule_set(rules: &RuleSet) -> Result<Self, MatcherError> {
        let exclude = CompiledBucket::compile(rules.exclude_patterns())?;
        let include = CompiledBucket::compile(rules.include_patterns())?;
        trace_matcher_built(rules.exclude.len(), rules.include.len());

        Ok(Self {
            inner: Arc::new(MatcherInner {
                exclude,
                include,
                rule_count: rules.len(),
            }),
        })
    }

    /// Builds a matcher that includes only the listed paths.
    ///
    /// Each non-blank entry becomes a force-include rule and a catch-all
    /// exclusion covers everything else. Ancestor directories of a listed
    /// path are reported by [`may_include`](Self::may_include) so a walker
    /// can reach it.
    ///
    /// # Errors
    ///
    /// Returns [`MatcherError::Compile`] if an entry expands to an invalid
    /// regular expression.
    ///
    /// # Examples
    ///
    /// ```
    /// use rules::PathMatcher;
    ///
    /// let matcher = PathMatcher::allow_list(["Assets/Scenes"]).unwrap();
    /// assert!(matcher.includes("Assets/Scenes/"));
    /// assert!(matcher.ignores("Assets/"));
    /// assert!(matcher.may_include("Assets/"));
    /// assert!(!matcher.may_include("Packages/"));
    /// ```
    pub fn allow_list<I, S>(paths: I) -> Result<Self, MatcherError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let lines: Vec<String> = paths
            .into_iter()
            .filter_map(|path| {
                let path = path.as_ref().trim();
                (!path.is_empty()).then(|| format!("!{path}"))
            })
            .chain(std::iter::once(CATCH_ALL.to_owned()))
            .collect();
        Self::from_lines(lines)
    }

    /// Returns `true` if `path` is not excluded, or is force-included.
    #[must_use]
    pub fn includes(&self, path: &str) -> bool {
        let path = normalize_path(path);
        let included =
            self.inner.include.matches_exact(&path) || !self.inner.exclude.matches_exact(&path);
        trace_path_decision(&path, "includes", included);
        included
    }

    /// Returns `true` if `path` is excluded and not force-included.
    #[must_use]
    pub fn ignores(&self, path: &str) -> bool {
        !self.includes(path)
    }

    /// Returns `true` if some path under the prefix `path` could be included.
    ///
    /// Walkers use this to decide whether an ignored directory still has to
    /// be entered.
    #[must_use]
    pub fn may_include(&self, path: &str) -> bool {
        let path = normalize_path(path);
        let possible = self.inner.include.matches_partial(&path)
            || !self.inner.exclude.matches_partial(&path);
        trace_path_decision(&path, "may_include", possible);
        possible
    }

    /// Returns `true` if the matcher was built from no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.rule_count == 0
    }

    /// Number of rules compiled into the matcher.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.inner.rule_count
    }

    /// Compiled exclusion rules.
    #[must_use]
    pub fn exclude_bucket(&self) -> &CompiledBucket {
        &self.inner.exclude
    }

    /// Compiled force-include rules.
    #[must_use]
    pub fn include_bucket(&self) -> &CompiledBucket {
        &self.inner.include
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matcher_includes_everything() {
        let matcher = PathMatcher::default();
        assert!(matcher.is_empty());
        assert!(matcher.includes("anything"));
        assert!(matcher.may_include("anything/"));
    }

    #[test]
    fn rule_count_spans_both_buckets() {
        let matcher = PathMatcher::from_lines(["a", "!b", "# c", "d"]).expect("compiled");
        assert_eq!(matcher.rule_count(), 3);
        assert!(!matcher.exclude_bucket().is_empty());
        assert!(!matcher.include_bucket().is_empty());
    }

    #[test]
    fn clones_share_compiled_state() {
        let matcher = PathMatcher::from_lines(["*.tmp"]).expect("compiled");
        let clone = matcher.clone();
        assert!(Arc::ptr_eq(&matcher.inner, &clone.inner));
        assert!(clone.ignores("scratch.tmp"));
    }

    #[test]
    fn allow_list_skips_blank_entries() {
        let matcher = PathMatcher::allow_list(["", "  ", "Keep"]).expect("compiled");
        assert_eq!(matcher.rule_count(), 2);
        assert!(matcher.includes("Keep"));
        assert!(matcher.ignores("Drop"));
    }

    #[test]
    fn matcher_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PathMatcher>();
    }
}
