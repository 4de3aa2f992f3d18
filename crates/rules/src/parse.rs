use std::fs;
use std::path::Path;

use crate::{IgnoreRule, MatcherError, debug_rules::trace_rule_file_loaded};

/// Ignore rules split into exclusion and force-include buckets.
///
/// Each bucket is sorted by pattern text. Sorting is stable, so duplicate
/// patterns keep their discovery order.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RuleSet {
    pub(crate) exclude: Vec<IgnoreRule>,
    pub(crate) include: Vec<IgnoreRule>,
}

impl RuleSet {
    /// Parses raw rule lines into a [`RuleSet`].
    ///
    /// Blank lines and `#` comments are dropped. Lines starting with `!` land
    /// in the include bucket, everything else in the exclude bucket.
    ///
    /// # Examples
    /// ```
    /// use rules::RuleSet;
    ///
    /// let set = RuleSet::parse(["*.tmp", "# scratch", "!keep.tmp", "Build/"]);
    /// assert_eq!(set.exclude_patterns().collect::<Vec<_>>(), ["*.tmp", "Build/"]);
    /// assert_eq!(set.include_patterns().collect::<Vec<_>>(), ["keep.tmp"]);
    /// ```
    pub fn parse<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        lines
            .into_iter()
            .filter_map(|line| IgnoreRule::parse(line.as_ref()))
            .collect()
    }

    /// Parses the contents of a rule file.
    pub fn from_text(text: &str) -> Self {
        Self::parse(text.lines())
    }

    /// Reads and parses a rule file such as `.gitignore`.
    ///
    /// # Errors
    ///
    /// Returns [`MatcherError::NotFound`] when the file does not exist and
    /// [`MatcherError::Read`] for other I/O failures.
    pub fn read_file(path: impl AsRef<Path>) -> Result<Self, MatcherError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|error| MatcherError::from_io(path, error))?;
        let rules = Self::from_text(&text);
        trace_rule_file_loaded(&path.display().to_string(), rules.len());
        Ok(rules)
    }

    /// Returns `true` when neither bucket holds a rule.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.exclude.is_empty() && self.include.is_empty()
    }

    /// Total number of rules across both buckets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.exclude.len() + self.include.len()
    }

    /// Exclusion rules in compilation order.
    #[must_use]
    pub fn exclude_rules(&self) -> &[IgnoreRule] {
        &self.exclude
    }

    /// Force-include rules in compilation order.
    #[must_use]
    pub fn include_rules(&self) -> &[IgnoreRule] {
        &self.include
    }

    /// Pattern text of the exclusion rules in compilation order.
    pub fn exclude_patterns(&self) -> impl Iterator<Item = &str> {
        self.exclude.iter().map(IgnoreRule::pattern)
    }

    /// Pattern text of the force-include rules in compilation order.
    pub fn include_patterns(&self) -> impl Iterator<Item = &str> {
        self.include.iter().map(IgnoreRule::pattern)
    }
}

impl FromIterator<IgnoreRule> for RuleSet {
    fn from_iter<T: IntoIterator<Item = IgnoreRule>>(iter: T) -> Self {
        let mut set = Self::default();
        Extend::<IgnoreRule>::extend(&mut set, iter);
        set
    }
}

/// Appends rules after the existing ones, then restores pattern order.
impl Extend<IgnoreRule> for RuleSet {
    fn extend<T: IntoIterator<Item = IgnoreRule>>(&mut self, iter: T) {
        for rule in iter {
            if rule.negated {
                self.include.push(rule);
            } else {
                self.exclude.push(rule);
            }
        }
        self.exclude.sort_by(|a, b| a.pattern.cmp(&b.pattern));
        self.include.sort_by(|a, b| a.pattern.cmp(&b.pattern));
    }
}

impl Extend<RuleSet> for RuleSet {
    fn extend<T: IntoIterator<Item = RuleSet>>(&mut self, iter: T) {
        for set in iter {
            Extend::<IgnoreRule>::extend(self, set.exclude.into_iter().chain(set.include));
        }
    }
}
