use regex::Regex;

use crate::MatcherError;
use crate::debug_rules::trace_bucket_compiled;

/// Regex for `**`: any run of characters, separators included.
const DOUBLE_STAR: &str = "(.+)";
/// Regex for `*`: a non-empty run within one path segment.
const SINGLE_STAR: &str = "([^/]+)";
/// Regex for `?`: exactly one non-separator character.
const QUESTION: &str = "([^/])";
/// End of a partial segment: word boundary, separator, or end of input.
const SEGMENT_END: &str = r"(?:\b|/|$)";

/// Regex fragments derived from one rule pattern.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PatternFragments {
    /// Fragment that must cover the whole candidate path.
    pub exact: String,
    /// Fragment that matches any separator-aligned prefix of an exact match.
    pub partial: String,
}

/// Translates a glob pattern into its exact and partial regex fragments.
///
/// # Examples
/// ```
/// use rules::compile_pattern;
///
/// let fragments = compile_pattern("*.log");
/// assert_eq!(fragments.exact, r"([^/]+)\.log");
/// ```
#[must_use]
pub fn compile_pattern(pattern: &str) -> PatternFragments {
    let exact = translate_glob(pattern);
    let partial = pattern
        .split('/')
        .enumerate()
        .map(|(index, segment)| {
            let segment = translate_glob(segment);
            if index == 0 {
                format!("({segment}{SEGMENT_END})")
            } else {
                format!("([/]?({segment}{SEGMENT_END}|$))")
            }
        })
        .collect();

    PatternFragments { exact, partial }
}

/// Escapes literal text and substitutes glob tokens in a single scan.
///
/// A single pass keeps the two steps from interfering: substituted regex
/// syntax is never escaped, and escaped literals are never substituted.
fn translate_glob(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() * 2);
    let mut chars = pattern.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '*' if chars.next_if_eq(&'*').is_some() => out.push_str(DOUBLE_STAR),
            '*' => out.push_str(SINGLE_STAR),
            '?' => out.push_str(QUESTION),
            '-' | '/' | '{' | '}' | '(' | ')' | '+' | '.' | '\\' | '^' | '$' | '|' => {
                out.push('\\');
                out.push(ch);
            }
            _ => out.push(ch),
        }
    }

    out
}

/// Exact and partial matchers for one bucket of rules.
///
/// An empty bucket holds no regex at all and never matches, not even the
/// empty string.
#[derive(Clone, Debug, Default)]
pub struct CompiledBucket {
    exact: Option<Regex>,
    partial: Option<Regex>,
}

impl CompiledBucket {
    /// Compiles `patterns`, in order, into one exact and one partial regex.
    ///
    /// # Errors
    ///
    /// Returns [`MatcherError::Compile`] naming the first pattern whose
    /// expansion is not a valid regular expression.
    pub fn compile<'a, I>(patterns: I) -> Result<Self, MatcherError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let patterns: Vec<&str> = patterns.into_iter().collect();
        if patterns.is_empty() {
            return Ok(Self::default());
        }

        let fragments: Vec<PatternFragments> =
            patterns.iter().map(|pattern| compile_pattern(pattern)).collect();

        let exact = alternation(fragments.iter().map(|f| f.exact.as_str()), "/?$");
        let partial = alternation(fragments.iter().map(|f| f.partial.as_str()), "");

        let exact = build(&exact, &patterns, |f| &f.exact, &fragments)?;
        let partial = build(&partial, &patterns, |f| &f.partial, &fragments)?;

        trace_bucket_compiled(patterns.len(), exact.as_str(), partial.as_str());

        Ok(Self {
            exact: Some(exact),
            partial: Some(partial),
        })
    }

    /// Returns `true` when some rule covers the whole of `path`.
    #[must_use]
    pub fn matches_exact(&self, path: &str) -> bool {
        self.exact.as_ref().is_some_and(|regex| regex.is_match(path))
    }

    /// Returns `true` when `path` is a prefix of something a rule could cover.
    #[must_use]
    pub fn matches_partial(&self, path: &str) -> bool {
        self.partial.as_ref().is_some_and(|regex| regex.is_match(path))
    }

    /// Source of the exact regex, or `None` for an empty bucket.
    #[must_use]
    pub fn exact_source(&self) -> Option<&str> {
        self.exact.as_ref().map(Regex::as_str)
    }

    /// Source of the partial regex, or `None` for an empty bucket.
    #[must_use]
    pub fn partial_source(&self) -> Option<&str> {
        self.partial.as_ref().map(Regex::as_str)
    }

    /// Returns `true` when the bucket was built from no rules.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.exact.is_none()
    }
}

fn alternation<'a>(fragments: impl Iterator<Item = &'a str>, suffix: &str) -> String {
    let body = fragments
        .map(|fragment| format!("({fragment})"))
        .collect::<Vec<_>>()
        .join("|");
    format!("^({body}){suffix}")
}

/// Builds the combined regex, attributing a failure to the first rule whose
/// own fragment does not compile.
fn build<F>(
    source: &str,
    patterns: &[&str],
    select: F,
    fragments: &[PatternFragments],
) -> Result<Regex, MatcherError>
where
    F: Fn(&PatternFragments) -> &String,
{
    Regex::new(source).map_err(|error| {
        let culprit = patterns
            .iter()
            .zip(fragments)
            .find(|(_, fragment)| Regex::new(select(fragment)).is_err())
            .map_or_else(|| patterns.join("\n"), |(pattern, _)| (*pattern).to_owned());
        MatcherError::compile(culprit, error)
    })
}
