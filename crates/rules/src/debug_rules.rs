//! Structured tracing for rule compilation and path evaluation.
//!
//! Every event is emitted under the `twinmatch::rules` target. The functions
//! are compiled behind the `tracing` feature flag and collapse to no-op inline
//! stubs when it is disabled, so call sites never need their own `cfg`.
//!
//! # Examples
//!
//! ```
//! use rules::debug_rules::RuleTracer;
//!
//! let mut tracer = RuleTracer::new();
//! tracer.record_rules(3);
//! tracer.record_evaluation(true);
//! tracer.record_evaluation(false);
//! tracer.record_descend();
//! tracer.summary();
//!
//! assert_eq!(tracer.total_evaluated(), 2);
//! assert_eq!(tracer.total_ignored(), 1);
//! ```

/// Target name for tracing events.
#[cfg(feature = "tracing")]
const RULES_TARGET: &str = "twinmatch::rules";

/// Traces a bucket of rules being compiled into its exact and partial regexes.
#[cfg(feature = "tracing")]
#[inline]
pub fn trace_bucket_compiled(rule_count: usize, exact: &str, partial: &str) {
    tracing::debug!(
        target: RULES_TARGET,
        rule_count = rule_count,
        exact = %exact,
        partial = %partial,
        "bucket_compiled"
    );
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn trace_bucket_compiled(_rule_count: usize, _exact: &str, _partial: &str) {}

/// Traces construction of a matcher from a parsed rule set.
#[cfg(feature = "tracing")]
#[inline]
pub fn trace_matcher_built(exclude_rules: usize, include_rules: usize) {
    tracing::debug!(
        target: RULES_TARGET,
        exclude_rules = exclude_rules,
        include_rules = include_rules,
        "matcher_built"
    );
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn trace_matcher_built(_exclude_rules: usize, _include_rules: usize) {}

/// Traces the outcome of a query against a matcher.
///
/// `query` names the operation (`includes` or `may_include`).
#[cfg(feature = "tracing")]
#[inline]
pub fn trace_path_decision(path: &str, query: &'static str, outcome: bool) {
    tracing::trace!(
        target: RULES_TARGET,
        path = %path,
        query = query,
        outcome = outcome,
        "path_decision"
    );
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn trace_path_decision(_path: &str, _query: &'static str, _outcome: bool) {}

/// Traces loading of a rule file.
#[cfg(feature = "tracing")]
#[inline]
pub fn trace_rule_file_loaded(path: &str, rule_count: usize) {
    tracing::debug!(
        target: RULES_TARGET,
        path = %path,
        rule_count = rule_count,
        "rule_file_loaded"
    );
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn trace_rule_file_loaded(_path: &str, _rule_count: usize) {}

/// Traces summary statistics for a classification session.
#[cfg(feature = "tracing")]
#[inline]
pub fn trace_rules_summary(
    rules: usize,
    total_evaluated: usize,
    total_included: usize,
    total_ignored: usize,
    descended: usize,
) {
    tracing::info!(
        target: RULES_TARGET,
        rules = rules,
        total_evaluated = total_evaluated,
        total_included = total_included,
        total_ignored = total_ignored,
        descended = descended,
        "rules_summary"
    );
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn trace_rules_summary(
    _rules: usize,
    _total_evaluated: usize,
    _total_included: usize,
    _total_ignored: usize,
    _descended: usize,
) {
}

/// Aggregates statistics across many path evaluations.
#[derive(Clone, Debug, Default)]
pub struct RuleTracer {
    rules: usize,
    total_evaluated: usize,
    total_included: usize,
    total_ignored: usize,
    descended: usize,
}

impl RuleTracer {
    /// Creates a tracer with zero counts.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            rules: 0,
            total_evaluated: 0,
            total_included: 0,
            total_ignored: 0,
            descended: 0,
        }
    }

    /// Records rules added to the session.
    pub fn record_rules(&mut self, count: usize) {
        self.rules += count;
    }

    /// Records the final include/ignore outcome for one path.
    pub fn record_evaluation(&mut self, included: bool) {
        self.total_evaluated += 1;
        if included {
            self.total_included += 1;
        } else {
            self.total_ignored += 1;
        }
    }

    /// Records a directory that was kept for descent despite being ignored.
    pub fn record_descend(&mut self) {
        self.descended += 1;
    }

    /// Emits a summary event with the accumulated counts.
    pub fn summary(&self) {
        trace_rules_summary(
            self.rules,
            self.total_evaluated,
            self.total_included,
            self.total_ignored,
            self.descended,
        );
    }

    /// Returns the number of rules recorded.
    #[must_use]
    pub const fn rules(&self) -> usize {
        self.rules
    }

    /// Returns the number of paths evaluated.
    #[must_use]
    pub const fn total_evaluated(&self) -> usize {
        self.total_evaluated
    }

    /// Returns the number of included paths.
    #[must_use]
    pub const fn total_included(&self) -> usize {
        self.total_included
    }

    /// Returns the number of ignored paths.
    #[must_use]
    pub const fn total_ignored(&self) -> usize {
        self.total_ignored
    }

    /// Returns the number of directories kept for descent.
    #[must_use]
    pub const fn descended(&self) -> usize {
        self.descended
    }
}
