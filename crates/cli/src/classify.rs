use std::fmt;

use rules::debug_rules::RuleTracer;
use rules::{PathMatcher, Placement, PlacementRules, with_directory_marker};

/// Decision printed for one candidate path.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Verdict {
    Include,
    Ignore,
    Descend,
    Placed(Placement),
}

impl Verdict {
    pub(crate) const fn as_str(self) -> &'static str {
        match self {
            Self::Include => "include",
            Self::Ignore => "ignore",
            Self::Descend => "descend",
            Self::Placed(placement) => placement.as_str(),
        }
    }

    fn record(self, tracer: &mut RuleTracer) {
        match self {
            Self::Include | Self::Placed(Placement::RealCopy | Placement::Symlink) => {
                tracer.record_evaluation(true);
            }
            Self::Ignore | Self::Placed(Placement::Skip) => tracer.record_evaluation(false),
            Self::Descend | Self::Placed(Placement::Descend) => {
                tracer.record_evaluation(false);
                tracer.record_descend();
            }
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rule evaluation mode selected on the command line.
#[derive(Debug)]
pub(crate) enum Classifier {
    /// Plain include/ignore classification against one matcher.
    Filter(PathMatcher),
    /// Twin placement against a real-copy selection and an ignore matcher.
    Placement(PlacementRules),
}

impl Classifier {
    pub(crate) fn classify(&self, path: &str, is_dir: bool) -> Verdict {
        match self {
            Self::Filter(matcher) => {
                let path = with_directory_marker(path, is_dir);
                if matcher.includes(&path) {
                    Verdict::Include
                } else if is_dir && matcher.may_include(&path) {
                    Verdict::Descend
                } else {
                    Verdict::Ignore
                }
            }
            Self::Placement(rules) => Verdict::Placed(rules.classify(path, is_dir)),
        }
    }

    pub(crate) fn classify_recorded(
        &self,
        path: &str,
        is_dir: bool,
        tracer: &mut RuleTracer,
    ) -> Verdict {
        let verdict = self.classify(path, is_dir);
        verdict.record(tracer);
        verdict
    }
}
