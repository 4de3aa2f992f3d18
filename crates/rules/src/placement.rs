use std::fmt;

use crate::{PathMatcher, path::with_directory_marker};

/// How a project entry is reproduced in a twin copy of the project.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Placement {
    /// Copy the entry as an independent file or directory.
    RealCopy,
    /// Enter the directory and classify its children individually.
    Descend,
    /// Link the entry back to the source project.
    Symlink,
    /// Leave the entry out of the twin.
    Skip,
}

impl Placement {
    /// Stable lowercase token used in reports.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RealCopy => "real-copy",
            Self::Descend => "descend",
            Self::Symlink => "symlink",
            Self::Skip => "skip",
        }
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pair of matchers deciding the [`Placement`] of each project entry.
///
/// `real_copy` selects entries that must be copied; it is usually built with
/// [`PathMatcher::allow_list`]. `symlink` excludes entries that should not
/// appear in the twin at all, typically the project's `.gitignore`.
///
/// # Examples
///
/// ```
/// use rules::{PathMatcher, Placement, PlacementRules};
///
/// let placement = PlacementRules::new(
///     PathMatcher::allow_list(["ProjectSettings"]).unwrap(),
///     PathMatcher::from_lines(["Library/", "Temp/"]).unwrap(),
/// );
///
/// assert_eq!(placement.classify("ProjectSettings", true), Placement::RealCopy);
/// assert_eq!(placement.classify("Library", true), Placement::Skip);
/// assert_eq!(placement.classify("Assets", true), Placement::Symlink);
/// ```
#[derive(Clone, Debug)]
pub struct PlacementRules {
    real_copy: PathMatcher,
    symlink: PathMatcher,
}

impl PlacementRules {
    /// Creates placement rules from the two matchers.
    #[must_use]
    pub const fn new(real_copy: PathMatcher, symlink: PathMatcher) -> Self {
        Self { real_copy, symlink }
    }

    /// Classifies the entry at the project-relative `path`.
    ///
    /// Directories are queried with a trailing `/` so directory-only rules
    /// apply. Only directories are ever classified as
    /// [`Placement::Descend`].
    #[must_use]
    pub fn classify(&self, path: &str, is_dir: bool) -> Placement {
        let path = with_directory_marker(path, is_dir);

        if self.real_copy.includes(&path) {
            return Placement::RealCopy;
        }
        if is_dir && self.real_copy.may_include(&path) {
            return Placement::Descend;
        }
        if self.symlink.ignores(&path) {
            return Placement::Skip;
        }
        Placement::Symlink
    }

    /// Matcher selecting real copies.
    #[must_use]
    pub const fn real_copy(&self) -> &PathMatcher {
        &self.real_copy
    }

    /// Matcher excluding entries from the twin.
    #[must_use]
    pub const fn symlink(&self) -> &PathMatcher {
        &self.symlink
    }
}
