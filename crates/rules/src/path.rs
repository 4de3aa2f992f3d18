use std::borrow::Cow;
use std::path::{Component, Path};

/// Normalizes a candidate path before it is matched.
///
/// Backslashes become `/`, then exactly one leading `/` is removed so that
/// absolute-looking paths match relative to the project root.
///
/// # Examples
/// ```
/// use rules::normalize_path;
///
/// assert_eq!(normalize_path(r"Assets\Scenes\Main.unity"), "Assets/Scenes/Main.unity");
/// assert_eq!(normalize_path("/Library/"), "Library/");
/// assert_eq!(normalize_path("//twice"), "/twice");
/// ```
#[must_use]
pub fn normalize_path(path: &str) -> Cow<'_, str> {
    if path.contains('\\') {
        let fixed = path.replace('\\', "/");
        match fixed.strip_prefix('/') {
            Some(rest) => Cow::Owned(rest.to_owned()),
            None => Cow::Owned(fixed),
        }
    } else {
        Cow::Borrowed(path.strip_prefix('/').unwrap_or(path))
    }
}

/// Returns `true` when `path` carries a trailing directory marker.
#[must_use]
pub fn is_directory_marker(path: &str) -> bool {
    path.ends_with('/') || path.ends_with('\\')
}

/// Appends the trailing `/` directory marker when `is_dir` is set.
#[must_use]
pub fn with_directory_marker(path: &str, is_dir: bool) -> Cow<'_, str> {
    if is_dir && !is_directory_marker(path) {
        Cow::Owned(format!("{path}/"))
    } else {
        Cow::Borrowed(path)
    }
}

/// Converts `entry` into the slash-separated form queried against rules.
///
/// `entry` must live under `root`; the result is relative to it, uses `/` as
/// separator regardless of platform, and ends with `/` when `is_dir` is set.
/// Returns `None` when `entry` is outside `root`, equals it, or contains
/// components that cannot be expressed relatively (`..`, non-UTF-8 names).
///
/// # Examples
/// ```
/// use rules::relative_rule_path;
/// use std::path::Path;
///
/// let root = Path::new("/work/Game");
/// assert_eq!(
///     relative_rule_path(root, Path::new("/work/Game/Assets/Art"), true).as_deref(),
///     Some("Assets/Art/")
/// );
/// assert_eq!(relative_rule_path(root, Path::new("/elsewhere/file"), false), None);
/// ```
#[must_use]
pub fn relative_rule_path(root: &Path, entry: &Path, is_dir: bool) -> Option<String> {
    let relative = entry.strip_prefix(root).ok()?;

    let mut out = String::new();
    for component in relative.components() {
        match component {
            Component::Normal(name) => {
                if !out.is_empty() {
                    out.push('/');
                }
                out.push_str(name.to_str()?);
            }
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }

    if out.is_empty() {
        return None;
    }
    if is_dir {
        out.push('/');
    }
    Some(out)
}
