//! Twin placement decisions over a small Unity project layout.

use std::sync::Arc;
use std::thread;

use rules::{PathMatcher, Placement, PlacementRules};

fn project_rules() -> PlacementRules {
    let real_copy = PathMatcher::allow_list([
        "ProjectSettings",
        "Assets/StreamingAssets/config.json",
        "UserSettings",
    ])
    .unwrap();
    let symlink = PathMatcher::from_text(
        "/[Ll]ibrary/\n/[Tt]emp/\n/[Ll]ogs/\n*.csproj\n*.sln\n.vs/\n",
    )
    .unwrap();
    PlacementRules::new(real_copy, symlink)
}

#[test]
fn walk_of_typical_project() {
    let rules = project_rules();
    let entries = [
        ("Assets", true, Placement::Descend),
        ("Assets/Art", true, Placement::Symlink),
        ("Assets/StreamingAssets", true, Placement::Descend),
        ("Assets/StreamingAssets/config.json", false, Placement::RealCopy),
        ("Assets/StreamingAssets/video.mp4", false, Placement::Symlink),
        ("Library", true, Placement::Skip),
        ("Logs", true, Placement::Skip),
        ("Packages", true, Placement::Symlink),
        ("ProjectSettings", true, Placement::RealCopy),
        ("Temp", true, Placement::Skip),
        ("UserSettings", true, Placement::RealCopy),
        (".vs", true, Placement::Skip),
        ("Game.sln", false, Placement::Skip),
        ("Assembly-CSharp.csproj", false, Placement::Skip),
        ("README.md", false, Placement::Symlink),
    ];

    for (path, is_dir, expected) in entries {
        assert_eq!(rules.classify(path, is_dir), expected, "{path}");
    }
}

#[test]
fn trailing_marker_and_flag_agree() {
    let rules = project_rules();
    assert_eq!(rules.classify("Library/", true), rules.classify("Library", true));
    assert_eq!(rules.classify(r"Library\", true), Placement::Skip);
}

#[test]
fn backslash_paths_classify_like_slash_paths() {
    let rules = project_rules();
    assert_eq!(
        rules.classify(r"Assets\StreamingAssets\config.json", false),
        Placement::RealCopy
    );
}

#[test]
fn real_copy_takes_precedence_over_ignore() {
    let rules = PlacementRules::new(
        PathMatcher::allow_list(["Library/ScriptAssemblies"]).unwrap(),
        PathMatcher::from_lines(["Library/", "Library/**"]).unwrap(),
    );
    assert_eq!(rules.classify("Library", true), Placement::Descend);
    assert_eq!(
        rules.classify("Library/ScriptAssemblies", true),
        Placement::RealCopy
    );
    assert_eq!(rules.classify("Library/Cache", true), Placement::Skip);
}

#[test]
fn matchers_are_shared_across_threads() {
    let rules = Arc::new(project_rules());
    let handles: Vec<_> = (0..4)
        .map(|worker| {
            let rules = Arc::clone(&rules);
            thread::spawn(move || {
                (0..100)
                    .map(|i| {
                        let path = format!("Assets/W{worker}/file{i}.png");
                        rules.classify(&path, false)
                    })
                    .all(|placement| placement == Placement::Symlink)
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap());
    }
}
