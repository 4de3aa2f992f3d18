use super::*;
use std::io::Cursor;

fn run_with_args<I, S>(args: I) -> (i32, String, String)
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
{
    run_with_stdin(args, "")
}

fn run_with_stdin<I, S>(args: I, stdin: &str) -> (i32, String, String)
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
{
    let mut input = Cursor::new(stdin.as_bytes().to_vec());
    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    let code = run_with_input(args, &mut input, &mut stdout, &mut stderr);
    (
        code,
        String::from_utf8(stdout).expect("utf-8 stdout"),
        String::from_utf8(stderr).expect("utf-8 stderr"),
    )
}

#[test]
fn help_flag_renders_static_help_snapshot() {
    let (code, stdout, stderr) = run_with_args(["twinmatch", "--help"]);

    assert_eq!(code, 0);
    assert!(stderr.is_empty());
    assert_eq!(stdout, render_help());
}

#[test]
fn short_version_flag_renders_banner() {
    let (code, stdout, stderr) = run_with_args(["twinmatch", "-V"]);

    assert_eq!(code, 0);
    assert!(stderr.is_empty());
    assert_eq!(stdout, format!("twinmatch {}\n", env!("CARGO_PKG_VERSION")));
}

#[test]
fn parse_args_collects_repeated_options() {
    let parsed = parse_args([
        "twinmatch",
        "-vv",
        "-f",
        ".gitignore",
        "--rules-file",
        "extra.ignore",
        "-r",
        "*.tmp",
        "--rule=!keep.tmp",
        "--real-copy",
        "Assets",
        "--root",
        "/work/Game",
        "a",
        "b/",
    ])
    .expect("parse succeeds");

    assert_eq!(parsed.verbosity, 2);
    assert_eq!(
        parsed.rules_files,
        [PathBuf::from(".gitignore"), PathBuf::from("extra.ignore")]
    );
    assert_eq!(parsed.rules, ["*.tmp", "!keep.tmp"]);
    assert_eq!(parsed.real_copy, ["Assets"]);
    assert_eq!(parsed.root.as_deref(), Some(Path::new("/work/Game")));
    assert_eq!(parsed.paths, ["a", "b/"]);
}

#[test]
fn parse_args_defaults_program_name() {
    let parsed = parse_args(Vec::<OsString>::new()).expect("parse succeeds");
    assert!(!parsed.show_help);
    assert!(parsed.paths.is_empty());
}

#[test]
fn unknown_option_is_a_usage_error() {
    let (code, stdout, stderr) = run_with_args(["twinmatch", "--bogus"]);

    assert_eq!(code, 1);
    assert!(stdout.is_empty());
    assert!(stderr.starts_with("twinmatch error: "));
    assert!(stderr.contains("--bogus"));
}

#[test]
fn filter_mode_reports_each_operand() {
    let (code, stdout, stderr) = run_with_args([
        "twinmatch",
        "-r",
        "Library/",
        "-r",
        "*.csproj",
        "-r",
        "!Keep.csproj",
        "Library/",
        "Game.csproj",
        "Keep.csproj",
        "Assets/Main.unity",
    ]);

    assert_eq!(code, 0, "stderr: {stderr}");
    assert_eq!(
        stdout,
        "ignore\tLibrary/\nignore\tGame.csproj\ninclude\tKeep.csproj\ninclude\tAssets/Main.unity\n"
    );
}

#[test]
fn ignored_directory_with_included_descendant_descends() {
    let (code, stdout, _) = run_with_args([
        "twinmatch",
        "-r",
        "Build/**",
        "-r",
        "!Build/Config/**",
        "Build/Config/",
        "Build/Temp/",
        "Build/Config/app.json",
    ]);

    assert_eq!(code, 0);
    assert_eq!(
        stdout,
        "descend\tBuild/Config/\nignore\tBuild/Temp/\ninclude\tBuild/Config/app.json\n"
    );
}

#[test]
fn paths_are_read_from_input_without_operands() {
    let (code, stdout, _) =
        run_with_stdin(["twinmatch", "-r", "*.log"], "a.log\r\n\nsrc/main.rs\n  \n");

    assert_eq!(code, 0);
    assert_eq!(stdout, "ignore\ta.log\ninclude\tsrc/main.rs\n");
}

#[test]
fn no_rules_include_everything() {
    let (code, stdout, _) = run_with_args(["twinmatch", "anything", "nested/dir/"]);

    assert_eq!(code, 0);
    assert_eq!(stdout, "include\tanything\ninclude\tnested/dir/\n");
}

#[test]
fn rule_files_load_before_inline_rules() {
    let dir = tempfile::tempdir().expect("tempdir");
    let rules = dir.path().join(".gitignore");
    fs::write(&rules, "# build output\n*.tmp\n").expect("write rules");

    let (code, stdout, stderr) = run_with_args([
        OsString::from("twinmatch"),
        OsString::from("-f"),
        rules.clone().into_os_string(),
        OsString::from("-r"),
        OsString::from("!keep.tmp"),
        OsString::from("scratch.tmp"),
        OsString::from("keep.tmp"),
    ]);

    assert_eq!(code, 0, "stderr: {stderr}");
    assert_eq!(stdout, "ignore\tscratch.tmp\ninclude\tkeep.tmp\n");
}

#[test]
fn missing_rule_file_exits_with_code_three() {
    let dir = tempfile::tempdir().expect("tempdir");
    let missing = dir.path().join("absent.ignore");

    let (code, stdout, stderr) = run_with_args([
        OsString::from("twinmatch"),
        OsString::from("-f"),
        missing.into_os_string(),
        OsString::from("x"),
    ]);

    assert_eq!(code, 3);
    assert!(stdout.is_empty());
    assert!(stderr.starts_with("twinmatch error: rule file not found: "));
}

#[test]
fn invalid_rule_exits_with_code_one_and_names_it() {
    let (code, stdout, stderr) = run_with_args(["twinmatch", "-r", "[z", "x"]);

    assert_eq!(code, 1);
    assert!(stdout.is_empty());
    assert!(stderr.contains("'[z'"), "stderr: {stderr}");
}

#[test]
fn placement_mode_classifies_twin_layout() {
    let (code, stdout, stderr) = run_with_args([
        "twinmatch",
        "-r",
        "Library/",
        "-r",
        "Temp/",
        "--real-copy",
        "Assets/Scenes",
        "Assets/",
        "Assets/Scenes/",
        "Assets/Art/",
        "Library/",
        "ProjectSettings/",
        "README.md",
    ]);

    assert_eq!(code, 0, "stderr: {stderr}");
    assert_eq!(
        stdout,
        concat!(
            "descend\tAssets/\n",
            "real-copy\tAssets/Scenes/\n",
            "symlink\tAssets/Art/\n",
            "skip\tLibrary/\n",
            "symlink\tProjectSettings/\n",
            "symlink\tREADME.md\n",
        )
    );
}

#[test]
fn root_resolves_directories_from_the_filesystem() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::create_dir_all(dir.path().join("Library/cache")).expect("create dirs");
    fs::write(dir.path().join("notes.txt"), b"").expect("write file");

    let (code, stdout, stderr) = run_with_args([
        OsString::from("twinmatch"),
        OsString::from("-r"),
        OsString::from("Library/"),
        OsString::from("--root"),
        dir.path().as_os_str().to_owned(),
        OsString::from("Library"),
        OsString::from("notes.txt"),
    ]);

    assert_eq!(code, 0, "stderr: {stderr}");
    assert_eq!(stdout, "ignore\tLibrary\ninclude\tnotes.txt\n");
}

#[test]
fn root_skips_candidates_outside_it() {
    let dir = tempfile::tempdir().expect("tempdir");

    let (code, stdout, _) = run_with_args([
        OsString::from("twinmatch"),
        OsString::from("--root"),
        dir.path().as_os_str().to_owned(),
        OsString::from("../escape"),
        OsString::from("inside"),
    ]);

    assert_eq!(code, 0);
    assert_eq!(stdout, "include\tinside\n");
}

#[test]
fn resolve_candidate_without_root_uses_marker() {
    assert_eq!(
        resolve_candidate("Temp/", None),
        Some(("Temp/".to_owned(), true))
    );
    assert_eq!(
        resolve_candidate("Temp", None),
        Some(("Temp".to_owned(), false))
    );
}

#[test]
fn exit_code_from_clamps_out_of_range_values() {
    assert_eq!(exit_code_from(0), ExitCode::SUCCESS);
    assert_eq!(exit_code_from(3), ExitCode::from(3));
    assert_eq!(exit_code_from(-7), ExitCode::SUCCESS);
    assert_eq!(exit_code_from(4096), ExitCode::from(u8::MAX));
}
