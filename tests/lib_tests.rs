use log::Level;
use renamer::engine::{
    contains_ignore_case, is_valid_name_fragment, path_relative_to, renamed_base_name,
    replace_last_segment, replace_literal, validate_change, validate_exclusions,
};
use renamer::pipeline::{
    BinaryDetector, RunState, guess_if_binary, is_control_byte, outcome_log_level, plan_renames,
    rewrite_text,
};
use renamer::utils::renamer_toml::parse_renamer_toml;
use renamer::utils::temp_path_for;
use renamer::{
    EntryKind, ExclusionSet, FileSystemEntry, RenameError, ReplacementPair, RewriteOutcome,
    RunPhase, SkipReason,
};
use std::io::Cursor;
use std::path::{Path, PathBuf};

fn pair(from: &str, to: &str) -> ReplacementPair {
    ReplacementPair::new(from, to).unwrap()
}

fn file(p: &str) -> FileSystemEntry {
    FileSystemEntry::new(p, EntryKind::File)
}

fn dir(p: &str) -> FileSystemEntry {
    FileSystemEntry::new(p, EntryKind::Directory)
}

// --- path_relative_to ---

#[test]
fn test_path_relative_under_base() {
    let base = PathBuf::from("/foo/bar");
    let path = PathBuf::from("/foo/bar/baz/qux");
    assert_eq!(
        path_relative_to(&path, &base),
        Some(PathBuf::from("baz/qux"))
    );
}

#[test]
fn test_path_relative_not_under_base() {
    let base = PathBuf::from("/foo/bar");
    let path = PathBuf::from("/other/qux");
    assert_eq!(path_relative_to(&path, &base), None);
}

// --- string helpers ---

#[test]
fn test_contains_ignore_case() {
    assert!(contains_ignore_case("FooReport.txt", "foo"));
    assert!(contains_ignore_case("fooreport.txt", "FOO"));
    assert!(!contains_ignore_case("report.txt", "foo"));
}

#[test]
fn test_replace_literal_all_occurrences() {
    assert_eq!(
        replace_literal("foo and foo", "foo", "bar"),
        ("bar and bar".to_string(), 2)
    );
}

#[test]
fn test_replace_literal_non_overlapping_left_to_right() {
    assert_eq!(replace_literal("aaaa", "aa", "b"), ("bb".to_string(), 2));
    assert_eq!(replace_literal("aaa", "aa", "b"), ("ba".to_string(), 1));
}

#[test]
fn test_replace_literal_is_case_sensitive() {
    assert_eq!(
        replace_literal("Foo foo", "foo", "bar"),
        ("Foo bar".to_string(), 1)
    );
}

#[test]
fn test_replace_literal_no_match() {
    assert_eq!(replace_literal("nothing", "foo", "bar"), ("nothing".to_string(), 0));
}

#[test]
fn test_replace_last_segment_keeps_parent() {
    assert_eq!(
        replace_last_segment(Path::new("/a/foo/foo.txt"), "bar.txt"),
        PathBuf::from("/a/foo/bar.txt")
    );
}

#[test]
fn test_renamed_base_name_matches() {
    assert_eq!(
        renamed_base_name("fooReport.txt", "foo", "bar"),
        Some("barReport.txt".to_string())
    );
}

#[test]
fn test_renamed_base_name_case_only_match_is_unchanged() {
    // Attempted (case-insensitive match) but the case-sensitive replace finds nothing.
    assert_eq!(renamed_base_name("FooReport.txt", "foo", "bar"), None);
}

#[test]
fn test_renamed_base_name_no_match() {
    assert_eq!(renamed_base_name("report.txt", "foo", "bar"), None);
}

// --- ExclusionSet ---

#[test]
fn test_exclusion_case_insensitive_full_path() {
    let set = ExclusionSet::new(["Node_Modules"]);
    assert!(set.is_excluded(Path::new("/root/node_modules/fooLib/file.txt")));
    assert!(set.is_excluded(Path::new("/root/NODE_MODULES")));
    assert!(!set.is_excluded(Path::new("/root/src/lib.rs")));
}

#[test]
fn test_exclusion_trims_and_drops_empty() {
    let set = ExclusionSet::new([" target ", "", "   "]);
    assert_eq!(set.patterns(), &["target".to_string()]);
}

#[test]
fn test_exclusion_empty_set_excludes_nothing() {
    let set = ExclusionSet::default();
    assert!(set.is_empty());
    assert!(!set.is_excluded(Path::new("/anything")));
}

// --- binary heuristic ---

#[test]
fn test_control_byte_ranges() {
    for b in 1u8..=7 {
        assert!(is_control_byte(b), "{b}");
    }
    for b in 14u8..=25 {
        assert!(is_control_byte(b), "{b}");
    }
    for b in [0u8, 8, 9, 10, 13, 26, 27, b'a'] {
        assert!(!is_control_byte(b), "{b}");
    }
}

#[test]
fn test_four_zero_bytes_is_binary() {
    let mut data = b"hello".to_vec();
    data.extend_from_slice(&[0, 0, 0, 0]);
    data.extend_from_slice(b"world");
    assert!(guess_if_binary(Cursor::new(data)).unwrap());
}

#[test]
fn test_three_zero_bytes_is_text() {
    let data = b"ab\0\0\0cd\0\0\0ef".to_vec();
    assert!(!guess_if_binary(Cursor::new(data)).unwrap());
}

#[test]
fn test_hundred_control_chars_is_binary() {
    let mut data = Vec::new();
    for _ in 0..100 {
        data.extend_from_slice(b"x\x01");
    }
    assert!(guess_if_binary(Cursor::new(data)).unwrap());
}

#[test]
fn test_ninety_nine_control_chars_is_text() {
    let mut data = Vec::new();
    for _ in 0..99 {
        data.extend_from_slice(b"y\x19");
    }
    assert!(!guess_if_binary(Cursor::new(data)).unwrap());
}

#[test]
fn test_plain_ascii_is_text() {
    let data = b"fn main() {\n\tprintln!(\"hi\");\r\n}\n".to_vec();
    assert!(!guess_if_binary(Cursor::new(data)).unwrap());
}

#[test]
fn test_zero_run_across_chunks() {
    let mut detector = BinaryDetector::new();
    assert!(!detector.feed(b"abc\0\0"));
    assert!(detector.feed(b"\0\0def"));
    assert!(detector.is_binary());
}

#[test]
fn test_zero_run_reset_by_other_byte() {
    let mut detector = BinaryDetector::new();
    assert!(!detector.feed(b"\0\0\0a\0\0\0"));
    assert!(!detector.is_binary());
}

// --- rewrite_text ---

#[test]
fn test_rewrite_text_replaces_and_counts() {
    let (out, n) = rewrite_text(b"foo value", &pair("foo", "bar"), false).unwrap();
    assert_eq!(out, b"bar value");
    assert_eq!(n, 1);
}

#[test]
fn test_rewrite_text_emits_bom() {
    let (out, _) = rewrite_text(b"foo", &pair("foo", "bar"), true).unwrap();
    assert_eq!(out, b"\xEF\xBB\xBFbar");
}

#[test]
fn test_rewrite_text_strips_input_bom_without_emit() {
    let (out, _) = rewrite_text(b"\xEF\xBB\xBFfoo", &pair("foo", "bar"), false).unwrap();
    assert_eq!(out, b"bar");
}

#[test]
fn test_rewrite_text_identity_preserves_content() {
    let input = "line one foo\nline two\n".as_bytes();
    let (out, _) = rewrite_text(input, &pair("foo", "foo"), false).unwrap();
    assert_eq!(out, input);
}

#[test]
fn test_rewrite_text_rejects_invalid_utf8() {
    assert!(rewrite_text(b"foo \xFF\xFE", &pair("foo", "bar"), false).is_none());
}

#[test]
fn test_outcome_log_level_warns_on_undecodable_text() {
    assert_eq!(
        outcome_log_level(&Ok(RewriteOutcome::Skipped(SkipReason::NotUtf8))),
        Level::Warn
    );
    assert_eq!(
        outcome_log_level(&Ok(RewriteOutcome::Skipped(SkipReason::Binary))),
        Level::Debug
    );
    assert_eq!(
        outcome_log_level(&Ok(RewriteOutcome::Rewritten { replacements: 2 })),
        Level::Debug
    );
}

// --- plan_renames ---

#[test]
fn test_plan_orders_files_then_dirs_longest_first() {
    let entries = vec![
        dir("/r/foo"),
        dir("/r/foo/foo_sub"),
        file("/r/foo/foo_sub/foo.txt"),
        file("/r/foo/a_foo.txt"),
    ];
    let steps = plan_renames(&entries, &pair("foo", "bar"));
    let froms: Vec<&Path> = steps.iter().map(|s| s.from.as_path()).collect();
    assert_eq!(
        froms,
        vec![
            Path::new("/r/foo/foo_sub/foo.txt"),
            Path::new("/r/foo/a_foo.txt"),
            Path::new("/r/foo/foo_sub"),
            Path::new("/r/foo"),
        ]
    );
    assert_eq!(steps[0].to, PathBuf::from("/r/foo/foo_sub/bar.txt"));
    assert_eq!(steps[2].to, PathBuf::from("/r/foo/bar_sub"));
    assert_eq!(steps[3].to, PathBuf::from("/r/bar"));
}

#[test]
fn test_plan_only_touches_last_segment() {
    let steps = plan_renames(&[file("/foo/plain.txt")], &pair("foo", "bar"));
    assert!(steps.is_empty());
}

#[test]
fn test_plan_skips_case_only_matches() {
    let steps = plan_renames(&[file("/r/FOO.txt"), dir("/r/Foo")], &pair("foo", "bar"));
    assert!(steps.is_empty());
}

#[test]
fn test_plan_child_before_ancestor() {
    let entries = vec![dir("/a"), dir("/a/b"), file("/a/b/c.txt")];
    let steps = plan_renames(&entries, &pair("a", "x"));
    // "/a/b/c.txt" base name has no 'a'; only the dirs named "a" change.
    assert_eq!(steps.len(), 1);
    assert_eq!(steps[0].from, PathBuf::from("/a"));

    let entries = vec![dir("/q/foo"), dir("/q/foo/foo"), file("/q/foo/foo/foo")];
    let steps = plan_renames(&entries, &pair("foo", "bar"));
    let order: Vec<_> = steps.iter().map(|s| s.from.clone()).collect();
    assert_eq!(
        order,
        vec![
            PathBuf::from("/q/foo/foo/foo"),
            PathBuf::from("/q/foo/foo"),
            PathBuf::from("/q/foo"),
        ]
    );
}

// --- validation ---

#[test]
fn test_validate_change_ok() {
    let p = validate_change("foo", "bar").unwrap();
    assert_eq!(p, pair("foo", "bar"));
}

#[test]
fn test_validate_change_rejects_empty() {
    assert!(matches!(
        validate_change("", "bar"),
        Err(RenameError::InvalidInput { .. })
    ));
    assert!(matches!(
        validate_change("foo", ""),
        Err(RenameError::InvalidInput { .. })
    ));
}

#[test]
fn test_validate_change_rejects_flag_prefix() {
    assert!(matches!(
        validate_change("--exclude", "bar"),
        Err(RenameError::InvalidInput { .. })
    ));
}

#[test]
fn test_validate_change_rejects_separator() {
    assert!(!is_valid_name_fragment("a/b"));
    assert!(matches!(
        validate_change("foo", "a/b"),
        Err(RenameError::InvalidInput { .. })
    ));
}

#[test]
fn test_validate_exclusions_trims() {
    let set = validate_exclusions(&[" node_modules".to_string(), "".to_string()]).unwrap();
    assert_eq!(set.patterns(), &["node_modules".to_string()]);
}

#[test]
fn test_replacement_pair_rejects_empty() {
    assert!(ReplacementPair::new("", "x").is_err());
    assert!(ReplacementPair::new("x", "").is_err());
}

// --- RunState ---

#[test]
fn test_run_state_moves_forward_only() {
    let mut state = RunState::new();
    assert_eq!(state.phase(), RunPhase::Scanning);
    assert!(state.advance(RunPhase::ContentRewriting));
    assert!(!state.advance(RunPhase::Scanning));
    assert!(state.advance(RunPhase::RenamingFiles));
    assert!(state.advance(RunPhase::RenamingDirectories));
    assert!(state.advance(RunPhase::Done));
    assert!(!state.advance(RunPhase::Aborted));
    assert_eq!(state.phase(), RunPhase::Done);
}

#[test]
fn test_run_state_abort_is_terminal() {
    let mut state = RunState::new();
    state.advance(RunPhase::ContentRewriting);
    let err = state.abort(RenameError::Cancelled);
    assert!(matches!(err, RenameError::Cancelled));
    assert_eq!(state.phase(), RunPhase::Aborted);
    assert!(!state.advance(RunPhase::Done));
}

// --- config / temp paths ---

#[test]
fn test_parse_renamer_toml() {
    let cfg = parse_renamer_toml(
        r#"
[settings]
exclude = ["target", ".git"]
emit_bom = true
threads = 3
"#,
    )
    .unwrap();
    assert_eq!(
        cfg.settings.exclude,
        Some(vec!["target".to_string(), ".git".to_string()])
    );
    assert_eq!(cfg.settings.emit_bom, Some(true));
    assert_eq!(cfg.settings.threads, Some(3));
    assert_eq!(cfg.settings.verbose, None);
}

#[test]
fn test_parse_renamer_toml_empty() {
    let cfg = parse_renamer_toml("").unwrap();
    assert!(cfg.settings.exclude.is_none());
}

#[test]
fn test_temp_path_is_hidden_sibling() {
    assert_eq!(
        temp_path_for(Path::new("/a/b/notes.txt")),
        PathBuf::from("/a/b/.notes.txt.renamer.tmp")
    );
}
