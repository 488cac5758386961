//! Basic CLI E2E tests.
//!
//! Tests invoke the built binary against an isolated data directory and
//! verify outputs. Separate invocations are separate processes, so these
//! also exercise the two surfaces sharing state only through storage.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

#[derive(Debug, Deserialize, PartialEq)]
struct WordJson {
    word: String,
    definition: String,
}

#[derive(Debug, Deserialize)]
struct DailyJson {
    date: String,
    index: usize,
    active_len: usize,
    word: WordJson,
}

#[derive(Debug, Deserialize, PartialEq)]
struct EntryJson {
    effective_date: String,
    word: WordJson,
    placeholder: bool,
}

#[derive(Debug, Deserialize)]
struct TimelineJson {
    source: String,
    entries: Vec<EntryJson>,
    refresh_at: String,
}

fn parse<T: DeserializeOwned>(stdout: &str) -> T {
    serde_json::from_str(stdout).unwrap_or_else(|e| panic!("unexpected JSON ({e}): {stdout}"))
}

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(data_dir: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_satword"))
        .env("SATWORD_DATA_DIR", data_dir)
        .env_remove("SATWORD_LOG")
        .args(args)
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn run_cli_success(data_dir: &Path, args: &[&str]) -> String {
    let (stdout, stderr, code) = run_cli(data_dir, args);
    assert_eq!(code, 0, "CLI command failed {:?}: {}", args, stderr);
    stdout
}

/// Write a word list into the data dir and point `catalog.path` at it.
fn with_catalog(dir: &TempDir, name: &str, json: &str) -> String {
    let path = dir.path().join(name);
    std::fs::write(&path, json).unwrap();
    run_cli_success(dir.path(), &["config", "set", "catalog.path", path.to_str().unwrap()])
}

/// Point the catalog at the three-word scenario list.
fn with_scenario_catalog(dir: &TempDir) {
    with_catalog(
        dir,
        "words.json",
        r#"[
            {"word": "Ebullient", "definition": "cheerful and enthusiastic"},
            {"word": "Laconic", "definition": "using few words"},
            {"word": "Mendacious", "definition": "not telling the truth"}
        ]"#,
    );
}

#[test]
fn test_today_scenario() {
    let dir = TempDir::new().unwrap();
    with_scenario_catalog(&dir);

    let out = run_cli_success(dir.path(), &["today", "--date", "2025-01-05", "--json"]);
    let daily: DailyJson = parse(&out);
    assert_eq!(daily.index, 2);
    assert_eq!(daily.active_len, 3);
    assert_eq!(
        daily.word,
        WordJson {
            word: "Mendacious".into(),
            definition: "not telling the truth".into(),
        }
    );

    run_cli_success(dir.path(), &["known", "add", "mendacious"]);
    let out = run_cli_success(dir.path(), &["today", "--date", "2025-01-05", "--json"]);
    let daily: DailyJson = parse(&out);
    assert_eq!(daily.index, 1);
    assert_eq!(daily.active_len, 2);
    assert_eq!(daily.word.word, "Laconic");
}

#[test]
fn test_today_offset_steps_days() {
    let dir = TempDir::new().unwrap();
    with_scenario_catalog(&dir);

    let out = run_cli_success(
        dir.path(),
        &["today", "--date", "2025-01-05", "--offset", "-1", "--json"],
    );
    let daily: DailyJson = parse(&out);
    assert_eq!(daily.date, "2025-01-04");
    assert_eq!(daily.word.word, "Laconic");
}

#[test]
fn test_known_add_is_idempotent() {
    let dir = TempDir::new().unwrap();
    with_scenario_catalog(&dir);

    let first = run_cli_success(dir.path(), &["known", "add", "Laconic"]);
    let second = run_cli_success(dir.path(), &["known", "add", "Laconic"]);
    assert!(first.contains("Marked known: Laconic"));
    assert!(second.contains("Already known: Laconic"));

    let out = run_cli_success(dir.path(), &["known", "list", "--json"]);
    let known: Vec<WordJson> = parse(&out);
    assert_eq!(known.len(), 1);
    assert_eq!(known[0].definition, "using few words");
}

#[test]
fn test_known_remove_absent_is_noop() {
    let dir = TempDir::new().unwrap();
    with_scenario_catalog(&dir);

    let out = run_cli_success(dir.path(), &["known", "remove", "Laconic"]);
    assert!(out.contains("Not known: Laconic"));

    run_cli_success(dir.path(), &["known", "add", "Laconic"]);
    let out = run_cli_success(dir.path(), &["known", "remove", "Laconic"]);
    assert!(out.contains("Removed: Laconic"));
    let out = run_cli_success(dir.path(), &["known", "list"]);
    assert!(out.contains("No known words yet"));
}

#[test]
fn test_unknown_word_fails() {
    let dir = TempDir::new().unwrap();
    with_scenario_catalog(&dir);

    let (_, stderr, code) = run_cli(dir.path(), &["known", "add", "Verbose"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("word not in list"));
}

#[test]
fn test_widget_agrees_with_today_after_mark() {
    let dir = TempDir::new().unwrap();
    with_scenario_catalog(&dir);
    let now = "2025-01-05T10:00:00-05:00";

    let out = run_cli_success(dir.path(), &["widget", "timeline", "--now", now, "--json"]);
    let timeline: TimelineJson = parse(&out);
    assert_eq!(timeline.entries[0].word.word, "Mendacious");
    assert_eq!(timeline.entries[0].effective_date, "2025-01-05T00:00:00-05:00");
    assert_eq!(timeline.refresh_at, "2025-01-06T00:00:00-05:00");

    run_cli_success(dir.path(), &["known", "add", "Mendacious"]);

    let out = run_cli_success(dir.path(), &["widget", "timeline", "--now", now, "--json"]);
    let timeline: TimelineJson = parse(&out);
    assert_eq!(timeline.source, "computed");
    assert_eq!(timeline.entries[0].word.word, "Laconic");
}

#[test]
fn test_widget_timeline_is_stable_within_a_day() {
    let dir = TempDir::new().unwrap();
    with_scenario_catalog(&dir);

    let first = run_cli_success(
        dir.path(),
        &["widget", "timeline", "--now", "2025-01-05T08:00:00+00:00", "--json"],
    );
    let second = run_cli_success(
        dir.path(),
        &["widget", "timeline", "--now", "2025-01-05T21:00:00+00:00", "--json"],
    );
    let first: TimelineJson = parse(&first);
    let second: TimelineJson = parse(&second);
    assert_eq!(first.entries, second.entries);
    assert_eq!(first.refresh_at, second.refresh_at);
    assert_eq!(second.source, "cached");
}

#[test]
fn test_widget_follows_catalog_change_mid_day() {
    let dir = TempDir::new().unwrap();
    with_scenario_catalog(&dir);

    let out = run_cli_success(
        dir.path(),
        &["widget", "timeline", "--now", "2025-01-05T08:00:00+00:00", "--json"],
    );
    let before: TimelineJson = parse(&out);
    assert_eq!(before.entries[0].word.word, "Mendacious");

    with_catalog(
        &dir,
        "replacement.json",
        r#"[
            {"word": "Garrulous", "definition": "excessively talkative"},
            {"word": "Terse", "definition": "sparing in the use of words"}
        ]"#,
    );

    let out = run_cli_success(dir.path(), &["today", "--date", "2025-01-05", "--json"]);
    let today: DailyJson = parse(&out);
    let out = run_cli_success(
        dir.path(),
        &["widget", "timeline", "--now", "2025-01-05T09:00:00+00:00", "--json"],
    );
    let after: TimelineJson = parse(&out);

    assert_eq!(today.word.word, "Terse");
    assert_eq!(after.source, "computed");
    assert_eq!(after.entries[0].word, today.word);
}

#[test]
fn test_widget_placeholder() {
    let dir = TempDir::new().unwrap();
    let out = run_cli_success(dir.path(), &["widget", "placeholder", "--json"]);
    let entry: EntryJson = parse(&out);
    assert!(entry.placeholder);
    assert_eq!(entry.word.word, "Placeholder");
    assert_eq!(entry.word.definition, "A temporary replacement");
}

#[test]
fn test_missing_catalog_degrades_to_loading() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("absent.json");
    run_cli_success(dir.path(), &["config", "set", "catalog.path", missing.to_str().unwrap()]);

    let out = run_cli_success(dir.path(), &["today"]);
    assert!(out.contains("Loading..."));

    let out = run_cli_success(dir.path(), &["widget", "timeline", "--json"]);
    let timeline: TimelineJson = parse(&out);
    assert_eq!(timeline.source, "placeholder");
    assert!(timeline.entries[0].placeholder);
}

#[test]
fn test_bundled_catalog_count() {
    let dir = TempDir::new().unwrap();
    let out = run_cli_success(dir.path(), &["catalog", "count"]);
    let count: usize = out.trim().parse().unwrap();
    assert!(count > 0);
}

#[test]
fn test_config_set_catalog_reports_word_list() {
    let dir = TempDir::new().unwrap();
    let out = with_catalog(
        &dir,
        "words.json",
        r#"[{"word": "Laconic", "definition": "using few words"}]"#,
    );
    assert!(out.starts_with("ok: 1 words from"), "{out}");

    let out = with_catalog(&dir, "broken.json", "not json");
    assert!(out.contains("Word list is malformed"), "{out}");

    let out = run_cli_success(dir.path(), &["config", "set", "catalog.path", ""]);
    assert!(out.contains("bundled word list"), "{out}");
}

#[test]
fn test_config_rejects_unknown_key() {
    let dir = TempDir::new().unwrap();
    let (_, stderr, code) = run_cli(dir.path(), &["config", "set", "widget.nope", "1"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("unknown config key"));

    let (_, stderr, code) = run_cli(dir.path(), &["config", "get", "widget.nope"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("unknown config key: widget.nope"));

    let out = run_cli_success(dir.path(), &["config", "get", "widget.filter_known"]);
    assert_eq!(out.trim(), "true");
}
