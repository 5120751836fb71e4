//! Integration tests for the CLI binary.
//!
//! Drives the `sssa` binary against the demo catalog with a throwaway
//! data directory.
//!
//! This test is registered as a [[test]] in the sssa-cli crate so that
//! CARGO_BIN_EXE_sssa is available.

use std::path::Path;
use std::process::{Command, Output};

const CATALOG: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../demos/catalog.json");

/// Get a Command pointing to the `sssa` binary.
fn sssa_binary() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_sssa"));
    cmd.env_remove("SSSA_HOME").env_remove("SSSA_CATALOG");
    cmd
}

/// Run `sssa` with the demo catalog and the given data directory.
fn run(data_dir: &Path, args: &[&str]) -> Output {
    sssa_binary()
        .arg("--catalog")
        .arg(CATALOG)
        .arg("--data-dir")
        .arg(data_dir)
        .args(args)
        .output()
        .expect("failed to execute sssa")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn assert_success(output: &Output, what: &str) {
    assert!(
        output.status.success(),
        "{what} should succeed, stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

#[test]
fn cli_responds_to_help() {
    let output = sssa_binary()
        .arg("--help")
        .output()
        .expect("failed to execute sssa --help");

    assert_success(&output, "sssa --help");
    let stdout = stdout(&output);
    assert!(
        stdout.contains("sssa") || stdout.contains("Usage"),
        "sssa --help output should contain usage information, got: {stdout}"
    );
}

#[test]
fn cli_responds_to_version() {
    let output = sssa_binary()
        .arg("--version")
        .output()
        .expect("failed to execute sssa --version");

    assert_success(&output, "sssa --version");
    assert!(stdout(&output).contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn cli_exits_with_error_on_unknown_flag() {
    let output = sssa_binary()
        .arg("--nonexistent-flag")
        .output()
        .expect("failed to execute sssa");

    assert!(
        !output.status.success(),
        "sssa with unknown flag should exit with non-zero status"
    );
}

#[test]
fn cli_requires_a_catalog() {
    let dir = tempfile::tempdir().unwrap();
    let output = sssa_binary()
        .arg("--data-dir")
        .arg(dir.path())
        .arg("catalog")
        .output()
        .expect("failed to execute sssa");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("error:"), "got: {stderr}");
}

#[test]
fn cli_lists_catalog() {
    let dir = tempfile::tempdir().unwrap();
    let output = run(dir.path(), &["catalog"]);
    assert_success(&output, "sssa catalog");

    let out = stdout(&output);
    for category in ["Engineering", "Design", "Data"] {
        assert!(out.contains(category), "missing {category} in: {out}");
    }
    assert!(out.contains("4 questions"));
}

#[test]
fn cli_catalog_verbose_shows_groups_and_exposure() {
    let dir = tempfile::tempdir().unwrap();
    let output = run(dir.path(), &["--verbose", "catalog"]);
    assert_success(&output, "sssa --verbose catalog");

    let out = stdout(&output);
    assert!(out.contains("group: Building software"), "got: {out}");
    assert!(out.contains("Question exposure"), "got: {out}");
    assert!(out.contains("x1.00"), "got: {out}");
}

#[test]
fn cli_quick_answer_then_score() {
    let dir = tempfile::tempdir().unwrap();

    let first = run(dir.path(), &["quick", "answer", "--question", "1", "--choice", "left"]);
    assert_success(&first, "quick answer");
    assert!(stdout(&first).contains("Answered 1/4"));

    let second = run(dir.path(), &["quick", "answer", "--question", "3", "--choice", "l"]);
    assert_success(&second, "quick answer");

    let next = run(dir.path(), &["quick", "question"]);
    assert_success(&next, "quick question");
    assert!(stdout(&next).contains("Question 2"));

    let score = run(dir.path(), &["quick", "score"]);
    assert_success(&score, "quick score");
    let out = stdout(&score);
    assert!(out.contains("Backend engineer"), "got: {out}");
    assert!(out.contains("Share token: 1,2,4"), "got: {out}");
}

#[test]
fn cli_quick_answer_rejects_unknown_question() {
    let dir = tempfile::tempdir().unwrap();
    let output = run(dir.path(), &["quick", "answer", "--question", "99", "--choice", "right"]);
    assert!(!output.status.success());
}

#[test]
fn cli_quick_reset_clears_progress() {
    let dir = tempfile::tempdir().unwrap();
    assert_success(
        &run(dir.path(), &["quick", "answer", "--question", "2", "--choice", "neutral"]),
        "quick answer",
    );
    assert_success(&run(dir.path(), &["quick", "reset"]), "quick reset");

    let score = run(dir.path(), &["quick", "score"]);
    assert_success(&score, "quick score");
    assert!(stdout(&score).contains("No answers yet"));
}

#[test]
fn cli_quick_decode_skips_unknown_roles() {
    let dir = tempfile::tempdir().unwrap();
    let output = run(dir.path(), &["quick", "decode", "3, 42,,1"]);
    assert_success(&output, "quick decode");

    let out = stdout(&output);
    assert!(out.contains("1. Product designer"), "got: {out}");
    assert!(out.contains("2. Backend engineer"), "got: {out}");
}

#[test]
fn cli_rate_summary_share_open() {
    let dir = tempfile::tempdir().unwrap();

    assert_success(
        &run(
            dir.path(),
            &["rate", "--category", "Engineering", "--skill", "1", "--axis", "1", "--level", "3"],
        ),
        "rate",
    );

    let summary = run(dir.path(), &["summary", "--top", "1"]);
    assert_success(&summary, "summary");
    let out = stdout(&summary);
    assert!(out.contains("Engineering"));
    assert!(out.contains("3.00"), "got: {out}");
    assert!(out.contains("Top 1 categories"), "got: {out}");

    let share = run(dir.path(), &["share"]);
    assert_success(&share, "share");
    let url = stdout(&share).trim().to_string();
    assert!(url.starts_with("http://localhost:3000/results#"), "got: {url}");

    // Open from a fresh data directory so the numbers come from the link.
    let other = tempfile::tempdir().unwrap();
    let opened = run(other.path(), &["open", &url]);
    assert_success(&opened, "open");
    assert!(stdout(&opened).contains("3.00"));
}

#[test]
fn cli_open_falls_back_to_saved_ratings() {
    let dir = tempfile::tempdir().unwrap();
    let output = run(dir.path(), &["open", "not-a-real-token"]);
    assert_success(&output, "open");
    assert!(stdout(&output).contains("Could not read that link"));
}

#[test]
fn cli_rate_rejects_out_of_range_level() {
    let dir = tempfile::tempdir().unwrap();
    let output = run(
        dir.path(),
        &["rate", "--category", "Design", "--skill", "1", "--axis", "1", "--level", "9"],
    );
    assert!(!output.status.success());
}

#[test]
fn cli_share_without_ratings_fails() {
    let dir = tempfile::tempdir().unwrap();
    assert!(!run(dir.path(), &["share"]).status.success());
}

#[test]
fn cli_clear_category() {
    let dir = tempfile::tempdir().unwrap();
    assert_success(
        &run(
            dir.path(),
            &["rate", "--category", "Data", "--skill", "2", "--axis", "2", "--level", "4"],
        ),
        "rate",
    );
    assert_success(&run(dir.path(), &["clear", "--category", "Data"]), "clear");
    assert!(!run(dir.path(), &["share"]).status.success());
}

#[test]
fn cli_rate_verbose_prints_level_text() {
    let dir = tempfile::tempdir().unwrap();
    let output = run(
        dir.path(),
        &["-v", "rate", "--category", "Engineering", "--skill", "1", "--axis", "1", "--level", "3"],
    );
    assert_success(&output, "rate -v");
    let out = stdout(&output);
    assert!(out.contains("Resolves merge conflicts unaided"), "got: {out}");
    assert!(out.contains("Engineering"), "got: {out}");
}

#[test]
fn cli_rate_refuses_to_overwrite_corrupt_ratings() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("assessments.json");
    std::fs::write(&path, b"{ nope").unwrap();
    let output = run(
        dir.path(),
        &["rate", "--category", "Design", "--skill", "1", "--axis", "1", "--level", "2"],
    );
    assert!(!output.status.success());
    assert_eq!(std::fs::read(&path).unwrap(), b"{ nope");
}

#[test]
fn cli_recommend_by_background() {
    let dir = tempfile::tempdir().unwrap();

    let output = run(dir.path(), &["recommend", "--user-type", "liberal-arts"]);
    assert_success(&output, "recommend liberal-arts");
    let out = stdout(&output);
    assert!(out.contains("Shaping the product"), "got: {out}");
    assert!(out.contains("Working with data"), "got: {out}");
    assert!(!out.contains("Building software"), "got: {out}");

    let output = run(
        dir.path(),
        &["recommend", "--user-type", "science", "--science-type", "operations"],
    );
    assert_success(&output, "recommend science operations");
    let out = stdout(&output);
    assert!(out.contains("Building software"), "got: {out}");
    assert!(out.contains("Working with data"), "got: {out}");
    assert!(!out.contains("Shaping the product"), "got: {out}");

    let output = run(dir.path(), &["recommend", "--user-type", "arts"]);
    assert!(!output.status.success());
}
