//! End-to-end tests for the `hring` binary.

use anyhow::Result;
use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::tempdir;

use handle_ring::trace::{binary, text};

const EVICTION_TRACE: &str = "\
# four pushes on three slots
capacity 3
push 10
push 11
push 12
push 13
peek -1
pop
";

fn hring(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_hring"))
        .args(args)
        .output()
        .expect("failed to run hring")
}

fn stdout_lines(output: &Output) -> Vec<String> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(String::from)
        .collect()
}

fn path_str(path: &Path) -> &str {
    path.to_str().expect("temp path is not UTF-8")
}

#[test]
fn test_replay_prints_outcomes_and_summary() -> Result<()> {
    let dir = tempdir()?;
    let trace_path = dir.path().join("eviction.txt");
    fs::write(&trace_path, EVICTION_TRACE)?;

    let output = hring(&["replay", path_str(&trace_path), "--drain"]);
    assert!(output.status.success(), "replay failed: {:?}", output);

    let lines = stdout_lines(&output);
    assert_eq!(
        lines,
        vec![
            "     0  push 10 -> -",
            "     1  push 11 -> -",
            "     2  push 12 -> -",
            "     3  push 13 -> 10",
            "     4  peek -1 -> 13",
            "     5  pop -> 11",
            "6 ops on 3 slots, 1 evictions",
            "remaining: [12, 13]",
        ]
    );
    Ok(())
}

#[test]
fn test_replay_capacity_flag_overrides_trace() -> Result<()> {
    let dir = tempdir()?;
    let trace_path = dir.path().join("eviction.txt");
    fs::write(&trace_path, EVICTION_TRACE)?;

    let output = hring(&["replay", path_str(&trace_path), "-c", "4"]);
    assert!(output.status.success(), "replay failed: {:?}", output);

    let lines = stdout_lines(&output);
    assert_eq!(lines[3], "     3  push 13 -> -");
    assert_eq!(lines[5], "     5  pop -> 10");
    assert_eq!(
        lines.last().map(String::as_str),
        Some("6 ops on 4 slots, 0 evictions")
    );
    Ok(())
}

#[test]
fn test_replay_rejects_bad_capacity() -> Result<()> {
    let dir = tempdir()?;
    let trace_path = dir.path().join("eviction.txt");
    fs::write(&trace_path, EVICTION_TRACE)?;

    let output = hring(&["replay", path_str(&trace_path), "--capacity", "lots"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("--capacity must be a slot count"),
        "unexpected stderr: {}",
        stderr
    );

    let output = hring(&["replay", path_str(&trace_path), "--capacity", "0"]);
    assert!(!output.status.success());
    Ok(())
}

#[test]
fn test_replay_reports_missing_file() -> Result<()> {
    let dir = tempdir()?;
    let missing = dir.path().join("missing.txt");

    let output = hring(&["replay", path_str(&missing)]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("could not load trace"),
        "unexpected stderr: {}",
        stderr
    );
    Ok(())
}

#[test]
fn test_encode_writes_binary_and_text() -> Result<()> {
    let dir = tempdir()?;
    let input = dir.path().join("eviction.txt");
    let binary_out = dir.path().join("eviction.hrt");
    let text_out = dir.path().join("eviction.out.txt");
    fs::write(&input, EVICTION_TRACE)?;
    let expected = text::parse(EVICTION_TRACE)?;

    let output = hring(&["encode", path_str(&input), path_str(&binary_out)]);
    assert!(output.status.success(), "encode failed: {:?}", output);
    let bytes = fs::read(&binary_out)?;
    assert!(binary::is_binary(&bytes));
    assert_eq!(binary::decode(&bytes)?, expected);

    // binary back to text
    let output = hring(&[
        "encode",
        path_str(&binary_out),
        path_str(&text_out),
        "--text",
    ]);
    assert!(output.status.success(), "encode --text failed: {:?}", output);
    let rendered = fs::read_to_string(&text_out)?;
    assert_eq!(rendered, text::render(&expected));
    assert_eq!(text::parse(&rendered)?, expected);
    Ok(())
}

#[test]
fn test_rank_prints_preferred_first() {
    let output = hring(&[
        "rank",
        "10:btl.tcp.2.1.0",
        "50:btl.sm.1.0.3",
        "50:btl.tcp.1.0",
    ]);
    assert!(output.status.success(), "rank failed: {:?}", output);

    assert_eq!(
        stdout_lines(&output),
        vec![
            "50:btl.tcp.1.0  (release 0)",
            "50:btl.sm.1.0  (release 3)",
            "10:btl.tcp.2.1  (release 0)",
        ]
    );
}

#[test]
fn test_rank_rejects_malformed_items() {
    let output = hring(&["rank", "btl.tcp.1.0"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("could not parse component `btl.tcp.1.0`"),
        "unexpected stderr: {}",
        stderr
    );
}
