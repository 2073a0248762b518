//! Integration tests for which subcommands need the feed token.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

const CONFIG_VARS: &[&str] = &[
    "QUIVER_API_TOKEN",
    "CONGRESS_TRACKER_FEED_URL",
    "CONGRESS_TRACKER_WINDOW_DAYS",
    "CONGRESS_TRACKER_TIMEOUT_SECS",
    "CONGRESS_TRACKER_CACHE_PATH",
    "CONGRESS_TRACKER_LEGISLATOR_FILES",
    "CONGRESS_TRACKER_COMMITTEE_FILE",
    "CONGRESS_TRACKER_MAX_LEGISLATORS",
    "CONGRESS_TRACKER_TICKER_SEED",
];

fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .expect("CLI crate should be inside workspace")
        .to_path_buf()
}

/// Runs the binary from `dir` with every config variable unset.
fn run_cli(dir: &TempDir, args: &[&str]) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_congress-tracker"));
    for var in CONFIG_VARS {
        cmd.env_remove(var);
    }
    cmd.current_dir(dir.path())
        .args(args)
        .output()
        .expect("Failed to execute congress-tracker")
}

#[test]
fn test_lookup_runs_without_token() {
    let dir = TempDir::new().unwrap();
    let cache = dir.path().join("c.json");
    let cache_arg = cache.to_string_lossy().to_string();

    let output = run_cli(&dir, &["--cache-path", &cache_arg, "lookup", "aapl"]);
    assert!(
        output.status.success(),
        "lookup should not need a token: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(String::from_utf8_lossy(&output.stdout).contains("AAPL"));

    let written: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&cache).unwrap()).unwrap();
    assert_eq!(written["AAPL"]["industry"], "General");
}

#[test]
fn test_legislator_runs_without_token() {
    let dir = TempDir::new().unwrap();
    let fixtures = workspace_root().join("congress_tracker_lib/tests/fixtures");
    let legislators = fixtures.join("legislators-current.yaml");
    let committees = fixtures.join("committee-membership-current.yaml");

    let output = run_cli(
        &dir,
        &[
            "--legislators",
            &legislators.to_string_lossy(),
            "--committees",
            &committees.to_string_lossy(),
            "legislator",
            "e000001",
        ],
    );
    assert!(
        output.status.success(),
        "legislator should not need a token: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("E000001"));
    assert!(stdout.contains("CA"));
    assert!(stdout.contains("HSBA, HSIF"));
}

#[test]
fn test_status_requires_token() {
    let dir = TempDir::new().unwrap();
    let output = run_cli(&dir, &["status"]);
    assert!(!output.status.success(), "status should fail without a token");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("QUIVER_API_TOKEN"),
        "Should name the missing variable: {}",
        stderr
    );
}

#[test]
fn test_status_rejects_zero_timeout() {
    let dir = TempDir::new().unwrap();
    let output = run_cli(&dir, &["status", "--timeout-secs", "0"]);
    assert!(!output.status.success());
}
