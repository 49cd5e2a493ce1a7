//! E2E CLI tests for `quorum authority`, `quorum benford` and `quorum audit`.
//!
//! Each test runs the `quorum` binary as a subprocess in an isolated temp
//! directory. Tests cover text, pretty and JSON output as well as the error
//! path (stderr, exit status, error codes).

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::path::Path;
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Test Harness
// ---------------------------------------------------------------------------

/// Build a Command targeting the `quorum` binary, rooted in `dir`.
fn quorum_cmd(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("quorum").expect("quorum binary must exist");
    cmd.current_dir(dir);
    // Suppress tracing output that goes to stderr.
    cmd.env("QUORUM_LOG", "error");
    cmd.env_remove("FORMAT");
    cmd
}

fn run_json(dir: &Path, args: &[&str]) -> Value {
    let output = quorum_cmd(dir)
        .args(args)
        .args(["--format", "json"])
        .output()
        .expect("quorum should not crash");
    assert!(
        output.status.success(),
        "quorum {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout should be valid JSON")
}

fn write_file(dir: &Path, name: &str, content: &str) -> String {
    let path = dir.join(name);
    std::fs::write(&path, content).expect("write fixture");
    path.display().to_string()
}

// ---------------------------------------------------------------------------
// quorum authority
// ---------------------------------------------------------------------------

#[test]
fn authority_demo_json_ranks_chief_strategist_first() {
    let dir = TempDir::new().expect("tempdir");
    let json = run_json(dir.path(), &["authority"]);

    assert_eq!(json["dataset"], "demo");
    assert_eq!(json["converged"], true);
    assert_eq!(json["stats"]["node_count"], 15);
    assert_eq!(json["ranking"][0]["id"], "Chief Strategist");

    let leaders = json["leaders"].as_array().expect("leaders array");
    assert_eq!(leaders.len(), 4);

    let total: f64 = json["ranking"]
        .as_array()
        .expect("ranking array")
        .iter()
        .map(|row| row["score"].as_f64().expect("score"))
        .sum();
    assert!((total - 1.0).abs() < 1e-6, "total={total}");
}

#[test]
fn authority_reads_relationship_file() {
    let dir = TempDir::new().expect("tempdir");
    let input = write_file(
        dir.path(),
        "rels.json",
        r#"[{"source": "A", "target": "B", "kind": "x"}, {"source": "B", "target": "C", "kind": "y"}]"#,
    );
    let json = run_json(dir.path(), &["authority", "--input", &input]);
    assert_eq!(json["ranking"][0]["id"], "A");
    assert_eq!(json["ranking"][2]["id"], "C");
}

#[test]
fn authority_pretty_output_has_sections() {
    let dir = TempDir::new().expect("tempdir");
    quorum_cmd(dir.path())
        .args(["authority", "--format", "pretty"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Authority Ranking"))
        .stdout(predicate::str::contains("Leaders (score > 0.080)"))
        .stdout(predicate::str::contains("Chief Strategist"));
}

#[test]
fn authority_threshold_flag_limits_leaders() {
    let dir = TempDir::new().expect("tempdir");
    let json = run_json(dir.path(), &["authority", "--threshold", "0.15"]);
    let leaders = json["leaders"].as_array().expect("leaders array");
    assert_eq!(leaders.len(), 1);
    assert_eq!(leaders[0]["id"], "Chief Strategist");
}

#[test]
fn authority_missing_target_fails_with_data_format_code() {
    let dir = TempDir::new().expect("tempdir");
    let input = write_file(dir.path(), "bad.json", r#"[{"source": "A"}]"#);
    quorum_cmd(dir.path())
        .args(["authority", "--input", &input, "--format", "text"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("E2001"))
        .stderr(predicate::str::contains("target"));
}

#[test]
fn authority_missing_file_fails_with_read_code() {
    let dir = TempDir::new().expect("tempdir");
    let output = quorum_cmd(dir.path())
        .args(["authority", "--input", "nope.json", "--format", "json"])
        .output()
        .expect("quorum should not crash");
    assert!(!output.status.success());
    let err: Value = serde_json::from_slice(&output.stderr).expect("stderr JSON");
    assert_eq!(err["error"]["error_code"], "E5001");
}

// ---------------------------------------------------------------------------
// quorum benford
// ---------------------------------------------------------------------------

#[test]
fn benford_engineered_sample_is_anomalous() {
    let dir = TempDir::new().expect("tempdir");
    let json = run_json(dir.path(), &["benford", "--synthetic", "engineered"]);
    assert_eq!(json["anomalous"], true);
    assert_eq!(json["values"], 5000);
    assert_eq!(json["digits"].as_array().expect("digits").len(), 9);
}

#[test]
fn benford_organic_sample_is_consistent() {
    let dir = TempDir::new().expect("tempdir");
    let json = run_json(dir.path(), &["benford", "--synthetic", "organic"]);
    assert_eq!(json["anomalous"], false);
    assert!(json["deviation"].as_f64().expect("deviation") < 2.0);
}

#[test]
fn benford_reads_sample_file_with_comments() {
    let dir = TempDir::new().expect("tempdir");
    let input = write_file(dir.path(), "sample.txt", "# totals\n1\n20\n\n300\n");
    let json = run_json(dir.path(), &["benford", "--input", &input]);
    assert_eq!(json["values"], 3);
    assert_eq!(json["dropped"], 0);
}

#[test]
fn benford_rejects_zero_unless_dropped() {
    let dir = TempDir::new().expect("tempdir");
    let input = write_file(dir.path(), "sample.txt", "12\n0\n7\n");

    quorum_cmd(dir.path())
        .args(["benford", "--input", &input, "--format", "text"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("E2002"));

    let json = run_json(
        dir.path(),
        &["benford", "--input", &input, "--drop-non-positive"],
    );
    assert_eq!(json["values"], 2);
    assert_eq!(json["dropped"], 1);
}

#[test]
fn benford_non_integer_line_fails_with_parse_code() {
    let dir = TempDir::new().expect("tempdir");
    let input = write_file(dir.path(), "sample.txt", "12\ntwelve\n");
    quorum_cmd(dir.path())
        .args(["benford", "--input", &input, "--format", "text"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("E5002"))
        .stderr(predicate::str::contains("line 2"));
}

#[test]
fn benford_requires_a_sample_source() {
    let dir = TempDir::new().expect("tempdir");
    quorum_cmd(dir.path()).args(["benford"]).assert().failure();
}

// ---------------------------------------------------------------------------
// quorum audit and config
// ---------------------------------------------------------------------------

#[test]
fn audit_text_summarizes_both_diagnostics() {
    let dir = TempDir::new().expect("tempdir");
    quorum_cmd(dir.path())
        .args(["audit", "--format", "text"])
        .assert()
        .success()
        .stdout(predicate::str::contains("authority converged=true"))
        .stdout(predicate::str::contains("synthetic organic"))
        .stdout(predicate::str::contains("synthetic engineered"));
}

#[test]
fn audit_json_flags_engineered_sample() {
    let dir = TempDir::new().expect("tempdir");
    let json = run_json(dir.path(), &["audit"]);
    let samples = json["samples"].as_array().expect("samples");
    assert_eq!(samples.len(), 2);
    assert_eq!(samples[0]["anomalous"], false);
    assert_eq!(samples[1]["anomalous"], true);
}

#[test]
fn project_config_changes_leader_threshold() {
    let dir = TempDir::new().expect("tempdir");
    std::fs::create_dir_all(dir.path().join(".quorum")).expect("mkdir");
    write_file(
        dir.path(),
        ".quorum/config.toml",
        "[authority]\nleader_threshold = 0.15\n",
    );
    let json = run_json(dir.path(), &["authority"]);
    assert_eq!(json["threshold"], 0.15);
    assert_eq!(json["leaders"].as_array().expect("leaders").len(), 1);
}

#[test]
fn malformed_config_fails_with_config_code() {
    let dir = TempDir::new().expect("tempdir");
    let config = write_file(dir.path(), "bad.toml", "[authority\n");
    quorum_cmd(dir.path())
        .args(["audit", "--config", &config, "--format", "text"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("E1001"));
}

#[test]
fn invalid_damping_fails_with_config_code() {
    let dir = TempDir::new().expect("tempdir");
    let config = write_file(dir.path(), "q.toml", "[authority]\ndamping = 1.5\n");
    quorum_cmd(dir.path())
        .args(["authority", "--config", &config, "--format", "text"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("E1002"));
}
