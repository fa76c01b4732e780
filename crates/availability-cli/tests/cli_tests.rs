//! Integration tests for the `availability` CLI binary.
//!
//! These tests use `assert_cmd` and `predicates` to exercise the check, holiday
//! and split subcommands through the actual binary. Holiday lookups are pointed
//! at a `wiremock` server standing in for Calendarific.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Helper: path to the three-country fixture.
fn ranges_json_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/ranges.json")
}

/// Helper: path to the fixture whose first range starts on a Saturday.
fn weekend_json_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/weekend.json")
}

/// Helper: a command with a clean environment so a developer's `.env` or key
/// cannot leak into the assertions.
fn availability() -> Command {
    let mut cmd = Command::cargo_bin("availability").unwrap();
    cmd.env_remove("CALENDARIFIC_API_KEY")
        .env_remove("CALENDARIFIC_BASE_URL")
        .env_remove("HOLIDAY_TIMEOUT_SECS")
        .current_dir(env!("CARGO_MANIFEST_DIR"));
    cmd
}

/// Helper: a mock directory that knows one US holiday and nothing else.
async fn directory() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(path("/holidays"))
        .and(query_param("country", "US"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": {"holidays": [{"date": {"iso": "2022-12-23"}}]}
        })))
        .mount(&server)
        .await;
    Mock::given(path("/holidays"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"response": {"holidays": []}})),
        )
        .mount(&server)
        .await;
    server
}

// ─────────────────────────────────────────────────────────────────────────────
// check subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn check_file_to_stdout() {
    let server = directory().await;
    let base_url = server.uri();

    tokio::task::spawn_blocking(move || {
        availability()
            .args(["check", "-i", ranges_json_path(), "--base-url", base_url.as_str()])
            .assert()
            .success()
            .stdout(predicate::str::contains(r#""from": "2022-05-02T08:00:00.0Z""#))
            .stdout(predicate::str::contains(r#""to": "2022-05-02T09:00:00.0Z""#));
    })
    .await
    .unwrap();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn check_stdin_to_file() {
    let server = directory().await;
    let base_url = server.uri();
    let output_path = std::env::temp_dir().join("availability-test-check-output.json");
    let _ = std::fs::remove_file(&output_path);
    let output = output_path.to_string_lossy().to_string();

    let input = r#"[{"from":"2022-05-02T09:00:00.0+08:00","to":"2022-05-02T17:00:00.0+08:00","cc":"SG"}]"#;

    tokio::task::spawn_blocking(move || {
        availability()
            .args(["check", "-o", output.as_str(), "--base-url", base_url.as_str()])
            .write_stdin(input)
            .assert()
            .success();
    })
    .await
    .unwrap();

    let content = std::fs::read_to_string(&output_path).expect("output file must exist");
    let slot: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(
        slot,
        json!({"from": "2022-05-02T01:00:00.0Z", "to": "2022-05-02T09:00:00.0Z"})
    );
    let _ = std::fs::remove_file(&output_path);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn check_reports_holiday_conflict() {
    let server = directory().await;
    let base_url = server.uri();
    let input = r#"[
        {"from":"2022-12-23T09:00:00.0-06:00","to":"2022-12-23T17:00:00.0-06:00","cc":"MX"},
        {"from":"2022-12-23T09:00:00.0-05:00","to":"2022-12-23T17:00:00.0-05:00","cc":"US"}
    ]"#;

    tokio::task::spawn_blocking(move || {
        availability()
            .args(["check", "--base-url", base_url.as_str()])
            .write_stdin(input)
            .assert()
            .failure()
            .stderr(predicate::str::contains("The date 2022-12-23 is a holiday in US."));
    })
    .await
    .unwrap();
}

#[test]
fn check_reports_weekend_without_network() {
    // The weekend rule runs before any holiday lookup, so no directory is needed.
    availability()
        .args(["check", "-i", weekend_json_path(), "--base-url", "http://127.0.0.1:9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "The date 2022-12-24 falls on a weekend.",
        ));
}

#[test]
fn check_rejects_empty_array() {
    availability()
        .arg("check")
        .write_stdin("[]")
        .assert()
        .failure()
        .stderr(predicate::str::contains("The array is empty."));
}

#[test]
fn check_rejects_invalid_json() {
    availability()
        .arg("check")
        .write_stdin("{not json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input is not valid JSON"));
}

#[test]
fn check_reports_field_errors() {
    availability()
        .arg("check")
        .write_stdin(r#"[{"from":"","to":"2022-05-02T17:00:00+08:00","cc":"ZZ"}]"#)
        .assert()
        .failure()
        .stderr(predicate::str::contains("[0].from: Not a valid datetime."))
        .stderr(predicate::str::contains("[0].cc: Must be one of:"));
}

#[test]
fn check_missing_file_fails() {
    availability()
        .args(["check", "-i", "/nonexistent/ranges.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read file"));
}

// ─────────────────────────────────────────────────────────────────────────────
// holiday subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn holiday_reports_holiday_and_working_day() {
    let server = directory().await;
    let base_url = server.uri();

    tokio::task::spawn_blocking(move || {
        availability()
            .args(["holiday", "--cc", "US", "--date", "2022-12-23", "--base-url", base_url.as_str()])
            .assert()
            .success()
            .stdout("Holiday\n");

        availability()
            .args(["holiday", "--cc", "SG", "--date", "2022-12-23", "--base-url", base_url.as_str()])
            .assert()
            .success()
            .stdout("Not holiday\n");
    })
    .await
    .unwrap();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn holiday_surfaces_upstream_error() {
    let server = MockServer::start().await;
    Mock::given(path("/holidays"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"error": "Invalid API key"})))
        .mount(&server)
        .await;
    let base_url = server.uri();

    tokio::task::spawn_blocking(move || {
        availability()
            .args(["holiday", "--cc", "US", "--date", "2022-12-23", "--base-url", base_url.as_str()])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid API key"));
    })
    .await
    .unwrap();
}

#[test]
fn holiday_rejects_unsupported_country() {
    availability()
        .args(["holiday", "--cc", "ZZ", "--date", "2022-12-23"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Must be one of:"));
}

// ─────────────────────────────────────────────────────────────────────────────
// split subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn split_two_day_range() {
    availability()
        .args([
            "split",
            "--from",
            "2022-05-02T09:00:00+08:00",
            "--to",
            "2022-05-03T17:00:00+08:00",
        ])
        .assert()
        .success()
        .stdout(
            "2022-05-02T09:00:00+08:00 2022-05-02T23:59:59+08:00\n\
             2022-05-03T00:00:00+08:00 2022-05-03T17:00:00+08:00\n",
        );
}

#[test]
fn split_rejects_inverted_range() {
    availability()
        .args([
            "split",
            "--from",
            "2022-05-03T09:00:00+08:00",
            "--to",
            "2022-05-02T09:00:00+08:00",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--from must be earlier than --to"));
}

// ─────────────────────────────────────────────────────────────────────────────
// General
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn no_subcommand_prints_usage() {
    availability()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn version_flag() {
    availability()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("availability"));
}
