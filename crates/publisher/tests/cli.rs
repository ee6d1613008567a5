// ABOUTME: Integration tests for the telepage CLI binary.
// ABOUTME: Tests the dry-run page plan and publishing against a mock Telegraph API.

use assert_cmd::Command;
use httpmock::prelude::*;
use predicates::prelude::*;
use serde_json::{json, Value};
use std::fs;
use tempfile::TempDir;

fn telepage_cmd() -> Command {
    let mut cmd = Command::cargo_bin("telepage").unwrap();
    cmd.env_remove("TELEGRAPH_ACCESS_TOKEN");
    cmd
}

fn write_html(dir: &TempDir, html: &str) -> std::path::PathBuf {
    let path = dir.path().join("article.html");
    fs::write(&path, html).unwrap();
    path
}

#[test]
fn dry_run_prints_plan() {
    let temp_dir = TempDir::new().unwrap();
    let html = format!("<p>{}</p><p>{}</p>", "a".repeat(80), "b".repeat(80));
    let path = write_html(&temp_dir, &html);

    let output = telepage_cmd()
        .arg(&path)
        .arg("--dry-run")
        .arg("--limit")
        .arg("150")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let plan: Value = serde_json::from_slice(&output).unwrap();
    let pages = plan["pages"].as_array().unwrap();
    assert_eq!(pages.len(), 2);
    assert_eq!(pages[0]["index"], 0);
    assert_eq!(pages[0]["nodes"], 1);
    assert_eq!(pages[0]["bytes"], 107);
    assert!(pages[1]["html"].as_str().unwrap().starts_with("<p>bbb"));
}

#[test]
fn dry_run_reads_stdin() {
    telepage_cmd()
        .arg("--dry-run")
        .write_stdin("<h3>Heading</h3><script>x()</script>")
        .assert()
        .success()
        .stdout(predicate::str::contains("<h3>Heading</h3>"));
}

#[test]
fn publishes_to_api() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/createPage")
            .body_includes(r#""access_token":"secret""#)
            .body_includes(r#""title":"Article""#);
        then.status(200)
            .json_body(json!({"ok": true, "result": {"url": "https://telegra.ph/Article-01"}}));
    });

    let temp_dir = TempDir::new().unwrap();
    let path = write_html(&temp_dir, "<p>Hi there</p>");

    telepage_cmd()
        .arg(&path)
        .arg("--title")
        .arg("Article")
        .arg("--token")
        .arg("secret")
        .arg("--api-url")
        .arg(server.base_url())
        .assert()
        .success()
        .stdout(predicate::str::contains("https://telegra.ph/Article-01"));

    mock.assert();
}

#[test]
fn service_error_exits_nonzero() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/createPage");
        then.status(200)
            .json_body(json!({"ok": false, "error": "CONTENT_TOO_BIG"}));
    });

    telepage_cmd()
        .arg("--title")
        .arg("Big")
        .arg("--token")
        .arg("secret")
        .arg("--api-url")
        .arg(server.base_url())
        .write_stdin("<p>too big</p>")
        .assert()
        .failure()
        .stderr(predicate::str::contains("CONTENT_TOO_BIG"));
}

#[test]
fn missing_token_exits_nonzero() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path("/createPage");
        then.status(200);
    });

    telepage_cmd()
        .arg("--title")
        .arg("No token")
        .arg("--api-url")
        .arg(server.base_url())
        .write_stdin("<p>x</p>")
        .assert()
        .failure()
        .stderr(predicate::str::contains("access token"));

    mock.assert_hits(0);
}

#[test]
fn single_publishes_one_page_without_footer() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/createPage")
            .body_excludes("Published with telepage");
        then.status(200)
            .json_body(json!({"ok": true, "result": {"url": "https://telegra.ph/Solo-01"}}));
    });

    telepage_cmd()
        .arg("--single")
        .arg("--title")
        .arg("Solo")
        .arg("--token")
        .arg("secret")
        .arg("--api-url")
        .arg(server.base_url())
        .write_stdin(format!("<p>{}</p><p>{}</p>", "a".repeat(80), "b".repeat(80)))
        .arg("--limit")
        .arg("100")
        .assert()
        .success()
        .stdout(predicate::str::contains("https://telegra.ph/Solo-01"));

    mock.assert_hits(1);
}

#[test]
fn timing_is_reported_on_early_failure() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("missing.html");

    telepage_cmd()
        .arg(&missing)
        .arg("--timing")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error reading input"))
        .stderr(predicate::str::contains("elapsed:"));
}
