use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn strategies_lists_chain_in_priority_order() {
    let mut cmd = Command::cargo_bin("pagescribe").unwrap();
    cmd.arg("strategies")
        .assert()
        .success()
        .stdout(predicate::str::contains("track-tags"))
        .stdout(predicate::str::contains("media-embed"))
        .stdout(predicate::str::contains("inline-json"));
}

#[test]
fn extract_rejects_invalid_url() {
    let mut cmd = Command::cargo_bin("pagescribe").unwrap();
    cmd.args(["extract", "not-a-url"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid URL format"));
}

#[test]
fn extract_rejects_non_http_scheme() {
    let mut cmd = Command::cargo_bin("pagescribe").unwrap();
    cmd.args(["extract", "ftp://example.com/page"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("HTTP or HTTPS"));
}

#[test]
fn extract_requires_a_url_argument() {
    let mut cmd = Command::cargo_bin("pagescribe").unwrap();
    cmd.arg("extract").assert().failure();
}
