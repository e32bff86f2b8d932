//! End-to-end tests for the two binaries.

use assert_cmd::assert::OutputAssertExt;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;
use wiremock::matchers::{method, path, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[test]
fn test_downloader_help_lists_options() {
    Command::cargo_bin("wayback-downloader")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--url-file"))
        .stdout(predicate::str::contains("--download-dir"))
        .stdout(predicate::str::contains("--threads"));
}

#[test]
fn test_downloader_without_input_exits_cleanly() {
    Command::cargo_bin("wayback-downloader")
        .unwrap()
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("No URLs"));
}

#[test]
fn test_unreadable_url_file_aborts_with_message() {
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let missing = temp_dir.path().join("missing.txt");

    Command::cargo_bin("wayback-downloader")
        .unwrap()
        .arg("--url-file")
        .arg(&missing)
        .assert()
        .success()
        .stdout(predicate::str::contains("Failed to read URL file"));
}

#[test]
fn test_query_tool_requires_dork() {
    Command::cargo_bin("cdx-query")
        .unwrap()
        .assert()
        .failure()
        .stderr(predicate::str::contains("DORK"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_query_tool_prints_url_then_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/cdx/search/cdx"))
        .and(query_param("output", "text"))
        .respond_with(ResponseTemplate::new(200).set_body_string("http://example.com/robots.txt"))
        .expect(1)
        .mount(&server)
        .await;

    let endpoint = format!("{}/cdx/search/cdx", server.uri());
    let output = tokio::task::spawn_blocking(move || {
        Command::cargo_bin("cdx-query")
            .unwrap()
            .args(["example.com/*", "--output", "text", "--cdx-url", endpoint.as_str()])
            .output()
            .expect("failed to run binary")
    })
    .await
    .unwrap();

    output
        .assert()
        .success()
        .stdout(predicate::str::contains("Query URL:"))
        .stdout(predicate::str::contains(
            "output=text&url=example.com%2F%2A&limit=10000&fl=original&collapse=urlkey",
        ))
        .stdout(predicate::str::contains("http://example.com/robots.txt"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_query_tool_reports_errors_without_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(403).set_body_string("forbidden body"))
        .mount(&server)
        .await;

    let endpoint = format!("{}/cdx/search/cdx", server.uri());
    let output = tokio::task::spawn_blocking(move || {
        Command::cargo_bin("cdx-query")
            .unwrap()
            .args(["example.com", "--cdx-url", endpoint.as_str()])
            .output()
            .expect("failed to run binary")
    })
    .await
    .unwrap();

    output
        .assert()
        .success()
        .stdout(predicate::str::contains("HTTP Error 403"))
        .stdout(predicate::str::contains("forbidden body").not());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_downloader_reads_urls_from_stdin() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/cdx/search/cdx"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .expect(2)
        .mount(&server)
        .await;

    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let endpoint = format!("{}/cdx/search/cdx", server.uri());
    let root = server.uri();
    let dir = temp_dir.path().to_path_buf();
    let output = tokio::task::spawn_blocking(move || {
        Command::cargo_bin("wayback-downloader")
            .unwrap()
            .args(["--cdx-url", endpoint.as_str(), "--archive-root", root.as_str()])
            .arg("--download-dir")
            .arg(&dir)
            .write_stdin("example.com\n\nexample.org\n")
            .output()
            .expect("failed to run binary")
    })
    .await
    .unwrap();

    output
        .assert()
        .success()
        .stdout(predicate::str::contains("Reading URLs from stdin..."))
        .stdout(predicate::str::contains("No archived captures found for example.com."))
        .stdout(predicate::str::contains("No archived captures found for example.org."));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_downloader_prints_start_and_outcome_per_capture() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/cdx/search/cdx"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"[["timestamp","original"],["20200101000000","http://example.com/a.pdf"]]"#,
        ))
        .mount(&server)
        .await;
    Mock::given(method("HEAD"))
        .and(path_regex("^/web/20200101000000id_/"))
        .respond_with(ResponseTemplate::new(200).insert_header("Content-Type", "application/pdf"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path_regex("^/web/20200101000000id_/"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"%PDF".to_vec()))
        .expect(1)
        .mount(&server)
        .await;

    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let endpoint = format!("{}/cdx/search/cdx", server.uri());
    let root = server.uri();
    let dir = temp_dir.path().to_path_buf();
    let output = tokio::task::spawn_blocking(move || {
        Command::cargo_bin("wayback-downloader")
            .unwrap()
            .args(["example.com", "--cdx-url", endpoint.as_str(), "--archive-root", root.as_str()])
            .arg("--download-dir")
            .arg(&dir)
            .output()
            .expect("failed to run binary")
    })
    .await
    .unwrap();

    output
        .clone()
        .assert()
        .success()
        .stdout(predicate::str::contains("Downloading raw file: "))
        .stdout(predicate::str::contains("/web/20200101000000id_/http://example.com/a.pdf -> "))
        .stdout(predicate::str::contains("Saved raw file to: "))
        .stdout(predicate::str::contains("20200101000000_a.pdf"));

    let stdout = String::from_utf8_lossy(&output.stdout);
    let started = stdout.find("Downloading raw file: ").unwrap();
    let saved = stdout.find("Saved raw file to: ").unwrap();
    assert!(started < saved, "start line should precede the outcome:\n{}", stdout);
    assert_eq!(
        std::fs::read(temp_dir.path().join("20200101000000_a.pdf")).unwrap(),
        b"%PDF"
    );
}
