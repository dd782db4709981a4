//! CLI integration tests
use predicates::prelude::*;
use tempfile::TempDir;

fn cmd() -> assert_cmd::Command {
    assert_cmd::cargo::cargo_bin_cmd!("geolens")
}

fn get_fixture_path(name: &str) -> String {
    format!("../../tests/fixtures/{}", name)
}

fn json_output(args: &[&str]) -> serde_json::Value {
    let output = cmd().args(args).output().unwrap();
    assert!(output.status.success());
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn test_cli_file_input() {
    cmd()
        .arg(get_fixture_path("faq_article.html"))
        .assert()
        .success()
        .stdout(predicate::str::contains("GEO Audit: https://localhost/"))
        .stdout(predicate::str::contains("Overall score:"));
}

#[test]
fn test_cli_stdin_input() {
    let html = std::fs::read_to_string(get_fixture_path("faq_article.html")).unwrap();
    cmd()
        .args(["-", "--url", "https://example.com/guide"])
        .write_stdin(html)
        .assert()
        .success()
        .stdout(predicate::str::contains("GEO Audit: https://example.com/guide"));
}

#[test]
fn test_cli_text_format_sections() {
    cmd()
        .args(["-f", "text", &get_fixture_path("faq_article.html")])
        .assert()
        .success()
        .stdout(predicate::str::contains("Technical SEO ("))
        .stdout(predicate::str::contains("AI Readiness ("))
        .stdout(predicate::str::contains("Recommendations"));
}

#[test]
fn test_cli_json_format() {
    let value = json_output(&["-f", "json", "--url", "https://example.com/", &get_fixture_path("faq_article.html")]);

    assert_eq!(value["url"], "https://example.com/");
    assert_eq!(value["domain"], "example.com");
    assert_eq!(value["rawData"]["hasFAQSchema"], true);
    assert_eq!(value["checks"]["metaTitle"]["status"], "pass");
    assert_eq!(value["checks"]["robotsTxt"]["status"], "fail");
    assert!(value["overallScore"].as_u64().unwrap() <= 100);
}

#[test]
fn test_cli_json_pretty() {
    cmd()
        .args(["-f", "json", "--pretty", &get_fixture_path("bare.html")])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("{\n"));
}

#[test]
fn test_cli_max_recommendations() {
    let value = json_output(&["-f", "json", "-n", "3", &get_fixture_path("bare.html")]);
    assert_eq!(value["recommendations"].as_array().unwrap().len(), 3);

    let value = json_output(&["-f", "json", "-n", "40", &get_fixture_path("bare.html")]);
    assert_eq!(value["recommendations"].as_array().unwrap().len(), 10);
}

#[test]
fn test_cli_output_file() {
    let tmp = TempDir::new().unwrap();
    let output = tmp.path().join("report.json");

    cmd()
        .args(["-f", "json", "-o", output.to_str().unwrap()])
        .arg(get_fixture_path("faq_article.html"))
        .assert()
        .success()
        .stderr(predicate::str::contains("Report written to"));

    let written = std::fs::read_to_string(&output).unwrap();
    let value: serde_json::Value = serde_json::from_str(&written).unwrap();
    assert!(value["categories"]["ai_readiness"]["score"].is_u64());
}

#[test]
fn test_cli_invalid_file() {
    cmd()
        .arg("nonexistent.html")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read file"));
}

#[test]
fn test_cli_invalid_page_url() {
    cmd()
        .args(["--url", "ftp://example.com/", &get_fixture_path("bare.html")])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid --url"));
}

#[test]
fn test_cli_invalid_format() {
    cmd().args(["-f", "yaml", &get_fixture_path("bare.html")]).assert().failure();
}

#[test]
fn test_cli_empty_stdin() {
    cmd().arg("-").write_stdin("").assert().success().stdout(predicate::str::contains("Overall score:"));
}

#[test]
fn test_cli_verbose() {
    cmd()
        .args(["-v", &get_fixture_path("nextjs_app.html")])
        .assert()
        .success()
        .stderr(predicate::str::contains("GeoLens"))
        .stderr(predicate::str::contains("Audit Summary"));
}

#[test]
fn test_cli_version() {
    cmd().arg("--version").assert().success().stdout(predicate::str::contains("geolens"));
}
