use assert_cmd::Command;
use iacr_dl::Record;
use predicates::prelude::*;

mod common;
use common::{basic_record, data};

fn iacr_dl() -> Command {
    let mut cmd = Command::cargo_bin("iacr-dl").unwrap();
    cmd.env("NO_COLOR", "1")
        .env_remove("IACR_DL_BASE_URL")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn fetch_and_parse_good() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/2019/579")
        .with_body(data("basic.html"))
        .create();

    let output = iacr_dl()
        .args(["--base-url", &server.url(), "https://ia.cr/2019/579"])
        .output()?;
    assert!(output.status.success(), "{output:?}");

    let record: Record = serde_json::from_slice(&output.stdout)?;
    assert_eq!(record, basic_record());
    assert!(
        output.stderr.is_empty(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    mock.assert();
    Ok(())
}

#[test]
fn base_url_from_environment() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/2019/579")
        .with_body(data("basic.html"))
        .create();

    iacr_dl()
        .env("IACR_DL_BASE_URL", server.url())
        .args(["--format", "bibtex", "2019/579"])
        .assert()
        .success()
        .stdout(data("basic.bib"));
    mock.assert();
    Ok(())
}

#[test]
fn fetch_and_parse_bad_status() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();
    let _mock = server
        .mock("GET", "/2009/123")
        .with_status(404)
        .with_body("not found")
        .create();

    let output = iacr_dl()
        .args(["--base-url", &server.url(), "2009/123"])
        .output()?;
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8(strip_ansi_escapes::strip(output.stderr))?;
    assert_eq!(stderr.trim_end().lines().count(), 1, "stderr=\n{stderr}");
    assert!(
        stderr.starts_with("error: failed to retrieve article 2009/123")
            && stderr.contains("404")
            && stderr.contains("not found"),
        "stderr=\n{stderr}"
    );
    Ok(())
}

#[test]
fn invalid_identifier_is_a_usage_error_before_any_fetch() {
    let mut server = mockito::Server::new();
    let mock = server.mock("GET", mockito::Matcher::Any).expect(0).create();

    for bad in ["abcdef", "20020/123", "1990-000", "200/123", "http://ia.cr/2019/0123"] {
        iacr_dl()
            .args(["--base-url", &server.url(), bad])
            .assert()
            .failure()
            .code(2)
            .stdout(predicate::str::is_empty())
            .stderr(predicate::str::contains("2009/123"));
    }
    mock.assert();
}

#[test]
fn wrong_argument_count_fails() {
    iacr_dl().assert().failure().code(2);
    iacr_dl().args(["1990/000", "extra"]).assert().failure().code(2);
}
