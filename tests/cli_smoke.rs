//! Smoke tests for the viewkit binary.
//!
//! Each test runs the compiled binary with an isolated config and log file so the
//! user's own settings never leak in.

use std::path::PathBuf;
use std::process::{Command, Output};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

/// Run the binary with `args`, pointing config and logs at throwaway locations.
fn run(test_name: &str, args: &[&str]) -> Output {
    let log_file = std::env::temp_dir()
        .join("viewkit_cli_smoke")
        .join(format!("{test_name}.log"));

    Command::new(env!("CARGO_BIN_EXE_viewkit"))
        .args(args)
        .arg("--log-file")
        .arg(&log_file)
        .env("VIEWKIT_CONFIG", "/nonexistent/viewkit/config.toml")
        .env_remove("VIEWKIT_FRAME_INTERVAL_MS")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute binary")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

// ===== check =====

#[test]
fn check_accepts_valid_cpf() {
    let output = run("check_valid_cpf", &["check", "cpf", "52998224725"]);

    assert!(output.status.success(), "valid CPF should exit 0");
    assert_eq!(stdout(&output).trim(), "valid");
}

#[test]
fn check_rejects_cpf_with_wrong_check_digit() {
    let output = run("check_invalid_cpf", &["check", "cpf", "52998224726"]);

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout(&output).trim(), "invalid");
}

#[test]
fn check_accepts_punctuated_cnpj() {
    let output = run("check_cnpj", &["check", "cnpj", "11.222.333/0001-81"]);

    assert!(output.status.success());
    assert_eq!(stdout(&output).trim(), "valid");
}

#[test]
fn check_email() {
    let ok = run("check_email_ok", &["check", "email", "ana@example.com"]);
    let bad = run("check_email_bad", &["check", "email", "ana@"]);

    assert!(ok.status.success());
    assert!(!bad.status.success());
}

// ===== mask / money =====

#[test]
fn mask_formats_cpf_pattern() {
    let output = run("mask_cpf", &["mask", "999.999.999-99", "52998224725"]);

    assert!(output.status.success());
    assert_eq!(stdout(&output).trim(), "529.982.247-25");
}

#[test]
fn money_formats_cents() {
    let output = run("money", &["money", "123456"]);

    assert!(output.status.success());
    assert_eq!(stdout(&output).trim(), "1.234,56");
}

// ===== paginate =====

#[test]
fn paginate_loads_every_page() {
    let file = fixture("customers.json");
    let output = run(
        "paginate_all",
        &[
            "paginate",
            file.to_str().expect("fixture path is UTF-8"),
            "--page-size",
            "3",
            "--frame-interval-ms",
            "5",
        ],
    );

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let out = stdout(&output);
    assert!(
        out.lines().any(|line| line.starts_with("render ")),
        "expected at least one render line, got: {out}"
    );
    assert_eq!(out.lines().last(), Some("7 rows in 3 page(s)"));
}

#[test]
fn paginate_stops_at_page_limit() {
    let file = fixture("customers.json");
    let output = run(
        "paginate_limit",
        &[
            "paginate",
            file.to_str().expect("fixture path is UTF-8"),
            "--pages",
            "2",
            "--page-size",
            "2",
            "--frame-interval-ms",
            "5",
        ],
    );

    assert!(output.status.success());
    assert_eq!(stdout(&output).lines().last(), Some("4 rows in 2 page(s)"));
}

#[test]
fn paginate_reports_malformed_json() {
    let file = fixture("truncated.json");
    let output = run(
        "paginate_malformed",
        &["paginate", file.to_str().expect("fixture path is UTF-8")],
    );

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("InvalidJson"), "stderr: {stderr}");
}

#[test]
fn zero_page_size_is_rejected() {
    let output = run("zero_page_size", &["money", "1", "--page-size", "0"]);

    assert!(!output.status.success());
}
