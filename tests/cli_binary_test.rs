//! Binary integration tests for CLI commands
//!
//! These tests run the actual routedefs binary to exercise the CLI code paths.
//! Each test points `ROUTEDEFS_CONFIG` at a temp file so the user's own
//! configuration never leaks in.

use std::fs;
use std::process::{Command, Output};
use tempfile::TempDir;

type TestResult = Result<(), Box<dyn std::error::Error>>;

fn routedefs_bin(config_dir: &TempDir) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_routedefs"));
    cmd.env("ROUTEDEFS_CONFIG", config_dir.path().join("config.json"));
    cmd.env_remove("DEBUG");
    cmd
}

fn run(args: &[&str]) -> Result<Output, Box<dyn std::error::Error>> {
    let config_dir = TempDir::new()?;
    Ok(routedefs_bin(&config_dir).args(args).output()?)
}

#[test]
fn test_cli_help() -> TestResult {
    let output = run(&["--help"])?;
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Route table"));
    assert!(stdout.contains("resolve"));
    Ok(())
}

#[test]
fn test_cli_version() -> TestResult {
    let output = run(&["--version"])?;
    assert!(output.status.success());
    Ok(())
}

#[test]
fn test_cli_invalid_argument_shows_help() -> TestResult {
    let output = run(&["--invalid-flag"])?;

    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("error:"));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage:"));
    Ok(())
}

#[test]
fn test_cli_resolve_repository_view() -> TestResult {
    let output = run(&[
        "resolve",
        "repository-view",
        "--repository-path",
        "acme/repo",
        "--git-reference",
        "main",
        "--resource-path",
        "src/a.ts",
    ])?;
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "/acme/repo//main/~/src/a.ts\n"
    );
    Ok(())
}

#[test]
fn test_cli_resolve_missing_parameter_fails() -> TestResult {
    let output = run(&[
        "resolve",
        "webhook-detail",
        "--repository-path",
        "acme/repo",
    ])?;
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("requires parameter `webhookId`"));
    Ok(())
}

#[test]
fn test_cli_resolve_unknown_route_fails() -> TestResult {
    let output = run(&["resolve", "toCODERepository"])?;
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown route `toCODERepository`"));
    Ok(())
}

#[test]
fn test_cli_resolve_uses_configured_base_path() -> TestResult {
    let config_dir = TempDir::new()?;
    fs::write(
        config_dir.path().join("config.json"),
        r#"{"base_path": "/code"}"#,
    )?;

    let output = routedefs_bin(&config_dir)
        .args(["resolve", "sign-in"])
        .output()?;
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "/code/signin\n");
    Ok(())
}

#[test]
fn test_cli_routes_lists_every_route() -> TestResult {
    let output = run(&["routes"])?;
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.lines().count(), 15);
    assert!(stdout.contains("settings-webhook-create"));
    assert!(stdout.contains("pullRequestSection"));
    Ok(())
}

#[test]
fn test_cli_patterns_json() -> TestResult {
    let output = run(&["patterns", "--json"])?;
    assert!(output.status.success());

    let table: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    let entries = table.as_array().ok_or("pattern table should be an array")?;
    assert_eq!(entries.len(), 15);
    assert_eq!(entries[0]["route"], "sign-in");
    assert_eq!(entries[0]["patterns"][0]["source"], "/signin");
    Ok(())
}

#[test]
fn test_cli_patterns_text() -> TestResult {
    let output = run(&["patterns"])?;
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("/:repositoryPath*/webhook/:webhookId"));
    Ok(())
}

#[test]
fn test_cli_check() -> TestResult {
    let output = run(&["check"])?;
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("consistent"));
    Ok(())
}

#[test]
fn test_cli_config_path_honors_env() -> TestResult {
    let config_dir = TempDir::new()?;
    let output = routedefs_bin(&config_dir)
        .args(["config", "--path"])
        .output()?;
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(
        stdout.trim(),
        config_dir.path().join("config.json").display().to_string()
    );
    Ok(())
}

#[test]
fn test_cli_config_show_defaults() -> TestResult {
    let output = run(&["config"])?;
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("base_path"));
    Ok(())
}
