//! CLI smoke tests for the emails-server binary
//!
//! These run the real binary: help output, configuration validation and a
//! short-lived server start against an in-memory database.

use std::process::{Command, Stdio};
use std::time::Duration;
use tempfile::TempDir;
use tokio::time::timeout;

/// Logging config that keeps tests from writing log files.
const QUIET_LOGGING: &str = r#"
logging:
  default:
    console_level: error
    file: ""
"#;

fn run_emails_server(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_emails-server"))
        .args(args)
        .env_remove("APP__PROFILE")
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .expect("Failed to execute emails-server")
}

async fn run_emails_server_with_timeout(
    args: &[&str],
    timeout_duration: Duration,
) -> Result<std::process::Output, Box<dyn std::error::Error>> {
    let mut cmd = tokio::process::Command::new(env!("CARGO_BIN_EXE_emails-server"));
    cmd.args(args)
        .env_remove("APP__PROFILE")
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    match timeout(timeout_duration, cmd.output()).await {
        Ok(result) => result.map_err(|e| e.into()),
        Err(elapsed) => Err(elapsed.into()),
    }
}

fn write_config(dir: &TempDir, name: &str, body: &str) -> String {
    let path = dir.path().join(name);
    std::fs::write(&path, format!("{body}\n{QUIET_LOGGING}")).expect("Failed to write config");
    path.to_str().unwrap().to_string()
}

#[test]
fn test_cli_help_command() {
    let output = run_emails_server(&["--help"]);

    assert!(output.status.success(), "Help command should succeed");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("emails-server"), "Should contain binary name");
    assert!(stdout.contains("Usage:"), "Should contain usage information");
    assert!(stdout.contains("run"), "Should contain 'run' subcommand");
    assert!(stdout.contains("check"), "Should contain 'check' subcommand");
    assert!(stdout.contains("--config"), "Should mention config option");
    assert!(stdout.contains("--mock"), "Should mention mock option");
    assert!(stdout.contains("--profile"), "Should mention profile option");
}

#[test]
fn test_cli_version_command() {
    let output = run_emails_server(&["--version"]);

    assert!(output.status.success(), "Version command should succeed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("emails-server"));
    assert!(stdout.chars().any(|c| c.is_ascii_digit()));
}

#[test]
fn test_cli_invalid_command() {
    let output = run_emails_server(&["invalid-command"]);

    assert!(!output.status.success(), "Invalid command should fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("error"), "Unexpected stderr: {stderr}");
}

#[test]
fn test_cli_config_validation_missing_file() {
    let output = run_emails_server(&["--config", "/nonexistent/config.yaml", "check"]);

    assert!(!output.status.success(), "Should fail with missing config");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Config file not found"),
        "Should mention config file issue: {stderr}"
    );
}

#[test]
fn test_cli_config_validation_invalid_yaml() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("invalid.yaml");
    std::fs::write(&config_path, "invalid: yaml: content: [unclosed")
        .expect("Failed to write file");

    let output = run_emails_server(&["--config", config_path.to_str().unwrap(), "check"]);

    assert!(!output.status.success(), "Should fail with invalid YAML");
}

#[test]
fn test_cli_config_validation_valid_config() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config = write_config(
        &temp_dir,
        "valid.yaml",
        r#"
database:
  url: "sqlite:///tmp/emails-check.db?mode=rwc"
"#,
    );

    let output = run_emails_server(&["--config", &config, "check"]);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        output.status.success(),
        "Should succeed with valid config: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(stdout.contains("Configuration check passed"));
    assert!(stdout.contains("server:"));
}

#[test]
fn test_cli_check_rejects_unsupported_backend() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config = write_config(
        &temp_dir,
        "mysql.yaml",
        r#"
database:
  url: "mysql://localhost/emails"
"#,
    );

    let output = run_emails_server(&["--config", &config, "check"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unsupported database type"), "{stderr}");
}

#[test]
fn test_cli_mock_flag() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config = write_config(
        &temp_dir,
        "mock.yaml",
        r#"
database:
  url: "mysql://localhost/nonexistent"
"#,
    );

    // --mock replaces the configured database, so the unsupported DSN is never looked at
    let output = run_emails_server(&["--config", &config, "--mock", "check"]);

    assert!(
        output.status.success(),
        "Should succeed with mock database: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

#[test]
fn test_cli_test_profile_uses_test_url() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config = write_config(
        &temp_dir,
        "profile.yaml",
        r#"
database:
  url: "mysql://localhost/unsupported"
  test_url: "sqlite::memory:"
"#,
    );

    let default_profile = run_emails_server(&["--config", &config, "check"]);
    assert!(!default_profile.status.success());

    let test_profile = run_emails_server(&["--config", &config, "--profile", "test", "check"]);
    assert!(
        test_profile.status.success(),
        "Test profile should use test_url: {}",
        String::from_utf8_lossy(&test_profile.stderr)
    );
}

#[test]
fn test_cli_unknown_profile_fails() {
    let output = run_emails_server(&["--mock", "--profile", "staging", "check"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unknown profile"), "{stderr}");
}

#[test]
fn test_cli_print_config_applies_port_override() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config = write_config(&temp_dir, "print.yaml", "profile: default");

    let output = run_emails_server(&["--config", &config, "--port", "9191", "--print-config"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("port: 9191"), "{stdout}");
}

#[test]
fn test_cli_subcommand_help() {
    let output = run_emails_server(&["run", "--help"]);
    assert!(output.status.success(), "Run subcommand help should succeed");
    assert!(String::from_utf8_lossy(&output.stdout).contains("Start the server"));

    let output = run_emails_server(&["check", "--help"]);
    assert!(output.status.success(), "Check subcommand help should succeed");
    assert!(String::from_utf8_lossy(&output.stdout).contains("Check configuration"));
}

#[tokio::test]
async fn test_cli_run_command_with_mock_database() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config = write_config(
        &temp_dir,
        "run.yaml",
        r#"
server:
  host: "127.0.0.1"
  port: 0
"#,
    );

    let result = run_emails_server_with_timeout(
        &["--config", &config, "--mock", "run"],
        Duration::from_secs(5),
    )
    .await;

    // Still running when the timeout fires means startup succeeded
    match result {
        Err(err) => assert!(
            err.to_string().contains("elapsed"),
            "Server failed to start: {err}"
        ),
        Ok(output) => panic!(
            "Server exited early: {}",
            String::from_utf8_lossy(&output.stderr)
        ),
    }
}

#[test]
fn test_cli_run_with_invalid_bind_address_fails() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config = write_config(
        &temp_dir,
        "badaddr.yaml",
        r#"
server:
  host: "not a host"
  port: 8087
"#,
    );

    let output = run_emails_server(&["--config", &config, "--mock", "run"]);

    assert!(!output.status.success(), "Should fail with invalid bind address");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid bind address"), "{stderr}");
}
