#![allow(clippy::unwrap_used, clippy::expect_used)]

//! CLI smoke tests for the armkit-server binary

use std::process::{Command, Stdio};

use tempfile::TempDir;

fn run_armkit_server(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_armkit-server"))
        .args(args)
        .env_remove("RUST_LOG")
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .expect("Failed to execute armkit-server")
}

#[test]
fn help_lists_subcommands_and_options() {
    let output = run_armkit_server(&["--help"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage:"));
    assert!(stdout.contains("run"));
    assert!(stdout.contains("check"));
    assert!(stdout.contains("--config"));
    assert!(stdout.contains("--print-config"));
}

#[test]
fn version_names_the_binary() {
    let output = run_armkit_server(&["--version"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("armkit-server"));
}

#[test]
fn missing_config_file_is_an_error() {
    let output = run_armkit_server(&["--config", "/definitely/not/here.yaml", "check"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("config file does not exist"));
}

#[test]
fn check_accepts_a_valid_config_and_applies_port_override() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("armkit.yaml");
    std::fs::write(
        &config,
        "server:\n  bind_addr: 127.0.0.1:9000\npagination:\n  min_top: 2\n  max_top: 50\n",
    )
    .unwrap();

    let output = run_armkit_server(&[
        "--config",
        config.to_str().unwrap(),
        "--port",
        "9100",
        "check",
    ]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(output.status.success(), "stderr: {stderr}");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Configuration is valid"));
    assert!(stdout.contains("9100"));
    assert!(stdout.contains("max_top: 50"));
}

#[test]
fn check_rejects_inconsistent_pagination_bounds() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("armkit.yaml");
    std::fs::write(&config, "pagination:\n  min_top: 100\n  max_top: 10\n").unwrap();

    let output = run_armkit_server(&["--config", config.to_str().unwrap(), "check"]);
    assert!(!output.status.success());
}

#[test]
fn print_config_shows_defaults() {
    let output = run_armkit_server(&["--print-config"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Effective configuration:"));
    assert!(stdout.contains("request_timeout_secs: 30"));
}
