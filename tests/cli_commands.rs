//! Tests for the gatecfg binary.
//!
//! These run the actual executable against a temp integrations file.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    fn file(&self) -> PathBuf {
        self.dir.path().join("integrations.yaml")
    }

    fn settings(&self) -> PathBuf {
        self.dir.path().join("config.toml")
    }

    fn run(&self, args: &[&str]) -> Output {
        gatecfg_cmd(&self.file(), &self.settings())
            .args(args)
            .output()
            .expect("Failed to execute command")
    }
}

fn gatecfg_cmd(file: &Path, settings: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_gatecfg"));
    cmd.arg("--file")
        .arg(file)
        .arg("--config")
        .arg(settings)
        .env_remove("GATECFG_FILE")
        .env_remove("GATECFG_LOG");
    cmd
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn list_on_fresh_workspace_is_empty() {
    let ws = Workspace::new();
    let output = ws.run(&["list"]);

    assert!(output.status.success());
    assert_eq!(stdout(&output), "");
    assert!(!ws.file().exists());
}

#[test]
fn add_then_list() {
    let ws = Workspace::new();

    let output = ws.run(&["slack", "-token", "xoxb-1", "-name", "Ops"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "added ops\n");

    let output = ws.run(&["github", "-token", "ghp"]);
    assert!(output.status.success());

    assert_eq!(stdout(&ws.run(&["list"])), "ops\ngithub\n");
}

#[test]
fn duplicate_add_exits_with_error() {
    let ws = Workspace::new();
    assert!(ws.run(&["slack", "-token", "a"]).status.success());

    let output = ws.run(&["slack", "-token", "b", "-name", "SLACK"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Error: integration 'slack' already exists"));
    assert_eq!(stdout(&ws.run(&["list"])), "slack\n");
}

#[test]
fn update_upserts() {
    let ws = Workspace::new();

    let output = ws.run(&["update", "gitlab", "-token", "one"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "added gitlab\n");

    let output = ws.run(&["update", "gitlab", "-token", "two", "-domain", "git.acme.io"]);
    assert_eq!(stdout(&output), "updated gitlab\n");

    let shown = stdout(&ws.run(&["show", "gitlab"]));
    assert!(shown.contains("destination: https://git.acme.io/api/v4"));
    assert!(shown.contains("value: two"));
}

#[test]
fn delete_missing_succeeds() {
    let ws = Workspace::new();
    let output = ws.run(&["delete", "ghost"]);

    assert!(output.status.success());
    assert_eq!(stdout(&output), "ghost not found, nothing deleted\n");
}

#[test]
fn delete_is_case_insensitive() {
    let ws = Workspace::new();
    ws.run(&["openai", "-token", "sk"]);

    let output = ws.run(&["delete", "OpenAI"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "deleted openai\n");
    assert_eq!(stdout(&ws.run(&["list"])), "");
}

#[test]
fn unknown_provider_exits_with_error() {
    let ws = Workspace::new();
    let output = ws.run(&["myspace", "-token", "x"]);

    assert_eq!(output.status.code(), Some(1));
    let err = stderr(&output);
    assert!(err.contains("unknown provider 'myspace'"));
    assert!(err.contains("slack"));
    assert!(!ws.file().exists());
}

#[test]
fn missing_required_flag_exits_with_error() {
    let ws = Workspace::new();
    let output = ws.run(&["datadog", "-api-key", "a"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("datadog: missing required flag: -app-key"));
    assert!(!ws.file().exists());
}

#[test]
fn provider_help_exits_zero() {
    let ws = Workspace::new();
    let output = ws.run(&["jira", "-h"]);

    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("Usage of jira:"));
    assert!(out.contains("-domain string (required)"));
}

#[test]
fn corrupt_file_exits_with_error() {
    let ws = Workspace::new();
    std::fs::write(ws.file(), "integrations: [ {name: ").unwrap();

    let output = ws.run(&["list"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Failed to parse integrations file"));
}

#[test]
fn io_failure_reports_underlying_cause() {
    let ws = Workspace::new();
    std::fs::create_dir(ws.file()).unwrap();

    let output = ws.run(&["list"]);

    assert_eq!(output.status.code(), Some(1));
    let err = stderr(&output);
    assert!(err.contains("Error: Failed to read integrations file"), "{}", err);
    assert!(err.contains("os error"), "{}", err);
}

#[test]
fn settings_file_supplies_store_path() {
    let ws = Workspace::new();
    let configured = ws.dir.path().join("from-settings.yaml");
    std::fs::write(
        ws.settings(),
        format!("[store]\npath = {:?}\n", configured.display().to_string()),
    )
    .unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_gatecfg"))
        .arg("--config")
        .arg(ws.settings())
        .args(["sendgrid", "-token", "sg"])
        .env_remove("GATECFG_FILE")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(configured.exists());
}

#[test]
fn list_json() {
    let ws = Workspace::new();
    ws.run(&["asana", "-token", "a"]);
    ws.run(&["hubspot", "-token", "h"]);

    assert_eq!(stdout(&ws.run(&["list", "--json"])), "[\"asana\",\"hubspot\"]\n");
}

#[test]
fn providers_command_lists_catalog() {
    let ws = Workspace::new();
    let out = stdout(&ws.run(&["providers"]));
    assert!(out.lines().next().unwrap_or("").starts_with("anthropic"));
    assert!(out.contains("stripe"));
}
