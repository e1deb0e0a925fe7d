//! Integration tests for the onevm command surface.
//!
//! Argument parsing, help, and version. Nothing here reaches a daemon.

#![allow(clippy::expect_used)]

use assert_cmd::Command;
use predicates::prelude::*;

fn onevm() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("onevm"));
    cmd.env("NO_COLOR", "1");
    cmd
}

// --- Help and version ---

#[test]
fn test_cli_no_args_shows_help_and_exits_two() {
    onevm()
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Drive OpenNebula VMs over XML-RPC"));
}

#[test]
fn test_cli_help_lists_commands() {
    let assert = onevm().arg("--help").assert().success();
    let out = String::from_utf8_lossy(&assert.get_output().stdout).into_owned();
    for cmd in [
        "create", "reboot", "poweroff", "undeploy", "delete", "resume", "suspend", "recover",
        "lookup", "image", "config", "version",
    ] {
        assert!(out.contains(cmd), "help is missing {cmd}:\n{out}");
    }
}

#[test]
fn test_version_command_shows_version() {
    onevm()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("onevm 0.1.0"));
}

#[test]
fn test_version_command_json_outputs_valid_json() {
    let assert = onevm().args(["version", "--json"]).assert().success();
    let parsed: serde_json::Value =
        serde_json::from_slice(&assert.get_output().stdout).expect("valid json");
    assert_eq!(parsed["version"], "0.1.0");
}

// --- Argument validation ---

#[test]
fn test_create_requires_template_and_name() {
    onevm()
        .arg("create")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--template"));
}

#[test]
fn test_create_rejects_malformed_vnet() {
    onevm()
        .args(["create", "--template", "t", "--name", "n", "--vnet", "eth0"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("expected KEY=VALUE"));
}

#[test]
fn test_lifecycle_requires_numeric_id() {
    onevm()
        .args(["reboot", "web"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn test_resume_has_no_hard_variant() {
    onevm().args(["resume", "1", "--hard"]).assert().code(2);
}

#[test]
fn test_image_help_shows_subcommands() {
    onevm()
        .args(["image", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("save-as"))
        .stdout(predicate::str::contains("delete"));
}
