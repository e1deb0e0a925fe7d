//! End-to-end: the `onevm` binary against a mock XML-RPC daemon.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use mockito::{Matcher, Server};
use predicates::prelude::*;
use tempfile::TempDir;

use crate::support;

/// Binary wired to `server`, with an empty config file and `--yes` semantics
/// left to each test.
fn onevm(server: &Server, config_dir: &TempDir) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("onevm"));
    cmd.env("NO_COLOR", "1")
        .env("ONEVM_CONFIG", config_dir.path().join("config.yaml"))
        .env("ONEVM_ENDPOINT", format!("{}/RPC2", server.url()))
        .env("ONEVM_USERNAME", "alice")
        .env("ONEVM_PASSWORD", "pw")
        .env_remove("ONEVM_TIMEOUT_SECS");
    cmd
}

fn json_stdout(assert: &assert_cmd::assert::Assert) -> serde_json::Value {
    serde_json::from_slice(&assert.get_output().stdout).expect("valid json")
}

#[test]
fn reboot_hard_sends_hard_verb() {
    let mut server = Server::new();
    let dir = TempDir::new().unwrap();
    let mock = server
        .mock("POST", "/RPC2")
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex(r"<methodName>one\.vm\.action</methodName>".to_string()),
            Matcher::Regex("<string>alice:pw</string>".to_string()),
            Matcher::Regex("<string>reboot-hard</string>".to_string()),
            Matcher::Regex("<int>42</int>".to_string()),
        ]))
        .with_status(200)
        .with_body(support::success(&support::int(42)))
        .create();

    let assert = onevm(&server, &dir)
        .args(["reboot", "42", "--hard", "--json"])
        .assert()
        .success();

    let out = json_stdout(&assert);
    assert_eq!(out["operation"], "reboot-hard");
    assert_eq!(out["result"], 42);
    mock.assert();
}

#[test]
fn delete_with_yes_sends_terminate() {
    let mut server = Server::new();
    let dir = TempDir::new().unwrap();
    let mock = server
        .mock("POST", "/RPC2")
        .match_body(Matcher::Regex("<string>terminate</string>".to_string()))
        .with_status(200)
        .with_body(support::success(&support::int(7)))
        .create();

    onevm(&server, &dir)
        .args(["delete", "7", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("terminate: 7"));
    mock.assert();
}

#[test]
fn image_delete_with_yes_removes_image() {
    let mut server = Server::new();
    let dir = TempDir::new().unwrap();
    let mock = server
        .mock("POST", "/RPC2")
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex(r"<methodName>one\.image\.delete</methodName>".to_string()),
            Matcher::Regex("<int>5</int>".to_string()),
        ]))
        .with_status(200)
        .with_body(support::success(&support::int(5)))
        .create();

    onevm(&server, &dir)
        .args(["image", "delete", "5", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("image delete: 5"));
    mock.assert();
}

#[test]
fn recover_sends_force_delete_code() {
    let mut server = Server::new();
    let dir = TempDir::new().unwrap();
    let mock = server
        .mock("POST", "/RPC2")
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex(r"<methodName>one\.vm\.recover</methodName>".to_string()),
            Matcher::Regex("<int>12</int></value></param><param><value><int>3</int>".to_string()),
        ]))
        .with_status(200)
        .with_body(support::success(&support::int(12)))
        .create();

    onevm(&server, &dir)
        .args(["recover", "12", "--yes"])
        .assert()
        .success();
    mock.assert();
}

#[test]
fn rejected_action_exits_nonzero_with_daemon_message() {
    let mut server = Server::new();
    let dir = TempDir::new().unwrap();
    server
        .mock("POST", "/RPC2")
        .with_status(200)
        .with_body(support::failure(
            "[one.vm.action] Wrong state to perform action",
            2048,
        ))
        .create();

    let assert = onevm(&server, &dir)
        .args(["resume", "5", "--json"])
        .assert()
        .failure();

    let out = json_stdout(&assert);
    assert_eq!(out["code"], "RPC_FAULT");
    assert!(
        out["message"]
            .as_str()
            .unwrap()
            .contains("Wrong state to perform action")
    );
}

#[test]
fn lookup_prints_first_match() {
    let mut server = Server::new();
    let dir = TempDir::new().unwrap();
    let pool = "<VM_POOL>\
        <VM><ID>31</ID><NAME>web</NAME><STATE>3</STATE><LCM_STATE>3</LCM_STATE></VM>\
        <VM><ID>35</ID><NAME>web</NAME><STATE>3</STATE><LCM_STATE>3</LCM_STATE></VM>\
        </VM_POOL>";
    server
        .mock("POST", "/RPC2")
        .with_status(200)
        .with_body(support::success(&support::document(pool)))
        .create();

    let assert = onevm(&server, &dir)
        .args(["lookup", "web", "--json"])
        .assert()
        .success();

    let out = json_stdout(&assert);
    assert_eq!(out["id"], 31);
    assert_eq!(out["name"], "web");
}

#[test]
fn lookup_without_match_reports_no_vm() {
    let mut server = Server::new();
    let dir = TempDir::new().unwrap();
    server
        .mock("POST", "/RPC2")
        .with_status(200)
        .with_body(support::success(&support::document("<VM_POOL/>")))
        .create();

    onevm(&server, &dir)
        .args(["lookup", "web"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no vm found, did you launch them?"));
}

#[test]
fn create_fetches_then_instantiates() {
    let mut server = Server::new();
    let dir = TempDir::new().unwrap();
    let pool = "<VMTEMPLATE_POOL><VMTEMPLATE><ID>9</ID><NAME>debian</NAME>\
        <TEMPLATE><CPU>1</CPU><NIC><NETWORK>public</NETWORK></NIC></TEMPLATE>\
        </VMTEMPLATE></VMTEMPLATE_POOL>";
    let fetch = server
        .mock("POST", "/RPC2")
        .match_body(Matcher::Regex(
            r"<methodName>one\.templatepool\.info</methodName>".to_string(),
        ))
        .with_status(200)
        .with_body(support::success(&support::document(pool)))
        .create();
    let instantiate = server
        .mock("POST", "/RPC2")
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex(r"<methodName>one\.template\.instantiate</methodName>".to_string()),
            Matcher::Regex("<int>9</int>".to_string()),
            Matcher::Regex("<string>web-1</string>".to_string()),
            Matcher::Regex("<boolean>0</boolean>".to_string()),
            Matcher::Regex("&lt;CPU&gt;4&lt;/CPU&gt;".to_string()),
            Matcher::Regex("&lt;NETWORK&gt;net-7&lt;/NETWORK&gt;".to_string()),
        ]))
        .with_status(200)
        .with_body(support::success(&support::int(101)))
        .create();

    let assert = onevm(&server, &dir)
        .args([
            "create", "--template", "debian", "--name", "web-1", "--cpu", "4", "--vnet",
            "eth0=net-7", "--json",
        ])
        .assert()
        .success();

    assert_eq!(json_stdout(&assert)["result"], 101);
    fetch.assert();
    instantiate.assert();
}
