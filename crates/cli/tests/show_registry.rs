// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

//! `show-registry` output.

mod common;

use common::{hookrelay, write_registry};
use predicates::prelude::*;

#[test]
fn test_builtin_registry_is_printed() {
    hookrelay()
        .arg("show-registry")
        .assert()
        .success()
        .stdout(predicate::str::contains("Write|Edit|MultiEdit"))
        .stdout(predicate::str::contains("hookrelay check-todos"))
        .stderr(predicate::str::contains(
            "post_tool_use [Write|Edit|MultiEdit]: 15 hooks",
        ))
        .stderr(predicate::str::contains("stop total: 1 hooks"));
}

#[test]
fn test_builtin_output_reloads() {
    let output = hookrelay()
        .arg("show-registry")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let registry = write_registry(&String::from_utf8(output).unwrap());

    hookrelay()
        .args(["show-registry", "--config"])
        .arg(registry.path())
        .assert()
        .success();
}

#[test]
fn test_loaded_registry_is_printed() {
    let registry = write_registry(
        r#"{"timeout_ms": 1000, "stop": [{"hooks": [{"command": "echo hi"}]}]}"#,
    );

    hookrelay()
        .args(["show-registry", "--config"])
        .arg(registry.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("timeout_ms = 1000"))
        .stdout(predicate::str::contains("echo hi"))
        .stdout(predicate::str::contains("post_tool_use").not())
        .stderr(predicate::str::contains("post_tool_use total: 0 hooks"));
}

#[test]
fn test_missing_file_is_an_error() {
    hookrelay()
        .args(["show-registry", "--config", "/nonexistent/hooks.toml"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error: Failed to read registry file"));
}
