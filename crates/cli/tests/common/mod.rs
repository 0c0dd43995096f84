// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(dead_code, deprecated)] // Command::cargo_bin is deprecated but still functional

//! Shared helpers for binary-level tests.

use assert_cmd::Command;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Variables the dispatcher reads; cleared so the host environment can't leak in.
const ISOLATED_VARS: &[&str] = &[
    "HOOKRELAY_POST_TOOL_USE_RUNNING",
    "HOOKRELAY_STOP_RUNNING",
    "HOOKRELAY_CONFIG",
    "HOOKRELAY_HOOK_TIMEOUT_MS",
    "HOOKRELAY_LOG",
    "HOOKRELAY_CAPTURE_FILE",
    "CLAUDE_CODE_CWD",
    "CLAUDE_CONFIG_DIR",
];

/// A `hookrelay` command with a clean environment
pub fn hookrelay() -> Command {
    let mut cmd = Command::cargo_bin("hookrelay").unwrap();
    for var in ISOLATED_VARS {
        cmd.env_remove(var);
    }
    cmd
}

/// Create a temporary registry file.
/// Detects JSON vs TOML content and uses the appropriate extension.
pub fn write_registry(content: &str) -> NamedTempFile {
    let is_json = content.trim().starts_with('{');

    let mut file = if is_json {
        tempfile::Builder::new().suffix(".json").tempfile().unwrap()
    } else {
        tempfile::Builder::new().suffix(".toml").tempfile().unwrap()
    };

    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

/// PostToolUse payload for `tool` running in `cwd`
pub fn post_tool_use_payload(tool: &str, cwd: &Path) -> String {
    serde_json::json!({
        "session_id": "test-session",
        "hook_event_name": "PostToolUse",
        "tool_name": tool,
        "cwd": cwd,
        "tool_input": { "file_path": "src/main.py" },
    })
    .to_string()
}

/// Stop payload for `session_id` running in `cwd`
pub fn stop_payload(session_id: &str, cwd: &Path) -> String {
    serde_json::json!({
        "session_id": session_id,
        "hook_event_name": "Stop",
        "cwd": cwd,
    })
    .to_string()
}
