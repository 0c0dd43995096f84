// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

// Build scripts are expected to panic on failure.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::io::Write;

fn main() {
    let out_dir = std::env::var("OUT_DIR").unwrap();
    let path = std::path::Path::new(&out_dir).join("env_names.rs");
    let mut f = std::fs::File::create(path).unwrap();

    let vars = [
        (
            "HOOKRELAY_POST_TOOL_USE_RUNNING",
            "HOOKRELAY_POST_TOOL_USE_RUNNING",
        ),
        ("HOOKRELAY_STOP_RUNNING", "HOOKRELAY_STOP_RUNNING"),
        ("HOOKRELAY_CONFIG", "HOOKRELAY_CONFIG"),
        ("HOOKRELAY_HOOK_TIMEOUT_MS", "HOOKRELAY_HOOK_TIMEOUT_MS"),
        ("HOOKRELAY_LOG", "HOOKRELAY_LOG"),
        ("HOOKRELAY_CAPTURE_FILE", "HOOKRELAY_CAPTURE_FILE"),
        ("CLAUDE_CODE_CWD", "CLAUDE_CODE_CWD"),
        ("CLAUDE_CONFIG_DIR", "CLAUDE_CONFIG_DIR"),
        ("HOME", "HOME"),
    ];

    for (const_name, env_name) in vars {
        writeln!(f, "pub const {const_name}: &str = \"{env_name}\";").unwrap();
    }
}
