// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access.
//!
//! All runtime environment variables used by hookrelay are defined here.
//! Use these accessors instead of calling `std::env::var()` directly.

/// Generated env var name constants.
mod names {
    include!(concat!(env!("OUT_DIR"), "/env_names.rs"));
}

// Re-export name constants for callers that need the raw name string.
pub use names::*;

use std::path::PathBuf;

/// Whether a dispatch reentrancy marker is set to a non-empty value.
pub fn marker_set(name: &str) -> bool {
    std::env::var_os(name).is_some_and(|v| !v.is_empty())
}

/// `CLAUDE_CODE_CWD`: Working directory override for hook processes.
pub fn cwd_override() -> Option<PathBuf> {
    non_empty(names::CLAUDE_CODE_CWD).map(PathBuf::from)
}

/// `HOOKRELAY_HOOK_TIMEOUT_MS`: Per-hook execution timeout.
pub fn hook_timeout_ms() -> Option<u64> {
    non_empty(names::HOOKRELAY_HOOK_TIMEOUT_MS).and_then(|v| v.parse().ok())
}

/// `HOOKRELAY_LOG`: tracing filter directive. Logging is off when unset.
pub fn log_filter() -> Option<String> {
    non_empty(names::HOOKRELAY_LOG)
}

/// `HOOKRELAY_CAPTURE_FILE`: JSONL file that receives one record per dispatch.
pub fn capture_file() -> Option<PathBuf> {
    non_empty(names::HOOKRELAY_CAPTURE_FILE).map(PathBuf::from)
}

/// `CLAUDE_CONFIG_DIR`: Standard Claude Code config directory.
pub fn claude_config_dir() -> Option<PathBuf> {
    non_empty(names::CLAUDE_CONFIG_DIR).map(PathBuf::from)
}

/// `HOME`: User's home directory.
pub fn home() -> Option<PathBuf> {
    non_empty(names::HOME).map(PathBuf::from)
}

fn non_empty(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
