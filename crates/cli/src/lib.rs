// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! hookrelay
//!
//! Dispatches coding-agent hook events (`PostToolUse`, `Stop`) to a registry
//! of shell hooks. Read-only checkers run concurrently, file rewriters run
//! one at a time, and any hook exiting 2 with a message blocks the agent
//! with that message.

pub mod cli;
pub mod config;
pub mod env;
pub mod hooks;
pub mod logging;
pub mod output;
pub mod runtime;
pub mod todos;

/// Re-exported capture types from the hookrelay-capture crate.
pub mod capture {
    pub use hookrelay_capture::{CapturedVerdict, DispatchLog, DispatchRecord, HookRecord};
}
