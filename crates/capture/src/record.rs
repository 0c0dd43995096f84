// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Captured dispatch data types.

use crate::micros;
use serde::{Deserialize, Serialize};
use std::time::{Duration, SystemTime};

/// One dispatcher invocation
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DispatchRecord {
    /// Dispatcher process id
    pub pid: u32,

    /// Wall-clock time the record was made
    pub timestamp: SystemTime,

    /// Time spent routing and running hooks
    #[serde(rename = "duration_us", with = "micros")]
    pub duration: Duration,

    /// Event category, e.g. "PostToolUse"
    pub event: String,

    /// Tool name the event was routed on, if any
    pub discriminator: Option<String>,

    /// Session the event belongs to, if the payload named one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,

    /// Hooks in the order their outcomes were aggregated
    pub hooks: Vec<HookRecord>,

    /// Final verdict
    pub verdict: CapturedVerdict,
}

impl DispatchRecord {
    /// Record for the current process, stamped now
    pub fn new(event: impl Into<String>, duration: Duration, verdict: CapturedVerdict) -> Self {
        Self {
            pid: std::process::id(),
            timestamp: SystemTime::now(),
            duration,
            event: event.into(),
            discriminator: None,
            session_id: None,
            hooks: Vec::new(),
            verdict,
        }
    }

    pub fn with_discriminator(mut self, discriminator: Option<String>) -> Self {
        self.discriminator = discriminator;
        self
    }

    pub fn with_session_id(mut self, session_id: Option<String>) -> Self {
        self.session_id = session_id;
        self
    }

    pub fn with_hooks(mut self, hooks: Vec<HookRecord>) -> Self {
        self.hooks = hooks;
        self
    }
}

/// One executed hook
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HookRecord {
    pub command: String,
    pub asyncable: bool,
    pub exit_code: i32,
    #[serde(rename = "duration_us", with = "micros")]
    pub duration: Duration,
    pub timed_out: bool,
    pub blocking: bool,
}

/// Captured verdict
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CapturedVerdict {
    /// All hooks ran, none asked to block
    Proceed,
    /// At least one hook exited with the blocking code
    Blocked { message: String },
    /// Nothing was executed
    Skipped { reason: String },
}

#[cfg(test)]
#[path = "record_tests.rs"]
mod tests;
