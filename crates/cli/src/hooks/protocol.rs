// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Hook event types and the stdin event envelope.

use crate::env;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Name of the dispatcher binary, used to recognize self-referencing hooks.
pub const BIN_NAME: &str = "hookrelay";

/// Hook event categories handled by the dispatcher
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HookEvent {
    /// A tool invocation completed
    PostToolUse,
    /// The agent is about to stop responding
    Stop,
}

impl HookEvent {
    /// Get the wire-format event name matching real Claude Code's protocol.
    pub fn wire_name(&self) -> &'static str {
        match self {
            HookEvent::PostToolUse => "PostToolUse",
            HookEvent::Stop => "Stop",
        }
    }

    /// CLI subcommand that dispatches this event.
    pub fn subcommand(&self) -> &'static str {
        match self {
            HookEvent::PostToolUse => "post-tool-use",
            HookEvent::Stop => "stop",
        }
    }

    /// Environment marker set on hook children while this event is dispatched.
    pub fn reentrancy_var(&self) -> &'static str {
        match self {
            HookEvent::PostToolUse => env::HOOKRELAY_POST_TOOL_USE_RUNNING,
            HookEvent::Stop => env::HOOKRELAY_STOP_RUNNING,
        }
    }

    /// Substring identifying a hook command that would re-invoke this dispatcher.
    pub fn self_marker(&self) -> String {
        format!("{} {}", BIN_NAME, self.subcommand())
    }

    /// Whether hooks for this event are selected by tool name.
    pub fn is_routed(&self) -> bool {
        matches!(self, HookEvent::PostToolUse)
    }

    /// Whether child stdout is relayed to the dispatcher's stdout.
    pub fn forwards_stdout(&self) -> bool {
        matches!(self, HookEvent::Stop)
    }
}

impl std::fmt::Display for HookEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// Event payload received on stdin.
///
/// The raw bytes are forwarded verbatim to every hook; the few fields the
/// dispatcher needs are extracted on a best-effort basis. Input that is not
/// a JSON object simply yields no fields.
#[derive(Clone, Debug)]
pub struct EventEnvelope {
    raw: Arc<[u8]>,
    tool_name: Option<String>,
    cwd: Option<PathBuf>,
    session_id: Option<String>,
    hook_event_name: Option<String>,
}

impl EventEnvelope {
    /// Wrap raw stdin bytes.
    pub fn from_bytes(raw: impl Into<Arc<[u8]>>) -> Self {
        let raw = raw.into();
        let value: Option<Value> = serde_json::from_slice(&raw).ok();
        let field = |name: &str| {
            value
                .as_ref()
                .and_then(|v| v.get(name))
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        Self {
            tool_name: field("tool_name"),
            cwd: field("cwd").map(PathBuf::from),
            session_id: field("session_id"),
            hook_event_name: field("hook_event_name"),
            raw,
        }
    }

    /// Raw payload bytes as received.
    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    /// Tool name discriminator, if present.
    pub fn tool_name(&self) -> Option<&str> {
        self.tool_name.as_deref()
    }

    /// Working directory reported by the host, if present.
    pub fn cwd(&self) -> Option<&Path> {
        self.cwd.as_deref()
    }

    /// Session identifier, if present.
    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    /// Event name the host stamped on the payload, if present.
    pub fn hook_event_name(&self) -> Option<&str> {
        self.hook_event_name.as_deref()
    }

    /// Working directory for hook processes.
    ///
    /// The payload's `cwd` wins, then the `CLAUDE_CODE_CWD` override, then
    /// the dispatcher's own working directory.
    pub fn resolve_cwd(&self) -> PathBuf {
        self.cwd
            .clone()
            .or_else(env::cwd_override)
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

#[cfg(test)]
#[path = "protocol_tests.rs"]
mod tests;
