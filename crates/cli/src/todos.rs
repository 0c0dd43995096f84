// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Built-in Stop hook that refuses to stop while todos remain open.
//!
//! Claude CLI stores each session's todo list in
//! `<config-dir>/todos/{sessionId}-agent-{sessionId}.json` as a JSON array of
//! `{content, status, activeForm}` objects.

use crate::env;
use crate::hooks::EventEnvelope;
use serde::Serialize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Statuses that still need work
pub const UNRESOLVED_STATUSES: [&str; 2] = ["pending", "in_progress"];

#[derive(Debug, Error)]
pub enum TodoError {
    #[error("Failed to read todo file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse todo file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Todo file is not a JSON array")]
    NotAList,
}

/// Todo item in Claude CLI format
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClaudeTodoItem {
    pub content: String,
    /// "pending", "in_progress", or "completed"
    pub status: String,
    pub active_form: Option<String>,
}

impl ClaudeTodoItem {
    /// Read one array entry. Non-objects are `None`; odd field types
    /// degrade to empty values instead of failing the whole file.
    pub fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        let text = |key: &str| object.get(key).and_then(Value::as_str);
        let content = match object.get("content") {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        };
        Some(Self {
            content,
            status: text("status").unwrap_or_default().to_string(),
            active_form: text("activeForm").map(str::to_string),
        })
    }

    pub fn is_unresolved(&self) -> bool {
        UNRESOLVED_STATUSES.contains(&self.status.as_str())
    }
}

/// Stop-hook response that keeps the agent working
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StopDecision {
    pub decision: &'static str,
    pub reason: String,
}

impl StopDecision {
    pub fn block(reason: impl Into<String>) -> Self {
        Self {
            decision: "block",
            reason: reason.into(),
        }
    }
}

/// Claude config directory: `CLAUDE_CONFIG_DIR`, else `~/.claude`.
pub fn config_dir() -> Option<PathBuf> {
    env::claude_config_dir().or_else(|| env::home().map(|h| h.join(".claude")))
}

/// Path of a session's todo file
pub fn todo_file(config_dir: &Path, session_id: &str) -> PathBuf {
    config_dir
        .join("todos")
        .join(format!("{session_id}-agent-{session_id}.json"))
}

/// Load a todo file. A missing file is `Ok(None)`.
///
/// Only the top level must be well formed. Entries that are not objects
/// are skipped.
pub fn load(path: &Path) -> Result<Option<Vec<ClaudeTodoItem>>, TodoError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    parse(&content).map(Some)
}

/// Parse the contents of a todo file
pub fn parse(content: &str) -> Result<Vec<ClaudeTodoItem>, TodoError> {
    let Value::Array(entries) = serde_json::from_str(content)? else {
        return Err(TodoError::NotAList);
    };
    Ok(entries.iter().filter_map(ClaudeTodoItem::from_value).collect())
}

/// Items still pending or in progress, in file order
pub fn unresolved(items: &[ClaudeTodoItem]) -> Vec<&ClaudeTodoItem> {
    items.iter().filter(|t| t.is_unresolved()).collect()
}

/// Message listing every open item
pub fn block_message(unresolved: &[&ClaudeTodoItem]) -> String {
    let mut lines = vec![
        String::new(),
        "You still have unresolved TODO items:".to_string(),
        String::new(),
    ];
    lines.extend(
        unresolved
            .iter()
            .map(|t| format!("  [{}] {}", t.status, t.content)),
    );
    lines.push(String::new());
    lines.push("Finish every item on this list before stopping.".to_string());
    lines.push(
        "If an item no longer applies, mark it completed or remove it from the list.".to_string(),
    );
    lines.join("\n")
}

/// Decide whether a Stop event should be blocked.
///
/// Anything unreadable (payload, session id, todo file) allows the stop.
pub fn check(payload: &[u8], config_dir: Option<&Path>) -> Option<StopDecision> {
    let envelope = EventEnvelope::from_bytes(payload.to_vec());
    let session_id = envelope.session_id()?;
    let path = todo_file(config_dir?, session_id);

    let items = match load(&path) {
        Ok(Some(items)) => items,
        Ok(None) => {
            tracing::debug!(path = %path.display(), "no todo file");
            return None;
        }
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "ignoring todo file");
            return None;
        }
    };

    let open = unresolved(&items);
    tracing::debug!(session_id, unresolved = open.len(), "todo check");
    if open.is_empty() {
        return None;
    }
    Some(StopDecision::block(block_message(&open)))
}

#[cfg(test)]
#[path = "todos_tests.rs"]
mod tests;
