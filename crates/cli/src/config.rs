// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Registry configuration for TOML/JSON registry files.

use crate::hooks::executor::{DEFAULT_SHELL, DEFAULT_TIMEOUT_MS};
use crate::hooks::{HookDescriptor, HookEvent, HookRegistry, MatcherRule};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when loading a registry file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read registry file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid matcher pattern '{pattern}': {source}")]
    Matcher {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Failed to render registry: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Top-level registry configuration
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RegistryConfig {
    /// Shell used to launch hook commands (default: /bin/bash)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shell: Option<String>,

    /// Per-hook timeout in milliseconds (default: 30000)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,

    /// Rules for PostToolUse, matched against the tool name
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub post_tool_use: Vec<RuleConfig>,

    /// Rules for Stop. Matchers are normally omitted here.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub stop: Vec<RuleConfig>,
}

/// One matcher and its hook list
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RuleConfig {
    /// Anchored alternation pattern; absent or empty matches everything
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matcher: Option<String>,

    #[serde(default)]
    pub hooks: Vec<HookDescriptor>,
}

impl RuleConfig {
    fn new(matcher: Option<&str>, hooks: Vec<HookDescriptor>) -> Self {
        Self {
            matcher: matcher.map(str::to_string),
            hooks,
        }
    }

    fn compile(&self) -> Result<MatcherRule, ConfigError> {
        let hooks = self.hooks.clone();
        match self.matcher.as_deref().filter(|p| !p.is_empty()) {
            None => Ok(MatcherRule::any(hooks)),
            Some(pattern) => {
                MatcherRule::new(pattern, hooks).map_err(|source| ConfigError::Matcher {
                    pattern: pattern.to_string(),
                    source,
                })
            }
        }
    }
}

impl RegistryConfig {
    /// Load a registry from a TOML or JSON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        if path.extension().is_some_and(|e| e == "json") {
            Ok(serde_json::from_str(&content)?)
        } else {
            Ok(toml::from_str(&content)?)
        }
    }

    /// Load `path` if given, otherwise use the built-in registry
    pub fn load_or_builtin(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(builtin()),
        }
    }

    /// Compile every matcher into a routable registry
    pub fn compile(&self) -> Result<HookRegistry, ConfigError> {
        let post_tool_use = self
            .post_tool_use
            .iter()
            .map(|rule| (HookEvent::PostToolUse, rule));
        let stop = self.stop.iter().map(|rule| (HookEvent::Stop, rule));
        post_tool_use
            .chain(stop)
            .try_fold(HookRegistry::new(), |registry, (event, rule)| {
                Ok::<_, ConfigError>(registry.with_rule(event, rule.compile()?))
            })
    }

    /// Shell to launch hooks with
    pub fn shell(&self) -> &str {
        self.shell
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_SHELL)
    }

    /// Per-hook timeout. `env_override_ms` takes precedence over the file.
    pub fn timeout(&self, env_override_ms: Option<u64>) -> Duration {
        let ms = env_override_ms
            .or(self.timeout_ms)
            .filter(|ms| *ms > 0)
            .unwrap_or(DEFAULT_TIMEOUT_MS);
        Duration::from_millis(ms)
    }

    /// Render as TOML
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string(self)?)
    }
}

const HOOKS_DIR: &str = "~/.claude/hooks/post-tool-use";

/// Only forwards the payload when the edited file is the project's todo list.
const TODOLIST_CHECK_CMD: &str = concat!(
    "input=$(cat); ",
    "file_path=$(printf '%s' \"$input\" | jq -r '.tool_input.file_path // .tool_input.target_file // \"\"'); ",
    "if [[ \"$file_path\" =~ ai-todolist\\.md$ ]] && [[ -f \"ai-todolist.md\" ]]; then ",
    "printf '%s' \"$input\" | ~/.claude/hooks/post-tool-use/remind-ai-todolist.sh; ",
    "fi"
);

fn uv_hook(script: &str, asyncable: bool) -> HookDescriptor {
    HookDescriptor::new(format!("uv run {}/{}.py", HOOKS_DIR, script)).with_asyncable(asyncable)
}

fn shell_hook(script: &str) -> HookDescriptor {
    HookDescriptor::new(format!("{}/{}", HOOKS_DIR, script))
}

/// The registry used when no file is configured.
///
/// Formatters and fixers that rewrite the edited file stay sequential;
/// read-only checkers run concurrently.
pub fn builtin() -> RegistryConfig {
    let edit_hooks = vec![
        shell_hook("system-reminder.sh"),
        uv_hook("inject_conftest", false),
        uv_hook("inject_knowledge", false),
        uv_hook("inject_language_guide", false),
        uv_hook("typescript_typecheck", true),
        uv_hook("python_auto_fix_init_reexport", false),
        uv_hook("python_lint_and_format", false),
        uv_hook("python_type_checker", false),
        uv_hook("python_check_any_return", true),
        uv_hook("check_typeddict_total_false", true),
        uv_hook("python_check_comments", true),
        uv_hook("python_check_nested_imports", true),
        uv_hook("python_check_match_case", true),
        uv_hook("check_corrupted_encoding", true),
        HookDescriptor::new(TODOLIST_CHECK_CMD),
    ];
    let read_hooks = vec![
        uv_hook("inject_knowledge", false),
        uv_hook("inject_language_guide", false),
        uv_hook("inject_conftest", false),
    ];

    RegistryConfig {
        shell: None,
        timeout_ms: None,
        post_tool_use: vec![
            RuleConfig::new(Some("Write|Edit|MultiEdit"), edit_hooks),
            RuleConfig::new(Some("Read"), read_hooks),
            RuleConfig::new(Some("Task"), vec![shell_hook("remind-execution.sh")]),
        ],
        stop: vec![RuleConfig::new(
            None,
            vec![HookDescriptor::new(format!(
                "{} check-todos",
                crate::hooks::BIN_NAME
            ))
            .with_asyncable(true)],
        )],
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
