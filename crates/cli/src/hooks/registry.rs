// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Hook command registry and event routing.

use super::protocol::HookEvent;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Kind of hook entry. Only shell commands are supported.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HookKind {
    Command,
}

/// A single hook command
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HookDescriptor {
    /// Optional `type` tag, as written in agent settings files
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<HookKind>,

    /// Shell command line
    pub command: String,

    /// Whether the hook may run concurrently with its asyncable siblings.
    /// Hooks that rewrite the target file must leave this off.
    #[serde(default)]
    pub asyncable: bool,
}

impl HookDescriptor {
    /// Create a sequential hook
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            kind: None,
            command: command.into(),
            asyncable: false,
        }
    }

    /// Set the concurrency flag
    pub fn with_asyncable(mut self, asyncable: bool) -> Self {
        self.asyncable = asyncable;
        self
    }
}

/// Whole-string alternation matcher, e.g. `Write|Edit|MultiEdit`.
#[derive(Clone, Debug)]
pub struct Matcher {
    source: String,
    regex: Regex,
}

impl Matcher {
    /// Compile a matcher. The pattern is anchored at both ends.
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        let regex = Regex::new(&format!("^(?:{})$", pattern))?;
        Ok(Self {
            source: pattern.to_string(),
            regex,
        })
    }

    /// Test a discriminator against the whole pattern
    pub fn is_match(&self, discriminator: &str) -> bool {
        self.regex.is_match(discriminator)
    }

    /// The pattern as written
    pub fn as_str(&self) -> &str {
        &self.source
    }
}

/// A matcher and the hooks it selects
#[derive(Clone, Debug)]
pub struct MatcherRule {
    matcher: Option<Matcher>,
    hooks: Vec<HookDescriptor>,
}

impl MatcherRule {
    /// Rule selected when the discriminator matches `pattern`.
    ///
    /// An empty pattern matches every event.
    pub fn new(pattern: &str, hooks: Vec<HookDescriptor>) -> Result<Self, regex::Error> {
        let matcher = if pattern.is_empty() {
            None
        } else {
            Some(Matcher::new(pattern)?)
        };
        Ok(Self { matcher, hooks })
    }

    /// Rule selected for every event
    pub fn any(hooks: Vec<HookDescriptor>) -> Self {
        Self {
            matcher: None,
            hooks,
        }
    }

    /// Whether this rule applies to `discriminator`.
    ///
    /// A rule with a matcher never applies to an event that has no
    /// discriminator.
    pub fn matches(&self, discriminator: Option<&str>) -> bool {
        match (&self.matcher, discriminator) {
            (None, _) => true,
            (Some(m), Some(d)) => m.is_match(d),
            (Some(_), None) => false,
        }
    }

    /// Matcher pattern, if any
    pub fn pattern(&self) -> Option<&str> {
        self.matcher.as_ref().map(Matcher::as_str)
    }

    /// Hooks in declaration order
    pub fn hooks(&self) -> &[HookDescriptor] {
        &self.hooks
    }
}

/// Ordered matcher rules per event category
#[derive(Clone, Debug, Default)]
pub struct HookRegistry {
    post_tool_use: Vec<MatcherRule>,
    stop: Vec<MatcherRule>,
}

impl HookRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule for an event
    pub fn with_rule(mut self, event: HookEvent, rule: MatcherRule) -> Self {
        self.rules_mut(event).push(rule);
        self
    }

    /// Rules for an event in declaration order
    pub fn rules(&self, event: HookEvent) -> &[MatcherRule] {
        match event {
            HookEvent::PostToolUse => &self.post_tool_use,
            HookEvent::Stop => &self.stop,
        }
    }

    fn rules_mut(&mut self, event: HookEvent) -> &mut Vec<MatcherRule> {
        match event {
            HookEvent::PostToolUse => &mut self.post_tool_use,
            HookEvent::Stop => &mut self.stop,
        }
    }

    /// Select the hooks that apply to an event.
    ///
    /// Returns the concatenation, in registry order, of the hook lists of
    /// every matching rule. A hook listed under two matching rules runs twice.
    pub fn route(&self, event: HookEvent, discriminator: Option<&str>) -> Vec<&HookDescriptor> {
        self.rules(event)
            .iter()
            .filter(|rule| rule.matches(discriminator))
            .flat_map(|rule| rule.hooks.iter())
            .collect()
    }

    /// Total hook count for an event across all rules
    pub fn hook_count(&self, event: HookEvent) -> usize {
        self.rules(event).iter().map(|r| r.hooks.len()).sum()
    }
}

/// Drop hooks that cannot or must not run.
///
/// Excludes empty commands and any command that would invoke this
/// dispatcher for the same event again.
pub fn runnable_hooks<'a>(
    event: HookEvent,
    hooks: impl IntoIterator<Item = &'a HookDescriptor>,
) -> Vec<&'a HookDescriptor> {
    let marker = event.self_marker();
    hooks
        .into_iter()
        .filter(|h| !h.command.trim().is_empty() && !h.command.contains(&marker))
        .collect()
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
