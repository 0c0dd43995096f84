// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! One event-processing pass: route, run, aggregate.

use super::executor::HookRunner;
use super::protocol::{EventEnvelope, HookEvent};
use super::registry::{runnable_hooks, HookRegistry};
use super::scheduler::{run_partition, HookRun, Partition};
use super::verdict::Verdict;
use hookrelay_capture::{CapturedVerdict, DispatchRecord, HookRecord};
use std::time::{Duration, Instant};

/// Why a dispatch finished without running anything
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// A routed event arrived without a tool name
    NoToolName,
    /// No rule matched the discriminator
    NoMatchingHooks { tool: Option<String> },
    /// Every matched hook was filtered out
    NoRunnableHooks,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::NoToolName => write!(f, "tool_name not provided"),
            SkipReason::NoMatchingHooks { tool: Some(tool) } => {
                write!(f, "No hooks found for tool: {}", tool)
            }
            SkipReason::NoMatchingHooks { tool: None } => write!(f, "No hooks registered"),
            SkipReason::NoRunnableHooks => write!(f, "No runnable hooks"),
        }
    }
}

/// Everything that happened for one event
#[derive(Clone, Debug)]
pub struct DispatchReport<'r> {
    pub event: HookEvent,
    pub discriminator: Option<String>,
    pub runs: Vec<HookRun<'r>>,
    pub verdict: Verdict,
    pub skipped: Option<SkipReason>,
    /// Wall time from routing to the final verdict
    pub elapsed: Duration,
}

impl<'r> DispatchReport<'r> {
    fn skipped(
        event: HookEvent,
        discriminator: Option<String>,
        reason: SkipReason,
        start: Instant,
    ) -> Self {
        tracing::debug!(event = %event, reason = %reason, "dispatch skipped");
        Self {
            event,
            discriminator,
            runs: Vec::new(),
            verdict: Verdict::new(event.forwards_stdout()),
            skipped: Some(reason),
            elapsed: start.elapsed(),
        }
    }

    /// Process exit code for this dispatch
    pub fn exit_code(&self) -> i32 {
        self.verdict.exit_code()
    }

    /// Capture record for this run
    pub fn to_record(&self, session_id: Option<&str>) -> DispatchRecord {
        let hooks = self
            .runs
            .iter()
            .map(|run| HookRecord {
                command: run.hook.command.clone(),
                asyncable: run.hook.asyncable,
                exit_code: run.outcome.exit_code,
                duration: run.outcome.duration,
                timed_out: run.outcome.timed_out,
                blocking: run.outcome.is_blocking(),
            })
            .collect();

        let verdict = match (&self.skipped, self.verdict.should_block()) {
            (Some(reason), _) => CapturedVerdict::Skipped {
                reason: reason.to_string(),
            },
            (None, true) => CapturedVerdict::Blocked {
                message: self.verdict.combined_message().to_string(),
            },
            (None, false) => CapturedVerdict::Proceed,
        };

        DispatchRecord::new(self.event.wire_name(), self.elapsed, verdict)
            .with_discriminator(self.discriminator.clone())
            .with_session_id(session_id.map(str::to_string))
            .with_hooks(hooks)
    }
}

/// Dispatch one event.
///
/// `tool_override` replaces the payload's `tool_name` when given. Routed
/// events without any tool name are skipped.
pub async fn dispatch<'r, R: HookRunner>(
    event: HookEvent,
    registry: &'r HookRegistry,
    runner: &R,
    envelope: &EventEnvelope,
    tool_override: Option<&str>,
) -> DispatchReport<'r> {
    let start = Instant::now();
    let discriminator = tool_override
        .filter(|t| !t.is_empty())
        .or_else(|| envelope.tool_name())
        .map(str::to_string);

    if event.is_routed() && discriminator.is_none() {
        return DispatchReport::skipped(event, None, SkipReason::NoToolName, start);
    }

    let matched = registry.route(event, discriminator.as_deref());
    if matched.is_empty() {
        let reason = SkipReason::NoMatchingHooks {
            tool: discriminator.clone(),
        };
        return DispatchReport::skipped(event, discriminator, reason, start);
    }

    let runnable = runnable_hooks(event, matched);
    if runnable.is_empty() {
        return DispatchReport::skipped(
            event,
            discriminator,
            SkipReason::NoRunnableHooks,
            start,
        );
    }

    let partition = Partition::split(&runnable);
    let runs = run_partition(runner, &partition, envelope.raw()).await;
    let verdict = Verdict::aggregate(runs.iter().map(|r| &r.outcome), event.forwards_stdout());

    tracing::info!(
        event = %event,
        tool = discriminator.as_deref().unwrap_or(""),
        hooks = runs.len(),
        blocked = verdict.should_block(),
        "dispatch complete"
    );

    DispatchReport {
        event,
        discriminator,
        runs,
        verdict,
        skipped: None,
        elapsed: start.elapsed(),
    }
}

#[cfg(test)]
#[path = "dispatch_tests.rs"]
mod tests;
