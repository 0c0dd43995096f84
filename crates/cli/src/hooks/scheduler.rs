// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Fan-out of matched hooks into a concurrent batch and a sequential tail.

use super::executor::{HookOutcome, HookRunner};
use super::registry::HookDescriptor;

/// Matched hooks split by concurrency eligibility, each in registry order
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Partition<'a> {
    pub concurrent: Vec<&'a HookDescriptor>,
    pub sequential: Vec<&'a HookDescriptor>,
}

impl<'a> Partition<'a> {
    /// Split hooks on their `asyncable` flag
    pub fn split(hooks: &[&'a HookDescriptor]) -> Self {
        let (concurrent, sequential): (Vec<_>, Vec<_>) =
            hooks.iter().copied().partition(|h| h.asyncable);
        Self {
            concurrent,
            sequential,
        }
    }
}

/// A hook together with what came of running it
#[derive(Clone, Debug)]
pub struct HookRun<'a> {
    pub hook: &'a HookDescriptor,
    pub outcome: HookOutcome,
}

/// Run every hook in `partition` against `payload`.
///
/// The concurrent batch is launched all at once and fully awaited before the
/// first sequential hook starts; sequential hooks then run one at a time.
/// Runs come back concurrent batch first (in declaration order), then the
/// sequential hooks in the order they ran. A failing hook never stops the
/// others.
pub async fn run_partition<'a, R: HookRunner>(
    runner: &R,
    partition: &Partition<'a>,
    payload: &[u8],
) -> Vec<HookRun<'a>> {
    let mut runs = Vec::with_capacity(partition.concurrent.len() + partition.sequential.len());

    if !partition.concurrent.is_empty() {
        tracing::debug!(count = partition.concurrent.len(), "running concurrent batch");
        let outcomes = futures::future::join_all(
            partition
                .concurrent
                .iter()
                .map(|hook| runner.run(hook, payload)),
        )
        .await;
        runs.extend(
            partition
                .concurrent
                .iter()
                .copied()
                .zip(outcomes)
                .map(|(hook, outcome)| HookRun { hook, outcome }),
        );
    }

    for hook in partition.sequential.iter().copied() {
        tracing::debug!(command = %hook.command, "running sequential hook");
        let outcome = runner.run(hook, payload).await;
        runs.push(HookRun { hook, outcome });
    }

    runs
}

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod tests;
