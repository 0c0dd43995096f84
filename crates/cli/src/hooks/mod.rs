// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Hook dispatch for agent lifecycle events.
//!
//! An event arrives as JSON on stdin. Matching hooks are looked up in the
//! registry, run as shell subprocesses (a concurrent batch first, then the
//! sequential tail), and their outcomes folded into a single verdict.

pub mod dispatch;
pub mod executor;
pub mod protocol;
pub mod registry;
pub mod scheduler;
pub mod verdict;

pub use dispatch::{dispatch, DispatchReport, SkipReason};
pub use executor::{HookError, HookExecutor, HookOutcome, HookRunner};
pub use protocol::{EventEnvelope, HookEvent, BIN_NAME};
pub use registry::{
    runnable_hooks, HookDescriptor, HookKind, HookRegistry, Matcher, MatcherRule,
};
pub use scheduler::{run_partition, HookRun, Partition};
pub use verdict::Verdict;
