// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Opt-in diagnostic logging.
//!
//! Stderr carries blocking feedback to the agent, so nothing is logged
//! unless `HOOKRELAY_LOG` holds a filter directive (e.g. `debug`).

use crate::env;
use tracing_subscriber::EnvFilter;

/// Install the stderr subscriber if `HOOKRELAY_LOG` is set.
///
/// Returns whether a subscriber was installed.
pub fn init() -> bool {
    let Some(directive) = env::log_filter() else {
        return false;
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter(&directive))
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok()
}

/// Parse a filter directive, falling back to `info` when it is invalid.
fn filter(directive: &str) -> EnvFilter {
    EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new("info"))
}

#[cfg(test)]
#[path = "logging_tests.rs"]
mod tests;
