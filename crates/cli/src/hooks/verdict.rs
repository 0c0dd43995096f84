// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Folding hook outcomes into one process-level verdict.

use super::executor::{HookOutcome, BLOCKING_EXIT_CODE};
use std::io::Write;

/// Combined result of every hook run for one event
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Verdict {
    should_block: bool,
    combined_message: String,
    forwarded_stdout: String,
    forward_stdout: bool,
}

impl Verdict {
    /// An empty verdict. Child stdout is kept only if `forward_stdout` is set.
    pub fn new(forward_stdout: bool) -> Self {
        Self {
            forward_stdout,
            ..Self::default()
        }
    }

    /// Fold outcomes in the order they became available
    pub fn aggregate<'o>(
        outcomes: impl IntoIterator<Item = &'o HookOutcome>,
        forward_stdout: bool,
    ) -> Self {
        let mut verdict = Self::new(forward_stdout);
        for outcome in outcomes {
            verdict.absorb(outcome);
        }
        verdict
    }

    /// Fold one outcome. Blocking stderr is appended whole.
    pub fn absorb(&mut self, outcome: &HookOutcome) {
        if self.forward_stdout {
            self.forwarded_stdout.push_str(&outcome.stdout);
        }
        if outcome.is_blocking() {
            self.should_block = true;
            self.combined_message.push_str(&outcome.stderr);
        }
    }

    pub fn should_block(&self) -> bool {
        self.should_block
    }

    pub fn combined_message(&self) -> &str {
        &self.combined_message
    }

    pub fn forwarded_stdout(&self) -> &str {
        &self.forwarded_stdout
    }

    /// Process exit code: 2 when blocking, else 0
    pub fn exit_code(&self) -> i32 {
        if self.should_block {
            BLOCKING_EXIT_CODE
        } else {
            0
        }
    }

    /// Write forwarded stdout, then the combined message if blocking.
    pub fn emit<O: Write, E: Write>(&self, stdout: &mut O, stderr: &mut E) -> std::io::Result<()> {
        if !self.forwarded_stdout.is_empty() {
            stdout.write_all(self.forwarded_stdout.as_bytes())?;
            stdout.flush()?;
        }
        if self.should_block {
            stderr.write_all(self.combined_message.as_bytes())?;
            stderr.flush()?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "verdict_tests.rs"]
mod tests;
