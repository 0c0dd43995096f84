// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Hook execution engine.

use super::registry::HookDescriptor;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// Default per-hook timeout
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Default shell used to launch hook commands
pub const DEFAULT_SHELL: &str = "/bin/bash";

/// Exit code a hook uses to ask the agent to act on its stderr
pub const BLOCKING_EXIT_CODE: i32 = 2;

/// Stderr text of a synthesized timeout outcome
pub const TIMEOUT_MESSAGE: &str = "Hook execution timed out";

/// Result of running one hook
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HookOutcome {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
    pub timed_out: bool,
    pub duration: Duration,
}

impl HookOutcome {
    /// Outcome for a hook that exited normally
    pub fn exited(exit_code: i32, stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            exit_code,
            stdout: stdout.into(),
            stderr: stderr.into(),
            timed_out: false,
            duration: Duration::ZERO,
        }
    }

    /// Synthetic non-blocking outcome for a hook that could not run
    pub fn failed(message: impl Into<String>) -> Self {
        Self::exited(1, String::new(), message)
    }

    /// Synthetic non-blocking outcome for a hook that was killed on timeout
    pub fn timed_out(duration: Duration) -> Self {
        Self {
            timed_out: true,
            duration,
            ..Self::failed(TIMEOUT_MESSAGE)
        }
    }

    /// Set the measured duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// A hook blocks iff it exits with the blocking code and says why.
    pub fn is_blocking(&self) -> bool {
        self.exit_code == BLOCKING_EXIT_CODE && !self.stderr.is_empty()
    }
}

/// Something that can run a hook against a payload.
///
/// Implementations must not fail: every problem is folded into the
/// returned outcome.
#[allow(async_fn_in_trait)]
pub trait HookRunner {
    async fn run(&self, hook: &HookDescriptor, payload: &[u8]) -> HookOutcome;
}

/// Runs hook commands as shell subprocesses
#[derive(Clone, Debug)]
pub struct HookExecutor {
    shell: String,
    timeout: Duration,
    cwd: PathBuf,
    env: Vec<(String, String)>,
}

impl HookExecutor {
    /// Create an executor that launches hooks in `cwd`
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        Self {
            shell: DEFAULT_SHELL.to_string(),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            cwd: cwd.into(),
            env: Vec::new(),
        }
    }

    /// Set shell
    pub fn with_shell(mut self, shell: impl Into<String>) -> Self {
        self.shell = shell.into();
        self
    }

    /// Set timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Add an environment variable for every hook child
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    /// Working directory for hook children
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Per-hook timeout
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn try_run(&self, hook: &HookDescriptor, payload: &[u8]) -> Result<HookOutcome, HookError> {
        let mut command = Command::new(&self.shell);
        command
            .arg("-c")
            .arg(&hook.command)
            .current_dir(&self.cwd)
            .envs(self.env.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        // Own process group so a timeout can take down grandchildren too
        #[cfg(unix)]
        command.process_group(0);

        let mut child = command.spawn().map_err(HookError::Spawn)?;
        let pid = child.id();

        let stdin = child.stdin.take();
        let feed = async move {
            if let Some(mut stdin) = stdin {
                // A hook that exits without reading gives EPIPE here; that is fine.
                let _ = stdin.write_all(payload).await;
                let _ = stdin.shutdown().await;
            }
        };
        let collect = async move {
            let ((), output) = tokio::join!(feed, child.wait_with_output());
            output
        };

        match tokio::time::timeout(self.timeout, collect).await {
            Ok(output) => {
                let output = output.map_err(HookError::Io)?;
                Ok(HookOutcome::exited(
                    // Killed by a signal: no code, treat as plain failure
                    output.status.code().unwrap_or(1),
                    String::from_utf8_lossy(&output.stdout),
                    String::from_utf8_lossy(&output.stderr),
                ))
            }
            Err(_) => {
                // The direct child is reaped by kill_on_drop when `collect` drops
                kill_process_group(pid);
                Err(HookError::Timeout)
            }
        }
    }
}

impl HookRunner for HookExecutor {
    async fn run(&self, hook: &HookDescriptor, payload: &[u8]) -> HookOutcome {
        let start = Instant::now();
        tracing::debug!(command = %hook.command, asyncable = hook.asyncable, "starting hook");

        let outcome = match self.try_run(hook, payload).await {
            Ok(outcome) => outcome.with_duration(start.elapsed()),
            Err(HookError::Timeout) => {
                tracing::warn!(
                    command = %hook.command,
                    timeout_ms = self.timeout.as_millis() as u64,
                    "hook timed out"
                );
                HookOutcome::timed_out(start.elapsed())
            }
            Err(e) => {
                tracing::warn!(command = %hook.command, error = %e, "hook could not run");
                HookOutcome::failed(format!("Hook execution failed: {}", e))
                    .with_duration(start.elapsed())
            }
        };

        tracing::debug!(
            command = %hook.command,
            exit_code = outcome.exit_code,
            duration_ms = outcome.duration.as_millis() as u64,
            blocking = outcome.is_blocking(),
            "hook finished"
        );
        outcome
    }
}

#[cfg(unix)]
fn kill_process_group(pid: Option<u32>) {
    use nix::sys::signal::{killpg, Signal};
    use nix::unistd::Pid;

    if let Some(pid) = pid.and_then(|p| i32::try_from(p).ok()) {
        let _ = killpg(Pid::from_raw(pid), Signal::SIGKILL);
    }
}

#[cfg(not(unix))]
fn kill_process_group(_pid: Option<u32>) {}

#[derive(Debug, Error)]
pub enum HookError {
    #[error("failed to spawn hook: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("hook I/O error: {0}")]
    Io(#[source] std::io::Error),

    #[error("Hook execution timed out")]
    Timeout,
}

#[cfg(test)]
#[path = "executor_tests.rs"]
mod tests;
