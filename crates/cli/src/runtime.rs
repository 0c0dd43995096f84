// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Process front-end: wires stdin, configuration, and the dispatch core.
//!
//! Every dispatch path is permissive. Anything that goes wrong before a
//! hook could block (reentrancy, unreadable config, bad input) ends in
//! exit 0.

use crate::cli::{Cli, Command, ConfigArgs};
use crate::config::{ConfigError, RegistryConfig};
use crate::env;
use crate::hooks::{dispatch, EventEnvelope, HookEvent, HookExecutor, HookRegistry, SkipReason};
use crate::output::{print_error, print_note, print_warning, write_note};
use crate::todos;
use hookrelay_capture::DispatchLog;
use std::io::Write;
use std::path::Path;
use tokio::io::AsyncReadExt;

/// Exit code for the `check-todos` hook when it blocks the stop
pub const TODO_BLOCK_EXIT_CODE: i32 = 2;

/// A loaded registry, ready to dispatch events
#[derive(Clone, Debug)]
pub struct Dispatcher {
    config: RegistryConfig,
    registry: HookRegistry,
}

impl Dispatcher {
    /// Load and compile `path`, or the built-in registry
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::from_config(RegistryConfig::load_or_builtin(path)?)
    }

    pub fn from_config(config: RegistryConfig) -> Result<Self, ConfigError> {
        let registry = config.compile()?;
        Ok(Self { config, registry })
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    pub fn registry(&self) -> &HookRegistry {
        &self.registry
    }

    /// Executor for hooks of `event` running in `cwd`.
    ///
    /// Children inherit the reentrancy marker and `CLAUDE_CODE_CWD`.
    pub fn executor(&self, event: HookEvent, cwd: &Path) -> HookExecutor {
        HookExecutor::new(cwd)
            .with_shell(self.config.shell())
            .with_timeout(self.config.timeout(env::hook_timeout_ms()))
            .with_env(event.reentrancy_var(), "1")
            .with_env(env::CLAUDE_CODE_CWD, cwd.to_string_lossy())
    }

    /// Dispatch one event and write its verdict. Returns the exit code.
    pub async fn handle<O: Write, E: Write>(
        &self,
        event: HookEvent,
        tool: Option<&str>,
        payload: Vec<u8>,
        stdout: &mut O,
        stderr: &mut E,
    ) -> i32 {
        let envelope = EventEnvelope::from_bytes(payload);
        if let Some(name) = envelope.hook_event_name() {
            if name != event.wire_name() {
                tracing::debug!(expected = %event, got = name, "payload names a different event");
            }
        }
        let cwd = envelope.resolve_cwd();
        let executor = self.executor(event, &cwd);
        tracing::debug!(
            event = %event,
            cwd = %executor.cwd().display(),
            timeout_ms = executor.timeout().as_millis() as u64,
            "dispatching"
        );

        let report = dispatch(event, &self.registry, &executor, &envelope, tool).await;

        if let Some(reason @ SkipReason::NoMatchingHooks { tool: Some(_) }) = &report.skipped {
            write_note(stderr, reason);
        }
        if let Err(e) = report.verdict.emit(stdout, stderr) {
            tracing::debug!(error = %e, "failed to write verdict");
        }

        if let Some(path) = env::capture_file() {
            let record = report.to_record(envelope.session_id());
            if let Err(e) = DispatchLog::open(&path).and_then(|mut log| log.append(&record)) {
                tracing::debug!(path = %path.display(), error = %e, "capture skipped");
            }
        }

        report.exit_code()
    }
}

/// Run a parsed command line. Returns the process exit code.
pub async fn run(cli: Cli) -> i32 {
    match cli.command {
        Command::PostToolUse { tool, config } => {
            run_event(HookEvent::PostToolUse, tool.as_deref(), &config).await
        }
        Command::Stop(config) => run_event(HookEvent::Stop, None, &config).await,
        Command::CheckTodos => run_check_todos().await,
        Command::ShowRegistry(config) => run_show_registry(&config),
    }
}

async fn run_event(event: HookEvent, tool: Option<&str>, args: &ConfigArgs) -> i32 {
    if env::marker_set(event.reentrancy_var()) {
        tracing::debug!(event = %event, "reentrant invocation, skipping");
        return 0;
    }

    let payload = read_stdin().await;

    let dispatcher = match Dispatcher::load(args.config.as_deref()) {
        Ok(dispatcher) => dispatcher,
        Err(e) => {
            print_warning(format!("{}; no hooks were run", e));
            return 0;
        }
    };

    dispatcher
        .handle(
            event,
            tool,
            payload,
            &mut std::io::stdout().lock(),
            &mut std::io::stderr().lock(),
        )
        .await
}

async fn run_check_todos() -> i32 {
    let payload = read_stdin().await;
    let config_dir = todos::config_dir();

    let Some(decision) = todos::check(&payload, config_dir.as_deref()) else {
        return 0;
    };
    match serde_json::to_string(&decision) {
        Ok(json) => {
            println!("{}", json);
            TODO_BLOCK_EXIT_CODE
        }
        Err(e) => {
            tracing::debug!(error = %e, "failed to serialize stop decision");
            0
        }
    }
}

fn run_show_registry(args: &ConfigArgs) -> i32 {
    let dispatcher = match Dispatcher::load(args.config.as_deref()) {
        Ok(dispatcher) => dispatcher,
        Err(e) => {
            print_error(e);
            return 1;
        }
    };
    match dispatcher.config().to_toml() {
        Ok(toml) => print!("{}", toml),
        Err(e) => {
            print_error(e);
            return 1;
        }
    }
    for line in registry_summary(dispatcher.registry()) {
        print_note(line);
    }
    0
}

/// One line per rule, then a total per event, e.g.
/// `post_tool_use [Write|Edit]: 15 hooks`.
pub fn registry_summary(registry: &HookRegistry) -> Vec<String> {
    let mut lines = Vec::new();
    for event in [HookEvent::PostToolUse, HookEvent::Stop] {
        let section = event.subcommand().replace('-', "_");
        for rule in registry.rules(event) {
            lines.push(format!(
                "{} [{}]: {} hooks",
                section,
                rule.pattern().unwrap_or("*"),
                rule.hooks().len()
            ));
        }
        lines.push(format!(
            "{} total: {} hooks",
            section,
            registry.hook_count(event)
        ));
    }
    lines
}

/// Read all of stdin. Unreadable input is treated as empty.
async fn read_stdin() -> Vec<u8> {
    let mut buf = Vec::new();
    if let Err(e) = tokio::io::stdin().read_to_end(&mut buf).await {
        tracing::debug!(error = %e, "failed to read stdin");
        buf.clear();
    }
    buf
}

#[cfg(test)]
#[path = "runtime_tests.rs"]
mod tests;
