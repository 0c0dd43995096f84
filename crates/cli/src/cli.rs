// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! CLI argument parsing.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Hook dispatcher for coding-agent events
#[derive(Parser, Debug)]
#[command(name = "hookrelay", version, about = "Hook dispatcher for coding-agent events")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Dispatch a PostToolUse event read from stdin
    PostToolUse {
        /// Tool name to route on, overriding the payload's `tool_name`
        #[arg(long)]
        tool: Option<String>,

        #[command(flatten)]
        config: ConfigArgs,
    },

    /// Dispatch a Stop event read from stdin
    Stop(ConfigArgs),

    /// Block the stop while the session has unresolved todos
    CheckTodos,

    /// Print the effective hook registry as TOML
    ShowRegistry(ConfigArgs),
}

/// Registry file selection
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// Path to a TOML or JSON registry file (default: built-in registry)
    #[arg(long, env = "HOOKRELAY_CONFIG")]
    pub config: Option<PathBuf>,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
