// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! hookrelay binary entry point.

use std::io::Write;

use clap::error::ErrorKind;
use clap::Parser;

use hookrelay::cli::Cli;
use hookrelay::{logging, runtime};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            let code = match e.kind() {
                ErrorKind::DisplayHelp
                | ErrorKind::DisplayVersion
                | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => 0,
                _ => 1,
            };
            std::process::exit(code);
        }
    };

    logging::init();

    let code = runtime::run(cli).await;
    let _ = std::io::stdout().flush();
    std::process::exit(code);
}
