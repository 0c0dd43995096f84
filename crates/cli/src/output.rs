// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Diagnostic output for the operator.
//!
//! Stderr doubles as the channel that carries blocking feedback to the
//! agent. Labeled messages are only used on paths that exit 0 or 1.

use std::fmt::Display;
use std::io::{self, IsTerminal, Write};

const RED: &str = "31";
const YELLOW: &str = "33";

/// Print `Error: <msg>` to stderr, red on a terminal.
pub fn print_error(msg: impl Display) {
    let is_tty = io::stderr().is_terminal();
    write_error(&mut io::stderr().lock(), msg, is_tty);
}

/// Print `Warning: <msg>` to stderr, yellow on a terminal.
pub fn print_warning(msg: impl Display) {
    let is_tty = io::stderr().is_terminal();
    write_warning(&mut io::stderr().lock(), msg, is_tty);
}

/// Print an unlabeled informational line to stderr.
pub fn print_note(msg: impl Display) {
    write_note(&mut io::stderr().lock(), msg);
}

/// Write an unlabeled informational line. Never colored.
pub fn write_note<W: Write>(writer: &mut W, msg: impl Display) {
    let _ = writeln!(writer, "{msg}");
}

fn write_error<W: Write>(writer: &mut W, msg: impl Display, is_terminal: bool) {
    write_labeled(writer, "Error", RED, msg, is_terminal);
}

fn write_warning<W: Write>(writer: &mut W, msg: impl Display, is_terminal: bool) {
    write_labeled(writer, "Warning", YELLOW, msg, is_terminal);
}

fn write_labeled<W: Write>(
    writer: &mut W,
    label: &str,
    color: &str,
    msg: impl Display,
    is_terminal: bool,
) {
    let _ = if is_terminal {
        writeln!(writer, "\x1b[{color}m{label}: {msg}\x1b[0m")
    } else {
        writeln!(writer, "{label}: {msg}")
    };
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
