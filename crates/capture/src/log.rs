// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Append-only JSONL dispatch log.

use crate::record::DispatchRecord;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

/// JSONL file that dispatcher processes append to.
///
/// Each process opens the file in append mode and writes its record as a
/// single `write_all` of one complete line, so lines from concurrent
/// dispatchers never interleave.
pub struct DispatchLog {
    file: File,
}

impl DispatchLog {
    /// Open (creating if needed) a capture file for appending
    pub fn open(path: &Path) -> std::io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self { file })
    }

    /// Append one record as a JSON line
    pub fn append(&mut self, record: &DispatchRecord) -> std::io::Result<()> {
        let mut line = serde_json::to_vec(record)?;
        line.push(b'\n');
        self.file.write_all(&line)?;
        self.file.flush()
    }
}

#[cfg(test)]
#[path = "log_tests.rs"]
mod tests;
