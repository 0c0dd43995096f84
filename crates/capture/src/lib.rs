// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Dispatch run capture for hookrelay.
//!
//! Each dispatcher process can append one [`DispatchRecord`] to a shared
//! JSONL file, leaving a trail of which hooks ran, how long they took, and
//! what verdict came out.

mod log;
mod micros;
mod record;

pub use log::DispatchLog;
pub use record::{CapturedVerdict, DispatchRecord, HookRecord};
