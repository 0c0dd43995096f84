// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
use super::*;
use yare::parameterized;

fn executor(dir: &Path) -> HookExecutor {
    HookExecutor::new(dir).with_timeout(Duration::from_secs(10))
}

async fn run(executor: &HookExecutor, command: &str, payload: &[u8]) -> HookOutcome {
    executor.run(&HookDescriptor::new(command), payload).await
}

#[parameterized(
    block_with_message = { 2, "fix this", true },
    block_without_message = { 2, "", false },
    success_with_stderr = { 0, "noise", false },
    failure_with_stderr = { 1, "crashed", false },
    other_code = { 3, "weird", false },
)]
fn blocking_rule(exit_code: i32, stderr: &str, expected: bool) {
    let outcome = HookOutcome::exited(exit_code, "", stderr);
    assert_eq!(outcome.is_blocking(), expected);
}

#[test]
fn test_synthetic_outcomes_are_non_blocking() {
    let timed_out = HookOutcome::timed_out(Duration::from_secs(30));
    assert_eq!(timed_out.exit_code, 1);
    assert_eq!(timed_out.stderr, TIMEOUT_MESSAGE);
    assert!(timed_out.timed_out);
    assert!(!timed_out.is_blocking());

    let failed = HookOutcome::failed("no shell");
    assert_eq!(failed.exit_code, 1);
    assert!(!failed.timed_out);
    assert!(!failed.is_blocking());
}

#[test]
fn test_executor_defaults() {
    let executor = HookExecutor::new("/tmp");
    assert_eq!(executor.timeout(), Duration::from_millis(DEFAULT_TIMEOUT_MS));
    assert_eq!(executor.cwd(), Path::new("/tmp"));
}

#[tokio::test]
async fn test_captures_exit_code_and_streams() {
    let dir = tempfile::tempdir().unwrap();
    let outcome = run(
        &executor(dir.path()),
        "echo out; echo err >&2; exit 2",
        b"{}",
    )
    .await;

    assert_eq!(outcome.exit_code, 2);
    assert_eq!(outcome.stdout, "out\n");
    assert_eq!(outcome.stderr, "err\n");
    assert!(outcome.is_blocking());
    assert!(!outcome.timed_out);
}

#[tokio::test]
async fn test_payload_is_delivered_on_stdin() {
    let dir = tempfile::tempdir().unwrap();
    let payload = br#"{"tool_name":"Write","tool_input":{"file_path":"a.py"}}"#;

    let outcome = run(&executor(dir.path()), "cat", payload).await;

    assert_eq!(outcome.exit_code, 0);
    assert_eq!(outcome.stdout.as_bytes(), payload);
}

#[tokio::test]
async fn test_runs_in_working_directory_with_env() {
    let dir = tempfile::tempdir().unwrap();
    let executor = executor(dir.path()).with_env("HOOKRELAY_TEST_MARKER", "1");

    let outcome = run(&executor, "pwd; printf '%s' \"$HOOKRELAY_TEST_MARKER\"", b"").await;

    let canonical = std::fs::canonicalize(dir.path()).unwrap();
    let mut lines = outcome.stdout.lines();
    let pwd = std::fs::canonicalize(lines.next().unwrap()).unwrap();
    assert_eq!(pwd, canonical);
    assert_eq!(lines.next(), Some("1"));
}

#[tokio::test]
async fn test_shell_features_available() {
    let dir = tempfile::tempdir().unwrap();
    let outcome = run(
        &executor(dir.path()),
        "input=$(cat); if [[ \"$input\" == *Write* ]]; then echo matched | tr a-z A-Z; fi",
        br#"{"tool_name":"Write"}"#,
    )
    .await;

    assert_eq!(outcome.stdout, "MATCHED\n");
}

#[tokio::test]
async fn test_hook_that_ignores_large_stdin_does_not_hang() {
    let dir = tempfile::tempdir().unwrap();
    let payload = vec![b'x'; 4 * 1024 * 1024];

    let outcome = run(&executor(dir.path()), "exit 0", &payload).await;

    assert_eq!(outcome.exit_code, 0);
    assert!(!outcome.timed_out);
}

#[tokio::test]
async fn test_timeout_is_bounded_and_non_blocking() {
    let dir = tempfile::tempdir().unwrap();
    let executor = HookExecutor::new(dir.path()).with_timeout(Duration::from_millis(200));

    let start = Instant::now();
    let outcome = run(&executor, "echo late >&2; sleep 10; exit 2", b"{}").await;

    assert!(start.elapsed() < Duration::from_secs(5));
    assert!(outcome.timed_out);
    assert_eq!(outcome.exit_code, 1);
    assert_eq!(outcome.stderr, TIMEOUT_MESSAGE);
    assert!(!outcome.is_blocking());
}

#[cfg(unix)]
#[tokio::test]
async fn test_timeout_kills_whole_process_group() {
    let dir = tempfile::tempdir().unwrap();
    let executor = HookExecutor::new(dir.path()).with_timeout(Duration::from_millis(200));

    // The subshell outlives bash unless the group is killed
    let outcome = run(&executor, "(sleep 1; touch survived) & wait", b"").await;
    assert!(outcome.timed_out);

    tokio::time::sleep(Duration::from_millis(1500)).await;
    assert!(!dir.path().join("survived").exists());
}

#[tokio::test]
async fn test_spawn_failure_is_converted() {
    let dir = tempfile::tempdir().unwrap();
    let executor = executor(dir.path()).with_shell("/nonexistent/shell");

    let outcome = run(&executor, "true", b"{}").await;

    assert_eq!(outcome.exit_code, 1);
    assert!(outcome.stderr.starts_with("Hook execution failed:"));
    assert!(!outcome.is_blocking());
}

#[tokio::test]
async fn test_missing_working_directory_is_converted() {
    let executor = HookExecutor::new("/nonexistent/cwd/for/hookrelay");

    let outcome = run(&executor, "true", b"{}").await;

    assert_eq!(outcome.exit_code, 1);
    assert!(outcome.stderr.starts_with("Hook execution failed:"));
}

#[tokio::test]
async fn test_invalid_utf8_output_is_lossy() {
    let dir = tempfile::tempdir().unwrap();
    let outcome = run(&executor(dir.path()), "printf '\\377ok' >&2; exit 2", b"").await;

    assert!(outcome.stderr.ends_with("ok"));
    assert!(outcome.stderr.contains('\u{FFFD}'));
}
