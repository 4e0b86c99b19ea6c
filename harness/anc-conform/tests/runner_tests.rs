//! Tests for running the compiler as a child process.
//!
//! The compiler is played by the `anc-stub` binary, which takes its behaviour from the case file.

use anc_conform::error::CaseError;
use anc_conform::runner::{CaseRunner, CompilerProcess, DEFAULT_TIMEOUT};
use anc_macros::{assert_err, assert_matches, assert_ok};
use std::path::PathBuf;
use std::time::{Duration, Instant};

fn stub() -> CompilerProcess {
    CompilerProcess::new(env!("CARGO_BIN_EXE_anc-stub"))
}

fn write_case(dir: &tempfile::TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).expect("failed to write case");
    path
}

#[test]
fn test_default_timeout_is_thirty_seconds() {
    assert_eq!(stub().timeout(), DEFAULT_TIMEOUT);
    assert_eq!(DEFAULT_TIMEOUT, Duration::from_secs(30));
}

#[test]
fn test_captures_exit_code_and_stderr() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let case = write_case(
        &dir,
        "undefined.anc",
        "# expect_error: undefined symbol\n\
         # stub-exit: 3\n\
         # stub-stdout: not captured\n\
         # stub-stderr: error: undefined symbol 'foo'\n\
         # stub-stderr: note: declared nowhere\n",
    );
    let outcome = assert_ok!(stub().run(&case));
    assert_eq!(outcome.exit_code, 3);
    assert_eq!(
        outcome.stderr,
        "error: undefined symbol 'foo'\nnote: declared nowhere\n"
    );
}

#[test]
fn test_successful_run() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let case = write_case(&dir, "ok.anc", "# expect: 0\n");
    let outcome = assert_ok!(stub().run(&case));
    assert_eq!(outcome.exit_code, 0);
    assert_eq!(outcome.stderr, "");
}

#[test]
fn test_passes_run_and_case_path() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let missing = dir.path().join("missing.anc");
    let outcome = assert_ok!(stub().run(&missing));
    assert_eq!(outcome.exit_code, 2);
    assert!(outcome.stderr.contains("cannot read"), "{}", outcome.stderr);
    assert!(outcome.stderr.contains("missing.anc"), "{}", outcome.stderr);
}

#[test]
fn test_large_stderr_does_not_block() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let mut contents = String::from("# expect: 1\n# stub-exit: 1\n");
    for i in 0..4000 {
        contents.push_str(&format!("# stub-stderr: error[{i:04}]: the pipe must keep draining\n"));
    }
    let case = write_case(&dir, "chatty.anc", &contents);
    let runner = stub().with_timeout(Duration::from_secs(20));
    let outcome = assert_ok!(runner.run(&case));
    assert_eq!(outcome.exit_code, 1);
    assert_eq!(outcome.stderr.lines().count(), 4000);
    assert!(outcome.stderr.ends_with("error[3999]: the pipe must keep draining\n"));
}

#[test]
fn test_timeout_kills_process() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let marker = dir.path().join("finished");
    let contents = format!(
        "# expect: 0\n# stub-sleep-ms: 1500\n# stub-touch: {}\n",
        marker.display()
    );
    let case = write_case(&dir, "hang.anc", &contents);
    let runner = stub().with_timeout(Duration::from_millis(200));
    let started = Instant::now();
    let err = assert_err!(runner.run(&case));
    let elapsed = started.elapsed();
    let timeout = assert_matches!(err, CaseError::ProcessTimeout(e) => e.timeout);
    assert_eq!(timeout, Duration::from_millis(200));
    assert!(elapsed < Duration::from_secs(2), "waited {elapsed:?}");

    // A surviving compiler would have created the marker once its sleep ended.
    std::thread::sleep(Duration::from_millis(2500));
    assert!(!marker.exists(), "compiler kept running after its deadline");
}

#[test]
fn test_timeout_covers_stderr_held_open_after_exit() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let case = write_case(
        &dir,
        "background.anc",
        "# expect_error: boom\n\
         # stub-exit: 1\n\
         # stub-stderr: error: boom\n\
         # stub-linger-ms: 8000\n",
    );
    let runner = stub().with_timeout(Duration::from_secs(1));
    let started = Instant::now();
    let err = assert_err!(runner.run(&case));
    let elapsed = started.elapsed();
    assert_matches!(err, CaseError::ProcessTimeout(_));
    assert!(elapsed < Duration::from_secs(4), "waited {elapsed:?}");
}

#[test]
fn test_timeout_reason() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let case = write_case(&dir, "hang.anc", "# expect: 0\n# stub-sleep-ms: 20000\n");
    let runner = stub().with_timeout(Duration::from_secs(1));
    let err = assert_err!(runner.run(&case));
    assert_eq!(err.to_string(), "timed out after 1s");
}

#[test]
fn test_missing_executable() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let case = write_case(&dir, "ok.anc", "# expect: 0\n");
    let runner = CompilerProcess::new(dir.path().join("no-such-ancc"));
    let err = assert_err!(runner.run(&case));
    let executable = assert_matches!(err, CaseError::ProcessLaunch(ref e) => e.executable.clone());
    assert_eq!(executable, dir.path().join("no-such-ancc"));
    assert!(err.to_string().starts_with("failed to launch compiler"));
}
