//! Invocation of the compiler under test.
//!
//! The compiler is a black box invoked as `<ancc> run <case>`. Only its exit code and its standard
//! error are observed; standard output goes to the null device.

use crate::error::{CaseError, ProcessLaunchError, ProcessTimeoutError};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

/// The per-case bound on how long the compiler may run.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const POLL_INTERVAL: Duration = Duration::from_millis(5);

/// What a single compiler invocation was observed to do.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProcessOutcome {
    pub exit_code: i32,
    pub stderr: String,
}

impl ProcessOutcome {
    pub fn new(exit_code: i32, stderr: impl Into<String>) -> Self {
        Self {
            exit_code,
            stderr: stderr.into(),
        }
    }
}

/// Something that can execute a case file and report how it went.
///
/// The suite only talks to the compiler through this trait, which lets tests substitute canned
/// outcomes for a real process.
pub trait CaseRunner {
    fn run(&self, case: &Path) -> Result<ProcessOutcome, CaseError>;
}

/// Runs the real compiler binary as a child process.
#[derive(Debug, Clone)]
pub struct CompilerProcess {
    executable: PathBuf,
    timeout: Duration,
}

impl CompilerProcess {
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn executable(&self) -> &Path {
        &self.executable
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl CaseRunner for CompilerProcess {
    fn run(&self, case: &Path) -> Result<ProcessOutcome, CaseError> {
        let child = Command::new(&self.executable)
            .arg("run")
            .arg(case)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| ProcessLaunchError {
                executable: self.executable.clone(),
                source,
            })?;
        let mut guard = ChildGuard::new(child);
        tracing::debug!(pid = guard.child.id(), case = %case.display(), "spawned compiler");

        let deadline = Instant::now() + self.timeout;
        let status = loop {
            let polled = guard.child.try_wait().map_err(|source| ProcessLaunchError {
                executable: self.executable.clone(),
                source,
            })?;
            if let Some(status) = polled {
                break status;
            }
            if Instant::now() >= deadline {
                tracing::warn!(
                    case = %case.display(),
                    timeout = ?self.timeout,
                    "compiler exceeded its deadline, killing it"
                );
                guard.terminate();
                return Err(ProcessTimeoutError {
                    timeout: self.timeout,
                }
                .into());
            }
            std::thread::sleep(POLL_INTERVAL);
        };

        // A helper the compiler left behind may still hold the pipe open, so the wait for the
        // end of standard error is bounded by the same deadline.
        let Some(stderr) = guard.collect_stderr(deadline) else {
            tracing::warn!(
                case = %case.display(),
                timeout = ?self.timeout,
                "standard error stayed open past the deadline"
            );
            return Err(ProcessTimeoutError {
                timeout: self.timeout,
            }
            .into());
        };
        let outcome = ProcessOutcome {
            exit_code: exit_code(status),
            stderr,
        };
        tracing::debug!(exit_code = outcome.exit_code, "compiler finished");
        Ok(outcome)
    }
}

/// Owns a spawned compiler and the thread draining its standard error.
///
/// The pipe is drained concurrently so that a compiler writing more than the pipe buffer holds
/// can still run to completion. If the guard is dropped while the child is still running, the
/// child is killed and reaped. The reader thread is never joined: a grandchild may still hold the
/// write end of the pipe, so the captured bytes are handed over through a channel instead.
struct ChildGuard {
    child: Child,
    stderr: Option<Receiver<Vec<u8>>>,
}

impl ChildGuard {
    fn new(mut child: Child) -> Self {
        let stderr = child.stderr.take().map(|mut pipe| {
            let (tx, rx) = mpsc::channel();
            std::thread::spawn(move || {
                let mut buf = Vec::new();
                // A read error leaves whatever was captured up to that point.
                let _ = pipe.read_to_end(&mut buf);
                let _ = tx.send(buf);
            });
            rx
        });
        Self { child, stderr }
    }

    fn terminate(&mut self) {
        if let Ok(None) = self.child.try_wait() {
            let _ = self.child.kill();
        }
        let _ = self.child.wait();
    }

    /// Wait until `deadline` for standard error to reach its end.
    ///
    /// Returns `None` if the pipe is still open at the deadline.
    fn collect_stderr(&mut self, deadline: Instant) -> Option<String> {
        let Some(rx) = self.stderr.take() else {
            return Some(String::new());
        };
        let bytes = match rx.recv_timeout(deadline.saturating_duration_since(Instant::now())) {
            Ok(bytes) => bytes,
            Err(RecvTimeoutError::Timeout) => return None,
            Err(RecvTimeoutError::Disconnected) => Vec::new(),
        };
        Some(String::from_utf8_lossy(&bytes).into_owned())
    }
}

impl Drop for ChildGuard {
    fn drop(&mut self) {
        self.terminate();
    }
}

#[cfg(unix)]
fn exit_code(status: ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;
    status
        .code()
        .or_else(|| status.signal().map(|signal| -signal))
        .unwrap_or(-1)
}

#[cfg(not(unix))]
fn exit_code(status: ExitStatus) -> i32 {
    status.code().unwrap_or(-1)
}
