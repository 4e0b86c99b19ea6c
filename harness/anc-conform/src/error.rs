//! Error types for the conformance runner.
//!
//! Errors come in two tiers. A [`CaseError`] belongs to a single case and is always turned into a
//! failing verdict for that case by the suite, so one broken case never stops the run. A
//! [`DiscoveryError`] means the set of cases could not be enumerated at all, and aborts the run
//! before any case is executed.

use anc_macros::declare_error_type;
use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

declare_error_type! {
    #[error("case error: {0}")]
    pub enum CaseError {
        DirectiveParse(DirectiveParseError),
        CaseRead(CaseReadError),
        ProcessLaunch(ProcessLaunchError),
        ProcessTimeout(ProcessTimeoutError),
    }
}

declare_error_type! {
    #[error("discovery error: {0}")]
    pub enum DiscoveryError {
        MissingDirectory(MissingCaseDirectoryError),
        InvalidPattern(InvalidPatternError),
    }
}

/// A first line carried the `# expect:` prefix, but its payload is not an integer.
#[derive(Error, Diagnostic, Debug, PartialEq, Eq)]
#[diagnostic(
    code(conform::invalid_directive),
    help("exit code directives take a base-10 integer, for example `# expect: 0`")
)]
#[error("invalid directive: expected an integer exit code after '# expect:', got '{payload}'")]
pub struct DirectiveParseError {
    pub payload: String,
}

#[derive(Error, Diagnostic, Debug)]
#[diagnostic(code(conform::case_read))]
#[error("failed to read case file {}: {source}", .path.display())]
pub struct CaseReadError {
    pub path: PathBuf,
    pub source: std::io::Error,
}

#[derive(Error, Diagnostic, Debug)]
#[diagnostic(
    code(conform::process_launch),
    help("pass the compiler location with `--ancc <path>`")
)]
#[error("failed to launch compiler {}: {source}", .executable.display())]
pub struct ProcessLaunchError {
    pub executable: PathBuf,
    pub source: std::io::Error,
}

/// The compiler did not terminate within the per-case bound and was killed.
#[derive(Error, Diagnostic, Debug)]
#[diagnostic(code(conform::process_timeout))]
#[error("timed out after {}s", .timeout.as_secs_f64())]
pub struct ProcessTimeoutError {
    pub timeout: std::time::Duration,
}

#[derive(Error, Diagnostic, Debug)]
#[diagnostic(
    code(conform::missing_case_directory),
    help("pass the case directory with `--cases <dir>`")
)]
#[error("case directory {} does not exist", .path.display())]
pub struct MissingCaseDirectoryError {
    pub path: PathBuf,
}

#[derive(Error, Diagnostic, Debug)]
#[diagnostic(code(conform::invalid_pattern))]
#[error("case directory {} cannot be searched: {source}", .path.display())]
pub struct InvalidPatternError {
    pub path: PathBuf,
    pub source: glob::PatternError,
}

declare_error_type! {
    #[error("suite error: {0}")]
    pub enum SuiteError {
        Discovery(DiscoveryError),
        Output(ReportOutputError),
    }
}

/// The verdict report could not be written.
#[derive(Error, Diagnostic, Debug)]
#[diagnostic(code(conform::report_output))]
#[error("failed to write suite report: {source}")]
pub struct ReportOutputError {
    #[from]
    pub source: std::io::Error,
}
