//! Conformance test runner for the `ancc` compiler.
//!
//! Each case file carries at most one directive on its first line. The runner invokes the
//! compiler as `ancc run <case>`, judges the exit code and standard error against the directive,
//! and folds the verdicts into a [`SuiteResult`] whose exit code is the suite's only automation
//! facing signal.

pub mod directive;
pub mod discovery;
pub mod error;
pub mod judge;
pub mod runner;
pub mod suite;

pub use directive::Directive;
pub use discovery::{discover, CaseFile, DiscoveryOptions};
pub use judge::{judge, Status, Verdict};
pub use runner::{CaseRunner, CompilerProcess, ProcessOutcome};
pub use suite::{execute_suite, Suite, SuiteOptions, SuiteResult};
