//! Folding per-case verdicts into a suite result.
//!
//! The suite is strictly sequential. Each case is extracted, run, and judged in turn, and its
//! verdict line is written before the next case starts. Any error along the way is reported as a
//! failing verdict for that case only.

use crate::directive::Directive;
use crate::discovery::{discover, CaseFile, DiscoveryOptions};
use crate::error::{ReportOutputError, SuiteError};
use crate::judge::{judge, Verdict};
use crate::runner::{CaseRunner, CompilerProcess};
use std::fmt;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

/// Aggregate counts over every processed case.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SuiteResult {
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl SuiteResult {
    pub fn record(&mut self, verdict: &Verdict) {
        match verdict {
            Verdict::Pass => self.passed += 1,
            Verdict::Fail(_) => self.failed += 1,
            Verdict::Skip(_) => self.skipped += 1,
        }
    }

    pub fn is_success(&self) -> bool {
        self.failed == 0
    }

    /// `0` if no case failed, `1` otherwise.
    pub fn exit_status(&self) -> u8 {
        if self.is_success() {
            0
        } else {
            1
        }
    }

    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.exit_status())
    }
}

impl fmt::Display for SuiteResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} passed, {} failed, {} skipped",
            self.passed, self.failed, self.skipped
        )
    }
}

/// Format the report line for one case.
pub fn format_case_line(name: &str, verdict: &Verdict) -> String {
    match verdict.reason() {
        Some(reason) => format!("  {}  {name}: {reason}", verdict.status()),
        None => format!("  {}  {name}", verdict.status()),
    }
}

/// Produce the verdict for a single case.
///
/// A case without a directive is skipped without running the compiler.
pub fn evaluate_case(case: &CaseFile, runner: &impl CaseRunner) -> Verdict {
    let directive = match Directive::read_from(&case.path) {
        Ok(Directive::None) => return Verdict::no_directive(),
        Ok(directive) => directive,
        Err(e) => return Verdict::Fail(e.to_string()),
    };
    tracing::debug!(case = %case.name, ?directive, "running case");
    match runner.run(&case.path) {
        Ok(outcome) => judge(&directive, &outcome),
        Err(e) => Verdict::Fail(e.to_string()),
    }
}

/// Execute the entire suite against the real compiler.
pub fn execute_suite(
    options: &SuiteOptions,
    out: &mut impl Write,
) -> Result<SuiteResult, SuiteError> {
    let suite = Suite::new(CompilerProcess::new(&options.ancc));
    suite.discover_and_run(&options.discovery, out)
}

/// Options for a whole suite run.
///
/// Most of these are derived from the command line arguments.
#[derive(Debug, Clone)]
pub struct SuiteOptions {
    pub discovery: DiscoveryOptions,
    pub ancc: PathBuf,
}

/// A suite of cases executed against one runner.
pub struct Suite<R> {
    runner: R,
}

impl<R: CaseRunner> Suite<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    /// Run `cases` in the given order, writing one line per case and then the summary.
    pub fn run(&self, cases: &[CaseFile], out: &mut impl Write) -> Result<SuiteResult, SuiteError> {
        let mut result = SuiteResult::default();
        for case in cases {
            let verdict = evaluate_case(case, &self.runner);
            writeln!(out, "{}", format_case_line(&case.name, &verdict))
                .map_err(ReportOutputError::from)?;
            result.record(&verdict);
        }
        writeln!(out).map_err(ReportOutputError::from)?;
        writeln!(out, "{result}").map_err(ReportOutputError::from)?;
        Ok(result)
    }

    /// Discover the cases described by `options` and run them.
    pub fn discover_and_run(
        &self,
        options: &DiscoveryOptions,
        out: &mut impl Write,
    ) -> Result<SuiteResult, SuiteError> {
        let cases = discover(options)?;
        self.run(&cases, out)
    }
}
