use crate::directive::Directive;
use crate::runner::ProcessOutcome;
use std::fmt;

/// The judgement for a single case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Pass,
    Fail(String),
    Skip(String),
}

/// The status column of a verdict line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Pass,
    Fail,
    Skip,
}

impl Verdict {
    /// The verdict for a case that declares no directive.
    pub fn no_directive() -> Self {
        Verdict::Skip("no directive".to_owned())
    }

    pub fn status(&self) -> Status {
        match self {
            Verdict::Pass => Status::Pass,
            Verdict::Fail(_) => Status::Fail,
            Verdict::Skip(_) => Status::Skip,
        }
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            Verdict::Pass => None,
            Verdict::Fail(reason) | Verdict::Skip(reason) => Some(reason.as_str()),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Status::Pass => "PASS",
            Status::Fail => "FAIL",
            Status::Skip => "SKIP",
        };
        f.write_str(label)
    }
}

/// Judge an observed compiler outcome against the directive of its case.
///
/// Substring matching is literal and case-sensitive over the whole captured standard error, so
/// an expected message may span lines.
pub fn judge(directive: &Directive, outcome: &ProcessOutcome) -> Verdict {
    match directive {
        Directive::None => Verdict::no_directive(),
        Directive::ExitCode(expected) if outcome.exit_code == *expected => Verdict::Pass,
        Directive::ExitCode(expected) => Verdict::Fail(format!(
            "expected exit code {expected}, got {}",
            outcome.exit_code
        )),
        Directive::ErrorSubstring(_) if outcome.exit_code == 0 => {
            Verdict::Fail("expected error but build succeeded".to_owned())
        }
        Directive::ErrorSubstring(expected) if outcome.stderr.contains(expected.as_str()) => {
            Verdict::Pass
        }
        Directive::ErrorSubstring(expected) => Verdict::Fail(format!(
            "expected '{expected}' in stderr, got: {}",
            outcome.stderr.trim()
        )),
    }
}
