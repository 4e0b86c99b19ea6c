use crate::error::{CaseError, CaseReadError, DirectiveParseError};
use nom::branch::alt;
use nom::bytes::complete::tag;
use nom::combinator::{rest, value};
use nom::sequence::pair;
use nom::IResult;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

pub const EXPECT_ERROR_PREFIX: &str = "# expect_error:";
pub const EXPECT_PREFIX: &str = "# expect:";

/// The expectation a case file declares on its first line.
///
/// The directive grammar is loosely as follows. Anything that does not match one of the two
/// prefixes at the very start of the line is not a directive.
///
/// ```text
/// directive ::= "# expect:" integer
///             | "# expect_error:" text-to-eol
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// The compiler must exit with exactly this code.
    ExitCode(i32),
    /// The compiler must exit with a non-zero code, and its standard error must contain this
    /// text verbatim.
    ErrorSubstring(String),
    /// The case carries no directive and is skipped.
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DirectiveKind {
    ExitCode,
    ErrorSubstring,
}

impl Directive {
    /// Extract the directive from the contents of a case file.
    ///
    /// Only the first line is inspected. Trailing whitespace and the line terminator are stripped,
    /// but leading whitespace is not, so an indented directive does not count.
    pub fn extract(contents: &str) -> Result<Self, DirectiveParseError> {
        let first_line = contents.lines().next().unwrap_or_default();
        Self::parse_line(first_line.trim_end())
    }

    /// Read the first line of the case file at `path` and extract its directive.
    ///
    /// The remainder of the file is never read.
    pub fn read_from(path: &Path) -> Result<Self, CaseError> {
        let read_error = |source| CaseReadError {
            path: path.to_path_buf(),
            source,
        };
        let file = File::open(path).map_err(read_error)?;
        let mut first_line = String::new();
        BufReader::new(file)
            .read_line(&mut first_line)
            .map_err(read_error)?;
        Ok(Self::extract(&first_line)?)
    }

    fn parse_line(line: &str) -> Result<Self, DirectiveParseError> {
        let Ok((_, (kind, payload))) = Self::directive(line) else {
            return Ok(Directive::None);
        };
        let payload = payload.trim();
        match kind {
            DirectiveKind::ErrorSubstring => Ok(Directive::ErrorSubstring(payload.to_owned())),
            DirectiveKind::ExitCode => payload
                .parse::<i32>()
                .map(Directive::ExitCode)
                .map_err(|_| DirectiveParseError {
                    payload: payload.to_owned(),
                }),
        }
    }

    fn directive(input: &str) -> IResult<&str, (DirectiveKind, &str)> {
        pair(
            alt((
                value(DirectiveKind::ErrorSubstring, tag(EXPECT_ERROR_PREFIX)),
                value(DirectiveKind::ExitCode, tag(EXPECT_PREFIX)),
            )),
            rest,
        )(input)
    }
}
