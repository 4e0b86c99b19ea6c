//! Module for declaring harness error types.
//!
//! This module exports a macro [`declare_error_type`] that folds a set of individual diagnostic
//! structs into one umbrella enum. Every variant is transparent, so the umbrella renders exactly
//! like the struct it wraps, and every struct converts into the umbrella through `?`.

/// Declare a new umbrella error type over a list of diagnostic structs.
///
/// ```ignore
/// declare_error_type! {
///     #[error("case error: {0}")]
///     pub enum CaseError {
///         /// The first line could not be parsed.
///         DirectiveParse(DirectiveParseError),
///     }
/// }
/// ```
#[macro_export]
macro_rules! declare_error_type {
    {
        #[error($msg:expr)]
        $vis:vis enum $type_name:ident {
            $(
                $(#[doc = $doc:expr])*
                $name:ident($ty:ty),
            )*
        }
    } => {
        #[derive(thiserror::Error, miette::Diagnostic, Debug)]
        #[error($msg)]
        $vis enum $type_name {
            $(
                $(#[doc = $doc])*
                #[error(transparent)]
                #[diagnostic(transparent)]
                $name(#[from] $ty),
            )*
        }
    }
}

#[cfg(test)]
mod tests {
    use miette::Diagnostic;
    use thiserror::Error;

    #[derive(Error, Diagnostic, Debug)]
    #[diagnostic(code(conform::test_timeout))]
    #[error("timed out after {0}s")]
    struct TimeoutError(u64);

    declare_error_type! {
        #[error("case error: {0}")]
        enum CaseError {
            /// The process outlived its deadline.
            Timeout(TimeoutError),
        }
    }

    fn timed_out() -> Result<(), CaseError> {
        let waited: Result<(), TimeoutError> = Err(TimeoutError(30));
        waited?;
        Ok(())
    }

    #[test]
    fn test_umbrella_is_transparent() {
        let err = timed_out().unwrap_err();
        assert_eq!(err.to_string(), "timed out after 30s");
        let code = err.code().map(|c| c.to_string());
        assert_eq!(code.as_deref(), Some("conform::test_timeout"));
    }
}
