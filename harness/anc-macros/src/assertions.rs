//! Assertion macros
//!
//! This module contains macros for performing assertions in harness tests. Notable macros defined
//! in this module are:
//!
//! - [`assert_ok!`]
//! - [`assert_err!`]
//! - [`assert_some!`]
//! - [`assert_none!`]
//! - [`assert_matches!`]
//!
//! This module is only available when the `assertion-macros` feature is enabled.

/// Assert that a `Result` is `Ok`, returning the value inside the `Ok` variant.
#[macro_export]
macro_rules! assert_ok {
    ($expr:expr) => {{
        match $expr {
            ::std::result::Result::Ok(val) => val,
            ::std::result::Result::Err(err) => {
                panic!("assertion failed: Err({:?})", err);
            }
        }
    }};
}

/// Assert that a `Result` is `Err`, returning the error inside the `Err` variant.
#[macro_export]
macro_rules! assert_err {
    ($expr:expr) => {{
        match $expr {
            ::std::result::Result::Ok(val) => {
                panic!("assertion failed: Ok({:?})", val);
            }
            ::std::result::Result::Err(err) => err,
        }
    }};
}

/// Assert that an `Option` is `Some`, returning the value inside the `Some` variant.
#[macro_export]
macro_rules! assert_some {
    ($expr:expr) => {{
        match $expr {
            ::std::option::Option::Some(val) => val,
            ::std::option::Option::None => {
                panic!("assertion failed: None");
            }
        }
    }};
}

/// Assert that an `Option` is `None`.
#[macro_export]
macro_rules! assert_none {
    ($expr:expr) => {{
        if let ::std::option::Option::Some(val) = $expr {
            panic!("assertion failed: Some({:?})", val);
        };
    }};
}

/// Assert that an expression matches a pattern, evaluating `$output` with the pattern's bindings.
#[macro_export]
macro_rules! assert_matches {
    ($expr:expr, $ty:pat_param => $output:expr) => {{
        match $expr {
            $ty => $output,
            ref other => {
                panic!(
                    "assertion failed: expected {:?} to match {}",
                    other,
                    stringify!($ty)
                );
            }
        }
    }};
    ($expr:expr, $ty:pat_param) => {
        $crate::assert_matches!($expr, $ty => ())
    };
}

#[cfg(test)]
mod tests {
    #[derive(Debug)]
    enum Outcome {
        Exited(i32),
        TimedOut,
    }

    #[test]
    fn test_std_result_assertions() {
        let result: Result<i32, &str> = Ok(0);
        assert_eq!(assert_ok!(result), 0);
        let result: Result<i32, &str> = Err("missing binary");
        assert_eq!(assert_err!(result), "missing binary");
    }

    #[test]
    fn test_std_option_assertions() {
        let reason: Option<&str> = Some("no directive");
        assert_eq!(assert_some!(reason), "no directive");
        let reason: Option<&str> = None;
        assert_none!(reason);
    }

    #[test]
    #[should_panic]
    fn test_assert_some_on_none() {
        let reason: Option<&str> = None;
        assert_some!(reason);
    }

    #[test]
    #[should_panic]
    fn test_assert_none_on_some() {
        assert_none!(Some("timed out"));
    }

    #[test]
    fn test_assert_matches_binds() {
        let code = assert_matches!(Outcome::Exited(2), Outcome::Exited(c) => c);
        assert_eq!(code, 2);
        assert_matches!(Outcome::TimedOut, Outcome::TimedOut);
    }

    #[test]
    #[should_panic]
    fn test_assert_ok_on_err() {
        let result: Result<i32, &str> = Err("error");
        assert_ok!(result);
    }

    #[test]
    #[should_panic]
    fn test_assert_matches_mismatch() {
        assert_matches!(Outcome::TimedOut, Outcome::Exited(_));
    }
}
