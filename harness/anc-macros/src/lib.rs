//! Macros shared by the conformance harness crates.

#[cfg(feature = "assertion-macros")]
pub mod assertions;
pub mod error;
