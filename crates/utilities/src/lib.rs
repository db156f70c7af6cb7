//! Utility types and functions for the regmin crates.
//!
//! This crate does not use unsafe code.
#![forbid(unsafe_code)]

mod debug_trace;
mod random_test;
mod tagged_index;

pub use random_test::*;
pub use tagged_index::*;

/// Re-exported so that [`debug_trace!`] works in crates that do not depend on `log` directly.
#[doc(hidden)]
pub use log;
