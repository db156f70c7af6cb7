//! Various collections implemented for the regmin crates.
//!
//! This crate does not use unsafe code.
#![forbid(unsafe_code)]

mod vecset;

pub use vecset::*;
