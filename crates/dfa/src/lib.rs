//!
//! A crate that determinises non-deterministic finite automata by the subset
//! construction, and minimises the resulting transition tables by partition
//! refinement.
//!
//! This crate does not use unsafe code.

#![forbid(unsafe_code)]

mod builder;
mod dfa_table;
mod error;
mod minimize;
mod relabel;
mod subset_construction;

pub use builder::*;
pub use dfa_table::*;
pub use error::*;
pub use minimize::*;
pub use relabel::*;
pub use subset_construction::*;
