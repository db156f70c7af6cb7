//!
//! A crate containing non-deterministic finite automata that are composed from
//! small fragments, together with their epsilon closures and transition tables.
//!
//! This crate does not use unsafe code.

#![forbid(unsafe_code)]

mod epsilon_closure;
mod error;
mod fragment;
mod nfa;
mod nfa_table;
mod random_nfa;
mod row_label;
mod state;
mod symbol;
mod transition_table;

pub use error::*;
pub use fragment::*;
pub use nfa::*;
pub use nfa_table::*;
pub use random_nfa::*;
pub use row_label::*;
pub use state::*;
pub use symbol::*;
pub use transition_table::*;
