use regmin_nfa::NfaError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DfaError {
    #[error(transparent)]
    Nfa(#[from] NfaError),

    #[error("State {row} has a transition on {symbol} to unknown state {target}")]
    UnknownTarget { row: String, symbol: char, target: String },

    #[error("State {row} has {actual} targets, but the alphabet has {expected} symbols")]
    ColumnCount { row: String, expected: usize, actual: usize },

    #[error("State {0} occurs more than once in the table")]
    DuplicateState(String),

    #[error("The table has no starting state")]
    MissingStartState,
}
