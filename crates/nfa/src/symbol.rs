use std::fmt;

/// The header of the epsilon column in a transition table.
pub const EPSILON_COLUMN: &str = "ε*";

/// A transition symbol, either the empty word or a single character.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Symbol {
    /// Taken without consuming any input.
    Epsilon,
    Char(char),
}

impl Symbol {
    /// Returns the character of this symbol, or None for epsilon.
    pub fn as_char(&self) -> Option<char> {
        match self {
            Symbol::Epsilon => None,
            Symbol::Char(c) => Some(*c),
        }
    }
}

impl From<char> for Symbol {
    fn from(c: char) -> Self {
        Symbol::Char(c)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Epsilon => write!(f, "ε"),
            Symbol::Char(c) => write!(f, "{c}"),
        }
    }
}
