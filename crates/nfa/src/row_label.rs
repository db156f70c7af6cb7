use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

const START_PREFIX: &str = "->";
const ACCEPT_PREFIX: &str = "*";

/// The label of a row in a transition table, decorated with whether the row
/// belongs to the starting state and whether it belongs to an accepting state.
///
/// Written as `->label`, `*label`, `->*label` or `label`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RowLabel<L> {
    pub label: L,
    pub is_start: bool,
    pub is_accept: bool,
}

impl<L> RowLabel<L> {
    pub fn new(label: L, is_start: bool, is_accept: bool) -> Self {
        Self {
            label,
            is_start,
            is_accept,
        }
    }

    /// Returns a row label with the same decoration for a different label.
    pub fn with_label<M>(&self, label: M) -> RowLabel<M> {
        RowLabel::new(label, self.is_start, self.is_accept)
    }
}

impl<L: fmt::Display> fmt::Display for RowLabel<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_start {
            write!(f, "{START_PREFIX}")?;
        }

        if self.is_accept {
            write!(f, "{ACCEPT_PREFIX}")?;
        }

        write!(f, "{}", self.label)
    }
}

impl FromStr for RowLabel<String> {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (is_start, rest) = match s.strip_prefix(START_PREFIX) {
            Some(rest) => (true, rest),
            None => (false, s),
        };

        let (is_accept, label) = match rest.strip_prefix(ACCEPT_PREFIX) {
            Some(label) => (true, label),
            None => (false, rest),
        };

        Ok(RowLabel::new(label.to_string(), is_start, is_accept))
    }
}
