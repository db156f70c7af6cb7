use crate::EpsilonColumn;
use crate::Nfa;
use crate::NfaError;
use crate::NfaRow;
use crate::NfaTransitionTable;
use crate::StateLabel;

/// Owns an [Nfa] together with its transition table, where the epsilon column
/// of every row holds the full epsilon closure of the row.
///
/// The table is computed once by [NfaTable::create] and the automaton should
/// not change afterwards.
pub struct NfaTable {
    nfa: Nfa,
    table: Option<NfaTransitionTable>,
}

impl NfaTable {
    pub fn new(nfa: Nfa) -> Self {
        Self { nfa, table: None }
    }

    /// Labels the states of the automaton and builds the table, unless that
    /// has already happened.
    pub fn create(&mut self) -> Result<&NfaTransitionTable, NfaError> {
        if self.table.is_none() {
            self.table = Some(self.nfa.build_table(EpsilonColumn::Closure)?);
        }

        self.table()
    }

    /// Returns the table computed by [NfaTable::create].
    pub fn table(&self) -> Result<&NfaTransitionTable, NfaError> {
        self.table.as_ref().ok_or(NfaError::TableNotBuilt)
    }

    /// The symbols of the automaton, which are the columns of the table.
    pub fn columns(&self) -> Vec<char> {
        self.nfa.alphabet()
    }

    /// The label of the input state.
    pub fn starting_state(&self) -> Result<&StateLabel, NfaError> {
        self.nfa.graph().label(self.nfa.input_state())
    }

    /// The label of the output state.
    pub fn accepting_state(&self) -> Result<&StateLabel, NfaError> {
        self.nfa.graph().label(self.nfa.output_state())
    }

    /// Returns the row of the state with the given label.
    pub fn row_columns(&self, label: &StateLabel) -> Result<&NfaRow, NfaError> {
        self.table()?
            .row(label)
            .ok_or_else(|| NfaError::UnknownState(label.clone()))
    }

    /// Returns the epsilon closure of the state with the given label.
    pub fn row_epsilon_closure(&self, label: &StateLabel) -> Result<&[StateLabel], NfaError> {
        Ok(&self.row_columns(label)?.epsilon)
    }

    pub fn starting_state_epsilon_closure(&self) -> Result<&[StateLabel], NfaError> {
        self.table()?;
        self.row_epsilon_closure(self.starting_state()?)
    }
}
