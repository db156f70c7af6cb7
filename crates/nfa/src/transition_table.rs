use std::fmt;

use itertools::Itertools;
use rustc_hash::FxHashMap;
use serde::Serialize;
use serde::Serializer;
use serde::ser::SerializeMap;

use crate::EPSILON_COLUMN;
use crate::NfaError;
use crate::RowLabel;
use crate::StateGraph;
use crate::StateIndex;
use crate::StateLabel;
use crate::Symbol;

/// A single row of an [NfaTransitionTable].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NfaRow {
    pub label: RowLabel<StateLabel>,

    /// The targets for every symbol of the alphabet, in alphabet order.
    pub columns: Vec<(char, Vec<StateLabel>)>,

    /// The labels in the epsilon column.
    pub epsilon: Vec<StateLabel>,
}

impl NfaRow {
    /// Returns the targets in the column of the given symbol, which is empty
    /// for symbols outside of the alphabet.
    pub fn targets(&self, symbol: char) -> &[StateLabel] {
        self.columns
            .iter()
            .find(|(c, _)| *c == symbol)
            .map(|(_, targets)| targets.as_slice())
            .unwrap_or(&[])
    }
}

/// The transition table of an NFA, with one row for every reachable state in
/// the order in which the states were discovered.
#[derive(Clone, Debug, Default)]
pub struct NfaTransitionTable {
    alphabet: Vec<char>,
    rows: Vec<NfaRow>,

    /// Maps the plain label of a row to its position in `rows`.
    index: FxHashMap<StateLabel, usize>,
}

impl NfaTransitionTable {
    /// The symbols of the columns, in column order.
    pub fn alphabet(&self) -> &[char] {
        &self.alphabet
    }

    pub fn rows(&self) -> &[NfaRow] {
        &self.rows
    }

    pub fn num_of_rows(&self) -> usize {
        self.rows.len()
    }

    /// Returns the row of the state with the given plain label.
    pub fn row(&self, label: &StateLabel) -> Option<&NfaRow> {
        self.index.get(label).map(|position| &self.rows[*position])
    }
}

/// Determines the content of the epsilon column.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum EpsilonColumn {
    /// Only the direct targets of the epsilon transitions.
    Direct,

    /// The full epsilon closure, starting with the state itself.
    Closure,
}

/// Builds the table for the given states, which must all be labelled.
pub(crate) fn build_transition_table(
    graph: &StateGraph,
    states: &[StateIndex],
    alphabet: Vec<char>,
    epsilon_column: EpsilonColumn,
) -> Result<NfaTransitionTable, NfaError> {
    let mut rows = Vec::with_capacity(states.len());
    let mut index = FxHashMap::default();

    for &state_index in states {
        let state = graph.state(state_index);
        let label = graph.label(state_index)?.clone();

        let labels_of = |targets: &[StateIndex]| -> Result<Vec<StateLabel>, NfaError> {
            targets.iter().map(|target| graph.label(*target).cloned()).collect()
        };

        let mut columns = Vec::with_capacity(alphabet.len());
        for &symbol in &alphabet {
            columns.push((symbol, labels_of(state.transitions_for(Symbol::Char(symbol)))?));
        }

        let epsilon = match epsilon_column {
            EpsilonColumn::Direct => labels_of(state.transitions_for(Symbol::Epsilon))?,
            EpsilonColumn::Closure => graph.epsilon_closure(state_index)?,
        };

        if index.insert(label.clone(), rows.len()).is_some() {
            return Err(NfaError::DuplicateLabel(label));
        }

        rows.push(NfaRow {
            label: RowLabel::new(label, state.is_starting(), state.is_accepting()),
            columns,
            epsilon,
        });
    }

    Ok(NfaTransitionTable { alphabet, rows, index })
}

/// The columns of a single row, the alphabet followed by the epsilon column.
struct RowColumns<'a>(&'a NfaRow);

impl Serialize for RowColumns<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.columns.len() + 1))?;
        for (symbol, targets) in &self.0.columns {
            map.serialize_entry(&symbol.to_string(), targets)?;
        }

        map.serialize_entry(EPSILON_COLUMN, &self.0.epsilon)?;
        map.end()
    }
}

/// Written as a map from the decorated row label to the columns of the row.
impl Serialize for NfaTransitionTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.rows.len()))?;
        for row in &self.rows {
            map.serialize_entry(&row.label.to_string(), &RowColumns(row))?;
        }

        map.end()
    }
}

impl fmt::Display for NfaTransitionTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            write!(f, "{}:", row.label)?;
            for (symbol, targets) in &row.columns {
                write!(f, " {symbol} [{}]", targets.iter().join(","))?;
            }

            writeln!(f, " {EPSILON_COLUMN} [{}]", row.epsilon.iter().join(","))?;
        }

        Ok(())
    }
}
