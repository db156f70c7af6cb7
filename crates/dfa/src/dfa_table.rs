use std::fmt;

use itertools::Itertools;
use regmin_nfa::RowLabel;
use regmin_utilities::TagIndex;
use rustc_hash::FxHashMap;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;
use serde::de;
use serde::de::MapAccess;
use serde::de::Visitor;
use serde::ser::SerializeMap;

use crate::DfaError;

/// A unique type for the states of a deterministic table.
pub struct DfaStateTag;

/// The index of a row in a [DfaTable].
pub type DfaStateIndex = TagIndex<usize, DfaStateTag>;

/// A row of a [DfaTable], with at most one target for every symbol.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DfaRow {
    pub label: RowLabel<String>,

    /// The label of the target for every symbol of the alphabet, in alphabet order.
    pub targets: Vec<Option<String>>,
}

/// The transition table of a deterministic finite automaton. The rows are
/// kept in the order in which they were added and the targets refer to the
/// plain labels of other rows.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DfaTable {
    alphabet: Vec<char>,
    rows: Vec<DfaRow>,

    /// Maps the plain label of a row to its index.
    index: FxHashMap<String, DfaStateIndex>,
}

impl DfaTable {
    /// Creates a table without rows for the given alphabet.
    pub fn new(alphabet: Vec<char>) -> Self {
        Self {
            alphabet,
            rows: Vec::new(),
            index: FxHashMap::default(),
        }
    }

    /// Creates a table with the given rows.
    pub fn from_rows(alphabet: Vec<char>, rows: impl IntoIterator<Item = DfaRow>) -> Result<Self, DfaError> {
        let mut table = Self::new(alphabet);
        for row in rows {
            table.add_row(row.label, row.targets)?;
        }

        Ok(table)
    }

    /// Adds a row with a target for every symbol of the alphabet.
    pub fn add_row(&mut self, label: RowLabel<String>, targets: Vec<Option<String>>) -> Result<DfaStateIndex, DfaError> {
        if targets.len() != self.alphabet.len() {
            return Err(DfaError::ColumnCount {
                row: label.label,
                expected: self.alphabet.len(),
                actual: targets.len(),
            });
        }

        if self.index.contains_key(&label.label) {
            return Err(DfaError::DuplicateState(label.label));
        }

        let state_index = DfaStateIndex::new(self.rows.len());
        self.index.insert(label.label.clone(), state_index);
        self.rows.push(DfaRow { label, targets });
        Ok(state_index)
    }

    pub fn alphabet(&self) -> &[char] {
        &self.alphabet
    }

    pub fn rows(&self) -> &[DfaRow] {
        &self.rows
    }

    pub fn num_of_states(&self) -> usize {
        self.rows.len()
    }

    pub fn row(&self, state_index: DfaStateIndex) -> &DfaRow {
        &self.rows[*state_index]
    }

    /// Iterate over all state indices.
    pub fn iter_states(&self) -> impl Iterator<Item = DfaStateIndex> + use<> {
        (0..self.num_of_states()).map(DfaStateIndex::new)
    }

    /// Returns the row for the given key, which can be the plain label or the
    /// label decorated with `->`, `*` or `->*`.
    pub fn get(&self, key: &str) -> Option<&DfaRow> {
        let state_index = self.state_index(key).or_else(|| {
            let row_label: RowLabel<String> = key.parse().ok()?;
            self.state_index(&row_label.label)
        })?;

        Some(self.row(state_index))
    }

    /// Returns the index of the row with the given plain label.
    pub fn state_index(&self, label: &str) -> Option<DfaStateIndex> {
        self.index.get(label).copied()
    }

    /// Returns the label of the target of the given state on the given symbol.
    pub fn target(&self, state_index: DfaStateIndex, symbol: char) -> Option<&str> {
        let position = self.alphabet.iter().position(|c| *c == symbol)?;
        self.rows[*state_index].targets[position].as_deref()
    }

    /// Returns the index of the target of every transition, in alphabet order.
    pub fn target_indices(&self, state_index: DfaStateIndex) -> Result<Vec<Option<DfaStateIndex>>, DfaError> {
        let row = self.row(state_index);
        row.targets
            .iter()
            .zip(&self.alphabet)
            .map(|(target, symbol)| match target {
                None => Ok(None),
                Some(target) => self
                    .state_index(target)
                    .map(Some)
                    .ok_or_else(|| DfaError::UnknownTarget {
                        row: row.label.label.clone(),
                        symbol: *symbol,
                        target: target.clone(),
                    }),
            })
            .collect()
    }

    /// Returns the first row that is marked as starting.
    pub fn start_state(&self) -> Result<DfaStateIndex, DfaError> {
        self.rows
            .iter()
            .position(|row| row.label.is_start)
            .map(DfaStateIndex::new)
            .ok_or(DfaError::MissingStartState)
    }

    /// Returns true iff the given input leads from the starting state to an
    /// accepting state. Input without a starting state, with a symbol outside
    /// of the alphabet or without a transition is rejected.
    pub fn accepts(&self, input: &str) -> bool {
        let Ok(mut current) = self.start_state() else {
            return false;
        };

        for symbol in input.chars() {
            match self.target(current, symbol).and_then(|target| self.state_index(target)) {
                Some(next) => current = next,
                None => return false,
            }
        }

        self.row(current).label.is_accept
    }
}

/// Prints one line for every transition.
impl fmt::Display for DfaTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            for (symbol, target) in self.alphabet.iter().zip(&row.targets) {
                if let Some(target) = target {
                    writeln!(f, "{} --{symbol}--> {target}", row.label)?;
                }
            }
        }

        Ok(())
    }
}

/// The columns of a single row, mapping every symbol to a label or null.
struct RowTargets<'a> {
    alphabet: &'a [char],
    targets: &'a [Option<String>],
}

impl Serialize for RowTargets<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.alphabet.len()))?;
        for (symbol, target) in self.alphabet.iter().zip(self.targets) {
            map.serialize_entry(&symbol.to_string(), target)?;
        }

        map.end()
    }
}

/// Written as a map from the decorated row label to the columns of the row.
impl Serialize for DfaTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.rows.len()))?;
        for row in &self.rows {
            map.serialize_entry(
                &row.label.to_string(),
                &RowTargets {
                    alphabet: &self.alphabet,
                    targets: &row.targets,
                },
            )?;
        }

        map.end()
    }
}

/// The columns of a row as they occur in the document.
struct Columns(Vec<(char, Option<String>)>);

impl<'de> Deserialize<'de> for Columns {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ColumnsVisitor;

        impl<'de> Visitor<'de> for ColumnsVisitor {
            type Value = Columns;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map from symbols to state labels or null")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut columns = Vec::new();
                while let Some((key, target)) = access.next_entry::<String, Option<String>>()? {
                    let mut chars = key.chars();
                    let symbol = match (chars.next(), chars.next()) {
                        (Some(symbol), None) => symbol,
                        _ => return Err(de::Error::custom(format!("column {key} is not a single symbol"))),
                    };

                    columns.push((symbol, target));
                }

                Ok(Columns(columns))
            }
        }

        deserializer.deserialize_map(ColumnsVisitor)
    }
}

/// Reads the rows in document order. The alphabet consists of the symbols of
/// all columns in order of first occurrence, and a missing column is read as
/// the absence of a transition.
impl<'de> Deserialize<'de> for DfaTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TableVisitor;

        impl<'de> Visitor<'de> for TableVisitor {
            type Value = DfaTable;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map from row labels to columns")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut rows: Vec<(RowLabel<String>, Columns)> = Vec::new();
                while let Some((key, columns)) = access.next_entry::<String, Columns>()? {
                    let label: RowLabel<String> = key.parse().map_err(<A::Error as de::Error>::custom)?;
                    rows.push((label, columns));
                }

                let alphabet: Vec<char> = rows
                    .iter()
                    .flat_map(|(_, columns)| columns.0.iter().map(|(symbol, _)| *symbol))
                    .unique()
                    .collect();

                let rows = rows.into_iter().map(|(label, columns)| DfaRow {
                    label,
                    targets: alphabet
                        .iter()
                        .map(|symbol| {
                            columns
                                .0
                                .iter()
                                .find(|(other, _)| other == symbol)
                                .and_then(|(_, target)| target.clone())
                        })
                        .collect(),
                });

                DfaTable::from_rows(alphabet.clone(), rows).map_err(de::Error::custom)
            }
        }

        deserializer.deserialize_map(TableVisitor)
    }
}
