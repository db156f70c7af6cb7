use regmin_nfa::Nfa;
use regmin_nfa::NfaTable;

use crate::DfaError;
use crate::DfaTable;
use crate::minimize;
use crate::relabel;
use crate::subset_construction;

/// Computes the deterministic tables of an automaton. The table of the subset
/// construction and its relabelled version are computed once and then reused.
pub struct DfaTableBuilder {
    nfa_table: NfaTable,
    original: Option<DfaTable>,
    merged_labels: Option<DfaTable>,
}

impl DfaTableBuilder {
    pub fn new(nfa_table: NfaTable) -> Self {
        Self {
            nfa_table,
            original: None,
            merged_labels: None,
        }
    }

    pub fn from_nfa(nfa: Nfa) -> Self {
        Self::new(NfaTable::new(nfa))
    }

    pub fn nfa_table(&self) -> &NfaTable {
        &self.nfa_table
    }

    /// The table of the subset construction, where every row is labelled by
    /// the labels of the states it consists of.
    pub fn original_table(&mut self) -> Result<&DfaTable, DfaError> {
        let table = match self.original.take() {
            Some(table) => table,
            None => subset_construction(&mut self.nfa_table)?,
        };

        Ok(&*self.original.insert(table))
    }

    /// The original table with the rows renamed to `q0`, `q1`, ...
    pub fn merged_label_table(&mut self) -> Result<&DfaTable, DfaError> {
        let table = match self.merged_labels.take() {
            Some(table) => table,
            None => relabel(self.original_table()?)?,
        };

        Ok(&*self.merged_labels.insert(table))
    }

    /// The minimised version of the relabelled table.
    pub fn minimized_table(&mut self) -> Result<DfaTable, DfaError> {
        minimize(self.merged_label_table()?)
    }
}
