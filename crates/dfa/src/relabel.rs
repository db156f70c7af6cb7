use regmin_nfa::RowLabel;

use crate::DfaError;
use crate::DfaRow;
use crate::DfaTable;

/// Renames the rows of the table to `q0`, `q1`, ... in row order. The
/// decorations of the rows are kept and every target is renamed accordingly.
pub fn relabel(table: &DfaTable) -> Result<DfaTable, DfaError> {
    let name = |index: usize| format!("q{index}");

    let mut rows = Vec::with_capacity(table.num_of_states());
    for state_index in table.iter_states() {
        let targets = table
            .target_indices(state_index)?
            .into_iter()
            .map(|target| target.map(|target| name(*target)))
            .collect();

        let label: &RowLabel<String> = &table.row(state_index).label;
        rows.push(DfaRow {
            label: label.with_label(name(*state_index)),
            targets,
        });
    }

    DfaTable::from_rows(table.alphabet().to_vec(), rows)
}
