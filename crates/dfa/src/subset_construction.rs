use std::collections::VecDeque;
use std::time::Instant;

use log::debug;
use regmin_collections::VecSet;
use regmin_nfa::NfaTable;
use regmin_nfa::RowLabel;
use regmin_nfa::StateLabel;
use regmin_utilities::debug_trace;
use rustc_hash::FxHashSet;

use crate::DfaError;
use crate::DfaTable;

/// Converts the automaton of the given table into an equivalent deterministic
/// table, where every row corresponds to a set of states of the automaton.
///
/// The rows are labelled by the sorted labels of their states, for example
/// `q0,q1,q3`, and are discovered in breadth-first order starting from the
/// epsilon closure of the starting state. Only the first row is marked as
/// starting, a row is accepting iff it contains the accepting state.
pub fn subset_construction(nfa_table: &mut NfaTable) -> Result<DfaTable, DfaError> {
    let start = Instant::now();
    nfa_table.create()?;

    let alphabet = nfa_table.table()?.alphabet().to_vec();
    let accepting = nfa_table.accepting_state()?;

    let initial: VecSet<StateLabel> = nfa_table.starting_state_epsilon_closure()?.iter().cloned().collect();

    let mut discovered: FxHashSet<VecSet<StateLabel>> = FxHashSet::default();
    discovered.insert(initial.clone());

    let mut queue = VecDeque::from([initial]);
    let mut table = DfaTable::new(alphabet.clone());

    while let Some(subset) = queue.pop_front() {
        let mut targets = Vec::with_capacity(alphabet.len());

        for &symbol in &alphabet {
            let mut reached = Vec::new();
            for label in &subset {
                for target in nfa_table.row_columns(label)?.targets(symbol) {
                    reached.push(target.clone());
                    reached.extend(nfa_table.row_epsilon_closure(target)?.iter().cloned());
                }
            }

            let reached: VecSet<StateLabel> = reached.into_iter().collect();
            if reached.is_empty() {
                targets.push(None);
                continue;
            }

            targets.push(Some(reached.to_string()));
            if discovered.insert(reached.clone()) {
                queue.push_back(reached);
            }
        }

        let label = RowLabel::new(subset.to_string(), table.num_of_states() == 0, subset.contains(accepting));
        debug_trace!("Row {label}: {targets:?}");
        table.add_row(label, targets)?;
    }

    debug!(
        "Subset construction: {} states, time {:.3}s",
        table.num_of_states(),
        start.elapsed().as_secs_f64()
    );
    Ok(table)
}
