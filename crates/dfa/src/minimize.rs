use std::time::Instant;

use log::debug;
use regmin_utilities::TagIndex;
use regmin_utilities::debug_trace;

use crate::DfaError;
use crate::DfaRow;
use crate::DfaStateIndex;
use crate::DfaTable;

/// A unique type for the blocks of a partition.
pub struct BlockTag;

/// The index of a block in an equivalence row.
pub type BlockIndex = TagIndex<usize, BlockTag>;

/// A partition of the states into blocks of equivalent states. The states in
/// a block are kept in table order.
pub type EquivalenceRow = Vec<Vec<DfaStateIndex>>;

/// Computes the sequence of equivalence rows, starting with the partition into
/// non-accepting and accepting states, where every next row refines the blocks
/// of the previous one. The last row is the first that is equal to its
/// predecessor.
///
/// Two states of the same block remain equivalent iff for every symbol either
/// both have no transition, or both targets are in the same block of the
/// previous row. Every state is compared to the first state of the new blocks
/// that were split off from its block so far, and joins the first one that
/// matches.
pub fn equivalence_rows(table: &DfaTable) -> Result<Vec<EquivalenceRow>, DfaError> {
    let transitions: Vec<Vec<Option<DfaStateIndex>>> = table
        .iter_states()
        .map(|state_index| table.target_indices(state_index))
        .collect::<Result<_, _>>()?;

    let (accepting, non_accepting): (Vec<DfaStateIndex>, Vec<DfaStateIndex>) = table
        .iter_states()
        .partition(|state_index| table.row(*state_index).label.is_accept);

    let mut rows = Vec::new();
    let mut current: EquivalenceRow = vec![non_accepting, accepting];
    loop {
        let next = refine(&current, &transitions);
        debug_trace!("Equivalence row {}: {next:?}", rows.len() + 1);

        let fixpoint = next == current;
        rows.push(current);
        current = next;

        if fixpoint {
            rows.push(current);
            return Ok(rows);
        }
    }
}

/// Splits every block of the partition into blocks of states that move into
/// the same blocks of the partition.
fn refine(partition: &[Vec<DfaStateIndex>], transitions: &[Vec<Option<DfaStateIndex>>]) -> EquivalenceRow {
    let block_of = block_lookup(partition, transitions.len());

    let equivalent = |left: DfaStateIndex, right: DfaStateIndex| {
        transitions[*left]
            .iter()
            .zip(&transitions[*right])
            .all(|(left, right)| match (left, right) {
                (None, None) => true,
                (Some(left), Some(right)) => block_of[**left] == block_of[**right],
                _ => false,
            })
    };

    let mut result: EquivalenceRow = Vec::with_capacity(partition.len());
    for block in partition {
        if block.len() <= 1 {
            result.push(block.clone());
            continue;
        }

        // Only the blocks split off from the current block are candidates.
        let first_new = result.len();
        for &state_index in block {
            match result[first_new..]
                .iter()
                .position(|candidate| equivalent(candidate[0], state_index))
            {
                Some(position) => result[first_new + position].push(state_index),
                None => result.push(vec![state_index]),
            }
        }
    }

    result
}

/// Returns the block of every state.
fn block_lookup(partition: &[Vec<DfaStateIndex>], num_of_states: usize) -> Vec<BlockIndex> {
    let mut block_of = vec![BlockIndex::new(0); num_of_states];
    for (block_index, block) in partition.iter().enumerate() {
        for state_index in block {
            block_of[**state_index] = BlockIndex::new(block_index);
        }
    }

    block_of
}

/// Minimises the given table by merging equivalent states.
///
/// Every block of the final equivalence row is represented by its first state.
/// The result keeps the rows of the representatives in table order and
/// redirects every transition to the representative of its target. A block
/// that contains the starting state is marked as starting.
pub fn minimize(table: &DfaTable) -> Result<DfaTable, DfaError> {
    let start = Instant::now();
    let rows = equivalence_rows(table)?;
    let partition = rows.last().map(|row| row.as_slice()).unwrap_or_default();

    let mut representative: Vec<DfaStateIndex> = table.iter_states().collect();
    let mut is_start = vec![false; table.num_of_states()];
    for block in partition {
        if let Some(&first) = block.first() {
            for &state_index in block {
                representative[*state_index] = first;
                is_start[*first] |= table.row(state_index).label.is_start;
            }
        }
    }

    let mut minimized = Vec::new();
    for state_index in table.iter_states() {
        if representative[*state_index] != state_index {
            continue;
        }

        let row = table.row(state_index);
        let targets = table
            .target_indices(state_index)?
            .into_iter()
            .map(|target| target.map(|target| table.row(representative[*target]).label.label.clone()))
            .collect();

        let mut label = row.label.clone();
        label.is_start = is_start[*state_index];
        minimized.push(DfaRow { label, targets });
    }

    debug!(
        "Minimisation: {} to {} states in {} rounds, time {:.3}s",
        table.num_of_states(),
        minimized.len(),
        rows.len() - 1,
        start.elapsed().as_secs_f64()
    );

    DfaTable::from_rows(table.alphabet().to_vec(), minimized)
}
