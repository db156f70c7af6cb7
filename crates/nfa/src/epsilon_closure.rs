use bitvec::bitvec;
use bitvec::order::Lsb0;

use crate::NfaError;
use crate::StateGraph;
use crate::StateIndex;
use crate::StateLabel;
use crate::Symbol;

impl StateGraph {
    /// Returns the labels of all states that can be reached from the given
    /// state by zero or more epsilon transitions.
    ///
    /// The first label is always the label of the given state itself, the
    /// others follow in depth-first order. Every state in the closure must
    /// have a label.
    pub fn epsilon_closure(&self, state_index: StateIndex) -> Result<Vec<StateLabel>, NfaError> {
        let mut closure = vec![self.label(state_index)?.clone()];

        let mut visited = bitvec![usize, Lsb0; 0; self.num_of_states()];
        visited.set(*state_index, true);

        let mut stack: Vec<StateIndex> = epsilon_successors(self, state_index);
        while let Some(next) = stack.pop() {
            if visited[*next] {
                continue;
            }

            visited.set(*next, true);
            closure.push(self.label(next)?.clone());
            stack.extend(epsilon_successors(self, next));
        }

        Ok(closure)
    }
}

/// Returns the epsilon successors reversed, so that popping them from a stack
/// yields them in insertion order.
fn epsilon_successors(graph: &StateGraph, state_index: StateIndex) -> Vec<StateIndex> {
    graph
        .state(state_index)
        .transitions_for(Symbol::Epsilon)
        .iter()
        .rev()
        .copied()
        .collect()
}
