use std::fmt;

use bitvec::bitvec;
use bitvec::order::Lsb0;
use regmin_utilities::TagIndex;
use rustc_hash::FxHashSet;
use serde::Serialize;
use serde::Serializer;

use crate::NfaError;
use crate::Symbol;

/// A unique type for the states.
pub struct StateTag;

/// The index of a state in a [StateGraph].
pub type StateIndex = TagIndex<usize, StateTag>;

/// The label of a state as it appears in a transition table.
///
/// States are either labelled explicitly, or numbered automatically when a
/// transition table is computed.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StateLabel {
    Index(usize),
    Name(String),
}

impl From<usize> for StateLabel {
    fn from(index: usize) -> Self {
        StateLabel::Index(index)
    }
}

impl From<&str> for StateLabel {
    fn from(name: &str) -> Self {
        StateLabel::Name(name.to_string())
    }
}

impl From<String> for StateLabel {
    fn from(name: String) -> Self {
        StateLabel::Name(name)
    }
}

impl fmt::Display for StateLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StateLabel::Index(index) => write!(f, "{index}"),
            StateLabel::Name(name) => write!(f, "{name}"),
        }
    }
}

/// Numbers are written as numbers and names as strings.
impl Serialize for StateLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            StateLabel::Index(index) => serializer.serialize_u64(*index as u64),
            StateLabel::Name(name) => serializer.serialize_str(name),
        }
    }
}

/// A single state of an automaton together with its outgoing transitions.
///
/// A state can have multiple targets for the same symbol, which is what makes
/// the automaton non-deterministic.
#[derive(Clone, Debug, Default)]
pub struct State {
    accepting: bool,
    starting: bool,
    label: Option<StateLabel>,

    /// The outgoing transitions grouped per symbol, in insertion order.
    transitions: Vec<(Symbol, Vec<StateIndex>)>,
}

impl State {
    /// Returns true iff this state is accepting.
    pub fn is_accepting(&self) -> bool {
        self.accepting
    }

    /// Returns true iff this state is the starting state.
    pub fn is_starting(&self) -> bool {
        self.starting
    }

    /// Returns the label of the state, if it has been assigned.
    pub fn label(&self) -> Option<&StateLabel> {
        self.label.as_ref()
    }

    /// Returns the targets of the transitions for the given symbol.
    pub fn transitions_for(&self, symbol: Symbol) -> &[StateIndex] {
        self.transitions
            .iter()
            .find(|(other, _)| *other == symbol)
            .map(|(_, targets)| targets.as_slice())
            .unwrap_or(&[])
    }

    /// Returns the symbols that have outgoing transitions, in insertion order.
    pub fn symbols(&self) -> impl Iterator<Item = Symbol> + '_ {
        self.transitions.iter().map(|(symbol, _)| *symbol)
    }

    /// Returns all the targets of the outgoing transitions, grouped per symbol in insertion order.
    pub fn successors(&self) -> impl Iterator<Item = StateIndex> + '_ {
        self.transitions.iter().flat_map(|(_, targets)| targets.iter().copied())
    }

    fn add_transition(&mut self, symbol: Symbol, to: StateIndex) {
        match self.transitions.iter_mut().find(|(other, _)| *other == symbol) {
            Some((_, targets)) => targets.push(to),
            None => self.transitions.push((symbol, vec![to])),
        }
    }
}

/// An arena of states. The transitions refer to other states by their
/// [StateIndex], so cycles in the automaton do not lead to ownership cycles.
#[derive(Clone, Debug, Default)]
pub struct StateGraph {
    states: Vec<State>,
}

impl StateGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a new unlabelled state and returns its index.
    pub fn add_state(&mut self, accepting: bool) -> StateIndex {
        self.states.push(State {
            accepting,
            ..Default::default()
        });

        StateIndex::new(self.states.len() - 1)
    }

    /// Adds a new state with the given label and returns its index.
    pub fn add_labelled_state(&mut self, label: impl Into<StateLabel>, accepting: bool) -> StateIndex {
        self.states.push(State {
            accepting,
            label: Some(label.into()),
            ..Default::default()
        });

        StateIndex::new(self.states.len() - 1)
    }

    /// Adds a transition from `from` to `to` on the given symbol.
    pub fn add_transition(&mut self, from: StateIndex, symbol: impl Into<Symbol>, to: StateIndex) {
        assert!(*to < self.states.len(), "Target state {to} does not exist");
        self.states[*from].add_transition(symbol.into(), to);
    }

    /// Returns the state with the given index.
    pub fn state(&self, state_index: StateIndex) -> &State {
        &self.states[*state_index]
    }

    /// Returns the number of states in the arena, including unreachable ones.
    pub fn num_of_states(&self) -> usize {
        self.states.len()
    }

    /// Iterate over all state indices in the arena.
    pub fn iter_states(&self) -> impl Iterator<Item = StateIndex> + use<> {
        (0..self.num_of_states()).map(StateIndex::new)
    }

    pub fn set_accepting(&mut self, state_index: StateIndex, accepting: bool) {
        self.states[*state_index].accepting = accepting;
    }

    pub fn set_starting(&mut self, state_index: StateIndex, starting: bool) {
        self.states[*state_index].starting = starting;
    }

    /// Assigns a label to the given state. Labels can only be set once.
    pub fn set_label(&mut self, state_index: StateIndex, label: impl Into<StateLabel>) -> Result<(), NfaError> {
        let state = &mut self.states[*state_index];
        if let Some(existing) = &state.label {
            return Err(NfaError::LabelAlreadySet {
                state: state_index,
                label: existing.clone(),
            });
        }

        state.label = Some(label.into());
        Ok(())
    }

    /// Assigns a label to a state that has none yet.
    pub(crate) fn set_missing_label(&mut self, state_index: StateIndex, label: StateLabel) {
        let state = &mut self.states[*state_index];
        debug_assert!(state.label.is_none(), "State {state_index} is already labelled");
        state.label = Some(label);
    }

    /// Returns the label of the given state, or an error if it has not been assigned.
    pub fn label(&self, state_index: StateIndex) -> Result<&StateLabel, NfaError> {
        self.state(state_index)
            .label()
            .ok_or(NfaError::MissingLabel(state_index))
    }

    /// Returns every state reachable from the given state exactly once, in
    /// depth-first preorder. The successors of a state are visited in the
    /// order in which the transitions were added.
    pub fn reachable_states(&self, from: StateIndex) -> Vec<StateIndex> {
        let mut visited = bitvec![usize, Lsb0; 0; self.num_of_states()];
        let mut result = Vec::new();
        let mut stack = vec![from];

        while let Some(state_index) = stack.pop() {
            if visited[*state_index] {
                continue;
            }

            visited.set(*state_index, true);
            result.push(state_index);

            // Reversed, such that the first successor is visited first.
            let successors: Vec<StateIndex> = self.state(state_index).successors().collect();
            stack.extend(successors.into_iter().rev().filter(|next| !visited[**next]));
        }

        result
    }

    /// Returns true iff the given input leads from the given state to an
    /// accepting state.
    ///
    /// Explores the transitions on the next input symbol before the epsilon
    /// transitions, and stops at the first accepting configuration. A
    /// configuration is a pair of a state and the position in the input; every
    /// configuration is explored at most once, which also cuts off cycles of
    /// epsilon transitions.
    pub fn accepts(&self, from: StateIndex, input: &str) -> bool {
        let symbols: Vec<char> = input.chars().collect();

        let mut visited: FxHashSet<(StateIndex, usize)> = FxHashSet::default();
        let mut stack = vec![(from, 0usize)];

        while let Some((state_index, position)) = stack.pop() {
            if !visited.insert((state_index, position)) {
                continue;
            }

            let state = self.state(state_index);
            if position == symbols.len() && state.is_accepting() {
                return true;
            }

            // The stack is last in first out, so the epsilon transitions are pushed first.
            for &next in state.transitions_for(Symbol::Epsilon).iter().rev() {
                stack.push((next, position));
            }

            if let Some(&symbol) = symbols.get(position) {
                for &next in state.transitions_for(Symbol::Char(symbol)).iter().rev() {
                    stack.push((next, position + 1));
                }
            }
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    #[test]
    fn test_state_defaults() {
        let mut graph = StateGraph::new();
        let state = graph.add_state(false);
        let accepting = graph.add_state(true);

        assert!(!graph.state(state).is_accepting());
        assert!(!graph.state(state).is_starting());
        assert!(graph.state(accepting).is_accepting());
        assert!(graph.state(state).label().is_none());
    }

    #[test]
    fn test_transitions_for_symbol() {
        let mut graph = StateGraph::new();
        let state1 = graph.add_state(false);
        let state2 = graph.add_state(false);
        let state3 = graph.add_state(false);

        graph.add_transition(state1, 'a', state2);
        assert_eq!(graph.state(state1).transitions_for(Symbol::Char('a')), &[state2]);

        graph.add_transition(state1, 'a', state3);
        assert_eq!(graph.state(state1).transitions_for(Symbol::Char('a')), &[state2, state3]);
        assert!(graph.state(state1).transitions_for(Symbol::Epsilon).is_empty());
    }

    #[test]
    fn test_label_is_immutable() {
        let mut graph = StateGraph::new();
        let state = graph.add_state(false);

        assert_eq!(graph.label(state), Err(NfaError::MissingLabel(state)));
        graph.set_label(state, "q0").unwrap();
        assert_eq!(graph.label(state), Ok(&StateLabel::from("q0")));
        assert!(graph.set_label(state, "q1").is_err());
    }

    #[test]
    #[should_panic(expected = "Target state 1 does not exist")]
    fn test_add_transition_unknown_target() {
        let mut graph = StateGraph::new();
        let state = graph.add_state(false);
        graph.add_transition(state, 'a', StateIndex::new(1));
    }

    #[test]
    fn test_accepts_epsilon_cycle() {
        // Two states that only reach each other by epsilon transitions.
        let mut graph = StateGraph::new();
        let first = graph.add_state(false);
        let second = graph.add_state(false);
        let last = graph.add_state(true);

        graph.add_transition(first, Symbol::Epsilon, second);
        graph.add_transition(second, Symbol::Epsilon, first);
        graph.add_transition(second, 'a', last);

        assert!(graph.accepts(first, "a"));
        assert!(!graph.accepts(first, ""));
        assert!(!graph.accepts(first, "aa"));
    }

    #[test]
    fn test_reachable_states_preorder() {
        let mut graph = StateGraph::new();
        let a = graph.add_state(false);
        let b = graph.add_state(false);
        let c = graph.add_state(false);
        let d = graph.add_state(false);
        let unreachable = graph.add_state(false);

        graph.add_transition(a, Symbol::Epsilon, b);
        graph.add_transition(a, Symbol::Epsilon, d);
        graph.add_transition(b, 'x', c);
        graph.add_transition(c, Symbol::Epsilon, a);
        graph.add_transition(unreachable, 'x', a);

        assert_eq!(graph.reachable_states(a), vec![a, b, c, d]);
    }
}
