use std::time::Instant;

use itertools::Itertools;
use log::debug;
use rustc_hash::FxHashSet;

use crate::EpsilonColumn;
use crate::NfaError;
use crate::NfaTransitionTable;
use crate::StateGraph;
use crate::StateIndex;
use crate::StateLabel;
use crate::build_transition_table;

/// A non-deterministic finite automaton with epsilon transitions, consisting
/// of a graph of states with a unique input and output state.
#[derive(Clone, Debug)]
pub struct Nfa {
    graph: StateGraph,
    input: StateIndex,
    output: StateIndex,
}

impl Nfa {
    /// Creates an automaton from a graph, the flags of the states are taken as they are.
    pub fn new(graph: StateGraph, input: StateIndex, output: StateIndex) -> Self {
        debug_assert!(
            *input < graph.num_of_states() && *output < graph.num_of_states(),
            "The input and output state must be part of the graph"
        );

        Self { graph, input, output }
    }

    pub fn input_state(&self) -> StateIndex {
        self.input
    }

    pub fn output_state(&self) -> StateIndex {
        self.output
    }

    pub fn graph(&self) -> &StateGraph {
        &self.graph
    }

    /// Returns true iff the automaton accepts the given input.
    pub fn test(&self, input: &str) -> bool {
        self.graph.accepts(self.input, input)
    }

    /// Returns the symbols used on the transitions of the reachable states,
    /// without epsilon.
    ///
    /// The symbols of states that are discovered later by a depth-first search
    /// from the input state come first.
    pub fn alphabet(&self) -> Vec<char> {
        self.graph
            .reachable_states(self.input)
            .into_iter()
            .rev()
            .flat_map(|state_index| self.graph.state(state_index).symbols())
            .filter_map(|symbol| symbol.as_char())
            .unique()
            .collect()
    }

    /// Numbers the reachable states without a label in depth-first order,
    /// starting at one. Returns the reachable states in that order.
    ///
    /// Numbers that are already written as the label of another state are
    /// skipped, such that the rows of the resulting tables stay distinct.
    pub fn set_labels_for_states(&mut self) -> Vec<StateIndex> {
        let states = self.graph.reachable_states(self.input);

        let taken: FxHashSet<String> = self
            .graph
            .iter_states()
            .filter_map(|state_index| self.graph.state(state_index).label())
            .map(|label| label.to_string())
            .collect();

        let mut number = 0;
        let mut num_of_labelled = 0;
        for &state_index in &states {
            if self.graph.state(state_index).label().is_none() {
                number += 1;
                while taken.contains(&number.to_string()) {
                    number += 1;
                }

                self.graph.set_missing_label(state_index, StateLabel::Index(number));
                num_of_labelled += 1;
            }
        }

        debug!("Labelled {num_of_labelled} of {} reachable states", states.len());
        states
    }

    /// Returns the labels of the epsilon closure of the given state.
    pub fn epsilon_closure(&self, state_index: StateIndex) -> Result<Vec<StateLabel>, NfaError> {
        self.graph.epsilon_closure(state_index)
    }

    /// Labels the states and returns the transition table, where the epsilon
    /// column contains the direct epsilon successors.
    pub fn transition_table(&mut self) -> Result<NfaTransitionTable, NfaError> {
        self.build_table(EpsilonColumn::Direct)
    }

    pub(crate) fn build_table(&mut self, epsilon_column: EpsilonColumn) -> Result<NfaTransitionTable, NfaError> {
        let start = Instant::now();
        let alphabet = self.alphabet();
        let states = self.set_labels_for_states();
        let table = build_transition_table(&self.graph, &states, alphabet, epsilon_column)?;

        debug!("Time NFA transition table: {:.3}s", start.elapsed().as_secs_f64());
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;
    use test_log::test;

    use crate::NfaBuilder;
    use crate::Symbol;

    /// Two branches from q0 that meet in the accepting state q5.
    fn branching_nfa() -> Nfa {
        let mut graph = StateGraph::new();
        let a = graph.add_labelled_state("q0", false);
        let b = graph.add_labelled_state("q1", false);
        let c = graph.add_labelled_state("q2", false);
        let d = graph.add_labelled_state("q3", false);
        let e = graph.add_labelled_state("q4", false);
        let f = graph.add_labelled_state("q5", true);
        graph.set_starting(a, true);

        graph.add_transition(a, Symbol::Epsilon, b);
        graph.add_transition(b, 'x', c);
        graph.add_transition(c, Symbol::Epsilon, f);

        graph.add_transition(a, Symbol::Epsilon, d);
        graph.add_transition(d, 'y', e);
        graph.add_transition(e, Symbol::Epsilon, f);

        Nfa::new(graph, a, f)
    }

    #[test]
    fn test_nfa_alphabet() {
        assert_eq!(branching_nfa().alphabet(), vec!['y', 'x']);

        let mut builder = NfaBuilder::new();
        let a = builder.char('a');
        let b = builder.char('b');
        let c = builder.char('c');
        let abc = builder.union_all([a, b, c]).unwrap();
        assert_eq!(builder.finish(abc).alphabet(), vec!['c', 'b', 'a']);
    }

    #[test]
    fn test_nfa_alphabet_cycle() {
        let mut builder = NfaBuilder::new();
        let a = builder.char('a');
        let star = builder.star(a);
        let plus = builder.plus(star);
        assert_eq!(builder.finish(plus).alphabet(), vec!['a']);
    }

    #[test]
    fn test_nfa_test() {
        let nfa = branching_nfa();

        assert!(nfa.test("x"));
        assert!(nfa.test("y"));
        assert!(!nfa.test(""));
        assert!(!nfa.test("xy"));
    }

    #[test]
    fn test_nfa_transition_table() {
        let mut nfa = branching_nfa();

        assert_eq!(
            serde_json::to_value(nfa.transition_table().unwrap()).unwrap(),
            json!({
                "->q0": { "y": [], "x": [], "ε*": ["q1", "q3"] },
                "q1": { "y": [], "x": ["q2"], "ε*": [] },
                "q2": { "y": [], "x": [], "ε*": ["q5"] },
                "q3": { "y": ["q4"], "x": [], "ε*": [] },
                "q4": { "y": [], "x": [], "ε*": ["q5"] },
                "*q5": { "y": [], "x": [], "ε*": [] },
            })
        );
    }

    #[test]
    fn test_nfa_set_labels_for_states() {
        let mut builder = NfaBuilder::new();
        let a = builder.char('a');
        let b = builder.char('b');
        let ab = builder.concat(a, b);
        let unreachable = builder.add_state(false);
        let mut nfa = builder.finish(ab);

        let states = nfa.set_labels_for_states();
        assert_eq!(states, vec![a.input, a.output, b.input, b.output]);

        let labels: Vec<StateLabel> = states.iter().map(|s| nfa.graph().label(*s).unwrap().clone()).collect();
        assert_eq!(labels, (1..=4).map(StateLabel::Index).collect::<Vec<_>>());
        assert!(nfa.graph().state(unreachable).label().is_none());

        // Labelling again keeps the existing labels.
        assert_eq!(nfa.set_labels_for_states(), states);
        assert_eq!(nfa.graph().label(b.output), Ok(&StateLabel::Index(4)));

        assert_eq!(
            serde_json::to_value(nfa.transition_table().unwrap()).unwrap(),
            json!({
                "->1": { "b": [], "a": [2], "ε*": [] },
                "2": { "b": [], "a": [], "ε*": [3] },
                "3": { "b": [4], "a": [], "ε*": [] },
                "*4": { "b": [], "a": [], "ε*": [] },
            })
        );
    }

    #[test]
    fn test_nfa_preset_labels() {
        let mut graph = StateGraph::new();
        let a = graph.add_state(false);
        let b = graph.add_labelled_state("q", false);
        let c = graph.add_state(true);
        graph.add_transition(a, 'a', b);
        graph.add_transition(b, 'b', c);

        let mut nfa = Nfa::new(graph, a, c);
        nfa.set_labels_for_states();

        assert_eq!(nfa.graph().label(a), Ok(&StateLabel::Index(1)));
        assert_eq!(nfa.graph().label(b), Ok(&StateLabel::from("q")));
        assert_eq!(nfa.graph().label(c), Ok(&StateLabel::Index(2)));
    }

    #[test]
    fn test_nfa_preset_labels_are_skipped() {
        let mut graph = StateGraph::new();
        let a = graph.add_state(false);
        let b = graph.add_labelled_state(1usize, false);
        let c = graph.add_labelled_state("2", false);
        let d = graph.add_state(true);
        graph.set_starting(a, true);
        graph.add_transition(a, 'a', b);
        graph.add_transition(b, 'b', c);
        graph.add_transition(c, 'c', d);

        let mut nfa = Nfa::new(graph, a, d);
        let states = nfa.set_labels_for_states();

        assert_eq!(nfa.graph().label(a), Ok(&StateLabel::Index(3)));
        assert_eq!(nfa.graph().label(b), Ok(&StateLabel::Index(1)));
        assert_eq!(nfa.graph().label(c), Ok(&StateLabel::from("2")));
        assert_eq!(nfa.graph().label(d), Ok(&StateLabel::Index(4)));

        let written: Vec<String> = states
            .iter()
            .map(|s| nfa.graph().label(*s).unwrap().to_string())
            .collect();
        assert_eq!(written.iter().unique().count(), states.len());

        let table = nfa.transition_table().unwrap();
        assert_eq!(table.num_of_rows(), 4);
        assert_eq!(
            serde_json::to_value(&table).unwrap(),
            json!({
                "->3": { "c": [], "b": [], "a": [1], "ε*": [] },
                "1": { "c": [], "b": ["2"], "a": [], "ε*": [] },
                "2": { "c": [4], "b": [], "a": [], "ε*": [] },
                "*4": { "c": [], "b": [], "a": [], "ε*": [] },
            })
        );
    }

    #[test]
    fn test_nfa_duplicate_preset_labels() {
        let mut graph = StateGraph::new();
        let a = graph.add_labelled_state("q", false);
        let b = graph.add_labelled_state("q", true);
        graph.add_transition(a, 'a', b);

        let mut nfa = Nfa::new(graph, a, b);
        assert_eq!(
            nfa.transition_table().map(|_| ()),
            Err(NfaError::DuplicateLabel(StateLabel::from("q")))
        );
    }
}
