use crate::Nfa;
use crate::NfaError;
use crate::StateGraph;
use crate::StateIndex;
use crate::StateLabel;
use crate::Symbol;

/// A part of an automaton under construction, given by its entry and exit
/// state in the arena of an [NfaBuilder].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Fragment {
    pub input: StateIndex,
    pub output: StateIndex,
}

impl Fragment {
    pub fn new(input: StateIndex, output: StateIndex) -> Self {
        Self { input, output }
    }
}

/// Builds an automaton by wiring fragments together with epsilon transitions.
///
/// The combinators change the accepting flags of their operands. A fragment
/// that has been composed into a larger one should therefore no longer be
/// used on its own.
#[derive(Default)]
pub struct NfaBuilder {
    graph: StateGraph,
}

impl NfaBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the arena of states.
    pub fn graph(&self) -> &StateGraph {
        &self.graph
    }

    /// Adds a new unlabelled state.
    pub fn add_state(&mut self, accepting: bool) -> StateIndex {
        self.graph.add_state(accepting)
    }

    /// Adds a new state with a fixed label.
    pub fn add_labelled_state(&mut self, label: impl Into<StateLabel>, accepting: bool) -> StateIndex {
        self.graph.add_labelled_state(label, accepting)
    }

    /// Adds a transition between two existing states.
    pub fn add_transition(&mut self, from: StateIndex, symbol: impl Into<Symbol>, to: StateIndex) {
        self.graph.add_transition(from, symbol, to);
    }

    /// The fragment for a single symbol, accepting exactly `c`.
    pub fn char(&mut self, c: char) -> Fragment {
        let input = self.graph.add_state(false);
        let output = self.graph.add_state(true);
        self.graph.add_transition(input, c, output);

        Fragment::new(input, output)
    }

    /// The fragment that accepts a word of `first` followed by a word of `second`.
    pub fn concat(&mut self, first: Fragment, second: Fragment) -> Fragment {
        self.graph.set_accepting(first.output, false);
        self.graph.set_accepting(second.output, true);
        self.graph.add_transition(first.output, Symbol::Epsilon, second.input);

        Fragment::new(first.input, second.output)
    }

    /// The fragment that accepts the words of either `first` or `second`.
    ///
    /// Introduces a common input state and a common accepting output state.
    pub fn union(&mut self, first: Fragment, second: Fragment) -> Fragment {
        self.graph.set_accepting(first.output, false);
        self.graph.set_accepting(second.output, false);

        let input = self.graph.add_state(false);
        self.graph.add_transition(input, Symbol::Epsilon, first.input);
        self.graph.add_transition(input, Symbol::Epsilon, second.input);

        let output = self.graph.add_state(true);
        self.graph.add_transition(first.output, Symbol::Epsilon, output);
        self.graph.add_transition(second.output, Symbol::Epsilon, output);

        Fragment::new(input, output)
    }

    /// The fragment that accepts the empty word or a word of `fragment`.
    pub fn optional(&mut self, fragment: Fragment) -> Fragment {
        self.graph.add_transition(fragment.input, Symbol::Epsilon, fragment.output);
        fragment
    }

    /// The fragment that accepts one or more repetitions of `fragment`.
    pub fn plus(&mut self, fragment: Fragment) -> Fragment {
        self.graph.add_transition(fragment.output, Symbol::Epsilon, fragment.input);
        fragment
    }

    /// The Kleene star, accepting zero or more repetitions of `fragment`.
    ///
    /// Reuses the states of the fragment, only two epsilon transitions are added.
    pub fn star(&mut self, fragment: Fragment) -> Fragment {
        self.graph.add_transition(fragment.output, Symbol::Epsilon, fragment.input);
        self.graph.add_transition(fragment.input, Symbol::Epsilon, fragment.output);
        fragment
    }

    /// The Kleene star built around two new states, such that the states of
    /// `fragment` are only entered through the new input state.
    pub fn star_with_fresh_states(&mut self, fragment: Fragment) -> Fragment {
        self.graph.set_accepting(fragment.output, false);

        let input = self.graph.add_state(false);
        let output = self.graph.add_state(true);

        self.graph.add_transition(input, Symbol::Epsilon, fragment.input);
        self.graph.add_transition(fragment.output, Symbol::Epsilon, output);
        self.graph.add_transition(input, Symbol::Epsilon, output);
        self.graph.add_transition(output, Symbol::Epsilon, fragment.input);

        Fragment::new(input, output)
    }

    /// Concatenates the given fragments from left to right.
    pub fn concat_all(&mut self, fragments: impl IntoIterator<Item = Fragment>) -> Result<Fragment, NfaError> {
        let mut fragments = fragments.into_iter();
        let first = fragments.next().ok_or(NfaError::EmptyFragmentList)?;

        Ok(fragments.fold(first, |result, fragment| self.concat(result, fragment)))
    }

    /// Unites the given fragments from left to right, every step introduces a
    /// new common input and output state.
    pub fn union_all(&mut self, fragments: impl IntoIterator<Item = Fragment>) -> Result<Fragment, NfaError> {
        let mut fragments = fragments.into_iter();
        let first = fragments.next().ok_or(NfaError::EmptyFragmentList)?;

        Ok(fragments.fold(first, |result, fragment| self.union(result, fragment)))
    }

    /// Finishes the construction, the input state of the fragment becomes the
    /// starting state of the automaton.
    pub fn finish(mut self, fragment: Fragment) -> Nfa {
        self.graph.set_starting(fragment.input, true);
        Nfa::new(self.graph, fragment.input, fragment.output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    #[test]
    fn test_char_fragment() {
        let mut builder = NfaBuilder::new();
        let a = builder.char('a');
        let nfa = builder.finish(a);

        assert!(nfa.test("a"));
        assert!(!nfa.test("b"));
        assert!(!nfa.test(""));
    }

    #[test]
    fn test_concat_fragment() {
        let mut builder = NfaBuilder::new();
        let a = builder.char('a');
        let b = builder.char('b');
        let ab = builder.concat_all([a, b]).unwrap();
        let nfa = builder.finish(ab);

        assert!(nfa.test("ab"));
        assert!(!nfa.test("aa"));
        assert!(!nfa.test("bb"));
        assert!(!nfa.test("ba"));
        assert!(!nfa.test("a"));
    }

    #[test]
    fn test_union_fragment() {
        let mut builder = NfaBuilder::new();
        let a = builder.char('a');
        let b = builder.char('b');
        let c = builder.char('c');
        let abc = builder.union_all([a, b, c]).unwrap();
        let nfa = builder.finish(abc);

        assert!(nfa.test("a"));
        assert!(nfa.test("b"));
        assert!(nfa.test("c"));
        assert!(!nfa.test("e"));
        assert!(!nfa.test("f"));
        assert!(!nfa.test("ab"));
    }

    #[test]
    fn test_optional_fragment() {
        let mut builder = NfaBuilder::new();
        let a = builder.char('a');
        let optional = builder.optional(a);
        let nfa = builder.finish(optional);

        assert!(nfa.test(""));
        assert!(nfa.test("a"));
        assert!(!nfa.test("aa"));
        assert!(!nfa.test("b"));
    }

    #[test]
    fn test_plus_fragment() {
        let mut builder = NfaBuilder::new();
        let a = builder.char('a');
        let plus = builder.plus(a);
        let nfa = builder.finish(plus);

        assert!(!nfa.test(""));
        assert!(nfa.test("a"));
        assert!(nfa.test("aa"));
        assert!(nfa.test("aaaaaaa"));
        assert!(!nfa.test("ab"));
    }

    #[test]
    fn test_star_fragments() {
        for fresh_states in [false, true] {
            let mut builder = NfaBuilder::new();
            let a = builder.char('a');
            let star = if fresh_states {
                builder.star_with_fresh_states(a)
            } else {
                builder.star(a)
            };
            let nfa = builder.finish(star);

            assert!(nfa.test(""));
            assert!(nfa.test("a"));
            assert!(nfa.test("aa"));
            assert!(nfa.test("aaaaaaaaaa"));
            assert!(!nfa.test("b"));
            assert!(!nfa.test("ab"));
        }
    }

    #[test]
    fn test_composed_fragment() {
        // (a|b)*c
        let mut builder = NfaBuilder::new();
        let a = builder.char('a');
        let b = builder.char('b');
        let c = builder.char('c');
        let a_or_b = builder.union(a, b);
        let repeated = builder.star(a_or_b);
        let result = builder.concat(repeated, c);
        let nfa = builder.finish(result);

        assert!(nfa.test("c"));
        assert!(nfa.test("abbac"));
        assert!(!nfa.test("abba"));
        assert!(!nfa.test("cc"));
    }

    #[test]
    fn test_empty_fragment_list() {
        let mut builder = NfaBuilder::new();
        assert_eq!(builder.concat_all([]), Err(NfaError::EmptyFragmentList));
        assert_eq!(builder.union_all(Vec::new()), Err(NfaError::EmptyFragmentList));
    }
}
