// Incremental construction of a DfaSpec.
// Origin: DFA.java (addLetter)
//
// The builder only assembles data. Invariants are checked when the engine
// builds a DFA from the finished spec.

use crate::alphabet::{AlphabetSpec, VariableLetter};
use crate::spec::{DefaultPolicy, DfaSpec, Edge, StateSpec, TerminationSpec, TransitionSpec};
use crate::{Letter, StateId};

/// Fluent builder for [`DfaSpec`].
///
/// ```
/// use dfa_core::{AlphabetSpec, DefaultPolicy, DfaSpecBuilder};
///
/// let spec = DfaSpecBuilder::new(AlphabetSpec::Bounded { min: 0, max: 1 })
///     .states(2)
///     .start(0)
///     .accept_states([1])
///     .transition(0, DefaultPolicy::Reject, [(1, 1)])
///     .transition(1, DefaultPolicy::Goto(1), [])
///     .build();
/// assert_eq!(spec.num_states, 2);
/// ```
#[derive(Debug, Clone)]
pub struct DfaSpecBuilder {
    alphabet: AlphabetSpec,
    num_letters: Option<u128>,
    states: StateSpec,
    num_states: StateId,
    start_state: StateId,
    termination: TerminationSpec,
    transitions: Vec<TransitionSpec>,
}

impl DfaSpecBuilder {
    /// Starts a spec over `alphabet` with no states, start state 0 and an
    /// empty accept list.
    pub fn new(alphabet: AlphabetSpec) -> Self {
        Self {
            alphabet,
            num_letters: None,
            states: StateSpec::Unnamed,
            num_states: 0,
            start_state: 0,
            termination: TerminationSpec::AcceptStates(Vec::new()),
            transitions: Vec::new(),
        }
    }

    /// Declares the letter count explicitly instead of deriving it.
    pub fn num_letters(mut self, num_letters: u128) -> Self {
        self.num_letters = Some(num_letters);
        self
    }

    /// Declares `count` unnamed states.
    pub fn states(mut self, count: StateId) -> Self {
        self.states = StateSpec::Unnamed;
        self.num_states = count;
        self
    }

    /// Declares one named state per entry of `names`.
    pub fn named_states<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        self.num_states = names.len() as StateId;
        self.states = StateSpec::Named { names };
        self
    }

    pub fn start(mut self, state: StateId) -> Self {
        self.start_state = state;
        self
    }

    pub fn accept_states(mut self, states: impl IntoIterator<Item = StateId>) -> Self {
        self.termination = TerminationSpec::AcceptStates(states.into_iter().collect());
        self
    }

    pub fn reject_states(mut self, states: impl IntoIterator<Item = StateId>) -> Self {
        self.termination = TerminationSpec::RejectStates(states.into_iter().collect());
        self
    }

    /// Adds the transition function for `from`.
    pub fn transition(
        mut self,
        from: StateId,
        default: DefaultPolicy,
        edges: impl IntoIterator<Item = (Letter, StateId)>,
    ) -> Self {
        self.transitions.push(TransitionSpec {
            from,
            default,
            edges: edges.into_iter().map(Edge::from).collect(),
        });
        self
    }

    /// Appends a letter to a custom alphabet and returns its index.
    ///
    /// Returns `None` for alphabets whose letters are not listed explicitly.
    /// For a fixed-width alphabet with no letters yet, the first letter sets
    /// the width.
    pub fn add_letter(&mut self, bytes: impl Into<Vec<u8>>) -> Option<Letter> {
        let bytes = bytes.into();
        match &mut self.alphabet {
            AlphabetSpec::FixedCustom {
                letter_width,
                letters,
            } => {
                if letters.is_empty() && *letter_width == 0 {
                    *letter_width = bytes.len();
                }
                letters.push(bytes);
                Some(letters.len() as Letter - 1)
            }
            AlphabetSpec::VariableCustom { letters } => {
                letters.push(VariableLetter::new(bytes));
                Some(letters.len() as Letter - 1)
            }
            _ => None,
        }
    }

    pub fn build(self) -> DfaSpec {
        DfaSpec {
            alphabet: self.alphabet,
            num_letters: self.num_letters,
            states: self.states,
            num_states: self.num_states,
            start_state: self.start_state,
            termination: self.termination,
            transitions: self.transitions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_binary_spec() {
        let spec = DfaSpecBuilder::new(AlphabetSpec::Bounded { min: 0, max: 1 })
            .states(2)
            .start(0)
            .accept_states([1])
            .transition(0, DefaultPolicy::Reject, [(1, 1)])
            .transition(1, DefaultPolicy::Goto(1), [])
            .build();

        assert_eq!(spec.num_states, 2);
        assert_eq!(spec.num_letters, None);
        assert_eq!(spec.termination, TerminationSpec::AcceptStates(vec![1]));
        assert_eq!(spec.transitions.len(), 2);
        assert_eq!(spec.transitions[0].edges, vec![Edge { letter: 1, target: 1 }]);
    }

    #[test]
    fn named_states_set_count() {
        let spec = DfaSpecBuilder::new(AlphabetSpec::Ascii)
            .named_states(["idle", "running", "done"])
            .reject_states([0])
            .build();
        assert_eq!(spec.num_states, 3);
        match spec.states {
            StateSpec::Named { names } => assert_eq!(names[1], "running"),
            StateSpec::Unnamed => panic!("expected named states"),
        }
        assert_eq!(spec.termination, TerminationSpec::RejectStates(vec![0]));
    }

    #[test]
    fn add_letter_to_custom_alphabets() {
        let mut fixed = DfaSpecBuilder::new(AlphabetSpec::fixed(Vec::<Vec<u8>>::new()));
        assert_eq!(fixed.add_letter(b"xy".to_vec()), Some(0));
        assert_eq!(fixed.add_letter(b"zw".to_vec()), Some(1));
        match fixed.build().alphabet {
            AlphabetSpec::FixedCustom {
                letter_width,
                letters,
            } => {
                assert_eq!(letter_width, 2);
                assert_eq!(letters.len(), 2);
            }
            other => panic!("unexpected alphabet {other:?}"),
        }

        let mut variable = DfaSpecBuilder::new(AlphabetSpec::variable(Vec::<Vec<u8>>::new()));
        assert_eq!(variable.add_letter(b"a".to_vec()), Some(0));
        assert_eq!(variable.add_letter(b"ab".to_vec()), Some(1));
    }

    #[test]
    fn add_letter_to_standard_alphabet_is_refused() {
        let mut builder = DfaSpecBuilder::new(AlphabetSpec::Utf8);
        assert_eq!(builder.add_letter(b"a".to_vec()), None);
    }
}
