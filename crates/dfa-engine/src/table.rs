// Transition table: explicit edges plus per-state default policies.
// Origin: TransitionFunction.java, UnknownTransitions.java, GotoState.java
//
// Storage is sparse in both dimensions. Only states with a declared
// transition function have an entry, and only listed letters have an edge;
// everything else falls through to the state's default policy.

use dfa_core::{DefaultPolicy, Edge, Letter, StateId, TransitionSpec};
use hashbrown::HashMap;

/// Outcome of one transition step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Continue in the given state.
    Goto(StateId),
    /// A default `Accept` fired: stop and accept.
    Accept,
    /// A default `Reject` fired: stop and reject.
    Reject,
}

/// Transition function of a single state.
#[derive(Debug, Clone, Default)]
pub struct StateTransitions {
    default: DefaultPolicy,
    edges: HashMap<Letter, StateId>,
}

impl StateTransitions {
    pub fn default_policy(&self) -> DefaultPolicy {
        self.default
    }

    /// Target of the explicit edge on `letter`, if any.
    pub fn edge(&self, letter: Letter) -> Option<StateId> {
        self.edges.get(&letter).copied()
    }

    /// Explicit edges sorted by letter.
    pub fn edges(&self) -> Vec<Edge> {
        let mut edges: Vec<Edge> = self
            .edges
            .iter()
            .map(|(&letter, &target)| Edge { letter, target })
            .collect();
        edges.sort_unstable_by_key(|e| e.letter);
        edges
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Default `Accept` with no explicit edges: every continuation,
    /// including the empty one, is accepted.
    pub fn accepts_everything(&self) -> bool {
        self.default == DefaultPolicy::Accept && self.edges.is_empty()
    }

    fn step(&self, letter: Letter) -> Step {
        if let Some(target) = self.edge(letter) {
            return Step::Goto(target);
        }
        match self.default {
            DefaultPolicy::Reject => Step::Reject,
            DefaultPolicy::Accept => Step::Accept,
            DefaultPolicy::Goto(target) => Step::Goto(target),
        }
    }
}

/// Per-state transition functions.
#[derive(Debug, Clone, Default)]
pub struct TransitionTable {
    states: HashMap<StateId, StateTransitions>,
    /// Shared by every state with no declared transition function.
    undeclared: StateTransitions,
}

impl TransitionTable {
    /// Builds the table from validated transition functions (one per state,
    /// distinct letters within each).
    pub(crate) fn from_validated(specs: &[TransitionSpec]) -> Self {
        let states = specs
            .iter()
            .map(|spec| {
                let edges = spec.edges.iter().map(|e| (e.letter, e.target)).collect();
                (
                    spec.from,
                    StateTransitions {
                        default: spec.default,
                        edges,
                    },
                )
            })
            .collect();
        Self {
            states,
            undeclared: StateTransitions::default(),
        }
    }

    /// The transition function of `state`. States without a declared
    /// function reject on every letter.
    pub fn state(&self, state: StateId) -> &StateTransitions {
        self.states.get(&state).unwrap_or(&self.undeclared)
    }

    /// Resolves the next step from `state` on `letter`: the explicit edge
    /// if one exists, otherwise the state's default policy.
    pub fn step(&self, state: StateId, letter: Letter) -> Step {
        self.state(state).step(letter)
    }

    /// Number of states with a declared transition function.
    pub fn declared_states(&self) -> usize {
        self.states.len()
    }

    /// Total number of explicit edges.
    pub fn edge_count(&self) -> usize {
        self.states.values().map(StateTransitions::edge_count).sum()
    }
}
