// States, termination, transitions and the complete DFA specification.
// Origin: DFA.java, StateData.java, NamedState.java, TransitionFunction.java, GotoState.java, UnknownData.java

use crate::alphabet::AlphabetSpec;
use crate::kind::{DefaultPolicyKind, StateKind, TerminationKind};
use crate::{Letter, StateId};

/// How states are identified.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "lowercase"))]
pub enum StateSpec {
    /// States are bare indices.
    #[default]
    Unnamed,
    /// One name per state index. Names need not be unique.
    Named { names: Vec<String> },
}

impl StateSpec {
    pub fn kind(&self) -> StateKind {
        match self {
            StateSpec::Unnamed => StateKind::Unnamed,
            StateSpec::Named { .. } => StateKind::Named,
        }
    }
}

/// The rule that classifies the final state once input is exhausted.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TerminationSpec {
    /// Accept iff the final state is listed.
    AcceptStates(Vec<StateId>),
    /// Reject iff the final state is listed.
    RejectStates(Vec<StateId>),
}

impl TerminationSpec {
    pub fn kind(&self) -> TerminationKind {
        match self {
            TerminationSpec::AcceptStates(_) => TerminationKind::AcceptStates,
            TerminationSpec::RejectStates(_) => TerminationKind::RejectStates,
        }
    }

    /// The listed states, whichever mode is configured.
    pub fn states(&self) -> &[StateId] {
        match self {
            TerminationSpec::AcceptStates(states) | TerminationSpec::RejectStates(states) => {
                states
            }
        }
    }
}

/// What happens when no explicit edge matches the current letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DefaultPolicy {
    /// Stop immediately and reject.
    #[default]
    Reject,
    /// Stop immediately and accept.
    Accept,
    /// Move to the given state and keep consuming input.
    Goto(StateId),
}

impl DefaultPolicy {
    pub fn kind(self) -> DefaultPolicyKind {
        match self {
            DefaultPolicy::Reject => DefaultPolicyKind::Reject,
            DefaultPolicy::Accept => DefaultPolicyKind::Accept,
            DefaultPolicy::Goto(_) => DefaultPolicyKind::Goto,
        }
    }
}

/// An explicit `letter -> target` edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Edge {
    pub letter: Letter,
    pub target: StateId,
}

impl From<(Letter, StateId)> for Edge {
    fn from((letter, target): (Letter, StateId)) -> Self {
        Self { letter, target }
    }
}

/// The transition function of a single state.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransitionSpec {
    /// The state this function governs.
    pub from: StateId,
    #[cfg_attr(feature = "serde", serde(default))]
    pub default: DefaultPolicy,
    #[cfg_attr(feature = "serde", serde(default))]
    pub edges: Vec<Edge>,
}

impl TransitionSpec {
    pub fn new(from: StateId, default: DefaultPolicy) -> Self {
        Self {
            from,
            default,
            edges: Vec::new(),
        }
    }

    pub fn with_edge(mut self, letter: Letter, target: StateId) -> Self {
        self.edges.push(Edge { letter, target });
        self
    }
}

/// A complete, unvalidated DFA specification.
///
/// `num_letters` is the declared letter count; `None` means "derive it from
/// the alphabet". States without a [`TransitionSpec`] behave as if they had
/// default [`DefaultPolicy::Reject`] and no edges.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DfaSpec {
    pub alphabet: AlphabetSpec,
    #[cfg_attr(feature = "serde", serde(default))]
    pub num_letters: Option<u128>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub states: StateSpec,
    pub num_states: StateId,
    pub start_state: StateId,
    pub termination: TerminationSpec,
    #[cfg_attr(feature = "serde", serde(default))]
    pub transitions: Vec<TransitionSpec>,
}
