// Termination evaluator: classifies the final state at end of input.
// Origin: TerminationType.java

use dfa_core::{StateId, TerminationSpec};
use hashbrown::HashSet;

/// Decides accept/reject for the state reached when input runs out.
#[derive(Debug, Clone)]
pub struct TerminationEvaluator {
    states: HashSet<StateId>,
    /// `true` for an accept list, `false` for a reject list.
    listed_accepts: bool,
}

impl TerminationEvaluator {
    pub(crate) fn from_validated(spec: &TerminationSpec) -> Self {
        Self {
            states: spec.states().iter().copied().collect(),
            listed_accepts: matches!(spec, TerminationSpec::AcceptStates(_)),
        }
    }

    /// `true` if ending in `state` accepts.
    ///
    /// Accept lists accept iff `state` is listed; reject lists accept iff it
    /// is not.
    pub fn accepts(&self, state: StateId) -> bool {
        self.states.contains(&state) == self.listed_accepts
    }
}
