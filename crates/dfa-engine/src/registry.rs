// State registry: state count and optional human-readable names.
// Origin: NamedState.java, StateData.java

use dfa_core::{StateId, StateSpec};

/// Maps state indices to their optional names.
#[derive(Debug, Clone)]
pub struct StateRegistry {
    count: StateId,
    names: Option<Vec<String>>,
}

impl StateRegistry {
    /// Builds the registry for a validated spec. For named states the name
    /// list length equals `count`.
    pub(crate) fn from_validated(spec: &StateSpec, count: StateId) -> Self {
        let names = match spec {
            StateSpec::Unnamed => None,
            StateSpec::Named { names } => Some(names.clone()),
        };
        Self { count, names }
    }

    pub fn state_count(&self) -> StateId {
        self.count
    }

    /// The name of `state`, or `None` for unnamed states and out-of-range
    /// indices.
    pub fn name_of(&self, state: StateId) -> Option<&str> {
        let names = self.names.as_ref()?;
        names.get(usize::try_from(state).ok()?).map(String::as_str)
    }
}
