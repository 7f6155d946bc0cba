// Evaluation options and the per-run cursor.
//
// A `Dfa` is never mutated by evaluation. Everything that changes while an
// input is consumed lives in a `Cursor` owned by that single run.

use dfa_core::StateId;

/// How variable-width custom letters are matched against a byte stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VariableMatch {
    /// Take the longest letter that prefixes the remaining stream; the
    /// lowest letter index wins a tie.
    #[default]
    LongestPrefix,
    /// The remaining stream must be exactly one letter.
    Exact,
}

/// Options for a single evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EvalOptions {
    /// Matching rule for variable-width alphabets on stream input.
    pub variable_match: VariableMatch,
    /// Caller's bound on consumed symbols, carried into the run. The engine
    /// has no bound of its own: with `None` (the default) every input is read
    /// until it ends or a default policy stops it. A run that would consume
    /// more than the bound stops with `FailReason::LimitExceeded`.
    pub max_symbols: Option<usize>,
}

impl EvalOptions {
    pub fn with_variable_match(mut self, variable_match: VariableMatch) -> Self {
        self.variable_match = variable_match;
        self
    }

    pub fn with_max_symbols(mut self, max_symbols: usize) -> Self {
        self.max_symbols = Some(max_symbols);
        self
    }

    /// `true` once `consumed` symbols exhaust the configured bound.
    #[inline]
    pub(crate) fn limit_reached(&self, consumed: usize) -> bool {
        self.max_symbols.is_some_and(|max| consumed >= max)
    }
}

/// Running state of one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    /// Current automaton state.
    pub state: StateId,
    /// Symbols consumed so far.
    pub consumed: usize,
}

impl Cursor {
    pub fn new(start: StateId) -> Self {
        Self {
            state: start,
            consumed: 0,
        }
    }

    /// Records one consumed symbol that moved the automaton to `next`.
    #[inline]
    pub fn advance(&mut self, next: StateId) {
        self.state = next;
        self.consumed += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options() {
        let options = EvalOptions::default();
        assert_eq!(options.variable_match, VariableMatch::LongestPrefix);
        assert_eq!(options.max_symbols, None);
        assert!(!options.limit_reached(usize::MAX));
    }

    #[test]
    fn symbol_limit() {
        let options = EvalOptions::default().with_max_symbols(2);
        assert!(!options.limit_reached(1));
        assert!(options.limit_reached(2));
        let exact = options.with_variable_match(VariableMatch::Exact);
        assert_eq!(exact.variable_match, VariableMatch::Exact);
        assert_eq!(exact.max_symbols, Some(2));
    }

    #[test]
    fn cursor_advance() {
        let mut cursor = Cursor::new(3);
        assert_eq!(cursor.consumed, 0);
        cursor.advance(5);
        cursor.advance(1);
        assert_eq!(cursor.state, 1);
        assert_eq!(cursor.consumed, 2);
    }
}
