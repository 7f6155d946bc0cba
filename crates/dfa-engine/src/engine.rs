// DFA engine: built automaton plus the evaluation loop.
// Origin: DFA.java, dfa_t.h
//
// `Dfa::build` is the only way to obtain a `Dfa` and runs full validation
// first. Evaluation pulls one symbol at a time, so a default policy that
// terminates the run leaves the rest of the input unread.

use dfa_core::{DfaSpec, Letter, StateId};
use log::{debug, trace};

use crate::alphabet::Alphabet;
use crate::config::{Cursor, EvalOptions, VariableMatch};
use crate::registry::StateRegistry;
use crate::table::{StateTransitions, Step, TransitionTable};
use crate::termination::TerminationEvaluator;
use crate::{ResolveError, SymbolError, ValidationError, validate};

/// Why an evaluation ended in [`Verdict::Failed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailReason {
    /// A well-formed symbol matched no letter.
    UnknownSymbol,
    /// The raw input could not be decoded under the alphabet.
    MalformedInput,
    /// The run hit [`EvalOptions::max_symbols`].
    LimitExceeded,
}

impl From<&ResolveError> for FailReason {
    fn from(err: &ResolveError) -> Self {
        match err {
            ResolveError::UnknownSymbol => FailReason::UnknownSymbol,
            ResolveError::MalformedInput(_) => FailReason::MalformedInput,
        }
    }
}

/// Result of evaluating one input.
///
/// `Failed` is distinct from `Rejected`: it means the input could not be
/// read under the alphabet, not that the automaton rejected it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    Accepted,
    Rejected,
    Failed(FailReason),
}

impl Verdict {
    pub fn is_accepted(self) -> bool {
        self == Verdict::Accepted
    }

    pub fn is_failed(self) -> bool {
        matches!(self, Verdict::Failed(_))
    }
}

/// What ended a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StopCause {
    /// Input ran out; the termination rule decided.
    EndOfInput,
    /// A default `Accept` policy fired, or input ended in a state whose
    /// default is `Accept` and which has no explicit edges.
    DefaultAccept,
    /// A default `Reject` policy fired.
    DefaultReject,
    /// A symbol could not be resolved.
    SymbolError,
    /// The symbol bound was reached with input left.
    LimitExceeded,
}

/// Detailed outcome of one evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub verdict: Verdict,
    /// State the automaton was in when the run stopped. For a default
    /// policy firing this is the state whose default fired.
    pub final_state: StateId,
    /// Symbols consumed, including one that fired a terminal default.
    pub consumed: usize,
    pub cause: StopCause,
    /// The resolution failure, when `cause` is [`StopCause::SymbolError`].
    pub error: Option<SymbolError>,
}

/// A validated, immutable DFA.
///
/// Shared freely across threads; each evaluation keeps its own cursor.
#[derive(Debug, Clone)]
pub struct Dfa {
    alphabet: Alphabet,
    registry: StateRegistry,
    table: TransitionTable,
    termination: TerminationEvaluator,
    start_state: StateId,
}

impl Dfa {
    /// Validates `spec` and builds the automaton.
    ///
    /// Fails with the first invariant violation found; no partially built
    /// DFA is ever returned.
    pub fn build(spec: &DfaSpec) -> Result<Self, ValidationError> {
        validate::validate(spec)?;

        let dfa = Self {
            alphabet: Alphabet::from_validated(&spec.alphabet),
            registry: StateRegistry::from_validated(&spec.states, spec.num_states),
            table: TransitionTable::from_validated(&spec.transitions),
            termination: TerminationEvaluator::from_validated(&spec.termination),
            start_state: spec.start_state,
        };
        debug!(
            "built DFA: {} states, {} letters, {} transition functions, {} edges",
            dfa.registry.state_count(),
            dfa.alphabet.num_letters(),
            dfa.table.declared_states(),
            dfa.table.edge_count()
        );
        Ok(dfa)
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub fn registry(&self) -> &StateRegistry {
        &self.registry
    }

    pub fn table(&self) -> &TransitionTable {
        &self.table
    }

    pub fn start_state(&self) -> StateId {
        self.start_state
    }

    pub fn num_letters(&self) -> u128 {
        self.alphabet.num_letters()
    }

    pub fn state_count(&self) -> StateId {
        self.registry.state_count()
    }

    pub fn name_of(&self, state: StateId) -> Option<&str> {
        self.registry.name_of(state)
    }

    /// The transition function of `state`.
    pub fn transitions(&self, state: StateId) -> &StateTransitions {
        self.table.state(state)
    }

    /// Evaluates a byte stream with default options.
    pub fn evaluate(&self, input: &[u8]) -> Verdict {
        self.run(input, &EvalOptions::default()).verdict
    }

    pub fn evaluate_with(&self, input: &[u8], options: &EvalOptions) -> Verdict {
        self.run(input, options).verdict
    }

    /// Evaluates a byte stream, decoding one letter at a time from the front.
    pub fn run(&self, input: &[u8], options: &EvalOptions) -> RunReport {
        let letters = StreamLetters {
            alphabet: &self.alphabet,
            bytes: input,
            offset: 0,
            policy: options.variable_match,
            failed: false,
        };
        self.drive(letters, options)
    }

    /// Evaluates pre-segmented symbols, each resolved by exact match.
    pub fn evaluate_symbols<I, S>(&self, symbols: I) -> Verdict
    where
        I: IntoIterator<Item = S>,
        S: AsRef<[u8]>,
    {
        self.run_symbols(symbols, &EvalOptions::default()).verdict
    }

    pub fn run_symbols<I, S>(&self, symbols: I, options: &EvalOptions) -> RunReport
    where
        I: IntoIterator<Item = S>,
        S: AsRef<[u8]>,
    {
        let letters = symbols.into_iter().enumerate().map(|(i, symbol)| {
            self.alphabet
                .resolve(symbol.as_ref())
                .map_err(|kind| SymbolError::new(i, kind))
        });
        self.drive(letters, options)
    }

    /// Evaluates integer symbols.
    pub fn evaluate_values<I>(&self, values: I) -> Verdict
    where
        I: IntoIterator<Item = u64>,
    {
        self.run_values(values, &EvalOptions::default()).verdict
    }

    pub fn run_values<I>(&self, values: I, options: &EvalOptions) -> RunReport
    where
        I: IntoIterator<Item = u64>,
    {
        let letters = values.into_iter().enumerate().map(|(i, value)| {
            self.alphabet
                .resolve_value(value)
                .map_err(|kind| SymbolError::new(i, kind))
        });
        self.drive(letters, options)
    }

    /// Evaluates letter indices that were resolved by the caller.
    ///
    /// Letters outside `[0, num_letters)` fail as unknown symbols.
    pub fn evaluate_letters<I>(&self, letters: I) -> Verdict
    where
        I: IntoIterator<Item = Letter>,
    {
        self.run_letters(letters, &EvalOptions::default()).verdict
    }

    pub fn run_letters<I>(&self, letters: I, options: &EvalOptions) -> RunReport
    where
        I: IntoIterator<Item = Letter>,
    {
        let letters = letters.into_iter().enumerate().map(|(i, letter)| {
            if self.alphabet.contains_letter(letter) {
                Ok(letter)
            } else {
                Err(SymbolError::new(i, ResolveError::UnknownSymbol))
            }
        });
        self.drive(letters, options)
    }

    /// Evaluates many byte streams in parallel against this DFA.
    ///
    /// Verdicts are returned in input order.
    #[cfg(feature = "parallel")]
    pub fn evaluate_many<S>(&self, inputs: &[S]) -> Vec<Verdict>
    where
        S: AsRef<[u8]> + Sync,
    {
        use rayon::prelude::*;

        inputs
            .par_iter()
            .map(|input| self.evaluate(input.as_ref()))
            .collect()
    }

    /// The evaluation loop shared by every input form.
    fn drive<I>(&self, letters: I, options: &EvalOptions) -> RunReport
    where
        I: IntoIterator<Item = Result<Letter, SymbolError>>,
    {
        let mut cursor = Cursor::new(self.start_state);

        for resolved in letters {
            if options.limit_reached(cursor.consumed) {
                return stopped(&cursor, Verdict::Failed(FailReason::LimitExceeded), StopCause::LimitExceeded);
            }
            let letter = match resolved {
                Ok(letter) => letter,
                Err(err) => {
                    trace!("symbol resolution failed in state {}: {err}", cursor.state);
                    let mut report = stopped(
                        &cursor,
                        Verdict::Failed(FailReason::from(&err.kind)),
                        StopCause::SymbolError,
                    );
                    report.error = Some(err);
                    return report;
                }
            };
            match self.table.step(cursor.state, letter) {
                Step::Goto(next) => cursor.advance(next),
                Step::Accept => {
                    trace!("default accept fired in state {} on letter {letter}", cursor.state);
                    cursor.consumed += 1;
                    return stopped(&cursor, Verdict::Accepted, StopCause::DefaultAccept);
                }
                Step::Reject => {
                    trace!("default reject fired in state {} on letter {letter}", cursor.state);
                    cursor.consumed += 1;
                    return stopped(&cursor, Verdict::Rejected, StopCause::DefaultReject);
                }
            }
        }

        if self.table.state(cursor.state).accepts_everything() {
            trace!("input ended in accept-all state {}", cursor.state);
            return stopped(&cursor, Verdict::Accepted, StopCause::DefaultAccept);
        }
        let verdict = if self.termination.accepts(cursor.state) {
            Verdict::Accepted
        } else {
            Verdict::Rejected
        };
        stopped(&cursor, verdict, StopCause::EndOfInput)
    }
}

fn stopped(cursor: &Cursor, verdict: Verdict, cause: StopCause) -> RunReport {
    RunReport {
        verdict,
        final_state: cursor.state,
        consumed: cursor.consumed,
        cause,
        error: None,
    }
}

/// Lazily decodes letters from the front of a byte stream.
///
/// Yields at most one error and then stops.
struct StreamLetters<'a> {
    alphabet: &'a Alphabet,
    bytes: &'a [u8],
    offset: usize,
    policy: VariableMatch,
    failed: bool,
}

impl Iterator for StreamLetters<'_> {
    type Item = Result<Letter, SymbolError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.offset >= self.bytes.len() {
            return None;
        }
        match self.alphabet.decode_next(&self.bytes[self.offset..], self.policy) {
            Ok((letter, used)) => {
                self.offset += used;
                Some(Ok(letter))
            }
            Err(kind) => {
                self.failed = true;
                Some(Err(SymbolError::new(self.offset, kind)))
            }
        }
    }
}
