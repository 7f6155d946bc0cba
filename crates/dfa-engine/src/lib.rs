//! Evaluation engine for alphabet-agnostic DFA specifications.
//!
//! A [`Dfa`] is built once from a [`dfa_core::DfaSpec`]; every invariant is
//! checked up front and no partially validated automaton is ever returned.
//! The built DFA is immutable and can be shared across threads, each
//! evaluation carrying its own small cursor.
//!
//! # Architecture
//!
//! - [`alphabet`] -- Maps raw symbols to letter indices
//! - [`registry`] -- State count and optional names
//! - [`table`] -- Sparse transitions with per-state default policies
//! - [`termination`] -- Final-state classification
//! - [`config`] -- Evaluation options and the per-run cursor
//! - [`validate`] -- The build phase
//! - [`engine`] -- The [`Dfa`] itself and its evaluation loop

pub mod alphabet;
pub mod config;
pub mod engine;
pub mod registry;
pub mod table;
pub mod termination;
pub mod validate;

pub use config::{EvalOptions, VariableMatch};
pub use engine::{Dfa, FailReason, RunReport, StopCause, Verdict};

use dfa_core::{Letter, StateId};

/// Construction-time error: the DFA description violates an invariant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("bounded alphabet has min {min} greater than max {max}")]
    InvalidBounds { min: u64, max: u64 },
    #[error("fixed-width alphabet declares a letter width of zero")]
    ZeroLetterWidth,
    #[error("letter {letter} is {actual} bytes wide, expected {expected}")]
    LetterWidthMismatch {
        letter: Letter,
        expected: usize,
        actual: usize,
    },
    #[error("letter {letter} is empty")]
    EmptyLetter { letter: Letter },
    #[error("letter {letter} repeats the bytes of letter {first}")]
    DuplicateLetter { letter: Letter, first: Letter },
    #[error("declared {declared} letters but the alphabet defines {derived}")]
    LetterCountMismatch { declared: u128, derived: u128 },
    #[error("specification declares no states")]
    NoStates,
    #[error("{names} state names given for {states} states")]
    NameCountMismatch { states: StateId, names: usize },
    #[error("start state {state} is out of range (num_states = {num_states})")]
    StartStateOutOfRange { state: StateId, num_states: StateId },
    #[error("termination state {state} is out of range (num_states = {num_states})")]
    TerminationStateOutOfRange { state: StateId, num_states: StateId },
    #[error("transition function for state {state} is out of range (num_states = {num_states})")]
    TransitionSourceOutOfRange { state: StateId, num_states: StateId },
    #[error("state {state} has more than one transition function")]
    DuplicateTransitionFunction { state: StateId },
    #[error("state {from} targets state {target}, out of range (num_states = {num_states})")]
    TargetStateOutOfRange {
        from: StateId,
        target: StateId,
        num_states: StateId,
    },
    #[error("state {from} has an edge on letter {letter}, out of range (num_letters = {num_letters})")]
    LetterOutOfRange {
        from: StateId,
        letter: Letter,
        num_letters: u128,
    },
    #[error("state {from} has more than one edge on letter {letter}")]
    DuplicateEdgeLetter { from: StateId, letter: Letter },
}

/// Why a single symbol could not be resolved to a letter.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// The symbol is well formed but no letter matches it.
    #[error("no letter matches the symbol")]
    UnknownSymbol,
    /// The raw input cannot be decoded under the alphabet.
    #[error("malformed input: {0}")]
    MalformedInput(Malformed),
}

/// Decoding failures behind [`ResolveError::MalformedInput`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Malformed {
    #[error("byte 0x{0:02X} is not ASCII")]
    NonAscii(u8),
    #[error("invalid UTF-8 sequence")]
    InvalidUtf8,
    #[error("unpaired UTF-16 surrogate 0x{0:04X}")]
    UnpairedSurrogate(u16),
    #[error("0x{0:08X} is not a Unicode scalar value")]
    InvalidScalar(u32),
    #[error("needed {needed} bytes, {available} available")]
    Truncated { needed: usize, available: usize },
    #[error("symbol is {actual} bytes wide, expected {expected}")]
    WrongWidth { expected: usize, actual: usize },
    #[error("alphabet has no integer form")]
    NotInteger,
}

impl From<Malformed> for ResolveError {
    fn from(reason: Malformed) -> Self {
        ResolveError::MalformedInput(reason)
    }
}

/// Evaluation-time error: a resolution failure at a given input position.
///
/// `position` is a byte offset for stream input and a symbol index for
/// pre-segmented input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("symbol at position {position}: {kind}")]
pub struct SymbolError {
    pub position: usize,
    pub kind: ResolveError,
}

impl SymbolError {
    pub fn new(position: usize, kind: ResolveError) -> Self {
        Self { position, kind }
    }
}
