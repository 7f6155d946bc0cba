//! Shared data model for alphabet-agnostic DFA specifications.
//!
//! A specification describes the alphabet a DFA reads, its states, the
//! termination rule applied at end of input, and a sparse transition
//! function with per-state defaults. This crate only carries the data; the
//! `dfa-engine` crate validates it and evaluates inputs against it.
//!
//! # Modules
//!
//! - [`alphabet`] -- Alphabet modes (bounded, custom, standard encodings)
//! - [`spec`] -- States, termination, transitions and the complete [`DfaSpec`]
//! - [`kind`] -- One-byte kind identifiers for each tagged union
//! - [`codec`] -- Big-endian integer letter encoding
//! - [`builder`] -- Incremental [`DfaSpecBuilder`]

pub mod alphabet;
pub mod builder;
pub mod codec;
pub mod kind;
pub mod spec;

pub use alphabet::{AlphabetSpec, VariableLetter};
pub use builder::DfaSpecBuilder;
pub use spec::{DefaultPolicy, DfaSpec, Edge, StateSpec, TerminationSpec, TransitionSpec};

/// Canonical letter index in `[0, num_letters)`.
pub type Letter = u64;

/// State index in `[0, num_states)`.
pub type StateId = u64;

/// Number of Unicode scalar value slots (`0..=0x10FFFF`), the letter count of
/// every Unicode alphabet.
pub const UNICODE_LETTERS: u128 = 0x11_0000;

/// Error type for identifier lookup and integer letter encoding.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    #[error("value {value} does not fit in {width} bytes")]
    ValueTooWide { value: u64, width: usize },
    #[error("integer width must be between 1 and 8 bytes, got {width}")]
    InvalidWidth { width: usize },
    #[error("unknown {kind} identifier 0x{identifier:02X}")]
    UnknownIdentifier { kind: &'static str, identifier: u8 },
}
