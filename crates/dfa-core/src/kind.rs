// One-byte kind identifiers for each tagged union of a DFA description.
// Origin: AlphabetType.java, StateType.java, TerminationType.java, UnknownTransitions.java
//
// These are the tags a serialized specification uses to select a union arm.
// Loaders map them with `from_identifier`; writers use `identifier`.

use crate::CodecError;

/// Alphabet kinds.
///
/// Bounded alphabets have no tag of their own: they are written as
/// [`AlphabetKind::UInt64`] accompanied by bounded range data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AlphabetKind {
    Ascii,
    Utf8,
    Utf16,
    Utf32,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Fixed,
    Variable,
}

impl AlphabetKind {
    const ALL: [AlphabetKind; 10] = [
        AlphabetKind::Ascii,
        AlphabetKind::Utf8,
        AlphabetKind::Utf16,
        AlphabetKind::Utf32,
        AlphabetKind::UInt8,
        AlphabetKind::UInt16,
        AlphabetKind::UInt32,
        AlphabetKind::UInt64,
        AlphabetKind::Fixed,
        AlphabetKind::Variable,
    ];

    pub fn identifier(self) -> u8 {
        match self {
            AlphabetKind::Ascii => 0x01,
            AlphabetKind::Utf8 => 0x02,
            AlphabetKind::Utf16 => 0x03,
            AlphabetKind::Utf32 => 0x04,
            AlphabetKind::UInt8 => 0x05,
            AlphabetKind::UInt16 => 0x06,
            AlphabetKind::UInt32 => 0x07,
            AlphabetKind::UInt64 => 0x08,
            AlphabetKind::Fixed => 0x09,
            AlphabetKind::Variable => 0x0A,
        }
    }

    pub fn from_identifier(identifier: u8) -> Result<Self, CodecError> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.identifier() == identifier)
            .ok_or(CodecError::UnknownIdentifier {
                kind: "alphabet",
                identifier,
            })
    }
}

/// State naming kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StateKind {
    Unnamed,
    Named,
}

impl StateKind {
    pub fn identifier(self) -> u8 {
        match self {
            StateKind::Unnamed => 0x01,
            StateKind::Named => 0x02,
        }
    }

    pub fn from_identifier(identifier: u8) -> Result<Self, CodecError> {
        match identifier {
            0x01 => Ok(StateKind::Unnamed),
            0x02 => Ok(StateKind::Named),
            _ => Err(CodecError::UnknownIdentifier {
                kind: "state",
                identifier,
            }),
        }
    }
}

/// Termination kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TerminationKind {
    RejectStates,
    AcceptStates,
}

impl TerminationKind {
    pub fn identifier(self) -> u8 {
        match self {
            TerminationKind::RejectStates => 0x01,
            TerminationKind::AcceptStates => 0x02,
        }
    }

    pub fn from_identifier(identifier: u8) -> Result<Self, CodecError> {
        match identifier {
            0x01 => Ok(TerminationKind::RejectStates),
            0x02 => Ok(TerminationKind::AcceptStates),
            _ => Err(CodecError::UnknownIdentifier {
                kind: "termination",
                identifier,
            }),
        }
    }
}

/// Default (unknown-letter) transition kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DefaultPolicyKind {
    Reject,
    Accept,
    Goto,
}

impl DefaultPolicyKind {
    pub fn identifier(self) -> u8 {
        match self {
            DefaultPolicyKind::Reject => 0x01,
            DefaultPolicyKind::Accept => 0x02,
            DefaultPolicyKind::Goto => 0x03,
        }
    }

    pub fn from_identifier(identifier: u8) -> Result<Self, CodecError> {
        match identifier {
            0x01 => Ok(DefaultPolicyKind::Reject),
            0x02 => Ok(DefaultPolicyKind::Accept),
            0x03 => Ok(DefaultPolicyKind::Goto),
            _ => Err(CodecError::UnknownIdentifier {
                kind: "default transition",
                identifier,
            }),
        }
    }

    /// Whether a serialized policy of this kind is followed by extra data
    /// (the target state for `Goto`).
    pub fn has_additional_data(self) -> bool {
        matches!(self, DefaultPolicyKind::Goto)
    }
}
