// Alphabet specifications: what a DFA reads and how many letters it has.
// Origin: Alphabet.java, AlphabetData.java, BoundedAlphabet.java, CustomFixedAlphabet.java, dfa_t.h

use crate::kind::AlphabetKind;
use crate::{Letter, UNICODE_LETTERS};

/// One letter of a variable-width custom alphabet.
///
/// `width` is the declared byte length and must equal `bytes.len()`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VariableLetter {
    pub width: usize,
    pub bytes: Vec<u8>,
}

impl VariableLetter {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        let bytes = bytes.into();
        Self {
            width: bytes.len(),
            bytes,
        }
    }
}

/// The alphabet a DFA reads.
///
/// Each mode defines how raw input maps onto a letter index in
/// `[0, num_letters)`:
///
/// - `Bounded` -- integers in `min..=max`, letter is `value - min`
/// - `FixedCustom` -- fixed-width byte strings, letter is the list index
/// - `VariableCustom` -- variable-width byte strings, letter is the list index
/// - standard encodings -- letter is the code point or integer value
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "lowercase"))]
pub enum AlphabetSpec {
    Bounded {
        min: u64,
        max: u64,
    },
    #[cfg_attr(feature = "serde", serde(rename = "fixed"))]
    FixedCustom {
        letter_width: usize,
        letters: Vec<Vec<u8>>,
    },
    #[cfg_attr(feature = "serde", serde(rename = "variable"))]
    VariableCustom { letters: Vec<VariableLetter> },
    Ascii,
    Utf8,
    Utf16,
    Utf32,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
}

impl AlphabetSpec {
    /// Builds a fixed-width custom alphabet, taking the width from the first
    /// letter (0 if there are none).
    pub fn fixed<I, B>(letters: I) -> Self
    where
        I: IntoIterator<Item = B>,
        B: Into<Vec<u8>>,
    {
        let letters: Vec<Vec<u8>> = letters.into_iter().map(Into::into).collect();
        let letter_width = letters.first().map_or(0, Vec::len);
        AlphabetSpec::FixedCustom {
            letter_width,
            letters,
        }
    }

    /// Builds a variable-width custom alphabet from byte strings.
    pub fn variable<I, B>(letters: I) -> Self
    where
        I: IntoIterator<Item = B>,
        B: Into<Vec<u8>>,
    {
        AlphabetSpec::VariableCustom {
            letters: letters.into_iter().map(VariableLetter::new).collect(),
        }
    }

    /// The serialized kind tag for this alphabet.
    pub fn kind(&self) -> AlphabetKind {
        match self {
            AlphabetSpec::Bounded { .. } | AlphabetSpec::UInt64 => AlphabetKind::UInt64,
            AlphabetSpec::FixedCustom { .. } => AlphabetKind::Fixed,
            AlphabetSpec::VariableCustom { .. } => AlphabetKind::Variable,
            AlphabetSpec::Ascii => AlphabetKind::Ascii,
            AlphabetSpec::Utf8 => AlphabetKind::Utf8,
            AlphabetSpec::Utf16 => AlphabetKind::Utf16,
            AlphabetSpec::Utf32 => AlphabetKind::Utf32,
            AlphabetSpec::UInt8 => AlphabetKind::UInt8,
            AlphabetSpec::UInt16 => AlphabetKind::UInt16,
            AlphabetSpec::UInt32 => AlphabetKind::UInt32,
        }
    }

    /// Number of letters derivable from the alphabet data.
    ///
    /// A bounded range with `min > max` has no letters. Carried as `u128`
    /// because `UInt64` and a full `u64` range hold 2^64 letters.
    pub fn letter_count(&self) -> u128 {
        match self {
            AlphabetSpec::Bounded { min, max } => {
                if min > max {
                    0
                } else {
                    u128::from(max - min) + 1
                }
            }
            AlphabetSpec::FixedCustom { letters, .. } => letters.len() as u128,
            AlphabetSpec::VariableCustom { letters } => letters.len() as u128,
            AlphabetSpec::Ascii => 0x80,
            AlphabetSpec::Utf8 | AlphabetSpec::Utf16 | AlphabetSpec::Utf32 => UNICODE_LETTERS,
            AlphabetSpec::UInt8 => 1u128 << 8,
            AlphabetSpec::UInt16 => 1u128 << 16,
            AlphabetSpec::UInt32 => 1u128 << 32,
            AlphabetSpec::UInt64 => 1u128 << 64,
        }
    }

    /// Whether `letter` is a valid index for this alphabet.
    pub fn contains_letter(&self, letter: Letter) -> bool {
        u128::from(letter) < self.letter_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounded_letter_count() {
        assert_eq!(AlphabetSpec::Bounded { min: 0, max: 1 }.letter_count(), 2);
        assert_eq!(AlphabetSpec::Bounded { min: 10, max: 10 }.letter_count(), 1);
        assert_eq!(AlphabetSpec::Bounded { min: 5, max: 4 }.letter_count(), 0);
        assert_eq!(
            AlphabetSpec::Bounded {
                min: 0,
                max: u64::MAX
            }
            .letter_count(),
            1u128 << 64
        );
    }

    #[test]
    fn standard_letter_counts() {
        assert_eq!(AlphabetSpec::Ascii.letter_count(), 128);
        assert_eq!(AlphabetSpec::Utf8.letter_count(), 0x11_0000);
        assert_eq!(AlphabetSpec::Utf16.letter_count(), 0x11_0000);
        assert_eq!(AlphabetSpec::UInt8.letter_count(), 256);
        assert_eq!(AlphabetSpec::UInt16.letter_count(), 65_536);
        assert_eq!(AlphabetSpec::UInt64.letter_count(), 1u128 << 64);
    }

    #[test]
    fn custom_constructors() {
        let fixed = AlphabetSpec::fixed([b"ab".to_vec(), b"cd".to_vec()]);
        assert_eq!(
            fixed,
            AlphabetSpec::FixedCustom {
                letter_width: 2,
                letters: vec![b"ab".to_vec(), b"cd".to_vec()]
            }
        );
        assert_eq!(fixed.letter_count(), 2);

        let variable = AlphabetSpec::variable(["a", "ab"].map(|s| s.as_bytes().to_vec()));
        match &variable {
            AlphabetSpec::VariableCustom { letters } => {
                assert_eq!(letters[1].width, 2);
                assert_eq!(letters[1].bytes, b"ab");
            }
            other => panic!("unexpected alphabet {other:?}"),
        }
    }

    #[test]
    fn bounded_is_tagged_as_uint64() {
        assert_eq!(
            AlphabetSpec::Bounded { min: 3, max: 9 }.kind(),
            AlphabetKind::UInt64
        );
        assert_eq!(AlphabetSpec::variable(Vec::<Vec<u8>>::new()).kind(), AlphabetKind::Variable);
    }

    #[test]
    fn contains_letter_respects_count() {
        let ascii = AlphabetSpec::Ascii;
        assert!(ascii.contains_letter(127));
        assert!(!ascii.contains_letter(128));
        assert!(AlphabetSpec::UInt64.contains_letter(u64::MAX));
    }
}
