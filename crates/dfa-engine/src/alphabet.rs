// Alphabet resolver: raw symbols to letter indices.
// Origin: Alphabet.java, Letter.java, dfa_t.h
//
// Every alphabet mode is reduced to one `Alphabet` value with three entry
// points: `resolve` for one pre-segmented symbol, `decode_next` for the
// front of a byte stream, and `resolve_value` for integer symbols.
// Multi-byte code units and integers are big-endian.

use dfa_core::codec::{self, MAX_INTEGER_WIDTH};
use dfa_core::{AlphabetSpec, Letter};
use hashbrown::HashMap;

use crate::config::VariableMatch;
use crate::validate;
use crate::{Malformed, ResolveError, ValidationError};

/// Resolved form of an [`AlphabetSpec`] with lookup tables built.
#[derive(Debug, Clone)]
pub struct Alphabet {
    mode: Mode,
    num_letters: u128,
}

#[derive(Debug, Clone)]
enum Mode {
    Bounded {
        min: u64,
        max: u64,
        /// Stream width: the fewest big-endian bytes that hold `max`.
        width: usize,
    },
    Fixed {
        width: usize,
        letters: Vec<Vec<u8>>,
        index: HashMap<Vec<u8>, Letter>,
    },
    Variable {
        letters: Vec<Vec<u8>>,
        index: HashMap<Vec<u8>, Letter>,
        /// Distinct letter widths, longest first.
        widths: Vec<usize>,
    },
    Ascii,
    Utf8,
    Utf16,
    Utf32,
    UInt {
        width: usize,
    },
}

impl Alphabet {
    /// Validates `spec` and builds its lookup tables.
    pub fn new(spec: &AlphabetSpec) -> Result<Self, ValidationError> {
        validate::check_alphabet(spec)?;
        Ok(Self::from_validated(spec))
    }

    /// Builds lookup tables for an alphabet that already passed validation.
    pub(crate) fn from_validated(spec: &AlphabetSpec) -> Self {
        let mode = match spec {
            AlphabetSpec::Bounded { min, max } => Mode::Bounded {
                min: *min,
                max: *max,
                width: codec::min_width(*max),
            },
            AlphabetSpec::FixedCustom {
                letter_width,
                letters,
            } => Mode::Fixed {
                width: *letter_width,
                letters: letters.clone(),
                index: build_index(letters.iter().map(Vec::as_slice)),
            },
            AlphabetSpec::VariableCustom { letters } => {
                let letters: Vec<Vec<u8>> = letters.iter().map(|l| l.bytes.clone()).collect();
                let mut widths: Vec<usize> = letters.iter().map(Vec::len).collect();
                widths.sort_unstable_by(|a, b| b.cmp(a));
                widths.dedup();
                Mode::Variable {
                    index: build_index(letters.iter().map(Vec::as_slice)),
                    letters,
                    widths,
                }
            }
            AlphabetSpec::Ascii => Mode::Ascii,
            AlphabetSpec::Utf8 => Mode::Utf8,
            AlphabetSpec::Utf16 => Mode::Utf16,
            AlphabetSpec::Utf32 => Mode::Utf32,
            AlphabetSpec::UInt8 => Mode::UInt { width: 1 },
            AlphabetSpec::UInt16 => Mode::UInt { width: 2 },
            AlphabetSpec::UInt32 => Mode::UInt { width: 4 },
            AlphabetSpec::UInt64 => Mode::UInt { width: 8 },
        };
        Self {
            mode,
            num_letters: spec.letter_count(),
        }
    }

    pub fn num_letters(&self) -> u128 {
        self.num_letters
    }

    /// Whether `letter` is an index in `[0, num_letters)`.
    pub fn contains_letter(&self, letter: Letter) -> bool {
        u128::from(letter) < self.num_letters
    }

    /// Resolves exactly one symbol.
    ///
    /// Custom alphabets match the whole symbol against a letter. Integer
    /// alphabets (bounded, UIntN) read the symbol as a big-endian integer
    /// of 1 to 8 bytes. Text encodings require the symbol to hold exactly
    /// one encoded code point.
    pub fn resolve(&self, symbol: &[u8]) -> Result<Letter, ResolveError> {
        match &self.mode {
            Mode::Bounded { width, .. } | Mode::UInt { width } => {
                if symbol.is_empty() || symbol.len() > MAX_INTEGER_WIDTH {
                    return Err(Malformed::WrongWidth {
                        expected: *width,
                        actual: symbol.len(),
                    }
                    .into());
                }
                let value =
                    codec::decode_integer(symbol).map_err(|_| Malformed::NotInteger)?;
                self.resolve_value(value)
            }
            Mode::Fixed { width, index, .. } => {
                if symbol.len() != *width {
                    return Err(Malformed::WrongWidth {
                        expected: *width,
                        actual: symbol.len(),
                    }
                    .into());
                }
                index
                    .get(symbol)
                    .copied()
                    .ok_or(ResolveError::UnknownSymbol)
            }
            Mode::Variable { index, .. } => index
                .get(symbol)
                .copied()
                .ok_or(ResolveError::UnknownSymbol),
            Mode::Ascii | Mode::Utf8 | Mode::Utf16 | Mode::Utf32 => {
                let (letter, used) = self.decode_next(symbol, VariableMatch::Exact)?;
                if used != symbol.len() {
                    return Err(Malformed::WrongWidth {
                        expected: used,
                        actual: symbol.len(),
                    }
                    .into());
                }
                Ok(letter)
            }
        }
    }

    /// Decodes the letter at the front of `bytes`, returning it with the
    /// number of bytes consumed.
    ///
    /// For variable-width alphabets `policy` selects the matching rule:
    /// `LongestPrefix` takes the longest letter that prefixes the stream
    /// (lowest index on a tie), `Exact` requires the whole remaining stream
    /// to be one letter.
    pub fn decode_next(
        &self,
        bytes: &[u8],
        policy: VariableMatch,
    ) -> Result<(Letter, usize), ResolveError> {
        if bytes.is_empty() {
            return Err(Malformed::Truncated {
                needed: 1,
                available: 0,
            }
            .into());
        }
        match &self.mode {
            Mode::Bounded { width, .. } | Mode::UInt { width } => {
                let unit = take(bytes, *width)?;
                let value = codec::decode_integer(unit).map_err(|_| Malformed::NotInteger)?;
                Ok((self.resolve_value(value)?, *width))
            }
            Mode::Fixed { width, index, .. } => {
                let unit = take(bytes, *width)?;
                let letter = index.get(unit).copied().ok_or(ResolveError::UnknownSymbol)?;
                Ok((letter, *width))
            }
            Mode::Variable { index, widths, .. } => match policy {
                VariableMatch::LongestPrefix => widths
                    .iter()
                    .filter(|&&w| w <= bytes.len())
                    .find_map(|&w| index.get(&bytes[..w]).map(|&letter| (letter, w)))
                    .ok_or(ResolveError::UnknownSymbol),
                VariableMatch::Exact => index
                    .get(bytes)
                    .map(|&letter| (letter, bytes.len()))
                    .ok_or(ResolveError::UnknownSymbol),
            },
            Mode::Ascii => {
                let byte = bytes[0];
                if byte > 0x7F {
                    return Err(Malformed::NonAscii(byte).into());
                }
                Ok((Letter::from(byte), 1))
            }
            Mode::Utf8 => decode_utf8(bytes),
            Mode::Utf16 => decode_utf16(bytes),
            Mode::Utf32 => {
                let unit = take(bytes, 4)?;
                let value = u32::from_be_bytes([unit[0], unit[1], unit[2], unit[3]]);
                let ch = char::from_u32(value).ok_or(Malformed::InvalidScalar(value))?;
                Ok((Letter::from(u32::from(ch)), 4))
            }
        }
    }

    /// Resolves an integer symbol.
    ///
    /// Bounded alphabets map `value` to `value - min`; UIntN and text
    /// encodings use the value itself as the letter. Custom alphabets have
    /// no integer form and report malformed input.
    pub fn resolve_value(&self, value: u64) -> Result<Letter, ResolveError> {
        match &self.mode {
            Mode::Bounded { min, max, .. } => {
                if (*min..=*max).contains(&value) {
                    Ok(value - min)
                } else {
                    Err(ResolveError::UnknownSymbol)
                }
            }
            Mode::Fixed { .. } | Mode::Variable { .. } => {
                Err(Malformed::NotInteger.into())
            }
            Mode::Ascii => {
                if value <= 0x7F {
                    Ok(value)
                } else {
                    Err(ResolveError::UnknownSymbol)
                }
            }
            Mode::Utf8 | Mode::Utf16 | Mode::Utf32 => u32::try_from(value)
                .ok()
                .and_then(char::from_u32)
                .map(|_| value)
                .ok_or(ResolveError::UnknownSymbol),
            Mode::UInt { .. } => {
                if u128::from(value) < self.num_letters {
                    Ok(value)
                } else {
                    Err(ResolveError::UnknownSymbol)
                }
            }
        }
    }

    /// The canonical byte encoding of `letter`, or `None` if the letter is
    /// out of range.
    pub fn representation(&self, letter: Letter) -> Option<Vec<u8>> {
        if u128::from(letter) >= self.num_letters {
            return None;
        }
        match &self.mode {
            Mode::Bounded { min, width, .. } => codec::encode_integer(min + letter, *width).ok(),
            Mode::Fixed { letters, .. } | Mode::Variable { letters, .. } => {
                letters.get(usize::try_from(letter).ok()?).cloned()
            }
            Mode::Ascii => Some(vec![letter as u8]),
            Mode::Utf8 => {
                let ch = char::from_u32(u32::try_from(letter).ok()?)?;
                let mut buf = [0u8; 4];
                Some(ch.encode_utf8(&mut buf).as_bytes().to_vec())
            }
            Mode::Utf16 => {
                let ch = char::from_u32(u32::try_from(letter).ok()?)?;
                let mut units = [0u16; 2];
                Some(
                    ch.encode_utf16(&mut units)
                        .iter()
                        .flat_map(|unit| unit.to_be_bytes())
                        .collect(),
                )
            }
            Mode::Utf32 => {
                let ch = char::from_u32(u32::try_from(letter).ok()?)?;
                Some(u32::from(ch).to_be_bytes().to_vec())
            }
            Mode::UInt { width } => codec::encode_integer(letter, *width).ok(),
        }
    }
}

/// Maps letter bytes to their index, keeping the first-listed index for
/// repeated byte strings.
fn build_index<'a>(letters: impl Iterator<Item = &'a [u8]>) -> HashMap<Vec<u8>, Letter> {
    let mut index = HashMap::new();
    for (i, bytes) in letters.enumerate() {
        index.entry(bytes.to_vec()).or_insert(i as Letter);
    }
    index
}

fn take(bytes: &[u8], width: usize) -> Result<&[u8], Malformed> {
    bytes.get(..width).ok_or(Malformed::Truncated {
        needed: width,
        available: bytes.len(),
    })
}

fn is_continuation(byte: u8) -> bool {
    byte & 0xC0 == 0x80
}

fn decode_utf8(bytes: &[u8]) -> Result<(Letter, usize), ResolveError> {
    let needed = match bytes[0] {
        0x00..=0x7F => 1,
        0xC2..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF4 => 4,
        _ => return Err(Malformed::InvalidUtf8.into()),
    };
    if bytes.len() < needed {
        // A non-continuation byte before the end is an encoding error, not a
        // short stream.
        if bytes[1..].iter().all(|&b| is_continuation(b)) {
            return Err(Malformed::Truncated {
                needed,
                available: bytes.len(),
            }
            .into());
        }
        return Err(Malformed::InvalidUtf8.into());
    }
    let text = std::str::from_utf8(&bytes[..needed]).map_err(|_| Malformed::InvalidUtf8)?;
    let ch = text.chars().next().ok_or(Malformed::InvalidUtf8)?;
    Ok((Letter::from(u32::from(ch)), needed))
}

fn decode_utf16(bytes: &[u8]) -> Result<(Letter, usize), ResolveError> {
    let unit = take(bytes, 2)?;
    let first = u16::from_be_bytes([unit[0], unit[1]]);
    match first {
        0xD800..=0xDBFF => {
            let pair = bytes.get(..4).ok_or(Malformed::UnpairedSurrogate(first))?;
            let second = u16::from_be_bytes([pair[2], pair[3]]);
            if !(0xDC00..=0xDFFF).contains(&second) {
                return Err(Malformed::UnpairedSurrogate(first).into());
            }
            let high = u32::from(first - 0xD800);
            let low = u32::from(second - 0xDC00);
            Ok((Letter::from(0x1_0000 + (high << 10) + low), 4))
        }
        0xDC00..=0xDFFF => Err(Malformed::UnpairedSurrogate(first).into()),
        _ => Ok((Letter::from(first), 2)),
    }
}
