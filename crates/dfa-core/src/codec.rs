// Big-endian integer letter codec.
// Origin: IntegerLetter.java
//
// Integer letters (UIntN alphabets, bounded ranges) are written most
// significant byte first using a fixed width of 1 to 8 bytes.

use crate::CodecError;

/// Largest integer width in bytes.
pub const MAX_INTEGER_WIDTH: usize = 8;

/// Encodes `value` as exactly `width` big-endian bytes.
///
/// Fails if `width` is outside `1..=8` or if `value` needs more than
/// `width` bytes.
pub fn encode_integer(value: u64, width: usize) -> Result<Vec<u8>, CodecError> {
    if width == 0 || width > MAX_INTEGER_WIDTH {
        return Err(CodecError::InvalidWidth { width });
    }
    if min_width(value) > width {
        return Err(CodecError::ValueTooWide { value, width });
    }
    let bytes = value.to_be_bytes();
    Ok(bytes[MAX_INTEGER_WIDTH - width..].to_vec())
}

/// Decodes a big-endian integer of 1 to 8 bytes.
pub fn decode_integer(bytes: &[u8]) -> Result<u64, CodecError> {
    if bytes.is_empty() || bytes.len() > MAX_INTEGER_WIDTH {
        return Err(CodecError::InvalidWidth { width: bytes.len() });
    }
    Ok(bytes
        .iter()
        .fold(0u64, |acc, &byte| (acc << 8) | u64::from(byte)))
}

/// Smallest width in bytes able to hold `value` (at least 1).
pub fn min_width(value: u64) -> usize {
    let significant_bits = (u64::BITS - value.leading_zeros()) as usize;
    significant_bits.div_ceil(8).max(1)
}
