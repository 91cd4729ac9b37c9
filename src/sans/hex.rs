//! Helpers for decoding ASCII hexadecimal text.

use tartan_bitfield::bitfield;
use thiserror::Error;

/// An error decoding hexadecimal text.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum HexError {
    /// Found a character outside `0-9`, `A-F`, and `a-f`.
    #[error("Invalid hexadecimal digit ({0:#04x}).")]
    InvalidDigit(u8),
    /// Found more digits than fit in a `u64`.
    #[error("Too many hexadecimal digits ({0}).")]
    Overflow(usize),
}

/// Decode a single ASCII hexadecimal digit (case insensitive) into a nibble.
pub fn nibble(c: u8) -> Result<u8, HexError> {
    bitfield! {
        struct AsciiHex(u8) {
            [0..4] low: u8,
            [4..8] high: u8,
        }
    }

    let ascii = AsciiHex(c);

    // Digits sit in column 3 of the ASCII table, letters in columns 4 and 6.
    match (ascii.high(), ascii.low()) {
        (0x3, n @ 0..=9) => Ok(n),
        (0x4 | 0x6, n @ 1..=6) => Ok(n + 9),
        _ => Err(HexError::InvalidDigit(c)),
    }
}

/// Decode a pair of hexadecimal digits into a byte, most significant first.
pub fn byte(r: [u8; 2]) -> Result<u8, HexError> {
    value(&r).map(|v| v as u8)
}

/// Decode a sequence of hexadecimal digits into an integer, most significant
/// first.
///
/// Decoding stops at the first invalid digit. An empty sequence decodes to
/// zero.
pub fn value(r: &[u8]) -> Result<u64, HexError> {
    if r.len() > 2 * size_of::<u64>() {
        Err(HexError::Overflow(r.len()))?;
    }

    r.iter()
        .try_fold(0, |acc, c| Ok((acc << 4) | u64::from(nibble(*c)?)))
}
