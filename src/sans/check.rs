//! Helpers for computing line checksums.

/// Accumulate a slice of bytes into a running modulo-256 sum.
pub fn compute_checksum(init: u8, r: &[u8]) -> u8 {
    r.iter().fold(init, |acc, b| acc.wrapping_add(*b))
}

/// Convert a running sum into the checksum a line should carry.
///
/// The checksum is the least significant byte of the one's complement of the
/// sum over the count, address, and data fields.
pub fn complement(sum: u8) -> u8 {
    !sum
}

/// A transmitted checksum, alongside the value calculated from the line.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Checksum {
    /// The checksum found at the end of the line.
    pub found: u8,
    /// The checksum calculated over the decoded fields.
    pub calculated: u8,
}

impl Checksum {
    /// Whether the found and calculated values match.
    pub fn is_valid(&self) -> bool {
        self.found == self.calculated
    }
}
