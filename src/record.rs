//! Record types and the decoded record published for each line.

use core::fmt;

use tinyvec::ArrayVec;
use zerocopy::TryFromBytes;

/// The largest payload a single line can carry.
///
/// A count of `0xFF` less the checksum byte, for a record type with no address.
pub const MAX_DATA_LEN: usize = 0xFF - 1;

/// A record type, identified by the digit following the `S` marker.
///
/// Each variant is represented by its ASCII digit.
#[repr(u8)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, TryFromBytes)]
pub enum RecordKind {
    /// Header.
    #[default]
    S0 = b'0',
    /// Data with a 16-bit address.
    S1 = b'1',
    /// Data with a 24-bit address.
    S2 = b'2',
    /// Data with a 32-bit address.
    S3 = b'3',
    /// Reserved.
    S4 = b'4',
    /// Count of previous data records.
    S5 = b'5',
    /// Count of previous data records, 24-bit.
    S6 = b'6',
    /// Start address, 32-bit.
    S7 = b'7',
    /// Start address, 24-bit.
    S8 = b'8',
    /// Start address, 16-bit.
    S9 = b'9',
}

impl RecordKind {
    /// The record type number, from `0` to `9`.
    pub fn digit(self) -> u8 {
        self as u8 - b'0'
    }

    /// Number of address bytes carried by a record of this type.
    ///
    /// Returns `None` for the reserved `S4` type, which has no defined layout.
    pub fn address_len(self) -> Option<u8> {
        match self {
            Self::S5 => Some(0),
            Self::S0 | Self::S1 | Self::S9 => Some(2),
            Self::S2 | Self::S6 | Self::S8 => Some(3),
            Self::S3 | Self::S7 => Some(4),
            Self::S4 => None,
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S{}", self.digit())
    }
}

/// A decoded line.
///
/// Records are only ever published whole: every field belongs to the same,
/// fully received line.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Record {
    pub(crate) kind: RecordKind,
    pub(crate) count: u8,
    pub(crate) address: Option<u32>,
    pub(crate) data: ArrayVec<[u8; MAX_DATA_LEN]>,
    pub(crate) checksum: u8,
    pub(crate) calculated: u8,
}

impl Record {
    /// The record type.
    pub fn kind(&self) -> RecordKind {
        self.kind
    }

    /// The declared number of byte pairs following the count field.
    pub fn count(&self) -> u8 {
        self.count
    }

    /// The load (or start) address, if the record type has one.
    pub fn address(&self) -> Option<u32> {
        self.address
    }

    /// Number of address bytes, implied by the record type.
    pub fn address_len(&self) -> u8 {
        // Reserved records are never published.
        self.kind.address_len().unwrap_or(0)
    }

    /// The decoded payload.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Number of payload bytes.
    pub fn data_len(&self) -> u8 {
        self.data.len() as u8
    }

    /// The checksum found at the end of the line.
    pub fn checksum(&self) -> u8 {
        self.checksum
    }

    /// The checksum calculated from the count, address, and data fields.
    pub fn calculated_checksum(&self) -> u8 {
        self.calculated
    }

    /// Whether the found checksum matches the calculated one.
    ///
    /// A mismatch does not prevent a record from being published; callers
    /// decide whether to discard it.
    pub fn is_checksum_valid(&self) -> bool {
        self.checksum == self.calculated
    }
}
