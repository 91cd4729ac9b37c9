//! States processing the address and payload of a line.

use either::Either::{self, Left, Right};

use super::{
    Line,
    check::compute_checksum,
    hex::{self, HexError},
    trailer::RecordChecksum,
};

/// State token to decode one byte of a record address.
#[derive(Debug)]
pub struct RecordAddress {
    pub(super) remaining: u8,
    pub(super) address: u32,
    pub(super) line: Line,
}

impl RecordAddress {
    /// Transition to another state by decoding one byte of a record address,
    /// most significant first.
    ///
    /// Returns the address and the successor state once all of its bytes have
    /// been decoded, or this state otherwise.
    pub fn advance(self, r: [u8; 2]) -> Result<Either<(u32, Body), Self>, HexError> {
        let Self {
            remaining,
            address,
            mut line,
        } = self;

        let b = hex::byte(r)?;
        line.sum = compute_checksum(line.sum, &[b]);

        let address = (address << 8) | u32::from(b);

        Ok(if remaining == 1 {
            Left((address, Body::after_address(line)))
        } else {
            Right(Self {
                remaining: remaining - 1,
                address,
                line,
            })
        })
    }
}

/// State token to decode one byte of a record payload.
#[derive(Debug)]
pub struct RecordData {
    pub(super) remaining: u8,
    pub(super) line: Line,
}

impl RecordData {
    /// Transition to another state by decoding one byte of a record payload.
    ///
    /// Returns the payload byte, and a successor state token.
    pub fn advance(self, r: [u8; 2]) -> Result<(u8, Either<RecordChecksum, Self>), HexError> {
        let Self {
            remaining,
            mut line,
        } = self;

        let b = hex::byte(r)?;
        line.sum = compute_checksum(line.sum, &[b]);

        let successor = if remaining == 1 {
            Left(RecordChecksum { line })
        } else {
            Right(Self {
                remaining: remaining - 1,
                line,
            })
        };

        Ok((b, successor))
    }
}

/// A state token for the fields following a record count.
///
/// Fields with no bytes for the record type are skipped, so the address and
/// payload states always have at least one byte remaining.
#[derive(Debug)]
pub enum Body {
    Address(RecordAddress),
    Data(RecordData),
    Checksum(RecordChecksum),
}

impl Body {
    pub(super) fn after_address(line: Line) -> Self {
        if line.data_len != 0 {
            Self::Data(RecordData {
                remaining: line.data_len,
                line,
            })
        } else {
            Self::Checksum(RecordChecksum { line })
        }
    }
}
