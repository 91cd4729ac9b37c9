//! States processing the checksum and terminator of a line.

use either::Either::{self, Left, Right};

use super::{
    Line,
    check::{Checksum, complement},
    header::RecordType,
    hex::{self, HexError},
};

/// State token to decode a record checksum.
#[derive(Debug)]
pub struct RecordChecksum {
    pub(super) line: Line,
}

impl RecordChecksum {
    /// Transition to another state by decoding a record checksum, expecting
    /// `terminator` line-ending bytes to follow.
    ///
    /// Returns the found and calculated checksums, and a successor state token.
    /// A mismatch is not an error: the line is still complete.
    pub fn advance(
        self,
        r: [u8; 2],
        terminator: u8,
    ) -> Result<(Checksum, Either<StreamEnd, RecordType>), HexError> {
        let found = hex::byte(r)?;
        let calculated = complement(self.line.sum);

        let successor = if terminator != 0 {
            Left(StreamEnd(terminator))
        } else {
            Right(RecordType)
        };

        Ok((Checksum { found, calculated }, successor))
    }
}

/// State token to skip one byte of a line terminator.
#[derive(Debug)]
pub struct StreamEnd(pub(super) u8);

impl StreamEnd {
    /// Transition to another state by skipping one byte of a line terminator.
    ///
    /// The byte is not validated. Returns a successor state token.
    pub fn advance(self, _r: u8) -> Either<RecordType, Self> {
        match self.0 {
            1 => Left(RecordType),
            remaining => Right(Self(remaining - 1)),
        }
    }
}
