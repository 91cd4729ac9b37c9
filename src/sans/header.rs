//! States processing the record type and count.

use thiserror::Error;
use zerocopy::FromBytes;

use crate::record::RecordKind;

use super::{
    Line,
    check::compute_checksum,
    data::{Body, RecordAddress},
    hex::{self, HexError},
};

/// An error advancing over a record type.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RecordTypeError {
    /// The line did not begin with an `S` marker.
    #[error("Missing record marker, found ({0:#04x}).")]
    MissingMarker(u8),
    /// The marker was not followed by a digit.
    #[error("Unknown record type ({0:#04x}).")]
    UnknownType(u8),
}

/// State token to decode a record type.
#[derive(Debug)]
pub struct RecordType;

impl RecordType {
    /// Transition to another state by decoding a record type.
    ///
    /// Returns the record type, and a successor state token.
    pub fn advance(r: [u8; 2]) -> Result<(RecordKind, RecordCount), RecordTypeError> {
        #[repr(C, packed)]
        #[derive(FromBytes)]
        struct TypeMarker {
            mark: u8,
            digit: u8,
        }

        let TypeMarker { mark, digit } = zerocopy::transmute!(r);

        if mark != b'S' {
            Err(RecordTypeError::MissingMarker(mark))?;
        }

        let kind: RecordKind = match zerocopy::try_transmute!(digit) {
            Ok(kind) => kind,
            Err(_) => Err(RecordTypeError::UnknownType(digit))?,
        };

        Ok((kind, RecordCount(kind)))
    }
}

/// An error advancing over a record count.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RecordCountError {
    /// The count was not hexadecimal.
    #[error("Invalid record count: {0}")]
    Hex(#[from] HexError),
    /// The count was zero, or above the accepted maximum.
    #[error("Record count out of bounds ({0}).")]
    Invalid(u8),
    /// The record type has no defined layout.
    #[error("Found reserved record type ({0}).")]
    ReservedType(RecordKind),
    /// The count is too small to hold the address and checksum.
    #[error("Record count ({count}) below the {required} bytes required by its type.")]
    DataLength { count: u8, required: u8 },
}

/// State token to decode a record count.
#[derive(Debug)]
pub struct RecordCount(pub(super) RecordKind);

impl RecordCount {
    /// Transition to another state by decoding a record count, rejecting counts
    /// above `max`.
    ///
    /// Returns the count of byte pairs remaining in the line, and a successor
    /// state token.
    pub fn advance(self, r: [u8; 2], max: u8) -> Result<(u8, Body), RecordCountError> {
        let Self(kind) = self;
        let count = hex::byte(r)?;

        if count == 0 || count > max {
            Err(RecordCountError::Invalid(count))?;
        }

        let Some(address_len) = kind.address_len() else {
            Err(RecordCountError::ReservedType(kind))?
        };

        let required = address_len + 1;
        let Some(data_len) = count.checked_sub(required) else {
            Err(RecordCountError::DataLength { count, required })?
        };

        let line = Line {
            data_len,
            sum: compute_checksum(0, &[count]),
        };

        let successor = if address_len != 0 {
            Body::Address(RecordAddress {
                remaining: address_len,
                address: 0,
                line,
            })
        } else {
            Body::after_address(line)
        };

        Ok((count, successor))
    }
}
