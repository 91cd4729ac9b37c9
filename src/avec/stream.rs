//! Byte-at-a-time decoder implementation.

use core::mem;

use either::Either::{Left, Right};
use thiserror::Error;
use tinyvec::ArrayVec;
use tracing::{debug, warn};

use crate::{
    record::{MAX_DATA_LEN, Record, RecordKind},
    sans::{
        Decoder,
        check::Checksum,
        data::Body,
        header::{RecordCount, RecordCountError, RecordTypeError},
        hex::{self, HexError},
        trailer::StreamEnd,
    },
};

/// Errors invalidating a line.
///
/// None of these are fatal to the stream: the parser has already been reset,
/// and resumes at the next line.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum LineError {
    /// No recognisable `S<digit>` prefix.
    #[error("Malformed record type.")]
    MalformedType,
    /// Found the reserved `S4` record type.
    #[error("Found reserved record type.")]
    ReservedType,
    /// The count was zero, or above the configured maximum.
    #[error("Record count out of bounds ({0}).")]
    InvalidCount(u8),
    /// The count cannot hold the address and checksum of the record type.
    #[error("Record count ({count}) below the {required} bytes required by its type.")]
    NegativeDataLength { count: u8, required: u8 },
    /// A field contained a character which is not a hexadecimal digit.
    #[error("Invalid hexadecimal field: {0}")]
    InvalidHex(#[from] HexError),
}

impl From<RecordTypeError> for LineError {
    fn from(_: RecordTypeError) -> Self {
        Self::MalformedType
    }
}

impl From<RecordCountError> for LineError {
    fn from(err: RecordCountError) -> Self {
        match err {
            RecordCountError::Hex(err) => Self::InvalidHex(err),
            RecordCountError::Invalid(count) => Self::InvalidCount(count),
            RecordCountError::ReservedType(_) => Self::ReservedType,
            RecordCountError::DataLength { count, required } => {
                Self::NegativeDataLength { count, required }
            }
        }
    }
}

/// Parser configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    max_count: u8,
    terminator_len: u8,
}

impl Config {
    /// Accept any count, and expect lines to end with two bytes (`\r\n`).
    pub const fn new() -> Self {
        Self {
            max_count: u8::MAX,
            terminator_len: 2,
        }
    }

    /// Reject lines declaring more than `max_count` byte pairs.
    pub const fn with_max_count(self, max_count: u8) -> Self {
        Self { max_count, ..self }
    }

    /// Expect lines to end with `terminator_len` bytes.
    ///
    /// Use `1` for input with bare `\n` line endings. With `0`, records are
    /// published as soon as their checksum is decoded.
    pub const fn with_terminator_len(self, terminator_len: u8) -> Self {
        Self {
            terminator_len,
            ..self
        }
    }

    /// The largest accepted record count.
    pub const fn max_count(&self) -> u8 {
        self.max_count
    }

    /// The number of line terminator bytes.
    pub const fn terminator_len(&self) -> u8 {
        self.terminator_len
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

/// The outcome of feeding a byte to a [`Parser`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// The line is not yet complete.
    Busy,
    /// A record was just completed, and can be read with
    /// [`Parser::take_record`] until the next byte is fed.
    Ok,
    /// The line was malformed, and has been discarded.
    Error(LineError),
}

#[derive(Debug)]
enum State {
    /// Awaiting a record marker, having skipped a leading byte or not.
    Type { skipped: bool },
    Count(RecordCount),
    Body(Body),
    End(StreamEnd),
}

impl Default for State {
    fn default() -> Self {
        Self::Type { skipped: false }
    }
}

/// The record under construction.
#[derive(Debug, Default)]
struct Draft {
    kind: RecordKind,
    count: u8,
    address: Option<u32>,
    data: ArrayVec<[u8; MAX_DATA_LEN]>,
    checksum: Checksum,
}

/// An incremental decoder consuming one byte at a time.
///
/// Each parser holds the state of a single stream; decode independent streams
/// with independent parsers.
///
/// ```
/// let mut parser = Parser::new();
///
/// for b in bytes {
///     if let Status::Ok = parser.feed(b) {
///         let record = parser.take_record();
///     }
/// }
/// ```
#[derive(Debug, Default)]
pub struct Parser {
    config: Config,
    state: State,
    /// First character of a hexadecimal pair, or the record marker.
    pending: Option<u8>,
    draft: Draft,
    record: Option<Record>,
}

impl Parser {
    /// Create a parser with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser with a custom configuration.
    pub fn with_config(config: Config) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// The configuration in use.
    pub fn config(&self) -> Config {
        self.config
    }

    /// Discard any partially received line.
    pub fn reset(&mut self) {
        self.state = State::default();
        self.pending = None;
        self.draft = Draft::default();
        self.record = None;
    }

    /// Whether the parser is between lines.
    pub fn is_idle(&self) -> bool {
        matches!(self.state, State::Type { .. }) && self.pending.is_none()
    }

    /// Consume a byte.
    ///
    /// On [`Status::Ok`], the completed record is held until the next call and
    /// can be moved out with [`Parser::take_record`].
    pub fn feed(&mut self, byte: u8) -> Status {
        match self.push(byte) {
            Ok(None) => Status::Busy,
            Ok(Some(record)) => {
                self.record = Some(record);
                Status::Ok
            }
            Err(err) => Status::Error(err),
        }
    }

    /// Take the record completed by the last call to [`Parser::feed`].
    ///
    /// Returns `None` if the last byte fed did not complete a record, or the
    /// record has already been taken.
    pub fn take_record(&mut self) -> Option<Record> {
        self.record.take()
    }

    /// Consume a byte, returning the completed record by value.
    ///
    /// On error, the line is discarded and the parser is ready for the next.
    pub fn push(&mut self, byte: u8) -> Result<Option<Record>, LineError> {
        self.record = None;

        self.step(byte).inspect_err(|err| {
            debug!(%err, "Discarding malformed line.");
            self.reset();

            // A marker interrupting a line begins the next one.
            if byte == b'S' {
                self.pending = Some(byte);
            }
        })
    }

    fn step(&mut self, byte: u8) -> Result<Option<Record>, LineError> {
        self.state = match mem::take(&mut self.state) {
            State::Type { skipped } => match self.pending.take() {
                None if byte == b'S' => {
                    self.pending = Some(byte);
                    State::Type { skipped }
                }
                // Tolerate a single stray byte ahead of the marker.
                None if !skipped => State::Type { skipped: true },
                None => Err(LineError::MalformedType)?,
                Some(mark) => {
                    let (kind, successor) = Decoder::advance([mark, byte])?;
                    self.draft.kind = kind;
                    State::Count(successor)
                }
            },
            State::Count(state) => match self.pair(byte)? {
                None => State::Count(state),
                Some(r) => {
                    let (count, successor) = state.advance(r, self.config.max_count)?;
                    self.draft.count = count;
                    State::Body(successor)
                }
            },
            State::Body(Body::Address(state)) => match self.pair(byte)? {
                None => State::Body(Body::Address(state)),
                Some(r) => match state.advance(r)? {
                    Left((address, successor)) => {
                        self.draft.address = Some(address);
                        State::Body(successor)
                    }
                    Right(state) => State::Body(Body::Address(state)),
                },
            },
            State::Body(Body::Data(state)) => match self.pair(byte)? {
                None => State::Body(Body::Data(state)),
                Some(r) => {
                    let (b, successor) = state.advance(r)?;
                    self.draft.data.push(b);

                    match successor {
                        Left(state) => State::Body(Body::Checksum(state)),
                        Right(state) => State::Body(Body::Data(state)),
                    }
                }
            },
            State::Body(Body::Checksum(state)) => match self.pair(byte)? {
                None => State::Body(Body::Checksum(state)),
                Some(r) => {
                    let (checksum, successor) = state.advance(r, self.config.terminator_len)?;
                    self.draft.checksum = checksum;

                    if !checksum.is_valid() {
                        warn!(
                            found = checksum.found,
                            calculated = checksum.calculated,
                            "Checksum mismatch."
                        );
                    }

                    match successor {
                        Left(state) => State::End(state),
                        Right(_) => return Ok(Some(self.publish())),
                    }
                }
            },
            State::End(state) => match state.advance(byte) {
                Left(_) => return Ok(Some(self.publish())),
                Right(state) => State::End(state),
            },
        };

        Ok(None)
    }

    /// Pair a hexadecimal digit with the one before it, or hold it until the
    /// next.
    fn pair(&mut self, byte: u8) -> Result<Option<[u8; 2]>, HexError> {
        hex::nibble(byte)?;

        Ok(match self.pending.take() {
            Some(first) => Some([first, byte]),
            None => {
                self.pending = Some(byte);
                None
            }
        })
    }

    /// Move the finished draft out as a record, leaving the parser idle.
    fn publish(&mut self) -> Record {
        let Draft {
            kind,
            count,
            address,
            data,
            checksum,
        } = mem::take(&mut self.draft);

        debug!(%kind, count, ?address, len = data.len(), "Decoded record.");

        Record {
            kind,
            count,
            address,
            data,
            checksum: checksum.found,
            calculated: checksum.calculated,
        }
    }
}
