//! Slice-based decoder implementation.

use thiserror::Error;

use super::{
    FromRecords,
    stream::{Config, Parser},
};

/// Errors occurring while decoding from a slice.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Reached the end of the slice partway through a line.
    #[error("Unexpectedly reached the end of the slice.")]
    EndOfSlice,
}

/// Decode records from a slice of a document, publishing to a receiver.
///
/// Malformed lines are reported to the receiver and skipped. This method is
/// also re-exported as `srecline::avec::decode_slice`.
pub fn decode(r: &[u8], o: &mut impl FromRecords) -> Result<(), Error> {
    decode_with(r, Config::default(), o)
}

/// Decode records from a slice of a document with a custom configuration,
/// publishing to a receiver.
pub fn decode_with(r: &[u8], config: Config, o: &mut impl FromRecords) -> Result<(), Error> {
    let mut parser = Parser::with_config(config);

    for b in r {
        match parser.push(*b) {
            Ok(Some(record)) => o.add_record(record),
            Ok(None) => {}
            Err(err) => o.add_error(err),
        }
    }

    if !parser.is_idle() {
        Err(Error::EndOfSlice)?;
    }

    Ok(())
}
