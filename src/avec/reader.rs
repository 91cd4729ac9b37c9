//! Reader-based decoder implementation.
//!
//! _Requires Cargo feature `std`._

use std::io::{ErrorKind, Read};

use thiserror::Error;

use super::{
    FromRecords,
    stream::{Config, Parser},
};

extern crate std;

/// Errors occurring while decoding from a reader.
#[derive(Debug, Error)]
pub enum Error {
    /// An error from the supplied reader.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// Reached the end of the reader partway through a line.
    #[error("Unexpectedly reached the end of the stream.")]
    EndOfStream,
}

/// Decode records from a reader of a document, publishing to a receiver.
///
/// Malformed lines are reported to the receiver and skipped. This method is
/// also re-exported as `srecline::avec::decode_reader`.
///
/// _Requires Cargo feature `std`._
pub fn decode(r: &mut impl Read, o: &mut impl FromRecords) -> Result<(), Error> {
    decode_with(r, Config::default(), o)
}

/// Decode records from a reader of a document with a custom configuration,
/// publishing to a receiver.
///
/// _Requires Cargo feature `std`._
pub fn decode_with(
    r: &mut impl Read,
    config: Config,
    o: &mut impl FromRecords,
) -> Result<(), Error> {
    let mut parser = Parser::with_config(config);
    let mut buf = [0; 512];

    loop {
        let n = match r.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) => Err(err)?,
        };

        for b in &buf[..n] {
            match parser.push(*b) {
                Ok(Some(record)) => o.add_record(record),
                Ok(None) => {}
                Err(err) => o.add_error(err),
            }
        }
    }

    if !parser.is_idle() {
        Err(Error::EndOfStream)?;
    }

    Ok(())
}
