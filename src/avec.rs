//! Convenience interfaces for common decoding patterns.
//!
//! [`Parser`] consumes a stream one byte at a time, as bytes arrive. The
//! functions in this module are suited to decoding every line of a file or
//! data slice, publishing to the [`FromRecords`] trait.
//!
//! In many cases, this trait can be derived. See the
//! [`FromRecords`](macro@FromRecords) macro for details.

#[cfg(feature = "std")]
pub mod reader;
pub mod slice;
pub mod stream;

#[cfg(feature = "std")]
pub use reader::decode as decode_reader;
pub use slice::decode as decode_slice;
pub use stream::{Config, LineError, Parser, Status};

use crate::record::Record;

/// Derive [`FromRecords`] for a struct collecting records by type.
///
/// _Requires Cargo feature `derive`._
///
/// # Example
///
/// To collect a single record, add the `record(N, ...)` attribute to an
/// `Option<Record>` struct field, where each `N` is a record type number from
/// `0` to `9`. Additional records of the same types will overwrite earlier
/// ones. To collect every occurrence, apply the attribute to a `Vec<Record>`
/// instead.
///
/// ```
/// #[derive(Debug, Default, FromRecords)]
/// struct Image {
///     #[record(0)]
///     header: Option<Record>,
///     #[record(1, 2, 3)]
///     data: Vec<Record>,
///     #[record(7, 8, 9)]
///     start: Option<Record>,
/// }
/// ```
///
/// Records of types not named by any field are ignored, as are malformed
/// lines.
#[cfg(feature = "derive")]
pub use srecline_derive::FromRecords;

/// Receive decoded records.
///
/// See the [`FromRecords`](macro@FromRecords) derive macro for an automatic
/// implementation of this trait.
pub trait FromRecords {
    /// Add a completed record.
    ///
    /// Records are published even when their checksum does not match; see
    /// [`Record::is_checksum_valid`].
    fn add_record(&mut self, record: Record);

    /// Add the error for a discarded line.
    ///
    /// The default implementation ignores errors.
    fn add_error(&mut self, _: LineError) {}
}

#[cfg(feature = "std")]
extern crate std;

#[cfg(feature = "std")]
impl FromRecords for std::vec::Vec<Record> {
    fn add_record(&mut self, record: Record) {
        self.push(record);
    }
}
