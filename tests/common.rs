#![cfg(feature = "std")]

use std::path::Path;

use csv::ReaderBuilder;
use srecline::{
    Record,
    avec::{FromRecords, LineError},
};

#[test]
fn decode_slice_s19() {
    const PATH: &str = "fixtures/blinky.s19";
    let data = std::fs::read(PATH).unwrap();
    let mut validator = Validator::new(PATH);
    srecline::avec::decode_slice(&data, &mut validator).unwrap();
    validator.finish();
    assert!(validator.errors.is_empty());
}

#[test]
fn decode_slice_s28() {
    const PATH: &str = "fixtures/bootloader.s28";
    let data = std::fs::read(PATH).unwrap();
    let mut validator = Validator::new(PATH);
    srecline::avec::decode_slice(&data, &mut validator).unwrap();
    validator.finish();
    assert!(validator.errors.is_empty());
}

#[test]
fn decode_slice_s37() {
    const PATH: &str = "fixtures/application.s37";
    let data = std::fs::read(PATH).unwrap();
    let mut validator = Validator::new(PATH);
    srecline::avec::decode_slice(&data, &mut validator).unwrap();
    validator.finish();
    assert!(validator.errors.is_empty());
}

#[test]
fn decode_reader_s19() {
    const PATH: &str = "fixtures/blinky.s19";
    let mut file = std::fs::File::open(PATH).unwrap();
    let mut validator = Validator::new(PATH);
    srecline::avec::decode_reader(&mut file, &mut validator).unwrap();
    validator.finish();
    assert!(validator.errors.is_empty());
}

#[test]
fn decode_reader_s28() {
    const PATH: &str = "fixtures/bootloader.s28";
    let mut file = std::fs::File::open(PATH).unwrap();
    let mut validator = Validator::new(PATH);
    srecline::avec::decode_reader(&mut file, &mut validator).unwrap();
    validator.finish();
    assert!(validator.errors.is_empty());
}

#[test]
fn decode_reader_s37() {
    const PATH: &str = "fixtures/application.s37";
    let mut file = std::fs::File::open(PATH).unwrap();
    let mut validator = Validator::new(PATH);
    srecline::avec::decode_reader(&mut file, &mut validator).unwrap();
    validator.finish();
    assert!(validator.errors.is_empty());
}

#[test]
fn decode_slice_corrupt() {
    const PATH: &str = "fixtures/corrupt.s19";
    let data = std::fs::read(PATH).unwrap();
    let mut validator = Validator::new(PATH);
    srecline::avec::decode_slice(&data, &mut validator).unwrap();
    validator.finish();

    // Each malformed line is reported, followed by its remaining characters
    // failing to resynchronise until the next marker.
    let errors: Vec<_> = validator
        .errors
        .iter()
        .filter(|e| **e != LineError::MalformedType)
        .collect();

    assert!(matches!(
        errors.as_slice(),
        [
            LineError::InvalidCount(0),
            LineError::ReservedType,
            LineError::NegativeDataLength {
                count: 2,
                required: 5
            },
            LineError::InvalidHex(_),
        ]
    ));
    assert!(validator.errors.starts_with(&[LineError::MalformedType]));
}

#[test]
fn decode_reader_corrupt() {
    const PATH: &str = "fixtures/corrupt.s19";
    let mut file = std::fs::File::open(PATH).unwrap();
    let mut validator = Validator::new(PATH);
    srecline::avec::decode_reader(&mut file, &mut validator).unwrap();
    validator.finish();
    assert!(!validator.errors.is_empty());
}

#[test]
fn decode_slice_truncated() {
    let data = std::fs::read("fixtures/blinky.s19").unwrap();
    let mut records: Vec<Record> = Vec::new();

    let result = srecline::avec::decode_slice(&data[..data.len() - 5], &mut records);

    assert_eq!(result, Err(srecline::avec::slice::Error::EndOfSlice));
    assert_eq!(records.len(), 8);
}

#[test]
fn decode_reader_truncated() {
    let data = std::fs::read("fixtures/bootloader.s28").unwrap();
    let mut records: Vec<Record> = Vec::new();

    let result = srecline::avec::decode_reader(&mut &data[..data.len() - 1], &mut records);

    assert!(matches!(
        result,
        Err(srecline::avec::reader::Error::EndOfStream)
    ));
    assert_eq!(records.len(), 6);
}

/// Checks each record against a row of the fixture's `.csv` sibling:
/// `kind,count,address,data,checksum,valid`, with hexadecimal address, data,
/// and checksum.
struct Validator {
    expected: Vec<Vec<String>>,
    errors: Vec<LineError>,
}

impl Validator {
    fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().with_extension("csv");

        let mut reader = ReaderBuilder::new()
            .flexible(true)
            .has_headers(true)
            .from_path(path)
            .unwrap();

        let expected: Vec<Vec<String>> = reader
            .records()
            .map(|r| r.unwrap().iter().map(|f| f.to_string()).collect())
            .collect();

        Self {
            expected,
            errors: vec![],
        }
    }

    fn finish(&self) {
        assert!(self.expected.is_empty(), "missing {:?}", self.expected);
    }
}

impl FromRecords for Validator {
    fn add_record(&mut self, record: Record) {
        let row = self.expected.remove(0);

        let address = record
            .address()
            .map(|a| format!("{a:X}"))
            .unwrap_or_default();
        let data: String = record.data().iter().map(|b| format!("{b:02X}")).collect();

        assert_eq!(row[0], record.kind().to_string());
        assert_eq!(row[1], record.count().to_string());
        assert_eq!(row[2], address);
        assert_eq!(row[3], data);
        assert_eq!(row[4], format!("{:02X}", record.checksum()));
        assert_eq!(row[5], record.is_checksum_valid().to_string());

        assert_eq!(
            usize::from(record.count()),
            usize::from(record.address_len()) + record.data().len() + 1
        );
    }

    fn add_error(&mut self, err: LineError) {
        self.errors.push(err);
    }
}
