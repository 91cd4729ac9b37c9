//! Internal finite-state machine for implementing decoders.
//!
//! This module is intended for advanced applications that need fine control
//! over decoder internals. See [`crate::avec`] for implementations covering
//! common decoding patterns.
//!
//! # Architecture
//!
//! All states are represented by a non-copy token. Once enough bytes are
//! ready, transition to another state by calling the token's `advance` method.
//! This will return a successor state token, along with any extracted data.
//!
//! Every field of a line after the `S` marker is hexadecimal text, so most
//! states advance over a single pair of characters (one encoded byte). States
//! covering a multi-byte field, such as the address or payload, return
//! themselves until the field is exhausted. The line terminator is consumed
//! one raw byte at a time.
//!
//! Only the initial state, re-exported for convenience as [`Decoder`], can be
//! constructed.
//!
//! Each state knows how many bytes it needs from the record type and count
//! decoded earlier in the line, so bytes never need to be revisited. Some
//! areas of the decoding process are not represented in the finite-state
//! machine and must be carefully written:
//!
//! - Pairing incoming bytes into the chunks each state expects.
//!
//! - Resynchronising after an error. Every error invalidates the line, and
//! decoding must restart from [`Decoder`] at the next `S` marker.
//!
//! Implementers are recommended to begin by studying and modifying the
//! [`crate::avec::Parser`] driver.

pub mod check;
pub mod data;
pub mod header;
pub mod hex;
pub mod trailer;

/// Entrypoint to the finite-state machine.
pub type Decoder = header::RecordType;

/// Decoded fields shared by every state after the record count.
#[derive(Debug)]
pub(crate) struct Line {
    data_len: u8,
    /// Running modulo-256 sum of every byte decoded after the type marker.
    sum: u8,
}
