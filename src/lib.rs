#![no_std]

//! An incremental decoder for Motorola S-record (SREC) streams.
//!
//! Srecline recognises S-record lines one byte at a time, as bytes arrive from
//! a file, serial link, or socket, without buffering the stream. Each completed
//! line is published as a [`Record`] carrying its type, address, payload, and
//! the outcome of its checksum.
//!
//! Most users should begin with [`avec::Parser`], or the slice and reader
//! helpers in the [`avec`] module. The underlying finite-state machine is
//! exposed in the [`sans`] module for applications needing finer control (such
//! as those running on embedded systems).
//!
//! ## Cargo Features
//!
//! The following crate feature flags are available:
//!
//! - `derive`: enable derive macros (default).
//! - `std`: enable reader-based decoder (default).

pub mod avec;
pub mod record;
pub mod sans;

pub use record::{Record, RecordKind};
