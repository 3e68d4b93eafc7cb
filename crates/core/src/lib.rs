//! Core types for symbin
//!
//! This crate holds the data model every other layer is built on:
//! - Endian: byte order of multi-byte primitives
//! - TextEncoding: string encodings and their unit width
//! - SettingsProvider / BinarySettings: what an engine is configured with
//! - ChecksumCalculator: running checksums fed by the stream layer
//! - SerializerLogger: sinks for per-field trace output
//! - Error: the single error type of the workspace

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod checksum;
pub mod encoding;
pub mod endian;
pub mod error;
pub mod hex;
pub mod log;
pub mod settings;

pub use checksum::{ActiveChecksum, ChecksumCalculator, Checksum8, Crc32Checksum};
pub use encoding::TextEncoding;
pub use endian::Endian;
pub use error::{Error, Result};
pub use hex::bytes_to_hex;
pub use log::{FileLogger, MemoryLogger, SerializerLogger, TracingLogger};
pub use settings::{BinarySettings, SettingsProvider};
