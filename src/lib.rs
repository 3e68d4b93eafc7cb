//! # symbin
//!
//! Symmetric binary serialization for proprietary file formats.
//!
//! A type describes its layout once, as an ordered sequence of fields. The
//! same description decodes the type from a stream and encodes it back,
//! byte for byte:
//!
//! ```
//! use symbin::prelude::*;
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct Palette {
//!     colors: Vec<u32>,
//! }
//!
//! impl BinarySerializable for Palette {
//!     fn serialize<S: BinarySerializer>(&mut self, s: &mut S) -> Result<()> {
//!         let count = s.serialize_array_size::<u16, _>(&mut self.colors, "Colors")?;
//!         s.serialize_array(&mut self.colors, count, "Colors")
//!     }
//! }
//!
//! let mut palette = Palette { colors: vec![0xFF0000, 0x00FF00] };
//! let bytes = write_to_bytes(&mut palette, BinarySettings::big_endian())?;
//! assert_eq!(bytes.len(), 2 + 2 * 4);
//!
//! let back: Palette = read_from_bytes(&bytes, BinarySettings::big_endian())?;
//! assert_eq!(back, palette);
//! # Ok::<(), symbin::Error>(())
//! ```
//!
//! ## Layers
//!
//! - [`Reader`] / [`Writer`]: endian-aware primitives with XOR and checksum
//!   overlays
//! - [`ReadEngine`] / [`WriteEngine`]: the two implementations of
//!   [`BinarySerializer`]
//! - [`io`]: one-call helpers for streams, files and byte buffers
//!
//! Nothing is self-describing. Arrays carry no implicit length and strings no
//! implicit size; the schema serializes those explicitly, before the data
//! they describe.

#![warn(missing_docs)]

pub mod io;
pub mod prelude;

// Re-export the data model
pub use symbin_core::{
    bytes_to_hex, BinarySettings, ChecksumCalculator, Checksum8, Crc32Checksum, Endian, Error,
    FileLogger, MemoryLogger, Result, SerializerLogger, SettingsProvider, TextEncoding,
    TracingLogger,
};

// Re-export the primitive layer
pub use symbin_stream::{ByteTransform, Reader, Writer};

// Re-export the engines
pub use symbin_engine::{
    impl_primitive_enum, BinarySerializable, BinarySerializer, BinarySerializerExt, IntPrimitive,
    Primitive, ReadEngine, SerializableValue, Value, ValueKind, WriteEngine,
};

// Re-export helpers
pub use io::{
    read_from_bytes, read_from_file, read_from_stream, read_from_stream_with, write_to_bytes,
    write_to_file, write_to_stream, write_to_stream_with,
};
