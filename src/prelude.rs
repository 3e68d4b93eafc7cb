//! Convenient imports for symbin.
//!
//! ```
//! use symbin::prelude::*;
//!
//! #[derive(Debug, Default)]
//! struct Entry {
//!     id: u32,
//!     name: String,
//! }
//!
//! impl BinarySerializable for Entry {
//!     fn serialize<S: BinarySerializer>(&mut self, s: &mut S) -> Result<()> {
//!         s.serialize(&mut self.id, "Id")?;
//!         s.serialize_length_prefixed_string(&mut self.name, "Name")
//!     }
//! }
//!
//! let mut entry = Entry { id: 7, name: "seven".into() };
//! let bytes = write_to_bytes(&mut entry, BinarySettings::little_endian())?;
//! let back: Entry = read_from_bytes(&bytes, BinarySettings::little_endian())?;
//! assert_eq!(back.name, "seven");
//! # Ok::<(), symbin::Error>(())
//! ```

// Schema traits
pub use symbin_engine::{
    BinarySerializable, BinarySerializer, BinarySerializerExt, Primitive, SerializableValue,
};

// Engines
pub use symbin_engine::{ReadEngine, WriteEngine};

// Error handling
pub use symbin_core::{Error, Result};

// Configuration
pub use symbin_core::{BinarySettings, Endian, SettingsProvider, TextEncoding};

// Checksums and logging
pub use symbin_core::{ChecksumCalculator, Checksum8, Crc32Checksum};
pub use symbin_core::{FileLogger, MemoryLogger, SerializerLogger};

// Helpers
pub use crate::io::{
    read_from_bytes, read_from_file, read_from_stream, write_to_bytes, write_to_file,
    write_to_stream,
};
