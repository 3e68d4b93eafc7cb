//! Symmetric serialization engines for symbin
//!
//! A type declares its wire layout once by implementing [`BinarySerializable`].
//! The same declaration is executed by a [`ReadEngine`] to decode and by a
//! [`WriteEngine`] to encode:
//!
//! - [`BinarySerializer`]: the operations schema code calls
//! - [`ReadEngine`] / [`WriteEngine`]: the two directions
//! - [`Primitive`] / [`Value`] / [`ValueKind`]: how Rust types map onto the wire
//! - [`BinarySerializerExt`]: length-prefixed strings, integer booleans,
//!   scoped XOR and checksum blocks

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod ext;
mod logging;
pub mod read;
pub mod serializer;
pub mod value;
pub mod write;

pub use ext::BinarySerializerExt;
pub use read::ReadEngine;
pub use serializer::{BinarySerializable, BinarySerializer, SerializableValue};
pub use value::{IntPrimitive, Primitive, Value, ValueKind};
pub use write::WriteEngine;

pub use symbin_core::{Error, Result};
