//! Primitive stream layer for symbin
//!
//! [`Reader`] and [`Writer`] move fixed-width primitives and text between a
//! byte stream and Rust values in a configured byte order. Both route all
//! traffic through a [`ByteTransform`], which carries the XOR and checksum
//! overlays.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod reader;
pub mod transform;
pub mod writer;

pub use reader::Reader;
pub use transform::ByteTransform;
pub use writer::Writer;

use symbin_core::{Error, Result, TextEncoding};

/// Byte width of a text field holding `size` units of `encoding`.
pub(crate) fn field_width(size: usize, encoding: TextEncoding) -> Result<usize> {
    size
        .checked_mul(encoding.unit_width())
        .ok_or_else(|| Error::InvalidLength {
            value: size.to_string(),
        })
}
