//! Serializer settings.
//!
//! An engine reads its endianness and text encoding from a
//! [`SettingsProvider`]. Formats that need more context (a game version, a
//! platform flag) define their own provider type and recover it inside schema
//! code by downcasting through [`SettingsProvider::as_any`].

use crate::encoding::TextEncoding;
use crate::endian::Endian;
use std::any::Any;

/// Source of the settings an engine runs with.
pub trait SettingsProvider: Any + Send + Sync {
    /// Byte order for multi-byte primitives.
    fn endian(&self) -> Endian;

    /// Encoding for string fields.
    fn text_encoding(&self) -> TextEncoding;

    /// Access the concrete settings type.
    fn as_any(&self) -> &dyn Any;
}

/// Default settings: an endianness and a text encoding, nothing else.
///
/// # Example
///
/// ```
/// use symbin_core::{BinarySettings, Endian, TextEncoding};
///
/// let settings = BinarySettings::big_endian().with_encoding(TextEncoding::Latin1);
/// assert_eq!(settings.endian, Endian::Big);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BinarySettings {
    /// Byte order for multi-byte primitives
    pub endian: Endian,
    /// Encoding for string fields
    pub encoding: TextEncoding,
}

impl BinarySettings {
    /// Create settings from an endianness and an encoding.
    pub fn new(endian: Endian, encoding: TextEncoding) -> Self {
        BinarySettings { endian, encoding }
    }

    /// Little-endian, UTF-8.
    pub fn little_endian() -> Self {
        Self::new(Endian::Little, TextEncoding::Utf8)
    }

    /// Big-endian, UTF-8.
    pub fn big_endian() -> Self {
        Self::new(Endian::Big, TextEncoding::Utf8)
    }

    /// Replace the endianness.
    pub fn with_endian(mut self, endian: Endian) -> Self {
        self.endian = endian;
        self
    }

    /// Replace the text encoding.
    pub fn with_encoding(mut self, encoding: TextEncoding) -> Self {
        self.encoding = encoding;
        self
    }
}

impl SettingsProvider for BinarySettings {
    fn endian(&self) -> Endian {
        self.endian
    }

    fn text_encoding(&self) -> TextEncoding {
        self.encoding
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
