//! Text encodings for string fields.
//!
//! Fixed-size string fields are sized in *encoding units*: the number of
//! bytes the encoding spends on the character `A`. A field declared with size
//! `n` always occupies `n * unit_width()` bytes on the wire.
//!
//! Null-terminated strings end at the first zero *byte* and are written with
//! a single zero byte, so they only round-trip with a 1-byte-unit encoding
//! (UTF-8 or Latin-1). Use fixed-size or length-prefixed fields for UTF-16.
//!
//! Decoding is lossy. Invalid sequences turn into U+FFFD instead of failing,
//! so corrupt text never aborts a read.

/// Encoding used to turn strings into bytes and back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TextEncoding {
    /// UTF-8
    #[default]
    Utf8,
    /// ISO-8859-1; characters above U+00FF encode as `?`
    Latin1,
    /// UTF-16, little-endian code units
    Utf16Le,
    /// UTF-16, big-endian code units
    Utf16Be,
}

impl TextEncoding {
    /// Bytes per encoding unit (the encoded size of `"A"`).
    pub fn unit_width(&self) -> usize {
        match self {
            TextEncoding::Utf8 | TextEncoding::Latin1 => 1,
            TextEncoding::Utf16Le | TextEncoding::Utf16Be => 2,
        }
    }

    /// Encode a string.
    pub fn encode(&self, text: &str) -> Vec<u8> {
        match self {
            TextEncoding::Utf8 => text.as_bytes().to_vec(),
            TextEncoding::Latin1 => text
                .chars()
                .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
                .collect(),
            TextEncoding::Utf16Le => text.encode_utf16().flat_map(u16::to_le_bytes).collect(),
            TextEncoding::Utf16Be => text.encode_utf16().flat_map(u16::to_be_bytes).collect(),
        }
    }

    /// Decode bytes into a string, replacing invalid sequences.
    ///
    /// For UTF-16 a trailing odd byte is dropped.
    pub fn decode(&self, bytes: &[u8]) -> String {
        match self {
            TextEncoding::Utf8 => String::from_utf8_lossy(bytes).into_owned(),
            TextEncoding::Latin1 => bytes.iter().map(|&b| char::from(b)).collect(),
            TextEncoding::Utf16Le => {
                let units: Vec<u16> = bytes
                    .chunks_exact(2)
                    .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
                    .collect();
                String::from_utf16_lossy(&units)
            }
            TextEncoding::Utf16Be => {
                let units: Vec<u16> = bytes
                    .chunks_exact(2)
                    .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
                    .collect();
                String::from_utf16_lossy(&units)
            }
        }
    }

    /// Number of encoding units `text` occupies.
    pub fn unit_count(&self, text: &str) -> usize {
        match self {
            TextEncoding::Utf8 => text.len(),
            TextEncoding::Latin1 => text.chars().count(),
            TextEncoding::Utf16Le | TextEncoding::Utf16Be => text.encode_utf16().count(),
        }
    }

    /// Human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            TextEncoding::Utf8 => "UTF-8",
            TextEncoding::Latin1 => "ISO-8859-1",
            TextEncoding::Utf16Le => "UTF-16LE",
            TextEncoding::Utf16Be => "UTF-16BE",
        }
    }
}
