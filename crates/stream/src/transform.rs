//! XOR and checksum overlays applied to raw byte traffic.
//!
//! Both overlays live here so the reader and the writer apply them in exactly
//! the same order. The XOR key and the checksum calculator are independent
//! and may be active at the same time.
//!
//! Neither overlay nests. Beginning a new XOR session overwrites the key;
//! beginning a new checksum replaces the calculator.

use std::borrow::Cow;
use symbin_core::{ActiveChecksum, ChecksumCalculator, Error, Result};
use tracing::warn;

/// Overlay state owned by one reader or writer.
#[derive(Debug, Default)]
pub struct ByteTransform {
    xor_key: u8,
    checksum: Option<ActiveChecksum>,
}

impl ByteTransform {
    /// Create a transform with both overlays inactive.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start XORing every byte with `key`. A key of 0 disables XOR.
    pub fn begin_xor(&mut self, key: u8) {
        self.xor_key = key;
    }

    /// Stop XORing.
    pub fn end_xor(&mut self) {
        self.xor_key = 0;
    }

    /// Current XOR key (0 when inactive).
    pub fn xor_key(&self) -> u8 {
        self.xor_key
    }

    /// Start feeding bytes to `calculator`.
    pub fn begin_checksum<C: ChecksumCalculator>(&mut self, calculator: C) {
        let next = ActiveChecksum::new(calculator);
        if let Some(previous) = self.checksum.replace(next) {
            warn!(
                "Checksum calculator {} replaced before it was ended",
                previous.type_name()
            );
        }
    }

    /// Stop feeding bytes and return the final checksum.
    ///
    /// Fails if no calculator is active or the active one is not a `C`; in
    /// the latter case the active calculator stays attached.
    pub fn end_checksum<C: ChecksumCalculator>(&mut self) -> Result<C::Value> {
        let active = self.checksum.take().ok_or(Error::ChecksumNotActive)?;
        match active.into_calculator::<C>() {
            Ok(calculator) => Ok(calculator.checksum_value()),
            Err(active) => {
                self.checksum = Some(active);
                Err(Error::ChecksumTypeMismatch {
                    expected: std::any::type_name::<C>(),
                })
            }
        }
    }

    /// Check if a checksum calculator is attached.
    pub fn is_checksum_active(&self) -> bool {
        self.checksum.is_some()
    }

    /// Turn bytes read from the stream into plain bytes, in place.
    pub fn decode(&mut self, buf: &mut [u8]) {
        self.feed_checksum(buf, false);
        if self.xor_key != 0 {
            xor_in_place(buf, self.xor_key);
        }
        self.feed_checksum(buf, true);
    }

    /// Turn plain bytes into the bytes to write to the stream.
    ///
    /// Borrows `buf` unchanged when XOR is inactive.
    pub fn encode<'a>(&mut self, buf: &'a [u8]) -> Cow<'a, [u8]> {
        self.feed_checksum(buf, true);
        let out = if self.xor_key != 0 {
            let mut owned = buf.to_vec();
            xor_in_place(&mut owned, self.xor_key);
            Cow::Owned(owned)
        } else {
            Cow::Borrowed(buf)
        };
        self.feed_checksum(&out, false);
        out
    }

    fn feed_checksum(&mut self, bytes: &[u8], plain: bool) {
        if let Some(checksum) = self.checksum.as_mut() {
            if checksum.for_decrypted_data() == plain {
                checksum.add_bytes(bytes);
            }
        }
    }
}

fn xor_in_place(buf: &mut [u8], key: u8) {
    for byte in buf.iter_mut() {
        *byte ^= key;
    }
}
