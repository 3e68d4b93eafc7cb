//! Primitive writer.
//!
//! Mirror image of [`Reader`](crate::Reader): every write funnels through
//! [`Writer::write_bytes`], which applies the active overlays without touching
//! the caller's buffer.

use crate::field_width;
use crate::transform::ByteTransform;
use byteorder::{BigEndian, ByteOrder, LittleEndian};
use std::io::Write;
use symbin_core::{ChecksumCalculator, Endian, Result, TextEncoding};

/// Endian-aware writer over any `io::Write`.
#[derive(Debug)]
pub struct Writer<W: Write> {
    inner: W,
    endian: Endian,
    position: u64,
    transform: ByteTransform,
}

impl<W: Write> Writer<W> {
    /// Wrap a stream.
    pub fn new(inner: W, endian: Endian) -> Self {
        Writer {
            inner,
            endian,
            position: 0,
            transform: ByteTransform::new(),
        }
    }

    /// Configured byte order.
    pub fn endian(&self) -> Endian {
        self.endian
    }

    /// Bytes written so far.
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Borrow the underlying stream.
    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    /// Flush the underlying stream.
    pub fn flush(&mut self) -> Result<()> {
        self.inner.flush()?;
        Ok(())
    }

    /// Give back the underlying stream without flushing it.
    pub fn into_inner(self) -> W {
        self.inner
    }

    // ========================================================================
    // Raw bytes
    // ========================================================================

    /// Write a block of bytes through the overlays.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        let out = self.transform.encode(bytes);
        self.inner.write_all(&out)?;
        self.position += out.len() as u64;
        Ok(())
    }

    fn write_ordered<const N: usize, T>(
        &mut self,
        value: T,
        little: fn(&mut [u8], T),
        big: fn(&mut [u8], T),
    ) -> Result<()> {
        let mut buf = [0u8; N];
        match self.endian {
            Endian::Little => little(&mut buf, value),
            Endian::Big => big(&mut buf, value),
        }
        self.write_bytes(&buf)
    }

    // ========================================================================
    // Fixed-width primitives
    // ========================================================================

    /// Write one unsigned byte.
    pub fn write_u8(&mut self, value: u8) -> Result<()> {
        self.write_bytes(&[value])
    }

    /// Write one signed byte.
    pub fn write_i8(&mut self, value: i8) -> Result<()> {
        self.write_u8(value as u8)
    }

    /// Write a `u16`.
    pub fn write_u16(&mut self, value: u16) -> Result<()> {
        self.write_ordered::<2, _>(value, LittleEndian::write_u16, BigEndian::write_u16)
    }

    /// Write an `i16`.
    pub fn write_i16(&mut self, value: i16) -> Result<()> {
        self.write_ordered::<2, _>(value, LittleEndian::write_i16, BigEndian::write_i16)
    }

    /// Write a `u32`.
    pub fn write_u32(&mut self, value: u32) -> Result<()> {
        self.write_ordered::<4, _>(value, LittleEndian::write_u32, BigEndian::write_u32)
    }

    /// Write an `i32`.
    pub fn write_i32(&mut self, value: i32) -> Result<()> {
        self.write_ordered::<4, _>(value, LittleEndian::write_i32, BigEndian::write_i32)
    }

    /// Write a `u64`.
    pub fn write_u64(&mut self, value: u64) -> Result<()> {
        self.write_ordered::<8, _>(value, LittleEndian::write_u64, BigEndian::write_u64)
    }

    /// Write an `i64`.
    pub fn write_i64(&mut self, value: i64) -> Result<()> {
        self.write_ordered::<8, _>(value, LittleEndian::write_i64, BigEndian::write_i64)
    }

    /// Write an `f32`.
    pub fn write_f32(&mut self, value: f32) -> Result<()> {
        self.write_ordered::<4, _>(value, LittleEndian::write_f32, BigEndian::write_f32)
    }

    /// Write an `f64`.
    pub fn write_f64(&mut self, value: f64) -> Result<()> {
        self.write_ordered::<8, _>(value, LittleEndian::write_f64, BigEndian::write_f64)
    }

    // ========================================================================
    // Text
    // ========================================================================

    /// Write the encoded text followed by exactly one zero byte.
    ///
    /// Embedded zero bytes are written as-is and will end the string early
    /// when read back. The terminator is a single byte regardless of
    /// encoding, so this only round-trips with a 1-byte-unit encoding.
    pub fn write_null_terminated_string(&mut self, value: &str, encoding: TextEncoding) -> Result<()> {
        let mut data = encoding.encode(value);
        data.push(0);
        self.write_bytes(&data)
    }

    /// Write text into a field of exactly `size` encoding units.
    ///
    /// The text gets one terminator unit, then is padded with zeros or cut
    /// off to the field width.
    pub fn write_fixed_string(
        &mut self,
        value: &str,
        size: usize,
        encoding: TextEncoding,
    ) -> Result<()> {
        let width = field_width(size, encoding)?;
        let mut data = encoding.encode(value);
        data.extend(std::iter::repeat(0).take(encoding.unit_width()));
        data.resize(width, 0);
        self.write_bytes(&data)
    }

    // ========================================================================
    // Overlays
    // ========================================================================

    /// Start XORing every byte written with `key`.
    pub fn begin_xor(&mut self, key: u8) {
        self.transform.begin_xor(key);
    }

    /// Stop XORing.
    pub fn end_xor(&mut self) {
        self.transform.end_xor();
    }

    /// Current XOR key (0 when inactive).
    pub fn xor_key(&self) -> u8 {
        self.transform.xor_key()
    }

    /// Start feeding every byte written to `calculator`.
    pub fn begin_checksum<C: ChecksumCalculator>(&mut self, calculator: C) {
        self.transform.begin_checksum(calculator);
    }

    /// Detach the active calculator and return its final value.
    pub fn end_checksum<C: ChecksumCalculator>(&mut self) -> Result<C::Value> {
        self.transform.end_checksum::<C>()
    }
}
