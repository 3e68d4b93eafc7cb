//! Primitive reader.
//!
//! Every read funnels through one raw-byte path that applies the active
//! [`ByteTransform`]; the typed reads only decide how many bytes to take and
//! how to interpret them. The reader never seeks, so `position()` is simply
//! the number of bytes consumed.

use crate::field_width;
use crate::transform::ByteTransform;
use byteorder::{BigEndian, ByteOrder, LittleEndian};
use std::io::{ErrorKind, Read};
use symbin_core::{ChecksumCalculator, Endian, Error, Result, TextEncoding};

/// Endian-aware reader over any `io::Read`.
#[derive(Debug)]
pub struct Reader<R> {
    inner: R,
    endian: Endian,
    position: u64,
    transform: ByteTransform,
}

impl<R: Read> Reader<R> {
    /// Wrap a stream.
    pub fn new(inner: R, endian: Endian) -> Self {
        Reader {
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

    /// Bytes consumed so far.
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Borrow the underlying stream.
    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    /// Give back the underlying stream.
    pub fn into_inner(self) -> R {
        self.inner
    }

    // ========================================================================
    // Raw bytes
    // ========================================================================

    /// Read exactly `count` bytes.
    ///
    /// Memory grows with the data actually read, so a corrupt length does not
    /// trigger a huge allocation before the stream runs out.
    pub fn read_bytes(&mut self, count: usize) -> Result<Vec<u8>> {
        let offset = self.position;
        let mut buf = Vec::new();
        let available = (&mut self.inner)
            .take(count as u64)
            .read_to_end(&mut buf)?;
        self.position += available as u64;

        if available < count {
            return Err(Error::EndOfStream {
                offset,
                needed: count,
                available,
            });
        }

        self.transform.decode(&mut buf);
        Ok(buf)
    }

    fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let offset = self.position;
        let mut buf = [0u8; N];
        let mut filled = 0;

        while filled < N {
            match self.inner.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
        self.position += filled as u64;

        if filled < N {
            return Err(Error::EndOfStream {
                offset,
                needed: N,
                available: filled,
            });
        }

        self.transform.decode(&mut buf);
        Ok(buf)
    }

    fn read_ordered<const N: usize, T>(
        &mut self,
        little: fn(&[u8]) -> T,
        big: fn(&[u8]) -> T,
    ) -> Result<T> {
        let buf = self.read_array::<N>()?;
        Ok(match self.endian {
            Endian::Little => little(&buf),
            Endian::Big => big(&buf),
        })
    }

    // ========================================================================
    // Fixed-width primitives
    // ========================================================================

    /// Read one unsigned byte.
    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read_array::<1>()?[0])
    }

    /// Read one signed byte.
    pub fn read_i8(&mut self) -> Result<i8> {
        Ok(self.read_u8()? as i8)
    }

    /// Read a `u16`.
    pub fn read_u16(&mut self) -> Result<u16> {
        self.read_ordered::<2, _>(LittleEndian::read_u16, BigEndian::read_u16)
    }

    /// Read an `i16`.
    pub fn read_i16(&mut self) -> Result<i16> {
        self.read_ordered::<2, _>(LittleEndian::read_i16, BigEndian::read_i16)
    }

    /// Read a `u32`.
    pub fn read_u32(&mut self) -> Result<u32> {
        self.read_ordered::<4, _>(LittleEndian::read_u32, BigEndian::read_u32)
    }

    /// Read an `i32`.
    pub fn read_i32(&mut self) -> Result<i32> {
        self.read_ordered::<4, _>(LittleEndian::read_i32, BigEndian::read_i32)
    }

    /// Read a `u64`.
    pub fn read_u64(&mut self) -> Result<u64> {
        self.read_ordered::<8, _>(LittleEndian::read_u64, BigEndian::read_u64)
    }

    /// Read an `i64`.
    pub fn read_i64(&mut self) -> Result<i64> {
        self.read_ordered::<8, _>(LittleEndian::read_i64, BigEndian::read_i64)
    }

    /// Read an `f32`.
    pub fn read_f32(&mut self) -> Result<f32> {
        self.read_ordered::<4, _>(LittleEndian::read_f32, BigEndian::read_f32)
    }

    /// Read an `f64`.
    pub fn read_f64(&mut self) -> Result<f64> {
        self.read_ordered::<8, _>(LittleEndian::read_f64, BigEndian::read_f64)
    }

    // ========================================================================
    // Text
    // ========================================================================

    /// Read bytes up to (and consuming, but excluding) the first zero byte.
    ///
    /// The scan is per byte, not per encoding unit. UTF-16 text containing
    /// ASCII therefore stops at the first character's zero half.
    pub fn read_null_terminated_string(&mut self, encoding: TextEncoding) -> Result<String> {
        let mut bytes = Vec::new();
        loop {
            let byte = self.read_u8()?;
            if byte == 0 {
                break;
            }
            bytes.push(byte);
        }
        Ok(encoding.decode(&bytes))
    }

    /// Read a fixed-size string of `size` encoding units, stripping trailing NULs.
    pub fn read_fixed_string(&mut self, size: usize, encoding: TextEncoding) -> Result<String> {
        let bytes = self.read_bytes(field_width(size, encoding)?)?;
        let text = encoding.decode(&bytes);
        Ok(text.trim_end_matches('\0').to_string())
    }

    // ========================================================================
    // Overlays
    // ========================================================================

    /// Start XORing every byte read with `key`.
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

    /// Start feeding every byte read to `calculator`.
    pub fn begin_checksum<C: ChecksumCalculator>(&mut self, calculator: C) {
        self.transform.begin_checksum(calculator);
    }

    /// Detach the active calculator and return its final value.
    pub fn end_checksum<C: ChecksumCalculator>(&mut self) -> Result<C::Value> {
        self.transform.end_checksum::<C>()
    }
}
