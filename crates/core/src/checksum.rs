//! Running checksum calculators.
//!
//! A checksum calculator is fed every raw byte crossing the stream boundary
//! while it is active. Its [`calculate_for_decrypted_data`] flag selects which
//! side of the XOR overlay it sees:
//!
//! | Flag | Read | Write |
//! |------|------|-------|
//! | `true` | bytes after XOR is removed | bytes before XOR is applied |
//! | `false` | bytes as read from the stream | bytes as written to the stream |
//!
//! The same data therefore produces the same checksum in both directions.
//!
//! The algorithm itself is up to the caller; [`Crc32Checksum`] and
//! [`Checksum8`] cover the common cases.
//!
//! [`calculate_for_decrypted_data`]: ChecksumCalculator::calculate_for_decrypted_data

use std::any::{self, Any};

/// A stateful checksum algorithm.
pub trait ChecksumCalculator: Any {
    /// Final checksum type
    type Value;

    /// Consume one byte.
    fn add_byte(&mut self, byte: u8);

    /// Consume a block of bytes.
    fn add_bytes(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.add_byte(byte);
        }
    }

    /// Current checksum over everything consumed so far.
    fn checksum_value(&self) -> Self::Value;

    /// Whether to accumulate plain bytes (`true`) or on-wire bytes (`false`).
    fn calculate_for_decrypted_data(&self) -> bool;
}

/// Object-safe view of a calculator, used while it is active.
trait ErasedChecksum {
    fn add_byte(&mut self, byte: u8);
    fn add_bytes(&mut self, bytes: &[u8]);
    fn for_decrypted_data(&self) -> bool;
    fn type_name(&self) -> &'static str;
    fn as_any(&self) -> &dyn Any;
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl<C: ChecksumCalculator> ErasedChecksum for C {
    fn add_byte(&mut self, byte: u8) {
        ChecksumCalculator::add_byte(self, byte);
    }

    fn add_bytes(&mut self, bytes: &[u8]) {
        ChecksumCalculator::add_bytes(self, bytes);
    }

    fn for_decrypted_data(&self) -> bool {
        self.calculate_for_decrypted_data()
    }

    fn type_name(&self) -> &'static str {
        any::type_name::<C>()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

/// The calculator currently attached to a stream.
pub struct ActiveChecksum {
    inner: Box<dyn ErasedChecksum>,
}

impl ActiveChecksum {
    /// Wrap a calculator.
    pub fn new<C: ChecksumCalculator>(calculator: C) -> Self {
        ActiveChecksum {
            inner: Box::new(calculator),
        }
    }

    /// Feed one byte.
    pub fn add_byte(&mut self, byte: u8) {
        self.inner.add_byte(byte);
    }

    /// Feed a block of bytes.
    pub fn add_bytes(&mut self, bytes: &[u8]) {
        self.inner.add_bytes(bytes);
    }

    /// See [`ChecksumCalculator::calculate_for_decrypted_data`].
    pub fn for_decrypted_data(&self) -> bool {
        self.inner.for_decrypted_data()
    }

    /// Type name of the wrapped calculator.
    pub fn type_name(&self) -> &'static str {
        self.inner.type_name()
    }

    /// Recover the calculator as `C`.
    ///
    /// Gives `self` back unchanged if the wrapped calculator is not a `C`.
    pub fn into_calculator<C: ChecksumCalculator>(self) -> Result<C, Self> {
        if !self.inner.as_any().is::<C>() {
            return Err(self);
        }
        match self.inner.into_any().downcast::<C>() {
            Ok(calculator) => Ok(*calculator),
            Err(_) => unreachable!("checked by is::<C>() above"),
        }
    }
}

impl std::fmt::Debug for ActiveChecksum {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActiveChecksum")
            .field("calculator", &self.type_name())
            .field("for_decrypted_data", &self.for_decrypted_data())
            .finish()
    }
}

/// CRC-32 (IEEE) calculator.
#[derive(Debug, Clone)]
pub struct Crc32Checksum {
    hasher: crc32fast::Hasher,
    decrypted: bool,
}

impl Crc32Checksum {
    /// CRC over plain bytes.
    pub fn new() -> Self {
        Crc32Checksum {
            hasher: crc32fast::Hasher::new(),
            decrypted: true,
        }
    }

    /// CRC over on-wire bytes.
    pub fn over_encrypted_data() -> Self {
        Crc32Checksum {
            hasher: crc32fast::Hasher::new(),
            decrypted: false,
        }
    }
}

impl Default for Crc32Checksum {
    fn default() -> Self {
        Self::new()
    }
}

impl ChecksumCalculator for Crc32Checksum {
    type Value = u32;

    fn add_byte(&mut self, byte: u8) {
        self.hasher.update(&[byte]);
    }

    fn add_bytes(&mut self, bytes: &[u8]) {
        self.hasher.update(bytes);
    }

    fn checksum_value(&self) -> u32 {
        self.hasher.clone().finalize()
    }

    fn calculate_for_decrypted_data(&self) -> bool {
        self.decrypted
    }
}

/// 8-bit additive checksum: the wrapping sum of all bytes.
#[derive(Debug, Clone, Copy)]
pub struct Checksum8 {
    sum: u8,
    decrypted: bool,
}

impl Checksum8 {
    /// Sum over plain bytes.
    pub fn new() -> Self {
        Checksum8 {
            sum: 0,
            decrypted: true,
        }
    }

    /// Sum over on-wire bytes.
    pub fn over_encrypted_data() -> Self {
        Checksum8 {
            sum: 0,
            decrypted: false,
        }
    }
}

impl Default for Checksum8 {
    fn default() -> Self {
        Self::new()
    }
}

impl ChecksumCalculator for Checksum8 {
    type Value = u8;

    fn add_byte(&mut self, byte: u8) {
        self.sum = self.sum.wrapping_add(byte);
    }

    fn checksum_value(&self) -> u8 {
        self.sum
    }

    fn calculate_for_decrypted_data(&self) -> bool {
        self.decrypted
    }
}
