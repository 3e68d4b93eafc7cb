//! Convenience operations built on top of [`BinarySerializer`].

use crate::serializer::BinarySerializer;
use crate::value::IntPrimitive;
use symbin_core::{ChecksumCalculator, Result, SettingsProvider};
use tracing::warn;

/// Helpers available on every serializer.
pub trait BinarySerializerExt: BinarySerializer {
    /// Downcast the engine's settings to a concrete settings type.
    fn get_settings<T: SettingsProvider>(&self) -> Option<&T> {
        self.settings().as_any().downcast_ref::<T>()
    }

    /// Round-trip text preceded by its length as an `i32`.
    ///
    /// The length counts encoding units, and the text field is exactly that
    /// wide, so no terminator is stored.
    fn serialize_length_prefixed_string(&mut self, value: &mut String, name: &str) -> Result<()> {
        let units = self.settings().text_encoding().unit_count(value);
        let mut length = i32::from_len_wrapping(units);
        let length_name = if self.is_logging() {
            format!("{name}.Length")
        } else {
            String::new()
        };
        self.serialize(&mut length, &length_name)?;
        self.serialize_string(value, length.to_len()?, name)
    }

    /// Round-trip a boolean stored as the integer type `V`.
    ///
    /// Reads treat any nonzero value as `true`; values other than 0 and 1 are
    /// reported as malformed.
    fn serialize_bool_as<V: IntPrimitive>(&mut self, value: &mut bool, name: &str) -> Result<()> {
        let zero = V::from_len_wrapping(0);
        let one = V::from_len_wrapping(1);
        let mut raw = if *value { one } else { zero };
        self.serialize(&mut raw, name)?;

        if self.is_reading() {
            if raw != zero && raw != one {
                warn!("Boolean {} was not correctly formatted ({})", name, raw);
            }
            *value = raw != zero;
        }
        Ok(())
    }

    /// Run `f` with XOR `key` active. XOR is switched off afterwards even if
    /// `f` fails.
    fn do_xor<R>(&mut self, key: u8, f: impl FnOnce(&mut Self) -> Result<R>) -> Result<R> {
        self.begin_xor(key);
        let result = f(self);
        self.end_xor();
        result
    }

    /// Run `f` with `calculator` attached and return its result together with
    /// the checksum of every byte `f` moved.
    fn do_checksum<C, R>(
        &mut self,
        calculator: C,
        f: impl FnOnce(&mut Self) -> Result<R>,
    ) -> Result<(R, C::Value)>
    where
        C: ChecksumCalculator,
    {
        self.begin_checksum(calculator);
        match f(self) {
            Ok(result) => {
                let checksum = self.end_checksum::<C>()?;
                Ok((result, checksum))
            }
            Err(e) => {
                let _ = self.end_checksum::<C>();
                Err(e)
            }
        }
    }
}

impl<S: BinarySerializer> BinarySerializerExt for S {}
