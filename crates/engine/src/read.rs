//! Read engine.
//!
//! Pulls bytes from a stream and builds values and object graphs from them.
//! The requested type's [`ValueKind`] picks the primitive read; kinds without
//! a wire encoding fail before any byte is consumed.

use crate::logging::{display_name, short_type_name, TraceLog};
use crate::serializer::{run_object, BinarySerializable, BinarySerializer};
use crate::value::{IntPrimitive, Primitive, Value, ValueKind};
use std::io::Read;
use std::sync::Arc;
use symbin_core::{ChecksumCalculator, Error, Result, SerializerLogger, SettingsProvider};
use symbin_stream::Reader;
use tracing::warn;

/// Deserializing implementation of [`BinarySerializer`].
///
/// One engine serves one top-level read. Overlay state and depth die with it.
pub struct ReadEngine<R: Read> {
    reader: Reader<R>,
    settings: Arc<dyn SettingsProvider>,
    log: TraceLog,
    depth: usize,
}

impl<R: Read> ReadEngine<R> {
    /// Create an engine reading from `stream`.
    pub fn new(stream: R, settings: impl SettingsProvider) -> Self {
        Self::with_shared_settings(stream, Arc::new(settings))
    }

    /// Create an engine with settings shared with other engines.
    pub fn with_shared_settings(stream: R, settings: Arc<dyn SettingsProvider>) -> Self {
        ReadEngine {
            reader: Reader::new(stream, settings.endian()),
            settings,
            log: TraceLog::new("READ"),
            depth: 0,
        }
    }

    /// Attach a logger sink.
    pub fn with_logger(mut self, logger: impl SerializerLogger + 'static) -> Self {
        self.log.attach(Box::new(logger));
        self
    }

    /// Read one top-level object.
    pub fn read_object<T: BinarySerializable + Default>(&mut self, name: &str) -> Result<T> {
        let mut value = T::default();
        self.serialize_object(&mut value, name)?;
        Ok(value)
    }

    /// Give back the stream.
    pub fn into_inner(self) -> R {
        self.reader.into_inner()
    }

    fn read_value(&mut self, kind: ValueKind, type_name: &str, offset: u64) -> Result<Value> {
        Ok(match kind {
            ValueKind::Bool => Value::Bool(self.read_bool(type_name, offset)?),
            ValueKind::I8 => Value::I8(self.reader.read_i8()?),
            ValueKind::U8 => Value::U8(self.reader.read_u8()?),
            ValueKind::I16 => Value::I16(self.reader.read_i16()?),
            ValueKind::U16 => Value::U16(self.reader.read_u16()?),
            ValueKind::I32 => Value::I32(self.reader.read_i32()?),
            ValueKind::U32 => Value::U32(self.reader.read_u32()?),
            ValueKind::I64 => Value::I64(self.reader.read_i64()?),
            ValueKind::U64 => Value::U64(self.reader.read_u64()?),
            ValueKind::F32 => Value::F32(self.reader.read_f32()?),
            ValueKind::F64 => Value::F64(self.reader.read_f64()?),
            ValueKind::Str => {
                let encoding = self.settings.text_encoding();
                Value::Str(self.reader.read_null_terminated_string(encoding)?)
            }
            ValueKind::Char
            | ValueKind::Decimal
            | ValueKind::DateTime
            | ValueKind::Empty
            | ValueKind::Array => return Err(Error::unsupported_named(type_name)),
        })
    }

    fn read_bool(&mut self, type_name: &str, offset: u64) -> Result<bool> {
        let byte = self.reader.read_u8()?;
        if byte > 1 {
            warn!(
                "Binary boolean at 0x{:08X} was not correctly formatted ({})",
                offset, byte
            );
            self.log.line(offset, self.depth, || {
                format!("({type_name}): Binary boolean was not correctly formatted ({byte})")
            });
        }
        Ok(byte != 0)
    }

    fn read_primitive<T: Primitive>(&mut self, name: &str) -> Result<T> {
        let offset = self.reader.position();
        let value = self.read_value(T::KIND, std::any::type_name::<T>(), offset)?;
        let value = T::from_value(value)?;
        self.log.line(offset, self.depth, || {
            format!(
                "({}) {}: {:?}",
                short_type_name::<T>(),
                display_name(name),
                value
            )
        });
        Ok(value)
    }
}

impl<R: Read> std::fmt::Debug for ReadEngine<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReadEngine")
            .field("endian", &self.reader.endian())
            .field("position", &self.reader.position())
            .field("depth", &self.depth)
            .field("log", &self.log)
            .finish()
    }
}

impl<R: Read> BinarySerializer for ReadEngine<R> {
    fn is_reading(&self) -> bool {
        true
    }

    fn is_logging(&self) -> bool {
        self.log.is_enabled()
    }

    fn settings(&self) -> &dyn SettingsProvider {
        self.settings.as_ref()
    }

    fn position(&self) -> u64 {
        self.reader.position()
    }

    fn depth(&self) -> usize {
        self.depth
    }

    fn serialize<T: Primitive>(&mut self, value: &mut T, name: &str) -> Result<()> {
        *value = self.read_primitive(name)?;
        Ok(())
    }

    fn serialize_array<T: Primitive>(
        &mut self,
        values: &mut Vec<T>,
        length: usize,
        name: &str,
    ) -> Result<()> {
        let offset = self.reader.position();

        if T::IS_BYTE {
            let bytes = self.reader.read_bytes(length)?;
            self.log.bytes(
                offset,
                self.depth,
                || format!("({}[{}]) {}", short_type_name::<T>(), length, display_name(name)),
                &bytes,
            );
            *values = T::vec_from_bytes(bytes).ok_or_else(Error::unsupported::<Vec<T>>)?;
            return Ok(());
        }

        if !T::KIND.is_readable() {
            return Err(Error::unsupported::<T>());
        }

        self.log.line(offset, self.depth, || {
            format!("({}[{}]) {}", short_type_name::<T>(), length, display_name(name))
        });

        let mut items = Vec::new();
        for i in 0..length {
            let element_name = self.log.element_name(name, i);
            items.push(self.read_primitive::<T>(&element_name)?);
        }
        *values = items;
        Ok(())
    }

    fn serialize_array_size<V: IntPrimitive, T: Default>(
        &mut self,
        values: &mut Vec<T>,
        name: &str,
    ) -> Result<usize> {
        let length_name = self.log.length_name(name);
        let size: V = self.read_primitive(&length_name)?;
        let count = size.to_len()?;

        // The fill happens before any element is read, so its size is bounded
        // only by what the length field claims.
        if values.is_empty() {
            values
                .try_reserve_exact(count)
                .map_err(|_| Error::InvalidLength {
                    value: count.to_string(),
                })?;
            values.resize_with(count, T::default);
        }
        Ok(count)
    }

    fn serialize_string(&mut self, value: &mut String, length: usize, name: &str) -> Result<()> {
        let offset = self.reader.position();
        let encoding = self.settings.text_encoding();
        let text = self.reader.read_fixed_string(length, encoding)?;
        self.log.line(offset, self.depth, || {
            format!("(String) {}: {}", display_name(name), text)
        });
        *value = text;
        Ok(())
    }

    fn serialize_object_with<T, F>(&mut self, value: &mut T, hook: F, name: &str) -> Result<()>
    where
        T: BinarySerializable + Default,
        F: FnOnce(&mut Self, &mut T) -> Result<()>,
    {
        *value = T::default();
        let offset = self.reader.position();
        self.log.line(offset, self.depth, || {
            format!("(Object: {}) {}", short_type_name::<T>(), display_name(name))
        });

        self.depth += 1;
        let result = run_object(self, value, hook);
        self.depth -= 1;
        result
    }

    fn serialize_object_array_with<T, F>(
        &mut self,
        values: &mut Vec<T>,
        length: usize,
        mut hook: F,
        name: &str,
    ) -> Result<()>
    where
        T: BinarySerializable + Default,
        F: FnMut(&mut Self, &mut T) -> Result<()>,
    {
        let offset = self.reader.position();
        self.log.line(offset, self.depth, || {
            format!(
                "(Object[]: {}[{}]) {}",
                short_type_name::<T>(),
                length,
                display_name(name)
            )
        });

        let mut items = Vec::new();
        for i in 0..length {
            let element_name = self.log.element_name(name, i);
            let mut item = T::default();
            self.serialize_object_with(&mut item, &mut hook, &element_name)?;
            items.push(item);
        }
        *values = items;
        Ok(())
    }

    fn begin_xor(&mut self, key: u8) {
        self.reader.begin_xor(key);
    }

    fn end_xor(&mut self) {
        self.reader.end_xor();
    }

    fn begin_checksum<C: ChecksumCalculator>(&mut self, calculator: C) {
        self.reader.begin_checksum(calculator);
    }

    fn end_checksum<C: ChecksumCalculator>(&mut self) -> Result<C::Value> {
        self.reader.end_checksum::<C>()
    }
}
