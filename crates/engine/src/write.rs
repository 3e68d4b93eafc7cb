//! Write engine.
//!
//! Every field is classified into a [`Value`] and dispatched on its variant;
//! see [`Value`] for the order in which shapes are checked.

use crate::logging::{display_name, short_type_name, TraceLog};
use crate::serializer::{run_object, BinarySerializable, BinarySerializer};
use crate::value::{IntPrimitive, Primitive, Value};
use std::io::Write;
use std::sync::Arc;
use symbin_core::{ChecksumCalculator, Error, Result, SerializerLogger, SettingsProvider};
use symbin_stream::Writer;

/// Serializing implementation of [`BinarySerializer`].
pub struct WriteEngine<W: Write> {
    writer: Writer<W>,
    settings: Arc<dyn SettingsProvider>,
    log: TraceLog,
    depth: usize,
}

impl<W: Write> WriteEngine<W> {
    /// Create an engine writing to `stream`.
    pub fn new(stream: W, settings: impl SettingsProvider) -> Self {
        Self::with_shared_settings(stream, Arc::new(settings))
    }

    /// Create an engine with settings shared with other engines.
    pub fn with_shared_settings(stream: W, settings: Arc<dyn SettingsProvider>) -> Self {
        WriteEngine {
            writer: Writer::new(stream, settings.endian()),
            settings,
            log: TraceLog::new("W"),
            depth: 0,
        }
    }

    /// Attach a logger sink.
    pub fn with_logger(mut self, logger: impl SerializerLogger + 'static) -> Self {
        self.log.attach(Box::new(logger));
        self
    }

    /// Write one top-level object.
    pub fn write_object<T>(&mut self, value: &mut T, name: &str) -> Result<()>
    where
        T: BinarySerializable + Default,
    {
        self.serialize_object(value, name)
    }

    /// Flush the underlying stream.
    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()
    }

    /// Give back the stream without flushing it.
    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }

    fn write_value(&mut self, value: &Value) -> Result<()> {
        match value {
            Value::Bytes(bytes) => self.writer.write_bytes(bytes),
            Value::Array(items) => {
                for item in items {
                    self.write_value(item)?;
                }
                Ok(())
            }
            Value::Enum { repr, .. } => self.write_value(repr),
            Value::Bool(v) => self.writer.write_u8(u8::from(*v)),
            Value::I8(v) => self.writer.write_i8(*v),
            Value::U8(v) => self.writer.write_u8(*v),
            Value::I16(v) => self.writer.write_i16(*v),
            Value::U16(v) => self.writer.write_u16(*v),
            Value::I32(v) => self.writer.write_i32(*v),
            Value::U32(v) => self.writer.write_u32(*v),
            Value::I64(v) => self.writer.write_i64(*v),
            Value::U64(v) => self.writer.write_u64(*v),
            Value::F32(v) => self.writer.write_f32(*v),
            Value::F64(v) => self.writer.write_f64(*v),
            Value::Str(text) => {
                let encoding = self.settings.text_encoding();
                self.writer.write_null_terminated_string(text, encoding)
            }
            Value::Other { type_name, .. } => Err(Error::unsupported_named(*type_name)),
        }
    }

    fn write_primitive<T: Primitive>(&mut self, value: &T, name: &str) -> Result<()> {
        let offset = self.writer.position();
        self.write_value(&value.to_value())?;
        self.log.line(offset, self.depth, || {
            format!(
                "({}) {}: {:?}",
                short_type_name::<T>(),
                display_name(name),
                value
            )
        });
        Ok(())
    }
}

impl<W: Write> std::fmt::Debug for WriteEngine<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WriteEngine")
            .field("endian", &self.writer.endian())
            .field("position", &self.writer.position())
            .field("depth", &self.depth)
            .field("log", &self.log)
            .finish()
    }
}

fn check_length(name: &str, expected: usize, actual: usize) -> Result<()> {
    if actual < expected {
        return Err(Error::LengthMismatch {
            name: display_name(name).to_string(),
            expected,
            actual,
        });
    }
    Ok(())
}

impl<W: Write> BinarySerializer for WriteEngine<W> {
    fn is_reading(&self) -> bool {
        false
    }

    fn is_logging(&self) -> bool {
        self.log.is_enabled()
    }

    fn settings(&self) -> &dyn SettingsProvider {
        self.settings.as_ref()
    }

    fn position(&self) -> u64 {
        self.writer.position()
    }

    fn depth(&self) -> usize {
        self.depth
    }

    fn serialize<T: Primitive>(&mut self, value: &mut T, name: &str) -> Result<()> {
        self.write_primitive(value, name)
    }

    fn serialize_array<T: Primitive>(
        &mut self,
        values: &mut Vec<T>,
        length: usize,
        name: &str,
    ) -> Result<()> {
        check_length(name, length, values.len())?;
        let values = &values[..length];
        let offset = self.writer.position();

        if let Some(bytes) = T::as_byte_slice(values) {
            self.log.bytes(
                offset,
                self.depth,
                || format!("({}[{}]) {}", short_type_name::<T>(), length, display_name(name)),
                bytes,
            );
            return self.writer.write_bytes(bytes);
        }

        self.log.line(offset, self.depth, || {
            format!("({}[{}]) {}", short_type_name::<T>(), length, display_name(name))
        });

        for (i, value) in values.iter().enumerate() {
            let element_name = self.log.element_name(name, i);
            self.write_primitive(value, &element_name)?;
        }
        Ok(())
    }

    fn serialize_array_size<V: IntPrimitive, T: Default>(
        &mut self,
        values: &mut Vec<T>,
        name: &str,
    ) -> Result<usize> {
        let length_name = self.log.length_name(name);
        let size = V::from_len_wrapping(values.len());
        self.write_primitive(&size, &length_name)?;
        Ok(values.len())
    }

    fn serialize_string(&mut self, value: &mut String, length: usize, name: &str) -> Result<()> {
        let offset = self.writer.position();
        let encoding = self.settings.text_encoding();
        self.writer.write_fixed_string(value, length, encoding)?;
        self.log.line(offset, self.depth, || {
            format!("(String) {}: {}", display_name(name), value)
        });
        Ok(())
    }

    fn serialize_object_with<T, F>(&mut self, value: &mut T, hook: F, name: &str) -> Result<()>
    where
        T: BinarySerializable + Default,
        F: FnOnce(&mut Self, &mut T) -> Result<()>,
    {
        let offset = self.writer.position();
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
        check_length(name, length, values.len())?;
        let offset = self.writer.position();
        self.log.line(offset, self.depth, || {
            format!(
                "(Object[]: {}[{}]) {}",
                short_type_name::<T>(),
                length,
                display_name(name)
            )
        });

        for (i, item) in values.iter_mut().take(length).enumerate() {
            let element_name = self.log.element_name(name, i);
            self.serialize_object_with(item, &mut hook, &element_name)?;
        }
        Ok(())
    }

    fn begin_xor(&mut self, key: u8) {
        self.writer.begin_xor(key);
    }

    fn end_xor(&mut self) {
        self.writer.end_xor();
    }

    fn begin_checksum<C: ChecksumCalculator>(&mut self, calculator: C) {
        self.writer.begin_checksum(calculator);
    }

    fn end_checksum<C: ChecksumCalculator>(&mut self) -> Result<C::Value> {
        self.writer.end_checksum::<C>()
    }
}
