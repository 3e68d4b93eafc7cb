//! One-call helpers for reading and writing whole objects.
//!
//! Each helper builds one engine, runs a single top-level object through it
//! and drops the engine. Logger sinks passed in are dropped (and so flushed)
//! when the call returns.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;
use symbin_core::{Result, SerializerLogger, SettingsProvider};
use symbin_engine::{BinarySerializable, BinarySerializer, ReadEngine, WriteEngine};
use tracing::debug;

fn read_engine<R: Read>(
    stream: R,
    settings: impl SettingsProvider,
    logger: Option<Box<dyn SerializerLogger>>,
) -> ReadEngine<R> {
    let engine = ReadEngine::new(stream, settings);
    match logger {
        Some(logger) => engine.with_logger(logger),
        None => engine,
    }
}

fn write_engine<W: Write>(
    stream: W,
    settings: impl SettingsProvider,
    logger: Option<Box<dyn SerializerLogger>>,
) -> WriteEngine<W> {
    let engine = WriteEngine::new(stream, settings);
    match logger {
        Some(logger) => engine.with_logger(logger),
        None => engine,
    }
}

/// Read one object from `stream`.
pub fn read_from_stream<T, R>(
    stream: R,
    settings: impl SettingsProvider,
    logger: Option<Box<dyn SerializerLogger>>,
) -> Result<T>
where
    T: BinarySerializable + Default,
    R: Read,
{
    read_from_stream_with(stream, settings, logger, |_, _| Ok(()))
}

/// Read one object from `stream`, running `hook` on the fresh instance before
/// its fields are read.
pub fn read_from_stream_with<T, R, F>(
    stream: R,
    settings: impl SettingsProvider,
    logger: Option<Box<dyn SerializerLogger>>,
    hook: F,
) -> Result<T>
where
    T: BinarySerializable + Default,
    R: Read,
    F: FnOnce(&mut ReadEngine<R>, &mut T) -> Result<()>,
{
    let mut engine = read_engine(stream, settings, logger);
    let mut value = T::default();
    engine.serialize_object_with(&mut value, hook, "")?;
    Ok(value)
}

/// Read one object from the file at `path`.
pub fn read_from_file<T>(
    path: impl AsRef<Path>,
    settings: impl SettingsProvider,
    logger: Option<Box<dyn SerializerLogger>>,
) -> Result<T>
where
    T: BinarySerializable + Default,
{
    let path = path.as_ref();
    debug!("Reading {} from {}", std::any::type_name::<T>(), path.display());
    let file = File::open(path)?;
    read_from_stream(BufReader::new(file), settings, logger)
}

/// Read one object from an in-memory buffer.
pub fn read_from_bytes<T>(bytes: &[u8], settings: impl SettingsProvider) -> Result<T>
where
    T: BinarySerializable + Default,
{
    read_from_stream(bytes, settings, None)
}

/// Write one object to `stream` and flush it.
pub fn write_to_stream<T, W>(
    value: &mut T,
    stream: W,
    settings: impl SettingsProvider,
    logger: Option<Box<dyn SerializerLogger>>,
) -> Result<()>
where
    T: BinarySerializable + Default,
    W: Write,
{
    write_to_stream_with(value, stream, settings, logger, |_, _| Ok(()))
}

/// Write one object to `stream`, running `hook` before its fields are
/// written, and flush the stream.
pub fn write_to_stream_with<T, W, F>(
    value: &mut T,
    stream: W,
    settings: impl SettingsProvider,
    logger: Option<Box<dyn SerializerLogger>>,
    hook: F,
) -> Result<()>
where
    T: BinarySerializable + Default,
    W: Write,
    F: FnOnce(&mut WriteEngine<W>, &mut T) -> Result<()>,
{
    let mut engine = write_engine(stream, settings, logger);
    engine.serialize_object_with(value, hook, "")?;
    engine.flush()
}

/// Write one object to the file at `path`, replacing any previous contents.
pub fn write_to_file<T>(
    value: &mut T,
    path: impl AsRef<Path>,
    settings: impl SettingsProvider,
    logger: Option<Box<dyn SerializerLogger>>,
) -> Result<()>
where
    T: BinarySerializable + Default,
{
    let path = path.as_ref();
    debug!("Writing {} to {}", std::any::type_name::<T>(), path.display());
    let file = File::create(path)?;
    write_to_stream(value, BufWriter::new(file), settings, logger)
}

/// Write one object into a new buffer.
pub fn write_to_bytes<T>(value: &mut T, settings: impl SettingsProvider) -> Result<Vec<u8>>
where
    T: BinarySerializable + Default,
{
    let mut engine = WriteEngine::new(Vec::new(), settings);
    engine.serialize_object(value, "")?;
    Ok(engine.into_inner())
}
