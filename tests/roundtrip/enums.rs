//! Enums travel as their underlying integer.

use crate::common::*;
use num_enum::{IntoPrimitive, TryFromPrimitive};
use symbin::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoPrimitive, TryFromPrimitive)]
#[repr(u16)]
enum Compression {
    None = 0,
    Lz = 0x10,
    Huffman = 0x200,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoPrimitive, TryFromPrimitive)]
#[repr(i8)]
enum Direction {
    Back = -1,
    Forward = 1,
}

// A derived `#[default]` would become the num_enum fallback for unknown values.
impl Default for Compression {
    fn default() -> Self {
        Compression::None
    }
}

impl Default for Direction {
    fn default() -> Self {
        Direction::Forward
    }
}

symbin::impl_primitive_enum! {
    Compression => u16,
    Direction => i8,
}

#[derive(Debug, Default, PartialEq)]
struct Chunk {
    compression: Compression,
    direction: Direction,
    modes: Vec<Compression>,
}

impl BinarySerializable for Chunk {
    fn serialize<S: BinarySerializer>(&mut self, s: &mut S) -> Result<()> {
        s.serialize(&mut self.compression, "Compression")?;
        s.serialize(&mut self.direction, "Direction")?;
        s.serialize_array(&mut self.modes, 2, "Modes")
    }
}

#[test]
fn enum_roundtrip_uses_repr() {
    let mut chunk = Chunk {
        compression: Compression::Huffman,
        direction: Direction::Back,
        modes: vec![Compression::Lz, Compression::None],
    };
    let (bytes, back) = roundtrip(&mut chunk, BinarySettings::big_endian());
    assert_eq!(bytes, vec![0x02, 0x00, 0xFF, 0x00, 0x10, 0x00, 0x00]);
    assert_eq!(back, chunk);
}

#[test]
fn unknown_discriminant_fails() {
    let err = read_from_bytes::<Chunk>(&[0x00, 0x07, 0x01, 0, 0, 0, 0], BinarySettings::big_endian())
        .unwrap_err();
    match err {
        Error::InvalidEnum { type_name, value } => {
            assert!(type_name.ends_with("Compression"));
            assert_eq!(value, "7");
        }
        other => panic!("Expected InvalidEnum, got {:?}", other),
    }
}

#[test]
fn enum_log_shows_variant() {
    let logger = MemoryLogger::new();
    let mut chunk = Chunk {
        compression: Compression::Lz,
        direction: Direction::Forward,
        modes: vec![Compression::None, Compression::None],
    };
    write_to_stream(
        &mut chunk,
        Vec::new(),
        BinarySettings::little_endian(),
        Some(Box::new(logger.clone())),
    )
    .unwrap();
    assert!(logger
        .contents()
        .contains("(Compression) Compression: Lz"));
    assert!(logger.contents().contains("(Compression[2]) Modes"));
    assert!(logger.contents().contains("(Compression) Modes[1]: None"));
}
