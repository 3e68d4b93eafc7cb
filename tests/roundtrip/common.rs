//! Shared helpers and schemas for the round-trip tests.

use symbin::prelude::*;

/// Write `value`, read it back, and return both the bytes and the copy.
pub fn roundtrip<T>(value: &mut T, settings: BinarySettings) -> (Vec<u8>, T)
where
    T: BinarySerializable + Default,
{
    let bytes = write_to_bytes(value, settings).unwrap();
    let back = read_from_bytes(&bytes, settings).unwrap();
    (bytes, back)
}

/// Both byte orders, for tests that must hold under either.
pub fn both_endians() -> [BinarySettings; 2] {
    [BinarySettings::little_endian(), BinarySettings::big_endian()]
}

/// One of every supported scalar.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Scalars {
    pub flag: bool,
    pub i8: i8,
    pub u8: u8,
    pub i16: i16,
    pub u16: u16,
    pub i32: i32,
    pub u32: u32,
    pub i64: i64,
    pub u64: u64,
    pub f32: f32,
    pub f64: f64,
    pub text: String,
}

impl BinarySerializable for Scalars {
    fn serialize<S: BinarySerializer>(&mut self, s: &mut S) -> Result<()> {
        s.serialize(&mut self.flag, "Flag")?;
        s.serialize(&mut self.i8, "I8")?;
        s.serialize(&mut self.u8, "U8")?;
        s.serialize(&mut self.i16, "I16")?;
        s.serialize(&mut self.u16, "U16")?;
        s.serialize(&mut self.i32, "I32")?;
        s.serialize(&mut self.u32, "U32")?;
        s.serialize(&mut self.i64, "I64")?;
        s.serialize(&mut self.u64, "U64")?;
        s.serialize(&mut self.f32, "F32")?;
        s.serialize(&mut self.f64, "F64")?;
        s.serialize(&mut self.text, "Text")
    }
}

/// A small archive: header, fixed-size name, entries counted by a `u16`.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Archive {
    pub magic: u32,
    pub name: String,
    pub entries: Vec<Entry>,
    pub trailer: Vec<u8>,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Entry {
    pub offset: u32,
    pub flags: u16,
    pub payload: Vec<u8>,
}

impl BinarySerializable for Archive {
    fn serialize<S: BinarySerializer>(&mut self, s: &mut S) -> Result<()> {
        s.serialize(&mut self.magic, "Magic")?;
        s.serialize_string(&mut self.name, 8, "Name")?;
        let count = s.serialize_array_size::<u16, _>(&mut self.entries, "Entries")?;
        s.serialize_object_array(&mut self.entries, count, "Entries")?;
        s.serialize_array(&mut self.trailer, 4, "Trailer")
    }
}

impl BinarySerializable for Entry {
    fn serialize<S: BinarySerializer>(&mut self, s: &mut S) -> Result<()> {
        s.serialize(&mut self.offset, "Offset")?;
        s.serialize(&mut self.flags, "Flags")?;
        let count = s.serialize_array_size::<u8, _>(&mut self.payload, "Payload")?;
        s.serialize_array(&mut self.payload, count, "Payload")
    }
}

pub fn sample_archive() -> Archive {
    Archive {
        magic: 0x4152_4348,
        name: "demo".to_string(),
        entries: vec![
            Entry {
                offset: 0x10,
                flags: 0x0001,
                payload: vec![1, 2, 3],
            },
            Entry {
                offset: 0x20,
                flags: 0x8000,
                payload: Vec::new(),
            },
        ],
        trailer: vec![0xDE, 0xAD, 0xBE, 0xEF],
    }
}
