//! Nested object graphs, array sizes and trace output.

use crate::common::*;
use symbin::prelude::*;

#[test]
fn archive_roundtrip() {
    for settings in both_endians() {
        let mut archive = sample_archive();
        let (bytes, back) = roundtrip(&mut archive, settings);
        // magic + name + count + (4 + 2 + 1 + 3) + (4 + 2 + 1) + trailer
        assert_eq!(bytes.len(), 4 + 8 + 2 + 10 + 7 + 4);
        assert_eq!(back, archive);
    }
}

#[test]
fn archive_layout_is_stable() {
    let mut archive = sample_archive();
    let bytes = write_to_bytes(&mut archive, BinarySettings::big_endian()).unwrap();
    assert_eq!(&bytes[..4], &[0x41, 0x52, 0x43, 0x48]);
    assert_eq!(&bytes[4..12], b"demo\0\0\0\0");
    assert_eq!(&bytes[12..14], &[0x00, 0x02]);
    assert_eq!(&bytes[bytes.len() - 4..], &[0xDE, 0xAD, 0xBE, 0xEF]);
}

#[test]
fn log_indentation_follows_nesting() {
    let logger = MemoryLogger::new();
    let mut archive = sample_archive();
    let mut out = Vec::new();
    write_to_stream(
        &mut archive,
        &mut out,
        BinarySettings::big_endian(),
        Some(Box::new(logger.clone())),
    )
    .unwrap();

    let lines = logger.lines();
    assert_eq!(lines[0], "(W) 0x00000000:  (Object: Archive) <no name>");
    assert_eq!(lines[1], "(W) 0x00000000:    (u32) Magic: 1095910216");
    assert_eq!(lines[2], "(W) 0x00000004:    (String) Name: demo");
    assert_eq!(lines[3], "(W) 0x0000000C:    (u16) Entries.Length: 2");
    assert_eq!(lines[4], "(W) 0x0000000E:    (Object[]: Entry[2]) Entries");
    assert_eq!(lines[5], "(W) 0x0000000E:    (Object: Entry) Entries[0]");
    assert_eq!(lines[6], "(W) 0x0000000E:      (u32) Offset: 16");
    assert!(lines.contains(&"(W) 0x00000015:      (u8[3]) Payload: 01 02 03".to_string()));
    assert_eq!(
        lines.last().map(String::as_str),
        Some("(W) 0x0000001F:    (u8[4]) Trailer: DE AD BE EF")
    );
}

#[test]
fn read_log_matches_write_offsets() {
    let mut archive = sample_archive();
    let bytes = write_to_bytes(&mut archive, BinarySettings::little_endian()).unwrap();

    let write_log = MemoryLogger::new();
    write_to_stream(
        &mut archive,
        Vec::new(),
        BinarySettings::little_endian(),
        Some(Box::new(write_log.clone())),
    )
    .unwrap();

    let read_log = MemoryLogger::new();
    let _: Archive = read_from_stream(
        &bytes[..],
        BinarySettings::little_endian(),
        Some(Box::new(read_log.clone())),
    )
    .unwrap();

    let strip = |line: &String| line.split_once(' ').map(|(_, rest)| rest.to_string());
    let written: Vec<_> = write_log.lines().iter().map(strip).collect();
    let read: Vec<_> = read_log.lines().iter().map(strip).collect();
    assert_eq!(written, read);
}

#[derive(Debug, Default, PartialEq)]
struct Counted {
    values: Vec<u32>,
}

impl BinarySerializable for Counted {
    fn serialize<S: BinarySerializer>(&mut self, s: &mut S) -> Result<()> {
        let count = s.serialize_array_size::<u8, _>(&mut self.values, "Values")?;
        s.serialize_array(&mut self.values, count, "Values")
    }
}

#[test]
fn narrow_array_size_wraps_silently() {
    let mut value = Counted {
        values: (0..300).collect(),
    };
    let bytes = write_to_bytes(&mut value, BinarySettings::little_endian()).unwrap();
    assert_eq!(bytes[0], 44);
    assert_eq!(bytes.len(), 1 + 300 * 4);

    let back: Counted = read_from_bytes(&bytes, BinarySettings::little_endian()).unwrap();
    assert_eq!(back.values, (0..44).collect::<Vec<u32>>());
}

#[test]
fn read_hook_injects_context() {
    #[derive(Debug, Default)]
    struct Versioned {
        version: u8,
        extra: u16,
    }

    impl BinarySerializable for Versioned {
        fn serialize<S: BinarySerializer>(&mut self, s: &mut S) -> Result<()> {
            if self.version >= 2 {
                s.serialize(&mut self.extra, "Extra")?;
            }
            Ok(())
        }
    }

    let v1: Versioned = symbin::read_from_stream_with(
        &[0x34u8, 0x12][..],
        BinarySettings::little_endian(),
        None,
        |_, v: &mut Versioned| {
            v.version = 1;
            Ok(())
        },
    )
    .unwrap();
    assert_eq!(v1.extra, 0);

    let v2: Versioned = symbin::read_from_stream_with(
        &[0x34u8, 0x12][..],
        BinarySettings::little_endian(),
        None,
        |_, v: &mut Versioned| {
            v.version = 2;
            Ok(())
        },
    )
    .unwrap();
    assert_eq!(v2.extra, 0x1234);
}
