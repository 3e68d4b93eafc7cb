//! XOR and checksum overlays driven from schema code.

use crate::common::*;
use proptest::prelude::*;
use symbin::prelude::*;

/// Header in the clear, body XORed, CRC over the body stored after it.
#[derive(Debug, Default, Clone, PartialEq)]
struct Sealed {
    key: u8,
    checksum_over_wire: bool,
    body: Scalars,
    crc: u32,
}

impl BinarySerializable for Sealed {
    fn serialize<S: BinarySerializer>(&mut self, s: &mut S) -> Result<()> {
        s.serialize(&mut self.key, "Key")?;
        s.serialize(&mut self.checksum_over_wire, "ChecksumOverWire")?;

        let calculator = if self.checksum_over_wire {
            Crc32Checksum::over_encrypted_data()
        } else {
            Crc32Checksum::new()
        };
        let key = self.key;
        let body = &mut self.body;
        let ((), crc) = s.do_checksum(calculator, |s| {
            s.do_xor(key, |s| s.serialize_object(body, "Body"))
        })?;

        if !s.is_reading() {
            self.crc = crc;
        }
        s.serialize(&mut self.crc, "Crc")?;
        if s.is_reading() && self.crc != crc {
            // corrupt data is reported through the value, not as an error
            self.crc = 0;
        }
        Ok(())
    }
}

fn sample_body() -> Scalars {
    Scalars {
        flag: true,
        i8: -3,
        u8: 200,
        i16: -1234,
        u16: 54321,
        i32: -7,
        u32: 0xDEAD_BEEF,
        i64: i64::MIN,
        u64: u64::MAX,
        f32: 1.25,
        f64: -2.5e300,
        text: "payload".to_string(),
    }
}

#[test]
fn xor_and_checksum_roundtrip() {
    for checksum_over_wire in [false, true] {
        let mut sealed = Sealed {
            key: 0x5A,
            checksum_over_wire,
            body: sample_body(),
            crc: 0,
        };
        let (bytes, back) = roundtrip(&mut sealed, BinarySettings::little_endian());
        assert_ne!(sealed.crc, 0);
        assert_eq!(back, sealed);

        let text_start = bytes.len() - 4 - ("payload".len() + 1);
        assert_eq!(bytes[text_start], b'p' ^ 0x5A);
    }
}

#[test]
fn checksum_flag_selects_byte_side() {
    let mut plain = Sealed {
        key: 0x33,
        checksum_over_wire: false,
        body: sample_body(),
        crc: 0,
    };
    let mut wire = Sealed {
        checksum_over_wire: true,
        ..plain.clone()
    };
    write_to_bytes(&mut plain, BinarySettings::big_endian()).unwrap();
    write_to_bytes(&mut wire, BinarySettings::big_endian()).unwrap();
    assert_ne!(plain.crc, wire.crc);
}

#[test]
fn corrupt_body_fails_checksum() {
    let mut sealed = Sealed {
        key: 0x77,
        checksum_over_wire: false,
        body: sample_body(),
        crc: 0,
    };
    let mut bytes = write_to_bytes(&mut sealed, BinarySettings::little_endian()).unwrap();
    bytes[3] ^= 0x01;
    let back: Sealed = read_from_bytes(&bytes, BinarySettings::little_endian()).unwrap();
    assert_eq!(back.crc, 0);
}

#[test]
fn zero_key_is_noop() {
    let mut keyed = Sealed {
        key: 0,
        checksum_over_wire: true,
        body: sample_body(),
        crc: 0,
    };
    let keyed_bytes = write_to_bytes(&mut keyed, BinarySettings::little_endian()).unwrap();
    let body_bytes = write_to_bytes(&mut sample_body(), BinarySettings::little_endian()).unwrap();
    assert_eq!(&keyed_bytes[2..2 + body_bytes.len()], &body_bytes[..]);
}

#[derive(Debug, Default, PartialEq)]
struct Blob {
    key: u8,
    data: Vec<u8>,
}

impl BinarySerializable for Blob {
    fn serialize<S: BinarySerializer>(&mut self, s: &mut S) -> Result<()> {
        let count = s.serialize_array_size::<u32, _>(&mut self.data, "Data")?;
        s.begin_xor(self.key);
        s.serialize_array(&mut self.data, count, "Data")?;
        s.end_xor();
        Ok(())
    }
}

proptest! {
    #[test]
    fn xor_is_an_involution(key in any::<u8>(), data in proptest::collection::vec(any::<u8>(), 0..512)) {
        let mut blob = Blob { key, data: data.clone() };
        let bytes = write_to_bytes(&mut blob, BinarySettings::little_endian()).unwrap();
        let wire = &bytes[4..];
        for (w, d) in wire.iter().zip(&data) {
            prop_assert_eq!(*w, d ^ key);
        }

        let mut engine = ReadEngine::new(&bytes[..], BinarySettings::little_endian());
        let mut back = Blob { key, data: Vec::new() };
        back.serialize(&mut engine).unwrap();
        prop_assert_eq!(back.data, data);
    }
}

#[test]
fn end_checksum_misuse() {
    let mut engine = WriteEngine::new(Vec::new(), BinarySettings::default());
    assert!(matches!(
        engine.end_checksum::<Checksum8>(),
        Err(Error::ChecksumNotActive)
    ));
    engine.begin_checksum(Checksum8::new());
    let err = engine.end_checksum::<Crc32Checksum>().unwrap_err();
    assert!(err.is_usage_error());
    assert!(engine.end_checksum::<Checksum8>().is_ok());
}
