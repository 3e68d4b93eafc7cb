//! Shapes without a wire encoding fail in both directions.

use std::time::Duration;
use symbin::prelude::*;

#[derive(Debug, Default)]
struct WithChar {
    c: char,
}

impl BinarySerializable for WithChar {
    fn serialize<S: BinarySerializer>(&mut self, s: &mut S) -> Result<()> {
        s.serialize(&mut self.c, "C")
    }
}

#[test]
fn char_fails_both_directions() {
    let err = write_to_bytes(&mut WithChar { c: 'x' }, BinarySettings::default()).unwrap_err();
    assert!(err.is_unsupported_type());
    assert!(err.to_string().contains("char"));

    let err = read_from_bytes::<WithChar>(&[0x78, 0x00], BinarySettings::default()).unwrap_err();
    assert!(err.is_unsupported_type());
}

#[test]
fn wide_and_temporal_types_fail() {
    let settings = BinarySettings::default();
    assert!(write_to_bytes(&mut SerializableValue::new(1i128), settings)
        .unwrap_err()
        .is_unsupported_type());
    assert!(write_to_bytes(&mut SerializableValue::new(Duration::from_secs(1)), settings)
        .unwrap_err()
        .is_unsupported_type());
    assert!(read_from_bytes::<SerializableValue<u128>>(&[0; 16], settings)
        .unwrap_err()
        .is_unsupported_type());
    assert!(read_from_bytes::<SerializableValue<()>>(&[], settings)
        .unwrap_err()
        .is_unsupported_type());
}

#[test]
fn dynamic_array_is_write_only() {
    let settings = BinarySettings::default();
    let bytes = write_to_bytes(&mut SerializableValue::new(vec![1u16, 2, 3]), settings).unwrap();
    assert_eq!(bytes, vec![1, 0, 2, 0, 3, 0]);

    let err = read_from_bytes::<SerializableValue<Vec<u16>>>(&bytes, settings).unwrap_err();
    assert!(err.is_unsupported_type());
}

#[test]
fn unsupported_array_element_fails_before_reading() {
    #[derive(Debug, Default)]
    struct Chars {
        chars: Vec<char>,
    }

    impl BinarySerializable for Chars {
        fn serialize<S: BinarySerializer>(&mut self, s: &mut S) -> Result<()> {
            s.serialize_array(&mut self.chars, 2, "Chars")
        }
    }

    let mut engine = ReadEngine::new(&[0x41u8, 0x42][..], BinarySettings::default());
    let err = engine.read_object::<Chars>("Chars").unwrap_err();
    assert!(err.is_unsupported_type());
    assert_eq!(engine.position(), 0);
}
