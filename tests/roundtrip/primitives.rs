//! Primitive round trips under both byte orders.

use crate::common::*;
use proptest::prelude::*;
use symbin::prelude::*;

fn scalars() -> impl Strategy<Value = Scalars> {
    (
        (any::<bool>(), any::<i8>(), any::<u8>(), any::<i16>(), any::<u16>(), any::<i32>()),
        (any::<u32>(), any::<i64>(), any::<u64>(), any::<u32>(), any::<u64>()),
        "[a-zA-Z0-9 ]{0,24}",
    )
        .prop_map(|((flag, a, b, c, d, e), (f, g, h, float_bits, double_bits), text)| Scalars {
            flag,
            i8: a,
            u8: b,
            i16: c,
            u16: d,
            i32: e,
            u32: f,
            i64: g,
            u64: h,
            f32: f32::from_bits(float_bits),
            f64: f64::from_bits(double_bits),
            text,
        })
}

proptest! {
    #[test]
    fn scalars_roundtrip_bit_exact(mut value in scalars(), big in any::<bool>()) {
        let settings = if big { BinarySettings::big_endian() } else { BinarySettings::little_endian() };
        let (bytes, back) = roundtrip(&mut value, settings);

        prop_assert_eq!(bytes.len(), 1 + 1 + 1 + 2 + 2 + 4 + 4 + 8 + 8 + 4 + 8 + value.text.len() + 1);
        prop_assert_eq!(back.f32.to_bits(), value.f32.to_bits());
        prop_assert_eq!(back.f64.to_bits(), value.f64.to_bits());
        prop_assert_eq!(back.i64, value.i64);
        prop_assert_eq!(back.u64, value.u64);
        prop_assert_eq!(back.i32, value.i32);
        prop_assert_eq!(back.u16, value.u16);
        prop_assert_eq!(back.flag, value.flag);
        prop_assert_eq!(&back.text, &value.text);
    }

    #[test]
    fn wrapped_value_roundtrip(v in any::<i32>()) {
        for settings in both_endians() {
            let (_, back) = roundtrip(&mut SerializableValue::new(v), settings);
            prop_assert_eq!(back.value, v);
        }
    }
}

#[test]
fn endian_sensitivity() {
    let bytes = [0x01, 0x00, 0x00, 0x00];
    let little: SerializableValue<i32> =
        read_from_bytes(&bytes, BinarySettings::little_endian()).unwrap();
    let big: SerializableValue<i32> = read_from_bytes(&bytes, BinarySettings::big_endian()).unwrap();
    assert_eq!(little.value, 1);
    assert_eq!(big.value, 16_777_216);
}

#[test]
fn special_floats_survive() {
    for v in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY, -0.0, f64::MIN_POSITIVE / 2.0] {
        for settings in both_endians() {
            let (_, back) = roundtrip(&mut SerializableValue::new(v), settings);
            assert_eq!(back.value.to_bits(), v.to_bits());
        }
    }
}

#[test]
fn byte_order_layout() {
    let mut value = SerializableValue::new(0x0102_0304_0506_0708u64);
    let little = write_to_bytes(&mut value, BinarySettings::little_endian()).unwrap();
    let big = write_to_bytes(&mut value, BinarySettings::big_endian()).unwrap();
    assert_eq!(little, vec![8, 7, 6, 5, 4, 3, 2, 1]);
    assert_eq!(big, vec![1, 2, 3, 4, 5, 6, 7, 8]);
}

#[test]
fn bool_canonical_bytes() {
    let yes = write_to_bytes(&mut SerializableValue::new(true), BinarySettings::default()).unwrap();
    let no = write_to_bytes(&mut SerializableValue::new(false), BinarySettings::default()).unwrap();
    assert_eq!(yes, vec![1]);
    assert_eq!(no, vec![0]);
}

#[test]
fn malformed_bool_reads_true_and_is_logged() {
    let logger = MemoryLogger::new();
    let value: SerializableValue<bool> = read_from_stream(
        &[0x7Fu8][..],
        BinarySettings::default(),
        Some(Box::new(logger.clone())),
    )
    .unwrap();
    assert!(value.value);
    assert!(logger
        .contents()
        .contains("Binary boolean was not correctly formatted (127)"));
}

#[test]
fn truncated_stream_fails() {
    let err = read_from_bytes::<SerializableValue<u64>>(&[1, 2, 3], BinarySettings::default())
        .unwrap_err();
    match err {
        Error::EndOfStream {
            offset,
            needed,
            available,
        } => {
            assert_eq!(offset, 0);
            assert_eq!(needed, 8);
            assert_eq!(available, 3);
        }
        other => panic!("Expected EndOfStream, got {:?}", other),
    }
}
