//! Value classification for the engines.
//!
//! The write engine never inspects a Rust type directly. Every field is turned
//! into a [`Value`] first, and the engine dispatches on the variant. The read
//! engine has no value yet, so it dispatches on the requested type's
//! [`ValueKind`] instead.
//!
//! ## Supported shapes
//!
//! | Kind | Rust types | Wire form |
//! |------|------------|-----------|
//! | Bool | `bool` | one byte, 0 or 1 |
//! | I8..U64 | `i8`..`u64` | native width, configured byte order |
//! | F32, F64 | `f32`, `f64` | IEEE-754, configured byte order |
//! | Str | `String` | encoded text plus one zero byte |
//! | Array | `Vec<T>` | elements back to back (write only) |
//!
//! `char`, `i128`/`u128`, `Duration`/`SystemTime` and `()` are classified so
//! that they fail with `UnsupportedType` instead of being coerced.

use std::fmt::{Debug, Display};
use std::time::{Duration, SystemTime};
use symbin_core::{Error, Result};

/// Classification of a primitive type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// `bool`
    Bool,
    /// `i8`
    I8,
    /// `u8`
    U8,
    /// `i16`
    I16,
    /// `u16`
    U16,
    /// `i32`
    I32,
    /// `u32`
    U32,
    /// `i64`
    I64,
    /// `u64`
    U64,
    /// `f32`
    F32,
    /// `f64`
    F64,
    /// Null-terminated text
    Str,
    /// Single character (unsupported)
    Char,
    /// 128-bit and other wide numerics (unsupported)
    Decimal,
    /// Points in time and durations (unsupported)
    DateTime,
    /// Unit and other void-like types (unsupported)
    Empty,
    /// Dynamic sequence (write only)
    Array,
}

impl ValueKind {
    /// Human-readable name.
    pub const fn name(&self) -> &'static str {
        match self {
            ValueKind::Bool => "bool",
            ValueKind::I8 => "i8",
            ValueKind::U8 => "u8",
            ValueKind::I16 => "i16",
            ValueKind::U16 => "u16",
            ValueKind::I32 => "i32",
            ValueKind::U32 => "u32",
            ValueKind::I64 => "i64",
            ValueKind::U64 => "u64",
            ValueKind::F32 => "f32",
            ValueKind::F64 => "f64",
            ValueKind::Str => "string",
            ValueKind::Char => "char",
            ValueKind::Decimal => "decimal",
            ValueKind::DateTime => "datetime",
            ValueKind::Empty => "empty",
            ValueKind::Array => "array",
        }
    }

    /// Check if values of this kind can be read from a stream.
    pub const fn is_readable(&self) -> bool {
        !matches!(
            self,
            ValueKind::Char
                | ValueKind::Decimal
                | ValueKind::DateTime
                | ValueKind::Empty
                | ValueKind::Array
        )
    }

    /// Fixed wire width in bytes, if the kind has one.
    pub const fn fixed_width(&self) -> Option<usize> {
        match self {
            ValueKind::Bool | ValueKind::I8 | ValueKind::U8 => Some(1),
            ValueKind::I16 | ValueKind::U16 => Some(2),
            ValueKind::I32 | ValueKind::U32 | ValueKind::F32 => Some(4),
            ValueKind::I64 | ValueKind::U64 | ValueKind::F64 => Some(8),
            _ => None,
        }
    }
}

/// Runtime shape of a value about to be written.
///
/// Variants are listed in the order the write engine checks them.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Byte sequence, written in one bulk transfer
    Bytes(Vec<u8>),
    /// Any other sequence, written element by element
    Array(Vec<Value>),
    /// Enum, written as its underlying integer
    Enum {
        /// Name of the enum type
        type_name: &'static str,
        /// Underlying representation
        repr: Box<Value>,
    },
    /// Boolean
    Bool(bool),
    /// 8-bit signed integer
    I8(i8),
    /// 8-bit unsigned integer
    U8(u8),
    /// 16-bit signed integer
    I16(i16),
    /// 16-bit unsigned integer
    U16(u16),
    /// 32-bit signed integer
    I32(i32),
    /// 32-bit unsigned integer
    U32(u32),
    /// 64-bit signed integer
    I64(i64),
    /// 64-bit unsigned integer
    U64(u64),
    /// 32-bit float
    F32(f32),
    /// 64-bit float
    F64(f64),
    /// Text
    Str(String),
    /// A shape with no wire encoding
    Other {
        /// Classification of the value
        kind: ValueKind,
        /// Name of the Rust type
        type_name: &'static str,
    },
}

impl Value {
    /// Returns the kind of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Bytes(_) | Value::Array(_) => ValueKind::Array,
            Value::Enum { repr, .. } => repr.kind(),
            Value::Bool(_) => ValueKind::Bool,
            Value::I8(_) => ValueKind::I8,
            Value::U8(_) => ValueKind::U8,
            Value::I16(_) => ValueKind::I16,
            Value::U16(_) => ValueKind::U16,
            Value::I32(_) => ValueKind::I32,
            Value::U32(_) => ValueKind::U32,
            Value::I64(_) => ValueKind::I64,
            Value::U64(_) => ValueKind::U64,
            Value::F32(_) => ValueKind::F32,
            Value::F64(_) => ValueKind::F64,
            Value::Str(_) => ValueKind::Str,
            Value::Other { kind, .. } => *kind,
        }
    }

    /// Returns the type name (for error messages)
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Enum { type_name, .. } | Value::Other { type_name, .. } => *type_name,
            other => other.kind().name(),
        }
    }
}

/// A type that maps onto one wire primitive.
///
/// `KIND` drives reads, `to_value` drives writes. The two must agree: a type
/// whose `to_value` produces a `U16` must have `KIND == ValueKind::U16`.
pub trait Primitive: Sized + Debug {
    /// Kind requested from the read engine.
    const KIND: ValueKind;

    /// Whether a `Vec<Self>` is moved as one raw byte block.
    const IS_BYTE: bool = false;

    /// Classify this value for writing.
    fn to_value(&self) -> Value;

    /// Build a value from what the read engine produced for `KIND`.
    fn from_value(value: Value) -> Result<Self>;

    /// View a slice as raw bytes. Only byte types return `Some`.
    fn as_byte_slice(_values: &[Self]) -> Option<&[u8]> {
        None
    }

    /// Turn raw bytes into elements. Only byte types return `Some`.
    fn vec_from_bytes(_bytes: Vec<u8>) -> Option<Vec<Self>> {
        None
    }
}

/// Integer primitive that can carry an array length.
pub trait IntPrimitive: Primitive + Copy + PartialEq + Display {
    /// Convert an element count, wrapping or truncating to fit.
    fn from_len_wrapping(len: usize) -> Self;

    /// Convert a serialized length into an element count.
    fn to_len(self) -> Result<usize>;
}

fn mismatch<T>(value: &Value) -> Error {
    Error::unsupported_named(format!(
        "{} (got {})",
        std::any::type_name::<T>(),
        value.type_name()
    ))
}

impl Primitive for bool {
    const KIND: ValueKind = ValueKind::Bool;

    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Bool(v) => Ok(v),
            other => Err(mismatch::<Self>(&other)),
        }
    }
}

impl Primitive for u8 {
    const KIND: ValueKind = ValueKind::U8;
    const IS_BYTE: bool = true;

    fn to_value(&self) -> Value {
        Value::U8(*self)
    }

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::U8(v) => Ok(v),
            other => Err(mismatch::<Self>(&other)),
        }
    }

    fn as_byte_slice(values: &[Self]) -> Option<&[u8]> {
        Some(values)
    }

    fn vec_from_bytes(bytes: Vec<u8>) -> Option<Vec<Self>> {
        Some(bytes)
    }
}

macro_rules! impl_numeric_primitive {
    ($($ty:ty => $kind:ident),* $(,)?) => {
        $(
            impl Primitive for $ty {
                const KIND: ValueKind = ValueKind::$kind;

                fn to_value(&self) -> Value {
                    Value::$kind(*self)
                }

                fn from_value(value: Value) -> Result<Self> {
                    match value {
                        Value::$kind(v) => Ok(v),
                        other => Err(mismatch::<Self>(&other)),
                    }
                }
            }
        )*
    };
}

impl_numeric_primitive! {
    i8 => I8,
    i16 => I16,
    u16 => U16,
    i32 => I32,
    u32 => U32,
    i64 => I64,
    u64 => U64,
    f32 => F32,
    f64 => F64,
}

impl Primitive for String {
    const KIND: ValueKind = ValueKind::Str;

    fn to_value(&self) -> Value {
        Value::Str(self.clone())
    }

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Str(v) => Ok(v),
            other => Err(mismatch::<Self>(&other)),
        }
    }
}

macro_rules! impl_length_primitive {
    ($($ty:ty),* $(,)?) => {
        $(
            impl IntPrimitive for $ty {
                fn from_len_wrapping(len: usize) -> Self {
                    len as $ty
                }

                fn to_len(self) -> Result<usize> {
                    usize::try_from(self).map_err(|_| Error::InvalidLength {
                        value: self.to_string(),
                    })
                }
            }
        )*
    };
}

impl_length_primitive!(i8, u8, i16, u16, i32, u32, i64, u64);

macro_rules! impl_unsupported_primitive {
    ($($ty:ty => $kind:ident),* $(,)?) => {
        $(
            impl Primitive for $ty {
                const KIND: ValueKind = ValueKind::$kind;

                fn to_value(&self) -> Value {
                    Value::Other {
                        kind: ValueKind::$kind,
                        type_name: std::any::type_name::<$ty>(),
                    }
                }

                fn from_value(_value: Value) -> Result<Self> {
                    Err(Error::unsupported::<$ty>())
                }
            }
        )*
    };
}

impl_unsupported_primitive! {
    char => Char,
    i128 => Decimal,
    u128 => Decimal,
    Duration => DateTime,
    SystemTime => DateTime,
    () => Empty,
}

impl<T: Primitive> Primitive for Vec<T> {
    const KIND: ValueKind = ValueKind::Array;

    fn to_value(&self) -> Value {
        match T::as_byte_slice(self) {
            Some(bytes) => Value::Bytes(bytes.to_vec()),
            None => Value::Array(self.iter().map(Primitive::to_value).collect()),
        }
    }

    fn from_value(_value: Value) -> Result<Self> {
        Err(Error::unsupported::<Self>())
    }
}

/// Make a fieldless enum usable as a primitive.
///
/// The enum must be `Copy`, convert into its representation with
/// `From<Enum> for Repr`, and back with `TryFrom<Repr>`. The `num_enum`
/// derives `IntoPrimitive` and `TryFromPrimitive` provide exactly that.
///
/// ```
/// use symbin_engine::{impl_primitive_enum, Primitive, Value};
///
/// #[derive(Debug, Clone, Copy, PartialEq)]
/// enum Mode {
///     Off = 0,
///     On = 1,
/// }
///
/// impl From<Mode> for u8 {
///     fn from(mode: Mode) -> u8 {
///         mode as u8
///     }
/// }
///
/// impl TryFrom<u8> for Mode {
///     type Error = u8;
///
///     fn try_from(value: u8) -> Result<Self, u8> {
///         match value {
///             0 => Ok(Mode::Off),
///             1 => Ok(Mode::On),
///             other => Err(other),
///         }
///     }
/// }
///
/// impl_primitive_enum!(Mode => u8);
///
/// assert_eq!(Mode::from_value(Value::U8(1)).unwrap(), Mode::On);
/// assert!(Mode::from_value(Value::U8(7)).is_err());
/// ```
#[macro_export]
macro_rules! impl_primitive_enum {
    ($($ty:ty => $repr:ty),+ $(,)?) => {
        $(
            impl $crate::Primitive for $ty {
                const KIND: $crate::ValueKind = <$repr as $crate::Primitive>::KIND;

                fn to_value(&self) -> $crate::Value {
                    let repr: $repr = ::std::convert::From::from(*self);
                    $crate::Value::Enum {
                        type_name: ::std::any::type_name::<$ty>(),
                        repr: ::std::boxed::Box::new($crate::Primitive::to_value(&repr)),
                    }
                }

                fn from_value(value: $crate::Value) -> $crate::Result<Self> {
                    let repr = <$repr as $crate::Primitive>::from_value(value)?;
                    <$ty as ::std::convert::TryFrom<$repr>>::try_from(repr).map_err(|_| {
                        $crate::Error::InvalidEnum {
                            type_name: ::std::any::type_name::<$ty>(),
                            value: repr.to_string(),
                        }
                    })
                }
            }
        )+
    };
}
