//! The capability surface shared by both engines.
//!
//! A type describes its wire layout once, in [`BinarySerializable::serialize`],
//! as a sequence of calls on a [`BinarySerializer`]. Handing it a
//! [`ReadEngine`](crate::ReadEngine) fills the fields from a stream; handing it
//! a [`WriteEngine`](crate::WriteEngine) emits them. Every call takes the field
//! by `&mut`, so the same line of schema code serves both directions.
//!
//! ```
//! use symbin_engine::{BinarySerializable, BinarySerializer, Result};
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct Header {
//!     magic: u32,
//!     entries: Vec<u16>,
//! }
//!
//! impl BinarySerializable for Header {
//!     fn serialize<S: BinarySerializer>(&mut self, s: &mut S) -> Result<()> {
//!         s.serialize(&mut self.magic, "Magic")?;
//!         let count = s.serialize_array_size::<u8, _>(&mut self.entries, "Entries")?;
//!         s.serialize_array(&mut self.entries, count, "Entries")
//!     }
//! }
//! ```
//!
//! No length or type tags are emitted on their own. Reading only works if the
//! reader issues exactly the calls the writer issued.

use crate::value::{IntPrimitive, Primitive};
use symbin_core::{ChecksumCalculator, Result, SettingsProvider};

/// A type whose wire layout is declared as one field sequence.
///
/// Reading resets the value to `Default::default()` before the sequence runs.
pub trait BinarySerializable {
    /// Run the field sequence against `s`.
    fn serialize<S: BinarySerializer>(&mut self, s: &mut S) -> Result<()>;
}

/// Operations available to schema code, independent of direction.
///
/// `name` arguments only label log lines; an empty name is logged as
/// `<no name>`.
pub trait BinarySerializer: Sized {
    /// Check if this engine reads (`true`) or writes (`false`).
    fn is_reading(&self) -> bool;

    /// Settings the engine was created with.
    fn settings(&self) -> &dyn SettingsProvider;

    /// Bytes moved through the engine so far.
    fn position(&self) -> u64;

    /// Current object nesting depth. Only affects log indentation.
    fn depth(&self) -> usize;

    /// Check if a log sink is attached. Schema code can skip building
    /// diagnostic names when this is `false`.
    fn is_logging(&self) -> bool;

    /// Round-trip one primitive.
    ///
    /// `String` values are null-terminated: a single zero byte ends them on
    /// both sides. That only round-trips when the text encoding has 1-byte
    /// units; UTF-16 text should go through [`serialize_string`] instead.
    ///
    /// [`serialize_string`]: BinarySerializer::serialize_string
    fn serialize<T: Primitive>(&mut self, value: &mut T, name: &str) -> Result<()>;

    /// Round-trip exactly `length` primitives.
    ///
    /// Byte arrays move as one block. Writing fails with `LengthMismatch` if
    /// `values` holds fewer than `length` elements; extra elements are
    /// ignored. Reading replaces the contents of `values`.
    fn serialize_array<T: Primitive>(
        &mut self,
        values: &mut Vec<T>,
        length: usize,
        name: &str,
    ) -> Result<()>;

    /// Round-trip the element count of `values` as a `V`.
    ///
    /// Writing converts the length to `V` with wrapping, so a too narrow `V`
    /// silently corrupts the count. Reading fills an empty `values` with that
    /// many default elements. Returns the element count for the array that
    /// follows: `values.len()` when writing, the count read when reading.
    ///
    /// The fill is sized by the length field alone, before any element bytes
    /// are read. When reading untrusted data, pick a `V` no wider than the
    /// format needs or pass a non-empty `values` and check the returned
    /// count. A count that cannot be allocated fails with `InvalidLength`.
    fn serialize_array_size<V: IntPrimitive, T: Default>(
        &mut self,
        values: &mut Vec<T>,
        name: &str,
    ) -> Result<usize>;

    /// Round-trip a text field of exactly `length` encoding units.
    fn serialize_string(&mut self, value: &mut String, length: usize, name: &str) -> Result<()>;

    /// Round-trip a nested object, running `hook` before its field sequence.
    ///
    /// When reading, `hook` sees the freshly defaulted object. When writing,
    /// it sees the object about to be emitted.
    fn serialize_object_with<T, F>(&mut self, value: &mut T, hook: F, name: &str) -> Result<()>
    where
        T: BinarySerializable + Default,
        F: FnOnce(&mut Self, &mut T) -> Result<()>;

    /// Round-trip a nested object.
    fn serialize_object<T>(&mut self, value: &mut T, name: &str) -> Result<()>
    where
        T: BinarySerializable + Default,
    {
        self.serialize_object_with(value, |_, _| Ok(()), name)
    }

    /// Round-trip `length` nested objects, running `hook` before each one.
    fn serialize_object_array_with<T, F>(
        &mut self,
        values: &mut Vec<T>,
        length: usize,
        hook: F,
        name: &str,
    ) -> Result<()>
    where
        T: BinarySerializable + Default,
        F: FnMut(&mut Self, &mut T) -> Result<()>;

    /// Round-trip `length` nested objects.
    fn serialize_object_array<T>(&mut self, values: &mut Vec<T>, length: usize, name: &str) -> Result<()>
    where
        T: BinarySerializable + Default,
    {
        self.serialize_object_array_with(values, length, |_, _| Ok(()), name)
    }

    /// XOR every following byte with `key` until [`end_xor`](Self::end_xor).
    fn begin_xor(&mut self, key: u8);

    /// Stop XORing.
    fn end_xor(&mut self);

    /// Feed every following byte to `calculator` until
    /// [`end_checksum`](Self::end_checksum).
    fn begin_checksum<C: ChecksumCalculator>(&mut self, calculator: C);

    /// Detach the active calculator and return its value.
    fn end_checksum<C: ChecksumCalculator>(&mut self) -> Result<C::Value>;
}

/// Run an optional hook and then the object's own field sequence.
pub(crate) fn run_object<S, T, F>(s: &mut S, value: &mut T, hook: F) -> Result<()>
where
    S: BinarySerializer,
    T: BinarySerializable,
    F: FnOnce(&mut S, &mut T) -> Result<()>,
{
    hook(s, value)?;
    value.serialize(s)
}

/// Schema holding a single primitive in a field named `Value`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SerializableValue<T> {
    /// The wrapped value
    pub value: T,
}

impl<T> SerializableValue<T> {
    /// Wrap a value.
    pub fn new(value: T) -> Self {
        SerializableValue { value }
    }

    /// Unwrap the value.
    pub fn into_inner(self) -> T {
        self.value
    }
}

impl<T: Primitive> BinarySerializable for SerializableValue<T> {
    fn serialize<S: BinarySerializer>(&mut self, s: &mut S) -> Result<()> {
        s.serialize(&mut self.value, "Value")
    }
}
