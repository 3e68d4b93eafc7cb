//! Byte order of multi-byte primitives.

/// Byte order used for multi-byte integers and floats.
///
/// Text and raw byte blocks are never affected by endianness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Endian {
    /// Least significant byte first
    #[default]
    Little,
    /// Most significant byte first
    Big,
}

impl Endian {
    /// Byte order of the machine this code runs on.
    pub const fn native() -> Self {
        if cfg!(target_endian = "little") {
            Endian::Little
        } else {
            Endian::Big
        }
    }

    /// Check if values in this order must be byte-swapped on this machine.
    pub fn is_swapped(&self) -> bool {
        *self != Self::native()
    }

    /// Short lowercase label, used in diagnostics.
    pub fn label(&self) -> &'static str {
        match self {
            Endian::Little => "little",
            Endian::Big => "big",
        }
    }
}
