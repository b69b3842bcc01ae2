//! Byte-order selection shared by the document and archive formats.

use crate::error::{CodecError, CodecResult};

/// Byte order of an encoded container.
///
/// Every container written by this crate records its byte order in the
/// header, so readers never guess. The game console family the data
/// targets determines the choice: the current hardware is little-endian,
/// the legacy hardware big-endian.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Endian {
    /// Little-endian (the default target).
    #[default]
    Little,
    /// Big-endian (the legacy target).
    Big,
}

impl Endian {
    /// The single-byte header marker for this byte order.
    #[must_use]
    pub const fn marker(self) -> u8 {
        match self {
            Endian::Little => 0x00,
            Endian::Big => 0x01,
        }
    }

    /// Parse a header marker byte back into a byte order.
    pub fn from_marker(byte: u8) -> CodecResult<Self> {
        match byte {
            0x00 => Ok(Endian::Little),
            0x01 => Ok(Endian::Big),
            found => Err(CodecError::UnknownEndianMarker { found }),
        }
    }

    /// Encode a `u16` in this byte order.
    #[must_use]
    pub const fn u16_bytes(self, value: u16) -> [u8; 2] {
        match self {
            Endian::Little => value.to_le_bytes(),
            Endian::Big => value.to_be_bytes(),
        }
    }

    /// Encode a `u32` in this byte order.
    #[must_use]
    pub const fn u32_bytes(self, value: u32) -> [u8; 4] {
        match self {
            Endian::Little => value.to_le_bytes(),
            Endian::Big => value.to_be_bytes(),
        }
    }

    /// Encode an `i32` in this byte order.
    #[must_use]
    pub const fn i32_bytes(self, value: i32) -> [u8; 4] {
        match self {
            Endian::Little => value.to_le_bytes(),
            Endian::Big => value.to_be_bytes(),
        }
    }

    /// Encode an `f32` in this byte order (IEEE 754 bit pattern).
    #[must_use]
    pub const fn f32_bytes(self, value: f32) -> [u8; 4] {
        self.u32_bytes(value.to_bits())
    }

    /// Decode a `u16` from this byte order.
    #[must_use]
    pub const fn u16_from(self, bytes: [u8; 2]) -> u16 {
        match self {
            Endian::Little => u16::from_le_bytes(bytes),
            Endian::Big => u16::from_be_bytes(bytes),
        }
    }

    /// Decode a `u32` from this byte order.
    #[must_use]
    pub const fn u32_from(self, bytes: [u8; 4]) -> u32 {
        match self {
            Endian::Little => u32::from_le_bytes(bytes),
            Endian::Big => u32::from_be_bytes(bytes),
        }
    }

    /// Decode an `i32` from this byte order.
    #[must_use]
    pub const fn i32_from(self, bytes: [u8; 4]) -> i32 {
        match self {
            Endian::Little => i32::from_le_bytes(bytes),
            Endian::Big => i32::from_be_bytes(bytes),
        }
    }

    /// Decode an `f32` from this byte order.
    #[must_use]
    pub const fn f32_from(self, bytes: [u8; 4]) -> f32 {
        f32::from_bits(self.u32_from(bytes))
    }
}
