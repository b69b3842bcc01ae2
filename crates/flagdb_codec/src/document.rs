//! Binary document format.
//!
//! A document is a single [`Value`] tree behind a self-describing
//! header: magic, a byte-order marker, and a format version. All
//! multi-byte fields after the marker use the order the marker names,
//! so a reader never has to guess which console family produced the
//! file.
//!
//! Encoding is deterministic: map entries are written in key order, so
//! the same logical document always produces the same bytes for a
//! given byte order.

use crate::endian::Endian;
use crate::error::{CodecError, CodecResult};
use crate::value::Value;
use std::collections::BTreeMap;

/// Magic bytes opening every document.
pub const DOCUMENT_MAGIC: [u8; 4] = *b"FDTR";

/// Document format version this build reads and writes.
pub const DOCUMENT_VERSION: u16 = 1;

// Node tags.
const TAG_BOOL: u8 = 0x01;
const TAG_I32: u8 = 0x02;
const TAG_U32: u8 = 0x03;
const TAG_F32: u8 = 0x04;
const TAG_STR: u8 = 0x05;
const TAG_ARRAY: u8 = 0x06;
const TAG_MAP: u8 = 0x07;

/// Maximum allowed element count for arrays and maps.
/// This prevents allocation-based DoS from untrusted input.
const MAX_CONTAINER_ELEMENTS: u64 = 16 * 1024 * 1024;

/// Maximum allowed string length in bytes.
const MAX_STRING_LENGTH: u64 = 64 * 1024 * 1024;

/// Encode a value tree as a document in the given byte order.
///
/// # Errors
///
/// Returns an error if a string or container exceeds the `u32` length
/// fields of the format.
pub fn to_document_bytes(value: &Value, endian: Endian) -> CodecResult<Vec<u8>> {
    let mut writer = DocumentWriter::new(endian);
    writer.header();
    writer.value(value)?;
    Ok(writer.buffer)
}

/// Decode a document, returning the value tree and the byte order the
/// file was written in.
///
/// # Errors
///
/// Returns an error if the header is malformed, a node is invalid, a
/// claimed length exceeds the decoder ceilings, or bytes remain after
/// the root value.
pub fn from_document_bytes(bytes: &[u8]) -> CodecResult<(Value, Endian)> {
    let mut reader = DocumentReader::open(bytes)?;
    let root = reader.value()?;
    if !reader.is_empty() {
        return Err(CodecError::TrailingBytes {
            remaining: reader.remaining(),
        });
    }
    Ok((root, reader.endian))
}

struct DocumentWriter {
    buffer: Vec<u8>,
    endian: Endian,
}

impl DocumentWriter {
    fn new(endian: Endian) -> Self {
        Self {
            buffer: Vec::new(),
            endian,
        }
    }

    fn header(&mut self) {
        self.buffer.extend_from_slice(&DOCUMENT_MAGIC);
        self.buffer.push(self.endian.marker());
        self.buffer
            .extend_from_slice(&self.endian.u16_bytes(DOCUMENT_VERSION));
    }

    fn value(&mut self, value: &Value) -> CodecResult<()> {
        match value {
            Value::Bool(b) => {
                self.buffer.push(TAG_BOOL);
                self.buffer.push(u8::from(*b));
            }
            Value::I32(n) => {
                self.buffer.push(TAG_I32);
                self.buffer.extend_from_slice(&self.endian.i32_bytes(*n));
            }
            Value::U32(n) => {
                self.buffer.push(TAG_U32);
                self.buffer.extend_from_slice(&self.endian.u32_bytes(*n));
            }
            Value::F32(x) => {
                self.buffer.push(TAG_F32);
                self.buffer.extend_from_slice(&self.endian.f32_bytes(*x));
            }
            Value::Str(s) => {
                self.buffer.push(TAG_STR);
                self.string(s)?;
            }
            Value::Array(items) => {
                self.buffer.push(TAG_ARRAY);
                self.count(items.len())?;
                for item in items {
                    self.value(item)?;
                }
            }
            Value::Map(entries) => {
                self.buffer.push(TAG_MAP);
                self.count(entries.len())?;
                // BTreeMap iterates in key order, which keeps the
                // encoding deterministic.
                for (key, entry) in entries {
                    self.string(key)?;
                    self.value(entry)?;
                }
            }
        }
        Ok(())
    }

    fn string(&mut self, s: &str) -> CodecResult<()> {
        let len = u32::try_from(s.len())
            .map_err(|_| CodecError::encoding_failed("string longer than u32 length field"))?;
        self.buffer.extend_from_slice(&self.endian.u32_bytes(len));
        self.buffer.extend_from_slice(s.as_bytes());
        Ok(())
    }

    fn count(&mut self, n: usize) -> CodecResult<()> {
        let count = u32::try_from(n)
            .map_err(|_| CodecError::encoding_failed("container larger than u32 count field"))?;
        self.buffer.extend_from_slice(&self.endian.u32_bytes(count));
        Ok(())
    }
}

struct DocumentReader<'a> {
    data: &'a [u8],
    pos: usize,
    endian: Endian,
}

impl<'a> DocumentReader<'a> {
    /// Validate the header and position the cursor at the root node.
    fn open(data: &'a [u8]) -> CodecResult<Self> {
        let mut reader = Self {
            data,
            pos: 0,
            endian: Endian::Little,
        };
        let found: [u8; 4] = reader.read_array()?;
        if found != DOCUMENT_MAGIC {
            return Err(CodecError::BadMagic {
                expected: DOCUMENT_MAGIC,
                found,
            });
        }
        reader.endian = Endian::from_marker(reader.read_byte()?)?;
        let version = reader.endian.u16_from(reader.read_array()?);
        if version != DOCUMENT_VERSION {
            return Err(CodecError::UnsupportedVersion {
                found: version,
                supported: DOCUMENT_VERSION,
            });
        }
        Ok(reader)
    }

    fn is_empty(&self) -> bool {
        self.pos >= self.data.len()
    }

    fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    fn value(&mut self) -> CodecResult<Value> {
        let tag = self.read_byte()?;
        match tag {
            TAG_BOOL => match self.read_byte()? {
                0 => Ok(Value::Bool(false)),
                1 => Ok(Value::Bool(true)),
                _ => Err(CodecError::invalid_structure("boolean byte must be 0 or 1")),
            },
            TAG_I32 => Ok(Value::I32(self.endian.i32_from(self.read_array()?))),
            TAG_U32 => Ok(Value::U32(self.endian.u32_from(self.read_array()?))),
            TAG_F32 => Ok(Value::F32(self.endian.f32_from(self.read_array()?))),
            TAG_STR => Ok(Value::Str(self.string()?)),
            TAG_ARRAY => {
                let len = self.count(MAX_CONTAINER_ELEMENTS)?;
                let mut items = Vec::with_capacity(len);
                for _ in 0..len {
                    items.push(self.value()?);
                }
                Ok(Value::Array(items))
            }
            TAG_MAP => {
                let len = self.count(MAX_CONTAINER_ELEMENTS)?;
                let mut entries = BTreeMap::new();
                let mut prev_key: Option<String> = None;
                for _ in 0..len {
                    let key = self.string()?;
                    // Keys must be strictly increasing: sorted output is
                    // the format's determinism guarantee, and duplicates
                    // would silently drop entries.
                    if let Some(ref prev) = prev_key {
                        if *prev >= key {
                            return Err(CodecError::invalid_structure(
                                "map keys not in strictly increasing order",
                            ));
                        }
                    }
                    let entry = self.value()?;
                    prev_key = Some(key.clone());
                    entries.insert(key, entry);
                }
                Ok(Value::Map(entries))
            }
            tag => Err(CodecError::UnknownTag { tag }),
        }
    }

    fn string(&mut self) -> CodecResult<String> {
        let len_u64 = u64::from(self.endian.u32_from(self.read_array()?));
        if len_u64 > MAX_STRING_LENGTH {
            return Err(CodecError::SizeLimitExceeded {
                claimed: len_u64,
                max_allowed: MAX_STRING_LENGTH,
            });
        }
        #[allow(clippy::cast_possible_truncation)]
        let bytes = self.read_bytes(len_u64 as usize)?;
        let text = std::str::from_utf8(bytes).map_err(|_| CodecError::InvalidUtf8)?;
        Ok(text.to_string())
    }

    fn count(&mut self, max_allowed: u64) -> CodecResult<usize> {
        let claimed = u64::from(self.endian.u32_from(self.read_array()?));
        if claimed > max_allowed {
            return Err(CodecError::SizeLimitExceeded {
                claimed,
                max_allowed,
            });
        }
        #[allow(clippy::cast_possible_truncation)]
        Ok(claimed as usize)
    }

    #[inline]
    fn read_byte(&mut self) -> CodecResult<u8> {
        if self.pos >= self.data.len() {
            return Err(CodecError::UnexpectedEof);
        }
        let byte = self.data[self.pos];
        self.pos += 1;
        Ok(byte)
    }

    #[inline]
    fn read_bytes(&mut self, len: usize) -> CodecResult<&'a [u8]> {
        if self.pos + len > self.data.len() {
            return Err(CodecError::UnexpectedEof);
        }
        let bytes = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(bytes)
    }

    #[inline]
    fn read_array<const N: usize>(&mut self) -> CodecResult<[u8; N]> {
        let bytes = self.read_bytes(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn doc(value: &Value, endian: Endian) -> Vec<u8> {
        to_document_bytes(value, endian).unwrap()
    }

    /// Header followed by raw node bytes, for hand-built decode inputs.
    fn raw_doc(endian: Endian, node: &[u8]) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&DOCUMENT_MAGIC);
        bytes.push(endian.marker());
        bytes.extend_from_slice(&endian.u16_bytes(DOCUMENT_VERSION));
        bytes.extend_from_slice(node);
        bytes
    }

    #[test]
    fn header_layout_little() {
        let bytes = doc(&Value::Bool(true), Endian::Little);
        assert_eq!(&bytes[..4], b"FDTR");
        assert_eq!(bytes[4], 0x00);
        assert_eq!(&bytes[5..7], &[0x01, 0x00]);
        assert_eq!(&bytes[7..], &[TAG_BOOL, 0x01]);
    }

    #[test]
    fn header_layout_big() {
        let bytes = doc(&Value::Bool(false), Endian::Big);
        assert_eq!(&bytes[..4], b"FDTR");
        assert_eq!(bytes[4], 0x01);
        assert_eq!(&bytes[5..7], &[0x00, 0x01]);
        assert_eq!(&bytes[7..], &[TAG_BOOL, 0x00]);
    }

    #[test]
    fn encode_i32_both_orders() {
        let bytes = doc(&Value::I32(-2), Endian::Little);
        assert_eq!(&bytes[7..], &[TAG_I32, 0xfe, 0xff, 0xff, 0xff]);

        let bytes = doc(&Value::I32(-2), Endian::Big);
        assert_eq!(&bytes[7..], &[TAG_I32, 0xff, 0xff, 0xff, 0xfe]);
    }

    #[test]
    fn encode_f32_is_bit_pattern() {
        let bytes = doc(&Value::F32(1.0), Endian::Little);
        assert_eq!(&bytes[7..], &[TAG_F32, 0x00, 0x00, 0x80, 0x3f]);
    }

    #[test]
    fn encode_string() {
        let bytes = doc(&Value::from("abc"), Endian::Little);
        assert_eq!(
            &bytes[7..],
            &[TAG_STR, 0x03, 0x00, 0x00, 0x00, b'a', b'b', b'c']
        );
    }

    #[test]
    fn encode_array() {
        let bytes = doc(
            &Value::Array(vec![Value::U32(1), Value::Bool(true)]),
            Endian::Little,
        );
        assert_eq!(
            &bytes[7..],
            &[
                TAG_ARRAY, 0x02, 0x00, 0x00, 0x00, //
                TAG_U32, 0x01, 0x00, 0x00, 0x00, //
                TAG_BOOL, 0x01,
            ]
        );
    }

    #[test]
    fn map_encoding_is_sorted_and_deterministic() {
        let forward = Value::map(vec![("a", Value::I32(1)), ("b", Value::I32(2))]);
        let reverse = Value::map(vec![("b", Value::I32(2)), ("a", Value::I32(1))]);
        assert_eq!(doc(&forward, Endian::Little), doc(&reverse, Endian::Little));

        let bytes = doc(&forward, Endian::Little);
        assert_eq!(
            &bytes[7..],
            &[
                TAG_MAP, 0x02, 0x00, 0x00, 0x00, //
                0x01, 0x00, 0x00, 0x00, b'a', TAG_I32, 0x01, 0x00, 0x00, 0x00, //
                0x01, 0x00, 0x00, 0x00, b'b', TAG_I32, 0x02, 0x00, 0x00, 0x00,
            ]
        );
    }

    #[test]
    fn roundtrip_nested_both_orders() {
        let value = Value::map(vec![
            ("DataName", Value::from("MainField_Enemy_Bokoblin")),
            ("HashValue", Value::I32(-123_456)),
            ("InitValue", Value::I32(0)),
            (
                "Position",
                Value::Array(vec![Value::F32(1.5), Value::F32(-2.25), Value::F32(0.0)]),
            ),
            ("IsSave", Value::Bool(true)),
        ]);
        for endian in [Endian::Little, Endian::Big] {
            let bytes = doc(&value, endian);
            let (decoded, detected) = from_document_bytes(&bytes).unwrap();
            assert_eq!(decoded, value);
            assert_eq!(detected, endian);
        }
    }

    #[test]
    fn reject_bad_magic() {
        let mut bytes = doc(&Value::Bool(true), Endian::Little);
        bytes[0] = b'X';
        assert!(matches!(
            from_document_bytes(&bytes),
            Err(CodecError::BadMagic { .. })
        ));
    }

    #[test]
    fn reject_unknown_endian_marker() {
        let mut bytes = doc(&Value::Bool(true), Endian::Little);
        bytes[4] = 0x07;
        assert!(matches!(
            from_document_bytes(&bytes),
            Err(CodecError::UnknownEndianMarker { found: 0x07 })
        ));
    }

    #[test]
    fn reject_unsupported_version() {
        let mut bytes = doc(&Value::Bool(true), Endian::Little);
        bytes[5] = 0x09;
        assert!(matches!(
            from_document_bytes(&bytes),
            Err(CodecError::UnsupportedVersion { found: 9, .. })
        ));
    }

    #[test]
    fn reject_unknown_tag() {
        let bytes = raw_doc(Endian::Little, &[0x7f]);
        assert!(matches!(
            from_document_bytes(&bytes),
            Err(CodecError::UnknownTag { tag: 0x7f })
        ));
    }

    #[test]
    fn reject_invalid_bool_byte() {
        let bytes = raw_doc(Endian::Little, &[TAG_BOOL, 0x02]);
        assert!(matches!(
            from_document_bytes(&bytes),
            Err(CodecError::InvalidStructure { .. })
        ));
    }

    #[test]
    fn reject_trailing_bytes() {
        let mut bytes = doc(&Value::Bool(true), Endian::Little);
        bytes.push(0x00);
        assert!(matches!(
            from_document_bytes(&bytes),
            Err(CodecError::TrailingBytes { remaining: 1 })
        ));
    }

    #[test]
    fn reject_truncated_input() {
        let bytes = doc(&Value::from("hello"), Endian::Little);
        assert!(matches!(
            from_document_bytes(&bytes[..bytes.len() - 2]),
            Err(CodecError::UnexpectedEof)
        ));
        assert!(matches!(
            from_document_bytes(&bytes[..3]),
            Err(CodecError::UnexpectedEof)
        ));
    }

    #[test]
    fn reject_unsorted_map_keys() {
        // Map {"b": bool, "a": bool} with keys out of order.
        let node = [
            TAG_MAP, 0x02, 0x00, 0x00, 0x00, //
            0x01, 0x00, 0x00, 0x00, b'b', TAG_BOOL, 0x00, //
            0x01, 0x00, 0x00, 0x00, b'a', TAG_BOOL, 0x00,
        ];
        let bytes = raw_doc(Endian::Little, &node);
        assert!(matches!(
            from_document_bytes(&bytes),
            Err(CodecError::InvalidStructure { .. })
        ));
    }

    #[test]
    fn reject_duplicate_map_keys() {
        let node = [
            TAG_MAP, 0x02, 0x00, 0x00, 0x00, //
            0x01, 0x00, 0x00, 0x00, b'a', TAG_BOOL, 0x00, //
            0x01, 0x00, 0x00, 0x00, b'a', TAG_BOOL, 0x01,
        ];
        let bytes = raw_doc(Endian::Little, &node);
        assert!(matches!(
            from_document_bytes(&bytes),
            Err(CodecError::InvalidStructure { .. })
        ));
    }

    #[test]
    fn reject_oversize_container_claim() {
        let claim = Endian::Little.u32_bytes(u32::MAX);
        let node = [&[TAG_ARRAY], claim.as_slice()].concat();
        let bytes = raw_doc(Endian::Little, &node);
        assert!(matches!(
            from_document_bytes(&bytes),
            Err(CodecError::SizeLimitExceeded { .. })
        ));
    }

    #[test]
    fn reject_invalid_utf8() {
        let node = [TAG_STR, 0x02, 0x00, 0x00, 0x00, 0xff, 0xfe];
        let bytes = raw_doc(Endian::Little, &node);
        assert!(matches!(
            from_document_bytes(&bytes),
            Err(CodecError::InvalidUtf8)
        ));
    }

    fn value_strategy() -> impl Strategy<Value = Value> {
        let leaf = prop_oneof![
            any::<bool>().prop_map(Value::Bool),
            any::<i32>().prop_map(Value::I32),
            any::<u32>().prop_map(Value::U32),
            any::<f32>().prop_map(Value::F32),
            prop::string::string_regex("[a-zA-Z0-9_]{0,16}")
                .expect("Invalid regex")
                .prop_map(Value::Str),
        ];
        leaf.prop_recursive(3, 24, 4, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
                prop::collection::btree_map(
                    prop::string::string_regex("[a-z]{1,8}").expect("Invalid regex"),
                    inner,
                    0..4
                )
                .prop_map(Value::Map),
            ]
        })
    }

    proptest! {
        // Compares re-encoded bytes rather than decoded values so that
        // NaN payloads (bit-preserved, but not PartialEq) are covered.
        #[test]
        fn reencoding_is_stable(value in value_strategy(), big in any::<bool>()) {
            let endian = if big { Endian::Big } else { Endian::Little };
            let bytes = to_document_bytes(&value, endian).unwrap();
            let (decoded, detected) = from_document_bytes(&bytes).unwrap();
            prop_assert_eq!(detected, endian);
            let again = to_document_bytes(&decoded, endian).unwrap();
            prop_assert_eq!(bytes, again);
        }
    }
}
