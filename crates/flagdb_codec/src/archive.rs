//! Named-member archive format.
//!
//! An archive maps member names to opaque byte blobs behind the same
//! self-describing header the document format uses. The directory is
//! written in name order, so rebuilding an archive with the same
//! members always yields the same bytes.
//!
//! [`ArchiveWriter::from_archive`] starts from an existing archive so
//! a caller can replace a few members while every untouched member is
//! carried over byte for byte.

use crate::endian::Endian;
use crate::error::{CodecError, CodecResult};
use std::collections::BTreeMap;

/// Magic bytes opening every archive.
pub const ARCHIVE_MAGIC: [u8; 4] = *b"FARC";

/// Archive format version this build reads and writes.
pub const ARCHIVE_VERSION: u16 = 1;

/// Maximum member count the decoder accepts.
const MAX_MEMBERS: u64 = 1024 * 1024;

/// Maximum member name length in bytes.
const MAX_MEMBER_NAME: usize = 4096;

/// A decoded archive: named byte members plus the byte order the file
/// was written in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Archive {
    endian: Endian,
    members: BTreeMap<String, Vec<u8>>,
}

impl Archive {
    /// Decode an archive from bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the header is malformed, the directory is
    /// unsorted, or a member record points outside the input.
    pub fn from_bytes(bytes: &[u8]) -> CodecResult<Self> {
        let mut cursor = Cursor { data: bytes, pos: 0 };

        let found: [u8; 4] = cursor.read_array()?;
        if found != ARCHIVE_MAGIC {
            return Err(CodecError::BadMagic {
                expected: ARCHIVE_MAGIC,
                found,
            });
        }
        let endian = Endian::from_marker(cursor.read_byte()?)?;
        let version = endian.u16_from(cursor.read_array()?);
        if version != ARCHIVE_VERSION {
            return Err(CodecError::UnsupportedVersion {
                found: version,
                supported: ARCHIVE_VERSION,
            });
        }

        let count = u64::from(endian.u32_from(cursor.read_array()?));
        if count > MAX_MEMBERS {
            return Err(CodecError::SizeLimitExceeded {
                claimed: count,
                max_allowed: MAX_MEMBERS,
            });
        }

        let mut members = BTreeMap::new();
        let mut prev_name: Option<String> = None;
        for _ in 0..count {
            let name_len = usize::from(endian.u16_from(cursor.read_array()?));
            let name_bytes = cursor.read_bytes(name_len)?;
            let name = std::str::from_utf8(name_bytes)
                .map_err(|_| CodecError::InvalidUtf8)?
                .to_string();
            if let Some(ref prev) = prev_name {
                if *prev >= name {
                    return Err(CodecError::invalid_structure(
                        "archive directory not in strictly increasing name order",
                    ));
                }
            }

            let offset = u64::from(endian.u32_from(cursor.read_array()?));
            let len = u64::from(endian.u32_from(cursor.read_array()?));
            let end = offset + len;
            if end > bytes.len() as u64 {
                return Err(CodecError::invalid_structure(format!(
                    "member '{name}' extends past end of archive"
                )));
            }
            #[allow(clippy::cast_possible_truncation)]
            let data = bytes[offset as usize..end as usize].to_vec();
            prev_name = Some(name.clone());
            members.insert(name, data);
        }

        Ok(Self { endian, members })
    }

    /// Byte order the archive was written in.
    #[must_use]
    pub fn endian(&self) -> Endian {
        self.endian
    }

    /// Get a member's bytes by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&[u8]> {
        self.members.get(name).map(Vec::as_slice)
    }

    /// Whether a member with this name exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.members.contains_key(name)
    }

    /// Member names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.members.keys().map(String::as_str)
    }

    /// Number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the archive has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Builder for archives.
#[derive(Debug, Clone)]
pub struct ArchiveWriter {
    endian: Endian,
    members: BTreeMap<String, Vec<u8>>,
}

impl ArchiveWriter {
    /// Create an empty writer for the given byte order.
    #[must_use]
    pub fn new(endian: Endian) -> Self {
        Self {
            endian,
            members: BTreeMap::new(),
        }
    }

    /// Create a writer pre-populated with every member of an existing
    /// archive, in the same byte order.
    #[must_use]
    pub fn from_archive(archive: &Archive) -> Self {
        Self {
            endian: archive.endian,
            members: archive.members.clone(),
        }
    }

    /// Insert or replace a member.
    pub fn insert(&mut self, name: impl Into<String>, data: Vec<u8>) {
        self.members.insert(name.into(), data);
    }

    /// Remove a member, returning its bytes if it was present.
    pub fn remove(&mut self, name: &str) -> Option<Vec<u8>> {
        self.members.remove(name)
    }

    /// Whether a member with this name exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.members.contains_key(name)
    }

    /// Encode the archive.
    ///
    /// # Errors
    ///
    /// Returns an error if a member name or blob exceeds the format's
    /// length fields.
    pub fn to_bytes(&self) -> CodecResult<Vec<u8>> {
        let mut directory_len = 0u64;
        for name in self.members.keys() {
            if name.len() > MAX_MEMBER_NAME {
                return Err(CodecError::encoding_failed(format!(
                    "member name '{name}' too long"
                )));
            }
            directory_len += 2 + name.len() as u64 + 8;
        }

        let header_len = 4 + 1 + 2 + 4;
        let mut offset = header_len + directory_len;

        let mut bytes = Vec::new();
        bytes.extend_from_slice(&ARCHIVE_MAGIC);
        bytes.push(self.endian.marker());
        bytes.extend_from_slice(&self.endian.u16_bytes(ARCHIVE_VERSION));
        let count = u32::try_from(self.members.len())
            .map_err(|_| CodecError::encoding_failed("too many members for u32 count field"))?;
        bytes.extend_from_slice(&self.endian.u32_bytes(count));

        for (name, data) in &self.members {
            #[allow(clippy::cast_possible_truncation)]
            bytes.extend_from_slice(&self.endian.u16_bytes(name.len() as u16));
            bytes.extend_from_slice(name.as_bytes());
            let offset_field = u32::try_from(offset)
                .map_err(|_| CodecError::encoding_failed("archive exceeds u32 offset field"))?;
            let len_field = u32::try_from(data.len())
                .map_err(|_| CodecError::encoding_failed("member exceeds u32 length field"))?;
            bytes.extend_from_slice(&self.endian.u32_bytes(offset_field));
            bytes.extend_from_slice(&self.endian.u32_bytes(len_field));
            offset += data.len() as u64;
        }

        for data in self.members.values() {
            bytes.extend_from_slice(data);
        }

        Ok(bytes)
    }
}

struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
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
