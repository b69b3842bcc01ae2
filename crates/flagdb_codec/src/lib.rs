//! # flagdb Codec
//!
//! Binary document and archive encoding for flagdb.
//!
//! This crate provides the two container formats the flag pipeline
//! reads and writes:
//! - documents: typed value trees with a self-describing header
//! - archives: named byte members with a sorted directory
//!
//! Both formats carry a byte-order marker so the same tooling serves
//! the little-endian and big-endian console targets, and both encode
//! deterministically: identical inputs produce identical bytes.
//!
//! ## Usage
//!
//! ```
//! use flagdb_codec::{from_document_bytes, to_document_bytes, Endian, Value};
//!
//! // Encode a value
//! let value = Value::map(vec![("InitValue", Value::I32(1))]);
//! let bytes = to_document_bytes(&value, Endian::Little).unwrap();
//!
//! // Decode back, recovering the byte order
//! let (decoded, endian) = from_document_bytes(&bytes).unwrap();
//! assert_eq!(decoded, value);
//! assert_eq!(endian, Endian::Little);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod archive;
mod document;
mod endian;
mod error;
mod value;

pub use archive::{Archive, ArchiveWriter, ARCHIVE_MAGIC, ARCHIVE_VERSION};
pub use document::{from_document_bytes, to_document_bytes, DOCUMENT_MAGIC, DOCUMENT_VERSION};
pub use endian::Endian;
pub use error::{CodecError, CodecResult};
pub use value::Value;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_inside_archive_roundtrip() {
        let record = Value::map(vec![
            ("DataName", Value::from("Open_Dungeon000")),
            ("HashValue", Value::I32(1234)),
        ]);
        let member = to_document_bytes(&record, Endian::Big).unwrap();

        let mut writer = ArchiveWriter::new(Endian::Big);
        writer.insert("GameData/gamedata.sarc", member.clone());
        let archive = Archive::from_bytes(&writer.to_bytes().unwrap()).unwrap();

        let stored = archive.get("GameData/gamedata.sarc").unwrap();
        assert_eq!(stored, member.as_slice());
        let (decoded, endian) = from_document_bytes(stored).unwrap();
        assert_eq!(decoded, record);
        assert_eq!(endian, Endian::Big);
    }

    #[test]
    fn formats_have_distinct_magics() {
        assert_ne!(DOCUMENT_MAGIC, ARCHIVE_MAGIC);
    }
}
