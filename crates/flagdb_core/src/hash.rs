//! Flag name hashing.
//!
//! Every flag is identified by the CRC-32 of its name, reinterpreted as a
//! signed 32-bit integer. The signed form is what the game's data files
//! store, so all lookups, sorting, and change accounting use it as well.

/// Hashes a flag name to its signed 32-bit identity.
///
/// The hash is the standard CRC-32 (IEEE polynomial) of the UTF-8 bytes of
/// `name`, with the bit pattern reinterpreted as an `i32`. Names whose CRC-32
/// exceeds `i32::MAX` therefore hash to negative values.
#[must_use]
#[allow(clippy::cast_possible_wrap)]
pub fn hash_name(name: &str) -> i32 {
    crc32fast::hash(name.as_bytes()) as i32
}
