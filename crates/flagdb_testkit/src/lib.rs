//! # flagdb Testkit
//!
//! Test utilities for flagdb.
//!
//! This crate provides:
//! - Disposable mod directories laid out the way the tools expect
//! - Flag and store builders for common scenarios
//! - Property-based test generators using proptest
//! - Pinned identity vectors for the flag name hash
//!
//! ## Usage
//!
//! ```rust,ignore
//! use flagdb_testkit::prelude::*;
//!
//! #[test]
//! fn test_with_mod_directory() {
//!     let mod_dir = TestMod::new();
//!     mod_dir.write_bootup(&sample_store());
//!     // ... run the tools against mod_dir.path()
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;
pub mod vectors;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::generators::*;
    pub use crate::vectors::*;
}

pub use fixtures::*;
pub use generators::*;
pub use vectors::*;
