//! CLI command implementations.

pub mod find;
pub mod generate;
