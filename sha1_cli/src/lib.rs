//! SHA-1 command line support library
//!
//! Exposes the pieces of the `sha1` binary that are worth testing on their
//! own: checksum list handling, layered configuration and output formatting.

pub mod checksum;
pub mod config;
pub mod output;
pub mod terminal;
