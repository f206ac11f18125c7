//! Test utilities for the SHA-1 digest engine
//!
//! This crate provides published known-answer vectors, padding-boundary
//! vectors, and builders for temporary input files.

pub mod builders;
pub mod vectors;

// Re-export commonly used types
pub use builders::{TestFileBuilder, deterministic_bytes};
pub use vectors::{KnownVector, boundary_vectors, published_vectors};
