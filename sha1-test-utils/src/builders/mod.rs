//! Builders for hashing inputs

mod files;

pub use files::TestFileBuilder;

/// Deterministic pseudo-random bytes for a given seed
pub fn deterministic_bytes(size: usize, seed: u64) -> Vec<u8> {
    let mut state = seed ^ 0x9E37_79B9_7F4A_7C15;
    let mut content = Vec::with_capacity(size);

    for _ in 0..size {
        state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        content.push((state >> 56) as u8);
    }

    content
}
