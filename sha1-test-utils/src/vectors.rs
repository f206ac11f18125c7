//! Known-answer vectors for SHA-1

/// An input with its published SHA-1 digest
#[derive(Debug, Clone)]
pub struct KnownVector {
    pub name: String,
    pub input: Vec<u8>,
    pub hex: &'static str,
}

impl KnownVector {
    fn new(name: &str, input: impl Into<Vec<u8>>, hex: &'static str) -> Self {
        Self {
            name: name.to_string(),
            input: input.into(),
            hex,
        }
    }
}

/// Digest of one million repetitions of `a` (FIPS 180 long message)
pub const MILLION_A_HEX: &str = "34aa973cd4c4daa4f61eeb2bdbad27316534016f";

/// Published FIPS 180 and common reference vectors
pub fn published_vectors() -> Vec<KnownVector> {
    vec![
        KnownVector::new("empty", "", "da39a3ee5e6b4b0d3255bfef95601890afd80709"),
        KnownVector::new("abc", "abc", "a9993e364706816aba3e25717850c26c9cd0d89d"),
        KnownVector::new(
            "fips-448-bit",
            "abcdbcdecdefdefgefghfghighijhijkijkljklmklmnlmnomnopnopq",
            "84983e441c3bd26ebaae4aa1f95129e5e54670f1",
        ),
        KnownVector::new(
            "fips-896-bit",
            "abcdefghbcdefghicdefghijdefghijkefghijklfghijklmghijklmnhijklmnoijklmnopjklmnopqklmnopqrlmnopqrsmnopqrstnopqrstu",
            "a49b2446a02c645bf419f995b67091253a04a259",
        ),
        KnownVector::new(
            "quick-brown-fox",
            "The quick brown fox jumps over the lazy dog",
            "2fd4e1c67a2d28fced849ee1bb76e7391b93eb12",
        ),
        KnownVector::new(
            "quick-brown-cog",
            "The quick brown fox jumps over the lazy cog",
            "de9f2c7fd25e1b3afad3e85a0bd17d9b100db4b3",
        ),
        KnownVector::new(
            "all-byte-values",
            (0..=255u8).collect::<Vec<_>>(),
            "4916d6bdb7f78e6803698cab32d1586ea457dfc8",
        ),
    ]
}

/// Runs of `a` whose lengths straddle the padding boundaries (55/56 bytes
/// leave room for the length field or not, 64 and 119/120 cross block edges)
pub fn boundary_vectors() -> Vec<KnownVector> {
    [
        (55, "c1c8bbdc22796e28c0e15163d20899b65621d65a"),
        (56, "c2db330f6083854c99d4b5bfb6e8f29f201be699"),
        (57, "f08f24908d682555111be7ff6f004e78283d989a"),
        (63, "03f09f5b158a7a8cdad920bddc29b81c18a551f5"),
        (64, "0098ba824b5c16427bd7a1122a5a442a25ec644d"),
        (65, "11655326c708d70319be2610e8a57d9a5b959d3b"),
        (119, "ee971065aaa017e0632a8ca6c77bb3bf8b1dfc56"),
        (120, "f34c1488385346a55709ba056ddd08280dd4c6d6"),
        (128, "ad5b3fdbcb526778c2839d2f151ea753995e26a0"),
    ]
    .into_iter()
    .map(|(len, hex)| KnownVector::new(&format!("a-x{len}"), vec![b'a'; len], hex))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vectors_are_well_formed() {
        for vector in published_vectors().iter().chain(boundary_vectors().iter()) {
            assert_eq!(vector.hex.len(), 40, "{}", vector.name);
            assert!(vector.hex.chars().all(|c| c.is_ascii_hexdigit()));
        }
    }

    #[test]
    fn test_boundary_lengths() {
        let lengths: Vec<usize> = boundary_vectors().iter().map(|v| v.input.len()).collect();
        assert_eq!(lengths, vec![55, 56, 57, 63, 64, 65, 119, 120, 128]);
    }
}
