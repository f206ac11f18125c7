//! Verify the SHA-1 engine against published test vectors

use sha1_core::{DIGEST_LEN, Digest, HashCalculator, Sha1, digest};
use sha1_test_utils::vectors::MILLION_A_HEX;
use sha1_test_utils::{boundary_vectors, published_vectors};

#[test]
fn verify_published_vectors() {
    for vector in published_vectors() {
        assert_eq!(
            digest(&vector.input).to_hex(),
            vector.hex,
            "digest mismatch for {}",
            vector.name
        );
    }
}

#[test]
fn verify_padding_boundary_vectors() {
    for vector in boundary_vectors() {
        assert_eq!(
            digest(&vector.input).to_hex(),
            vector.hex,
            "digest mismatch for {} ({} bytes)",
            vector.name,
            vector.input.len()
        );
    }
}

#[test]
fn verify_boundary_vectors_incrementally() {
    for vector in boundary_vectors() {
        let mut engine = Sha1::new();
        for chunk in vector.input.chunks(7) {
            engine.update(chunk).unwrap();
        }
        assert_eq!(engine.finalize().to_hex(), vector.hex, "{}", vector.name);
    }
}

#[test]
fn verify_million_a() {
    let mut engine = Sha1::new();
    let chunk = [b'a'; 1000];
    for _ in 0..1000 {
        engine.update(&chunk).unwrap();
    }

    assert_eq!(engine.total_len(), 1_000_000);
    assert_eq!(engine.finalize().to_hex(), MILLION_A_HEX);
    assert_eq!(digest(&vec![b'a'; 1_000_000]).to_hex(), MILLION_A_HEX);
}

#[test]
fn verify_calculator_agrees_with_vectors() {
    let calculator = HashCalculator::new();

    for vector in published_vectors() {
        let result = calculator.calculate_bytes(&vector.input).unwrap();
        let expected: Digest = vector.hex.parse().unwrap();

        assert_eq!(result.digest, expected, "{}", vector.name);
        assert_eq!(result.input_size, vector.input.len() as u64);
    }
}

#[test]
fn verify_digest_length() {
    for len in [0, 1, 55, 56, 64, 1000] {
        assert_eq!(digest(&vec![0u8; len]).as_bytes().len(), DIGEST_LEN);
    }
}
