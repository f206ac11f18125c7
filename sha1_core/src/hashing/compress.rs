//! SHA-1 block compression (FIPS 180-4, section 6.1.2)

/// Size of one compression block in bytes
pub const BLOCK_LEN: usize = 64;

/// Initial hash value H(0)
pub(crate) const INITIAL_STATE: [u32; 5] = [
    0x6745_2301,
    0xEFCD_AB89,
    0x98BA_DCFE,
    0x1032_5476,
    0xC3D2_E1F0,
];

/// Round constants K, one per group of twenty rounds
const ROUND_CONSTANTS: [u32; 4] = [0x5A82_7999, 0x6ED9_EBA1, 0x8F1B_BCDC, 0xCA62_C1D6];

/// Expand one block into the eighty-word message schedule
fn schedule(block: &[u8]) -> [u32; 80] {
    let mut w = [0u32; 80];

    for (word, bytes) in w.iter_mut().zip(block.chunks_exact(4)) {
        *word = u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
    }

    for t in 16..80 {
        w[t] = (w[t - 3] ^ w[t - 8] ^ w[t - 14] ^ w[t - 16]).rotate_left(1);
    }

    w
}

/// Nonlinear round function and constant for round `t`
#[inline(always)]
fn round_function(t: usize, b: u32, c: u32, d: u32) -> (u32, u32) {
    match t {
        // Ch
        0..=19 => ((b & c) | (!b & d), ROUND_CONSTANTS[0]),
        // Parity
        20..=39 => (b ^ c ^ d, ROUND_CONSTANTS[1]),
        // Maj
        40..=59 => ((b & c) | (b & d) | (c & d), ROUND_CONSTANTS[2]),
        _ => (b ^ c ^ d, ROUND_CONSTANTS[3]),
    }
}

/// Fold one 64-byte block into the running hash state.
///
/// All additions are modulo 2^32.
pub(crate) fn compress(state: &mut [u32; 5], block: &[u8]) {
    debug_assert_eq!(block.len(), BLOCK_LEN);

    let w = schedule(block);
    let [mut a, mut b, mut c, mut d, mut e] = *state;

    for (t, word) in w.iter().enumerate() {
        let (f, k) = round_function(t, b, c, d);
        let temp = a
            .rotate_left(5)
            .wrapping_add(f)
            .wrapping_add(e)
            .wrapping_add(*word)
            .wrapping_add(k);
        e = d;
        d = c;
        c = b.rotate_left(30);
        b = a;
        a = temp;
    }

    state[0] = state[0].wrapping_add(a);
    state[1] = state[1].wrapping_add(b);
    state[2] = state[2].wrapping_add(c);
    state[3] = state[3].wrapping_add(d);
    state[4] = state[4].wrapping_add(e);
}
