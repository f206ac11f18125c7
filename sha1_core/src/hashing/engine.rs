//! Incremental SHA-1 engine

use super::compress::{BLOCK_LEN, INITIAL_STATE, compress};
use super::output::{DIGEST_LEN, Digest};
use crate::Result;
use crate::error::DigestError;
use crate::error::digest::MAX_INPUT_LEN;
use std::io;

/// Offset within the final block where the 64-bit length field starts
const LENGTH_OFFSET: usize = BLOCK_LEN - 8;

/// Running SHA-1 state.
///
/// Feed input with [`Sha1::update`] any number of times, then call
/// [`Sha1::finalize`], which consumes the state. Fewer than 64 bytes are ever
/// held back between calls; every completed block is compressed immediately.
#[derive(Clone)]
pub struct Sha1 {
    state: [u32; 5],
    buffer: [u8; BLOCK_LEN],
    buffer_len: usize,
    total_len: u64,
}

impl Sha1 {
    /// Fresh state with the standard initial hash value
    pub const fn new() -> Self {
        Self {
            state: INITIAL_STATE,
            buffer: [0u8; BLOCK_LEN],
            buffer_len: 0,
            total_len: 0,
        }
    }

    /// Bytes absorbed so far
    pub fn total_len(&self) -> u64 {
        self.total_len
    }

    /// Append `data` to the message.
    ///
    /// Fails with [`DigestError::LengthOverflow`] when the total message
    /// length would no longer fit the 64-bit bit-length field. A failed call
    /// leaves the state unchanged.
    pub fn update(&mut self, data: &[u8]) -> Result<()> {
        let attempted = data.len() as u64;
        match self.total_len.checked_add(attempted) {
            Some(total) if total <= MAX_INPUT_LEN => {}
            _ => return Err(DigestError::length_overflow(self.total_len, attempted).into()),
        }

        self.absorb(data);
        Ok(())
    }

    /// Buffer and compress `data` without checking the length limit
    fn absorb(&mut self, mut data: &[u8]) {
        self.total_len = self.total_len.wrapping_add(data.len() as u64);

        if self.buffer_len > 0 {
            let take = (BLOCK_LEN - self.buffer_len).min(data.len());
            self.buffer[self.buffer_len..self.buffer_len + take].copy_from_slice(&data[..take]);
            self.buffer_len += take;
            data = &data[take..];

            if self.buffer_len < BLOCK_LEN {
                return;
            }
            compress(&mut self.state, &self.buffer);
            self.buffer_len = 0;
        }

        let mut blocks = data.chunks_exact(BLOCK_LEN);
        for block in &mut blocks {
            compress(&mut self.state, block);
        }

        let rest = blocks.remainder();
        self.buffer[..rest.len()].copy_from_slice(rest);
        self.buffer_len = rest.len();
    }

    /// Pad the message, compress the final block(s) and return the digest.
    pub fn finalize(mut self) -> Digest {
        let bit_len = self.total_len.wrapping_mul(8);

        self.buffer[self.buffer_len] = 0x80;
        self.buffer_len += 1;

        // No room left for the length field: pad out this block and start another
        if self.buffer_len > LENGTH_OFFSET {
            self.buffer[self.buffer_len..].fill(0);
            compress(&mut self.state, &self.buffer);
            self.buffer_len = 0;
        }

        self.buffer[self.buffer_len..LENGTH_OFFSET].fill(0);
        self.buffer[LENGTH_OFFSET..].copy_from_slice(&bit_len.to_be_bytes());
        compress(&mut self.state, &self.buffer);

        let mut out = [0u8; DIGEST_LEN];
        for (chunk, word) in out.chunks_exact_mut(4).zip(self.state) {
            chunk.copy_from_slice(&word.to_be_bytes());
        }
        Digest::from_bytes(out)
    }
}

impl Default for Sha1 {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Sha1 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sha1")
            .field("total_len", &self.total_len)
            .field("buffered", &self.buffer_len)
            .finish_non_exhaustive()
    }
}

impl io::Write for Sha1 {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.update(buf)
            .map_err(|err| io::Error::new(io::ErrorKind::InvalidInput, err))?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// One-shot SHA-1 of `data`
pub fn digest(data: &[u8]) -> Digest {
    let mut engine = Sha1::new();
    // A single in-memory slice is far below the 2^61 byte limit
    engine.absorb(data);
    engine.finalize()
}
