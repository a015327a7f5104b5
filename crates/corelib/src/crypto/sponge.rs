//! Keccak sponge with pre-SHA-3 multi-rate padding (domain byte 0x01).
//!
//! The output length selects the rate: a request for the whole 200-byte
//! state uses [`HASH_DATA_AREA`], anything else uses `200 - 2 * output_len`.
//! Lengths that cannot be served are caller bugs and abort through
//! [`abort_misuse`](crate::errors::abort_misuse).

use crate::crypto::keccak::{keccakf, State, KECCAK_ROUNDS, STATE_BYTES, STATE_WORDS};
use crate::errors::{abort_misuse, SpongeError};

/// Rate used when the caller asks for the full untruncated state.
pub const HASH_DATA_AREA: usize = 136;

/// Size of the final-block scratch buffer.
pub const BLOCK_BUFFER_LEN: usize = 144;

/// Largest truncated output; anything above must be exactly [`STATE_BYTES`].
pub const MAX_TRUNCATED_LEN: usize = 100;

const PAD_DOMAIN: u8 = 0x01;
const PAD_LAST: u8 = 0x80;

const _: () = assert!(HASH_DATA_AREA <= BLOCK_BUFFER_LEN);

/// Validate `output_len` and return the sponge rate in bytes.
pub fn rate_for(output_len: usize) -> Result<usize, SpongeError> {
    if output_len == 0 {
        return Err(SpongeError::ZeroLength);
    }
    if output_len > MAX_TRUNCATED_LEN && output_len != STATE_BYTES {
        return Err(SpongeError::Oversized(output_len));
    }
    if output_len % 8 != 0 {
        return Err(SpongeError::Misaligned(output_len));
    }
    let rate = if output_len == STATE_BYTES {
        HASH_DATA_AREA
    } else {
        STATE_BYTES - 2 * output_len
    };
    // The padded block plus its domain byte must fit the scratch buffer.
    if rate == 0 || rate + 1 >= BLOCK_BUFFER_LEN {
        return Err(SpongeError::RateOutOfBounds { output_len, rate });
    }
    Ok(rate)
}

fn xor_block(state: &mut State, block: &[u8]) {
    for (lane, chunk) in state.iter_mut().zip(block.chunks_exact(8)) {
        let mut word = [0u8; 8];
        word.copy_from_slice(chunk);
        *lane ^= u64::from_le_bytes(word);
    }
}

/// Incremental sponge. The state lives inside the value and is dropped with
/// it; nothing is shared between hash computations.
#[derive(Clone)]
pub struct Sponge {
    state: State,
    block: [u8; BLOCK_BUFFER_LEN],
    filled: usize,
    rate: usize,
    output_len: usize,
}

impl Sponge {
    /// Start a computation producing `output_len` bytes. Aborts on an
    /// unsupported length.
    pub fn new(output_len: usize) -> Self {
        Self::try_new(output_len).unwrap_or_else(|err| abort_misuse(err))
    }

    pub fn try_new(output_len: usize) -> Result<Self, SpongeError> {
        let rate = rate_for(output_len)?;
        Ok(Self {
            state: [0u64; STATE_WORDS],
            block: [0u8; BLOCK_BUFFER_LEN],
            filled: 0,
            rate,
            output_len,
        })
    }

    pub fn rate(&self) -> usize {
        self.rate
    }

    pub fn output_len(&self) -> usize {
        self.output_len
    }

    pub fn update(&mut self, mut data: &[u8]) {
        if self.filled > 0 {
            let take = (self.rate - self.filled).min(data.len());
            self.block[self.filled..self.filled + take].copy_from_slice(&data[..take]);
            self.filled += take;
            data = &data[take..];
            if self.filled < self.rate {
                return;
            }
            xor_block(&mut self.state, &self.block[..self.rate]);
            keccakf(&mut self.state, KECCAK_ROUNDS);
            self.filled = 0;
        }

        let mut blocks = data.chunks_exact(self.rate);
        for block in &mut blocks {
            xor_block(&mut self.state, block);
            keccakf(&mut self.state, KECCAK_ROUNDS);
        }
        let tail = blocks.remainder();
        self.block[..tail.len()].copy_from_slice(tail);
        self.filled = tail.len();
    }

    /// Pad, permute once more and write the leading `output_len` bytes of
    /// the state into `out`, which must be exactly `output_len` long.
    pub fn finalize_into(mut self, out: &mut [u8]) {
        if out.len() != self.output_len {
            abort_misuse(format_args!(
                "output buffer of {} bytes for a {}-byte sponge",
                out.len(),
                self.output_len
            ));
        }

        let remaining = self.filled;
        if remaining + 1 >= BLOCK_BUFFER_LEN || remaining >= self.rate {
            abort_misuse(SpongeError::PaddingOverflow {
                remaining,
                rate: self.rate,
            });
        }
        self.block[remaining] = PAD_DOMAIN;
        self.block[remaining + 1..self.rate].fill(0);
        self.block[self.rate - 1] |= PAD_LAST;

        xor_block(&mut self.state, &self.block[..self.rate]);
        keccakf(&mut self.state, KECCAK_ROUNDS);

        for (chunk, lane) in out.chunks_exact_mut(8).zip(self.state.iter()) {
            chunk.copy_from_slice(&lane.to_le_bytes());
        }
    }

    pub fn finalize(self) -> Vec<u8> {
        let mut out = vec![0u8; self.output_len];
        self.finalize_into(&mut out);
        out
    }
}

impl std::fmt::Debug for Sponge {
    // Omits the state.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sponge")
            .field("rate", &self.rate)
            .field("output_len", &self.output_len)
            .field("filled", &self.filled)
            .finish_non_exhaustive()
    }
}

/// Hash `input` to `output_len` bytes.
pub fn keccak(input: &[u8], output_len: usize) -> Vec<u8> {
    let mut sponge = Sponge::new(output_len);
    sponge.update(input);
    sponge.finalize()
}

/// Hash `input` into `out`; the output length is `out.len()`.
pub fn keccak_into(input: &[u8], out: &mut [u8]) {
    let mut sponge = Sponge::new(out.len());
    sponge.update(input);
    sponge.finalize_into(out);
}

/// 32-byte digest (rate 136).
pub fn keccak256(input: &[u8]) -> [u8; 32] {
    let mut out = [0u8; 32];
    keccak_into(input, &mut out);
    out
}

/// Keccak-256 hasher for callers that feed input in pieces.
#[derive(Debug, Clone)]
pub struct Keccak256 {
    inner: Sponge,
}

impl Default for Keccak256 {
    fn default() -> Self {
        Self::new()
    }
}

impl Keccak256 {
    pub fn new() -> Self {
        Self {
            inner: Sponge::new(32),
        }
    }

    pub fn update(&mut self, data: &[u8]) {
        self.inner.update(data);
    }

    pub fn finalize(self) -> [u8; 32] {
        let mut out = [0u8; 32];
        self.inner.finalize_into(&mut out);
        out
    }
}

/// Domain-separated hashing: H(label || data).
pub fn keccak256_labeled(label: &str, data: &[u8]) -> [u8; 32] {
    let mut h = Keccak256::new();
    h.update(label.as_bytes());
    h.update(data);
    h.finalize()
}
