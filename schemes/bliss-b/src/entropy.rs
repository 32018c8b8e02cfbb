//! Deterministic entropy source.
//!
//! Randomness is SHA3-512 applied to a 512-bit counter seed. The seed is
//! treated as a little-endian integer and incremented after every digest.
//! Three pools (bytes, u16, u64) are each refilled with ten digests when
//! exhausted, and a 64-bit bit pool is drawn from the u64 pool. Output is a
//! pure function of the seed and the sequence of draws, which makes every
//! run reproducible.
//!
//! This is test infrastructure: the harness seed is a fixed public pattern.

use rand::RngCore;
use sha3::{Digest, Sha3_512};
use zeroize::Zeroize;

use crate::error::{BlissError, Result};
use crate::params::SEED_LEN;

/// Digests computed per pool refill.
const POOL_HASH_COUNT: usize = 10;

const DIGEST_LEN: usize = 64;
const CHAR_POOL_SIZE: usize = DIGEST_LEN * POOL_HASH_COUNT;
const U16_POOL_SIZE: usize = DIGEST_LEN / 2 * POOL_HASH_COUNT;
const U64_POOL_SIZE: usize = DIGEST_LEN / 8 * POOL_HASH_COUNT;

/// Returns the fixed harness seed, `seed[i] = i mod 8`.
pub fn deterministic_seed() -> [u8; SEED_LEN] {
    let mut seed = [0u8; SEED_LEN];
    for (i, b) in seed.iter_mut().enumerate() {
        *b = (i % 8) as u8;
    }
    seed
}

/// SHA3-512 counter-mode entropy pools.
pub struct Entropy {
    seed: [u8; SEED_LEN],
    char_pool: [u8; CHAR_POOL_SIZE],
    u16_pool: [u16; U16_POOL_SIZE],
    u64_pool: [u64; U64_POOL_SIZE],
    bit_pool: u64,
    char_pos: usize,
    u16_pos: usize,
    u64_pos: usize,
    bit_pos: u32,
}

impl Drop for Entropy {
    fn drop(&mut self) {
        self.seed.zeroize();
        self.char_pool.zeroize();
        self.u16_pool.zeroize();
        self.u64_pool.zeroize();
        self.bit_pool.zeroize();
    }
}

impl Entropy {
    /// Creates an entropy source from at least [`SEED_LEN`] bytes of seed.
    ///
    /// Only the first [`SEED_LEN`] bytes are used. The pools are filled
    /// in the order bytes, u16, u64, bits.
    pub fn new(seed: &[u8]) -> Result<Self> {
        if seed.len() < SEED_LEN {
            return Err(BlissError::InvalidInput {
                field: "seed",
                reason: "need at least 64 bytes",
            });
        }
        let mut s = [0u8; SEED_LEN];
        s.copy_from_slice(&seed[..SEED_LEN]);
        Ok(Self::from_seed_array(s))
    }

    /// Creates the entropy source the harness uses.
    pub fn deterministic() -> Self {
        Self::from_seed_array(deterministic_seed())
    }

    fn from_seed_array(seed: [u8; SEED_LEN]) -> Self {
        let mut entropy = Entropy {
            seed,
            char_pool: [0u8; CHAR_POOL_SIZE],
            u16_pool: [0u16; U16_POOL_SIZE],
            u64_pool: [0u64; U64_POOL_SIZE],
            bit_pool: 0,
            char_pos: 0,
            u16_pos: 0,
            u64_pos: 0,
            bit_pos: 0,
        };
        entropy.refresh_char_pool();
        entropy.refresh_u16_pool();
        entropy.refresh_u64_pool();
        entropy.refresh_bit_pool();
        entropy
    }

    fn increment_seed(&mut self) {
        for b in self.seed.iter_mut() {
            *b = b.wrapping_add(1);
            if *b != 0 {
                break;
            }
        }
    }

    /// Next digest of the counter; advances the seed.
    fn next_digest(&mut self) -> [u8; DIGEST_LEN] {
        let mut digest = [0u8; DIGEST_LEN];
        digest.copy_from_slice(&Sha3_512::digest(self.seed));
        self.increment_seed();
        digest
    }

    fn refresh_char_pool(&mut self) {
        for i in 0..POOL_HASH_COUNT {
            let digest = self.next_digest();
            self.char_pool[i * DIGEST_LEN..(i + 1) * DIGEST_LEN].copy_from_slice(&digest);
        }
        self.char_pos = 0;
    }

    fn refresh_u16_pool(&mut self) {
        const PER_DIGEST: usize = DIGEST_LEN / 2;
        for i in 0..POOL_HASH_COUNT {
            let digest = self.next_digest();
            for (j, chunk) in digest.chunks_exact(2).enumerate() {
                self.u16_pool[i * PER_DIGEST + j] = u16::from_le_bytes([chunk[0], chunk[1]]);
            }
        }
        self.u16_pos = 0;
    }

    fn refresh_u64_pool(&mut self) {
        const PER_DIGEST: usize = DIGEST_LEN / 8;
        for i in 0..POOL_HASH_COUNT {
            let digest = self.next_digest();
            for (j, chunk) in digest.chunks_exact(8).enumerate() {
                let mut word = [0u8; 8];
                word.copy_from_slice(chunk);
                self.u64_pool[i * PER_DIGEST + j] = u64::from_le_bytes(word);
            }
        }
        self.u64_pos = 0;
    }

    fn refresh_bit_pool(&mut self) {
        self.bit_pool = self.next_u64_value();
        self.bit_pos = 0;
    }

    fn next_u64_value(&mut self) -> u64 {
        if self.u64_pos >= U64_POOL_SIZE {
            self.refresh_u64_pool();
        }
        let v = self.u64_pool[self.u64_pos];
        self.u64_pos += 1;
        v
    }

    /// Next random byte.
    pub fn next_byte(&mut self) -> u8 {
        if self.char_pos >= CHAR_POOL_SIZE {
            self.refresh_char_pool();
        }
        let v = self.char_pool[self.char_pos];
        self.char_pos += 1;
        v
    }

    /// Next random u16.
    pub fn next_u16(&mut self) -> u16 {
        if self.u16_pos >= U16_POOL_SIZE {
            self.refresh_u16_pool();
        }
        let v = self.u16_pool[self.u16_pos];
        self.u16_pos += 1;
        v
    }

    /// Next random bit, taken from the low end of the bit pool.
    pub fn bit(&mut self) -> bool {
        if self.bit_pos >= 64 {
            self.refresh_bit_pool();
        }
        let bit = self.bit_pool & 1;
        self.bit_pool >>= 1;
        self.bit_pos += 1;
        bit == 1
    }

    /// `count` random bits packed into the low bits of a u32, first bit
    /// drawn ending up most significant.
    pub fn bits(&mut self, count: u32) -> u32 {
        debug_assert!(count <= 32);
        let mut ret = 0u32;
        for _ in 0..count {
            ret = (ret << 1) | self.bit() as u32;
        }
        ret
    }
}

impl RngCore for Entropy {
    fn next_u32(&mut self) -> u32 {
        self.next_u64_value() as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.next_u64_value()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for b in dest.iter_mut() {
            *b = self.next_byte();
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> std::result::Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}
