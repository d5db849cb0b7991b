//! Hash functions for the Bloom filter
//!
//! Each filter owns `k` independent MurmurHash3 instances, each with its own
//! randomly chosen seed. A hasher is reset, fed the value's bytes and asked
//! for a 64-bit digest; the digest modulo `m` is a bit position.

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{FilterError, Result};

/// A resettable, seeded hash function producing 64-bit digests
pub trait Hash64 {
    /// Create a hasher with the given seed
    fn with_seed(seed: u32) -> Self
    where
        Self: Sized;

    /// Seed this hasher was created with
    fn seed(&self) -> u32;

    /// Discard any bytes written since the last reset
    fn reset(&mut self);

    /// Feed bytes into the hasher
    fn write(&mut self, bytes: &[u8]) -> Result<()>;

    /// Digest of everything written since the last reset
    fn sum64(&self) -> Result<u64>;

    /// Reset, feed `value` and return its digest
    fn digest(&mut self, value: &[u8]) -> Result<u64> {
        self.reset();
        self.write(value)?;
        self.sum64()
    }
}

/// MurmurHash3 (x64, 128-bit) truncated to its lower 64 bits
///
/// Streamed writes are buffered and hashed on `sum64`; the buffer keeps its
/// allocation across resets. `digest` hashes the value in place and leaves
/// the buffer empty.
#[derive(Clone, Debug)]
pub struct Murmur3Hasher {
    seed: u32,
    buffer: Vec<u8>,
}

impl Hash64 for Murmur3Hasher {
    fn with_seed(seed: u32) -> Self {
        Self {
            seed,
            buffer: Vec::new(),
        }
    }

    fn seed(&self) -> u32 {
        self.seed
    }

    fn reset(&mut self) {
        self.buffer.clear();
    }

    fn write(&mut self, bytes: &[u8]) -> Result<()> {
        self.buffer.extend_from_slice(bytes);
        Ok(())
    }

    fn sum64(&self) -> Result<u64> {
        let mut source = self.buffer.as_slice();
        murmur3::murmur3_x64_128(&mut source, self.seed)
            .map(|hash| hash as u64)
            .map_err(|e| FilterError::HashFailure(e.to_string()))
    }

    fn digest(&mut self, value: &[u8]) -> Result<u64> {
        self.buffer.clear();
        let mut source = value;
        murmur3::murmur3_x64_128(&mut source, self.seed)
            .map(|hash| hash as u64)
            .map_err(|e| FilterError::HashFailure(e.to_string()))
    }
}

/// Ordered set of `k` independently seeded hash functions
///
/// Seeds are distinct and never change after construction.
#[derive(Clone, Debug)]
pub struct HashFamily<H = Murmur3Hasher> {
    hashers: Vec<H>,
}

impl<H: Hash64> HashFamily<H> {
    /// Create `count` hashers seeded from OS entropy
    pub fn new(count: usize) -> Self {
        Self::from_rng(count, &mut StdRng::from_entropy())
    }

    /// Create `count` hashers whose seeds are drawn from a generator seeded
    /// with `seed`, so the family is reproducible
    pub fn with_seed(count: usize, seed: u64) -> Self {
        Self::from_rng(count, &mut StdRng::seed_from_u64(seed))
    }

    /// Build a family from existing hashers, in evaluation order
    ///
    /// # Errors
    /// `InvalidParameter` if two hashers share a seed.
    pub fn from_hashers(hashers: Vec<H>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(hashers.len());
        for hasher in &hashers {
            if !seen.insert(hasher.seed()) {
                return Err(FilterError::InvalidParameter(format!(
                    "duplicate hash seed {}",
                    hasher.seed()
                )));
            }
        }
        Ok(Self { hashers })
    }

    fn from_rng<R: Rng>(count: usize, rng: &mut R) -> Self {
        let mut seen = HashSet::with_capacity(count);
        let mut hashers = Vec::with_capacity(count);

        while hashers.len() < count {
            let seed: u32 = rng.gen();
            if seen.insert(seed) {
                hashers.push(H::with_seed(seed));
            }
        }

        Self { hashers }
    }

    /// Number of hash functions (k)
    pub fn len(&self) -> usize {
        self.hashers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hashers.is_empty()
    }

    pub fn seeds(&self) -> Vec<u32> {
        self.hashers.iter().map(Hash64::seed).collect()
    }

    /// Compute one bit position per hash function for `value`
    ///
    /// `out[i]` receives `hash_i(value) % m`. Every slot is written before
    /// this returns `Ok`; on error the contents of `out` are unspecified.
    pub fn positions(&mut self, value: &[u8], m: u64, out: &mut [u64]) -> Result<()> {
        debug_assert_eq!(out.len(), self.hashers.len());

        for (hasher, slot) in self.hashers.iter_mut().zip(out.iter_mut()) {
            *slot = hasher.digest(value)? % m;
        }

        Ok(())
    }
}
