//! Packed bit array backing the filter
//!
//! Bit `i` lives in bit `i % 8` of byte `i / 8`. Bits are only ever set.
//! Indices past the end of the buffer are ignored on write and read as
//! unset; positions are always reduced modulo `m` first, so this only
//! guards against a broken caller.

use bitvec::prelude::*;

use crate::error::{FilterError, Result};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BitArray {
    bits: BitVec<u8, Lsb0>,
}

impl BitArray {
    /// Zeroed array of `bytes` bytes
    ///
    /// # Errors
    /// `InvalidParameter` if the buffer cannot be allocated.
    pub fn new(bytes: usize) -> Result<Self> {
        let mut buffer = Vec::new();
        buffer.try_reserve_exact(bytes).map_err(|_| {
            FilterError::InvalidParameter(format!(
                "bit array of {} bytes cannot be allocated",
                bytes
            ))
        })?;
        buffer.resize(bytes, 0u8);

        Ok(Self {
            bits: BitVec::from_vec(buffer),
        })
    }

    pub fn set_bit(&mut self, index: u64) {
        let Ok(index) = usize::try_from(index) else {
            return;
        };
        if let Some(mut bit) = self.bits.get_mut(index) {
            *bit = true;
        }
    }

    pub fn is_bit_set(&self, index: u64) -> bool {
        usize::try_from(index)
            .ok()
            .and_then(|index| self.bits.get(index))
            .map(|bit| *bit)
            .unwrap_or(false)
    }

    /// Number of bits currently set
    pub fn count_ones(&self) -> usize {
        self.bits.count_ones()
    }

    /// Capacity in bits (a multiple of 8)
    pub fn len_bits(&self) -> usize {
        self.bits.len()
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.bits.as_raw_slice()
    }
}
