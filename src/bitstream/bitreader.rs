//! BitReader: reads a `PackedBits` stream back, a bit or a fixed width integer at a time.
//!
//! NOTE: Reads never go past the valid bit length of the source, so the zero padding in the
//! final byte is invisible to the caller.
//!

use super::packed_bits::PackedBits;

/// Reads bits from a packed bitstream.
#[derive(Debug)]
pub struct BitReader<'a> {
    source: &'a PackedBits,
    /// Index of the next unread bit.
    position: usize,
}

impl<'a> BitReader<'a> {
    pub fn new(source: &'a PackedBits) -> Self {
        Self {
            source,
            position: 0,
        }
    }

    /// Number of bits not yet read.
    pub fn remaining(&self) -> usize {
        self.source.len() - self.position
    }

    /// True once every valid bit has been read.
    pub fn is_done(&self) -> bool {
        self.remaining() == 0
    }

    /// Return the next bit, or None if there is no more data to read.
    pub fn bit(&mut self) -> Option<bool> {
        let bit = self.source.get(self.position)?;
        self.position += 1;
        Some(bit)
    }

    /// Return the next n bits (n <= 32) as an integer, or None if fewer than n bits remain.
    /// Nothing is consumed when None is returned.
    pub fn bint(&mut self, n: u8) -> Option<u32> {
        debug_assert!(n <= 32, "cannot read {} bits into a u32", n);
        let mut n = n as usize;
        if n > self.remaining() {
            return None;
        }
        /*
        Read as many bits as possible from each byte: first whatever is left of the current
        partial byte, then full bytes, then the head of the last byte.
        */
        let bytes = self.source.as_bytes();
        let mut result = 0_u64;
        while n > 0 {
            let offset = self.position % 8;
            let take = n.min(8 - offset);
            let chunk = (bytes[self.position / 8] << offset) >> (8 - take);
            result = result << take | chunk as u64;
            self.position += take;
            n -= take;
        }
        Some(result as u32)
    }
}
