use log::{debug, trace};

use super::dictionary::{PhraseDictionary, SENTINEL};
use crate::bitstream::bitpacker::BitPacker;
use crate::bitstream::packed_bits::PackedBits;

/// Result of an LZ78 encode: the packed output and the dictionary that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encoded {
    pub bits: PackedBits,
    pub dictionary: PhraseDictionary,
}

/// Bits used to write a prefix address while `next_address` is the next free address:
/// `ceil(log2(next_address))`. That is 0 for the first phrase, when only the empty phrase
/// exists, and always enough for the largest live address, `next_address - 1`.
pub fn address_width(next_address: usize) -> u8 {
    if next_address <= 1 {
        return 0;
    }
    (usize::BITS - (next_address - 1).leading_zeros()) as u8
}

/// Online LZ78 encoder over a bit stream. Feed bits with push(), then call finish().
pub struct Lz78Encoder {
    dictionary: PhraseDictionary,
    packer: BitPacker,
    /// Trie address of the phrase matched so far. SENTINEL when nothing is pending.
    candidate: u32,
    /// Number of (address, bit) records written.
    records: usize,
}

impl Lz78Encoder {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Pre-size the output for about `bits` input bits.
    pub fn with_capacity(bits: usize) -> Self {
        Self {
            dictionary: PhraseDictionary::new(),
            packer: BitPacker::new(bits),
            candidate: SENTINEL,
            records: 0,
        }
    }

    /// Write the prefix address at the current width, then the literal bit.
    fn emit(&mut self, prefix: u32, bit: bool) {
        let width = address_width(self.dictionary.next_address());
        self.packer.out_bits(prefix, width);
        self.packer.out_bit(bit);
        self.records += 1;
    }

    /// Consume one input bit.
    pub fn push(&mut self, bit: bool) {
        match self.dictionary.child(self.candidate, bit) {
            Some(next) => self.candidate = next,
            None => {
                // candidate + bit is new: write it out and remember it
                self.emit(self.candidate, bit);
                let address = self.dictionary.insert(self.candidate, bit);
                trace!("new phrase {} = {} + {}", address, self.candidate, bit as u8);
                self.candidate = SENTINEL;
            }
        }
    }

    /// Consume the bits of each byte, most significant bit first.
    pub fn push_bytes(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            for shift in (0..8).rev() {
                self.push((byte >> shift) & 1 == 1);
            }
        }
    }

    /// Flush any pending phrase and return the output with its dictionary.
    pub fn finish(mut self) -> Encoded {
        // The input ended inside a known phrase: write its prefix and its last bit.
        if let Some((parent, bit)) = self.dictionary.parent(self.candidate) {
            self.emit(parent, bit);
        }
        debug!(
            "LZ78 wrote {} records, {} bits, {} phrases",
            self.records,
            self.packer.len(),
            self.dictionary.len()
        );
        Encoded {
            bits: self.packer.finish(),
            dictionary: self.dictionary,
        }
    }
}

impl Default for Lz78Encoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Encode a whole bit sequence in one call.
///
/// # Panics
///
/// Panics if the input would need more than `MAX_PHRASES` dictionary entries.
pub fn encode(bits: &[bool]) -> Encoded {
    let mut encoder = Lz78Encoder::with_capacity(bits.len());
    bits.iter().for_each(|&bit| encoder.push(bit));
    encoder.finish()
}

/// Encode raw bytes, each unpacked most significant bit first.
pub fn encode_bytes(bytes: &[u8]) -> Encoded {
    let mut encoder = Lz78Encoder::with_capacity(bytes.len() * 8);
    encoder.push_bytes(bytes);
    encoder.finish()
}
