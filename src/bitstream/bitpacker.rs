use log::error;

use super::packed_bits::PackedBits;

/// Creates a bitstream for output. Call finish() to flush the bit queue and take the
/// packed result.
pub struct BitPacker {
    output: Vec<u8>,
    queue: u64,
    q_bits: u8,
    /// Total count of bits written so far.
    bits: usize,
}

impl BitPacker {
    /// Create a new BitPacker with room for roughly `capacity_bits` bits.
    pub fn new(capacity_bits: usize) -> Self {
        Self {
            output: Vec::with_capacity((capacity_bits + 7) / 8),
            queue: 0,
            q_bits: 0,
            bits: 0,
        }
    }

    /// Internal bitstream write function common to all out.XX functions.
    fn write_stream(&mut self) {
        while self.q_bits > 7 {
            let byte = (self.queue >> (self.q_bits - 8)) as u8;
            self.output.push(byte); //push the packed byte out
            self.q_bits -= 8; //adjust the count of bits left in the queue
        }
    }

    /// Writes the low `depth` bits of `data`, most significant of those first.
    /// `depth` may be 0 (nothing is written) up to 32.
    pub fn out_bits(&mut self, data: u32, depth: u8) {
        debug_assert!(depth <= 32, "cannot write {} bits from a u32", depth);
        if depth == 0 {
            return;
        }
        self.queue <<= depth; //shift queue by bit length
        self.queue |= data as u64 & ((1_u64 << depth) - 1); //add data portion to queue
        self.q_bits += depth; //update depth of queue bits
        self.bits += depth as usize;
        self.write_stream();
    }

    /// Puts a single bit on the stream.
    pub fn out_bit(&mut self, bit: bool) {
        self.out_bits(bit as u32, 1);
    }

    /// Puts a string of '0'/'1' characters on the stream. Any other character is skipped.
    pub fn out_str(&mut self, code: &str) {
        code.bytes().for_each(|c| match c {
            b'0' => self.out_bit(false),
            b'1' => self.out_bit(true),
            _ => {}
        });
    }

    /// Count of bits written so far.
    pub fn len(&self) -> usize {
        self.bits
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// Flushes the remaining bits (1-7) from the queue, padding with 0s in the least
    /// signficant bits, and returns the packed bits.
    pub fn finish(mut self) -> PackedBits {
        if self.q_bits > 0 {
            self.queue <<= 8 - self.q_bits; //pad the queue with zeros
            self.q_bits = 8;
            self.write_stream(); // write out all that is left
            if self.q_bits > 0 {
                error!("Stuff left in the BitPacker queue.");
            }
        }
        PackedBits::from_raw(self.output, self.bits)
    }

    /// Debugging function to return the number of bytes.bits output so far
    pub fn loc(&self) -> String {
        format!("[{}.{}]", self.bits / 8, self.bits % 8)
    }
}
