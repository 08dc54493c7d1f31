use log::debug;

use super::compress::address_width;
use crate::bitstream::bitreader::BitReader;
use crate::bitstream::packed_bits::PackedBits;
use crate::error::{Error, Result};

/// Invert `encode`: read (address, bit) records with the same width schedule the encoder
/// used and expand each one back into its phrase.
pub fn decode(encoded: &PackedBits) -> Result<Vec<bool>> {
    // Parent address and last bit of each phrase. Entry 0 is the empty phrase.
    let mut phrases: Vec<(u32, bool)> = vec![(0, false)];
    let mut out = Vec::with_capacity(encoded.len());
    let mut scratch = Vec::new();
    let mut br = BitReader::new(encoded);

    while !br.is_done() {
        let width = address_width(phrases.len());
        let address = br.bint(width).ok_or(Error::TruncatedStream)?;
        let bit = br.bit().ok_or(Error::TruncatedStream)?;
        if address as usize >= phrases.len() {
            return Err(Error::InvalidAddress {
                address,
                dictionary_size: phrases.len(),
            });
        }

        // Walk up to the root, then copy the phrase out in order
        scratch.clear();
        let mut node = address;
        while node != 0 {
            let (parent, b) = phrases[node as usize];
            scratch.push(b);
            node = parent;
        }
        out.extend(scratch.iter().rev());
        out.push(bit);
        phrases.push((address, bit));
    }

    debug!(
        "LZ78 decoded {} bits from {} records",
        out.len(),
        phrases.len() - 1
    );
    Ok(out)
}

/// Decode and pack the result back into bytes. A trailing partial byte is zero padded.
pub fn decode_bytes(encoded: &PackedBits) -> Result<Vec<u8>> {
    let bits = decode(encoded)?;
    Ok(PackedBits::from_bits(&bits).into_bytes())
}
