use std::fmt::{Display, Formatter};

use super::bitpacker::BitPacker;

/// An immutable run of bits, packed MSB first into bytes, with an exact bit count.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PackedBits {
    data: Vec<u8>,
    len: usize,
}

impl PackedBits {
    /// Create an empty bit buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap already packed bytes. Only the first `len` bits are valid; `len` is clamped to
    /// the bits actually present and surplus bytes are dropped.
    pub fn from_raw(mut data: Vec<u8>, len: usize) -> Self {
        let len = len.min(data.len() * 8);
        data.truncate((len + 7) / 8);
        Self { data, len }
    }

    /// Pack a slice of bools, one bit each.
    pub fn from_bits(bits: &[bool]) -> Self {
        let mut bp = BitPacker::new(bits.len());
        bits.iter().for_each(|&bit| bp.out_bit(bit));
        bp.finish()
    }

    /// Number of valid bits.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of zero bits padding out the final byte.
    pub fn padding(&self) -> u8 {
        ((8 - self.len % 8) % 8) as u8
    }

    /// Return the bit at `index`, or None when it is past the end.
    pub fn get(&self, index: usize) -> Option<bool> {
        if index >= self.len {
            return None;
        }
        Some((self.data[index / 8] >> (7 - index % 8)) & 1 == 1)
    }

    /// Iterate over the valid bits in stream order.
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len).map(move |i| (self.data[i / 8] >> (7 - i % 8)) & 1 == 1)
    }

    /// Unpack into one bool per bit.
    pub fn to_vec(&self) -> Vec<bool> {
        self.iter().collect()
    }

    /// The packed bytes, including the padded final byte.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }
}

impl Display for PackedBits {
    /// Writes the bits as a string of '0' and '1'.
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for bit in self.iter() {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Unpack bytes into bits, most significant bit of each byte first.
pub fn bits_from_bytes(bytes: &[u8]) -> Vec<bool> {
    bytes
        .iter()
        .flat_map(|&byte| (0..8).rev().map(move |shift| (byte >> shift) & 1 == 1))
        .collect()
}

/// Pack bits into bytes, most significant bit first. The final byte is padded with zeros.
pub fn bytes_from_bits(bits: &[bool]) -> Vec<u8> {
    PackedBits::from_bits(bits).into_bytes()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn from_bits_test() {
        let bits = [true, false, true, true, false, false, false, false, true];
        let pb = PackedBits::from_bits(&bits);
        assert_eq!(pb.len(), 9);
        assert_eq!(pb.as_bytes(), &[0b1011_0000, 0b1000_0000]);
        assert_eq!(pb.padding(), 7);
        assert_eq!(pb.to_vec(), bits.to_vec());
        assert_eq!(pb.to_string(), "101100001");
    }

    #[test]
    fn get_past_end_test() {
        let pb = PackedBits::from_bits(&[true]);
        assert_eq!(pb.get(0), Some(true));
        assert_eq!(pb.get(1), None);
        assert_eq!(pb.get(7), None);
    }

    #[test]
    fn from_raw_clamps_test() {
        let pb = PackedBits::from_raw(vec![0xff, 0x00, 0x00], 10);
        assert_eq!(pb.as_bytes(), &[0xff, 0x00]);
        assert_eq!(pb.len(), 10);
        let pb = PackedBits::from_raw(vec![0xff], 100);
        assert_eq!(pb.len(), 8);
    }

    #[test]
    fn byte_adapters_test() {
        let bits = bits_from_bytes(b"!");
        assert_eq!(
            bits,
            vec![false, false, true, false, false, false, false, true]
        );
        assert_eq!(bytes_from_bits(&bits), b"!".to_vec());
        assert_eq!(bytes_from_bits(&[true, true]), vec![0b1100_0000]);
        assert!(bits_from_bytes(&[]).is_empty());
    }
}
