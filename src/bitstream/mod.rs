//! The bitstream module forms the bit-level I/O subsystem for lzhuff.
//!
//! Both encoders produce their output as a `PackedBits` buffer: bits packed most significant
//! bit first into bytes, together with the exact number of valid bits. Padding in the last
//! byte is therefore never read back as data.
//!
//! - `bitpacker`: writes single bits and fixed width integers into a `PackedBits`.
//! - `bitreader`: reads them back, refusing to read past the valid bit length.
//! - `packed_bits`: the buffer itself plus the byte <-> bit adapters callers use to feed
//!   raw bytes into the LZ78 encoder.
//!
pub mod bitpacker;
pub mod bitreader;
pub mod packed_bits;
