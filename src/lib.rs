//! Static Huffman codes and online LZ78 coding of bit streams.
//!
//! Version 0.1.0
//!
//! Two independent encoders that share nothing but the bit I/O helpers:
//!
//! - `huffman_coding::huffman::build_code` turns a table of symbol weights into a
//!   prefix-free code per symbol.
//! - `lempel_ziv::compress::encode` runs an LZ78 parse over a bit sequence and returns the
//!   encoded bits together with the phrase dictionary it built.
//!
//! Each has a decoding counterpart so results can be checked end to end.
//!
//! Basic usage of the bundled command line tool:
//!
//! `$> lzhuff huffman --group 3 genome.txt`
//!
//! This prints the expected Huffman code length, entropy and compression ratio of the file
//! read as 3 byte symbols.
//!
#![warn(rust_2018_idioms)]

pub mod bitstream;
pub mod error;
pub mod huffman_coding;
pub mod lempel_ziv;
pub mod tools;

pub use error::{Error, Result};
pub use huffman_coding::huffman::{build_code, build_code_keyed};
pub use lempel_ziv::compress::{encode, Encoded};
pub use lempel_ziv::decompress::decode;
