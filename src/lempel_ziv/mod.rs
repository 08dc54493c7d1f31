//! The lempel_ziv module implements online LZ78 coding of a bit stream.
//!
//! The encoder scans its input once, left to right. It follows the phrase trie as long as the
//! bits seen so far form a known phrase. The first bit that leaves the trie closes a new
//! phrase: the encoder writes the address of the longest known prefix followed by that bit,
//! then adds the new phrase at the next free address.
//!
//! Addresses are written with `ceil(log2(next free address))` bits, so the first record has
//! no address at all and the width grows as the dictionary does. A decoder tracks the same
//! count and needs no side information to find record boundaries.
//!
//! - `dictionary`: the append-only phrase trie.
//! - `compress`: the streaming encoder plus `encode`/`encode_bytes`.
//! - `decompress`: `decode`/`decode_bytes`.
//!

pub mod compress;
pub mod decompress;
pub mod dictionary;
