//! The huffman_coding module builds static Huffman codes from a table of symbol weights.
//!
//! Weights are merged two at a time, lightest first, through a min priority queue until a
//! single tree remains. Walking that tree from the root gives every symbol its code: '0' for
//! each step left, '1' for each step right. The resulting set of codes is prefix-free and has
//! the smallest expected length of any prefix code for the weights.
//!
//! - `huffman_tree`: the arena merge tree and its traversal.
//! - `huffman`: `build_code`, its keyed form, and the `CodeTable` used to pack and unpack
//!   symbol streams.
//!

pub mod huffman;
pub mod huffman_tree;
