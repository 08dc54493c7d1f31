//! The tools module provides the command line side of lzhuff.
//!
//! The tools are:
//! - cli: Command line interface and run options.
//! - stats: Symbol counting, entropy and Huffman code measurements.
//! - report: Reads the input file and prints the statistics for the chosen mode.
//!
pub mod cli;
pub mod report;
pub mod stats;
