//! Error types for the lzhuff library.

use thiserror::Error;

/// Error variants for Huffman code construction and LZ78 decoding.
#[derive(Debug, Error)]
pub enum Error {
    /// A symbol weight was negative, NaN or infinite.
    #[error("invalid weight {weight} for symbol {index}")]
    InvalidWeight { index: usize, weight: f64 },

    /// A symbol outside the code table was handed to the encoder.
    #[error("symbol {0} has no code in this table")]
    UnknownSymbol(usize),

    /// A run of bits matched no code in the table.
    #[error("bits ending at position {position} match no code")]
    InvalidCode { position: usize },

    /// The bitstream ended in the middle of a code or phrase record.
    #[error("bitstream ended in the middle of a record")]
    TruncatedStream,

    /// A phrase record referenced an address the dictionary does not hold yet.
    #[error("phrase address {address} is outside a dictionary of {dictionary_size} entries")]
    InvalidAddress { address: u32, dictionary_size: usize },

    /// An I/O error occurred while reading input.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized Result type for lzhuff operations.
pub type Result<T> = std::result::Result<T, Error>;
