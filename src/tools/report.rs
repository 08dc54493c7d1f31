use std::fmt::{Display, Formatter};
use std::fs;

use log::{error, info};

use super::cli::LzOpts;
use super::stats::{group_symbols, strip_newlines, symbol_stats, SymbolStats};
use crate::error::Result;
use crate::lempel_ziv::compress::encode_bytes;
use crate::lempel_ziv::decompress::decode_bytes;

/// Sizes from an LZ78 run over a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lz78Stats {
    pub input_bits: usize,
    pub output_bits: usize,
    /// Dictionary entries, sentinel included.
    pub phrases: usize,
    /// Whether decoding gave back the input.
    pub round_trip: bool,
}

impl Lz78Stats {
    /// Input size over output size. 0 when nothing was written.
    pub fn compression_ratio(&self) -> f64 {
        if self.output_bits == 0 {
            return 0.0;
        }
        self.input_bits as f64 / self.output_bits as f64
    }
}

impl Display for Lz78Stats {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "input bits       {}", self.input_bits)?;
        writeln!(f, "output bits      {}", self.output_bits)?;
        writeln!(f, "phrases          {}", self.phrases)?;
        writeln!(f, "compression      {:.6}", self.compression_ratio())?;
        writeln!(
            f,
            "round trip       {}",
            if self.round_trip { "ok" } else { "FAILED" }
        )
    }
}

/// Huffman code the symbols of `data` as `opts` describes.
pub fn huffman_stats(data: &[u8], opts: &LzOpts) -> Result<SymbolStats> {
    let data = if opts.keep_newlines {
        data.to_vec()
    } else {
        strip_newlines(data)
    };
    if opts.group == 1 {
        symbol_stats(data.as_slice())
    } else {
        symbol_stats(group_symbols(&data, opts.group).as_slice())
    }
}

/// LZ78 encode `data`, then decode it again to check the result.
pub fn lz78_stats(data: &[u8]) -> Result<Lz78Stats> {
    let encoded = encode_bytes(data);
    let round_trip = decode_bytes(&encoded.bits)? == data;
    if !round_trip {
        error!("LZ78 output did not decode back to the input");
    }
    Ok(Lz78Stats {
        input_bits: data.len() * 8,
        output_bits: encoded.bits.len(),
        phrases: encoded.dictionary.len(),
        round_trip,
    })
}

/// Read the input file named in opts <LzOpts> and print its Huffman statistics.
pub fn huffman_report(opts: &LzOpts) -> Result<SymbolStats> {
    let data = fs::read(&opts.file)?;
    info!("Read {} bytes from {}", data.len(), opts.file);
    let stats = huffman_stats(&data, opts)?;
    print!("{}", stats);
    Ok(stats)
}

/// Read the input file named in opts <LzOpts> and print its LZ78 statistics.
pub fn lz78_report(opts: &LzOpts) -> Result<Lz78Stats> {
    let data = fs::read(&opts.file)?;
    info!("Read {} bytes from {}", data.len(), opts.file);
    let stats = lz78_stats(&data)?;
    print!("{}", stats);
    Ok(stats)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn huffman_grouped_test() {
        let mut opts = LzOpts::new();
        opts.group = 3;
        let stats = huffman_stats(b"AAAAAA\nCCCAAA\nGGG", &opts).unwrap();
        // AAA x3, CCC, GGG
        assert_eq!(stats.symbols, 5);
        assert_eq!(stats.alphabet, 3);
        assert_eq!(stats.encoded_bits, 3 + 2 + 2);
    }

    #[test]
    fn huffman_newlines_test() {
        let mut opts = LzOpts::new();
        assert_eq!(huffman_stats(b"ab\nab\n", &opts).unwrap().alphabet, 2);
        opts.keep_newlines = true;
        assert_eq!(huffman_stats(b"ab\nab\n", &opts).unwrap().alphabet, 3);
    }

    #[test]
    fn lz78_stats_test() {
        let stats = lz78_stats(&[0_u8; 64]).unwrap();
        assert!(stats.round_trip);
        assert_eq!(stats.input_bits, 512);
        assert!(stats.output_bits < stats.input_bits);
        assert!(stats.compression_ratio() > 1.0);

        let empty = lz78_stats(&[]).unwrap();
        assert!(empty.round_trip);
        assert_eq!(empty.phrases, 1);
        assert_eq!(empty.compression_ratio(), 0.0);
    }

    #[test]
    fn missing_file_test() {
        let mut opts = LzOpts::new();
        opts.file = "no/such/file/anywhere.txt".to_string();
        assert!(matches!(
            huffman_report(&opts),
            Err(crate::error::Error::Io(_))
        ));
    }
}
