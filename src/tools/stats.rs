use std::fmt::{Display, Formatter};
use std::hash::Hash;

use log::debug;
use rustc_hash::FxHashMap;

use crate::error::Result;
use crate::huffman_coding::huffman::CodeTable;
use crate::lempel_ziv::compress::address_width;

/// Huffman statistics for a symbol sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolStats {
    /// Length of the sequence.
    pub symbols: usize,
    /// Number of distinct symbols.
    pub alphabet: usize,
    /// Bits per symbol of the Huffman code, weighted by frequency.
    pub expected_length: f64,
    /// Shannon entropy of the symbol frequencies, in bits per symbol.
    pub entropy: f64,
    /// Bits per symbol of a plain fixed width code over the same alphabet.
    pub fixed_width: u8,
    /// Length of the whole sequence once Huffman coded.
    pub encoded_bits: usize,
}

impl SymbolStats {
    /// Fixed width size over Huffman size. 0 for an empty sequence.
    pub fn compression_ratio(&self) -> f64 {
        if self.encoded_bits == 0 {
            return 0.0;
        }
        (self.fixed_width as usize * self.symbols) as f64 / self.encoded_bits as f64
    }
}

impl Display for SymbolStats {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "symbols          {}", self.symbols)?;
        writeln!(f, "alphabet         {}", self.alphabet)?;
        writeln!(f, "expected length  {:.6} bits/symbol", self.expected_length)?;
        writeln!(f, "entropy          {:.6} bits/symbol", self.entropy)?;
        writeln!(
            f,
            "compression      {} x {} / {} = {:.6}",
            self.fixed_width,
            self.symbols,
            self.encoded_bits,
            self.compression_ratio()
        )
    }
}

/// Count each distinct symbol, keeping first-seen order so equal counts tie-break the same
/// way every run.
pub fn count_symbols<T: Eq + Hash>(sequence: &[T]) -> Vec<(&T, usize)> {
    let mut index: FxHashMap<&T, usize> = FxHashMap::default();
    let mut counts: Vec<(&T, usize)> = Vec::new();
    for sym in sequence {
        match index.get(sym) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(sym, counts.len());
                counts.push((sym, 1));
            }
        }
    }
    counts
}

/// Shannon entropy, in bits, of a probability table. Zero entries contribute nothing.
pub fn entropy(probabilities: &[f64]) -> f64 {
    -probabilities
        .iter()
        .filter(|&&p| p > 0.0)
        .map(|p| p * p.log2())
        .sum::<f64>()
}

/// Build a Huffman code over the symbol frequencies of `sequence` and measure it.
pub fn symbol_stats<T: Eq + Hash>(sequence: &[T]) -> Result<SymbolStats> {
    let counts = count_symbols(sequence);
    let total = sequence.len() as f64;
    let probabilities: Vec<f64> = counts.iter().map(|&(_, c)| c as f64 / total).collect();
    let table = CodeTable::from_weights(&probabilities)?;

    let encoded_bits: usize = counts
        .iter()
        .zip(table.codes())
        .map(|(&(_, c), code)| c * code.len())
        .sum();
    let stats = SymbolStats {
        symbols: sequence.len(),
        alphabet: counts.len(),
        expected_length: table.expected_length(&probabilities),
        entropy: entropy(&probabilities),
        fixed_width: address_width(counts.len()).max(1),
        encoded_bits,
    };
    debug!("{:?}", stats);
    Ok(stats)
}

/// Split `data` into symbols of `group` bytes. A trailing partial group is dropped.
pub fn group_symbols(data: &[u8], group: usize) -> Vec<&[u8]> {
    data.chunks_exact(group.max(1)).collect()
}

/// Remove line breaks so a wrapped text file reads as one sequence.
pub fn strip_newlines(data: &[u8]) -> Vec<u8> {
    data.iter()
        .copied()
        .filter(|&b| b != b'\n' && b != b'\r')
        .collect()
}
