use std::hash::Hash;

use log::{debug, trace};
use rustc_hash::FxHashMap;

use super::huffman_tree::HuffmanTree;
use crate::bitstream::bitpacker::BitPacker;
use crate::bitstream::packed_bits::PackedBits;
use crate::error::{Error, Result};

/// Build a prefix-free code for each symbol index from its weight.
///
/// Weights may be raw counts or probabilities. The returned codes are positionally aligned
/// with `weights`. An empty table gives an empty result and a single symbol gets `"0"`.
/// Negative or non-finite weights fail with `Error::InvalidWeight`.
pub fn build_code(weights: &[f64]) -> Result<Vec<String>> {
    let tree = HuffmanTree::from_weights(weights)?;
    let codes = tree.codes();
    debug!(
        "Built {} huffman codes, longest is {} bits",
        codes.len(),
        codes.iter().map(String::len).max().unwrap_or(0)
    );
    Ok(codes)
}

/// Keyed form of `build_code`. Equal weights are tie-broken in the iteration order of
/// `weights`. If a key repeats, the code built for its last occurrence wins.
pub fn build_code_keyed<K, I>(weights: I) -> Result<FxHashMap<K, String>>
where
    K: Eq + Hash,
    I: IntoIterator<Item = (K, f64)>,
{
    let (keys, weights): (Vec<K>, Vec<f64>) = weights.into_iter().unzip();
    let codes = build_code(&weights)?;
    Ok(keys.into_iter().zip(codes).collect())
}

/// A code table for symbols `0..n`, able to pack symbol streams and hand out a decoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable {
    codes: Vec<String>,
}

impl CodeTable {
    pub fn from_weights(weights: &[f64]) -> Result<Self> {
        Ok(Self {
            codes: build_code(weights)?,
        })
    }

    /// Wrap codes built elsewhere.
    pub fn from_codes(codes: Vec<String>) -> Self {
        Self { codes }
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn code(&self, symbol: usize) -> Option<&str> {
        self.codes.get(symbol).map(String::as_str)
    }

    pub fn codes(&self) -> &[String] {
        &self.codes
    }

    pub fn into_codes(self) -> Vec<String> {
        self.codes
    }

    /// Average code length with the weights normalised to probabilities.
    /// Returns 0 when the weights sum to 0.
    pub fn expected_length(&self, weights: &[f64]) -> f64 {
        let total: f64 = weights.iter().sum();
        if total <= 0.0 {
            return 0.0;
        }
        self.codes
            .iter()
            .zip(weights)
            .map(|(code, w)| w / total * code.len() as f64)
            .sum()
    }

    /// True when no code is a prefix of another. Holds for every table built from weights.
    pub fn is_prefix_free(&self) -> bool {
        let mut sorted: Vec<&str> = self.codes.iter().map(String::as_str).collect();
        sorted.sort_unstable();
        // After sorting, a code that prefixes others sits directly before one of them
        sorted.windows(2).all(|w| !w[1].starts_with(w[0]))
    }

    /// Concatenate the codes of `symbols` into one bitstream.
    pub fn encode(&self, symbols: &[usize]) -> Result<PackedBits> {
        let mut bp = BitPacker::new(symbols.len() * 2);
        for &symbol in symbols {
            let code = self.code(symbol).ok_or(Error::UnknownSymbol(symbol))?;
            bp.out_str(code);
        }
        trace!("Packed {} symbols into {}", symbols.len(), bp.loc());
        Ok(bp.finish())
    }

    /// Build a decoder that inverts `encode`.
    pub fn decoder(&self) -> CodeDecoder {
        CodeDecoder::new(&self.codes)
    }
}

/// Binary trie over a code table. Node 0 is the root.
#[derive(Debug, Clone)]
pub struct CodeDecoder {
    /// Child ids for a 0 bit and a 1 bit.
    kids: Vec<[Option<usize>; 2]>,
    /// Symbol stored at each node, set only on leaves.
    symbol: Vec<Option<usize>>,
}

impl CodeDecoder {
    pub fn new(codes: &[String]) -> Self {
        let mut decoder = Self {
            kids: vec![[None, None]],
            symbol: vec![None],
        };
        for (sym, code) in codes.iter().enumerate() {
            let mut node = 0;
            for bit in code.bytes().map(|c| (c == b'1') as usize) {
                node = match decoder.kids[node][bit] {
                    Some(next) => next,
                    None => {
                        decoder.kids.push([None, None]);
                        decoder.symbol.push(None);
                        let next = decoder.kids.len() - 1;
                        decoder.kids[node][bit] = Some(next);
                        next
                    }
                };
            }
            decoder.symbol[node] = Some(sym);
        }
        decoder
    }

    /// Decode a bitstream into symbol indices.
    pub fn decode(&self, bits: &PackedBits) -> Result<Vec<usize>> {
        let mut out = Vec::new();
        let mut node = 0;
        for (position, bit) in bits.iter().enumerate() {
            node = self.kids[node][bit as usize].ok_or(Error::InvalidCode { position })?;
            if let Some(sym) = self.symbol[node] {
                out.push(sym);
                node = 0;
            }
        }
        if node != 0 {
            return Err(Error::TruncatedStream);
        }
        Ok(out)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn expected(weights: &[f64]) -> f64 {
        CodeTable::from_weights(weights)
            .unwrap()
            .expected_length(weights)
    }

    #[test]
    fn degenerate_inputs_test() {
        assert!(build_code(&[]).unwrap().is_empty());
        assert_eq!(build_code(&[0.7]).unwrap(), vec!["0"]);
        assert_eq!(build_code(&[0.0]).unwrap(), vec!["0"]);
        assert_eq!(build_code(&[3.0, 9.0]).unwrap(), vec!["0", "1"]);
    }

    #[test]
    fn five_symbol_example_test() {
        let weights = [0.1, 0.2, 0.2, 0.3, 0.2];
        let codes = build_code(&weights).unwrap();
        assert_eq!(codes.len(), 5);
        assert!(CodeTable::from_codes(codes.clone()).is_prefix_free());
        assert!(codes[3].len() <= codes[0].len());
        // The exact tree follows from the (weight, id) tie-break
        assert_eq!(codes, vec!["110", "111", "00", "10", "01"]);
        assert!((expected(&weights) - 2.3).abs() < 1e-9);
    }

    #[test]
    fn keyed_example_test() {
        let table = [
            ("A", 0.05),
            ("B", 0.1),
            ("C", 0.15),
            ("D", 0.15),
            ("E", 0.2),
            ("F", 0.35),
        ];
        let codes = build_code_keyed(table).unwrap();
        assert_eq!(codes.len(), 6);
        assert_eq!(codes["F"].len(), 2);
        assert_eq!(codes["A"], "000");
        assert_eq!(codes["E"], "01");
        let expected_len: f64 = table.iter().map(|(k, w)| w * codes[k].len() as f64).sum();
        assert!((expected_len - 2.45).abs() < 1e-9);
    }

    #[test]
    fn keyed_empty_test() {
        let codes = build_code_keyed(Vec::<(char, f64)>::new()).unwrap();
        assert!(codes.is_empty());
    }

    #[test]
    fn scale_invariance_test() {
        let probs = [0.1, 0.2, 0.2, 0.3, 0.2];
        let counts: Vec<f64> = probs.iter().map(|p| p * 1000.0).collect();
        assert_eq!(build_code(&probs).unwrap(), build_code(&counts).unwrap());
    }

    #[test]
    fn reference_expected_lengths_test() {
        // Dyadic weights reach the entropy exactly
        assert!((expected(&[0.5, 0.25, 0.125, 0.125]) - 1.75).abs() < 1e-9);
        // Uniform over 8 symbols needs 3 bits each
        assert!((expected(&[1.0; 8]) - 3.0).abs() < 1e-9);
        // Classic textbook distribution
        assert!((expected(&[45.0, 13.0, 12.0, 16.0, 9.0, 5.0]) - 2.24).abs() < 1e-9);
    }

    #[test]
    fn invalid_weight_leaves_nothing_test() {
        let err = build_code(&[0.5, -1.0]).unwrap_err();
        assert!(matches!(err, Error::InvalidWeight { index: 1, .. }));
        assert!(build_code_keyed([('x', f64::NAN)]).is_err());
    }

    #[test]
    fn prefix_free_check_test() {
        let table = CodeTable::from_codes(vec!["0".into(), "01".into()]);
        assert!(!table.is_prefix_free());
        let table = CodeTable::from_codes(vec!["10".into(), "0".into(), "11".into()]);
        assert!(table.is_prefix_free());
    }

    #[test]
    fn encode_decode_test() {
        let table = CodeTable::from_weights(&[45.0, 13.0, 12.0, 16.0, 9.0, 5.0]).unwrap();
        let symbols = vec![0, 1, 2, 3, 4, 5, 0, 0, 3];
        let packed = table.encode(&symbols).unwrap();
        let bits: usize = symbols.iter().map(|&s| table.code(s).unwrap().len()).sum();
        assert_eq!(packed.len(), bits);
        assert_eq!(table.decoder().decode(&packed).unwrap(), symbols);
    }

    #[test]
    fn encode_unknown_symbol_test() {
        let table = CodeTable::from_weights(&[1.0, 1.0]).unwrap();
        assert!(matches!(table.encode(&[0, 2]), Err(Error::UnknownSymbol(2))));
    }

    #[test]
    fn decode_errors_test() {
        let table = CodeTable::from_weights(&[1.0, 1.0, 2.0]).unwrap();
        // "1" is the first half of "10"/"11"
        let dangling = PackedBits::from_bits(&[false, true]);
        assert!(matches!(
            table.decoder().decode(&dangling),
            Err(Error::TruncatedStream)
        ));

        // A single symbol only has the code "0"
        let single = CodeTable::from_weights(&[1.0]).unwrap();
        let bad = PackedBits::from_bits(&[false, true]);
        assert!(matches!(
            single.decoder().decode(&bad),
            Err(Error::InvalidCode { position: 1 })
        ));
        assert_eq!(
            single
                .decoder()
                .decode(&PackedBits::from_bits(&[false, false]))
                .unwrap(),
            vec![0, 0]
        );
    }
}
