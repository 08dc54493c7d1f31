//! Builds the Huffman merge tree from a table of symbol weights.
//!
//! The tree lives in an arena: leaves occupy ids `0..n` (the symbol index) and every merge
//! appends one internal node. Children are referenced by id, so nothing is boxed and the
//! tree can be walked with an explicit stack instead of recursion.
//!
//! Tie-break: the priority queue is ordered by `(weight, node id)`. Leaves compare by their
//! input index, and internal nodes, which always get the next free id, sort after every node
//! created before them. Equal weights therefore merge in a fixed order and the output is
//! reproducible run to run.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use log::trace;

use crate::error::{Error, Result};

#[derive(PartialEq, Debug, Clone, Copy)]
pub enum NodeData {
    /// Ids of the left (first popped) and right (second popped) children.
    Kids(usize, usize),
    Leaf(usize),
}

#[derive(PartialEq, Debug, Clone)]
pub struct Node {
    pub weight: f64,
    pub node_data: NodeData,
}

/// Entry in the merge queue.
#[derive(Debug, Clone, Copy)]
struct QueueEntry {
    weight: f64,
    id: usize,
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}
impl Eq for QueueEntry {}

impl Ord for QueueEntry {
    /// Reversed so the max-heap pops the lowest weight, then the lowest id.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .weight
            .total_cmp(&self.weight)
            .then_with(|| other.id.cmp(&self.id))
    }
}
impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A finished Huffman merge tree.
#[derive(Debug, Clone)]
pub struct HuffmanTree {
    nodes: Vec<Node>,
    symbols: usize,
}

impl HuffmanTree {
    /// Check every weight, then merge. Fails with InvalidWeight on the first negative or
    /// non-finite weight, before anything is built.
    pub fn from_weights(weights: &[f64]) -> Result<Self> {
        if let Some((index, &weight)) = weights
            .iter()
            .enumerate()
            .find(|(_, w)| !w.is_finite() || **w < 0.0)
        {
            return Err(Error::InvalidWeight { index, weight });
        }

        let symbols = weights.len();
        // A tree with n leaves has n - 1 internal nodes
        let mut nodes = Vec::with_capacity((2 * symbols).saturating_sub(1));
        let mut queue = BinaryHeap::with_capacity(symbols);
        for (i, &weight) in weights.iter().enumerate() {
            nodes.push(Node {
                weight,
                node_data: NodeData::Leaf(i),
            });
            queue.push(QueueEntry { weight, id: i });
        }

        // Pull off the two lightest nodes and join them until only the root is left.
        while queue.len() > 1 {
            let (left, right) = match (queue.pop(), queue.pop()) {
                (Some(l), Some(r)) => (l, r),
                _ => break,
            };
            let id = nodes.len();
            let weight = left.weight + right.weight;
            trace!("merge {} + {} -> node {} ({})", left.id, right.id, id, weight);
            nodes.push(Node {
                weight,
                node_data: NodeData::Kids(left.id, right.id),
            });
            queue.push(QueueEntry { weight, id });
        }

        Ok(Self { nodes, symbols })
    }

    /// Number of leaf symbols.
    pub fn symbols(&self) -> usize {
        self.symbols
    }

    /// The root is always the last node pushed.
    pub fn root(&self) -> Option<&Node> {
        self.nodes.last()
    }

    pub fn node(&self, id: usize) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Walk the tree depth first, handing every leaf symbol and its root-to-leaf path to
    /// `visit`. Left children are visited before right children.
    fn walk<F: FnMut(usize, &[bool])>(&self, mut visit: F) {
        let root = match self.nodes.len() {
            0 => return,
            len => len - 1,
        };
        // A lone symbol still needs one bit to be written
        if self.symbols == 1 {
            visit(0, &[false]);
            return;
        }
        let mut path: Vec<bool> = Vec::new();
        // (node id, depth of that node, bit that leads to it)
        let mut stack = vec![(root, 0_usize, false)];
        while let Some((id, depth, bit)) = stack.pop() {
            path.truncate(depth.saturating_sub(1));
            if depth > 0 {
                path.push(bit);
            }
            match self.nodes[id].node_data {
                NodeData::Kids(left, right) => {
                    stack.push((right, depth + 1, true));
                    stack.push((left, depth + 1, false));
                }
                NodeData::Leaf(symbol) => visit(symbol, &path),
            }
        }
    }

    /// Codes as '0'/'1' strings, positionally aligned with the input weights.
    pub fn codes(&self) -> Vec<String> {
        let mut codes = vec![String::new(); self.symbols];
        self.walk(|symbol, path| {
            codes[symbol] = path.iter().map(|&b| if b { '1' } else { '0' }).collect();
        });
        codes
    }

    /// Code length of each symbol.
    pub fn code_lengths(&self) -> Vec<usize> {
        let mut lengths = vec![0; self.symbols];
        self.walk(|symbol, path| lengths[symbol] = path.len());
        lengths
    }

    /// Length of the longest code.
    pub fn depth(&self) -> usize {
        self.code_lengths().into_iter().max().unwrap_or(0)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn arena_layout_test() {
        let tree = HuffmanTree::from_weights(&[5.0, 1.0, 2.0]).unwrap();
        assert_eq!(tree.symbols(), 3);
        // 1 + 2 first, then 3 + 5
        assert_eq!(tree.node(3).unwrap().node_data, NodeData::Kids(1, 2));
        assert_eq!(tree.node(4).unwrap().node_data, NodeData::Kids(3, 0));
        assert_eq!(tree.root().unwrap().weight, 8.0);
        assert_eq!(tree.codes(), vec!["1", "00", "01"]);
        assert_eq!(tree.depth(), 2);
    }

    #[test]
    fn ties_merge_by_id_test() {
        // All equal: leaves 0,1 merge, then 2,3, then the two internal nodes
        let tree = HuffmanTree::from_weights(&[1.0; 4]).unwrap();
        assert_eq!(tree.node(4).unwrap().node_data, NodeData::Kids(0, 1));
        assert_eq!(tree.node(5).unwrap().node_data, NodeData::Kids(2, 3));
        assert_eq!(tree.node(6).unwrap().node_data, NodeData::Kids(4, 5));
        assert_eq!(tree.codes(), vec!["00", "01", "10", "11"]);
    }

    #[test]
    fn leaf_beats_newer_internal_on_tie_test() {
        // After 1 + 1 -> 2 (node 3), the leaf of weight 2 (id 2) pops before node 3
        let tree = HuffmanTree::from_weights(&[1.0, 1.0, 2.0]).unwrap();
        assert_eq!(tree.node(4).unwrap().node_data, NodeData::Kids(2, 3));
        assert_eq!(tree.codes(), vec!["10", "11", "0"]);
    }

    #[test]
    fn invalid_weight_test() {
        let err = HuffmanTree::from_weights(&[1.0, -0.5, f64::NAN]).unwrap_err();
        assert!(matches!(err, Error::InvalidWeight { index: 1, .. }));
        let err = HuffmanTree::from_weights(&[f64::INFINITY]).unwrap_err();
        assert!(matches!(err, Error::InvalidWeight { index: 0, .. }));
    }

    #[test]
    fn degenerate_sizes_test() {
        let tree = HuffmanTree::from_weights(&[]).unwrap();
        assert!(tree.root().is_none());
        assert!(tree.codes().is_empty());
        assert_eq!(tree.depth(), 0);

        let tree = HuffmanTree::from_weights(&[0.0]).unwrap();
        assert_eq!(tree.codes(), vec!["0"]);
        assert_eq!(tree.code_lengths(), vec![1]);
    }

    #[test]
    fn deep_tree_test() {
        // Fibonacci-like weights give a maximally skewed tree; no recursion limit applies.
        let mut weights = vec![1.0, 1.0];
        for i in 2..60 {
            weights.push(weights[i - 1] + weights[i - 2]);
        }
        let tree = HuffmanTree::from_weights(&weights).unwrap();
        assert_eq!(tree.depth(), 59);
        let lengths = tree.code_lengths();
        assert_eq!(lengths[59], 1);
        assert_eq!(lengths[0], 59);
    }
}
