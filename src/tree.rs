use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::hash::Hash;

use bitvec::slice::BitSlice;

use crate::code::{Code, CodeTable};
use crate::error::{Error, Result};
use crate::frequency::FrequencyTable;

/// index of a node in the arena of a [`Tree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node<Symbol> {
    Leaf(Symbol),
    /// `lower` was extracted first while merging; it takes bit 0, `greater` bit 1
    Internal { lower: NodeId, greater: NodeId },
}

/// Huffman tree over the symbols of a frequency table.
///
/// Nodes live in an arena. Leaves come first, in the order of the frequency
/// table, followed by internal nodes in the order they were merged, so the
/// root is always the last node.
#[derive(Debug, Clone)]
pub struct Tree<Symbol> {
    nodes: Vec<Node<Symbol>>,
    root: NodeId,
}

impl<Symbol> Tree<Symbol>
where
    Symbol: Eq + Hash + Clone,
{
    /// Builds the tree by repeatedly merging the two lightest nodes.
    ///
    /// Among nodes of equal weight the one inserted first is extracted first,
    /// which makes the result depend only on the table's order.
    pub fn new(frequencies: FrequencyTable<Symbol>) -> Result<Self> {
        if frequencies.is_empty() {
            return Err(Error::EmptyInput);
        }
        let leaf_count = frequencies.len();
        let mut nodes = Vec::with_capacity(2 * leaf_count - 1);
        // weights are only needed for ordering the merges, so they ride along in the queue
        let mut queue: BinaryHeap<Reverse<(usize, NodeId)>> =
            BinaryHeap::with_capacity(leaf_count);
        for (symbol, occurrences) in frequencies {
            let id = NodeId(nodes.len());
            nodes.push(Node::Leaf(symbol));
            queue.push(Reverse((occurrences, id)));
        }
        loop {
            match (queue.pop(), queue.pop()) {
                (
                    Some(Reverse((lower_weight, lower))),
                    Some(Reverse((greater_weight, greater))),
                ) => {
                    let id = NodeId(nodes.len());
                    nodes.push(Node::Internal { lower, greater });
                    queue.push(Reverse((lower_weight + greater_weight, id)));
                }
                (Some(Reverse((_, root))), None) => return Ok(Tree { nodes, root }),
                (None, _) => return Err(Error::EmptyInput),
            }
        }
    }

    /// count occurrences of each symbol in given sequence and construct the tree
    pub fn from_sequence<I>(sequence: I) -> Result<Self>
    where
        I: IntoIterator<Item = Symbol>,
    {
        Self::new(FrequencyTable::from_sequence(sequence)?)
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &Node<Symbol> {
        &self.nodes[id.0]
    }

    /// number of leaves
    pub fn symbol_count(&self) -> usize {
        (self.nodes.len() + 1) / 2
    }

    /// number of edges on the longest root to leaf path
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(self.root, 0)];
        while let Some((id, depth)) = stack.pop() {
            match self.node(id) {
                Node::Leaf(_) => deepest = deepest.max(depth),
                Node::Internal { lower, greater } => {
                    stack.push((*greater, depth + 1));
                    stack.push((*lower, depth + 1));
                }
            }
        }
        deepest
    }

    /// Assigns every leaf the bits of its path from the root.
    ///
    /// A tree that is a single leaf gives that symbol the code `0`.
    pub fn codes(&self) -> CodeTable<Symbol> {
        let mut leaf_codes: Vec<Option<Code>> = vec![None; self.symbol_count()];
        let mut stack = vec![(self.root, Code::empty())];
        while let Some((id, prefix)) = stack.pop() {
            match self.node(id) {
                Node::Leaf(_) => {
                    let mut code = prefix;
                    if code.is_empty() {
                        code.push(false);
                    }
                    leaf_codes[id.0] = Some(code);
                }
                Node::Internal { lower, greater } => {
                    let mut greater_prefix = prefix.clone();
                    greater_prefix.push(true);
                    stack.push((*greater, greater_prefix));
                    let mut lower_prefix = prefix;
                    lower_prefix.push(false);
                    stack.push((*lower, lower_prefix));
                }
            }
        }
        let paths = self
            .nodes
            .iter()
            .zip(leaf_codes)
            .filter_map(|(node, code)| match (node, code) {
                (Node::Leaf(symbol), Some(code)) => Some((symbol.clone(), code)),
                _ => None,
            })
            .collect();
        CodeTable::from_tree_paths(paths)
    }

    /// Decodes bits by walking from the root to a leaf once per symbol.
    pub fn decode(&self, bits: &BitSlice) -> Result<Vec<Symbol>> {
        let mut result = Vec::new();
        if let Node::Leaf(symbol) = self.node(self.root) {
            for (position, bit) in bits.iter().by_vals().enumerate() {
                if bit {
                    return Err(Error::MalformedEncoding { position });
                }
                result.push(symbol.clone());
            }
            return Ok(result);
        }
        let mut bits = bits.iter().by_vals().enumerate();
        let mut start = 0;
        let mut current = self.root;
        loop {
            match self.node(current) {
                Node::Leaf(symbol) => {
                    result.push(symbol.clone());
                    current = self.root;
                }
                Node::Internal { lower, greater } => match bits.next() {
                    Some((position, bit)) => {
                        if current == self.root {
                            start = position;
                        }
                        current = if bit { *greater } else { *lower };
                    }
                    None if current == self.root => return Ok(result),
                    None => return Err(Error::MalformedEncoding { position: start }),
                },
            }
        }
    }
}
