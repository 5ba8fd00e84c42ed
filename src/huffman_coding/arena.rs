//! Fixed-capacity node pool backing the code tree.
//!
//! A full binary tree over 256 leaves has 511 nodes, so a pool of 512 is never exhausted by a
//! rebuild. Nodes are addressed by index and the whole pool is reset in one step at the start of
//! every rebuild; nothing is ever freed individually.

/// Number of nodes the arena can hold.
pub const POOL_SIZE: usize = 512;

/// Index of a node in the arena.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct NodeRef(u16);

impl NodeRef {
    /// Arena slot of this node.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Huffman tree node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Node {
    Leaf {
        symbol: u8,
        weight: u32,
    },
    Internal {
        weight: u32,
        left: NodeRef,
        right: NodeRef,
    },
}

impl Node {
    pub fn weight(&self) -> u32 {
        match self {
            Node::Leaf { weight, .. } => *weight,
            Node::Internal { weight, .. } => *weight,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }
}

/// Bump allocator for tree nodes.
#[derive(Clone, Debug)]
pub struct NodeArena {
    nodes: [Node; POOL_SIZE],
    len: usize,
}

impl NodeArena {
    pub fn new() -> Self {
        Self {
            nodes: [Node::Leaf {
                symbol: 0,
                weight: 0,
            }; POOL_SIZE],
            len: 0,
        }
    }

    /// Forget every node. References handed out before the reset are stale afterwards.
    pub fn reset(&mut self) {
        self.len = 0;
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Store a leaf, or None if the pool is full.
    pub fn leaf(&mut self, symbol: u8, weight: u32) -> Option<NodeRef> {
        self.alloc(Node::Leaf { symbol, weight })
    }

    /// Store an internal node weighing the sum of its children, or None if the pool is full.
    pub fn internal(&mut self, left: NodeRef, right: NodeRef) -> Option<NodeRef> {
        let weight = self.get(left).weight() + self.get(right).weight();
        self.alloc(Node::Internal {
            weight,
            left,
            right,
        })
    }

    fn alloc(&mut self, node: Node) -> Option<NodeRef> {
        if self.len == POOL_SIZE {
            return None;
        }
        let idx = self.len;
        self.nodes[idx] = node;
        self.len += 1;
        Some(NodeRef(idx as u16))
    }

    pub fn get(&self, node: NodeRef) -> &Node {
        &self.nodes[node.index()]
    }

    #[inline(always)]
    pub fn weight(&self, node: NodeRef) -> u32 {
        self.get(node).weight()
    }
}

impl Default for NodeArena {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn internal_weight_test() {
        let mut arena = NodeArena::new();
        let a = arena.leaf(b'a', 3).unwrap();
        let b = arena.leaf(b'b', 4).unwrap();
        let ab = arena.internal(a, b).unwrap();
        assert_eq!(arena.weight(ab), 7);
        assert_eq!(
            *arena.get(ab),
            Node::Internal {
                weight: 7,
                left: a,
                right: b
            }
        );
        assert!(arena.get(a).is_leaf());
        assert_eq!(arena.len(), 3);
    }

    #[test]
    fn capacity_and_reset_test() {
        let mut arena = NodeArena::new();
        for i in 0..POOL_SIZE {
            assert!(arena.leaf(i as u8, 1).is_some());
        }
        assert!(arena.leaf(0, 1).is_none());
        arena.reset();
        assert!(arena.is_empty());
        assert_eq!(arena.leaf(9, 1).map(NodeRef::index), Some(0));
    }
}
