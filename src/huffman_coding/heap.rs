//! Binary min-heap of tree nodes, keyed on weight only.
//!
//! The heap is 1-indexed (slot 0 is never used) and holds at most 256 entries, which is the
//! number of leaves pushed at the start of a rebuild. Every merge pops two and pushes one, so the
//! heap never grows past that.
//!
//! Ties are not broken by any secondary key. The code assignment is only deterministic because
//! leaves are always pushed in increasing symbol order.

use super::arena::{NodeArena, NodeRef};
use crate::TABLE_SIZE;

/// Min-heap of node references.
#[derive(Clone, Debug)]
pub struct PriorityQueue {
    slots: [NodeRef; TABLE_SIZE + 1],
    /// Index of the next free slot, so the heap holds end - 1 entries.
    end: usize,
}

impl PriorityQueue {
    pub fn new() -> Self {
        Self {
            slots: [NodeRef::default(); TABLE_SIZE + 1],
            end: 1,
        }
    }

    pub fn reset(&mut self) {
        self.slots = [NodeRef::default(); TABLE_SIZE + 1];
        self.end = 1;
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.end - 1
    }

    pub fn is_empty(&self) -> bool {
        self.end == 1
    }

    /// Lowest weight entry, without removing it.
    pub fn peek(&self) -> Option<NodeRef> {
        if self.is_empty() {
            None
        } else {
            Some(self.slots[1])
        }
    }

    #[inline(always)]
    fn slot(&self, i: usize) -> NodeRef {
        self.slots[i]
    }

    /// Insert a node, sifting it up past every parent that is strictly heavier.
    /// Returns false if the heap is full.
    pub fn push(&mut self, arena: &NodeArena, node: NodeRef) -> bool {
        if self.end > TABLE_SIZE {
            return false;
        }
        let weight = arena.weight(node);
        let mut i = self.end;
        self.end += 1;

        while i > 1 {
            let parent = i / 2;
            let above = self.slot(parent);
            if arena.weight(above) <= weight {
                break;
            }
            self.slots[i] = above;
            i = parent;
        }
        self.slots[i] = node;
        true
    }

    /// Remove and return the lowest weight node. The last entry is sifted down from the root,
    /// preferring the right child only when it is strictly lighter than the left.
    pub fn pop(&mut self, arena: &NodeArena) -> Option<NodeRef> {
        if self.is_empty() {
            return None;
        }
        let top = self.slot(1);
        self.end -= 1;
        let last = self.slot(self.end);
        let last_weight = arena.weight(last);

        let mut i = 1;
        loop {
            let mut child = i * 2;
            if child >= self.end {
                break;
            }
            if child + 1 < self.end
                && arena.weight(self.slot(child + 1)) < arena.weight(self.slot(child))
            {
                child += 1;
            }
            if last_weight <= arena.weight(self.slot(child)) {
                break;
            }
            self.slots[i] = self.slots[child];
            i = child;
        }
        if i < self.end {
            self.slots[i] = last;
        }
        Some(top)
    }
}

impl Default for PriorityQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn fill(weights: &[u32]) -> (NodeArena, PriorityQueue) {
        let mut arena = NodeArena::new();
        let mut pq = PriorityQueue::new();
        for (s, &w) in weights.iter().enumerate() {
            let n = arena.leaf(s as u8, w).unwrap();
            assert!(pq.push(&arena, n));
        }
        (arena, pq)
    }

    #[test]
    fn pops_in_weight_order_test() {
        let (arena, mut pq) = fill(&[5, 1, 9, 3, 3, 7, 2]);
        let mut out = vec![];
        while let Some(n) = pq.pop(&arena) {
            out.push(arena.weight(n));
        }
        assert_eq!(out, vec![1, 2, 3, 3, 5, 7, 9]);
        assert!(pq.is_empty());
    }

    #[test]
    fn equal_weights_first_pushed_first_test() {
        // With all weights equal nothing moves during a push, so the first pop is the first leaf.
        let (arena, mut pq) = fill(&[4, 4, 4, 4]);
        assert_eq!(pq.peek().map(NodeRef::index), Some(0));
        assert_eq!(pq.pop(&arena).map(NodeRef::index), Some(0));
        assert_eq!(pq.len(), 3);
    }

    #[test]
    fn capacity_test() {
        let (arena, mut pq) = fill(&[1; TABLE_SIZE]);
        assert_eq!(pq.len(), TABLE_SIZE);
        let mut arena = arena;
        let extra = arena.leaf(0, 1).unwrap();
        assert!(!pq.push(&arena, extra));
        pq.reset();
        assert!(pq.pop(&arena).is_none());
    }
}
