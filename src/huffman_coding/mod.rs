//! The huffman module builds the code tree and does the encoding and decoding.
//!
//! A rebuild goes through these steps:
//! - Copy in the frequency table and raise every count below 1 to 1, so all 256 symbols are
//!   leaves.
//! - Reset the node arena, then push one leaf per symbol onto the min-heap in symbol order.
//! - Pop the two lightest nodes, join them under a new internal node, push it back, and repeat
//!   until one node (the root) is left.
//! - Walk the tree to give each symbol its codeword: 0 for a left branch, 1 for a right branch.
//!
//! Encoding appends each symbol's codeword to the output. Decoding walks the tree from the root
//! one bit at a time and emits a symbol at every leaf.
//!

pub mod arena;
pub mod heap;
pub mod huffman;
