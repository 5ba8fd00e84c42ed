use std::fmt;

use log::{debug, log_enabled, trace, Level};

use super::arena::{Node, NodeArena, NodeRef};
use super::heap::PriorityQueue;
use crate::bitstream::bitcursor::{bits_to_bytes, write_bit, BitCursor};
use crate::bitstream::bitreader::BitReader;
use crate::bitstream::bitwriter::BitWriter;
use crate::error::{DecodeError, EncodeError, RebuildError};
use crate::{FrequencyTable, TABLE_SIZE};

/// Longest codeword the fixed-width codeword storage can hold.
pub const MAX_CODE_BITS: u16 = 16;

/// Bit length and bit pattern for one symbol.
///
/// `bits` holds the code MSB-first: bit 0 of the code is the most significant bit of the u16,
/// so `bits.to_be_bytes()` is the code as a packed 2 byte buffer. Unused low bits are zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Codeword {
    /// Number of significant bits. 0 means the symbol has no code.
    pub bit_length: u16,
    pub bits: u16,
}

impl Codeword {
    pub fn is_assigned(&self) -> bool {
        self.bit_length > 0
    }

    /// The code as a packed buffer for the bitstream functions.
    pub fn to_bytes(self) -> [u8; 2] {
        self.bits.to_be_bytes()
    }

    /// Bit `i` of the code, counting from the first bit written.
    pub fn bit(&self, i: u16) -> bool {
        i < self.bit_length && (self.bits >> (15 - i)) & 1 == 1
    }
}

impl fmt::Display for Codeword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.bit_length {
            f.write_str(if self.bit(i) { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Codec context: the code tree for one frequency table and the codewords derived from it.
///
/// A context is created empty, populated by [`Codec::rebuild`], and then consulted by encode and
/// decode until the next rebuild replaces every piece of derived state. Rebuilding takes
/// `&mut self`, so a rebuild can never overlap an encode or decode on the same context.
/// Independent contexts share nothing and can be used from different threads.
#[derive(Clone)]
pub struct Codec {
    /// Frequency table in effect, after the floor rule.
    table: FrequencyTable,
    arena: NodeArena,
    queue: PriorityQueue,
    codes: [Codeword; TABLE_SIZE],
    root: Option<NodeRef>,
    min_bits: u16,
    max_bits: u16,
}

impl Codec {
    /// Context with no tree. Encode fails with `UnmappedSymbol` until a rebuild succeeds.
    pub fn empty() -> Self {
        Self {
            table: [0; TABLE_SIZE],
            arena: NodeArena::new(),
            queue: PriorityQueue::new(),
            codes: [Codeword::default(); TABLE_SIZE],
            root: None,
            min_bits: 0,
            max_bits: 0,
        }
    }

    /// Build a context for a frequency table (or a flat table if none is given).
    pub fn new(table: Option<&FrequencyTable>) -> Result<Self, RebuildError> {
        let mut codec = Self::empty();
        codec.rebuild(table)?;
        Ok(codec)
    }

    /// Replace the tree and codewords with ones built from `table`. With no table every symbol
    /// gets the same weight.
    ///
    /// Every count below 1 is raised to 1 first, so all 256 symbols always get a codeword.
    /// On error the context is left empty.
    pub fn rebuild(&mut self, table: Option<&FrequencyTable>) -> Result<(), RebuildError> {
        self.table = match table {
            Some(t) => *t,
            None => [0; TABLE_SIZE],
        };
        self.table.iter_mut().for_each(|f| *f = (*f).max(1));

        let result = self.build_tree();
        if result.is_err() {
            self.clear();
        }
        result
    }

    /// Drop all derived state.
    fn clear(&mut self) {
        self.arena.reset();
        self.queue.reset();
        self.codes = [Codeword::default(); TABLE_SIZE];
        self.root = None;
        self.min_bits = 0;
        self.max_bits = 0;
    }

    fn build_tree(&mut self) -> Result<(), RebuildError> {
        self.clear();

        // Leaves go in by increasing symbol. The heap has no tie break of its own, so this order
        // is what makes the codes repeatable.
        for (symbol, &weight) in self.table.iter().enumerate() {
            let leaf = self
                .arena
                .leaf(symbol as u8, weight as u32)
                .ok_or(RebuildError::CapacityExceeded)?;
            if !self.queue.push(&self.arena, leaf) {
                return Err(RebuildError::CapacityExceeded);
            }
        }

        // Merge the two lightest nodes until only the root is left.
        while self.queue.len() > 1 {
            let first = self.queue.pop(&self.arena);
            let second = self.queue.pop(&self.arena);
            let (Some(left), Some(right)) = (first, second) else {
                break;
            };
            let parent = self
                .arena
                .internal(left, right)
                .ok_or(RebuildError::CapacityExceeded)?;
            if !self.queue.push(&self.arena, parent) {
                return Err(RebuildError::CapacityExceeded);
            }
        }
        let root = self.queue.peek().ok_or(RebuildError::CapacityExceeded)?;

        self.min_bits = MAX_CODE_BITS;
        self.max_bits = 0;
        self.assign_codes(root, [0; 2], 0)?;
        self.root = Some(root);

        debug!(
            "Rebuilt tree: {} nodes, root weight {}, code lengths {}..={}",
            self.arena.len(),
            self.arena.weight(root),
            self.min_bits,
            self.max_bits
        );
        if log_enabled!(Level::Trace) {
            for (symbol, code) in self.codes.iter().enumerate() {
                trace!(
                    "{:#04x} weight {:>5}: {}",
                    symbol,
                    self.table[symbol],
                    code
                );
            }
        }
        Ok(())
    }

    /// Walk the tree depth first, appending 0 for a left branch and 1 for a right branch, and
    /// record the code of every leaf reached.
    fn assign_codes(
        &mut self,
        node: NodeRef,
        code: [u8; 2],
        depth: u16,
    ) -> Result<(), RebuildError> {
        match *self.arena.get(node) {
            Node::Leaf { symbol, .. } => {
                self.codes[symbol as usize] = Codeword {
                    bit_length: depth,
                    bits: u16::from_be_bytes(code),
                };
                self.max_bits = self.max_bits.max(depth);
                self.min_bits = self.min_bits.min(depth);
                Ok(())
            }
            Node::Internal { left, right, .. } => {
                if depth == MAX_CODE_BITS {
                    return Err(RebuildError::CodeTooLong {
                        limit: MAX_CODE_BITS,
                    });
                }
                let mut code = code;
                write_bit(&mut code, &mut BitCursor::at_bit(depth as usize), false);
                self.assign_codes(left, code, depth + 1)?;
                write_bit(&mut code, &mut BitCursor::at_bit(depth as usize), true);
                self.assign_codes(right, code, depth + 1)
            }
        }
    }

    /// Frequency table in effect (with the floor applied).
    pub fn table(&self) -> &FrequencyTable {
        &self.table
    }

    /// Codeword table, indexed by symbol.
    pub fn codes(&self) -> &[Codeword; TABLE_SIZE] {
        &self.codes
    }

    pub fn codeword(&self, symbol: u8) -> Codeword {
        self.codes[symbol as usize]
    }

    /// Shortest code length, or 0 before the first successful rebuild.
    pub fn min_bits(&self) -> u16 {
        self.min_bits
    }

    /// Longest code length, or 0 before the first successful rebuild.
    pub fn max_bits(&self) -> u16 {
        self.max_bits
    }

    pub fn root(&self) -> Option<NodeRef> {
        self.root
    }

    /// Tree node behind a reference from [`Codec::root`] or from another node.
    pub fn node(&self, node: NodeRef) -> &Node {
        self.arena.get(node)
    }

    /// Number of nodes in the current tree.
    pub fn node_count(&self) -> usize {
        self.arena.len()
    }

    /// Bytes of output that are always enough to encode `byte_len` input bytes.
    pub fn encode_upper_bound(&self, byte_len: usize) -> usize {
        byte_len * self.max_bits as usize / 8 + 1
    }

    /// Most symbols `bit_len` bits can decode to, since no code is shorter than `min_bits`.
    pub fn decode_upper_bound(&self, bit_len: usize) -> usize {
        bit_len.checked_div(self.min_bits as usize).unwrap_or(0)
    }

    /// Encode `input` into `output`, packing codes MSB-first from the first bit of the buffer.
    /// Returns the number of bits written.
    pub fn encode(&self, output: &mut [u8], input: &[u8]) -> Result<usize, EncodeError> {
        let mut bw = BitWriter::new(output);
        for &symbol in input {
            let code = self.codes[symbol as usize];
            if !code.is_assigned() {
                return Err(EncodeError::UnmappedSymbol(symbol));
            }
            if !bw.put_bits(&code.to_bytes(), code.bit_length as usize) {
                return Err(EncodeError::OutputTooSmall {
                    capacity_bits: bw.capacity_bits(),
                });
            }
        }
        Ok(bw.bits_written())
    }

    /// Decode the first `bit_count` bits of `input` into `output`. Returns the number of bytes
    /// decoded.
    pub fn decode(
        &self,
        output: &mut [u8],
        input: &[u8],
        bit_count: usize,
    ) -> Result<usize, DecodeError> {
        let available_bits = input.len() * 8;
        if bit_count > available_bits {
            return Err(DecodeError::InputTooShort {
                bit_count,
                available_bits,
            });
        }
        let Some(root) = self.root else {
            return match bit_count {
                0 => Ok(0),
                _ => Err(DecodeError::CorruptStream { bit: 0 }),
            };
        };

        let capacity = output.len();
        let mut node = root;
        let mut written = 0;
        for (i, bit) in BitReader::with_limit(input, bit_count).enumerate() {
            let next = match *self.arena.get(node) {
                Node::Internal { left, right, .. } => {
                    if bit {
                        right
                    } else {
                        left
                    }
                }
                Node::Leaf { .. } => return Err(DecodeError::CorruptStream { bit: i }),
            };
            match *self.arena.get(next) {
                Node::Leaf { symbol, .. } => {
                    let slot = output
                        .get_mut(written)
                        .ok_or(DecodeError::OutputTooSmall { capacity })?;
                    *slot = symbol;
                    written += 1;
                    node = root;
                }
                Node::Internal { .. } => node = next,
            }
        }

        if node != root {
            return Err(DecodeError::TruncatedCodeword);
        }
        Ok(written)
    }

    /// Encode into a new buffer trimmed to the bytes used. Returns the buffer and bit count.
    pub fn encode_to_vec(&self, input: &[u8]) -> Result<(Vec<u8>, usize), EncodeError> {
        let mut out = vec![0_u8; self.encode_upper_bound(input.len())];
        let bits = self.encode(&mut out, input)?;
        out.truncate(bits_to_bytes(bits));
        Ok((out, bits))
    }

    /// Decode into a new buffer trimmed to the bytes decoded.
    pub fn decode_to_vec(&self, input: &[u8], bit_count: usize) -> Result<Vec<u8>, DecodeError> {
        let mut out = vec![0_u8; self.decode_upper_bound(bit_count)];
        let len = self.decode(&mut out, input, bit_count)?;
        out.truncate(len);
        Ok(out)
    }
}

impl Default for Codec {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Debug for Codec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Codec")
            .field("nodes", &self.arena.len())
            .field("root", &self.root)
            .field("min_bits", &self.min_bits)
            .field("max_bits", &self.max_bits)
            .finish()
    }
}
