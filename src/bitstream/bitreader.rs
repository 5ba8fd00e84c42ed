//! BitReader: reads a packed bitstream MSB-first from a borrowed byte slice.
//!
//! The reader stops at a caller-supplied bit limit, which may end part way through the last byte.
//!
use super::bitcursor::{read_bit, BitCursor};

/// Reads bits from a packed buffer.
#[derive(Debug)]
pub struct BitReader<'a> {
    buffer: &'a [u8],
    cursor: BitCursor,
    limit: usize,
}

impl<'a> BitReader<'a> {
    /// Creates a new BitReader over every bit of the buffer.
    pub fn new(buffer: &'a [u8]) -> Self {
        Self::with_limit(buffer, buffer.len() * 8)
    }

    /// Creates a new BitReader over the first `limit` bits of the buffer. The limit is clamped
    /// to the buffer size.
    pub fn with_limit(buffer: &'a [u8], limit: usize) -> Self {
        Self {
            buffer,
            cursor: BitCursor::new(),
            limit: limit.min(buffer.len() * 8),
        }
    }

    /// Return bit as Option<u8> (1 or 0), or None if there is no more data to read
    pub fn bit(&mut self) -> Option<u8> {
        if self.cursor.bit_position() >= self.limit {
            return None;
        }
        Some(read_bit(self.buffer, &mut self.cursor))
    }

    /// Return Option<Bool> *true* if the next bit is 1, *false* if 0, consuming the bit,
    /// or None if there is no more data to read
    pub fn bool_bit(&mut self) -> Option<bool> {
        self.bit().map(|bit| bit == 1)
    }

    /// Number of bits left before the limit.
    pub fn remaining_bits(&self) -> usize {
        self.limit - self.cursor.bit_position()
    }

    /// Current position of the reader.
    pub fn cursor(&self) -> BitCursor {
        self.cursor
    }

    /// Debugging function. Report current position in the buffer.
    pub fn loc(&self) -> String {
        self.cursor.loc()
    }
}

impl Iterator for BitReader<'_> {
    type Item = bool;

    fn next(&mut self) -> Option<bool> {
        self.bool_bit()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining_bits();
        (n, Some(n))
    }
}
