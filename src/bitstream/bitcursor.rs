//! BitCursor: a position in a packed bit buffer, and the single-bit read and write on it.
//!
//! Bits are MSB-first within a byte. Neither function checks the end of the buffer.
//!
/// Mask for the most significant bit of a byte (bit offset 0).
const BIT_MASK: u8 = 0x80;

/// Position within a packed bit buffer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct BitCursor {
    /// Index of the byte holding the current bit.
    pub byte_index: usize,
    /// Offset of the current bit within that byte, 0..=7, MSB first.
    pub bit_offset: u8,
}

impl BitCursor {
    /// Cursor at the first bit of a buffer.
    pub const fn new() -> Self {
        Self {
            byte_index: 0,
            bit_offset: 0,
        }
    }

    /// Cursor at an absolute bit position.
    pub const fn at_bit(bit: usize) -> Self {
        Self {
            byte_index: bit / 8,
            bit_offset: (bit % 8) as u8,
        }
    }

    /// Absolute bit position of the cursor.
    pub const fn bit_position(&self) -> usize {
        self.byte_index * 8 + self.bit_offset as usize
    }

    /// Step forward one bit, carrying into the next byte after bit 7.
    #[inline(always)]
    pub fn advance(&mut self) {
        self.bit_offset += 1;
        if self.bit_offset == 8 {
            self.bit_offset = 0;
            self.byte_index += 1;
        }
    }

    /// Debugging function. Report the cursor as [byte.bit].
    pub fn loc(&self) -> String {
        format!("[{}.{}]", self.byte_index, self.bit_offset)
    }
}

/// Number of bytes needed to hold `bits` bits.
pub const fn bits_to_bytes(bits: usize) -> usize {
    bits / 8 + (bits % 8 != 0) as usize
}

/// Set (bit == true) or clear the bit under the cursor, then advance the cursor.
///
/// Panics if the cursor is past the end of `buf`.
#[inline]
pub fn write_bit(buf: &mut [u8], cursor: &mut BitCursor, bit: bool) {
    let mask = BIT_MASK >> cursor.bit_offset;
    let byte = &mut buf[cursor.byte_index];
    if bit {
        *byte |= mask;
    } else {
        *byte &= !mask;
    }
    cursor.advance();
}

/// Read the bit under the cursor (0 or 1), then advance the cursor.
///
/// Panics if the cursor is past the end of `buf`.
#[inline]
pub fn read_bit(buf: &[u8], cursor: &mut BitCursor) -> u8 {
    let bit = (buf[cursor.byte_index] << cursor.bit_offset) >> 7;
    cursor.advance();
    bit
}
