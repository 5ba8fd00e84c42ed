//! BitWriter: packs bits MSB-first into a caller-owned output buffer.
//!
//! The writer borrows the buffer for as long as it lives and keeps the running cursor, so a
//! sequence of codewords can be appended across calls without threading a cursor by hand.
//!
use super::bitcursor::{read_bit, write_bit, BitCursor};

/// Writes a packed bitstream into a borrowed byte slice.
#[derive(Debug)]
pub struct BitWriter<'a> {
    /// Output buffer used to write the bitstream.
    output: &'a mut [u8],
    /// Position of the next bit to write.
    cursor: BitCursor,
}

impl<'a> BitWriter<'a> {
    /// Create a new BitWriter starting at the first bit of the buffer.
    pub fn new(output: &'a mut [u8]) -> Self {
        Self::with_cursor(output, BitCursor::new())
    }

    /// Create a new BitWriter that resumes at a cursor from an earlier write.
    pub fn with_cursor(output: &'a mut [u8], cursor: BitCursor) -> Self {
        Self { output, cursor }
    }

    /// Total number of bits the buffer can hold.
    pub fn capacity_bits(&self) -> usize {
        self.output.len() * 8
    }

    /// Number of bits that can still be written.
    pub fn remaining_bits(&self) -> usize {
        self.capacity_bits()
            .saturating_sub(self.cursor.bit_position())
    }

    /// Put a single bit on the stream. Returns false (and writes nothing) if the buffer is full.
    pub fn put_bit(&mut self, bit: bool) -> bool {
        if self.remaining_bits() == 0 {
            return false;
        }
        write_bit(self.output, &mut self.cursor, bit);
        true
    }

    /// Put the first `len` bits (MSB-first) of a packed source buffer on the stream.
    /// Returns false (and writes nothing) if they do not all fit.
    pub fn put_bits(&mut self, src: &[u8], len: usize) -> bool {
        if len > self.remaining_bits() || len > src.len() * 8 {
            return false;
        }
        let mut from = BitCursor::new();
        for _ in 0..len {
            let bit = read_bit(src, &mut from);
            write_bit(self.output, &mut self.cursor, bit == 1);
        }
        true
    }

    /// Current position of the writer.
    pub fn cursor(&self) -> BitCursor {
        self.cursor
    }

    /// Number of bits written since the start of the buffer.
    pub fn bits_written(&self) -> usize {
        self.cursor.bit_position()
    }

    /// Debugging function to return the bytes.bits output so far
    pub fn loc(&self) -> String {
        self.cursor.loc()
    }
}

#[cfg(test)]
mod test {
    use super::BitWriter;

    #[test]
    fn put_bit_test() {
        let mut buf = [0_u8; 1];
        let mut bw = BitWriter::new(&mut buf);
        for bit in [false, true, true, true, true, false, false, false] {
            assert!(bw.put_bit(bit));
        }
        assert!(!bw.put_bit(true));
        assert_eq!(bw.bits_written(), 8);
        assert_eq!(buf, "x".as_bytes());
    }

    #[test]
    fn put_bits_and_loc_test() {
        let mut buf = [0_u8; 3];
        let mut bw = BitWriter::new(&mut buf);
        assert!(bw.put_bits(&[0b1110_0000], 3));
        assert_eq!("[0.3]", &bw.loc());
        assert!(bw.put_bits(&[0b1111_1111, 0b1000_0000], 9));
        assert_eq!("[1.4]", &bw.loc());
        assert_eq!(bw.remaining_bits(), 12);
        assert!(!bw.put_bits(&[0xff, 0xff], 13));
        assert_eq!("[1.4]", &bw.loc());
        assert_eq!(buf, [0xff, 0xf0, 0x00]);
    }

    #[test]
    fn resume_test() {
        let mut buf = [0_u8; 2];
        let cursor = {
            let mut bw = BitWriter::new(&mut buf);
            bw.put_bits(&[0b1010_0000], 4);
            bw.cursor()
        };
        let mut bw = BitWriter::with_cursor(&mut buf, cursor);
        bw.put_bits(&[0b1111_0000], 4);
        assert_eq!(bw.bits_written(), 8);
        assert_eq!(buf[0], 0b1010_1111);
    }
}
