//! The bitstream module forms the I/O subsystem for the huffman codec.
//!
//! Bits are numbered MSB-first within each byte: bit 0 of a byte is its most significant bit.
//! A position in a packed buffer is tracked by a [`BitCursor`] (byte index plus bit offset), which
//! the caller carries across calls.
//!
//! The free functions [`write_bit`] and [`read_bit`] do no bounds checking against the end of the
//! buffer. Callers size the buffer first (see the codec bound helpers) or use the scoped
//! [`BitWriter`](bitwriter::BitWriter) and [`BitReader`](bitreader::BitReader), which report when
//! they run out of room.
//!
pub mod bitcursor;
pub mod bitreader;
pub mod bitwriter;

pub use bitcursor::{bits_to_bytes, read_bit, write_bit, BitCursor};
