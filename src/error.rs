//! Error types for the huffman codec.

use thiserror::Error;

/// A codec handle could not obtain memory from the configured allocator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("allocator returned no memory for a {size} byte codec handle")]
pub struct AllocationError {
    /// Size of the request that failed.
    pub size: usize,
}

/// Errors from rebuilding the code tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RebuildError {
    /// The frequency table produces a tree deeper than the fixed codeword width.
    #[error("frequency table needs codewords longer than {limit} bits")]
    CodeTooLong {
        /// Maximum supported codeword length.
        limit: u16,
    },

    /// The node pool or heap ran out of room. A 256 symbol tree always fits, so this is not
    /// reachable through the public API.
    #[error("tree construction exceeded node capacity")]
    CapacityExceeded,
}

/// Errors from encoding a byte buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// The symbol has no codeword in the current tree.
    #[error("symbol {0:#04x} has no assigned codeword")]
    UnmappedSymbol(u8),

    /// The output buffer cannot hold the next codeword.
    #[error("output buffer of {capacity_bits} bits is too small")]
    OutputTooSmall {
        /// Size of the output buffer in bits.
        capacity_bits: usize,
    },
}

/// Errors from decoding a bitstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// A bit led to a child that does not exist.
    #[error("corrupt stream at bit {bit}")]
    CorruptStream {
        /// Index of the offending bit.
        bit: usize,
    },

    /// The stream ended in the middle of a codeword.
    #[error("stream ends in the middle of a codeword")]
    TruncatedCodeword,

    /// More bits were requested than the input holds.
    #[error("asked to decode {bit_count} bits but input holds {available_bits}")]
    InputTooShort {
        /// Bits requested.
        bit_count: usize,
        /// Bits present in the input buffer.
        available_bits: usize,
    },

    /// The output buffer is full and another symbol was decoded.
    #[error("output buffer of {capacity} bytes is too small")]
    OutputTooSmall {
        /// Size of the output buffer in bytes.
        capacity: usize,
    },
}

/// Crate level error.
#[derive(Debug, Error)]
pub enum Error {
    /// Handle allocation failed.
    #[error(transparent)]
    Allocation(#[from] AllocationError),

    /// Tree rebuild failed.
    #[error(transparent)]
    Rebuild(#[from] RebuildError),

    /// Encoding failed.
    #[error(transparent)]
    Encode(#[from] EncodeError),

    /// Decoding failed.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// An I/O error occurred while reading input.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized Result type for codec operations.
pub type Result<T> = std::result::Result<T, Error>;
