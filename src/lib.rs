//! Huffman codec over the fixed alphabet of 256 byte values.
//!
//! Version 0.1.0
//!
//! Builds an optimal prefix code from a table of byte frequencies, then packs a byte buffer into
//! a bitstream and unpacks it again. There is no header on the encoded data: the caller keeps
//! the frequency table and the bit count, and decodes with a codec built from the same table.
//!
//! Basic usage is as follows:
//!
//! ```
//! use huffman::{tabulate, CodecHandle, TABLE_SIZE};
//!
//! let data = b"This is a test string!!!";
//! let mut table = [0_u16; TABLE_SIZE];
//! tabulate(&mut table, data);
//!
//! let codec = CodecHandle::create(Some(&table))?;
//! let mut encoded = vec![0_u8; codec.encode_upper_bound(data.len())];
//! let bits = codec.encode(&mut encoded, data)?;
//!
//! let mut decoded = vec![0_u8; codec.decode_upper_bound(bits)];
//! let len = codec.decode(&mut decoded, &encoded, bits)?;
//! assert_eq!(&decoded[..len], data);
//! # Ok::<(), huffman::Error>(())
//! ```
//!
//! Limitations:
//! - Codewords are stored in 16 bits. A table skewed enough to need a longer code is rejected
//!   by rebuild with `RebuildError::CodeTooLong`.
//! - Codes are not canonical. They depend on the order the tree builder merges equal weights,
//!   so only a codec built from the same table can decode the output.
//!
//! A codec is a single mutable resource: rebuild takes `&mut`, encode and decode take `&`.
//!
#![warn(rust_2018_idioms)]

pub mod bitstream;
pub mod error;
pub mod handle;
pub mod huffman_coding;
pub mod tools;

/// Number of symbols in the alphabet.
pub const TABLE_SIZE: usize = 256;

/// Occurrence count per byte value, indexed by the byte.
pub type FrequencyTable = [u16; TABLE_SIZE];

pub use bitstream::{bits_to_bytes, BitCursor};
pub use error::{AllocationError, DecodeError, EncodeError, Error, RebuildError, Result};
pub use handle::{set_allocator, CodecHandle};
pub use huffman_coding::huffman::{Codec, Codeword, MAX_CODE_BITS};
pub use tools::freq_count::tabulate;
