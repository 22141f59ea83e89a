//! # Kauai Stream Decompression
//!
//! `kauai_codec` is a safe, allocation-free decoder for the two LZ token formats
//! of the Kauai engine: the original (legacy) format and its extended successor.
//! Both share one decode routine parametrized by [`Format`].
//!
//! The decoder writes into a caller-supplied buffer of fixed capacity. It never
//! reads past the end of the source or writes past the end of the destination,
//! whatever the input, and reports the exact number of bytes produced.
//!
//! ## Example
//!
//! ```rust
//! use kauai_codec::{Format, decompress};
//!
//! // Literal run "AB", then copy 6 bytes from 2 bytes back.
//! let compressed = [0x01, b'A', b'B', 0x84, 0x02];
//!
//! let mut buffer = [0u8; 16];
//! let written = decompress(&compressed, &mut buffer, Format::Legacy).expect("Decompression failed");
//! assert_eq!(&buffer[..written], b"ABABABAB");
//! ```

// The C entry points are linked into foreign programs as a static library,
// which needs std's panic handler and global allocator.
#![cfg_attr(not(feature = "c-abi"), no_std)]
#![deny(unsafe_code)]

#[cfg(any(feature = "alloc", test))]
extern crate alloc;

#[cfg(feature = "c-abi")]
pub mod abi;
pub mod decompress;
pub mod error;
pub mod format;
pub mod token;

#[cfg(feature = "alloc")]
pub use decompress::decompress_to_vec;
pub use decompress::{decompress, decompressed_len};
pub use error::DecompressionError;
pub use format::{Format, TokenLimits};
pub use token::{Token, TokenReader};
