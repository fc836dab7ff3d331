//! Cursor-style byte primitives.
//!
//! This module provides the two halves every record codec in the crate is
//! built from:
//! - [`BufferReader`], a bounds-checked sequential reader over a borrowed slice
//! - [`BufferWriter`], an append-only accumulator producing the final bytes
//!
//! Both speak the same vocabulary: fixed-width integers in either byte order,
//! compact varints (see [`varint`]), length-prefixed buffers and 32-byte
//! hashes in display order.
pub mod reader;
pub mod varint;
pub mod writer;

pub use reader::BufferReader;
pub use varint::{encode_varint, varint_size};
pub use writer::BufferWriter;
