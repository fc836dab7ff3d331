//! Byte-exact codec for proof-of-stake block headers.
//!
//! The crate is layered leaves-first:
//! - [`encoding`]: cursor-style [`BufferReader`](encoding::BufferReader) and
//!   [`BufferWriter`](encoding::BufferWriter), varints, length-prefixed buffers
//! - [`header`]: the [`Header`] record, its wire layout, identity hash,
//!   proof-of-stake classification and difficulty
//!
//! ```
//! use qtum_header::Header;
//!
//! let bytes = [0u8; 181];
//! let header = Header::from_bytes(&bytes).unwrap();
//!
//! assert!(!header.is_proof_of_stake());
//! assert_eq!(header.to_bytes(), bytes.to_vec());
//! ```
pub mod encoding;
pub mod error;
pub mod hash;
pub mod header;

pub use error::{CodecError, Result};
pub use hash::{double_sha256, Hash256};
pub use header::{Header, HeaderFields};
