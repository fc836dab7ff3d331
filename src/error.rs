//! Error types for the cursor primitives and the header codec.

/// Errors raised while reading, writing or interpreting header bytes.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// A typed read asked for more bytes than the cursor still holds.
    #[error("underrun reading {context}: needed {needed} bytes, {remaining} remaining")]
    Underrun {
        context: &'static str,
        needed: usize,
        remaining: usize,
    },

    /// A varint read through the checked path exceeds 2^53.
    ///
    /// Use [`BufferReader::read_varint_big`](crate::encoding::BufferReader::read_varint_big)
    /// for values of that size.
    #[error("varint {value} too large to retain precision, use read_varint_big")]
    PrecisionLoss { value: u64 },

    /// A writer was handed a value that does not fit the unsigned field.
    #[error("value {value} out of range for an unsigned field")]
    Range { value: String },

    /// Compact `bits` with a zero mantissa encode a zero target.
    #[error("degenerate compact target 0x{bits:08x}: zero mantissa")]
    DegenerateTarget { bits: u32 },

    /// A hash was built from a slice of the wrong length.
    #[error("invalid length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// Bytes left over after a strict decode.
    #[error("{remaining} trailing bytes after header")]
    TrailingBytes { remaining: usize },

    /// Hexadecimal parsing error.
    #[error("Hex Parse Error: {0}")]
    Hex(#[from] hex::FromHexError),

    /// Io Error.
    ///
    /// Carries errors from the `byteorder` reads in
    /// [`BufferReader`](crate::encoding::BufferReader). Each of those reads is
    /// length-checked first and reports a short buffer as [`Underrun`](Self::Underrun),
    /// so this variant only catches what the cursor itself might still return.
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CodecError>;
