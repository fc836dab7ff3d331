//! Compact unsigned integers ("varints", Bitcoin's CompactSize).
//!
//! ```text
//! value             encoding
//! 0x00..=0xFC       1 byte, the value itself
//! ..=0xFFFF         0xFD + u16 LE
//! ..=0xFFFF_FFFF    0xFE + u32 LE
//! otherwise         0xFF + u64 LE
//! ```
//!
//! Writers always pick the smallest encoding. Readers accept any tag for any
//! value, so `0xFE 0x01 0x00 0x00 0x00` decodes to 1 just like `0x01` does.

/// Tag announcing a 2-byte little-endian payload.
pub const TAG_U16: u8 = 0xFD;
/// Tag announcing a 4-byte little-endian payload.
pub const TAG_U32: u8 = 0xFE;
/// Tag announcing an 8-byte little-endian payload.
pub const TAG_U64: u8 = 0xFF;

/// Largest value returned by the checked varint read (2^53).
pub const MAX_SAFE_VARINT: u64 = 1 << 53;

/// Number of bytes the minimal encoding of `value` occupies.
pub const fn varint_size(value: u64) -> usize {
    if value < TAG_U16 as u64 {
        1
    } else if value <= 0xFFFF {
        3
    } else if value <= 0xFFFF_FFFF {
        5
    } else {
        9
    }
}

/// Payload width that follows a given tag byte (0 for single-byte values).
pub const fn payload_len(tag: u8) -> usize {
    match tag {
        TAG_U16 => 2,
        TAG_U32 => 4,
        TAG_U64 => 8,
        _ => 0,
    }
}

/// Encodes `value` with the minimal-width tag.
///
/// ```
/// use qtum_header::encoding::encode_varint;
///
/// assert_eq!(encode_varint(252), vec![252]);
/// assert_eq!(encode_varint(253), vec![0xfd, 253, 0]);
/// assert_eq!(encode_varint(0x10000), vec![0xfe, 0, 0, 1, 0]);
/// ```
pub fn encode_varint(value: u64) -> Vec<u8> {
    let mut out = Vec::with_capacity(varint_size(value));
    push_varint(&mut out, value);
    out
}

pub(crate) fn push_varint(out: &mut Vec<u8>, value: u64) {
    match varint_size(value) {
        1 => out.push(value as u8),
        3 => {
            out.push(TAG_U16);
            out.extend_from_slice(&(value as u16).to_le_bytes());
        }
        5 => {
            out.push(TAG_U32);
            out.extend_from_slice(&(value as u32).to_le_bytes());
        }
        _ => {
            out.push(TAG_U64);
            out.extend_from_slice(&value.to_le_bytes());
        }
    }
}
