use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

use crate::error::{CodecError, Result};

/// A 32-byte hash held in display byte order.
///
/// Hash digests travel on the wire in the reverse of the order in which
/// they are conventionally printed (block explorers, RPC output). This type
/// stores the printable order and only flips the bytes at the wire boundary,
/// through [`Hash256::from_wire_bytes`] and [`Hash256::to_wire_bytes`].
///
/// ```
/// use qtum_header::Hash256;
///
/// let mut wire = [0u8; 32];
/// wire[0] = 0xab;
///
/// let hash = Hash256::from_wire_bytes(wire);
/// assert_eq!(hash.as_bytes()[31], 0xab);
/// assert_eq!(hash.to_wire_bytes(), wire);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Hash256([u8; 32]);

impl Hash256 {
    /// Size of the hash in bytes.
    pub const LEN: usize = 32;

    /// The all-zero hash, used as the "absent" value for `prev_hash`
    /// and `stake_prev_tx_id`.
    pub const ZERO: Hash256 = Hash256([0u8; 32]);

    /// Wraps bytes that are already in display order.
    pub const fn new(display: [u8; 32]) -> Self {
        Self(display)
    }

    /// Builds a hash from its wire representation.
    pub fn from_wire_bytes(mut wire: [u8; 32]) -> Self {
        wire.reverse();
        Self(wire)
    }

    /// Returns the wire representation.
    pub fn to_wire_bytes(&self) -> [u8; 32] {
        let mut wire = self.0;
        wire.reverse();
        wire
    }

    /// Returns the display-order bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }
}

/// Computes `SHA256(SHA256(data))`.
///
/// The result is in digest (wire) order.
pub fn double_sha256(data: &[u8]) -> [u8; 32] {
    let digest = Sha256::digest(Sha256::digest(data));

    let mut out = [0u8; 32];
    out.copy_from_slice(&digest);
    out
}

impl From<[u8; 32]> for Hash256 {
    fn from(display: [u8; 32]) -> Self {
        Self(display)
    }
}

impl TryFrom<&[u8]> for Hash256 {
    type Error = CodecError;

    /// Interprets the slice as display-order bytes.
    fn try_from(bytes: &[u8]) -> Result<Self> {
        let arr: [u8; 32] = bytes.try_into().map_err(|_| CodecError::InvalidLength {
            expected: Self::LEN,
            actual: bytes.len(),
        })?;
        Ok(Self(arr))
    }
}

impl AsRef<[u8]> for Hash256 {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl FromStr for Hash256 {
    type Err = CodecError;

    /// Parses the 64-character hex form, as printed.
    fn from_str(s: &str) -> Result<Self> {
        let bytes = hex::decode(s)?;
        Self::try_from(bytes.as_slice())
    }
}

impl fmt::LowerHex for Hash256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl fmt::Display for Hash256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(self, f)
    }
}

impl fmt::Debug for Hash256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hash256({})", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_conversion_reverses_bytes() {
        let mut wire = [0u8; 32];
        for (i, b) in wire.iter_mut().enumerate() {
            *b = i as u8;
        }

        let hash = Hash256::from_wire_bytes(wire);
        assert_eq!(hash.as_bytes()[0], 31);
        assert_eq!(hash.as_bytes()[31], 0);
        assert_eq!(hash.to_wire_bytes(), wire);
    }

    #[test]
    fn double_sha256_of_empty_input() {
        // SHA256(SHA256("")) = 5df6e0e2761359d30a8275058e299fcc0381534545f55cf43e41983f5d4c9456
        assert_eq!(
            hex::encode(double_sha256(&[])),
            "5df6e0e2761359d30a8275058e299fcc0381534545f55cf43e41983f5d4c9456"
        );
    }

    #[test]
    fn hex_round_trip_keeps_display_order() {
        let text = "000000000019d6689c085ae165831e934ff763ae46a2a6c172b3f1b60a8ce26f";
        let hash: Hash256 = text.parse().unwrap();

        assert_eq!(hash.as_bytes()[0], 0x00);
        assert_eq!(hash.as_bytes()[31], 0x6f);
        assert_eq!(hash.to_string(), text);
        assert_eq!(hash.to_wire_bytes()[0], 0x6f);
    }

    #[test]
    fn from_str_rejects_wrong_length() {
        let err = "abcd".parse::<Hash256>().unwrap_err();
        assert!(matches!(
            err,
            CodecError::InvalidLength {
                expected: 32,
                actual: 2
            }
        ));
    }

    #[test]
    fn from_str_rejects_non_hex() {
        assert!(matches!(
            "zz".parse::<Hash256>(),
            Err(CodecError::Hex(_))
        ));
    }

    #[test]
    fn zero_hash_is_zero() {
        assert!(Hash256::ZERO.is_zero());
        assert!(Hash256::default().is_zero());
        assert!(!Hash256::new([1u8; 32]).is_zero());
    }
}
