//! Compact target ("bits") decoding.
//!
//! A compact target packs a large number into 32 bits: the top byte is a
//! base-256 exponent and the low 24 bits are the mantissa.
//!
//! ```text
//! target = mantissa * 2^(8 * (exponent - 3))
//! ```
//!
//! Unlike Bitcoin's `SetCompact`, bit 23 of the mantissa is not a sign bit:
//! all 24 bits count towards the magnitude.

use crate::error::{CodecError, Result};

pub const fn exponent(bits: u32) -> u32 {
    bits >> 24
}

pub const fn mantissa(bits: u32) -> u32 {
    bits & 0x00ff_ffff
}

/// The target encoded by `bits`, as a float.
///
/// Returns `0.0` for a zero mantissa, whatever the exponent. Past `f64::MAX`
/// the result is `f64::INFINITY`: that starts at exponent `0x81` for
/// mantissas of `0x010000` and above and covers every nonzero mantissa from
/// `0x83` up.
pub fn target_magnitude(bits: u32) -> f64 {
    let m = mantissa(bits);
    if m == 0 {
        return 0.0;
    }
    let shift = 8 * (exponent(bits) as i32 - 3);
    f64::from(m) * 2f64.powi(shift)
}

/// Difficulty of `bits` relative to `genesis_bits`.
///
/// Fails with [`CodecError::DegenerateTarget`] when either target has a zero
/// mantissa, since the ratio would be infinite or zero without meaning.
///
/// A `bits` target too large for `f64` (see [`target_magnitude`]) yields
/// `Ok(0.0)`: the true ratio is below the smallest positive `f64`, so zero is
/// the closest representable value. If `genesis_bits` is the one that
/// overflows, the result is `Ok(f64::INFINITY)`.
pub fn difficulty(bits: u32, genesis_bits: u32) -> Result<f64> {
    for b in [bits, genesis_bits] {
        if mantissa(b) == 0 {
            return Err(CodecError::DegenerateTarget { bits: b });
        }
    }

    Ok(target_magnitude(genesis_bits) / target_magnitude(bits))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::constants::GENESIS_BITS;

    #[test]
    fn splits_exponent_and_mantissa() {
        assert_eq!(exponent(0x1d00ffff), 0x1d);
        assert_eq!(mantissa(0x1d00ffff), 0x00ffff);
        assert_eq!(exponent(0x1f00ffff), 0x1f);
    }

    #[test]
    fn target_magnitude_matches_formula() {
        assert_eq!(target_magnitude(0x03123456), 0x123456 as f64);
        assert_eq!(target_magnitude(0x04000001), 256.0);
        assert_eq!(target_magnitude(0x02000100), 1.0);
        assert_eq!(target_magnitude(0x1d000000), 0.0);
        assert_eq!(target_magnitude(0xff000000), 0.0);
    }

    #[test]
    fn genesis_bits_have_unit_difficulty() {
        assert_eq!(difficulty(GENESIS_BITS, GENESIS_BITS).unwrap(), 1.0);
    }

    #[test]
    fn bitcoin_genesis_target_is_two_bytes_harder() {
        // 0x1d00ffff is 2^16 times smaller than 0x1f00ffff
        assert_eq!(difficulty(0x1d00ffff, GENESIS_BITS).unwrap(), 65536.0);
    }

    #[test]
    fn smaller_target_means_higher_difficulty() {
        let easy = difficulty(0x1f00ffff, GENESIS_BITS).unwrap();
        let hard = difficulty(0x1e00ffff, GENESIS_BITS).unwrap();
        assert_eq!(hard, 256.0);
        assert!(hard > easy);
    }

    #[test]
    fn overflowing_target_gives_zero_difficulty() {
        assert_eq!(target_magnitude(0xff000001), f64::INFINITY);
        assert_eq!(target_magnitude(0x81010000), f64::INFINITY);
        assert!(target_magnitude(0x80ffffff).is_finite());
        assert!(target_magnitude(0x82000001).is_finite());
        assert_eq!(difficulty(0xff000001, GENESIS_BITS).unwrap(), 0.0);
        assert_eq!(
            difficulty(GENESIS_BITS, 0xff000001).unwrap(),
            f64::INFINITY
        );
    }

    #[test]
    fn zero_mantissa_is_rejected() {
        assert!(matches!(
            difficulty(0x1d000000, GENESIS_BITS),
            Err(CodecError::DegenerateTarget { bits: 0x1d000000 })
        ));
        assert!(matches!(
            difficulty(GENESIS_BITS, 0),
            Err(CodecError::DegenerateTarget { bits: 0 })
        ));
    }
}
