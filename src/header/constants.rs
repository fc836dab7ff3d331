/// Compact target of the network's minimum-difficulty (genesis) block.
///
/// Difficulty is reported relative to this target: a header whose `bits`
/// equal `GENESIS_BITS` has difficulty exactly `1.0`.
///
/// Decoded: exponent `0x1f`, mantissa `0x00ffff`, so the target is
/// `0xffff * 2^(8 * (0x1f - 3))`.
///
/// Bitcoin mainnet uses `0x1d00ffff` here; against this constant a Bitcoin
/// genesis-difficulty header reports `65536.0`.
pub const GENESIS_BITS: u32 = 0x1f00_ffff;

/// Size of the fixed-width part of a serialized header, everything before
/// the length-prefixed signature.
///
/// ```text
/// 4   version
/// 32  prev_hash
/// 32  merkle_root
/// 4   timestamp
/// 4   bits
/// 4   nonce
/// 32  hash_state_root
/// 32  hash_utxo_root
/// 32  stake_prev_tx_id
/// 4   stake_output_index
/// ```
pub const HEADER_FIXED_SIZE: usize = 180;

/// `stake_output_index` value meaning "no staking input" (proof-of-work header).
pub const NO_STAKE_OUTPUT_INDEX: u32 = 0xffff_ffff;
