//! Proof-of-stake block header record.
//!
//! A header extends the classic 80-byte Bitcoin header with two state
//! roots, a reference to the staking input and a block signature:
//!
//! ```text
//! offset  size  field               encoding
//! 0       4     version             i32 LE
//! 4       32    prev_hash           hash, wire order
//! 36      32    merkle_root         hash, wire order
//! 68      4     timestamp           u32 LE
//! 72      4     bits                u32 LE
//! 76      4     nonce               u32 LE
//! 80      32    hash_state_root     hash, wire order
//! 112     32    hash_utxo_root      hash, wire order
//! 144     32    stake_prev_tx_id    hash, wire order
//! 176     4     stake_output_index  u32 LE
//! 180     var   signature           varint length + bytes
//! ```
//!
//! All hash fields are held in display order (see [`Hash256`]).
pub mod constants;
pub mod difficulty;

use std::fmt;
use std::sync::OnceLock;

use tracing::{debug, trace};

use crate::encoding::{varint_size, BufferReader, BufferWriter};
use crate::error::{CodecError, Result};
use crate::hash::{double_sha256, Hash256};
use constants::{GENESIS_BITS, HEADER_FIXED_SIZE, NO_STAKE_OUTPUT_INDEX};

/// The eleven fields of a header, in wire order.
///
/// Every field must be given. A header without a parent (genesis) uses
/// [`Hash256::ZERO`] for `prev_hash`; a proof-of-work header uses
/// [`Hash256::ZERO`] and [`NO_STAKE_OUTPUT_INDEX`] for the stake fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderFields {
    pub version: i32,
    pub prev_hash: Hash256,
    pub merkle_root: Hash256,
    /// Seconds since the Unix epoch.
    pub timestamp: u32,
    /// Compact target encoding.
    pub bits: u32,
    pub nonce: u32,
    pub hash_state_root: Hash256,
    pub hash_utxo_root: Hash256,
    pub stake_prev_tx_id: Hash256,
    pub stake_output_index: u32,
    pub signature: Vec<u8>,
}

/// A block header with a lazily computed, cached identity hash.
///
/// Fields are read-only. To change one, take the fields out with
/// [`Header::into_fields`] and build a new header; the new value starts with
/// an empty hash cache.
#[derive(Clone)]
pub struct Header {
    fields: HeaderFields,
    hash: OnceLock<Hash256>,
}

impl Header {
    pub fn new(fields: HeaderFields) -> Self {
        Self {
            fields,
            hash: OnceLock::new(),
        }
    }

    /// Decodes a header from the start of `bytes`.
    ///
    /// Bytes after the signature are ignored; use
    /// [`from_bytes_exact`](Self::from_bytes_exact) to reject them.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::Underrun`] if the input ends inside any field.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::decode(bytes, false)
    }

    /// Decodes a header that must span `bytes` exactly.
    pub fn from_bytes_exact(bytes: &[u8]) -> Result<Self> {
        Self::decode(bytes, true)
    }

    fn decode(bytes: &[u8], exact: bool) -> Result<Self> {
        let mut reader = BufferReader::new(bytes);

        let decoded = Self::from_reader(&mut reader).and_then(|header| {
            if exact && !reader.at_end() {
                return Err(CodecError::TrailingBytes {
                    remaining: reader.remaining(),
                });
            }
            Ok(header)
        });

        decoded.map_err(|e| {
            debug!(error = %e, len = bytes.len(), exact, "header decode failed");
            e
        })
    }

    /// Decodes a header from hex text.
    pub fn from_hex(text: &str) -> Result<Self> {
        let bytes = hex::decode(text.trim())?;
        Self::from_bytes(&bytes)
    }

    /// Reads a header from the reader's current position, leaving the reader
    /// positioned right after the signature.
    pub fn from_reader(reader: &mut BufferReader<'_>) -> Result<Self> {
        let start = reader.position();

        let version = reader.read_i32_le()?;
        let prev_hash = reader.read_hash()?;
        let merkle_root = reader.read_hash()?;
        let timestamp = reader.read_u32_le()?;
        let bits = reader.read_u32_le()?;
        let nonce = reader.read_u32_le()?;
        let hash_state_root = reader.read_hash()?;
        let hash_utxo_root = reader.read_hash()?;
        let stake_prev_tx_id = reader.read_hash()?;
        let stake_output_index = reader.read_u32_le()?;
        let signature = reader.read_length_prefixed_bytes()?.to_vec();

        trace!(
            version,
            signature_len = signature.len(),
            consumed = reader.position() - start,
            "decoded header"
        );

        Ok(Self::new(HeaderFields {
            version,
            prev_hash,
            merkle_root,
            timestamp,
            bits,
            nonce,
            hash_state_root,
            hash_utxo_root,
            stake_prev_tx_id,
            stake_output_index,
            signature,
        }))
    }

    /// Appends the canonical encoding to `writer`.
    pub fn write_to(&self, writer: &mut BufferWriter) {
        let f = &self.fields;

        writer
            .write_i32_le(f.version)
            .write_hash(&f.prev_hash)
            .write_hash(&f.merkle_root)
            .write_u32_le(f.timestamp)
            .write_u32_le(f.bits)
            .write_u32_le(f.nonce)
            .write_hash(&f.hash_state_root)
            .write_hash(&f.hash_utxo_root)
            .write_hash(&f.stake_prev_tx_id)
            .write_u32_le(f.stake_output_index)
            .write_length_prefixed_bytes(&f.signature);
    }

    /// Canonical wire encoding.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut writer = BufferWriter::with_capacity(self.encoded_len());
        self.write_to(&mut writer);
        writer.into_bytes()
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// Length of [`to_bytes`](Self::to_bytes) without encoding.
    pub fn encoded_len(&self) -> usize {
        let sig = self.fields.signature.len();
        HEADER_FIXED_SIZE + varint_size(sig as u64) + sig
    }

    /// Identity hash: `SHA256(SHA256(to_bytes()))` in display order.
    ///
    /// Computed on first use and cached for the lifetime of the value.
    pub fn hash(&self) -> Hash256 {
        *self
            .hash
            .get_or_init(|| Hash256::from_wire_bytes(double_sha256(&self.to_bytes())))
    }

    /// Same value as [`hash`](Self::hash).
    pub fn id(&self) -> Hash256 {
        self.hash()
    }

    /// True iff the header references a staking input: a non-zero
    /// `stake_prev_tx_id` and a `stake_output_index` other than
    /// [`NO_STAKE_OUTPUT_INDEX`].
    pub fn is_proof_of_stake(&self) -> bool {
        !self.fields.stake_prev_tx_id.is_zero()
            && self.fields.stake_output_index != NO_STAKE_OUTPUT_INDEX
    }

    /// Difficulty relative to [`GENESIS_BITS`].
    ///
    /// # Errors
    ///
    /// [`CodecError::DegenerateTarget`] if `bits` has a zero mantissa.
    ///
    /// A target too large for `f64` gives `Ok(0.0)`, see
    /// [`difficulty::difficulty`].
    pub fn difficulty(&self) -> Result<f64> {
        self.difficulty_with_genesis(GENESIS_BITS)
    }

    /// Difficulty relative to an arbitrary reference target.
    pub fn difficulty_with_genesis(&self, genesis_bits: u32) -> Result<f64> {
        difficulty::difficulty(self.fields.bits, genesis_bits)
    }

    /// The target encoded by `bits`.
    pub fn target(&self) -> f64 {
        difficulty::target_magnitude(self.fields.bits)
    }

    pub fn fields(&self) -> &HeaderFields {
        &self.fields
    }

    pub fn into_fields(self) -> HeaderFields {
        self.fields
    }

    pub fn version(&self) -> i32 {
        self.fields.version
    }

    pub fn prev_hash(&self) -> Hash256 {
        self.fields.prev_hash
    }

    pub fn merkle_root(&self) -> Hash256 {
        self.fields.merkle_root
    }

    pub fn timestamp(&self) -> u32 {
        self.fields.timestamp
    }

    pub fn bits(&self) -> u32 {
        self.fields.bits
    }

    pub fn nonce(&self) -> u32 {
        self.fields.nonce
    }

    pub fn hash_state_root(&self) -> Hash256 {
        self.fields.hash_state_root
    }

    pub fn hash_utxo_root(&self) -> Hash256 {
        self.fields.hash_utxo_root
    }

    pub fn stake_prev_tx_id(&self) -> Hash256 {
        self.fields.stake_prev_tx_id
    }

    pub fn stake_output_index(&self) -> u32 {
        self.fields.stake_output_index
    }

    pub fn signature(&self) -> &[u8] {
        &self.fields.signature
    }
}

impl From<HeaderFields> for Header {
    fn from(fields: HeaderFields) -> Self {
        Self::new(fields)
    }
}

impl PartialEq for Header {
    fn eq(&self, other: &Self) -> bool {
        self.fields == other.fields
    }
}

impl Eq for Header {}

/// `{:?}` renders a one-line summary, `<Header {hash}>`.
/// `{:#?}` renders every field, hashes and signature as hex.
impl fmt::Debug for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !f.alternate() {
            return write!(f, "<Header {}>", self.hash());
        }

        let h = &self.fields;
        f.debug_struct("Header")
            .field("hash", &format_args!("{}", self.hash()))
            .field("version", &h.version)
            .field("prev_hash", &format_args!("{}", h.prev_hash))
            .field("merkle_root", &format_args!("{}", h.merkle_root))
            .field("timestamp", &h.timestamp)
            .field("bits", &format_args!("0x{:08x}", h.bits))
            .field("nonce", &h.nonce)
            .field("hash_state_root", &format_args!("{}", h.hash_state_root))
            .field("hash_utxo_root", &format_args!("{}", h.hash_utxo_root))
            .field("stake_prev_tx_id", &format_args!("{}", h.stake_prev_tx_id))
            .field("stake_output_index", &h.stake_output_index)
            .field("signature", &format_args!("{}", hex::encode(&h.signature)))
            .finish()
    }
}
