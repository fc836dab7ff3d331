use byteorder::{BigEndian, ByteOrder, LittleEndian};
use std::fmt::Display;

use super::varint::push_varint;
use crate::error::{CodecError, Result};
use crate::hash::Hash256;

/// Append-only byte accumulator, the inverse of
/// [`BufferReader`](super::BufferReader).
///
/// Fixed-width writes cannot fail and return `&mut Self` so calls chain.
/// Writes that take a caller-chosen integer type (`write_varint`,
/// `write_u64_le`, `write_u64_be`) fail with [`CodecError::Range`] when the
/// value is negative or does not fit in 64 bits.
///
/// ```
/// use qtum_header::encoding::BufferWriter;
///
/// let mut w = BufferWriter::new();
/// w.write_u8(1).write_u16_le(0x0203);
/// w.write_varint(300u32).unwrap();
///
/// assert_eq!(w.to_bytes(), vec![0x01, 0x03, 0x02, 0xfd, 0x2c, 0x01]);
/// assert!(w.write_varint(-1i64).is_err());
/// ```
#[derive(Debug, Default, Clone)]
pub struct BufferWriter {
    buf: Vec<u8>,
}

impl BufferWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Bytes written so far.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) -> &mut Self {
        self.buf.extend_from_slice(bytes);
        self
    }

    /// Writes `bytes` in reverse order.
    pub fn write_reverse(&mut self, bytes: &[u8]) -> &mut Self {
        self.buf.extend(bytes.iter().rev());
        self
    }

    /// Writes a display-order hash in wire order.
    pub fn write_hash(&mut self, hash: &Hash256) -> &mut Self {
        self.buf.extend_from_slice(&hash.to_wire_bytes());
        self
    }

    pub fn write_u8(&mut self, n: u8) -> &mut Self {
        self.buf.push(n);
        self
    }

    pub fn write_u16_le(&mut self, n: u16) -> &mut Self {
        let mut b = [0u8; 2];
        LittleEndian::write_u16(&mut b, n);
        self.write_bytes(&b)
    }

    pub fn write_u16_be(&mut self, n: u16) -> &mut Self {
        let mut b = [0u8; 2];
        BigEndian::write_u16(&mut b, n);
        self.write_bytes(&b)
    }

    pub fn write_u32_le(&mut self, n: u32) -> &mut Self {
        let mut b = [0u8; 4];
        LittleEndian::write_u32(&mut b, n);
        self.write_bytes(&b)
    }

    pub fn write_u32_be(&mut self, n: u32) -> &mut Self {
        let mut b = [0u8; 4];
        BigEndian::write_u32(&mut b, n);
        self.write_bytes(&b)
    }

    pub fn write_i32_le(&mut self, n: i32) -> &mut Self {
        let mut b = [0u8; 4];
        LittleEndian::write_i32(&mut b, n);
        self.write_bytes(&b)
    }

    pub fn write_u64_le<N>(&mut self, n: N) -> Result<&mut Self>
    where
        N: TryInto<u64> + Copy + Display,
    {
        let mut b = [0u8; 8];
        LittleEndian::write_u64(&mut b, to_unsigned(n)?);
        Ok(self.write_bytes(&b))
    }

    pub fn write_u64_be<N>(&mut self, n: N) -> Result<&mut Self>
    where
        N: TryInto<u64> + Copy + Display,
    {
        let mut b = [0u8; 8];
        BigEndian::write_u64(&mut b, to_unsigned(n)?);
        Ok(self.write_bytes(&b))
    }

    /// Writes `n` as a minimal-width varint.
    pub fn write_varint<N>(&mut self, n: N) -> Result<&mut Self>
    where
        N: TryInto<u64> + Copy + Display,
    {
        let n = to_unsigned(n)?;
        push_varint(&mut self.buf, n);
        Ok(self)
    }

    /// Writes the varint length of `bytes`, then `bytes`.
    pub fn write_length_prefixed_bytes(&mut self, bytes: &[u8]) -> &mut Self {
        push_varint(&mut self.buf, bytes.len() as u64);
        self.write_bytes(bytes)
    }

    /// Returns a copy of everything written so far.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.buf.clone()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}

fn to_unsigned<N>(n: N) -> Result<u64>
where
    N: TryInto<u64> + Copy + Display,
{
    n.try_into().map_err(|_| CodecError::Range {
        value: n.to_string(),
    })
}
