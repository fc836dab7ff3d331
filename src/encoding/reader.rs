use byteorder::{BigEndian, LittleEndian, ReadBytesExt};
use std::io::Cursor;

use super::varint::{self, MAX_SAFE_VARINT, TAG_U16, TAG_U32, TAG_U64};
use crate::error::{CodecError, Result};
use crate::hash::Hash256;

/// Sequential, bounds-checked reader over a borrowed byte slice.
///
/// Every read either consumes exactly the bytes it names and advances the
/// position, or fails with [`CodecError::Underrun`] and leaves the position
/// where it was.
///
/// ```
/// use qtum_header::encoding::BufferReader;
///
/// let bytes = [0x2a, 0xfd, 0x00, 0x01, 0xaa];
/// let mut reader = BufferReader::new(&bytes);
///
/// assert_eq!(reader.read_u8().unwrap(), 42);
/// assert_eq!(reader.read_varint().unwrap(), 256);
/// assert_eq!(reader.read_all(), &[0xaa]);
/// assert!(reader.at_end());
/// ```
#[derive(Debug, Clone)]
pub struct BufferReader<'a> {
    cursor: Cursor<&'a [u8]>,
}

impl<'a> BufferReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self {
            cursor: Cursor::new(buf),
        }
    }

    /// Current read offset from the start of the buffer.
    pub fn position(&self) -> usize {
        self.cursor.position() as usize
    }

    /// Total length of the underlying buffer.
    pub fn len(&self) -> usize {
        self.cursor.get_ref().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.len().saturating_sub(self.position())
    }

    /// True iff every byte has been consumed.
    pub fn at_end(&self) -> bool {
        self.remaining() == 0
    }

    fn ensure(&self, needed: usize, context: &'static str) -> Result<()> {
        let remaining = self.remaining();
        if needed > remaining {
            return Err(CodecError::Underrun {
                context,
                needed,
                remaining,
            });
        }
        Ok(())
    }

    fn take(&mut self, n: usize, context: &'static str) -> Result<&'a [u8]> {
        self.ensure(n, context)?;

        let buf: &'a [u8] = *self.cursor.get_ref();
        let start = self.position();
        let end = start + n;
        self.cursor.set_position(end as u64);

        Ok(&buf[start..end])
    }

    /// Reads exactly `n` raw bytes.
    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8]> {
        self.take(n, "bytes")
    }

    /// Reads everything left. Never fails; the result may be empty.
    pub fn read_all(&mut self) -> &'a [u8] {
        let buf: &'a [u8] = *self.cursor.get_ref();
        let start = self.position().min(buf.len());
        self.cursor.set_position(buf.len() as u64);
        &buf[start..]
    }

    /// Reads `n` bytes and returns them in reverse order.
    pub fn read_reverse(&mut self, n: usize) -> Result<Vec<u8>> {
        let mut out = self.take(n, "reversed bytes")?.to_vec();
        out.reverse();
        Ok(out)
    }

    /// Reads a 32-byte wire hash into display order.
    pub fn read_hash(&mut self) -> Result<Hash256> {
        let mut wire = [0u8; Hash256::LEN];
        wire.copy_from_slice(self.take(Hash256::LEN, "hash")?);
        Ok(Hash256::from_wire_bytes(wire))
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        self.ensure(1, "u8")?;
        Ok(self.cursor.read_u8()?)
    }

    pub fn read_u16_be(&mut self) -> Result<u16> {
        self.ensure(2, "u16")?;
        Ok(self.cursor.read_u16::<BigEndian>()?)
    }

    pub fn read_u16_le(&mut self) -> Result<u16> {
        self.ensure(2, "u16")?;
        Ok(self.cursor.read_u16::<LittleEndian>()?)
    }

    pub fn read_u32_be(&mut self) -> Result<u32> {
        self.ensure(4, "u32")?;
        Ok(self.cursor.read_u32::<BigEndian>()?)
    }

    pub fn read_u32_le(&mut self) -> Result<u32> {
        self.ensure(4, "u32")?;
        Ok(self.cursor.read_u32::<LittleEndian>()?)
    }

    pub fn read_i32_le(&mut self) -> Result<i32> {
        self.ensure(4, "i32")?;
        Ok(self.cursor.read_i32::<LittleEndian>()?)
    }

    pub fn read_u64_be(&mut self) -> Result<u64> {
        self.ensure(8, "u64")?;
        Ok(self.cursor.read_u64::<BigEndian>()?)
    }

    /// Reads an unsigned 64-bit little-endian integer. `u64` holds the full
    /// range exactly, so no precision check applies here.
    pub fn read_u64_le(&mut self) -> Result<u64> {
        self.ensure(8, "u64")?;
        Ok(self.cursor.read_u64::<LittleEndian>()?)
    }

    /// Reads a varint, rejecting values above 2^53.
    ///
    /// This is the read used for lengths and counts. Values that may exceed
    /// 2^53 must go through [`read_varint_big`](Self::read_varint_big).
    pub fn read_varint(&mut self) -> Result<u64> {
        let start = self.position();
        let value = self.read_varint_big()?;
        if value > MAX_SAFE_VARINT {
            self.cursor.set_position(start as u64);
            return Err(CodecError::PrecisionLoss { value });
        }
        Ok(value)
    }

    /// Reads a varint of any magnitude.
    ///
    /// Non-minimal encodings are accepted.
    pub fn read_varint_big(&mut self) -> Result<u64> {
        let start = self.position();
        let tag = self.read_u8().map_err(|e| relabel(e, "varint"))?;

        let value = match tag {
            TAG_U16 => self.read_u16_le().map(u64::from),
            TAG_U32 => self.read_u32_le().map(u64::from),
            TAG_U64 => self.read_u64_le(),
            n => Ok(u64::from(n)),
        };

        value.map_err(|e| {
            self.cursor.set_position(start as u64);
            relabel(e, varint_context(tag))
        })
    }

    /// Returns the raw bytes (tag and payload) of the next varint without
    /// interpreting them.
    pub fn read_varint_bytes(&mut self) -> Result<&'a [u8]> {
        self.ensure(1, "varint")?;
        let tag = self.cursor.get_ref()[self.position()];
        self.take(1 + varint::payload_len(tag), varint_context(tag))
    }

    /// Reads a varint length `L` followed by exactly `L` bytes.
    ///
    /// A declared length longer than the remaining input is an underrun,
    /// however large it is.
    pub fn read_length_prefixed_bytes(&mut self) -> Result<&'a [u8]> {
        let start = self.position();
        let len = self.read_varint_big()?;
        let len = usize::try_from(len).unwrap_or(usize::MAX);

        self.take(len, "length-prefixed bytes").map_err(|e| {
            self.cursor.set_position(start as u64);
            e
        })
    }
}

fn varint_context(tag: u8) -> &'static str {
    match tag {
        TAG_U16 => "varint:fd",
        TAG_U32 => "varint:fe",
        TAG_U64 => "varint:ff",
        _ => "varint",
    }
}

fn relabel(err: CodecError, context: &'static str) -> CodecError {
    match err {
        CodecError::Underrun {
            needed, remaining, ..
        } => CodecError::Underrun {
            context,
            needed,
            remaining,
        },
        other => other,
    }
}
