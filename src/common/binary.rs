//! Bounds-checked binary reading shared by every decoder in the crate.
//!
//! All parsing goes through [`ByteCursor`], a forward-only reader over a
//! borrowed byte buffer. A cursor may be limited to a region of the buffer so
//! that nested records can never read past the element that contains them.

use crate::common::error::{Error, Result};
use zerocopy::{FromBytes, I16, I32, Immutable, KnownLayout, LE, U16, U32, Unaligned};

/// Sequential little-endian reader over a borrowed buffer.
///
/// The cursor owns a single position. Every read advances it by exactly the
/// number of bytes consumed; a read that would cross [`limit`](Self::limit)
/// fails with [`Error::TruncatedInput`] and leaves the position unchanged.
///
/// # Examples
///
/// ```
/// use blipkit::common::binary::ByteCursor;
///
/// let data = [0x34, 0x12, 0x78, 0x56, 0x34, 0x12];
/// let mut cursor = ByteCursor::new(&data);
/// assert_eq!(cursor.read_u16_le().unwrap(), 0x1234);
/// assert_eq!(cursor.read_u32_le().unwrap(), 0x12345678);
/// assert!(cursor.read_u8().is_err());
/// ```
#[derive(Debug, Clone)]
pub struct ByteCursor<'data> {
    data: &'data [u8],
    start: usize,
    position: usize,
    limit: usize,
}

impl<'data> ByteCursor<'data> {
    /// Create a cursor over the whole buffer, positioned at offset 0.
    #[inline]
    pub fn new(data: &'data [u8]) -> Self {
        Self {
            data,
            start: 0,
            position: 0,
            limit: data.len(),
        }
    }

    /// Create a cursor over `[start, end)` of `data`.
    ///
    /// Both bounds are clamped to the buffer length, so a declared region
    /// that overruns the buffer simply ends where the buffer ends.
    #[inline]
    pub fn with_region(data: &'data [u8], start: usize, end: usize) -> Self {
        let limit = end.min(data.len());
        let start = start.min(limit);
        Self {
            data,
            start,
            position: start,
            limit,
        }
    }

    /// Absolute offset of the first byte of the region.
    #[inline]
    pub const fn start(&self) -> usize {
        self.start
    }

    /// Absolute offset of the next byte to be read.
    #[inline]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Absolute offset one past the last readable byte.
    #[inline]
    pub const fn limit(&self) -> usize {
        self.limit
    }

    /// Number of bytes left before the limit.
    #[inline]
    pub const fn remaining(&self) -> usize {
        self.limit - self.position
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.position >= self.limit
    }

    /// Move to an absolute offset inside `[start, limit]`.
    ///
    /// Used to restore a snapshot taken with [`position`](Self::position).
    pub fn seek(&mut self, position: usize) -> Result<()> {
        if position < self.start || position > self.limit {
            return Err(Error::TruncatedInput {
                offset: position,
                needed: 0,
                available: 0,
            });
        }
        self.position = position;
        Ok(())
    }

    /// Sub-cursor over the next `len` bytes (clamped to this cursor's limit).
    ///
    /// The parent position is not advanced.
    #[inline]
    pub fn region(&self, len: usize) -> ByteCursor<'data> {
        let end = self.position.saturating_add(len).min(self.limit);
        Self {
            data: self.data,
            start: self.position,
            position: self.position,
            limit: end,
        }
    }

    #[inline]
    fn ensure(&self, needed: usize) -> Result<()> {
        if needed > self.remaining() {
            return Err(Error::TruncatedInput {
                offset: self.position,
                needed,
                available: self.remaining(),
            });
        }
        Ok(())
    }

    /// Borrow the next `len` bytes and advance past them.
    pub fn read_bytes(&mut self, len: usize) -> Result<&'data [u8]> {
        self.ensure(len)?;
        let bytes = &self.data[self.position..self.position + len];
        self.position += len;
        Ok(bytes)
    }

    /// Copy the next `N` bytes into an array.
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(N)?);
        Ok(out)
    }

    /// Skip `len` bytes without inspecting them.
    pub fn skip(&mut self, len: usize) -> Result<()> {
        self.ensure(len)?;
        self.position += len;
        Ok(())
    }

    #[inline]
    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read_bytes(1)?[0])
    }

    #[inline]
    pub fn read_u16_le(&mut self) -> Result<u16> {
        Ok(self.read_struct::<U16<LE>>()?.get())
    }

    #[inline]
    pub fn read_i16_le(&mut self) -> Result<i16> {
        Ok(self.read_struct::<I16<LE>>()?.get())
    }

    #[inline]
    pub fn read_u32_le(&mut self) -> Result<u32> {
        Ok(self.read_struct::<U32<LE>>()?.get())
    }

    #[inline]
    pub fn read_i32_le(&mut self) -> Result<i32> {
        Ok(self.read_struct::<I32<LE>>()?.get())
    }

    /// Read a fixed-layout, alignment-free structure straight from the buffer.
    pub fn read_struct<T>(&mut self) -> Result<T>
    where
        T: FromBytes + KnownLayout + Immutable + Unaligned,
    {
        let size = core::mem::size_of::<T>();
        let bytes = self.read_bytes(size)?;
        T::read_from_bytes(bytes).map_err(|_| Error::TruncatedInput {
            offset: self.position - size,
            needed: size,
            available: bytes.len(),
        })
    }
}

/// Decode a UTF-16LE string, stopping at the first NUL code unit.
///
/// Unpaired surrogates are replaced with U+FFFD.
///
/// # Examples
///
/// ```
/// use blipkit::common::binary::parse_utf16le_string;
/// let data = [0x48, 0x00, 0x69, 0x00, 0x00, 0x00, 0x41, 0x00];
/// assert_eq!(parse_utf16le_string(&data), "Hi");
/// ```
pub fn parse_utf16le_string(data: &[u8]) -> String {
    let units = data
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .take_while(|&unit| unit != 0);
    char::decode_utf16(units)
        .map(|c| c.unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect()
}
