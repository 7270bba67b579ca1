//! Cursor over a byte slice plus the matching write helpers.
//!
//! Fields are read strictly in layout order. Reading past the end of the
//! buffer yields `MalformedInput` and leaves nothing half-built.

use crate::codes::WireCode;
use crate::error::WireError;
use crate::primitive::{
    bytes_to_long, bytes_to_short, long_to_bytes, short_to_bytes, LONG_LEN, SHORT_LEN,
};

/// Longest string a one-byte length prefix can announce.
pub const MAX_STR8_LEN: usize = u8::MAX as usize;

/// Longest block a two-byte length prefix can announce.
pub const MAX_BLOCK16_LEN: usize = u16::MAX as usize;

pub struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    pub fn remaining(&self) -> usize {
        self.buf.len().saturating_sub(self.pos)
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn read_u8(&mut self, field: &str) -> Result<u8, WireError> {
        let bytes = self.read_bytes(1, field)?;
        Ok(bytes[0])
    }

    pub fn read_bytes(&mut self, len: usize, field: &str) -> Result<&'a [u8], WireError> {
        let end = self
            .pos
            .checked_add(len)
            .filter(|end| *end <= self.buf.len())
            .ok_or_else(|| {
                WireError::malformed(format!(
                    "{}: need {} bytes at offset {}, {} left",
                    field,
                    len,
                    self.pos,
                    self.remaining()
                ))
            })?;
        let slice = &self.buf[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    fn read_fixed<const N: usize>(&mut self, field: &str) -> Result<[u8; N], WireError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(N, field)?);
        Ok(out)
    }

    pub fn read_i64(&mut self, field: &str) -> Result<i64, WireError> {
        Ok(bytes_to_long(self.read_fixed::<LONG_LEN>(field)?))
    }

    /// Length prefixes are unsigned; the signed short is reinterpreted.
    pub fn read_u16(&mut self, field: &str) -> Result<u16, WireError> {
        Ok(bytes_to_short(self.read_fixed::<SHORT_LEN>(field)?) as u16)
    }

    pub fn read_code<T: WireCode>(&mut self, field: &str) -> Result<T, WireError> {
        T::from_code(self.read_u8(field)?)
    }

    /// One length byte followed by that many UTF-8 bytes.
    pub fn read_str8(&mut self, field: &str) -> Result<String, WireError> {
        let len = self.read_u8(field)? as usize;
        let bytes = self.read_bytes(len, field)?;
        String::from_utf8(bytes.to_vec())
            .map_err(|_| WireError::malformed(format!("{}: not valid UTF-8", field)))
    }

    /// Two length bytes followed by that many raw bytes.
    pub fn read_block16(&mut self, field: &str) -> Result<&'a [u8], WireError> {
        let len = self.read_u16(field)? as usize;
        self.read_bytes(len, field)
    }

    /// Everything not consumed yet.
    pub fn read_rest(&mut self) -> &'a [u8] {
        let rest = &self.buf[self.pos.min(self.buf.len())..];
        self.pos = self.buf.len();
        rest
    }
}

pub fn put_code<T: WireCode>(out: &mut Vec<u8>, value: T) {
    out.push(value.code());
}

pub fn put_i64(out: &mut Vec<u8>, value: i64) {
    out.extend_from_slice(&long_to_bytes(value));
}

/// Caller guarantees `value.len() <= MAX_STR8_LEN`.
pub fn put_str8(out: &mut Vec<u8>, value: &str) {
    debug_assert!(value.len() <= MAX_STR8_LEN);
    out.push(value.len() as u8);
    out.extend_from_slice(value.as_bytes());
}

/// Caller guarantees `value.len() <= MAX_BLOCK16_LEN`.
pub fn put_block16(out: &mut Vec<u8>, value: &[u8]) {
    debug_assert!(value.len() <= MAX_BLOCK16_LEN);
    out.extend_from_slice(&short_to_bytes(value.len() as u16 as i16));
    out.extend_from_slice(value);
}
