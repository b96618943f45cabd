//! Minimal protobuf wire-format reader.

use bytes::{Buf, Bytes};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WireError {
    Truncated,
    VarintOverflow,
    UnsupportedWireType(u8),
    InvalidFieldNumber,
}

impl fmt::Display for WireError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WireError::Truncated => f.write_str("truncated protobuf message"),
            WireError::VarintOverflow => f.write_str("varint longer than 10 bytes"),
            WireError::UnsupportedWireType(t) => write!(f, "unsupported wire type {}", t),
            WireError::InvalidFieldNumber => f.write_str("field number 0"),
        }
    }
}

impl std::error::Error for WireError {}

/// One decoded field value. Length-delimited values share the input buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WireValue {
    Varint(u64),
    Fixed64(u64),
    Bytes(Bytes),
    Fixed32(u32),
}

impl WireValue {
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            WireValue::Varint(v) | WireValue::Fixed64(v) => Some(*v),
            WireValue::Fixed32(v) => Some(u64::from(*v)),
            WireValue::Bytes(_) => None,
        }
    }

    pub fn as_u32(&self) -> Option<u32> {
        match self {
            WireValue::Fixed32(v) => Some(*v),
            WireValue::Varint(v) | WireValue::Fixed64(v) => u32::try_from(*v).ok(),
            WireValue::Bytes(_) => None,
        }
    }

    /// Enums are varint-encoded `int32`; negative values arrive sign-extended.
    pub fn as_enum(&self) -> Option<i32> {
        match self {
            WireValue::Varint(v) => Some(*v as i64 as i32),
            _ => None,
        }
    }

    pub fn into_bytes(self) -> Option<Bytes> {
        match self {
            WireValue::Bytes(b) => Some(b),
            _ => None,
        }
    }
}

/// Iterates `(field number, value)` pairs of one message.
pub struct FieldReader {
    buf: Bytes,
}

impl FieldReader {
    pub fn new(buf: Bytes) -> Self {
        Self { buf }
    }

    fn read_varint(&mut self) -> Result<u64, WireError> {
        let mut value = 0u64;
        for i in 0..10 {
            if !self.buf.has_remaining() {
                return Err(WireError::Truncated);
            }
            let byte = self.buf.get_u8();
            value |= u64::from(byte & 0x7f) << (7 * i);
            if byte & 0x80 == 0 {
                return Ok(value);
            }
        }
        Err(WireError::VarintOverflow)
    }

    fn next_field(&mut self) -> Result<(u32, WireValue), WireError> {
        let key = self.read_varint()?;
        let field = u32::try_from(key >> 3).map_err(|_| WireError::InvalidFieldNumber)?;
        if field == 0 {
            return Err(WireError::InvalidFieldNumber);
        }

        let value = match (key & 0x07) as u8 {
            0 => WireValue::Varint(self.read_varint()?),
            1 => {
                if self.buf.remaining() < 8 {
                    return Err(WireError::Truncated);
                }
                WireValue::Fixed64(self.buf.get_u64_le())
            }
            2 => {
                let len = usize::try_from(self.read_varint()?).map_err(|_| WireError::Truncated)?;
                if self.buf.remaining() < len {
                    return Err(WireError::Truncated);
                }
                WireValue::Bytes(self.buf.split_to(len))
            }
            5 => {
                if self.buf.remaining() < 4 {
                    return Err(WireError::Truncated);
                }
                WireValue::Fixed32(self.buf.get_u32_le())
            }
            other => return Err(WireError::UnsupportedWireType(other)),
        };
        Ok((field, value))
    }
}

impl Iterator for FieldReader {
    type Item = Result<(u32, WireValue), WireError>;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.buf.has_remaining() {
            return None;
        }
        let item = self.next_field();
        if item.is_err() {
            self.buf.clear();
        }
        Some(item)
    }
}
