//! Byte-aligned little-endian payload writer plus the 2-bit status field packer
//! used by RV-C alarm bytes.
use crate::core::Payload;
use crate::error::SerializationError;

//==================================================================================PAYLOAD_WRITER
/// Appends little-endian fields to a [`Payload`], failing once the eight-byte
/// data field would overflow.
#[derive(Debug, Default)]
pub struct PayloadWriter {
    payload: Payload,
}

impl PayloadWriter {
    /// Create a writer over an empty payload.
    pub fn new() -> Self {
        Self::default()
    }

    /// Write a single byte.
    pub fn put_u8(&mut self, value: u8) -> Result<&mut Self, SerializationError> {
        self.payload.extend_from_slice(&[value])?;
        Ok(self)
    }

    /// Write a 16-bit value, little-endian.
    pub fn put_u16(&mut self, value: u16) -> Result<&mut Self, SerializationError> {
        self.payload.extend_from_slice(&value.to_le_bytes())?;
        Ok(self)
    }

    /// Write the three low bytes of `value`, little-endian.
    pub fn put_u24(&mut self, value: u32) -> Result<&mut Self, SerializationError> {
        if value > 0x00FF_FFFF {
            return Err(SerializationError::OutOfRange {
                field: "u24",
                raw: value as f64,
                max: 0x00FF_FFFF,
            });
        }
        self.payload.extend_from_slice(&value.to_le_bytes()[..3])?;
        Ok(self)
    }

    /// Write a 32-bit value, little-endian.
    pub fn put_u32(&mut self, value: u32) -> Result<&mut Self, SerializationError> {
        self.payload.extend_from_slice(&value.to_le_bytes())?;
        Ok(self)
    }

    /// Write raw bytes as-is.
    pub fn put_bytes(&mut self, bytes: &[u8]) -> Result<&mut Self, SerializationError> {
        self.payload.extend_from_slice(bytes)?;
        Ok(self)
    }

    /// Bytes written so far.
    pub fn len(&self) -> usize {
        self.payload.len()
    }

    /// Checks whether nothing was written yet.
    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }

    /// Hand over the finished payload.
    pub fn finish(self) -> Payload {
        self.payload
    }
}

//==================================================================================STATUS_FLAGS
/// Two-bit RV-C status value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagState {
    /// `00`
    Clear,
    /// `11`: set, or not reported by the source.
    Set,
}

impl FlagState {
    /// Wire bits of the state.
    pub const fn bits(self) -> u8 {
        match self {
            FlagState::Clear => 0b00,
            FlagState::Set => 0b11,
        }
    }
}

/// Pack up to four 2-bit fields into one byte, first field most significant.
///
/// Fields are right-aligned: `[Clear, Set]` yields `0b0000_0011`.
pub fn pack_flags(flags: &[FlagState]) -> Result<u8, SerializationError> {
    if flags.len() > 4 {
        return Err(SerializationError::BufferTooSmall {
            asked: flags.len() * 2,
            available: 8,
        });
    }
    Ok(flags
        .iter()
        .fold(0u8, |acc, flag| (acc << 2) | flag.bits()))
}
