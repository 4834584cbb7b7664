//! Core data types shared by the encoders, the registry and the transport:
//! the bounded frame payload and the process-wide static identity.
use core::fmt;

use crate::error::SerializationError;

/// Classic CAN data field size. Every RV-C single-frame DGN fits in it.
pub const MAX_PAYLOAD_BYTES: usize = 8;

/// Priority applied to every arbitration ID emitted by the gateway.
pub const DEFAULT_MESSAGE_PRIORITY: u8 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// Payload of one frame: up to eight bytes, stored inline.
pub struct Payload {
    len: usize,
    data: [u8; MAX_PAYLOAD_BYTES],
}

impl Payload {
    /// Create an empty payload.
    pub const fn new() -> Self {
        Self {
            len: 0,
            data: [0; MAX_PAYLOAD_BYTES],
        }
    }

    /// Copy `slice` into a new payload, refusing anything longer than a CAN data field.
    pub fn from_slice(slice: &[u8]) -> Result<Self, SerializationError> {
        if slice.len() > MAX_PAYLOAD_BYTES {
            return Err(SerializationError::BufferTooSmall {
                asked: slice.len(),
                available: MAX_PAYLOAD_BYTES,
            });
        }
        let mut payload = Self::new();
        payload.data[..slice.len()].copy_from_slice(slice);
        payload.len = slice.len();
        Ok(payload)
    }

    /// Number of valid bytes stored.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Checks whether the payload is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Bytes still available before the payload is full.
    #[inline]
    pub fn remaining(&self) -> usize {
        MAX_PAYLOAD_BYTES - self.len
    }

    /// Immutable view over the populated bytes.
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.data[..self.len]
    }

    /// Append bytes at the end of the payload.
    pub(crate) fn extend_from_slice(&mut self, bytes: &[u8]) -> Result<(), SerializationError> {
        if bytes.len() > self.remaining() {
            return Err(SerializationError::BufferTooSmall {
                asked: bytes.len(),
                available: self.remaining(),
            });
        }
        self.data[self.len..self.len + bytes.len()].copy_from_slice(bytes);
        self.len += bytes.len();
        Ok(())
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, byte) in self.as_slice().iter().enumerate() {
            if index > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{:02X}", byte)?;
        }
        Ok(())
    }
}

//==================================================================================STATIC_IDENTITY
/// Process-wide configuration resolved once at startup and shared read-only
/// by the registry and every encoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticIdentity {
    /// Node address used as the low byte of every arbitration ID.
    pub source_address: u8,
    /// 3-bit frame priority (0 = highest).
    pub message_priority: u8,
    /// DC source instance of the battery bank.
    pub battery_instance: u8,
    /// Identity byte prefixed to every DC source payload.
    pub battery_id: u8,
    /// Source priority byte following the identity byte.
    pub battery_priority: u8,
    /// Product identification string sent verbatim in PRODUCT_ID.
    pub product_id: String,
}

impl Default for StaticIdentity {
    fn default() -> Self {
        Self {
            source_address: 0x46,
            message_priority: DEFAULT_MESSAGE_PRIORITY,
            battery_instance: 0,
            battery_id: 0x01,
            battery_priority: 0x78,
            product_id: String::from("LI3*8**"),
        }
    }
}

impl fmt::Display for StaticIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SA={:#04X} prio={} instance={} battery_id={:#04X} battery_prio={:#04X} product={}",
            self.source_address,
            self.message_priority,
            self.battery_instance,
            self.battery_id,
            self.battery_priority,
            self.product_id
        )
    }
}
