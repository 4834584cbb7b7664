//! In-memory representation of an RV-C / J1939 CAN frame.
use embedded_can::{Frame, Id};

use crate::core::{Payload, MAX_PAYLOAD_BYTES};
use crate::protocol::transport::can_id::ArbitrationId;

#[derive(Clone, Debug, PartialEq, Eq)]
/// Extended-ID data frame as handed to the bus.
pub struct CanFrame {
    /// Full 29-bit arbitration identifier.
    pub id: ArbitrationId,
    /// Payload buffer. Unused trailing bytes are zero.
    pub data: [u8; MAX_PAYLOAD_BYTES],
    /// Number of valid payload bytes (Data Length Code, 0 to 8).
    pub len: usize,
}

impl CanFrame {
    /// Assemble a frame from an identifier and an encoded payload.
    pub fn from_payload(id: ArbitrationId, payload: &Payload) -> Self {
        let mut data = [0u8; MAX_PAYLOAD_BYTES];
        data[..payload.len()].copy_from_slice(payload.as_slice());
        Self {
            id,
            data,
            len: payload.len(),
        }
    }

    /// Valid payload bytes.
    pub fn payload(&self) -> &[u8] {
        &self.data[..self.len]
    }
}

/// Only extended data frames exist on the gateway side; standard IDs and
/// remote frames are refused.
impl Frame for CanFrame {
    fn new(id: impl Into<Id>, data: &[u8]) -> Option<Self> {
        let Id::Extended(ext) = id.into() else {
            return None;
        };
        let id = ArbitrationId::from_raw(ext.as_raw()).ok()?;
        let payload = Payload::from_slice(data).ok()?;
        Some(Self::from_payload(id, &payload))
    }

    fn new_remote(_id: impl Into<Id>, _dlc: usize) -> Option<Self> {
        None
    }

    fn is_extended(&self) -> bool {
        true
    }

    fn is_remote_frame(&self) -> bool {
        false
    }

    fn id(&self) -> Id {
        self.id.into()
    }

    fn dlc(&self) -> usize {
        self.len
    }

    fn data(&self) -> &[u8] {
        self.payload()
    }
}
