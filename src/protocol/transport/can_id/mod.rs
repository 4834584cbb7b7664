//! Creation and extraction of the 29-bit arbitration identifiers used by
//! RV-C (derived from the SAE J1939 layout):
//!
//! ```text
//!  28..26    25..16      15..8     7..0
//! priority | DGN high | DGN low | source
//! ```
use embedded_can::ExtendedId;

use crate::error::ArbitrationIdError;

/// Largest DGN accepted by the builder (2^17).
pub const MAX_DGN: u32 = 1 << 17;
/// Largest upper DGN part accepted by [`ArbitrationId::from_split`] (2^9).
pub const MAX_DGN_HIGH: u32 = 1 << 9;
/// Largest 3-bit priority.
pub const MAX_PRIORITY: u32 = 0x07;
/// Largest 8-bit source address.
pub const MAX_SOURCE_ADDRESS: u32 = 0xFF;

//==================================================================================ARBITRATION_ID
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
/// Validated extended CAN identifier (29 bits). Only obtainable through the
/// codec, so every value held by the gateway is in range.
pub struct ArbitrationId(ExtendedId);

impl ArbitrationId {
    /// Build an identifier from a DGN, priority and source address.
    ///
    /// `(priority << 26) | (dgn << 8) | source`, refusing any input that would
    /// spill into a neighbouring field.
    pub fn encode(dgn: u32, priority: u32, source: u32) -> Result<Self, ArbitrationIdError> {
        if dgn > MAX_DGN {
            return Err(ArbitrationIdError::DgnOutOfRange { dgn, max: MAX_DGN });
        }
        check_priority_and_source(priority, source)?;
        Self::from_raw((priority << 26) | (dgn << 8) | source)
    }

    /// Build an identifier from a DGN split into its high and low parts.
    /// Intended for addressed messages where the low part carries a destination.
    pub fn from_split(
        dgn_high: u32,
        dgn_low: u32,
        priority: u32,
        source: u32,
    ) -> Result<Self, ArbitrationIdError> {
        if dgn_high > MAX_DGN_HIGH {
            return Err(ArbitrationIdError::DgnHighOutOfRange {
                dgn_high,
                max: MAX_DGN_HIGH,
            });
        }
        if dgn_low > 0xFF {
            return Err(ArbitrationIdError::DgnLowOutOfRange { dgn_low });
        }
        check_priority_and_source(priority, source)?;
        Self::from_raw((priority << 26) | (dgn_high << 16) | (dgn_low << 8) | source)
    }

    /// Wrap a raw identifier read from the bus.
    pub fn from_raw(raw: u32) -> Result<Self, ArbitrationIdError> {
        ExtendedId::new(raw)
            .map(Self)
            .ok_or(ArbitrationIdError::IdOutOfRange { id: raw })
    }

    /// Decompose a raw identifier into its fields.
    pub fn decode(raw: u32) -> Result<DecodedId, ArbitrationIdError> {
        Self::from_raw(raw).map(|id| id.fields())
    }

    /// Raw 29-bit value.
    #[inline]
    pub fn raw(&self) -> u32 {
        self.0.as_raw()
    }

    /// Identifier in `embedded-can` form, ready for a HAL or socket driver.
    #[inline]
    pub fn extended_id(&self) -> ExtendedId {
        self.0
    }

    /// Returns the priority (3 bits, value 0-7).
    pub fn priority(&self) -> u8 {
        ((self.raw() >> 26) & 0x07) as u8
    }

    /// Bits 25..16 of the identifier.
    pub fn dgn_high(&self) -> u32 {
        (self.raw() >> 16) & 0x3FF
    }

    /// Bits 15..8 of the identifier.
    pub fn dgn_low(&self) -> u32 {
        (self.raw() >> 8) & 0xFF
    }

    /// Full DGN (`dgn_high << 8 | dgn_low`).
    pub fn dgn(&self) -> u32 {
        (self.dgn_high() << 8) | self.dgn_low()
    }

    /// Eight-bit source address of the sender.
    pub fn source_address(&self) -> u8 {
        (self.raw() & 0xFF) as u8
    }

    /// All fields at once.
    pub fn fields(&self) -> DecodedId {
        DecodedId {
            dgn: self.dgn(),
            dgn_high: self.dgn_high(),
            dgn_low: self.dgn_low(),
            priority: self.priority(),
            source_address: self.source_address(),
        }
    }
}

impl From<ArbitrationId> for embedded_can::Id {
    fn from(id: ArbitrationId) -> Self {
        embedded_can::Id::Extended(id.0)
    }
}

impl core::fmt::Display for ArbitrationId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:08X}", self.raw())
    }
}

/// Fields extracted from an arbitration ID.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecodedId {
    pub dgn: u32,
    pub dgn_high: u32,
    pub dgn_low: u32,
    pub priority: u8,
    pub source_address: u8,
}

fn check_priority_and_source(priority: u32, source: u32) -> Result<(), ArbitrationIdError> {
    if priority > MAX_PRIORITY {
        return Err(ArbitrationIdError::PriorityOutOfRange { priority });
    }
    if source > MAX_SOURCE_ADDRESS {
        return Err(ArbitrationIdError::SourceOutOfRange {
            source_address: source,
        });
    }
    Ok(())
}
