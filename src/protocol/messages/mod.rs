//! Catalog of the RV-C message kinds emitted by the gateway.
//!
//! Each [`MessageKind`] carries its DGN, its nominal transmission period and
//! its encoding strategy. Dispatch is an exhaustive `match`, so adding a kind
//! without an encoder does not compile.
use core::fmt;

use crate::core::{Payload, StaticIdentity};
use crate::error::EncodeError;
use crate::telemetry::TelemetrySource;

pub mod bms;
pub mod dc_source;
pub mod network;

/// Encoding strategy of one message kind.
pub type Encoder = fn(&dyn TelemetrySource, &StaticIdentity) -> Result<Payload, EncodeError>;

//==================================================================================MESSAGE_KIND
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MessageKind {
    AddressClaim,
    AddressClaim2,
    ProductId,
    /// Diagnostic message, on request only.
    DmRv,
    DcSourceStatus1,
    DcSourceStatus2,
    DcSourceStatus3,
    DcSourceStatus4,
    DcSourceStatus6,
    DcSourceStatus11,
    PropBmsStatus1,
    PropBmsStatus3,
}

impl MessageKind {
    /// Catalog order. Also the order kinds are processed within a cycle.
    pub const ALL: [MessageKind; 12] = [
        MessageKind::AddressClaim,
        MessageKind::AddressClaim2,
        MessageKind::ProductId,
        MessageKind::DmRv,
        MessageKind::DcSourceStatus1,
        MessageKind::DcSourceStatus2,
        MessageKind::DcSourceStatus3,
        MessageKind::DcSourceStatus4,
        MessageKind::DcSourceStatus6,
        MessageKind::DcSourceStatus11,
        MessageKind::PropBmsStatus1,
        MessageKind::PropBmsStatus3,
    ];

    /// Data Group Number placed in the arbitration ID.
    pub const fn dgn(self) -> u32 {
        match self {
            MessageKind::AddressClaim => 0x0EEFF,
            MessageKind::AddressClaim2 => 0x0EE00,
            MessageKind::ProductId => 0x0FEEB,
            MessageKind::DmRv => 0x1FECA,
            MessageKind::DcSourceStatus1 => 0x1FFFD,
            MessageKind::DcSourceStatus2 => 0x1FFFC,
            MessageKind::DcSourceStatus3 => 0x1FFFB,
            MessageKind::DcSourceStatus4 => 0x1FEC9,
            MessageKind::DcSourceStatus6 => 0x1FEC7,
            MessageKind::DcSourceStatus11 => 0x1FEA5,
            MessageKind::PropBmsStatus1 => 0x0FF80,
            MessageKind::PropBmsStatus3 => 0x0FF82,
        }
    }

    /// Transmission period in milliseconds; `0` means on request only.
    pub const fn period_ms(self) -> u32 {
        match self {
            MessageKind::AddressClaim | MessageKind::AddressClaim2 => 1000,
            MessageKind::ProductId => 5000,
            MessageKind::DmRv => 0,
            MessageKind::DcSourceStatus1
            | MessageKind::DcSourceStatus2
            | MessageKind::DcSourceStatus3 => 500,
            MessageKind::DcSourceStatus4 | MessageKind::DcSourceStatus6 => 5000,
            MessageKind::DcSourceStatus11 | MessageKind::PropBmsStatus1 => 1000,
            MessageKind::PropBmsStatus3 => 5000,
        }
    }

    /// Protocol name, as used in logs and on-demand requests.
    pub const fn name(self) -> &'static str {
        match self {
            MessageKind::AddressClaim => "ADDRESS_CLAIM",
            MessageKind::AddressClaim2 => "ADDRESS_CLAIM_2",
            MessageKind::ProductId => "PRODUCT_ID",
            MessageKind::DmRv => "DM_RV",
            MessageKind::DcSourceStatus1 => "DC_SOURCE_STATUS_1",
            MessageKind::DcSourceStatus2 => "DC_SOURCE_STATUS_2",
            MessageKind::DcSourceStatus3 => "DC_SOURCE_STATUS_3",
            MessageKind::DcSourceStatus4 => "DC_SOURCE_STATUS_4",
            MessageKind::DcSourceStatus6 => "DC_SOURCE_STATUS_6",
            MessageKind::DcSourceStatus11 => "DC_SOURCE_STATUS_11",
            MessageKind::PropBmsStatus1 => "PROP_BMS_STATUS_1",
            MessageKind::PropBmsStatus3 => "PROP_BMS_STATUS_3",
        }
    }

    /// Reverse of [`name`](Self::name), case-insensitive.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(name.trim()))
    }

    /// `true` for kinds that are never auto-scheduled.
    pub const fn is_on_demand(self) -> bool {
        self.period_ms() == 0
    }

    /// Encoding strategy for this kind.
    pub fn encoder(self) -> Encoder {
        match self {
            MessageKind::AddressClaim | MessageKind::AddressClaim2 => network::address_claim,
            MessageKind::ProductId => network::product_id,
            MessageKind::DmRv => network::dm_rv,
            MessageKind::DcSourceStatus1 => dc_source::status_1,
            MessageKind::DcSourceStatus2 => dc_source::status_2,
            MessageKind::DcSourceStatus3 => dc_source::status_3,
            MessageKind::DcSourceStatus4 => dc_source::status_4,
            MessageKind::DcSourceStatus6 => dc_source::status_6,
            MessageKind::DcSourceStatus11 => dc_source::status_11,
            MessageKind::PropBmsStatus1 => bms::status_1,
            MessageKind::PropBmsStatus3 => bms::status_3,
        }
    }

    /// Build this kind's payload from the current snapshot.
    pub fn encode(
        self,
        telemetry: &dyn TelemetrySource,
        identity: &StaticIdentity,
    ) -> Result<Payload, EncodeError> {
        (self.encoder())(telemetry, identity)
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
#[path = "tests.rs"]
mod tests;
