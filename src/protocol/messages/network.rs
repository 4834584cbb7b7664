//! Network management and identification messages. None of them depend on
//! telemetry.
use crate::core::{Payload, StaticIdentity};
use crate::error::EncodeError;
use crate::infra::codec::writer::PayloadWriter;
use crate::telemetry::TelemetrySource;

/// Fixed NAME prefix announced in both address-claim DGNs.
pub const ADDRESS_CLAIM_NAME: [u8; 4] = [0xD9, 0xEB, 0xED, 0x0E];
/// Source byte reported in DM_RV.
pub const DM_RV_SOURCE: u8 = 0x45;

/// NAME prefix, instance `00`, compatibility `00 00`.
pub fn address_claim(
    _telemetry: &dyn TelemetrySource,
    _identity: &StaticIdentity,
) -> Result<Payload, EncodeError> {
    let mut writer = PayloadWriter::new();
    writer
        .put_bytes(&ADDRESS_CLAIM_NAME)?
        .put_u8(0x00)?
        .put_u8(0x00)?
        .put_u8(0x00)?;
    Ok(writer.finish())
}

/// Product identifier bytes, verbatim.
pub fn product_id(
    _telemetry: &dyn TelemetrySource,
    identity: &StaticIdentity,
) -> Result<Payload, EncodeError> {
    Ok(Payload::from_slice(identity.product_id.as_bytes())?)
}

/// Operating status `01`, source, SPN `00 00 00`, `FF FF FF`.
pub fn dm_rv(
    _telemetry: &dyn TelemetrySource,
    _identity: &StaticIdentity,
) -> Result<Payload, EncodeError> {
    let mut writer = PayloadWriter::new();
    writer
        .put_u8(0x01)?
        .put_u8(DM_RV_SOURCE)?
        .put_bytes(&[0x00; 3])?
        .put_bytes(&[0xFF; 3])?;
    Ok(writer.finish())
}
