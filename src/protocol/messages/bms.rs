//! Proprietary BMS status DGNs (Lithionics table).
use crate::core::{Payload, StaticIdentity};
use crate::error::EncodeError;
use crate::infra::codec::scaling;
use crate::infra::codec::writer::PayloadWriter;
use crate::telemetry::{paths, TelemetryExt, TelemetrySource};

/// BMS status code placeholder (3 bytes).
pub const BMS_STATUS_CODE: u32 = 0x000100;
/// Lifetime ampere-hours consumed placeholder; the BMS does not track it.
pub const LIFETIME_AH_CONSUMED: u32 = 0x2710;

/// Modules online and temperatures. Min/max recorded temperatures are not
/// reported by the BMS, so the present temperature stands in for both.
pub fn status_1(
    telemetry: &dyn TelemetrySource,
    identity: &StaticIdentity,
) -> Result<Payload, EncodeError> {
    let modules = scaling::to_u8("modules_online", telemetry.require(paths::MODULES_ONLINE)?)?;
    let temperature =
        scaling::byte_temperature("bms_temperature", telemetry.require(paths::DC_TEMPERATURE)?)?;

    let mut writer = PayloadWriter::new();
    writer
        .put_u8(identity.battery_id)?
        .put_u8(modules)?
        .put_u8(temperature)?
        .put_u8(temperature)?
        .put_u8(temperature)?
        .put_u24(BMS_STATUS_CODE)?;
    Ok(writer.finish())
}

/// Lifetime consumption placeholder.
pub fn status_3(
    _telemetry: &dyn TelemetrySource,
    identity: &StaticIdentity,
) -> Result<Payload, EncodeError> {
    let mut writer = PayloadWriter::new();
    writer
        .put_u8(identity.battery_id)?
        .put_u8(identity.battery_priority)?
        .put_u32(LIFETIME_AH_CONSUMED)?;
    Ok(writer.finish())
}
