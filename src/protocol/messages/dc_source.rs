//! DC source status DGNs. Every payload starts with the battery identity byte
//! followed by the source priority byte.
use crate::core::{Payload, StaticIdentity};
use crate::error::EncodeError;
use crate::infra::codec::scaling;
use crate::infra::codec::writer::{pack_flags, PayloadWriter};
use crate::telemetry::{paths, TelemetryExt, TelemetrySource};

/// State of health placeholder; the BMS does not report it.
pub const STATE_OF_HEALTH: u8 = 0xC8;
/// Desired charge state placeholder.
pub const DESIRED_CHARGE_STATE: u8 = 0x00;
/// Battery type reported in DC_SOURCE_STATUS_4.
pub const BATTERY_TYPE: u8 = 0x03;
/// Status flags of DC_SOURCE_STATUS_11; none of them is reported by the BMS.
pub const STATUS_11_FLAGS: u8 = 0b0101_0101;
/// Upper bound of the remaining-time estimate.
pub const MAX_REMAINING_HOURS: f64 = 5.0;

fn prefixed(identity: &StaticIdentity) -> Result<PayloadWriter, EncodeError> {
    let mut writer = PayloadWriter::new();
    writer
        .put_u8(identity.battery_id)?
        .put_u8(identity.battery_priority)?;
    Ok(writer)
}

//==================================================================================REMAINING_TIME
/// Hours left at the present current, capped at five.
///
/// Discharging (positive current) drains `capacity`; charging (negative
/// current) fills the gap up to `installed_capacity`. Zero current cannot be
/// estimated and yields zero.
pub fn remaining_hours(capacity: f64, current: f64, installed_capacity: f64) -> f64 {
    if current == 0.0 {
        return 0.0;
    }
    let hours = if current > 0.0 {
        capacity / current
    } else {
        (installed_capacity - capacity) / -current
    };
    hours.clamp(0.0, MAX_REMAINING_HOURS)
}

/// Remaining time in minutes from the current snapshot.
pub fn remaining_minutes(telemetry: &dyn TelemetrySource) -> Result<f64, EncodeError> {
    let capacity = telemetry.require(paths::CAPACITY)?;
    let current = telemetry.require(paths::DC_CURRENT)?;
    let installed = telemetry.require(paths::INSTALLED_CAPACITY)?;
    Ok(remaining_hours(capacity, current, installed) * 60.0)
}

//==================================================================================ENCODERS
/// Voltage (0.05 V) and biased current (0.001 A).
pub fn status_1(
    telemetry: &dyn TelemetrySource,
    identity: &StaticIdentity,
) -> Result<Payload, EncodeError> {
    let voltage = scaling::voltage("dc_voltage", telemetry.require(paths::DC_VOLTAGE)?)?;
    let current = scaling::biased_current("dc_current", telemetry.require(paths::DC_CURRENT)?)?;

    let mut writer = prefixed(identity)?;
    writer.put_u16(voltage)?.put_u32(current)?;
    Ok(writer.finish())
}

/// Temperature, state of charge and time remaining.
pub fn status_2(
    telemetry: &dyn TelemetrySource,
    identity: &StaticIdentity,
) -> Result<Payload, EncodeError> {
    let temperature =
        scaling::temperature("temperature", telemetry.require(paths::DC_TEMPERATURE)?)?;
    let soc = scaling::state_of_charge("state_of_charge", telemetry.require(paths::SOC)?)?;
    let minutes = scaling::to_u16("time_remaining", remaining_minutes(telemetry)?)?;

    let mut writer = prefixed(identity)?;
    writer.put_u16(temperature)?.put_u8(soc)?.put_u16(minutes)?;
    Ok(writer.finish())
}

/// State of health placeholder, remaining capacity and state of charge.
pub fn status_3(
    telemetry: &dyn TelemetrySource,
    identity: &StaticIdentity,
) -> Result<Payload, EncodeError> {
    let capacity = scaling::to_u16("remaining_capacity", telemetry.require(paths::CAPACITY)?)?;
    let soc = scaling::state_of_charge("state_of_charge", telemetry.require(paths::SOC)?)?;

    let mut writer = prefixed(identity)?;
    writer
        .put_u8(STATE_OF_HEALTH)?
        .put_u16(capacity)?
        .put_u8(soc)?;
    Ok(writer.finish())
}

/// Charger request: desired voltage and current taken from the BMS limits.
pub fn status_4(
    telemetry: &dyn TelemetrySource,
    identity: &StaticIdentity,
) -> Result<Payload, EncodeError> {
    let voltage = scaling::voltage(
        "desired_charge_voltage",
        telemetry.require(paths::MAX_CHARGE_VOLTAGE)?,
    )?;
    let current = scaling::charge_current(
        "desired_charge_current",
        telemetry.require(paths::MAX_CHARGE_CURRENT)?,
    )?;

    let mut writer = prefixed(identity)?;
    writer
        .put_u8(DESIRED_CHARGE_STATE)?
        .put_u16(voltage)?
        .put_u16(current)?
        .put_u8(BATTERY_TYPE)?;
    Ok(writer.finish())
}

/// Alarm bytes: (high voltage, low voltage), (low SOC, low temperature),
/// (high temperature).
pub fn status_6(
    telemetry: &dyn TelemetrySource,
    identity: &StaticIdentity,
) -> Result<Payload, EncodeError> {
    let voltage_flags = pack_flags(&[
        telemetry.alarm(paths::ALARM_HIGH_VOLTAGE),
        telemetry.alarm(paths::ALARM_LOW_VOLTAGE),
    ])?;
    let soc_flags = pack_flags(&[
        telemetry.alarm(paths::ALARM_LOW_SOC),
        telemetry.alarm(paths::ALARM_LOW_TEMPERATURE),
    ])?;
    let temperature_flags = pack_flags(&[telemetry.alarm(paths::ALARM_HIGH_TEMPERATURE)])?;

    let mut writer = prefixed(identity)?;
    writer
        .put_u8(voltage_flags)?
        .put_u8(soc_flags)?
        .put_u8(temperature_flags)?;
    Ok(writer.finish())
}

/// Fixed status flags, full capacity and absolute DC power.
pub fn status_11(
    telemetry: &dyn TelemetrySource,
    identity: &StaticIdentity,
) -> Result<Payload, EncodeError> {
    let full_capacity = scaling::to_u16(
        "full_battery_capacity",
        telemetry.require(paths::INSTALLED_CAPACITY)?,
    )?;
    let power = scaling::to_u16("dc_power", telemetry.require(paths::DC_POWER)?.abs())?;

    let mut writer = prefixed(identity)?;
    writer
        .put_u8(STATUS_11_FLAGS)?
        .put_u16(full_capacity)?
        .put_u16(power)?;
    Ok(writer.finish())
}
