//! Physical value → raw wire integer conversions.
//!
//! Every conversion rounds to the nearest integer and refuses NaN, infinities
//! and anything outside the unsigned range of its wire width. Nothing wraps.
use crate::error::SerializationError;

/// 0.05 V per bit.
pub const VOLTAGE_RESOLUTION: f64 = 0.05;
/// 0.001 A per bit.
pub const CURRENT_RESOLUTION: f64 = 0.001;
/// Zero amps on the 32-bit current field.
pub const CURRENT_BIAS: f64 = 2_000_000_000.0;
/// 0.03125 K per bit.
pub const TEMPERATURE_RESOLUTION: f64 = 0.03125;
/// Celsius → kelvin offset as used on the wire.
pub const KELVIN_OFFSET: f64 = 273.0;
/// 0.5 % per bit.
pub const SOC_RESOLUTION: f64 = 0.5;
/// Offset of the desired charge current field, amps.
pub const CHARGE_CURRENT_OFFSET: f64 = 1600.0;
/// Offset of the one-byte proprietary temperatures, °C.
pub const BYTE_TEMPERATURE_OFFSET: f64 = 40.0;

/// Round `raw` and check it fits `0..=max`.
pub fn quantize(field: &'static str, raw: f64, max: u64) -> Result<u64, SerializationError> {
    if !raw.is_finite() {
        return Err(SerializationError::NotANumber { field });
    }
    let rounded = raw.round();
    if rounded < 0.0 || rounded > max as f64 {
        return Err(SerializationError::OutOfRange { field, raw, max });
    }
    Ok(rounded as u64)
}

/// Round to a one-byte field.
pub fn to_u8(field: &'static str, raw: f64) -> Result<u8, SerializationError> {
    quantize(field, raw, u8::MAX as u64).map(|v| v as u8)
}

/// Round to a two-byte field.
pub fn to_u16(field: &'static str, raw: f64) -> Result<u16, SerializationError> {
    quantize(field, raw, u16::MAX as u64).map(|v| v as u16)
}

/// Round to a four-byte field.
pub fn to_u32(field: &'static str, raw: f64) -> Result<u32, SerializationError> {
    quantize(field, raw, u32::MAX as u64).map(|v| v as u32)
}

/// DC voltage, 0.05 V/bit.
pub fn voltage(field: &'static str, volts: f64) -> Result<u16, SerializationError> {
    to_u16(field, volts / VOLTAGE_RESOLUTION)
}

/// DC current, 0.001 A/bit around the 2 000 000 000 bias. Positive
/// (discharge) currents lower the raw value.
pub fn biased_current(field: &'static str, amps: f64) -> Result<u32, SerializationError> {
    to_u32(field, CURRENT_BIAS - amps / CURRENT_RESOLUTION)
}

/// Temperature in 0.03125 K steps.
pub fn temperature(field: &'static str, celsius: f64) -> Result<u16, SerializationError> {
    to_u16(field, (KELVIN_OFFSET + celsius) / TEMPERATURE_RESOLUTION)
}

/// State of charge, 0.5 %/bit.
pub fn state_of_charge(field: &'static str, percent: f64) -> Result<u8, SerializationError> {
    to_u8(field, percent / SOC_RESOLUTION)
}

/// Desired charge current, 0.05 A/bit with a 1600 A offset.
pub fn charge_current(field: &'static str, amps: f64) -> Result<u16, SerializationError> {
    to_u16(field, (CHARGE_CURRENT_OFFSET + amps) / VOLTAGE_RESOLUTION)
}

/// One-byte temperature, 1 °C/bit with a 40 °C offset.
pub fn byte_temperature(field: &'static str, celsius: f64) -> Result<u8, SerializationError> {
    to_u8(field, BYTE_TEMPERATURE_OFFSET + celsius)
}
