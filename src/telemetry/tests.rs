//! Tests for the telemetry providers and typed accessors.
use super::*;
use std::io::Write;

#[test]
/// Absent and non-finite values are both reported as unavailable.
fn test_require_unavailable() {
    let telemetry = MapTelemetry::new()
        .with(paths::DC_VOLTAGE, 13.2)
        .with(paths::DC_CURRENT, f64::NAN);
    assert_eq!(telemetry.require(paths::DC_VOLTAGE).unwrap(), 13.2);
    assert!(matches!(
        telemetry.require(paths::DC_CURRENT),
        Err(TelemetryError::Unavailable {
            path: paths::DC_CURRENT
        })
    ));
    assert!(matches!(
        telemetry.require(paths::SOC),
        Err(TelemetryError::Unavailable { path: paths::SOC })
    ));
}

#[test]
/// Zero clears an alarm; any other value or a missing path sets it.
fn test_alarm_states() {
    let telemetry = MapTelemetry::new()
        .with(paths::ALARM_HIGH_VOLTAGE, 0.0)
        .with(paths::ALARM_LOW_VOLTAGE, 2.0);
    assert_eq!(telemetry.alarm(paths::ALARM_HIGH_VOLTAGE), FlagState::Clear);
    assert_eq!(telemetry.alarm(paths::ALARM_LOW_VOLTAGE), FlagState::Set);
    assert_eq!(telemetry.alarm(paths::ALARM_LOW_SOC), FlagState::Set);
}

#[test]
fn test_map_remove() {
    let mut telemetry = MapTelemetry::new().with(paths::SOC, 50.0);
    assert_eq!(telemetry.remove(paths::SOC), Some(50.0));
    assert!(telemetry.is_empty());
    assert_eq!(telemetry.get(paths::SOC), None);
}

//==================================================================================JSON_FILE
#[test]
/// Service-scoped snapshots pick the nested object; booleans become 1/0.
fn test_json_service_snapshot() {
    let provider = JsonFileTelemetry::new("unused.json", "com.victronenergy.battery.aggregate");
    let values = provider
        .parse(
            r#"{
                "com.victronenergy.battery.aggregate": {
                    "/Dc/0/Voltage": 13.25,
                    "/Alarms/LowSoc": true,
                    "/Alarms/HighVoltage": false,
                    "/Soc": null,
                    "/CustomName": "house bank"
                },
                "/Dc/0/Voltage": 1.0
            }"#,
        )
        .unwrap();
    assert_eq!(values.get(paths::DC_VOLTAGE), Some(&13.25));
    assert_eq!(values.get(paths::ALARM_LOW_SOC), Some(&1.0));
    assert_eq!(values.get(paths::ALARM_HIGH_VOLTAGE), Some(&0.0));
    assert!(!values.contains_key(paths::SOC));
    assert!(!values.contains_key("/CustomName"));
}

#[test]
/// Without the service key the top level is the snapshot.
fn test_json_flat_snapshot() {
    let provider = JsonFileTelemetry::new("unused.json", "com.victronenergy.battery.aggregate");
    let values = provider.parse(r#"{ "/Soc": 87.5 }"#).unwrap();
    assert_eq!(values.get(paths::SOC), Some(&87.5));
}

#[test]
fn test_json_rejects_non_object() {
    let provider = JsonFileTelemetry::new("unused.json", "svc");
    assert!(matches!(
        provider.parse("[1, 2]"),
        Err(TelemetryError::Malformed { .. })
    ));
    assert!(matches!(
        provider.parse("{ nope"),
        Err(TelemetryError::Malformed { .. })
    ));
}

#[test]
/// A failed refresh keeps the last good snapshot.
fn test_json_refresh_keeps_previous_snapshot() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{ "/Dc/0/Voltage": 12.0 }}"#).unwrap();
    file.flush().unwrap();

    let mut provider = JsonFileTelemetry::new(file.path(), "svc");
    assert_eq!(provider.get(paths::DC_VOLTAGE), None);
    provider.refresh().unwrap();
    assert_eq!(provider.get(paths::DC_VOLTAGE), Some(12.0));

    std::fs::write(file.path(), "garbage").unwrap();
    assert!(provider.refresh().is_err());
    assert_eq!(provider.get(paths::DC_VOLTAGE), Some(12.0));
}

#[test]
fn test_json_refresh_missing_file() {
    let mut provider = JsonFileTelemetry::new("/nonexistent/rvc/telemetry.json", "svc");
    assert!(matches!(
        provider.refresh(),
        Err(TelemetryError::Read { .. })
    ));
}
