//! Golden payloads for every message kind.
use super::*;
use crate::error::{SerializationError, TelemetryError};
use crate::telemetry::{paths, MapTelemetry};

fn identity() -> StaticIdentity {
    StaticIdentity::default()
}

/// House bank discharging at 10 A.
fn snapshot() -> MapTelemetry {
    MapTelemetry::new()
        .with(paths::DC_VOLTAGE, 13.2)
        .with(paths::DC_CURRENT, 10.0)
        .with(paths::DC_POWER, -132.4)
        .with(paths::DC_TEMPERATURE, 25.0)
        .with(paths::SOC, 87.5)
        .with(paths::CAPACITY, 50.0)
        .with(paths::INSTALLED_CAPACITY, 100.0)
        .with(paths::MAX_CHARGE_VOLTAGE, 14.2)
        .with(paths::MAX_CHARGE_CURRENT, 50.0)
        .with(paths::MODULES_ONLINE, 4.0)
        .with(paths::ALARM_HIGH_VOLTAGE, 0.0)
        .with(paths::ALARM_LOW_VOLTAGE, 1.0)
        .with(paths::ALARM_LOW_SOC, 0.0)
        .with(paths::ALARM_LOW_TEMPERATURE, 0.0)
}

fn encode(kind: MessageKind, telemetry: &MapTelemetry) -> Vec<u8> {
    kind.encode(telemetry, &identity())
        .unwrap_or_else(|err| panic!("{} must encode: {}", kind, err))
        .as_slice()
        .to_vec()
}

//==================================================================================CATALOG
#[test]
/// DGNs and periods of the catalog.
fn test_catalog_table() {
    let table: Vec<(&str, u32, u32)> = MessageKind::ALL
        .iter()
        .map(|kind| (kind.name(), kind.dgn(), kind.period_ms()))
        .collect();
    assert_eq!(
        table,
        vec![
            ("ADDRESS_CLAIM", 0x0EEFF, 1000),
            ("ADDRESS_CLAIM_2", 0x0EE00, 1000),
            ("PRODUCT_ID", 0xFEEB, 5000),
            ("DM_RV", 0x1FECA, 0),
            ("DC_SOURCE_STATUS_1", 0x1FFFD, 500),
            ("DC_SOURCE_STATUS_2", 0x1FFFC, 500),
            ("DC_SOURCE_STATUS_3", 0x1FFFB, 500),
            ("DC_SOURCE_STATUS_4", 0x1FEC9, 5000),
            ("DC_SOURCE_STATUS_6", 0x1FEC7, 5000),
            ("DC_SOURCE_STATUS_11", 0x1FEA5, 1000),
            ("PROP_BMS_STATUS_1", 0x0FF80, 1000),
            ("PROP_BMS_STATUS_3", 0x0FF82, 5000),
        ]
    );
}

#[test]
fn test_from_name() {
    assert_eq!(MessageKind::from_name("DM_RV"), Some(MessageKind::DmRv));
    assert_eq!(
        MessageKind::from_name(" dc_source_status_11 "),
        Some(MessageKind::DcSourceStatus11)
    );
    assert_eq!(MessageKind::from_name("DC_SOURCE_STATUS_5"), None);
    for kind in MessageKind::ALL {
        assert_eq!(MessageKind::from_name(kind.name()), Some(kind));
    }
}

#[test]
fn test_only_dm_rv_is_on_demand() {
    let on_demand: Vec<MessageKind> = MessageKind::ALL
        .into_iter()
        .filter(|kind| kind.is_on_demand())
        .collect();
    assert_eq!(on_demand, vec![MessageKind::DmRv]);
}

//==================================================================================NETWORK
#[test]
fn test_address_claims() {
    let empty = MapTelemetry::new();
    let expected = vec![0xD9, 0xEB, 0xED, 0x0E, 0x00, 0x00, 0x00];
    assert_eq!(encode(MessageKind::AddressClaim, &empty), expected);
    assert_eq!(encode(MessageKind::AddressClaim2, &empty), expected);
}

#[test]
fn test_product_id() {
    assert_eq!(
        encode(MessageKind::ProductId, &MapTelemetry::new()),
        b"LI3*8**".to_vec()
    );
}

#[test]
/// Product identifiers longer than one frame are an encode failure.
fn test_product_id_too_long() {
    let identity = StaticIdentity {
        product_id: String::from("LITHIONICS"),
        ..StaticIdentity::default()
    };
    let err = MessageKind::ProductId
        .encode(&MapTelemetry::new(), &identity)
        .unwrap_err();
    assert!(matches!(
        err,
        EncodeError::Serialization(SerializationError::BufferTooSmall { asked: 10, .. })
    ));
}

#[test]
fn test_dm_rv() {
    assert_eq!(
        encode(MessageKind::DmRv, &MapTelemetry::new()),
        vec![0x01, 0x45, 0x00, 0x00, 0x00, 0xFF, 0xFF, 0xFF]
    );
}

//==================================================================================DC_SOURCE
#[test]
/// 13.2 V -> 264, 10 A discharge -> 1 999 990 000.
fn test_dc_source_status_1() {
    assert_eq!(
        encode(MessageKind::DcSourceStatus1, &snapshot()),
        vec![0x01, 0x78, 0x08, 0x01, 0xF0, 0x6C, 0x35, 0x77]
    );
}

#[test]
/// 12.00 V and 0 A land on the documented raw values.
fn test_dc_source_status_1_reference_values() {
    let telemetry = snapshot()
        .with(paths::DC_VOLTAGE, 12.0)
        .with(paths::DC_CURRENT, 0.0);
    assert_eq!(
        encode(MessageKind::DcSourceStatus1, &telemetry),
        vec![0x01, 0x78, 0xF0, 0x00, 0x00, 0x94, 0x35, 0x77]
    );
}

#[test]
/// Charging current sits above the bias.
fn test_dc_source_status_1_charging() {
    let telemetry = snapshot().with(paths::DC_CURRENT, -25.3);
    let payload = encode(MessageKind::DcSourceStatus1, &telemetry);
    assert_eq!(&payload[4..], &[0xD4, 0xF6, 0x35, 0x77]);
}

#[test]
/// 25 °C -> 9536, 87.5 % -> 175, 50 Ah at 10 A -> 300 minutes.
fn test_dc_source_status_2() {
    assert_eq!(
        encode(MessageKind::DcSourceStatus2, &snapshot()),
        vec![0x01, 0x78, 0x40, 0x25, 0xAF, 0x2C, 0x01]
    );
}

#[test]
fn test_dc_source_status_2_idle_battery() {
    let telemetry = snapshot().with(paths::DC_CURRENT, 0.0);
    let payload = encode(MessageKind::DcSourceStatus2, &telemetry);
    assert_eq!(&payload[5..], &[0x00, 0x00]);
}

#[test]
fn test_dc_source_status_3() {
    assert_eq!(
        encode(MessageKind::DcSourceStatus3, &snapshot()),
        vec![0x01, 0x78, 0xC8, 0x32, 0x00, 0xAF]
    );
}

#[test]
/// 14.2 V -> 284, (1600 + 50 A) / 0.05 -> 33 000.
fn test_dc_source_status_4() {
    assert_eq!(
        encode(MessageKind::DcSourceStatus4, &snapshot()),
        vec![0x01, 0x78, 0x00, 0x1C, 0x01, 0xE8, 0x80, 0x03]
    );
}

#[test]
/// Low voltage set, high temperature not reported.
fn test_dc_source_status_6() {
    assert_eq!(
        encode(MessageKind::DcSourceStatus6, &snapshot()),
        vec![0x01, 0x78, 0x03, 0x00, 0x03]
    );
}

#[test]
fn test_dc_source_status_6_all_clear() {
    let telemetry = snapshot()
        .with(paths::ALARM_LOW_VOLTAGE, 0.0)
        .with(paths::ALARM_HIGH_TEMPERATURE, 0.0);
    assert_eq!(
        encode(MessageKind::DcSourceStatus6, &telemetry),
        vec![0x01, 0x78, 0x00, 0x00, 0x00]
    );
}

#[test]
/// Power is sent as an absolute value.
fn test_dc_source_status_11() {
    assert_eq!(
        encode(MessageKind::DcSourceStatus11, &snapshot()),
        vec![0x01, 0x78, 0x55, 0x64, 0x00, 0x84, 0x00]
    );
}

//==================================================================================BMS
#[test]
fn test_prop_bms_status_1() {
    assert_eq!(
        encode(MessageKind::PropBmsStatus1, &snapshot()),
        vec![0x01, 0x04, 0x41, 0x41, 0x41, 0x00, 0x01, 0x00]
    );
}

#[test]
fn test_prop_bms_status_3() {
    assert_eq!(
        encode(MessageKind::PropBmsStatus3, &MapTelemetry::new()),
        vec![0x01, 0x78, 0x10, 0x27, 0x00, 0x00]
    );
}

//==================================================================================REMAINING_TIME
#[test]
fn test_remaining_hours_policy() {
    assert_eq!(dc_source::remaining_hours(50.0, 0.0, 100.0), 0.0);
    assert_eq!(dc_source::remaining_hours(50.0, 10.0, 100.0), 5.0);
    assert_eq!(dc_source::remaining_hours(20.0, 10.0, 100.0), 2.0);
    // Charging: (100 - 40) / 10 = 6 h, capped at 5.
    assert_eq!(dc_source::remaining_hours(40.0, -10.0, 100.0), 5.0);
    assert_eq!(dc_source::remaining_hours(90.0, -20.0, 100.0), 0.5);
}

#[test]
fn test_remaining_minutes() {
    let telemetry = MapTelemetry::new()
        .with(paths::CAPACITY, 40.0)
        .with(paths::DC_CURRENT, -10.0)
        .with(paths::INSTALLED_CAPACITY, 100.0);
    assert_eq!(dc_source::remaining_minutes(&telemetry).unwrap(), 300.0);
}

//==================================================================================FAILURES
#[test]
/// Missing telemetry aborts only this kind's encode.
fn test_missing_telemetry_is_an_error() {
    let mut telemetry = snapshot();
    telemetry.remove(paths::DC_VOLTAGE);
    let err = MessageKind::DcSourceStatus1
        .encode(&telemetry, &identity())
        .unwrap_err();
    assert!(matches!(
        err,
        EncodeError::Telemetry(TelemetryError::Unavailable {
            path: paths::DC_VOLTAGE
        })
    ));
    // Kinds that do not read the voltage are unaffected.
    assert!(MessageKind::DcSourceStatus3
        .encode(&telemetry, &identity())
        .is_ok());
}

#[test]
/// Values that do not fit their field fail instead of wrapping.
fn test_out_of_range_values_are_errors() {
    let telemetry = snapshot().with(paths::SOC, 150.0);
    assert!(matches!(
        MessageKind::DcSourceStatus3.encode(&telemetry, &identity()),
        Err(EncodeError::Serialization(
            SerializationError::OutOfRange { .. }
        ))
    ));
    let telemetry = snapshot().with(paths::DC_TEMPERATURE, -60.0);
    assert!(MessageKind::PropBmsStatus1
        .encode(&telemetry, &identity())
        .is_err());
}

#[test]
/// No payload ever exceeds a CAN data field.
fn test_payloads_fit_one_frame() {
    let telemetry = snapshot();
    for kind in MessageKind::ALL {
        let payload = kind.encode(&telemetry, &identity()).unwrap();
        assert!(payload.len() <= crate::core::MAX_PAYLOAD_BYTES, "{}", kind);
    }
}
