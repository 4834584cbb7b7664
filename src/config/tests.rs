use super::*;
use std::io::Write;

#[test]
/// An empty file is the stock configuration.
fn test_empty_document_uses_defaults() {
    let config = GatewayConfig::from_toml_str("").unwrap();
    assert_eq!(config, GatewayConfig::default());
    assert_eq!(config.bus.interface, "vecan0");
    assert_eq!(config.bus.bitrate, 250_000);
    assert_eq!(config.bus.socket_type, SocketType::SocketCan);
    assert_eq!(
        config.telemetry.service,
        "com.victronenergy.battery.aggregate"
    );
    assert_eq!(config.identity().unwrap(), StaticIdentity::default());
}

#[test]
fn test_partial_sections() {
    let config = GatewayConfig::from_toml_str(
        r#"
        [identity]
        source_address = 0x47
        product_id = "LI4*8**"

        [bus]
        interface = "can1"
        socket_type = "log"

        [logging]
        level = "debug"
        file = "/var/log/rvc-gateway.log"
        "#,
    )
    .unwrap();

    let identity = config.identity().unwrap();
    assert_eq!(identity.source_address, 0x47);
    assert_eq!(identity.product_id, "LI4*8**");
    assert_eq!(identity.battery_priority, 0x78);
    assert_eq!(config.bus.interface, "can1");
    assert_eq!(config.bus.bitrate, 250_000);
    assert_eq!(config.bus.socket_type, SocketType::Log);
    assert_eq!(
        config.logging.file.as_deref(),
        Some(Path::new("/var/log/rvc-gateway.log"))
    );
}

#[test]
fn test_invalid_identity_fields() {
    let cases = [
        ("[identity]\nmessage_priority = 8", "identity.message_priority"),
        ("[identity]\nsource_address = 0xFE", "identity.source_address"),
        ("[identity]\nproduct_id = \"\"", "identity.product_id"),
        ("[identity]\nproduct_id = \"LITHIONICS\"", "identity.product_id"),
        ("[bus]\ninterface = \" \"", "bus.interface"),
        ("[bus]\nbitrate = 0", "bus.bitrate"),
    ];
    for (document, expected) in cases {
        match GatewayConfig::from_toml_str(document) {
            Err(ConfigError::Invalid { field, .. }) => assert_eq!(field, expected),
            other => panic!("{document:?} must be refused, got {other:?}"),
        }
    }
}

#[test]
/// Typos are reported rather than silently ignored.
fn test_unknown_field_is_a_parse_error() {
    let err = GatewayConfig::from_toml_str("[bus]\nbit_rate = 500000").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn test_load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[identity]\nbattery_id = 2").unwrap();
    let config = GatewayConfig::load(file.path()).unwrap();
    assert_eq!(config.identity().unwrap().battery_id, 2);
}

#[test]
fn test_load_missing_file() {
    let err = GatewayConfig::load("/nonexistent/rvc-gateway.toml").unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
}
