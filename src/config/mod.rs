//! Gateway configuration: identity, bus, telemetry source and logging,
//! read once from a TOML file at startup.
//!
//! Every field has a default, so an empty file (or no file at all) yields the
//! stock single-bank setup on `vecan0`.
use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::core::{StaticIdentity, DEFAULT_MESSAGE_PRIORITY, MAX_PAYLOAD_BYTES};
use crate::error::ConfigError;
use crate::protocol::transport::can_id::MAX_PRIORITY;

/// Highest source address a node may use; 254 is the null address and 255
/// the global one.
pub const MAX_NODE_ADDRESS: u8 = 0xFD;

fn default_source_address() -> u8 {
    0x46
}

fn default_message_priority() -> u8 {
    DEFAULT_MESSAGE_PRIORITY
}

fn default_battery_id() -> u8 {
    0x01
}

fn default_battery_priority() -> u8 {
    0x78
}

fn default_product_id() -> String {
    "LI3*8**".to_owned()
}

fn default_interface() -> String {
    "vecan0".to_owned()
}

fn default_bitrate() -> u32 {
    250_000
}

fn default_service() -> String {
    "com.victronenergy.battery.aggregate".to_owned()
}

fn default_snapshot_file() -> PathBuf {
    PathBuf::from("/run/rvc-gateway/telemetry.json")
}

fn default_level() -> String {
    "info".to_owned()
}

//==================================================================================GATEWAY_CONFIG
/// Root of the configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    #[serde(default)]
    pub identity: IdentityConfig,
    #[serde(default)]
    pub bus: BusConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl GatewayConfig {
    /// Environment variable naming the configuration file.
    pub const ENV_CONFIG_PATH: &'static str = "RVC_GATEWAY_CONFIG";

    /// Read, parse and validate `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        debug!("Loading configuration from {}", path.display());
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every field the gateway cannot run without.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.identity()?;
        self.bus.validate()
    }

    /// Immutable identity handed to the registry and the encoders.
    pub fn identity(&self) -> Result<StaticIdentity, ConfigError> {
        self.identity.resolve()
    }
}

//==================================================================================SECTIONS
/// `[identity]`: node and battery identification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IdentityConfig {
    pub source_address: u8,
    pub message_priority: u8,
    pub battery_instance: u8,
    pub battery_id: u8,
    pub battery_priority: u8,
    pub product_id: String,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            source_address: default_source_address(),
            message_priority: default_message_priority(),
            battery_instance: 0,
            battery_id: default_battery_id(),
            battery_priority: default_battery_priority(),
            product_id: default_product_id(),
        }
    }
}

impl IdentityConfig {
    fn resolve(&self) -> Result<StaticIdentity, ConfigError> {
        if self.source_address > MAX_NODE_ADDRESS {
            return Err(ConfigError::Invalid {
                field: "identity.source_address",
                reason: format!(
                    "{:#04X} is reserved, use 0x00..={:#04X}",
                    self.source_address, MAX_NODE_ADDRESS
                ),
            });
        }
        if self.message_priority as u32 > MAX_PRIORITY {
            return Err(ConfigError::Invalid {
                field: "identity.message_priority",
                reason: format!("{} does not fit 3 bits", self.message_priority),
            });
        }
        let product_len = self.product_id.len();
        if product_len == 0 || product_len > MAX_PAYLOAD_BYTES {
            return Err(ConfigError::Invalid {
                field: "identity.product_id",
                reason: format!(
                    "{:?} is {} bytes, expected 1..={}",
                    self.product_id, product_len, MAX_PAYLOAD_BYTES
                ),
            });
        }
        Ok(StaticIdentity {
            source_address: self.source_address,
            message_priority: self.message_priority,
            battery_instance: self.battery_instance,
            battery_id: self.battery_id,
            battery_priority: self.battery_priority,
            product_id: self.product_id.clone(),
        })
    }
}

/// Transport selected by `[bus] socket_type`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SocketType {
    /// Linux SocketCAN interface.
    #[default]
    SocketCan,
    /// Log frames instead of sending them.
    Log,
}

/// `[bus]`: CAN interface parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BusConfig {
    pub interface: String,
    pub bitrate: u32,
    pub socket_type: SocketType,
}

impl Default for BusConfig {
    fn default() -> Self {
        Self {
            interface: default_interface(),
            bitrate: default_bitrate(),
            socket_type: SocketType::default(),
        }
    }
}

impl BusConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.interface.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "bus.interface",
                reason: String::from("must not be empty"),
            });
        }
        if self.bitrate == 0 {
            return Err(ConfigError::Invalid {
                field: "bus.bitrate",
                reason: String::from("must be positive"),
            });
        }
        Ok(())
    }
}

/// `[telemetry]`: where the battery values come from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TelemetryConfig {
    /// Service whose values are published.
    pub service: String,
    /// JSON snapshot written by the monitoring side.
    pub snapshot_file: PathBuf,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service: default_service(),
            snapshot_file: default_snapshot_file(),
        }
    }
}

/// `[logging]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// `error`, `warn`, `info`, `debug` or `trace`.
    pub level: String,
    /// Append log records to this file instead of stderr.
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            file: None,
        }
    }
}

#[cfg(test)]
#[path = "tests.rs"]
mod tests;
