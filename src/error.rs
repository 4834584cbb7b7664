//! Error definitions shared across library modules.
//! Each type models a specific failure scenario (arbitration ID construction,
//! telemetry access, payload serialization, registry lookup, transmission).
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
/// Errors that can occur while building or decoding a 29-bit arbitration ID.
pub enum ArbitrationIdError {
    /// DGN does not fit the 17-bit (+1) field.
    #[error("DGN {dgn:#X} out of range (max {max:#X})")]
    DgnOutOfRange { dgn: u32, max: u32 },
    /// Upper DGN byte of a split DGN exceeds its field.
    #[error("DGN high part {dgn_high:#X} out of range (max {max:#X})")]
    DgnHighOutOfRange { dgn_high: u32, max: u32 },
    /// Lower DGN byte of a split DGN exceeds 8 bits.
    #[error("DGN low part {dgn_low:#X} out of range (max 0xFF)")]
    DgnLowOutOfRange { dgn_low: u32 },
    /// Priority must fit 3 bits.
    #[error("Priority {priority} out of range (max 7)")]
    PriorityOutOfRange { priority: u32 },
    /// Source address must fit 8 bits.
    #[error("Source address {source_address} out of range (max 255)")]
    SourceOutOfRange { source_address: u32 },
    /// Raw identifier wider than 29 bits.
    #[error("Identifier {id:#X} is not a 29-bit extended identifier")]
    IdOutOfRange { id: u32 },
}

//================================================================================CODEC_ERROR

#[derive(Debug, Error, Clone, PartialEq)]
/// Issues encountered while serializing a value into a payload.
pub enum SerializationError {
    /// Payload would exceed the classic CAN data field.
    #[error("Buffer too small -> asked: {asked}, available: {available}")]
    BufferTooSmall { asked: usize, available: usize },
    /// NaN or infinite value handed to a scaled field.
    #[error("Field {field} is not a finite number")]
    NotANumber { field: &'static str },
    /// Value does not fit the wire width once scaled and rounded.
    #[error("Field {field} out of range: raw value {raw} exceeds 0..={max}")]
    OutOfRange {
        field: &'static str,
        raw: f64,
        max: u64,
    },
}

//================================================================================TELEMETRY_ERROR

#[derive(Debug, Error)]
/// Failures while reading the external telemetry provider.
pub enum TelemetryError {
    /// Path is absent from the snapshot or does not hold a number.
    #[error("Telemetry path {path} unavailable")]
    Unavailable { path: &'static str },
    /// Snapshot file could not be read.
    #[error("Unable to read telemetry snapshot {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Snapshot file is not a JSON object.
    #[error("Malformed telemetry snapshot {path}: {reason}")]
    Malformed { path: PathBuf, reason: String },
}

#[derive(Debug, Error)]
/// Failure of a single message encoder.
pub enum EncodeError {
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),
    #[error(transparent)]
    Serialization(#[from] SerializationError),
}

//================================================================================REGISTRY_ERROR

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Errors raised by the message registry.
pub enum RegistryError {
    /// The kind is not part of this registry.
    #[error("Unknown message kind {kind}")]
    UnknownMessageKind { kind: &'static str },
    /// Arbitration ID for a catalog entry could not be computed.
    #[error("Arbitration ID for {kind} failed: {source}")]
    ArbitrationId {
        kind: &'static str,
        source: ArbitrationIdError,
    },
}

//==================================================================================SEND_ERROR
#[derive(Debug, Error)]
/// Errors encountered when encoding and transmitting one message kind.
pub enum GatewayError<E: core::fmt::Debug> {
    /// A request referenced a name that maps to no message kind.
    #[error("Unknown message kind {name}")]
    UnknownMessageKind { name: String },
    /// Lookup in the registry failed.
    #[error(transparent)]
    Registry(#[from] RegistryError),
    /// Payload could not be built for this cycle.
    #[error("Encoding {kind} failed: {source}")]
    Encode {
        kind: &'static str,
        source: EncodeError,
    },
    /// CAN layer refused or failed to send the frame.
    #[error("Transmitting {kind} failed: {error:?}")]
    Transmit { kind: &'static str, error: E },
}

//==================================================================================CONFIG_ERROR
#[derive(Debug, Error)]
/// Startup configuration failures. Never recovered: the process refuses to start.
pub enum ConfigError {
    /// Configuration file could not be read.
    #[error("Unable to read configuration {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Configuration file is not valid TOML for this schema.
    #[error("Invalid configuration syntax: {0}")]
    Parse(#[from] toml::de::Error),
    /// A field holds a value the gateway cannot run with.
    #[error("Invalid configuration field {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}
