//! `rvc-gateway` library: turns battery telemetry into RV-C DGN frames and
//! broadcasts them on a CAN bus at per-message rates.
//!
//! The crate exposes the shared data types, the payload codec, the RV-C
//! protocol layer (catalog, registry, scheduler, transport) and the
//! telemetry and configuration collaborators.
//==================================================================================
/// Gateway configuration file (TOML) and its validation into a [`StaticIdentity`](crate::core::StaticIdentity).
pub mod config;
/// Core data types shared by the encoders, the registry and the transport.
pub mod core;
/// Domain and low-level errors (arbitration ID construction, serialization,
/// telemetry access, registry lookup, transmission, configuration).
pub mod error;
/// Low-level payload codec: scaled fields and little-endian writer.
pub mod infra;
/// RV-C protocol implementation.
pub mod protocol;
/// Telemetry provider abstraction and implementations.
pub mod telemetry;
//==================================================================================
