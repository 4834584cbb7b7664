//! RV-C side of the gateway: message catalog and encoders, the registry of
//! definitions, the multi-rate scheduler, and the CAN transport.
pub mod messages;
pub mod registry;
pub mod scheduler;
pub mod transport;
