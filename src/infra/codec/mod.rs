//! Payload codec: scaled numeric conversions and the little-endian writer.
pub mod scaling;
pub mod writer;
