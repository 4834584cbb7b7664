//! Low-level building blocks shared by the message encoders.
pub mod codec;
