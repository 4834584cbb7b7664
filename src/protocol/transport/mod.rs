//! RV-C transport layer: CAN frame representation, 29-bit arbitration
//! identifier codec, bus/timer abstraction traits and concrete buses.

pub mod can_frame;
pub mod can_id;
pub mod log_bus;
#[cfg(all(target_os = "linux", feature = "socketcan"))]
pub mod socketcan;
pub mod traits;
