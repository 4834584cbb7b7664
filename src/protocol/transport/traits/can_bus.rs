//! Minimal abstraction for an asynchronous CAN bus. Allows the gateway to plug
//! into various implementations (SocketCAN, dry-run logger, test doubles).
use crate::protocol::transport::can_frame::CanFrame;
use core::future::Future;

/// Contract to transmit extended CAN frames. Fire-and-forget: no
/// acknowledgement exists at this layer.
pub trait CanBus {
    type Error: core::fmt::Debug;
    /// Emit a frame on the bus. Asynchronous to accommodate non-blocking drivers.
    fn send<'a>(
        &'a mut self,
        frame: &'a CanFrame,
    ) -> impl Future<Output = Result<(), Self::Error>> + 'a;
}
