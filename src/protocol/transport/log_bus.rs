//! Dry-run transport: every frame is written to the log instead of a bus.
use core::convert::Infallible;

use log::info;

use crate::protocol::transport::can_frame::CanFrame;
use crate::protocol::transport::traits::can_bus::CanBus;

/// Bus that never fails and keeps a count of the frames it has seen.
#[derive(Debug, Default)]
pub struct LogBus {
    frames_logged: u64,
}

impl LogBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of frames logged so far.
    pub fn frames_logged(&self) -> u64 {
        self.frames_logged
    }
}

impl CanBus for LogBus {
    type Error = Infallible;

    async fn send<'a>(&'a mut self, frame: &'a CanFrame) -> Result<(), Self::Error> {
        self.frames_logged += 1;
        info!("TX {} [{}] {:02X?}", frame.id, frame.len, frame.payload());
        Ok(())
    }
}
