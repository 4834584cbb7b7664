//! SocketCAN transport (Linux). Frames are written synchronously on the raw
//! socket; the interface bitrate is configured outside the process.
use embedded_can::Frame;
use log::{debug, info};
use socketcan::{CanSocket, Socket};

use crate::protocol::transport::can_frame::CanFrame;
use crate::protocol::transport::traits::can_bus::CanBus;

/// Errors raised by the SocketCAN transport.
#[derive(Debug, thiserror::Error)]
pub enum SocketCanError {
    /// Opening the interface failed.
    #[error("Unable to open CAN interface {interface}: {source}")]
    Open {
        interface: String,
        source: std::io::Error,
    },
    /// The frame could not be converted into a kernel frame.
    #[error("Frame {id:#X} rejected by the SocketCAN frame builder")]
    InvalidFrame { id: u32 },
    /// The kernel refused the write.
    #[error("CAN write failed: {0}")]
    Write(#[from] std::io::Error),
}

/// Raw CAN socket bound to one interface.
pub struct SocketCanBus {
    socket: CanSocket,
    interface: String,
}

impl SocketCanBus {
    /// Open `interface` (e.g. `can0`, `vecan0`).
    pub fn open(interface: &str, bitrate: u32) -> Result<Self, SocketCanError> {
        let socket = CanSocket::open(interface).map_err(|source| SocketCanError::Open {
            interface: interface.to_owned(),
            source,
        })?;
        info!(
            "Opened CAN interface {} (expected bitrate {} bit/s, set via ip link)",
            interface, bitrate
        );
        Ok(Self {
            socket,
            interface: interface.to_owned(),
        })
    }

    /// Interface name the socket is bound to.
    pub fn interface(&self) -> &str {
        &self.interface
    }
}

impl CanBus for SocketCanBus {
    type Error = SocketCanError;

    async fn send<'a>(&'a mut self, frame: &'a CanFrame) -> Result<(), Self::Error> {
        let kernel_frame = socketcan::CanFrame::new(frame.id(), frame.data())
            .ok_or(SocketCanError::InvalidFrame { id: frame.id.raw() })?;
        self.socket.write_frame(&kernel_frame)?;
        debug!("{}: TX {} [{}]", self.interface, frame.id, frame.len);
        Ok(())
    }
}
