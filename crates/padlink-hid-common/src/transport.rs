//! Byte-level transport contract

use serde::{Deserialize, Serialize};

use crate::{DeviceInfo, OpenError, TransportError};

/// How a controller is attached. Changes report sizes and handshake steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ConnectionType {
    #[default]
    Usb,
    Bluetooth,
}

impl ConnectionType {
    pub fn is_bluetooth(self) -> bool {
        matches!(self, ConnectionType::Bluetooth)
    }
}

impl std::fmt::Display for ConnectionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConnectionType::Usb => write!(f, "USB"),
            ConnectionType::Bluetooth => write!(f, "Bluetooth"),
        }
    }
}

/// Interrupt endpoints used by raw USB (non-HID) devices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UsbEndpoints {
    pub interface: u8,
    pub endpoint_in: u8,
    pub endpoint_out: u8,
}

impl UsbEndpoints {
    pub const fn new(interface: u8, endpoint_in: u8, endpoint_out: u8) -> Self {
        Self {
            interface,
            endpoint_in,
            endpoint_out,
        }
    }
}

/// An open device handle, exclusively owned by one session.
///
/// Both calls block for at most `timeout_ms`. Dropping the transport closes it.
pub trait Transport: Send {
    /// Read one report into `buf`, returning the number of bytes received.
    ///
    /// On `Err` the contents of `buf` are unspecified.
    fn read(&mut self, buf: &mut [u8], timeout_ms: u32) -> Result<usize, TransportError>;

    /// Write one report.
    fn write(&mut self, data: &[u8], timeout_ms: u32) -> Result<(), TransportError>;

    fn connection_type(&self) -> ConnectionType;
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn read(&mut self, buf: &mut [u8], timeout_ms: u32) -> Result<usize, TransportError> {
        (**self).read(buf, timeout_ms)
    }

    fn write(&mut self, data: &[u8], timeout_ms: u32) -> Result<(), TransportError> {
        (**self).write(data, timeout_ms)
    }

    fn connection_type(&self) -> ConnectionType {
        (**self).connection_type()
    }
}

/// Opens transports by vendor/product ID.
pub trait TransportPort {
    /// Open a HID device, optionally restricted to one interface number.
    fn open_hid(
        &self,
        vendor_id: u16,
        product_id: u16,
        interface: Option<u8>,
    ) -> Result<Box<dyn Transport>, OpenError>;

    /// Open a raw USB device and claim the interface named in `endpoints`.
    fn open_usb(
        &self,
        vendor_id: u16,
        product_id: u16,
        endpoints: UsbEndpoints,
    ) -> Result<Box<dyn Transport>, OpenError>;

    /// Enumerate attached devices.
    fn list(&self) -> Result<Vec<DeviceInfo>, OpenError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockTransport;

    #[test]
    fn test_boxed_transport_forwards() -> Result<(), TransportError> {
        let mock = MockTransport::bluetooth();
        mock.queue_read(vec![0x30, 0x01]);

        let mut boxed: Box<dyn Transport> = Box::new(mock.clone());
        assert_eq!(boxed.connection_type(), ConnectionType::Bluetooth);

        let mut buf = [0u8; 4];
        assert_eq!(boxed.read(&mut buf, 33)?, 2);
        boxed.write(&[0x01], 33)?;
        assert_eq!(mock.write_history(), vec![vec![0x01]]);
        Ok(())
    }

    #[test]
    fn test_connection_type_display() {
        assert_eq!(ConnectionType::Usb.to_string(), "USB");
        assert!(ConnectionType::Bluetooth.is_bluetooth());
        assert!(!ConnectionType::default().is_bluetooth());
    }
}
