//! OS-facing transports and the vendor sessions built on them
//!
//! HID-class controllers go through hidapi; devices that need raw interrupt
//! endpoints (the GameCube adapter) go through nusb. [`SystemPort`] combines
//! both behind the [`TransportPort`] contract the sessions are written against.

use padlink_errors::OpenError;
use padlink_hid_common::{DeviceInfo, Transport, TransportPort, UsbEndpoints};

pub mod hidapi_transport;
pub mod usb_transport;
pub mod vendor;

pub use hidapi_transport::{HidApiPort, HidApiTransport};
pub use usb_transport::{NusbPort, UsbTransport};

/// The real-hardware [`TransportPort`].
pub struct SystemPort {
    hid: HidApiPort,
    usb: NusbPort,
}

impl SystemPort {
    pub fn new() -> Result<Self, OpenError> {
        Ok(Self {
            hid: HidApiPort::new()?,
            usb: NusbPort::new(),
        })
    }
}

impl TransportPort for SystemPort {
    fn open_hid(
        &self,
        vendor_id: u16,
        product_id: u16,
        interface: Option<u8>,
    ) -> Result<Box<dyn Transport>, OpenError> {
        Ok(Box::new(self.hid.open(vendor_id, product_id, interface)?))
    }

    fn open_usb(
        &self,
        vendor_id: u16,
        product_id: u16,
        endpoints: UsbEndpoints,
    ) -> Result<Box<dyn Transport>, OpenError> {
        Ok(Box::new(self.usb.open(vendor_id, product_id, endpoints)?))
    }

    /// HID devices first, then USB devices hidapi did not already report.
    fn list(&self) -> Result<Vec<DeviceInfo>, OpenError> {
        let mut devices = self.hid.list();
        for info in self.usb.list()? {
            if !devices
                .iter()
                .any(|known| known.matches(info.vendor_id, info.product_id))
            {
                devices.push(info);
            }
        }
        Ok(devices)
    }
}

/// Platform transport port factory
pub fn create_transport_port() -> Result<Box<dyn TransportPort>, OpenError> {
    Ok(Box::new(SystemPort::new()?))
}
