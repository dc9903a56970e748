//! HID transport over hidapi
//!
//! hidapi writes block until the OS accepts the report, so the write timeout
//! is advisory. A read that returns zero bytes within its timeout is a
//! `Timeout`; any hidapi error on an open handle means the device is gone.

use hidapi::{BusType, HidApi, HidDevice};
use padlink_errors::{OpenError, TransportError};
use padlink_hid_common::{ConnectionType, DeviceInfo, Transport};
use tracing::{debug, info, warn};

/// Enumerates and opens HID devices.
pub struct HidApiPort {
    api: HidApi,
}

impl HidApiPort {
    pub fn new() -> Result<Self, OpenError> {
        let api = HidApi::new()
            .map_err(|e| OpenError::Backend(format!("Failed to initialize HidApi: {e}")))?;
        Ok(Self { api })
    }

    pub fn open(
        &self,
        vendor_id: u16,
        product_id: u16,
        interface: Option<u8>,
    ) -> Result<HidApiTransport, OpenError> {
        let info = self
            .api
            .device_list()
            .find(|dev| {
                dev.vendor_id() == vendor_id
                    && dev.product_id() == product_id
                    && interface.is_none_or(|i| dev.interface_number() == i32::from(i))
            })
            .ok_or(OpenError::not_found(vendor_id, product_id))?;

        let connection_type = connection_type(info.bus_type());
        let device = info.open_device(&self.api).map_err(|e| {
            warn!(
                "Failed to open HID device VID=0x{:04X} PID=0x{:04X}: {}",
                vendor_id, product_id, e
            );
            OpenError::locked(vendor_id, product_id)
        })?;

        info!(
            "Opened HID device VID=0x{:04X} PID=0x{:04X} over {}",
            vendor_id, product_id, connection_type
        );
        Ok(HidApiTransport {
            device,
            connection_type,
        })
    }

    pub fn list(&self) -> Vec<DeviceInfo> {
        self.api
            .device_list()
            .map(|dev| {
                let mut info = DeviceInfo::new(
                    dev.vendor_id(),
                    dev.product_id(),
                    dev.path().to_string_lossy(),
                )
                .with_connection_type(connection_type(dev.bus_type()));
                if let Ok(interface) = u8::try_from(dev.interface_number()) {
                    info = info.with_interface(interface);
                }
                if let Some(serial) = dev.serial_number() {
                    info = info.with_serial(serial);
                }
                if let Some(manufacturer) = dev.manufacturer_string() {
                    info = info.with_manufacturer(manufacturer);
                }
                if let Some(product) = dev.product_string() {
                    info = info.with_product_name(product);
                }
                info
            })
            .collect()
    }
}

fn connection_type(bus: BusType) -> ConnectionType {
    match bus {
        BusType::Bluetooth => ConnectionType::Bluetooth,
        _ => ConnectionType::Usb,
    }
}

/// An open hidapi handle.
pub struct HidApiTransport {
    device: HidDevice,
    connection_type: ConnectionType,
}

impl Transport for HidApiTransport {
    fn read(&mut self, buf: &mut [u8], timeout_ms: u32) -> Result<usize, TransportError> {
        if buf.is_empty() {
            return Err(TransportError::InvalidParameters(
                "empty read buffer".to_string(),
            ));
        }
        let timeout = i32::try_from(timeout_ms).unwrap_or(i32::MAX);
        match self.device.read_timeout(buf, timeout) {
            Ok(0) => Err(TransportError::timeout(timeout_ms)),
            Ok(n) => Ok(n),
            Err(e) => {
                debug!("HID read failed: {}", e);
                Err(TransportError::Disconnected)
            }
        }
    }

    fn write(&mut self, data: &[u8], _timeout_ms: u32) -> Result<(), TransportError> {
        if data.is_empty() {
            return Err(TransportError::InvalidParameters(
                "empty write buffer".to_string(),
            ));
        }
        match self.device.write(data) {
            Ok(_) => Ok(()),
            Err(e) => {
                debug!("HID write failed: {}", e);
                Err(TransportError::Disconnected)
            }
        }
    }

    fn connection_type(&self) -> ConnectionType {
        self.connection_type
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bus_type_mapping() {
        assert_eq!(connection_type(BusType::Bluetooth), ConnectionType::Bluetooth);
        assert_eq!(connection_type(BusType::Usb), ConnectionType::Usb);
        assert_eq!(connection_type(BusType::Unknown), ConnectionType::Usb);
    }
}
