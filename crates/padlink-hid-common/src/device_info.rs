//! Device information types for enumerated controllers

use serde::{Deserialize, Serialize};

use crate::ConnectionType;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceInfo {
    pub vendor_id: u16,
    pub product_id: u16,
    pub interface_number: Option<u8>,
    pub connection_type: ConnectionType,
    pub serial_number: Option<String>,
    pub manufacturer: Option<String>,
    pub product_name: Option<String>,
    pub path: String,
}

impl DeviceInfo {
    pub fn new(vendor_id: u16, product_id: u16, path: impl Into<String>) -> Self {
        Self {
            vendor_id,
            product_id,
            interface_number: None,
            connection_type: ConnectionType::Usb,
            serial_number: None,
            manufacturer: None,
            product_name: None,
            path: path.into(),
        }
    }

    pub fn with_interface(mut self, interface: u8) -> Self {
        self.interface_number = Some(interface);
        self
    }

    pub fn with_connection_type(mut self, connection_type: ConnectionType) -> Self {
        self.connection_type = connection_type;
        self
    }

    pub fn with_serial(mut self, serial: impl Into<String>) -> Self {
        self.serial_number = Some(serial.into());
        self
    }

    pub fn with_manufacturer(mut self, manufacturer: impl Into<String>) -> Self {
        self.manufacturer = Some(manufacturer.into());
        self
    }

    pub fn with_product_name(mut self, name: impl Into<String>) -> Self {
        self.product_name = Some(name.into());
        self
    }

    pub fn matches(&self, vendor_id: u16, product_id: u16) -> bool {
        self.vendor_id == vendor_id && self.product_id == product_id
    }

    pub fn display_name(&self) -> String {
        self.product_name
            .clone()
            .or_else(|| self.manufacturer.clone())
            .unwrap_or_else(|| format!("{:04x}:{:04x}", self.vendor_id, self.product_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_info_creation() {
        let info = DeviceInfo::new(0x057e, 0x2009, "/dev/hidraw0");
        assert!(info.matches(0x057e, 0x2009));
        assert!(!info.matches(0x057e, 0x0306));
        assert_eq!(info.connection_type, ConnectionType::Usb);
        assert_eq!(info.interface_number, None);
    }

    #[test]
    fn test_device_info_display_name() {
        let info = DeviceInfo::new(0x054c, 0x0ce6, "/dev/hidraw1")
            .with_product_name("DualSense Wireless Controller");
        assert_eq!(info.display_name(), "DualSense Wireless Controller");

        let info = DeviceInfo::new(0x054c, 0x0ce6, "/dev/hidraw1").with_manufacturer("Sony");
        assert_eq!(info.display_name(), "Sony");

        let info = DeviceInfo::new(0x054c, 0x0ce6, "/dev/hidraw1");
        assert_eq!(info.display_name(), "054c:0ce6");
    }
}
