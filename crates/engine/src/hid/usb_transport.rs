//! Raw USB transport over nusb
//!
//! Used for devices that are not HID class, such as the GameCube adapter.
//! nusb transfers are futures; each one is driven to completion on a
//! current-thread tokio runtime owned by the transport and bounded with
//! `tokio::time::timeout`. Dropping a timed-out transfer cancels it.

use std::time::Duration;

use nusb::transfer::{RequestBuffer, TransferError};
use padlink_errors::{OpenError, TransportError};
use padlink_hid_common::{ConnectionType, DeviceInfo, Transport, UsbEndpoints};
use tokio::runtime::Runtime;
use tracing::{debug, info};

/// Enumerates and opens raw USB devices.
#[derive(Debug, Clone, Copy, Default)]
pub struct NusbPort;

impl NusbPort {
    pub fn new() -> Self {
        Self
    }

    pub fn open(
        &self,
        vendor_id: u16,
        product_id: u16,
        endpoints: UsbEndpoints,
    ) -> Result<UsbTransport, OpenError> {
        let info = nusb::list_devices()
            .map_err(|e| OpenError::Backend(format!("USB enumeration: {e}")))?
            .find(|dev| dev.vendor_id() == vendor_id && dev.product_id() == product_id)
            .ok_or(OpenError::not_found(vendor_id, product_id))?;

        let device = info.open().map_err(|e| {
            debug!("USB open failed: {}", e);
            OpenError::locked(vendor_id, product_id)
        })?;
        let interface = device.claim_interface(endpoints.interface).map_err(|e| {
            debug!("Claiming interface {} failed: {}", endpoints.interface, e);
            OpenError::locked(vendor_id, product_id)
        })?;

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()
            .map_err(|e| OpenError::Backend(format!("USB transfer runtime: {e}")))?;

        info!(
            "Opened USB device VID=0x{:04X} PID=0x{:04X} interface={} in=0x{:02X} out=0x{:02X}",
            vendor_id, product_id, endpoints.interface, endpoints.endpoint_in, endpoints.endpoint_out
        );
        Ok(UsbTransport {
            interface,
            endpoints,
            runtime,
        })
    }

    pub fn list(&self) -> Result<Vec<DeviceInfo>, OpenError> {
        let devices = nusb::list_devices()
            .map_err(|e| OpenError::Backend(format!("USB enumeration: {e}")))?;
        Ok(devices
            .map(|dev| {
                let mut info = DeviceInfo::new(
                    dev.vendor_id(),
                    dev.product_id(),
                    format!("usb:{:03}/{:03}", dev.bus_number(), dev.device_address()),
                );
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
            .collect())
    }
}

/// A claimed USB interface with one interrupt IN and one interrupt OUT endpoint.
pub struct UsbTransport {
    interface: nusb::Interface,
    endpoints: UsbEndpoints,
    runtime: Runtime,
}

fn transfer_error(error: TransferError) -> TransportError {
    match error {
        TransferError::Disconnected => TransportError::Disconnected,
        other => TransportError::InvalidParameters(format!("USB transfer failed: {other}")),
    }
}

impl Transport for UsbTransport {
    fn read(&mut self, buf: &mut [u8], timeout_ms: u32) -> Result<usize, TransportError> {
        if buf.is_empty() {
            return Err(TransportError::InvalidParameters(
                "empty read buffer".to_string(),
            ));
        }
        let transfer = self
            .interface
            .interrupt_in(self.endpoints.endpoint_in, RequestBuffer::new(buf.len()));
        let completion = self.runtime.block_on(async {
            tokio::time::timeout(Duration::from_millis(u64::from(timeout_ms)), transfer).await
        });
        let data = match completion {
            Ok(completion) => completion.into_result().map_err(transfer_error)?,
            Err(_elapsed) => return Err(TransportError::timeout(timeout_ms)),
        };

        let n = data.len().min(buf.len());
        if let (Some(dst), Some(src)) = (buf.get_mut(..n), data.get(..n)) {
            dst.copy_from_slice(src);
        }
        if n < buf.len() {
            return Err(TransportError::Incomplete {
                expected: buf.len(),
                actual: n,
            });
        }
        Ok(n)
    }

    fn write(&mut self, data: &[u8], timeout_ms: u32) -> Result<(), TransportError> {
        if data.is_empty() {
            return Err(TransportError::InvalidParameters(
                "empty write buffer".to_string(),
            ));
        }
        let transfer = self
            .interface
            .interrupt_out(self.endpoints.endpoint_out, data.to_vec());
        let completion = self.runtime.block_on(async {
            tokio::time::timeout(Duration::from_millis(u64::from(timeout_ms)), transfer).await
        });
        match completion {
            Ok(completion) => {
                completion.into_result().map_err(transfer_error)?;
                Ok(())
            }
            Err(_elapsed) => Err(TransportError::timeout(timeout_ms)),
        }
    }

    fn connection_type(&self) -> ConnectionType {
        ConnectionType::Usb
    }
}
