//! Scripted in-memory transports for tests
//!
//! A [`MockTransport`] is a cheap handle onto shared state: clone it, hand one
//! clone to a session, and keep the other to script reads and inspect writes.
//! Reads pop from a script queue; an exhausted script behaves like a silent
//! device and times out.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::{Arc, Mutex};

use crate::{
    ConnectionType, DeviceInfo, OpenError, Transport, TransportError, TransportPort, UsbEndpoints,
};

#[derive(Debug, Default)]
struct MockState {
    reads: VecDeque<Result<Vec<u8>, TransportError>>,
    write_failures: VecDeque<TransportError>,
    writes: Vec<Vec<u8>>,
    read_timeouts: Vec<u32>,
    connected: bool,
}

#[derive(Debug, Clone)]
pub struct MockTransport {
    state: Arc<Mutex<MockState>>,
    connection_type: ConnectionType,
}

impl MockTransport {
    pub fn new(connection_type: ConnectionType) -> Self {
        Self {
            state: Arc::new(Mutex::new(MockState {
                connected: true,
                ..MockState::default()
            })),
            connection_type,
        }
    }

    pub fn usb() -> Self {
        Self::new(ConnectionType::Usb)
    }

    pub fn bluetooth() -> Self {
        Self::new(ConnectionType::Bluetooth)
    }

    fn with_state<R>(&self, f: impl FnOnce(&mut MockState) -> R) -> R {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        f(&mut state)
    }

    /// Queue one successful read returning `data`.
    pub fn queue_read(&self, data: impl Into<Vec<u8>>) {
        let data = data.into();
        self.with_state(|s| s.reads.push_back(Ok(data)));
    }

    /// Queue one read that times out.
    pub fn queue_timeout(&self) {
        self.with_state(|s| {
            s.reads
                .push_back(Err(TransportError::Timeout { timeout_ms: 0 }))
        });
    }

    /// Queue `count` reads that time out.
    pub fn queue_timeouts(&self, count: usize) {
        for _ in 0..count {
            self.queue_timeout();
        }
    }

    /// Queue one read failing with `error`.
    pub fn queue_read_error(&self, error: TransportError) {
        self.with_state(|s| s.reads.push_back(Err(error)));
    }

    /// Make the next write fail with `error`.
    pub fn fail_next_write(&self, error: TransportError) {
        self.with_state(|s| s.write_failures.push_back(error));
    }

    pub fn write_history(&self) -> Vec<Vec<u8>> {
        self.with_state(|s| s.writes.clone())
    }

    /// Timeouts passed to every `read` call so far, in order.
    pub fn read_timeouts(&self) -> Vec<u32> {
        self.with_state(|s| s.read_timeouts.clone())
    }

    pub fn read_count(&self) -> usize {
        self.with_state(|s| s.read_timeouts.len())
    }

    pub fn pending_reads(&self) -> usize {
        self.with_state(|s| s.reads.len())
    }

    pub fn clear_write_history(&self) {
        self.with_state(|s| s.writes.clear());
    }

    pub fn disconnect(&self) {
        self.with_state(|s| s.connected = false);
    }

    pub fn reconnect(&self) {
        self.with_state(|s| s.connected = true);
    }

    pub fn is_connected(&self) -> bool {
        self.with_state(|s| s.connected)
    }

    /// Number of live handles onto this mock, including `self`.
    pub fn handle_count(&self) -> usize {
        Arc::strong_count(&self.state)
    }
}

impl Transport for MockTransport {
    fn read(&mut self, buf: &mut [u8], timeout_ms: u32) -> Result<usize, TransportError> {
        self.with_state(|s| {
            s.read_timeouts.push(timeout_ms);
            if !s.connected {
                return Err(TransportError::Disconnected);
            }
            match s.reads.pop_front() {
                Some(Ok(data)) => {
                    let n = data.len().min(buf.len());
                    if let (Some(dst), Some(src)) = (buf.get_mut(..n), data.get(..n)) {
                        dst.copy_from_slice(src);
                    }
                    Ok(n)
                }
                Some(Err(TransportError::Timeout { .. })) | None => {
                    Err(TransportError::Timeout { timeout_ms })
                }
                Some(Err(e)) => Err(e),
            }
        })
    }

    fn write(&mut self, data: &[u8], _timeout_ms: u32) -> Result<(), TransportError> {
        self.with_state(|s| {
            if !s.connected {
                return Err(TransportError::Disconnected);
            }
            if let Some(e) = s.write_failures.pop_front() {
                return Err(e);
            }
            s.writes.push(data.to_vec());
            Ok(())
        })
    }

    fn connection_type(&self) -> ConnectionType {
        self.connection_type
    }
}

/// A [`TransportPort`] backed by registered [`MockTransport`]s.
#[derive(Debug, Default)]
pub struct MockPort {
    devices: HashMap<(u16, u16), MockTransport>,
    locked: HashSet<(u16, u16)>,
    opened: Mutex<Vec<(u16, u16)>>,
}

impl MockPort {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach `transport` as the device with the given IDs.
    pub fn add_device(&mut self, vendor_id: u16, product_id: u16, transport: MockTransport) {
        self.devices.insert((vendor_id, product_id), transport);
    }

    /// Make every open of the given IDs fail with `Locked`.
    pub fn lock_device(&mut self, vendor_id: u16, product_id: u16) {
        self.locked.insert((vendor_id, product_id));
    }

    pub fn device_count(&self) -> usize {
        self.devices.len()
    }

    /// IDs of every successful open, in order.
    pub fn open_history(&self) -> Vec<(u16, u16)> {
        self.opened.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn open(&self, vendor_id: u16, product_id: u16) -> Result<Box<dyn Transport>, OpenError> {
        if self.locked.contains(&(vendor_id, product_id)) {
            return Err(OpenError::locked(vendor_id, product_id));
        }
        let transport = self
            .devices
            .get(&(vendor_id, product_id))
            .ok_or(OpenError::not_found(vendor_id, product_id))?;
        self.opened
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push((vendor_id, product_id));
        Ok(Box::new(transport.clone()))
    }
}

impl TransportPort for MockPort {
    fn open_hid(
        &self,
        vendor_id: u16,
        product_id: u16,
        _interface: Option<u8>,
    ) -> Result<Box<dyn Transport>, OpenError> {
        self.open(vendor_id, product_id)
    }

    fn open_usb(
        &self,
        vendor_id: u16,
        product_id: u16,
        _endpoints: UsbEndpoints,
    ) -> Result<Box<dyn Transport>, OpenError> {
        self.open(vendor_id, product_id)
    }

    fn list(&self) -> Result<Vec<DeviceInfo>, OpenError> {
        let mut infos: Vec<DeviceInfo> = self
            .devices
            .iter()
            .map(|((vid, pid), transport)| {
                DeviceInfo::new(*vid, *pid, format!("mock://{vid:04x}:{pid:04x}"))
                    .with_connection_type(transport.connection_type())
            })
            .collect();
        infos.sort_by_key(|info| (info.vendor_id, info.product_id));
        Ok(infos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_read_script() -> Result<(), TransportError> {
        let mut mock = MockTransport::usb();
        mock.queue_read(vec![0xAA, 0xBB, 0xCC]);
        mock.queue_timeout();

        let mut buf = [0u8; 2];
        assert_eq!(mock.read(&mut buf, 16)?, 2);
        assert_eq!(buf, [0xAA, 0xBB]);
        assert_eq!(
            mock.read(&mut buf, 16),
            Err(TransportError::Timeout { timeout_ms: 16 })
        );
        assert_eq!(
            mock.read(&mut buf, 500),
            Err(TransportError::Timeout { timeout_ms: 500 })
        );
        assert_eq!(mock.read_timeouts(), vec![16, 16, 500]);
        Ok(())
    }

    #[test]
    fn test_mock_write_failure_then_success() -> Result<(), TransportError> {
        let mut mock = MockTransport::usb();
        mock.fail_next_write(TransportError::Timeout { timeout_ms: 33 });

        assert!(mock.write(&[0x01], 33).is_err());
        mock.write(&[0x02], 33)?;
        assert_eq!(mock.write_history(), vec![vec![0x02]]);
        Ok(())
    }

    #[test]
    fn test_mock_disconnect() {
        let mut mock = MockTransport::usb();
        mock.queue_read(vec![0x01]);
        mock.disconnect();

        let mut buf = [0u8; 1];
        assert_eq!(mock.read(&mut buf, 1), Err(TransportError::Disconnected));
        assert_eq!(mock.write(&[0x01], 1), Err(TransportError::Disconnected));

        mock.reconnect();
        assert!(mock.is_connected());
        assert_eq!(mock.read(&mut buf, 1), Ok(1));
    }

    #[test]
    fn test_mock_port_open() {
        let mut port = MockPort::new();
        let mock = MockTransport::bluetooth();
        port.add_device(0x057e, 0x2009, mock.clone());
        port.lock_device(0x054c, 0x05c4);

        let opened = port.open_hid(0x057e, 0x2009, None);
        assert!(matches!(opened, Ok(ref t) if t.connection_type() == ConnectionType::Bluetooth));
        assert_eq!(mock.handle_count(), 3);

        assert!(matches!(
            port.open_hid(0x054c, 0x0ce6, None),
            Err(OpenError::NotFound { .. })
        ));
        assert!(matches!(
            port.open_usb(0x054c, 0x05c4, UsbEndpoints::new(0, 0x81, 0x02)),
            Err(OpenError::Locked { .. })
        ));
        assert_eq!(port.open_history(), vec![(0x057e, 0x2009)]);
    }
}
