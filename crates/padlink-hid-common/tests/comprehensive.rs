//! Integration tests for the padlink-hid-common crate.
//!
//! Covers report reading at fixed offsets, report building, device info
//! serialization, and the scripted mock transport/port pair.

use padlink_hid_common::{
    ConnectionType, DeviceInfo, OpenError, ReportBuilder, ReportError, ReportReader, Transport,
    TransportError, TransportPort, UsbEndpoints,
    mock::{MockPort, MockTransport},
};
use proptest::prelude::*;

type TestResult = Result<(), Box<dyn std::error::Error>>;

// ---------------------------------------------------------------------------
// ReportReader
// ---------------------------------------------------------------------------

#[test]
fn reader_sub_reader_is_independent_window() -> TestResult {
    let frame: Vec<u8> = (0u8..37).collect();
    let reader = ReportReader::with_min_len(&frame, 37)?;

    let port2 = reader.sub_reader(1 + 2 * 9, 9)?;
    assert_eq!(port2.len(), 9);
    assert_eq!(port2.u8_at(0)?, 19);
    assert_eq!(port2.u8_at(8)?, 27);
    assert!(port2.u8_at(9).is_err());
    Ok(())
}

#[test]
fn reader_empty_has_no_report_id() {
    let reader = ReportReader::new(&[]);
    assert!(reader.is_empty());
    assert_eq!(
        reader.report_id(),
        Err(ReportError::TooShort { need: 1, got: 0 })
    );
}

#[test]
fn reader_bytes_at_copies_exact_window() -> TestResult {
    let data = [0xFF, 0x00, 0xA4, 0x20, 0x00, 0x00, 0x99];
    let reader = ReportReader::new(&data);
    let block: [u8; 6] = reader.bytes_at(0)?;
    assert_eq!(block, [0xFF, 0x00, 0xA4, 0x20, 0x00, 0x00]);
    assert!(reader.bytes_at::<6>(2).is_err());
    Ok(())
}

// ---------------------------------------------------------------------------
// ReportBuilder
// ---------------------------------------------------------------------------

#[test]
fn builder_read_register_request_layout() {
    let mut builder = ReportBuilder::new();
    builder
        .write_u8(0x17)
        .write_u8(0x04)
        .write_u24_be(0xA4_00FA)
        .write_u16_be(6);
    assert_eq!(
        builder.as_slice(),
        &[0x17, 0x04, 0xA4, 0x00, 0xFA, 0x00, 0x06]
    );
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_builder_pad_to_length(data in proptest::collection::vec(any::<u8>(), 0..64), len in 0usize..128) {
        let mut builder = ReportBuilder::new();
        builder.write_bytes(&data).pad_to(len);
        prop_assert_eq!(builder.len(), data.len().max(len));
        prop_assert_eq!(&builder.as_slice()[..data.len()], data.as_slice());
    }

    #[test]
    fn prop_reader_never_reads_past_end(data in proptest::collection::vec(any::<u8>(), 0..16), offset in 0usize..32) {
        let reader = ReportReader::new(&data);
        let result = reader.u16_le_at(offset);
        prop_assert_eq!(result.is_ok(), offset + 2 <= data.len());
    }
}

// ---------------------------------------------------------------------------
// DeviceInfo
// ---------------------------------------------------------------------------

#[test]
fn device_info_serde_round_trip() -> TestResult {
    let info = DeviceInfo::new(0x057e, 0x0337, "usb:001/004")
        .with_interface(0)
        .with_connection_type(ConnectionType::Usb)
        .with_product_name("WUP-028");
    let json = serde_json::to_string(&info)?;
    let back: DeviceInfo = serde_json::from_str(&json)?;
    assert_eq!(back, info);
    Ok(())
}

// ---------------------------------------------------------------------------
// Mock transport and port
// ---------------------------------------------------------------------------

#[test]
fn mock_session_owned_handle_stays_observable() -> TestResult {
    let mut port = MockPort::new();
    let mock = MockTransport::usb();
    mock.queue_read(vec![0x21, 0x01]);
    port.add_device(0x057e, 0x0337, mock.clone());

    let mut owned = port.open_usb(0x057e, 0x0337, UsbEndpoints::new(0, 0x81, 0x02))?;
    owned.write(&[0x13], 16)?;

    let mut frame = [0u8; 37];
    assert_eq!(owned.read(&mut frame, 16)?, 2);
    assert_eq!(mock.write_history(), vec![vec![0x13]]);
    assert_eq!(mock.pending_reads(), 0);
    assert_eq!(mock.read_count(), 1);

    drop(owned);
    assert_eq!(mock.handle_count(), 2);
    Ok(())
}

#[test]
fn mock_scripted_read_error_is_returned_verbatim() {
    let mut mock = MockTransport::usb();
    mock.queue_read_error(TransportError::Incomplete {
        expected: 37,
        actual: 3,
    });
    let mut buf = [0u8; 37];
    assert_eq!(
        mock.read(&mut buf, 16),
        Err(TransportError::Incomplete {
            expected: 37,
            actual: 3
        })
    );
}

#[test]
fn mock_port_list_is_sorted() -> TestResult {
    let mut port = MockPort::new();
    port.add_device(0x057e, 0x2009, MockTransport::bluetooth());
    port.add_device(0x054c, 0x0ce6, MockTransport::usb());

    let listed = port.list()?;
    assert_eq!(listed.len(), 2);
    assert!(listed[0].matches(0x054c, 0x0ce6));
    assert_eq!(listed[1].connection_type, ConnectionType::Bluetooth);
    assert_eq!(port.device_count(), 2);
    Ok(())
}

#[test]
fn mock_port_missing_device() {
    let port = MockPort::new();
    assert!(matches!(
        port.open_hid(0x057e, 0x0306, Some(0)),
        Err(OpenError::NotFound {
            vendor_id: 0x057e,
            product_id: 0x0306
        })
    ));
}
