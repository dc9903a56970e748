//! End-to-end scenarios through the public engine API
//!
//! Devices are scripted `MockTransport`s registered on a `MockPort`; the
//! multiplexer discovers them exactly as it would real hardware.

use std::time::Duration;

use padlink_engine::{
    ControllerButtons, ControllerFamily, DeviceMultiplexer, EngineConfig, Poller, SessionError,
    SessionState, open_session,
};
use padlink_hid_common::mock::{MockPort, MockTransport};
use padlink_device_types::{product_ids, vendor_ids};

type TestResult = Result<(), Box<dyn std::error::Error>>;

fn dualsense_input(face_buttons: u8) -> Vec<u8> {
    let mut data = vec![0u8; 64];
    data[0] = 0x01;
    data[1..5].copy_from_slice(&[0x80; 4]);
    data[8] = face_buttons | 0x08;
    data
}

fn wiimote_status() -> Vec<u8> {
    let mut data = vec![0u8; 22];
    data[..7].copy_from_slice(&[0x20, 0x00, 0x00, 0x10, 0x00, 0x00, 0xC8]);
    data
}

fn wiimote_input(core_high: u8) -> Vec<u8> {
    let mut data = vec![0u8; 22];
    data[..6].copy_from_slice(&[0x35, 0x00, core_high, 0x80, 0x80, 0x80]);
    data
}

fn gamecube_frame(ports: [Option<u8>; 4]) -> Vec<u8> {
    let mut data = vec![0u8; 37];
    data[0] = 0x21;
    for (index, buttons) in ports.iter().enumerate() {
        if let Some(buttons) = buttons {
            let start = 1 + index * 9;
            data[start..start + 9]
                .copy_from_slice(&[0x10, *buttons, 0x00, 0x80, 0x80, 0x80, 0x80, 0x00, 0x00]);
        }
    }
    data
}

struct Rig {
    port: MockPort,
    dualsense: MockTransport,
    wiimote: MockTransport,
    adapter: MockTransport,
}

fn rig() -> Rig {
    let dualsense = MockTransport::usb();
    let wiimote = MockTransport::bluetooth();
    wiimote.queue_read(wiimote_status());
    let adapter = MockTransport::usb();

    let mut port = MockPort::new();
    port.add_device(vendor_ids::SONY, product_ids::DUALSENSE, dualsense.clone());
    port.add_device(vendor_ids::NINTENDO, product_ids::WIIMOTE, wiimote.clone());
    port.add_device(vendor_ids::NINTENDO, product_ids::GAMECUBE_ADAPTER, adapter.clone());
    Rig {
        port,
        dualsense,
        wiimote,
        adapter,
    }
}

#[test]
fn discovery_follows_family_order() -> TestResult {
    let rig = rig();
    let mut mux = DeviceMultiplexer::new();
    assert_eq!(mux.discover(&rig.port, &EngineConfig::default()), 3);
    assert_eq!(
        mux.families(),
        vec![
            ControllerFamily::DualSense,
            ControllerFamily::Wiimote,
            ControllerFamily::GameCubeAdapter
        ]
    );
    assert_eq!(
        rig.port.open_history(),
        vec![
            (vendor_ids::SONY, product_ids::DUALSENSE),
            (vendor_ids::NINTENDO, product_ids::WIIMOTE),
            (vendor_ids::NINTENDO, product_ids::GAMECUBE_ADAPTER),
        ]
    );
    Ok(())
}

#[test]
fn discovery_twice_does_not_reopen() -> TestResult {
    let rig = rig();
    let mut mux = DeviceMultiplexer::new();
    let config = EngineConfig::default();
    mux.discover(&rig.port, &config);
    assert_eq!(mux.discover(&rig.port, &config), 0);
    assert_eq!(rig.port.open_history().len(), 3);
    Ok(())
}

#[test]
fn one_tick_yields_every_logical_controller() -> TestResult {
    let rig = rig();
    let mut mux = DeviceMultiplexer::new();
    mux.discover(&rig.port, &EngineConfig::default());

    rig.dualsense.queue_read(dualsense_input(0x20));
    rig.wiimote.queue_read(wiimote_input(0x08));
    rig.adapter
        .queue_read(gamecube_frame([Some(0x01), None, None, Some(0x02)]));

    let summary = mux.poll_all();
    assert_eq!(summary.polled, 3);
    assert_eq!(summary.succeeded, 3);

    let snapshots = mux.reports();
    let keys: Vec<_> = snapshots.iter().map(|s| (s.family, s.port)).collect();
    assert_eq!(
        keys,
        vec![
            (ControllerFamily::DualSense, 0),
            (ControllerFamily::Wiimote, 0),
            (ControllerFamily::GameCubeAdapter, 0),
            (ControllerFamily::GameCubeAdapter, 3),
        ]
    );
    assert!(snapshots.iter().all(|s| s.changed_this_tick()));
    assert_eq!(snapshots[3].report.buttons, ControllerButtons::B);
    Ok(())
}

#[test]
fn disconnect_is_isolated_to_one_device() -> TestResult {
    let rig = rig();
    let mut mux = DeviceMultiplexer::new();
    mux.discover(&rig.port, &EngineConfig::default());

    rig.wiimote.disconnect();
    rig.dualsense.queue_read(dualsense_input(0x20));
    rig.adapter.queue_read(gamecube_frame([Some(0x01), None, None, None]));

    let summary = mux.poll_all();
    assert_eq!(summary.removed, 1);
    assert_eq!(summary.succeeded, 2);
    assert!(!mux.contains(ControllerFamily::Wiimote));

    rig.dualsense.queue_read(dualsense_input(0x40));
    let next = mux.poll_all();
    assert_eq!(next.polled, 2);
    assert_eq!(
        mux.get(ControllerFamily::DualSense)
            .map(|s| s.report().buttons),
        Some(ControllerButtons::B)
    );
    Ok(())
}

#[test]
fn timeout_costs_only_that_tick() -> TestResult {
    let rig = rig();
    let mut mux = DeviceMultiplexer::new();
    mux.discover(&rig.port, &EngineConfig::default());

    // Nothing queued for the Wiimote or the adapter.
    rig.dualsense.queue_read(dualsense_input(0x20));
    let summary = mux.poll_all();
    assert_eq!(summary.succeeded, 1);
    assert_eq!(summary.timed_out, 2);
    assert_eq!(mux.len(), 3);
    let fresh: Vec<_> = mux
        .reports()
        .iter()
        .filter(|s| s.fresh)
        .map(|s| s.family)
        .collect();
    assert_eq!(fresh, vec![ControllerFamily::DualSense]);
    assert_eq!(
        mux.get(ControllerFamily::Wiimote).map(|s| s.state()),
        Some(SessionState::Streaming)
    );
    Ok(())
}

#[test]
fn open_session_reports_absent_family() {
    let port = MockPort::new();
    let result = open_session(ControllerFamily::SwitchPro, &port, &EngineConfig::default());
    assert!(matches!(
        result,
        Err(SessionError::NotFound {
            vendor_id: vendor_ids::NINTENDO,
            product_id: product_ids::SWITCH_PRO
        })
    ));
}

#[test]
fn poller_publishes_discovered_devices() -> TestResult {
    let rig = rig();
    let config = EngineConfig::default();
    let mut mux = DeviceMultiplexer::new();
    mux.discover(&rig.port, &config);
    rig.dualsense.queue_read(dualsense_input(0x20));

    let poller = Poller::spawn(mux, &config)?;
    let tick = poller.ticks().recv_timeout(Duration::from_secs(2))?;
    assert_eq!(tick.summary.polled, 3);
    assert!(
        tick.snapshots
            .iter()
            .any(|s| s.family == ControllerFamily::DualSense
                && s.report.buttons == ControllerButtons::A)
    );

    let mux = poller.stop()?;
    assert_eq!(mux.len(), 3);
    Ok(())
}
