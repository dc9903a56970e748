//! Device multiplexer
//!
//! Holds at most one session per [`ControllerFamily`] and polls all of them
//! once per tick. A timeout on one device costs that device its tick and
//! nothing else; a fatal error removes that session only.

use padlink_device_types::{CanonicalReport, ControllerFamily};
use padlink_errors::SessionError;
use padlink_hid_common::TransportPort;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::EngineConfig;
use crate::hid::vendor::open_session;
use crate::session::ControllerSession;

/// Outcome counts of one [`DeviceMultiplexer::poll_all`] tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct TickSummary {
    pub polled: usize,
    pub succeeded: usize,
    pub timed_out: usize,
    /// Non-fatal errors other than timeouts (bad payload, device error code).
    pub skipped: usize,
    pub removed: usize,
}

/// Reports of one logical controller after a tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SlotSnapshot {
    pub family: ControllerFamily,
    /// Adapter port; always 0 for single-controller families.
    pub port: usize,
    /// A new report was committed during the last tick.
    pub fresh: bool,
    pub report: CanonicalReport,
    pub last_report: CanonicalReport,
}

impl SlotSnapshot {
    /// The report differs from the one before it.
    pub fn changed(&self) -> bool {
        self.report != self.last_report
    }

    /// Committed this tick and different from the previous report.
    pub fn changed_this_tick(&self) -> bool {
        self.fresh && self.changed()
    }
}

struct Slot {
    session: Box<dyn ControllerSession>,
    /// The last `update` succeeded.
    fresh: bool,
}

#[derive(Default)]
pub struct DeviceMultiplexer {
    slots: Vec<Slot>,
}

impl DeviceMultiplexer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Find every enabled family once, in discovery order.
    ///
    /// Families that are absent or fail their handshake are logged and left
    /// empty. Returns the number of sessions opened.
    pub fn discover(&mut self, port: &dyn TransportPort, config: &EngineConfig) -> usize {
        let mut opened = 0;
        for family in config.enabled_families() {
            if self.contains(family) {
                continue;
            }
            match open_session(family, port, config) {
                Ok(session) => {
                    info!(%family, "Controller discovered");
                    self.slots.push(Slot {
                        session,
                        fresh: false,
                    });
                    opened += 1;
                }
                Err(SessionError::NotFound { .. }) => {
                    debug!(%family, "Controller not present");
                }
                Err(e) => {
                    warn!(%family, "Controller found but could not be opened: {}", e);
                }
            }
        }
        info!(opened, total = self.slots.len(), "Discovery finished");
        opened
    }

    /// Add a session, replacing and returning any session of the same family.
    pub fn insert(
        &mut self,
        session: Box<dyn ControllerSession>,
    ) -> Option<Box<dyn ControllerSession>> {
        let family = session.family();
        let previous = self.remove(family);
        self.slots.push(Slot {
            session,
            fresh: false,
        });
        previous
    }

    pub fn remove(&mut self, family: ControllerFamily) -> Option<Box<dyn ControllerSession>> {
        let index = self.slots.iter().position(|s| s.session.family() == family)?;
        Some(self.slots.remove(index).session)
    }

    pub fn contains(&self, family: ControllerFamily) -> bool {
        self.slots.iter().any(|s| s.session.family() == family)
    }

    pub fn get(&self, family: ControllerFamily) -> Option<&dyn ControllerSession> {
        self.slots
            .iter()
            .find(|s| s.session.family() == family)
            .map(|s| s.session.as_ref())
    }

    pub fn families(&self) -> Vec<ControllerFamily> {
        self.slots.iter().map(|s| s.session.family()).collect()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Update every session once.
    pub fn poll_all(&mut self) -> TickSummary {
        let mut summary = TickSummary::default();
        self.slots.retain_mut(|slot| {
            summary.polled += 1;
            let session = &mut slot.session;
            let family = session.family();
            let result = session.update();
            slot.fresh = result.is_ok();
            match result {
                Ok(()) => {
                    summary.succeeded += 1;
                    true
                }
                Err(SessionError::Timeout { timeout_ms }) => {
                    debug!(%family, timeout_ms, "Poll timed out");
                    summary.timed_out += 1;
                    true
                }
                Err(e) if e.is_fatal() || session.state().is_terminal() => {
                    info!(%family, state = %session.state(), "Removing controller: {}", e);
                    summary.removed += 1;
                    false
                }
                Err(e) => {
                    debug!(%family, "Skipping tick: {}", e);
                    summary.skipped += 1;
                    true
                }
            }
        });
        summary
    }

    /// Snapshot of every connected logical controller.
    pub fn reports(&self) -> Vec<SlotSnapshot> {
        let mut snapshots = Vec::new();
        for slot in &self.slots {
            let session = slot.session.as_ref();
            for port in session.connected_ports() {
                if let (Some(report), Some(last_report)) =
                    (session.port_report(port), session.port_last_report(port))
                {
                    snapshots.push(SlotSnapshot {
                        family: session.family(),
                        port,
                        fresh: slot.fresh,
                        report,
                        last_report,
                    });
                }
            }
        }
        snapshots
    }
}

impl std::fmt::Debug for DeviceMultiplexer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeviceMultiplexer")
            .field("families", &self.families())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{ReportSlot, SessionState};
    use padlink_device_types::ControllerButtons;
    use padlink_errors::SessionResult;
    use padlink_hid_common::mock::{MockPort, MockTransport};
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    /// Session that replays scripted update results and counts its polls.
    struct ScriptedSession {
        family: ControllerFamily,
        state: SessionState,
        script: VecDeque<SessionResult<()>>,
        reports: ReportSlot,
        polls: Arc<Mutex<usize>>,
    }

    impl ScriptedSession {
        fn new(family: ControllerFamily, script: Vec<SessionResult<()>>) -> Self {
            Self {
                family,
                state: SessionState::Streaming,
                script: script.into(),
                reports: ReportSlot::new(),
                polls: Arc::new(Mutex::new(0)),
            }
        }

        fn poll_counter(&self) -> Arc<Mutex<usize>> {
            Arc::clone(&self.polls)
        }
    }

    impl ControllerSession for ScriptedSession {
        fn family(&self) -> ControllerFamily {
            self.family
        }

        fn state(&self) -> SessionState {
            self.state
        }

        fn update(&mut self) -> SessionResult<()> {
            *self.polls.lock().unwrap_or_else(|e| e.into_inner()) += 1;
            let result = self.script.pop_front().unwrap_or(Ok(()));
            match &result {
                Ok(()) => self
                    .reports
                    .commit(CanonicalReport::new().with_buttons(ControllerButtons::A)),
                Err(e) => {
                    if let Some(state) = SessionState::after_error(e) {
                        self.state = state;
                    }
                }
            }
            result
        }

        fn report(&self) -> CanonicalReport {
            self.reports.current()
        }

        fn last_report(&self) -> CanonicalReport {
            self.reports.previous()
        }
    }

    fn polls(counter: &Arc<Mutex<usize>>) -> usize {
        *counter.lock().unwrap_or_else(|e| e.into_inner())
    }

    #[test]
    fn test_disconnect_does_not_block_other_sessions() {
        let failing = ScriptedSession::new(
            ControllerFamily::DualSense,
            vec![Err(SessionError::Disconnected)],
        );
        let healthy = ScriptedSession::new(ControllerFamily::SwitchPro, vec![Ok(())]);
        let healthy_polls = healthy.poll_counter();

        let mut mux = DeviceMultiplexer::new();
        mux.insert(Box::new(failing));
        mux.insert(Box::new(healthy));

        let summary = mux.poll_all();
        assert_eq!(summary.polled, 2);
        assert_eq!(summary.succeeded, 1);
        assert_eq!(summary.removed, 1);
        assert_eq!(polls(&healthy_polls), 1);
        assert_eq!(mux.families(), vec![ControllerFamily::SwitchPro]);
    }

    #[test]
    fn test_timeout_keeps_session() {
        let mut mux = DeviceMultiplexer::new();
        mux.insert(Box::new(ScriptedSession::new(
            ControllerFamily::Wiimote,
            vec![Err(SessionError::timeout(16)), Ok(())],
        )));

        let first = mux.poll_all();
        assert_eq!(first.timed_out, 1);
        assert_eq!(mux.len(), 1);

        let second = mux.poll_all();
        assert_eq!(second.succeeded, 1);
    }

    #[test]
    fn test_non_fatal_errors_are_skipped() {
        let mut mux = DeviceMultiplexer::new();
        mux.insert(Box::new(ScriptedSession::new(
            ControllerFamily::GameCubeAdapter,
            vec![
                Err(SessionError::invalid_data("short frame")),
                Err(SessionError::Failure { code: 8 }),
            ],
        )));

        assert_eq!(mux.poll_all().skipped, 1);
        assert_eq!(mux.poll_all().skipped, 1);
        assert!(mux.contains(ControllerFamily::GameCubeAdapter));
    }

    #[test]
    fn test_invalid_replies_removes_session() {
        let mut mux = DeviceMultiplexer::new();
        mux.insert(Box::new(ScriptedSession::new(
            ControllerFamily::DualShock4,
            vec![Err(SessionError::invalid_replies("desync"))],
        )));
        let summary = mux.poll_all();
        assert_eq!(summary.removed, 1);
        assert!(mux.is_empty());
    }

    #[test]
    fn test_insert_replaces_same_family() {
        let mut mux = DeviceMultiplexer::new();
        assert!(
            mux.insert(Box::new(ScriptedSession::new(ControllerFamily::SwitchPro, vec![])))
                .is_none()
        );
        let replaced =
            mux.insert(Box::new(ScriptedSession::new(ControllerFamily::SwitchPro, vec![])));
        assert!(replaced.is_some());
        assert_eq!(mux.len(), 1);
    }

    #[test]
    fn test_reports_after_tick() {
        let mut mux = DeviceMultiplexer::new();
        mux.insert(Box::new(ScriptedSession::new(ControllerFamily::DualSense, vec![])));
        mux.poll_all();

        let snapshots = mux.reports();
        assert_eq!(snapshots.len(), 1);
        assert_eq!(snapshots[0].family, ControllerFamily::DualSense);
        assert_eq!(snapshots[0].port, 0);
        assert!(snapshots[0].report.is_pressed(ControllerButtons::A));
        assert!(snapshots[0].changed_this_tick());
    }

    #[test]
    fn test_failed_tick_marks_snapshot_stale() {
        let mut mux = DeviceMultiplexer::new();
        mux.insert(Box::new(ScriptedSession::new(
            ControllerFamily::SwitchPro,
            vec![
                Ok(()),
                Err(SessionError::timeout(33)),
                Err(SessionError::invalid_data("report 0x3f instead of full input")),
            ],
        )));

        mux.poll_all();
        let first = mux.reports();
        assert!(first[0].fresh);
        assert!(first[0].changed_this_tick());

        for _ in 0..2 {
            mux.poll_all();
            let snapshots = mux.reports();
            assert!(!snapshots[0].fresh);
            // The slot still holds the old edge, but it is not reported again.
            assert!(snapshots[0].changed());
            assert!(!snapshots[0].changed_this_tick());
        }
    }

    #[test]
    fn test_discover_opens_present_families() -> TestResult {
        let dualsense = MockTransport::usb();
        let adapter = MockTransport::usb();
        let mut port = MockPort::new();
        port.add_device(0x054C, 0x0CE6, dualsense);
        port.add_device(0x057E, 0x0337, adapter.clone());
        // Present but silent: the Switch Pro handshake times out.
        port.add_device(0x057E, 0x2009, MockTransport::bluetooth());

        let mut mux = DeviceMultiplexer::new();
        let opened = mux.discover(&port, &EngineConfig::default());

        assert_eq!(opened, 2);
        assert_eq!(
            mux.families(),
            vec![ControllerFamily::DualSense, ControllerFamily::GameCubeAdapter]
        );
        assert_eq!(adapter.write_history(), vec![vec![0x13]]);
        Ok(())
    }

    #[test]
    fn test_discover_skips_disabled_families() -> TestResult {
        let mut port = MockPort::new();
        port.add_device(0x054C, 0x0CE6, MockTransport::usb());

        let mut config = EngineConfig::default();
        config.dualsense.enabled = false;
        let mut mux = DeviceMultiplexer::new();
        assert_eq!(mux.discover(&port, &config), 0);
        assert!(port.open_history().is_empty());
        Ok(())
    }
}
