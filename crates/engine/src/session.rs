//! Controller session state machine and trait

use padlink_device_types::{CanonicalReport, ControllerFamily};
use padlink_errors::{SessionError, SessionResult};
use serde::{Deserialize, Serialize};

/// Lifecycle shared by every controller family.
///
/// `Uninitialized → Handshaking → Configuring → Streaming → (Disconnected | Faulted)`.
/// Families without a handshake pass through `Handshaking` without I/O.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SessionState {
    #[default]
    Uninitialized,
    Handshaking,
    Configuring,
    Streaming,
    Disconnected,
    Faulted,
}

impl SessionState {
    /// The session can no longer be polled.
    pub fn is_terminal(self) -> bool {
        matches!(self, SessionState::Disconnected | SessionState::Faulted)
    }

    /// State a session moves to after `error`, if the error ends it.
    pub fn after_error(error: &SessionError) -> Option<SessionState> {
        match error {
            SessionError::Disconnected => Some(SessionState::Disconnected),
            e if e.is_fatal() => Some(SessionState::Faulted),
            _ => None,
        }
    }
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SessionState::Uninitialized => "uninitialized",
            SessionState::Handshaking => "handshaking",
            SessionState::Configuring => "configuring",
            SessionState::Streaming => "streaming",
            SessionState::Disconnected => "disconnected",
            SessionState::Faulted => "faulted",
        };
        f.write_str(name)
    }
}

/// The current and previous canonical report of one logical controller.
///
/// Only [`ReportSlot::commit`] changes it, so a failed update leaves both
/// reports exactly as they were.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ReportSlot {
    current: CanonicalReport,
    previous: CanonicalReport,
}

impl ReportSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commit(&mut self, report: CanonicalReport) {
        self.previous = self.current;
        self.current = report;
    }

    pub fn current(&self) -> CanonicalReport {
        self.current
    }

    pub fn previous(&self) -> CanonicalReport {
        self.previous
    }
}

/// One open controller.
///
/// A session exclusively owns its transport; dropping the session closes it.
pub trait ControllerSession: Send {
    fn family(&self) -> ControllerFamily;

    fn state(&self) -> SessionState;

    /// Read and decode one report.
    ///
    /// On success [`ControllerSession::report`] holds the new state and
    /// [`ControllerSession::last_report`] the one before it. On error both are
    /// unchanged.
    fn update(&mut self) -> SessionResult<()>;

    fn report(&self) -> CanonicalReport;

    fn last_report(&self) -> CanonicalReport;

    /// Logical controllers carried by this handle.
    fn port_count(&self) -> usize {
        1
    }

    /// Ports with a controller attached right now.
    fn connected_ports(&self) -> Vec<usize> {
        vec![0]
    }

    fn port_report(&self, port: usize) -> Option<CanonicalReport> {
        (port == 0).then(|| self.report())
    }

    fn port_last_report(&self, port: usize) -> Option<CanonicalReport> {
        (port == 0).then(|| self.last_report())
    }
}

/// Reject polling a session that is not streaming.
pub(crate) fn ensure_streaming(state: SessionState) -> SessionResult<()> {
    match state {
        SessionState::Streaming => Ok(()),
        SessionState::Disconnected => Err(SessionError::Disconnected),
        other => Err(SessionError::InvalidParameters(format!(
            "session is {other}, not streaming"
        ))),
    }
}
