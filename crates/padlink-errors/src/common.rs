//! Top-level error type and severity classification.

use core::fmt;

use crate::{OpenError, SessionError, TransportError};

/// Top-level error type wrapping every padlink sub-error.
///
/// Front ends (the CLI, a host application) use this to propagate errors from
/// any layer with `?`.
#[derive(Debug, thiserror::Error)]
pub enum PadlinkError {
    /// Transport errors
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// Device open errors
    #[error("Open error: {0}")]
    Open(#[from] OpenError),

    /// Controller session errors
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

impl PadlinkError {
    /// Get the error severity level.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            PadlinkError::Transport(e) => e.severity(),
            PadlinkError::Open(e) => e.severity(),
            PadlinkError::Session(e) => e.severity(),
            PadlinkError::Other(_) => ErrorSeverity::Error,
        }
    }

    /// Check if this error is recoverable.
    pub fn is_recoverable(&self) -> bool {
        self.severity() < ErrorSeverity::Critical
    }

    /// Create a generic error with a message.
    pub fn other(msg: impl Into<String>) -> Self {
        PadlinkError::Other(msg.into())
    }
}

/// Error severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum ErrorSeverity {
    /// Informational, no action required
    Info = 0,
    /// Warning, may require attention
    Warning = 1,
    /// Error, operation failed
    Error = 2,
    /// Critical, the device handle is no longer usable
    Critical = 3,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
