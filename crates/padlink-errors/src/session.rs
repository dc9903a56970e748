//! Controller session errors.
//!
//! A session surfaces exactly one of these from `find`/`update`. The caller
//! (normally the multiplexer) uses [`SessionError::is_fatal`] to decide whether
//! the session is torn down or simply skipped for this tick.

use crate::common::ErrorSeverity;
use crate::transport::{OpenError, TransportError};

/// Errors returned by controller sessions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// Device absent at discovery
    #[error("Controller not found: vendor={vendor_id:#06x}, product={product_id:#06x}")]
    NotFound {
        /// USB vendor ID
        vendor_id: u16,
        /// USB product ID
        product_id: u16,
    },

    /// A read or write timed out (after any retries the operation allows)
    #[error("Controller timed out after {timeout_ms}ms")]
    Timeout {
        /// Per-attempt timeout, in milliseconds
        timeout_ms: u32,
    },

    /// The device went away
    #[error("Controller disconnected")]
    Disconnected,

    /// The device is held by someone else
    #[error("Controller is locked by another process")]
    Locked,

    /// The device answered out of step with the command stream
    #[error("Invalid replies: {0}")]
    InvalidReplies(String),

    /// A frame arrived but its payload could not be decoded
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// The device reported an error code for the last operation
    #[error("Device reported failure code {code:#04x}")]
    Failure {
        /// Raw error code from the device
        code: u8,
    },

    /// The transport rejected the request
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),
}

impl SessionError {
    /// Get the error severity.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            SessionError::NotFound { .. } => ErrorSeverity::Info,
            SessionError::Timeout { .. } => ErrorSeverity::Warning,
            SessionError::Disconnected => ErrorSeverity::Critical,
            SessionError::Locked => ErrorSeverity::Error,
            SessionError::InvalidReplies(_) => ErrorSeverity::Critical,
            SessionError::InvalidData(_) => ErrorSeverity::Warning,
            SessionError::Failure { .. } => ErrorSeverity::Error,
            SessionError::InvalidParameters(_) => ErrorSeverity::Critical,
        }
    }

    /// Check if retrying the same operation might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, SessionError::Timeout { .. })
    }

    /// Check if this error ends the session that produced it.
    ///
    /// `Timeout`, `InvalidData` and `Failure` only spoil the current operation;
    /// the session may keep polling on the next tick.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            SessionError::NotFound { .. }
                | SessionError::Disconnected
                | SessionError::Locked
                | SessionError::InvalidReplies(_)
                | SessionError::InvalidParameters(_)
        )
    }

    /// Create an invalid replies error.
    pub fn invalid_replies(reason: impl Into<String>) -> Self {
        SessionError::InvalidReplies(reason.into())
    }

    /// Create an invalid data error.
    pub fn invalid_data(reason: impl Into<String>) -> Self {
        SessionError::InvalidData(reason.into())
    }

    /// Create a timeout error.
    pub fn timeout(timeout_ms: u32) -> Self {
        SessionError::Timeout { timeout_ms }
    }
}

impl From<TransportError> for SessionError {
    fn from(e: TransportError) -> Self {
        match e {
            TransportError::Timeout { timeout_ms } => SessionError::Timeout { timeout_ms },
            TransportError::Disconnected => SessionError::Disconnected,
            TransportError::Incomplete { expected, actual } => SessionError::InvalidData(format!(
                "incomplete frame: expected {expected} bytes, got {actual}"
            )),
            TransportError::InvalidParameters(msg) => SessionError::InvalidParameters(msg),
        }
    }
}

impl From<OpenError> for SessionError {
    fn from(e: OpenError) -> Self {
        match e {
            OpenError::NotFound {
                vendor_id,
                product_id,
            } => SessionError::NotFound {
                vendor_id,
                product_id,
            },
            OpenError::Timeout => SessionError::Timeout { timeout_ms: 0 },
            OpenError::Locked { .. } => SessionError::Locked,
            OpenError::Backend(msg) => SessionError::InvalidParameters(msg),
        }
    }
}
