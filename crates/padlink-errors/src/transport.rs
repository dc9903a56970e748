//! Transport-level error types.
//!
//! These mirror the small result enums of the OS-facing HID/USB layer: a read
//! or write either completes, times out, or fails because the handle is gone.

use crate::common::ErrorSeverity;

/// Errors returned by `read`/`write` on an open transport handle.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// No data arrived (or the write did not complete) within the timeout
    #[error("Transport timed out after {timeout_ms}ms")]
    Timeout {
        /// Timeout that elapsed, in milliseconds
        timeout_ms: u32,
    },

    /// The device went away; the handle is unusable
    #[error("Device disconnected")]
    Disconnected,

    /// A transfer completed with fewer bytes than the frame requires
    #[error("Incomplete transfer: expected {expected} bytes, got {actual}")]
    Incomplete {
        /// Byte count the caller asked for
        expected: usize,
        /// Byte count actually transferred
        actual: usize,
    },

    /// The request itself was malformed (empty buffer, bad endpoint, ...)
    #[error("Invalid transport parameters: {0}")]
    InvalidParameters(String),
}

impl TransportError {
    /// Get the error severity.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            TransportError::Timeout { .. } => ErrorSeverity::Warning,
            TransportError::Disconnected => ErrorSeverity::Critical,
            TransportError::Incomplete { .. } => ErrorSeverity::Warning,
            TransportError::InvalidParameters(_) => ErrorSeverity::Error,
        }
    }

    /// Check if a subsequent transfer on the same handle might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            TransportError::Timeout { .. } | TransportError::Incomplete { .. }
        )
    }

    /// Create a timeout error.
    pub fn timeout(timeout_ms: u32) -> Self {
        TransportError::Timeout { timeout_ms }
    }
}

/// Errors returned when opening a device by vendor/product ID.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OpenError {
    /// No matching device is attached
    #[error("Device not found: vendor={vendor_id:#06x}, product={product_id:#06x}")]
    NotFound {
        /// USB vendor ID
        vendor_id: u16,
        /// USB product ID
        product_id: u16,
    },

    /// The backend did not answer in time while opening
    #[error("Timed out opening device")]
    Timeout,

    /// The device exists but is held by another process or driver
    #[error("Device is locked: vendor={vendor_id:#06x}, product={product_id:#06x}")]
    Locked {
        /// USB vendor ID
        vendor_id: u16,
        /// USB product ID
        product_id: u16,
    },

    /// The OS backend itself failed (enumeration, permissions, ...)
    #[error("Backend error: {0}")]
    Backend(String),
}

impl OpenError {
    /// Create a not found error.
    pub fn not_found(vendor_id: u16, product_id: u16) -> Self {
        OpenError::NotFound {
            vendor_id,
            product_id,
        }
    }

    /// Create a locked error.
    pub fn locked(vendor_id: u16, product_id: u16) -> Self {
        OpenError::Locked {
            vendor_id,
            product_id,
        }
    }

    /// Get the error severity.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            OpenError::NotFound { .. } => ErrorSeverity::Info,
            OpenError::Timeout => ErrorSeverity::Warning,
            OpenError::Locked { .. } => ErrorSeverity::Error,
            OpenError::Backend(_) => ErrorSeverity::Error,
        }
    }
}
