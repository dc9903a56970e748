//! Common transport and report utilities for padlink controller protocols
//!
//! This crate holds the pieces every controller family shares: the byte-level
//! [`Transport`] contract the sessions are written against, bounds-checked
//! report reading/building helpers for the I/O-free codec crates, and a
//! scripted [`mock::MockTransport`] for tests.

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod device_info;
pub mod mock;
pub mod report_parser;
pub mod transport;

pub use device_info::*;
pub use report_parser::*;
pub use transport::*;

pub use padlink_errors::{OpenError, SessionError, TransportError};

use thiserror::Error;

/// Errors produced while decoding or encoding a wire report.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReportError {
    #[error("Report too short: need {need} bytes, got {got}")]
    TooShort { need: usize, got: usize },

    #[error("Unexpected report id: expected {expected:#04x}, got {got:#04x}")]
    UnexpectedReportId { expected: u8, got: u8 },

    #[error("Payload too large: at most {max} bytes, got {got}")]
    PayloadTooLarge { max: usize, got: usize },

    #[error("Invalid {field}: {value:#x}")]
    InvalidField { field: &'static str, value: u32 },
}

pub type ReportResult<T> = Result<T, ReportError>;

impl From<ReportError> for SessionError {
    fn from(e: ReportError) -> Self {
        SessionError::InvalidData(e.to_string())
    }
}
