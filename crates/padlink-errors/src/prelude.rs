//! Prelude module for convenient error handling imports.

pub use crate::{
    Result, SessionResult,
    common::{ErrorSeverity, PadlinkError},
    session::SessionError,
    transport::{OpenError, TransportError},
};
