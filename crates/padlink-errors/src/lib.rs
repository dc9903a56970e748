//! Error taxonomy for padlink
//!
//! Every fallible operation in the workspace returns one of the typed errors
//! defined here. Nothing is signalled by panicking: a device that answers with
//! something unexpected produces an ordinary error value and the caller decides
//! whether the session survives it.
//!
//! # Architecture
//!
//! - [`transport`]: errors produced by the byte-level HID/USB transport
//! - [`session`]: errors produced by controller sessions (discovery, handshake, polling)
//! - [`common`]: the umbrella error and severity classification
//!
//! # Example
//!
//! ```
//! use padlink_errors::prelude::*;
//!
//! fn poll_once(result: std::result::Result<(), TransportError>) -> SessionResult<()> {
//!     result?;
//!     Ok(())
//! }
//!
//! let err = poll_once(Err(TransportError::Disconnected)).unwrap_err();
//! assert!(err.is_fatal());
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![warn(missing_docs, rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod common;
pub mod prelude;
pub mod session;
pub mod transport;

pub use common::{ErrorSeverity, PadlinkError};
pub use session::SessionError;
pub use transport::{OpenError, TransportError};

/// A specialized `Result` type for front-end operations.
pub type Result<T> = std::result::Result<T, PadlinkError>;

/// A specialized `Result` type for controller session operations.
pub type SessionResult<T = ()> = std::result::Result<T, SessionError>;
