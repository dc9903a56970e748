//! padlink engine: controller sessions and device multiplexing
//!
//! This crate owns all controller I/O. Each supported family gets a session
//! type that opens the device, runs the vendor handshake through the shared
//! [`correlator`], and then turns one wire report per `update` into a
//! vendor-neutral [`CanonicalReport`]. The [`multiplexer`] polls every present
//! session once per tick and isolates per-device failures; the [`poller`] runs
//! it on a dedicated thread and publishes ticks over a bounded channel.
//!
//! # Architecture
//!
//! - [`correlator`]: submit a command and await its correlated reply, with bounded retries
//! - [`session`]: session state machine, the [`ControllerSession`] trait, report bookkeeping
//! - [`hid::vendor`]: one session per controller family
//! - [`hid::hidapi_transport`] / [`hid::usb_transport`]: OS-facing transports
//! - [`config`]: JSON engine configuration
//! - [`multiplexer`] / [`poller`]: tick loop and its thread

#![deny(static_mut_refs)]
#![deny(unused_must_use)]
#![deny(clippy::unwrap_used)]

pub mod config;
pub mod correlator;
pub mod hid;
pub mod multiplexer;
pub mod poller;
pub mod session;

pub use config::{ConfigError, EngineConfig, FamilyConfig};
pub use correlator::{CommandCounter, CommandExchange, Correlator, ReplyMatch, RetryPolicy};
pub use hid::vendor::{
    DualSenseSession, DualShock4Session, GameCubeSession, SwitchProSession, WiimoteSession,
    open_session,
};
pub use multiplexer::{DeviceMultiplexer, SlotSnapshot, TickSummary};
pub use poller::{PollTick, Poller};
pub use session::{ControllerSession, ReportSlot, SessionState};

pub use padlink_device_types::{CanonicalReport, ControllerButtons, ControllerFamily};
pub use padlink_errors::{SessionError, SessionResult};
pub use padlink_hid_common::{ConnectionType, DeviceInfo, Transport, TransportPort};
