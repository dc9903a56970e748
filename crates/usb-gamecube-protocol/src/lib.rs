//! Nintendo GameCube Controller Adapter protocol.
//!
//! # VID / PID
//! - Vendor ID: `0x057E` (Nintendo)
//! - Product ID: `0x0337` (WUP-028)
//!
//! # Protocol Overview
//! The adapter is a vendor-class USB device, not HID. After claiming
//! interface 0 the host writes the single byte `0x13` to interrupt OUT
//! endpoint `0x02`; from then on every read of interrupt IN endpoint `0x81`
//! returns a 37-byte frame: report id `0x21` followed by four 9-byte port
//! blocks, one per controller socket.
//!
//! # Port block
//!
//! | Offset | Size | Field |
//! |--------|------|-------|
//! | 0 | 1 | Status: high nibble `1` wired, `2` wireless, else empty |
//! | 1 | 2 | Buttons (LE) |
//! | 3 | 1 | Control stick X |
//! | 4 | 1 | Control stick Y |
//! | 5 | 1 | C-stick X |
//! | 6 | 1 | C-stick Y |
//! | 7 | 1 | L analog |
//! | 8 | 1 | R analog |
//!
//! # Sources
//! - Dolphin `GCAdapter.cpp`
//! - Linux kernel `hid-nintendo` / `wii-u-gcc-adapter` notes

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(static_mut_refs)]
#![deny(clippy::unwrap_used)]

pub mod frame;
pub mod ids;

pub use frame::{
    FRAME_LEN, GameCubeButtons, GameCubeFrame, GameCubePort, PORT_COUNT, PORT_LEN, PortStatus,
    parse_frame,
};
pub use ids::{
    ENDPOINT_IN, ENDPOINT_OUT, INTERFACE, PRODUCT_ID, REPORT_ID, START_PAYLOAD, VENDOR_ID,
    is_gamecube_adapter,
};
