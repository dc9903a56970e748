//! Nintendo Wii Remote HID protocol.
//!
//! # VID / PID
//! - Vendor ID: `0x057E` (Nintendo)
//! - Product ID: `0x0306` (RVL-CNT-01)
//!
//! # Protocol Overview
//! The Wii Remote has no handshake of its own. The host requests a status
//! report (`0x15` → `0x20`) to learn whether an extension is plugged in. If
//! one is, the extension is initialized through the remote's register space
//! (writes `0x16` acknowledged by `0x22`) and identified by reading six bytes
//! at `0xA400FA` (read `0x17` answered by `0x21`). Continuous reporting is then
//! enabled in mode `0x35`: core buttons, accelerometer and 16 extension bytes.
//!
//! An unsolicited status report while streaming means an extension was
//! plugged in or removed, and the whole setup must be repeated.
//!
//! # Sources
//! - WiiBrew: Wiimote, Extension Controllers, Nunchuck, Classic Controller
//! - Linux kernel `hid-wiimote-core.c` and `hid-wiimote-modules.c`

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(static_mut_refs)]
#![deny(clippy::unwrap_used)]

pub mod classic;
pub mod extension;
pub mod ids;
pub mod nunchuck;
pub mod reports;
pub mod requests;

pub use classic::{ClassicButtons, ClassicFormat, ClassicReport};
pub use extension::{
    ExtensionType, IDENTIFICATION_LEN, IdentificationError, identify_extension, identify_from_read,
};
pub use ids::{PRODUCT_ID, VENDOR_ID, is_wiimote, registers, report_ids};
pub use nunchuck::{NunchuckButtons, NunchuckReport};
pub use reports::{
    AcknowledgeReport, CoreButtons, InputReport, ReadReport, StatusFlags, StatusReport,
    parse_acknowledge, parse_input, parse_read, parse_status,
};
pub use requests::{
    DATA_REPORT_MODE, LedMask, REGISTER_SPACE, WRITE_PAYLOAD_LEN, data_report_request,
    leds_request, read_request, rumble_request, status_request, write_request,
    write_register_request,
};
