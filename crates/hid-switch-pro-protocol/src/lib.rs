//! Nintendo Switch Pro Controller HID protocol.
//!
//! This crate is I/O-free: it encodes command frames and decodes input and
//! reply reports. Sessions built on top of it live in `padlink-engine`.
//!
//! # VID / PID
//! - Vendor ID: `0x057E` (Nintendo)
//! - Product ID: `0x2009` (Pro Controller, USB and Bluetooth)
//!
//! # Protocol Overview
//! Over USB the controller first needs a short handshake of `0x80`-prefixed
//! USB commands (`Handshake`, `HighSpeed`, `Handshake`, `ForceUSB`), each
//! acknowledged with report `0x81`. Over Bluetooth that step is skipped.
//!
//! Subcommands are sent in `0x01` "rumble + subcommand" packets carrying a
//! rolling 4-bit packet counter. The controller answers each with a `0x21`
//! reply echoing the subcommand id. Once `SetInputReportMode(0x30)` is
//! acknowledged the controller streams `0x30` full input reports.
//!
//! Stick values are 12-bit and nibble-packed into three bytes per stick; the
//! 24-bit button field has bit 15 inverted relative to the other buttons.
//!
//! # Sources
//! - dekuNukem/Nintendo_Switch_Reverse_Engineering (bluetooth_hid_notes, USB-HID-Notes)
//! - Linux kernel `hid-nintendo.c`

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(static_mut_refs)]
#![deny(clippy::unwrap_used)]

pub mod ids;
pub mod input;
pub mod protocol;
pub mod types;

pub use ids::{
    INPUT_MODE_FULL, PRODUCT_ID, VENDOR_ID, command_ids, is_switch_pro, packet_ids, report_ids,
    usb_command_ids,
};
pub use input::{
    COMMAND_REPLY_PARSE_LEN, CommandReply, DeviceInfoReply, FULL_INPUT_PARSE_LEN, REPLY_DATA_LEN,
    STICK_MAX, SwitchProInputReport, UsbCommandAck, decode_stick, encode_stick,
    parse_command_reply, parse_full_input, parse_usb_ack, report_id,
};
pub use protocol::{
    BLUETOOTH_COMMAND_LEN, BLUETOOTH_REPORT_LEN, NEUTRAL_RUMBLE, USB_COMMAND_LEN, USB_REPORT_LEN,
    command_frame_len, encode_rumble_only, encode_subcommand, encode_usb_command, input_report_len,
};
pub use types::{PlayerLights, SubCommand, SwitchProButtons, UsbCommand};
