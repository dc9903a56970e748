//! Output frame encoders.
//!
//! # Subcommand frame (`0x01`)
//!
//! | Offset | Size | Field |
//! |--------|------|-------|
//! | 0 | 1 | Packet id (`0x01`) |
//! | 1 | 1 | Packet counter, low nibble only |
//! | 2 | 8 | Rumble data (left, right) |
//! | 10 | 1 | Subcommand id |
//! | 11 | .. | Subcommand argument, zero-padded |
//!
//! USB frames are 64 bytes; Bluetooth output frames are 49 bytes.
//!
//! # USB command frame (`0x80`)
//!
//! | Offset | Size | Field |
//! |--------|------|-------|
//! | 0 | 1 | Packet id (`0x80`) |
//! | 1 | 1 | USB command id |
//! | 2 | 62 | Zero |

use padlink_hid_common::{ConnectionType, ReportBuilder};

use crate::ids::packet_ids;
use crate::types::{SubCommand, UsbCommand};

/// Native USB report size, both directions.
pub const USB_REPORT_LEN: usize = 64;
/// Output frame size over Bluetooth.
pub const BLUETOOTH_COMMAND_LEN: usize = 49;
/// Input read buffer size over Bluetooth.
pub const BLUETOOTH_REPORT_LEN: usize = 362;
/// Output frame size over USB.
pub const USB_COMMAND_LEN: usize = USB_REPORT_LEN;

/// Rumble payload sent with every subcommand (motors idle).
pub const NEUTRAL_RUMBLE: [u8; 8] = [0; 8];

pub fn command_frame_len(connection: ConnectionType) -> usize {
    match connection {
        ConnectionType::Usb => USB_COMMAND_LEN,
        ConnectionType::Bluetooth => BLUETOOTH_COMMAND_LEN,
    }
}

/// Buffer size to hand to `read` for input reports.
pub fn input_report_len(connection: ConnectionType) -> usize {
    match connection {
        ConnectionType::Usb => USB_REPORT_LEN,
        ConnectionType::Bluetooth => BLUETOOTH_REPORT_LEN,
    }
}

fn rumble_frame(
    packet_id: u8,
    counter: u8,
    rumble: &[u8; 8],
    connection: ConnectionType,
) -> ReportBuilder {
    let mut builder = ReportBuilder::with_capacity(command_frame_len(connection));
    builder
        .write_u8(packet_id)
        .write_u8(counter & 0x0F)
        .write_bytes(rumble);
    builder
}

/// Encode a rumble-with-subcommand frame.
///
/// `counter` is the session's rolling packet counter; only its low nibble is sent.
pub fn encode_subcommand(counter: u8, command: SubCommand, connection: ConnectionType) -> Vec<u8> {
    let mut builder = rumble_frame(
        packet_ids::RUMBLE_WITH_COMMAND,
        counter,
        &NEUTRAL_RUMBLE,
        connection,
    );
    builder.write_u8(command.id());
    if let Some(arg) = command.argument() {
        builder.write_u8(arg);
    }
    builder.pad_to(command_frame_len(connection));
    builder.into_inner()
}

/// Encode a rumble-only frame.
pub fn encode_rumble_only(counter: u8, rumble: &[u8; 8], connection: ConnectionType) -> Vec<u8> {
    let mut builder = rumble_frame(packet_ids::RUMBLE_ONLY, counter, rumble, connection);
    builder.pad_to(command_frame_len(connection));
    builder.into_inner()
}

/// Encode a `0x80` USB bridge command. Always a 64-byte USB frame.
pub fn encode_usb_command(command: UsbCommand) -> Vec<u8> {
    let mut builder = ReportBuilder::with_capacity(USB_COMMAND_LEN);
    builder
        .write_u8(packet_ids::USB_COMMAND)
        .write_u8(command.id())
        .pad_to(USB_COMMAND_LEN);
    builder.into_inner()
}
