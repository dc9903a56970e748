//! Input report decoding.
//!
//! # Standard input header (reports `0x21` and `0x30`)
//!
//! | Offset | Size | Field |
//! |--------|------|-------|
//! | 0 | 1 | Report id |
//! | 1 | 1 | Timer, increments per report |
//! | 2 | 1 | Battery level (bits 5..7), charging (bit 4), wired (bit 0) |
//! | 3 | 3 | Buttons, 24-bit little-endian, bit 15 inverted |
//! | 6 | 3 | Left stick, two nibble-packed 12-bit values |
//! | 9 | 3 | Right stick, two nibble-packed 12-bit values |
//! | 12 | 1 | Vibrator input report |
//!
//! Report `0x30` follows with three IMU samples (36 bytes). Report `0x21`
//! follows with the ack byte (13), the echoed subcommand id (14) and up to 35
//! bytes of reply data (15..50).
//!
//! # Stick packing
//!
//! ```text
//! byte0 = X[7:0]
//! byte1 = Y[3:0] << 4 | X[11:8]
//! byte2 = Y[11:4]
//! ```

use padlink_device_types::{
    CanonicalReport, ControllerButtons, digital_trigger, normalize_stick_u12,
};
use padlink_hid_common::{ReportError, ReportReader, ReportResult};

use crate::ids::report_ids;
use crate::types::SwitchProButtons;

/// Bytes needed to decode the standard header.
pub const FULL_INPUT_PARSE_LEN: usize = 13;
/// Bytes needed to decode a subcommand reply's ack and echoed id.
pub const COMMAND_REPLY_PARSE_LEN: usize = 15;
/// Size of the reply data block in a `0x21` report.
pub const REPLY_DATA_LEN: usize = 35;

/// Full-scale raw stick value (12 bits).
pub const STICK_MAX: u16 = 0x0FFF;

const STATE_WIRED: u8 = 0x01;
const STATE_CHARGING: u8 = 0x10;
const ACK_FLAG: u8 = 0x80;

/// Decode one 3-byte stick field into raw 12-bit `(x, y)`.
#[inline]
pub fn decode_stick(bytes: [u8; 3]) -> (u16, u16) {
    let [b0, b1, b2] = bytes;
    let x = (u16::from(b1 & 0x0F) << 8) | u16::from(b0);
    let y = (u16::from(b2) << 4) | (u16::from(b1 & 0xF0) >> 4);
    (x, y)
}

/// Inverse of [`decode_stick`]. Bits above the low 12 are dropped.
#[inline]
pub fn encode_stick(x: u16, y: u16) -> [u8; 3] {
    let b0 = (x & 0xFF) as u8;
    let b1 = (((x >> 8) & 0x0F) as u8) | (((y & 0x0F) as u8) << 4);
    let b2 = ((y >> 4) & 0xFF) as u8;
    [b0, b1, b2]
}

/// Decoded standard input header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SwitchProInputReport {
    pub report_id: u8,
    pub timer: u8,
    pub state: u8,
    pub buttons: SwitchProButtons,
    pub left_stick: (u16, u16),
    pub right_stick: (u16, u16),
    pub vibrator: u8,
}

impl SwitchProInputReport {
    fn parse_header(reader: &ReportReader<'_>) -> ReportResult<Self> {
        Ok(Self {
            report_id: reader.u8_at(0)?,
            timer: reader.u8_at(1)?,
            state: reader.u8_at(2)?,
            buttons: SwitchProButtons::from_wire(reader.u24_le_at(3)?),
            left_stick: decode_stick(reader.bytes_at(6)?),
            right_stick: decode_stick(reader.bytes_at(9)?),
            vibrator: reader.u8_at(12)?,
        })
    }

    /// Battery level, `0` (empty) to `8` (full), in steps of two.
    pub fn battery_level(&self) -> u8 {
        (self.state & 0xE0) >> 4
    }

    pub fn is_charging(&self) -> bool {
        self.state & STATE_CHARGING != 0
    }

    pub fn is_wired(&self) -> bool {
        self.state & STATE_WIRED != 0
    }

    /// Fold into the vendor-neutral report.
    ///
    /// Raw stick Y grows upward, so it is sign-inverted. ZL/ZR are digital and
    /// drive both the trigger buttons and the trigger scalars.
    pub fn to_canonical(&self) -> CanonicalReport {
        let b = self.buttons;
        let buttons = ControllerButtons::empty()
            .with_if(ControllerButtons::A, b.contains(SwitchProButtons::A))
            .with_if(ControllerButtons::B, b.contains(SwitchProButtons::B))
            .with_if(ControllerButtons::X, b.contains(SwitchProButtons::X))
            .with_if(ControllerButtons::Y, b.contains(SwitchProButtons::Y))
            .with_if(ControllerButtons::MENU, b.contains(SwitchProButtons::PLUS))
            .with_if(ControllerButtons::VIEW, b.contains(SwitchProButtons::MINUS))
            .with_if(ControllerButtons::GUIDE, b.contains(SwitchProButtons::HOME))
            .with_if(ControllerButtons::CAPTURE, b.contains(SwitchProButtons::CAPTURE))
            .with_if(
                ControllerButtons::LEFT_STICK,
                b.contains(SwitchProButtons::LEFT_STICK),
            )
            .with_if(
                ControllerButtons::RIGHT_STICK,
                b.contains(SwitchProButtons::RIGHT_STICK),
            )
            .with_if(ControllerButtons::LEFT_BUMPER, b.contains(SwitchProButtons::L))
            .with_if(ControllerButtons::RIGHT_BUMPER, b.contains(SwitchProButtons::R))
            .with_if(ControllerButtons::LEFT_TRIGGER, b.contains(SwitchProButtons::ZL))
            .with_if(ControllerButtons::RIGHT_TRIGGER, b.contains(SwitchProButtons::ZR))
            .with_if(ControllerButtons::DPAD_UP, b.contains(SwitchProButtons::DPAD_UP))
            .with_if(
                ControllerButtons::DPAD_DOWN,
                b.contains(SwitchProButtons::DPAD_DOWN),
            )
            .with_if(
                ControllerButtons::DPAD_LEFT,
                b.contains(SwitchProButtons::DPAD_LEFT),
            )
            .with_if(
                ControllerButtons::DPAD_RIGHT,
                b.contains(SwitchProButtons::DPAD_RIGHT),
            );

        let (lx, ly) = self.left_stick;
        let (rx, ry) = self.right_stick;
        CanonicalReport::new()
            .with_buttons(buttons)
            .with_left_stick(normalize_stick_u12(lx), -normalize_stick_u12(ly))
            .with_right_stick(normalize_stick_u12(rx), -normalize_stick_u12(ry))
            .with_triggers(
                digital_trigger(b.contains(SwitchProButtons::ZL)),
                digital_trigger(b.contains(SwitchProButtons::ZR)),
            )
    }
}

/// Decode a `0x30` full input report.
pub fn parse_full_input(data: &[u8]) -> ReportResult<SwitchProInputReport> {
    let reader = ReportReader::with_min_len(data, FULL_INPUT_PARSE_LEN)?;
    reader.expect_report_id(report_ids::FULL_INPUT)?;
    SwitchProInputReport::parse_header(&reader)
}

/// Decoded `0x21` subcommand reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandReply {
    pub input: SwitchProInputReport,
    pub ack: u8,
    pub subcommand_id: u8,
    pub data: [u8; REPLY_DATA_LEN],
}

impl CommandReply {
    pub fn is_acked(&self) -> bool {
        self.ack & ACK_FLAG != 0
    }

    /// Reply data of a `RequestDeviceInfo` subcommand.
    pub fn device_info(&self) -> Option<DeviceInfoReply> {
        if self.subcommand_id != crate::ids::command_ids::REQUEST_DEVICE_INFO {
            return None;
        }
        let [major, minor, device_type, _, m0, m1, m2, m3, m4, m5, ..] = self.data;
        Some(DeviceInfoReply {
            firmware_major: major,
            firmware_minor: minor,
            device_type,
            mac_address: [m0, m1, m2, m3, m4, m5],
        })
    }
}

/// `RequestDeviceInfo` reply payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceInfoReply {
    pub firmware_major: u8,
    pub firmware_minor: u8,
    /// `0x03` for the Pro Controller.
    pub device_type: u8,
    pub mac_address: [u8; 6],
}

/// Decode a `0x21` subcommand reply. Missing trailing data bytes read as zero.
pub fn parse_command_reply(data: &[u8]) -> ReportResult<CommandReply> {
    let reader = ReportReader::with_min_len(data, COMMAND_REPLY_PARSE_LEN)?;
    reader.expect_report_id(report_ids::COMMAND_REPLY)?;

    let mut reply_data = [0u8; REPLY_DATA_LEN];
    let available = data.get(COMMAND_REPLY_PARSE_LEN..).unwrap_or(&[]);
    let n = available.len().min(REPLY_DATA_LEN);
    if let (Some(dst), Some(src)) = (reply_data.get_mut(..n), available.get(..n)) {
        dst.copy_from_slice(src);
    }

    Ok(CommandReply {
        input: SwitchProInputReport::parse_header(&reader)?,
        ack: reader.u8_at(13)?,
        subcommand_id: reader.u8_at(14)?,
        data: reply_data,
    })
}

/// Decoded `0x81` USB command acknowledge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UsbCommandAck {
    pub command_id: u8,
}

pub fn parse_usb_ack(data: &[u8]) -> ReportResult<UsbCommandAck> {
    let reader = ReportReader::with_min_len(data, 2)?;
    reader.expect_report_id(report_ids::USB_COMMAND_ACK)?;
    Ok(UsbCommandAck {
        command_id: reader.u8_at(1)?,
    })
}

/// Report id of `data`, or `TooShort` for an empty read.
pub fn report_id(data: &[u8]) -> ReportResult<u8> {
    data.first().copied().ok_or(ReportError::TooShort { need: 1, got: 0 })
}
