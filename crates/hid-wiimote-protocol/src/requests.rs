//! Output report encoders.
//!
//! Every output report carries the rumble state in bit 0 of its first payload
//! byte; the encoders take it explicitly where the report has room for it.

use bitflags::bitflags;
use padlink_hid_common::{ReportBuilder, ReportError, ReportResult};

use crate::ids::report_ids;

/// Address space selector for the extension/control register bank.
pub const REGISTER_SPACE: u8 = 0x04;
/// Payload bytes in a write request (unused bytes are zero).
pub const WRITE_PAYLOAD_LEN: usize = 16;
/// Data reporting mode with core buttons, accelerometer and 16 extension bytes.
pub const DATA_REPORT_MODE: u8 = report_ids::BUTTONS_ACCEL_EXTENSION;

const RUMBLE_BIT: u8 = 0x01;
const CONTINUOUS_BIT: u8 = 0x04;

bitflags! {
    /// The four player LEDs (high nibble of the LED request).
    #[repr(transparent)]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct LedMask: u8 {
        const LED_1 = 0x10;
        const LED_2 = 0x20;
        const LED_3 = 0x40;
        const LED_4 = 0x80;
    }
}

impl LedMask {
    /// LED for a 1-based player slot; out of range turns every LED off.
    pub fn for_player(index: u8) -> Self {
        match index {
            1 => Self::LED_1,
            2 => Self::LED_2,
            3 => Self::LED_3,
            4 => Self::LED_4,
            _ => Self::empty(),
        }
    }
}

fn rumble_bit(rumble: bool) -> u8 {
    if rumble { RUMBLE_BIT } else { 0 }
}

pub fn rumble_request(enabled: bool) -> Vec<u8> {
    vec![report_ids::RUMBLE, rumble_bit(enabled)]
}

pub fn leds_request(mask: LedMask) -> Vec<u8> {
    vec![report_ids::LEDS, mask.bits()]
}

/// Select the input reporting mode.
pub fn data_report_request(continuous: bool, mode: u8, rumble: bool) -> Vec<u8> {
    let mut parameters = rumble_bit(rumble);
    if continuous {
        parameters |= CONTINUOUS_BIT;
    }
    vec![report_ids::DATA_REPORTING_MODE, parameters, mode]
}

pub fn status_request(rumble: bool) -> Vec<u8> {
    vec![report_ids::STATUS_REQUEST, rumble_bit(rumble)]
}

/// Write up to 16 bytes at a 24-bit register address.
pub fn write_request(address: u32, data: &[u8], rumble: bool) -> ReportResult<Vec<u8>> {
    if data.len() > WRITE_PAYLOAD_LEN {
        return Err(ReportError::PayloadTooLarge {
            max: WRITE_PAYLOAD_LEN,
            got: data.len(),
        });
    }
    let mut builder = ReportBuilder::with_capacity(6 + WRITE_PAYLOAD_LEN);
    builder
        .write_u8(report_ids::WRITE_MEMORY)
        .write_u8(REGISTER_SPACE | rumble_bit(rumble))
        .write_u24_be(address)
        .write_u8(data.len() as u8)
        .write_bytes(data)
        .pad_to(6 + WRITE_PAYLOAD_LEN);
    Ok(builder.into_inner())
}

/// Single-byte register write, the only form extension setup needs.
pub fn write_register_request(address: u32, value: u8) -> Vec<u8> {
    let mut builder = ReportBuilder::with_capacity(6 + WRITE_PAYLOAD_LEN);
    builder
        .write_u8(report_ids::WRITE_MEMORY)
        .write_u8(REGISTER_SPACE)
        .write_u24_be(address)
        .write_u8(1)
        .write_u8(value)
        .pad_to(6 + WRITE_PAYLOAD_LEN);
    builder.into_inner()
}

/// Read `size` bytes (at most 16 per reply) from a 24-bit register address.
pub fn read_request(address: u32, size: u16, rumble: bool) -> ReportResult<Vec<u8>> {
    if usize::from(size) > WRITE_PAYLOAD_LEN {
        return Err(ReportError::PayloadTooLarge {
            max: WRITE_PAYLOAD_LEN,
            got: usize::from(size),
        });
    }
    let mut builder = ReportBuilder::with_capacity(7);
    builder
        .write_u8(report_ids::READ_MEMORY)
        .write_u8(REGISTER_SPACE | rumble_bit(rumble))
        .write_u24_be(address)
        .write_u16_be(size);
    Ok(builder.into_inner())
}
