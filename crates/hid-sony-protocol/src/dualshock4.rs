//! DualShock 4 USB input report and effects packet.
//!
//! # Input report (`0x01`, 64 bytes)
//!
//! | Offset | Size | Field |
//! |--------|------|-------|
//! | 0 | 1 | Report id (`0x01`) |
//! | 1 | 1 | Left stick X |
//! | 2 | 1 | Left stick Y |
//! | 3 | 1 | Right stick X |
//! | 4 | 1 | Right stick Y |
//! | 5 | 3 | Buttons (LE, low 18 bits used; top 6 bits are a counter) |
//! | 8 | 1 | L2 analog |
//! | 9 | 1 | R2 analog |
//! | 10 | 2 | Timestamp |
//! | 13 | 6 | Gyroscope |
//! | 19 | 6 | Accelerometer |
//! | 30 | 1 | Battery / cable state |
//!
//! # Effects packet (`0x05`, 32 bytes)
//!
//! | Offset | Size | Field |
//! |--------|------|-------|
//! | 0 | 1 | Packet id (`0x05`) |
//! | 1 | 1 | Valid flags (`0x07`: rumble, light bar, flash) |
//! | 4 | 1 | Right (weak) rumble |
//! | 5 | 1 | Left (strong) rumble |
//! | 6 | 3 | Light bar R, G, B |

use padlink_device_types::{CanonicalReport, normalize_stick_u8, normalize_trigger_u8};
use padlink_hid_common::{ReportBuilder, ReportReader, ReportResult};

use crate::Rgb;
use crate::buttons::SonyButtons;
use crate::ids::INPUT_REPORT_ID;

pub const DUALSHOCK4_REPORT_LEN: usize = 64;
pub const DUALSHOCK4_EFFECTS_LEN: usize = 32;
pub const EFFECTS_REPORT_ID: u8 = 0x05;
/// Rumble + light bar + flash valid bits.
pub const EFFECTS_VALID_FLAGS: u8 = 0x07;

const PARSE_LEN: usize = 31;
const CABLE_CONNECTED: u8 = 0x10;

/// Decoded DualShock 4 input report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DualShock4InputReport {
    pub left_stick: (u8, u8),
    pub right_stick: (u8, u8),
    pub buttons: SonyButtons,
    /// 6-bit counter sharing the button bytes.
    pub counter: u8,
    pub left_trigger: u8,
    pub right_trigger: u8,
    pub timestamp: u16,
    pub battery: u8,
}

impl DualShock4InputReport {
    /// Charge in `0..=10` (wired reports go up to 11 while charging).
    pub fn battery_level(&self) -> u8 {
        self.battery & 0x0F
    }

    pub fn is_cable_connected(&self) -> bool {
        self.battery & CABLE_CONNECTED != 0
    }

    pub fn to_canonical(&self) -> CanonicalReport {
        CanonicalReport::new()
            .with_buttons(self.buttons.to_canonical())
            .with_left_stick(
                normalize_stick_u8(self.left_stick.0),
                normalize_stick_u8(self.left_stick.1),
            )
            .with_right_stick(
                normalize_stick_u8(self.right_stick.0),
                normalize_stick_u8(self.right_stick.1),
            )
            .with_triggers(
                normalize_trigger_u8(self.left_trigger),
                normalize_trigger_u8(self.right_trigger),
            )
    }
}

/// Decode a USB `0x01` DualShock 4 input report.
pub fn parse_dualshock4_input(data: &[u8]) -> ReportResult<DualShock4InputReport> {
    let reader = ReportReader::with_min_len(data, PARSE_LEN)?;
    reader.expect_report_id(INPUT_REPORT_ID)?;

    let raw_buttons = reader.u24_le_at(5)?;
    Ok(DualShock4InputReport {
        left_stick: (reader.u8_at(1)?, reader.u8_at(2)?),
        right_stick: (reader.u8_at(3)?, reader.u8_at(4)?),
        buttons: SonyButtons::from_wire(raw_buttons),
        counter: (raw_buttons >> 18) as u8,
        left_trigger: reader.u8_at(8)?,
        right_trigger: reader.u8_at(9)?,
        timestamp: reader.u16_le_at(10)?,
        battery: reader.u8_at(30)?,
    })
}

/// Output effects packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DualShock4EffectsPacket {
    pub rumble_left: u8,
    pub rumble_right: u8,
    pub light_bar: Rgb,
}

impl DualShock4EffectsPacket {
    pub fn new(light_bar: Rgb, rumble: (u8, u8)) -> Self {
        Self {
            rumble_left: rumble.0,
            rumble_right: rumble.1,
            light_bar,
        }
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut builder = ReportBuilder::with_capacity(DUALSHOCK4_EFFECTS_LEN);
        builder
            .write_u8(EFFECTS_REPORT_ID)
            .write_u8(EFFECTS_VALID_FLAGS)
            .write_zeros(2)
            .write_u8(self.rumble_right)
            .write_u8(self.rumble_left)
            .write_u8(self.light_bar.red)
            .write_u8(self.light_bar.green)
            .write_u8(self.light_bar.blue)
            .pad_to(DUALSHOCK4_EFFECTS_LEN);
        builder.into_inner()
    }
}
