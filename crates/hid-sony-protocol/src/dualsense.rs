//! DualSense USB input report and effects packet.
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
//! | 5 | 1 | L2 analog |
//! | 6 | 1 | R2 analog |
//! | 7 | 1 | Report counter |
//! | 8 | 4 | Buttons (LE, low 18 bits used) |
//! | 12 | 4 | Sequence |
//! | 16 | 6 | Gyroscope X/Y/Z (i16 LE) |
//! | 22 | 6 | Accelerometer X/Y/Z (i16 LE) |
//! | 28 | 4 | Sensor timestamp |
//! | 32 | 1 | Sensor temperature |
//! | 33 | 8 | Two touch points |
//! | 49 | 4 | Timer |
//! | 53 | 1 | Battery |
//! | 54 | 1 | Power state |
//!
//! # Effects packet (`0x02`, 48 bytes)
//!
//! | Offset | Size | Field |
//! |--------|------|-------|
//! | 0 | 1 | Packet id (`0x02`) |
//! | 1 | 2 | Effect toggles (LE) |
//! | 3 | 1 | Right (high frequency) rumble |
//! | 4 | 1 | Left (low frequency) rumble |
//! | 39 | 1 | Extended effect toggles |
//! | 42 | 1 | LED animation |
//! | 43 | 1 | LED brightness |
//! | 44 | 1 | Player LEDs |
//! | 45 | 3 | Light bar R, G, B |

use bitflags::bitflags;
use padlink_device_types::{CanonicalReport, normalize_stick_u8, normalize_trigger_u8};
use padlink_hid_common::{ReportBuilder, ReportReader, ReportResult};

use crate::Rgb;
use crate::buttons::SonyButtons;
use crate::ids::INPUT_REPORT_ID;

pub const DUALSENSE_REPORT_LEN: usize = 64;
pub const DUALSENSE_EFFECTS_LEN: usize = 48;
pub const EFFECTS_REPORT_ID: u8 = 0x02;

/// Bytes needed to reach the power state byte.
const PARSE_LEN: usize = 55;

bitflags! {
    /// Effect toggles at offset 1 of the effects packet.
    #[repr(transparent)]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct DualSenseEffects: u16 {
        /// Needs audio haptics disabled to take effect.
        const ENABLE_RUMBLE = 1 << 0;
        const NO_AUDIO_HAPTICS = 1 << 1;
        const SET_MUTE_LED = 1 << 8;
        const SET_LEDS = 1 << 10;
        const RESET_LEDS = 1 << 11;
        const SET_PLAYER_LEDS = 1 << 12;
    }
}

bitflags! {
    /// Extended toggles at offset 39.
    #[repr(transparent)]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct DualSenseEffectsEx: u8 {
        /// Firmware 2.24 and later.
        const IMPROVED_RUMBLE = 1 << 2;
    }
}

bitflags! {
    /// The five white LEDs under the touchpad.
    #[repr(transparent)]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct DualSensePlayerLeds: u8 {
        const LED_1 = 1 << 0;
        const LED_2 = 1 << 1;
        const LED_3 = 1 << 2;
        const LED_4 = 1 << 3;
        const LED_5 = 1 << 4;
        /// Switch instantly instead of fading.
        const INSTANT = 1 << 5;
    }
}

impl DualSensePlayerLeds {
    /// Pattern the console uses for a 1-based player slot.
    pub fn for_player(index: u8) -> Self {
        match index {
            1 => Self::LED_3,
            2 => Self::LED_2 | Self::LED_4,
            3 => Self::LED_1 | Self::LED_3 | Self::LED_5,
            4 => Self::LED_1 | Self::LED_2 | Self::LED_4 | Self::LED_5,
            _ => Self::empty(),
        }
    }
}

/// Decoded DualSense input report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DualSenseInputReport {
    pub left_stick: (u8, u8),
    pub right_stick: (u8, u8),
    pub left_trigger: u8,
    pub right_trigger: u8,
    pub counter: u8,
    pub buttons: SonyButtons,
    pub gyroscope: [i16; 3],
    pub accelerometer: [i16; 3],
    pub battery: u8,
    pub power_state: u8,
}

impl DualSenseInputReport {
    /// Charge in `0..=10`, from the low nibble of the battery byte.
    pub fn battery_level(&self) -> u8 {
        (self.battery & 0x0F).min(10)
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

fn i16_triplet(reader: &ReportReader<'_>, offset: usize) -> ReportResult<[i16; 3]> {
    let mut out = [0i16; 3];
    for (i, value) in out.iter_mut().enumerate() {
        *value = reader.u16_le_at(offset + i * 2)? as i16;
    }
    Ok(out)
}

/// Decode a USB `0x01` DualSense input report.
pub fn parse_dualsense_input(data: &[u8]) -> ReportResult<DualSenseInputReport> {
    let reader = ReportReader::with_min_len(data, PARSE_LEN)?;
    reader.expect_report_id(INPUT_REPORT_ID)?;

    Ok(DualSenseInputReport {
        left_stick: (reader.u8_at(1)?, reader.u8_at(2)?),
        right_stick: (reader.u8_at(3)?, reader.u8_at(4)?),
        left_trigger: reader.u8_at(5)?,
        right_trigger: reader.u8_at(6)?,
        counter: reader.u8_at(7)?,
        buttons: SonyButtons::from_wire(reader.u32_le_at(8)?),
        gyroscope: i16_triplet(&reader, 16)?,
        accelerometer: i16_triplet(&reader, 22)?,
        battery: reader.u8_at(53)?,
        power_state: reader.u8_at(54)?,
    })
}

/// Output effects packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DualSenseEffectsPacket {
    pub effects: DualSenseEffects,
    pub effects_ex: DualSenseEffectsEx,
    pub rumble_left: u8,
    pub rumble_right: u8,
    pub player_leds: DualSensePlayerLeds,
    pub light_bar: Rgb,
    pub brightness: u8,
}

impl DualSenseEffectsPacket {
    /// Set light bar and player LEDs; rumble toggles follow from the motor levels.
    pub fn new(player_leds: DualSensePlayerLeds, light_bar: Rgb, rumble: (u8, u8)) -> Self {
        let (rumble_left, rumble_right) = rumble;
        let mut effects = DualSenseEffects::SET_LEDS | DualSenseEffects::SET_PLAYER_LEDS;
        let mut effects_ex = DualSenseEffectsEx::empty();
        if rumble_left > 0 || rumble_right > 0 {
            effects |= DualSenseEffects::NO_AUDIO_HAPTICS;
            effects_ex |= DualSenseEffectsEx::IMPROVED_RUMBLE;
        }
        Self {
            effects,
            effects_ex,
            rumble_left,
            rumble_right,
            player_leds,
            light_bar,
            brightness: 0xFF,
        }
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut builder = ReportBuilder::with_capacity(DUALSENSE_EFFECTS_LEN);
        builder
            .write_u8(EFFECTS_REPORT_ID)
            .write_u16_le(self.effects.bits())
            .write_u8(self.rumble_right)
            .write_u8(self.rumble_left)
            .pad_to(39)
            .write_u8(self.effects_ex.bits())
            .pad_to(42)
            .write_u8(0)
            .write_u8(self.brightness)
            .write_u8(self.player_leds.bits())
            .write_u8(self.light_bar.red)
            .write_u8(self.light_bar.green)
            .write_u8(self.light_bar.blue);
        builder.into_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use padlink_device_types::ControllerButtons;

    fn report() -> Vec<u8> {
        let mut data = vec![0u8; DUALSENSE_REPORT_LEN];
        data[0] = 0x01;
        data[1] = 0x80;
        data[2] = 0x00;
        data[3] = 0xFF;
        data[4] = 0x80;
        data[5] = 0xFF;
        data[6] = 0x00;
        data[7] = 0x11;
        // Cross + octant 2 (east)
        data[8] = 0x22;
        data[10] = 0x01; // PS
        data[53] = 0x28;
        data
    }

    #[test]
    fn test_parse_dualsense_input() -> Result<(), Box<dyn std::error::Error>> {
        let parsed = parse_dualsense_input(&report())?;
        assert_eq!(parsed.counter, 0x11);
        assert!(parsed.buttons.contains(SonyButtons::CROSS));
        assert!(parsed.buttons.contains(SonyButtons::PS));
        assert_eq!(parsed.battery_level(), 8);

        let canonical = parsed.to_canonical();
        assert_eq!(
            canonical.buttons,
            ControllerButtons::A | ControllerButtons::GUIDE | ControllerButtons::DPAD_RIGHT
        );
        assert!((canonical.left_stick_y + 1.0).abs() < 1e-9);
        assert!((canonical.right_stick_x - 1.0).abs() < 1e-9);
        assert!((canonical.left_trigger - 1.0).abs() < 1e-9);
        assert!(canonical.right_trigger.abs() < 1e-9);
        Ok(())
    }

    #[test]
    fn test_rejects_other_report_ids() {
        let mut data = report();
        data[0] = 0x31;
        assert!(parse_dualsense_input(&data).is_err());
        assert!(parse_dualsense_input(&report()[..20]).is_err());
    }

    #[test]
    fn test_player_led_patterns() {
        assert_eq!(DualSensePlayerLeds::for_player(1).bits(), 0x04);
        assert_eq!(DualSensePlayerLeds::for_player(2).bits(), 0x0A);
        assert_eq!(DualSensePlayerLeds::for_player(3).bits(), 0x15);
        assert_eq!(DualSensePlayerLeds::for_player(4).bits(), 0x1B);
        assert!(DualSensePlayerLeds::for_player(9).is_empty());
    }

    #[test]
    fn test_effects_packet_layout() {
        let packet = DualSenseEffectsPacket::new(
            DualSensePlayerLeds::for_player(1),
            Rgb::new(0x10, 0x20, 0x30),
            (0, 0),
        )
        .encode();
        assert_eq!(packet.len(), DUALSENSE_EFFECTS_LEN);
        assert_eq!(packet[0], 0x02);
        assert_eq!(u16::from_le_bytes([packet[1], packet[2]]), 0x1400);
        assert_eq!(packet[39], 0x00);
        assert_eq!(packet[43], 0xFF);
        assert_eq!(packet[44], 0x04);
        assert_eq!(&packet[45..48], &[0x10, 0x20, 0x30]);
    }

    #[test]
    fn test_rumble_switches_off_audio_haptics() {
        let packet = DualSenseEffectsPacket::new(DualSensePlayerLeds::empty(), Rgb::DEFAULT, (0x40, 0x80));
        assert!(packet.effects.contains(DualSenseEffects::NO_AUDIO_HAPTICS));
        let bytes = packet.encode();
        assert_eq!(bytes[3], 0x80);
        assert_eq!(bytes[4], 0x40);
        assert_eq!(bytes[39], 0x04);
    }
}
