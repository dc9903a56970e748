//! Classic Controller (and Classic Controller Pro) extension payload.
//!
//! # Packed layout (data format 1, 6 bytes)
//!
//! ```text
//! byte 0: RX<4:3> | LX<5:0>
//! byte 1: RX<2:1> | LY<5:0>
//! byte 2: RX<0>   | LT<4:3> | RY<4:0>
//! byte 3: LT<2:0> | RT<4:0>
//! byte 4-5: buttons, active-low, little-endian
//! ```
//!
//! # High-resolution layout (data format 3, 8 bytes)
//!
//! `LX, RX, LY, RY, LT, RT` as full bytes, then the same button word.

use bitflags::bitflags;
use padlink_device_types::{CanonicalReport, ControllerButtons, normalize_stick, normalize_trigger};
use padlink_hid_common::{ReportReader, ReportResult};

bitflags! {
    /// Button word after undoing the active-low encoding.
    #[repr(transparent)]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ClassicButtons: u16 {
        const R = 1 << 1;
        const PLUS = 1 << 2;
        const HOME = 1 << 3;
        const MINUS = 1 << 4;
        const L = 1 << 5;
        const DPAD_DOWN = 1 << 6;
        const DPAD_RIGHT = 1 << 7;
        const DPAD_UP = 1 << 8;
        const DPAD_LEFT = 1 << 9;
        const ZR = 1 << 10;
        const X = 1 << 11;
        const A = 1 << 12;
        const Y = 1 << 13;
        const B = 1 << 14;
        const ZL = 1 << 15;
    }
}

impl ClassicButtons {
    pub fn from_wire(raw: u16) -> Self {
        Self::from_bits_truncate(raw ^ 0xFFFF)
    }
}

/// Extension data format, selected by writing `0xA400FE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ClassicFormat {
    #[default]
    Packed,
    HighResolution,
}

impl ClassicFormat {
    fn stick_max(self) -> (u16, u16) {
        match self {
            ClassicFormat::Packed => (63, 31),
            ClassicFormat::HighResolution => (255, 255),
        }
    }

    fn trigger_max(self) -> u16 {
        match self {
            ClassicFormat::Packed => 31,
            ClassicFormat::HighResolution => 255,
        }
    }
}

/// Decoded Classic Controller state, raw values at the format's resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClassicReport {
    pub format: ClassicFormat,
    pub left_stick: (u8, u8),
    pub right_stick: (u8, u8),
    pub left_trigger: u8,
    pub right_trigger: u8,
    pub buttons: ClassicButtons,
}

impl ClassicReport {
    pub fn parse(extension: &[u8], format: ClassicFormat) -> ReportResult<Self> {
        match format {
            ClassicFormat::Packed => Self::parse_packed(extension),
            ClassicFormat::HighResolution => Self::parse_high_resolution(extension),
        }
    }

    fn parse_packed(extension: &[u8]) -> ReportResult<Self> {
        let reader = ReportReader::with_min_len(extension, 6)?;
        let [b0, b1, b2, b3] = reader.bytes_at::<4>(0)?;
        let rx = ((b0 & 0xC0) >> 3) | ((b1 & 0xC0) >> 5) | ((b2 & 0x80) >> 7);
        let lt = ((b2 & 0x60) >> 2) | ((b3 & 0xE0) >> 5);
        Ok(Self {
            format: ClassicFormat::Packed,
            left_stick: (b0 & 0x3F, b1 & 0x3F),
            right_stick: (rx, b2 & 0x1F),
            left_trigger: lt,
            right_trigger: b3 & 0x1F,
            buttons: ClassicButtons::from_wire(reader.u16_le_at(4)?),
        })
    }

    fn parse_high_resolution(extension: &[u8]) -> ReportResult<Self> {
        let reader = ReportReader::with_min_len(extension, 8)?;
        let [lx, rx, ly, ry, lt, rt] = reader.bytes_at::<6>(0)?;
        Ok(Self {
            format: ClassicFormat::HighResolution,
            left_stick: (lx, ly),
            right_stick: (rx, ry),
            left_trigger: lt,
            right_trigger: rt,
            buttons: ClassicButtons::from_wire(reader.u16_le_at(6)?),
        })
    }

    pub fn canonical_buttons(&self) -> ControllerButtons {
        let b = self.buttons;
        ControllerButtons::empty()
            .with_if(ControllerButtons::A, b.contains(ClassicButtons::A))
            .with_if(ControllerButtons::B, b.contains(ClassicButtons::B))
            .with_if(ControllerButtons::X, b.contains(ClassicButtons::X))
            .with_if(ControllerButtons::Y, b.contains(ClassicButtons::Y))
            .with_if(ControllerButtons::MENU, b.contains(ClassicButtons::PLUS))
            .with_if(ControllerButtons::VIEW, b.contains(ClassicButtons::MINUS))
            .with_if(ControllerButtons::GUIDE, b.contains(ClassicButtons::HOME))
            .with_if(ControllerButtons::LEFT_BUMPER, b.contains(ClassicButtons::ZL))
            .with_if(ControllerButtons::RIGHT_BUMPER, b.contains(ClassicButtons::ZR))
            .with_if(ControllerButtons::LEFT_TRIGGER, b.contains(ClassicButtons::L))
            .with_if(ControllerButtons::RIGHT_TRIGGER, b.contains(ClassicButtons::R))
            .with_if(ControllerButtons::DPAD_UP, b.contains(ClassicButtons::DPAD_UP))
            .with_if(ControllerButtons::DPAD_DOWN, b.contains(ClassicButtons::DPAD_DOWN))
            .with_if(ControllerButtons::DPAD_LEFT, b.contains(ClassicButtons::DPAD_LEFT))
            .with_if(ControllerButtons::DPAD_RIGHT, b.contains(ClassicButtons::DPAD_RIGHT))
    }

    /// Canonical report of the Classic Controller alone. Stick Y is inverted.
    pub fn to_canonical(&self) -> CanonicalReport {
        let (left_max, right_max) = self.format.stick_max();
        let trigger_max = self.format.trigger_max();
        CanonicalReport::new()
            .with_buttons(self.canonical_buttons())
            .with_left_stick(
                normalize_stick(u16::from(self.left_stick.0), left_max),
                -normalize_stick(u16::from(self.left_stick.1), left_max),
            )
            .with_right_stick(
                normalize_stick(u16::from(self.right_stick.0), right_max),
                -normalize_stick(u16::from(self.right_stick.1), right_max),
            )
            .with_triggers(
                normalize_trigger(u16::from(self.left_trigger), trigger_max),
                normalize_trigger(u16::from(self.right_trigger), trigger_max),
            )
    }
}
