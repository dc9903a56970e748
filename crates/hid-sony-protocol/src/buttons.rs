//! Shared button field and octant D-pad.

use bitflags::bitflags;
use padlink_device_types::{ControllerButtons, HatDirection};

bitflags! {
    /// The 18-bit button field shared by DualShock 4 and DualSense.
    ///
    /// Bits 0..=3 hold the D-pad octant and are not flags; use
    /// [`SonyButtons::dpad`] to read them.
    #[repr(transparent)]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct SonyButtons: u32 {
        const SQUARE = 1 << 4;
        const CROSS = 1 << 5;
        const CIRCLE = 1 << 6;
        const TRIANGLE = 1 << 7;
        const L1 = 1 << 8;
        const R1 = 1 << 9;
        const L2 = 1 << 10;
        const R2 = 1 << 11;
        /// Share on DualShock 4, Create on DualSense.
        const SHARE = 1 << 12;
        const OPTIONS = 1 << 13;
        const L3 = 1 << 14;
        const R3 = 1 << 15;
        const PS = 1 << 16;
        const TOUCHPAD = 1 << 17;

        const DPAD_MASK = 0x0F;
    }
}

impl SonyButtons {
    /// Keep every wire bit, octant included.
    pub fn from_wire(raw: u32) -> Self {
        Self::from_bits_retain(raw & 0x0003_FFFF)
    }

    pub fn octant(self) -> u8 {
        (self.bits() & Self::DPAD_MASK.bits()) as u8
    }

    pub fn dpad(self) -> HatDirection {
        HatDirection::from_octant(self.octant())
    }

    /// Fold into vendor-neutral buttons, D-pad included.
    pub fn to_canonical(self) -> ControllerButtons {
        ControllerButtons::empty()
            .with_if(ControllerButtons::A, self.contains(Self::CROSS))
            .with_if(ControllerButtons::B, self.contains(Self::CIRCLE))
            .with_if(ControllerButtons::X, self.contains(Self::SQUARE))
            .with_if(ControllerButtons::Y, self.contains(Self::TRIANGLE))
            .with_if(ControllerButtons::MENU, self.contains(Self::OPTIONS))
            .with_if(ControllerButtons::VIEW, self.contains(Self::SHARE))
            .with_if(ControllerButtons::GUIDE, self.contains(Self::PS))
            .with_if(ControllerButtons::LEFT_STICK, self.contains(Self::L3))
            .with_if(ControllerButtons::RIGHT_STICK, self.contains(Self::R3))
            .with_if(ControllerButtons::LEFT_BUMPER, self.contains(Self::L1))
            .with_if(ControllerButtons::RIGHT_BUMPER, self.contains(Self::R1))
            .with_if(ControllerButtons::LEFT_TRIGGER, self.contains(Self::L2))
            .with_if(ControllerButtons::RIGHT_TRIGGER, self.contains(Self::R2))
            .with_if(ControllerButtons::TOUCHPAD, self.contains(Self::TOUCHPAD))
            | self.dpad().buttons()
    }
}

/// Cardinal D-pad flags for a raw octant value. Values outside `0..=7` are centered.
pub fn decode_dpad(octant: u8) -> ControllerButtons {
    HatDirection::from_octant(octant).buttons()
}
