//! Canonical controller report types
//!
//! Every controller family folds its wire format into one [`CanonicalReport`]:
//! a vendor-neutral button set plus four stick axes and two trigger scalars.
//!
//! Axis conventions:
//! - sticks are in `[-1, 1]`, positive X is right, positive Y is down
//! - triggers are in `[0, 1]`, `0` is released

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

mod family;

pub use family::{ControllerFamily, product_ids, vendor_ids};

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Vendor-neutral button set.
    #[repr(transparent)]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct ControllerButtons: u32 {
        const A = 1 << 0;
        const B = 1 << 1;
        const X = 1 << 2;
        const Y = 1 << 3;
        const MENU = 1 << 4;
        const VIEW = 1 << 5;
        const GUIDE = 1 << 6;
        const LEFT_STICK = 1 << 7;
        const RIGHT_STICK = 1 << 8;
        const LEFT_BUMPER = 1 << 9;
        const RIGHT_BUMPER = 1 << 10;
        const LEFT_TRIGGER = 1 << 11;
        const RIGHT_TRIGGER = 1 << 12;
        const DPAD_UP = 1 << 13;
        const DPAD_DOWN = 1 << 14;
        const DPAD_LEFT = 1 << 15;
        const DPAD_RIGHT = 1 << 16;
        const TOUCHPAD = 1 << 17;
        const CAPTURE = 1 << 18;
    }
}

impl ControllerButtons {
    pub const DPAD: Self = Self::DPAD_UP
        .union(Self::DPAD_DOWN)
        .union(Self::DPAD_LEFT)
        .union(Self::DPAD_RIGHT);

    /// Set `flag` when `pressed`, builder style.
    #[must_use]
    pub fn with_if(self, flag: Self, pressed: bool) -> Self {
        if pressed { self | flag } else { self }
    }
}

/// Octant-encoded D-pad position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum HatDirection {
    Up,
    UpRight,
    Right,
    DownRight,
    Down,
    DownLeft,
    Left,
    UpLeft,
    #[default]
    Neutral,
}

impl HatDirection {
    /// Decode an octant: `0..=7` run clockwise from north, anything else is centered.
    pub fn from_octant(value: u8) -> Self {
        match value {
            0 => HatDirection::Up,
            1 => HatDirection::UpRight,
            2 => HatDirection::Right,
            3 => HatDirection::DownRight,
            4 => HatDirection::Down,
            5 => HatDirection::DownLeft,
            6 => HatDirection::Left,
            7 => HatDirection::UpLeft,
            _ => HatDirection::Neutral,
        }
    }

    /// The one or two cardinal D-pad flags this direction presses.
    pub fn buttons(self) -> ControllerButtons {
        match self {
            HatDirection::Up => ControllerButtons::DPAD_UP,
            HatDirection::UpRight => ControllerButtons::DPAD_UP | ControllerButtons::DPAD_RIGHT,
            HatDirection::Right => ControllerButtons::DPAD_RIGHT,
            HatDirection::DownRight => {
                ControllerButtons::DPAD_DOWN | ControllerButtons::DPAD_RIGHT
            }
            HatDirection::Down => ControllerButtons::DPAD_DOWN,
            HatDirection::DownLeft => ControllerButtons::DPAD_DOWN | ControllerButtons::DPAD_LEFT,
            HatDirection::Left => ControllerButtons::DPAD_LEFT,
            HatDirection::UpLeft => ControllerButtons::DPAD_UP | ControllerButtons::DPAD_LEFT,
            HatDirection::Neutral => ControllerButtons::empty(),
        }
    }
}

/// One poll's worth of vendor-neutral controller state.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CanonicalReport {
    pub buttons: ControllerButtons,
    pub left_stick_x: f64,
    pub left_stick_y: f64,
    pub right_stick_x: f64,
    pub right_stick_y: f64,
    pub left_trigger: f64,
    pub right_trigger: f64,
}

impl CanonicalReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_buttons(mut self, buttons: ControllerButtons) -> Self {
        self.buttons = buttons;
        self
    }

    pub fn with_left_stick(mut self, x: f64, y: f64) -> Self {
        self.left_stick_x = x.clamp(-1.0, 1.0);
        self.left_stick_y = y.clamp(-1.0, 1.0);
        self
    }

    pub fn with_right_stick(mut self, x: f64, y: f64) -> Self {
        self.right_stick_x = x.clamp(-1.0, 1.0);
        self.right_stick_y = y.clamp(-1.0, 1.0);
        self
    }

    pub fn with_triggers(mut self, left: f64, right: f64) -> Self {
        self.left_trigger = left.clamp(0.0, 1.0);
        self.right_trigger = right.clamp(0.0, 1.0);
        self
    }

    pub fn is_pressed(&self, button: ControllerButtons) -> bool {
        self.buttons.contains(button)
    }

    /// Buttons down now that were up in `previous`.
    pub fn pressed(&self, previous: &CanonicalReport) -> ControllerButtons {
        self.buttons.difference(previous.buttons)
    }

    /// Buttons up now that were down in `previous`.
    pub fn released(&self, previous: &CanonicalReport) -> ControllerButtons {
        previous.buttons.difference(self.buttons)
    }

    /// Buttons whose state differs from `previous`.
    pub fn changed(&self, previous: &CanonicalReport) -> ControllerButtons {
        self.buttons.symmetric_difference(previous.buttons)
    }

    pub fn hat_direction(&self) -> HatDirection {
        let up = self.buttons.contains(ControllerButtons::DPAD_UP);
        let down = self.buttons.contains(ControllerButtons::DPAD_DOWN);
        let left = self.buttons.contains(ControllerButtons::DPAD_LEFT);
        let right = self.buttons.contains(ControllerButtons::DPAD_RIGHT);
        match (up, down, left, right) {
            (true, false, false, false) => HatDirection::Up,
            (true, false, false, true) => HatDirection::UpRight,
            (false, false, false, true) => HatDirection::Right,
            (false, true, false, true) => HatDirection::DownRight,
            (false, true, false, false) => HatDirection::Down,
            (false, true, true, false) => HatDirection::DownLeft,
            (false, false, true, false) => HatDirection::Left,
            (true, false, true, false) => HatDirection::UpLeft,
            _ => HatDirection::Neutral,
        }
    }
}

/// Centered 8-bit stick to `[-1, 1]`.
#[inline]
pub fn normalize_stick_u8(raw: u8) -> f64 {
    ((f64::from(raw) / 255.0 - 0.5) * 2.0).clamp(-1.0, 1.0)
}

/// Centered 12-bit stick to `[-1, 1)`. Bits above the low 12 are ignored.
#[inline]
pub fn normalize_stick_u12(raw: u16) -> f64 {
    ((f64::from(raw & 0x0FFF) / 4096.0 - 0.5) * 2.0).clamp(-1.0, 1.0)
}

/// Centered stick of arbitrary width (`max` is the full-scale raw value).
#[inline]
pub fn normalize_stick(raw: u16, max: u16) -> f64 {
    if max == 0 {
        return 0.0;
    }
    ((f64::from(raw) / f64::from(max) - 0.5) * 2.0).clamp(-1.0, 1.0)
}

/// 8-bit trigger to `[0, 1]`.
#[inline]
pub fn normalize_trigger_u8(raw: u8) -> f64 {
    f64::from(raw) / 255.0
}

/// Trigger of arbitrary width to `[0, 1]`.
#[inline]
pub fn normalize_trigger(raw: u16, max: u16) -> f64 {
    if max == 0 {
        return 0.0;
    }
    (f64::from(raw) / f64::from(max)).clamp(0.0, 1.0)
}

/// Digital trigger as a scalar.
#[inline]
pub fn digital_trigger(pressed: bool) -> f64 {
    if pressed { 1.0 } else { 0.0 }
}

#[cfg(feature = "proptest")]
mod proptest_shrinks {
    use super::*;
    use proptest::prelude::*;

    impl Arbitrary for CanonicalReport {
        type Parameters = ();
        type Strategy = BoxedStrategy<Self>;

        fn arbitrary_with(_args: Self::Parameters) -> Self::Strategy {
            (
                any::<u32>(),
                (-1.0f64..=1.0, -1.0f64..=1.0, -1.0f64..=1.0, -1.0f64..=1.0),
                (0.0f64..=1.0, 0.0f64..=1.0),
            )
                .prop_map(|(bits, (lx, ly, rx, ry), (lt, rt))| {
                    CanonicalReport::new()
                        .with_buttons(ControllerButtons::from_bits_truncate(bits))
                        .with_left_stick(lx, ly)
                        .with_right_stick(rx, ry)
                        .with_triggers(lt, rt)
                })
                .boxed()
        }
    }
}
