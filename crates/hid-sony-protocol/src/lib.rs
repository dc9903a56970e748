//! Sony DualShock 4 and DualSense HID protocol.
//!
//! Both controllers share one button layout: an 18-bit field whose low nibble
//! is an octant-encoded D-pad (0 = north, clockwise, 8 = centered) followed by
//! face, shoulder and system buttons. They differ in where that field sits in
//! the `0x01` input report and in the shape of their output effects packet.
//!
//! # VID / PID
//! - Vendor ID: `0x054C` (Sony Interactive Entertainment)
//! - DualShock 4: `0x05C4` (CUH-ZCT1), `0x09CC` (CUH-ZCT2)
//! - DualSense: `0x0CE6`
//!
//! # Protocol Overview
//! No handshake is required over USB: the controllers stream `0x01` input
//! reports as soon as they are opened. Light bar, player LEDs and rumble are
//! set with one output effects packet (`0x05` on DualShock 4, `0x02` on
//! DualSense). Bluetooth framing (reports `0x11`/`0x31` with CRC) is not
//! supported.
//!
//! # Sources
//! - Linux kernel `hid-playstation.c` and `hid-sony.c`
//! - dsremap / ds4drv report documentation

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(static_mut_refs)]
#![deny(clippy::unwrap_used)]

pub mod buttons;
pub mod dualsense;
pub mod dualshock4;
pub mod ids;

pub use buttons::{SonyButtons, decode_dpad};
pub use dualsense::{
    DUALSENSE_EFFECTS_LEN, DUALSENSE_REPORT_LEN, DualSenseEffects, DualSenseEffectsEx,
    DualSenseEffectsPacket, DualSenseInputReport, DualSensePlayerLeds, parse_dualsense_input,
};
pub use dualshock4::{
    DUALSHOCK4_EFFECTS_LEN, DUALSHOCK4_REPORT_LEN, DualShock4EffectsPacket,
    DualShock4InputReport, parse_dualshock4_input,
};
pub use ids::{
    DUALSENSE_PID, DUALSHOCK4_PID, DUALSHOCK4_V2_PID, INPUT_REPORT_ID, VENDOR_ID, is_dualsense,
    is_dualshock4, product_name,
};

/// Light bar color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Rgb {
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Dim white the controllers are lit with when no color is requested.
    pub const DEFAULT: Rgb = Rgb::new(0xDD, 0xDD, 0xDD);

    /// Light bar color for a 1-based player slot: blue, red, green, pink.
    /// Other indices keep [`Rgb::DEFAULT`].
    pub const fn for_player(index: u8) -> Self {
        match index {
            1 => Rgb::new(0x00, 0x00, 0xFE),
            2 => Rgb::new(0xFE, 0x00, 0x00),
            3 => Rgb::new(0x00, 0xFE, 0x00),
            4 => Rgb::new(0xFE, 0x00, 0xFE),
            _ => Rgb::DEFAULT,
        }
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Self::DEFAULT
    }
}
