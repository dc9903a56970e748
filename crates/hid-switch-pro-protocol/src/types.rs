//! Typed commands and button flags.

use bitflags::bitflags;

use crate::ids::{INPUT_MODE_FULL, command_ids, usb_command_ids};

bitflags! {
    /// The 24-bit button field of every standard input report, after the
    /// bit-15 quirk has been undone (see [`SwitchProButtons::from_wire`]).
    #[repr(transparent)]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct SwitchProButtons: u32 {
        const Y = 1 << 0;
        const X = 1 << 1;
        const B = 1 << 2;
        const A = 1 << 3;
        const R = 1 << 6;
        const ZR = 1 << 7;
        const MINUS = 1 << 8;
        const PLUS = 1 << 9;
        const RIGHT_STICK = 1 << 10;
        const LEFT_STICK = 1 << 11;
        const HOME = 1 << 12;
        const CAPTURE = 1 << 13;
        const DPAD_DOWN = 1 << 16;
        const DPAD_UP = 1 << 17;
        const DPAD_RIGHT = 1 << 18;
        const DPAD_LEFT = 1 << 19;
        const L = 1 << 22;
        const ZL = 1 << 23;
    }
}

impl SwitchProButtons {
    /// Firmware reports bit 15 with inverted polarity relative to the rest.
    pub const WIRE_XOR: u32 = 1 << 15;

    /// Decode the raw little-endian 24-bit field.
    pub fn from_wire(raw: u32) -> Self {
        Self::from_bits_truncate((raw & 0x00FF_FFFF) ^ Self::WIRE_XOR)
    }

    /// Encode back to the 24-bit wire field.
    pub fn to_wire(self) -> u32 {
        self.bits() ^ Self::WIRE_XOR
    }
}

bitflags! {
    /// Player indicator LEDs, bit per lamp.
    #[repr(transparent)]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct PlayerLights: u8 {
        const PLAYER_1 = 0x01;
        const PLAYER_2 = 0x02;
        const PLAYER_3 = 0x04;
        const PLAYER_4 = 0x08;
    }
}

impl PlayerLights {
    /// Lamp for a 1-based player slot, `None` outside `1..=4`.
    pub fn for_player(index: u8) -> Option<Self> {
        match index {
            1 => Some(Self::PLAYER_1),
            2 => Some(Self::PLAYER_2),
            3 => Some(Self::PLAYER_3),
            4 => Some(Self::PLAYER_4),
            _ => None,
        }
    }
}

/// Subcommands sent in `RUMBLE_WITH_COMMAND` packets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubCommand {
    RequestDeviceInfo,
    SetInputReportMode(u8),
    SetPlayerLights(PlayerLights),
    EnableVibration(bool),
}

impl SubCommand {
    /// Standard-full input mode (`0x30`).
    pub const FULL_INPUT_MODE: SubCommand = SubCommand::SetInputReportMode(INPUT_MODE_FULL);

    pub fn id(self) -> u8 {
        match self {
            SubCommand::RequestDeviceInfo => command_ids::REQUEST_DEVICE_INFO,
            SubCommand::SetInputReportMode(_) => command_ids::SET_INPUT_REPORT_MODE,
            SubCommand::SetPlayerLights(_) => command_ids::SET_PLAYER_LIGHTS,
            SubCommand::EnableVibration(_) => command_ids::ENABLE_VIBRATION,
        }
    }

    /// Argument byte following the subcommand id, if any.
    pub fn argument(self) -> Option<u8> {
        match self {
            SubCommand::RequestDeviceInfo => None,
            SubCommand::SetInputReportMode(mode) => Some(mode),
            SubCommand::SetPlayerLights(lights) => Some(lights.bits()),
            SubCommand::EnableVibration(on) => Some(u8::from(on)),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SubCommand::RequestDeviceInfo => "RequestDeviceInfo",
            SubCommand::SetInputReportMode(_) => "SetInputReportMode",
            SubCommand::SetPlayerLights(_) => "SetPlayerLights",
            SubCommand::EnableVibration(_) => "EnableVibration",
        }
    }
}

/// `0x80`-prefixed commands understood by the USB bridge chip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsbCommand {
    Status,
    Handshake,
    HighSpeed,
    ForceUsb,
    ClearUsb,
    ResetMcu,
}

impl UsbCommand {
    /// The USB-only handshake issued before any subcommand.
    pub const HANDSHAKE_SEQUENCE: [UsbCommand; 4] = [
        UsbCommand::Handshake,
        UsbCommand::HighSpeed,
        UsbCommand::Handshake,
        UsbCommand::ForceUsb,
    ];

    pub fn id(self) -> u8 {
        match self {
            UsbCommand::Status => usb_command_ids::STATUS,
            UsbCommand::Handshake => usb_command_ids::HANDSHAKE,
            UsbCommand::HighSpeed => usb_command_ids::HIGH_SPEED,
            UsbCommand::ForceUsb => usb_command_ids::FORCE_USB,
            UsbCommand::ClearUsb => usb_command_ids::CLEAR_USB,
            UsbCommand::ResetMcu => usb_command_ids::RESET_MCU,
        }
    }

    /// `ForceUSB` switches the controller off the bridge's ack path, so its
    /// reply is routinely lost.
    pub fn expects_reply(self) -> bool {
        !matches!(self, UsbCommand::ForceUsb)
    }

    pub fn name(self) -> &'static str {
        match self {
            UsbCommand::Status => "Status",
            UsbCommand::Handshake => "Handshake",
            UsbCommand::HighSpeed => "HighSpeed",
            UsbCommand::ForceUsb => "ForceUSB",
            UsbCommand::ClearUsb => "ClearUSB",
            UsbCommand::ResetMcu => "ResetMCU",
        }
    }
}
