//! Switch Pro Controller vendor/product IDs and protocol identifiers.

/// Nintendo Co., Ltd.
pub const VENDOR_ID: u16 = 0x057E;

/// Pro Controller (same PID over USB and Bluetooth).
pub const PRODUCT_ID: u16 = 0x2009;

/// Input report ids (device → host).
pub mod report_ids {
    /// Subcommand reply: standard input state followed by ack + echoed subcommand.
    pub const COMMAND_REPLY: u8 = 0x21;
    /// Full input report (buttons, sticks, IMU), streamed after mode `0x30` is set.
    pub const FULL_INPUT: u8 = 0x30;
    /// Acknowledge of a `0x80` USB command.
    pub const USB_COMMAND_ACK: u8 = 0x81;
}

/// Output packet ids (host → device).
pub mod packet_ids {
    pub const RUMBLE_WITH_COMMAND: u8 = 0x01;
    pub const RUMBLE_ONLY: u8 = 0x10;
    pub const USB_COMMAND: u8 = 0x80;
}

/// Subcommand ids carried in `RUMBLE_WITH_COMMAND` packets.
pub mod command_ids {
    pub const REQUEST_DEVICE_INFO: u8 = 0x02;
    pub const SET_INPUT_REPORT_MODE: u8 = 0x03;
    pub const SET_PLAYER_LIGHTS: u8 = 0x30;
    pub const ENABLE_VIBRATION: u8 = 0x48;
}

/// USB command ids carried in `USB_COMMAND` packets.
pub mod usb_command_ids {
    pub const STATUS: u8 = 0x01;
    pub const HANDSHAKE: u8 = 0x02;
    pub const HIGH_SPEED: u8 = 0x03;
    pub const FORCE_USB: u8 = 0x04;
    pub const CLEAR_USB: u8 = 0x05;
    pub const RESET_MCU: u8 = 0x06;
}

/// Input report mode requesting `0x30` full reports.
pub const INPUT_MODE_FULL: u8 = 0x30;

pub fn is_switch_pro(vendor_id: u16, product_id: u16) -> bool {
    vendor_id == VENDOR_ID && product_id == PRODUCT_ID
}
