//! Wii Remote IDs, report ids and extension registers.

/// Nintendo Co., Ltd.
pub const VENDOR_ID: u16 = 0x057E;

/// RVL-CNT-01 Wii Remote.
pub const PRODUCT_ID: u16 = 0x0306;

/// Output (host → remote) and input (remote → host) report ids.
pub mod report_ids {
    pub const RUMBLE: u8 = 0x10;
    pub const LEDS: u8 = 0x11;
    pub const DATA_REPORTING_MODE: u8 = 0x12;
    pub const STATUS_REQUEST: u8 = 0x15;
    pub const WRITE_MEMORY: u8 = 0x16;
    pub const READ_MEMORY: u8 = 0x17;

    pub const STATUS: u8 = 0x20;
    pub const READ_DATA: u8 = 0x21;
    pub const ACKNOWLEDGE: u8 = 0x22;
    /// Core buttons, accelerometer and 16 extension bytes.
    pub const BUTTONS_ACCEL_EXTENSION: u8 = 0x35;
}

/// Extension controller registers, as seen through the remote's address space.
pub mod registers {
    /// Writing `0x55` here starts the unencrypted initialization.
    pub const INIT_1: u32 = 0xA4_00F0;
    pub const INIT_1_VALUE: u8 = 0x55;
    /// Writing `0x00` here completes it.
    pub const INIT_2: u32 = 0xA4_00FB;
    pub const INIT_2_VALUE: u8 = 0x00;
    /// Six-byte identification block.
    pub const IDENTIFICATION: u32 = 0xA4_00FA;
    /// Data format select (`0x03`: high-resolution Classic Controller).
    pub const DATA_FORMAT: u32 = 0xA4_00FE;
    pub const DATA_FORMAT_HIGH_RES: u8 = 0x03;
}

pub fn is_wiimote(vendor_id: u16, product_id: u16) -> bool {
    vendor_id == VENDOR_ID && product_id == PRODUCT_ID
}
