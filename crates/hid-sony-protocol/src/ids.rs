//! Sony vendor/product IDs.

/// Sony Interactive Entertainment.
pub const VENDOR_ID: u16 = 0x054C;

/// DualShock 4, first revision (CUH-ZCT1).
pub const DUALSHOCK4_PID: u16 = 0x05C4;
/// DualShock 4, second revision (CUH-ZCT2).
pub const DUALSHOCK4_V2_PID: u16 = 0x09CC;
/// DualSense (CFI-ZCT1).
pub const DUALSENSE_PID: u16 = 0x0CE6;

/// Report id of the USB input report on both controllers.
pub const INPUT_REPORT_ID: u8 = 0x01;

pub fn is_dualshock4(vendor_id: u16, product_id: u16) -> bool {
    vendor_id == VENDOR_ID && matches!(product_id, DUALSHOCK4_PID | DUALSHOCK4_V2_PID)
}

pub fn is_dualsense(vendor_id: u16, product_id: u16) -> bool {
    vendor_id == VENDOR_ID && product_id == DUALSENSE_PID
}

pub fn product_name(product_id: u16) -> Option<&'static str> {
    match product_id {
        DUALSHOCK4_PID => Some("DualShock 4 (CUH-ZCT1)"),
        DUALSHOCK4_V2_PID => Some("DualShock 4 (CUH-ZCT2)"),
        DUALSENSE_PID => Some("DualSense"),
        _ => None,
    }
}
