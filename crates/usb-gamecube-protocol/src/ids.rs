//! Adapter IDs and USB endpoints.

/// Nintendo Co., Ltd.
pub const VENDOR_ID: u16 = 0x057E;
/// WUP-028 GameCube Controller Adapter.
pub const PRODUCT_ID: u16 = 0x0337;

pub const INTERFACE: u8 = 0;
/// Interrupt IN endpoint carrying input frames.
pub const ENDPOINT_IN: u8 = 0x81;
/// Interrupt OUT endpoint for commands.
pub const ENDPOINT_OUT: u8 = 0x02;

/// Command byte that starts input polling.
pub const START_PAYLOAD: u8 = 0x13;
/// Report id of every input frame.
pub const REPORT_ID: u8 = 0x21;

pub fn is_gamecube_adapter(vendor_id: u16, product_id: u16) -> bool {
    vendor_id == VENDOR_ID && product_id == PRODUCT_ID
}
