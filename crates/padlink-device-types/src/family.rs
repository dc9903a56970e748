use serde::{Deserialize, Serialize};

/// USB vendor IDs.
pub mod vendor_ids {
    pub const NINTENDO: u16 = 0x057E;
    pub const SONY: u16 = 0x054C;
}

/// USB product IDs.
pub mod product_ids {
    pub const SWITCH_PRO: u16 = 0x2009;
    pub const WIIMOTE: u16 = 0x0306;
    pub const GAMECUBE_ADAPTER: u16 = 0x0337;
    pub const DUALSHOCK4: u16 = 0x05C4;
    pub const DUALSHOCK4_V2: u16 = 0x09CC;
    pub const DUALSENSE: u16 = 0x0CE6;
}

/// The supported controller families, one session type each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ControllerFamily {
    SwitchPro,
    DualSense,
    DualShock4,
    Wiimote,
    GameCubeAdapter,
}

impl ControllerFamily {
    /// Discovery order used by the multiplexer.
    pub const ALL: [ControllerFamily; 5] = [
        ControllerFamily::DualSense,
        ControllerFamily::DualShock4,
        ControllerFamily::SwitchPro,
        ControllerFamily::Wiimote,
        ControllerFamily::GameCubeAdapter,
    ];

    pub fn identify(vendor_id: u16, product_id: u16) -> Option<Self> {
        match (vendor_id, product_id) {
            (vendor_ids::NINTENDO, product_ids::SWITCH_PRO) => Some(ControllerFamily::SwitchPro),
            (vendor_ids::NINTENDO, product_ids::WIIMOTE) => Some(ControllerFamily::Wiimote),
            (vendor_ids::NINTENDO, product_ids::GAMECUBE_ADAPTER) => {
                Some(ControllerFamily::GameCubeAdapter)
            }
            (vendor_ids::SONY, product_ids::DUALSENSE) => Some(ControllerFamily::DualSense),
            (vendor_ids::SONY, product_ids::DUALSHOCK4 | product_ids::DUALSHOCK4_V2) => {
                Some(ControllerFamily::DualShock4)
            }
            _ => None,
        }
    }

    pub fn vendor_id(self) -> u16 {
        match self {
            ControllerFamily::SwitchPro
            | ControllerFamily::Wiimote
            | ControllerFamily::GameCubeAdapter => vendor_ids::NINTENDO,
            ControllerFamily::DualSense | ControllerFamily::DualShock4 => vendor_ids::SONY,
        }
    }

    /// Product IDs tried, in order, when opening this family.
    pub fn product_ids(self) -> &'static [u16] {
        match self {
            ControllerFamily::SwitchPro => &[product_ids::SWITCH_PRO],
            ControllerFamily::DualSense => &[product_ids::DUALSENSE],
            ControllerFamily::DualShock4 => &[product_ids::DUALSHOCK4, product_ids::DUALSHOCK4_V2],
            ControllerFamily::Wiimote => &[product_ids::WIIMOTE],
            ControllerFamily::GameCubeAdapter => &[product_ids::GAMECUBE_ADAPTER],
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ControllerFamily::SwitchPro => "Switch Pro Controller",
            ControllerFamily::DualSense => "DualSense",
            ControllerFamily::DualShock4 => "DualShock 4",
            ControllerFamily::Wiimote => "Wii Remote",
            ControllerFamily::GameCubeAdapter => "GameCube Controller Adapter",
        }
    }

    /// Number of logical controllers one handle can carry.
    pub fn port_count(self) -> usize {
        match self {
            ControllerFamily::GameCubeAdapter => 4,
            _ => 1,
        }
    }
}

impl std::fmt::Display for ControllerFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
