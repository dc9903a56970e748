//! Extension identification.

use crate::reports::ReadReport;
use padlink_hid_common::ReportError;

/// Length of the identification block at `0xA400FA`.
pub const IDENTIFICATION_LEN: usize = 6;

const NUNCHUCK_ID: [u8; IDENTIFICATION_LEN] = [0xFF, 0x00, 0xA4, 0x20, 0x00, 0x00];
const CLASSIC_CONTROLLER_ID: [u8; IDENTIFICATION_LEN] = [0x01, 0x00, 0xA4, 0x20, 0x01, 0x01];
const CLASSIC_CONTROLLER_PRO_ID: [u8; IDENTIFICATION_LEN] = [0x00, 0x00, 0xA4, 0x20, 0x01, 0x01];

/// What is plugged into the remote's expansion port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ExtensionType {
    #[default]
    None,
    Nunchuck,
    ClassicController,
    ClassicControllerPro,
    Unknown,
}

impl ExtensionType {
    pub fn is_classic(self) -> bool {
        matches!(
            self,
            ExtensionType::ClassicController | ExtensionType::ClassicControllerPro
        )
    }

    pub fn name(self) -> &'static str {
        match self {
            ExtensionType::None => "none",
            ExtensionType::Nunchuck => "Nunchuck",
            ExtensionType::ClassicController => "Classic Controller",
            ExtensionType::ClassicControllerPro => "Classic Controller Pro",
            ExtensionType::Unknown => "unknown",
        }
    }
}

/// Resolve an identification block.
pub fn identify_extension(id: &[u8; IDENTIFICATION_LEN]) -> ExtensionType {
    match *id {
        NUNCHUCK_ID => ExtensionType::Nunchuck,
        CLASSIC_CONTROLLER_ID => ExtensionType::ClassicController,
        CLASSIC_CONTROLLER_PRO_ID => ExtensionType::ClassicControllerPro,
        _ => ExtensionType::Unknown,
    }
}

/// Why an identification read reply could not be used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentificationError {
    /// The remote reported an error code for the read.
    Device(u8),
    /// The reply carried a different number of bytes than requested.
    Length(ReportError),
}

/// Validate a `0x21` reply to the identification read and resolve it.
pub fn identify_from_read(read: &ReadReport) -> Result<ExtensionType, IdentificationError> {
    if read.error_code() != 0 {
        return Err(IdentificationError::Device(read.error_code()));
    }
    if read.size() != IDENTIFICATION_LEN {
        return Err(IdentificationError::Length(ReportError::InvalidField {
            field: "read size",
            value: read.size() as u32,
        }));
    }
    let [a, b, c, d, e, f, ..] = read.data;
    Ok(identify_extension(&[a, b, c, d, e, f]))
}
