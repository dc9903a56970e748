//! Input report decoding.
//!
//! Every input report starts with the report id and the two core button
//! bytes.
//!
//! | Report | Offset | Size | Field |
//! |--------|--------|------|-------|
//! | `0x20` status | 3 | 1 | Flags |
//! | | 6 | 1 | Battery level |
//! | `0x21` read | 3 | 1 | Size minus one (high nibble), error (low nibble) |
//! | | 4 | 2 | Address, low 16 bits (BE) |
//! | | 6 | 16 | Data |
//! | `0x22` ack | 3 | 1 | Acknowledged report id |
//! | | 4 | 1 | Result code |
//! | `0x35` input | 3 | 3 | Accelerometer X, Y, Z (upper 8 bits) |
//! | | 6 | 16 | Extension bytes |

use bitflags::bitflags;
use padlink_device_types::ControllerButtons;
use padlink_hid_common::{ReportReader, ReportResult};

use crate::ids::report_ids;

/// Extension payload length in a `0x35` report and data length in a `0x21` report.
pub const EXTENSION_DATA_LEN: usize = 16;

bitflags! {
    /// Core buttons, little-endian over bytes 1 and 2.
    #[repr(transparent)]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct CoreButtons: u16 {
        const DPAD_LEFT = 1 << 0;
        const DPAD_RIGHT = 1 << 1;
        const DPAD_DOWN = 1 << 2;
        const DPAD_UP = 1 << 3;
        const PLUS = 1 << 4;
        const TWO = 1 << 8;
        const ONE = 1 << 9;
        const B = 1 << 10;
        const A = 1 << 11;
        const MINUS = 1 << 12;
        const HOME = 1 << 15;
    }
}

impl CoreButtons {
    fn read(reader: &ReportReader<'_>) -> ReportResult<Self> {
        Ok(Self::from_bits_truncate(reader.u16_le_at(1)?))
    }

    /// Remote held upright: A/B on the face, 1/2 as X/Y.
    pub fn to_canonical(self) -> ControllerButtons {
        ControllerButtons::empty()
            .with_if(ControllerButtons::A, self.contains(Self::A))
            .with_if(ControllerButtons::B, self.contains(Self::B))
            .with_if(ControllerButtons::X, self.contains(Self::ONE))
            .with_if(ControllerButtons::Y, self.contains(Self::TWO))
            .with_if(ControllerButtons::MENU, self.contains(Self::PLUS))
            .with_if(ControllerButtons::VIEW, self.contains(Self::MINUS))
            .with_if(ControllerButtons::GUIDE, self.contains(Self::HOME))
            .with_if(ControllerButtons::DPAD_UP, self.contains(Self::DPAD_UP))
            .with_if(ControllerButtons::DPAD_DOWN, self.contains(Self::DPAD_DOWN))
            .with_if(ControllerButtons::DPAD_LEFT, self.contains(Self::DPAD_LEFT))
            .with_if(ControllerButtons::DPAD_RIGHT, self.contains(Self::DPAD_RIGHT))
    }
}

bitflags! {
    /// Status report flags (byte 3).
    #[repr(transparent)]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct StatusFlags: u8 {
        const BATTERY_LOW = 1 << 0;
        const EXTENSION_CONNECTED = 1 << 1;
        const SPEAKER_ENABLED = 1 << 2;
        const IR_ENABLED = 1 << 3;
        const LED_1 = 1 << 4;
        const LED_2 = 1 << 5;
        const LED_3 = 1 << 6;
        const LED_4 = 1 << 7;
    }
}

/// `0x20` status report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatusReport {
    pub buttons: CoreButtons,
    pub flags: StatusFlags,
    pub battery: u8,
}

impl StatusReport {
    pub fn extension_connected(&self) -> bool {
        self.flags.contains(StatusFlags::EXTENSION_CONNECTED)
    }
}

pub fn parse_status(data: &[u8]) -> ReportResult<StatusReport> {
    let reader = ReportReader::with_min_len(data, 7)?;
    reader.expect_report_id(report_ids::STATUS)?;
    Ok(StatusReport {
        buttons: CoreButtons::read(&reader)?,
        flags: StatusFlags::from_bits_retain(reader.u8_at(3)?),
        battery: reader.u8_at(6)?,
    })
}

/// `0x21` memory read reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadReport {
    pub buttons: CoreButtons,
    pub size_and_error: u8,
    pub address: u16,
    pub data: [u8; EXTENSION_DATA_LEN],
}

impl ReadReport {
    /// Error nibble: `0` ok, `7` write-only register, `8` no such address.
    pub fn error_code(&self) -> u8 {
        self.size_and_error & 0x0F
    }

    /// Number of valid bytes in `data`.
    pub fn size(&self) -> usize {
        usize::from(self.size_and_error >> 4) + 1
    }

    pub fn payload(&self) -> &[u8] {
        self.data.get(..self.size()).unwrap_or(&self.data)
    }
}

pub fn parse_read(data: &[u8]) -> ReportResult<ReadReport> {
    let reader = ReportReader::with_min_len(data, 6 + EXTENSION_DATA_LEN)?;
    reader.expect_report_id(report_ids::READ_DATA)?;
    Ok(ReadReport {
        buttons: CoreButtons::read(&reader)?,
        size_and_error: reader.u8_at(3)?,
        address: reader.u16_be_at(4)?,
        data: reader.bytes_at(6)?,
    })
}

/// `0x22` acknowledge of an output report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AcknowledgeReport {
    pub buttons: CoreButtons,
    pub acknowledged_report_id: u8,
    pub result: u8,
}

impl AcknowledgeReport {
    pub fn is_success(&self) -> bool {
        self.result == 0
    }
}

pub fn parse_acknowledge(data: &[u8]) -> ReportResult<AcknowledgeReport> {
    let reader = ReportReader::with_min_len(data, 5)?;
    reader.expect_report_id(report_ids::ACKNOWLEDGE)?;
    Ok(AcknowledgeReport {
        buttons: CoreButtons::read(&reader)?,
        acknowledged_report_id: reader.u8_at(3)?,
        result: reader.u8_at(4)?,
    })
}

/// `0x35` buttons + accelerometer + extension report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputReport {
    pub buttons: CoreButtons,
    pub accelerometer: [u8; 3],
    pub extension: [u8; EXTENSION_DATA_LEN],
}

pub fn parse_input(data: &[u8]) -> ReportResult<InputReport> {
    let reader = ReportReader::with_min_len(data, 6 + EXTENSION_DATA_LEN)?;
    reader.expect_report_id(report_ids::BUTTONS_ACCEL_EXTENSION)?;
    Ok(InputReport {
        buttons: CoreButtons::read(&reader)?,
        accelerometer: reader.bytes_at(3)?,
        extension: reader.bytes_at(6)?,
    })
}
