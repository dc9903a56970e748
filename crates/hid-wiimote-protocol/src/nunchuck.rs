//! Nunchuck extension payload.
//!
//! | Byte | Field |
//! |------|-------|
//! | 0 | Stick X |
//! | 1 | Stick Y |
//! | 2 | Accelerometer X, bits 9..2 |
//! | 3 | Accelerometer Y, bits 9..2 |
//! | 4 | Accelerometer Z, bits 9..2 |
//! | 5 | Z (bit 0), C (bit 1), accelerometer low bits (2..7) |
//!
//! Buttons are active-low.

use bitflags::bitflags;
use padlink_device_types::{ControllerButtons, digital_trigger, normalize_stick_u8};
use padlink_hid_common::{ReportReader, ReportResult};

const PAYLOAD_LEN: usize = 6;

bitflags! {
    #[repr(transparent)]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct NunchuckButtons: u8 {
        const Z = 1 << 0;
        const C = 1 << 1;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NunchuckReport {
    pub stick: (u8, u8),
    /// Full 10-bit accelerometer readings.
    pub accelerometer: [u16; 3],
    pub buttons: NunchuckButtons,
}

impl NunchuckReport {
    pub fn parse(extension: &[u8]) -> ReportResult<Self> {
        let reader = ReportReader::with_min_len(extension, PAYLOAD_LEN)?;
        let [ax, ay, az] = reader.bytes_at::<3>(2)?;
        let low = reader.u8_at(5)?;
        let accel = |high: u8, shift: u8| (u16::from(high) << 2) | u16::from((low >> shift) & 0x03);
        Ok(Self {
            stick: (reader.u8_at(0)?, reader.u8_at(1)?),
            accelerometer: [accel(ax, 2), accel(ay, 4), accel(az, 6)],
            buttons: NunchuckButtons::from_bits_truncate(!low),
        })
    }

    pub fn canonical_buttons(&self) -> ControllerButtons {
        ControllerButtons::empty()
            .with_if(
                ControllerButtons::LEFT_BUMPER,
                self.buttons.contains(NunchuckButtons::C),
            )
            .with_if(
                ControllerButtons::LEFT_TRIGGER,
                self.buttons.contains(NunchuckButtons::Z),
            )
    }

    /// Stick as canonical `(x, y)`, Y inverted so that down is positive.
    pub fn canonical_stick(&self) -> (f64, f64) {
        (
            normalize_stick_u8(self.stick.0),
            -normalize_stick_u8(self.stick.1),
        )
    }

    /// Z doubles as the left trigger.
    pub fn left_trigger(&self) -> f64 {
        digital_trigger(self.buttons.contains(NunchuckButtons::Z))
    }
}
