//! 37-byte input frame.

use bitflags::bitflags;
use padlink_device_types::{
    CanonicalReport, ControllerButtons, normalize_stick_u8, normalize_trigger_u8,
};
use padlink_hid_common::{ReportReader, ReportResult};

use crate::ids::REPORT_ID;

pub const PORT_COUNT: usize = 4;
pub const PORT_LEN: usize = 9;
pub const FRAME_LEN: usize = 1 + PORT_COUNT * PORT_LEN;

bitflags! {
    #[repr(transparent)]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct GameCubeButtons: u16 {
        const A = 1 << 0;
        const B = 1 << 1;
        const X = 1 << 2;
        const Y = 1 << 3;
        const DPAD_LEFT = 1 << 4;
        const DPAD_RIGHT = 1 << 5;
        const DPAD_DOWN = 1 << 6;
        const DPAD_UP = 1 << 7;
        const START = 1 << 8;
        const Z = 1 << 9;
        const R = 1 << 10;
        const L = 1 << 11;
    }
}

/// What is plugged into a port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PortStatus {
    #[default]
    Empty,
    Wired,
    Wireless,
}

impl PortStatus {
    pub fn from_status_byte(status: u8) -> Self {
        match status >> 4 {
            1 => PortStatus::Wired,
            2 => PortStatus::Wireless,
            _ => PortStatus::Empty,
        }
    }

    pub fn is_connected(self) -> bool {
        !matches!(self, PortStatus::Empty)
    }
}

/// One decoded port block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GameCubePort {
    pub status: PortStatus,
    /// Low nibble of the status byte (bit 2: rumble power present).
    pub status_flags: u8,
    pub buttons: GameCubeButtons,
    pub main_stick: (u8, u8),
    pub c_stick: (u8, u8),
    pub left_trigger: u8,
    pub right_trigger: u8,
}

impl GameCubePort {
    fn parse(block: &ReportReader<'_>) -> ReportResult<Self> {
        let status = block.u8_at(0)?;
        let [mx, my, cx, cy, lt, rt] = block.bytes_at::<6>(3)?;
        Ok(Self {
            status: PortStatus::from_status_byte(status),
            status_flags: status & 0x0F,
            buttons: GameCubeButtons::from_bits_truncate(block.u16_le_at(1)?),
            main_stick: (mx, my),
            c_stick: (cx, cy),
            left_trigger: lt,
            right_trigger: rt,
        })
    }

    pub fn is_connected(&self) -> bool {
        self.status.is_connected()
    }

    /// Canonical report for this port. An empty port yields the neutral report.
    ///
    /// Raw stick Y grows upward and is inverted.
    pub fn to_canonical(&self) -> CanonicalReport {
        if !self.is_connected() {
            return CanonicalReport::default();
        }
        let b = self.buttons;
        let buttons = ControllerButtons::empty()
            .with_if(ControllerButtons::A, b.contains(GameCubeButtons::A))
            .with_if(ControllerButtons::B, b.contains(GameCubeButtons::B))
            .with_if(ControllerButtons::X, b.contains(GameCubeButtons::X))
            .with_if(ControllerButtons::Y, b.contains(GameCubeButtons::Y))
            .with_if(ControllerButtons::MENU, b.contains(GameCubeButtons::START))
            .with_if(ControllerButtons::RIGHT_BUMPER, b.contains(GameCubeButtons::Z))
            .with_if(ControllerButtons::LEFT_TRIGGER, b.contains(GameCubeButtons::L))
            .with_if(ControllerButtons::RIGHT_TRIGGER, b.contains(GameCubeButtons::R))
            .with_if(ControllerButtons::DPAD_UP, b.contains(GameCubeButtons::DPAD_UP))
            .with_if(ControllerButtons::DPAD_DOWN, b.contains(GameCubeButtons::DPAD_DOWN))
            .with_if(ControllerButtons::DPAD_LEFT, b.contains(GameCubeButtons::DPAD_LEFT))
            .with_if(
                ControllerButtons::DPAD_RIGHT,
                b.contains(GameCubeButtons::DPAD_RIGHT),
            );

        CanonicalReport::new()
            .with_buttons(buttons)
            .with_left_stick(
                normalize_stick_u8(self.main_stick.0),
                -normalize_stick_u8(self.main_stick.1),
            )
            .with_right_stick(
                normalize_stick_u8(self.c_stick.0),
                -normalize_stick_u8(self.c_stick.1),
            )
            .with_triggers(
                normalize_trigger_u8(self.left_trigger),
                normalize_trigger_u8(self.right_trigger),
            )
    }
}

/// A decoded adapter frame: four independent ports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GameCubeFrame {
    pub ports: [GameCubePort; PORT_COUNT],
}

impl GameCubeFrame {
    pub fn port(&self, index: usize) -> Option<&GameCubePort> {
        self.ports.get(index)
    }

    /// Indices of ports with a controller attached.
    pub fn connected_ports(&self) -> impl Iterator<Item = usize> + '_ {
        self.ports
            .iter()
            .enumerate()
            .filter(|(_, port)| port.is_connected())
            .map(|(index, _)| index)
    }
}

/// Decode a 37-byte `0x21` frame.
pub fn parse_frame(data: &[u8]) -> ReportResult<GameCubeFrame> {
    let reader = ReportReader::with_min_len(data, FRAME_LEN)?;
    reader.expect_report_id(REPORT_ID)?;

    let mut frame = GameCubeFrame::default();
    for (index, port) in frame.ports.iter_mut().enumerate() {
        let block = reader.sub_reader(1 + index * PORT_LEN, PORT_LEN)?;
        *port = GameCubePort::parse(&block)?;
    }
    Ok(frame)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame_with_port(index: usize, block: [u8; PORT_LEN]) -> Vec<u8> {
        let mut data = vec![0u8; FRAME_LEN];
        data[0] = REPORT_ID;
        let start = 1 + index * PORT_LEN;
        data[start..start + PORT_LEN].copy_from_slice(&block);
        data
    }

    #[test]
    fn test_parse_wired_port() -> ReportResult<()> {
        let data = frame_with_port(1, [0x14, 0x01, 0x03, 0x80, 0xFF, 0x00, 0x80, 0xFF, 0x00]);
        let frame = parse_frame(&data)?;

        assert_eq!(frame.connected_ports().collect::<Vec<_>>(), vec![1]);
        let port = frame.ports[1];
        assert_eq!(port.status, PortStatus::Wired);
        assert_eq!(port.status_flags, 0x04);
        assert_eq!(
            port.buttons,
            GameCubeButtons::A | GameCubeButtons::START | GameCubeButtons::Z
        );

        let canonical = port.to_canonical();
        assert_eq!(
            canonical.buttons,
            ControllerButtons::A | ControllerButtons::MENU | ControllerButtons::RIGHT_BUMPER
        );
        // Stick pushed fully up reads as negative Y.
        assert!((canonical.left_stick_y + 1.0).abs() < 1e-9);
        assert!((canonical.right_stick_x + 1.0).abs() < 1e-9);
        assert!((canonical.left_trigger - 1.0).abs() < 1e-9);
        Ok(())
    }

    #[test]
    fn test_empty_port_is_neutral() -> ReportResult<()> {
        let data = frame_with_port(0, [0x00, 0xFF, 0x0F, 0, 0, 0, 0, 0xFF, 0xFF]);
        let frame = parse_frame(&data)?;
        assert!(!frame.ports[0].is_connected());
        assert_eq!(frame.ports[0].to_canonical(), CanonicalReport::default());
        Ok(())
    }

    #[test]
    fn test_wireless_status() {
        assert_eq!(PortStatus::from_status_byte(0x22), PortStatus::Wireless);
        assert_eq!(PortStatus::from_status_byte(0x30), PortStatus::Empty);
    }

    #[test]
    fn test_frame_validation() {
        let mut data = frame_with_port(0, [0; PORT_LEN]);
        assert!(parse_frame(&data[..36]).is_err());
        data[0] = 0x22;
        assert!(parse_frame(&data).is_err());
    }
}
