//! Property tests for the Sony codecs.

use padlink_device_types::ControllerButtons;
use padlink_hid_sony_protocol::{
    SonyButtons, decode_dpad, parse_dualsense_input, parse_dualshock4_input,
};
use proptest::prelude::*;

const CARDINALS: [ControllerButtons; 4] = [
    ControllerButtons::DPAD_UP,
    ControllerButtons::DPAD_RIGHT,
    ControllerButtons::DPAD_DOWN,
    ControllerButtons::DPAD_LEFT,
];

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn prop_octant_maps_to_adjacent_cardinals(octant in 0u8..8) {
        let flags = decode_dpad(octant);
        let index = usize::from(octant / 2);
        if octant % 2 == 0 {
            prop_assert_eq!(flags, CARDINALS[index]);
        } else {
            prop_assert_eq!(flags, CARDINALS[index] | CARDINALS[(index + 1) % 4]);
        }
    }

    #[test]
    fn prop_out_of_range_octant_is_centered(octant in 8u8..=255) {
        prop_assert!(decode_dpad(octant).is_empty());
    }

    #[test]
    fn prop_dpad_nibble_never_leaks_into_buttons(raw in any::<u32>()) {
        let buttons = SonyButtons::from_wire(raw).to_canonical();
        // Octant 8 is the centred D-pad; octant 0 would be Up.
        let without_dpad = SonyButtons::from_wire((raw & !0x0F) | 0x08).to_canonical();
        prop_assert_eq!(buttons.difference(ControllerButtons::DPAD), without_dpad);
    }

    #[test]
    fn prop_canonical_ranges(data in proptest::collection::vec(any::<u8>(), 64)) {
        let mut data = data;
        if let Some(id) = data.first_mut() {
            *id = 0x01;
        }
        for report in [
            parse_dualsense_input(&data).map(|r| r.to_canonical()),
            parse_dualshock4_input(&data).map(|r| r.to_canonical()),
        ] {
            prop_assert!(report.is_ok());
            if let Ok(report) = report {
                for axis in [report.left_stick_x, report.left_stick_y, report.right_stick_x, report.right_stick_y] {
                    prop_assert!((-1.0..=1.0).contains(&axis));
                }
                prop_assert!((0.0..=1.0).contains(&report.left_trigger));
                prop_assert!((0.0..=1.0).contains(&report.right_trigger));
            }
        }
    }

    #[test]
    fn prop_parsers_never_panic(data in proptest::collection::vec(any::<u8>(), 0..80)) {
        let _ds = parse_dualsense_input(&data);
        let _ds4 = parse_dualshock4_input(&data);
    }
}

#[test]
fn zero_nibble_is_dpad_up_not_released() {
    assert_eq!(SonyButtons::from_wire(0).to_canonical(), ControllerButtons::DPAD_UP);
    assert!(SonyButtons::from_wire(0x08).to_canonical().is_empty());
}
