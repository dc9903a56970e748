//! Property tests for the Switch Pro codec.

use padlink_hid_switch_pro_protocol::{
    SwitchProButtons, decode_stick, encode_stick, parse_command_reply, parse_full_input,
    report_ids,
};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    #[test]
    fn prop_stick_bytes_round_trip(b0 in any::<u8>(), b1 in any::<u8>(), b2 in any::<u8>()) {
        let (x, y) = decode_stick([b0, b1, b2]);
        prop_assert!(x <= 0x0FFF);
        prop_assert!(y <= 0x0FFF);
        prop_assert_eq!(encode_stick(x, y), [b0, b1, b2]);
    }

    #[test]
    fn prop_stick_values_round_trip(x in 0u16..=0x0FFF, y in 0u16..=0x0FFF) {
        prop_assert_eq!(decode_stick(encode_stick(x, y)), (x, y));
    }

    #[test]
    fn prop_button_wire_round_trip(bits in any::<u32>()) {
        let buttons = SwitchProButtons::from_bits_truncate(bits);
        prop_assert_eq!(SwitchProButtons::from_wire(buttons.to_wire()), buttons);
    }

    #[test]
    fn prop_canonical_axes_in_range(data in proptest::collection::vec(any::<u8>(), 13..64)) {
        let mut data = data;
        if let Some(id) = data.first_mut() {
            *id = report_ids::FULL_INPUT;
        }
        let report = parse_full_input(&data);
        prop_assert!(report.is_ok());
        if let Ok(report) = report {
            let canonical = report.to_canonical();
            for axis in [
                canonical.left_stick_x,
                canonical.left_stick_y,
                canonical.right_stick_x,
                canonical.right_stick_y,
            ] {
                prop_assert!((-1.0..=1.0).contains(&axis));
            }
            for trigger in [canonical.left_trigger, canonical.right_trigger] {
                prop_assert!((0.0..=1.0).contains(&trigger));
            }
        }
    }

    #[test]
    fn prop_parsers_never_panic(data in proptest::collection::vec(any::<u8>(), 0..400)) {
        let _full = parse_full_input(&data);
        let _reply = parse_command_reply(&data);
    }
}
