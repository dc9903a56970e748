//! Property tests for the adapter frame codec.

use padlink_usb_gamecube_protocol::{FRAME_LEN, PORT_COUNT, PORT_LEN, REPORT_ID, parse_frame};
use proptest::prelude::*;

fn frame_strategy() -> impl Strategy<Value = Vec<u8>> {
    proptest::collection::vec(any::<u8>(), FRAME_LEN).prop_map(|mut data| {
        if let Some(id) = data.first_mut() {
            *id = REPORT_ID;
        }
        data
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn prop_mutating_one_port_leaves_others(
        data in frame_strategy(),
        target in 0usize..PORT_COUNT,
        noise in proptest::collection::vec(any::<u8>(), PORT_LEN),
    ) {
        let before = parse_frame(&data);
        prop_assert!(before.is_ok());

        let mut mutated = data.clone();
        let start = 1 + target * PORT_LEN;
        if let Some(block) = mutated.get_mut(start..start + PORT_LEN) {
            block.copy_from_slice(&noise);
        }
        let after = parse_frame(&mutated);
        prop_assert!(after.is_ok());

        if let (Ok(before), Ok(after)) = (before, after) {
            for index in (0..PORT_COUNT).filter(|&i| i != target) {
                prop_assert_eq!(before.ports[index], after.ports[index]);
                prop_assert_eq!(before.ports[index].to_canonical(), after.ports[index].to_canonical());
            }
        }
    }

    #[test]
    fn prop_frame_always_has_four_ports(data in frame_strategy()) {
        let frame = parse_frame(&data);
        prop_assert!(frame.is_ok());
        if let Ok(frame) = frame {
            prop_assert_eq!(frame.ports.len(), 4);
            prop_assert!(frame.port(4).is_none());
        }
    }

    #[test]
    fn prop_parse_never_panics(data in proptest::collection::vec(any::<u8>(), 0..64)) {
        let _frame = parse_frame(&data);
    }
}
