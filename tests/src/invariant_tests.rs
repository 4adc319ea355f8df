//! Structural invariants under arbitrary timing, including lost ticks.

use morsekey_core::test_utils::Harness;
use morsekey_core::types::{DecoderConfig, SwitchState};
use proptest::prelude::*;

fn harness() -> Harness {
    Harness::new(DecoderConfig {
        dot_dash_ticks: 10,
        symbol_gap_ticks: 45,
    })
}

proptest! {
    /// Property 6: however holds and gaps are timed, the accumulated length
    /// always equals the number of completed dot-button holds.
    #[test]
    fn pattern_length_matches_completed_holds(
        holds in prop::collection::vec((1u16..30, 1u16..20), 1..8)
    ) {
        let mut h = harness();
        let mut completed = 0u8;
        for (hold_ticks, gap_ticks) in holds {
            h.run(SwitchState::DOT, hold_ticks as u32);
            h.run(SwitchState::RELEASED, 1);
            completed += 1;
            // Keep the gap below the resolution threshold so the symbol
            // stays open; the release iteration already consumed one tick
            let gap = gap_ticks.min(20);
            h.run(SwitchState::RELEASED, gap as u32);
        }
        prop_assert_eq!(h.decoder.pattern_len(), completed);
        // The pattern never carries more bits than its length
        prop_assert!((h.decoder.pattern() as u32) < (1u32 << completed.min(7)));
    }

    /// Delayed observation (lost ticks) shifts durations but never corrupts
    /// the pattern/length pairing or the press/release discipline.
    #[test]
    fn lost_ticks_never_corrupt_state(
        script in prop::collection::vec((0u8..3, 1u16..60), 1..24)
    ) {
        let mut h = harness();
        for (state, ticks) in script {
            let switches = match state {
                0 => SwitchState::RELEASED,
                1 => SwitchState::DOT,
                _ => SwitchState::DASH,
            };
            h.run(switches, ticks as u32);
        }
        h.drain();

        // Reports always come in press/release pairs
        prop_assert_eq!(h.reports.len() % 2, 0);
        for pair in h.reports.chunks(2) {
            prop_assert!(!pair[0].is_release());
            prop_assert!(pair[1].is_release());
        }
        // Drained state is fully quiescent
        prop_assert_eq!(h.decoder.buffered_keys(), 0);
        prop_assert!(h.sequencer.idle());
    }
}
