//! End-to-end symbol entry: timed holds in, press/release reports out.

use morsekey_core::keycodes::*;
use morsekey_core::table::CODE_TABLE;
use morsekey_core::test_utils::Harness;
use morsekey_core::types::SwitchState;
use morsekey_core::DecoderConfig;
use rstest::rstest;

fn harness() -> Harness {
    Harness::new(DecoderConfig {
        dot_dash_ticks: 10,
        symbol_gap_ticks: 45,
    })
}

#[rstest]
#[case::e(0, 1, KEY_E, 0)]
#[case::t(1, 1, KEY_T, 0)]
#[case::a(1, 2, KEY_A, 0)]
#[case::n(2, 2, KEY_N, 0)]
#[case::o(7, 3, KEY_O, 0)]
#[case::exclamation(43, 6, KEY_1, MOD_LEFT_SHIFT)]
#[case::ctrl_alt_del(1, 6, KEY_DELETE, MOD_LEFT_CTRL | MOD_LEFT_ALT)]
fn symbol_entry_types_one_keystroke(
    #[case] pattern: u8,
    #[case] len: u8,
    #[case] keycode: u8,
    #[case] modifiers: u8,
) {
    let mut h = harness();
    h.symbol_from_pattern(pattern, len);
    h.finish_symbol();
    h.drain();

    assert_eq!(h.reports.len(), 2, "exactly one press and one release");
    assert_eq!(h.reports[0].bytes(), [modifiers, keycode]);
    assert!(h.reports[1].is_release());
}

/// Property 1: every table entry is reachable through its timed sequence.
#[test]
fn every_table_entry_is_reachable() {
    for entry in &CODE_TABLE {
        let mut h = harness();
        h.symbol_from_pattern(entry.pattern, entry.len);
        h.finish_symbol();
        h.drain();

        assert_eq!(
            h.reports.len(),
            2,
            "entry ({}, {}) produced {} reports",
            entry.pattern,
            entry.len,
            h.reports.len()
        );
        assert_eq!(h.reports[0].bytes(), [entry.modifiers, entry.keycode]);
        assert!(h.reports[1].is_release());
    }
}

/// Property 2: unknown symbols are dropped silently and leave clean state.
#[test]
fn unknown_symbol_is_dropped_then_decoder_still_works() {
    let mut h = harness();
    // (31, 5) = "-----" has no entry in this table
    h.symbol_from_pattern(31, 5);
    h.finish_symbol();
    h.drain();
    assert!(h.reports.is_empty());
    assert_eq!(h.decoder.pattern(), 0);
    assert_eq!(h.decoder.pattern_len(), 0);

    // The next entry resolves normally
    h.symbol_from_pattern(1, 2);
    h.finish_symbol();
    h.drain();
    assert_eq!(h.pressed_keycodes(), vec![KEY_A]);
}

/// Property 4 (with the bit order fixed against the device table):
/// dot-then-dash and dash-then-dot are distinct symbols.
#[test]
fn element_order_distinguishes_symbols() {
    let mut h = harness();
    h.symbol_dot();
    h.symbol_dash();
    h.finish_symbol();
    h.drain();
    assert_eq!(h.pressed_keycodes(), vec![KEY_A]); // .-

    let mut h = harness();
    h.symbol_dash();
    h.symbol_dot();
    h.finish_symbol();
    h.drain();
    assert_eq!(h.pressed_keycodes(), vec![KEY_N]); // -.
}

#[test]
fn consecutive_symbols_each_resolve() {
    let mut h = harness();
    for _ in 0..3 {
        h.symbol_dot();
        h.symbol_dot();
        h.symbol_dot();
        h.finish_symbol();
        h.drain();
    }
    assert_eq!(h.pressed_keycodes(), vec![KEY_S, KEY_S, KEY_S]);
}

#[test]
fn idle_without_input_never_emits() {
    let mut h = harness();
    h.run(SwitchState::RELEASED, 1000);
    assert!(h.reports.is_empty());
}
