//! Dash-button numeral entry: hold duration typed back as digits plus Enter.

use morsekey_core::keycodes::{digit, KEY_ENTER};
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

/// Property 3: a hold of `d` ticks types the three-digit decimal expansion
/// of `d`, most significant digit first, then Enter.
#[rstest]
#[case::three_digits(123, [digit(1), digit(2), digit(3)])]
#[case::two_digits(42, [digit(0), digit(4), digit(2)])]
#[case::one_digit(7, [digit(0), digit(0), digit(7)])]
#[case::truncated_to_three(1234, [digit(2), digit(3), digit(4)])]
fn hold_duration_is_typed_as_digits(#[case] ticks: u16, #[case] digits: [u8; 3]) {
    let mut h = harness();
    h.numeral_hold(ticks);
    h.drain();

    let mut expected = digits.to_vec();
    expected.push(KEY_ENTER);
    assert_eq!(h.pressed_keycodes(), expected);

    // Each buffered key carries no modifier and gets its own release
    assert_eq!(h.reports.len(), 8);
    for pair in h.reports.chunks(2) {
        assert_eq!(pair[0].modifiers, 0);
        assert!(pair[1].is_release());
    }
}

#[test]
fn drain_paces_one_key_per_idle_tick() {
    let mut h = harness();
    h.numeral_hold(55);
    // After release the buffer holds Enter plus three digits
    assert_eq!(h.decoder.buffered_keys(), 4);

    // One pop per idle tick: each keystroke costs one pop iteration plus
    // two report iterations before the next pop can happen
    h.run(SwitchState::RELEASED, 3);
    assert_eq!(h.decoder.buffered_keys(), 3);
    h.run(SwitchState::RELEASED, 3);
    assert_eq!(h.decoder.buffered_keys(), 2);
    h.drain();
    assert_eq!(h.decoder.buffered_keys(), 0);
}

#[test]
fn numeral_entry_does_not_consult_the_code_table() {
    let mut h = harness();
    // A short dash-button tap would be a dot if it went through the symbol
    // path; instead it stages 0 0 <ticks> Enter
    h.numeral_hold(2);
    h.drain();
    assert_eq!(
        h.pressed_keycodes(),
        vec![digit(0), digit(0), digit(2), KEY_ENTER]
    );
    assert_eq!(h.decoder.pattern_len(), 0);
}

#[test]
fn a_fresh_numeral_entry_replaces_an_undrained_buffer() {
    let mut h = harness();
    h.numeral_hold(11);
    // Drain only the first keystroke (pop + press + release)
    h.run(SwitchState::RELEASED, 3);
    assert_eq!(h.decoder.buffered_keys(), 3);

    // Staging again clears the leftovers, so the buffer cannot overflow
    h.numeral_hold(234);
    assert_eq!(h.decoder.buffered_keys(), 4);
    h.drain();
}
