//! Report stream discipline: strict press/release alternation and the
//! emission-over-sampling priority rule.

use morsekey_core::keycodes::KEY_S;
use morsekey_core::test_utils::Harness;
use morsekey_core::types::SwitchState;
use morsekey_core::DecoderConfig;

fn harness() -> Harness {
    Harness::new(DecoderConfig {
        dot_dash_ticks: 10,
        symbol_gap_ticks: 45,
    })
}

/// Property 5: no two press reports without an intervening release.
#[test]
fn press_and_release_strictly_alternate() {
    let mut h = harness();
    // Mix symbol and numeral traffic
    h.symbol_dot();
    h.symbol_dot();
    h.symbol_dot();
    h.finish_symbol();
    h.drain();
    h.numeral_hold(321);
    h.drain();

    assert!(!h.reports.is_empty());
    assert_eq!(h.reports.len() % 2, 0);
    for (i, report) in h.reports.iter().enumerate() {
        if i % 2 == 0 {
            assert!(!report.is_release(), "report {} should be a press", i);
        } else {
            assert!(report.is_release(), "report {} should be a release", i);
        }
    }
}

#[test]
fn no_report_is_sent_while_host_not_ready() {
    let mut h = harness();
    h.symbol_dot();
    h.symbol_dot();
    h.symbol_dot();
    // Stall the host before the idle gap stages the S keystroke
    h.usb_ready = false;
    h.finish_symbol();
    h.run(SwitchState::RELEASED, 200);
    assert!(h.reports.is_empty());

    h.usb_ready = true;
    h.drain();
    assert_eq!(h.pressed_keycodes(), vec![KEY_S]);
    assert_eq!(h.reports.len(), 2);
}

/// While a report is owed, tick processing is suspended: switch activity
/// during the stall is invisible to the decoder.
#[test]
fn emission_gates_sampling() {
    let mut h = harness();
    h.symbol_dot();
    h.symbol_dot();
    h.symbol_dot();
    h.usb_ready = false;
    h.finish_symbol();

    // Hammer the dot button while the press report is stuck
    for _ in 0..20 {
        h.run(SwitchState::DOT, 3);
        h.run(SwitchState::RELEASED, 2);
    }
    assert_eq!(h.decoder.pattern_len(), 0, "stalled ticks must be lost");

    h.usb_ready = true;
    h.drain();
    assert_eq!(h.pressed_keycodes(), vec![KEY_S]);
}
