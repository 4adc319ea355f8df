//! Deterministic main-loop simulation for host tests.
//!
//! Reproduces the firmware's loop discipline: one iteration is either a
//! report transmission (when one is owed and the host is ready) or a single
//! decoder tick, never both. Ticks arriving while a report is pending are
//! lost, exactly as on the device.

use crate::decoder::Decoder;
use crate::sequencer::ReportSequencer;
use crate::types::{DecoderConfig, Report, SwitchState};

/// Scripted decoder + sequencer pipeline collecting every emitted report
pub struct Harness {
    pub decoder: Decoder,
    pub sequencer: ReportSequencer,
    /// Every report pushed to the (virtual) interrupt endpoint, in order
    pub reports: Vec<Report>,
    /// Host transmit readiness; reports are only emitted while true
    pub usb_ready: bool,
    config: DecoderConfig,
}

impl Harness {
    pub fn new(config: DecoderConfig) -> Self {
        Self {
            decoder: Decoder::new(config),
            sequencer: ReportSequencer::new(),
            reports: Vec::new(),
            usb_ready: true,
            config,
        }
    }

    /// One main-loop iteration: emission gates sampling
    pub fn step(&mut self, switches: SwitchState) {
        if !self.sequencer.idle() {
            if self.usb_ready {
                if let Some(report) = self.sequencer.take_report() {
                    self.reports.push(report);
                }
            }
            // The tick for this iteration is lost either way
            return;
        }
        if let Some(key) = self.decoder.tick(switches) {
            self.sequencer.stage(key);
        }
    }

    /// Run `iterations` loop iterations with a fixed switch state
    pub fn run(&mut self, switches: SwitchState, iterations: u32) {
        for _ in 0..iterations {
            self.step(switches);
        }
    }

    /// Hold the dot button long enough for a dot, then release
    pub fn symbol_dot(&mut self) {
        self.run(SwitchState::DOT, 2);
        self.run(SwitchState::RELEASED, 1);
    }

    /// Hold the dot button past the dash threshold, then release
    pub fn symbol_dash(&mut self) {
        self.run(SwitchState::DOT, self.config.dot_dash_ticks as u32 + 5);
        self.run(SwitchState::RELEASED, 1);
    }

    /// Enter a whole symbol from its table encoding (dot = 0, dash = 1,
    /// first element in the most significant of `len` bits)
    pub fn symbol_from_pattern(&mut self, pattern: u8, len: u8) {
        for i in (0..len).rev() {
            if pattern >> i & 1 == 1 {
                self.symbol_dash();
            } else {
                self.symbol_dot();
            }
        }
    }

    /// Idle past the end-of-symbol gap so resolution fires
    pub fn finish_symbol(&mut self) {
        self.run(
            SwitchState::RELEASED,
            self.config.symbol_gap_ticks as u32 + 5,
        );
    }

    /// Hold the dash button for `ticks` observed ticks, then release
    pub fn numeral_hold(&mut self, ticks: u16) {
        self.run(SwitchState::DASH, ticks as u32);
        self.run(SwitchState::RELEASED, 1);
    }

    /// Idle until the sequencer and the key buffer are both drained
    /// (bounded, so a stuck pipeline fails the test instead of hanging)
    pub fn drain(&mut self) {
        for _ in 0..1000 {
            if self.sequencer.idle() && self.decoder.buffered_keys() == 0 {
                return;
            }
            self.step(SwitchState::RELEASED);
        }
        panic!("pipeline failed to drain");
    }

    /// Keycodes of the press reports emitted so far, in order
    pub fn pressed_keycodes(&self) -> Vec<u8> {
        self.reports
            .iter()
            .filter(|r| !r.is_release())
            .map(|r| r.keycode)
            .collect()
    }
}
