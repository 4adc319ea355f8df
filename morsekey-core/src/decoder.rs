//! Tick-driven input decoder.
//!
//! All decoder state lives in one [`Decoder`] owned by the main loop; a
//! single [`Decoder::tick`] call per observed timer tick is the only writer.
//! Hold/release edges of the dot button accumulate Morse symbols, the dash
//! button stages its hold duration as a digit sequence, and prolonged idle
//! resolves the accumulated symbol against the code table.

use heapless::Vec;

use crate::keycodes;
use crate::table;
use crate::types::{Command, DecoderConfig, KeyPress, SwitchState};

/// Slots in the pending-key LIFO. Numeral staging pushes exactly four keys
/// (Enter plus three digits), so the buffer can never overflow by
/// construction.
pub const KEY_BUFFER_CAPACITY: usize = 5;

/// Morse timing decoder state machine
pub struct Decoder {
    config: DecoderConfig,
    /// Ticks observed since the current timing window started
    ticks: u16,
    /// Accumulated symbol bits, dot = 0, dash = 1, oldest element highest
    pattern: u8,
    /// Elements accumulated since the last resolution
    pattern_len: u8,
    last_command: Command,
    /// Pending keycodes staged by a numeral entry, drained LIFO
    buffer: Vec<u8, KEY_BUFFER_CAPACITY>,
}

impl Decoder {
    /// Create a decoder with the given timing thresholds
    pub fn new(config: DecoderConfig) -> Self {
        Self {
            config,
            ticks: 0,
            pattern: 0,
            pattern_len: 0,
            last_command: Command::Idle,
            buffer: Vec::new(),
        }
    }

    /// Process one observed tick of switch state.
    ///
    /// Returns a keystroke when one becomes due, either from an idle-timeout
    /// symbol resolution or from draining a staged numeral key. The caller
    /// must not invoke this while a report is still owed to the host; the
    /// emission sequencer gates sampling and lost ticks are accepted.
    pub fn tick(&mut self, switches: SwitchState) -> Option<KeyPress> {
        let command = switches.command();
        let staged = match (self.last_command, command) {
            (Command::DotHeld, Command::Idle) => {
                self.complete_symbol();
                None
            }
            (Command::DashHeld, Command::Idle) => {
                self.stage_numerals();
                None
            }
            (Command::Idle, Command::Idle) => self.idle_step(),
            // Start of a hold opens a fresh timing window
            (Command::Idle, _) => {
                self.ticks = 0;
                None
            }
            // Held state continuing, or flipping without an idle gap in
            // between; neither carries a side effect
            _ => None,
        };
        self.ticks = self.ticks.saturating_add(1);
        self.last_command = command;
        staged
    }

    /// Dot button released: classify the hold as dot or dash and append it
    fn complete_symbol(&mut self) {
        let dash = self.ticks > self.config.dot_dash_ticks;
        self.pattern = (self.pattern << 1) | dash as u8;
        self.pattern_len = self.pattern_len.wrapping_add(1);
        self.ticks = 0;
    }

    /// Dash button released: type the hold duration back as up to three
    /// digits followed by Enter. Push order is Enter, ones, tens, hundreds;
    /// the LIFO drain therefore types the most significant digit first and
    /// Enter last.
    fn stage_numerals(&mut self) {
        let held = self.ticks;
        self.buffer.clear();
        let _ = self.buffer.push(keycodes::KEY_ENTER);
        let _ = self.buffer.push(keycodes::digit((held % 10) as u8));
        let _ = self.buffer.push(keycodes::digit((held / 10 % 10) as u8));
        let _ = self.buffer.push(keycodes::digit((held / 100 % 10) as u8));
        self.ticks = 0;
    }

    /// Repeated idle: resolve the accumulated symbol after the end-of-symbol
    /// gap, or drain one staged numeral key per tick while nothing has been
    /// entered.
    fn idle_step(&mut self) -> Option<KeyPress> {
        if self.pattern_len == 0 {
            // Nothing entered: hold the window at zero so no timeout fires,
            // and pace the buffer drain at one key per idle tick
            self.ticks = 0;
            return self.buffer.pop().map(KeyPress::key);
        }
        if self.ticks > self.config.symbol_gap_ticks {
            let hit = table::resolve(self.pattern, self.pattern_len);
            // Unmatched symbols are dropped silently; state resets either way
            self.pattern = 0;
            self.pattern_len = 0;
            self.ticks = 0;
            return hit;
        }
        None
    }

    /// Accumulated symbol bits
    pub fn pattern(&self) -> u8 {
        self.pattern
    }

    /// Elements accumulated since the last resolution
    pub fn pattern_len(&self) -> u8 {
        self.pattern_len
    }

    /// Numeral keys still waiting to be drained
    pub fn buffered_keys(&self) -> usize {
        self.buffer.len()
    }

    /// Reset all decoder state, as after a watchdog-forced restart
    pub fn reset(&mut self) {
        self.ticks = 0;
        self.pattern = 0;
        self.pattern_len = 0;
        self.last_command = Command::Idle;
        self.buffer.clear();
    }
}
