#![cfg_attr(not(feature = "std"), no_std)]

//! # Morsekey Core
//!
//! Decoder core for a Morse-input USB keyboard.
//! Samples two switches on a periodic tick, classifies hold durations into
//! dot/dash symbols or numeric entries, resolves symbols against a fixed code
//! table and sequences two-phase (press, release) HID keyboard reports.

pub mod calibration;
pub mod decoder;
pub mod hal;
pub mod hid;
pub mod keycodes;
pub mod sequencer;
pub mod table;
pub mod types;

#[cfg(feature = "test-utils")]
pub mod test_utils;

pub use calibration::*;
pub use decoder::*;
pub use hid::*;
pub use sequencer::*;
pub use table::{resolve, CodeEntry, CODE_TABLE};
pub use types::*;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default configuration for the original ~63 Hz tick rate
pub fn default_config() -> DecoderConfig {
    DecoderConfig {
        dot_dash_ticks: 10,  // ~160 ms
        symbol_gap_ticks: 45, // ~715 ms
    }
}
