//! Two-phase keystroke emission.
//!
//! A host-visible keystroke is a report carrying the keycode followed by an
//! empty report; skipping the release would fuse repeated characters. The
//! sequencer owes two reports per staged key and hands them out one per
//! transmit opportunity.

use crate::types::{KeyPress, Report};

/// Press/release report sequencer.
///
/// The owed counter is 2 while the press report is pending, 1 while the
/// release report is pending, and 0 when idle. It can only step 2 -> 1 -> 0;
/// no key is ever reported without its following release.
pub struct ReportSequencer {
    owed: u8,
    staged: KeyPress,
}

impl ReportSequencer {
    pub const fn new() -> Self {
        Self {
            owed: 0,
            staged: KeyPress::NONE,
        }
    }

    /// True when no report is owed and tick processing may run
    pub fn idle(&self) -> bool {
        self.owed == 0
    }

    /// Stage a keystroke; the next two reports are its press and release
    pub fn stage(&mut self, key: KeyPress) {
        self.staged = key;
        self.owed = 2;
    }

    /// The report a GET_REPORT control request would see right now
    pub fn report(&self) -> Report {
        Report {
            modifiers: self.staged.modifiers,
            keycode: self.staged.keycode,
        }
    }

    /// Take the next owed report for transmission, if any.
    ///
    /// The staged key is cleared after every send, so the report following a
    /// press is always the all-zero release report.
    pub fn take_report(&mut self) -> Option<Report> {
        if self.owed == 0 {
            return None;
        }
        let out = self.report();
        self.owed -= 1;
        self.staged = KeyPress::NONE;
        Some(out)
    }
}

impl Default for ReportSequencer {
    fn default() -> Self {
        Self::new()
    }
}
