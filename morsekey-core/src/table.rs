//! Fixed symbol code table.
//!
//! Each accumulated symbol is identified by its bit pattern (dot = 0,
//! dash = 1, first element in the most significant appended position) plus
//! the element count. The table is scanned linearly in declaration order and
//! the first exact `(pattern, len)` match wins; patterns are currently unique
//! so declaration order does not matter, but first-match remains the
//! documented policy.

use crate::keycodes::*;
use crate::types::KeyPress;

/// One immutable code table row
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct CodeEntry {
    /// Accumulated dot/dash bits
    pub pattern: u8,
    /// Number of elements in the symbol (1..=7)
    pub len: u8,
    /// HID usage ID emitted on match
    pub keycode: u8,
    /// HID modifier mask emitted on match
    pub modifiers: u8,
}

const fn entry(pattern: u8, len: u8, keycode: u8, modifiers: u8) -> CodeEntry {
    CodeEntry {
        pattern,
        len,
        keycode,
        modifiers,
    }
}

/// Symbol-to-keystroke mapping, fixed at build time.
pub const CODE_TABLE: [CodeEntry; 59] = [
    entry(0, 1, KEY_E, 0),                              // .
    entry(0, 2, KEY_I, 0),                              // ..
    entry(0, 3, KEY_S, 0),                              // ...
    entry(0, 4, KEY_H, 0),                              // ....
    entry(0, 5, KEY_5, 0),                              // .....
    entry(0, 6, KEY_ENTER, 0),                          // ......
    entry(1, 1, KEY_T, 0),                              // -
    entry(1, 2, KEY_A, 0),                              // .-
    entry(1, 3, KEY_U, 0),                              // ..-
    entry(1, 4, KEY_V, 0),                              // ...-
    entry(1, 5, KEY_4, 0),                              // ....-
    entry(1, 6, KEY_DELETE, MOD_LEFT_CTRL | MOD_LEFT_ALT), // .....-
    entry(2, 2, KEY_N, 0),                              // -.
    entry(2, 3, KEY_R, 0),                              // .-.
    entry(2, 4, KEY_F, 0),                              // ..-.
    entry(3, 2, KEY_M, 0),                              // --
    entry(3, 3, KEY_W, 0),                              // .--
    entry(3, 4, KEY_SPACE, 0),                          // ..--
    entry(3, 5, KEY_3, 0),                              // ...--
    entry(3, 6, KEY_7, MOD_LEFT_SHIFT),                 // ....--
    entry(4, 3, KEY_D, 0),                              // -..
    entry(4, 4, KEY_L, 0),                              // .-..
    entry(5, 3, KEY_K, 0),                              // -.-
    entry(5, 4, KEY_C, 0),                              // .-.-
    entry(6, 3, KEY_G, 0),                              // --.
    entry(6, 4, KEY_P, 0),                              // .--.
    entry(7, 3, KEY_O, 0),                              // ---
    entry(7, 4, KEY_J, 0),                              // .---
    entry(7, 5, KEY_2, 0),                              // ..---
    entry(8, 4, KEY_B, 0),                              // -...
    entry(8, 5, KEY_6, MOD_LEFT_SHIFT),                 // .-...
    entry(9, 4, KEY_X, 0),                              // -..-
    entry(9, 7, KEY_4, MOD_LEFT_SHIFT),                 // ...-..-
    entry(10, 4, KEY_C, 0),                             // -.-.
    entry(11, 4, KEY_Y, 0),                             // -.--
    entry(12, 4, KEY_Z, 0),                             // --..
    entry(12, 6, KEY_MINUS, MOD_LEFT_SHIFT),            // ..--..
    entry(13, 4, KEY_Q, 0),                             // --.-
    entry(13, 6, KEY_SLASH, MOD_LEFT_SHIFT),            // ..--.-
    entry(14, 4, KEY_J, 0),                             // ---.
    entry(15, 5, KEY_1, 0),                             // .----
    entry(16, 5, KEY_6, 0),                             // -....
    entry(17, 5, KEY_0, MOD_LEFT_SHIFT),                // -...-
    entry(18, 5, KEY_7, MOD_LEFT_SHIFT),                // -..-.
    entry(18, 6, KEY_2, MOD_LEFT_SHIFT),                // .-..-.
    entry(20, 5, KEY_SEMICOLON, 0),                     // -.-..
    entry(21, 6, KEY_PERIOD, 0),                        // .-.-.-
    entry(22, 5, KEY_8, MOD_LEFT_SHIFT),                // -.--.
    entry(24, 5, KEY_7, 0),                             // --...
    entry(26, 6, KEY_2, MOD_RIGHT_ALT),                 // .--.-.
    entry(28, 5, KEY_8, 0),                             // ---..
    entry(30, 5, KEY_9, 0),                             // ----.
    entry(30, 6, KEY_MINUS, 0),                         // .----.
    entry(33, 6, KEY_SLASH, 0),                         // -....-
    entry(42, 6, KEY_COMMA, MOD_LEFT_SHIFT),            // -.-.-.
    entry(43, 6, KEY_1, MOD_LEFT_SHIFT),                // -.-.--
    entry(45, 6, KEY_9, MOD_LEFT_SHIFT),                // -.--.-
    entry(51, 6, KEY_COMMA, 0),                         // --..--
    entry(120, 7, KEY_PERIOD, 0),                       // ----...
];

/// Linear scan for an exact `(pattern, len)` match; first match wins.
pub fn resolve(pattern: u8, len: u8) -> Option<KeyPress> {
    CODE_TABLE
        .iter()
        .find(|e| e.pattern == pattern && e.len == len)
        .map(|e| KeyPress {
            modifiers: e.modifiers,
            keycode: e.keycode,
        })
}
