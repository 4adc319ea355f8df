//! HID keyboard usage IDs and modifier bits used by the code table.
//!
//! Usage IDs follow the HID Usage Tables "Keyboard/Keypad" page. Only the
//! subset reachable from the code table and the numeral stager is defined.

pub const KEY_NONE: u8 = 0x00;

pub const KEY_A: u8 = 0x04;
pub const KEY_B: u8 = 0x05;
pub const KEY_C: u8 = 0x06;
pub const KEY_D: u8 = 0x07;
pub const KEY_E: u8 = 0x08;
pub const KEY_F: u8 = 0x09;
pub const KEY_G: u8 = 0x0a;
pub const KEY_H: u8 = 0x0b;
pub const KEY_I: u8 = 0x0c;
pub const KEY_J: u8 = 0x0d;
pub const KEY_K: u8 = 0x0e;
pub const KEY_L: u8 = 0x0f;
pub const KEY_M: u8 = 0x10;
pub const KEY_N: u8 = 0x11;
pub const KEY_O: u8 = 0x12;
pub const KEY_P: u8 = 0x13;
pub const KEY_Q: u8 = 0x14;
pub const KEY_R: u8 = 0x15;
pub const KEY_S: u8 = 0x16;
pub const KEY_T: u8 = 0x17;
pub const KEY_U: u8 = 0x18;
pub const KEY_V: u8 = 0x19;
pub const KEY_W: u8 = 0x1a;
pub const KEY_X: u8 = 0x1b;
pub const KEY_Y: u8 = 0x1c;
pub const KEY_Z: u8 = 0x1d;

pub const KEY_1: u8 = 0x1e;
pub const KEY_2: u8 = 0x1f;
pub const KEY_3: u8 = 0x20;
pub const KEY_4: u8 = 0x21;
pub const KEY_5: u8 = 0x22;
pub const KEY_6: u8 = 0x23;
pub const KEY_7: u8 = 0x24;
pub const KEY_8: u8 = 0x25;
pub const KEY_9: u8 = 0x26;
pub const KEY_0: u8 = 0x27;

pub const KEY_ENTER: u8 = 0x28;
pub const KEY_SPACE: u8 = 0x2c;
pub const KEY_MINUS: u8 = 0x2d;
pub const KEY_SEMICOLON: u8 = 0x33;
pub const KEY_COMMA: u8 = 0x36;
pub const KEY_PERIOD: u8 = 0x37;
pub const KEY_SLASH: u8 = 0x38;
pub const KEY_DELETE: u8 = 0x4c;

/// Modifier byte bits
pub const MOD_LEFT_CTRL: u8 = 0x01;
pub const MOD_LEFT_SHIFT: u8 = 0x02;
pub const MOD_LEFT_ALT: u8 = 0x04;
pub const MOD_RIGHT_ALT: u8 = 0x40;

/// Usage ID for a decimal digit. `1`..`9` follow `Z` in the usage table,
/// `0` comes after `9`.
pub const fn digit(n: u8) -> u8 {
    if n == 0 {
        KEY_0
    } else {
        KEY_Z + n
    }
}
