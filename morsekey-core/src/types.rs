//! Core data types for the Morse input decoder

/// Switch sample for one tick, already corrected for the active-low pins
/// (`true` = switch held down).
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub struct SwitchState {
    /// Dot button: short/long holds accumulate Morse symbols
    pub dot: bool,
    /// Dash button: hold duration is typed back as a digit sequence
    pub dash: bool,
}

impl SwitchState {
    /// Both switches released
    pub const RELEASED: SwitchState = SwitchState { dot: false, dash: false };
    /// Dot button held
    pub const DOT: SwitchState = SwitchState { dot: true, dash: false };
    /// Dash button held
    pub const DASH: SwitchState = SwitchState { dot: false, dash: true };

    /// Classify the sample. The dot button wins if both are held, matching
    /// the read-out order of the original device.
    pub const fn command(&self) -> Command {
        if self.dot {
            Command::DotHeld
        } else if self.dash {
            Command::DashHeld
        } else {
            Command::Idle
        }
    }
}

/// Tri-state command derived from the switch sample each tick
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// No switch held
    Idle,
    /// Dot button held
    DotHeld,
    /// Dash button held
    DashHeld,
}

impl Command {
    /// Returns true while any switch is held
    pub const fn is_held(&self) -> bool {
        !matches!(self, Command::Idle)
    }
}

/// A resolved keystroke: one HID usage ID plus a modifier mask
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyPress {
    /// HID modifier byte (bit0 = LeftCtrl .. bit7 = RightGUI)
    pub modifiers: u8,
    /// HID keyboard usage ID (0 = no key)
    pub keycode: u8,
}

impl KeyPress {
    /// No key pressed
    pub const NONE: KeyPress = KeyPress {
        modifiers: 0,
        keycode: 0,
    };

    /// Unmodified keystroke
    pub const fn key(keycode: u8) -> Self {
        Self {
            modifiers: 0,
            keycode,
        }
    }
}

/// The 2-byte HID input report: `[modifier mask, keycode]`
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Report {
    pub modifiers: u8,
    pub keycode: u8,
}

impl Report {
    /// The all-zero release report ("no key pressed")
    pub const RELEASE: Report = Report {
        modifiers: 0,
        keycode: 0,
    };

    /// Wire representation pushed to the interrupt endpoint
    pub const fn bytes(&self) -> [u8; 2] {
        [self.modifiers, self.keycode]
    }

    /// Returns true for the empty release report
    pub const fn is_release(&self) -> bool {
        self.modifiers == 0 && self.keycode == 0
    }
}

impl From<KeyPress> for Report {
    fn from(key: KeyPress) -> Self {
        Report {
            modifiers: key.modifiers,
            keycode: key.keycode,
        }
    }
}

/// Decoder timing thresholds, measured in observed ticks (~63 Hz nominal)
#[derive(Copy, Clone, Debug)]
pub struct DecoderConfig {
    /// Holds longer than this count as a dash, otherwise a dot
    pub dot_dash_ticks: u16,
    /// Idle ticks after which an accumulated symbol is resolved
    pub symbol_gap_ticks: u16,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        crate::default_config()
    }
}

impl DecoderConfig {
    /// Create a new configuration with validation
    pub fn new(dot_dash_ticks: u16, symbol_gap_ticks: u16) -> Result<Self, &'static str> {
        if dot_dash_ticks == 0 {
            return Err("dot/dash threshold must be at least 1 tick");
        }
        if symbol_gap_ticks <= dot_dash_ticks {
            return Err("end-of-symbol gap must exceed the dot/dash threshold");
        }
        Ok(Self {
            dot_dash_ticks,
            symbol_gap_ticks,
        })
    }
}
