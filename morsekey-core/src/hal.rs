//! Hardware abstraction boundary.
//!
//! The decoder core never touches hardware: switches, the tick timer, the
//! USB transport and the calibration byte store are all behind traits so the
//! whole pipeline runs against scripted inputs on the host.

use embedded_hal::digital::InputPin;

use crate::hid::SetupPacket;
use crate::types::{Report, SwitchState};

/// Error types for HAL operations
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HalError {
    /// GPIO operation failed
    GpioError,
    /// Transport could not accept the report
    UsbBusy,
    /// Calibration byte could not be read or written
    StorageError,
}

#[cfg(feature = "std")]
impl core::fmt::Display for HalError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            HalError::GpioError => write!(f, "GPIO operation failed"),
            HalError::UsbBusy => write!(f, "USB transport busy"),
            HalError::StorageError => write!(f, "calibration store failed"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for HalError {}

/// The two active-low momentary switches, sampled once per tick.
///
/// No debouncing beyond the tick-rate sampling granularity.
pub trait InputSwitches {
    type Error: From<HalError>;

    /// Read both switches; `true` means held down
    fn sample(&mut self) -> Result<SwitchState, Self::Error>;
}

/// Periodic tick source backed by a sticky hardware overflow flag.
pub trait TickSource {
    /// Poll the pending-overflow flag, clearing it on observation.
    ///
    /// Returns true at most once per timer period; if the caller is delayed
    /// past a period the intervening ticks are lost, not queued.
    fn poll(&mut self) -> bool;
}

/// Interrupt-driven USB HID transport, polled from the main loop
pub trait HidTransport {
    type Error: From<HalError>;

    /// Service the transport; returns a pending SETUP packet if one arrived
    fn poll(&mut self) -> Option<SetupPacket>;

    /// True once after each USB bus reset (the calibration trigger)
    fn take_reset(&mut self) -> bool;

    /// True when the interrupt endpoint can accept another report
    fn ready(&self) -> bool;

    /// Push one input report to the interrupt endpoint
    fn write_report(&mut self, report: Report) -> Result<(), Self::Error>;

    /// Answer the data stage of a control IN transfer
    fn control_reply(&mut self, data: &[u8]) -> Result<(), Self::Error>;
}

/// One-byte non-volatile calibration store
pub trait CalibrationStore {
    type Error: From<HalError>;

    /// Read the calibration byte (0xFF when never written)
    fn load(&mut self) -> Result<u8, Self::Error>;

    /// Persist the calibration byte
    fn store(&mut self, value: u8) -> Result<(), Self::Error>;
}

/// Adapter for a pair of embedded-hal input pins with pull-ups enabled
/// (pressed reads low).
pub struct PulledUpSwitches<D, H> {
    dot_pin: D,
    dash_pin: H,
}

impl<D, H> PulledUpSwitches<D, H>
where
    D: InputPin,
    H: InputPin,
{
    pub fn new(dot_pin: D, dash_pin: H) -> Self {
        Self { dot_pin, dash_pin }
    }
}

impl<D, H> InputSwitches for PulledUpSwitches<D, H>
where
    D: InputPin,
    H: InputPin,
{
    type Error = HalError;

    fn sample(&mut self) -> Result<SwitchState, Self::Error> {
        let dot = self.dot_pin.is_low().map_err(|_| HalError::GpioError)?;
        let dash = self.dash_pin.is_low().map_err(|_| HalError::GpioError)?;
        Ok(SwitchState { dot, dash })
    }
}

#[cfg(any(test, feature = "test-utils"))]
pub mod mock {
    //! Mock implementations for testing

    use super::*;

    /// Switch pair with directly settable state
    #[derive(Default)]
    pub struct MockSwitches {
        pub state: SwitchState,
    }

    impl MockSwitches {
        pub fn new() -> Self {
            Self::default()
        }
    }

    impl InputSwitches for MockSwitches {
        type Error = HalError;

        fn sample(&mut self) -> Result<SwitchState, Self::Error> {
            Ok(self.state)
        }
    }

    /// Sticky-flag tick source armed from the test body
    #[derive(Default)]
    pub struct MockTicker {
        pending: bool,
    }

    impl MockTicker {
        pub fn new() -> Self {
            Self::default()
        }

        /// Arm the overflow flag, as the hardware timer would
        pub fn arm(&mut self) {
            self.pending = true;
        }
    }

    impl TickSource for MockTicker {
        fn poll(&mut self) -> bool {
            core::mem::take(&mut self.pending)
        }
    }

    /// In-memory calibration byte
    pub struct MockCalStore {
        pub byte: u8,
    }

    impl MockCalStore {
        pub fn new() -> Self {
            Self {
                byte: crate::calibration::UNCALIBRATED,
            }
        }
    }

    impl CalibrationStore for MockCalStore {
        type Error = HalError;

        fn load(&mut self) -> Result<u8, Self::Error> {
            Ok(self.byte)
        }

        fn store(&mut self, value: u8) -> Result<(), Self::Error> {
            self.byte = value;
            Ok(())
        }
    }
}
