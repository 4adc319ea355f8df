#![no_std]

//! Firmware library: the main keyboard loop plus a mock board for running
//! the pipeline without target hardware.

pub use embassy_executor::Spawner;
pub use static_cell::StaticCell;

pub use morsekey_core::*;

pub use crate::mock_board::*;
pub use crate::tasks::*;

// Mock board module
pub mod mock_board {
    use heapless::Vec;
    use morsekey_core::calibration::FrequencyProbe;
    use morsekey_core::hal::{CalibrationStore, HalError, HidTransport, InputSwitches, TickSource};
    use morsekey_core::hid::SetupPacket;
    use morsekey_core::types::{Report, SwitchState};

    /// Switch pair with directly settable state
    #[derive(Debug, Default)]
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

    /// Sticky overflow flag armed from test code
    #[derive(Debug, Default)]
    pub struct MockTimer {
        pending: bool,
    }

    impl MockTimer {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn arm(&mut self) {
            self.pending = true;
        }
    }

    impl TickSource for MockTimer {
        fn poll(&mut self) -> bool {
            core::mem::take(&mut self.pending)
        }
    }

    /// Transport double capturing everything pushed to the host
    #[derive(Debug)]
    pub struct MockUsb {
        pub ready: bool,
        pub pending_setup: Option<SetupPacket>,
        pub reset_pending: bool,
        /// Reports pushed to the interrupt endpoint, oldest first
        pub sent: Vec<Report, 16>,
        /// Last control IN payload
        pub control_data: Vec<u8, 8>,
    }

    impl MockUsb {
        pub fn new() -> Self {
            Self {
                ready: true,
                pending_setup: None,
                reset_pending: false,
                sent: Vec::new(),
                control_data: Vec::new(),
            }
        }
    }

    impl HidTransport for MockUsb {
        type Error = HalError;

        fn poll(&mut self) -> Option<SetupPacket> {
            self.pending_setup.take()
        }

        fn take_reset(&mut self) -> bool {
            core::mem::take(&mut self.reset_pending)
        }

        fn ready(&self) -> bool {
            self.ready
        }

        fn write_report(&mut self, report: Report) -> Result<(), Self::Error> {
            self.sent.push(report).map_err(|_| HalError::UsbBusy)
        }

        fn control_reply(&mut self, data: &[u8]) -> Result<(), Self::Error> {
            self.control_data.clear();
            self.control_data
                .extend_from_slice(data)
                .map_err(|_| HalError::UsbBusy)
        }
    }

    /// In-memory calibration byte
    #[derive(Debug)]
    pub struct MockEeprom {
        pub byte: u8,
    }

    impl MockEeprom {
        pub fn new() -> Self {
            Self {
                byte: morsekey_core::calibration::UNCALIBRATED,
            }
        }
    }

    impl CalibrationStore for MockEeprom {
        type Error = HalError;

        fn load(&mut self) -> Result<u8, Self::Error> {
            Ok(self.byte)
        }

        fn store(&mut self, value: u8) -> Result<(), Self::Error> {
            self.byte = value;
            Ok(())
        }
    }

    /// Oscillator whose measured frame length tracks the trim linearly
    #[derive(Debug)]
    pub struct MockOscillator {
        pub trim: u8,
    }

    impl MockOscillator {
        pub fn new() -> Self {
            Self { trim: 0 }
        }
    }

    impl FrequencyProbe for MockOscillator {
        fn set_trim(&mut self, trim: u8) {
            self.trim = trim;
        }

        fn measure(&mut self) -> u16 {
            // 10 units per trim step keeps the frame target mid-range
            self.trim as u16 * 10
        }
    }

    /// Mock board collection
    #[derive(Debug)]
    pub struct MockBoard {
        pub switches: MockSwitches,
        pub timer: MockTimer,
        pub usb: MockUsb,
        pub eeprom: MockEeprom,
        pub oscillator: MockOscillator,
    }

    impl MockBoard {
        pub fn new() -> Self {
            #[cfg(feature = "defmt")]
            defmt::info!("🧪 Using mock board (for testing)");
            Self {
                switches: MockSwitches::new(),
                timer: MockTimer::new(),
                usb: MockUsb::new(),
                eeprom: MockEeprom::new(),
                oscillator: MockOscillator::new(),
            }
        }
    }
}

// Main-loop tasks module
pub mod tasks {
    use embassy_time::{Duration, Timer};
    use morsekey_core::calibration::{calibrate, FrequencyProbe, UNCALIBRATED};
    use morsekey_core::hal::{CalibrationStore, HidTransport, InputSwitches, TickSource};
    use morsekey_core::hid::ControlReply;
    use morsekey_core::{Decoder, DecoderConfig, HidControl, ReportSequencer};

    /// Frame-length target for the oscillator search: the 16.5 MHz core
    /// clock counted against the host's 1 ms frame
    pub const FRAME_LENGTH_TARGET: u16 = 2356;

    /// Transport poll pacing; tick timing comes from the hardware timer
    const POLL_INTERVAL: Duration = Duration::from_micros(500);

    /// The whole device: poll the transport, answer control requests, run
    /// oscillator calibration after the first reset when the stored byte is
    /// the uncalibrated sentinel, then either emit an owed report or process
    /// one tick. Emission gates sampling; a lost tick is accepted.
    pub async fn keyboard_loop<S, T, U, C, P>(
        switches: &mut S,
        ticker: &mut T,
        usb: &mut U,
        cal_store: &mut C,
        oscillator: &mut P,
        config: DecoderConfig,
    ) where
        S: InputSwitches,
        T: TickSource,
        U: HidTransport,
        C: CalibrationStore,
        P: FrequencyProbe,
    {
        let mut decoder = Decoder::new(config);
        let mut sequencer = ReportSequencer::new();
        let mut hid = HidControl::new();

        let stored = cal_store.load().unwrap_or(UNCALIBRATED);
        let mut needs_calibration = stored == UNCALIBRATED;
        if !needs_calibration {
            oscillator.set_trim(stored);
        }

        loop {
            if let Some(setup) = usb.poll() {
                match hid.handle(&setup, sequencer.report()) {
                    ControlReply::Report(report) => {
                        usb.control_reply(&report.bytes()).ok();
                    }
                    ControlReply::IdleRate(rate) => {
                        usb.control_reply(&[rate]).ok();
                    }
                    ControlReply::None => {}
                }
            }

            if usb.take_reset() && needs_calibration {
                let trim = calibrate(oscillator, FRAME_LENGTH_TARGET);
                if cal_store.store(trim).is_ok() {
                    needs_calibration = false;
                }
                #[cfg(feature = "defmt")]
                defmt::info!("🎛️ Oscillator calibrated, trim {}", trim);
            }

            if !sequencer.idle() {
                // No tick processing while a report is owed
                if usb.ready() {
                    if let Some(report) = sequencer.take_report() {
                        usb.write_report(report).ok();
                    }
                }
            } else if ticker.poll() {
                if let Ok(state) = switches.sample() {
                    if let Some(key) = decoder.tick(state) {
                        #[cfg(feature = "defmt")]
                        defmt::debug!(
                            "⌨️ Key staged: mod {=u8:x} code {=u8:x}",
                            key.modifiers,
                            key.keycode
                        );
                        sequencer.stage(key);
                    }
                }
            }

            Timer::after(POLL_INTERVAL).await;
        }
    }

    /// Keyboard task bound to the mock board
    #[embassy_executor::task]
    pub async fn keyboard_task(
        board: &'static mut crate::mock_board::MockBoard,
        config: DecoderConfig,
    ) {
        #[cfg(feature = "defmt")]
        defmt::info!("⌨️ Keyboard task started");
        keyboard_loop(
            &mut board.switches,
            &mut board.timer,
            &mut board.usb,
            &mut board.eeprom,
            &mut board.oscillator,
            config,
        )
        .await
    }
}
