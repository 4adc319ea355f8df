//! RC oscillator trim search.
//!
//! The device derives its clock from an RC oscillator whose 8-bit trim
//! register must be tuned against the host's frame timing. Immediately after
//! a USB reset the driver can measure the frame length, a quantity
//! proportional to the current clock frequency; a binary search over the trim
//! register followed by a +/-1 neighborhood search picks the value whose
//! measurement lands closest to the target. Non-convergence is not detected,
//! the nearest candidate is always accepted.

/// Value of the calibration byte when no trim has ever been stored
pub const UNCALIBRATED: u8 = 0xff;

/// Oscillator trim access plus a frequency-proportional measurement
pub trait FrequencyProbe {
    /// Apply a trial trim value
    fn set_trim(&mut self, trim: u8);
    /// Measure a quantity proportional to the current clock frequency
    fn measure(&mut self) -> u16;
}

/// Search for the trim whose measurement is nearest `target` and leave it
/// applied. Returns the chosen trim for storage in the calibration byte.
pub fn calibrate<P: FrequencyProbe>(probe: &mut P, target: u16) -> u8 {
    let mut step: u8 = 128;
    let mut trial: u8 = 0;

    while step > 0 {
        probe.set_trim(trial.wrapping_add(step));
        if probe.measure() < target {
            // Frequency still too low
            trial = trial.wrapping_add(step);
        }
        step >>= 1;
    }

    // The binary search lands within +/-1 of the optimum; refine by
    // neighborhood search on absolute deviation
    let mut best = trial;
    let mut best_dev = u16::MAX;
    for candidate in trial.saturating_sub(1)..=trial.saturating_add(1) {
        probe.set_trim(candidate);
        let dev = probe.measure().abs_diff(target);
        if dev < best_dev {
            best_dev = dev;
            best = candidate;
        }
    }

    probe.set_trim(best);
    best
}
