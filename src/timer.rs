//! Polled views of the two hardware counters.
//!
//! Neither counter raises an interrupt. The control loop reads them on every
//! pass and compares against thresholds from [crate::config].

use crate::config::{SAMPLE_GATE_THRESHOLD, SECOND_ROLLOVER_HIGH_BYTE};

/// A free-running hardware counter that can be read at any time
pub trait FreeRunningCounter {
    /// The current count. Counters narrower than 16 bits report their full width.
    fn current_count(&self) -> u16;
}

/// A free-running counter that can also be cleared back to zero
pub trait ResettableCounter: FreeRunningCounter {
    /// Clears the count to zero. Counting continues from there.
    fn reset(&mut self);
}

/// Detects one elapsed second on the seconds reference counter.
///
/// The counter is compared on its high byte so a loop pass that lands a few
/// ticks past the exact second still sees it. The counter is cleared as soon
/// as the second is seen, so each crossing is reported exactly once.
pub struct SecondsReference<TCounter> {
    counter: TCounter,
}

impl<TCounter: ResettableCounter> SecondsReference<TCounter> {
    /// Takes the counter and clears it so the first second is a whole second
    pub fn new(mut counter: TCounter) -> Self {
        counter.reset();
        Self { counter }
    }

    /// Returns true, and restarts the counter, if a second has elapsed
    pub fn poll(&mut self) -> bool {
        let high_byte = (self.counter.current_count() >> 8) as u8;

        if high_byte == SECOND_ROLLOVER_HIGH_BYTE {
            self.counter.reset();
            true
        } else {
            false
        }
    }

    /// Releases the counter
    pub fn release(self) -> TCounter {
        self.counter
    }
}

/// Opens while the debounce sample counter is at or past its threshold.
pub struct SampleGate<TCounter> {
    counter: TCounter,
}

impl<TCounter: FreeRunningCounter> SampleGate<TCounter> {
    /// Wraps the sample counter. The counter is never written.
    pub fn new(counter: TCounter) -> Self {
        Self { counter }
    }

    /// True if buttons should be sampled on this pass
    pub fn is_open(&self) -> bool {
        self.counter.current_count() >= SAMPLE_GATE_THRESHOLD
    }

    /// Releases the counter
    pub fn release(self) -> TCounter {
        self.counter
    }
}
