//! Timing constants shared by the board configuration and the control loop.
//!
//! The thresholds are derived from the tick rates the firmware programs into
//! the two counters, so changing a rate here changes both sides together.

/// Tick rate of the seconds reference counter
pub const SECONDS_COUNTER_HZ: u32 = 32_000;

/// The seconds counter has rolled over one second when its high byte reaches this
pub const SECOND_ROLLOVER_HIGH_BYTE: u8 = (SECONDS_COUNTER_HZ / 256) as u8;

/// Tick rate of the debounce sample counter
pub const SAMPLE_COUNTER_HZ: u32 = 2_000;

/// The sample counter free-runs over this many ticks before wrapping to zero
pub const SAMPLE_COUNTER_PERIOD: u16 = 256;

/// Buttons are sampled while the sample counter is at or above this count,
/// which opens the gate for the last quarter of every ~128 ms period
pub const SAMPLE_GATE_THRESHOLD: u16 = 192;

const _: () = {
    assert!(SECONDS_COUNTER_HZ % 256 == 0, "one second must land on a whole high byte");
    assert!(SECONDS_COUNTER_HZ / 256 <= u8::MAX as u32, "one second must fit in the high byte");
    assert!(SECOND_ROLLOVER_HIGH_BYTE != 0);
    assert!(SAMPLE_GATE_THRESHOLD < SAMPLE_COUNTER_PERIOD, "the sample gate must open");
};
