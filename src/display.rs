//! Multiplexed driver for the three two-digit LED banks.
//!
//! Each bank has one LED per digit value, wired through a 16 bit shift
//! register: bits 0 to 9 light the ones digit, bits 10 to 15 light tens
//! digits 1 to 6. A bank with a zero tens digit shows only its ones LED.
//! All banks share the register outputs and are told apart by their
//! active-low cathode enables, so only one bank may be enabled at a time.

use shift_register_hal::ShiftRegister;
use switch_hal::OutputSwitch;
use embedded_hal::digital::v2::OutputPin;

use crate::clock::{Clock, Quantity};

/// Width of the segment shift register chain
pub const PATTERN_BITS: u8 = 16;

/// Bit of the tens LED for tens digit `d` is `TENS_OFFSET + d`
const TENS_OFFSET: u8 = 9;

/// Encodes a two digit number as a one-hot pattern per digit place
pub const fn encode(value: u8) -> u16 {
    let ones = value % 10;
    let tens = value / 10;

    let mut pattern = 1 << ones;
    if tens != 0 {
        pattern |= 1 << (TENS_OFFSET + tens);
    }

    pattern
}

/// Recovers the number shown by a pattern, or None if the pattern could not
/// have come from [encode]
pub fn decode(pattern: u16) -> Option<u8> {
    let ones = pattern & 0x03ff;
    let tens = pattern & !0x03ff;

    if ones.count_ones() != 1 || tens.count_ones() > 1 {
        return None;
    }

    let tens_digit = if tens == 0 {
        0
    } else {
        tens.trailing_zeros() as u8 - TENS_OFFSET
    };

    Some(tens_digit * 10 + ones.trailing_zeros() as u8)
}

/// Cycles the banks seconds, minutes, hours, one bank per [DisplayDriver::step].
pub struct DisplayDriver<TOutputPin, TBank> {
    register: ShiftRegister<PATTERN_BITS, TOutputPin>,

    /// Cathode enables indexed by [Quantity::index]
    banks: [TBank; 3],

    /// The quantity shown by the currently enabled bank
    cursor: Quantity,
}

impl<TOutputPin, TBank> DisplayDriver<TOutputPin, TBank>
where
    TOutputPin: OutputPin,
    TBank: OutputSwitch,
{
    /// Creates a driver with every bank disabled. The first step shows seconds.
    pub fn new(
        register: ShiftRegister<PATTERN_BITS, TOutputPin>,
        seconds_bank: TBank,
        minutes_bank: TBank,
        hours_bank: TBank,
    ) -> Self {
        let mut banks = [seconds_bank, minutes_bank, hours_bank];
        for bank in banks.iter_mut() {
            bank.off().ok();
        }

        Self {
            register,
            banks,
            cursor: Quantity::Hours,
        }
    }

    /// The quantity rendered by the last step
    pub fn cursor(&self) -> Quantity {
        self.cursor
    }

    /// The pattern currently latched on the shift register outputs
    pub fn latched_pattern(&self) -> u16 {
        self.register.get_value() as u16
    }

    /// Shows the next quantity. The new pattern is strobed onto the outputs
    /// before the banks are switched, so a bank never lights with another
    /// bank's digits.
    pub fn step(&mut self, clock: &Clock) {
        let previous = self.cursor;
        let next = previous.next();

        self.register.shift_out(encode(clock.get(next)) as u32);

        self.banks[previous.index()].off().ok();
        self.banks[next.index()].on().ok();

        self.cursor = next;
    }

    /// Releases the shift register and the bank enables as (seconds, minutes, hours)
    pub fn release(self) -> (ShiftRegister<PATTERN_BITS, TOutputPin>, (TBank, TBank, TBank)) {
        let [seconds, minutes, hours] = self.banks;
        (self.register, (seconds, minutes, hours))
    }
}
