#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(warnings)]
#![no_std]

//! SHIFT REGISTER HAL
//!
//! This is a higher level abstraction of a serial to parallel
//! shift register with an output latch, such as 74HC595. Data is
//! clocked in most significant bit first and only presented on the
//! parallel outputs when the register is strobed, so the outputs never
//! show a partially shifted value. It supports shift register chaining
//! up to 32 bits.
//!
//! Built using [`embedded-hal`] traits
//!
//! [`embedded-hal`]: https://docs.rs/embedded-hal/0.2

use embedded_hal::digital::v2::OutputPin;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

/// An implementation of a serial-in, parallel-out shift register chain that is
/// `N` bits wide
#[cfg_attr(feature = "logging", derive(defmt::Format))]
pub struct ShiftRegister<const N: u8, TOutputPin> {
    /// The pin carrying the next serial bit
    data_pin: TOutputPin,

    /// The pin whose rising edge shifts the data pin into the register
    clock_pin: TOutputPin,

    /// The pin that transfers the register into the output latches
    strobe_pin: TOutputPin,

    /// The last value that was strobed onto the outputs
    latched_value: u32,
}

impl<const N: u8, TOutputPin> ShiftRegister<N, TOutputPin>
where
    TOutputPin: OutputPin,
{
    /// Creates a new instance of a shift register from the given pins.
    pub fn new(data_pin: TOutputPin, clock_pin: TOutputPin, strobe_pin: TOutputPin) -> Self {
        if N == 0 || N > 32 {
            panic!("Attempted to create a shift register with N outside 1..=32");
        }

        Self {
            data_pin,
            clock_pin,
            strobe_pin,
            latched_value: 0,
        }
    }

    /// Shifts the lowest `N` bits of `value` into the register, most significant
    /// bit first, and then strobes them onto the parallel outputs.
    ///
    /// The clock idles high. For every bit the data pin is set, then the clock
    /// is pulsed low and back high so the rising edge latches the bit. Once all
    /// bits are in, the strobe is pulsed high then low.
    pub fn shift_out(&mut self, value: u32) {
        self.clock_pin.set_high().ok();

        for bit in (0..N).rev() {
            if value & (0x1 << bit) != 0 {
                self.data_pin.set_high().ok();
            } else {
                self.data_pin.set_low().ok();
            }

            self.clock_pin.set_low().ok();
            self.clock_pin.set_high().ok();
        }

        self.strobe();

        self.latched_value = value & Self::mask();

        #[cfg(feature = "logging")]
        defmt::trace!("ShiftRegister latched {:b}", self.latched_value);
    }

    /// Gets the value currently presented on the outputs
    pub fn get_value(&self) -> u32 {
        self.latched_value
    }

    /// Releases the pins, in the order they were passed to [ShiftRegister::new]
    pub fn release(self) -> (TOutputPin, TOutputPin, TOutputPin) {
        (self.data_pin, self.clock_pin, self.strobe_pin)
    }

    fn strobe(&mut self) {
        self.strobe_pin.set_high().ok();
        self.strobe_pin.set_low().ok();
    }

    fn mask() -> u32 {
        0x1u32
            .checked_shl(N as u32)
            .map_or(u32::MAX, |bit| bit - 1)
    }
}
