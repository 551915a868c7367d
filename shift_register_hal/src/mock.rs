//! Mocked pins for testing code driving a ShiftRegister, or anything else
//! built on the embedded-hal digital traits. Output writes can be recorded
//! into a shared [Trace] so the exact order of pin changes can be checked.

use core::cell::{Cell, RefCell};
use core::convert::Infallible;

use embedded_hal::digital::v2::{InputPin, OutputPin, StatefulOutputPin};

/// The largest number of pin writes a [Trace] holds. Writes beyond this are dropped.
pub const TRACE_CAPACITY: usize = 512;

/// A single recorded pin write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinEvent {
    /// The identifier given to the pin when it was created
    pub pin: u8,
    /// True if the pin was set high
    pub is_high: bool,
}

impl PinEvent {
    /// Creates a new event
    pub const fn new(pin: u8, is_high: bool) -> Self {
        Self { pin, is_high }
    }
}

/// An ordered record of pin writes shared between several pins
pub type Trace = heapless::Vec<PinEvent, TRACE_CAPACITY>;

/// A pin whose level lives in a [Cell] owned by the test, so the test can
/// observe outputs and drive inputs while the code under test owns the pin.
pub struct MockPin<'a> {
    id: u8,
    level: &'a Cell<bool>,
    trace: Option<&'a RefCell<Trace>>,
}

impl<'a> MockPin<'a> {
    /// Creates a pin that only tracks its level
    pub fn new(id: u8, level: &'a Cell<bool>) -> Self {
        MockPin {
            id,
            level,
            trace: None,
        }
    }

    /// Creates a pin that also appends every write to `trace`
    pub fn recording(id: u8, level: &'a Cell<bool>, trace: &'a RefCell<Trace>) -> Self {
        MockPin {
            id,
            level,
            trace: Some(trace),
        }
    }

    fn write(&mut self, is_high: bool) {
        self.level.set(is_high);

        if let Some(trace) = self.trace {
            trace.borrow_mut().push(PinEvent::new(self.id, is_high)).ok();
        }
    }
}

impl InputPin for MockPin<'_> {
    type Error = Infallible;

    fn is_high(&self) -> Result<bool, Self::Error> {
        Ok(self.level.get())
    }

    fn is_low(&self) -> Result<bool, Self::Error> {
        Ok(!self.level.get())
    }
}

impl OutputPin for MockPin<'_> {
    type Error = Infallible;

    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.write(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.write(true);
        Ok(())
    }
}

impl StatefulOutputPin for MockPin<'_> {
    fn is_set_high(&self) -> Result<bool, Self::Error> {
        Ok(self.level.get())
    }

    fn is_set_low(&self) -> Result<bool, Self::Error> {
        Ok(!self.level.get())
    }
}
