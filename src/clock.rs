//! The time model: a twelve hour clock with no date and no AM/PM.
//!
//! Increments are the only way to change the time after construction. The
//! timer and the buttons both go through them, so a button press on a
//! boundary cascades exactly like an organic rollover.

/// One of the three quantities the clock keeps, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "logging", derive(defmt::Format))]
pub enum Quantity {
    /// Seconds, 0 to 59
    Seconds,
    /// Minutes, 0 to 59
    Minutes,
    /// Hours, 1 to 12
    Hours,
}

impl Quantity {
    /// All quantities in the order they are displayed and wired
    pub const ALL: [Quantity; 3] = [Quantity::Seconds, Quantity::Minutes, Quantity::Hours];

    /// The quantity after this one, wrapping from hours back to seconds
    pub const fn next(self) -> Self {
        match self {
            Quantity::Seconds => Quantity::Minutes,
            Quantity::Minutes => Quantity::Hours,
            Quantity::Hours => Quantity::Seconds,
        }
    }

    /// The position of this quantity in [Quantity::ALL], used to index
    /// per-quantity hardware such as banks and buttons
    pub const fn index(self) -> usize {
        match self {
            Quantity::Seconds => 0,
            Quantity::Minutes => 1,
            Quantity::Hours => 2,
        }
    }
}

/// The current time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "logging", derive(defmt::Format))]
pub struct Clock {
    second: u8,
    minute: u8,
    hour: u8,
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock {
    /// The time every power up starts from, 12:00:00
    pub const fn new() -> Self {
        Self {
            second: 0,
            minute: 0,
            hour: 12,
        }
    }

    /// Creates a clock showing the given time, or None if any field is out of range
    pub const fn at(hour: u8, minute: u8, second: u8) -> Option<Self> {
        if hour < 1 || hour > 12 || minute > 59 || second > 59 {
            return None;
        }

        Some(Self {
            second,
            minute,
            hour,
        })
    }

    /// The current second, 0 to 59
    pub const fn second(&self) -> u8 {
        self.second
    }

    /// The current minute, 0 to 59
    pub const fn minute(&self) -> u8 {
        self.minute
    }

    /// The current hour, 1 to 12
    pub const fn hour(&self) -> u8 {
        self.hour
    }

    /// Reads the field for a quantity
    pub const fn get(&self, quantity: Quantity) -> u8 {
        match quantity {
            Quantity::Seconds => self.second,
            Quantity::Minutes => self.minute,
            Quantity::Hours => self.hour,
        }
    }

    /// Increments the field for a quantity, cascading as that increment would
    pub fn increment(&mut self, quantity: Quantity) {
        match quantity {
            Quantity::Seconds => self.increment_seconds(),
            Quantity::Minutes => self.increment_minutes(),
            Quantity::Hours => self.increment_hours(),
        }
    }

    /// Advances the hour, wrapping 12 to 1
    pub fn increment_hours(&mut self) {
        if self.hour == 12 {
            self.hour = 1;
        } else {
            self.hour += 1;
        }
    }

    /// Advances the minute, wrapping 59 to 0 and carrying into the hour
    pub fn increment_minutes(&mut self) {
        if self.minute == 59 {
            self.minute = 0;
            self.increment_hours();
        } else {
            self.minute += 1;
        }
    }

    /// Advances the second, wrapping 59 to 0 and carrying into the minute
    pub fn increment_seconds(&mut self) {
        if self.second == 59 {
            self.second = 0;
            self.increment_minutes();
        } else {
            self.second += 1;
        }
    }
}
