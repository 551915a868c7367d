//! Contains code for firmware debouncing of the three set buttons.
//!
//! Each button is sampled once per open sample gate and compared with its
//! previous sample. A press is only acted on when it is released: the
//! pressed -> released transition between two consecutive samples fires.
//! The coarse sample interval is the only bounce filter.

use switch_hal::InputSwitch;

use crate::clock::Quantity;

/// A single button's last sample, used to find release edges.
#[derive(Clone, Copy)]
#[cfg_attr(feature = "logging", derive(defmt::Format))]
pub struct DebouncedInput {
    was_pressed: bool,
}

impl Default for DebouncedInput {
    fn default() -> Self {
        Self::new()
    }
}

/// Returned by the [DebouncedInput::debounce] function
pub struct DebounceResult {
    /// Was the button released between the previous sample and this one?
    pub is_released: bool,
    /// Is the button pressed in this sample?
    pub is_pressed: bool,
}

impl DebouncedInput {
    /// Returns a new input that starts out released
    pub const fn new() -> Self {
        Self { was_pressed: false }
    }

    /// Takes the current sample, `true` if the button is pressed. The sample
    /// always replaces the stored one, whether or not an edge was found.
    pub fn debounce(&mut self, is_pressed: bool) -> DebounceResult {
        let is_released = self.was_pressed && !is_pressed;
        self.was_pressed = is_pressed;

        DebounceResult {
            is_released,
            is_pressed,
        }
    }
}

/// The buttons that fired during one [Debouncer::poll]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "logging", derive(defmt::Format))]
pub struct ButtonEvents([bool; 3]);

impl ButtonEvents {
    /// True if the button for `quantity` was released
    pub fn fired(&self, quantity: Quantity) -> bool {
        self.0[quantity.index()]
    }

    /// True if no button fired
    pub fn is_empty(&self) -> bool {
        !self.0.iter().any(|fired| *fired)
    }

    /// The quantities whose buttons fired, seconds first
    pub fn iter(&self) -> impl Iterator<Item = Quantity> + '_ {
        Quantity::ALL
            .into_iter()
            .filter(move |quantity| self.fired(*quantity))
    }
}

/// The seconds, minutes and hours buttons, indexed by [Quantity::index].
/// Buttons are wired active low so a pressed button reads as active.
pub struct Debouncer<TButton> {
    buttons: [TButton; 3],
    inputs: [DebouncedInput; 3],
}

impl<TButton: InputSwitch> Debouncer<TButton> {
    /// Creates a debouncer with every button assumed released
    pub fn new(seconds: TButton, minutes: TButton, hours: TButton) -> Self {
        Self {
            buttons: [seconds, minutes, hours],
            inputs: [DebouncedInput::new(); 3],
        }
    }

    /// Samples all three buttons independently and reports the release edges
    pub fn poll(&mut self) -> ButtonEvents {
        let mut events = ButtonEvents::default();

        for quantity in Quantity::ALL {
            let index = quantity.index();
            // an unreadable line counts as released, the idle level of the pull-up
            let is_pressed = self.buttons[index].is_active().unwrap_or(false);
            let result = self.inputs[index].debounce(is_pressed);

            if result.is_released {
                #[cfg(feature = "logging")]
                defmt::debug!("{} button released", quantity);

                events.0[index] = true;
            }
        }

        events
    }

    /// Releases the buttons as (seconds, minutes, hours)
    pub fn release(self) -> (TButton, TButton, TButton) {
        let [seconds, minutes, hours] = self.buttons;
        (seconds, minutes, hours)
    }
}
