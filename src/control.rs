//! The control loop, and the context it owns.
//!
//! There is one thread and no interrupts. Every pass runs the same three
//! steps in the same order and none of them wait on anything:
//!
//! 1. count a second if the seconds reference has rolled over
//! 2. sample the buttons if the sample gate is open
//! 3. show the next bank
//!
//! Increments happen before the display step, so a change shows up the next
//! time its bank comes round.

use embedded_hal::digital::v2::OutputPin;
use switch_hal::{InputSwitch, OutputSwitch};

use crate::clock::Clock;
use crate::debounced::Debouncer;
use crate::display::DisplayDriver;
use crate::timer::{FreeRunningCounter, ResettableCounter, SampleGate, SecondsReference};

/// Everything the control loop reads and writes
pub struct Clockwork<TSeconds, TSample, TButton, TOutputPin, TBank> {
    clock: Clock,
    seconds: SecondsReference<TSeconds>,
    gate: SampleGate<TSample>,
    buttons: Debouncer<TButton>,
    display: DisplayDriver<TOutputPin, TBank>,
}

impl<TSeconds, TSample, TButton, TOutputPin, TBank>
    Clockwork<TSeconds, TSample, TButton, TOutputPin, TBank>
where
    TSeconds: ResettableCounter,
    TSample: FreeRunningCounter,
    TButton: InputSwitch,
    TOutputPin: OutputPin,
    TBank: OutputSwitch,
{
    /// Assembles the loop context, starting the clock at 12:00:00
    pub fn new(
        seconds: SecondsReference<TSeconds>,
        gate: SampleGate<TSample>,
        buttons: Debouncer<TButton>,
        display: DisplayDriver<TOutputPin, TBank>,
    ) -> Self {
        Self::starting_at(Clock::new(), seconds, gate, buttons, display)
    }

    /// Assembles the loop context with the clock already set
    pub fn starting_at(
        clock: Clock,
        seconds: SecondsReference<TSeconds>,
        gate: SampleGate<TSample>,
        buttons: Debouncer<TButton>,
        display: DisplayDriver<TOutputPin, TBank>,
    ) -> Self {
        Self {
            clock,
            seconds,
            gate,
            buttons,
            display,
        }
    }

    /// The current time
    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    /// The display driver, for inspecting what is shown
    pub fn display(&self) -> &DisplayDriver<TOutputPin, TBank> {
        &self.display
    }

    /// Runs one pass of the loop
    pub fn step(&mut self) {
        if self.seconds.poll() {
            self.clock.increment_seconds();

            #[cfg(feature = "logging")]
            defmt::trace!("tick {}", self.clock);
        }

        if self.gate.is_open() {
            for quantity in self.buttons.poll().iter() {
                self.clock.increment(quantity);

                #[cfg(feature = "logging")]
                defmt::info!("set {} -> {}", quantity, self.clock);
            }
        }

        self.display.step(&self.clock);
    }

    /// Runs the loop until power off
    pub fn run(&mut self) -> ! {
        loop {
            self.step();
        }
    }
}

#[cfg(test)]
mod tests {
    use core::cell::{Cell, RefCell};

    use shift_register_hal::mock::{MockPin, Trace};
    use shift_register_hal::ShiftRegister;
    use switch_hal::{ActiveLow, Switch};

    use super::*;
    use crate::clock::Quantity;
    use crate::config::{SAMPLE_GATE_THRESHOLD, SECOND_ROLLOVER_HIGH_BYTE};
    use crate::display::{decode, encode};
    use crate::timer::fake::FakeCounter;

    const ONE_SECOND: u16 = (SECOND_ROLLOVER_HIGH_BYTE as u16) << 8;

    type TestClockwork<'a> = Clockwork<
        FakeCounter<'a>,
        FakeCounter<'a>,
        Switch<MockPin<'a>, ActiveLow>,
        MockPin<'a>,
        Switch<MockPin<'a>, ActiveLow>,
    >;

    /// Test-owned state behind every fake peripheral
    struct Bench {
        seconds_count: Cell<u16>,
        sample_count: Cell<u16>,
        /// seconds, minutes, hours; `true` is released
        buttons: [Cell<bool>; 3],
        register: [Cell<bool>; 3],
        banks: [Cell<bool>; 3],
        trace: RefCell<Trace>,
    }

    impl Bench {
        fn new() -> Self {
            Self {
                seconds_count: Cell::new(0),
                sample_count: Cell::new(0),
                buttons: [Cell::new(true), Cell::new(true), Cell::new(true)],
                register: Default::default(),
                banks: Default::default(),
                trace: RefCell::new(Trace::new()),
            }
        }

        fn clockwork(&self, clock: Clock) -> TestClockwork<'_> {
            let button = |index: usize| Switch::new(MockPin::new(index as u8, &self.buttons[index]));
            let bank = |index: usize| Switch::new(MockPin::new(3 + index as u8, &self.banks[index]));
            let register = ShiftRegister::new(
                MockPin::new(6, &self.register[0]),
                MockPin::new(7, &self.register[1]),
                MockPin::recording(8, &self.register[2], &self.trace),
            );

            Clockwork::starting_at(
                clock,
                SecondsReference::new(FakeCounter::new(&self.seconds_count)),
                SampleGate::new(FakeCounter::new(&self.sample_count)),
                Debouncer::new(button(0), button(1), button(2)),
                DisplayDriver::new(register, bank(0), bank(1), bank(2)),
            )
        }

        fn elapse_second(&self, clockwork: &mut TestClockwork<'_>) {
            self.seconds_count.set(ONE_SECOND);
            clockwork.step();
        }

        fn open_gate(&self) {
            self.sample_count.set(SAMPLE_GATE_THRESHOLD);
        }

        fn close_gate(&self) {
            self.sample_count.set(SAMPLE_GATE_THRESHOLD - 1);
        }

        fn set_pressed(&self, quantity: Quantity, is_pressed: bool) {
            self.buttons[quantity.index()].set(!is_pressed);
        }
    }

    fn hms(clockwork: &TestClockwork<'_>) -> (u8, u8, u8) {
        let clock = clockwork.clock();
        (clock.hour(), clock.minute(), clock.second())
    }

    #[test]
    fn starts_at_twelve_and_waits_for_a_second() {
        let bench = Bench::new();
        let mut clockwork = bench.clockwork(Clock::new());

        bench.seconds_count.set(ONE_SECOND - 1);
        for _ in 0..100 {
            clockwork.step();
        }
        assert_eq!(hms(&clockwork), (12, 0, 0));
    }

    #[test]
    fn each_rollover_counts_exactly_one_second() {
        let bench = Bench::new();
        let mut clockwork = bench.clockwork(Clock::new());

        bench.elapse_second(&mut clockwork);
        assert_eq!(bench.seconds_count.get(), 0);
        clockwork.step();
        clockwork.step();
        assert_eq!(hms(&clockwork), (12, 0, 1));
    }

    #[test]
    fn sixty_rollovers_make_a_minute() {
        let bench = Bench::new();
        let mut clockwork = bench.clockwork(Clock::new());

        for _ in 0..60 {
            bench.elapse_second(&mut clockwork);
        }
        assert_eq!(hms(&clockwork), (12, 1, 0));
    }

    #[test]
    fn an_hour_of_rollovers_reaches_one_o_clock() {
        let bench = Bench::new();
        let mut clockwork = bench.clockwork(Clock::new());

        for _ in 0..3600 {
            bench.elapse_second(&mut clockwork);
        }
        assert_eq!(hms(&clockwork), (1, 0, 0));
    }

    #[test]
    fn twelve_hours_of_rollovers_come_back_to_twelve() {
        let bench = Bench::new();
        let mut clockwork = bench.clockwork(Clock::new());

        for _ in 0..43_200 {
            bench.elapse_second(&mut clockwork);
        }
        assert_eq!(hms(&clockwork), (12, 0, 0));
    }

    #[test]
    fn buttons_are_ignored_while_the_gate_is_closed() {
        let bench = Bench::new();
        let mut clockwork = bench.clockwork(Clock::new());
        bench.close_gate();

        bench.set_pressed(Quantity::Minutes, true);
        clockwork.step();
        bench.set_pressed(Quantity::Minutes, false);
        clockwork.step();

        assert_eq!(hms(&clockwork), (12, 0, 0));
    }

    #[test]
    fn release_inside_the_gate_increments_once() {
        let bench = Bench::new();
        let mut clockwork = bench.clockwork(Clock::new());
        bench.open_gate();

        bench.set_pressed(Quantity::Minutes, true);
        for _ in 0..20 {
            clockwork.step();
        }
        assert_eq!(hms(&clockwork), (12, 0, 0));

        bench.set_pressed(Quantity::Minutes, false);
        for _ in 0..20 {
            clockwork.step();
        }
        assert_eq!(hms(&clockwork), (12, 1, 0));
    }

    #[test]
    fn a_press_spanning_a_closed_gate_is_seen_on_release() {
        let bench = Bench::new();
        let mut clockwork = bench.clockwork(Clock::new());

        bench.open_gate();
        bench.set_pressed(Quantity::Hours, true);
        clockwork.step();

        bench.close_gate();
        bench.set_pressed(Quantity::Hours, false);
        clockwork.step();
        assert_eq!(hms(&clockwork), (12, 0, 0));

        bench.open_gate();
        clockwork.step();
        assert_eq!(hms(&clockwork), (1, 0, 0));
    }

    #[test]
    fn a_seconds_button_on_59_cascades_like_the_timer() {
        let bench = Bench::new();
        let start = Clock::at(12, 59, 59).unwrap();

        let mut by_timer = bench.clockwork(start);
        bench.elapse_second(&mut by_timer);

        let mut by_button = bench.clockwork(start);
        bench.open_gate();
        bench.set_pressed(Quantity::Seconds, true);
        by_button.step();
        bench.set_pressed(Quantity::Seconds, false);
        by_button.step();

        assert_eq!(hms(&by_button), (1, 0, 0));
        assert_eq!(by_button.clock(), by_timer.clock());
    }

    #[test]
    fn timer_and_button_in_the_same_pass_both_count() {
        let bench = Bench::new();
        let mut clockwork = bench.clockwork(Clock::new());

        bench.open_gate();
        bench.set_pressed(Quantity::Seconds, true);
        clockwork.step();

        bench.set_pressed(Quantity::Seconds, false);
        bench.elapse_second(&mut clockwork);

        assert_eq!(hms(&clockwork), (12, 0, 2));
    }

    #[test]
    fn display_steps_on_every_pass() {
        let bench = Bench::new();
        let mut clockwork = bench.clockwork(Clock::at(9, 25, 41).unwrap());
        let mut shown = [None; 3];

        for _ in 0..3 {
            clockwork.step();
            let quantity = clockwork.display().cursor();
            shown[quantity.index()] = decode(clockwork.display().latched_pattern());
        }

        assert_eq!(shown, [Some(41), Some(25), Some(9)]);
        assert_eq!(bench.trace.borrow().len(), 6, "one strobe pulse per pass");
    }

    #[test]
    fn an_increment_shows_when_its_bank_comes_round() {
        let bench = Bench::new();
        let mut clockwork = bench.clockwork(Clock::new());

        clockwork.step();
        assert_eq!(clockwork.display().latched_pattern(), encode(0));

        bench.elapse_second(&mut clockwork);
        assert_eq!(clockwork.display().cursor(), Quantity::Minutes);
        clockwork.step();
        clockwork.step();
        assert_eq!(clockwork.display().cursor(), Quantity::Seconds);
        assert_eq!(clockwork.display().latched_pattern(), encode(1));
    }
}
