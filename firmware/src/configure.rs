//! Configures the microcontroller for use and returns the clock, ready to run

use hal::{
    gpio::{ErasedPin, Input, Output, PinState},
    pac::{self, TIM3, TIM5},
    prelude::*,
    timer::{fugit::TimerDurationU32, Counter},
};
use ledclock::{
    config::{SAMPLE_COUNTER_HZ, SAMPLE_COUNTER_PERIOD, SECONDS_COUNTER_HZ},
    control::Clockwork,
    debounced::Debouncer,
    display::DisplayDriver,
    timer::{FreeRunningCounter, ResettableCounter, SampleGate, SecondsReference},
};
use shift_register_hal::ShiftRegister;
use stm32f4xx_hal as hal;
use switch_hal::{ActiveLow, IntoSwitch, Switch};

/// The seconds counter reloads well past one second so a slow loop pass
/// still sees the rollover before the count wraps
const SECONDS_COUNTER_RELOAD: TimerDurationU32<SECONDS_COUNTER_HZ> =
    TimerDurationU32::from_ticks(0x1_0000);

const SAMPLE_COUNTER_RELOAD: TimerDurationU32<SAMPLE_COUNTER_HZ> =
    TimerDurationU32::from_ticks(SAMPLE_COUNTER_PERIOD as u32);

/// The clock as wired on the board
pub type Board = Clockwork<
    SecondsCounter,
    SampleCounter,
    Switch<ErasedPin<Input>, ActiveLow>,
    ErasedPin<Output>,
    Switch<ErasedPin<Output>, ActiveLow>,
>;

/// TIM5 counting at [SECONDS_COUNTER_HZ]
pub struct SecondsCounter(Counter<TIM5, SECONDS_COUNTER_HZ>);

impl FreeRunningCounter for SecondsCounter {
    fn current_count(&self) -> u16 {
        self.0.now().ticks() as u16
    }
}

impl ResettableCounter for SecondsCounter {
    fn reset(&mut self) {
        // restarting reloads the prescaler and clears the count
        self.0.start(SECONDS_COUNTER_RELOAD).ok();
    }
}

/// TIM3 counting at [SAMPLE_COUNTER_HZ], wrapping every [SAMPLE_COUNTER_PERIOD] ticks
pub struct SampleCounter(Counter<TIM3, SAMPLE_COUNTER_HZ>);

impl FreeRunningCounter for SampleCounter {
    fn current_count(&self) -> u16 {
        self.0.now().ticks() as u16
    }
}

macro_rules! shift_register {
    ($data_pin: expr, $clk_pin: expr, $strobe_pin: expr) => {{
        ShiftRegister::new(
            $data_pin
                .into_push_pull_output_in_state(PinState::Low)
                .erase(),
            $clk_pin
                .into_push_pull_output_in_state(PinState::High)
                .erase(),
            $strobe_pin
                .into_push_pull_output_in_state(PinState::Low)
                .erase(),
        )
    }};
}

macro_rules! bank {
    ($cathode_pin: expr) => {{
        $cathode_pin
            .into_push_pull_output_in_state(PinState::High)
            .erase()
            .into_active_low_switch()
    }};
}

macro_rules! button {
    ($pin: expr) => {{
        $pin.into_pull_up_input().erase().into_active_low_switch()
    }};
}

/// Configures the micro for operation
pub fn configure(device_peripherals: pac::Peripherals) -> Board {
    // Take ownership over raw device and convert it into the corresponding HAL struct
    let rcc = device_peripherals.RCC.constrain();

    #[cfg(feature = "dev_board")]
    let hse_freq = 25.MHz();
    #[cfg(not(feature = "dev_board"))]
    let hse_freq = 16.MHz();

    // Freeze the configuration of all the clocks in the system. Both counters
    // sit on APB1, whose timer clock is doubled back up to 84 MHz.
    let clocks = rcc
        .cfgr
        .use_hse(hse_freq)
        .sysclk(84.MHz())
        .pclk1(42.MHz())
        .freeze();

    let mut seconds: Counter<TIM5, SECONDS_COUNTER_HZ> = device_peripherals.TIM5.counter(&clocks);
    seconds.start(SECONDS_COUNTER_RELOAD).unwrap();

    let mut sample: Counter<TIM3, SAMPLE_COUNTER_HZ> = device_peripherals.TIM3.counter(&clocks);
    sample.start(SAMPLE_COUNTER_RELOAD).unwrap();

    // Acquire GPIO
    let gpioa = device_peripherals.GPIOA.split();
    let gpiob = device_peripherals.GPIOB.split();

    // setup the segment shift register and the bank cathodes
    let register = shift_register!(gpioa.pa7, gpioa.pa5, gpioa.pa4);
    let display = DisplayDriver::new(
        register,
        bank!(gpiob.pb0),
        bank!(gpiob.pb1),
        bank!(gpiob.pb2),
    );

    // NOTE: the dev board has the user key on PA0, which is used as the
    //       seconds button so it can be set without extra wiring
    #[cfg(feature = "dev_board")]
    let seconds_button = button!(gpioa.pa0);
    #[cfg(not(feature = "dev_board"))]
    let seconds_button = button!(gpiob.pb12);

    let buttons = Debouncer::new(
        seconds_button,
        button!(gpiob.pb13),
        button!(gpiob.pb14),
    );

    Clockwork::new(
        SecondsReference::new(SecondsCounter(seconds)),
        SampleGate::new(SampleCounter(sample)),
        buttons,
        display,
    )
}
