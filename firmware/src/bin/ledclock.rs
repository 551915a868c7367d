//! The firmware for the LED clock, based on cortex_m_rtic.
//!
//! No tasks are spawned and no interrupts are bound. `init` configures the
//! board and the whole clock runs as a polling loop in `idle`.

#![deny(unsafe_code)]
#![deny(warnings)]
#![deny(missing_docs)]
#![no_main]
#![no_std]

use ledclock_firmware as _; // global logger + panicking-behavior + memory layout

#[rtic::app(device = stm32f4xx_hal::pac, peripherals = true)]
mod app {
    use ledclock_firmware::configure::{self, Board};

    // Shared resources go here
    #[shared]
    struct Shared {}

    // Local resources go here
    #[local]
    struct Local {
        /// The clock and all of the hardware it polls
        clockwork: Board,
    }

    #[init]
    fn init(cx: init::Context) -> (Shared, Local, init::Monotonics) {
        defmt::println!("init");

        // configure all the clocks and peripherals
        let clockwork = configure::configure(cx.device);

        (Shared {}, Local { clockwork }, init::Monotonics())
    }

    #[idle(local = [clockwork])]
    fn idle(cx: idle::Context) -> ! {
        let clock = cx.local.clockwork.clock();
        defmt::info!(
            "LED clock running from {=u8}:{=u8}:{=u8}",
            clock.hour(),
            clock.minute(),
            clock.second()
        );

        cx.local.clockwork.run()
    }
}
