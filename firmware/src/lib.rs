//! Board support for the LED clock: global logger, panic behaviour and the
//! one-time peripheral configuration.

#![deny(unsafe_code)]
#![no_std]

use defmt_rtt as _; // global logger
use panic_probe as _;
use stm32f4xx_hal as _; // memory layout

pub mod configure;

// same panicking *behavior* as `panic-probe` but doesn't print a panic message
// this prevents the panic message being printed *twice* when `defmt::panic` is invoked
#[defmt::panic_handler]
fn panic() -> ! {
    cortex_m::asm::udf()
}
