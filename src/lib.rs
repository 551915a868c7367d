#![deny(missing_docs)]
#![deny(unsafe_code)]
#![no_std]

//! LED CLOCK
//!
//! A twelve hour clock for a microcontroller driving three multiplexed
//! two-digit LED banks through a shift register, set with three push buttons.
//!
//! Everything here is polled from a single loop, see [control::Clockwork].
//! Hardware is reached through [`embedded-hal`] pins, [`switch-hal`] switches
//! and the counter traits in [timer], so the whole clock runs on the host
//! against mocks.
//!
//! [`embedded-hal`]: https://docs.rs/embedded-hal/0.2
//! [`switch-hal`]: https://docs.rs/switch-hal/0.4

pub mod clock;
pub mod config;
pub mod control;
pub mod debounced;
pub mod display;
pub mod timer;

pub use clock::{Clock, Quantity};
pub use control::Clockwork;
