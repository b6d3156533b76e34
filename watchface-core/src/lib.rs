//! Watchface logic for the PineTime
//!
//! Everything in here is independent of the nRF52 hardware: the firmware
//! hands in a display implementing `DrawTarget`, the current local time and
//! its settings, and the watchface takes care of the rest.

#![cfg_attr(not(test), no_std)]

// This mod MUST go first, so that the others see its macros.
pub(crate) mod fmt;

pub mod clock;
pub mod time;
pub mod ui;

pub use clock::{ClockState, DisplayPreference};
pub use ui::{digital::DigitalWatchFace, ClockSettings, WatchFace};
