//! User settings shared between tasks

use core::cell::Cell;

use embassy_sync::blocking_mutex::{raw::ThreadModeRawMutex, Mutex};
use watchface_core::{ClockSettings, DisplayPreference};

pub struct SystemSettings {
    display_preference: Mutex<ThreadModeRawMutex, Cell<DisplayPreference>>,
}

impl SystemSettings {
    pub const fn new(display_preference: DisplayPreference) -> Self {
        Self {
            display_preference: Mutex::new(Cell::new(display_preference)),
        }
    }

    /// Switch between 12- and 24-hour clock, returning the new setting
    pub fn toggle_clock_format(&self) -> DisplayPreference {
        self.display_preference.lock(|preference| {
            let toggled = preference.get().toggled();
            preference.set(toggled);
            toggled
        })
    }
}

impl ClockSettings for SystemSettings {
    fn display_preference(&self) -> DisplayPreference {
        self.display_preference.lock(Cell::get)
    }
}
