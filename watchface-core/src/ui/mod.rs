//! UI definitions module
//! Based on: https://github.com/lupyuen/pinetime-watchface/blob/master/src/lib.rs

use chrono::NaiveDateTime;
use embedded_graphics::{pixelcolor::Rgb565, prelude::DrawTarget};

use crate::clock::DisplayPreference;

pub mod digital;
pub mod layer;

/// Settings owned by the system and read by watchfaces on every update.
pub trait ClockSettings {
    fn display_preference(&self) -> DisplayPreference;
}

impl ClockSettings for DisplayPreference {
    fn display_preference(&self) -> DisplayPreference {
        *self
    }
}

/// Lifecycle callbacks invoked by the firmware.
///
/// A watchface keeps no handle to the system between calls: the display,
/// the current time and the settings are handed in by each callback.
pub trait WatchFace<D>
where
    D: DrawTarget<Color = Rgb565>,
{
    /// Build the screen and show the current time
    fn on_start(
        &mut self,
        display: &mut D,
        now: &NaiveDateTime,
        settings: &dyn ClockSettings,
    ) -> Result<(), D::Error>;

    /// Refresh after a minute has passed or the settings changed
    fn on_tick(
        &mut self,
        display: &mut D,
        now: &NaiveDateTime,
        settings: &dyn ClockSettings,
    ) -> Result<(), D::Error>;

    /// Tear the screen down
    fn on_stop(&mut self, display: &mut D) -> Result<(), D::Error>;
}
