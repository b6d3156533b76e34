//! General system configuration

use embassy_nrf::config::{Config, HfclkSource, LfclkSource};
use embassy_time::Duration;
use watchface_core::DisplayPreference;

/// Backlight level while the screen is on (1-7)
pub const BACKLIGHT_LEVEL: u8 = 2;

/// Button sampling period
pub const BUTTON_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Holding the button at least this long toggles the clock format
pub const LONG_PRESS: Duration = Duration::from_secs(1);

#[cfg(feature = "twelve-hour")]
pub const DEFAULT_DISPLAY_PREFERENCE: DisplayPreference = DisplayPreference::TWELVE_HOUR;
#[cfg(not(feature = "twelve-hour"))]
pub const DEFAULT_DISPLAY_PREFERENCE: DisplayPreference = DisplayPreference::TWENTY_FOUR_HOUR;

pub struct SystemConfig {}

impl SystemConfig {
    /// Create new system configuration
    pub fn new() -> Config {
        // Generate default config, required because Config is set as
        // `non_exhaustive`
        let mut config = Config::default();

        // Set high-frequency and low-frequency clock sources to external
        config.hfclk_source = HfclkSource::ExternalXtal;
        config.lfclk_source = LfclkSource::ExternalXtal;

        // Enable DC/DC regulator to massively reduce runtime current consumption
        config.dcdc.reg1 = true;

        config
    }
}
