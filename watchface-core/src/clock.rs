//! Clock formatting
//!
//! Turns a wall-clock time into the two labels shown on the watchface.

use core::fmt;

use chrono::Timelike;

/// User preference for the hour label.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayPreference {
    /// Show hours as 00-23 instead of 01-12
    pub use_24h_format: bool,
}

impl DisplayPreference {
    pub const TWELVE_HOUR: Self = Self {
        use_24h_format: false,
    };
    pub const TWENTY_FOUR_HOUR: Self = Self {
        use_24h_format: true,
    };

    /// The opposite hour format.
    pub const fn toggled(self) -> Self {
        Self {
            use_24h_format: !self.use_24h_format,
        }
    }
}

impl Default for DisplayPreference {
    fn default() -> Self {
        Self::TWENTY_FOUR_HOUR
    }
}

/// Two zero-padded decimal digits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Digits([u8; 2]);

impl Digits {
    /// Render the last two decimal digits of `value`.
    pub const fn new(value: u32) -> Self {
        let value = (value % 100) as u8;
        Self([b'0' + value / 10, b'0' + value % 10])
    }

    pub fn as_str(&self) -> &str {
        // Only ever holds ASCII digits
        core::str::from_utf8(&self.0).unwrap_or("--")
    }
}

impl Default for Digits {
    fn default() -> Self {
        Self::new(0)
    }
}

/// Text currently shown by the hour and minute labels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ClockState {
    pub hour: Digits,
    pub minute: Digits,
}

impl ClockState {
    pub fn hour_text(&self) -> &str {
        self.hour.as_str()
    }

    pub fn minute_text(&self) -> &str {
        self.minute.as_str()
    }
}

impl fmt::Display for ClockState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.hour_text(), self.minute_text())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for ClockState {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{=str}:{=str}", self.hour_text(), self.minute_text());
    }
}

/// Format `now` into hour and minute labels.
///
/// In 12-hour mode midnight and noon both show as "12".
pub fn format<T: Timelike>(now: &T, preference: DisplayPreference) -> ClockState {
    let hour = if preference.use_24h_format {
        now.hour()
    } else {
        now.hour12().1
    };

    ClockState {
        hour: Digits::new(hour),
        minute: Digits::new(now.minute()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn at(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
    }

    fn labels(hour: u32, minute: u32, preference: DisplayPreference) -> (String, String) {
        let state = format(&at(hour, minute), preference);
        (state.hour_text().to_owned(), state.minute_text().to_owned())
    }

    #[test]
    fn just_after_midnight() {
        assert_eq!(
            labels(0, 5, DisplayPreference::TWENTY_FOUR_HOUR),
            ("00".into(), "05".into())
        );
        assert_eq!(
            labels(0, 5, DisplayPreference::TWELVE_HOUR),
            ("12".into(), "05".into())
        );
    }

    #[test]
    fn one_in_the_afternoon() {
        assert_eq!(
            labels(13, 0, DisplayPreference::TWENTY_FOUR_HOUR),
            ("13".into(), "00".into())
        );
        assert_eq!(
            labels(13, 0, DisplayPreference::TWELVE_HOUR),
            ("01".into(), "00".into())
        );
    }

    #[test]
    fn morning_is_the_same_in_both_modes() {
        assert_eq!(
            labels(9, 59, DisplayPreference::TWENTY_FOUR_HOUR),
            ("09".into(), "59".into())
        );
        assert_eq!(
            labels(9, 59, DisplayPreference::TWELVE_HOUR),
            ("09".into(), "59".into())
        );
    }

    #[test]
    fn noon_shows_twelve() {
        assert_eq!(labels(12, 30, DisplayPreference::TWELVE_HOUR).0, "12");
        assert_eq!(labels(12, 30, DisplayPreference::TWENTY_FOUR_HOUR).0, "12");
    }

    #[test]
    fn every_minute_of_the_day_stays_in_range() {
        for hour in 0..24 {
            for minute in 0..60 {
                let h24 = format(&at(hour, minute), DisplayPreference::TWENTY_FOUR_HOUR);
                let h12 = format(&at(hour, minute), DisplayPreference::TWELVE_HOUR);

                for state in [h24, h12] {
                    assert_eq!(state.hour_text().len(), 2);
                    assert_eq!(state.minute_text().len(), 2);
                    assert_eq!(state.minute_text().parse::<u32>().unwrap(), minute);
                }

                assert_eq!(h24.hour_text().parse::<u32>().unwrap(), hour);
                let h12 = h12.hour_text().parse::<u32>().unwrap();
                assert!((1..=12).contains(&h12), "{hour}:{minute} gave {h12}");
            }
        }
    }

    #[test]
    fn formatting_is_idempotent() {
        let now = at(23, 17);
        let preference = DisplayPreference::TWELVE_HOUR;
        assert_eq!(format(&now, preference), format(&now, preference));
    }

    #[test]
    fn works_with_full_datetimes() {
        let now = chrono::NaiveDate::from_ymd_opt(2024, 3, 3)
            .unwrap()
            .and_hms_opt(4, 7, 31)
            .unwrap();
        let state = format(&now, DisplayPreference::default());
        assert_eq!(state.to_string(), "04:07");
    }

    #[test]
    fn labels_start_at_zero() {
        assert_eq!(ClockState::default().to_string(), "00:00");
    }

    #[test]
    fn toggling_flips_the_hour_format() {
        assert_eq!(
            DisplayPreference::TWELVE_HOUR.toggled(),
            DisplayPreference::TWENTY_FOUR_HOUR
        );
        assert_eq!(
            DisplayPreference::default().toggled().toggled(),
            DisplayPreference::default()
        );
    }
}
