//! Time keeping module for PineTime
//!
//! The watch has no battery-backed RTC, so civil time is derived from a
//! known UTC reference and the monotonic `Instant` at which it was taken.

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeDelta, Timelike, Utc};
use embassy_time::{Duration, Instant};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Seconds since the UNIX epoch not representable as a date
    InvalidTimestamp(i64),
    /// UTC offset outside of +/- 24 hours
    InvalidOffset(i32),
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidTimestamp(secs) => write!(f, "invalid UNIX timestamp {}", secs),
            Self::InvalidOffset(secs) => write!(f, "invalid UTC offset {}s", secs),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimeReference {
    /// Clock time
    time: DateTime<Utc>,
    /// Related system time
    instant: Instant,
}

impl Default for TimeReference {
    fn default() -> Self {
        Self {
            time: DateTime::UNIX_EPOCH,
            instant: Instant::from_ticks(0),
        }
    }
}

impl TimeReference {
    /// Create new time reference from seconds since the UNIX epoch
    pub fn from_timestamp(utc_secs: i64, instant: Instant) -> Result<Self, Error> {
        let time = DateTime::from_timestamp(utc_secs, 0).ok_or(Error::InvalidTimestamp(utc_secs))?;
        Ok(Self { time, instant })
    }
}

#[derive(Clone, Copy, Debug)]
pub struct TimeManager {
    reference: TimeReference,
    offset: FixedOffset,
}

impl TimeManager {
    /// Initialize time measurement with a reference and the local UTC offset
    pub fn new(reference: TimeReference, utc_offset_secs: i32) -> Result<Self, Error> {
        let offset =
            FixedOffset::east_opt(utc_offset_secs).ok_or(Error::InvalidOffset(utc_offset_secs))?;
        Ok(Self { reference, offset })
    }

    /// Local time at `now`
    pub fn get_time(&self, now: Instant) -> NaiveDateTime {
        let elapsed = now
            .checked_duration_since(self.reference.instant)
            .unwrap_or(Duration::from_ticks(0));
        let elapsed = TimeDelta::microseconds(i64::try_from(elapsed.as_micros()).unwrap_or(i64::MAX));

        self.reference
            .time
            .checked_add_signed(elapsed)
            .unwrap_or(self.reference.time)
            .with_timezone(&self.offset)
            .naive_local()
    }

    /// Update time reference
    pub fn set_time(&mut self, reference: TimeReference) {
        self.reference = reference;
    }
}

/// Time left until the next full minute, in (0, 60] seconds.
pub fn until_next_minute(now: &NaiveDateTime) -> Duration {
    // Leap seconds report nanoseconds past 1_000_000_000
    let micros_into_minute = u64::from(now.second()) * 1_000_000
        + u64::from(now.nanosecond().min(999_999_999)) / 1_000;
    Duration::from_micros(60_000_000 - micros_into_minute.min(59_999_999))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    // 2024-03-03 12:34:56 UTC
    const EPOCH: i64 = 1_709_469_296;

    fn local(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 3)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn applies_offset_and_elapsed_time() {
        let reference = TimeReference::from_timestamp(EPOCH, Instant::from_secs(10)).unwrap();
        let clock = TimeManager::new(reference, 3_600).unwrap();

        assert_eq!(clock.get_time(Instant::from_secs(10)), local(13, 34, 56));
        assert_eq!(clock.get_time(Instant::from_secs(14)), local(13, 35, 0));
    }

    #[test]
    fn instants_before_the_reference_clamp_to_it() {
        let reference = TimeReference::from_timestamp(EPOCH, Instant::from_secs(10)).unwrap();
        let clock = TimeManager::new(reference, 0).unwrap();

        assert_eq!(clock.get_time(Instant::from_secs(3)), local(12, 34, 56));
    }

    #[test]
    fn negative_offsets_can_cross_midnight() {
        let reference = TimeReference::from_timestamp(EPOCH, Instant::from_ticks(0)).unwrap();
        let clock = TimeManager::new(reference, -13 * 3_600).unwrap();

        let now = clock.get_time(Instant::from_ticks(0));
        assert_eq!(now, NaiveDate::from_ymd_opt(2024, 3, 2).unwrap().and_hms_opt(23, 34, 56).unwrap());
    }

    #[test]
    fn set_time_reanchors_the_clock() {
        let mut clock = TimeManager::new(TimeReference::default(), 0).unwrap();
        assert_eq!(clock.get_time(Instant::from_ticks(0)), NaiveDateTime::UNIX_EPOCH);

        clock.set_time(TimeReference::from_timestamp(EPOCH, Instant::from_secs(100)).unwrap());
        assert_eq!(clock.get_time(Instant::from_secs(160)), local(12, 35, 56));
    }

    #[test]
    fn rejects_out_of_range_offsets() {
        assert_eq!(
            TimeManager::new(TimeReference::default(), 86_400).err(),
            Some(Error::InvalidOffset(86_400))
        );
    }

    #[test]
    fn rejects_unrepresentable_timestamps() {
        assert_eq!(
            TimeReference::from_timestamp(i64::MAX, Instant::from_ticks(0)).err(),
            Some(Error::InvalidTimestamp(i64::MAX))
        );
    }

    #[test]
    fn waits_for_the_next_minute_boundary() {
        assert_eq!(until_next_minute(&local(9, 0, 0)), Duration::from_secs(60));
        assert_eq!(until_next_minute(&local(9, 0, 59)), Duration::from_secs(1));
        assert_eq!(until_next_minute(&local(9, 0, 15)), Duration::from_secs(45));

        let almost = local(9, 0, 59).with_nanosecond(999_999_000).unwrap();
        assert_eq!(until_next_minute(&almost), Duration::from_micros(1));
    }
}
