//! Wall clock of the watch

use chrono::NaiveDateTime;
use embassy_time::Instant;
use watchface_core::time::{Error, TimeManager, TimeReference};

// Include current UTC epoch and offset at compile time
include!(concat!(env!("OUT_DIR"), "/utc.rs"));

/// Start the clock at the time the firmware was built
pub fn init() -> Result<TimeManager, Error> {
    let reference = TimeReference::from_timestamp(UTC_EPOCH, Instant::now())?;
    TimeManager::new(reference, UTC_OFFSET)
}

/// Current local time
pub fn now(clock: &TimeManager) -> NaiveDateTime {
    clock.get_time(Instant::now())
}
