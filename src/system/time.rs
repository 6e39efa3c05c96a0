//! Time keeping module for PineTime

use chrono::NaiveDateTime;
use embassy_time::{Duration, Instant};
use pinetime_watchface::clock;

/// Wall clock derived from a UTC reference and the system uptime
pub struct Clock {
    /// UTC seconds at `instant`
    epoch: i64,
    /// Related system time
    instant: Instant,
    /// Offset of local time to UTC in seconds
    utc_offset: i32,
}

impl Clock {
    /// Start the clock at `epoch` UTC seconds
    pub fn new(epoch: i64, utc_offset: i32) -> Self {
        Self {
            epoch,
            instant: Instant::now(),
            utc_offset,
        }
    }

    /// Current local time
    pub fn now(&self) -> NaiveDateTime {
        clock::local_time(self.epoch, self.instant.elapsed().as_secs(), self.utc_offset)
    }

    /// Time left until the next full minute
    pub fn until_next_minute(&self) -> Duration {
        Duration::from_secs(clock::secs_until_next_minute(&self.now()))
    }
}
