use chrono::{DateTime, Duration, FixedOffset, Local, NaiveDateTime};
use parking_lot::Mutex;

/// Where the ticker reads the current time from.
pub trait TimeSource: Send + Sync {
    /// Current wall-clock time with the offset of the displayed zone.
    fn now(&self) -> DateTime<FixedOffset>;
}

/// Host clock in the local time zone.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }
}

/// Manually driven clock, optionally stepping forward on every read.
#[derive(Debug)]
pub struct FixedTimeSource {
    current: Mutex<DateTime<FixedOffset>>,
    step: Duration,
}

impl FixedTimeSource {
    /// Frozen clock at `at`, interpreted as UTC.
    pub fn new(at: NaiveDateTime) -> Self {
        Self::stepping(at, Duration::zero())
    }

    /// Clock that returns `start`, then moves forward by `step` after each read.
    pub fn stepping(start: NaiveDateTime, step: Duration) -> Self {
        Self {
            current: Mutex::new(start.and_utc().fixed_offset()),
            step,
        }
    }

}

impl TimeSource for FixedTimeSource {
    fn now(&self) -> DateTime<FixedOffset> {
        let mut current = self.current.lock();
        let now = *current;
        *current += self.step;
        now
    }
}
