/// Time source for history timestamps.
use chrono::{DateTime, Utc};

/// Supplies the timestamp recorded with each history entry.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// System clock - uses real time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always reports the same instant. Used for reproducible replays.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
