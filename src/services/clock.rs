//! Time-of-day providers for session classification.

use chrono::{Local, NaiveTime, Utc};

/// Supplies the current time of day. The analytics engine never reads a
/// clock itself; callers pass the value in.
pub trait Clock: Send + Sync {
    fn time_of_day(&self) -> NaiveTime;
}

/// Wall clock, in UTC or the host's local zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock {
    pub local: bool,
}

impl SystemClock {
    pub fn utc() -> Self {
        Self { local: false }
    }

    pub fn local() -> Self {
        Self { local: true }
    }
}

impl Clock for SystemClock {
    fn time_of_day(&self) -> NaiveTime {
        if self.local {
            Local::now().time()
        } else {
            Utc::now().time()
        }
    }
}

/// Always reports the same time. Used for tests and replays.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveTime);

impl FixedClock {
    pub fn at_hour(hour: u32) -> Self {
        Self(NaiveTime::from_hms_opt(hour % 24, 0, 0).unwrap_or(NaiveTime::MIN))
    }
}

impl Clock for FixedClock {
    fn time_of_day(&self) -> NaiveTime {
        self.0
    }
}
