//! Manually advanced clock.

use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;

use crate::application::Clock;

/// Clock that only moves when told to. Starts at the Unix epoch.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn at(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    pub fn advance(&self, by: std::time::Duration) {
        let by = Duration::from_std(by).unwrap_or_else(|_| Duration::zero());
        *self.now.lock() += by;
    }

    pub fn set(&self, now: DateTime<Utc>) {
        *self.now.lock() = now;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock()
    }
}
