use chrono::{DateTime, Duration, FixedOffset};
use std::sync::RwLock;

use crate::shared::core::clock::Clock;

/// Clock that only moves when a test tells it to.
#[derive(Debug)]
pub struct FixedClock {
    now: RwLock<DateTime<FixedOffset>>,
}

impl FixedClock {
    pub fn new(now: DateTime<FixedOffset>) -> Self {
        Self {
            now: RwLock::new(now),
        }
    }

    pub fn set(&self, now: DateTime<FixedOffset>) {
        *self.now.write().unwrap() = now;
    }

    pub fn advance(&self, by: Duration) {
        *self.now.write().unwrap() += by;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        *self.now.read().unwrap()
    }
}

#[cfg(test)]
mod fixed_clock_tests {
    use super::*;
    use crate::shared::core::clock::offset_from_hours;
    use chrono::{NaiveDate, TimeZone, Timelike};
    use rstest::rstest;

    #[rstest]
    fn it_should_move_only_when_told() {
        let offset = offset_from_hours(-6).unwrap();
        let start = offset.with_ymd_and_hms(2025, 3, 10, 7, 30, 0).unwrap();
        let clock = FixedClock::new(start);
        assert_eq!(clock.now(), start);

        clock.advance(Duration::minutes(95));
        assert_eq!(clock.now().hour(), 9);
        assert_eq!(clock.now().minute(), 5);

        clock.set(offset.with_ymd_and_hms(2025, 3, 11, 8, 0, 0).unwrap());
        assert_eq!(
            clock.now().date_naive(),
            NaiveDate::from_ymd_opt(2025, 3, 11).unwrap()
        );
    }
}
