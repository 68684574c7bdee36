// Time provider. Every "now" the ledger sees comes through a Clock so day
// and week boundaries can be pinned in tests.

use chrono::{DateTime, FixedOffset, Offset, Utc};

/// Offset of the civil timezone attendance is recorded in (UTC-6, no DST).
pub const DEFAULT_UTC_OFFSET_HOURS: i32 = -6;

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<FixedOffset>;
}

pub fn offset_from_hours(hours: i32) -> Option<FixedOffset> {
    FixedOffset::east_opt(hours.checked_mul(3600)?)
}

#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    offset: FixedOffset,
}

impl SystemClock {
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        let offset = offset_from_hours(DEFAULT_UTC_OFFSET_HOURS).unwrap_or(Utc.fix());
        Self { offset }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Utc::now().with_timezone(&self.offset)
    }
}

#[cfg(test)]
mod clock_tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn system_clock_reports_the_configured_offset() {
        let clock = SystemClock::default();
        assert_eq!(clock.now().offset().local_minus_utc(), -6 * 3600);
    }

    #[rstest]
    #[case(-6, -21_600)]
    #[case(0, 0)]
    #[case(5, 18_000)]
    fn it_should_build_offsets_from_hours(#[case] hours: i32, #[case] seconds: i32) {
        assert_eq!(offset_from_hours(hours).unwrap().local_minus_utc(), seconds);
    }

    #[rstest]
    fn it_should_reject_out_of_range_offsets() {
        assert!(offset_from_hours(30).is_none());
    }
}
