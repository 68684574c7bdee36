// Shared test fixture for AttendanceRecord. Compiled only under cfg(test).

use chrono::{NaiveDate, NaiveTime};
use uuid::Uuid;

use crate::modules::attendance::core::record::AttendanceRecord;
use crate::shared::core::person_id::PersonId;
use crate::shared::infrastructure::directory::Category;

/// Parses `HH:MM` into a time of day.
pub fn time(hh_mm: &str) -> NaiveTime {
    NaiveTime::parse_from_str(hh_mm, "%H:%M").unwrap()
}

pub struct AttendanceRecordBuilder {
    inner: AttendanceRecord,
}

impl Default for AttendanceRecordBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AttendanceRecordBuilder {
    pub fn new() -> Self {
        Self {
            inner: AttendanceRecord {
                attendance_id: Uuid::from_u128(0x0001),
                person_id: PersonId::parse("A001").unwrap(),
                display_name: "Juan Pérez García".to_string(),
                category: Category::Alumno,
                program: "Ingeniería en Sistemas".to_string(),
                date: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
                check_in_time: time("07:30"),
                check_out_time: None,
            },
        }
    }

    pub fn person(mut self, v: &str) -> Self {
        self.inner.person_id = PersonId::parse(v).unwrap();
        self
    }

    pub fn display_name(mut self, v: impl Into<String>) -> Self {
        self.inner.display_name = v.into();
        self
    }

    pub fn category(mut self, v: Category) -> Self {
        self.inner.category = v;
        self
    }

    pub fn date(mut self, y: i32, m: u32, d: u32) -> Self {
        self.inner.date = NaiveDate::from_ymd_opt(y, m, d).unwrap();
        self
    }

    pub fn check_in(mut self, hh_mm: &str) -> Self {
        self.inner.check_in_time = time(hh_mm);
        self
    }

    pub fn check_out(mut self, hh_mm: &str) -> Self {
        self.inner.check_out_time = Some(time(hh_mm));
        self
    }

    pub fn build(self) -> AttendanceRecord {
        self.inner
    }
}
