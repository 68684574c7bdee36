use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::core::person_id::PersonId;
use crate::shared::infrastructure::directory::Category;

/// One person's attendance for one civil day.
///
/// Name, category and program are a snapshot of the directory taken at
/// check-in and are never refreshed. `check_in_time` is immutable;
/// `check_out_time` is written at most once and, once set, closes the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub attendance_id: Uuid,
    pub person_id: PersonId,
    pub display_name: String,
    pub category: Category,
    pub program: String,
    pub date: NaiveDate,
    pub check_in_time: NaiveTime,
    pub check_out_time: Option<NaiveTime>,
}

impl AttendanceRecord {
    pub fn is_open(&self) -> bool {
        self.check_out_time.is_none()
    }

    pub fn belongs_to(&self, person_id: &PersonId, date: NaiveDate) -> bool {
        &self.person_id == person_id && self.date == date
    }
}
