use chrono::{NaiveDate, NaiveTime};
use uuid::Uuid;

use crate::modules::attendance::core::record::AttendanceRecord;
use crate::shared::core::person_id::PersonId;
use crate::shared::infrastructure::directory::Category;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckInRegistered {
    pub attendance_id: Uuid,
    pub person_id: PersonId,
    pub display_name: String,
    pub category: Category,
    pub program: String,
    pub date: NaiveDate,
    pub check_in_time: NaiveTime,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOutRegistered {
    pub person_id: PersonId,
    pub date: NaiveDate,
    pub check_out_time: NaiveTime,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttendanceEvent {
    CheckInRegistered(CheckInRegistered),
    CheckOutRegistered(CheckOutRegistered),
}

impl From<CheckInRegistered> for AttendanceRecord {
    fn from(e: CheckInRegistered) -> Self {
        AttendanceRecord {
            attendance_id: e.attendance_id,
            person_id: e.person_id,
            display_name: e.display_name,
            category: e.category,
            program: e.program,
            date: e.date,
            check_in_time: e.check_in_time,
            check_out_time: None,
        }
    }
}
