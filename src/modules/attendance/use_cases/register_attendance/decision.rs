use chrono::NaiveDate;

use crate::modules::attendance::core::events::AttendanceEvent;
use crate::shared::core::person_id::PersonId;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DecideError {
    #[error("attendance for {person_id} on {date} is already complete")]
    AlreadyComplete { person_id: PersonId, date: NaiveDate },
}

#[derive(Debug)]
pub enum Decision {
    Accepted { event: AttendanceEvent },
    Rejected { reason: DecideError },
}
