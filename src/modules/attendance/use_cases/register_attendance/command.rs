use uuid::Uuid;

use crate::shared::core::person_id::PersonId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterAttendance {
    /// Identifier given to the record if this registration turns out to be a
    /// check-in. Ignored for check-outs.
    pub attendance_id: Uuid,
    pub person_id: PersonId,
}

impl RegisterAttendance {
    pub fn new(person_id: PersonId) -> Self {
        Self {
            attendance_id: Uuid::now_v7(),
            person_id,
        }
    }
}
