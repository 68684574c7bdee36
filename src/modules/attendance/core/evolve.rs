use crate::modules::attendance::core::events::AttendanceEvent;
use crate::modules::attendance::core::record::AttendanceRecord;
use crate::modules::attendance::core::state::AttendanceState;

pub fn evolve(state: AttendanceState, event: AttendanceEvent) -> AttendanceState {
    match (state, event) {
        (AttendanceState::None, AttendanceEvent::CheckInRegistered(e)) => {
            AttendanceState::Open(AttendanceRecord::from(e))
        }
        (AttendanceState::Open(record), AttendanceEvent::CheckOutRegistered(e))
            if record.belongs_to(&e.person_id, e.date) =>
        {
            AttendanceState::Complete(AttendanceRecord {
                check_out_time: Some(e.check_out_time),
                ..record
            })
        }
        (state, _) => state,
    }
}
