use chrono::{NaiveDateTime, NaiveTime, Timelike};

use crate::modules::attendance::core::events::{
    AttendanceEvent, CheckInRegistered, CheckOutRegistered,
};
use crate::modules::attendance::core::state::AttendanceState;
use crate::modules::attendance::use_cases::register_attendance::{
    command::RegisterAttendance,
    decision::{DecideError, Decision},
};
use crate::shared::infrastructure::directory::Profile;

fn whole_seconds(time: NaiveTime) -> NaiveTime {
    time.with_nanosecond(0).unwrap_or(time)
}

/// First event of the day checks in, the second checks out, anything after
/// that is rejected.
///
/// `at` is the civil timestamp of the request. A check-out never lands before
/// its check-in; if the clock reads earlier the check-in time is used.
pub fn decide_register(
    state: &AttendanceState,
    command: &RegisterAttendance,
    profile: &Profile,
    at: NaiveDateTime,
) -> Decision {
    let now = whole_seconds(at.time());
    match state {
        AttendanceState::None => Decision::Accepted {
            event: AttendanceEvent::CheckInRegistered(CheckInRegistered {
                attendance_id: command.attendance_id,
                person_id: command.person_id.clone(),
                display_name: profile.display_name.clone(),
                category: profile.category,
                program: profile.program.clone(),
                date: at.date(),
                check_in_time: now,
            }),
        },
        AttendanceState::Open(record) => Decision::Accepted {
            event: AttendanceEvent::CheckOutRegistered(CheckOutRegistered {
                person_id: record.person_id.clone(),
                date: record.date,
                check_out_time: now.max(record.check_in_time),
            }),
        },
        AttendanceState::Complete(record) => Decision::Rejected {
            reason: DecideError::AlreadyComplete {
                person_id: record.person_id.clone(),
                date: record.date,
            },
        },
    }
}
