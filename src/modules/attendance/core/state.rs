use crate::modules::attendance::core::record::AttendanceRecord;

/// Where a (person, day) pair sits in the check-in / check-out cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttendanceState {
    None,
    Open(AttendanceRecord),
    Complete(AttendanceRecord),
}

impl From<Option<AttendanceRecord>> for AttendanceState {
    fn from(record: Option<AttendanceRecord>) -> Self {
        match record {
            None => AttendanceState::None,
            Some(record) if record.is_open() => AttendanceState::Open(record),
            Some(record) => AttendanceState::Complete(record),
        }
    }
}

impl AttendanceState {
    pub fn record(&self) -> Option<&AttendanceRecord> {
        match self {
            AttendanceState::None => None,
            AttendanceState::Open(record) | AttendanceState::Complete(record) => Some(record),
        }
    }
}
