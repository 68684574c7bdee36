// Storage port for weekly attendance partitions.
//
// Writes are conditional: `insert_check_in` only succeeds when no record
// exists for the (person, date) pair and `set_check_out` only succeeds on an
// open record. Losing either race yields `StoreError::Conflict`, never a
// duplicate row or an overwritten check-out.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use thiserror::Error;

use crate::modules::attendance::core::partition::PartitionId;
use crate::modules::attendance::core::record::AttendanceRecord;
use crate::shared::core::person_id::PersonId;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("conflicting write for {person_id} on {date}")]
    Conflict { person_id: PersonId, date: NaiveDate },

    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("corrupt partition {partition_id}: {reason}")]
    Corrupt {
        partition_id: PartitionId,
        reason: String,
    },
}

#[async_trait]
pub trait AttendanceStore: Send + Sync {
    async fn find(
        &self,
        partition_id: &PartitionId,
        person_id: &PersonId,
        date: NaiveDate,
    ) -> Result<Option<AttendanceRecord>, StoreError>;

    async fn insert_check_in(
        &self,
        partition_id: &PartitionId,
        record: AttendanceRecord,
    ) -> Result<(), StoreError>;

    async fn set_check_out(
        &self,
        partition_id: &PartitionId,
        person_id: &PersonId,
        date: NaiveDate,
        check_out_time: NaiveTime,
    ) -> Result<AttendanceRecord, StoreError>;

    /// Records of one partition ordered by date, then check-in time.
    async fn list_partition(
        &self,
        partition_id: &PartitionId,
    ) -> Result<Vec<AttendanceRecord>, StoreError>;

    /// Every record of one person, most recent first.
    async fn list_by_person(
        &self,
        person_id: &PersonId,
    ) -> Result<Vec<(PartitionId, AttendanceRecord)>, StoreError>;
}

pub(crate) fn sort_chronologically(records: &mut [AttendanceRecord]) {
    records.sort_by(|a, b| {
        (a.date, a.check_in_time, a.person_id.as_str()).cmp(&(
            b.date,
            b.check_in_time,
            b.person_id.as_str(),
        ))
    });
}

pub(crate) fn sort_most_recent_first(rows: &mut [(PartitionId, AttendanceRecord)]) {
    rows.sort_by(|(_, a), (_, b)| (b.date, b.check_in_time).cmp(&(a.date, a.check_in_time)));
}

/// Applies a check-out to the matching open record inside `records`.
pub(crate) fn close_open_record(
    records: &mut [AttendanceRecord],
    person_id: &PersonId,
    date: NaiveDate,
    check_out_time: NaiveTime,
) -> Result<AttendanceRecord, StoreError> {
    let record = records
        .iter_mut()
        .find(|r| r.belongs_to(person_id, date) && r.is_open())
        .ok_or_else(|| StoreError::Conflict {
            person_id: person_id.clone(),
            date,
        })?;
    record.check_out_time = Some(check_out_time);
    Ok(record.clone())
}

pub mod in_memory;
pub mod json_file;
