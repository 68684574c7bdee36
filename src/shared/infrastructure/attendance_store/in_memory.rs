use chrono::{NaiveDate, NaiveTime};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::RwLock;

use crate::modules::attendance::core::partition::PartitionId;
use crate::modules::attendance::core::record::AttendanceRecord;
use crate::shared::core::person_id::PersonId;
use crate::shared::infrastructure::attendance_store::{
    AttendanceStore, StoreError, close_open_record, sort_chronologically, sort_most_recent_first,
};

#[derive(Default)]
pub struct InMemoryStore {
    partitions: RwLock<HashMap<PartitionId, Vec<AttendanceRecord>>>,
    offline: AtomicBool,
    delay_write_ms: AtomicU64,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_offline(&mut self) {
        let offline = self.offline.get_mut();
        *offline = !*offline;
    }

    /// Sleeps before every conditional write, widening the window between a
    /// caller's read and its write.
    pub fn set_delay_write_ms(&self, ms: u64) {
        self.delay_write_ms.store(ms, Ordering::SeqCst);
    }

    fn ensure_online(&self) -> Result<(), StoreError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("Attendance store offline".into()));
        }
        Ok(())
    }

    async fn write_delay(&self) {
        let ms = self.delay_write_ms.load(Ordering::SeqCst);
        if ms > 0 {
            tokio::time::sleep(Duration::from_millis(ms)).await;
        }
    }
}

#[async_trait::async_trait]
impl AttendanceStore for InMemoryStore {
    async fn find(
        &self,
        partition_id: &PartitionId,
        person_id: &PersonId,
        date: NaiveDate,
    ) -> Result<Option<AttendanceRecord>, StoreError> {
        self.ensure_online()?;
        let guard = self.partitions.read().await;
        Ok(guard
            .get(partition_id)
            .and_then(|records| records.iter().find(|r| r.belongs_to(person_id, date)))
            .cloned())
    }

    async fn insert_check_in(
        &self,
        partition_id: &PartitionId,
        record: AttendanceRecord,
    ) -> Result<(), StoreError> {
        self.ensure_online()?;
        self.write_delay().await;
        let mut guard = self.partitions.write().await;
        let records = guard.entry(partition_id.clone()).or_default();
        if records
            .iter()
            .any(|r| r.belongs_to(&record.person_id, record.date))
        {
            return Err(StoreError::Conflict {
                person_id: record.person_id,
                date: record.date,
            });
        }
        records.push(record);
        Ok(())
    }

    async fn set_check_out(
        &self,
        partition_id: &PartitionId,
        person_id: &PersonId,
        date: NaiveDate,
        check_out_time: NaiveTime,
    ) -> Result<AttendanceRecord, StoreError> {
        self.ensure_online()?;
        self.write_delay().await;
        let mut guard = self.partitions.write().await;
        let records = guard.get_mut(partition_id).ok_or_else(|| StoreError::Conflict {
            person_id: person_id.clone(),
            date,
        })?;
        close_open_record(records, person_id, date, check_out_time)
    }

    async fn list_partition(
        &self,
        partition_id: &PartitionId,
    ) -> Result<Vec<AttendanceRecord>, StoreError> {
        self.ensure_online()?;
        let mut records = self
            .partitions
            .read()
            .await
            .get(partition_id)
            .cloned()
            .unwrap_or_default();
        sort_chronologically(&mut records);
        Ok(records)
    }

    async fn list_by_person(
        &self,
        person_id: &PersonId,
    ) -> Result<Vec<(PartitionId, AttendanceRecord)>, StoreError> {
        self.ensure_online()?;
        let guard = self.partitions.read().await;
        let mut rows: Vec<_> = guard
            .iter()
            .flat_map(|(partition_id, records)| {
                records
                    .iter()
                    .filter(|r| &r.person_id == person_id)
                    .map(|r| (partition_id.clone(), r.clone()))
            })
            .collect();
        sort_most_recent_first(&mut rows);
        Ok(rows)
    }
}
