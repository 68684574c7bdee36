// File backed AttendanceStore: one JSON array per weekly partition,
// `<data_dir>/<partition_id>.json`.
//
// Read-modify-write cycles on a partition are serialised by a per-partition
// async mutex. Files are replaced through a temp file and a rename so a
// crash mid-write leaves the previous document intact.

use chrono::{NaiveDate, NaiveTime};
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

use crate::modules::attendance::core::partition::PartitionId;
use crate::modules::attendance::core::record::AttendanceRecord;
use crate::shared::core::person_id::PersonId;
use crate::shared::infrastructure::attendance_store::{
    AttendanceStore, StoreError, close_open_record, sort_chronologically, sort_most_recent_first,
};

const EXTENSION: &str = "json";

pub struct JsonFileStore {
    data_dir: PathBuf,
    locks: Mutex<HashMap<PartitionId, Arc<Mutex<()>>>>,
}

fn unavailable(context: &str, path: &Path, err: std::io::Error) -> StoreError {
    StoreError::Unavailable(format!("{context} {}: {err}", path.display()))
}

impl JsonFileStore {
    /// Opens the store, creating `data_dir` when it does not exist yet.
    pub async fn open(data_dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let data_dir = data_dir.into();
        tokio::fs::create_dir_all(&data_dir)
            .await
            .map_err(|err| unavailable("failed to create", &data_dir, err))?;
        Ok(Self {
            data_dir,
            locks: Mutex::new(HashMap::new()),
        })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn partition_path(&self, partition_id: &PartitionId) -> PathBuf {
        self.data_dir
            .join(format!("{}.{EXTENSION}", partition_id.as_str()))
    }

    async fn partition_lock(&self, partition_id: &PartitionId) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().await;
        locks.entry(partition_id.clone()).or_default().clone()
    }

    async fn read_partition(
        &self,
        partition_id: &PartitionId,
    ) -> Result<Vec<AttendanceRecord>, StoreError> {
        let path = self.partition_path(partition_id);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(unavailable("failed to read", &path, err)),
        };
        serde_json::from_slice(&bytes).map_err(|err| StoreError::Corrupt {
            partition_id: partition_id.clone(),
            reason: err.to_string(),
        })
    }

    async fn write_partition(
        &self,
        partition_id: &PartitionId,
        records: &[AttendanceRecord],
    ) -> Result<(), StoreError> {
        let path = self.partition_path(partition_id);
        let tmp = path.with_extension(format!("{EXTENSION}.tmp"));
        let bytes = serde_json::to_vec_pretty(records).map_err(|err| StoreError::Corrupt {
            partition_id: partition_id.clone(),
            reason: err.to_string(),
        })?;
        tokio::fs::write(&tmp, bytes)
            .await
            .map_err(|err| unavailable("failed to write", &tmp, err))?;
        tokio::fs::rename(&tmp, &path)
            .await
            .map_err(|err| unavailable("failed to replace", &path, err))?;
        debug!(partition_id = %partition_id, rows = records.len(), "partition persisted");
        Ok(())
    }

    async fn known_partitions(&self) -> Result<Vec<PartitionId>, StoreError> {
        let mut entries = tokio::fs::read_dir(&self.data_dir)
            .await
            .map_err(|err| unavailable("failed to list", &self.data_dir, err))?;
        let mut partitions = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|err| unavailable("failed to list", &self.data_dir, err))?
        {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(EXTENSION) {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if let Ok(partition_id) = PartitionId::parse(stem) {
                partitions.push(partition_id);
            }
        }
        Ok(partitions)
    }
}

#[async_trait::async_trait]
impl AttendanceStore for JsonFileStore {
    async fn find(
        &self,
        partition_id: &PartitionId,
        person_id: &PersonId,
        date: NaiveDate,
    ) -> Result<Option<AttendanceRecord>, StoreError> {
        let records = self.read_partition(partition_id).await?;
        Ok(records.into_iter().find(|r| r.belongs_to(person_id, date)))
    }

    async fn insert_check_in(
        &self,
        partition_id: &PartitionId,
        record: AttendanceRecord,
    ) -> Result<(), StoreError> {
        let lock = self.partition_lock(partition_id).await;
        let _guard = lock.lock().await;
        let mut records = self.read_partition(partition_id).await?;
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
        self.write_partition(partition_id, &records).await
    }

    async fn set_check_out(
        &self,
        partition_id: &PartitionId,
        person_id: &PersonId,
        date: NaiveDate,
        check_out_time: NaiveTime,
    ) -> Result<AttendanceRecord, StoreError> {
        let lock = self.partition_lock(partition_id).await;
        let _guard = lock.lock().await;
        let mut records = self.read_partition(partition_id).await?;
        let closed = close_open_record(&mut records, person_id, date, check_out_time)?;
        self.write_partition(partition_id, &records).await?;
        Ok(closed)
    }

    async fn list_partition(
        &self,
        partition_id: &PartitionId,
    ) -> Result<Vec<AttendanceRecord>, StoreError> {
        let mut records = self.read_partition(partition_id).await?;
        sort_chronologically(&mut records);
        Ok(records)
    }

    async fn list_by_person(
        &self,
        person_id: &PersonId,
    ) -> Result<Vec<(PartitionId, AttendanceRecord)>, StoreError> {
        let mut rows = Vec::new();
        for partition_id in self.known_partitions().await? {
            let records = self.read_partition(&partition_id).await?;
            rows.extend(
                records
                    .into_iter()
                    .filter(|r| &r.person_id == person_id)
                    .map(|r| (partition_id.clone(), r)),
            );
        }
        sort_most_recent_first(&mut rows);
        Ok(rows)
    }
}
