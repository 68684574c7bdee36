use chrono::NaiveTime;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

use crate::modules::attendance::adapters::outbound::report_exporter::{
    ExportError, ReportExporter,
};
use crate::modules::attendance::core::partition::PartitionId;
use crate::modules::attendance::core::record::AttendanceRecord;
use crate::shared::infrastructure::attendance_store::AttendanceStore;

pub const HEADER: [&str; 7] = [
    "person_id",
    "display_name",
    "category",
    "program",
    "date",
    "check_in_time",
    "check_out_time",
];
pub const OPEN_SESSION: &str = "--";
const DATE_FORMAT: &str = "%d/%m/%Y";
const TIME_FORMAT: &str = "%H:%M";

/// Exports of one partition run one at a time, so the last export to finish
/// has read every write committed before it started.
pub struct CsvReportExporter {
    store: Arc<dyn AttendanceStore>,
    export_dir: PathBuf,
    locks: Mutex<HashMap<PartitionId, Arc<Mutex<()>>>>,
}

impl CsvReportExporter {
    pub fn new(store: Arc<dyn AttendanceStore>, export_dir: impl Into<PathBuf>) -> Self {
        Self {
            store,
            export_dir: export_dir.into(),
            locks: Mutex::new(HashMap::new()),
        }
    }

    async fn partition_lock(&self, partition_id: &PartitionId) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().await;
        locks.entry(partition_id.clone()).or_default().clone()
    }

    pub fn report_path(&self, partition_id: &PartitionId) -> PathBuf {
        report_path(&self.export_dir, partition_id)
    }
}

pub fn report_path(export_dir: &Path, partition_id: &PartitionId) -> PathBuf {
    export_dir.join(format!("asistencia_{}.csv", partition_id.as_str()))
}

fn format_time(time: NaiveTime) -> String {
    time.format(TIME_FORMAT).to_string()
}

pub fn render(records: &[AttendanceRecord]) -> Result<Vec<u8>, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(HEADER)?;
    for record in records {
        writer.write_record([
            record.person_id.as_str().to_string(),
            record.display_name.clone(),
            record.category.as_str().to_string(),
            record.program.clone(),
            record.date.format(DATE_FORMAT).to_string(),
            format_time(record.check_in_time),
            record
                .check_out_time
                .map(format_time)
                .unwrap_or_else(|| OPEN_SESSION.to_string()),
        ])?;
    }
    writer
        .into_inner()
        .map_err(|err| ExportError::Io(err.into_error()))
}

#[async_trait::async_trait]
impl ReportExporter for CsvReportExporter {
    async fn export(&self, partition_id: &PartitionId) -> Result<PathBuf, ExportError> {
        let lock = self.partition_lock(partition_id).await;
        let _guard = lock.lock().await;

        let records = self.store.list_partition(partition_id).await?;
        let bytes = render(&records)?;

        tokio::fs::create_dir_all(&self.export_dir).await?;
        let path = self.report_path(partition_id);
        let tmp = path.with_extension(format!("csv.{}.tmp", Uuid::now_v7().simple()));
        if let Err(err) = tokio::fs::write(&tmp, bytes).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(err.into());
        }
        tokio::fs::rename(&tmp, &path).await?;

        debug!(partition_id = %partition_id, rows = records.len(), path = %path.display(), "report exported");
        Ok(path)
    }
}
