use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;

use crate::modules::attendance::core::partition::PartitionId;
use crate::shared::infrastructure::attendance_store::StoreError;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to read partition for export: {0}")]
    Store(#[from] StoreError),

    #[error("failed to encode report: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to write report: {0}")]
    Io(#[from] std::io::Error),
}

/// Regenerates the tabular report of a partition from scratch.
#[async_trait]
pub trait ReportExporter: Send + Sync {
    async fn export(&self, partition_id: &PartitionId) -> Result<PathBuf, ExportError>;
}
