use std::sync::Arc;
use thiserror::Error;
use tracing::error;

use crate::modules::attendance::core::partition::PartitionId;
use crate::modules::attendance::core::record::AttendanceRecord;
use crate::shared::core::clock::Clock;
use crate::shared::core::person_id::PersonId;
use crate::shared::infrastructure::attendance_store::{AttendanceStore, StoreError};

#[derive(Debug, Error)]
pub enum ListAttendanceError {
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),
}

impl ListAttendanceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::StoreUnavailable(_) => "store_unavailable",
        }
    }
}

impl From<StoreError> for ListAttendanceError {
    fn from(err: StoreError) -> Self {
        Self::StoreUnavailable(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionListing {
    pub partition_id: PartitionId,
    pub records: Vec<AttendanceRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonListing {
    pub person_id: PersonId,
    pub records: Vec<(PartitionId, AttendanceRecord)>,
}

pub struct ListAttendanceHandler {
    store: Arc<dyn AttendanceStore>,
    clock: Arc<dyn Clock>,
}

impl ListAttendanceHandler {
    pub fn new(store: Arc<dyn AttendanceStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Lists one partition, defaulting to the week the clock is in.
    pub async fn by_partition(
        &self,
        partition_id: Option<PartitionId>,
    ) -> Result<PartitionListing, ListAttendanceError> {
        let partition_id = partition_id.unwrap_or_else(|| PartitionId::current(&*self.clock));
        let records = self
            .store
            .list_partition(&partition_id)
            .await
            .inspect_err(|err| {
                error!(partition_id = %partition_id, error = %err, "partition listing failed");
            })?;
        Ok(PartitionListing {
            partition_id,
            records,
        })
    }

    pub async fn by_person(
        &self,
        person_id: PersonId,
    ) -> Result<PersonListing, ListAttendanceError> {
        let records = self
            .store
            .list_by_person(&person_id)
            .await
            .inspect_err(|err| {
                error!(person_id = %person_id, error = %err, "person listing failed");
            })?;
        Ok(PersonListing { person_id, records })
    }
}
