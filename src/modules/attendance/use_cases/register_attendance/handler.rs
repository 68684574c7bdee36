use chrono::NaiveDate;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::modules::attendance::adapters::outbound::report_exporter::ReportExporter;
use crate::modules::attendance::core::events::AttendanceEvent;
use crate::modules::attendance::core::evolve::evolve;
use crate::modules::attendance::core::partition::PartitionId;
use crate::modules::attendance::core::record::AttendanceRecord;
use crate::modules::attendance::core::state::AttendanceState;
use crate::modules::attendance::use_cases::register_attendance::command::RegisterAttendance;
use crate::modules::attendance::use_cases::register_attendance::decide::decide_register;
use crate::modules::attendance::use_cases::register_attendance::decision::{DecideError, Decision};
use crate::shared::core::clock::Clock;
use crate::shared::core::person_id::PersonId;
use crate::shared::infrastructure::attendance_store::{AttendanceStore, StoreError};
use crate::shared::infrastructure::directory::{Directory, DirectoryError, Profile};

/// Conditional writes attempted before giving up on a contended (person, day).
pub const MAX_WRITE_ATTEMPTS: usize = 3;

#[derive(Debug, Error)]
pub enum RegisterAttendanceError {
    #[error("person {0} not found")]
    PersonNotFound(PersonId),

    #[error("attendance for {person_id} on {date} is already complete")]
    AlreadyComplete { person_id: PersonId, date: NaiveDate },

    #[error("store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("directory unavailable: {0}")]
    DirectoryUnavailable(String),

    #[error("unexpected: {0}")]
    Unexpected(String),
}

impl RegisterAttendanceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::PersonNotFound(_) => "person_not_found",
            Self::AlreadyComplete { .. } => "already_complete",
            Self::StoreUnavailable(_) => "store_unavailable",
            Self::DirectoryUnavailable(_) => "directory_unavailable",
            Self::Unexpected(_) => "unexpected",
        }
    }
}

impl From<DecideError> for RegisterAttendanceError {
    fn from(reason: DecideError) -> Self {
        match reason {
            DecideError::AlreadyComplete { person_id, date } => {
                Self::AlreadyComplete { person_id, date }
            }
        }
    }
}

impl From<DirectoryError> for RegisterAttendanceError {
    fn from(err: DirectoryError) -> Self {
        match err {
            DirectoryError::NotFound(person_id) => Self::PersonNotFound(person_id),
            DirectoryError::Backend(reason) => Self::DirectoryUnavailable(reason),
        }
    }
}

impl From<StoreError> for RegisterAttendanceError {
    fn from(err: StoreError) -> Self {
        Self::StoreUnavailable(err.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RegistrationKind {
    CheckIn,
    CheckOut,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationOutcome {
    pub kind: RegistrationKind,
    pub partition_id: PartitionId,
    pub record: AttendanceRecord,
    /// Set when the write landed but the partition report could not be
    /// regenerated.
    pub export_warning: Option<String>,
}

pub struct RegisterAttendanceHandler {
    store: Arc<dyn AttendanceStore>,
    directory: Arc<dyn Directory>,
    exporter: Arc<dyn ReportExporter>,
    clock: Arc<dyn Clock>,
}

impl RegisterAttendanceHandler {
    pub fn new(
        store: Arc<dyn AttendanceStore>,
        directory: Arc<dyn Directory>,
        exporter: Arc<dyn ReportExporter>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            directory,
            exporter,
            clock,
        }
    }

    pub async fn handle(
        &self,
        command: RegisterAttendance,
    ) -> Result<RegistrationOutcome, RegisterAttendanceError> {
        let profile = self.directory.resolve(&command.person_id).await?;

        let now = self.clock.now();
        let partition_id = PartitionId::for_date(now.date_naive());

        let (kind, record) = self
            .transition(&partition_id, &command, &profile, now.naive_local())
            .await
            .inspect_err(|err| {
                if matches!(err, RegisterAttendanceError::StoreUnavailable(_)) {
                    error!(person_id = %command.person_id, partition_id = %partition_id, error = %err, "attendance write failed");
                }
            })?;
        info!(person_id = %record.person_id, partition_id = %partition_id, kind = ?kind, "attendance registered");

        let export_warning = match self.exporter.export(&partition_id).await {
            Ok(path) => {
                debug!(partition_id = %partition_id, path = %path.display(), "partition report refreshed");
                None
            }
            Err(err) => {
                warn!(partition_id = %partition_id, error = %err, "partition report export failed");
                Some(err.to_string())
            }
        };

        Ok(RegistrationOutcome {
            kind,
            partition_id,
            record,
            export_warning,
        })
    }

    async fn transition(
        &self,
        partition_id: &PartitionId,
        command: &RegisterAttendance,
        profile: &Profile,
        at: chrono::NaiveDateTime,
    ) -> Result<(RegistrationKind, AttendanceRecord), RegisterAttendanceError> {
        let date = at.date();
        for attempt in 1..=MAX_WRITE_ATTEMPTS {
            let existing = self
                .store
                .find(partition_id, &command.person_id, date)
                .await?;
            let state = AttendanceState::from(existing);

            let event = match decide_register(&state, command, profile, at) {
                Decision::Accepted { event } => event,
                Decision::Rejected { reason } => return Err(reason.into()),
            };

            let written = match (&event, evolve(state, event.clone())) {
                (AttendanceEvent::CheckInRegistered(_), AttendanceState::Open(record)) => self
                    .store
                    .insert_check_in(partition_id, record.clone())
                    .await
                    .map(|()| (RegistrationKind::CheckIn, record)),
                (AttendanceEvent::CheckOutRegistered(e), AttendanceState::Complete(_)) => self
                    .store
                    .set_check_out(partition_id, &e.person_id, e.date, e.check_out_time)
                    .await
                    .map(|record| (RegistrationKind::CheckOut, record)),
                (event, next) => {
                    return Err(RegisterAttendanceError::Unexpected(format!(
                        "{event:?} did not advance the attendance state, got {next:?}"
                    )));
                }
            };

            match written {
                Ok(done) => return Ok(done),
                Err(StoreError::Conflict { .. }) => {
                    debug!(person_id = %command.person_id, attempt, "conflicting attendance write, reloading");
                }
                Err(err) => return Err(err.into()),
            }
        }
        Err(RegisterAttendanceError::StoreUnavailable(format!(
            "gave up after {MAX_WRITE_ATTEMPTS} conflicting writes for {}",
            command.person_id
        )))
    }
}
