use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::modules::attendance::core::partition::PartitionId;
use crate::modules::attendance::core::record::AttendanceRecord;
use crate::modules::attendance::use_cases::register_attendance::command::RegisterAttendance;
use crate::modules::attendance::use_cases::register_attendance::handler::{
    RegisterAttendanceError, RegistrationKind, RegistrationOutcome,
};
use crate::shared::core::person_id::PersonId;
use crate::shell::http::error_response;
use crate::shell::state::AppState;

#[derive(Deserialize)]
pub struct RegisterAttendanceBody {
    #[serde(alias = "matricula")]
    pub person_id: String,
}

#[derive(Serialize)]
pub struct RegisterAttendanceResponse {
    pub status: RegistrationKind,
    pub partition_id: PartitionId,
    pub record: AttendanceRecord,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

impl From<RegistrationOutcome> for RegisterAttendanceResponse {
    fn from(outcome: RegistrationOutcome) -> Self {
        Self {
            status: outcome.kind,
            partition_id: outcome.partition_id,
            record: outcome.record,
            warning: outcome.export_warning,
        }
    }
}

pub fn status_for(err: &RegisterAttendanceError) -> StatusCode {
    match err {
        RegisterAttendanceError::PersonNotFound(_) => StatusCode::NOT_FOUND,
        RegisterAttendanceError::AlreadyComplete { .. } => StatusCode::CONFLICT,
        RegisterAttendanceError::StoreUnavailable(_)
        | RegisterAttendanceError::DirectoryUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        RegisterAttendanceError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

pub async fn handle(
    State(state): State<AppState>,
    body: Result<Json<RegisterAttendanceBody>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => {
            return error_response(
                StatusCode::UNPROCESSABLE_ENTITY,
                "invalid_body",
                rejection.body_text(),
            );
        }
    };

    let person_id = match PersonId::parse(&body.person_id) {
        Ok(id) => id,
        Err(err) => return error_response(StatusCode::BAD_REQUEST, "invalid_person_id", err),
    };

    match state
        .register_handler
        .handle(RegisterAttendance::new(person_id))
        .await
    {
        Ok(outcome) => {
            let status = match outcome.kind {
                RegistrationKind::CheckIn => StatusCode::CREATED,
                RegistrationKind::CheckOut => StatusCode::OK,
            };
            (status, Json(RegisterAttendanceResponse::from(outcome))).into_response()
        }
        Err(err) => error_response(status_for(&err), err.kind(), err),
    }
}
