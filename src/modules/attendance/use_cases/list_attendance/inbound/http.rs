use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::modules::attendance::core::partition::PartitionId;
use crate::modules::attendance::core::record::AttendanceRecord;
use crate::modules::attendance::use_cases::list_attendance::handler::{
    ListAttendanceError, PartitionListing, PersonListing,
};
use crate::shared::core::person_id::PersonId;
use crate::shell::http::error_response;
use crate::shell::state::AppState;

#[derive(Deserialize)]
pub struct ListPartitionParams {
    pub partition_id: Option<String>,
}

#[derive(Serialize)]
pub struct PartitionListingResponse {
    pub partition_id: PartitionId,
    pub total: usize,
    pub records: Vec<AttendanceRecord>,
}

impl From<PartitionListing> for PartitionListingResponse {
    fn from(listing: PartitionListing) -> Self {
        Self {
            partition_id: listing.partition_id,
            total: listing.records.len(),
            records: listing.records,
        }
    }
}

#[derive(Serialize)]
pub struct PersonRecordView {
    pub partition_id: PartitionId,
    #[serde(flatten)]
    pub record: AttendanceRecord,
}

#[derive(Serialize)]
pub struct PersonListingResponse {
    pub person_id: PersonId,
    pub total: usize,
    pub records: Vec<PersonRecordView>,
}

impl From<PersonListing> for PersonListingResponse {
    fn from(listing: PersonListing) -> Self {
        Self {
            person_id: listing.person_id,
            total: listing.records.len(),
            records: listing
                .records
                .into_iter()
                .map(|(partition_id, record)| PersonRecordView {
                    partition_id,
                    record,
                })
                .collect(),
        }
    }
}

fn failure(err: ListAttendanceError) -> Response {
    error_response(StatusCode::SERVICE_UNAVAILABLE, err.kind(), err)
}

pub async fn by_partition(
    State(state): State<AppState>,
    Query(params): Query<ListPartitionParams>,
) -> Response {
    let partition_id = match params.partition_id.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(raw) => match PartitionId::parse(raw) {
            Ok(id) => Some(id),
            Err(err) => {
                return error_response(StatusCode::BAD_REQUEST, "invalid_partition_id", err);
            }
        },
    };

    match state.list_handler.by_partition(partition_id).await {
        Ok(listing) => Json(PartitionListingResponse::from(listing)).into_response(),
        Err(err) => failure(err),
    }
}

pub async fn current_week(State(state): State<AppState>) -> Response {
    match state.list_handler.by_partition(None).await {
        Ok(listing) => Json(PartitionListingResponse::from(listing)).into_response(),
        Err(err) => failure(err),
    }
}

pub async fn by_person(
    State(state): State<AppState>,
    Path(raw_person_id): Path<String>,
) -> Response {
    let person_id = match PersonId::parse(&raw_person_id) {
        Ok(id) => id,
        Err(err) => return error_response(StatusCode::BAD_REQUEST, "invalid_person_id", err),
    };

    match state.list_handler.by_person(person_id).await {
        Ok(listing) => Json(PersonListingResponse::from(listing)).into_response(),
        Err(err) => failure(err),
    }
}
