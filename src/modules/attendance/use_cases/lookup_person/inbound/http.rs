use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::shared::core::person_id::PersonId;
use crate::shared::infrastructure::directory::DirectoryError;
use crate::shell::http::error_response;
use crate::shell::state::AppState;

pub async fn handle(State(state): State<AppState>, Path(raw_person_id): Path<String>) -> Response {
    let person_id = match PersonId::parse(&raw_person_id) {
        Ok(id) => id,
        Err(err) => return error_response(StatusCode::BAD_REQUEST, "invalid_person_id", err),
    };

    match state.directory.resolve(&person_id).await {
        Ok(profile) => Json(profile).into_response(),
        Err(err @ DirectoryError::NotFound(_)) => {
            error_response(StatusCode::NOT_FOUND, "person_not_found", err)
        }
        Err(err @ DirectoryError::Backend(_)) => {
            error_response(StatusCode::SERVICE_UNAVAILABLE, "directory_unavailable", err)
        }
    }
}
