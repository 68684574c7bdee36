use axum::{
    Extension, Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use serde_json::json;
use std::fmt::Display;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::modules::attendance::use_cases::list_attendance::inbound::http as list_http;
use crate::modules::attendance::use_cases::lookup_person::inbound::http as lookup_http;
use crate::modules::attendance::use_cases::register_attendance::inbound::http as register_http;
use crate::shell::graphql::{self, GRAPHQL_PATH, build_schema};
use crate::shell::state::AppState;

const ENDPOINTS: &[&str] = &[
    "POST /api/asistencias/registrar",
    "GET /api/asistencias/semana?partition_id=<YYYY_WeekNN>",
    "GET /api/asistencias/semana-actual",
    "GET /api/asistencias/matricula/{person_id}",
    "GET /api/usuarios/{person_id}",
    "GET|POST /gql",
];

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    message: String,
}

/// Renders `{ "error": <kind>, "message": <text> }` with the given status.
pub fn error_response(status: StatusCode, kind: &str, message: impl Display) -> Response {
    let body = ErrorBody {
        error: kind,
        message: message.to_string(),
    };
    (status, Json(body)).into_response()
}

async fn index() -> impl IntoResponse {
    Json(json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": ENDPOINTS,
    }))
}

pub fn router(state: AppState) -> Router {
    let schema = build_schema(state.clone());

    Router::new()
        .route("/", get(index))
        .route("/api/asistencias/registrar", post(register_http::handle))
        .route("/api/asistencias/semana", get(list_http::by_partition))
        .route("/api/asistencias/semana-actual", get(list_http::current_week))
        .route(
            "/api/asistencias/matricula/{person_id}",
            get(list_http::by_person),
        )
        .route("/api/usuarios/{person_id}", get(lookup_http::handle))
        .route(GRAPHQL_PATH, get(graphql::graphiql).post(graphql::graphql))
        .layer(Extension(schema))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
