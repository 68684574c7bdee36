use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use chrono::{Duration, TimeZone};
use http_body_util::BodyExt;
use std::sync::Arc;
use tower::ServiceExt;

use crate::modules::attendance::core::partition::PartitionId;
use crate::shared::core::clock::offset_from_hours;
use crate::shared::infrastructure::attendance_store::AttendanceStore;
use crate::shared::infrastructure::attendance_store::in_memory::InMemoryStore;
use crate::shell::http::router;
use crate::tests::fixtures::app::{make_test_app, make_test_app_with_store};

fn register(person_id: &str) -> Request<Body> {
    Request::post("/api/asistencias/registrar")
        .header("content-type", "application/json")
        .body(Body::from(format!(r#"{{"person_id":"{person_id}"}}"#)))
        .unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn registers_a_full_day_and_refreshes_the_weekly_report() {
    let test_app = make_test_app();
    let app = router(test_app.state.clone());

    let (status, check_in) = send(&app, register("A001")).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(check_in["status"], "check-in");

    test_app.clock.advance(Duration::minutes(270));
    let (status, check_out) = send(&app, register("A001")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(check_out["record"]["check_out_time"], "12:00:00");

    let (status, rejected) = send(&app, register("A001")).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(rejected["error"], "already_complete");

    let (status, _) = send(&app, register("ZZZ_unknown")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, listing) = send(
        &app,
        Request::get("/api/asistencias/semana-actual")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(listing["total"], 1);
    assert_eq!(listing["records"][0]["check_in_time"], "07:30:00");

    let report = std::fs::read_to_string(
        test_app
            .reports
            .path()
            .join("asistencia_2025_Week11.csv"),
    )
    .unwrap();
    assert_eq!(
        report,
        "person_id,display_name,category,program,date,check_in_time,check_out_time\n\
         A001,Juan Pérez García,alumno,Ingeniería en Sistemas,10/03/2025,07:30,12:00\n"
    );
}

#[tokio::test]
async fn lists_open_sessions_with_the_sentinel_in_the_report() {
    let test_app = make_test_app();
    let app = router(test_app.state.clone());

    send(&app, register("A002")).await;
    test_app.clock.advance(Duration::minutes(5));
    send(&app, register("M001")).await;

    let report = std::fs::read_to_string(
        test_app
            .reports
            .path()
            .join("asistencia_2025_Week11.csv"),
    )
    .unwrap();
    let rows: Vec<&str> = report.lines().skip(1).collect();
    assert_eq!(
        rows,
        vec![
            "A002,María González López,alumno,Ingeniería Industrial,10/03/2025,07:30,--",
            "M001,Dr. Roberto Sánchez,maestro,Ingeniería en Sistemas,10/03/2025,07:35,--",
        ]
    );
}

#[tokio::test]
async fn keeps_each_day_in_its_own_week() {
    let test_app = make_test_app();
    let app = router(test_app.state.clone());

    send(&app, register("A001")).await;
    test_app.clock.advance(Duration::days(7));
    let (status, next_week) = send(&app, register("A001")).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(next_week["partition_id"], "2025_Week12");

    let (_, history) = send(
        &app,
        Request::get("/api/asistencias/matricula/A001")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(history["total"], 2);
    assert_eq!(history["records"][0]["partition_id"], "2025_Week12");
    assert_eq!(history["records"][1]["partition_id"], "2025_Week11");
}

#[tokio::test]
async fn names_the_new_year_week_from_its_monday() {
    let test_app = make_test_app();
    let new_years_eve = offset_from_hours(-6)
        .unwrap()
        .with_ymd_and_hms(2024, 12, 31, 9, 0, 0)
        .unwrap();
    test_app.clock.set(new_years_eve);
    let app = router(test_app.state.clone());

    let (_, check_in) = send(&app, register("A001")).await;

    assert_eq!(check_in["partition_id"], "2025_Week01");
    assert_eq!(check_in["record"]["date"], "2024-12-31");
}

#[tokio::test]
async fn concurrent_registrations_never_duplicate_a_check_in() {
    let store = Arc::new(InMemoryStore::new());
    store.set_delay_write_ms(20);
    let test_app = make_test_app_with_store(store.clone());
    let app = router(test_app.state.clone());

    let (first, second) = tokio::join!(send(&app, register("A001")), send(&app, register("A001")));

    let mut statuses = vec![first.0, second.0];
    statuses.sort();
    assert_eq!(statuses, vec![StatusCode::OK, StatusCode::CREATED]);

    let records = store
        .list_partition(&PartitionId::parse("2025_Week11").unwrap())
        .await
        .unwrap();
    assert_eq!(records.len(), 1);
    assert!(records[0].check_out_time.is_some());
}
