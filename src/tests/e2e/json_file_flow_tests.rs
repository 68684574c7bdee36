use chrono::Duration;
use std::path::Path;
use std::sync::Arc;
use tempfile::tempdir;

use crate::modules::attendance::adapters::outbound::csv_report_exporter::CsvReportExporter;
use crate::modules::attendance::core::partition::PartitionId;
use crate::modules::attendance::use_cases::list_attendance::handler::ListAttendanceHandler;
use crate::modules::attendance::use_cases::register_attendance::command::RegisterAttendance;
use crate::modules::attendance::use_cases::register_attendance::handler::{
    RegisterAttendanceError, RegisterAttendanceHandler, RegistrationKind,
};
use crate::tests::fixtures::clock::FixedClock;
use crate::shared::core::person_id::PersonId;
use crate::shared::infrastructure::attendance_store::json_file::JsonFileStore;
use crate::tests::fixtures::app::make_test_clock;
use crate::tests::fixtures::directory::make_directory;

struct Deployment {
    register: RegisterAttendanceHandler,
    list: ListAttendanceHandler,
}

async fn deploy(data_dir: &Path, export_dir: &Path, clock: Arc<FixedClock>) -> Deployment {
    let store = Arc::new(JsonFileStore::open(data_dir).await.unwrap());
    let exporter = Arc::new(CsvReportExporter::new(store.clone(), export_dir));
    Deployment {
        register: RegisterAttendanceHandler::new(
            store.clone(),
            Arc::new(make_directory()),
            exporter,
            clock.clone(),
        ),
        list: ListAttendanceHandler::new(store, clock),
    }
}

fn register(raw: &str) -> RegisterAttendance {
    RegisterAttendance::new(PersonId::parse(raw).unwrap())
}

#[tokio::test]
async fn survives_a_restart_between_check_in_and_check_out() {
    let data = tempdir().unwrap();
    let reports = tempdir().unwrap();
    let clock = make_test_clock();

    let before = deploy(data.path(), reports.path(), clock.clone()).await;
    let check_in = before.register.handle(register("20231234")).await.unwrap();
    assert_eq!(check_in.kind, RegistrationKind::CheckIn);
    assert_eq!(check_in.record.display_name, "Luisa Torres");
    drop(before);

    clock.advance(Duration::hours(6));
    let after = deploy(data.path(), reports.path(), clock.clone()).await;
    let check_out = after.register.handle(register("20231234")).await.unwrap();
    assert_eq!(check_out.kind, RegistrationKind::CheckOut);
    assert_eq!(check_out.record.attendance_id, check_in.record.attendance_id);

    let err = after.register.handle(register("20231234")).await.unwrap_err();
    assert!(matches!(err, RegisterAttendanceError::AlreadyComplete { .. }));

    let listing = after.list.by_partition(None).await.unwrap();
    assert_eq!(listing.partition_id, PartitionId::parse("2025_Week11").unwrap());
    assert_eq!(listing.records.len(), 1);
    assert!(data.path().join("2025_Week11.json").exists());

    let report =
        std::fs::read_to_string(reports.path().join("asistencia_2025_Week11.csv")).unwrap();
    assert!(report.contains(
        "20231234,Luisa Torres,alumno,Bachillerato General,10/03/2025,07:30,13:30"
    ));
}

#[tokio::test]
async fn leaves_no_record_for_unknown_people() {
    let data = tempdir().unwrap();
    let reports = tempdir().unwrap();
    let deployment = deploy(data.path(), reports.path(), make_test_clock()).await;

    let err = deployment
        .register
        .handle(register("ZZZ_unknown"))
        .await
        .unwrap_err();

    assert!(matches!(err, RegisterAttendanceError::PersonNotFound(_)));
    assert!(deployment.list.by_partition(None).await.unwrap().records.is_empty());
    assert!(!reports.path().join("asistencia_2025_Week11.csv").exists());
}
