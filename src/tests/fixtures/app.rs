// Application state wired against in-memory adapters and a frozen clock.

use chrono::TimeZone;
use std::sync::Arc;
use tempfile::TempDir;

use crate::modules::attendance::adapters::outbound::csv_report_exporter::CsvReportExporter;
use crate::modules::attendance::use_cases::list_attendance::handler::ListAttendanceHandler;
use crate::modules::attendance::use_cases::register_attendance::handler::RegisterAttendanceHandler;
use crate::shared::core::clock::offset_from_hours;
use crate::shared::infrastructure::attendance_store::in_memory::InMemoryStore;
use crate::shared::infrastructure::directory::in_memory::InMemoryDirectory;
use crate::shell::state::AppState;
use crate::tests::fixtures::clock::FixedClock;
use crate::tests::fixtures::directory::make_directory;

pub struct TestApp {
    pub state: AppState,
    pub clock: Arc<FixedClock>,
    pub store: Arc<InMemoryStore>,
    pub directory: Arc<InMemoryDirectory>,
    /// Keeps the export directory alive for the lifetime of the test.
    pub reports: TempDir,
}

/// Monday 2025-03-10 07:30 at UTC-6, inside 2025_Week11.
pub fn make_test_clock() -> Arc<FixedClock> {
    let start = offset_from_hours(-6)
        .unwrap()
        .with_ymd_and_hms(2025, 3, 10, 7, 30, 0)
        .unwrap();
    Arc::new(FixedClock::new(start))
}

pub fn make_test_app() -> TestApp {
    make_test_app_with_store(Arc::new(InMemoryStore::new()))
}

pub fn make_test_app_with_store(store: Arc<InMemoryStore>) -> TestApp {
    let reports = TempDir::new().unwrap();
    let clock = make_test_clock();
    let directory = Arc::new(make_directory());
    let exporter = Arc::new(CsvReportExporter::new(store.clone(), reports.path()));

    let register_handler = Arc::new(RegisterAttendanceHandler::new(
        store.clone(),
        directory.clone(),
        exporter,
        clock.clone(),
    ));
    let list_handler = Arc::new(ListAttendanceHandler::new(store.clone(), clock.clone()));

    TestApp {
        state: AppState {
            register_handler,
            list_handler,
            directory: directory.clone(),
        },
        clock,
        store,
        directory,
        reports,
    }
}
