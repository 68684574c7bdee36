use anyhow::Context;
use std::sync::Arc;

use attendance::modules::attendance::adapters::outbound::csv_report_exporter::CsvReportExporter;
use attendance::modules::attendance::use_cases::list_attendance::handler::ListAttendanceHandler;
use attendance::modules::attendance::use_cases::register_attendance::handler::RegisterAttendanceHandler;
use attendance::shared::core::clock::SystemClock;
use attendance::shared::infrastructure::attendance_store::json_file::JsonFileStore;
use attendance::shared::infrastructure::directory::in_memory::InMemoryDirectory;
use attendance::shell::config::AppConfig;
use attendance::shell::graphql::GRAPHQL_PATH;
use attendance::shell::state::AppState;
use attendance::shell::{http, telemetry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env().context("loading configuration")?;
    telemetry::init();

    let store = Arc::new(
        JsonFileStore::open(&config.data_dir)
            .await
            .with_context(|| format!("opening attendance store at {}", config.data_dir.display()))?,
    );
    let directory = Arc::new(
        InMemoryDirectory::from_seed_file(&config.directory_seed).with_context(|| {
            format!("loading directory seed {}", config.directory_seed.display())
        })?,
    );
    tracing::info!(people = directory.len(), "directory loaded");

    let clock = Arc::new(SystemClock::new(config.utc_offset));
    let exporter = Arc::new(CsvReportExporter::new(store.clone(), &config.export_dir));

    let register_handler = Arc::new(RegisterAttendanceHandler::new(
        store.clone(),
        directory.clone(),
        exporter,
        clock.clone(),
    ));
    let list_handler = Arc::new(ListAttendanceHandler::new(store, clock));

    let state = AppState {
        register_handler,
        list_handler,
        directory,
    };

    let addr = config.socket_addr()?;
    tracing::info!("HTTP endpoint: http://{}", addr);
    tracing::info!("GraphQL endpoint: http://{}{}", addr, GRAPHQL_PATH);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    axum::serve(listener, http::router(state)).await?;
    Ok(())
}
