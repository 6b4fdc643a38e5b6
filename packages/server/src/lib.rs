#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for the fieldscan compliance platform.
//!
//! Serves the REST API for listing compliance reports and running the
//! geospatial compliance clustering analysis. Reports are loaded into an
//! in-memory store at startup from a JSON file produced by the upstream
//! reporting workflow.

mod handlers;

use std::path::Path;
use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware, web};
use fieldscan_store::{InMemoryReportStore, ReportStore};

/// Shared application state.
pub struct AppState {
    /// Read access to the compliance report set.
    pub store: Arc<dyn ReportStore>,
}

/// Starts the fieldscan API server.
///
/// Loads the report store from the path in `REPORTS_PATH` (default
/// `data/reports.json`) and starts the Actix-Web HTTP server on
/// `BIND_ADDR`:`PORT`. This is a regular async function — the caller is
/// responsible for providing the async runtime (e.g. via
/// `#[actix_web::main]`).
///
/// # Errors
///
/// Returns an `std::io::Result` error if the HTTP server fails to bind or
/// encounters a runtime error.
///
/// # Panics
///
/// Panics if the report data file exists but cannot be read or parsed.
#[allow(clippy::future_not_send)]
pub async fn run_server() -> std::io::Result<()> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    let reports_path =
        std::env::var("REPORTS_PATH").unwrap_or_else(|_| "data/reports.json".to_string());
    log::info!("Loading report store from {reports_path}...");
    let store = InMemoryReportStore::from_json_file(Path::new(&reports_path))
        .expect("Failed to load report store");

    let state = web::Data::new(AppState {
        store: Arc::new(store),
    });

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    log::info!("Starting server on {bind_addr}:{port}");

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .service(
                web::scope("/api")
                    .route("/health", web::get().to(handlers::health))
                    .route("/reports", web::get().to(handlers::reports))
                    .route(
                        "/analytics/compliance-clusters",
                        web::get().to(handlers::compliance_clusters),
                    ),
            )
    })
    .bind((bind_addr, port))?
    .run()
    .await
}
