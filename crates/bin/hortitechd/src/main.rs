//! # hortitechd — HortiTech scheduling daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Load configuration (`hortitech.toml` plus environment overrides)
//! - Initialize `tracing` with the configured filter
//! - Initialize the `SQLite` connection pool and run migrations
//! - Construct repository implementations (adapters)
//! - Construct application services, injecting repositories via port traits
//! - Spawn the lifecycle monitor that announces window openings and closings
//! - Build the axum router, bind to a TCP port and serve
//! - Shut down gracefully on Ctrl-C
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use hortitech_adapter_http_axum::router;
use hortitech_adapter_http_axum::state::AppState;
use hortitech_adapter_storage_sqlite_sqlx::{
    Config as StorageConfig, SqliteScheduleRepository, SqliteZoneRepository,
};
use hortitech_app::event_bus::InProcessEventBus;
use hortitech_app::lifecycle_monitor::LifecycleMonitor;
use hortitech_app::ports::SystemClock;
use hortitech_app::services::schedule_service::ScheduleService;
use hortitech_app::services::zone_service::ZoneService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = config::Config::load().context("failed to load configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .init();

    // Database
    let db = StorageConfig {
        database_url: config.database_url().to_string(),
    }
    .build()
    .await
    .context("failed to open database")?;
    let pool = db.pool().clone();

    // Repositories
    let zone_repo = Arc::new(SqliteZoneRepository::new(pool.clone()));
    let schedule_repo = Arc::new(SqliteScheduleRepository::new(pool));

    // Event bus
    let event_bus = Arc::new(InProcessEventBus::new(256));

    // Background tasks
    if config.monitor.enabled {
        let monitor = LifecycleMonitor::new(
            Arc::clone(&schedule_repo),
            Arc::clone(&event_bus),
            SystemClock,
        );
        tokio::spawn(monitor.run(config.monitor.interval()));
    }

    // Services
    let zone_service = ZoneService::new(Arc::clone(&zone_repo));
    let schedule_service =
        ScheduleService::new(schedule_repo, zone_repo, Arc::clone(&event_bus), SystemClock);

    // HTTP
    let state = AppState::new(zone_service, schedule_service, event_bus);
    let app = router::build(state);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;
    tracing::info!(%bind_addr, "hortitechd listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("hortitechd stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for Ctrl-C, running until killed");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}
