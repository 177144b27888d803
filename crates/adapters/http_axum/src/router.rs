//! Axum router assembly.

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use hortitech_app::ports::{Clock, EventPublisher, ScheduleRepository, ZoneRepository};

use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// Mounts the JSON API under `/api` next to a plain `/health` probe.
/// Includes a [`TraceLayer`] that logs each HTTP request/response at the
/// `DEBUG` level using the `tracing` ecosystem.
pub fn build<ZR, SR, EP, C>(state: AppState<ZR, SR, EP, C>) -> Router
where
    ZR: ZoneRepository + Send + Sync + 'static,
    SR: ScheduleRepository + Send + Sync + 'static,
    EP: EventPublisher + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .nest("/api", crate::api::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
