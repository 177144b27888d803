//! JSON REST API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod schedules;
pub mod sse;
#[allow(clippy::missing_errors_doc)]
pub mod zones;

use axum::Router;
use axum::routing::{get, post};

use hortitech_app::ports::{Clock, EventPublisher, ScheduleRepository, ZoneRepository};

use crate::state::AppState;

/// Build the `/api` sub-router.
pub fn routes<ZR, SR, EP, C>() -> Router<AppState<ZR, SR, EP, C>>
where
    ZR: ZoneRepository + Send + Sync + 'static,
    SR: ScheduleRepository + Send + Sync + 'static,
    EP: EventPublisher + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
{
    Router::new()
        // Zones
        .route(
            "/zones",
            get(zones::list::<ZR, SR, EP, C>).post(zones::create::<ZR, SR, EP, C>),
        )
        .route(
            "/zones/{id}",
            get(zones::get::<ZR, SR, EP, C>)
                .put(zones::update::<ZR, SR, EP, C>)
                .delete(zones::delete::<ZR, SR, EP, C>),
        )
        .route(
            "/zones/{id}/schedules",
            get(schedules::list_for_zone::<ZR, SR, EP, C>),
        )
        // Schedules
        .route("/schedules", post(schedules::create::<ZR, SR, EP, C>))
        .route(
            "/schedules/validate",
            post(schedules::validate::<ZR, SR, EP, C>),
        )
        .route(
            "/schedules/{id}",
            get(schedules::get::<ZR, SR, EP, C>)
                .put(schedules::update::<ZR, SR, EP, C>)
                .delete(schedules::delete::<ZR, SR, EP, C>),
        )
        .route(
            "/schedules/{id}/toggle",
            post(schedules::toggle::<ZR, SR, EP, C>),
        )
        // Events
        .route("/events/stream", get(sse::stream::<ZR, SR, EP, C>))
}
