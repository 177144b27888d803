//! Shared application state for axum handlers.

use std::sync::Arc;

use hortitech_app::event_bus::InProcessEventBus;
use hortitech_app::ports::{Clock, EventPublisher, ScheduleRepository, ZoneRepository};
use hortitech_app::services::schedule_service::ScheduleService;
use hortitech_app::services::zone_service::ZoneService;

/// Application state shared across all axum handlers.
///
/// Generic over the zone repository, schedule repository, event publisher
/// and clock to avoid dynamic dispatch. Both services read zones, so `ZR` is
/// usually an `Arc` around a single adapter. `Clone` is implemented manually
/// so the underlying types themselves do not need to be `Clone`.
pub struct AppState<ZR, SR, EP, C> {
    /// Zone CRUD service.
    pub zone_service: Arc<ZoneService<ZR>>,
    /// Schedule validation and lifecycle service.
    pub schedule_service: Arc<ScheduleService<SR, ZR, EP, C>>,
    /// Broadcast bus the SSE endpoint subscribes to.
    pub event_bus: Arc<InProcessEventBus>,
}

impl<ZR, SR, EP, C> Clone for AppState<ZR, SR, EP, C> {
    fn clone(&self) -> Self {
        Self {
            zone_service: Arc::clone(&self.zone_service),
            schedule_service: Arc::clone(&self.schedule_service),
            event_bus: Arc::clone(&self.event_bus),
        }
    }
}

impl<ZR, SR, EP, C> AppState<ZR, SR, EP, C>
where
    ZR: ZoneRepository + Send + Sync + 'static,
    SR: ScheduleRepository + Send + Sync + 'static,
    EP: EventPublisher + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
{
    /// Create a new application state from service instances.
    pub fn new(
        zone_service: ZoneService<ZR>,
        schedule_service: ScheduleService<SR, ZR, EP, C>,
        event_bus: Arc<InProcessEventBus>,
    ) -> Self {
        Self {
            zone_service: Arc::new(zone_service),
            schedule_service: Arc::new(schedule_service),
            event_bus,
        }
    }
}
