//! A ready-made [`AppState`] over the in-memory ports for handler tests.

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use hortitech_app::event_bus::InProcessEventBus;
use hortitech_app::ports::FixedClock;
use hortitech_app::services::schedule_service::ScheduleService;
use hortitech_app::services::zone_service::ZoneService;
use hortitech_app::testing::{InMemoryScheduleRepo, InMemoryZoneRepo};
use hortitech_domain::time::Timestamp;

use crate::state::AppState;

pub type TestState = AppState<
    Arc<InMemoryZoneRepo>,
    Arc<InMemoryScheduleRepo>,
    Arc<InProcessEventBus>,
    Arc<FixedClock>,
>;

/// Handles kept by a test to seed data and move time.
pub struct Fixture {
    pub state: TestState,
    pub schedules: Arc<InMemoryScheduleRepo>,
    pub clock: Arc<FixedClock>,
    pub event_bus: Arc<InProcessEventBus>,
}

/// 2026-06-01 at the given UTC hour and minute.
pub fn at(hour: u32, minute: u32) -> Timestamp {
    Utc.with_ymd_and_hms(2026, 6, 1, hour, minute, 0).unwrap()
}

/// State with an empty store and the clock at 06:00.
pub fn fixture() -> Fixture {
    let zones = Arc::new(InMemoryZoneRepo::default());
    let schedules = Arc::new(InMemoryScheduleRepo::default());
    let event_bus = Arc::new(InProcessEventBus::new(16));
    let clock = Arc::new(FixedClock::new(at(6, 0)));

    let state = AppState::new(
        ZoneService::new(Arc::clone(&zones)),
        ScheduleService::new(
            Arc::clone(&schedules),
            zones,
            Arc::clone(&event_bus),
            Arc::clone(&clock),
        ),
        Arc::clone(&event_bus),
    );

    Fixture {
        state,
        schedules,
        clock,
        event_bus,
    }
}
