//! In-memory port implementations for service and handler tests.
//!
//! Compiled for this crate's own tests and, behind the `testing` feature, for
//! the adapters that drive the services.

#![allow(clippy::missing_panics_doc)]

use std::collections::BTreeMap;
use std::future::Future;
use std::sync::Mutex;

use hortitech_domain::error::{HortiTechError, NotFoundError};
use hortitech_domain::event::Event;
use hortitech_domain::id::{ScheduleId, ZoneId};
use hortitech_domain::schedule::{NewSchedule, ResourceKind, ScheduleEntry};
use hortitech_domain::zone::{NewZone, Zone};

use crate::ports::{EventPublisher, ScheduleRepository, ZoneRepository};

#[derive(Default)]
pub struct InMemoryZoneRepo {
    store: Mutex<BTreeMap<ZoneId, Zone>>,
    next_id: Mutex<i64>,
}

impl ZoneRepository for InMemoryZoneRepo {
    fn create(&self, zone: NewZone) -> impl Future<Output = Result<Zone, HortiTechError>> + Send {
        let mut next_id = self.next_id.lock().unwrap();
        *next_id += 1;
        let zone = zone.with_id(ZoneId::new(*next_id));
        self.store.lock().unwrap().insert(zone.id, zone.clone());
        async { Ok(zone) }
    }

    fn get_by_id(
        &self,
        id: ZoneId,
    ) -> impl Future<Output = Result<Option<Zone>, HortiTechError>> + Send {
        let result = self.store.lock().unwrap().get(&id).cloned();
        async { Ok(result) }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Zone>, HortiTechError>> + Send {
        let result: Vec<Zone> = self.store.lock().unwrap().values().cloned().collect();
        async { Ok(result) }
    }

    fn update(&self, zone: Zone) -> impl Future<Output = Result<Zone, HortiTechError>> + Send {
        self.store.lock().unwrap().insert(zone.id, zone.clone());
        async { Ok(zone) }
    }

    fn delete(&self, id: ZoneId) -> impl Future<Output = Result<(), HortiTechError>> + Send {
        self.store.lock().unwrap().remove(&id);
        async { Ok(()) }
    }
}

#[derive(Default)]
pub struct InMemoryScheduleRepo {
    store: Mutex<BTreeMap<ScheduleId, ScheduleEntry>>,
    next_id: Mutex<i64>,
}

impl InMemoryScheduleRepo {
    /// Insert an entry as-is, bypassing validation, to set up past windows.
    pub fn seed(&self, entry: ScheduleEntry) {
        let mut next_id = self.next_id.lock().unwrap();
        *next_id = (*next_id).max(entry.id.as_i64());
        self.store.lock().unwrap().insert(entry.id, entry);
    }

    pub fn len(&self) -> usize {
        self.store.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.lock().unwrap().is_empty()
    }

    fn missing(id: ScheduleId) -> HortiTechError {
        NotFoundError {
            entity: "Schedule",
            id: id.to_string(),
        }
        .into()
    }

    fn sorted(mut entries: Vec<ScheduleEntry>) -> Vec<ScheduleEntry> {
        entries.sort_by_key(|e| (e.start_at, e.id));
        entries
    }
}

impl ScheduleRepository for InMemoryScheduleRepo {
    fn create(
        &self,
        schedule: NewSchedule,
    ) -> impl Future<Output = Result<ScheduleEntry, HortiTechError>> + Send {
        let mut next_id = self.next_id.lock().unwrap();
        *next_id += 1;
        let entry = schedule.with_id(ScheduleId::new(*next_id));
        self.store.lock().unwrap().insert(entry.id, entry.clone());
        async { Ok(entry) }
    }

    fn get_by_id(
        &self,
        id: ScheduleId,
    ) -> impl Future<Output = Result<Option<ScheduleEntry>, HortiTechError>> + Send {
        let result = self.store.lock().unwrap().get(&id).cloned();
        async { Ok(result) }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<ScheduleEntry>, HortiTechError>> + Send {
        let result = Self::sorted(self.store.lock().unwrap().values().cloned().collect());
        async { Ok(result) }
    }

    fn find_by_zone(
        &self,
        zone_id: ZoneId,
        resource: Option<ResourceKind>,
    ) -> impl Future<Output = Result<Vec<ScheduleEntry>, HortiTechError>> + Send {
        let result = Self::sorted(
            self.store
                .lock()
                .unwrap()
                .values()
                .filter(|e| e.zone_id == zone_id)
                .filter(|e| resource.is_none_or(|r| e.resource == r))
                .cloned()
                .collect(),
        );
        // Suspend once so concurrent callers interleave between read and write.
        async {
            tokio::task::yield_now().await;
            Ok(result)
        }
    }

    fn update(
        &self,
        schedule: ScheduleEntry,
    ) -> impl Future<Output = Result<ScheduleEntry, HortiTechError>> + Send {
        let result = match self.store.lock().unwrap().get_mut(&schedule.id) {
            Some(slot) => {
                *slot = schedule.clone();
                Ok(schedule)
            }
            None => Err(Self::missing(schedule.id)),
        };
        async { result }
    }

    fn set_paused(
        &self,
        id: ScheduleId,
        paused: bool,
    ) -> impl Future<Output = Result<(), HortiTechError>> + Send {
        let result = match self.store.lock().unwrap().get_mut(&id) {
            Some(entry) => {
                entry.paused = paused;
                Ok(())
            }
            None => Err(Self::missing(id)),
        };
        async { result }
    }

    fn delete(&self, id: ScheduleId) -> impl Future<Output = Result<(), HortiTechError>> + Send {
        let result = match self.store.lock().unwrap().remove(&id) {
            Some(_) => Ok(()),
            None => Err(Self::missing(id)),
        };
        async { result }
    }
}

/// Publisher that keeps every event for later assertions.
#[derive(Default)]
pub struct RecordingPublisher {
    events: Mutex<Vec<Event>>,
}

impl RecordingPublisher {
    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }
}

impl EventPublisher for RecordingPublisher {
    fn publish(&self, event: Event) -> impl Future<Output = Result<(), HortiTechError>> + Send {
        self.events.lock().unwrap().push(event);
        async { Ok(()) }
    }
}
