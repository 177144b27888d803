//! Storage port — repository traits for persistence.
//!
//! Identifiers are assigned by the storage adapter on `create`.

use std::future::Future;
use std::sync::Arc;

use hortitech_domain::error::HortiTechError;
use hortitech_domain::id::{ScheduleId, ZoneId};
use hortitech_domain::schedule::{NewSchedule, ResourceKind, ScheduleEntry};
use hortitech_domain::zone::{NewZone, Zone};

/// Repository for persisting and querying [`Zone`]s.
pub trait ZoneRepository {
    /// Persist a new zone and return it with its assigned id.
    fn create(&self, zone: NewZone) -> impl Future<Output = Result<Zone, HortiTechError>> + Send;

    /// Get a zone by its unique identifier.
    fn get_by_id(
        &self,
        id: ZoneId,
    ) -> impl Future<Output = Result<Option<Zone>, HortiTechError>> + Send;

    /// Get all zones.
    fn get_all(&self) -> impl Future<Output = Result<Vec<Zone>, HortiTechError>> + Send;

    /// Update an existing zone.
    fn update(&self, zone: Zone) -> impl Future<Output = Result<Zone, HortiTechError>> + Send;

    /// Delete a zone and every schedule it owns.
    fn delete(&self, id: ZoneId) -> impl Future<Output = Result<(), HortiTechError>> + Send;
}

/// Repository for persisting and querying [`ScheduleEntry`]s.
pub trait ScheduleRepository {
    /// Persist a new schedule and return it with its assigned id.
    fn create(
        &self,
        schedule: NewSchedule,
    ) -> impl Future<Output = Result<ScheduleEntry, HortiTechError>> + Send;

    /// Get a schedule by its unique identifier.
    fn get_by_id(
        &self,
        id: ScheduleId,
    ) -> impl Future<Output = Result<Option<ScheduleEntry>, HortiTechError>> + Send;

    /// Get all schedules, ordered by start.
    fn get_all(&self) -> impl Future<Output = Result<Vec<ScheduleEntry>, HortiTechError>> + Send;

    /// Get the schedules of a zone, optionally restricted to one resource
    /// kind, ordered by start.
    fn find_by_zone(
        &self,
        zone_id: ZoneId,
        resource: Option<ResourceKind>,
    ) -> impl Future<Output = Result<Vec<ScheduleEntry>, HortiTechError>> + Send;

    /// Overwrite the window, description and irrigation type of a schedule.
    fn update(
        &self,
        schedule: ScheduleEntry,
    ) -> impl Future<Output = Result<ScheduleEntry, HortiTechError>> + Send;

    /// Set only the pause flag.
    fn set_paused(
        &self,
        id: ScheduleId,
        paused: bool,
    ) -> impl Future<Output = Result<(), HortiTechError>> + Send;

    /// Delete a schedule by its unique identifier.
    fn delete(&self, id: ScheduleId) -> impl Future<Output = Result<(), HortiTechError>> + Send;
}

impl<T: ZoneRepository + Send + Sync> ZoneRepository for Arc<T> {
    fn create(&self, zone: NewZone) -> impl Future<Output = Result<Zone, HortiTechError>> + Send {
        (**self).create(zone)
    }

    fn get_by_id(
        &self,
        id: ZoneId,
    ) -> impl Future<Output = Result<Option<Zone>, HortiTechError>> + Send {
        (**self).get_by_id(id)
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Zone>, HortiTechError>> + Send {
        (**self).get_all()
    }

    fn update(&self, zone: Zone) -> impl Future<Output = Result<Zone, HortiTechError>> + Send {
        (**self).update(zone)
    }

    fn delete(&self, id: ZoneId) -> impl Future<Output = Result<(), HortiTechError>> + Send {
        (**self).delete(id)
    }
}

impl<T: ScheduleRepository + Send + Sync> ScheduleRepository for Arc<T> {
    fn create(
        &self,
        schedule: NewSchedule,
    ) -> impl Future<Output = Result<ScheduleEntry, HortiTechError>> + Send {
        (**self).create(schedule)
    }

    fn get_by_id(
        &self,
        id: ScheduleId,
    ) -> impl Future<Output = Result<Option<ScheduleEntry>, HortiTechError>> + Send {
        (**self).get_by_id(id)
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<ScheduleEntry>, HortiTechError>> + Send {
        (**self).get_all()
    }

    fn find_by_zone(
        &self,
        zone_id: ZoneId,
        resource: Option<ResourceKind>,
    ) -> impl Future<Output = Result<Vec<ScheduleEntry>, HortiTechError>> + Send {
        (**self).find_by_zone(zone_id, resource)
    }

    fn update(
        &self,
        schedule: ScheduleEntry,
    ) -> impl Future<Output = Result<ScheduleEntry, HortiTechError>> + Send {
        (**self).update(schedule)
    }

    fn set_paused(
        &self,
        id: ScheduleId,
        paused: bool,
    ) -> impl Future<Output = Result<(), HortiTechError>> + Send {
        (**self).set_paused(id, paused)
    }

    fn delete(&self, id: ScheduleId) -> impl Future<Output = Result<(), HortiTechError>> + Send {
        (**self).delete(id)
    }
}
