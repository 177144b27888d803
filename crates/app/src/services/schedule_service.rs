//! Schedule service — use-cases for irrigation and lighting programming.
//!
//! Every use-case reads the clock once, loads the freshest snapshot of the
//! zone's schedules for the same resource kind, validates, and only then
//! writes. A rejected candidate never reaches the repository.
//!
//! Writes are serialized: the snapshot a candidate is validated against is
//! still current when the candidate is stored, so concurrent requests cannot
//! both claim the same window.

use hortitech_domain::error::{HortiTechError, NotFoundError};
use hortitech_domain::event::{Event, EventType};
use hortitech_domain::id::{ScheduleId, ZoneId};
use hortitech_domain::schedule::{
    ConflictValidator, IrrigationType, NewSchedule, ResourceKind, ScheduleEntry, ScheduleSnapshot,
    ScheduleState, TimeWindow,
};

use tokio::sync::Mutex;

use crate::ports::{Clock, EventPublisher, ScheduleRepository, ZoneRepository};

/// Client-supplied fields for a new schedule.
///
/// Bounds stay raw so that unparsable input is reported as
/// [`ScheduleConflict::InvalidDate`](hortitech_domain::schedule::ScheduleConflict::InvalidDate).
#[derive(Debug, Clone)]
pub struct ScheduleDraft {
    pub zone_id: ZoneId,
    pub resource: ResourceKind,
    pub irrigation_type: Option<IrrigationType>,
    pub start_at: String,
    pub end_at: String,
    pub description: String,
}

/// Client-supplied edit of an existing schedule. Zone and resource kind are
/// immutable; `None` keeps the current value.
#[derive(Debug, Clone)]
pub struct ScheduleChanges {
    pub start_at: String,
    pub end_at: String,
    pub description: Option<String>,
    pub irrigation_type: Option<IrrigationType>,
}

/// A dry-run validation request.
#[derive(Debug, Clone)]
pub struct WindowCheck {
    pub zone_id: ZoneId,
    pub resource: ResourceKind,
    /// The schedule being edited, if any.
    pub schedule_id: Option<ScheduleId>,
    pub start_at: String,
    pub end_at: String,
}

/// Narrows a zone listing.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScheduleFilter {
    pub resource: Option<ResourceKind>,
    pub state: Option<ScheduleState>,
}

/// Application service for schedule validation, persistence and lifecycle.
pub struct ScheduleService<S, Z, P, C> {
    schedules: S,
    zones: Z,
    publisher: P,
    clock: C,
    /// Held from the first read to the last write of every mutating use-case.
    writes: Mutex<()>,
}

impl<S, Z, P, C> ScheduleService<S, Z, P, C>
where
    S: ScheduleRepository,
    Z: ZoneRepository,
    P: EventPublisher,
    C: Clock,
{
    /// Create a new service from its ports.
    pub fn new(schedules: S, zones: Z, publisher: P, clock: C) -> Self {
        Self {
            schedules,
            zones,
            publisher,
            clock,
            writes: Mutex::new(()),
        }
    }

    /// List a zone's schedules with their derived state.
    ///
    /// # Errors
    ///
    /// Returns [`HortiTechError::NotFound`] if the zone does not exist, or a
    /// storage error from the repositories.
    pub async fn list_for_zone(
        &self,
        zone_id: ZoneId,
        filter: ScheduleFilter,
    ) -> Result<Vec<ScheduleSnapshot>, HortiTechError> {
        self.ensure_zone(zone_id).await?;
        let now = self.clock.now();
        let entries = self.schedules.find_by_zone(zone_id, filter.resource).await?;
        Ok(entries
            .iter()
            .map(|entry| entry.snapshot(now))
            .filter(|snapshot| filter.state.is_none_or(|state| snapshot.state == state))
            .collect())
    }

    /// Look up a schedule by id with its derived state.
    ///
    /// # Errors
    ///
    /// Returns [`HortiTechError::NotFound`] when no schedule with `id` exists,
    /// or a storage error from the repository.
    pub async fn get_schedule(&self, id: ScheduleId) -> Result<ScheduleSnapshot, HortiTechError> {
        let entry = self.load(id).await?;
        Ok(entry.snapshot(self.clock.now()))
    }

    /// Validate a candidate window without writing anything.
    ///
    /// When `schedule_id` is set the check runs as an edit of that schedule,
    /// whose own zone and resource kind take precedence over the request's.
    ///
    /// # Errors
    ///
    /// Returns [`HortiTechError::Conflict`] with the first failing check,
    /// [`HortiTechError::NotFound`] for an unknown zone or schedule, or a
    /// storage error.
    #[tracing::instrument(skip(self, check), fields(zone_id = %check.zone_id))]
    pub async fn check_window(&self, check: WindowCheck) -> Result<TimeWindow, HortiTechError> {
        let now = self.clock.now();
        match check.schedule_id {
            Some(id) => {
                let entry = self.load(id).await?;
                let existing = self.siblings(entry.zone_id, entry.resource).await?;
                Ok(ConflictValidator::new(now, &existing)
                    .editing(&entry)
                    .validate(&check.start_at, &check.end_at)?)
            }
            None => {
                self.ensure_zone(check.zone_id).await?;
                let existing = self.siblings(check.zone_id, check.resource).await?;
                Ok(ConflictValidator::new(now, &existing)
                    .validate(&check.start_at, &check.end_at)?)
            }
        }
    }

    /// Validate and persist a new schedule.
    ///
    /// # Errors
    ///
    /// Returns [`HortiTechError::NotFound`] for an unknown zone,
    /// [`HortiTechError::Conflict`] if the window is rejected,
    /// [`HortiTechError::Validation`] if the irrigation type does not match
    /// the resource kind, or a storage error.
    #[tracing::instrument(
        skip(self, draft),
        fields(zone_id = %draft.zone_id, resource = %draft.resource)
    )]
    pub async fn create_schedule(
        &self,
        draft: ScheduleDraft,
    ) -> Result<ScheduleSnapshot, HortiTechError> {
        let _writing = self.writes.lock().await;
        self.ensure_zone(draft.zone_id).await?;
        let now = self.clock.now();
        let existing = self.siblings(draft.zone_id, draft.resource).await?;
        let window =
            ConflictValidator::new(now, &existing).validate(&draft.start_at, &draft.end_at)?;

        let schedule = NewSchedule::new(
            draft.zone_id,
            draft.resource,
            draft.irrigation_type,
            window,
        )?
        .description(draft.description);
        let created = self.schedules.create(schedule).await?;
        tracing::info!(schedule_id = %created.id, "schedule created");

        self.announce(Event::for_entry(EventType::ScheduleCreated, &created, now))
            .await;
        Ok(created.snapshot(now))
    }

    /// Validate and apply an edit to an existing schedule.
    ///
    /// A schedule that has already started may keep its original start.
    ///
    /// # Errors
    ///
    /// Returns [`HortiTechError::Lifecycle`] while the schedule is running
    /// and not paused, [`HortiTechError::Conflict`] if the new window is
    /// rejected, [`HortiTechError::Validation`] for an irrigation type on a
    /// lighting schedule, [`HortiTechError::NotFound`], or a storage error.
    #[tracing::instrument(skip(self, changes))]
    pub async fn update_schedule(
        &self,
        id: ScheduleId,
        changes: ScheduleChanges,
    ) -> Result<ScheduleSnapshot, HortiTechError> {
        let _writing = self.writes.lock().await;
        let mut entry = self.load(id).await?;
        let now = self.clock.now();
        entry.ensure_modifiable(now)?;

        let existing = self.siblings(entry.zone_id, entry.resource).await?;
        let window = ConflictValidator::new(now, &existing)
            .editing(&entry)
            .validate(&changes.start_at, &changes.end_at)?;

        entry.reschedule(window);
        if let Some(description) = changes.description {
            entry.description = description;
        }
        if let Some(irrigation_type) = changes.irrigation_type {
            entry.irrigation_type = Some(irrigation_type);
        }
        entry.validate()?;

        let updated = self.schedules.update(entry).await?;
        tracing::info!("schedule updated");

        self.announce(Event::for_entry(EventType::ScheduleUpdated, &updated, now))
            .await;
        Ok(updated.snapshot(now))
    }

    /// Delete a schedule that is not currently running.
    ///
    /// # Errors
    ///
    /// Returns [`HortiTechError::Lifecycle`] while the schedule is running
    /// and not paused, [`HortiTechError::NotFound`], or a storage error.
    #[tracing::instrument(skip(self))]
    pub async fn delete_schedule(&self, id: ScheduleId) -> Result<(), HortiTechError> {
        let _writing = self.writes.lock().await;
        let entry = self.load(id).await?;
        let now = self.clock.now();
        entry.ensure_modifiable(now)?;

        self.schedules.delete(id).await?;
        tracing::info!("schedule deleted");

        self.announce(Event::deleted(&entry, now)).await;
        Ok(())
    }

    /// Pause a running schedule or resume a paused one.
    ///
    /// # Errors
    ///
    /// Returns [`HortiTechError::Lifecycle`] outside the schedule's window,
    /// [`HortiTechError::NotFound`], or a storage error.
    #[tracing::instrument(skip(self))]
    pub async fn toggle_pause(&self, id: ScheduleId) -> Result<ScheduleSnapshot, HortiTechError> {
        let _writing = self.writes.lock().await;
        let mut entry = self.load(id).await?;
        let now = self.clock.now();
        let paused = entry.toggle_pause(now)?;

        self.schedules.set_paused(id, paused).await?;
        tracing::info!(paused, "schedule pause toggled");

        let event_type = if paused {
            EventType::SchedulePaused
        } else {
            EventType::ScheduleResumed
        };
        self.announce(Event::for_entry(event_type, &entry, now)).await;
        Ok(entry.snapshot(now))
    }

    async fn load(&self, id: ScheduleId) -> Result<ScheduleEntry, HortiTechError> {
        self.schedules.get_by_id(id).await?.ok_or_else(|| {
            NotFoundError {
                entity: "Schedule",
                id: id.to_string(),
            }
            .into()
        })
    }

    async fn ensure_zone(&self, zone_id: ZoneId) -> Result<(), HortiTechError> {
        match self.zones.get_by_id(zone_id).await? {
            Some(_) => Ok(()),
            None => Err(NotFoundError {
                entity: "Zone",
                id: zone_id.to_string(),
            }
            .into()),
        }
    }

    async fn siblings(
        &self,
        zone_id: ZoneId,
        resource: ResourceKind,
    ) -> Result<Vec<ScheduleEntry>, HortiTechError> {
        self.schedules.find_by_zone(zone_id, Some(resource)).await
    }

    async fn announce(&self, event: Event) {
        if let Err(err) = self.publisher.publish(event).await {
            tracing::warn!(error = %err, "failed to publish schedule event");
        }
    }
}
