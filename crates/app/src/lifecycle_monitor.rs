//! Periodic re-derivation of schedule states.
//!
//! Schedule states move with the clock (`Pending` → `InProgress` →
//! `Finished`) without any write happening. The monitor re-derives every
//! state on a fixed period and publishes a `StateChanged` event whenever a
//! state differs from the one seen on the previous tick, so live dashboards
//! can refresh without polling.

use std::collections::HashMap;
use std::time::Duration;

use hortitech_domain::error::HortiTechError;
use hortitech_domain::event::{Event, EventType};
use hortitech_domain::id::ScheduleId;
use hortitech_domain::schedule::ScheduleState;

use crate::ports::{Clock, EventPublisher, ScheduleRepository};

/// Watches derived schedule states and announces transitions.
pub struct LifecycleMonitor<S, P, C> {
    schedules: S,
    publisher: P,
    clock: C,
    observed: HashMap<ScheduleId, ScheduleState>,
}

impl<S, P, C> LifecycleMonitor<S, P, C>
where
    S: ScheduleRepository,
    P: EventPublisher,
    C: Clock,
{
    pub fn new(schedules: S, publisher: P, clock: C) -> Self {
        Self {
            schedules,
            publisher,
            clock,
            observed: HashMap::new(),
        }
    }

    /// Re-derive every state once and publish the transitions.
    ///
    /// A schedule seen for the first time is recorded without an event;
    /// schedules that disappeared are forgotten. Returns the number of
    /// events published.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the schedules cannot be loaded. Publish
    /// failures are logged and do not abort the tick.
    pub async fn tick(&mut self) -> Result<usize, HortiTechError> {
        let now = self.clock.now();
        let entries = self.schedules.get_all().await?;

        let mut current = HashMap::with_capacity(entries.len());
        let mut published = 0;
        for entry in &entries {
            let state = entry.state_at(now);
            current.insert(entry.id, state);

            match self.observed.get(&entry.id) {
                Some(previous) if *previous != state => {
                    tracing::debug!(
                        schedule_id = %entry.id,
                        from = %previous,
                        to = %state,
                        "schedule state changed"
                    );
                    let event = Event::for_entry(EventType::StateChanged, entry, now);
                    match self.publisher.publish(event).await {
                        Ok(()) => published += 1,
                        Err(err) => tracing::warn!(error = %err, "failed to publish state change"),
                    }
                }
                _ => {}
            }
        }
        self.observed = current;
        Ok(published)
    }

    /// Tick forever on `period`. Intended to be `tokio::spawn`-ed.
    pub async fn run(mut self, period: Duration) {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        tracing::info!(period_secs = period.as_secs(), "lifecycle monitor started");

        loop {
            ticker.tick().await;
            if let Err(err) = self.tick().await {
                tracing::warn!(error = %err, "lifecycle monitor tick failed");
            }
        }
    }
}
