//! Event bus port — publish/subscribe for schedule events.

use std::future::Future;

use hortitech_domain::error::HortiTechError;
use hortitech_domain::event::Event;

/// Publishes domain events to interested subscribers.
pub trait EventPublisher {
    /// Publish an event to all current subscribers.
    fn publish(&self, event: Event) -> impl Future<Output = Result<(), HortiTechError>> + Send;
}

impl<T: EventPublisher + Send + Sync> EventPublisher for std::sync::Arc<T> {
    fn publish(&self, event: Event) -> impl Future<Output = Result<(), HortiTechError>> + Send {
        (**self).publish(event)
    }
}
