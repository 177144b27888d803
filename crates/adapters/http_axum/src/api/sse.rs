//! Server-Sent Events (SSE) stream for real-time schedule updates.

use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use tokio_stream::StreamExt;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;

use hortitech_app::ports::{Clock, EventPublisher, ScheduleRepository, ZoneRepository};

use crate::state::AppState;

/// `GET /api/events/stream` — SSE stream of schedule events.
///
/// Each domain event is sent as a JSON `data:` frame whose SSE event name is
/// the event type (`schedule_created`, `state_changed`, …). The stream ends
/// when the client disconnects.
pub async fn stream<ZR, SR, EP, C>(
    State(state): State<AppState<ZR, SR, EP, C>>,
) -> Sse<impl tokio_stream::Stream<Item = Result<Event, std::convert::Infallible>>>
where
    ZR: ZoneRepository + Send + Sync + 'static,
    SR: ScheduleRepository + Send + Sync + 'static,
    EP: EventPublisher + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
{
    let event_rx = state.event_bus.subscribe();
    let event_stream = BroadcastStream::new(event_rx).filter_map(|result| match result {
        Ok(event) => match serde_json::to_string(&event) {
            Ok(json) => Some(Ok(Event::default()
                .event(event.event_type.as_str())
                .data(json))),
            Err(err) => {
                tracing::warn!(%err, "failed to serialize event to JSON for SSE stream");
                None
            }
        },
        Err(BroadcastStreamRecvError::Lagged(n)) => {
            tracing::warn!(skipped = n, "SSE subscriber lagged, some events were dropped");
            None
        }
    });

    Sse::new(event_stream).keep_alive(KeepAlive::default())
}
