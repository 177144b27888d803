//! JSON REST handlers for irrigation and lighting schedules.
//!
//! Window bounds travel as raw strings so that a malformed date is reported
//! as an `invalid_date` rejection instead of a body deserialization failure.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use hortitech_app::ports::{Clock, EventPublisher, ScheduleRepository, ZoneRepository};
use hortitech_app::services::schedule_service::{
    ScheduleChanges, ScheduleDraft, ScheduleFilter, WindowCheck,
};
use hortitech_domain::id::{ScheduleId, ZoneId};
use hortitech_domain::schedule::{
    IrrigationType, ResourceKind, ScheduleSnapshot, ScheduleState, TimeWindow,
};

use crate::error::{ApiError, parse_id};
use crate::state::AppState;

/// Request body for creating a schedule.
#[derive(Deserialize)]
pub struct CreateScheduleRequest {
    pub zone_id: ZoneId,
    pub resource: ResourceKind,
    pub irrigation_type: Option<IrrigationType>,
    pub start_at: String,
    pub end_at: String,
    #[serde(default)]
    pub description: String,
}

/// Request body for editing a schedule.
#[derive(Deserialize)]
pub struct UpdateScheduleRequest {
    pub start_at: String,
    pub end_at: String,
    pub description: Option<String>,
    pub irrigation_type: Option<IrrigationType>,
}

/// Request body for a dry-run validation.
#[derive(Deserialize)]
pub struct ValidateRequest {
    pub zone_id: ZoneId,
    pub resource: ResourceKind,
    pub schedule_id: Option<ScheduleId>,
    pub start_at: String,
    pub end_at: String,
}

/// Query string accepted by the zone listing.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub resource: Option<ResourceKind>,
    pub state: Option<ScheduleState>,
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<ScheduleSnapshot>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the get, update and toggle endpoints.
pub enum GetResponse {
    Ok(Json<ScheduleSnapshot>),
}

impl IntoResponse for GetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the create endpoint.
pub enum CreateResponse {
    Created(Json<ScheduleSnapshot>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// Possible responses from the validate endpoint.
pub enum ValidateResponse {
    Valid(Json<TimeWindow>),
}

impl IntoResponse for ValidateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Valid(json) => json.into_response(),
        }
    }
}

/// Possible responses from the delete endpoint.
pub enum DeleteResponse {
    NoContent,
}

impl IntoResponse for DeleteResponse {
    fn into_response(self) -> Response {
        match self {
            Self::NoContent => StatusCode::NO_CONTENT.into_response(),
        }
    }
}

/// `GET /api/zones/:id/schedules?resource=&state=`
pub async fn list_for_zone<ZR, SR, EP, C>(
    State(state): State<AppState<ZR, SR, EP, C>>,
    Path(id): Path<String>,
    Query(query): Query<ListQuery>,
) -> Result<ListResponse, ApiError>
where
    ZR: ZoneRepository + Send + Sync + 'static,
    SR: ScheduleRepository + Send + Sync + 'static,
    EP: EventPublisher + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
{
    let zone_id: ZoneId = parse_id(&id)?;
    let filter = ScheduleFilter {
        resource: query.resource,
        state: query.state,
    };
    let schedules = state
        .schedule_service
        .list_for_zone(zone_id, filter)
        .await?;
    Ok(ListResponse::Ok(Json(schedules)))
}

/// `GET /api/schedules/:id`
pub async fn get<ZR, SR, EP, C>(
    State(state): State<AppState<ZR, SR, EP, C>>,
    Path(id): Path<String>,
) -> Result<GetResponse, ApiError>
where
    ZR: ZoneRepository + Send + Sync + 'static,
    SR: ScheduleRepository + Send + Sync + 'static,
    EP: EventPublisher + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
{
    let schedule_id: ScheduleId = parse_id(&id)?;
    let snapshot = state.schedule_service.get_schedule(schedule_id).await?;
    Ok(GetResponse::Ok(Json(snapshot)))
}

/// `POST /api/schedules/validate` — checks a window without saving it.
pub async fn validate<ZR, SR, EP, C>(
    State(state): State<AppState<ZR, SR, EP, C>>,
    Json(req): Json<ValidateRequest>,
) -> Result<ValidateResponse, ApiError>
where
    ZR: ZoneRepository + Send + Sync + 'static,
    SR: ScheduleRepository + Send + Sync + 'static,
    EP: EventPublisher + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
{
    let check = WindowCheck {
        zone_id: req.zone_id,
        resource: req.resource,
        schedule_id: req.schedule_id,
        start_at: req.start_at,
        end_at: req.end_at,
    };
    let window = state.schedule_service.check_window(check).await?;
    Ok(ValidateResponse::Valid(Json(window)))
}

/// `POST /api/schedules`
pub async fn create<ZR, SR, EP, C>(
    State(state): State<AppState<ZR, SR, EP, C>>,
    Json(req): Json<CreateScheduleRequest>,
) -> Result<CreateResponse, ApiError>
where
    ZR: ZoneRepository + Send + Sync + 'static,
    SR: ScheduleRepository + Send + Sync + 'static,
    EP: EventPublisher + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
{
    let draft = ScheduleDraft {
        zone_id: req.zone_id,
        resource: req.resource,
        irrigation_type: req.irrigation_type,
        start_at: req.start_at,
        end_at: req.end_at,
        description: req.description,
    };
    let created = state.schedule_service.create_schedule(draft).await?;
    Ok(CreateResponse::Created(Json(created)))
}

/// `PUT /api/schedules/:id`
pub async fn update<ZR, SR, EP, C>(
    State(state): State<AppState<ZR, SR, EP, C>>,
    Path(id): Path<String>,
    Json(req): Json<UpdateScheduleRequest>,
) -> Result<GetResponse, ApiError>
where
    ZR: ZoneRepository + Send + Sync + 'static,
    SR: ScheduleRepository + Send + Sync + 'static,
    EP: EventPublisher + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
{
    let schedule_id: ScheduleId = parse_id(&id)?;
    let changes = ScheduleChanges {
        start_at: req.start_at,
        end_at: req.end_at,
        description: req.description,
        irrigation_type: req.irrigation_type,
    };
    let updated = state
        .schedule_service
        .update_schedule(schedule_id, changes)
        .await?;
    Ok(GetResponse::Ok(Json(updated)))
}

/// `POST /api/schedules/:id/toggle` — pause a running schedule or resume it.
pub async fn toggle<ZR, SR, EP, C>(
    State(state): State<AppState<ZR, SR, EP, C>>,
    Path(id): Path<String>,
) -> Result<GetResponse, ApiError>
where
    ZR: ZoneRepository + Send + Sync + 'static,
    SR: ScheduleRepository + Send + Sync + 'static,
    EP: EventPublisher + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
{
    let schedule_id: ScheduleId = parse_id(&id)?;
    let snapshot = state.schedule_service.toggle_pause(schedule_id).await?;
    Ok(GetResponse::Ok(Json(snapshot)))
}

/// `DELETE /api/schedules/:id`
pub async fn delete<ZR, SR, EP, C>(
    State(state): State<AppState<ZR, SR, EP, C>>,
    Path(id): Path<String>,
) -> Result<DeleteResponse, ApiError>
where
    ZR: ZoneRepository + Send + Sync + 'static,
    SR: ScheduleRepository + Send + Sync + 'static,
    EP: EventPublisher + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
{
    let schedule_id: ScheduleId = parse_id(&id)?;
    state.schedule_service.delete_schedule(schedule_id).await?;
    Ok(DeleteResponse::NoContent)
}

#[cfg(test)]
mod tests {
    use crate::router::build;
    use crate::testing::{Fixture, at, fixture};
    use axum::Router;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use hortitech_domain::id::{ScheduleId, ZoneId};
    use hortitech_domain::schedule::NewSchedule;
    use hortitech_domain::schedule::TimeWindow;
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => request
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => request.body(Body::empty()),
        }
        .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    /// Router with one zone (id 1) and the clock at 06:00.
    async fn with_zone() -> (Fixture, Router) {
        let fx = fixture();
        let app = build(fx.state.clone());
        let (status, _) = send(&app, "POST", "/api/zones", Some(json!({ "name": "Tomatoes A" }))).await;
        assert_eq!(status, StatusCode::CREATED);
        (fx, app)
    }

    fn lighting(start: &str, end: &str) -> Value {
        json!({
            "zone_id": 1,
            "resource": "lighting",
            "start_at": start,
            "end_at": end,
        })
    }

    #[tokio::test]
    async fn should_create_schedule_with_derived_state() {
        let (_fx, app) = with_zone().await;

        let (status, body) = send(
            &app,
            "POST",
            "/api/schedules",
            Some(json!({
                "zone_id": 1,
                "resource": "irrigation",
                "irrigation_type": "drip",
                "start_at": "2026-06-01T09:00:00Z",
                "end_at": "2026-06-01T10:00:00Z",
                "description": "Morning drip",
            })),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["id"], 1);
        assert_eq!(body["state"], "pending");
        assert_eq!(body["can_toggle"], false);
        assert_eq!(body["can_modify"], true);
        assert_eq!(body["irrigation_type"], "drip");
    }

    #[tokio::test]
    async fn should_reject_overlap_with_conflict_status() {
        let (_fx, app) = with_zone().await;
        send(
            &app,
            "POST",
            "/api/schedules",
            Some(lighting("2026-06-01T09:00:00Z", "2026-06-01T10:00:00Z")),
        )
        .await;

        let (status, body) = send(
            &app,
            "POST",
            "/api/schedules",
            Some(lighting("2026-06-01T09:30:00Z", "2026-06-01T10:30:00Z")),
        )
        .await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["reason"], "overlap");
    }

    #[tokio::test]
    async fn should_accept_back_to_back_windows() {
        let (_fx, app) = with_zone().await;
        send(
            &app,
            "POST",
            "/api/schedules",
            Some(lighting("2026-06-01T09:00:00Z", "2026-06-01T10:00:00Z")),
        )
        .await;

        let (status, _) = send(
            &app,
            "POST",
            "/api/schedules",
            Some(lighting("2026-06-01T10:00:00Z", "2026-06-01T11:00:00Z")),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
    }

    #[tokio::test]
    async fn should_report_invalid_date_as_unprocessable() {
        let (_fx, app) = with_zone().await;

        let (status, body) = send(
            &app,
            "POST",
            "/api/schedules",
            Some(lighting("tomorrow morning", "2026-06-01T10:00:00Z")),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["reason"], "invalid_date");
    }

    #[tokio::test]
    async fn should_dry_run_validation_without_saving() {
        let (fx, app) = with_zone().await;

        let (status, body) = send(
            &app,
            "POST",
            "/api/schedules/validate",
            Some(lighting("2026-06-01T09:00:00Z", "2026-06-01T10:00:00Z")),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["start_at"], "2026-06-01T09:00:00Z");
        assert_eq!(body["end_at"], "2026-06-01T10:00:00Z");
        assert!(fx.schedules.is_empty());
    }

    #[tokio::test]
    async fn should_report_past_start_on_dry_run() {
        let (_fx, app) = with_zone().await;

        let (status, body) = send(
            &app,
            "POST",
            "/api/schedules/validate",
            Some(lighting("2026-06-01T05:00:00Z", "2026-06-01T07:00:00Z")),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["reason"], "start_in_past");
    }

    #[tokio::test]
    async fn should_filter_zone_listing_by_state() {
        let (fx, app) = with_zone().await;
        send(
            &app,
            "POST",
            "/api/schedules",
            Some(lighting("2026-06-01T07:00:00Z", "2026-06-01T08:00:00Z")),
        )
        .await;
        send(
            &app,
            "POST",
            "/api/schedules",
            Some(lighting("2026-06-01T12:00:00Z", "2026-06-01T13:00:00Z")),
        )
        .await;
        fx.clock.set(at(7, 30));

        let (status, body) = send(
            &app,
            "GET",
            "/api/zones/1/schedules?resource=lighting&state=in_progress",
            None,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let listed = body.as_array().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0]["start_at"], "2026-06-01T07:00:00Z");
        assert_eq!(listed[0]["can_toggle"], true);
        assert_eq!(listed[0]["can_modify"], false);
    }

    #[tokio::test]
    async fn should_pause_running_schedule_then_allow_edit() {
        let (fx, app) = with_zone().await;
        send(
            &app,
            "POST",
            "/api/schedules",
            Some(lighting("2026-06-01T07:00:00Z", "2026-06-01T08:00:00Z")),
        )
        .await;
        fx.clock.set(at(7, 15));

        let (status, body) = send(
            &app,
            "PUT",
            "/api/schedules/1",
            Some(json!({
                "start_at": "2026-06-01T07:00:00Z",
                "end_at": "2026-06-01T09:00:00Z",
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["reason"], "not_modifiable");

        let (status, body) = send(&app, "POST", "/api/schedules/1/toggle", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["state"], "paused");

        let (status, body) = send(
            &app,
            "PUT",
            "/api/schedules/1",
            Some(json!({
                "start_at": "2026-06-01T07:00:00Z",
                "end_at": "2026-06-01T09:00:00Z",
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["end_at"], "2026-06-01T09:00:00Z");
        assert_eq!(body["paused"], true);
    }

    #[tokio::test]
    async fn should_refuse_toggle_outside_window() {
        let (fx, app) = with_zone().await;
        fx.schedules.seed(
            NewSchedule::lighting(
                ZoneId::new(1),
                TimeWindow::new(at(2, 0), at(3, 0)).unwrap(),
            )
            .with_id(ScheduleId::new(1)),
        );

        let (status, body) = send(&app, "POST", "/api/schedules/1/toggle", None).await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["reason"], "not_toggleable");
    }

    #[tokio::test]
    async fn should_delete_pending_schedule() {
        let (_fx, app) = with_zone().await;
        send(
            &app,
            "POST",
            "/api/schedules",
            Some(lighting("2026-06-01T09:00:00Z", "2026-06-01T10:00:00Z")),
        )
        .await;

        let (status, _) = send(&app, "DELETE", "/api/schedules/1", None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = send(&app, "GET", "/api/schedules/1", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn should_return_not_found_for_schedule_in_unknown_zone() {
        let (_fx, app) = with_zone().await;

        let mut body = lighting("2026-06-01T09:00:00Z", "2026-06-01T10:00:00Z");
        body["zone_id"] = json!(99);
        let (status, _) = send(&app, "POST", "/api/schedules", Some(body)).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
