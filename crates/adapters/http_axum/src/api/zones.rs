//! JSON REST handlers for zones.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use hortitech_app::ports::{Clock, EventPublisher, ScheduleRepository, ZoneRepository};
use hortitech_domain::id::ZoneId;
use hortitech_domain::zone::Zone;

use crate::error::{ApiError, parse_id};
use crate::state::AppState;

/// Request body for creating or renaming a zone.
#[derive(Deserialize)]
pub struct ZoneRequest {
    pub name: String,
    pub greenhouse: Option<String>,
}

impl ZoneRequest {
    fn into_builder(self) -> hortitech_domain::zone::ZoneBuilder {
        let builder = Zone::builder().name(self.name);
        match self.greenhouse {
            Some(greenhouse) => builder.greenhouse(greenhouse),
            None => builder,
        }
    }
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<Zone>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the get and update endpoints.
pub enum GetResponse {
    Ok(Json<Zone>),
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
    Created(Json<Zone>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
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

/// `GET /api/zones`
pub async fn list<ZR, SR, EP, C>(
    State(state): State<AppState<ZR, SR, EP, C>>,
) -> Result<ListResponse, ApiError>
where
    ZR: ZoneRepository + Send + Sync + 'static,
    SR: ScheduleRepository + Send + Sync + 'static,
    EP: EventPublisher + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
{
    let zones = state.zone_service.list_zones().await?;
    Ok(ListResponse::Ok(Json(zones)))
}

/// `GET /api/zones/:id`
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
    let zone_id: ZoneId = parse_id(&id)?;
    let zone = state.zone_service.get_zone(zone_id).await?;
    Ok(GetResponse::Ok(Json(zone)))
}

/// `POST /api/zones`
pub async fn create<ZR, SR, EP, C>(
    State(state): State<AppState<ZR, SR, EP, C>>,
    Json(req): Json<ZoneRequest>,
) -> Result<CreateResponse, ApiError>
where
    ZR: ZoneRepository + Send + Sync + 'static,
    SR: ScheduleRepository + Send + Sync + 'static,
    EP: EventPublisher + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
{
    let zone = req.into_builder().build()?;
    let created = state.zone_service.create_zone(zone).await?;
    Ok(CreateResponse::Created(Json(created)))
}

/// `PUT /api/zones/:id`
pub async fn update<ZR, SR, EP, C>(
    State(state): State<AppState<ZR, SR, EP, C>>,
    Path(id): Path<String>,
    Json(req): Json<ZoneRequest>,
) -> Result<GetResponse, ApiError>
where
    ZR: ZoneRepository + Send + Sync + 'static,
    SR: ScheduleRepository + Send + Sync + 'static,
    EP: EventPublisher + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
{
    let zone_id: ZoneId = parse_id(&id)?;
    let zone = req.into_builder().build()?.with_id(zone_id);
    let saved = state.zone_service.update_zone(zone).await?;
    Ok(GetResponse::Ok(Json(saved)))
}

/// `DELETE /api/zones/:id` — removes the zone and all of its schedules.
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
    let zone_id: ZoneId = parse_id(&id)?;
    state.zone_service.delete_zone(zone_id).await?;
    Ok(DeleteResponse::NoContent)
}
