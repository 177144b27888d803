//! HTTP error response mapping.

use std::str::FromStr;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use hortitech_domain::error::{HortiTechError, ValidationError};
use hortitech_domain::schedule::{LifecycleError, ScheduleConflict};

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
    reason: Option<&'static str>,
}

/// Maps [`HortiTechError`] to an HTTP response with appropriate status code.
#[derive(Debug)]
pub struct ApiError(HortiTechError);

impl From<HortiTechError> for ApiError {
    fn from(err: HortiTechError) -> Self {
        Self(err)
    }
}

/// Parse an identifier taken from the request path.
pub(crate) fn parse_id<T: FromStr>(raw: &str) -> Result<T, ApiError> {
    T::from_str(raw).map_err(|_| ApiError(ValidationError::InvalidId.into()))
}

fn conflict_status(conflict: ScheduleConflict) -> StatusCode {
    match conflict {
        ScheduleConflict::Overlap { .. } => StatusCode::CONFLICT,
        ScheduleConflict::InvalidDate
        | ScheduleConflict::StartInPast
        | ScheduleConflict::EndBeforeStart => StatusCode::UNPROCESSABLE_ENTITY,
    }
}

fn lifecycle_reason(err: LifecycleError) -> &'static str {
    match err {
        LifecycleError::NotToggleable { .. } => "not_toggleable",
        LifecycleError::NotModifiable { .. } => "not_modifiable",
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, reason) = match &self.0 {
            HortiTechError::Validation(_) => (StatusCode::BAD_REQUEST, None),
            HortiTechError::Conflict(conflict) => {
                (conflict_status(*conflict), Some(conflict.reason()))
            }
            HortiTechError::Lifecycle(err) => (StatusCode::CONFLICT, Some(lifecycle_reason(*err))),
            HortiTechError::NotFound(_) => (StatusCode::NOT_FOUND, None),
            HortiTechError::Storage(err) => {
                tracing::error!(error = %err, "storage error");
                let body = ErrorBody {
                    error: "internal server error".to_string(),
                    reason: None,
                };
                return (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response();
            }
        };

        let body = ErrorBody {
            error: self.0.to_string(),
            reason,
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hortitech_domain::error::NotFoundError;
    use hortitech_domain::id::{ScheduleId, ZoneId};
    use hortitech_domain::schedule::ScheduleState;
    use http_body_util::BodyExt;

    async fn render(err: HortiTechError) -> (StatusCode, serde_json::Value) {
        let response = ApiError::from(err).into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn should_map_overlap_to_conflict_with_reason() {
        let (status, body) = render(
            ScheduleConflict::Overlap {
                with: ScheduleId::new(3),
            }
            .into(),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["reason"], "overlap");
        assert_eq!(body["error"], "schedule rejected: window overlaps schedule 3");
    }

    #[tokio::test]
    async fn should_map_other_rejections_to_unprocessable() {
        for (conflict, reason) in [
            (ScheduleConflict::InvalidDate, "invalid_date"),
            (ScheduleConflict::StartInPast, "start_in_past"),
            (ScheduleConflict::EndBeforeStart, "end_before_start"),
        ] {
            let (status, body) = render(conflict.into()).await;
            assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
            assert_eq!(body["reason"], reason);
        }
    }

    #[tokio::test]
    async fn should_map_lifecycle_refusal_to_conflict() {
        let (status, body) = render(
            LifecycleError::NotToggleable {
                id: ScheduleId::new(1),
                state: ScheduleState::Pending,
            }
            .into(),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["reason"], "not_toggleable");
    }

    #[tokio::test]
    async fn should_map_not_found_without_reason() {
        let (status, body) = render(
            NotFoundError {
                entity: "Zone",
                id: ZoneId::new(8).to_string(),
            }
            .into(),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["reason"].is_null());
        assert_eq!(body["error"], "Zone 8 not found");
    }

    #[tokio::test]
    async fn should_hide_storage_details() {
        let (status, body) = render(HortiTechError::Storage("disk on fire".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "internal server error");
    }

    #[test]
    fn should_reject_non_numeric_path_id() {
        let result = parse_id::<ZoneId>("abc");
        assert!(matches!(
            result,
            Err(ApiError(HortiTechError::Validation(
                ValidationError::InvalidId
            )))
        ));
    }
}
