//! `SQLite` implementation of [`ScheduleRepository`].
//!
//! Instants are stored as fixed-width RFC 3339 text in UTC so that ordering
//! by the column matches chronological order.

use std::future::Future;
use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use hortitech_app::ports::ScheduleRepository;
use hortitech_domain::error::{HortiTechError, NotFoundError};
use hortitech_domain::id::{ScheduleId, ZoneId};
use hortitech_domain::schedule::{IrrigationType, NewSchedule, ResourceKind, ScheduleEntry};
use hortitech_domain::time::Timestamp;

use crate::error::StorageError;

/// Wrapper for converting database rows into domain [`ScheduleEntry`].
struct Wrapper(ScheduleEntry);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<ScheduleEntry> {
        value.map(|w| w.0)
    }

    fn many(values: Vec<Self>) -> Vec<ScheduleEntry> {
        values.into_iter().map(|w| w.0).collect()
    }
}

fn decode_timestamp(value: &str) -> Result<Timestamp, sqlx::Error> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|err| sqlx::Error::Decode(Box::new(err)))
}

fn encode_timestamp(value: Timestamp) -> String {
    value.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

fn ensure_found(rows_affected: u64, id: ScheduleId) -> Result<(), HortiTechError> {
    if rows_affected == 0 {
        return Err(NotFoundError {
            entity: "Schedule",
            id: id.to_string(),
        }
        .into());
    }
    Ok(())
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: i64 = row.try_get("id")?;
        let zone_id: i64 = row.try_get("zone_id")?;
        let resource: String = row.try_get("resource")?;
        let irrigation_type: Option<String> = row.try_get("irrigation_type")?;
        let start_at: String = row.try_get("start_at")?;
        let end_at: String = row.try_get("end_at")?;
        let description: String = row.try_get("description")?;
        let paused: bool = row.try_get("paused")?;

        let resource =
            ResourceKind::from_str(&resource).map_err(|err| sqlx::Error::Decode(Box::new(err)))?;
        let irrigation_type = irrigation_type
            .map(|value| IrrigationType::from_str(&value))
            .transpose()
            .map_err(|err| sqlx::Error::Decode(Box::new(err)))?;

        Ok(Self(ScheduleEntry {
            id: ScheduleId::new(id),
            zone_id: ZoneId::new(zone_id),
            resource,
            irrigation_type,
            start_at: decode_timestamp(&start_at)?,
            end_at: decode_timestamp(&end_at)?,
            description,
            paused,
        }))
    }
}

const INSERT: &str = "INSERT INTO schedules (zone_id, resource, irrigation_type, start_at, end_at, description, paused) VALUES (?, ?, ?, ?, ?, ?, 0)";
const SELECT_BY_ID: &str = "SELECT * FROM schedules WHERE id = ?";
const SELECT_ALL: &str = "SELECT * FROM schedules ORDER BY start_at, id";
const SELECT_BY_ZONE: &str = "SELECT * FROM schedules WHERE zone_id = ? ORDER BY start_at, id";
const SELECT_BY_ZONE_AND_RESOURCE: &str =
    "SELECT * FROM schedules WHERE zone_id = ? AND resource = ? ORDER BY start_at, id";
const UPDATE: &str = "UPDATE schedules SET irrigation_type = ?, start_at = ?, end_at = ?, description = ? WHERE id = ?";
const UPDATE_PAUSED: &str = "UPDATE schedules SET paused = ? WHERE id = ?";
const DELETE_BY_ID: &str = "DELETE FROM schedules WHERE id = ?";

/// `SQLite`-backed schedule repository.
pub struct SqliteScheduleRepository {
    pool: SqlitePool,
}

impl SqliteScheduleRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl ScheduleRepository for SqliteScheduleRepository {
    fn create(
        &self,
        schedule: NewSchedule,
    ) -> impl Future<Output = Result<ScheduleEntry, HortiTechError>> + Send {
        let pool = self.pool.clone();
        async move {
            let result = sqlx::query(INSERT)
                .bind(schedule.zone_id.as_i64())
                .bind(schedule.resource.as_str())
                .bind(schedule.irrigation_type.map(IrrigationType::as_str))
                .bind(encode_timestamp(schedule.window.start_at()))
                .bind(encode_timestamp(schedule.window.end_at()))
                .bind(&schedule.description)
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(schedule.with_id(ScheduleId::new(result.last_insert_rowid())))
        }
    }

    fn get_by_id(
        &self,
        id: ScheduleId,
    ) -> impl Future<Output = Result<Option<ScheduleEntry>, HortiTechError>> + Send {
        let pool = self.pool.clone();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
                .bind(id.as_i64())
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(Wrapper::maybe(row))
        }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<ScheduleEntry>, HortiTechError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(Wrapper::many(rows))
        }
    }

    fn find_by_zone(
        &self,
        zone_id: ZoneId,
        resource: Option<ResourceKind>,
    ) -> impl Future<Output = Result<Vec<ScheduleEntry>, HortiTechError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = match resource {
                Some(kind) => {
                    sqlx::query_as(SELECT_BY_ZONE_AND_RESOURCE)
                        .bind(zone_id.as_i64())
                        .bind(kind.as_str())
                        .fetch_all(&pool)
                        .await
                }
                None => {
                    sqlx::query_as(SELECT_BY_ZONE)
                        .bind(zone_id.as_i64())
                        .fetch_all(&pool)
                        .await
                }
            }
            .map_err(StorageError::from)?;

            Ok(Wrapper::many(rows))
        }
    }

    fn update(
        &self,
        schedule: ScheduleEntry,
    ) -> impl Future<Output = Result<ScheduleEntry, HortiTechError>> + Send {
        let pool = self.pool.clone();
        async move {
            let result = sqlx::query(UPDATE)
                .bind(schedule.irrigation_type.map(IrrigationType::as_str))
                .bind(encode_timestamp(schedule.start_at))
                .bind(encode_timestamp(schedule.end_at))
                .bind(&schedule.description)
                .bind(schedule.id.as_i64())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            ensure_found(result.rows_affected(), schedule.id)?;
            Ok(schedule)
        }
    }

    fn set_paused(
        &self,
        id: ScheduleId,
        paused: bool,
    ) -> impl Future<Output = Result<(), HortiTechError>> + Send {
        let pool = self.pool.clone();
        async move {
            let result = sqlx::query(UPDATE_PAUSED)
                .bind(paused)
                .bind(id.as_i64())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            ensure_found(result.rows_affected(), id)
        }
    }

    fn delete(&self, id: ScheduleId) -> impl Future<Output = Result<(), HortiTechError>> + Send {
        let pool = self.pool.clone();
        async move {
            let result = sqlx::query(DELETE_BY_ID)
                .bind(id.as_i64())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            ensure_found(result.rows_affected(), id)
        }
    }
}
