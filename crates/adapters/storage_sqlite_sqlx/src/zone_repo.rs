//! `SQLite` implementation of [`ZoneRepository`].

use std::future::Future;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use hortitech_app::ports::ZoneRepository;
use hortitech_domain::error::HortiTechError;
use hortitech_domain::id::ZoneId;
use hortitech_domain::zone::{NewZone, Zone};

use crate::error::StorageError;

/// Wrapper for converting database rows into domain [`Zone`].
struct Wrapper(Zone);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Zone> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: i64 = row.try_get("id")?;
        let name: String = row.try_get("name")?;
        let greenhouse: Option<String> = row.try_get("greenhouse")?;

        Ok(Self(Zone {
            id: ZoneId::new(id),
            name,
            greenhouse,
        }))
    }
}

const INSERT: &str = "INSERT INTO zones (name, greenhouse) VALUES (?, ?)";
const SELECT_BY_ID: &str = "SELECT * FROM zones WHERE id = ?";
const SELECT_ALL: &str = "SELECT * FROM zones ORDER BY name, id";
const UPDATE: &str = "UPDATE zones SET name = ?, greenhouse = ? WHERE id = ?";
const DELETE_BY_ID: &str = "DELETE FROM zones WHERE id = ?";

/// `SQLite`-backed zone repository.
pub struct SqliteZoneRepository {
    pool: SqlitePool,
}

impl SqliteZoneRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl ZoneRepository for SqliteZoneRepository {
    fn create(&self, zone: NewZone) -> impl Future<Output = Result<Zone, HortiTechError>> + Send {
        let pool = self.pool.clone();
        async move {
            let result = sqlx::query(INSERT)
                .bind(&zone.name)
                .bind(&zone.greenhouse)
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(zone.with_id(ZoneId::new(result.last_insert_rowid())))
        }
    }

    fn get_by_id(
        &self,
        id: ZoneId,
    ) -> impl Future<Output = Result<Option<Zone>, HortiTechError>> + Send {
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

    fn get_all(&self) -> impl Future<Output = Result<Vec<Zone>, HortiTechError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }

    fn update(&self, zone: Zone) -> impl Future<Output = Result<Zone, HortiTechError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(UPDATE)
                .bind(&zone.name)
                .bind(&zone.greenhouse)
                .bind(zone.id.as_i64())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(zone)
        }
    }

    fn delete(&self, id: ZoneId) -> impl Future<Output = Result<(), HortiTechError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(DELETE_BY_ID)
                .bind(id.as_i64())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(())
        }
    }
}
