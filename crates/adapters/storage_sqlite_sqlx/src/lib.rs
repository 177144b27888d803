//! # hortitech-adapter-storage-sqlite-sqlx
//!
//! `SQLite` persistence adapter using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Implement the repository port traits defined in `hortitech-app::ports::storage`
//! - Manage `SQLite` connection pool lifecycle
//! - Run database migrations (using sqlx embedded migrations)
//! - Map between domain types and database rows
//!
//! ## Dependency rule
//! Depends on `hortitech-app` (for port traits) and `hortitech-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

mod error;
mod pool;
mod schedule_repo;
mod zone_repo;

pub use error::StorageError;
pub use pool::{Config, Database};
pub use schedule_repo::SqliteScheduleRepository;
pub use zone_repo::SqliteZoneRepository;
