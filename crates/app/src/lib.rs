//! # hortitech-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `ZoneRepository` — CRUD for zones
//!   - `ScheduleRepository` — CRUD for schedules plus the pause flag
//!   - `EventPublisher` — push schedule events to live subscribers
//!   - `Clock` — the single source of "now" for every use-case
//! - Define **driving/inbound ports** as use-case structs:
//!   - `ZoneService` — create, list, get, update, delete
//!   - `ScheduleService` — validate, create, edit, delete, pause/resume
//!   - `LifecycleMonitor` — re-derive states on a timer and announce changes
//! - Provide **in-process infrastructure** (event bus) that doesn't need IO
//! - Orchestrate domain objects without knowing *how* persistence or IO works
//!
//! ## Dependency rule
//! Depends on `hortitech-domain` only (plus `tokio` for channels and timers).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod event_bus;
pub mod lifecycle_monitor;
pub mod ports;
pub mod services;

#[cfg(any(test, feature = "testing"))]
pub mod testing;
