//! # hortitech-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve a **JSON API** for zones and their irrigation/lighting schedules
//!   (`/api/zones`, `/api/schedules`, `/api/schedules/validate`, …)
//! - Stream schedule events to dashboards over **Server-Sent Events**
//!   (`/api/events/stream`)
//! - Map HTTP requests into application service calls (driving adapter)
//! - Map rejections into stable `{ "error", "reason" }` bodies so clients can
//!   react to a conflict without parsing messages
//!
//! ## Dependency rule
//! Depends on `hortitech-app` (for port traits and services) and
//! `hortitech-domain` (for domain types used in request/response mapping).
//! Never leaks axum types into the domain.

pub mod api;
pub mod error;
pub mod router;
pub mod state;

#[cfg(test)]
mod testing;
