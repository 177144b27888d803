//! # hortitech-domain
//!
//! Pure domain model for the HortiTech greenhouse controller.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define **Zones** (the greenhouse sections irrigation and lighting act on)
//! - Define **Schedules** (time-bounded activation windows for a zone's
//!   irrigation or lighting)
//! - Validate candidate windows against a zone's existing schedules
//!   (no overlap, no inverted or past-dated windows)
//! - Derive each schedule's lifecycle state from its window, the clock and
//!   the manual pause flag, and decide which manual actions are allowed
//! - Define **Events** (change records pushed to live dashboards)
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod event;
pub mod schedule;
pub mod zone;
