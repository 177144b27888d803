//! Clock port — where use-cases read the current time.
//!
//! Every use-case reads the clock exactly once and threads that instant
//! through validation and state derivation.

use std::sync::{Arc, Mutex, PoisonError};

use hortitech_domain::time::{self, Timestamp};

/// Source of the current instant.
pub trait Clock {
    fn now(&self) -> Timestamp;
}

impl<T: Clock> Clock for Arc<T> {
    fn now(&self) -> Timestamp {
        (**self).now()
    }
}

/// Wall-clock time of the host.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        time::now()
    }
}

/// A manually driven clock, for tests and replays.
#[derive(Debug)]
pub struct FixedClock {
    instant: Mutex<Timestamp>,
}

impl FixedClock {
    #[must_use]
    pub fn new(instant: Timestamp) -> Self {
        Self {
            instant: Mutex::new(instant),
        }
    }

    /// Move the clock to `instant`.
    pub fn set(&self, instant: Timestamp) {
        *self.instant.lock().unwrap_or_else(PoisonError::into_inner) = instant;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        *self.instant.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
