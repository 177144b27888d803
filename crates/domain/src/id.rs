//! Typed identifier newtypes backed by database-assigned integers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

macro_rules! define_id {
    ($(#[doc = $doc:expr])* $name:ident) => {
        $(#[doc = $doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wrap a raw integer identifier.
            #[must_use]
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            /// Access the inner integer.
            #[must_use]
            pub const fn as_i64(self) -> i64 {
                self.0
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.parse().map(Self)
            }
        }
    };
}

define_id!(
    /// Unique identifier for a [`Zone`](crate::zone::Zone).
    ZoneId
);

define_id!(
    /// Unique identifier for a [`ScheduleEntry`](crate::schedule::ScheduleEntry).
    ScheduleId
);
