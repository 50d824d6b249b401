//! Time units used by timeout and interval settings.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Unit of the `unfilledtimeout` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeoutUnit {
    Seconds,
    #[default]
    Minutes,
}

impl TimeoutUnit {
    /// Converts an amount expressed in this unit to a `Duration`.
    pub fn to_duration(self, amount: u32) -> Duration {
        match self {
            TimeoutUnit::Seconds => Duration::from_secs(u64::from(amount)),
            TimeoutUnit::Minutes => Duration::from_secs(u64::from(amount) * 60),
        }
    }
}

/// Converts a positive, finite number of seconds to a `Duration`.
pub(crate) fn from_secs(seconds: f64) -> Duration {
    if seconds.is_finite() && seconds > 0.0 {
        Duration::from_secs_f64(seconds)
    } else {
        Duration::ZERO
    }
}
