//! Bot lifecycle and control-loop settings.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::ConfigError;
use super::duration;

/// State the bot enters after startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InitialState {
    Running,
    #[default]
    Stopped,
}

/// Control-loop internals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InternalsConfig {
    /// Seconds between two iterations of the engine loop.
    pub process_throttle_secs: f64,
    /// Seconds between heartbeat log lines, 0 disables them.
    pub heartbeat_interval: u32,
    /// Notify systemd about state changes.
    pub sd_notify: bool,
}

impl Default for InternalsConfig {
    fn default() -> Self {
        Self {
            process_throttle_secs: 5.0,
            heartbeat_interval: 60,
            sd_notify: false,
        }
    }
}

impl InternalsConfig {
    pub fn process_throttle(&self) -> Duration {
        duration::from_secs(self.process_throttle_secs)
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        let throttle = self.process_throttle_secs;
        if !(throttle.is_finite() && throttle > 0.0) {
            return Err(ConfigError::invalid("internals.process_throttle_secs", "must be > 0"));
        }
        Ok(())
    }
}
