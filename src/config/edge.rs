//! Edge position sizing.

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Risk engine that sizes positions from historical win rate and
/// expectancy per pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeConfig {
    #[serde(default)]
    pub enabled: bool,
    /// Seconds between recalculations.
    pub process_throttle_secs: u64,
    #[serde(default = "default_days")]
    pub calculate_since_number_of_days: u32,
    /// Fraction of capital risked per trade.
    pub allowed_risk: f64,
    #[serde(default = "default_stoploss_range_min")]
    pub stoploss_range_min: f64,
    #[serde(default = "default_stoploss_range_max")]
    pub stoploss_range_max: f64,
    #[serde(default = "default_stoploss_range_step")]
    pub stoploss_range_step: f64,
    #[serde(default = "default_minimum_winrate")]
    pub minimum_winrate: f64,
    #[serde(default = "default_minimum_expectancy")]
    pub minimum_expectancy: f64,
    #[serde(default = "default_min_trade_number")]
    pub min_trade_number: u32,
    #[serde(default = "default_max_trade_duration")]
    pub max_trade_duration_minute: u32,
    #[serde(default)]
    pub remove_pumps: bool,
}

const MIN_THROTTLE_SECS: u64 = 600;

fn default_days() -> u32 {
    7
}

fn default_stoploss_range_min() -> f64 {
    -0.01
}

fn default_stoploss_range_max() -> f64 {
    -0.1
}

fn default_stoploss_range_step() -> f64 {
    -0.01
}

fn default_minimum_winrate() -> f64 {
    0.60
}

fn default_minimum_expectancy() -> f64 {
    0.20
}

fn default_min_trade_number() -> u32 {
    10
}

fn default_max_trade_duration() -> u32 {
    1440
}

impl EdgeConfig {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.process_throttle_secs < MIN_THROTTLE_SECS {
            return Err(ConfigError::invalid(
                "edge.process_throttle_secs",
                format!("must be >= {}", MIN_THROTTLE_SECS),
            ));
        }
        if !(self.allowed_risk > 0.0 && self.allowed_risk <= 1.0) {
            return Err(ConfigError::invalid("edge.allowed_risk", "must be in (0, 1]"));
        }
        if !(0.0..=1.0).contains(&self.minimum_winrate) {
            return Err(ConfigError::invalid("edge.minimum_winrate", "must be in [0, 1]"));
        }

        let step = self.stoploss_range_step;
        if step == 0.0 {
            return Err(ConfigError::invalid("edge.stoploss_range_step", "must not be 0"));
        }
        if (self.stoploss_range_max - self.stoploss_range_min) / step <= 0.0 {
            return Err(ConfigError::invalid(
                "edge.stoploss_range_step",
                "must step from stoploss_range_min towards stoploss_range_max",
            ));
        }
        Ok(())
    }
}
