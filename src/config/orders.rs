//! Order placement settings: types, time in force and unfilled timeouts.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::ConfigError;
use super::duration::TimeoutUnit;
use crate::domain::{OrderType, TimeInForce};

/// How long entry and exit orders may stay unfilled before cancellation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnfilledTimeout {
    pub entry: u32,
    pub exit: u32,
    /// Exit order cancellations tolerated before an emergency exit (0 = never).
    pub exit_timeout_count: u32,
    pub unit: TimeoutUnit,
}

impl Default for UnfilledTimeout {
    fn default() -> Self {
        Self {
            entry: 10,
            exit: 10,
            exit_timeout_count: 0,
            unit: TimeoutUnit::Minutes,
        }
    }
}

impl UnfilledTimeout {
    pub fn entry_timeout(&self) -> Duration {
        self.unit.to_duration(self.entry)
    }

    pub fn exit_timeout(&self) -> Duration {
        self.unit.to_duration(self.exit)
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.entry == 0 {
            return Err(ConfigError::invalid("unfilledtimeout.entry", "must be > 0"));
        }
        if self.exit == 0 {
            return Err(ConfigError::invalid("unfilledtimeout.exit", "must be > 0"));
        }
        Ok(())
    }
}

/// Price reference used to trigger exchange stoplosses on derivatives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoplossPriceType {
    Last,
    Mark,
    Index,
}

/// Execution style per order purpose, plus exchange stoploss settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderTypes {
    #[serde(default = "limit")]
    pub entry: OrderType,
    #[serde(default = "limit")]
    pub exit: OrderType,
    #[serde(default = "market")]
    pub emergency_exit: OrderType,
    /// Follows `exit` when not set, see [`OrderTypes::force_exit`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub force_exit: Option<OrderType>,
    /// Follows `entry` when not set, see [`OrderTypes::force_entry`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub force_entry: Option<OrderType>,
    #[serde(default = "limit")]
    pub stoploss: OrderType,
    /// Place the stoploss as a native order on the exchange.
    #[serde(default)]
    pub stoploss_on_exchange: bool,
    /// Seconds between checks/updates of the exchange stoploss order.
    #[serde(default = "default_stoploss_interval")]
    pub stoploss_on_exchange_interval: u32,
    /// Limit price ratio for stop-limit orders.
    #[serde(default = "default_limit_ratio")]
    pub stoploss_on_exchange_limit_ratio: f64,
    #[serde(default)]
    pub stoploss_price_type: Option<StoplossPriceType>,
}

fn limit() -> OrderType {
    OrderType::Limit
}

fn market() -> OrderType {
    OrderType::Market
}

fn default_stoploss_interval() -> u32 {
    60
}

fn default_limit_ratio() -> f64 {
    0.99
}

impl Default for OrderTypes {
    fn default() -> Self {
        Self {
            entry: OrderType::Limit,
            exit: OrderType::Limit,
            emergency_exit: OrderType::Market,
            force_exit: None,
            force_entry: None,
            stoploss: OrderType::Limit,
            stoploss_on_exchange: false,
            stoploss_on_exchange_interval: default_stoploss_interval(),
            stoploss_on_exchange_limit_ratio: default_limit_ratio(),
            stoploss_price_type: None,
        }
    }
}

impl OrderTypes {
    /// Order type used for manually forced exits.
    pub fn force_exit(&self) -> OrderType {
        self.force_exit.unwrap_or(self.exit)
    }

    /// Order type used for manually forced entries.
    pub fn force_entry(&self) -> OrderType {
        self.force_entry.unwrap_or(self.entry)
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.stoploss_on_exchange_interval == 0 {
            return Err(ConfigError::invalid(
                "order_types.stoploss_on_exchange_interval",
                "must be > 0",
            ));
        }
        let ratio = self.stoploss_on_exchange_limit_ratio;
        if !(ratio > 0.0 && ratio <= 1.0) {
            return Err(ConfigError::invalid(
                "order_types.stoploss_on_exchange_limit_ratio",
                "must be in (0, 1]",
            ));
        }
        Ok(())
    }
}

/// Time in force for entry and exit orders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderTimeInForce {
    #[serde(default = "good_till_cancelled")]
    pub entry: TimeInForce,
    #[serde(default = "good_till_cancelled")]
    pub exit: TimeInForce,
}

fn good_till_cancelled() -> TimeInForce {
    TimeInForce::Gtc
}

impl Default for OrderTimeInForce {
    fn default() -> Self {
        Self {
            entry: TimeInForce::Gtc,
            exit: TimeInForce::Gtc,
        }
    }
}
