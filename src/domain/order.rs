//! Order execution styles referenced by the configuration.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Execution style configured for one order purpose (entry, exit, stoploss...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    /// Rests on the book at the computed price.
    Limit,
    /// Crosses the spread and fills at whatever the book offers.
    Market,
}

impl OrderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderType::Limit => "limit",
            OrderType::Market => "market",
        }
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// TimeInForce controls how long an order stays active on the exchange.
///
/// Documents usually spell the codes in upper case; lower case is accepted too.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TimeInForce {
    /// Good till cancelled.
    #[serde(alias = "gtc")]
    Gtc,
    /// Fill or kill.
    #[serde(alias = "fok")]
    Fok,
    /// Immediate or cancel.
    #[serde(alias = "ioc")]
    Ioc,
    /// Post only.
    #[serde(alias = "po")]
    Po,
}
