//! Market segments a bot can trade in.

use serde::{Deserialize, Serialize};

/// TradingMode selects the market segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradingMode {
    #[default]
    Spot,
    Margin,
    Futures,
}

impl TradingMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TradingMode::Spot => "spot",
            TradingMode::Margin => "margin",
            TradingMode::Futures => "futures",
        }
    }
}

/// MarginMode selects how collateral is shared between leveraged positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarginMode {
    Cross,
    Isolated,
}
