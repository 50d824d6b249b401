//! Entry and exit pricing.

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Side of the order book a price is taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceSide {
    Bid,
    Ask,
    /// Side matching the order direction (bid for long entries).
    #[default]
    Same,
    /// Opposite side, crossing the spread.
    Other,
}

impl PriceSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            PriceSide::Bid => "bid",
            PriceSide::Ask => "ask",
            PriceSide::Same => "same",
            PriceSide::Other => "other",
        }
    }
}

/// Depth-of-market filter applied before entering.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DepthOfMarket {
    pub enabled: bool,
    /// Minimum ratio of bid volume to ask volume.
    pub bids_to_ask_delta: f64,
}

/// Pricing rules for one order direction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    pub price_side: PriceSide,
    pub use_order_book: bool,
    /// Order book level used when `use_order_book` is set (1-based).
    pub order_book_top: u32,
    /// Interpolation between side price and last price, 0 = side price only.
    pub price_last_balance: f64,
    pub check_depth_of_market: DepthOfMarket,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            price_side: PriceSide::Same,
            use_order_book: true,
            order_book_top: 1,
            price_last_balance: 0.0,
            check_depth_of_market: DepthOfMarket::default(),
        }
    }
}

impl PricingConfig {
    /// Checks ranges; `section` is `entry_pricing` or `exit_pricing`.
    pub(crate) fn validate(&self, section: &str) -> Result<(), ConfigError> {
        if !(1..=50).contains(&self.order_book_top) {
            return Err(ConfigError::invalid(
                format!("{}.order_book_top", section),
                "must be between 1 and 50",
            ));
        }
        if !(0.0..=1.0).contains(&self.price_last_balance) {
            return Err(ConfigError::invalid(
                format!("{}.price_last_balance", section),
                "must be in [0, 1]",
            ));
        }
        if self.check_depth_of_market.bids_to_ask_delta < 0.0 {
            return Err(ConfigError::invalid(
                format!("{}.check_depth_of_market.bids_to_ask_delta", section),
                "must be >= 0",
            ));
        }
        Ok(())
    }
}
