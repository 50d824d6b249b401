//! Static knowledge about exchange capabilities.
//!
//! Nothing here talks to an exchange. The table lists which stoploss order
//! types each exchange can place natively, so that configurations asking for
//! stoploss-on-exchange can be rejected before the engine starts.

use crate::domain::{OrderType, TradingMode};

/// Stoploss support of one exchange in one trading mode.
struct StoplossSupport {
    exchange: &'static str,
    mode: TradingMode,
    order_types: &'static [OrderType],
}

const LIMIT_ONLY: &[OrderType] = &[OrderType::Limit];
const LIMIT_AND_MARKET: &[OrderType] = &[OrderType::Limit, OrderType::Market];
const NONE: &[OrderType] = &[];

const STOPLOSS_SUPPORT: &[StoplossSupport] = &[
    StoplossSupport { exchange: "binance", mode: TradingMode::Spot, order_types: LIMIT_ONLY },
    StoplossSupport { exchange: "binance", mode: TradingMode::Futures, order_types: LIMIT_AND_MARKET },
    StoplossSupport { exchange: "bybit", mode: TradingMode::Spot, order_types: NONE },
    StoplossSupport { exchange: "bybit", mode: TradingMode::Futures, order_types: LIMIT_AND_MARKET },
    StoplossSupport { exchange: "gate", mode: TradingMode::Spot, order_types: LIMIT_ONLY },
    StoplossSupport { exchange: "gate", mode: TradingMode::Futures, order_types: LIMIT_AND_MARKET },
    StoplossSupport { exchange: "htx", mode: TradingMode::Spot, order_types: LIMIT_ONLY },
    StoplossSupport { exchange: "hyperliquid", mode: TradingMode::Futures, order_types: LIMIT_AND_MARKET },
    StoplossSupport { exchange: "kraken", mode: TradingMode::Spot, order_types: LIMIT_AND_MARKET },
    StoplossSupport { exchange: "kucoin", mode: TradingMode::Spot, order_types: LIMIT_AND_MARKET },
    StoplossSupport { exchange: "okx", mode: TradingMode::Spot, order_types: LIMIT_ONLY },
    StoplossSupport { exchange: "okx", mode: TradingMode::Futures, order_types: LIMIT_AND_MARKET },
];

/// Returns the stoploss order types the exchange can place natively in the
/// given mode.
///
/// `None` means the exchange/mode combination is not in the table and
/// nothing can be said about it. An empty slice means stoploss on exchange
/// is not available at all.
pub fn stoploss_order_types(exchange: &str, mode: TradingMode) -> Option<&'static [OrderType]> {
    let exchange = exchange.to_lowercase();
    STOPLOSS_SUPPORT
        .iter()
        .find(|s| s.exchange == exchange && s.mode == mode)
        .map(|s| s.order_types)
}

/// Returns true if the exchange is listed for any trading mode.
pub fn is_known(exchange: &str) -> bool {
    let exchange = exchange.to_lowercase();
    STOPLOSS_SUPPORT.iter().any(|s| s.exchange == exchange)
}
