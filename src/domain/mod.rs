//! Domain vocabulary shared by the configuration model.

mod market;
mod order;
mod pair;

pub use market::{MarginMode, TradingMode};
pub use order::{OrderType, TimeInForce};
pub use pair::{Pair, PairError};
