//! Configuration loading and validation for the trading engine.
//!
//! Documents are comment-tolerant JSON (or YAML by extension), merged in the
//! order given, overridden from `PREFIX__SECTION__KEY` environment variables
//! and validated into an immutable [`TradingConfig`].

mod api_server;
mod app;
mod de;
mod document;
mod duration;
mod edge;
mod error;
mod exchange;
mod handle;
mod loader;
mod merge;
mod notification;
mod orders;
mod pairlist;
mod pricing;
mod redact;
mod stake;
mod validate;

pub use api_server::{ApiServerConfig, ApiVerbosity};
pub use app::{InitialState, InternalsConfig};
pub use document::{ConfigSource, parse_document};
pub use duration::TimeoutUnit;
pub use edge::EdgeConfig;
pub use error::ConfigError;
pub use exchange::ExchangeConfig;
pub use handle::ConfigHandle;
pub use loader::{ConfigLoader, MAX_INCLUDE_DEPTH};
pub use notification::TelegramConfig;
pub use orders::{OrderTimeInForce, OrderTypes, StoplossPriceType, UnfilledTimeout};
pub use pairlist::{PairlistFilter, PairlistMethod, default_pairlists};
pub use pricing::{DepthOfMarket, PriceSide, PricingConfig};
pub use redact::REDACTED;
pub use stake::{StakeAmount, UNLIMITED_STAKE_AMOUNT};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::{MarginMode, Pair, TradingMode};

/// Top-level keys modeled by [`TradingConfig`].
const MODELED_KEYS: &[&str] = &[
    "add_config_files",
    "api_server",
    "available_capital",
    "bot_name",
    "cancel_open_orders_on_exit",
    "dry_run",
    "dry_run_wallet",
    "edge",
    "entry_pricing",
    "exchange",
    "exit_pricing",
    "fiat_display_currency",
    "force_entry_enable",
    "initial_state",
    "internals",
    "margin_mode",
    "max_open_trades",
    "order_time_in_force",
    "order_types",
    "pairlists",
    "stake_amount",
    "stake_currency",
    "telegram",
    "tradable_balance_ratio",
    "trading_mode",
    "unfilledtimeout",
    "use_exit_signal",
];

/// Top-level keys owned by the engine (strategy, storage, data, plugins).
/// Kept in [`TradingConfig::extra`] without a warning.
const PASSTHROUGH_KEYS: &[&str] = &[
    "$schema",
    "amend_last_stake_amount",
    "amount_reserve_percent",
    "backtest_breakdown",
    "coingecko",
    "custom_price_max_distance_ratio",
    "datadir",
    "dataformat_ohlcv",
    "dataformat_trades",
    "db_url",
    "discord",
    "download_trades",
    "exit_profit_offset",
    "exit_profit_only",
    "experimental",
    "external_message_consumer",
    "fee",
    "freqai",
    "freqaimodel",
    "freqaimodel_path",
    "ignore_buying_expired_candle_after",
    "ignore_roi_if_entry_signal",
    "last_stake_amount_min_ratio",
    "liquidation_buffer",
    "log_config",
    "logfile",
    "max_entry_position_adjustment",
    "minimal_roi",
    "new_pairs_days",
    "orderflow",
    "position_adjustment_enable",
    "process_only_new_candles",
    "protections",
    "recursive_strategy_search",
    "reduce_df_footprint",
    "startup_candle",
    "stoploss",
    "strategy",
    "strategy_path",
    "timeframe",
    "timeframe_detail",
    "trailing_only_offset_is_reached",
    "trailing_stop",
    "trailing_stop_positive",
    "trailing_stop_positive_offset",
    "user_data_dir",
    "webhook",
];

/// Validated configuration handed to the trading engine.
///
/// Built once per load and never mutated afterwards; share it through
/// [`ConfigHandle`] to get atomic reloads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradingConfig {
    #[serde(default = "default_bot_name")]
    pub bot_name: String,
    /// Maximum number of simultaneously open positions.
    pub max_open_trades: u32,
    #[serde(default)]
    pub stake_currency: String,
    #[serde(default)]
    pub stake_amount: StakeAmount,
    /// Fraction of the balance the bot may use, in (0, 1].
    #[serde(default = "default_tradable_balance_ratio")]
    pub tradable_balance_ratio: f64,
    /// Fixed capital to trade with instead of the wallet balance.
    #[serde(default)]
    pub available_capital: Option<Decimal>,
    #[serde(default = "default_true")]
    pub dry_run: bool,
    /// Starting balance of the simulated wallet.
    #[serde(default = "default_dry_run_wallet")]
    pub dry_run_wallet: Decimal,
    #[serde(default)]
    pub trading_mode: TradingMode,
    #[serde(default)]
    pub margin_mode: Option<MarginMode>,
    #[serde(default)]
    pub fiat_display_currency: Option<String>,
    #[serde(default)]
    pub cancel_open_orders_on_exit: bool,
    #[serde(default = "default_true")]
    pub use_exit_signal: bool,
    #[serde(default, rename = "unfilledtimeout")]
    pub unfilled_timeout: UnfilledTimeout,
    #[serde(default)]
    pub order_types: OrderTypes,
    #[serde(default)]
    pub order_time_in_force: OrderTimeInForce,
    #[serde(default)]
    pub entry_pricing: PricingConfig,
    #[serde(default)]
    pub exit_pricing: PricingConfig,
    #[serde(default)]
    pub exchange: ExchangeConfig,
    #[serde(default = "default_pairlists")]
    pub pairlists: Vec<PairlistFilter>,
    #[serde(default)]
    pub edge: Option<EdgeConfig>,
    #[serde(default)]
    pub api_server: Option<ApiServerConfig>,
    #[serde(default)]
    pub telegram: Option<TelegramConfig>,
    #[serde(default)]
    pub initial_state: InitialState,
    #[serde(default)]
    pub force_entry_enable: bool,
    #[serde(default)]
    pub internals: InternalsConfig,
    /// Engine-owned and unrecognized top-level keys, untouched.
    #[serde(skip_deserializing)]
    pub extra: Map<String, Value>,
    /// Top-level keys nothing knows about (typos, newer options).
    #[serde(skip_deserializing)]
    pub unrecognized_keys: Vec<String>,
    /// Documents that contributed to this config, in load order.
    #[serde(skip_deserializing)]
    pub config_files: Vec<String>,
}

fn default_bot_name() -> String {
    "tradebot".to_string()
}

fn default_tradable_balance_ratio() -> f64 {
    0.99
}

fn default_true() -> bool {
    true
}

fn default_dry_run_wallet() -> Decimal {
    Decimal::ONE_THOUSAND
}

impl TradingConfig {
    /// Loads and validates the given sources with a default [`ConfigLoader`].
    pub fn load(sources: &[ConfigSource]) -> Result<Self, ConfigError> {
        ConfigLoader::new().load(sources)
    }

    /// Tradable pairs after filtering, in configured order.
    pub fn whitelist(&self) -> &[Pair] {
        &self.exchange.pair_whitelist
    }

    /// Returns true if orders are sent to the exchange for real.
    pub fn is_live(&self) -> bool {
        !self.dry_run
    }

    /// Builds the config from a merged document. Types and enum values are
    /// checked by serde, ranges and conditionally required fields by the
    /// sections; cross-field rules live in `validate`.
    pub(crate) fn from_document(map: &Map<String, Value>) -> Result<Self, ConfigError> {
        let mut config: TradingConfig = de::from_document(map)?;
        if config.pairlists.is_empty() {
            config.pairlists = default_pairlists();
        }
        config.check_fields()?;
        (config.extra, config.unrecognized_keys) = collect_extra(map);
        Ok(config)
    }

    fn check_fields(&self) -> Result<(), ConfigError> {
        if self.stake_currency.trim().is_empty() {
            return Err(ConfigError::missing("stake_currency"));
        }
        self.exchange.validate()?;
        self.stake_amount.validate()?;

        let ratio = self.tradable_balance_ratio;
        if !(ratio > 0.0 && ratio <= 1.0) {
            return Err(ConfigError::invalid("tradable_balance_ratio", "must be in (0, 1]"));
        }
        if self.available_capital.is_some_and(|c| c <= Decimal::ZERO) {
            return Err(ConfigError::invalid("available_capital", "must be > 0"));
        }
        if self.dry_run_wallet <= Decimal::ZERO {
            return Err(ConfigError::invalid("dry_run_wallet", "must be > 0"));
        }
        if self.trading_mode != TradingMode::Spot && self.margin_mode.is_none() {
            return Err(ConfigError::missing("margin_mode"));
        }

        self.unfilled_timeout.validate()?;
        self.order_types.validate()?;
        self.entry_pricing.validate("entry_pricing")?;
        self.exit_pricing.validate("exit_pricing")?;
        pairlist::validate_pairlists(&self.pairlists)?;
        if let Some(edge) = &self.edge {
            edge.validate()?;
        }
        if let Some(api) = &self.api_server {
            api.validate()?;
        }
        if let Some(telegram) = &self.telegram {
            telegram.validate()?;
        }
        self.internals.validate()
    }
}

fn collect_extra(map: &Map<String, Value>) -> (Map<String, Value>, Vec<String>) {
    let mut extra = Map::new();
    let mut unrecognized = Vec::new();

    for (key, value) in map {
        if MODELED_KEYS.contains(&key.as_str()) {
            continue;
        }
        if !PASSTHROUGH_KEYS.contains(&key.as_str()) {
            unrecognized.push(key.clone());
        }
        extra.insert(key.clone(), value.clone());
    }

    (extra, unrecognized)
}
