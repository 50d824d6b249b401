//! Exchange configuration.

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

use super::de::{optional_text, text};
use super::ConfigError;
use crate::domain::Pair;

/// Settings for the exchange the engine trades on.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ExchangeConfig {
    /// Exchange identifier, e.g. "binance".
    #[serde(default)]
    pub name: String,
    /// API key. Cleared in dry-run mode.
    #[serde(default, deserialize_with = "text::deserialize")]
    pub key: String,
    /// API secret. Cleared in dry-run mode.
    #[serde(default, deserialize_with = "text::deserialize")]
    pub secret: String,
    /// API passphrase for exchanges that need one.
    #[serde(default, deserialize_with = "optional_text::deserialize")]
    pub password: Option<String>,
    #[serde(default, deserialize_with = "optional_text::deserialize")]
    pub uid: Option<String>,
    /// Options handed to the synchronous exchange client as-is.
    #[serde(default)]
    pub ccxt_config: Map<String, Value>,
    /// Options handed to the asynchronous exchange client as-is.
    #[serde(default)]
    pub ccxt_async_config: Map<String, Value>,
    /// Tradable pairs, in configured order, after blacklist filtering.
    #[serde(default)]
    pub pair_whitelist: Vec<Pair>,
    /// Anchored regular expressions of pairs never to trade.
    #[serde(default)]
    pub pair_blacklist: Vec<String>,
    /// Use websocket market data where the exchange supports it.
    #[serde(default = "default_true")]
    pub enable_ws: bool,
    /// Minutes between market reloads.
    #[serde(default = "default_markets_refresh")]
    pub markets_refresh_interval: u32,
    #[serde(default)]
    pub skip_pair_validation: bool,
    /// Fee rate assumed when the exchange does not report one.
    #[serde(default)]
    pub unknown_fee_rate: Option<f64>,
}

fn default_true() -> bool {
    true
}

fn default_markets_refresh() -> u32 {
    60
}

impl ExchangeConfig {
    /// Returns true if both API key and secret are set.
    pub fn has_credentials(&self) -> bool {
        !self.key.is_empty() && !self.secret.is_empty()
    }

    /// Drops every credential, keeping the rest of the settings.
    pub(crate) fn clear_credentials(&mut self) {
        self.key.clear();
        self.secret.clear();
        self.password = None;
        self.uid = None;
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::missing("exchange.name"));
        }
        if self.markets_refresh_interval == 0 {
            return Err(ConfigError::invalid(
                "exchange.markets_refresh_interval",
                "must be > 0",
            ));
        }
        if self.unknown_fee_rate.is_some_and(|rate| rate < 0.0) {
            return Err(ConfigError::invalid("exchange.unknown_fee_rate", "must be >= 0"));
        }

        let mut seen: HashMap<&Pair, usize> = HashMap::new();
        for (i, pair) in self.pair_whitelist.iter().enumerate() {
            if let Some(first) = seen.insert(pair, i) {
                return Err(ConfigError::invalid(
                    format!("exchange.pair_whitelist[{}]", i),
                    format!("duplicate pair \"{}\", already listed at index {}", pair, first),
                ));
            }
        }

        for (i, pattern) in self.pair_blacklist.iter().enumerate() {
            blacklist_regex(pattern).map_err(|e| {
                ConfigError::invalid(
                    format!("exchange.pair_blacklist[{}]", i),
                    format!("invalid pair pattern {:?}: {}", pattern, e),
                )
            })?;
        }

        Ok(())
    }
}

/// Compiles a blacklist entry into a regex matching whole pair symbols.
pub(crate) fn blacklist_regex(pattern: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!("^(?:{})$", pattern))
}
