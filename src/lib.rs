//! Configuration layer of the trading bot: loads comment-tolerant JSON (or
//! YAML) documents, merges them and validates the result into a
//! [`TradingConfig`].

pub mod config;
pub mod domain;
pub mod exchanges;

pub use config::{ConfigError, ConfigHandle, ConfigLoader, ConfigSource, TradingConfig};
