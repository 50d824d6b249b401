//! Stake sizing.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use super::ConfigError;

/// Sentinel string for "use the whole available balance, split evenly".
pub const UNLIMITED_STAKE_AMOUNT: &str = "unlimited";

/// Amount of stake currency committed per trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StakeAmount {
    /// Balance is divided across `max_open_trades`.
    #[default]
    Unlimited,
    /// Fixed amount in stake currency, always > 0.
    Fixed(Decimal),
}

impl StakeAmount {
    pub fn is_unlimited(&self) -> bool {
        matches!(self, StakeAmount::Unlimited)
    }

    /// Returns the fixed amount, if any.
    pub fn fixed(&self) -> Option<Decimal> {
        match self {
            StakeAmount::Fixed(amount) => Some(*amount),
            StakeAmount::Unlimited => None,
        }
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        match self {
            StakeAmount::Fixed(amount) if *amount <= Decimal::ZERO => Err(ConfigError::invalid(
                "stake_amount",
                format!("must be > 0 or {:?}, found {}", UNLIMITED_STAKE_AMOUNT, amount),
            )),
            _ => Ok(()),
        }
    }
}

impl fmt::Display for StakeAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StakeAmount::Unlimited => f.write_str(UNLIMITED_STAKE_AMOUNT),
            StakeAmount::Fixed(amount) => write!(f, "{}", amount),
        }
    }
}

impl Serialize for StakeAmount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            StakeAmount::Unlimited => serializer.serialize_str(UNLIMITED_STAKE_AMOUNT),
            // `Decimal` has an inherent `serialize` returning its raw bytes.
            StakeAmount::Fixed(amount) => Serialize::serialize(amount, serializer),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawStake {
    Text(String),
    Amount(Decimal),
}

impl<'de> Deserialize<'de> for StakeAmount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawStake::deserialize(deserializer).map_err(|_| {
            serde::de::Error::custom(format!(
                "expected a number or {:?}",
                UNLIMITED_STAKE_AMOUNT
            ))
        })?;
        match raw {
            RawStake::Text(s) if s == UNLIMITED_STAKE_AMOUNT => Ok(StakeAmount::Unlimited),
            RawStake::Text(s) => Err(serde::de::Error::custom(format!(
                "must be a positive number or {:?}, found {:?}",
                UNLIMITED_STAKE_AMOUNT, s
            ))),
            RawStake::Amount(amount) => Ok(StakeAmount::Fixed(amount)),
        }
    }
}
