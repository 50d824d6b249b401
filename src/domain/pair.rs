//! Trading pair symbols.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Pair parsing error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PairError {
    #[error("missing '/' separator, expected BASE/QUOTE")]
    MissingSeparator,
    #[error("empty {0} symbol")]
    EmptySymbol(&'static str),
    #[error("invalid character {0:?} in symbol")]
    InvalidCharacter(char),
}

/// A trading pair in "BASE/QUOTE" format, optionally with a settlement
/// currency for derivatives ("BTC/USDT:USDT").
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pair {
    pub base: String,
    pub quote: String,
    pub settle: Option<String>,
}

impl Pair {
    /// Returns true if this is a derivatives pair with a settlement currency.
    pub fn is_derivative(&self) -> bool {
        self.settle.is_some()
    }
}

fn check_symbol(symbol: &str, role: &'static str) -> Result<(), PairError> {
    if symbol.is_empty() {
        return Err(PairError::EmptySymbol(role));
    }
    match symbol
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')))
    {
        Some(c) => Err(PairError::InvalidCharacter(c)),
        None => Ok(()),
    }
}

impl FromStr for Pair {
    type Err = PairError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (base, rest) = s.split_once('/').ok_or(PairError::MissingSeparator)?;
        let (quote, settle) = match rest.split_once(':') {
            Some((quote, settle)) => (quote, Some(settle)),
            None => (rest, None),
        };

        check_symbol(base, "base")?;
        check_symbol(quote, "quote")?;
        if let Some(settle) = settle {
            check_symbol(settle, "settle")?;
        }

        Ok(Pair {
            base: base.to_string(),
            quote: quote.to_string(),
            settle: settle.map(str::to_string),
        })
    }
}

impl fmt::Display for Pair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base, self.quote)?;
        if let Some(settle) = &self.settle {
            write!(f, ":{}", settle)?;
        }
        Ok(())
    }
}

impl Serialize for Pair {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Pair {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let symbol = String::deserialize(deserializer)?;
        symbol
            .parse()
            .map_err(|e| serde::de::Error::custom(format!("malformed pair {:?}: {}", symbol, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_spot_pair() {
        let pair: Pair = "BTC/USDT".parse().unwrap();
        assert_eq!(pair.base, "BTC");
        assert_eq!(pair.quote, "USDT");
        assert!(!pair.is_derivative());
        assert_eq!(pair.to_string(), "BTC/USDT");
    }

    #[test]
    fn test_parse_futures_pair() {
        let pair: Pair = "ETH/USDT:USDT".parse().unwrap();
        assert_eq!(pair.settle.as_deref(), Some("USDT"));
        assert_eq!(pair.to_string(), "ETH/USDT:USDT");
    }

    #[test]
    fn test_parse_numeric_prefixed_base() {
        let pair: Pair = "1000SHIB/USDT".parse().unwrap();
        assert_eq!(pair.base, "1000SHIB");
    }

    #[test]
    fn test_parse_no_separator() {
        assert_eq!("BTCUSDT".parse::<Pair>(), Err(PairError::MissingSeparator));
    }

    #[test]
    fn test_parse_empty_quote() {
        assert_eq!("BTC/".parse::<Pair>(), Err(PairError::EmptySymbol("quote")));
    }

    #[test]
    fn test_deserialize_reports_symbol() {
        let err = serde_json::from_str::<Pair>("\"BTCUSDT\"").unwrap_err();
        assert!(err.to_string().contains("malformed pair \"BTCUSDT\""));

        let pair: Pair = serde_json::from_str("\"SOL/USDT:USDT\"").unwrap();
        assert!(pair.is_derivative());
    }

    #[test]
    fn test_parse_wildcard_rejected() {
        assert_eq!(
            "BTC/.*".parse::<Pair>(),
            Err(PairError::InvalidCharacter('*'))
        );
    }
}
