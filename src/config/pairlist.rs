//! Pairlist handler chain.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use super::ConfigError;

/// Pairlist handler implemented by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PairlistMethod {
    StaticPairList,
    VolumePairList,
    PercentChangePairList,
    ProducerPairList,
    RemotePairList,
    MarketCapPairList,
    AgeFilter,
    FullTradesFilter,
    OffsetFilter,
    PerformanceFilter,
    PrecisionFilter,
    PriceFilter,
    RangeStabilityFilter,
    ShuffleFilter,
    SpreadFilter,
    VolatilityFilter,
}

impl PairlistMethod {
    /// Generators produce the initial pair list and may lead the chain.
    pub fn is_generator(&self) -> bool {
        matches!(
            self,
            PairlistMethod::StaticPairList
                | PairlistMethod::VolumePairList
                | PairlistMethod::PercentChangePairList
                | PairlistMethod::ProducerPairList
                | PairlistMethod::RemotePairList
                | PairlistMethod::MarketCapPairList
        )
    }

    /// Generators that can also narrow a list produced by an earlier handler.
    fn can_filter(&self) -> bool {
        !matches!(
            self,
            PairlistMethod::StaticPairList | PairlistMethod::ProducerPairList
        )
    }
}

impl fmt::Display for PairlistMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Variant names are the document spelling.
        fmt::Debug::fmt(self, f)
    }
}

/// One stage of the pairlist chain: a method plus its own parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairlistFilter {
    pub method: PairlistMethod,
    /// Method-specific parameters, passed to the engine untouched.
    #[serde(flatten)]
    pub params: Map<String, Value>,
}

impl PairlistFilter {
    pub fn new(method: PairlistMethod) -> Self {
        Self {
            method,
            params: Map::new(),
        }
    }
}

/// Default chain when no `pairlists` are configured.
pub fn default_pairlists() -> Vec<PairlistFilter> {
    vec![PairlistFilter::new(PairlistMethod::StaticPairList)]
}

/// Checks handler ordering and per-method required parameters.
pub(crate) fn validate_pairlists(filters: &[PairlistFilter]) -> Result<(), ConfigError> {
    for (i, filter) in filters.iter().enumerate() {
        let method = filter.method;
        if i == 0 && !method.is_generator() {
            return Err(ConfigError::invalid(
                format!("pairlists[{}].method", i),
                format!("{} filters pairs and cannot be the first handler", method),
            ));
        }
        if i > 0 && method.is_generator() && !method.can_filter() {
            return Err(ConfigError::invalid(
                format!("pairlists[{}].method", i),
                format!("{} can only be used as the first handler", method),
            ));
        }

        if method == PairlistMethod::VolumePairList {
            let field = format!("pairlists[{}].number_assets", i);
            match filter.params.get("number_assets") {
                None | Some(Value::Null) => return Err(ConfigError::missing(field)),
                Some(Value::Number(n)) if n.as_u64().is_some_and(|n| n > 0) => {}
                Some(other) => {
                    return Err(ConfigError::invalid(
                        field,
                        format!("must be an integer > 0, found {}", other),
                    ));
                }
            }
        }
    }
    Ok(())
}
