//! Cross-field consistency rules.
//!
//! Field-level types and ranges are checked while the config is built; the
//! rules here need several fields at once, and the whitelist filtering
//! rewrites `exchange.pair_whitelist` in place.

use tracing::{info, warn};

use super::exchange::blacklist_regex;
use super::{ConfigError, PairlistMethod, PriceSide, TradingConfig};
use crate::domain::OrderType;
use crate::exchanges;

/// Runs every consistency rule, then filters the whitelist.
pub(crate) fn validate(config: &mut TradingConfig) -> Result<(), ConfigError> {
    check_live_credentials(config)?;
    check_stoploss_on_exchange(config)?;
    check_price_sides(config)?;
    check_edge(config)?;
    filter_whitelist(config)?;
    warn_remote_access(config);
    Ok(())
}

fn check_live_credentials(config: &TradingConfig) -> Result<(), ConfigError> {
    if config.dry_run {
        info!("Dry run is enabled, all orders will be simulated");
        return Ok(());
    }
    if config.exchange.key.is_empty() {
        return Err(ConfigError::missing("exchange.key"));
    }
    if config.exchange.secret.is_empty() {
        return Err(ConfigError::missing("exchange.secret"));
    }
    Ok(())
}

fn check_stoploss_on_exchange(config: &TradingConfig) -> Result<(), ConfigError> {
    let order_types = &config.order_types;
    if !order_types.stoploss_on_exchange {
        return Ok(());
    }

    let exchange = &config.exchange.name;
    let mode = config.trading_mode;
    match exchanges::stoploss_order_types(exchange, mode) {
        None => {
            let reason = if exchanges::is_known(exchange) {
                "trading mode not listed for this exchange"
            } else {
                "unknown exchange"
            };
            warn!(
                exchange = %exchange,
                trading_mode = mode.as_str(),
                reason,
                "Cannot verify stoploss on exchange support, accepting configuration as is"
            );
            Ok(())
        }
        Some([]) => Err(ConfigError::conflict(
            "order_types.stoploss_on_exchange",
            "exchange.name",
            format!(
                "{} does not support stoploss on exchange in {} mode",
                exchange,
                mode.as_str()
            ),
        )),
        Some(supported) if !supported.contains(&order_types.stoploss) => {
            let names: Vec<&str> = supported.iter().map(OrderType::as_str).collect();
            Err(ConfigError::conflict(
                "order_types.stoploss_on_exchange",
                "order_types.stoploss",
                format!(
                    "{} cannot place {} stoploss orders on exchange in {} mode (supported: {})",
                    exchange,
                    order_types.stoploss,
                    mode.as_str(),
                    names.join(", ")
                ),
            ))
        }
        Some(_) => Ok(()),
    }
}

fn check_price_sides(config: &TradingConfig) -> Result<(), ConfigError> {
    let entry_side = config.entry_pricing.price_side;
    if config.order_types.entry == OrderType::Market
        && !matches!(entry_side, PriceSide::Ask | PriceSide::Other)
    {
        return Err(ConfigError::conflict(
            "order_types.entry",
            "entry_pricing.price_side",
            format!(
                "market entry orders require price_side \"other\" or \"ask\", found {:?}",
                entry_side.as_str()
            ),
        ));
    }

    let exit_side = config.exit_pricing.price_side;
    if config.order_types.exit == OrderType::Market
        && !matches!(exit_side, PriceSide::Bid | PriceSide::Other)
    {
        return Err(ConfigError::conflict(
            "order_types.exit",
            "exit_pricing.price_side",
            format!(
                "market exit orders require price_side \"other\" or \"bid\", found {:?}",
                exit_side.as_str()
            ),
        ));
    }

    Ok(())
}

fn check_edge(config: &TradingConfig) -> Result<(), ConfigError> {
    let edge_enabled = config.edge.as_ref().is_some_and(|e| e.enabled);
    if edge_enabled && !config.use_exit_signal {
        return Err(ConfigError::conflict(
            "edge.enabled",
            "use_exit_signal",
            "edge requires exit signals, otherwise positions are never closed",
        ));
    }
    Ok(())
}

/// Removes blacklisted pairs and pairs not quoted in the stake currency.
fn filter_whitelist(config: &mut TradingConfig) -> Result<(), ConfigError> {
    let static_list = config
        .pairlists
        .first()
        .is_some_and(|p| p.method == PairlistMethod::StaticPairList);

    if static_list && config.exchange.pair_whitelist.is_empty() {
        return Err(ConfigError::missing("exchange.pair_whitelist"));
    }

    let mut blacklist = Vec::with_capacity(config.exchange.pair_blacklist.len());
    for (i, pattern) in config.exchange.pair_blacklist.iter().enumerate() {
        let regex = blacklist_regex(pattern).map_err(|e| {
            ConfigError::invalid(
                format!("exchange.pair_blacklist[{}]", i),
                format!("invalid pair pattern {:?}: {}", pattern, e),
            )
        })?;
        blacklist.push(regex);
    }

    let stake_currency = config.stake_currency.clone();
    config.exchange.pair_whitelist.retain(|pair| {
        let symbol = pair.to_string();
        if blacklist.iter().any(|re| re.is_match(&symbol)) {
            warn!(pair = %symbol, "Pair is blacklisted, removing it from the whitelist");
            return false;
        }
        if pair.quote != stake_currency {
            warn!(
                pair = %symbol,
                stake_currency = %stake_currency,
                "Pair is not quoted in the stake currency, removing it from the whitelist"
            );
            return false;
        }
        true
    });

    if static_list && config.exchange.pair_whitelist.is_empty() {
        return Err(ConfigError::invalid(
            "exchange.pair_whitelist",
            format!(
                "no pairs left after removing blacklisted pairs and pairs not quoted in {}",
                stake_currency
            ),
        ));
    }

    Ok(())
}

fn warn_remote_access(config: &TradingConfig) {
    let Some(api) = config.api_server.as_ref().filter(|a| a.enabled) else {
        return;
    };
    if api.is_exposed() {
        warn!(
            address = %api.listen_address(),
            "API server accepts external connections, make sure it is behind a firewall"
        );
    }
    if api.jwt_secret_key.is_none() {
        warn!("API server has no jwt_secret_key, a random one will be generated on every start");
    }
}
