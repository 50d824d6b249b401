//! Shared, reloadable configuration.

use std::sync::{Arc, PoisonError, RwLock};

use tracing::{info, warn};

use super::{ConfigError, ConfigLoader, ConfigSource, TradingConfig};

/// Publishes the current [`TradingConfig`] to the engine.
///
/// Readers get an `Arc` snapshot that stays valid for as long as they hold
/// it. A reload builds and validates the new config completely before the
/// pointer is swapped; a failed reload leaves the published config alone.
#[derive(Debug)]
pub struct ConfigHandle {
    loader: ConfigLoader,
    sources: Vec<ConfigSource>,
    current: RwLock<Arc<TradingConfig>>,
}

impl ConfigHandle {
    /// Loads the initial config from `sources`.
    pub fn load(loader: ConfigLoader, sources: Vec<ConfigSource>) -> Result<Self, ConfigError> {
        let config = loader.load(&sources)?;
        Ok(Self {
            loader,
            sources,
            current: RwLock::new(Arc::new(config)),
        })
    }

    /// Snapshot of the config currently in use.
    pub fn current(&self) -> Arc<TradingConfig> {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    pub fn sources(&self) -> &[ConfigSource] {
        &self.sources
    }

    /// Reloads every source and publishes the result if it is valid.
    pub fn reload(&self) -> Result<Arc<TradingConfig>, ConfigError> {
        let fresh = match self.loader.load(&self.sources) {
            Ok(config) => Arc::new(config),
            Err(e) => {
                warn!(error = %e, "Config reload failed, keeping the previous configuration");
                return Err(e);
            }
        };

        {
            let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
            *current = Arc::clone(&fresh);
        }

        info!(files = ?fresh.config_files, "Configuration reloaded");
        Ok(fresh)
    }
}
