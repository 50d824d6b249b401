//! Turns an ordered list of sources into a validated [`TradingConfig`].
//!
//! Layers are merged with figment, lowest precedence first: each source's
//! includes, the source itself, then `PREFIX__SECTION__KEY` environment
//! variables.

use figment::Figment;
use figment::providers::{Env, Serialized};
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use super::merge::{align_key_case, remove_nulls, resolves};
use super::{ConfigError, ConfigSource, TradingConfig, validate};

/// Maximum nesting of `add_config_files` includes.
pub const MAX_INCLUDE_DEPTH: usize = 5;

const INCLUDE_KEY: &str = "add_config_files";

/// Fields that hold free text even when the value looks like a number.
/// Environment values for these are taken verbatim instead of parsed.
const TEXT_FIELDS: &[&str] = &[
    "bot_name",
    "stake_currency",
    "fiat_display_currency",
    "exchange.name",
    "exchange.key",
    "exchange.secret",
    "exchange.password",
    "exchange.uid",
    "telegram.token",
    "telegram.chat_id",
    "telegram.topic_id",
    "api_server.username",
    "api_server.password",
    "api_server.jwt_secret_key",
];

/// Loads configuration sources.
///
/// Later sources override earlier ones; within one source, the document
/// overrides the files it includes. Environment overrides, when a prefix is
/// set, are applied last.
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    env_prefix: Option<String>,
}

impl ConfigLoader {
    /// Loader without environment overrides.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables `PREFIX__SECTION__KEY` environment overrides.
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = Some(prefix.into());
        self
    }

    pub fn env_prefix(&self) -> Option<&str> {
        self.env_prefix.as_deref()
    }

    /// Loads, merges and validates `sources`, reading overrides from the
    /// process environment.
    pub fn load(&self, sources: &[ConfigSource]) -> Result<TradingConfig, ConfigError> {
        let (mut merged, files, env_paths) = self.merge(sources)?;

        for path in &env_paths {
            let segments: Vec<&str> = path.split('.').collect();
            align_key_case(&mut merged, &segments);
        }

        let mut config = TradingConfig::from_document(&merged)?;
        for key in &config.unrecognized_keys {
            warn!(key = %key, "Unrecognized configuration key, keeping it without validation");
        }
        warn_unused_env(&config, &env_paths);

        validate::validate(&mut config)?;

        if config.dry_run {
            let exchange = &config.exchange;
            let had_credentials = !exchange.key.is_empty()
                || !exchange.secret.is_empty()
                || exchange.password.is_some()
                || exchange.uid.is_some();
            if had_credentials {
                info!("Dry run is enabled, removing exchange credentials");
                config.exchange.clear_credentials();
            }
        }

        config.config_files = files;
        debug!(
            files = ?config.config_files,
            exchange = %config.exchange.name,
            pairs = config.exchange.pair_whitelist.len(),
            "Configuration validated"
        );

        Ok(config)
    }

    /// Merges all sources, their includes and the environment into one
    /// document without validating it. Returns the document and the files
    /// in load order.
    pub fn merge_sources(
        &self,
        sources: &[ConfigSource],
    ) -> Result<(Map<String, Value>, Vec<String>), ConfigError> {
        self.merge(sources).map(|(merged, files, _)| (merged, files))
    }

    fn merge(
        &self,
        sources: &[ConfigSource],
    ) -> Result<(Map<String, Value>, Vec<String>, Vec<String>), ConfigError> {
        if sources.is_empty() {
            warn!("No configuration sources given");
        }

        let mut figment = Figment::new();
        let mut files = Vec::new();
        for source in sources {
            figment = self.layer(figment, source, 0, &mut files)?;
        }

        let mut env_paths = Vec::new();
        if let Some(prefix) = &self.env_prefix {
            let env = Env::prefixed(&format!("{}__", prefix))
                .split("__")
                .map(|key| key.as_str().to_ascii_lowercase().into());
            let mut verbatim = Vec::new();
            for (key, raw) in env.iter() {
                let path = key.as_str().to_string();
                info!(field = %path, "Config value overridden from environment");
                if TEXT_FIELDS.contains(&path.as_str()) {
                    verbatim.push((path.clone(), raw));
                }
                env_paths.push(path);
            }

            figment = figment.merge(env);
            for (path, raw) in verbatim {
                figment = figment.merge(Serialized::default(&path, raw));
            }
        }

        let mut merged: Map<String, Value> = figment
            .extract()
            .map_err(|e| ConfigError::Merge(Box::new(e)))?;
        merged.remove(INCLUDE_KEY);
        remove_nulls(&mut merged);

        Ok((merged, files, env_paths))
    }

    /// Merges the files `source` includes, then `source` itself, over
    /// `figment`.
    fn layer(
        &self,
        figment: Figment,
        source: &ConfigSource,
        depth: usize,
        files: &mut Vec<String>,
    ) -> Result<Figment, ConfigError> {
        if depth > MAX_INCLUDE_DEPTH {
            return Err(ConfigError::invalid(
                INCLUDE_KEY,
                format!(
                    "includes nested deeper than {} levels at {}, possible include loop",
                    MAX_INCLUDE_DEPTH,
                    source.name()
                ),
            ));
        }

        let document = source.read()?;
        debug!(document = %source.name(), depth, "Loaded config document");

        let mut figment = figment;
        let base = source.base_dir();
        for include in includes(&document.map)? {
            let included = ConfigSource::file(base.join(include));
            figment = self.layer(figment, &included, depth + 1, files)?;
        }

        files.push(source.name());
        Ok(document.merge_into(figment))
    }
}

fn includes(map: &Map<String, Value>) -> Result<Vec<&str>, ConfigError> {
    match map.get(INCLUDE_KEY) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                item.as_str().ok_or_else(|| {
                    ConfigError::invalid(format!("{}[{}]", INCLUDE_KEY, i), "expected a file path")
                })
            })
            .collect(),
        Some(_) => Err(ConfigError::invalid(INCLUDE_KEY, "expected a list of file paths")),
    }
}

/// Warns about environment overrides that ended up nowhere in the config.
fn warn_unused_env(config: &TradingConfig, env_paths: &[String]) {
    if env_paths.is_empty() {
        return;
    }
    let Ok(rendered) = serde_json::to_value(config) else {
        return;
    };
    let extra = Value::Object(config.extra.clone());
    for path in env_paths {
        let segments: Vec<&str> = path.split('.').collect();
        if !resolves(&rendered, &segments) && !resolves(&extra, &segments) {
            warn!(field = %path, "Environment override does not match any config field, ignoring it");
        }
    }
}
