//! Credential-free rendering of a loaded config.

use serde_json::Value;

use super::TradingConfig;

/// Placeholder written over secrets.
pub const REDACTED: &str = "REDACTED";

const SECRET_FIELDS: &[&[&str]] = &[
    &["exchange", "key"],
    &["exchange", "secret"],
    &["exchange", "password"],
    &["exchange", "uid"],
    &["api_server", "password"],
    &["api_server", "jwt_secret_key"],
    &["api_server", "ws_token"],
    &["telegram", "token"],
    &["telegram", "chat_id"],
    &["extra", "webhook", "url"],
    &["extra", "discord", "webhook_url"],
];

impl TradingConfig {
    /// Serializes the config with every secret replaced by [`REDACTED`].
    /// Empty or unset secrets are left as they are.
    pub fn redacted(&self) -> serde_json::Result<Value> {
        let mut value = serde_json::to_value(self)?;
        for path in SECRET_FIELDS {
            mask(&mut value, path);
        }
        Ok(value)
    }
}

fn mask(value: &mut Value, path: &[&str]) {
    let Some((last, parents)) = path.split_last() else {
        return;
    };

    let mut current = value;
    for segment in parents {
        match current.get_mut(*segment) {
            Some(next) => current = next,
            None => return,
        }
    }

    if let Some(secret) = current.get_mut(*last) {
        let is_set = match secret {
            Value::Null => false,
            Value::String(s) => !s.is_empty(),
            Value::Array(items) => !items.is_empty(),
            _ => true,
        };
        if is_set {
            *secret = Value::String(REDACTED.to_string());
        }
    }
}
