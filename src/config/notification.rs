//! Telegram remote control.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::ConfigError;
use super::de::{optional_text, text};

/// Telegram bot settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelegramConfig {
    /// Whether the Telegram bot is active.
    #[serde(default)]
    pub enabled: bool,
    /// Bot token issued by BotFather.
    #[serde(default, deserialize_with = "text::deserialize")]
    pub token: String,
    /// Target chat/channel ID.
    #[serde(default, deserialize_with = "text::deserialize")]
    pub chat_id: String,
    /// Forum topic inside the chat.
    #[serde(default, deserialize_with = "optional_text::deserialize")]
    pub topic_id: Option<String>,
    /// Users allowed to send commands; empty allows everyone in the chat.
    #[serde(default)]
    pub authorized_users: Vec<String>,
    /// Offer a reload button on messages.
    #[serde(default = "default_true")]
    pub reload: bool,
    /// Balances below this value are hidden in balance reports.
    #[serde(default)]
    pub balance_dust_level: Option<f64>,
    /// Per-message-type notification switches, passed through as-is.
    #[serde(default)]
    pub notification_settings: Map<String, Value>,
}

fn default_true() -> bool {
    true
}

impl TelegramConfig {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.balance_dust_level.is_some_and(|level| level < 0.0) {
            return Err(ConfigError::invalid("telegram.balance_dust_level", "must be >= 0"));
        }
        if !self.enabled {
            return Ok(());
        }
        if self.token.is_empty() {
            return Err(ConfigError::missing("telegram.token"));
        }
        if self.chat_id.is_empty() {
            return Err(ConfigError::missing("telegram.chat_id"));
        }
        Ok(())
    }
}
