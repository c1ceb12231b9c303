//! Relay configuration - read once at startup, immutable afterwards
//!
//! A sink whose section is `None` is disabled; a configuration with every
//! sink disabled is a valid (degraded) running state.

/// Default HTTP listen port
pub const DEFAULT_PORT: u16 = 3000;

/// Default Telegram Bot API base URL
pub const DEFAULT_TELEGRAM_API_BASE: &str = "https://api.telegram.org";

/// Telegram sink credentials
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelegramConfig {
    /// Bot token (`TELEGRAM_BOT_TOKEN`)
    pub bot_token: String,
    /// Target chat identifier (`TELEGRAM_CHAT_ID`)
    pub chat_id: String,
    /// Bot API base URL, overridable for tests (`TELEGRAM_API_BASE`)
    pub api_base: String,
}

/// Automation webhook sink configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookConfig {
    /// Webhook endpoint (`MAKE_WEBHOOK_URL`)
    pub url: String,
}

/// Process-wide configuration, constructed once and injected
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayConfig {
    /// Telegram sink, `None` when credentials are absent
    pub telegram: Option<TelegramConfig>,
    /// Webhook sink, `None` when the URL is absent
    pub webhook: Option<WebhookConfig>,
    /// HTTP listen port (`PORT`)
    pub port: u16,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            telegram: None,
            webhook: None,
            port: DEFAULT_PORT,
        }
    }
}

impl RelayConfig {
    pub fn telegram_configured(&self) -> bool {
        self.telegram.is_some()
    }

    pub fn webhook_configured(&self) -> bool {
        self.webhook.is_some()
    }

    /// Number of sinks that would participate in a dispatch
    pub fn configured_sink_count(&self) -> usize {
        usize::from(self.telegram.is_some()) + usize::from(self.webhook.is_some())
    }
}
