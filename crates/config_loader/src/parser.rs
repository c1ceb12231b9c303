//! Environment parsing
//!
//! Turns raw environment variables into a `RelayConfig`. Validation of the
//! parsed values happens separately in `validator`.

use contracts::{
    RelayConfig, RelayError, TelegramConfig, WebhookConfig, DEFAULT_PORT,
    DEFAULT_TELEGRAM_API_BASE,
};
use tracing::{debug, warn};

/// Environment variable names
pub const ENV_BOT_TOKEN: &str = "TELEGRAM_BOT_TOKEN";
pub const ENV_CHAT_ID: &str = "TELEGRAM_CHAT_ID";
pub const ENV_WEBHOOK_URL: &str = "MAKE_WEBHOOK_URL";
pub const ENV_PORT: &str = "PORT";
pub const ENV_API_BASE: &str = "TELEGRAM_API_BASE";

/// Parse configuration from a key lookup function
pub fn parse(lookup: &impl Fn(&str) -> Option<String>) -> Result<RelayConfig, RelayError> {
    let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    let telegram = parse_telegram(
        non_empty(ENV_BOT_TOKEN),
        non_empty(ENV_CHAT_ID),
        non_empty(ENV_API_BASE),
    )?;

    let webhook = non_empty(ENV_WEBHOOK_URL).map(|url| WebhookConfig { url });

    let port = match non_empty(ENV_PORT) {
        Some(raw) => raw.parse::<u16>().map_err(|e| {
            RelayError::config_validation(ENV_PORT, format!("invalid port '{raw}': {e}"))
        })?,
        None => DEFAULT_PORT,
    };

    debug!(
        telegram = telegram.is_some(),
        webhook = webhook.is_some(),
        port,
        "Configuration parsed"
    );

    Ok(RelayConfig {
        telegram,
        webhook,
        port,
    })
}

/// The Telegram sink needs both the token and the chat id. A single present
/// variable is almost certainly a deployment mistake, so it is rejected
/// instead of silently disabling the sink.
fn parse_telegram(
    bot_token: Option<String>,
    chat_id: Option<String>,
    api_base: Option<String>,
) -> Result<Option<TelegramConfig>, RelayError> {
    match (bot_token, chat_id) {
        (Some(bot_token), Some(chat_id)) => Ok(Some(TelegramConfig {
            bot_token,
            chat_id,
            api_base: api_base.unwrap_or_else(|| DEFAULT_TELEGRAM_API_BASE.to_string()),
        })),
        (None, None) => {
            warn!("Telegram sink disabled: TELEGRAM_BOT_TOKEN and TELEGRAM_CHAT_ID are not set");
            Ok(None)
        }
        (Some(_), None) => Err(RelayError::config_validation(
            ENV_CHAT_ID,
            "TELEGRAM_BOT_TOKEN is set but TELEGRAM_CHAT_ID is missing",
        )),
        (None, Some(_)) => Err(RelayError::config_validation(
            ENV_BOT_TOKEN,
            "TELEGRAM_CHAT_ID is set but TELEGRAM_BOT_TOKEN is missing",
        )),
    }
}
