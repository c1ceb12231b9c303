//! Sink implementations
//!
//! Contains WebhookSink and TelegramSink.

mod telegram;
mod webhook;

pub use self::telegram::{TelegramSink, TELEGRAM_SERVICE};
pub use self::webhook::{WebhookSink, WEBHOOK_SERVICE};

use std::time::Duration;

use contracts::RelayError;

/// One client per sink, transport defaults plus a single overall timeout.
pub(crate) fn build_http_client(sink: &str) -> Result<reqwest::Client, RelayError> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .user_agent(concat!("vet-relay/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| RelayError::transport(sink, format!("failed to build client: {e}")))
}
