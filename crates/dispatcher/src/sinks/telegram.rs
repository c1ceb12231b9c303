//! TelegramSink - Bot API sendMessage to a fixed chat
//!
//! Besides the `NotifySink` seam this sink carries the Telegram-only
//! operations used by the test endpoint and the startup notification.

use chrono::Local;
use contracts::{EmergencyReport, NotifySink, RelayError, TelegramConfig};
use serde::Deserialize;
use tracing::{debug, instrument};

/// Fixed wire name of the chat sink
pub const TELEGRAM_SERVICE: &str = "Telegram";

/// Bot API response envelope
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
struct ApiEnvelope<T> {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    result: Option<T>,
}

#[derive(Debug, Deserialize)]
struct BotInfo {
    username: String,
}

/// Sink that submits Markdown messages to one configured chat
#[derive(Debug, Clone)]
pub struct TelegramSink {
    bot_token: String,
    chat_id: String,
    api_base: String,
    client: reqwest::Client,
}

impl TelegramSink {
    /// Create a new TelegramSink
    ///
    /// # Errors
    /// Returns a transport error when the HTTP client cannot be built.
    pub fn new(config: &TelegramConfig) -> Result<Self, RelayError> {
        Ok(Self {
            bot_token: config.bot_token.clone(),
            chat_id: config.chat_id.clone(),
            api_base: config.api_base.trim_end_matches('/').to_string(),
            client: super::build_http_client(TELEGRAM_SERVICE)?,
        })
    }

    /// Identity check against the Bot API, returns the bot username
    #[instrument(name = "telegram_sink_get_me", skip(self))]
    pub async fn get_me(&self) -> Result<String, RelayError> {
        let url = format!("{}/bot{}/getMe", self.api_base, self.bot_token);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| RelayError::transport(TELEGRAM_SERVICE, e.to_string()))?;

        let info: BotInfo = Self::unwrap_envelope(response).await?;
        debug!(username = %info.username, "Bot identity confirmed");
        Ok(info.username)
    }

    /// Forward a plain relayed message
    pub async fn send_plain_message(&self, text: &str) -> Result<(), RelayError> {
        self.send_markdown(&format!("💬 **Messaggio ricevuto:**\n{text}"))
            .await
    }

    /// Live configuration-test notification
    pub async fn send_test_message(&self, username: &str) -> Result<(), RelayError> {
        self.send_markdown(&format!(
            "🧪 **Test Configurazione**\nBot: @{username}\nStato: ✅ Funzionante\nOra: {}",
            localized_timestamp()
        ))
        .await
    }

    /// Best-effort startup announcement
    pub async fn send_startup_message(&self, port: u16) -> Result<(), RelayError> {
        self.send_markdown(&format!(
            "🟢 **Server Avviato**\nPorta: {port}\nOra: {}",
            localized_timestamp()
        ))
        .await
    }

    /// Submit one Markdown message to the configured chat
    #[instrument(name = "telegram_sink_send_markdown", skip(self, text), fields(len = text.len()))]
    async fn send_markdown(&self, text: &str) -> Result<(), RelayError> {
        let url = format!("{}/bot{}/sendMessage", self.api_base, self.bot_token);
        let response = self
            .client
            .post(&url)
            .json(&serde_json::json!({
                "chat_id": self.chat_id,
                "text": text,
                "parse_mode": "Markdown",
            }))
            .send()
            .await
            .map_err(|e| RelayError::transport(TELEGRAM_SERVICE, e.to_string()))?;

        Self::unwrap_envelope::<serde_json::Value>(response).await?;
        Ok(())
    }

    /// Check the HTTP status and the `ok` flag of a Bot API response.
    ///
    /// The API `description` is the error detail when present; otherwise
    /// the HTTP status stands in.
    async fn unwrap_envelope<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, RelayError> {
        let status = response.status();
        let envelope: ApiEnvelope<T> = match response.json().await {
            Ok(envelope) => envelope,
            Err(_) if !status.is_success() => {
                return Err(RelayError::remote_rejection(
                    TELEGRAM_SERVICE,
                    format!("HTTP {}", status.as_u16()),
                ));
            }
            Err(e) => {
                return Err(RelayError::remote_rejection(
                    TELEGRAM_SERVICE,
                    format!("malformed API response: {e}"),
                ));
            }
        };

        if !envelope.ok {
            let detail = envelope
                .description
                .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));
            return Err(RelayError::remote_rejection(TELEGRAM_SERVICE, detail));
        }

        envelope.result.ok_or_else(|| {
            RelayError::remote_rejection(TELEGRAM_SERVICE, "API response without result")
        })
    }
}

impl NotifySink for TelegramSink {
    fn name(&self) -> &str {
        TELEGRAM_SERVICE
    }

    #[instrument(name = "telegram_sink_send", skip(self, report))]
    async fn send(&self, report: &EmergencyReport) -> Result<(), RelayError> {
        self.send_markdown(&emergency_message(report)).await
    }
}

/// The fixed human-readable emergency template
pub fn emergency_message(report: &EmergencyReport) -> String {
    format!(
        "🚨 **EMERGENZA VETERINARIA** 🚨\n\
         \n\
         **Cliente:** {customer}\n\
         **Pet:** {pet}\n\
         **Telefono:** {phone}\n\
         **Posizione:** {location}\n\
         \n\
         **Messaggio:**\n\
         \"{message}\"\n\
         \n\
         **Ora:** {time}",
        customer = report.customer_display(),
        pet = report.pet_display(),
        phone = report.phone_display(),
        location = report.location_display(),
        message = report.message_display(),
        time = localized_timestamp(),
    )
}

/// Server-local timestamp in the it-IT shape: `dd/mm/yyyy, HH:MM:SS`
fn localized_timestamp() -> String {
    Local::now().format("%d/%m/%Y, %H:%M:%S").to_string()
}
