//! WebhookSink - single POST to the automation webhook

use chrono::{SecondsFormat, Utc};
use contracts::{EmergencyReport, NotifySink, RelayError, WebhookConfig};
use tracing::{debug, instrument};

/// Fixed wire name of the webhook sink
pub const WEBHOOK_SERVICE: &str = "Make";

/// Sink that POSTs the report as a JSON document to a configured URL
#[derive(Debug, Clone)]
pub struct WebhookSink {
    url: String,
    client: reqwest::Client,
}

impl WebhookSink {
    /// Create a new WebhookSink
    ///
    /// # Errors
    /// Returns a transport error when the HTTP client cannot be built.
    pub fn new(config: &WebhookConfig) -> Result<Self, RelayError> {
        Ok(Self {
            url: config.url.clone(),
            client: super::build_http_client(WEBHOOK_SERVICE)?,
        })
    }

    /// Report JSON plus a server-generated UTC timestamp.
    ///
    /// Absent report fields are omitted entirely, not sent as null.
    fn payload(report: &EmergencyReport) -> Result<serde_json::Value, RelayError> {
        let mut payload = serde_json::to_value(report)
            .map_err(|e| RelayError::Other(format!("payload serialize error: {e}")))?;
        payload["timestamp"] = serde_json::Value::String(
            Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        );
        Ok(payload)
    }
}

impl NotifySink for WebhookSink {
    fn name(&self) -> &str {
        WEBHOOK_SERVICE
    }

    #[instrument(name = "webhook_sink_send", skip(self, report))]
    async fn send(&self, report: &EmergencyReport) -> Result<(), RelayError> {
        let payload = Self::payload(report)?;

        let response = self
            .client
            .post(&self.url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| RelayError::transport(WEBHOOK_SERVICE, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RelayError::remote_rejection(
                WEBHOOK_SERVICE,
                format!("HTTP {}", status.as_u16()),
            ));
        }

        debug!(status = status.as_u16(), "Webhook accepted emergency");
        Ok(())
    }
}
