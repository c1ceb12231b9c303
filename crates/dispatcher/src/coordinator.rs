//! Coordinator - fan-out to configured sinks and outcome aggregation
//!
//! The one real design decision here is partial-failure tolerance: a down
//! sink must never fail the request, and "nothing configured" must stay
//! distinguishable from "everything failed".

use contracts::{
    DispatchResult, EmergencyReport, NotifySink, RelayConfig, RelayError, SinkOutcome,
};
use tracing::{debug, error, info, instrument, warn};

use crate::sinks::{TelegramSink, WebhookSink, TELEGRAM_SERVICE};

/// Dispatches emergencies to every configured sink
pub struct Coordinator {
    webhook: Option<WebhookSink>,
    telegram: Option<TelegramSink>,
}

impl Coordinator {
    /// Build sinks from the startup configuration
    ///
    /// # Errors
    /// Fails only when an HTTP client cannot be constructed.
    pub fn from_config(config: &RelayConfig) -> Result<Self, RelayError> {
        let webhook = config.webhook.as_ref().map(WebhookSink::new).transpose()?;
        let telegram = config.telegram.as_ref().map(TelegramSink::new).transpose()?;

        Ok(Self { webhook, telegram })
    }

    /// Create a coordinator with explicit sinks (for testing)
    pub fn with_sinks(webhook: Option<WebhookSink>, telegram: Option<TelegramSink>) -> Self {
        Self { webhook, telegram }
    }

    /// Number of sinks that participate in a dispatch
    pub fn configured_sink_count(&self) -> usize {
        usize::from(self.webhook.is_some()) + usize::from(self.telegram.is_some())
    }

    /// The chat sink, when configured (used by the test endpoint and the
    /// startup notification)
    pub fn telegram(&self) -> Option<&TelegramSink> {
        self.telegram.as_ref()
    }

    /// Deliver one report to all configured sinks and aggregate.
    ///
    /// The two sends are independent and run concurrently; this method is
    /// the join point. Sink errors are converted to `failed` outcomes and
    /// never propagate. Outcome order is webhook first, then chat.
    ///
    /// Non-configuration is asymmetric on purpose, mirroring the observed
    /// wire contract: an unconfigured webhook contributes no outcome, an
    /// unconfigured chat sink contributes an explicit `not_configured`.
    #[instrument(name = "dispatch_emergency", skip(self, report), fields(sinks = self.configured_sink_count()))]
    pub async fn dispatch_emergency(&self, report: &EmergencyReport) -> DispatchResult {
        let webhook_attempt = async {
            match &self.webhook {
                Some(sink) => Some(attempt(sink, report).await),
                None => None,
            }
        };
        let telegram_attempt = async {
            match &self.telegram {
                Some(sink) => Some(attempt(sink, report).await),
                None => {
                    warn!("Telegram not configured, emergency not forwarded to chat");
                    Some(SinkOutcome::not_configured(TELEGRAM_SERVICE))
                }
            }
        };

        let (webhook_outcome, telegram_outcome) = tokio::join!(webhook_attempt, telegram_attempt);

        let mut outcomes = Vec::with_capacity(2);
        outcomes.extend(webhook_outcome);
        outcomes.extend(telegram_outcome);

        let result = DispatchResult::from_outcomes(outcomes);
        info!(
            overall_success = result.overall_success,
            outcomes = result.outcomes.len(),
            "Emergency dispatch completed"
        );
        result
    }

    /// Forward a free-text message to the chat sink, fire-and-forget.
    ///
    /// The caller's response never waits on or reflects the result; a
    /// failure is only logged from the detached task.
    pub fn relay_plain_message(&self, text: &str) {
        let Some(telegram) = self.telegram.clone() else {
            debug!("Telegram not configured, plain message not forwarded");
            return;
        };

        let text = text.to_string();
        tokio::spawn(async move {
            if let Err(e) = telegram.send_plain_message(&text).await {
                warn!(error = %e, "Plain message forwarding to Telegram failed");
            }
        });
    }
}

/// Invoke one sink and convert the result into an outcome
async fn attempt<S: NotifySink>(sink: &S, report: &EmergencyReport) -> SinkOutcome {
    match sink.send(report).await {
        Ok(()) => {
            info!(sink = sink.name(), "Emergency delivered");
            SinkOutcome::success(sink.name())
        }
        Err(e) => {
            error!(sink = sink.name(), error = %e, "Emergency delivery failed");
            SinkOutcome::failed(sink.name(), e.outcome_detail())
        }
    }
}
