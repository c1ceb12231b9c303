//! Per-sink delivery outcomes and the request-level aggregate

use serde::{Deserialize, Serialize};

/// Delivery status of one sink for one dispatch attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeStatus {
    /// The sink accepted the notification
    Success,
    /// The sink was invoked and rejected or was unreachable
    Failed,
    /// The sink had no usable configuration, nothing was attempted
    NotConfigured,
}

/// Result of one dispatch attempt against one sink
///
/// Immutable once created; collected in dispatch order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SinkOutcome {
    /// Fixed wire name of the sink (`Make` or `Telegram`)
    pub service: String,
    pub status: OutcomeStatus,
    /// Error detail, present only for `Failed`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SinkOutcome {
    /// Create a success outcome
    pub fn success(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            status: OutcomeStatus::Success,
            error: None,
        }
    }

    /// Create a failed outcome with error detail
    pub fn failed(service: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            status: OutcomeStatus::Failed,
            error: Some(error.into()),
        }
    }

    /// Create a not-configured outcome
    pub fn not_configured(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            status: OutcomeStatus::NotConfigured,
            error: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == OutcomeStatus::Success
    }
}

/// Aggregate result of one dispatch across all configured sinks
///
/// Derived per request, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchResult {
    pub overall_success: bool,
    pub outcomes: Vec<SinkOutcome>,
}

impl DispatchResult {
    /// Aggregate a sequence of outcomes.
    ///
    /// `overall_success` is true iff at least one outcome succeeded. An
    /// empty sequence (nothing configured) aggregates to `false`.
    pub fn from_outcomes(outcomes: Vec<SinkOutcome>) -> Self {
        let overall_success = outcomes.iter().any(SinkOutcome::is_success);
        Self {
            overall_success,
            outcomes,
        }
    }

    /// True when no sink produced any outcome at all
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// True when every recorded outcome is `Failed`
    pub fn all_failed(&self) -> bool {
        !self.outcomes.is_empty()
            && self
                .outcomes
                .iter()
                .all(|o| o.status == OutcomeStatus::Failed)
    }
}
