//! Dispatch metric recording
//!
//! Called from the HTTP layer after each dispatch completes.

use contracts::{DispatchResult, OutcomeStatus, SinkOutcome};
use metrics::counter;

/// Record one completed emergency dispatch and its per-sink outcomes
///
/// # Example
///
/// ```ignore
/// let result = coordinator.dispatch_emergency(&report).await;
/// observability::record_emergency_dispatch(&result);
/// ```
pub fn record_emergency_dispatch(result: &DispatchResult) {
    counter!("vet_relay_emergencies_total").increment(1);

    let aggregate = if result.overall_success {
        "success"
    } else if result.is_empty() {
        "no_sinks"
    } else {
        "failed"
    };
    counter!("vet_relay_dispatches_total", "result" => aggregate).increment(1);

    for outcome in &result.outcomes {
        record_sink_outcome(outcome);
    }
}

/// Record one per-sink outcome
pub fn record_sink_outcome(outcome: &SinkOutcome) {
    counter!(
        "vet_relay_sink_outcomes_total",
        "service" => outcome.service.clone(),
        "status" => status_label(outcome.status).to_string()
    )
    .increment(1);
}

/// Record one accepted plain-message relay request
pub fn record_message_received() {
    counter!("vet_relay_messages_total").increment(1);
}

fn status_label(status: OutcomeStatus) -> &'static str {
    match status {
        OutcomeStatus::Success => "success",
        OutcomeStatus::Failed => "failed",
        OutcomeStatus::NotConfigured => "not_configured",
    }
}
