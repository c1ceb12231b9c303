//! NotifySink trait - Coordinator output interface
//!
//! Defines the abstract interface for notification sinks.

use crate::{EmergencyReport, RelayError};

/// Notification delivery trait
///
/// All sink implementations must implement this trait.
#[trait_variant::make(NotifySink: Send)]
pub trait LocalNotifySink {
    /// Sink wire name (used for outcomes/logging/metrics)
    fn name(&self) -> &str;

    /// Deliver one emergency report
    ///
    /// # Errors
    /// Returns transport or remote-rejection error (should include context)
    async fn send(&self, report: &EmergencyReport) -> Result<(), RelayError>;
}
