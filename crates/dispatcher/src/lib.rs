//! # Dispatcher
//!
//! Multi-sink emergency dispatch.
//!
//! Responsibilities:
//! - Fan out one `EmergencyReport` to every configured sink
//! - Convert per-sink errors into outcomes, never propagate them
//! - Aggregate outcomes into one `DispatchResult`

pub mod coordinator;
pub mod sinks;

pub use contracts::{DispatchResult, EmergencyReport, NotifySink, SinkOutcome};
pub use coordinator::Coordinator;
pub use sinks::{TelegramSink, WebhookSink, TELEGRAM_SERVICE, WEBHOOK_SERVICE};
