//! Shared request-handler state
//!
//! Everything here is read-only after startup; handlers clone the `Arc`s.

use std::sync::Arc;
use std::time::Instant;

use contracts::{RelayConfig, RelayError};
use dispatcher::Coordinator;

/// State injected into every handler
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<RelayConfig>,
    pub coordinator: Arc<Coordinator>,
    started_at: Instant,
    /// Deployment profile reported by the test endpoint
    pub profile: String,
    /// When set, internal error details are included in 500 bodies
    pub diagnostic: bool,
}

impl AppState {
    /// Build the state and its sinks from the startup configuration
    ///
    /// # Errors
    /// Fails when a sink HTTP client cannot be constructed.
    pub fn new(config: RelayConfig) -> Result<Self, RelayError> {
        let coordinator = Coordinator::from_config(&config)?;
        let profile =
            std::env::var("RELAY_PROFILE").unwrap_or_else(|_| "production".to_string());
        let diagnostic = cfg!(debug_assertions) || profile == "development";

        Ok(Self {
            config: Arc::new(config),
            coordinator: Arc::new(coordinator),
            started_at: Instant::now(),
            profile,
            diagnostic,
        })
    }

    /// Seconds since the state was constructed
    pub fn uptime_secs(&self) -> f64 {
        self.started_at.elapsed().as_secs_f64()
    }
}
