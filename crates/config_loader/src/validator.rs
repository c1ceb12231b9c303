//! Configuration validation
//!
//! Checks that go beyond shape: URL legality, degraded-state reporting.

use contracts::{RelayConfig, RelayError};
use tracing::warn;

use crate::parser::{ENV_API_BASE, ENV_WEBHOOK_URL};

/// Validate a parsed configuration
pub fn validate(config: &RelayConfig) -> Result<(), RelayError> {
    if let Some(webhook) = &config.webhook {
        validate_http_url(ENV_WEBHOOK_URL, &webhook.url)?;
    }

    if let Some(telegram) = &config.telegram {
        validate_http_url(ENV_API_BASE, &telegram.api_base)?;
    }

    if config.configured_sink_count() == 0 {
        // Valid but degraded: every dispatch will answer 503.
        warn!("No notification sink configured, emergencies cannot be forwarded");
    }

    Ok(())
}

/// An outbound endpoint must be an absolute http(s) URL with a host part.
fn validate_http_url(field: &str, url: &str) -> Result<(), RelayError> {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .ok_or_else(|| {
            RelayError::config_validation(field, format!("'{url}' is not an http(s) URL"))
        })?;

    let host = rest.split(['/', '?', '#']).next().unwrap_or("");
    if host.is_empty() {
        return Err(RelayError::config_validation(
            field,
            format!("'{url}' has no host"),
        ));
    }

    Ok(())
}
