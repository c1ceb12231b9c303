//! `check` command implementation.

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use crate::cli::CheckArgs;

/// Check result for JSON output
#[derive(Serialize)]
struct CheckResult {
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    warnings: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<CoverageSummary>,
}

#[derive(Serialize)]
struct CoverageSummary {
    port: u16,
    telegram_configured: bool,
    make_configured: bool,
    sink_count: usize,
}

/// Execute the `check` command
pub fn run_check(args: &CheckArgs) -> Result<()> {
    info!("Checking environment configuration");

    let result = check_config();

    if args.json {
        let json =
            serde_json::to_string_pretty(&result).context("Failed to serialize check result")?;
        println!("{}", json);
    } else {
        print_check_result(&result);
    }

    if result.valid {
        Ok(())
    } else {
        anyhow::bail!("Configuration check failed")
    }
}

fn check_config() -> CheckResult {
    match config_loader::ConfigLoader::load_from_env() {
        Ok(config) => {
            let warnings = collect_warnings(&config);

            CheckResult {
                valid: true,
                error: None,
                warnings: if warnings.is_empty() {
                    None
                } else {
                    Some(warnings)
                },
                summary: Some(CoverageSummary {
                    port: config.port,
                    telegram_configured: config.telegram_configured(),
                    make_configured: config.webhook_configured(),
                    sink_count: config.configured_sink_count(),
                }),
            }
        }
        Err(e) => CheckResult {
            valid: false,
            error: Some(e.to_string()),
            warnings: None,
            summary: None,
        },
    }
}

/// Collect configuration warnings (non-fatal issues)
fn collect_warnings(config: &contracts::RelayConfig) -> Vec<String> {
    let mut warnings = Vec::new();

    if config.configured_sink_count() == 0 {
        warnings
            .push("No notification sink configured - emergencies will be answered with 503".to_string());
    }

    if !config.telegram_configured() {
        warnings.push(
            "Telegram sink disabled - set TELEGRAM_BOT_TOKEN and TELEGRAM_CHAT_ID".to_string(),
        );
    }

    if !config.webhook_configured() {
        warnings.push("Make webhook disabled - set MAKE_WEBHOOK_URL".to_string());
    }

    warnings
}

fn print_check_result(result: &CheckResult) {
    if result.valid {
        println!("✓ Configuration is valid");

        if let Some(ref summary) = result.summary {
            println!("\n  Port: {}", summary.port);
            println!(
                "  Telegram: {}",
                if summary.telegram_configured {
                    "configured"
                } else {
                    "not configured"
                }
            );
            println!(
                "  Make webhook: {}",
                if summary.make_configured {
                    "configured"
                } else {
                    "not configured"
                }
            );
            println!("  Active sinks: {}", summary.sink_count);
        }

        if let Some(ref warnings) = result.warnings {
            println!("\n⚠ Warnings:");
            for warning in warnings {
                println!("  - {}", warning);
            }
        }
    } else {
        println!("✗ Configuration is invalid");
        if let Some(ref error) = result.error {
            println!("\n  Error: {}", error);
        }
    }
}
