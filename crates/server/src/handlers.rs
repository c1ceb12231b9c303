//! Request handlers
//!
//! Response bodies and their Italian message strings are part of the public
//! contract and must not drift.

use axum::{
    body::Bytes,
    extract::State,
    http::{StatusCode, Uri},
    response::{Html, IntoResponse, Response},
    Json,
};
use chrono::{SecondsFormat, Utc};
use contracts::{EmergencyReport, RelayError};
use dispatcher::TelegramSink;
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info, instrument};

use crate::state::AppState;

/// `POST /api/emergency`
///
/// Missing or empty body counts as a report with every field absent.
/// Sink failures surface in `details`, never as handler errors; only an
/// unanticipated internal error produces the generic 500.
#[instrument(name = "post_emergency", skip_all)]
pub async fn post_emergency(State(state): State<AppState>, body: Bytes) -> Response {
    match emergency_inner(&state, body).await {
        Ok(response) => response,
        Err(e) => {
            error!(error = %e, "Critical error while dispatching emergency");
            internal_error(&state, &e)
        }
    }
}

async fn emergency_inner(state: &AppState, body: Bytes) -> Result<Response, anyhow::Error> {
    let report: EmergencyReport = if body.is_empty() {
        EmergencyReport::default()
    } else {
        match serde_json::from_slice(&body) {
            Ok(report) => report,
            Err(e) => {
                info!(error = %e, "Rejected unparseable emergency body");
                let body = json!({ "success": false, "message": "Corpo della richiesta non valido" });
                return Ok((StatusCode::BAD_REQUEST, Json(body)).into_response());
            }
        }
    };

    info!(
        customer = %report.customer_display(),
        pet = %report.pet_display(),
        "New emergency received"
    );

    // Nothing configured at all: answer before attempting any dispatch.
    if state.coordinator.configured_sink_count() == 0 {
        let body = json!({
            "success": false,
            "message": "Nessun servizio configurato per l'invio emergenze",
            "details": [],
        });
        return Ok((StatusCode::SERVICE_UNAVAILABLE, Json(body)).into_response());
    }

    let result = state.coordinator.dispatch_emergency(&report).await;
    observability::record_emergency_dispatch(&result);

    let response = if result.overall_success {
        (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "message": "Emergenza inviata con successo",
                "details": result.outcomes,
            })),
        )
    } else {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "success": false,
                "message": "Errore nell'invio dell'emergenza a tutti i servizi",
                "details": result.outcomes,
            })),
        )
    };

    Ok(response.into_response())
}

#[derive(Debug, Deserialize)]
struct MessageRequest {
    #[serde(default)]
    message: Option<String>,
}

/// `POST /api/message`
///
/// Always acknowledges with 200 once a message is present; forwarding to
/// the chat sink is fire-and-forget and never affects the response.
#[instrument(name = "post_message", skip_all)]
pub async fn post_message(State(state): State<AppState>, body: Bytes) -> Response {
    let message = serde_json::from_slice::<MessageRequest>(&body)
        .ok()
        .and_then(|request| request.message)
        .filter(|message| !message.is_empty());

    let Some(message) = message else {
        let body = json!({ "success": false, "message": "Nessun messaggio fornito" });
        return (StatusCode::BAD_REQUEST, Json(body)).into_response();
    };

    info!(message = %message, "Message received");
    observability::record_message_received();

    state.coordinator.relay_plain_message(&message);

    Json(json!({
        "success": true,
        "response": format!("✅ Ho ricevuto il tuo messaggio: \"{message}\""),
        "timestamp": iso_timestamp(),
    }))
    .into_response()
}

/// `GET /api/test`
///
/// Probes each sink's configuration. The chat sink gets a live identity
/// check plus a real test notification; the webhook is reported but never
/// invoked so the automation workflow is not triggered.
#[instrument(name = "get_test", skip_all)]
pub async fn get_test(State(state): State<AppState>) -> Json<serde_json::Value> {
    info!("Configuration test requested");

    let mut telegram = json!({ "configured": false, "working": false, "error": null });
    if let Some(sink) = state.coordinator.telegram() {
        telegram["configured"] = json!(true);
        match probe_telegram(sink).await {
            Ok(()) => {
                telegram["working"] = json!(true);
                info!("Telegram test succeeded");
            }
            Err(e) => {
                telegram["error"] = json!(e.outcome_detail());
                error!(error = %e, "Telegram test failed");
            }
        }
    }

    let make = if state.config.webhook_configured() {
        // working stays a string sentinel on the wire
        json!({ "configured": true, "working": "not_tested", "error": null })
    } else {
        json!({ "configured": false, "working": false, "error": null })
    };

    Json(json!({
        "success": true,
        "message": "Test configurazione completato",
        "results": { "telegram": telegram, "make": make },
        "environment": {
            "version": env!("CARGO_PKG_VERSION"),
            "port": state.config.port,
            "profile": state.profile,
        },
    }))
}

async fn probe_telegram(sink: &TelegramSink) -> Result<(), RelayError> {
    let username = sink.get_me().await?;
    sink.send_test_message(&username).await
}

/// `GET /api/health`
///
/// Reports configuration presence only; never touches the network.
pub async fn get_health(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "OK",
        "uptime": state.uptime_secs(),
        "timestamp": iso_timestamp(),
        "services": {
            "telegram": state.config.telegram_configured(),
            "make": state.config.webhook_configured(),
        },
    }))
}

/// `GET /` - human-readable status page
pub async fn index(State(state): State<AppState>) -> Html<String> {
    let telegram = state.config.telegram_configured();
    let make = state.config.webhook_configured();

    Html(format!(
        r#"<html>
  <head>
    <title>Server Emergenze Veterinarie</title>
    <style>
      body {{ font-family: Arial, sans-serif; padding: 20px; }}
      .status {{ padding: 10px; border-radius: 5px; margin: 10px 0; }}
      .ok {{ background: #d4edda; color: #155724; }}
      .warning {{ background: #fff3cd; color: #856404; }}
    </style>
  </head>
  <body>
    <h1>🏥 Server Emergenze Veterinarie</h1>
    <div class="status {telegram_class}">
      Telegram: {telegram_label}
    </div>
    <div class="status {make_class}">
      Make Webhook: {make_label}
    </div>
    <p>
      <a href="/api/health">Health Check</a> |
      <a href="/api/test">Test Configurazione</a>
    </p>
  </body>
</html>"#,
        telegram_class = if telegram { "ok" } else { "warning" },
        telegram_label = if telegram { "✅ Configurato" } else { "⚠️ Non configurato" },
        make_class = if make { "ok" } else { "warning" },
        make_label = if make { "✅ Configurato" } else { "⚠️ Non configurato" },
    ))
}

/// Fallback for unmatched routes
pub async fn not_found(uri: Uri) -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "success": false,
            "message": "Endpoint non trovato",
            "path": uri.path(),
        })),
    )
}

/// Generic 500 body; internals leak only in diagnostic mode
fn internal_error(state: &AppState, err: &anyhow::Error) -> Response {
    let mut body = json!({ "success": false, "message": "Errore interno del server" });
    if state.diagnostic {
        body["error"] = json!(err.to_string());
    }
    (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
}

/// UTC ISO-8601 with millisecond precision, `Z` suffix
fn iso_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
