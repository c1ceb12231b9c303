//! # Integration Tests
//!
//! End-to-end tests against in-process mock sink servers.
//!
//! Covers:
//! - Coordinator dispatch against live mock Telegram/webhook endpoints
//! - The full HTTP surface through a spawned router
//! - Wire-contract assertions (payload shapes, status codes, envelope strings)

#[cfg(test)]
mod support {
    use std::net::SocketAddr;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use axum::http::StatusCode;
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use serde_json::{json, Value};
    use tokio::net::TcpListener;

    use contracts::{RelayConfig, TelegramConfig, WebhookConfig};

    /// One spawned mock sink endpoint
    pub struct MockSink {
        pub addr: SocketAddr,
        pub hits: Arc<AtomicUsize>,
        pub bodies: Arc<Mutex<Vec<Value>>>,
    }

    impl MockSink {
        pub fn hit_count(&self) -> usize {
            self.hits.load(Ordering::SeqCst)
        }

        pub fn recorded_bodies(&self) -> Vec<Value> {
            self.bodies.lock().unwrap().clone()
        }
    }

    async fn serve(app: Router) -> SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        addr
    }

    /// Mock automation webhook answering every POST with `status`
    pub async fn spawn_webhook(status: StatusCode) -> MockSink {
        let hits = Arc::new(AtomicUsize::new(0));
        let bodies = Arc::new(Mutex::new(Vec::new()));

        let app = Router::new().route(
            "/hook",
            post({
                let hits = hits.clone();
                let bodies = bodies.clone();
                move |Json(body): Json<Value>| {
                    let hits = hits.clone();
                    let bodies = bodies.clone();
                    async move {
                        hits.fetch_add(1, Ordering::SeqCst);
                        bodies.lock().unwrap().push(body);
                        status
                    }
                }
            }),
        );

        let addr = serve(app).await;
        MockSink { addr, hits, bodies }
    }

    /// Mock Telegram Bot API; `ok = false` rejects every call with a
    /// `chat not found` style envelope
    pub async fn spawn_telegram(ok: bool) -> MockSink {
        let hits = Arc::new(AtomicUsize::new(0));
        let bodies = Arc::new(Mutex::new(Vec::new()));

        let get_me = move || async move {
            if ok {
                Json(json!({ "ok": true, "result": { "username": "vet_relay_bot" } }))
            } else {
                Json(json!({ "ok": false, "description": "Unauthorized" }))
            }
        };

        let send_message = {
            let hits = hits.clone();
            let bodies = bodies.clone();
            move |Json(body): Json<Value>| {
                let hits = hits.clone();
                let bodies = bodies.clone();
                async move {
                    hits.fetch_add(1, Ordering::SeqCst);
                    bodies.lock().unwrap().push(body);
                    if ok {
                        Json(json!({ "ok": true, "result": { "message_id": 1 } }))
                    } else {
                        Json(json!({ "ok": false, "description": "Bad Request: chat not found" }))
                    }
                }
            }
        };

        let app = Router::new()
            .route("/bot{token}/getMe", get(get_me))
            .route("/bot{token}/sendMessage", post(send_message));

        let addr = serve(app).await;
        MockSink { addr, hits, bodies }
    }

    pub fn telegram_config(mock: &MockSink) -> TelegramConfig {
        TelegramConfig {
            bot_token: "123:abc".to_string(),
            chat_id: "-100200300".to_string(),
            api_base: format!("http://{}", mock.addr),
        }
    }

    pub fn webhook_config(mock: &MockSink) -> WebhookConfig {
        WebhookConfig {
            url: format!("http://{}/hook", mock.addr),
        }
    }

    /// Spawn the full relay HTTP surface, returns its base URL
    pub async fn spawn_relay(config: RelayConfig) -> String {
        let state = vet_relay_server::AppState::new(config).unwrap();
        let app = vet_relay_server::create_router(state);
        let addr = serve(app).await;
        format!("http://{addr}")
    }
}

#[cfg(test)]
mod dispatch_e2e {
    use axum::http::StatusCode;
    use contracts::{EmergencyReport, OutcomeStatus, RelayConfig};
    use dispatcher::Coordinator;

    use crate::support::*;

    fn report() -> EmergencyReport {
        EmergencyReport {
            customer_name: Some("Mario Rossi".to_string()),
            phone: None,
            message: Some("Il cane non respira bene".to_string()),
            pet_name: Some("Fido".to_string()),
            location: None,
        }
    }

    #[tokio::test]
    async fn test_both_sinks_succeed() {
        let webhook = spawn_webhook(StatusCode::OK).await;
        let telegram = spawn_telegram(true).await;

        let config = RelayConfig {
            telegram: Some(telegram_config(&telegram)),
            webhook: Some(webhook_config(&webhook)),
            ..Default::default()
        };
        let coordinator = Coordinator::from_config(&config).unwrap();

        let result = coordinator.dispatch_emergency(&report()).await;

        assert!(result.overall_success);
        assert_eq!(result.outcomes.len(), 2);
        assert_eq!(result.outcomes[0].service, "Make");
        assert_eq!(result.outcomes[0].status, OutcomeStatus::Success);
        assert_eq!(result.outcomes[1].service, "Telegram");
        assert_eq!(result.outcomes[1].status, OutcomeStatus::Success);

        // webhook payload: present fields plus timestamp, absent fields omitted
        let bodies = webhook.recorded_bodies();
        assert_eq!(bodies.len(), 1);
        let payload = bodies[0].as_object().unwrap();
        assert_eq!(payload["nome_cliente"], "Mario Rossi");
        assert_eq!(payload["pet"], "Fido");
        assert!(!payload.contains_key("telefono"));
        assert!(!payload.contains_key("posizione"));
        assert!(payload["timestamp"].as_str().unwrap().ends_with('Z'));

        // chat message: fixed template to the configured chat
        let sent = telegram.recorded_bodies();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0]["chat_id"], "-100200300");
        assert_eq!(sent[0]["parse_mode"], "Markdown");
        let text = sent[0]["text"].as_str().unwrap();
        assert!(text.starts_with("🚨 **EMERGENZA VETERINARIA** 🚨"));
        assert!(text.contains("**Telefono:** Non fornito"));
    }

    #[tokio::test]
    async fn test_webhook_rejection_with_chat_success_still_succeeds() {
        let webhook = spawn_webhook(StatusCode::INTERNAL_SERVER_ERROR).await;
        let telegram = spawn_telegram(true).await;

        let config = RelayConfig {
            telegram: Some(telegram_config(&telegram)),
            webhook: Some(webhook_config(&webhook)),
            ..Default::default()
        };
        let coordinator = Coordinator::from_config(&config).unwrap();

        let result = coordinator.dispatch_emergency(&report()).await;

        assert!(result.overall_success);
        assert_eq!(result.outcomes[0].status, OutcomeStatus::Failed);
        assert_eq!(result.outcomes[0].error.as_deref(), Some("HTTP 500"));
        assert_eq!(result.outcomes[1].status, OutcomeStatus::Success);
    }

    #[tokio::test]
    async fn test_chat_rejection_carries_api_description() {
        let webhook = spawn_webhook(StatusCode::OK).await;
        let telegram = spawn_telegram(false).await;

        let config = RelayConfig {
            telegram: Some(telegram_config(&telegram)),
            webhook: Some(webhook_config(&webhook)),
            ..Default::default()
        };
        let coordinator = Coordinator::from_config(&config).unwrap();

        let result = coordinator.dispatch_emergency(&report()).await;

        assert!(result.overall_success);
        assert_eq!(result.outcomes[1].status, OutcomeStatus::Failed);
        assert_eq!(
            result.outcomes[1].error.as_deref(),
            Some("Bad Request: chat not found")
        );
    }

    #[tokio::test]
    async fn test_all_sinks_failing_is_aggregated_not_raised() {
        let webhook = spawn_webhook(StatusCode::BAD_GATEWAY).await;
        let telegram = spawn_telegram(false).await;

        let config = RelayConfig {
            telegram: Some(telegram_config(&telegram)),
            webhook: Some(webhook_config(&webhook)),
            ..Default::default()
        };
        let coordinator = Coordinator::from_config(&config).unwrap();

        let result = coordinator.dispatch_emergency(&report()).await;

        assert!(!result.overall_success);
        assert!(result.all_failed());
        observability::record_emergency_dispatch(&result);
    }

    #[tokio::test]
    async fn test_loader_to_dispatch_round_trip() {
        let webhook = spawn_webhook(StatusCode::OK).await;
        let api_base = format!("http://{}", spawn_telegram(true).await.addr);
        let url = format!("http://{}/hook", webhook.addr);

        let config = config_loader::ConfigLoader::load_from_lookup(|key| match key {
            "TELEGRAM_BOT_TOKEN" => Some("123:abc".to_string()),
            "TELEGRAM_CHAT_ID" => Some("42".to_string()),
            "TELEGRAM_API_BASE" => Some(api_base.clone()),
            "MAKE_WEBHOOK_URL" => Some(url.clone()),
            _ => None,
        })
        .unwrap();

        let coordinator = Coordinator::from_config(&config).unwrap();
        let result = coordinator.dispatch_emergency(&report()).await;
        assert!(result.overall_success);
        assert_eq!(webhook.hit_count(), 1);
    }
}

#[cfg(test)]
mod http_surface {
    use axum::http::StatusCode;
    use contracts::RelayConfig;
    use serde_json::{json, Value};

    use crate::support::*;

    #[tokio::test]
    async fn test_emergency_accepted_when_any_sink_succeeds() {
        let webhook = spawn_webhook(StatusCode::OK).await;
        let telegram = spawn_telegram(false).await;

        let base = spawn_relay(RelayConfig {
            telegram: Some(telegram_config(&telegram)),
            webhook: Some(webhook_config(&webhook)),
            ..Default::default()
        })
        .await;

        let response = reqwest::Client::new()
            .post(format!("{base}/api/emergency"))
            .json(&json!({ "nome_cliente": "Mario", "pet": "Fido" }))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), 200);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "Emergenza inviata con successo");
        let details = body["details"].as_array().unwrap();
        assert_eq!(details.len(), 2);
        assert_eq!(details[0]["service"], "Make");
        assert_eq!(details[0]["status"], "success");
        assert_eq!(details[1]["service"], "Telegram");
        assert_eq!(details[1]["status"], "failed");
    }

    #[tokio::test]
    async fn test_emergency_without_configured_sinks_is_503() {
        let base = spawn_relay(RelayConfig::default()).await;

        let response = reqwest::Client::new()
            .post(format!("{base}/api/emergency"))
            .json(&json!({}))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), 503);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(
            body["message"],
            "Nessun servizio configurato per l'invio emergenze"
        );
        assert_eq!(body["details"], json!([]));
    }

    #[tokio::test]
    async fn test_emergency_with_all_sinks_failing_is_500() {
        let webhook = spawn_webhook(StatusCode::BAD_GATEWAY).await;
        let telegram = spawn_telegram(false).await;

        let base = spawn_relay(RelayConfig {
            telegram: Some(telegram_config(&telegram)),
            webhook: Some(webhook_config(&webhook)),
            ..Default::default()
        })
        .await;

        let response = reqwest::Client::new()
            .post(format!("{base}/api/emergency"))
            .json(&json!({ "messaggio": "aiuto" }))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), 500);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(
            body["message"],
            "Errore nell'invio dell'emergenza a tutti i servizi"
        );
        assert_eq!(body["details"].as_array().unwrap().len(), 2);
        assert_eq!(body["details"][0]["status"], "failed");
        assert_eq!(body["details"][1]["status"], "failed");
    }

    #[tokio::test]
    async fn test_message_echoes_input_even_without_chat_sink() {
        let base = spawn_relay(RelayConfig::default()).await;

        let response = reqwest::Client::new()
            .post(format!("{base}/api/message"))
            .json(&json!({ "message": "hello" }))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), 200);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["success"], true);
        assert_eq!(
            body["response"],
            "✅ Ho ricevuto il tuo messaggio: \"hello\""
        );
        assert!(body["timestamp"].as_str().unwrap().ends_with('Z'));
    }

    #[tokio::test]
    async fn test_message_without_message_key_is_400() {
        let base = spawn_relay(RelayConfig::default()).await;

        let response = reqwest::Client::new()
            .post(format!("{base}/api/message"))
            .json(&json!({}))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), 400);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["message"], "Nessun messaggio fornito");
    }

    #[tokio::test]
    async fn test_message_acknowledged_before_forwarding_completes() {
        // chat sink configured and reachable: the 200 must not depend on it
        let telegram = spawn_telegram(true).await;

        let base = spawn_relay(RelayConfig {
            telegram: Some(telegram_config(&telegram)),
            ..Default::default()
        })
        .await;

        let response = reqwest::Client::new()
            .post(format!("{base}/api/message"))
            .json(&json!({ "message": "ciao" }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 200);

        // the detached forward eventually reaches the mock
        for _ in 0..50 {
            if telegram.hit_count() > 0 {
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        }
        let sent = telegram.recorded_bodies();
        assert_eq!(sent.len(), 1);
        assert!(sent[0]["text"]
            .as_str()
            .unwrap()
            .starts_with("💬 **Messaggio ricevuto:**\nciao"));
    }

    #[tokio::test]
    async fn test_config_probe_never_invokes_webhook() {
        let webhook = spawn_webhook(StatusCode::OK).await;
        let telegram = spawn_telegram(true).await;

        let base = spawn_relay(RelayConfig {
            telegram: Some(telegram_config(&telegram)),
            webhook: Some(webhook_config(&webhook)),
            ..Default::default()
        })
        .await;

        let response = reqwest::Client::new()
            .get(format!("{base}/api/test"))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), 200);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["message"], "Test configurazione completato");
        assert_eq!(body["results"]["telegram"]["configured"], true);
        assert_eq!(body["results"]["telegram"]["working"], true);
        assert_eq!(body["results"]["make"]["configured"], true);
        assert_eq!(body["results"]["make"]["working"], "not_tested");

        // live test notification went to the chat, webhook stayed untouched
        assert_eq!(telegram.hit_count(), 1);
        assert_eq!(webhook.hit_count(), 0);
        let text = telegram.recorded_bodies()[0]["text"]
            .as_str()
            .unwrap()
            .to_string();
        assert!(text.starts_with("🧪 **Test Configurazione**\nBot: @vet_relay_bot"));
    }

    #[tokio::test]
    async fn test_health_is_static_configuration_presence() {
        let telegram = spawn_telegram(false).await; // unreachable results don't matter

        let base = spawn_relay(RelayConfig {
            telegram: Some(telegram_config(&telegram)),
            ..Default::default()
        })
        .await;

        let response = reqwest::Client::new()
            .get(format!("{base}/api/health"))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), 200);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["status"], "OK");
        assert_eq!(body["services"]["telegram"], true);
        assert_eq!(body["services"]["make"], false);
        // no network call was made to the sink
        assert_eq!(telegram.hit_count(), 0);
    }

    #[tokio::test]
    async fn test_unmatched_route_is_json_404_with_path() {
        let base = spawn_relay(RelayConfig::default()).await;

        let response = reqwest::Client::new()
            .get(format!("{base}/api/missing"))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), 404);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Endpoint non trovato");
        assert_eq!(body["path"], "/api/missing");
    }

    #[tokio::test]
    async fn test_status_page_is_html() {
        let base = spawn_relay(RelayConfig::default()).await;

        let response = reqwest::Client::new()
            .get(format!("{base}/"))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), 200);
        let body = response.text().await.unwrap();
        assert!(body.contains("Server Emergenze Veterinarie"));
        assert!(body.contains("⚠️ Non configurato"));
    }
}
