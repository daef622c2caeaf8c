// crates/personas-server/tests/persona_routes.rs
// ============================================================================
// Module: Persona Route Tests
// Description: End-to-end HTTP tests for the `/personas` routes.
// Purpose: Validate status codes, JSON bodies, and audit events over HTTP.
// Dependencies: personas-server, personas-core, reqwest, tokio, tempfile
// ============================================================================

//! ## Overview
//! Each test binds a server to `127.0.0.1:0`, drives it with a reqwest client,
//! and shuts it down through a oneshot channel.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only assertions and helpers are permitted."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;
use std::sync::Mutex;

use personas_config::PersonasConfig;
use personas_core::InMemoryPersonaStore;
use personas_core::SharedPersonaStore;
use personas_server::PersonaAuditEvent;
use personas_server::PersonaAuditSink;
use personas_server::PersonaOutcome;
use personas_server::PersonaServer;
use personas_server::PersonaServerError;
use personas_server::ServerStartedEvent;
use reqwest::StatusCode;
use serde_json::Value;
use serde_json::json;
use tempfile::TempDir;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

// ============================================================================
// SECTION: Helpers
// ============================================================================

#[derive(Default)]
struct RecordingAuditSink {
    requests: Mutex<Vec<PersonaAuditEvent>>,
    started: Mutex<Vec<ServerStartedEvent>>,
}

impl RecordingAuditSink {
    fn requests(&self) -> Vec<PersonaAuditEvent> {
        self.requests.lock().unwrap().clone()
    }
}

impl PersonaAuditSink for RecordingAuditSink {
    fn record(&self, event: &PersonaAuditEvent) {
        self.requests.lock().unwrap().push(event.clone());
    }

    fn record_started(&self, event: &ServerStartedEvent) {
        self.started.lock().unwrap().push(event.clone());
    }
}

struct TestServer {
    base_url: String,
    client: reqwest::Client,
    shutdown: Option<oneshot::Sender<()>>,
    handle: JoinHandle<Result<(), PersonaServerError>>,
}

impl TestServer {
    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn stop(mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        self.handle.await.expect("join server").expect("server result");
    }
}

async fn spawn_server(server: PersonaServer) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    let (tx, rx) = oneshot::channel::<()>();
    let handle = tokio::spawn(server.serve_with_listener(listener, async move {
        let _ = rx.await;
    }));
    TestServer {
        base_url: format!("http://{addr}"),
        client: reqwest::Client::new(),
        shutdown: Some(tx),
        handle,
    }
}

async fn spawn_memory_server(config: PersonasConfig) -> (TestServer, Arc<RecordingAuditSink>) {
    let audit = Arc::new(RecordingAuditSink::default());
    let sink: Arc<dyn PersonaAuditSink> = audit.clone();
    let store = SharedPersonaStore::from_store(InMemoryPersonaStore::new());
    let server = PersonaServer::with_parts(config, store, sink).expect("server");
    (spawn_server(server).await, audit)
}

fn config_from(toml: &str) -> PersonasConfig {
    PersonasConfig::parse(toml).expect("config")
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn crud_lifecycle_over_http() {
    let (server, _audit) = spawn_memory_server(PersonasConfig::default()).await;
    let client = &server.client;

    let created: Value = client
        .post(server.url("/personas"))
        .json(&json!({"pnombre": "Ana", "edad": 30}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(created, json!({"id": 1, "pnombre": "Ana", "edad": 30}));

    let fetched: Value =
        client.get(server.url("/personas/1")).send().await.unwrap().json().await.unwrap();
    assert_eq!(fetched, created);

    let updated: Value = client
        .put(server.url("/personas/1"))
        .json(&json!({"pnombre": "Ana", "edad": 31}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(updated, json!({"id": 1, "pnombre": "Ana", "edad": 31}));

    let deleted = client.delete(server.url("/personas/1")).send().await.unwrap();
    assert_eq!(deleted.status(), StatusCode::OK);
    assert!(deleted.text().await.unwrap().is_empty());

    let missing = client.get(server.url("/personas/1")).send().await.unwrap();
    assert_eq!(missing.status(), StatusCode::OK);
    assert_eq!(missing.text().await.unwrap(), "null");

    server.stop().await;
}

#[tokio::test(flavor = "multi_thread")]
async fn list_returns_array_in_id_order() {
    let (server, _audit) = spawn_memory_server(PersonasConfig::default()).await;
    let empty: Value =
        server.client.get(server.url("/personas")).send().await.unwrap().json().await.unwrap();
    assert_eq!(empty, json!([]));

    for body in [json!({"pnombre": "Ana", "edad": 30}), json!({"pnombre": "Luis"})] {
        let status =
            server.client.post(server.url("/personas")).json(&body).send().await.unwrap().status();
        assert_eq!(status, StatusCode::OK);
    }
    let listed: Value =
        server.client.get(server.url("/personas")).send().await.unwrap().json().await.unwrap();
    assert_eq!(
        listed,
        json!([
            {"id": 1, "pnombre": "Ana", "edad": 30},
            {"id": 2, "pnombre": "Luis", "edad": null},
        ])
    );
    server.stop().await;
}

#[tokio::test(flavor = "multi_thread")]
async fn create_ignores_client_supplied_id() {
    let (server, _audit) = spawn_memory_server(PersonasConfig::default()).await;
    let created: Value = server
        .client
        .post(server.url("/personas"))
        .json(&json!({"id": 42, "pnombre": "Eva", "edad": 22}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(created["id"], json!(1));
    server.stop().await;
}

#[tokio::test(flavor = "multi_thread")]
async fn update_unknown_id_returns_null_and_creates_nothing() {
    let (server, _audit) = spawn_memory_server(PersonasConfig::default()).await;
    let response = server
        .client
        .put(server.url("/personas/9"))
        .json(&json!({"pnombre": "Ana", "edad": 30}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.text().await.unwrap(), "null");
    let listed: Value =
        server.client.get(server.url("/personas")).send().await.unwrap().json().await.unwrap();
    assert_eq!(listed, json!([]));
    server.stop().await;
}

#[tokio::test(flavor = "multi_thread")]
async fn update_without_age_clears_it() {
    let (server, _audit) = spawn_memory_server(PersonasConfig::default()).await;
    server
        .client
        .post(server.url("/personas"))
        .json(&json!({"pnombre": "Ana", "edad": 30}))
        .send()
        .await
        .unwrap();
    let updated: Value = server
        .client
        .put(server.url("/personas/1"))
        .json(&json!({"pnombre": "Ana"}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(updated, json!({"id": 1, "pnombre": "Ana", "edad": null}));
    server.stop().await;
}

#[tokio::test(flavor = "multi_thread")]
async fn missing_name_is_a_plain_text_server_error() {
    let (server, audit) = spawn_memory_server(PersonasConfig::default()).await;
    let response = server
        .client
        .post(server.url("/personas"))
        .json(&json!({"edad": 30}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response.text().await.unwrap().contains("pnombre"));

    server
        .client
        .post(server.url("/personas"))
        .json(&json!({"pnombre": "Ana", "edad": 30}))
        .send()
        .await
        .unwrap();
    let response = server
        .client
        .put(server.url("/personas/1"))
        .json(&json!({"edad": 40}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let unchanged: Value =
        server.client.get(server.url("/personas/1")).send().await.unwrap().json().await.unwrap();
    assert_eq!(unchanged, json!({"id": 1, "pnombre": "Ana", "edad": 30}));

    let first = &audit.requests()[0];
    assert_eq!(first.status, 500);
    assert_eq!(first.outcome, PersonaOutcome::Error);
    assert_eq!(first.error_kind, Some("constraint"));
    server.stop().await;
}

#[tokio::test(flavor = "multi_thread")]
async fn extractor_rejections_keep_client_error_status() {
    let (server, audit) = spawn_memory_server(PersonasConfig::default()).await;
    let bad_id = server.client.get(server.url("/personas/abc")).send().await.unwrap();
    assert_eq!(bad_id.status(), StatusCode::BAD_REQUEST);

    let malformed = server
        .client
        .post(server.url("/personas"))
        .header("content-type", "application/json")
        .body("{\"pnombre\":")
        .send()
        .await
        .unwrap();
    assert_eq!(malformed.status(), StatusCode::BAD_REQUEST);

    let wrong_type = server
        .client
        .post(server.url("/personas"))
        .json(&json!({"pnombre": "Ana", "edad": "treinta"}))
        .send()
        .await
        .unwrap();
    assert_eq!(wrong_type.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let no_content_type =
        server.client.post(server.url("/personas")).body("{}").send().await.unwrap();
    assert_eq!(no_content_type.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);

    let kinds: Vec<_> = audit.requests().iter().map(|event| event.error_kind).collect();
    assert_eq!(kinds[0], Some("invalid_path"));
    assert!(kinds[1..].iter().all(|kind| *kind == Some("invalid_body")));
    server.stop().await;
}

#[tokio::test(flavor = "multi_thread")]
async fn oversized_body_is_rejected() {
    let config = config_from("[server]\nmax_body_bytes = 64\n");
    let (server, audit) = spawn_memory_server(config).await;
    let response = server
        .client
        .post(server.url("/personas"))
        .json(&json!({"pnombre": "a".repeat(256), "edad": 1}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(audit.requests()[0].error_kind, Some("body_too_large"));
    server.stop().await;
}

#[tokio::test(flavor = "multi_thread")]
async fn audit_records_one_event_per_request() {
    let (server, audit) = spawn_memory_server(PersonasConfig::default()).await;
    server
        .client
        .post(server.url("/personas"))
        .json(&json!({"pnombre": "Ana", "edad": 30}))
        .send()
        .await
        .unwrap();
    server.client.get(server.url("/personas/1")).send().await.unwrap();
    server.client.delete(server.url("/personas/1")).send().await.unwrap();

    let events = audit.requests();
    let summary: Vec<_> = events
        .iter()
        .map(|event| (event.method, event.route, event.persona_id, event.status))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("POST", "/personas", Some(1), 200),
            ("GET", "/personas/{id}", Some(1), 200),
            ("DELETE", "/personas/{id}", Some(1), 200),
        ]
    );
    assert!(events.iter().all(|event| event.event == "persona_request"));
    assert!(events.iter().all(|event| event.outcome == PersonaOutcome::Ok));

    let started = audit.started.lock().unwrap().clone();
    assert_eq!(started.len(), 1);
    assert_eq!(started[0].store, "memory");
    assert!(server.base_url.ends_with(&started[0].bind));
    server.stop().await;
}

#[tokio::test(flavor = "multi_thread")]
async fn sqlite_backed_server_persists_across_restart() {
    let temp = TempDir::new().unwrap();
    let db_path = temp.path().join("data").join("personas.sqlite");
    let audit_path = temp.path().join("audit.jsonl");
    let toml = format!(
        "[server.audit]\npath = {audit:?}\n\n[store]\ntype = \"sqlite\"\npath = {db:?}\n",
        audit = audit_path.display().to_string(),
        db = db_path.display().to_string(),
    );

    let server = spawn_server(PersonaServer::from_config(config_from(&toml)).unwrap()).await;
    server
        .client
        .post(server.url("/personas"))
        .json(&json!({"pnombre": "Ana", "edad": 30}))
        .send()
        .await
        .unwrap();
    server.stop().await;

    let server = spawn_server(PersonaServer::from_config(config_from(&toml)).unwrap()).await;
    let fetched: Value =
        server.client.get(server.url("/personas/1")).send().await.unwrap().json().await.unwrap();
    assert_eq!(fetched, json!({"id": 1, "pnombre": "Ana", "edad": 30}));
    server.stop().await;

    let log = std::fs::read_to_string(&audit_path).unwrap();
    let events: Vec<Value> =
        log.lines().map(|line| serde_json::from_str(line).unwrap()).collect();
    let names: Vec<&str> = events.iter().map(|event| event["event"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["server_started", "persona_request", "server_started", "persona_request"]);
    assert_eq!(events[0]["store"], json!("sqlite"));
    assert_eq!(events[3]["route"], json!("/personas/{id}"));
}

#[test]
fn invalid_config_is_rejected_at_construction() {
    let mut config = PersonasConfig::default();
    config.server.max_body_bytes = 0;
    let result = PersonaServer::from_config(config);
    assert!(matches!(result, Err(PersonaServerError::Config(_))));
}
