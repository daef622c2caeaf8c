// crates/personas-server/src/audit.rs
// ============================================================================
// Module: Personas Audit Logging
// Description: Structured audit events for persona request handling.
// Purpose: Emit JSON-lines request logs without hard dependencies.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! This module defines audit event payloads and sinks for persona request
//! logging. Events are serialized as single-line JSON so deployments can route
//! them to their preferred logging pipeline. Request bodies are never logged;
//! events carry only the route, persona id, and outcome.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Serialize;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Request outcome classification.
///
/// # Invariants
/// - Variants are stable for audit labeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PersonaOutcome {
    /// Request answered with a success status.
    Ok,
    /// Request answered with an error status.
    Error,
}

impl PersonaOutcome {
    /// Classifies an HTTP status code.
    #[must_use]
    pub const fn from_status(status: u16) -> Self {
        if matches!(status, 200..=299) { Self::Ok } else { Self::Error }
    }

    /// Returns a stable label for the outcome.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Error => "error",
        }
    }
}

/// Persona request audit event payload.
#[derive(Debug, Clone, Serialize)]
pub struct PersonaAuditEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// HTTP method.
    pub method: &'static str,
    /// Route template that handled the request.
    pub route: &'static str,
    /// Persona id from the path, or assigned on create.
    pub persona_id: Option<i64>,
    /// HTTP status code returned.
    pub status: u16,
    /// Request outcome.
    pub outcome: PersonaOutcome,
    /// Normalized error kind label.
    pub error_kind: Option<&'static str>,
    /// Handler duration in milliseconds.
    pub duration_ms: u128,
}

/// Inputs required to construct a request audit event.
pub struct PersonaAuditEventParams {
    /// HTTP method.
    pub method: &'static str,
    /// Route template that handled the request.
    pub route: &'static str,
    /// Persona id when known.
    pub persona_id: Option<i64>,
    /// HTTP status code returned.
    pub status: u16,
    /// Normalized error kind label.
    pub error_kind: Option<&'static str>,
    /// Handler duration in milliseconds.
    pub duration_ms: u128,
}

impl PersonaAuditEvent {
    /// Creates a new audit event with a consistent timestamp.
    #[must_use]
    pub fn new(params: &PersonaAuditEventParams) -> Self {
        Self {
            event: "persona_request",
            timestamp_ms: now_ms(),
            method: params.method,
            route: params.route,
            persona_id: params.persona_id,
            status: params.status,
            outcome: PersonaOutcome::from_status(params.status),
            error_kind: params.error_kind,
            duration_ms: params.duration_ms,
        }
    }
}

/// Server startup audit event payload.
#[derive(Debug, Clone, Serialize)]
pub struct ServerStartedEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Address the listener is bound to.
    pub bind: String,
    /// Store backend label.
    pub store: &'static str,
}

impl ServerStartedEvent {
    /// Creates a new startup event with a consistent timestamp.
    #[must_use]
    pub fn new(bind: String, store: &'static str) -> Self {
        Self {
            event: "server_started",
            timestamp_ms: now_ms(),
            bind,
            store,
        }
    }
}

// ============================================================================
// SECTION: Trait
// ============================================================================

/// Audit sink for persona server events.
pub trait PersonaAuditSink: Send + Sync {
    /// Record a request audit event.
    fn record(&self, event: &PersonaAuditEvent);

    /// Record a server startup event.
    fn record_started(&self, _event: &ServerStartedEvent) {}
}

/// Audit sink that logs JSON lines to stderr.
pub struct PersonaStderrAuditSink;

impl PersonaAuditSink for PersonaStderrAuditSink {
    fn record(&self, event: &PersonaAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(std::io::stderr(), "{payload}");
        }
    }

    fn record_started(&self, event: &ServerStartedEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(std::io::stderr(), "{payload}");
        }
    }
}

/// Audit sink that logs JSON lines to a file.
pub struct PersonaFileAuditSink {
    /// File handle used for append-only logging.
    file: Mutex<std::fs::File>,
}

impl PersonaFileAuditSink {
    /// Opens the audit log file in append mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn new(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }

    /// Appends one serialized payload as a line.
    fn append(&self, payload: &str) {
        if let Ok(mut file) = self.file.lock() {
            let _ = writeln!(file, "{payload}");
            let _ = file.flush();
        }
    }
}

impl PersonaAuditSink for PersonaFileAuditSink {
    fn record(&self, event: &PersonaAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            self.append(&payload);
        }
    }

    fn record_started(&self, event: &ServerStartedEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            self.append(&payload);
        }
    }
}

/// No-op audit sink.
pub struct PersonaNoopAuditSink;

impl PersonaAuditSink for PersonaNoopAuditSink {
    fn record(&self, _event: &PersonaAuditEvent) {}

    fn record_started(&self, _event: &ServerStartedEvent) {}
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Returns the current time in milliseconds since the Unix epoch.
fn now_ms() -> u128 {
    SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis()
}
